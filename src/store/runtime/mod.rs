pub mod initialize;
pub mod queries;
pub mod refresh;


use parking_lot::Mutex;
use std::sync::Arc;

use super::ExploreStore;
use super::action::Action;
use crate::domain::{PaneId, PaneState, TimeZone, UserProfile};
use crate::infra::app_config::ExploreConfig;
use crate::infra::datasource::DatasourceService;
use crate::infra::query_runner::QueryRunner;
use crate::infra::rich_history::RichHistoryStore;
use crate::infra::time_range::get_time_zone;

pub use initialize::InitializeExplore;

/// Drives panes through initialization and URL refreshes.
///
/// Async procedures gather their inputs first, then issue a strictly ordered
/// run of synchronous dispatches. The store lock is never held across an
/// `.await`. Callers serialize refreshes of the same pane themselves; when
/// they do not, the last procedure to dispatch wins.
pub struct ExploreRuntime {
    store: Arc<Mutex<ExploreStore>>,
    datasources: Arc<dyn DatasourceService>,
    query_runner: Arc<dyn QueryRunner>,
    rich_history: Arc<dyn RichHistoryStore>,
    user: UserProfile,
    config: ExploreConfig,
}

impl ExploreRuntime {
    pub fn new(
        datasources: Arc<dyn DatasourceService>,
        query_runner: Arc<dyn QueryRunner>,
        rich_history: Arc<dyn RichHistoryStore>,
    ) -> Self {
        Self {
            store: Arc::new(Mutex::new(ExploreStore::new())),
            datasources,
            query_runner,
            rich_history,
            user: UserProfile::default(),
            config: ExploreConfig::default(),
        }
    }

    pub fn with_user(mut self, user: UserProfile) -> Self {
        self.user = user;
        self
    }

    pub fn with_config(mut self, config: ExploreConfig) -> Self {
        self.config = config;
        self
    }

    pub fn store(&self) -> Arc<Mutex<ExploreStore>> {
        self.store.clone()
    }

    pub fn dispatch(&self, action: Action) {
        self.store.lock().dispatch(action);
    }

    /// Snapshot of a pane's state.
    pub fn pane(&self, pane_id: PaneId) -> Option<PaneState> {
        self.store.lock().pane(pane_id).cloned()
    }

    pub fn mount_pane(&self, pane_id: PaneId) {
        self.dispatch(Action::MountPane(pane_id));
    }

    pub fn unmount_pane(&self, pane_id: PaneId) {
        self.dispatch(Action::UnmountPane(pane_id));
    }

    pub fn time_zone(&self) -> TimeZone {
        get_time_zone(&self.user, self.config.default_time_zone)
    }

    /// Re-reads the persisted rich history into the store.
    pub fn update_rich_history(&self) {
        let items = self.rich_history.get_rich_history();
        self.dispatch(Action::RichHistoryUpdated(items));
    }
}
