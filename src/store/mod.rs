//! Reducer-style pane state + the async orchestration that feeds it.

mod action;
mod reducer;
mod runtime;

pub use action::{
    Action, DatasourceAction, HistoryAction, InitializePayload, PaneAction, QueryAction,
    TimeAction,
};
pub use reducer::reduce as reduce_pane;
pub use runtime::{ExploreRuntime, InitializeExplore};

use std::collections::HashMap;

use crate::domain::{PaneId, PaneState, RichHistoryItem};

#[derive(Debug, Default)]
struct PaneSlot {
    state: PaneState,
    /// Bumped by every `initialize`; lets a late resolution detect it was superseded.
    generation: u64,
}

/// Pane states keyed by pane identity, plus the shared rich-history snapshot.
#[derive(Debug, Default)]
pub struct ExploreStore {
    panes: HashMap<PaneId, PaneSlot>,
    rich_history: Vec<RichHistoryItem>,
    dispatched: u64,
    /// Store-wide so a remounted pane never reuses an old token.
    last_generation: u64,
}

impl ExploreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&mut self, action: Action) {
        self.dispatched += 1;
        match action {
            Action::MountPane(pane_id) => {
                self.panes.insert(pane_id, PaneSlot::default());
            }
            Action::UnmountPane(pane_id) => {
                self.panes.remove(&pane_id);
            }
            Action::Pane { pane_id, action } => {
                let Some(slot) = self.panes.get_mut(&pane_id) else {
                    log::debug!("Dropping {action:?} for unmounted pane {pane_id}");
                    return;
                };
                slot.state = reducer::reduce(std::mem::take(&mut slot.state), action);
            }
            Action::RichHistoryUpdated(items) => {
                self.rich_history = items;
            }
        }
    }

    pub fn pane(&self, pane_id: PaneId) -> Option<&PaneState> {
        self.panes.get(&pane_id).map(|slot| &slot.state)
    }

    pub fn pane_ids(&self) -> Vec<PaneId> {
        let mut ids: Vec<_> = self.panes.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn rich_history(&self) -> &[RichHistoryItem] {
        &self.rich_history
    }

    /// Number of actions dispatched so far, dropped ones included.
    pub fn dispatch_count(&self) -> u64 {
        self.dispatched
    }

    /// Starts a new initialization of `pane_id`, returning its token, or
    /// `None` if the pane is not mounted.
    pub fn begin_initialize(&mut self, pane_id: PaneId) -> Option<u64> {
        let slot = self.panes.get_mut(&pane_id)?;
        self.last_generation += 1;
        slot.generation = self.last_generation;
        Some(slot.generation)
    }

    /// Whether `generation` is still the latest initialization of a mounted pane.
    pub fn is_current(&self, pane_id: PaneId, generation: u64) -> bool {
        self.panes
            .get(&pane_id)
            .is_some_and(|slot| slot.generation == generation)
    }

    /// Applies `Initialize` only if `generation` is still current. Check and
    /// dispatch happen under the same borrow, so a newer initialization can
    /// never be overwritten by a stale one.
    pub fn initialize_if_current(
        &mut self,
        pane_id: PaneId,
        generation: u64,
        payload: InitializePayload,
    ) -> bool {
        if !self.is_current(pane_id, generation) {
            return false;
        }
        self.dispatch(Action::initialize(pane_id, payload));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DedupStrategy, EventBridge, LogLevel, Query, TimeRange};

    #[test]
    fn panes_are_independent() {
        let mut store = ExploreStore::new();
        store.dispatch(Action::MountPane(PaneId::Left));
        store.dispatch(Action::MountPane(PaneId::Right));

        store.dispatch(Action::change_size(PaneId::Left, 800.0, 600.0));
        store.dispatch(Action::change_dedup_strategy(PaneId::Right, DedupStrategy::Numbers));

        let left = store.pane(PaneId::Left).unwrap();
        let right = store.pane(PaneId::Right).unwrap();
        assert_eq!(left.container_width, 800.0);
        assert_eq!(left.dedup_strategy, DedupStrategy::None);
        assert_eq!(right.container_width, 0.0);
        assert_eq!(right.dedup_strategy, DedupStrategy::Numbers);
        assert_eq!(store.pane_ids(), vec![PaneId::Left, PaneId::Right]);
    }

    #[test]
    fn actions_for_unmounted_panes_are_dropped() {
        let mut store = ExploreStore::new();
        store.dispatch(Action::toggle_log_level(PaneId::Right, &[LogLevel::Debug]));
        assert!(store.pane(PaneId::Right).is_none());
        assert_eq!(store.dispatch_count(), 1);
    }

    #[test]
    fn unmount_discards_state() {
        let mut store = ExploreStore::new();
        store.dispatch(Action::MountPane(PaneId::Left));
        store.dispatch(Action::highlight_logs_expression(PaneId::Left, vec!["err".into()]));
        store.dispatch(Action::UnmountPane(PaneId::Left));
        store.dispatch(Action::MountPane(PaneId::Left));
        assert_eq!(store.pane(PaneId::Left), Some(&PaneState::default()));
    }

    #[test]
    fn toggle_log_level_copies_the_callers_levels() {
        let mut store = ExploreStore::new();
        store.dispatch(Action::MountPane(PaneId::Left));
        let mut levels = vec![LogLevel::Debug];
        store.dispatch(Action::toggle_log_level(PaneId::Left, &levels));
        levels.push(LogLevel::Error);

        let hidden = &store.pane(PaneId::Left).unwrap().hidden_log_levels;
        assert_eq!(hidden.len(), 1);
        assert!(hidden.contains(&LogLevel::Debug));
    }

    #[test]
    fn generations_track_the_latest_initialize() {
        let mut store = ExploreStore::new();
        assert_eq!(store.begin_initialize(PaneId::Left), None);

        store.dispatch(Action::MountPane(PaneId::Left));
        let first = store.begin_initialize(PaneId::Left).unwrap();
        let second = store.begin_initialize(PaneId::Left).unwrap();
        assert!(!store.is_current(PaneId::Left, first));
        assert!(store.is_current(PaneId::Left, second));

        store.dispatch(Action::UnmountPane(PaneId::Left));
        assert!(!store.is_current(PaneId::Left, second));

        store.dispatch(Action::MountPane(PaneId::Left));
        let third = store.begin_initialize(PaneId::Left).unwrap();
        assert_ne!(third, second);
        assert!(!store.is_current(PaneId::Left, second));
    }

    #[test]
    fn stale_initialize_never_overwrites_a_newer_one() {
        let payload = |datasource: &str, width: f32| InitializePayload {
            container_width: width,
            event_bridge: EventBridge::new(),
            queries: vec![Query::new("A")],
            range: TimeRange::default(),
            origin_panel_id: None,
            datasource_instance: None,
            datasource_ref: Some(datasource.into()),
            history: Vec::new(),
        };

        let mut store = ExploreStore::new();
        store.dispatch(Action::MountPane(PaneId::Left));
        let stale = store.begin_initialize(PaneId::Left).unwrap();
        let fresh = store.begin_initialize(PaneId::Left).unwrap();

        assert!(store.initialize_if_current(PaneId::Left, fresh, payload("B", 640.0)));
        let dispatched = store.dispatch_count();
        assert!(!store.initialize_if_current(PaneId::Left, stale, payload("A", 320.0)));
        assert_eq!(store.dispatch_count(), dispatched);

        let pane = store.pane(PaneId::Left).unwrap();
        assert_eq!(pane.datasource_ref.as_deref(), Some("B"));
        assert_eq!(pane.container_width, 640.0);
    }
}
