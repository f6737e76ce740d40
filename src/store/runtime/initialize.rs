use super::ExploreRuntime;
use crate::domain::{EventBridge, ExploreError, ExploreResult, PaneId, Query, TimeRange, ensure_ref_ids};
use crate::store::action::InitializePayload;

/// Arguments of [`ExploreRuntime::initialize_explore`].
#[derive(Debug, Clone)]
pub struct InitializeExplore {
    pub pane_id: PaneId,
    /// `None` resolves to the default datasource.
    pub datasource_name: Option<String>,
    pub queries: Vec<Query>,
    pub range: TimeRange,
    pub container_width: f32,
    pub event_bridge: EventBridge,
    pub origin_panel_id: Option<i64>,
}

impl ExploreRuntime {
    /// Loads the datasource and its history, initializes the pane, updates
    /// its time range and runs its queries when a datasource was resolved.
    /// The rich-history snapshot is refreshed whatever the outcome.
    pub async fn initialize_explore(&self, args: InitializeExplore) -> ExploreResult<()> {
        let result = self.initialize_pane(args).await;
        self.update_rich_history();
        result
    }

    async fn initialize_pane(&self, args: InitializeExplore) -> ExploreResult<()> {
        let pane_id = args.pane_id;
        let generation = self
            .store
            .lock()
            .begin_initialize(pane_id)
            .ok_or(ExploreError::PaneNotMounted(pane_id))?;

        log::info!(
            "Initializing pane {} with datasource {}",
            pane_id,
            args.datasource_name.as_deref().unwrap_or("<default>")
        );

        let loaded = if self.datasources.explore_datasources().is_empty() {
            log::info!("No datasources configured, pane {pane_id} starts without one");
            None
        } else {
            let loaded = self
                .datasources
                .load_and_init(self.config.org_id, args.datasource_name.as_deref())
                .await
                .map_err(|err| err.downcast::<ExploreError>().unwrap_or_else(ExploreError::from))?;
            Some(loaded)
        };

        let (datasource_instance, history) = match loaded {
            Some(loaded) => (Some(loaded.instance), loaded.history),
            None => (None, Vec::new()),
        };
        let has_datasource = datasource_instance.is_some();

        let payload = InitializePayload {
            container_width: args.container_width,
            event_bridge: args.event_bridge,
            queries: ensure_ref_ids(args.queries),
            range: args.range,
            origin_panel_id: args.origin_panel_id,
            datasource_instance,
            datasource_ref: args.datasource_name,
            history,
        };
        if !self
            .store
            .lock()
            .initialize_if_current(pane_id, generation, payload)
        {
            log::debug!("Initialization {generation} of pane {pane_id} was superseded");
            return Ok(());
        }

        self.update_time(pane_id, None);
        if has_datasource {
            self.run_queries(pane_id).await;
        }
        Ok(())
    }
}
