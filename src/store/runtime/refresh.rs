use super::ExploreRuntime;
use super::initialize::InitializeExplore;
use crate::application::projection::get_url_state_from_pane_state;
use crate::application::url_diff::get_url_diff_with_default;
use crate::domain::{ExploreResult, PaneId, ViewState, ensure_ref_ids};
use crate::infra::time_range::get_time_range_from_url;
use crate::infra::url_state::parse_url_state;
use crate::store::action::Action;

impl ExploreRuntime {
    /// Reconciles an initialized pane with the URL state in `url_state`.
    ///
    /// A datasource change re-initializes the pane. Otherwise a range change
    /// updates the time and a query change replaces the query list; either
    /// one triggers exactly one query run. Uninitialized panes are left alone.
    pub async fn refresh_explore(&self, pane_id: PaneId, url_state: &str) -> ExploreResult<()> {
        let Some(current) = self.pane(pane_id).filter(|pane| pane.initialized) else {
            return Ok(());
        };

        let parsed = parse_url_state(url_state);
        let incoming = ViewState {
            queries: Some(ensure_ref_ids(parsed.queries.clone().unwrap_or_default())),
            ..parsed
        };
        let diff = get_url_diff_with_default(
            Some(&get_url_state_from_pane_state(&current)),
            Some(&incoming),
            &self.config.default_range,
        );
        log::debug!("Refreshing pane {pane_id}: {diff:?}");
        if diff.is_empty() {
            return Ok(());
        }

        let raw_range = incoming
            .range
            .clone()
            .unwrap_or_else(|| self.config.default_range.clone());
        let queries = incoming.queries.unwrap_or_default();

        if diff.datasource {
            let range = get_time_range_from_url(&raw_range, self.time_zone());
            return self
                .initialize_explore(InitializeExplore {
                    pane_id,
                    datasource_name: incoming.datasource,
                    queries,
                    range,
                    container_width: current.container_width,
                    event_bridge: current.event_bridge.unwrap_or_default(),
                    origin_panel_id: current.origin_panel_id,
                })
                .await;
        }

        if diff.range {
            self.update_time(pane_id, Some(raw_range));
        }
        if diff.queries {
            self.dispatch(Action::set_queries(pane_id, queries));
        }
        self.run_queries(pane_id).await;
        Ok(())
    }
}
