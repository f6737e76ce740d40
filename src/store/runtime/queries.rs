use chrono::Utc;

use super::ExploreRuntime;
use crate::domain::{
    EventBridge, ExploreError, LoadingState, PaneEvent, PaneId, QueryResponse, RawTimeRange, has_visible_queries,
};
use crate::infra::query_runner::{QueryRequest, calculate_interval_ms};
use crate::infra::time_range::get_time_range_from_url;
use crate::store::action::{Action, HistoryAction, PaneAction, QueryAction};

impl ExploreRuntime {
    /// Recomputes the pane's absolute range from `raw`, or from the pane's
    /// current raw range when `raw` is `None`.
    pub fn update_time(&self, pane_id: PaneId, raw: Option<RawTimeRange>) {
        let mut store = self.store.lock();
        let Some(pane) = store.pane(pane_id) else {
            return;
        };
        let raw = raw.unwrap_or_else(|| pane.range.raw.clone());
        let range = get_time_range_from_url(&raw, self.time_zone());
        store.dispatch(Action::change_range(pane_id, range));
    }

    /// Runs the pane's queries against its datasource and stores the response.
    ///
    /// Does nothing for a pane without a datasource or without visible
    /// queries. Query-engine failures end up in `query_response.error`.
    pub async fn run_queries(&self, pane_id: PaneId) {
        let Some((request, bridge)) = self.start_query_run(pane_id) else {
            return;
        };
        let request_id = request.request_id.clone();
        log::debug!(
            "Running {} queries for pane {} ({})",
            request.queries.len(),
            pane_id,
            request_id
        );

        self.record_history(pane_id, &request).await;
        if let Some(bridge) = &bridge {
            bridge.emit(PaneEvent::QueryStarted {
                request_id: request_id.clone(),
            });
        }

        let response = match self.query_runner.run(request).await {
            Ok(series) => QueryResponse {
                state: LoadingState::Done,
                request_id: Some(request_id.clone()),
                series,
                error: None,
            },
            Err(err) => {
                log::warn!("Queries for pane {pane_id} failed: {err:#}");
                QueryResponse {
                    state: LoadingState::Error,
                    request_id: Some(request_id.clone()),
                    series: Vec::new(),
                    error: Some(ExploreError::QueryFailed(format!("{err:#}")).to_string()),
                }
            }
        };
        let state = response.state;

        self.dispatch(Action::pane(
            pane_id,
            PaneAction::Query(QueryAction::QueryResponseReceived(response)),
        ));
        if let Some(bridge) = &bridge {
            bridge.emit(PaneEvent::QueryFinished { request_id, state });
        }
    }

    // Builds the request and marks the pane as loading, in one critical section.
    fn start_query_run(&self, pane_id: PaneId) -> Option<(QueryRequest, Option<EventBridge>)> {
        let mut store = self.store.lock();
        let pane = store.pane(pane_id)?;
        let datasource = pane.datasource_instance.clone()?;
        if !has_visible_queries(&pane.queries) {
            return None;
        }

        let min_interval_ms = datasource
            .min_interval_ms
            .unwrap_or(self.config.min_interval_ms);
        let max_data_points = pane.container_width.max(1.0).round() as u32;
        let request = QueryRequest {
            request_id: uuid::Uuid::new_v4().to_string(),
            datasource,
            queries: pane.queries.iter().filter(|q| !q.hide).cloned().collect(),
            interval_ms: calculate_interval_ms(&pane.range, max_data_points, min_interval_ms),
            range: pane.range.clone(),
            max_data_points,
        };
        let bridge = pane.event_bridge.clone();

        store.dispatch(Action::pane(
            pane_id,
            PaneAction::Query(QueryAction::QueriesStarted {
                request_id: request.request_id.clone(),
            }),
        ));
        store.dispatch(Action::pane(
            pane_id,
            PaneAction::History(HistoryAction::Append {
                ts: Utc::now().timestamp_millis(),
                queries: request.queries.clone(),
                max_items: self.config.max_history_items,
            }),
        ));
        Some((request, bridge))
    }

    async fn record_history(&self, pane_id: PaneId, request: &QueryRequest) {
        let ts = Utc::now().timestamp_millis();
        self.rich_history
            .add_to_rich_history(ts, &request.datasource.name, &request.queries);

        let history = self
            .pane(pane_id)
            .map(|pane| pane.history)
            .unwrap_or_default();
        if let Err(err) = self
            .datasources
            .save_history(&request.datasource.uid, &history)
            .await
        {
            log::warn!(
                "Failed to save query history for {}: {err:#}",
                request.datasource.name
            );
        }
    }
}
