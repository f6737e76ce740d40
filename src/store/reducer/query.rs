use super::super::action::{DatasourceAction, PaneAction, QueryAction};
use crate::domain::{LoadingState, PaneState, Query, QueryResponse, ensure_ref_ids, query_keys};

/// Owns `queries`, `query_keys` and `query_response`. Runs after the
/// datasource reducer so a freshly bound instance is visible here.
pub fn reduce(mut state: PaneState, action: &PaneAction) -> PaneState {
    match action {
        PaneAction::Query(action) => match action {
            QueryAction::SetQueries(queries) => {
                state.queries = queries.clone();
                refresh_keys(&mut state);
            }
            QueryAction::ChangeQuery { index, query } => {
                if let Some(slot) = state.queries.get_mut(*index) {
                    *slot = query.clone();
                    refresh_keys(&mut state);
                }
            }
            QueryAction::AddQueryRow { index } => {
                let at = (*index + 1).min(state.queries.len());
                state.queries.insert(at, Query::default());
                state.queries = ensure_ref_ids(std::mem::take(&mut state.queries));
                refresh_keys(&mut state);
            }
            QueryAction::RemoveQueryRow { index } => {
                if *index < state.queries.len() {
                    state.queries.remove(*index);
                    state.queries = ensure_ref_ids(std::mem::take(&mut state.queries));
                    refresh_keys(&mut state);
                }
            }
            QueryAction::QueriesStarted { request_id } => {
                state.query_response = QueryResponse {
                    state: LoadingState::Loading,
                    request_id: Some(request_id.clone()),
                    ..Default::default()
                };
            }
            QueryAction::QueryResponseReceived(response) => {
                // Responses for superseded runs are dropped.
                if response.request_id.is_some()
                    && response.request_id == state.query_response.request_id
                {
                    state.query_response = response.clone();
                }
            }
        },
        PaneAction::Datasource(DatasourceAction::UpdateInstance(_)) => {
            state.query_response = QueryResponse::default();
            refresh_keys(&mut state);
        }
        _ => {}
    }
    state
}

fn refresh_keys(state: &mut PaneState) {
    state.query_keys = query_keys(&state.queries, state.datasource_instance.as_ref());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DatasourceInstance;
    use std::sync::Arc;

    fn pane_with(queries: Vec<Query>) -> PaneState {
        let state = PaneState::default();
        reduce(state, &PaneAction::Query(QueryAction::SetQueries(queries)))
    }

    fn ref_ids(state: &PaneState) -> Vec<&str> {
        state.queries.iter().map(|q| q.ref_id.as_str()).collect()
    }

    #[test]
    fn set_queries_recomputes_keys() {
        let state = pane_with(vec![Query::new("A"), Query::new("B")]);
        assert_eq!(state.query_keys, vec!["A-0", "B-1"]);
    }

    #[test]
    fn add_and_remove_rows_keep_keys_in_step() {
        let state = pane_with(vec![Query::new("A"), Query::new("B")]);
        let state = reduce(state, &PaneAction::Query(QueryAction::AddQueryRow { index: 0 }));
        assert_eq!(ref_ids(&state), vec!["A", "C", "B"]);
        assert_eq!(state.query_keys.len(), 3);

        let state = reduce(state, &PaneAction::Query(QueryAction::RemoveQueryRow { index: 1 }));
        assert_eq!(ref_ids(&state), vec!["A", "B"]);
        assert_eq!(state.query_keys, vec!["A-0", "B-1"]);
    }

    #[test]
    fn removing_last_row_leaves_default_query() {
        let state = pane_with(vec![Query::new("Z")]);
        let state = reduce(state, &PaneAction::Query(QueryAction::RemoveQueryRow { index: 0 }));
        assert_eq!(ref_ids(&state), vec!["A"]);
        assert_eq!(state.query_keys.len(), 1);
    }

    #[test]
    fn out_of_range_change_is_ignored() {
        let state = pane_with(vec![Query::new("A")]);
        let before = state.clone();
        let state = reduce(
            state,
            &PaneAction::Query(QueryAction::ChangeQuery {
                index: 5,
                query: Query::new("X"),
            }),
        );
        assert_eq!(state, before);
    }

    #[test]
    fn stale_responses_are_dropped() {
        let state = reduce(
            PaneState::default(),
            &PaneAction::Query(QueryAction::QueriesStarted {
                request_id: "r2".into(),
            }),
        );
        assert_eq!(state.query_response.state, LoadingState::Loading);

        let stale = QueryResponse {
            state: LoadingState::Done,
            request_id: Some("r1".into()),
            ..Default::default()
        };
        let state = reduce(state, &PaneAction::Query(QueryAction::QueryResponseReceived(stale)));
        assert_eq!(state.query_response.state, LoadingState::Loading);

        let fresh = QueryResponse {
            state: LoadingState::Done,
            request_id: Some("r2".into()),
            ..Default::default()
        };
        let state = reduce(state, &PaneAction::Query(QueryAction::QueryResponseReceived(fresh.clone())));
        assert_eq!(state.query_response, fresh);
    }

    #[test]
    fn new_datasource_rekeys_queries() {
        let mut state = pane_with(vec![Query::new("A")]);
        let instance = Arc::new(DatasourceInstance {
            uid: "l1".into(),
            name: "Loki".into(),
            type_id: "loki".into(),
            min_interval_ms: None,
        });
        // Bound by the datasource reducer earlier in the same pass.
        state.datasource_instance = Some(instance.clone());
        let state = reduce(
            state,
            &PaneAction::Datasource(DatasourceAction::UpdateInstance(instance)),
        );
        assert_eq!(state.query_keys, vec!["Loki-0"]);
    }
}
