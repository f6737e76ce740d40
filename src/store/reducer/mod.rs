pub mod datasource;
pub mod history;
pub mod query;
pub mod time;

use super::action::{InitializePayload, PaneAction};
use crate::domain::{PaneState, QueryResponse, query_keys};

/// Applies `action` to one pane.
///
/// The sub-reducers run first, in the order datasource, query, time,
/// history; each owns a disjoint set of fields. Pane-level actions are
/// handled afterwards. `Initialize` is applied here in a single step since it
/// spans every slice.
pub fn reduce(state: PaneState, action: PaneAction) -> PaneState {
    let state = datasource::reduce(state, &action);
    let state = query::reduce(state, &action);
    let state = time::reduce(state, &action);
    let mut state = history::reduce(state, &action);

    match action {
        PaneAction::ChangeSize { width, .. } => {
            state.container_width = width;
        }
        PaneAction::HighlightLogsExpression(expressions) => {
            state.logs_highlighter_expressions = Some(expressions);
        }
        PaneAction::ChangeDedupStrategy(strategy) => {
            state.dedup_strategy = strategy;
        }
        PaneAction::ToggleLogLevel(hidden) => {
            state.hidden_log_levels = hidden.into_iter().collect();
        }
        PaneAction::Initialize(payload) => {
            state = initialize(state, *payload);
        }
        PaneAction::Datasource(_)
        | PaneAction::Query(_)
        | PaneAction::Time(_)
        | PaneAction::History(_) => {}
    }
    state
}

fn initialize(state: PaneState, payload: InitializePayload) -> PaneState {
    let InitializePayload {
        container_width,
        event_bridge,
        queries,
        range,
        origin_panel_id,
        datasource_instance,
        datasource_ref,
        history,
    } = payload;

    PaneState {
        initialized: true,
        container_width,
        event_bridge: Some(event_bridge),
        query_keys: query_keys(&queries, datasource_instance.as_ref()),
        queries,
        range,
        datasource_missing: datasource_instance.is_none(),
        datasource_instance,
        datasource_ref,
        history,
        query_response: QueryResponse::default(),
        logs_highlighter_expressions: None,
        origin_panel_id,
        ..state
    }
}
