use crate::domain::{PaneState, ViewState};

/// Projects a pane back into URL shape, for sharing and for diffing.
///
/// The datasource is the identifier the pane was opened with, so a URL that
/// names it by uid, or not at all, projects back to itself.
pub fn get_url_state_from_pane_state(state: &PaneState) -> ViewState {
    ViewState {
        datasource: state.datasource_ref.clone(),
        queries: Some(state.queries.clone()),
        range: Some(state.range.raw.clone()),
        origin_panel_id: state.origin_panel_id,
    }
}
