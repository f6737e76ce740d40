use super::super::action::{DatasourceAction, PaneAction};
use crate::domain::PaneState;

/// Owns `datasource_instance`, `datasource_ref` and `datasource_missing`.
pub fn reduce(mut state: PaneState, action: &PaneAction) -> PaneState {
    if let PaneAction::Datasource(DatasourceAction::UpdateInstance(instance)) = action {
        state.datasource_ref = Some(instance.name.clone());
        state.datasource_instance = Some(instance.clone());
        state.datasource_missing = false;
    }
    state
}
