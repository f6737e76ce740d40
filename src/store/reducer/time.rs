use super::super::action::{PaneAction, TimeAction};
use crate::domain::PaneState;

/// Owns `range`.
pub fn reduce(mut state: PaneState, action: &PaneAction) -> PaneState {
    if let PaneAction::Time(TimeAction::ChangeRange(range)) = action {
        state.range = range.clone();
    }
    state
}
