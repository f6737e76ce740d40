use super::super::action::{HistoryAction, PaneAction};
use crate::domain::{PaneState, merge_history};

/// Owns `history`.
pub fn reduce(mut state: PaneState, action: &PaneAction) -> PaneState {
    if let PaneAction::History(HistoryAction::Append {
        ts,
        queries,
        max_items,
    }) = action
    {
        state.history = merge_history(&state.history, queries, *ts, *max_items);
    }
    state
}
