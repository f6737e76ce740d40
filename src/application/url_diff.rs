//! Comparison of two URL view-states.

use crate::domain::{RawTimeRange, ViewState};

/// Which parts of a pane's URL state changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UrlDiff {
    pub datasource: bool,
    pub queries: bool,
    pub range: bool,
}

impl UrlDiff {
    pub fn is_empty(&self) -> bool {
        !(self.datasource || self.queries || self.range)
    }
}

/// Compares `old` and `current`. Equality based, so the result does not
/// depend on argument order. An absent state compares like a state with
/// every field unspecified; an unspecified range compares as the default
/// range.
pub fn get_url_diff(old: Option<&ViewState>, current: Option<&ViewState>) -> UrlDiff {
    get_url_diff_with_default(old, current, &RawTimeRange::default())
}

/// Like [`get_url_diff`], with a caller-chosen default range.
pub fn get_url_diff_with_default(
    old: Option<&ViewState>,
    current: Option<&ViewState>,
    default_range: &RawTimeRange,
) -> UrlDiff {
    let empty = ViewState::default();
    let old = old.unwrap_or(&empty);
    let current = current.unwrap_or(&empty);

    UrlDiff {
        datasource: old.datasource != current.datasource,
        queries: old.queries != current.queries,
        range: old.range.as_ref().unwrap_or(default_range)
            != current.range.as_ref().unwrap_or(default_range),
    }
}
