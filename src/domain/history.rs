use serde::{Deserialize, Serialize};

use super::query::Query;

/// Upper bound for per-datasource query history.
pub const MAX_HISTORY_ITEMS: usize = 100;

/// A query previously run against a pane's datasource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    /// Epoch milliseconds.
    pub ts: i64,
    pub query: Query,
}

/// A persisted ("rich") history entry, independent of any pane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RichHistoryItem {
    pub id: String,
    pub ts: i64,
    pub datasource_name: String,
    pub queries: Vec<Query>,
    #[serde(default)]
    pub starred: bool,
    #[serde(default)]
    pub comment: String,
}

/// Prepends `queries` to `history`, dropping older entries with the same
/// query content and capping the result at `max_items`.
pub fn merge_history(
    history: &[HistoryItem],
    queries: &[Query],
    ts: i64,
    max_items: usize,
) -> Vec<HistoryItem> {
    let fresh: Vec<HistoryItem> = queries
        .iter()
        .filter(|q| !q.hide)
        .map(|q| HistoryItem {
            ts,
            query: q.clone(),
        })
        .collect();

    let older = history
        .iter()
        .filter(|item| !fresh.iter().any(|f| same_content(&f.query, &item.query)));

    fresh
        .iter()
        .cloned()
        .chain(older.cloned())
        .take(max_items)
        .collect()
}

// Ref ids are positional, so they do not make two queries different.
fn same_content(a: &Query, b: &Query) -> bool {
    a.model == b.model && a.datasource == b.datasource
}
