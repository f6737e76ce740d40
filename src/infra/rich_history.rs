use parking_lot::RwLock;

use crate::domain::{Query, RichHistoryItem};

/// Persisted list of previously run queries, shared across panes.
pub trait RichHistoryStore: Send + Sync {
    /// Snapshot of all entries, newest first.
    fn get_rich_history(&self) -> Vec<RichHistoryItem>;

    fn add_to_rich_history(&self, ts: i64, datasource_name: &str, queries: &[Query]);
}

#[derive(Default)]
pub struct InMemoryRichHistory {
    items: RwLock<Vec<RichHistoryItem>>,
}

impl InMemoryRichHistory {
    pub fn new(items: Vec<RichHistoryItem>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }
}

impl RichHistoryStore for InMemoryRichHistory {
    fn get_rich_history(&self) -> Vec<RichHistoryItem> {
        self.items.read().clone()
    }

    fn add_to_rich_history(&self, ts: i64, datasource_name: &str, queries: &[Query]) {
        let mut items = self.items.write();
        // Re-running the newest entry unchanged is not a new entry.
        if let Some(newest) = items.first()
            && newest.datasource_name == datasource_name
            && newest.queries == queries
        {
            return;
        }
        items.insert(
            0,
            RichHistoryItem {
                id: uuid::Uuid::new_v4().to_string(),
                ts,
                datasource_name: datasource_name.to_string(),
                queries: queries.to_vec(),
                starred: false,
                comment: String::new(),
            },
        );
    }
}
