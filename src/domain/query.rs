use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Reference id of a query row, unique within a pane.
pub type RefId = String;

/// A single query row as shown in a pane and encoded in the URL.
///
/// Only the fields the synchronizer reasons about are typed; everything the
/// query editor stores (expressions, format options, ...) lives in `model`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ref_id: RefId,
    /// Per-query datasource override (mixed mode).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datasource: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hide: bool,
    #[serde(flatten)]
    pub model: serde_json::Map<String, serde_json::Value>,
}

impl Query {
    pub fn new(ref_id: impl Into<RefId>) -> Self {
        Self {
            ref_id: ref_id.into(),
            ..Default::default()
        }
    }

    /// Builder helper for setting a model field, mostly used by tests and hosts.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.model.insert(key.into(), value.into());
        self
    }

    /// The `expr` model field, if the query has one.
    pub fn expr(&self) -> Option<&str> {
        self.model.get("expr").and_then(|v| v.as_str())
    }
}

/// Ref id for a zero-based position: `A..Z`, then `AA`, `AB`, ...
pub fn ref_id_for_index(index: usize) -> RefId {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Assigns ref ids to queries that lack one.
///
/// The id for position `i` starts at `ref_id_for_index(i)` and advances past
/// every id already present in the list or handed out earlier in this pass.
/// Existing ids are never touched. An empty list becomes a single default query.
pub fn ensure_ref_ids(queries: Vec<Query>) -> Vec<Query> {
    if queries.is_empty() {
        return vec![Query::new(ref_id_for_index(0))];
    }

    let mut taken: HashSet<RefId> = queries
        .iter()
        .filter(|q| !q.ref_id.is_empty())
        .map(|q| q.ref_id.clone())
        .collect();

    queries
        .into_iter()
        .enumerate()
        .map(|(index, mut query)| {
            if query.ref_id.is_empty() {
                let mut candidate = index;
                while taken.contains(&ref_id_for_index(candidate)) {
                    candidate += 1;
                }
                let ref_id = ref_id_for_index(candidate);
                taken.insert(ref_id.clone());
                query.ref_id = ref_id;
            }
            query
        })
        .collect()
}

/// Whether any query in the list would be sent to the backend.
pub fn has_visible_queries(queries: &[Query]) -> bool {
    queries.iter().any(|q| !q.hide)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(queries: &[Query]) -> Vec<&str> {
        queries.iter().map(|q| q.ref_id.as_str()).collect()
    }

    #[test]
    fn ref_ids_follow_spreadsheet_letters() {
        assert_eq!(ref_id_for_index(0), "A");
        assert_eq!(ref_id_for_index(25), "Z");
        assert_eq!(ref_id_for_index(26), "AA");
        assert_eq!(ref_id_for_index(27), "AB");
        assert_eq!(ref_id_for_index(52), "BA");
    }

    #[test]
    fn missing_ids_are_assigned_by_position() {
        let queries = ensure_ref_ids(vec![Query::default(), Query::default()]);
        assert_eq!(ids(&queries), vec!["A", "B"]);
    }

    #[test]
    fn existing_ids_are_kept_and_not_reused() {
        let queries = ensure_ref_ids(vec![
            Query::default(),
            Query::new("A"),
            Query::default(),
        ]);
        assert_eq!(ids(&queries), vec!["B", "A", "C"]);
    }

    #[test]
    fn assigned_ids_do_not_collide_with_each_other() {
        let queries = ensure_ref_ids(vec![
            Query::new("B"),
            Query::default(),
            Query::default(),
        ]);
        assert_eq!(ids(&queries), vec!["B", "C", "D"]);
    }

    #[test]
    fn empty_list_gets_default_query() {
        let queries = ensure_ref_ids(Vec::new());
        assert_eq!(ids(&queries), vec!["A"]);
    }

    #[test]
    fn model_fields_are_flattened() {
        let query: Query =
            serde_json::from_str(r#"{"refId":"A","expr":"rate(x[5m])","hide":true}"#).unwrap();
        assert_eq!(query.ref_id, "A");
        assert!(query.hide);
        assert_eq!(query.expr(), Some("rate(x[5m])"));

        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["expr"], "rate(x[5m])");
        assert_eq!(json["refId"], "A");
    }

    #[test]
    fn hidden_queries_are_not_visible() {
        let mut hidden = Query::new("A");
        hidden.hide = true;
        assert!(!has_visible_queries(&[hidden.clone()]));
        assert!(has_visible_queries(&[hidden, Query::new("B")]));
    }
}
