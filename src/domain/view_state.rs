use serde::{Deserialize, Serialize};

use super::query::Query;
use super::time::RawTimeRange;

/// Structured form of the URL-encoded pane description.
///
/// Every field is optional; a missing field means "not specified", which is
/// not the same as "empty".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datasource: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queries: Option<Vec<Query>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<RawTimeRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_panel_id: Option<i64>,
}
