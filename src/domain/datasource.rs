use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Configured datasource as listed by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceDescriptor {
    pub uid: String,
    pub name: String,
    pub type_id: String,
    #[serde(default)]
    pub is_default: bool,
}

/// A resolved, ready-to-query datasource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasourceInstance {
    pub uid: String,
    pub name: String,
    pub type_id: String,
    /// Lower bound for the query interval, if the datasource declares one.
    #[serde(default)]
    pub min_interval_ms: Option<i64>,
}

impl From<&DataSourceDescriptor> for DatasourceInstance {
    fn from(descriptor: &DataSourceDescriptor) -> Self {
        Self {
            uid: descriptor.uid.clone(),
            name: descriptor.name.clone(),
            type_id: descriptor.type_id.clone(),
            min_interval_ms: None,
        }
    }
}

/// Shared handle to a resolved datasource; panes hold it, never own it.
pub type DatasourceHandle = Arc<DatasourceInstance>;
