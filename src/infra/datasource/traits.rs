use anyhow::Result;
use async_trait::async_trait;

use crate::domain::{DataSourceDescriptor, DatasourceHandle, HistoryItem};

/// A resolved datasource together with the query history stored for it.
#[derive(Debug, Clone)]
pub struct LoadedDatasource {
    pub instance: DatasourceHandle,
    pub history: Vec<HistoryItem>,
}

#[async_trait]
pub trait DatasourceService: Send + Sync {
    /// Datasources that can be used in explore, in display order.
    fn explore_datasources(&self) -> Vec<DataSourceDescriptor>;

    /// Resolves `name` (or the default datasource when `None`) and loads its history.
    async fn load_and_init(&self, org_id: i64, name: Option<&str>) -> Result<LoadedDatasource>;

    /// Persists the query history of a datasource.
    async fn save_history(&self, _datasource_uid: &str, _history: &[HistoryItem]) -> Result<()> {
        Ok(())
    }
}
