use anyhow::Result;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use super::traits::{DatasourceService, LoadedDatasource};
use crate::domain::{DataSourceDescriptor, DatasourceInstance, ExploreError, HistoryItem};

/// Datasource registry backed by memory, keyed by datasource uid.
#[derive(Default)]
pub struct InMemoryDatasourceService {
    descriptors: Vec<DataSourceDescriptor>,
    min_intervals: HashMap<String, i64>,
    histories: RwLock<HashMap<String, Vec<HistoryItem>>>,
}

impl InMemoryDatasourceService {
    pub fn new(descriptors: Vec<DataSourceDescriptor>) -> Self {
        Self {
            descriptors,
            ..Default::default()
        }
    }

    pub fn with_history(self, datasource_uid: &str, history: Vec<HistoryItem>) -> Self {
        self.histories
            .write()
            .insert(datasource_uid.to_string(), history);
        self
    }

    pub fn with_min_interval(mut self, datasource_uid: &str, min_interval_ms: i64) -> Self {
        self.min_intervals
            .insert(datasource_uid.to_string(), min_interval_ms);
        self
    }

    pub fn history(&self, datasource_uid: &str) -> Vec<HistoryItem> {
        self.histories
            .read()
            .get(datasource_uid)
            .cloned()
            .unwrap_or_default()
    }

    fn find(&self, name: &str) -> Option<&DataSourceDescriptor> {
        self.descriptors
            .iter()
            .find(|ds| ds.name == name || ds.uid == name)
    }

    fn default_descriptor(&self) -> Option<&DataSourceDescriptor> {
        self.descriptors
            .iter()
            .find(|ds| ds.is_default)
            .or_else(|| self.descriptors.first())
    }

    fn resolve(&self, name: Option<&str>) -> Result<&DataSourceDescriptor, ExploreError> {
        let Some(name) = name else {
            return self
                .default_descriptor()
                .ok_or(ExploreError::NoDefaultDatasource);
        };
        if let Some(descriptor) = self.find(name) {
            return Ok(descriptor);
        }
        let fallback = self
            .default_descriptor()
            .ok_or_else(|| ExploreError::DatasourceNotFound(name.to_string()))?;
        log::warn!(
            "Datasource {} not found, falling back to {}",
            name,
            fallback.name
        );
        Ok(fallback)
    }
}

#[async_trait]
impl DatasourceService for InMemoryDatasourceService {
    fn explore_datasources(&self) -> Vec<DataSourceDescriptor> {
        self.descriptors.clone()
    }

    async fn load_and_init(&self, _org_id: i64, name: Option<&str>) -> Result<LoadedDatasource> {
        let descriptor = self.resolve(name)?;
        let mut instance = DatasourceInstance::from(descriptor);
        instance.min_interval_ms = self.min_intervals.get(&descriptor.uid).copied();

        Ok(LoadedDatasource {
            history: self.history(&instance.uid),
            instance: Arc::new(instance),
        })
    }

    async fn save_history(&self, datasource_uid: &str, history: &[HistoryItem]) -> Result<()> {
        self.histories
            .write()
            .insert(datasource_uid.to_string(), history.to_vec());
        Ok(())
    }
}
