//! Domain error types for the explore synchronizer.
//!
//! Collaborators report failures as `anyhow::Error`; the orchestrator maps
//! them into `ExploreError` at its boundary.

use thiserror::Error;

use super::pane::PaneId;

#[derive(Debug, Error)]
pub enum ExploreError {
    #[error("Datasource not found: {0}")]
    DatasourceNotFound(String),

    #[error("No default datasource configured")]
    NoDefaultDatasource,

    #[error("Pane is not mounted: {0}")]
    PaneNotMounted(PaneId),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Explore operation failed: {0}")]
    OperationFailed(#[from] anyhow::Error),
}

pub type ExploreResult<T> = Result<T, ExploreError>;
