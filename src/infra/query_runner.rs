use anyhow::Result;
use async_trait::async_trait;

use crate::domain::{DatasourceHandle, Query, TimeRange};

/// Everything the query engine needs to run one pane's queries.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    pub request_id: String,
    pub datasource: DatasourceHandle,
    pub queries: Vec<Query>,
    pub range: TimeRange,
    pub interval_ms: i64,
    pub max_data_points: u32,
}

/// The query execution engine. Invoked by the orchestrator, designed elsewhere.
#[async_trait]
pub trait QueryRunner: Send + Sync {
    /// Runs the request and returns the resulting series.
    async fn run(&self, request: QueryRequest) -> Result<Vec<serde_json::Value>>;
}

const NICE_INTERVALS_MS: &[i64] = &[
    1_000,
    5_000,
    10_000,
    15_000,
    30_000,
    60_000,
    300_000,
    600_000,
    1_800_000,
    3_600_000,
    10_800_000,
    21_600_000,
    43_200_000,
    86_400_000,
    604_800_000,
];

/// Interval between data points for a range drawn `resolution` pixels wide,
/// rounded up to a readable step and never below `min_interval_ms`.
pub fn calculate_interval_ms(range: &TimeRange, resolution: u32, min_interval_ms: i64) -> i64 {
    let raw = range.span_ms() / i64::from(resolution.max(1));
    let wanted = raw.max(min_interval_ms).max(1);
    NICE_INTERVALS_MS
        .iter()
        .copied()
        .find(|step| *step >= wanted)
        .unwrap_or(wanted)
}
