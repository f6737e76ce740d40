use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::broadcast;

use super::datasource::DatasourceHandle;
use super::history::HistoryItem;
use super::query::Query;
use super::time::TimeRange;

/// Identity of an exploration pane; two may coexist in split view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaneId {
    Left,
    Right,
}

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaneId::Left => write!(f, "left"),
            PaneId::Right => write!(f, "right"),
        }
    }
}

impl FromStr for PaneId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(PaneId::Left),
            "right" => Ok(PaneId::Right),
            _ => Err(format!("Invalid pane id: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Critical,
    Error,
    Warning,
    Info,
    Debug,
    Trace,
    Unknown,
}

/// How log lines with repeated content are collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DedupStrategy {
    #[default]
    None,
    Exact,
    Numbers,
    Signature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingState {
    #[default]
    NotStarted,
    Loading,
    Done,
    Error,
}

/// Result container for the last query run of a pane.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryResponse {
    pub state: LoadingState,
    /// Id of the request this response belongs to.
    pub request_id: Option<String>,
    pub series: Vec<serde_json::Value>,
    pub error: Option<String>,
}

impl QueryResponse {
    pub fn is_untouched(&self) -> bool {
        self.state == LoadingState::NotStarted && self.request_id.is_none()
    }
}

/// Events a pane publishes to whoever renders it.
#[derive(Debug, Clone, PartialEq)]
pub enum PaneEvent {
    QueryStarted { request_id: String },
    QueryFinished { request_id: String, state: LoadingState },
}

const EVENT_BRIDGE_CAPACITY: usize = 64;

/// Event channel owned by a pane. Clones share the channel; equality is identity.
#[derive(Debug, Clone)]
pub struct EventBridge {
    sender: Arc<broadcast::Sender<PaneEvent>>,
}

impl EventBridge {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_BRIDGE_CAPACITY);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PaneEvent> {
        self.sender.subscribe()
    }

    /// Publishes an event; having no subscribers is not an error.
    pub fn emit(&self, event: PaneEvent) {
        let _ = self.sender.send(event);
    }
}

impl Default for EventBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for EventBridge {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.sender, &other.sender)
    }
}

/// State of one exploration pane.
///
/// A pane is either untouched (`Default`) or fully initialized; the pane
/// reducer is the only place that moves it between the two.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PaneState {
    pub initialized: bool,
    pub container_width: f32,
    pub event_bridge: Option<EventBridge>,
    pub queries: Vec<Query>,
    /// One UI key per query, recomputed together with `queries`.
    pub query_keys: Vec<String>,
    pub range: TimeRange,
    pub datasource_instance: Option<DatasourceHandle>,
    /// Datasource as the URL named it (name, uid or absent), which need not
    /// match the resolved instance's name.
    pub datasource_ref: Option<String>,
    pub datasource_missing: bool,
    pub history: Vec<HistoryItem>,
    pub dedup_strategy: DedupStrategy,
    pub hidden_log_levels: BTreeSet<LogLevel>,
    pub logs_highlighter_expressions: Option<Vec<String>>,
    pub query_response: QueryResponse,
    pub origin_panel_id: Option<i64>,
}

impl PaneState {
    pub fn datasource_name(&self) -> Option<&str> {
        self.datasource_instance.as_deref().map(|ds| ds.name.as_str())
    }
}

/// UI keys for a query list: `<datasource name or ref id>-<index>`.
pub fn query_keys(queries: &[Query], datasource: Option<&DatasourceHandle>) -> Vec<String> {
    queries
        .iter()
        .enumerate()
        .map(|(index, query)| {
            let primary = datasource
                .map(|ds| ds.name.as_str())
                .unwrap_or(query.ref_id.as_str());
            format!("{primary}-{index}")
        })
        .collect()
}
