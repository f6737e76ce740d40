use crate::domain::{
    DatasourceHandle, DedupStrategy, EventBridge, HistoryItem, LogLevel, PaneId, Query,
    QueryResponse, RichHistoryItem, TimeRange,
};

#[derive(Debug, Clone)]
pub enum Action {
    /// Creates a fresh, uninitialized pane.
    MountPane(PaneId),
    /// Discards a pane and everything in flight for it.
    UnmountPane(PaneId),
    Pane {
        pane_id: PaneId,
        action: PaneAction,
    },
    RichHistoryUpdated(Vec<RichHistoryItem>),
}

#[derive(Debug, Clone)]
pub enum PaneAction {
    Datasource(DatasourceAction),
    Query(QueryAction),
    Time(TimeAction),
    History(HistoryAction),
    ChangeSize { width: f32, height: f32 },
    ChangeDedupStrategy(DedupStrategy),
    HighlightLogsExpression(Vec<String>),
    Initialize(Box<InitializePayload>),
    ToggleLogLevel(Vec<LogLevel>),
}

#[derive(Debug, Clone)]
pub struct InitializePayload {
    pub container_width: f32,
    pub event_bridge: EventBridge,
    pub queries: Vec<Query>,
    pub range: TimeRange,
    pub origin_panel_id: Option<i64>,
    pub datasource_instance: Option<DatasourceHandle>,
    /// Datasource identifier the pane was requested with.
    pub datasource_ref: Option<String>,
    pub history: Vec<HistoryItem>,
}

#[derive(Debug, Clone)]
pub enum DatasourceAction {
    UpdateInstance(DatasourceHandle),
}

#[derive(Debug, Clone)]
pub enum QueryAction {
    SetQueries(Vec<Query>),
    ChangeQuery { index: usize, query: Query },
    /// Inserts a new row after `index`.
    AddQueryRow { index: usize },
    RemoveQueryRow { index: usize },
    QueriesStarted { request_id: String },
    QueryResponseReceived(QueryResponse),
}

#[derive(Debug, Clone)]
pub enum TimeAction {
    ChangeRange(TimeRange),
}

#[derive(Debug, Clone)]
pub enum HistoryAction {
    Append {
        ts: i64,
        queries: Vec<Query>,
        max_items: usize,
    },
}

impl Action {
    pub fn pane(pane_id: PaneId, action: PaneAction) -> Self {
        Action::Pane { pane_id, action }
    }

    pub fn change_size(pane_id: PaneId, width: f32, height: f32) -> Self {
        Self::pane(pane_id, PaneAction::ChangeSize { width, height })
    }

    pub fn change_dedup_strategy(pane_id: PaneId, strategy: DedupStrategy) -> Self {
        Self::pane(pane_id, PaneAction::ChangeDedupStrategy(strategy))
    }

    pub fn highlight_logs_expression(pane_id: PaneId, expressions: Vec<String>) -> Self {
        Self::pane(pane_id, PaneAction::HighlightLogsExpression(expressions))
    }

    pub fn initialize(pane_id: PaneId, payload: InitializePayload) -> Self {
        Self::pane(pane_id, PaneAction::Initialize(Box::new(payload)))
    }

    pub fn toggle_log_level(pane_id: PaneId, hidden: &[LogLevel]) -> Self {
        Self::pane(pane_id, PaneAction::ToggleLogLevel(hidden.to_vec()))
    }

    pub fn set_queries(pane_id: PaneId, queries: Vec<Query>) -> Self {
        Self::pane(pane_id, PaneAction::Query(QueryAction::SetQueries(queries)))
    }

    pub fn change_range(pane_id: PaneId, range: TimeRange) -> Self {
        Self::pane(pane_id, PaneAction::Time(TimeAction::ChangeRange(range)))
    }
}
