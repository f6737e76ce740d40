//! Domain types for the explore synchronizer.
//! Plain data shared by the reducers, the orchestrator and the collaborators.

pub mod datasource;
pub mod error;
pub mod history;
pub mod pane;
pub mod query;
pub mod time;
pub mod view_state;

pub use datasource::*;
pub use error::*;
pub use history::*;
pub use pane::*;
pub use query::*;
pub use time::*;
pub use view_state::*;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_view_state_serializes_sparse() {
        let state = ViewState {
            datasource: Some("Loki".into()),
            ..Default::default()
        };
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"datasource":"Loki"}"#);
    }

    #[test]
    fn test_dedup_strategy_serde() {
        let strategy: DedupStrategy = serde_json::from_str(r#""signature""#).unwrap();
        assert_eq!(strategy, DedupStrategy::Signature);
        assert_eq!(DedupStrategy::default(), DedupStrategy::None);
    }

    #[test]
    fn test_error_messages() {
        let err = ExploreError::PaneNotMounted(PaneId::from_str("left").unwrap());
        assert_eq!(err.to_string(), "Pane is not mounted: left");
        let err = ExploreError::DatasourceNotFound("Graphite".into());
        assert_eq!(err.to_string(), "Datasource not found: Graphite");
    }
}
