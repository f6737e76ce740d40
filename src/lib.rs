//! Per-pane exploration state synchronizer.
//!
//! Reconciles a URL-encoded view description (datasource, queries, time
//! range) with in-memory pane state and runs only the side effects the
//! difference calls for.

pub mod application;
pub mod domain;
pub mod infra;
pub mod store;

pub use application::projection::get_url_state_from_pane_state;
pub use application::url_diff::{UrlDiff, get_url_diff};
pub use store::{Action, ExploreRuntime, ExploreStore, InitializeExplore};
