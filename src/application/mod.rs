//! Application layer: pure comparisons and projections over domain state.

pub mod projection;
pub mod url_diff;
