//! Time range resolution and column aggregation
//!
//! - Timestamp parsing and byte offsets
//! - Column window layout
//! - Per-column amplitude statistics

pub mod offset;
pub mod statistics;
pub mod window;
