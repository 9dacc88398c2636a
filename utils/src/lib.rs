//! Shared utilities for cashsplit.

pub mod logging;
pub mod stats;

pub use logging::{init_logging, init_tracing, LogFormat};
pub use stats::{SplitStats, StatsSummary};
