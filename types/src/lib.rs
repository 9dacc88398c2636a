//! Fundamental types for cashsplit.
//!
//! This crate defines the types shared by every other crate in the workspace:
//! the split result and its per-part view, creation timestamps, and the
//! tunable parameters that drive the splitting engine.

pub mod error;
pub mod params;
pub mod result;
pub mod time;

pub use error::ResultError;
pub use params::SplitParams;
pub use result::{percentage_of, SplitPart, SplitResult};
pub use time::Timestamp;
