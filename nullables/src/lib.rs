//! Nullable infrastructure for deterministic testing.
//!
//! The engine takes its randomness through a trait. This crate provides a
//! test-friendly implementation that:
//! - Returns deterministic values
//! - Can be controlled programmatically
//! - Never touches operating-system entropy
//!
//! Usage: swap the real source for a nullable in tests.

pub mod random;

pub use random::NullRandom;
