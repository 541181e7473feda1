//! Infrastructure layer providing external service integrations.
//!
//! This module contains implementations for local key-value persistence,
//! logging setup, and other system-level operations.

pub mod logging;
pub mod persistence;

pub use persistence::*;
