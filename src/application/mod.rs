//! Application layer managing state and business workflows.
//!
//! This module coordinates between the domain layer and presentation layer,
//! managing the persisted profile store, application state, and user
//! interactions.

pub mod state;
pub mod store;

pub use state::*;
pub use store::*;
