//! ANSHTS - Terminal Answer-Sheet Library
//!
//! A terminal-based answer-sheet tracker with profiles, a standard-answer
//! key, and a diff view, built in Rust.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
