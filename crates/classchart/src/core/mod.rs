//! Core types and utilities for diagram generation
//!
//! Shared vocabulary (type descriptors, sides, points), error types,
//! logging setup, and text helpers used by every pipeline stage.

mod error;
pub mod logging;
mod text;
mod types;

pub use error::*;
pub use logging::*;
pub use text::*;
pub use types::*;
