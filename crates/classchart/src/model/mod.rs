//! Source facts, extraction, and relationship inference
//!
//! The model layer turns the external parser's structural facts into
//! ordered class records and a typed relationship graph.

mod database;
mod extractor;
mod relations;
mod resolver;
mod source;

pub use database::*;
pub use extractor::*;
pub use relations::*;
pub use resolver::*;
pub use source::*;
