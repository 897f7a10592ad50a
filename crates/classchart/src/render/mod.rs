//! Diagram output backends
//!
//! Currently only the UMLet UXF schema is supported.

mod uxf;

pub use uxf::*;
