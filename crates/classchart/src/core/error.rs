//! Error types for diagram generation
//!
//! This module defines the error conditions that can abort a diagram run.
//! Annotation resolution is deliberately absent: unrecognized annotation
//! syntax always degrades to a raw descriptor and never fails.

use thiserror::Error;

/// Errors produced by the diagram pipeline
#[derive(Error, Debug)]
pub enum DiagramError {
    /// The layout engine was asked to place fewer than one box.
    #[error("Unsupported layout shape: {count} boxes (need at least 1)")]
    UnsupportedShape { count: usize },

    /// The inferencer produced a relationship label the serializer cannot
    /// render. This is an invariant violation, not a recoverable input error.
    #[error("Unrecognized relationship label: {label}")]
    UnrecognizedRelationship { label: String },

    /// An edge referenced a class with no layout box.
    #[error("Unknown class in relationship: {name}")]
    UnknownClass { name: String },

    /// Writing the finished diagram to disk failed.
    #[error("Failed to write diagram: {source}")]
    WriteFailure {
        #[from]
        source: std::io::Error,
    },
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, DiagramError>;

impl DiagramError {
    /// Create an unsupported-shape error for the given box count
    pub fn unsupported_shape(count: usize) -> Self {
        Self::UnsupportedShape { count }
    }

    /// Create an unrecognized-relationship error for the given label
    pub fn unrecognized_relationship(label: impl Into<String>) -> Self {
        Self::UnrecognizedRelationship {
            label: label.into(),
        }
    }

    /// Create an unknown-class error for the given name
    pub fn unknown_class(name: impl Into<String>) -> Self {
        Self::UnknownClass { name: name.into() }
    }
}
