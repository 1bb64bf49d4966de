//! Error types for the netim core library.
//!
//! Defines the error enum exposed by the public API and a convenient result
//! alias. Every fallible call surfaces one of these kinds immediately; nothing
//! is swallowed or retried internally.

use std::fmt;

use thiserror::Error;

/// Stable codes describing [`ImError`] variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum ImErrorCode {
    /// A node id was outside `[0, node_count)`.
    InvalidNode,
    /// An edge operation referenced an edge that does not exist.
    EdgeNotFound,
    /// Parallel edge and weight slices differed in length.
    LengthMismatch,
    /// A numeric parameter was outside its documented range.
    InvalidParameter,
}

impl ImErrorCode {
    /// Return the stable machine-readable representation of this error code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidNode => "NETIM_INVALID_NODE",
            Self::EdgeNotFound => "NETIM_EDGE_NOT_FOUND",
            Self::LengthMismatch => "NETIM_LENGTH_MISMATCH",
            Self::InvalidParameter => "NETIM_INVALID_PARAMETER",
        }
    }
}

impl fmt::Display for ImErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error produced by graph mutation, weighting, or selector construction.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ImError {
    /// A node id was outside `[0, node_count)`.
    #[error("node {node} is out of bounds for a graph with {node_count} nodes")]
    InvalidNode { node: usize, node_count: usize },
    /// An edge operation referenced an edge that does not exist.
    #[error("edge ({edge_source}, {target}) does not exist")]
    EdgeNotFound { edge_source: usize, target: usize },
    /// Parallel edge and weight slices differed in length.
    #[error("{edges} edges were given alongside {weights} weights")]
    LengthMismatch { edges: usize, weights: usize },
    /// A numeric parameter was outside its documented range.
    #[error("invalid parameter: {reason}")]
    InvalidParameter { reason: String },
}

impl ImError {
    /// Retrieve the stable [`ImErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> ImErrorCode {
        match self {
            Self::InvalidNode { .. } => ImErrorCode::InvalidNode,
            Self::EdgeNotFound { .. } => ImErrorCode::EdgeNotFound,
            Self::LengthMismatch { .. } => ImErrorCode::LengthMismatch,
            Self::InvalidParameter { .. } => ImErrorCode::InvalidParameter,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, ImError>;
