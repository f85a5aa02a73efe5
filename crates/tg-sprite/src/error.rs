//! Error types for shape selection.

use thiserror::Error;

/// Errors raised when choosing a shape by number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// No built-in or user slot has this number.
    #[error("unknown shape number {0}")]
    UnknownShape(u32),

    /// The user slot exists but nothing has been loaded into it.
    #[error("user shape {0} has not been loaded")]
    EmptyUserShape(u32),
}
