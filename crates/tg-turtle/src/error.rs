//! Error types for turtle operations.

use thiserror::Error;

use tg_core::TgError;
use tg_sprite::ShapeError;

/// Result type for turtle operations.
pub type Result<T> = std::result::Result<T, TurtleError>;

/// Errors raised by turtle commands.
#[derive(Error, Debug)]
pub enum TurtleError {
    /// The host interrupted a throttle pause. State changes made before the
    /// pause are kept.
    #[error("turtle command aborted")]
    Aborted,

    /// Shape selection failed.
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// Drawing input was rejected.
    #[error(transparent)]
    Core(#[from] TgError),
}
