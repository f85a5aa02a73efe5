//! Error types for tg-core.

use thiserror::Error;

/// Result type for tg-core operations.
pub type Result<T> = std::result::Result<T, TgError>;

/// Errors raised while building drawing inputs.
#[derive(Error, Debug)]
pub enum TgError {
    /// A pixel rectangle must be at least one pixel wide.
    #[error("pixel rectangle has zero width")]
    ZeroWidth,

    /// A pixel rectangle must hold at least one full row.
    #[error("pixel rectangle holds {len} pixels, fewer than one row of {width}")]
    ShortPixelData { width: u32, len: usize },

    /// Font bytes could not be parsed.
    #[error("failed to load font: {0}")]
    FontLoad(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
