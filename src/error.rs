//! Error types for the rendering and export pipeline.

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while capturing cards or packaging an archive
#[derive(Error, Debug)]
pub enum Error {
    /// A single card failed to rasterize. Aborts the whole export batch.
    #[error("capture failed for card {index}: {reason}")]
    Capture { index: usize, reason: String },

    /// An image resource attached to a card could not be decoded.
    #[error("unreadable image resource on card {index}")]
    ImageDecode { index: usize },

    /// Archive generation failed after all captures succeeded.
    #[error("archive generation failed: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Writing archive contents failed.
    #[error("archive write failed: {0}")]
    Io(#[from] std::io::Error),

    /// A capture task was cancelled or panicked before completing.
    #[error("capture task did not complete")]
    TaskJoin,

    /// A content-assistant call failed. Document/style state is unchanged.
    #[error("assistant request failed: {0}")]
    Assistant(String),
}
