//! Executor error types.

use thiserror::Error;

/// Errors reported for a single preload job.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreloadError {
    /// The image reference does not resolve to anything.
    #[error("Image not found: {0}")]
    NotFound(String),

    /// The loader failed.
    #[error("Failed to load {image}: {reason}")]
    LoadFailed { image: String, reason: String },

    /// The queue was dropped before the job ran.
    #[error("Preload queue closed")]
    QueueClosed,
}
