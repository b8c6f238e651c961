//! Error types for tessera.

/// Errors that can occur while configuring or running a chunking pass.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Similarity threshold outside `[0, 1]` (or NaN).
    #[error("invalid similarity threshold: {0} (must be within 0.0..=1.0)")]
    InvalidThreshold(f32),

    /// Maximum chunk length is below the minimum.
    #[error("max_chunk_length {max} is less than min_chunk_length {min}")]
    MinExceedsMax {
        /// The minimum chunk length.
        min: usize,
        /// The maximum that was too small.
        max: usize,
    },

    /// The sentence segmenter failed.
    #[error("segmentation error: {0}")]
    Segmentation(String),

    /// The similarity oracle failed.
    #[error("similarity error: {0}")]
    Similarity(String),

    /// Embedding model error.
    #[error("embedding error: {0}")]
    Embedding(String),
}

/// Result type for tessera operations.
pub type Result<T> = std::result::Result<T, Error>;
