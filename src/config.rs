//! Chunking configuration.
//!
//! ## Three Knobs
//!
//! The greedy assembler balances three constraints that pull against each other:
//!
//! - `similarity_threshold`: how close a sentence must be to the chunk so far
//!   before it is allowed in. Higher means more, smaller chunks.
//! - `min_chunk_length`: the floor. A candidate shorter than this is never
//!   emitted as a standalone chunk.
//! - `max_chunk_length`: the ceiling. A sentence that would push the chunk past
//!   it starts a new chunk instead.
//!
//! ```text
//! min = 250, max = 500
//!
//!   0        250                 500
//!   |---------|===================|---->
//!    too short     emitted          never grown past here
//! ```
//!
//! The bounds are checked once, when the config is built. An invalid config is
//! rejected, never clamped.
//!
//! ## What Happens to Short Candidates
//!
//! When a boundary is forced while the candidate is still below the floor, the
//! default [`ShortChunkPolicy::Drop`] discards it. Its sentences do not appear in
//! the output at all. [`ShortChunkPolicy::MergeForward`] keeps them instead, at
//! the cost of occasionally emitting a chunk below the floor when the ceiling
//! leaves no room to merge.

use std::ops::RangeInclusive;

use crate::{Error, Result};

/// Default configuration constants.
pub mod defaults {
    /// Default minimum semantic closeness for merging a sentence.
    pub const SIMILARITY_THRESHOLD: f32 = 0.88;

    /// Default minimum emitted chunk length, in characters.
    pub const MIN_CHUNK_LENGTH: usize = 250;

    /// Default maximum chunk length, in characters.
    pub const MAX_CHUNK_LENGTH: usize = 500;
}

/// What to do with a candidate chunk that is below `min_chunk_length` when a
/// boundary is sealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ShortChunkPolicy {
    /// Discard the short candidate. Its sentences are lost from the output.
    #[default]
    Drop,
    /// Carry the short candidate into the next chunk so no sentence is lost.
    MergeForward,
}

/// Immutable parameter set for a chunking pass.
///
/// # Examples
///
/// ```rust
/// use tessera::{ChunkingConfig, ShortChunkPolicy};
///
/// let config = ChunkingConfig::new(0.8, 100, 400).unwrap();
/// assert_eq!(config.min_chunk_length(), 100);
/// assert_eq!(config.policy(), ShortChunkPolicy::Drop);
///
/// // The ceiling must not be below the floor.
/// assert!(ChunkingConfig::new(0.8, 400, 100).is_err());
///
/// // Range syntax
/// let config = ChunkingConfig::from_range(0.8, 100..=400).unwrap();
/// assert_eq!(config.max_chunk_length(), 400);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "RawChunkingConfig", into = "RawChunkingConfig")
)]
pub struct ChunkingConfig {
    similarity_threshold: f32,
    min_chunk_length: usize,
    max_chunk_length: usize,
    policy: ShortChunkPolicy,
}

impl ChunkingConfig {
    /// Create a validated configuration with the default [`ShortChunkPolicy::Drop`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidThreshold`] if `similarity_threshold` is not
    /// within `0.0..=1.0`, or [`Error::MinExceedsMax`] if
    /// `max_chunk_length < min_chunk_length`.
    pub fn new(
        similarity_threshold: f32,
        min_chunk_length: usize,
        max_chunk_length: usize,
    ) -> Result<Self> {
        check_threshold(similarity_threshold)?;
        check_lengths(min_chunk_length, max_chunk_length)?;
        Ok(Self {
            similarity_threshold,
            min_chunk_length,
            max_chunk_length,
            policy: ShortChunkPolicy::default(),
        })
    }

    /// Create a configuration from an inclusive length range.
    ///
    /// # Errors
    ///
    /// Same as [`ChunkingConfig::new`].
    pub fn from_range(similarity_threshold: f32, lengths: RangeInclusive<usize>) -> Result<Self> {
        Self::new(similarity_threshold, *lengths.start(), *lengths.end())
    }

    /// Replace the similarity threshold.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidThreshold`] if the threshold is out of range.
    pub fn with_threshold(self, similarity_threshold: f32) -> Result<Self> {
        check_threshold(similarity_threshold)?;
        Ok(Self {
            similarity_threshold,
            ..self
        })
    }

    /// Replace both length bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MinExceedsMax`] if `max < min`.
    pub fn with_lengths(self, min: usize, max: usize) -> Result<Self> {
        check_lengths(min, max)?;
        Ok(Self {
            min_chunk_length: min,
            max_chunk_length: max,
            ..self
        })
    }

    /// Choose how short candidates are handled on seal.
    #[must_use]
    pub const fn with_policy(self, policy: ShortChunkPolicy) -> Self {
        Self { policy, ..self }
    }

    /// Minimum semantic closeness for merging a sentence into the current chunk.
    pub const fn similarity_threshold(&self) -> f32 {
        self.similarity_threshold
    }

    /// Chunks shorter than this (in characters) are never emitted on their own.
    pub const fn min_chunk_length(&self) -> usize {
        self.min_chunk_length
    }

    /// Hard ceiling on chunk length in characters, except for single-sentence
    /// chunks.
    pub const fn max_chunk_length(&self) -> usize {
        self.max_chunk_length
    }

    /// How short candidates are handled on seal.
    pub const fn policy(&self) -> ShortChunkPolicy {
        self.policy
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: defaults::SIMILARITY_THRESHOLD,
            min_chunk_length: defaults::MIN_CHUNK_LENGTH,
            max_chunk_length: defaults::MAX_CHUNK_LENGTH,
            policy: ShortChunkPolicy::Drop,
        }
    }
}

fn check_threshold(threshold: f32) -> Result<()> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(Error::InvalidThreshold(threshold))
    }
}

fn check_lengths(min: usize, max: usize) -> Result<()> {
    if max < min {
        Err(Error::MinExceedsMax { min, max })
    } else {
        Ok(())
    }
}

/// Unvalidated wire form; deserialization goes through [`ChunkingConfig::new`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawChunkingConfig {
    similarity_threshold: f32,
    min_chunk_length: usize,
    max_chunk_length: usize,
    #[serde(default)]
    policy: ShortChunkPolicy,
}

#[cfg(feature = "serde")]
impl TryFrom<RawChunkingConfig> for ChunkingConfig {
    type Error = Error;

    fn try_from(raw: RawChunkingConfig) -> Result<Self> {
        Ok(Self::new(
            raw.similarity_threshold,
            raw.min_chunk_length,
            raw.max_chunk_length,
        )?
        .with_policy(raw.policy))
    }
}

#[cfg(feature = "serde")]
impl From<ChunkingConfig> for RawChunkingConfig {
    fn from(config: ChunkingConfig) -> Self {
        Self {
            similarity_threshold: config.similarity_threshold,
            min_chunk_length: config.min_chunk_length,
            max_chunk_length: config.max_chunk_length,
            policy: config.policy,
        }
    }
}
