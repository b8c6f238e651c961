//! # tessera
//!
//! Greedy semantic chunking for retrieval-augmented generation (RAG) pipelines.
//!
//! ## The Problem
//!
//! Retrieval works best on chunks that are about one thing and are neither
//! too short to carry meaning nor too long to embed. Those goals conflict:
//!
//! - Split on every topic shift and you get fragments too small to be useful
//! - Split on size alone and chunks straddle topics, diluting their embeddings
//! - Merge aggressively and chunks blow past the embedding model's limits
//!
//! tessera reconciles the three in a single left-to-right pass over the
//! document's sentences, without backtracking.
//!
//! ## The Algorithm
//!
//! ```text
//! Sentences:  S1   S2   S3   S4   S5
//!             |____|____|    |____|
//!             similar, fits  similar, fits
//!                       ^
//!                 S3 scores below threshold against span [S1..S2]
//!                 -> seal [S1, S2], start a new candidate with S3
//!
//! seal(candidate):
//!     len >= min  -> emit as a Chunk
//!     len <  min  -> discard (or carry forward, see ShortChunkPolicy)
//! ```
//!
//! Each incoming sentence is admitted to the current candidate only if it is
//! similar enough to the candidate's *whole span* and the joined text stays
//! within `max_chunk_length`. The first sentence of a candidate is always
//! admitted, so a single over-long sentence becomes its own chunk.
//!
//! ## Quick Start
//!
//! ```rust
//! use tessera::{ChunkAssembler, ChunkingConfig};
//!
//! let config = ChunkingConfig::new(0.1, 20, 300).unwrap();
//! let assembler = ChunkAssembler::with_config(config);
//!
//! let text = "Bees visit flowers for nectar. Flowers depend on bees for pollen. \
//!             The stock market fell sharply on Monday.";
//! let chunks = assembler.process(text).unwrap();
//!
//! for chunk in &chunks {
//!     assert!(chunk.len() >= 20);
//! }
//! ```
//!
//! ## Pluggable Collaborators
//!
//! Sentence segmentation and similarity scoring sit behind two narrow traits:
//!
//! | Trait | Default | Alternatives |
//! |-------|---------|--------------|
//! | [`Segmenter`] | [`UnicodeSegmenter`] (UAX #29) | any model-backed splitter |
//! | [`SimilarityOracle`] | [`LexicalSimilarity`] (term vectors) | `EmbeddingSimilarity` (`semantic` feature) |
//!
//! Deterministic stubs make the chunking logic testable without loading a
//! language model.
//!
//! ## Data Loss
//!
//! With the default [`ShortChunkPolicy::Drop`], candidates shorter than
//! `min_chunk_length` at a boundary are discarded, so the output does not
//! necessarily cover every sentence. Use [`ShortChunkPolicy::MergeForward`]
//! when lossless coverage matters more than the minimum size.
//!
//! ## Semantic Similarity (requires `semantic` feature)
//!
//! ```rust,ignore
//! use tessera::{ChunkAssembler, ChunkingConfig, EmbeddingSimilarity, UnicodeSegmenter};
//!
//! let oracle = EmbeddingSimilarity::new()?;
//! let assembler = ChunkAssembler::new(UnicodeSegmenter, oracle, ChunkingConfig::default());
//! let chunks = assembler.process(long_document)?;
//! ```

mod accumulator;
mod assembler;
mod chunk;
mod config;
mod error;
mod sentence;
mod similarity;

#[cfg(feature = "semantic")]
mod embedding;

pub use accumulator::ChunkAccumulator;
pub use assembler::{ChunkAssembler, Chunking};
pub use chunk::Chunk;
pub use config::{defaults, ChunkingConfig, ShortChunkPolicy};
pub use error::{Error, Result};
pub use sentence::{Segmenter, Sentence, Span, UnicodeSegmenter};
pub use similarity::{LexicalSimilarity, SimilarityOracle, TermVector};

#[cfg(feature = "semantic")]
pub use embedding::{cosine_similarity, EmbeddingSimilarity};
