//! Embedding-backed similarity.
//!
//! Text is embedded with a sentence-embedding model and compared by cosine
//! similarity. The accumulated span is embedded as one piece of text, so the
//! model sees the whole candidate chunk in context rather than an average of
//! its sentences.
//!
//! ## Cost
//!
//! Every admission check embeds the incoming sentence; the span embedding is
//! reused until the span grows. For n sentences that is roughly 2n embedding
//! calls per document. Load the model once and share the oracle across
//! documents.

use crate::{Error, Result, SimilarityOracle};

/// Similarity oracle over fastembed sentence embeddings.
///
/// Requires the `semantic` feature and an embedding model.
///
/// ## Example
///
/// ```rust,ignore
/// use tessera::{ChunkAssembler, ChunkingConfig, EmbeddingSimilarity, UnicodeSegmenter};
///
/// // Uses fastembed's default model (BGE-small-en)
/// let oracle = EmbeddingSimilarity::new()?;
/// let assembler = ChunkAssembler::new(UnicodeSegmenter, oracle, ChunkingConfig::default());
/// let chunks = assembler.process(chapter)?;
/// ```
pub struct EmbeddingSimilarity {
    model: fastembed::TextEmbedding,
}

impl EmbeddingSimilarity {
    /// Load fastembed's default embedding model.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedding model fails to load.
    pub fn new() -> Result<Self> {
        let model = fastembed::TextEmbedding::try_new(Default::default())
            .map_err(|e| Error::Embedding(e.to_string()))?;

        Ok(Self { model })
    }

    /// Wrap an already loaded model.
    #[must_use]
    pub fn from_model(model: fastembed::TextEmbedding) -> Self {
        Self { model }
    }
}

/// Cosine similarity between two dense vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    innr::cosine(a, b)
}

impl SimilarityOracle for EmbeddingSimilarity {
    type Representation = Vec<f32>;

    fn represent(&self, text: &str) -> Result<Vec<f32>> {
        self.model
            .embed(vec![text], None)
            .map_err(|e| Error::Embedding(e.to_string()))?
            .into_iter()
            .next()
            .ok_or_else(|| Error::Embedding("model returned no embedding".into()))
    }

    fn similarity(&self, a: &Vec<f32>, b: &Vec<f32>) -> f32 {
        // Opposite directions carry no more topical closeness than orthogonal ones.
        cosine_similarity(a, b).clamp(0.0, 1.0)
    }
}

impl std::fmt::Debug for EmbeddingSimilarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingSimilarity").finish_non_exhaustive()
    }
}
