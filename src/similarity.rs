//! Similarity oracles.
//!
//! The assembler asks one question over and over: is this sentence close
//! enough to everything accumulated so far? The answer comes from a
//! [`SimilarityOracle`], split into two steps so that the expensive half can
//! be cached:
//!
//! 1. `represent`: turn text into a comparable representation (a term vector,
//!    an embedding, ...). The accumulator keeps the representation of its
//!    whole span and only recomputes it after the span changes.
//! 2. `similarity`: score two representations in `[0, 1]`.
//!
//! Oracles must be deterministic for a given pair, otherwise chunking is not
//! reproducible.

use std::collections::BTreeMap;

use crate::Result;

/// Scores semantic closeness between a sentence and a span of text.
///
/// ## Example
///
/// ```rust
/// use tessera::{LexicalSimilarity, SimilarityOracle};
///
/// let oracle = LexicalSimilarity::new();
/// let a = oracle.represent("The cat sat on the mat.").unwrap();
/// let b = oracle.represent("The cat sat on the mat.").unwrap();
/// assert!((oracle.similarity(&a, &b) - 1.0).abs() < 1e-6);
/// ```
pub trait SimilarityOracle {
    /// Comparable form of a piece of text.
    type Representation;

    /// Compute the representation of `text`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing resource (e.g. an embedding model)
    /// fails.
    fn represent(&self, text: &str) -> Result<Self::Representation>;

    /// Score two representations. Must return a value in `[0, 1]`.
    fn similarity(&self, a: &Self::Representation, b: &Self::Representation) -> f32;
}

impl<O: SimilarityOracle + ?Sized> SimilarityOracle for &O {
    type Representation = O::Representation;

    fn represent(&self, text: &str) -> Result<Self::Representation> {
        (**self).represent(text)
    }

    fn similarity(&self, a: &Self::Representation, b: &Self::Representation) -> f32 {
        (**self).similarity(a, b)
    }
}

/// Model-free oracle: cosine similarity of term-frequency vectors.
///
/// Terms are lowercased runs of alphanumeric characters. Two texts sharing no
/// terms score 0; identical bags of words score 1. Crude next to embeddings,
/// but deterministic and cheap, which makes it a reasonable default when no
/// model is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalSimilarity;

/// Term-frequency vector produced by [`LexicalSimilarity`].
///
/// Ordered map so that the dot product is summed in a fixed order.
pub type TermVector = BTreeMap<String, u32>;

impl LexicalSimilarity {
    /// Create a lexical oracle.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn terms(text: &str) -> TermVector {
        let mut terms = TermVector::new();
        for term in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            *terms.entry(term.to_lowercase()).or_insert(0) += 1;
        }
        terms
    }

    fn norm(v: &TermVector) -> f64 {
        v.values()
            .map(|&n| f64::from(n) * f64::from(n))
            .sum::<f64>()
            .sqrt()
    }
}

impl SimilarityOracle for LexicalSimilarity {
    type Representation = TermVector;

    fn represent(&self, text: &str) -> Result<TermVector> {
        Ok(Self::terms(text))
    }

    fn similarity(&self, a: &TermVector, b: &TermVector) -> f32 {
        let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
        let dot: f64 = small
            .iter()
            .filter_map(|(term, &n)| large.get(term).map(|&m| f64::from(n) * f64::from(m)))
            .sum();

        let norms = Self::norm(a) * Self::norm(b);
        if norms > 0.0 {
            (dot / norms).clamp(0.0, 1.0) as f32
        } else {
            0.0
        }
    }
}
