//! The in-progress chunk.
//!
//! A [`ChunkAccumulator`] holds the sentences of the chunk currently being
//! built and answers the two admission questions the assembler asks for every
//! new sentence:
//!
//! - **Size**: would the sentence still fit under the ceiling?
//! - **Topic**: is the sentence close enough to what is already here?
//!
//! Both answers are `true` for an empty accumulator. The first sentence of a
//! chunk is always admitted, however long it is, so an oversized sentence
//! becomes a chunk of its own instead of being dropped or looping forever.
//!
//! ## Whole-Span Anchor
//!
//! Similarity is measured against the accumulated span as one unit, not
//! against the last sentence or an average of members:
//!
//! ```text
//! source:  ... [S1  S2  S3] S4 ...
//!               \________/
//!                 span      <- compared with S4 as a single piece of text
//! ```
//!
//! The span representation is cached and invalidated whenever the membership
//! changes.

use crate::{Chunk, Result, Sentence, SimilarityOracle, Span};

/// Mutable candidate chunk, exclusively owned by one chunking pass.
pub struct ChunkAccumulator<'a, O: SimilarityOracle> {
    source: &'a str,
    oracle: &'a O,
    sentences: Vec<&'a Sentence>,
    /// Character length of the space-joined text.
    joined_len: usize,
    span_repr: Option<O::Representation>,
}

impl<'a, O: SimilarityOracle> ChunkAccumulator<'a, O> {
    /// Create an empty accumulator over `source`.
    ///
    /// Sentences added later must carry byte offsets into `source`.
    pub fn new(source: &'a str, oracle: &'a O) -> Self {
        Self {
            source,
            oracle,
            sentences: Vec::new(),
            joined_len: 0,
            span_repr: None,
        }
    }

    /// Append a sentence.
    pub fn add_sentence(&mut self, sentence: &'a Sentence) {
        if !self.sentences.is_empty() {
            self.joined_len += 1;
        }
        self.joined_len += sentence.len();
        self.sentences.push(sentence);
        self.span_repr = None;
    }

    /// Whether `sentence` can be added without the joined text exceeding
    /// `max_length` characters. Always `true` when empty.
    pub fn can_accommodate(&self, sentence: &Sentence, max_length: usize) -> bool {
        self.sentences.is_empty() || self.joined_len + sentence.len() + 1 <= max_length
    }

    /// Whether `sentence` scores at least `threshold` against the accumulated
    /// span. Always `true` when empty.
    ///
    /// # Errors
    ///
    /// Propagates any failure of the similarity oracle.
    pub fn is_similar_to(&mut self, sentence: &Sentence, threshold: f32) -> Result<bool> {
        Ok(self.similarity_to(sentence)?.map_or(true, |score| score >= threshold))
    }

    /// Similarity between `sentence` and the accumulated span, or `None` when
    /// empty.
    ///
    /// # Errors
    ///
    /// Propagates any failure of the similarity oracle.
    pub fn similarity_to(&mut self, sentence: &Sentence) -> Result<Option<f32>> {
        if self.sentences.is_empty() {
            return Ok(None);
        }

        let span_repr = match self.span_repr.take() {
            Some(repr) => repr,
            None => match self.as_span() {
                Some(span) => self.oracle.represent(span.text)?,
                None => self.oracle.represent(&self.to_text())?,
            },
        };
        let sentence_repr = self.oracle.represent(&sentence.text)?;
        let score = self.oracle.similarity(&sentence_repr, &span_repr);
        self.span_repr = Some(span_repr);

        Ok(Some(score))
    }

    /// The contiguous source region from the first sentence's start to the
    /// last sentence's end.
    ///
    /// `None` when empty, or when the sentence offsets do not index into the
    /// source; similarity then falls back to the joined text.
    pub fn as_span(&self) -> Option<Span<'a>> {
        let first = self.sentences.first()?;
        let last = self.sentences.last()?;
        let text = self.source.get(first.start..last.end)?;
        Some(Span {
            text,
            start: first.start,
            end: last.end,
        })
    }

    /// Member sentences joined by a single space. Empty string when empty.
    pub fn to_text(&self) -> String {
        self.sentences
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Character length of [`ChunkAccumulator::to_text`], without building it.
    pub fn text_len(&self) -> usize {
        self.joined_len
    }

    /// Member sentences, in order.
    pub fn sentences(&self) -> &[&'a Sentence] {
        &self.sentences
    }

    /// Number of member sentences.
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    /// Whether there are no member sentences.
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Build a [`Chunk`] from the current contents.
    pub fn to_chunk(&self, index: usize) -> Chunk {
        Chunk::new(self.sentences.iter().map(|&s| s.clone()).collect(), index)
    }

    /// Drop all member sentences.
    pub fn clear(&mut self) {
        self.sentences.clear();
        self.joined_len = 0;
        self.span_repr = None;
    }
}

impl<O: SimilarityOracle> std::fmt::Debug for ChunkAccumulator<'_, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkAccumulator")
            .field("sentences", &self.sentences.len())
            .field("text_len", &self.joined_len)
            .field("span_cached", &self.span_repr.is_some())
            .finish()
    }
}
