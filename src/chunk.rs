//! The Chunk type: a finalized run of sentences.

use std::fmt;

use crate::Sentence;

/// A finalized, contiguous run of sentences.
///
/// `text` is always the member sentences' text joined by a single space, in
/// document order. Chunks are created only when a boundary is sealed and are
/// never mutated afterwards.
///
/// ```rust
/// use tessera::{Chunk, Sentence};
///
/// let source = "One two.  Three four.";
/// let sentences = vec![
///     Sentence::new("One two.", 0, 8, 0),
///     Sentence::new("Three four.", 10, 21, 1),
/// ];
/// let chunk = Chunk::new(sentences, 0);
///
/// // Joined with one space, while the offsets cover the original span.
/// assert_eq!(chunk.text, "One two. Three four.");
/// assert_eq!(&source[chunk.start..chunk.end], "One two.  Three four.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chunk {
    /// Space-joined text of the member sentences.
    #[cfg_attr(feature = "serde", serde(rename = "content"))]
    pub text: String,
    /// Member sentences, in document order.
    pub sentences: Vec<Sentence>,
    /// Byte offset of the first sentence's start in the source.
    pub start: usize,
    /// Byte offset of the last sentence's end (exclusive) in the source.
    pub end: usize,
    /// Zero-based index of this chunk in the output sequence.
    pub index: usize,
}

impl Chunk {
    /// Build a chunk from its member sentences.
    ///
    /// An empty sentence list yields an empty chunk at offset 0.
    #[must_use]
    pub fn new(sentences: Vec<Sentence>, index: usize) -> Self {
        let text = sentences
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let start = sentences.first().map(|s| s.start).unwrap_or(0);
        let end = sentences.last().map(|s| s.end).unwrap_or(start);

        Self {
            text,
            sentences,
            start,
            end,
            index,
        }
    }

    /// Length of the chunk text in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether the chunk has no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The byte span of this chunk in the source.
    #[must_use]
    pub fn span(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    /// Indices of the member sentences in the source document.
    pub fn sentence_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.sentences.iter().map(|s| s.index)
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Chunk #{} | Length: {} chars | Sentences: {}",
            self.index + 1,
            self.len(),
            self.sentences.len()
        )
    }
}
