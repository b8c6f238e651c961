//! Greedy chunk assembly.
//!
//! ## The Pass
//!
//! One left-to-right walk over the sentences, with exactly one live
//! [`ChunkAccumulator`]. For each sentence S:
//!
//! ```text
//! similar = acc.is_similar_to(S, threshold)
//! fits    = acc.can_accommodate(S, max)
//!
//! similar && fits  ->  acc.add(S)                 extend
//! otherwise        ->  seal(acc); acc.add(S)      S starts the next candidate
//! ```
//!
//! Sealing emits the candidate if it is at least `min` characters long and
//! then clears the accumulator either way. After the last sentence the
//! remaining candidate is sealed once more.
//!
//! No lookahead and no backtracking: the result is a deterministic greedy
//! approximation, not an optimal segmentation.
//!
//! ## Lost Sentences
//!
//! Under the default [`ShortChunkPolicy::Drop`], a candidate below the floor at
//! seal time is discarded and never merged into the next chunk:
//!
//! ```text
//! min = 100
//! [60 chars] | dissimilar S  ->  [60 chars] dropped, S starts fresh
//! ```
//!
//! Callers that need every sentence in the output should use
//! [`ShortChunkPolicy::MergeForward`]. [`Chunking::dropped_sentences`] reports
//! how many sentences a pass discarded.

use tracing::{debug, debug_span, trace};

use crate::{
    Chunk, ChunkAccumulator, ChunkingConfig, LexicalSimilarity, Result, Segmenter, Sentence,
    ShortChunkPolicy, SimilarityOracle, UnicodeSegmenter,
};

/// Result of one chunking pass, with the counts needed to judge coverage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Chunking {
    /// Emitted chunks, in document order.
    pub chunks: Vec<Chunk>,
    /// Number of sentences the document was segmented into.
    pub total_sentences: usize,
    /// Number of sentences discarded in short candidates.
    pub dropped_sentences: usize,
}

impl Chunking {
    /// Number of sentences that made it into a chunk.
    pub fn covered_sentences(&self) -> usize {
        self.chunks.iter().map(|c| c.sentences.len()).sum()
    }
}

/// Groups a document's sentences into topically coherent, length-bounded
/// chunks.
///
/// ## Example
///
/// ```rust
/// use tessera::{ChunkAssembler, ChunkingConfig};
///
/// let config = ChunkingConfig::new(0.1, 20, 200).unwrap();
/// let assembler = ChunkAssembler::with_config(config);
///
/// let text = "Rivers carry water to the sea. The sea returns water to rivers as rain. \
///             Compilers translate source code into machine code.";
/// let chunks = assembler.process(text).unwrap();
///
/// assert_eq!(chunks.len(), 2);
/// assert!(chunks[0].text.contains("rain"));
/// assert!(chunks[1].text.starts_with("Compilers"));
/// ```
#[derive(Debug, Clone)]
pub struct ChunkAssembler<S = UnicodeSegmenter, O = LexicalSimilarity> {
    segmenter: S,
    oracle: O,
    config: ChunkingConfig,
}

impl ChunkAssembler {
    /// Create an assembler with the UAX #29 segmenter and the lexical oracle.
    #[must_use]
    pub fn with_config(config: ChunkingConfig) -> Self {
        Self::new(UnicodeSegmenter, LexicalSimilarity::new(), config)
    }
}

impl Default for ChunkAssembler {
    fn default() -> Self {
        Self::with_config(ChunkingConfig::default())
    }
}

impl<S: Segmenter, O: SimilarityOracle> ChunkAssembler<S, O> {
    /// Create an assembler from its collaborators.
    pub fn new(segmenter: S, oracle: O, config: ChunkingConfig) -> Self {
        Self {
            segmenter,
            oracle,
            config,
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    /// The similarity oracle in use.
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Segment `text` and group its sentences into chunks.
    ///
    /// # Errors
    ///
    /// Propagates segmenter and oracle failures. No partial result is
    /// returned.
    pub fn process(&self, text: &str) -> Result<Vec<Chunk>> {
        self.process_detailed(text).map(|outcome| outcome.chunks)
    }

    /// Like [`ChunkAssembler::process`], also reporting sentence counts.
    ///
    /// # Errors
    ///
    /// Propagates segmenter and oracle failures.
    pub fn process_detailed(&self, text: &str) -> Result<Chunking> {
        let sentences = self.segmenter.segment(text)?;
        self.process_sentences(text, &sentences)
    }

    /// Group already-segmented sentences of `source` into chunks.
    ///
    /// Sentence offsets should index into `source`; they anchor similarity
    /// comparisons to the original span.
    ///
    /// # Errors
    ///
    /// Propagates oracle failures.
    pub fn process_sentences(&self, source: &str, sentences: &[Sentence]) -> Result<Chunking> {
        let span = debug_span!("chunk_document", sentences = sentences.len());
        let _enter = span.enter();

        let mut pass = Pass {
            config: &self.config,
            acc: ChunkAccumulator::new(source, &self.oracle),
            chunks: Vec::new(),
            dropped: 0,
        };

        for sentence in sentences {
            pass.process_sentence(sentence)?;
        }
        pass.finalize();

        debug!(
            chunks = pass.chunks.len(),
            dropped_sentences = pass.dropped,
            "chunking pass complete"
        );

        Ok(Chunking {
            chunks: pass.chunks,
            total_sentences: sentences.len(),
            dropped_sentences: pass.dropped,
        })
    }
}

/// State of a single pass. Lives only for one `process_sentences` call.
struct Pass<'a, O: SimilarityOracle> {
    config: &'a ChunkingConfig,
    acc: ChunkAccumulator<'a, O>,
    chunks: Vec<Chunk>,
    dropped: usize,
}

impl<'a, O: SimilarityOracle> Pass<'a, O> {
    fn process_sentence(&mut self, sentence: &'a Sentence) -> Result<()> {
        let is_similar = self
            .acc
            .is_similar_to(sentence, self.config.similarity_threshold())?;
        let can_fit = self
            .acc
            .can_accommodate(sentence, self.config.max_chunk_length());

        trace!(
            index = sentence.index,
            len = sentence.len(),
            is_similar,
            can_fit,
            "sentence"
        );

        if is_similar && can_fit {
            self.acc.add_sentence(sentence);
            return Ok(());
        }

        match self.config.policy() {
            ShortChunkPolicy::Drop => self.seal(),
            ShortChunkPolicy::MergeForward => {
                if self.is_short() && can_fit {
                    // Carry the short candidate into the next chunk.
                    trace!(index = sentence.index, "merging short candidate forward");
                    self.acc.add_sentence(sentence);
                    return Ok(());
                }
                if self.is_short() {
                    self.emit();
                } else {
                    self.seal();
                }
            }
        }

        self.acc.add_sentence(sentence);
        Ok(())
    }

    fn is_short(&self) -> bool {
        self.acc.text_len() < self.config.min_chunk_length()
    }

    /// Emit the candidate if long enough, then clear.
    fn seal(&mut self) {
        if self.is_short() {
            debug!(
                len = self.acc.text_len(),
                sentences = self.acc.len(),
                min = self.config.min_chunk_length(),
                "dropping short candidate"
            );
            self.dropped += self.acc.len();
            self.acc.clear();
        } else {
            self.emit();
        }
    }

    /// Emit the candidate regardless of length, then clear.
    fn emit(&mut self) {
        let chunk = self.acc.to_chunk(self.chunks.len());
        debug!(
            index = chunk.index,
            len = self.acc.text_len(),
            sentences = chunk.sentences.len(),
            "sealed chunk"
        );
        self.chunks.push(chunk);
        self.acc.clear();
    }

    fn finalize(&mut self) {
        if self.acc.is_empty() {
            return;
        }

        if self.config.policy() == ShortChunkPolicy::MergeForward && self.is_short() {
            if let Some(last) = self.chunks.pop() {
                let merged_len = last.len() + 1 + self.acc.text_len();
                if merged_len <= self.config.max_chunk_length() {
                    trace!(index = last.index, "merging trailing candidate backward");
                    let mut sentences = last.sentences;
                    sentences.extend(self.acc.sentences().iter().map(|&s| s.clone()));
                    self.chunks.push(Chunk::new(sentences, last.index));
                    self.acc.clear();
                    return;
                }
                self.chunks.push(last);
            }
            self.emit();
            return;
        }

        self.seal();
    }
}
