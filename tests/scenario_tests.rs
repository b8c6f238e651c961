//! Boundary-decision scenarios with controlled similarity.
//!
//! Each document is one sentence per line, written `topic|body`. The topic
//! oracle scores 1.0 when a sentence shares the span's topic and 0.0
//! otherwise, so every boundary below is forced by exactly one constraint.
//! The fixed-score oracle pins scores to the threshold itself.

use tessera::{
    ChunkAssembler, ChunkingConfig, Error, Result, Segmenter, Sentence, ShortChunkPolicy,
    SimilarityOracle,
};

struct LineSegmenter;

impl Segmenter for LineSegmenter {
    fn segment(&self, text: &str) -> Result<Vec<Sentence>> {
        let mut sentences = Vec::new();
        let mut offset = 0;
        for line in text.split('\n') {
            if !line.is_empty() {
                sentences.push(Sentence::new(
                    line,
                    offset,
                    offset + line.len(),
                    sentences.len(),
                ));
            }
            offset += line.len() + 1;
        }
        Ok(sentences)
    }
}

struct TopicOracle;

impl SimilarityOracle for TopicOracle {
    type Representation = Vec<String>;

    fn represent(&self, text: &str) -> Result<Vec<String>> {
        Ok(text
            .lines()
            .filter_map(|line| line.split_once('|').map(|(topic, _)| topic.to_string()))
            .collect())
    }

    fn similarity(&self, a: &Vec<String>, b: &Vec<String>) -> f32 {
        if a.iter().chain(b).all(|t| Some(t) == a.first()) {
            1.0
        } else {
            0.0
        }
    }
}

struct BrokenSegmenter;

impl Segmenter for BrokenSegmenter {
    fn segment(&self, _text: &str) -> Result<Vec<Sentence>> {
        Err(Error::Segmentation("language model unavailable".into()))
    }
}

/// A `len`-character sentence on `topic`.
fn line(topic: &str, len: usize) -> String {
    let prefix = format!("{topic}|");
    format!("{prefix}{}", "w".repeat(len - prefix.len()))
}

fn document(lines: &[String]) -> String {
    lines.join("\n")
}

fn assembler(min: usize, max: usize) -> ChunkAssembler<LineSegmenter, TopicOracle> {
    let config = ChunkingConfig::new(0.9, min, max).unwrap();
    ChunkAssembler::new(LineSegmenter, TopicOracle, config)
}

#[test]
fn uniform_short_text_forms_one_chunk() {
    let text = document(&[line("a", 40), line("a", 40), line("a", 40)]);
    let chunks = assembler(100, 500).process(&text).unwrap();

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].sentences.len(), 3);
    assert_eq!(chunks[0].len(), 122);
}

#[test]
fn dissimilar_sentence_forces_split() {
    let text = document(&[line("a", 200), line("a", 200), line("b", 200)]);
    let chunks = assembler(100, 1000).process(&text).unwrap();

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].sentences.len(), 2);
    assert_eq!(chunks[0].len(), 401);
    assert_eq!(chunks[1].sentences.len(), 1);
    assert_eq!(chunks[1].len(), 200);
    assert_eq!(chunks[1].sentences[0].index, 2);
}

#[test]
fn short_candidate_is_dropped_on_seal() {
    let text = document(&[line("a", 60), line("b", 200), line("b", 200)]);
    let outcome = assembler(100, 1000).process_detailed(&text).unwrap();

    assert_eq!(outcome.chunks.len(), 1);
    assert_eq!(
        outcome.chunks[0].sentence_indices().collect::<Vec<_>>(),
        vec![1, 2]
    );
    assert!(!outcome.chunks[0].text.contains("a|"));
    assert_eq!(outcome.total_sentences, 3);
    assert_eq!(outcome.dropped_sentences, 1);
}

#[test]
fn short_candidate_is_merged_forward_when_asked() {
    let text = document(&[line("a", 60), line("b", 200), line("b", 200)]);
    let config = ChunkingConfig::new(0.9, 100, 1000)
        .unwrap()
        .with_policy(ShortChunkPolicy::MergeForward);
    let outcome = ChunkAssembler::new(LineSegmenter, TopicOracle, config)
        .process_detailed(&text)
        .unwrap();

    // The carried "a" sentence now anchors the span, so the second "b"
    // no longer matches it.
    assert_eq!(outcome.dropped_sentences, 0);
    assert_eq!(outcome.chunks.len(), 2);
    assert_eq!(
        outcome.chunks[0].sentence_indices().collect::<Vec<_>>(),
        vec![0, 1]
    );
    assert_eq!(outcome.chunks[0].len(), 261);
    assert_eq!(
        outcome.chunks[1].sentence_indices().collect::<Vec<_>>(),
        vec![2]
    );
}

#[test]
fn oversized_first_sentence_becomes_its_own_chunk() {
    let text = document(&[line("a", 2000), line("a", 50), line("a", 50)]);
    let chunks = assembler(10, 500).process(&text).unwrap();

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].len(), 2000);
    assert_eq!(chunks[0].sentences.len(), 1);
    assert_eq!(chunks[1].len(), 101);
}

#[test]
fn size_ceiling_splits_similar_text() {
    let lines: Vec<String> = (0..10).map(|_| line("a", 99)).collect();
    let chunks = assembler(0, 300).process(&document(&lines)).unwrap();

    // 3 sentences = 299 chars; a 4th would need 399.
    assert_eq!(chunks.len(), 4);
    for chunk in &chunks[..3] {
        assert_eq!(chunk.len(), 299);
    }
    assert_eq!(chunks[3].len(), 99);
}

#[test]
fn trailing_short_candidate_is_dropped() {
    let text = document(&[line("a", 150), line("a", 150), line("b", 30)]);
    let outcome = assembler(100, 1000).process_detailed(&text).unwrap();

    assert_eq!(outcome.chunks.len(), 1);
    assert_eq!(outcome.dropped_sentences, 1);
}

#[test]
fn chunk_offsets_cover_source_span() {
    let text = document(&[line("a", 120), line("a", 120), line("b", 120)]);
    let chunks = assembler(100, 1000).process(&text).unwrap();

    assert_eq!(chunks.len(), 2);
    // Lines are newline-separated in the source, space-joined in the chunk.
    assert_eq!(text[chunks[0].span()].replace('\n', " "), chunks[0].text);
    assert_eq!(&text[chunks[1].span()], chunks[1].text);
}

#[test]
fn identical_input_gives_identical_output() {
    let text = document(&[
        line("a", 80),
        line("a", 90),
        line("b", 70),
        line("c", 300),
        line("c", 40),
    ]);
    let assembler = assembler(50, 400);

    assert_eq!(
        assembler.process(&text).unwrap(),
        assembler.process(&text).unwrap()
    );
}

#[test]
fn segmentation_failure_propagates() {
    let config = ChunkingConfig::new(0.5, 0, 100).unwrap();
    let assembler = ChunkAssembler::new(BrokenSegmenter, TopicOracle, config);

    assert!(matches!(
        assembler.process("anything"),
        Err(Error::Segmentation(_))
    ));
}

#[test]
fn default_stack_chunks_prose() {
    let text = "Honey bees live in large colonies. The colonies of honey bees \
                are ruled by a queen. Worker bees in the colonies gather nectar. \
                Volcanoes erupt when magma rises through the crust. Magma that \
                reaches the surface is called lava.";
    let config = ChunkingConfig::new(0.15, 30, 400).unwrap();
    let outcome = ChunkAssembler::with_config(config)
        .process_detailed(text)
        .unwrap();

    assert_eq!(outcome.total_sentences, 5);
    assert_eq!(outcome.chunks.len(), 2);
    assert!(outcome.chunks[0].text.contains("queen"));
    assert!(outcome.chunks[1].text.starts_with("Volcanoes"));
}

/// Scores every pair the same, regardless of topic.
struct FixedScoreOracle(f32);

impl SimilarityOracle for FixedScoreOracle {
    type Representation = ();

    fn represent(&self, _text: &str) -> Result<()> {
        Ok(())
    }

    fn similarity(&self, _a: &(), _b: &()) -> f32 {
        self.0
    }
}

#[test]
fn candidate_exactly_at_min_is_emitted() {
    let text = document(&[line("a", 100), line("b", 100)]);
    let outcome = assembler(100, 1000).process_detailed(&text).unwrap();

    // Both the sealed candidate and the trailing one sit exactly on the floor.
    assert_eq!(outcome.chunks.len(), 2);
    assert_eq!(outcome.chunks[0].len(), 100);
    assert_eq!(outcome.chunks[1].len(), 100);
    assert_eq!(outcome.dropped_sentences, 0);
}

#[test]
fn candidate_one_below_min_is_dropped() {
    let text = document(&[line("a", 99), line("b", 100)]);
    let outcome = assembler(100, 1000).process_detailed(&text).unwrap();

    assert_eq!(outcome.chunks.len(), 1);
    assert_eq!(outcome.chunks[0].len(), 100);
    assert_eq!(outcome.dropped_sentences, 1);
}

#[test]
fn score_exactly_at_threshold_is_admitted() {
    let text = document(&[line("a", 40), line("b", 40), line("c", 40)]);
    let config = ChunkingConfig::new(0.5, 0, 500).unwrap();
    let chunks = ChunkAssembler::new(LineSegmenter, FixedScoreOracle(0.5), config)
        .process(&text)
        .unwrap();

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].sentences.len(), 3);
    assert_eq!(chunks[0].len(), 122);
}

#[test]
fn score_just_below_threshold_splits() {
    let text = document(&[line("a", 40), line("b", 40), line("c", 40)]);
    let config = ChunkingConfig::new(0.5, 0, 500).unwrap();
    let chunks = ChunkAssembler::new(LineSegmenter, FixedScoreOracle(0.49), config)
        .process(&text)
        .unwrap();

    assert_eq!(chunks.len(), 3);
    assert!(chunks.iter().all(|c| c.sentences.len() == 1));
}
