//! Chunk Inspector
//!
//! Chunk a passage and print a per-chunk breakdown: length, sentence count,
//! and the source sentences behind each chunk.
//!
//! ```bash
//! cargo run --example inspect_chapter
//! RUST_LOG=tessera=debug cargo run --example inspect_chapter -- 0.2 120 400
//! ```
//!
//! Optional positional arguments: similarity threshold, min length, max length.

use tessera::{ChunkAssembler, ChunkingConfig, ShortChunkPolicy};
use tracing_subscriber::EnvFilter;

const PASSAGE: &str = "The house stood in a wide valley, surrounded by orchards and \
    gardens that the family had tended for generations. Every orchard in the valley \
    was planted with pear and apple trees, and the gardens between them were full of \
    herbs. The family rose at dawn to work in the gardens and orchards. \
    Music was their chief pleasure in the evenings. After supper they gathered in the \
    great hall, where the music of harps and voices filled the hall until night. \
    Nobody in the house spoke of the world beyond the hills. The hills were said to \
    hide ruined cities, and the ruins were older than any record.";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut config = ChunkingConfig::new(0.15, 120, 400)?;
    if let [threshold, min, max] = args.as_slice() {
        config = ChunkingConfig::new(threshold.parse()?, min.parse()?, max.parse()?)?;
    }

    for policy in [ShortChunkPolicy::Drop, ShortChunkPolicy::MergeForward] {
        let assembler = ChunkAssembler::with_config(config.with_policy(policy));
        let outcome = assembler.process_detailed(PASSAGE)?;

        println!("== {policy:?} ==");
        println!(
            "Total sentences: {} | Generated chunks: {} | Dropped sentences: {}\n",
            outcome.total_sentences,
            outcome.chunks.len(),
            outcome.dropped_sentences
        );

        for chunk in &outcome.chunks {
            println!("{chunk}");
            println!("  {}", chunk.text);
            for sentence in &chunk.sentences {
                println!("  - {}", sentence.text);
            }
            println!();
        }
    }

    Ok(())
}
