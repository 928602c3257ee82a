//! File-backed storage for a batch run.
//!
//! - [`VocabularyStore`]: the line-delimited keyword vocabulary, loaded at batch
//!   start and rewritten at batch end
//! - [`read_rows`] / [`write_results`]: JSON Lines batch input and output

mod jsonl;
mod vocabulary;

pub use jsonl::{parse_lines, read_rows, render_lines, write_results};
pub use vocabulary::{SEED_KEYWORDS, VocabularyStore, parse_vocabulary, render_vocabulary};
