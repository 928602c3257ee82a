//! Shared types, error model, and configuration for Profiler.
//!
//! This crate is the foundation depended on by all other Profiler crates.
//! It provides:
//! - [`ProfilerError`]: the unified error type
//! - Domain types ([`SectionNode`], [`MatchRecord`], [`DegreeSentence`], [`DocumentResult`])
//! - The batch-scoped [`Vocabulary`]
//! - Configuration ([`AppConfig`], [`ParseConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;
pub mod vocabulary;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, ContentScope, ParseConfig, ParsingConfig, PathsConfig, config_dir,
    config_file_path, init_config, load_config, load_config_from,
};
pub use error::{ProfilerError, Result};
pub use types::{
    BatchRow, BatchSummary, DegreeSentence, DocumentResult, MatchRecord, Resolution, RunId,
    SectionNode, preorder,
};
pub use vocabulary::Vocabulary;
