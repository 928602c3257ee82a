//! Core pipeline orchestration and domain logic for Profiler.
//!
//! This crate ties together markup parsing, keyword matching, the
//! probe/learn/re-match fallback and sentence classification into per-document
//! and batch workflows (e.g., [`run_parse_job`]), plus the every-mention scan.

pub mod document;
pub mod fallback;
pub mod fetch;
pub mod matcher;
pub mod pipeline;
pub mod scan;

pub use document::{Classified, ParsedDocument, analyze_document, process_document, resolve_document};
pub use fallback::{ProbeHit, learn, probe};
pub use fetch::{ArticleFetcher, DirectoryMarkup, InlineMarkup};
pub use matcher::{classify_records, match_sections};
pub use pipeline::{BatchOutcome, ParseJob, ProgressReporter, SilentProgress, run_batch, run_parse_job};
pub use scan::{INFOBOX_TITLE, ScanReport, ScanSection, SectionMentions, scan_document};
