//! Batch pipeline: rows → parallel parse → sequential resolution → results.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{info, instrument, warn};

use profiler_shared::{
    BatchRow, BatchSummary, DocumentResult, ParseConfig, Resolution, Result, Vocabulary,
};
use profiler_storage::{VocabularyStore, read_rows, write_results};

use crate::document::{ParsedDocument, analyze_document, resolve_document};
use crate::fetch::{ArticleFetcher, DirectoryMarkup, InlineMarkup};

/// Progress callback for reporting batch status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each document is resolved.
    fn document_done(&self, name: &str, resolution: Resolution, current: usize, total: usize);
    /// Called when the batch completes.
    fn done(&self, summary: &BatchSummary);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn document_done(&self, _name: &str, _resolution: Resolution, _current: usize, _total: usize) {}
    fn done(&self, _summary: &BatchSummary) {}
}

/// Results of [`run_batch`], in input order.
#[derive(Debug)]
pub struct BatchOutcome {
    pub results: Vec<DocumentResult>,
    pub summary: BatchSummary,
}

/// Process every row against one shared vocabulary.
///
/// Fetching and parsing run on blocking workers, at most `config.concurrency`
/// at a time. Resolution then runs in input order with the only mutable
/// borrow of `vocabulary`, so a title learned from one document is already a
/// keyword for every later one. A document that cannot be fetched or parsed
/// gets an empty result; it never aborts the batch. Settings that apply to
/// every document are checked first, and an invalid one fails the whole batch
/// before any document is read.
#[instrument(skip_all, fields(rows = rows.len(), fetcher = fetcher.name()))]
pub async fn run_batch(
    rows: Vec<BatchRow>,
    fetcher: Arc<dyn ArticleFetcher>,
    config: &ParseConfig,
    vocabulary: &mut Vocabulary,
    progress: &dyn ProgressReporter,
) -> Result<BatchOutcome> {
    profiler_markup::validate_config(config)?;

    let mut summary = BatchSummary::start();
    let total = rows.len();
    info!(
        run_id = %summary.run_id,
        documents = total,
        concurrency = config.concurrency,
        terms = vocabulary.len(),
        "starting batch"
    );

    // --- Phase 1: fetch and parse ---
    progress.phase("Parsing documents");
    let semaphore = Arc::new(Semaphore::new(config.concurrency.max(1) as usize));
    let mut handles = Vec::with_capacity(total);

    for row in &rows {
        let permit = semaphore
            .clone()
            .acquire_owned()
            .await
            .expect("semaphore closed");
        let fetcher = fetcher.clone();
        let config = config.clone();
        let row = row.clone();

        handles.push(tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let markup = fetcher.fetch(&row)?;
            analyze_document(&markup, &config)
        }));
    }

    // --- Phase 2: resolve in input order ---
    progress.phase("Resolving sections");
    let mut results = Vec::with_capacity(total);

    for (i, (row, handle)) in rows.into_iter().zip(handles).enumerate() {
        let parsed: Option<ParsedDocument> = match handle.await {
            Ok(Ok(parsed)) => Some(parsed),
            Ok(Err(e)) => {
                warn!(doc_id = %row.id, name = %row.name, error = %e, "document skipped");
                None
            }
            Err(e) => {
                warn!(doc_id = %row.id, name = %row.name, error = %e, "parse task failed");
                None
            }
        };

        let (sentences, resolution) = match parsed {
            Some(parsed) => {
                let classified = resolve_document(&parsed, vocabulary);
                summary.learned_terms.extend(classified.learned.iter().cloned());
                (classified.sentences(), classified.resolution)
            }
            None => (Vec::new(), Resolution::Failed),
        };

        let result = DocumentResult {
            id: row.id,
            name: row.name,
            sentences,
        };
        summary.record(resolution, &result);
        progress.document_done(&result.name, resolution, i + 1, total);
        results.push(result);
    }

    summary.finish();
    info!(
        run_id = %summary.run_id,
        matched = summary.matched,
        relearned = summary.relearned,
        probe_only = summary.probe_only,
        failed = summary.failed,
        learned = summary.learned_terms.len(),
        elapsed_ms = summary.elapsed_ms,
        "batch complete"
    );
    progress.done(&summary);

    Ok(BatchOutcome { results, summary })
}

/// Files and settings for a full `parse` run.
#[derive(Debug, Clone)]
pub struct ParseJob {
    /// JSON Lines batch rows.
    pub input: PathBuf,
    /// JSON Lines results, overwritten.
    pub output: PathBuf,
    /// Vocabulary file, read at start and rewritten at end.
    pub vocabulary: PathBuf,
    /// When set, row sources are file names under this directory.
    pub markup_dir: Option<PathBuf>,
    pub parse: ParseConfig,
}

/// Load the vocabulary and rows, run the batch, write results, persist the vocabulary.
///
/// Vocabulary, config and file I/O failures abort the run; per-document failures do not.
#[instrument(skip_all, fields(input = %job.input.display(), output = %job.output.display()))]
pub async fn run_parse_job(job: &ParseJob, progress: &dyn ProgressReporter) -> Result<BatchSummary> {
    progress.phase("Loading vocabulary");
    let store = VocabularyStore::new(&job.vocabulary);
    let mut vocabulary = store.load()?;

    progress.phase("Reading batch rows");
    let rows = read_rows(&job.input)?;

    let fetcher: Arc<dyn ArticleFetcher> = match &job.markup_dir {
        Some(dir) => Arc::new(DirectoryMarkup::new(dir)),
        None => Arc::new(InlineMarkup),
    };

    let outcome = run_batch(rows, fetcher, &job.parse, &mut vocabulary, progress).await?;

    progress.phase("Writing results");
    write_results(&job.output, &outcome.results)?;
    store.save(&vocabulary)?;

    Ok(outcome.summary)
}
