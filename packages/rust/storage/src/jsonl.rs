//! JSON Lines batch input and result output.

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use profiler_shared::{BatchRow, DocumentResult, ProfilerError, Result};

/// Parse JSON Lines text, one value per non-blank line.
pub fn parse_lines<T: DeserializeOwned>(text: &str) -> Result<Vec<T>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line)
                .map_err(|e| ProfilerError::serialization(format!("line {}: {e}", i + 1)))
        })
        .collect()
}

/// Render values as JSON Lines.
pub fn render_lines<T: Serialize>(values: &[T]) -> Result<String> {
    let mut out = String::new();
    for value in values {
        let line =
            serde_json::to_string(value).map_err(|e| ProfilerError::serialization(e.to_string()))?;
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

/// Read batch rows from a JSON Lines file.
#[instrument(fields(path = %path.display()))]
pub fn read_rows(path: &Path) -> Result<Vec<BatchRow>> {
    let text = std::fs::read_to_string(path).map_err(|e| ProfilerError::io(path, e))?;
    let rows: Vec<BatchRow> = parse_lines(&text)?;
    debug!(rows = rows.len(), "batch rows loaded");
    Ok(rows)
}

/// Write document results as JSON Lines, creating parent directories.
#[instrument(skip(results), fields(path = %path.display(), results = results.len()))]
pub fn write_results(path: &Path, results: &[DocumentResult]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ProfilerError::io(parent, e))?;
    }
    std::fs::write(path, render_lines(results)?).map_err(|e| ProfilerError::io(path, e))
}
