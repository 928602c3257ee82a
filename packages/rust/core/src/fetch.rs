//! Article fetchers: where the markup of a batch row comes from.

use std::path::PathBuf;

use profiler_shared::{BatchRow, ProfilerError, Result};

/// Supplies the markup for one batch row.
///
/// Called from blocking worker threads, so implementations must be `Send + Sync`.
pub trait ArticleFetcher: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Markup for `row`.
    fn fetch(&self, row: &BatchRow) -> Result<String>;
}

/// The row's `source` is the markup itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineMarkup;

impl ArticleFetcher for InlineMarkup {
    fn name(&self) -> &str {
        "inline"
    }

    fn fetch(&self, row: &BatchRow) -> Result<String> {
        Ok(row.source.clone())
    }
}

/// The row's `source` is a file name relative to a base directory.
#[derive(Debug, Clone)]
pub struct DirectoryMarkup {
    base: PathBuf,
}

impl DirectoryMarkup {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

impl ArticleFetcher for DirectoryMarkup {
    fn name(&self) -> &str {
        "directory"
    }

    fn fetch(&self, row: &BatchRow) -> Result<String> {
        let relative = std::path::Path::new(row.source.trim());
        if relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(ProfilerError::validation(format!(
                "markup source must be a relative path inside the markup directory: {}",
                row.source
            )));
        }
        let path = self.base.join(relative);
        std::fs::read_to_string(&path).map_err(|e| ProfilerError::io(&path, e))
    }
}
