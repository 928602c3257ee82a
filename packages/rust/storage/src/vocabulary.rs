//! Line-delimited vocabulary file.
//!
//! One keyword per line. Lines are trimmed and blank lines ignored on load;
//! duplicates collapse to their first occurrence. Saves go through a temp file
//! and a rename so an interrupted write never truncates the vocabulary.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use profiler_shared::{ProfilerError, Result, Vocabulary};

/// Keywords written by [`VocabularyStore::init`] for a fresh vocabulary.
pub const SEED_KEYWORDS: &[&str] = &[
    "Education",
    "Early life and education",
    "Early life",
    "Academic career",
    "Alma mater",
    "Training",
];

/// Parse vocabulary file contents.
pub fn parse_vocabulary(text: &str) -> Vocabulary {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Render a vocabulary as file contents, one term per line.
pub fn render_vocabulary(vocabulary: &Vocabulary) -> String {
    let mut out = String::new();
    for term in vocabulary.iter() {
        out.push_str(term);
        out.push('\n');
    }
    out
}

/// Handle to the vocabulary file of a batch.
#[derive(Debug, Clone)]
pub struct VocabularyStore {
    path: PathBuf,
}

impl VocabularyStore {
    /// A store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the vocabulary. Any read failure, including a missing file, is a
    /// vocabulary error.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<Vocabulary> {
        let text = std::fs::read_to_string(&self.path)
            .map_err(|e| ProfilerError::vocabulary(&self.path, e))?;
        let vocabulary = parse_vocabulary(&text);
        debug!(terms = vocabulary.len(), "vocabulary loaded");
        Ok(vocabulary)
    }

    /// Rewrite the vocabulary file atomically.
    #[instrument(skip_all, fields(path = %self.path.display(), terms = vocabulary.len()))]
    pub fn save(&self, vocabulary: &Vocabulary) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ProfilerError::vocabulary(parent, e))?;
        }

        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "vocabulary".into());
        let temp = self.path.with_file_name(format!(".{file_name}.tmp"));

        std::fs::write(&temp, render_vocabulary(vocabulary))
            .map_err(|e| ProfilerError::vocabulary(&temp, e))?;
        std::fs::rename(&temp, &self.path).map_err(|e| ProfilerError::vocabulary(&self.path, e))?;

        debug!("vocabulary saved");
        Ok(())
    }

    /// Write [`SEED_KEYWORDS`] when no vocabulary file exists yet.
    /// Returns `true` if a file was created.
    pub fn init(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        let seed: Vocabulary = SEED_KEYWORDS.iter().copied().collect();
        self.save(&seed)?;
        info!(path = %self.path.display(), terms = seed.len(), "created vocabulary file");
        Ok(true)
    }
}
