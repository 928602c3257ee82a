//! Core domain types for Profiler documents and results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// RunId
// ---------------------------------------------------------------------------

/// A UUID v7 wrapper for batch run identifiers (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Generate a new time-sortable run identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// SectionNode
// ---------------------------------------------------------------------------

/// One heading of a document together with the text it owns and its subsections.
///
/// Serializes to the export shape `{level, title, id, content, children}`;
/// a missing `id` is written as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionNode {
    /// Heading level, 1 through 6.
    pub level: u8,
    /// Heading text with whitespace collapsed.
    pub title: String,
    /// Anchor id of the heading, when the markup carries one.
    pub id: Option<String>,
    /// Text collected for this heading.
    pub content: String,
    /// Nested subsections in document order.
    #[serde(default)]
    pub children: Vec<SectionNode>,
}

impl SectionNode {
    /// Create a leaf node.
    pub fn new(
        level: u8,
        title: impl Into<String>,
        id: Option<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            level,
            title: title.into(),
            id,
            content: content.into(),
            children: Vec::new(),
        }
    }
}

/// Pre-order traversal of a forest (parents before children, siblings in order).
pub fn preorder(forest: &[SectionNode]) -> Vec<&SectionNode> {
    let mut out = Vec::new();
    for node in forest {
        out.push(node);
        out.extend(preorder(&node.children));
    }
    out
}

// ---------------------------------------------------------------------------
// Matching and classification
// ---------------------------------------------------------------------------

/// A section whose title contains a vocabulary keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Heading anchor id.
    pub id: Option<String>,
    /// Heading title.
    pub title: String,
    /// Section content.
    pub content: String,
    /// Heading level.
    pub level: u8,
    /// The first vocabulary keyword found in the title.
    pub keyword: String,
}

/// A sentence that mentions a degree, with the section it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegreeSentence {
    /// Anchor id of the originating section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
    /// Title of the originating section.
    pub section_title: String,
    /// The normalized sentence text.
    pub text: String,
}

/// Which path produced a document's sentences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// The vocabulary matched on the first pass.
    Matched,
    /// Nothing matched, the fallback learned titles and the re-match succeeded.
    Relearned,
    /// Nothing matched even after learning; the probe sentences are the result.
    ProbeOnly,
    /// The document could not be processed and was skipped.
    Failed,
}

// ---------------------------------------------------------------------------
// Batch I/O
// ---------------------------------------------------------------------------

/// One input row of a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRow {
    /// Resolved subject identifier.
    pub id: String,
    /// Subject display name.
    pub name: String,
    /// Markup payload or a reference to it, interpreted by the article fetcher.
    pub source: String,
}

/// Output row for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentResult {
    /// Subject identifier, copied from the input row.
    pub id: String,
    /// Subject display name, copied from the input row.
    pub name: String,
    /// Degree sentences with the infobox education entry appended last.
    pub sentences: Vec<String>,
}

/// Counters and learned terms of a finished batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Identifier of this run.
    pub run_id: RunId,
    /// When the batch started.
    pub started_at: DateTime<Utc>,
    /// Total documents seen.
    pub documents: usize,
    /// Documents resolved on the first keyword pass.
    pub matched: usize,
    /// Documents resolved by the fallback re-match.
    pub relearned: usize,
    /// Documents resolved by probe sentences only.
    pub probe_only: usize,
    /// Documents skipped because they could not be processed.
    pub failed: usize,
    /// Documents whose final sentence list is empty.
    pub empty: usize,
    /// Vocabulary terms appended during this batch, in learn order.
    pub learned_terms: Vec<String>,
    /// Wall-clock duration of the run, set by [`BatchSummary::finish`].
    pub elapsed_ms: u64,
}

impl BatchSummary {
    /// Start an empty summary for a new run.
    pub fn start() -> Self {
        Self {
            run_id: RunId::new(),
            started_at: Utc::now(),
            documents: 0,
            matched: 0,
            relearned: 0,
            probe_only: 0,
            failed: 0,
            empty: 0,
            learned_terms: Vec::new(),
            elapsed_ms: 0,
        }
    }

    /// Stamp the elapsed time since `started_at`.
    pub fn finish(&mut self) {
        let elapsed = Utc::now() - self.started_at;
        self.elapsed_ms = elapsed.num_milliseconds().max(0) as u64;
    }

    /// Count one document outcome.
    pub fn record(&mut self, resolution: Resolution, result: &DocumentResult) {
        self.documents += 1;
        match resolution {
            Resolution::Matched => self.matched += 1,
            Resolution::Relearned => self.relearned += 1,
            Resolution::ProbeOnly => self.probe_only += 1,
            Resolution::Failed => self.failed += 1,
        }
        if result.sentences.is_empty() {
            self.empty += 1;
        }
    }
}
