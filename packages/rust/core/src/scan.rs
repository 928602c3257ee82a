//! Structure-ignoring degree scan over every section of a page.
//!
//! Unlike the keyword pipeline this mode does not consult the vocabulary. It
//! classifies the lead, every heading not in the skip list, and the infobox
//! entry, and reports both a flat deduplicated list and a per-section grouping.

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use profiler_classify::{PatternFamily, dedupe, degree_sentences};
use profiler_markup::{Document, LEAD_TITLE};
use profiler_shared::{ParseConfig, Result};

/// Title of the pseudo-section holding the infobox education entry.
pub const INFOBOX_TITLE: &str = "_infobox_education_";

/// A titled block of text considered by the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSection {
    pub title: String,
    pub content: String,
}

/// Strict-pattern sentences of every section sharing one title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionMentions {
    pub title: String,
    pub sentences: Vec<String>,
}

/// Everything the scan found on one page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    /// Loose-pattern sentences across all sections, first occurrence kept.
    pub every_mention: Vec<String>,
    /// Strict-pattern sentences grouped by section title.
    pub by_section: Vec<SectionMentions>,
}

impl ScanReport {
    /// Render as Markdown: one `## Title` list per group, or a single
    /// `## Degree Mentions` list of every mention when no group exists.
    pub fn markdown(&self) -> String {
        if self.by_section.is_empty() {
            return render_group("Degree Mentions", &self.every_mention);
        }
        self.by_section
            .iter()
            .map(|group| render_group(&group.title, &group.sentences))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn render_group(title: &str, sentences: &[String]) -> String {
    let mut out = format!("## {title}\n");
    for sentence in sentences {
        out.push_str("- ");
        out.push_str(sentence);
        out.push('\n');
    }
    out
}

/// Sections for the scan, in document order: lead, kept headings, infobox.
pub fn scan_sections(doc: &Document, config: &ParseConfig) -> Vec<ScanSection> {
    let mut sections = Vec::new();

    let lead = doc.lead_text();
    if !lead.is_empty() {
        sections.push(ScanSection {
            title: LEAD_TITLE.to_string(),
            content: lead,
        });
    }

    for flat in doc.flat_sections(config.content_scope) {
        if config.skip_sections.iter().any(|s| *s == flat.title) {
            debug!(title = %flat.title, "skipping section");
            continue;
        }
        if flat.content.is_empty() {
            warn!(title = %flat.title, "section has no paragraph text");
            continue;
        }
        sections.push(ScanSection {
            title: flat.title,
            content: flat.content,
        });
    }

    if let Some(education) = doc.infobox_education(&config.infobox_markers) {
        sections.push(ScanSection {
            title: INFOBOX_TITLE.to_string(),
            content: education,
        });
    }

    sections
}

/// Loose-pattern sentences of all sections, deduplicated in first occurrence order.
pub fn every_mention(sections: &[ScanSection]) -> Vec<String> {
    dedupe(
        sections
            .iter()
            .flat_map(|s| degree_sentences(&s.content, PatternFamily::Loose)),
    )
}

/// Strict-pattern sentences grouped by section title, groups in first occurrence order.
pub fn by_section(sections: &[ScanSection]) -> Vec<SectionMentions> {
    let mut groups: Vec<SectionMentions> = Vec::new();
    for section in sections {
        let sentences = degree_sentences(&section.content, PatternFamily::Strict);
        if sentences.is_empty() {
            continue;
        }
        match groups.iter_mut().find(|g| g.title == section.title) {
            Some(group) => group.sentences.extend(sentences),
            None => groups.push(SectionMentions {
                title: section.title.clone(),
                sentences,
            }),
        }
    }
    groups
}

/// Parse `markup` and run both scans.
#[instrument(skip_all, fields(len = markup.len()))]
pub fn scan_document(markup: &str, config: &ParseConfig) -> Result<ScanReport> {
    let doc = Document::parse(markup, config)?;
    let sections = scan_sections(&doc, config);
    let report = ScanReport {
        every_mention: every_mention(&sections),
        by_section: by_section(&sections),
    };
    if report.by_section.is_empty() {
        warn!("no structured degree mentions, falling back to loose mentions");
    }
    info!(
        sections = sections.len(),
        mentions = report.every_mention.len(),
        groups = report.by_section.len(),
        "scan complete"
    );
    Ok(report)
}
