//! Markup parsing and section structure for biography pages.
//!
//! A [`Document`] is a normalized HTML page. From it this crate derives:
//! - the heading forest ([`Document::section_tree`]), built by a stack over the
//!   flat heading sequence ([`nest`]) with per-heading text from
//!   [`collect_section_text`]
//! - the infobox education field ([`Document::infobox_education`])
//! - the lead text and flat heading sections used by the every-mention scan

mod collect;
mod infobox;
mod node;
mod normalize;
mod tree;

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

use profiler_shared::{ContentScope, ParseConfig, Result};

pub use collect::{SiblingFilter, collect_section_text};
pub use node::{MarkupNode, collapse_whitespace, element_text, heading_tag_level};
pub use tree::nest;

/// Title of the pseudo-section holding the lead paragraphs.
pub const LEAD_TITLE: &str = "_lead_";

/// A heading with its text, without nesting. Used by the every-mention scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatSection {
    /// Heading anchor id, when present.
    pub id: Option<String>,
    /// Heading title.
    pub title: String,
    /// Collected text.
    pub content: String,
}

/// Check the settings that apply to every document, once, before any is parsed.
///
/// An invalid strip selector is a config error for the whole batch.
pub fn validate_config(config: &ParseConfig) -> Result<()> {
    normalize::compile_selectors(&config.strip_selectors)?;
    Ok(())
}

/// A parsed and normalized markup document.
#[derive(Debug)]
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse `markup`, decoding escapes when configured, and strip non-content
    /// elements. Fails with `MalformedDocument` when the payload has no elements.
    #[instrument(skip_all, fields(len = markup.len()))]
    pub fn parse(markup: &str, config: &ParseConfig) -> Result<Self> {
        let html = normalize::normalize(markup, config.unescape_source, &config.strip_selectors)?;
        debug!(parse_errors = html.errors.len(), "document normalized");
        Ok(Self { html })
    }

    /// The article body: `div.mw-parser-output` when present, the whole document otherwise.
    pub fn body(&self) -> ElementRef<'_> {
        static BODY_SEL: LazyLock<Selector> =
            LazyLock::new(|| Selector::parse("div.mw-parser-output").expect("valid selector"));

        self.html
            .select(&BODY_SEL)
            .next()
            .unwrap_or_else(|| self.html.root_element())
    }

    /// The section forest in document order. Empty when there are no headings.
    pub fn section_tree(&self, scope: ContentScope) -> Vec<profiler_shared::SectionNode> {
        tree::build_forest(self.body(), scope)
    }

    /// Every heading as a flat section with paragraph-only content, document order.
    pub fn flat_sections(&self, scope: ContentScope) -> Vec<FlatSection> {
        tree::headings(self.body())
            .into_iter()
            .map(|h| FlatSection {
                id: tree::heading_id(h),
                title: tree::heading_title(h),
                content: collect_section_text(h, scope, SiblingFilter::Paragraphs),
            })
            .collect()
    }

    /// Text of the body's direct `<p>` children before the first heading.
    pub fn lead_text(&self) -> String {
        let mut chunks = Vec::new();
        for child in node::children(self.body()) {
            if child.heading_level().is_some() {
                break;
            }
            if let MarkupNode::Element(el) = child {
                if el.value().name() == "p" {
                    let text = element_text(el);
                    if !text.is_empty() {
                        chunks.push(text);
                    }
                }
            }
        }
        chunks.join(" ")
    }

    /// Education-like infobox rows, joined with `"; "`.
    pub fn infobox_education(&self, markers: &[String]) -> Option<String> {
        infobox::education(&self.html, markers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use profiler_shared::ProfilerError;

    fn fixture_path(name: &str) -> std::path::PathBuf {
        std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures")
            .join(name)
    }

    fn load_fixture(name: &str) -> String {
        fs::read_to_string(fixture_path(name))
            .unwrap_or_else(|e| panic!("failed to read fixture {name}: {e}"))
    }

    fn parse(markup: &str) -> Document {
        Document::parse(markup, &ParseConfig::default()).unwrap()
    }

    #[test]
    fn validate_config_checks_strip_selectors() {
        assert!(validate_config(&ParseConfig::default()).is_ok());

        let config = ParseConfig {
            strip_selectors: vec!["script".into(), "p[".into()],
            ..ParseConfig::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ProfilerError::Config { .. }));
    }

    #[test]
    fn parse_rejects_non_markup() {
        let err = Document::parse("plain text only", &ParseConfig::default()).unwrap_err();
        assert!(matches!(err, ProfilerError::MalformedDocument { .. }));
    }

    #[test]
    fn no_headings_yield_empty_forest() {
        let doc = parse("<html><body><p>Just a paragraph.</p></body></html>");
        assert!(doc.section_tree(ContentScope::Section).is_empty());
    }

    #[test]
    fn body_prefers_parser_output() {
        let doc = parse(
            "<body><h1>Page title</h1><div class=\"mw-parser-output\">\
             <p>Lead one.</p><p>Lead two.</p><h2>Life</h2><p>Later.</p></div></body>",
        );
        let forest = doc.section_tree(ContentScope::Section);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].title, "Life");
        assert_eq!(doc.lead_text(), "Lead one. Lead two.");
    }

    #[test]
    fn biography_fixture_tree() {
        let doc = parse(&load_fixture("html/biography.html"));
        let forest = doc.section_tree(ContentScope::Section);

        let titles: Vec<_> = forest.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, ["Early life and education", "Career", "References"]);

        let early = &forest[0];
        assert_eq!(early.id.as_deref(), Some("Early_life_and_education"));
        assert_eq!(early.children.len(), 1);
        assert_eq!(early.children[0].title, "Graduate studies");
        assert!(early.content.contains("Bachelor of Science"));
        // Edit links and reference markers are stripped before collection
        assert!(!early.content.contains("edit"));
        assert!(!early.content.contains("[1]"));

        // Scripts never reach section text
        let career = &forest[1];
        assert!(!career.content.contains("tracker"));
    }

    #[test]
    fn biography_fixture_infobox() {
        let doc = parse(&load_fixture("html/biography.html"));
        let markers = ParseConfig::default().infobox_markers;
        assert_eq!(
            doc.infobox_education(&markers).as_deref(),
            Some("Stanford University (BS); Massachusetts Institute of Technology (PhD)")
        );
    }

    #[test]
    fn navbox_is_stripped() {
        let doc = parse(&load_fixture("html/biography.html"));
        let forest = doc.section_tree(ContentScope::Section);
        let references = &forest[2];
        assert!(!references.content.contains("Navigation template"));
    }

    #[test]
    fn flat_sections_use_paragraphs_only() {
        let doc = parse(
            "<body><h2>Life</h2><p>Para.</p><ul><li>Listed</li></ul><h2>Next</h2></body>",
        );
        let flat = doc.flat_sections(ContentScope::Section);
        assert_eq!(flat.len(), 2);
        assert_eq!(flat[0].content, "Para.");
        assert_eq!(flat[1].content, "");
    }
}
