//! Per-document orchestration: parse, match, fall back, merge the infobox.

use tracing::{debug, instrument};

use profiler_markup::Document;
use profiler_shared::{DegreeSentence, ParseConfig, Resolution, Result, SectionNode, Vocabulary};

use crate::fallback::{learn, probe};
use crate::matcher::{classify_records, match_sections};

/// The vocabulary-independent part of a document: its forest and infobox entry.
///
/// Owns plain data only, so it can cross from a parsing worker to the
/// resolution loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    pub forest: Vec<SectionNode>,
    pub infobox: Option<String>,
}

/// Outcome of resolving one document against the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    /// Degree sentences with the section they came from.
    pub degrees: Vec<DegreeSentence>,
    /// Infobox education entry, appended last by [`Classified::sentences`].
    pub infobox: Option<String>,
    pub resolution: Resolution,
    /// Terms this document added to the vocabulary.
    pub learned: Vec<String>,
}

impl Classified {
    /// Final sentence list: degree sentences, then the infobox entry if any.
    pub fn sentences(&self) -> Vec<String> {
        self.degrees
            .iter()
            .map(|d| d.text.clone())
            .chain(self.infobox.clone())
            .collect()
    }
}

/// Parse markup and extract everything that does not depend on the vocabulary.
#[instrument(skip_all)]
pub fn analyze_document(markup: &str, config: &ParseConfig) -> Result<ParsedDocument> {
    let doc = Document::parse(markup, config)?;
    let forest = doc.section_tree(config.content_scope);
    let infobox = doc.infobox_education(&config.infobox_markers);
    debug!(roots = forest.len(), infobox = infobox.is_some(), "document analyzed");
    Ok(ParsedDocument { forest, infobox })
}

/// Match the forest against the vocabulary, running the fallback when the first
/// pass is empty.
///
/// With a first-pass match the vocabulary is left untouched. Otherwise the root
/// sections are probed, titles with hits are learned, and the forest is matched
/// again: a non-empty re-match replaces the probe sentences.
pub fn resolve_document(parsed: &ParsedDocument, vocabulary: &mut Vocabulary) -> Classified {
    let infobox = parsed.infobox.clone();

    let records = match_sections(&parsed.forest, vocabulary);
    if !records.is_empty() {
        debug!(records = records.len(), "first pass matched");
        return Classified {
            degrees: classify_records(&records),
            infobox,
            resolution: Resolution::Matched,
            learned: Vec::new(),
        };
    }

    let hits = probe(&parsed.forest);
    let learned = learn(&hits, vocabulary);
    let records = match_sections(&parsed.forest, vocabulary);

    if records.is_empty() {
        debug!(hits = hits.len(), "re-match empty, keeping probe sentences");
        Classified {
            degrees: hits.into_iter().map(DegreeSentence::from).collect(),
            infobox,
            resolution: Resolution::ProbeOnly,
            learned,
        }
    } else {
        debug!(records = records.len(), learned = learned.len(), "re-match succeeded");
        Classified {
            degrees: classify_records(&records),
            infobox,
            resolution: Resolution::Relearned,
            learned,
        }
    }
}

/// Analyze and resolve one document in a single call.
pub fn process_document(
    markup: &str,
    config: &ParseConfig,
    vocabulary: &mut Vocabulary,
) -> Result<Classified> {
    let parsed = analyze_document(markup, config)?;
    Ok(resolve_document(&parsed, vocabulary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use profiler_shared::{ContentScope, ProfilerError};

    fn load_fixture(name: &str) -> String {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures")
            .join(name);
        fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read fixture {name}: {e}"))
    }

    fn vocab(terms: &[&str]) -> Vocabulary {
        terms.iter().copied().collect()
    }

    const EDUCATION_PAGE: &str = "<div class=\"mw-parser-output\">\
        <h2 id=\"Early_life\">Early life</h2><p>She was born in Ohio.</p>\
        <h3 id=\"Education\">Education</h3><p>She earned a B.A. in 1990.</p>\
        <h2 id=\"Career\">Career</h2><p>She taught physics.</p></div>";

    #[test]
    fn first_pass_match() {
        let mut vocabulary = vocab(&["Education"]);
        let classified =
            process_document(EDUCATION_PAGE, &ParseConfig::default(), &mut vocabulary).unwrap();

        assert_eq!(classified.resolution, Resolution::Matched);
        assert_eq!(classified.sentences(), ["She earned a B.A. in 1990."]);
        assert!(classified.learned.is_empty());
        assert_eq!(vocabulary.terms(), ["Education"]);
    }

    #[test]
    fn fallback_learns_and_rematches() {
        let markup = load_fixture("html/academic_background.html");
        let mut vocabulary = Vocabulary::new();
        let classified =
            process_document(&markup, &ParseConfig::default(), &mut vocabulary).unwrap();

        assert_eq!(classified.resolution, Resolution::Relearned);
        assert_eq!(classified.learned, ["Academic background"]);
        assert!(vocabulary.contains("Academic background"));
        assert_eq!(
            classified.sentences(),
            ["Reyes holds a Master of Arts in economics from the University of Chile."]
        );
        assert_eq!(classified.degrees[0].section_id.as_deref(), Some("Academic_background"));
    }

    #[test]
    fn learned_title_matches_on_the_next_document() {
        let markup = load_fixture("html/academic_background.html");
        let mut vocabulary = Vocabulary::new();
        process_document(&markup, &ParseConfig::default(), &mut vocabulary).unwrap();

        let again = process_document(&markup, &ParseConfig::default(), &mut vocabulary).unwrap();
        assert_eq!(again.resolution, Resolution::Matched);
        assert!(again.learned.is_empty());
    }

    #[test]
    fn probe_only_when_nothing_is_found() {
        let parsed = ParsedDocument {
            forest: vec![SectionNode::new(2, "Life", None, "He moved to Texas.")],
            infobox: None,
        };
        let mut vocabulary = vocab(&["Education"]);
        let classified = resolve_document(&parsed, &mut vocabulary);
        assert_eq!(classified.resolution, Resolution::ProbeOnly);
        assert!(classified.sentences().is_empty());
        assert_eq!(vocabulary.terms(), ["Education"]);
    }

    #[test]
    fn citations_do_not_block_a_match() {
        let markup = "<h2>Education</h2><p>He earned a Ph.D.[12][13] in chemistry.</p>";
        let mut vocabulary = vocab(&["Education"]);
        let classified =
            process_document(markup, &ParseConfig::default(), &mut vocabulary).unwrap();
        assert_eq!(classified.sentences(), ["He earned a Ph.D. in chemistry."]);
    }

    #[test]
    fn infobox_only_document() {
        let markup = load_fixture("html/infobox_only.html");
        let mut vocabulary = vocab(&["Education"]);
        let classified =
            process_document(&markup, &ParseConfig::default(), &mut vocabulary).unwrap();
        assert_eq!(classified.resolution, Resolution::ProbeOnly);
        assert_eq!(classified.sentences(), ["Harvard University"]);
    }

    #[test]
    fn infobox_is_appended_last() {
        let markup = load_fixture("html/biography.html");
        let mut vocabulary = vocab(&["education"]);
        let classified =
            process_document(&markup, &ParseConfig::default(), &mut vocabulary).unwrap();
        let sentences = classified.sentences();
        assert_eq!(
            sentences.last().map(String::as_str),
            Some("Stanford University (BS); Massachusetts Institute of Technology (PhD)")
        );
        assert!(sentences.len() > 1);
    }

    #[test]
    fn resolution_is_idempotent_once_learned() {
        let parsed = analyze_document(
            &load_fixture("html/academic_background.html"),
            &ParseConfig::default(),
        )
        .unwrap();
        let mut vocabulary = Vocabulary::new();
        let first = resolve_document(&parsed, &mut vocabulary);
        let second = resolve_document(&parsed, &mut vocabulary);
        assert_eq!(first.degrees, second.degrees);
        assert_eq!(vocabulary.len(), 1);
    }

    #[test]
    fn structured_sentences_repeat_across_sections() {
        let markup = "<h2>Education</h2><p>She earned a B.A.</p>\
                      <h2>Further education</h2><p>She earned a B.A.</p>";
        let mut vocabulary = vocab(&["ducation"]);
        let classified =
            process_document(markup, &ParseConfig::default(), &mut vocabulary).unwrap();

        assert_eq!(classified.resolution, Resolution::Matched);
        assert_eq!(classified.sentences(), ["She earned a B.A.", "She earned a B.A."]);
        let titles: Vec<_> = classified
            .degrees
            .iter()
            .map(|d| d.section_title.as_str())
            .collect();
        assert_eq!(titles, ["Education", "Further education"]);
    }

    #[test]
    fn own_scope_hides_nested_mentions_from_the_fallback() {
        let markup = "<h2>Life</h2><p>Born in Ohio.</p>\
                      <h3>Studies</h3><p>She earned a B.A. in 1990.</p>";

        let mut vocabulary = Vocabulary::new();
        let section = process_document(markup, &ParseConfig::default(), &mut vocabulary).unwrap();
        assert_eq!(section.resolution, Resolution::Relearned);
        assert_eq!(section.learned, ["Life"]);

        let own = ParseConfig {
            content_scope: ContentScope::Own,
            ..ParseConfig::default()
        };
        let mut vocabulary = Vocabulary::new();
        let classified = process_document(markup, &own, &mut vocabulary).unwrap();
        assert_eq!(classified.resolution, Resolution::ProbeOnly);
        assert!(classified.sentences().is_empty());
        assert!(vocabulary.is_empty());
    }

    #[test]
    fn malformed_payload_is_reported() {
        let err = analyze_document("not markup at all", &ParseConfig::default()).unwrap_err();
        assert!(matches!(err, ProfilerError::MalformedDocument { .. }));
        assert!(!err.is_fatal());
    }
}
