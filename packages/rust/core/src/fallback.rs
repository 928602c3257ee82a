//! Probe, learn and re-match when the vocabulary finds nothing.

use tracing::{debug, info};

use profiler_classify::{PatternFamily, degree_sentences};
use profiler_shared::{DegreeSentence, SectionNode, Vocabulary};

/// A degree sentence found by probing a section outside the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeHit {
    pub id: Option<String>,
    pub title: String,
    pub sentence: String,
}

impl From<ProbeHit> for DegreeSentence {
    fn from(hit: ProbeHit) -> Self {
        Self {
            section_id: hit.id,
            section_title: hit.title,
            text: hit.sentence,
        }
    }
}

/// Classify the content of each section in `sections`.
///
/// Only the given list is probed; children are not visited.
pub fn probe(sections: &[SectionNode]) -> Vec<ProbeHit> {
    sections
        .iter()
        .flat_map(|section| {
            degree_sentences(&section.content, PatternFamily::Strict)
                .into_iter()
                .map(|sentence| ProbeHit {
                    id: section.id.clone(),
                    title: section.title.clone(),
                    sentence,
                })
        })
        .collect()
}

/// Append the distinct titles of `hits` to the vocabulary, in first-hit order.
///
/// Returns the titles that were not already members. This is the only place a
/// batch mutates its vocabulary.
pub fn learn(hits: &[ProbeHit], vocabulary: &mut Vocabulary) -> Vec<String> {
    let mut learned = Vec::new();
    for hit in hits {
        if hit.title.is_empty() {
            debug!("skipping untitled probe hit");
            continue;
        }
        if vocabulary.insert(hit.title.as_str()) {
            info!(term = %hit.title, "learned vocabulary term");
            learned.push(hit.title.clone());
        }
    }
    learned
}
