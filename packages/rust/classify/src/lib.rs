//! Degree sentence classification.
//!
//! Section text is cleaned ([`normalize_content`]), split into sentences
//! ([`split_sentences`]), and each sentence is kept when it matches a
//! [`PatternFamily`].

mod cleanup;
mod patterns;
mod sentences;

use std::collections::HashSet;

use tracing::trace;

pub use cleanup::normalize_content;
pub use patterns::PatternFamily;
pub use sentences::split_sentences;

/// Sentences of `content` that mention a degree, in order.
pub fn degree_sentences(content: &str, family: PatternFamily) -> Vec<String> {
    let clean = normalize_content(content);
    split_sentences(&clean)
        .into_iter()
        .filter(|sentence| {
            let hit = family.is_match(sentence);
            if hit {
                trace!(?family, sentence = %sentence, "degree mention");
            }
            hit
        })
        .collect()
}

/// Drop repeated sentences, keeping the first occurrence of each.
pub fn dedupe(sentences: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    sentences
        .into_iter()
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_single_sentence() {
        assert_eq!(
            degree_sentences("She earned a B.A. in 1990.", PatternFamily::Strict),
            ["She earned a B.A. in 1990."]
        );
    }

    #[test]
    fn citations_are_stripped_before_matching() {
        assert_eq!(
            degree_sentences("He earned a Ph.D.[12][13] in chemistry.", PatternFamily::Strict),
            ["He earned a Ph.D. in chemistry."]
        );
    }

    #[test]
    fn keeps_only_matching_sentences() {
        let content = "Smith was born in Dayton, Ohio. She earned a Bachelor of Science \
                       degree in physics. She received her Ph.D. from MIT in 1977 [2][3] , \
                       working on laser cooling. Her advisor was Daniel Kleppner.";
        assert_eq!(
            degree_sentences(content, PatternFamily::Strict),
            [
                "She earned a Bachelor of Science degree in physics.",
                "She received her Ph.D. from MIT in 1977, working on laser cooling.",
            ]
        );
    }

    #[test]
    fn no_mentions_is_empty() {
        assert!(degree_sentences("He moved to Texas.", PatternFamily::Strict).is_empty());
        assert!(degree_sentences("", PatternFamily::Loose).is_empty());
    }

    #[test]
    fn dedupe_keeps_first_occurrence() {
        let out = dedupe(["b", "a", "b", "c", "a"].map(String::from));
        assert_eq!(out, ["b", "a", "c"]);
    }
}
