//! Text cleanup applied to section content before sentence segmentation.
//!
//! Each pass is a function `&str -> String` applied in sequence.

use std::sync::LazyLock;

use regex::Regex;

/// Run the full cleanup pipeline on raw section text.
pub fn normalize_content(raw: &str) -> String {
    let mut result = strip_citations(raw);
    result = tighten_punctuation(&result);
    result = collapse_spaces(&result);
    result.trim().to_string()
}

// ---------------------------------------------------------------------------
// Pass 1: Citation markers
// ---------------------------------------------------------------------------

/// Remove clusters of bracketed reference numbers such as `[12][13]`.
fn strip_citations(text: &str) -> String {
    static CITATION_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?:\[\s*\d+\s*\])+").expect("valid regex"));

    CITATION_RE.replace_all(text, "").into_owned()
}

// ---------------------------------------------------------------------------
// Pass 2: Space before punctuation
// ---------------------------------------------------------------------------

/// Drop whitespace immediately before `,` or `.`.
fn tighten_punctuation(text: &str) -> String {
    static SPACE_PUNCT_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\s+([,.])").expect("valid regex"));

    SPACE_PUNCT_RE.replace_all(text, "$1").into_owned()
}

// ---------------------------------------------------------------------------
// Pass 3: Whitespace runs
// ---------------------------------------------------------------------------

/// Collapse runs of two or more whitespace characters into one space.
fn collapse_spaces(text: &str) -> String {
    static MULTI_SPACE_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid regex"));

    MULTI_SPACE_RE.replace_all(text, " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_adjacent_citation_clusters() {
        assert_eq!(
            normalize_content("He earned a Ph.D.[12][13] in chemistry."),
            "He earned a Ph.D. in chemistry."
        );
    }

    #[test]
    fn citation_followed_by_space_and_comma() {
        assert_eq!(
            normalize_content("in 1977 [2][ 3 ] , working"),
            "in 1977, working"
        );
    }

    #[test]
    fn keeps_non_numeric_brackets() {
        assert_eq!(normalize_content("a note [a] here"), "a note [a] here");
    }

    #[test]
    fn collapses_whitespace_and_trims() {
        assert_eq!(normalize_content("  Born in\n\n  Ohio .  "), "Born in Ohio.");
    }

    #[test]
    fn empty_input() {
        assert_eq!(normalize_content(""), "");
    }
}
