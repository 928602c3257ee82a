//! Section text collection: the text that belongs to one heading.

use scraper::ElementRef;

use profiler_shared::ContentScope;

use crate::node::{MarkupNode, element_heading_level, element_text, is_heading_wrapper, siblings_after};

/// Which sibling elements contribute text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiblingFilter {
    /// Every element and bare text run.
    All,
    /// Only `<p>` elements and bare text runs.
    Paragraphs,
}

/// The node whose siblings carry a heading's content: the heading itself,
/// or its `div.mw-heading` wrapper when it has one.
pub(crate) fn anchor_of(heading: ElementRef<'_>) -> ElementRef<'_> {
    heading
        .parent()
        .and_then(ElementRef::wrap)
        .filter(|parent| is_heading_wrapper(*parent))
        .unwrap_or(heading)
}

/// Gather the text following `heading` up to its boundary.
///
/// Under [`ContentScope::Section`] the boundary is the next heading whose level is
/// at most the heading's own; under [`ContentScope::Own`] it is the next heading of
/// any level. Pieces are trimmed and joined with a single space. Returns an empty
/// string when nothing precedes the boundary, or when `heading` is not a heading.
pub fn collect_section_text(
    heading: ElementRef<'_>,
    scope: ContentScope,
    filter: SiblingFilter,
) -> String {
    let Some(level) = element_heading_level(heading) else {
        return String::new();
    };

    let mut texts: Vec<String> = Vec::new();

    for sibling in siblings_after(anchor_of(heading)) {
        match sibling {
            MarkupNode::Element(el) => {
                if let Some(next_level) = element_heading_level(el) {
                    if next_level <= level || scope == ContentScope::Own {
                        break;
                    }
                }
                if filter == SiblingFilter::Paragraphs && el.value().name() != "p" {
                    continue;
                }
                let text = element_text(el);
                if !text.is_empty() {
                    texts.push(text);
                }
            }
            MarkupNode::Text(t) => {
                let t = t.trim();
                if !t.is_empty() {
                    texts.push(t.to_string());
                }
            }
        }
    }

    texts.join(" ")
}
