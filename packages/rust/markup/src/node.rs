//! Element and text nodes as one tagged variant.

use scraper::ElementRef;

/// A content-bearing markup node. Comments, doctypes and processing
/// instructions have no variant; iteration helpers skip them.
#[derive(Debug, Clone, Copy)]
pub enum MarkupNode<'a> {
    /// An element with attributes and children.
    Element(ElementRef<'a>),
    /// A bare text run.
    Text(&'a str),
}

impl<'a> MarkupNode<'a> {
    /// All descendant text, each piece trimmed, joined with single spaces.
    pub fn text(&self) -> String {
        match self {
            Self::Element(el) => element_text(*el),
            Self::Text(t) => t.trim().to_string(),
        }
    }

    /// Direct children in document order.
    pub fn children(&self) -> Vec<MarkupNode<'a>> {
        match self {
            Self::Element(el) => children(*el).collect(),
            Self::Text(_) => Vec::new(),
        }
    }

    /// Attribute value, for elements.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        match self {
            Self::Element(el) => el.value().attr(name),
            Self::Text(_) => None,
        }
    }

    /// Heading level when this node is a heading or a heading wrapper block.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            Self::Element(el) => element_heading_level(*el),
            Self::Text(_) => None,
        }
    }
}

/// Direct children of `el` as markup nodes.
pub fn children<'a>(el: ElementRef<'a>) -> impl Iterator<Item = MarkupNode<'a>> {
    el.children().filter_map(|node| match ElementRef::wrap(node) {
        Some(child) => Some(MarkupNode::Element(child)),
        None => node.value().as_text().map(|t| MarkupNode::Text(&**t)),
    })
}

/// Following siblings of `el` as markup nodes.
pub fn siblings_after<'a>(el: ElementRef<'a>) -> impl Iterator<Item = MarkupNode<'a>> {
    el.next_siblings().filter_map(|node| match ElementRef::wrap(node) {
        Some(sib) => Some(MarkupNode::Element(sib)),
        None => node.value().as_text().map(|t| MarkupNode::Text(&**t)),
    })
}

/// Level of an `h1`–`h6` tag name.
pub fn heading_tag_level(name: &str) -> Option<u8> {
    match name {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

/// Whether `el` is a `div.mw-heading` style wrapper around a heading.
pub(crate) fn is_heading_wrapper(el: ElementRef<'_>) -> bool {
    el.value().classes().any(|c| c == "mw-heading")
}

/// Heading level of `el`, looking through heading wrappers.
pub(crate) fn element_heading_level(el: ElementRef<'_>) -> Option<u8> {
    if let Some(level) = heading_tag_level(el.value().name()) {
        return Some(level);
    }
    if is_heading_wrapper(el) {
        return el
            .descendants()
            .filter_map(ElementRef::wrap)
            .find_map(|d| heading_tag_level(d.value().name()));
    }
    None
}

/// All descendant text of `el`, each piece trimmed, joined with single spaces.
pub fn element_text(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collapse whitespace runs into single spaces and trim.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
