//! Heading tree builder: turns the flat, leveled heading sequence of a
//! document into a forest of nested sections.

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};
use tracing::warn;

use profiler_shared::{ContentScope, SectionNode};

use crate::collect::{SiblingFilter, anchor_of, collect_section_text};
use crate::node::{collapse_whitespace, element_heading_level};

static HEADING_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1, h2, h3, h4, h5, h6").expect("valid selector"));

static HEADLINE_ID_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".mw-headline[id]").expect("valid selector"));

/// Nest a flat, document-ordered sequence of nodes into a forest.
///
/// Uses a stack of open nodes: each incoming node closes every open node whose
/// level is greater than or equal to its own, then becomes a child of the
/// remaining top (or a new root). Level skips nest under the nearest lower level.
/// Any `children` already present on incoming nodes are kept.
pub fn nest(flat: impl IntoIterator<Item = SectionNode>) -> Vec<SectionNode> {
    let mut roots: Vec<SectionNode> = Vec::new();
    let mut open: Vec<SectionNode> = Vec::new();

    for node in flat {
        while open.last().is_some_and(|top| top.level >= node.level) {
            if let Some(done) = open.pop() {
                attach(done, &mut open, &mut roots);
            }
        }
        open.push(node);
    }

    while let Some(done) = open.pop() {
        attach(done, &mut open, &mut roots);
    }

    roots
}

fn attach(node: SectionNode, open: &mut [SectionNode], roots: &mut Vec<SectionNode>) {
    match open.last_mut() {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}

/// Headings under `body`, in document order.
pub(crate) fn headings(body: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    body.select(&HEADING_SEL).collect()
}

/// Anchor id of a heading: its own `id`, a nested `.mw-headline` id, or its wrapper's id.
pub(crate) fn heading_id(heading: ElementRef<'_>) -> Option<String> {
    heading
        .value()
        .attr("id")
        .or_else(|| {
            heading
                .select(&HEADLINE_ID_SEL)
                .next()
                .and_then(|el| el.value().attr("id"))
        })
        .or_else(|| {
            let anchor = anchor_of(heading);
            (anchor != heading).then(|| anchor.value().attr("id")).flatten()
        })
        .map(String::from)
}

/// Heading title with whitespace collapsed.
pub(crate) fn heading_title(heading: ElementRef<'_>) -> String {
    collapse_whitespace(&heading.text().collect::<String>())
}

/// Build the section forest for every heading under `body`.
pub(crate) fn build_forest(body: ElementRef<'_>, scope: ContentScope) -> Vec<SectionNode> {
    let flat = headings(body).into_iter().filter_map(|h| {
        let level = element_heading_level(h)?;
        let title = heading_title(h);
        let content = collect_section_text(h, scope, SiblingFilter::All);
        if content.is_empty() {
            warn!(title = %title, level, "section has no content");
        }
        Some(SectionNode::new(level, title, heading_id(h), content))
    });

    nest(flat)
}
