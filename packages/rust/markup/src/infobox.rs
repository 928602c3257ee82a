//! Infobox education field extraction.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::node::{collapse_whitespace, element_text};

static INFOBOX_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table.infobox").expect("valid selector"));
static ROW_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").expect("valid selector"));
static TH_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("th").expect("valid selector"));
static TD_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").expect("valid selector"));

/// The infobox table of the document, if any.
pub(crate) fn find_infobox(html: &Html) -> Option<ElementRef<'_>> {
    html.select(&INFOBOX_SEL).next()
}

/// Data-cell text of every infobox row whose header contains one of `markers`
/// (case-insensitive; markers are expected lowercase), joined with `"; "`.
pub(crate) fn education(html: &Html, markers: &[String]) -> Option<String> {
    let infobox = find_infobox(html)?;

    let matches: Vec<String> = infobox
        .select(&ROW_SEL)
        .filter_map(|row| {
            let header = row.select(&TH_SEL).next()?;
            let cell = row.select(&TD_SEL).next()?;
            let header_text = collapse_whitespace(&element_text(header)).to_lowercase();
            markers
                .iter()
                .any(|m| header_text.contains(m.as_str()))
                .then(|| element_text(cell))
        })
        .filter(|text| !text.is_empty())
        .collect();

    (!matches.is_empty()).then(|| matches.join("; "))
}
