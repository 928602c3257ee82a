//! Document normalization: payload checks, escape decoding, and removal of
//! non-content markup before any structural analysis.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;

use profiler_shared::{ProfilerError, Result};

/// Whether the payload contains at least one element tag.
pub(crate) fn looks_like_markup(payload: &str) -> bool {
    static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"<[A-Za-z][A-Za-z0-9-]*(?:\s|/?>)").expect("valid regex")
    });

    TAG_RE.is_match(payload)
}

/// Decode backslash escape sequences the way Python's `unicode_escape` codec does.
///
/// Handles `\\`, `\'`, `\"`, `\a`, `\b`, `\f`, `\n`, `\r`, `\t`, `\v`, octal
/// `\o` through `\ooo`, `\xNN`, `\uNNNN`, `\UNNNNNNNN`, and a backslash before a
/// newline (dropped). Unknown or truncated escapes are kept verbatim; `\N{...}`
/// named escapes are not decoded.
pub(crate) fn unescape(payload: &str) -> String {
    let mut out = String::with_capacity(payload.len());
    let mut chars = payload.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\n') => {}
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('a') => out.push('\u{07}'),
            Some('b') => out.push('\u{08}'),
            Some('f') => out.push('\u{0C}'),
            Some('v') => out.push('\u{0B}'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some('\\') => out.push('\\'),
            Some(first @ '0'..='7') => {
                let mut value = first.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|d| d.to_digit(8)) {
                        Some(digit) => {
                            value = value * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                // At most 0o777, always a valid scalar value.
                out.extend(char::from_u32(value));
            }
            Some(kind @ ('x' | 'u' | 'U')) => {
                let width = match kind {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                let mut digits = String::with_capacity(width);
                while digits.len() < width {
                    match chars.peek() {
                        Some(d) if d.is_ascii_hexdigit() => {
                            digits.push(*d);
                            chars.next();
                        }
                        _ => break,
                    }
                }
                match u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32) {
                    Some(decoded) if digits.len() == width => out.push(decoded),
                    _ => {
                        out.push('\\');
                        out.push(kind);
                        out.push_str(&digits);
                    }
                }
            }
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

/// Compile `selectors`, failing with a config error on the first invalid one.
pub(crate) fn compile_selectors(selectors: &[String]) -> Result<Vec<Selector>> {
    selectors
        .iter()
        .map(|sel_str| {
            Selector::parse(sel_str).map_err(|e| {
                ProfilerError::config(format!("invalid strip selector '{sel_str}': {e:?}"))
            })
        })
        .collect()
}

/// Detach every element matching one of `selectors`. Returns the number removed.
pub(crate) fn strip_selectors(html: &mut Html, selectors: &[String]) -> Result<usize> {
    let mut removed = 0;

    for selector in compile_selectors(selectors)? {
        let ids: Vec<_> = html.select(&selector).map(|el| el.id()).collect();
        for id in ids {
            if let Some(mut node) = html.tree.get_mut(id) {
                node.detach();
                removed += 1;
            }
        }
    }

    Ok(removed)
}

/// Parse and clean a raw payload.
pub(crate) fn normalize(payload: &str, unescape_source: bool, selectors: &[String]) -> Result<Html> {
    let decoded;
    let markup = if unescape_source {
        decoded = unescape(payload);
        decoded.as_str()
    } else {
        payload
    };

    if !looks_like_markup(markup) {
        return Err(ProfilerError::malformed("payload contains no markup elements"));
    }

    let mut html = Html::parse_document(markup);
    let removed = strip_selectors(&mut html, selectors)?;
    debug!(removed, "stripped non-content elements");

    Ok(html)
}
