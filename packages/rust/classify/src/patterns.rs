//! Degree pattern families.

use std::sync::LazyLock;

use regex::Regex;

/// Abbreviated and spelled-out degree names. Used by the structured mode.
static STRICT_DEGREE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        (?:
            \bB\.A\.?\b
          | \bB\.S\.?\b
          | \bM\.A\.?\b
          | \bM\.S\.?\b
          | \bPh\.?D\.?\b
          | \bJ\.?D\.?\b
        )
        |
        (?:
            \bBachelor\s+of\s+(?:Arts|Science|Fine\s+Arts|Philosophy|Laws)\b
          | \bMaster\s+of\s+(?:Arts|Science|Research|Philosophy|Education|Laws)\b
          | \bDoctor\s+of\s+(?:Philosophy|Science|Medicine|Engineering)\b
          | \bJuris\s+Doctor\b
        )
        ",
    )
    .expect("valid regex")
});

/// Broader degree vocabulary: any degree word, common abbreviations, and
/// graduation phrasing. Used only by the every-mention scan.
static LOOSE_DEGREE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        \b(?:
            bachelor(?:'?s)?
          | master(?:'?s)?
          | doctor(?:ate|al)?
          | degree
          | diploma
          | graduat(?:e|ed|es|ing|ion)
          | alma\s+mater
          | juris
          | (?:B|M)\.?(?:A|S|Sc|Ed|Eng|Phil|FA|BA)\.?
          | LL\.?[BMD]\.?
          | Ph\.?D\.?
          | D\.?Phil\.?
          | J\.?D\.?
          | M\.?D\.?
          | Ed\.?D\.?
        )\b
        ",
    )
    .expect("valid regex")
});

/// Which regex family decides whether a sentence mentions a degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternFamily {
    /// Specific degree names; high precision.
    Strict,
    /// Any degree-like wording; high recall.
    Loose,
}

impl PatternFamily {
    /// Whether `sentence` contains a degree mention for this family.
    pub fn is_match(self, sentence: &str) -> bool {
        match self {
            Self::Strict => STRICT_DEGREE_RE.is_match(sentence),
            Self::Loose => LOOSE_DEGREE_RE.is_match(sentence),
        }
    }
}
