//! The keyword vocabulary used to pick degree-bearing sections.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Ordered, duplicate-free set of keywords.
///
/// Iteration order is first-insertion order. The only mutation is
/// [`Vocabulary::insert`], which appends; nothing is ever removed within a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
    terms: Vec<String>,
    #[serde(skip)]
    seen: HashSet<String>,
}

impl Vocabulary {
    /// Create an empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `term` is already a member.
    pub fn contains(&self, term: &str) -> bool {
        self.seen.contains(term)
    }

    /// Append `term` if absent. Returns `true` when it was added.
    pub fn insert(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if self.seen.contains(&term) {
            return false;
        }
        self.seen.insert(term.clone());
        self.terms.push(term);
        true
    }

    /// Iterate over terms in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    /// Terms in insertion order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut vocab = Self::new();
        for term in iter {
            vocab.insert(term);
        }
        vocab
    }
}

impl From<Vec<String>> for Vocabulary {
    fn from(terms: Vec<String>) -> Self {
        terms.into_iter().collect()
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocab: Vocabulary) -> Self {
        vocab.terms
    }
}
