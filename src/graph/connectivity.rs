//! Connectivity index
//!
//! Answers "are these two tokens joined by a link in either direction". Pairs
//! are stored as a two-level set keyed on the normalized `(min, max)` order, so
//! token text never collides with a key separator.

use std::collections::{HashMap, HashSet};

use super::types::GraphLink;
use crate::tokenize::Token;

/// Set of unordered token pairs with at least one link between them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectivityIndex {
    /// lower token -> higher tokens
    pairs: HashMap<Token, HashSet<Token>>,
}

impl ConnectivityIndex {
    /// Build the index from a link list
    #[must_use]
    pub fn from_links(links: &[GraphLink]) -> Self {
        let mut index = Self::default();
        for link in links {
            index.insert(&link.source, &link.target);
        }
        index
    }

    /// Record an unordered pair
    pub fn insert(&mut self, a: &str, b: &str) {
        let (lo, hi) = normalize(a, b);
        self.pairs
            .entry(lo.to_string())
            .or_default()
            .insert(hi.to_string());
    }

    /// True when `a` and `b` share a link, or are the same token
    #[must_use]
    pub fn is_connected(&self, a: &str, b: &str) -> bool {
        if a == b {
            return true;
        }
        let (lo, hi) = normalize(a, b);
        self.pairs.get(lo).is_some_and(|set| set.contains(hi))
    }

    /// Number of recorded pairs
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.values().map(HashSet::len).sum()
    }

    /// True when no pairs are recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

fn normalize<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
