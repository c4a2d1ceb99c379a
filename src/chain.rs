//! Transition model
//!
//! First-order Markov chain over a token sequence. Each token maps to its
//! observed successors with an occurrence count and the maximum-likelihood
//! probability (`chance`) of that successor.
//!
//! The model is rebuilt from the full token sequence on every input change;
//! [`TransitionModel::build`] is the single entry point so that an incremental
//! builder could replace it without touching callers. The cost of a rebuild is
//! at least O(total tokens), which is the documented limit for very long input.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;

use crate::tokenize::Token;

/// Observed transition from one token to the next
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// Number of times the target immediately followed the source
    pub count: u64,
    /// `count / total outgoing count` of the source token
    pub chance: f64,
}

/// Outgoing transitions of one token, in first-observed order
pub type Successors = IndexMap<Token, Transition>;

/// Markov chain: token -> successor -> transition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransitionModel {
    entries: IndexMap<Token, Successors>,
}

impl TransitionModel {
    /// Create an empty model
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the model from an ordered token sequence.
    ///
    /// Every token gets an entry, including ones with no successors. After each
    /// observed pair the chances of the predecessor's transitions are recomputed
    /// from a fresh sum of its counts.
    #[must_use]
    pub fn build<S: AsRef<str>>(tokens: &[S]) -> Self {
        let mut model = Self::new();
        let mut prev: Option<&str> = None;

        for token in tokens {
            let current = token.as_ref();
            model.entries.entry(current.to_string()).or_default();

            if let Some(prev) = prev {
                if let Some(successors) = model.entries.get_mut(prev) {
                    successors
                        .entry(current.to_string())
                        .and_modify(|t| t.count += 1)
                        .or_insert(Transition {
                            count: 1,
                            chance: 0.0,
                        });
                    renormalize(successors);
                }
            }
            prev = Some(current);
        }

        model
    }

    /// Number of distinct tokens
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no tokens were observed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of distinct transitions across all tokens
    #[must_use]
    pub fn transition_count(&self) -> usize {
        self.entries.values().map(IndexMap::len).sum()
    }

    /// Successors of a token
    #[must_use]
    pub fn get(&self, token: &str) -> Option<&Successors> {
        self.entries.get(token)
    }

    /// Check whether a token was observed
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    /// Transition between two tokens, if observed
    #[must_use]
    pub fn transition(&self, from: &str, to: &str) -> Option<&Transition> {
        self.entries.get(from).and_then(|s| s.get(to))
    }

    /// Iterate over tokens in first-appearance order
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.entries.keys()
    }

    /// Iterate over `(token, successors)` entries
    pub fn iter(&self) -> impl Iterator<Item = (&Token, &Successors)> {
        self.entries.iter()
    }

    /// Iterate over every `(from, to, transition)` triple
    pub fn transitions(&self) -> impl Iterator<Item = (&Token, &Token, &Transition)> {
        self.entries
            .iter()
            .flat_map(|(from, succ)| succ.iter().map(move |(to, t)| (from, to, t)))
    }

    pub(crate) fn from_entries(entries: IndexMap<Token, Successors>) -> Self {
        Self { entries }
    }

    /// Pretty JSON with 2-space indent, as shown in the debug panel
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Recompute every chance of one token from scratch.
fn renormalize(successors: &mut Successors) {
    let total: u64 = successors.values().map(|t| t.count).sum();
    if total == 0 {
        return;
    }
    for transition in successors.values_mut() {
        transition.chance = transition.count as f64 / total as f64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn build(s: &str) -> TransitionModel {
        TransitionModel::build(&crate::tokenize::tokenize(s))
    }

    #[test]
    fn test_build_empty() {
        let model = TransitionModel::build::<&str>(&[]);
        assert!(model.is_empty());
        assert_eq!(model.transition_count(), 0);
    }

    #[test]
    fn test_build_single_token() {
        let model = build("lonely");
        assert_eq!(model.len(), 1);
        assert!(model.get("lonely").unwrap().is_empty());
    }

    #[test]
    fn test_build_palindrome_sequence() {
        let model = build("1 2 3 2 1");

        assert_eq!(model.len(), 3);
        assert_eq!(model.transition_count(), 4);

        let t = model.transition("1", "2").unwrap();
        assert_eq!(t.count, 1);
        assert!((t.chance - 1.0).abs() < EPS);

        let t = model.transition("2", "3").unwrap();
        assert_eq!(t.count, 1);
        assert!((t.chance - 0.5).abs() < EPS);

        let t = model.transition("2", "1").unwrap();
        assert_eq!(t.count, 1);
        assert!((t.chance - 0.5).abs() < EPS);

        let t = model.transition("3", "2").unwrap();
        assert_eq!(t.count, 1);
        assert!((t.chance - 1.0).abs() < EPS);
    }

    #[test]
    fn test_build_self_loop() {
        let model = build("a a a");
        assert_eq!(model.len(), 1);
        let t = model.transition("a", "a").unwrap();
        assert_eq!(t.count, 2);
        assert!((t.chance - 1.0).abs() < EPS);
    }

    #[test]
    fn test_last_token_has_entry_without_successors() {
        let model = build("x y z");
        assert!(model.contains("z"));
        assert!(model.get("z").unwrap().is_empty());
    }

    #[test]
    fn test_chances_renormalize_on_new_successor() {
        let model = build("a b a c a b");
        let ab = model.transition("a", "b").unwrap();
        let ac = model.transition("a", "c").unwrap();
        assert_eq!(ab.count, 2);
        assert_eq!(ac.count, 1);
        assert!((ab.chance - 2.0 / 3.0).abs() < EPS);
        assert!((ac.chance - 1.0 / 3.0).abs() < EPS);
    }

    #[test]
    fn test_tokens_in_first_appearance_order() {
        let model = build("c a b a c");
        let tokens: Vec<_> = model.tokens().map(String::as_str).collect();
        assert_eq!(tokens, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_tokens_compared_exactly() {
        let model = build("The the THE");
        assert_eq!(model.len(), 3);
    }

    #[test]
    fn test_serialize_nested_mapping() {
        let model = build("a b");
        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(json["a"]["b"]["count"], 1);
        assert_eq!(json["a"]["b"]["chance"], 1.0);
        assert!(json["b"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_transitions_iterator() {
        let model = build("1 2 3 2 1");
        let mut pairs: Vec<_> = model
            .transitions()
            .map(|(f, t, _)| format!("{f}->{t}"))
            .collect();
        pairs.sort();
        assert_eq!(pairs, vec!["1->2", "2->1", "2->3", "3->2"]);
    }
}
