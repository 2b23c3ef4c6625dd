//! The key/phrase table.
//!
//! Maps each saved phrase to the set of keys that retrieve it. All lookup
//! methods iterate in `BTreeMap`/`BTreeSet` order, so results come back
//! lexicographic and stable. Ranking beyond that order is intentionally
//! not implemented.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// In-memory phrase table: phrase text mapped to its key set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhraseTable {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl PhraseTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of saved phrases.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Save a key list / phrase combination.
    ///
    /// An empty phrase is rejected silently (guards against saving a blank
    /// entry). An empty key list removes the phrase instead; this doubles
    /// as the delete operation.
    pub fn save_entry<S: AsRef<str>>(&mut self, keys: &[S], phrase: &str) {
        if phrase.is_empty() {
            return;
        }
        let keys: BTreeSet<String> = keys
            .iter()
            .map(|k| k.as_ref().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        if keys.is_empty() {
            self.entries.remove(phrase);
            return;
        }
        // Replaces any previous key set for the phrase
        self.entries.insert(phrase.to_string(), keys);
    }

    /// Phrases whose key set contains every queried key.
    ///
    /// Returns `None` when any queried key is unknown to the table, and
    /// `None` for an empty query (an empty key list matches nothing useful).
    pub fn phrase_list<S: AsRef<str>>(&self, keys: &[S]) -> Option<Vec<String>> {
        if keys.is_empty() {
            return None;
        }
        for key in keys {
            if !self.key_exists(key.as_ref()) {
                return None;
            }
        }
        let matches: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, set)| keys.iter().all(|k| set.contains(k.as_ref())))
            .map(|(phrase, _)| phrase.clone())
            .collect();
        Some(matches)
    }

    /// Keys starting with `partial`, case-insensitive, sorted and deduplicated.
    ///
    /// An empty partial returns nothing: completing against the whole key
    /// set is never useful.
    pub fn valid_keys(&self, partial: &str) -> Vec<String> {
        if partial.is_empty() {
            return Vec::new();
        }
        let lowered = partial.to_lowercase();
        let matches: BTreeSet<&String> = self
            .entries
            .values()
            .flatten()
            .filter(|key| key.to_lowercase().starts_with(&lowered))
            .collect();
        matches.into_iter().cloned().collect()
    }

    /// Phrases starting with `partial`, case-sensitive, sorted.
    pub fn valid_phrases(&self, partial: &str) -> Vec<String> {
        if partial.is_empty() {
            return Vec::new();
        }
        self.entries
            .keys()
            .filter(|phrase| phrase.starts_with(partial))
            .cloned()
            .collect()
    }

    /// Keys saved for one exact phrase, empty when the phrase is unknown.
    pub fn saved_keys(&self, phrase: &str) -> Vec<String> {
        self.entries
            .get(phrase)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// All saved phrases in table order.
    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    fn key_exists(&self, key: &str) -> bool {
        self.entries.values().any(|set| set.contains(key))
    }
}
