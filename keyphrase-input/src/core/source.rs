//! Completion sources.
//!
//! A field never talks to the store directly: it asks a
//! [`SuggestionSource`] for the candidates matching a partial token. The
//! two adapters below give the key field and the phrase field their
//! different views of the same store.

use keyphrase_store::PhraseStore;

/// Provider of completion candidates for a partial token.
///
/// Must be synchronous and fast (an in-memory prefix scan). Results are
/// expected in a deterministic order; the field takes the first candidate
/// and keeps the rest as the pool.
pub trait SuggestionSource {
    fn suggestions(&self, partial: &str) -> Vec<String>;
}

/// Key completions: case-insensitive prefix match over all saved keys.
pub struct KeyCompletions<'a>(pub &'a PhraseStore);

impl SuggestionSource for KeyCompletions<'_> {
    fn suggestions(&self, partial: &str) -> Vec<String> {
        self.0.valid_keys(partial)
    }
}

/// Phrase completions: case-sensitive prefix match over saved phrases.
pub struct PhraseCompletions<'a>(pub &'a PhraseStore);

impl SuggestionSource for PhraseCompletions<'_> {
    fn suggestions(&self, partial: &str) -> Vec<String> {
        self.0.valid_phrases(partial)
    }
}
