//! AutocompleteField - the inline-completion state machine.
//!
//! One instance per editable field. The host toolkit applies each
//! keystroke to its widget first, then reports the resulting display text
//! and cursor; the field reconciles that report against what it believes
//! the user has committed, decides whether the pending completion tail
//! advances, dies, or gets replaced, and hands back render instructions.
//!
//! The field holds no toolkit handle and never blocks: completions come
//! from a [`SuggestionSource`] passed into each event method.

mod committed;
mod cursor;
mod display;
mod input;
mod suggest;
mod types;

pub use types::*;

use committed::CommittedText;

#[cfg(test)]
mod tests;

use tracing::trace;

use super::pool::SuggestionPool;
use super::source::SuggestionSource;

/// Inline-completion state for one text field
#[derive(Debug, Default)]
pub struct AutocompleteField {
    /// Committed text and cursor (the authoritative value)
    committed: CommittedText,
    /// Pending completion tail shown after the committed text, muted
    suggestion: String,
    /// Candidates still consistent with the committed text
    pool: SuggestionPool,
    /// Field behavior (token extraction, Tab separator)
    config: FieldConfig,
}

impl AutocompleteField {
    /// Create a field with the given behavior
    pub fn new(config: FieldConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Multi-key field: last-token completion, Tab appends a space
    pub fn key_field() -> Self {
        Self::new(FieldConfig::key_field())
    }

    /// Whole-text field: full-content completion, no separator
    pub fn text_field() -> Self {
        Self::new(FieldConfig::text_field())
    }

    /// The committed text: the value used for save and lookup operations.
    /// Never includes the completion tail.
    pub fn committed_text(&self) -> &str {
        &self.committed.text
    }

    /// Cursor position within the committed text, in characters
    pub fn committed_cursor(&self) -> usize {
        self.committed.cursor
    }

    /// The pending completion tail, empty when idle
    pub fn suggestion_tail(&self) -> &str {
        &self.suggestion
    }

    /// Whether a completion is currently displayed
    pub fn has_suggestion(&self) -> bool {
        !self.suggestion.is_empty()
    }

    /// Remaining completion candidates
    pub fn pool(&self) -> &SuggestionPool {
        &self.pool
    }

    /// Field behavior
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Reset the field to empty (after a save, or on mode switch)
    pub fn clear(&mut self) -> FieldResult {
        self.committed.clear();
        self.dismiss_suggestion();
        FieldResult::handled().with_action(FieldAction::UpdateDisplay(self.build_render()))
    }

    /// Show an externally chosen value.
    ///
    /// This is a direct "display this" operation from the host (e.g. the
    /// looked-up phrase for the current keys), not a completion: any
    /// pending tail and pool are dropped first.
    pub fn set_text(&mut self, text: &str) -> FieldResult {
        trace!("set_text: {:?}", text);
        self.dismiss_suggestion();
        let end = text.chars().count();
        self.committed.set(text, end);
        FieldResult::handled().with_action(FieldAction::UpdateDisplay(self.build_render()))
    }

    /// Drop the pending completion, keeping the committed text.
    /// The returned render no longer contains the tail.
    pub fn dismiss(&mut self) -> FieldResult {
        self.dismiss_suggestion();
        FieldResult::handled().with_action(FieldAction::UpdateDisplay(self.build_render()))
    }

    /// Adopt the reported display verbatim, without completing.
    /// Used when completion is disabled for the field (save mode).
    pub fn resync(&mut self, display: &str, cursor: usize) -> FieldResult {
        self.dismiss_suggestion();
        self.committed.set(display, cursor);
        FieldResult::handled()
    }

    pub(super) fn dismiss_suggestion(&mut self) {
        self.suggestion.clear();
        self.pool.clear();
    }

    /// Strip the active tail from a reported display text to recover the
    /// committed candidate. Falls back to the whole display if the tail is
    /// not a suffix (the toolkit edited through it somehow); the next
    /// reconciliation pass self-corrects from there.
    fn strip_tail<'a>(&self, display: &'a str) -> &'a str {
        if self.suggestion.is_empty() {
            return display;
        }
        display
            .strip_suffix(self.suggestion.as_str())
            .unwrap_or(display)
    }

    /// Whether the user's text differs from the committed text
    fn text_changed(&self, display: &str) -> bool {
        self.strip_tail(display) != self.committed.text
    }
}
