//! Tests for the autocomplete field

use std::cell::RefCell;

use super::*;


/// Completion source stub that records every query it receives.
struct StubSource {
    candidates: Vec<String>,
    calls: RefCell<Vec<String>>,
}

impl StubSource {
    fn new(candidates: &[&str]) -> Self {
        Self {
            candidates: candidates.iter().map(|s| s.to_string()).collect(),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn last_call(&self) -> Option<String> {
        self.calls.borrow().last().cloned()
    }
}

impl SuggestionSource for StubSource {
    fn suggestions(&self, partial: &str) -> Vec<String> {
        self.calls.borrow_mut().push(partial.to_string());
        let lowered = partial.to_lowercase();
        self.candidates
            .iter()
            .filter(|c| c.to_lowercase().starts_with(&lowered))
            .cloned()
            .collect()
    }
}

/// The display text currently on screen for `field`.
fn shown(field: &AutocompleteField) -> String {
    field.render().text().to_string()
}

/// Simulate the host applying one keystroke at the caret, then reporting
/// the post-edit display text and cursor.
fn type_char(field: &mut AutocompleteField, source: &StubSource, ch: char) -> FieldResult {
    let caret = field.committed_cursor();
    let mut display = shown(field);
    let byte = display
        .char_indices()
        .nth(caret)
        .map(|(i, _)| i)
        .unwrap_or(display.len());
    display.insert(byte, ch);
    field.handle_input(source, &display, caret + 1)
}

fn type_text(field: &mut AutocompleteField, source: &StubSource, text: &str) {
    for ch in text.chars() {
        type_char(field, source, ch);
    }
}

/// Simulate a backspace: the host removes the character before the caret,
/// then reports.
fn backspace(field: &mut AutocompleteField, source: &StubSource) -> FieldResult {
    let caret = field.committed_cursor();
    let mut display = shown(field);
    if caret > 0 {
        let start = display
            .char_indices()
            .nth(caret - 1)
            .map(|(i, _)| i)
            .unwrap();
        let end = display
            .char_indices()
            .nth(caret)
            .map(|(i, _)| i)
            .unwrap_or(display.len());
        display.replace_range(start..end, "");
    }
    field.handle_delete(source, &display, caret.saturating_sub(1))
}

/// Invariants that must hold after every public operation: the display is
/// the committed text plus the tail, and every pool entry still extends
/// the committed text.
fn assert_invariants(field: &AutocompleteField) {
    assert_eq!(
        shown(field),
        format!("{}{}", field.committed_text(), field.suggestion_tail())
    );
    for entry in field.pool().entries() {
        assert!(
            entry.starts_with(field.committed_text()),
            "pool entry {:?} does not extend committed {:?}",
            entry,
            field.committed_text()
        );
        assert_ne!(entry.as_str(), field.committed_text());
    }
    if field.has_suggestion() {
        assert!(
            field.committed_cursor() == field.committed_text().chars().count(),
            "a completion may only show with the cursor at the end"
        );
    }
}
