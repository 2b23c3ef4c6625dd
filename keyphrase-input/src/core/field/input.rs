//! Character input reconciliation

use super::*;

impl AutocompleteField {
    /// Reconcile a character keystroke the host has already applied.
    ///
    /// `display` and `cursor` are the post-edit widget state. Some
    /// toolkits deliver pure cursor movement through the same notification;
    /// when the text turns out unchanged this falls through to cursor
    /// handling.
    pub fn handle_input(
        &mut self,
        source: &dyn SuggestionSource,
        display_text: &str,
        cursor: usize,
    ) -> FieldResult {
        let cursor = cursor.min(display_text.chars().count());
        trace!(
            "handle_input: display={:?} cursor={} committed={:?} tail={:?}",
            display_text, cursor, self.committed.text, self.suggestion
        );

        if !self.text_changed(display_text) {
            return self.handle_cursor(source, cursor);
        }

        if self.suggestion.is_empty() {
            // No tail on screen: the display is the committed text.
            self.committed.set(display_text, cursor);
            if self.committed.cursor_at_end() {
                // Completions are only offered at the end of the text
                self.refresh_suggestion(source);
            }
            return FieldResult::handled()
                .with_action(FieldAction::UpdateDisplay(self.build_render()));
        }

        // A completion was showing and the text changed underneath it.
        let candidate = self.strip_tail(display_text).to_string();
        let typed = candidate
            .strip_prefix(self.committed.text.as_str())
            .map(str::to_string);

        match typed {
            Some(input) if input.chars().count() == 1 && self.suggestion.starts_with(&input) => {
                // The user typed the next character of the tail: the
                // completion advances instead of being re-fetched.
                self.committed.set(&candidate, cursor);
                let mut rest = self.suggestion.chars();
                rest.next();
                self.suggestion = rest.as_str().to_string();
                self.pool.retain_completions_of(&self.committed.text);
                if self.suggestion.is_empty() {
                    // Fully typed through: look for the next candidate
                    self.refresh_suggestion(source);
                }
            }
            _ => {
                // Divergent character, a multi-character paste, or an edit
                // somewhere unexpected: the tail no longer applies.
                self.dismiss_suggestion();
                self.committed.set(&candidate, cursor);
                if self.committed.cursor_at_end() {
                    self.refresh_suggestion(source);
                }
            }
        }

        FieldResult::handled().with_action(FieldAction::UpdateDisplay(self.build_render()))
    }
}
