//! Cursor movement and deletion handling

use super::*;

impl AutocompleteField {
    /// Handle a cursor reposition (mouse click or arrow keys).
    ///
    /// Moving left while a completion shows dismisses it: the user is
    /// editing earlier text and the tail is stale. Moving right walks into
    /// the tail and accepts it up to the new position.
    pub fn handle_cursor(&mut self, source: &dyn SuggestionSource, cursor: usize) -> FieldResult {
        let display_len = self.committed.char_count() + self.suggestion.chars().count();
        let cursor = cursor.min(display_len);
        trace!(
            "handle_cursor: cursor={} committed_cursor={} tail={:?}",
            cursor, self.committed.cursor, self.suggestion
        );

        if self.suggestion.is_empty() {
            self.committed.cursor = cursor.min(self.committed.char_count());
            return FieldResult::handled();
        }

        match cursor.cmp(&self.committed.cursor) {
            std::cmp::Ordering::Less => {
                self.dismiss_suggestion();
                self.committed.cursor = cursor;
                FieldResult::handled()
                    .with_action(FieldAction::UpdateDisplay(self.build_render()))
            }
            std::cmp::Ordering::Greater => {
                // While a completion shows, the committed cursor sits at
                // the end of the committed text, so the distance moved is
                // the number of tail characters accepted.
                let accepted = cursor - self.committed.cursor;
                self.accept_tail_chars(accepted);
                self.pool.retain_completions_of(&self.committed.text);
                if self.suggestion.is_empty() {
                    self.pool.clear();
                    self.refresh_suggestion(source);
                }
                FieldResult::handled()
                    .with_action(FieldAction::UpdateDisplay(self.build_render()))
            }
            std::cmp::Ordering::Equal => FieldResult::handled(),
        }
    }

    /// Handle a deletion (Backspace or Delete) the host has already applied.
    ///
    /// The tail is always dropped first so a deletion can never leave a
    /// stale muted fragment on screen. No new completion is requested
    /// unless the field is configured to re-suggest after deletes; by
    /// default the next keystroke triggers the lookup instead.
    pub fn handle_delete(
        &mut self,
        source: &dyn SuggestionSource,
        display_text: &str,
        cursor: usize,
    ) -> FieldResult {
        let had_tail = !self.suggestion.is_empty();
        let candidate = self.strip_tail(display_text).to_string();
        trace!(
            "handle_delete: display={:?} cursor={} had_tail={}",
            display_text, cursor, had_tail
        );
        self.dismiss_suggestion();
        self.committed.set(&candidate, cursor);

        if self.config.resuggest_after_delete && self.committed.cursor_at_end() {
            self.refresh_suggestion(source);
        }

        if had_tail || self.has_suggestion() {
            FieldResult::handled().with_action(FieldAction::UpdateDisplay(self.build_render()))
        } else {
            FieldResult::handled()
        }
    }
}
