//! Completion fetching and acceptance

use super::*;

impl AutocompleteField {
    /// Accept the whole pending completion (Tab).
    ///
    /// Returns not-handled when no completion shows, so the host can route
    /// Tab to its default behavior (focus traversal). On success the
    /// field's separator is appended after the accepted text; this is the
    /// only accept path that appends it.
    pub fn handle_tab(&mut self, source: &dyn SuggestionSource) -> FieldResult {
        if self.suggestion.is_empty() {
            return FieldResult::not_handled();
        }
        let tail = std::mem::take(&mut self.suggestion);
        self.committed.accept(&tail);
        if !self.config.accept_separator.is_empty() {
            let separator = self.config.accept_separator.clone();
            self.committed.accept(&separator);
        }
        // The fully-typed candidate is no longer a completion; whatever
        // still extends the committed text stays for the next fetch.
        self.pool.retain_completions_of(&self.committed.text);
        self.refresh_suggestion(source);
        FieldResult::handled().with_action(FieldAction::UpdateDisplay(self.build_render()))
    }

    /// Move the first `n` characters of the tail into the committed text
    pub(super) fn accept_tail_chars(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        let split = self
            .suggestion
            .char_indices()
            .nth(n)
            .map(|(i, _)| i)
            .unwrap_or(self.suggestion.len());
        let rest = self.suggestion.split_off(split);
        let accepted = std::mem::replace(&mut self.suggestion, rest);
        self.committed.accept(&accepted);
    }

    /// Offer the best completion for the current committed text.
    ///
    /// Reuses the pool when it is still consistent (the cheap path after
    /// an advance); otherwise queries the source with the partial token.
    /// An empty partial never queries: completing against the entire store
    /// is meaningless.
    pub(super) fn refresh_suggestion(&mut self, source: &dyn SuggestionSource) {
        self.suggestion.clear();
        if !self.committed.cursor_at_end() {
            self.pool.clear();
            return;
        }
        let partial = self.partial_token().to_string();
        if partial.is_empty() {
            self.pool.clear();
            return;
        }

        self.pool.retain_completions_of(&self.committed.text);
        if self.pool.is_empty() {
            let partial_chars = partial.chars().count();
            let found = source.suggestions(&partial);
            trace!("{} completions for {:?}", found.len(), partial);
            let completions: Vec<String> = found
                .into_iter()
                // A candidate no longer than the partial completes nothing.
                // This also drops case-insensitive exact matches.
                .filter(|candidate| candidate.chars().count() > partial_chars)
                .map(|candidate| {
                    // Keep the user's own characters as typed; only the
                    // candidate's continuation is appended.
                    let continuation: String = candidate.chars().skip(partial_chars).collect();
                    format!("{}{}", self.committed.text, continuation)
                })
                .collect();
            self.pool.replace(completions);
        }

        if let Some(head) = self.pool.head() {
            self.suggestion = head.chars().skip(self.committed.char_count()).collect();
        }
        if self.suggestion.is_empty() {
            self.pool.clear();
        }
    }

    /// The token completions are fetched for
    fn partial_token(&self) -> &str {
        match self.config.token_mode {
            TokenMode::WholeText => &self.committed.text,
            TokenMode::LastWord => self
                .committed
                .text
                .rsplit(|c: char| c.is_whitespace())
                .next()
                .unwrap_or(&self.committed.text),
        }
    }
}
