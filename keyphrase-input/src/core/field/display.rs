//! Display construction for the autocomplete field

use crate::core::render::{RenderState, StyleSpan};

use super::*;

impl AutocompleteField {
    /// Current render: committed text plus the muted completion tail.
    ///
    /// Pure read of the field state; calling it twice without an
    /// intervening event yields identical output.
    pub fn render(&self) -> RenderState {
        self.build_render()
    }

    pub(super) fn build_render(&self) -> RenderState {
        let text = format!("{}{}", self.committed.text, self.suggestion);
        let mut spans = Vec::new();
        if !self.suggestion.is_empty() {
            let start = self.committed.char_count();
            spans.push(StyleSpan::muted(
                start,
                start + self.suggestion.chars().count(),
            ));
        }
        RenderState::from_parts(text, self.committed.cursor, spans)
    }
}
