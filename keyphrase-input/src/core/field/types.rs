//! Type definitions for the autocomplete field

use crate::core::render::RenderState;

/// Action to be performed by the host/toolkit layer
#[derive(Debug, Clone)]
pub enum FieldAction {
    /// Replace the widget's visible text, caret, and style spans
    UpdateDisplay(RenderState),
}

/// Result of processing an input event
#[derive(Debug, Clone, Default)]
pub struct FieldResult {
    /// Whether the event was consumed by the field.
    /// A Tab that finds no active completion reports `false` so the host
    /// can fall back to its default behavior (focus traversal).
    pub handled: bool,
    /// Actions to perform
    pub actions: Vec<FieldAction>,
}

impl FieldResult {
    pub fn handled() -> Self {
        Self {
            handled: true,
            actions: Vec::new(),
        }
    }

    pub fn not_handled() -> Self {
        Self {
            handled: false,
            actions: Vec::new(),
        }
    }

    pub fn with_action(mut self, action: FieldAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Extract the display update, if the event produced one.
    pub fn into_render(self) -> Option<RenderState> {
        self.actions.into_iter().map(|action| {
            let FieldAction::UpdateDisplay(render) = action;
            render
        }).next_back()
    }
}

/// How the partial token for completion lookups is extracted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenMode {
    /// Complete the entire field content as one token (phrase fields,
    /// single-key translation fields)
    #[default]
    WholeText,
    /// Complete the last whitespace-delimited token (the multi-key field,
    /// where keys are space-separated)
    LastWord,
}

/// Configuration for one autocomplete field
#[derive(Debug, Clone)]
pub struct FieldConfig {
    /// Token extraction strategy for completion lookups
    pub token_mode: TokenMode,
    /// Text appended after a completion is fully accepted via Tab.
    /// Partial accepts (typing along the tail, cursor-right) never append it.
    pub accept_separator: String,
    /// Whether a deletion immediately requests a new completion.
    /// Off by default: the next keystroke triggers the lookup instead.
    pub resuggest_after_delete: bool,
}

impl FieldConfig {
    /// Multi-key field: completes the last key, Tab appends a space.
    pub fn key_field() -> Self {
        Self {
            token_mode: TokenMode::LastWord,
            accept_separator: " ".to_string(),
            resuggest_after_delete: false,
        }
    }

    /// Whole-text field: completes the full content, no separator.
    pub fn text_field() -> Self {
        Self {
            token_mode: TokenMode::WholeText,
            accept_separator: String::new(),
            resuggest_after_delete: false,
        }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self::text_field()
    }
}
