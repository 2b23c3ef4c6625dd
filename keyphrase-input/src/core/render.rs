//! Render state for a field widget.
//!
//! Describes what the toolkit should draw: the display text, the caret,
//! and style spans marking the not-yet-accepted completion tail. The
//! toolkit applies the spans however it renders muted text (the reference
//! look is grey #666666 on white).

/// Style applied to a span of the display text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanStyle {
    /// Muted rendering for the pending completion tail
    Muted,
}

/// A styled range of the display text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSpan {
    /// Start position (character index)
    pub start: usize,
    /// End position (character index, exclusive)
    pub end: usize,
    /// Style for the range
    pub style: SpanStyle,
}

impl StyleSpan {
    pub fn new(start: usize, end: usize, style: SpanStyle) -> Self {
        Self { start, end, style }
    }

    /// Create a muted span for the given range
    pub fn muted(start: usize, end: usize) -> Self {
        Self::new(start, end, SpanStyle::Muted)
    }
}

/// Display text with caret position and style spans
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderState {
    /// The full display text, completion tail included
    text: String,
    /// Caret position in characters
    caret: usize,
    /// Style spans
    spans: Vec<StyleSpan>,
}

impl RenderState {
    /// Create an empty render state
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a render state with the given text, caret at the end
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let caret = text.chars().count();
        Self {
            text,
            caret,
            spans: Vec::new(),
        }
    }

    /// Create a render state from parts; the caret is clamped into the text
    pub fn from_parts(text: impl Into<String>, caret: usize, spans: Vec<StyleSpan>) -> Self {
        let text = text.into();
        let len = text.chars().count();
        Self {
            caret: caret.min(len),
            text,
            spans,
        }
    }

    /// Get the display text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the caret position (in characters)
    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Get the style spans
    pub fn spans(&self) -> &[StyleSpan] {
        &self.spans
    }

    /// Check if the display is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Get the length in characters
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_text_caret_at_end() {
        let render = RenderState::with_text("poulet");
        assert_eq!(render.caret(), 6);
        assert!(render.spans().is_empty());
    }

    #[test]
    fn test_from_parts_clamps_caret() {
        let render = RenderState::from_parts("abc", 10, vec![StyleSpan::muted(1, 3)]);
        assert_eq!(render.caret(), 3);
        assert_eq!(render.spans(), &[StyleSpan::muted(1, 3)]);
    }

    #[test]
    fn test_char_positions_not_bytes() {
        let render = RenderState::with_text("clé");
        assert_eq!(render.len(), 3);
        assert_eq!(render.caret(), 3);
    }
}
