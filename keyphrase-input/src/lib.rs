//! keyphrase-input: the autocomplete engine of the keyphrase utility.
//!
//! Hosts embed this crate behind their widget toolkit: the toolkit applies
//! each keystroke to its text widget, then reports the post-edit state to
//! an [`AutocompleteField`] (or to a [`Session`] wiring two fields to a
//! phrase store) and applies the returned render instructions.

pub mod config;
pub mod core;

pub use config::settings::Settings;
pub use core::browser::PhraseBrowser;
pub use core::field::{AutocompleteField, FieldAction, FieldConfig, FieldResult, TokenMode};
pub use core::pool::SuggestionPool;
pub use core::render::{RenderState, SpanStyle, StyleSpan};
pub use core::session::{FieldId, InputEvent, Session, SessionMode, SessionUpdate};
pub use core::source::{KeyCompletions, PhraseCompletions, SuggestionSource};
