//! Session controller: two fields wired to one store.
//!
//! Owns the key field, the phrase field, and the phrase store, and
//! implements the cross-field logic the widgets themselves don't know
//! about: looking up phrases for the displayed keys, pulling saved keys
//! for a recognized phrase, saving entries, and browsing between multiple
//! matches. The toolkit layer forwards raw events here and applies the
//! returned render states.

use tracing::debug;

use keyphrase_store::{PhraseStore, Result as StoreResult};

use crate::config::settings::Settings;

use super::browser::PhraseBrowser;
use super::field::{AutocompleteField, FieldConfig, TokenMode};
use super::render::RenderState;
use super::source::{KeyCompletions, PhraseCompletions};

/// Which field an event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Key,
    Phrase,
}

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionMode {
    /// Look up phrases for typed keys (the default)
    #[default]
    Get,
    /// Enter a new key/phrase combination to save
    Put,
}

/// A raw input notification from the toolkit, post-edit
#[derive(Debug, Clone, Copy)]
pub enum InputEvent<'a> {
    /// A character keystroke was applied; this is the resulting state
    Text { display: &'a str, cursor: usize },
    /// Backspace/Delete was applied; this is the resulting state
    Delete { display: &'a str, cursor: usize },
    /// The cursor moved without a text edit (click or arrow key)
    Cursor { cursor: usize },
    /// Tab was pressed (not yet applied; the field decides)
    Tab,
}

/// Render updates for the host to apply after an event
#[derive(Debug, Clone, Default)]
pub struct SessionUpdate {
    /// Whether the event was consumed. A false value from a Tab event
    /// means the host should move focus instead.
    pub handled: bool,
    /// New render for the key field, when it changed
    pub key: Option<RenderState>,
    /// New render for the phrase field, when it changed
    pub phrase: Option<RenderState>,
}

impl SessionUpdate {
    fn handled() -> Self {
        Self {
            handled: true,
            ..Self::default()
        }
    }
}

/// One running key/phrase session
#[derive(Debug)]
pub struct Session {
    store: PhraseStore,
    mode: SessionMode,
    key_field: AutocompleteField,
    phrase_field: AutocompleteField,
    browser: PhraseBrowser,
}

impl Session {
    /// Build a session around a loaded store.
    ///
    /// The store and settings are passed in by the host; nothing here
    /// reaches for process-wide state.
    pub fn new(store: PhraseStore, settings: &Settings) -> Self {
        let key_field = AutocompleteField::new(FieldConfig {
            token_mode: TokenMode::LastWord,
            accept_separator: settings.field.key_separator.clone(),
            resuggest_after_delete: settings.field.resuggest_after_delete,
        });
        let phrase_field = AutocompleteField::new(FieldConfig {
            token_mode: TokenMode::WholeText,
            accept_separator: String::new(),
            resuggest_after_delete: settings.field.resuggest_after_delete,
        });
        Self {
            store,
            mode: SessionMode::default(),
            key_field,
            phrase_field,
            browser: PhraseBrowser::new(),
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn store(&self) -> &PhraseStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut PhraseStore {
        &mut self.store
    }

    pub fn key_field(&self) -> &AutocompleteField {
        &self.key_field
    }

    pub fn phrase_field(&self) -> &AutocompleteField {
        &self.phrase_field
    }

    pub fn browser(&self) -> &PhraseBrowser {
        &self.browser
    }

    /// Switch between lookup and save modes.
    ///
    /// Entering Get clears both fields for a fresh lookup. Entering Put
    /// keeps the keys already typed but drops their completion tail; the
    /// phrase pane is cleared for the new text.
    pub fn set_mode(&mut self, mode: SessionMode) -> SessionUpdate {
        if mode == self.mode {
            return SessionUpdate::handled();
        }
        debug!("mode switch: {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        self.browser.clear();
        let (key, phrase) = match mode {
            SessionMode::Get => (self.key_field.clear(), self.phrase_field.clear()),
            SessionMode::Put => (self.key_field.dismiss(), self.phrase_field.clear()),
        };
        SessionUpdate {
            handled: true,
            key: key.into_render(),
            phrase: phrase.into_render(),
        }
    }

    /// Process one raw input event from the toolkit
    pub fn handle(&mut self, field: FieldId, event: InputEvent<'_>) -> SessionUpdate {
        match field {
            FieldId::Key => self.handle_key_event(event),
            FieldId::Phrase => self.handle_phrase_event(event),
        }
    }

    fn handle_key_event(&mut self, event: InputEvent<'_>) -> SessionUpdate {
        match event {
            InputEvent::Text { display, cursor } => {
                if self.mode == SessionMode::Put {
                    // No completion while entering keys to save; the
                    // display is the value.
                    self.key_field.resync(display, cursor);
                    return SessionUpdate::handled();
                }
                let result =
                    self.key_field
                        .handle_input(&KeyCompletions(&self.store), display, cursor);
                let phrase = self.show_phrase_for_keys();
                SessionUpdate {
                    handled: true,
                    key: result.into_render(),
                    phrase,
                }
            }
            InputEvent::Delete { display, cursor } => {
                if self.mode == SessionMode::Put {
                    self.key_field.resync(display, cursor);
                    return SessionUpdate::handled();
                }
                let result =
                    self.key_field
                        .handle_delete(&KeyCompletions(&self.store), display, cursor);
                let phrase = self.show_phrase_for_keys();
                SessionUpdate {
                    handled: true,
                    key: result.into_render(),
                    phrase,
                }
            }
            InputEvent::Cursor { cursor } => {
                let result = self
                    .key_field
                    .handle_cursor(&KeyCompletions(&self.store), cursor);
                SessionUpdate {
                    handled: true,
                    key: result.into_render(),
                    ..SessionUpdate::default()
                }
            }
            InputEvent::Tab => {
                let result = self.key_field.handle_tab(&KeyCompletions(&self.store));
                if !result.handled {
                    return SessionUpdate::default();
                }
                let phrase = match self.mode {
                    SessionMode::Get => self.show_phrase_for_keys(),
                    SessionMode::Put => None,
                };
                SessionUpdate {
                    handled: true,
                    key: result.into_render(),
                    phrase,
                }
            }
        }
    }

    fn handle_phrase_event(&mut self, event: InputEvent<'_>) -> SessionUpdate {
        // Completing the phrase (and pulling up its keys) only makes sense
        // while the key pane is empty; otherwise the user's keys would be
        // overwritten by the lookup.
        let autocomplete = self.key_field.committed_text().is_empty();
        match event {
            InputEvent::Text { display, cursor } => {
                if !autocomplete {
                    self.phrase_field.resync(display, cursor);
                    return SessionUpdate::handled();
                }
                let result =
                    self.phrase_field
                        .handle_input(&PhraseCompletions(&self.store), display, cursor);
                let key = self.show_keys_for_phrase();
                SessionUpdate {
                    handled: true,
                    key,
                    phrase: result.into_render(),
                }
            }
            InputEvent::Delete { display, cursor } => {
                if !autocomplete {
                    self.phrase_field.resync(display, cursor);
                    return SessionUpdate::handled();
                }
                let result = self.phrase_field.handle_delete(
                    &PhraseCompletions(&self.store),
                    display,
                    cursor,
                );
                let key = self.show_keys_for_phrase();
                SessionUpdate {
                    handled: true,
                    key,
                    phrase: result.into_render(),
                }
            }
            InputEvent::Cursor { cursor } => {
                let result = self
                    .phrase_field
                    .handle_cursor(&PhraseCompletions(&self.store), cursor);
                SessionUpdate {
                    handled: true,
                    phrase: result.into_render(),
                    ..SessionUpdate::default()
                }
            }
            InputEvent::Tab => {
                let result = self.phrase_field.handle_tab(&PhraseCompletions(&self.store));
                if !result.handled {
                    return SessionUpdate::default();
                }
                let key = if autocomplete {
                    self.show_keys_for_phrase()
                } else {
                    None
                };
                SessionUpdate {
                    handled: true,
                    key,
                    phrase: result.into_render(),
                }
            }
        }
    }

    /// Save the current key/phrase combination and clear both panes.
    ///
    /// A blank phrase saves nothing (the store guards too); an empty key
    /// list deletes the phrase from the table.
    pub fn save_entry(&mut self) -> StoreResult<()> {
        let phrase = self.phrase_field.committed_text().to_string();
        if phrase.is_empty() {
            return Ok(());
        }
        let keys: Vec<String> = self
            .key_field
            .committed_text()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        debug!("saving entry: keys={:?}", keys);
        self.store.prepare_undo();
        self.store.save_entry(&keys, &phrase);
        self.store.save()?;
        self.key_field.clear();
        self.phrase_field.clear();
        self.browser.clear();
        Ok(())
    }

    /// The text a copy action should place on the clipboard
    pub fn copy_text(&self) -> String {
        self.phrase_field.render().text().to_string()
    }

    /// Show the next matching phrase, if any
    pub fn next_phrase(&mut self) -> Option<RenderState> {
        if !self.browser.advance() {
            return None;
        }
        let phrase = self.browser.current()?.to_string();
        self.phrase_field.set_text(&phrase).into_render()
    }

    /// Show the previous matching phrase, if any
    pub fn previous_phrase(&mut self) -> Option<RenderState> {
        if !self.browser.retreat() {
            return None;
        }
        let phrase = self.browser.current()?.to_string();
        self.phrase_field.set_text(&phrase).into_render()
    }

    /// Revert the last saved entry (session scope)
    pub fn undo(&mut self) -> StoreResult<()> {
        self.store.undo();
        self.store.save()
    }

    /// Revert the last undo (session scope)
    pub fn redo(&mut self) -> StoreResult<()> {
        self.store.redo();
        self.store.save()
    }

    /// Look up phrases for the displayed key list and show the best match.
    ///
    /// The displayed list includes the completion tail, so the phrase pane
    /// previews the completion currently being offered.
    fn show_phrase_for_keys(&mut self) -> Option<RenderState> {
        let shown = format!(
            "{}{}",
            self.key_field.committed_text(),
            self.key_field.suggestion_tail()
        );
        let keys: Vec<&str> = shown.split_whitespace().collect();
        let matches = if keys.is_empty() {
            None
        } else {
            self.store.phrase_list(&keys)
        };
        match matches {
            Some(phrases) if !phrases.is_empty() => {
                debug!("{} phrases for keys {:?}", phrases.len(), keys);
                self.browser.set_list(phrases);
                let top = self.browser.current()?.to_string();
                self.phrase_field.set_text(&top).into_render()
            }
            _ => {
                self.browser.clear();
                self.phrase_field.clear().into_render()
            }
        }
    }

    /// Pull the saved keys for the displayed phrase into the key pane
    fn show_keys_for_phrase(&mut self) -> Option<RenderState> {
        let shown = format!(
            "{}{}",
            self.phrase_field.committed_text(),
            self.phrase_field.suggestion_tail()
        );
        let keys = self.store.saved_keys(&shown);
        if keys.is_empty() {
            self.key_field.clear().into_render()
        } else {
            debug!("{} saved keys for displayed phrase", keys.len());
            self.key_field.set_text(&keys.join(" ")).into_render()
        }
    }
}
