//! Disk-backed phrase store with session undo/redo.
//!
//! Wraps a [`PhraseTable`] with a JSON file on disk and two snapshot
//! stacks. `prepare_undo` is called before each mutating command so the
//! previous table state can be restored; the stacks live for the session
//! only and are never persisted.

use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::table::PhraseTable;

/// A phrase table bound to its file on disk.
#[derive(Debug)]
pub struct PhraseStore {
    table: PhraseTable,
    path: PathBuf,
    undo_stack: Vec<PhraseTable>,
    redo_stack: Vec<PhraseTable>,
    dirty: bool,
}

impl PhraseStore {
    /// Load a store from `path`.
    ///
    /// A missing file is not an error: an empty table is created and
    /// written so the file exists from the first run onward.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let table = match fs::File::open(&path) {
            Ok(file) => {
                debug!("loading phrase table from {:?}", path);
                serde_json::from_reader(BufReader::new(file))?
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("no phrase table at {:?}, starting empty", path);
                let table = PhraseTable::new();
                write_table(&path, &table)?;
                table
            }
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            table,
            path,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            dirty: false,
        })
    }

    /// Create an in-memory store that saves to `path` on demand.
    /// Used by tests and by bulk generation; nothing is read from disk.
    pub fn with_table(path: impl AsRef<Path>, table: PhraseTable) -> Self {
        Self {
            table,
            path: path.as_ref().to_path_buf(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            dirty: true,
        }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read access to the table.
    pub fn table(&self) -> &PhraseTable {
        &self.table
    }

    /// Whether there are unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the table to disk.
    pub fn save(&mut self) -> Result<()> {
        write_table(&self.path, &self.table)?;
        self.dirty = false;
        Ok(())
    }

    /// Snapshot the current table so the next mutation can be undone.
    pub fn prepare_undo(&mut self) {
        self.undo_stack.push(self.table.clone());
    }

    /// Save a key list / phrase combination. See [`PhraseTable::save_entry`].
    pub fn save_entry<S: AsRef<str>>(&mut self, keys: &[S], phrase: &str) {
        self.table.save_entry(keys, phrase);
        self.dirty = true;
    }

    /// Revert the most recent snapshotted mutation. No-op when there is
    /// nothing to undo.
    pub fn undo(&mut self) {
        let Some(previous) = self.undo_stack.pop() else {
            return;
        };
        self.redo_stack.push(std::mem::replace(&mut self.table, previous));
        self.dirty = true;
        debug!("undo: {} snapshots remaining", self.undo_stack.len());
    }

    /// Revert the most recent undo. No-op when there is nothing to redo.
    pub fn redo(&mut self) {
        let Some(next) = self.redo_stack.pop() else {
            return;
        };
        self.undo_stack.push(std::mem::replace(&mut self.table, next));
        self.dirty = true;
        debug!("redo: {} snapshots remaining", self.redo_stack.len());
    }

    // Lookup delegates, so callers don't reach through `table()` for the
    // common queries.

    /// See [`PhraseTable::phrase_list`].
    pub fn phrase_list<S: AsRef<str>>(&self, keys: &[S]) -> Option<Vec<String>> {
        self.table.phrase_list(keys)
    }

    /// See [`PhraseTable::valid_keys`].
    pub fn valid_keys(&self, partial: &str) -> Vec<String> {
        self.table.valid_keys(partial)
    }

    /// See [`PhraseTable::valid_phrases`].
    pub fn valid_phrases(&self, partial: &str) -> Vec<String> {
        self.table.valid_phrases(partial)
    }

    /// See [`PhraseTable::saved_keys`].
    pub fn saved_keys(&self, phrase: &str) -> Vec<String> {
        self.table.saved_keys(phrase)
    }
}

fn write_table(path: &Path, table: &PhraseTable) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), table)?;
    Ok(())
}
