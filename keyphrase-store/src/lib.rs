//! keyphrase-store: the key/phrase table behind the keyphrase utility.
//!
//! Provides the phrase table with prefix lookup, its JSON file on disk,
//! session-scoped undo/redo, and rotating backups.

pub mod backup;
pub mod error;
pub mod store;
pub mod table;

pub use backup::{BackupDates, BackupRotation, BackupTier};
pub use error::{Result, StoreError};
pub use store::PhraseStore;
pub use table::PhraseTable;
