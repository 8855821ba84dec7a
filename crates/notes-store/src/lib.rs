//! File-backed note persistence.
//!
//! A note is a named text blob stored as a single file directly under a
//! configured root directory. The file name is the note's identifier and the
//! file content is the note text, with no framing or metadata.
//!
//! # Storage Backends
//!
//! All backends implement the [`NoteStore`] trait:
//!
//! - [`FsNoteStore`] -- one file per note under a root directory
//! - [`InMemoryNoteStore`] -- `BTreeMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. Identifiers are validated by [`NoteId::parse`] before any filesystem
//!    access; a valid identifier always maps to a direct child of the root.
//! 2. Writes land in a temporary file inside the root and are renamed into
//!    place, so readers see either the old or the new content, never a mix.
//! 3. `create`, `update` and `delete` on the same identifier are serialized
//!    through a per-identifier lock. Unrelated notes never contend.
//! 4. Reads take no lock.
//! 5. All I/O errors are propagated, never silently ignored or retried.

pub mod error;
pub mod fs;
pub mod id;
pub mod lock;
pub mod memory;
pub mod note;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use fs::{FsNoteStore, StoreOptions, SyncMode};
pub use id::NoteId;
pub use lock::LockTable;
pub use memory::InMemoryNoteStore;
pub use note::{validate_content, Note};
pub use traits::NoteStore;
