use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::id::NoteId;
use crate::lock::LockTable;
use crate::note::{validate_content, Note};
use crate::traits::NoteStore;

/// Prefix of staged writes inside the root. Never a valid [`NoteId`].
const TEMP_PREFIX: &str = ".note-";
const TEMP_SUFFIX: &str = ".tmp";

/// Flush/sync strategy for note writes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SyncMode {
    /// `fsync` the staged file before the rename and the root directory
    /// after it.
    #[default]
    EveryWrite,
    /// Rely on OS page-cache buffering (fastest, least durable).
    OsDefault,
}

/// Options for opening a [`FsNoteStore`].
#[derive(Clone, Debug, Default)]
pub struct StoreOptions {
    pub sync_mode: SyncMode,
}

/// Note store backed by one file per note under a root directory.
///
/// `create` stages the content in a temporary file next to the target and
/// links it into place with a no-clobber rename, so two racing creates can
/// never both succeed, even across processes. `update` stages and renames
/// over the existing file. Both run under the identifier's lock together
/// with their existence check, as does `delete`. Reads are lock-free.
pub struct FsNoteStore {
    root: PathBuf,
    options: StoreOptions,
    locks: LockTable,
}

impl FsNoteStore {
    /// Open a store rooted at an existing directory.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        Self::open_with(root, StoreOptions::default())
    }

    /// Open a store with explicit options.
    pub fn open_with(root: impl Into<PathBuf>, options: StoreOptions) -> StoreResult<Self> {
        let root = root.into();
        match fs::metadata(&root) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(StoreError::RootMissing(root)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::RootMissing(root))
            }
            Err(e) => return Err(e.into()),
        }
        info!(root = %root.display(), sync = ?options.sync_mode, "opened note store");
        Ok(Self {
            root,
            options,
            locks: LockTable::new(),
        })
    }

    /// The directory notes are stored in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn note_path(&self, id: &NoteId) -> PathBuf {
        self.root.join(id.file_name())
    }

    /// Returns `true` if `path` exists and is a regular file.
    fn is_note_file(path: &Path) -> StoreResult<bool> {
        match fs::metadata(path) {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Write `content` to a fresh temporary file inside the root.
    fn stage(&self, content: &str) -> StoreResult<NamedTempFile> {
        let mut tmp = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(TEMP_SUFFIX)
            .tempfile_in(&self.root)?;
        tmp.write_all(content.as_bytes())?;
        if self.options.sync_mode == SyncMode::EveryWrite {
            tmp.as_file().sync_all()?;
        }
        Ok(tmp)
    }

    /// Make a rename or unlink in the root durable.
    fn sync_root(&self) {
        if self.options.sync_mode != SyncMode::EveryWrite {
            return;
        }
        #[cfg(unix)]
        {
            if let Err(e) = File::open(&self.root).and_then(|dir| dir.sync_all()) {
                warn!(root = %self.root.display(), error = %e, "failed to sync notes directory");
            }
        }
    }
}

impl NoteStore for FsNoteStore {
    fn create(&self, id: &NoteId, content: &str) -> StoreResult<Note> {
        validate_content(content)?;
        let path = self.note_path(id);

        self.locks.with_lock(id, || {
            if fs::symlink_metadata(&path).is_ok() {
                return Err(StoreError::AlreadyExists {
                    name: id.to_string(),
                });
            }

            let tmp = self.stage(content)?;
            match tmp.persist_noclobber(&path) {
                Ok(_) => {}
                Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                    return Err(StoreError::AlreadyExists {
                        name: id.to_string(),
                    });
                }
                Err(e) => return Err(e.error.into()),
            }
            self.sync_root();

            debug!(note = %id, len = content.len(), "created note");
            Ok(Note::new(id.clone(), content))
        })
    }

    fn read(&self, id: &NoteId) -> StoreResult<Note> {
        let not_found = || StoreError::NotFound {
            name: id.to_string(),
        };

        let mut file = match File::open(self.note_path(id)) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(not_found()),
            Err(e) => return Err(e.into()),
        };
        if !file.metadata()?.is_file() {
            return Err(not_found());
        }

        // Lossy, so one stray binary file cannot break listing.
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        let content = String::from_utf8_lossy(&bytes).into_owned();
        debug!(note = %id, len = content.len(), "read note");
        Ok(Note::new(id.clone(), content))
    }

    fn update(&self, id: &NoteId, content: &str) -> StoreResult<Note> {
        let path = self.note_path(id);

        self.locks.with_lock(id, || {
            if !Self::is_note_file(&path)? {
                return Err(StoreError::NotFound {
                    name: id.to_string(),
                });
            }
            validate_content(content)?;

            let tmp = self.stage(content)?;
            tmp.persist(&path).map_err(|e| StoreError::Io(e.error))?;
            self.sync_root();

            debug!(note = %id, len = content.len(), "updated note");
            Ok(Note::new(id.clone(), content))
        })
    }

    fn delete(&self, id: &NoteId) -> StoreResult<()> {
        let path = self.note_path(id);

        self.locks.with_lock(id, || {
            if !Self::is_note_file(&path)? {
                return Err(StoreError::NotFound {
                    name: id.to_string(),
                });
            }

            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Err(StoreError::NotFound {
                        name: id.to_string(),
                    });
                }
                Err(e) => return Err(e.into()),
            }
            self.sync_root();

            debug!(note = %id, "deleted note");
            Ok(())
        })
    }

    fn list(&self) -> StoreResult<Vec<Note>> {
        let mut notes = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let Ok(name) = entry.file_name().into_string() else {
                warn!(entry = ?entry.file_name(), "skipping non UTF-8 file name");
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            let id = match NoteId::parse(&name) {
                Ok(id) => id,
                Err(e) => {
                    warn!(%name, error = %e, "skipping file that is not a note");
                    continue;
                }
            };

            match self.read(&id) {
                Ok(note) => notes.push(note),
                // Directory, or removed since read_dir.
                Err(StoreError::NotFound { .. }) => continue,
                Err(e) => return Err(e),
            }
        }

        notes.sort_by(|a, b| a.id.cmp(&b.id));
        debug!(count = notes.len(), "listed notes");
        Ok(notes)
    }
}

impl std::fmt::Debug for FsNoteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FsNoteStore")
            .field("root", &self.root)
            .field("sync_mode", &self.options.sync_mode)
            .finish()
    }
}
