use crate::error::{StoreError, StoreResult};
use crate::id::NoteId;
use crate::note::Note;

/// Named text note store.
///
/// All implementations must satisfy these invariants:
/// - `create`, `update` and `delete` on the same identifier are mutually
///   exclusive; exactly one of N concurrent `create`s for a fresh identifier
///   succeeds.
/// - A reader observes either the complete previous content or the complete
///   new content, never a partial write.
/// - Content is stored verbatim.
/// - All I/O errors are propagated, never silently ignored.
pub trait NoteStore: Send + Sync {
    /// Create a new note.
    ///
    /// Fails with `AlreadyExists` if the identifier is taken and with
    /// `InvalidContent` if `content` is empty or whitespace-only.
    fn create(&self, id: &NoteId, content: &str) -> StoreResult<Note>;

    /// Read the current content of a note. Fails with `NotFound` if absent.
    fn read(&self, id: &NoteId) -> StoreResult<Note>;

    /// Replace the content of an existing note.
    ///
    /// Fails with `NotFound` if absent and with `InvalidContent` if `content`
    /// is empty or whitespace-only.
    fn update(&self, id: &NoteId, content: &str) -> StoreResult<Note>;

    /// Remove a note. Fails with `NotFound` if absent.
    fn delete(&self, id: &NoteId) -> StoreResult<()>;

    /// Every note currently present, sorted by identifier.
    ///
    /// Not a snapshot across concurrent mutations, but every returned entry
    /// holds complete content.
    fn list(&self) -> StoreResult<Vec<Note>>;

    /// Check whether a note exists.
    ///
    /// Default implementation calls `read()` and discards the content.
    fn contains(&self, id: &NoteId) -> StoreResult<bool> {
        match self.read(id) {
            Ok(_) => Ok(true),
            Err(StoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
