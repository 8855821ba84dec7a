use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::id::NoteId;
use crate::note::{validate_content, Note};
use crate::traits::NoteStore;

/// In-memory, BTreeMap-based note store.
///
/// Intended for tests and embedding. A single `RwLock` serializes all
/// mutations, which trivially satisfies per-identifier exclusion.
pub struct InMemoryNoteStore {
    notes: RwLock<BTreeMap<NoteId, String>>,
}

impl InMemoryNoteStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            notes: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of notes currently stored.
    pub fn len(&self) -> usize {
        self.notes.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.notes.read().expect("lock poisoned").is_empty()
    }
}

impl Default for InMemoryNoteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteStore for InMemoryNoteStore {
    fn create(&self, id: &NoteId, content: &str) -> StoreResult<Note> {
        validate_content(content)?;
        let mut map = self.notes.write().expect("lock poisoned");
        if map.contains_key(id) {
            return Err(StoreError::AlreadyExists {
                name: id.to_string(),
            });
        }
        map.insert(id.clone(), content.to_string());
        Ok(Note::new(id.clone(), content))
    }

    fn read(&self, id: &NoteId) -> StoreResult<Note> {
        let map = self.notes.read().expect("lock poisoned");
        map.get(id)
            .map(|content| Note::new(id.clone(), content.as_str()))
            .ok_or_else(|| StoreError::NotFound {
                name: id.to_string(),
            })
    }

    fn update(&self, id: &NoteId, content: &str) -> StoreResult<Note> {
        let mut map = self.notes.write().expect("lock poisoned");
        match map.get_mut(id) {
            Some(existing) => {
                validate_content(content)?;
                *existing = content.to_string();
                Ok(Note::new(id.clone(), content))
            }
            None => Err(StoreError::NotFound {
                name: id.to_string(),
            }),
        }
    }

    fn delete(&self, id: &NoteId) -> StoreResult<()> {
        let mut map = self.notes.write().expect("lock poisoned");
        map.remove(id).map(|_| ()).ok_or_else(|| StoreError::NotFound {
            name: id.to_string(),
        })
    }

    fn list(&self) -> StoreResult<Vec<Note>> {
        let map = self.notes.read().expect("lock poisoned");
        Ok(map
            .iter()
            .map(|(id, content)| Note::new(id.clone(), content.as_str()))
            .collect())
    }
}

impl std::fmt::Debug for InMemoryNoteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryNoteStore")
            .field("note_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Barrier};
    use std::thread;

    fn id(name: &str) -> NoteId {
        NoteId::parse(name).unwrap()
    }

    #[test]
    fn crud_cycle() {
        let store = InMemoryNoteStore::new();
        assert!(store.is_empty());

        store.create(&id("a"), "1").unwrap();
        assert_eq!(store.read(&id("a")).unwrap().content, "1");

        store.update(&id("a"), "2").unwrap();
        assert_eq!(store.read(&id("a")).unwrap().content, "2");

        store.delete(&id("a")).unwrap();
        assert!(matches!(store.read(&id("a")), Err(StoreError::NotFound { .. })));
        assert!(matches!(store.delete(&id("a")), Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn duplicate_create_keeps_original() {
        let store = InMemoryNoteStore::new();
        store.create(&id("d"), "c1").unwrap();
        assert!(matches!(
            store.create(&id("d"), "c2"),
            Err(StoreError::AlreadyExists { .. })
        ));
        assert_eq!(store.read(&id("d")).unwrap().content, "c1");
    }

    #[test]
    fn update_missing_is_not_found() {
        let store = InMemoryNoteStore::new();
        assert!(matches!(
            store.update(&id("m"), "x"),
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            store.update(&id("m"), "   "),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn rejects_blank_content() {
        let store = InMemoryNoteStore::new();
        assert!(matches!(
            store.create(&id("b"), "\n"),
            Err(StoreError::InvalidContent { .. })
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn list_is_sorted() {
        let store = InMemoryNoteStore::new();
        store.create(&id("b"), "2").unwrap();
        store.create(&id("a"), "1").unwrap();
        let names: Vec<_> = store
            .list()
            .unwrap()
            .into_iter()
            .map(|n| n.id.to_string())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn concurrent_creates_have_exactly_one_winner() {
        let store = Arc::new(InMemoryNoteStore::new());
        let barrier = Arc::new(Barrier::new(8));
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    store.create(&id("race"), &format!("v{i}")).is_ok()
                })
            })
            .collect();
        let wins = handles
            .into_iter()
            .map(|h| h.join().expect("thread should not panic"))
            .filter(|won| *won)
            .count();
        assert_eq!(wins, 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn debug_format() {
        let store = InMemoryNoteStore::new();
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemoryNoteStore"));
        assert!(debug.contains("note_count"));
    }
}
