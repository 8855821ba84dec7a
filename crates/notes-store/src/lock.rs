use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::id::NoteId;

/// Per-identifier exclusive locks.
///
/// Each identifier currently being mutated owns one entry. The entry is
/// dropped again once the last holder releases it, so the table only ever
/// contains identifiers with an in-flight or waiting mutation.
///
/// Poisoning is ignored: the locks guard `()`, so a panicking holder cannot
/// leave shared state half-updated.
#[derive(Default)]
pub struct LockTable {
    slots: Mutex<HashMap<NoteId, Arc<Mutex<()>>>>,
}

impl LockTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` while holding the exclusive lock for `id`.
    pub fn with_lock<T>(&self, id: &NoteId, f: impl FnOnce() -> T) -> T {
        // Declared first so it drops last, after the guard and the slot.
        let _release = SlotRelease { table: self, id };
        let slot = self.acquire_slot(id);
        let _guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
        f()
    }

    /// Number of identifiers with a live lock entry.
    pub fn len(&self) -> usize {
        self.table().len()
    }

    /// Returns `true` if no identifier currently holds an entry.
    pub fn is_empty(&self) -> bool {
        self.table().is_empty()
    }

    fn table(&self) -> MutexGuard<'_, HashMap<NoteId, Arc<Mutex<()>>>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn acquire_slot(&self, id: &NoteId) -> Arc<Mutex<()>> {
        Arc::clone(self.table().entry(id.clone()).or_default())
    }

    // New holders clone the Arc under the table lock, so a count of one here
    // means nobody else holds or is waiting on this slot.
    fn release_slot(&self, id: &NoteId) {
        let mut table = self.table();
        if table
            .get(id)
            .is_some_and(|slot| Arc::strong_count(slot) == 1)
        {
            table.remove(id);
        }
    }
}

/// Returns a slot to the table on scope exit, including during unwinding.
struct SlotRelease<'a> {
    table: &'a LockTable,
    id: &'a NoteId,
}

impl Drop for SlotRelease<'_> {
    fn drop(&mut self) {
        self.table.release_slot(self.id);
    }
}

impl std::fmt::Debug for LockTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockTable")
            .field("live_entries", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;
    use std::thread;
    use std::time::Duration;

    fn id(name: &str) -> NoteId {
        NoteId::parse(name).unwrap()
    }

    #[test]
    fn returns_closure_result() {
        let table = LockTable::new();
        assert_eq!(table.with_lock(&id("a"), || 42), 42);
    }

    #[test]
    fn entries_are_reclaimed_after_release() {
        let table = LockTable::new();
        table.with_lock(&id("a"), || {
            assert_eq!(table.len(), 1);
        });
        assert!(table.is_empty());
    }

    #[test]
    fn same_identifier_is_mutually_exclusive() {
        let table = Arc::new(LockTable::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let table = Arc::clone(&table);
                let inside = Arc::clone(&inside);
                let max_seen = Arc::clone(&max_seen);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    table.with_lock(&id("shared"), || {
                        let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                        max_seen.fetch_max(now, Ordering::SeqCst);
                        thread::sleep(Duration::from_millis(2));
                        inside.fetch_sub(1, Ordering::SeqCst);
                    });
                })
            })
            .collect();

        for h in handles {
            h.join().expect("thread should not panic");
        }
        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
        assert!(table.is_empty());
    }

    #[test]
    fn different_identifiers_do_not_block() {
        let table = LockTable::new();
        table.with_lock(&id("outer"), || {
            // Would deadlock if "inner" shared a slot with "outer".
            table.with_lock(&id("inner"), || {
                assert_eq!(table.len(), 2);
            });
        });
        assert!(table.is_empty());
    }

    #[test]
    fn survives_panicking_holder() {
        let table = Arc::new(LockTable::new());
        let t = Arc::clone(&table);
        let result = thread::spawn(move || {
            t.with_lock(&id("p"), || panic!("boom"));
        })
        .join();
        assert!(result.is_err());
        assert!(table.is_empty());
        assert_eq!(table.with_lock(&id("p"), || "ok"), "ok");
        assert!(table.is_empty());
    }
}
