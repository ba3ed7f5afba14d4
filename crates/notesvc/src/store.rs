//! In-memory note store.
//!
//! The store is an ordered collection of notes addressed by position. It is
//! created empty, lives as long as the service that owns it, and loses every
//! note when dropped.

use tokio::sync::RwLock;
use tracing::debug;

use crate::error::Result;
use crate::note::{Note, NoteId};

/// Ordered, position-addressed collection of notes.
///
/// Every operation takes the lock once and holds it for its whole
/// validate-then-read or validate-then-mutate sequence, so an id checked
/// against the current length can never go stale before it is used.
///
/// Ids are positions: deleting a note shifts every later note down by one.
#[derive(Debug, Default)]
pub struct NoteStore {
    notes: RwLock<Vec<Note>>,
}

impl NoteStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a note and return the id it was stored under.
    pub async fn create(&self, note: Note) -> NoteId {
        let mut notes = self.notes.write().await;
        notes.push(note);
        let id = NoteId::from(notes.len() - 1);
        debug!(%id, len = notes.len(), "Created note");
        id
    }

    /// Return every note in storage order.
    pub async fn list(&self) -> Vec<Note> {
        self.notes.read().await.clone()
    }

    /// Return the note at `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNoteId`](crate::Error::InvalidNoteId) if `id`
    /// is outside `[0, len)`.
    pub async fn get(&self, id: NoteId) -> Result<Note> {
        let notes = self.notes.read().await;
        let index = id.index(notes.len())?;
        Ok(notes[index].clone())
    }

    /// Replace the note at `id` with `note`.
    ///
    /// Nothing of the previous note survives the update.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNoteId`](crate::Error::InvalidNoteId) if `id`
    /// is outside `[0, len)`.
    pub async fn update(&self, id: NoteId, note: Note) -> Result<()> {
        let mut notes = self.notes.write().await;
        let index = id.index(notes.len())?;
        notes[index] = note;
        debug!(%id, "Updated note");
        Ok(())
    }

    /// Remove the note at `id`, shifting later notes down by one position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNoteId`](crate::Error::InvalidNoteId) if `id`
    /// is outside `[0, len)`.
    pub async fn delete(&self, id: NoteId) -> Result<Note> {
        let mut notes = self.notes.write().await;
        let index = id.index(notes.len())?;
        let removed = notes.remove(index);
        debug!(%id, len = notes.len(), "Deleted note");
        Ok(removed)
    }

    /// Number of stored notes.
    pub async fn len(&self) -> usize {
        self.notes.read().await.len()
    }

    /// Whether the store holds no notes.
    pub async fn is_empty(&self) -> bool {
        self.notes.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::Error;
    use crate::logging::init_test_logging;

    async fn store_with(titles: &[&str]) -> NoteStore {
        init_test_logging();
        let store = NoteStore::new();
        for (i, title) in titles.iter().enumerate() {
            store.create(Note::new(*title, i.to_string())).await;
        }
        store
    }

    #[tokio::test]
    async fn test_new_store_is_empty() {
        init_test_logging();
        let store = NoteStore::new();

        assert!(store.is_empty().await);
        assert!(store.list().await.is_empty());
        assert!(matches!(store.get(NoteId(0)).await, Err(Error::InvalidNoteId)));
    }

    #[tokio::test]
    async fn test_create_appends_to_end() {
        let store = store_with(&["A", "B"]).await;
        let before = store.len().await;

        let id = store.create(Note::new("C", "c")).await;

        let notes = store.list().await;
        assert_eq!(notes.len(), before + 1);
        assert_eq!(notes.last(), Some(&Note::new("C", "c")));
        assert_eq!(id, NoteId(2));
    }

    #[tokio::test]
    async fn test_create_accepts_empty_strings() {
        let store = NoteStore::new();
        store.create(Note::new("", "")).await;

        assert_eq!(store.get(NoteId(0)).await.unwrap(), Note::default());
    }

    #[tokio::test]
    async fn test_get_valid_and_invalid_ids() {
        let store = store_with(&["A", "B", "C"]).await;

        for i in 0..3 {
            assert!(store.get(NoteId(i)).await.is_ok());
        }
        assert!(matches!(store.get(NoteId(3)).await, Err(Error::InvalidNoteId)));
        assert!(matches!(store.get(NoteId(-1)).await, Err(Error::InvalidNoteId)));
    }

    #[tokio::test]
    async fn test_update_replaces_whole_note() {
        let store = store_with(&["A", "B"]).await;

        store
            .update(NoteId(1), Note::new("B2", String::new()))
            .await
            .unwrap();

        assert_eq!(store.get(NoteId(1)).await.unwrap(), Note::new("B2", ""));
        assert_eq!(store.get(NoteId(0)).await.unwrap(), Note::new("A", "0"));
    }

    #[tokio::test]
    async fn test_update_out_of_range_leaves_store_untouched() {
        let store = store_with(&["A"]).await;

        let result = store.update(NoteId(1), Note::new("X", "x")).await;

        assert!(matches!(result, Err(Error::InvalidNoteId)));
        assert_eq!(store.list().await, vec![Note::new("A", "0")]);
    }

    #[tokio::test]
    async fn test_delete_shifts_later_ids() {
        let store = store_with(&["A", "B", "C"]).await;

        let removed = store.delete(NoteId(0)).await.unwrap();

        assert_eq!(removed.title, "A");
        assert_eq!(store.len().await, 2);
        assert_eq!(store.get(NoteId(0)).await.unwrap().title, "B");
        assert_eq!(store.get(NoteId(1)).await.unwrap().title, "C");
    }

    #[tokio::test]
    async fn test_delete_same_position_twice_removes_different_notes() {
        let store = store_with(&["A", "B", "C"]).await;

        assert_eq!(store.delete(NoteId(1)).await.unwrap().title, "B");
        assert_eq!(store.delete(NoteId(1)).await.unwrap().title, "C");
        assert!(matches!(store.delete(NoteId(1)).await, Err(Error::InvalidNoteId)));
        assert_eq!(store.list().await, vec![Note::new("A", "0")]);
    }

    #[tokio::test]
    async fn test_list_is_repeatable() {
        let store = store_with(&["A", "B"]).await;

        assert_eq!(store.list().await, store.list().await);
    }

    #[tokio::test]
    async fn test_create_delete_scenario() {
        let store = NoteStore::new();
        store.create(Note::new("A", "1")).await;
        store.create(Note::new("B", "2")).await;
        assert_eq!(
            store.list().await,
            vec![Note::new("A", "1"), Note::new("B", "2")]
        );

        store.delete(NoteId(0)).await.unwrap();

        assert_eq!(store.list().await, vec![Note::new("B", "2")]);
        assert_eq!(store.get(NoteId(0)).await.unwrap(), Note::new("B", "2"));
        assert!(matches!(store.get(NoteId(1)).await, Err(Error::InvalidNoteId)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_are_not_lost() {
        let store = Arc::new(NoteStore::new());

        let handles: Vec<_> = (0..64)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.create(Note::new(i.to_string(), "")).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.len().await, 64);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_deletes_never_overrun() {
        let store = Arc::new(store_with(&["A", "B", "C", "D"]).await);

        // Eight deleters race for position 0; exactly four can succeed.
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.delete(NoteId(0)).await.is_ok() })
            })
            .collect();
        let mut succeeded = 0;
        for handle in handles {
            if handle.await.unwrap() {
                succeeded += 1;
            }
        }

        assert_eq!(succeeded, 4);
        assert!(store.is_empty().await);
    }
}
