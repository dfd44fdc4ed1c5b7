use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use booking_api::error::BookingError;
use tokio::sync::RwLock;

use crate::{
    book::repository::{BookRecordInsert, BookRecordOwned, BookRecordUpdate, BookRepository},
    error::AppResult,
};

/// In-memory implementation of the book repository.
///
/// Identities start at 1 and are never reused, like a `BIGSERIAL` column.
#[derive(Debug, Clone)]
pub struct MemoryBookRepository {
    state: Arc<RwLock<MemoryState>>,
}

#[derive(Debug)]
struct MemoryState {
    books: BTreeMap<i64, BookRecordOwned>,
    /// `None` once every identity has been handed out.
    next_id: Option<i64>,
}

impl Default for MemoryBookRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBookRepository {
    /// Creates a new empty memory book repository.
    pub fn new() -> Self {
        Self::with_data(Vec::new())
    }

    /// Creates a new memory book repository with initial data.
    ///
    /// # Arguments
    ///
    /// * `books` - Initial books to populate the repository with
    pub fn with_data(books: Vec<BookRecordOwned>) -> Self {
        let books: BTreeMap<_, _> = books.into_iter().map(|book| (book.id, book)).collect();
        let next_id = books.keys().next_back().map_or(Some(1), |id| id.checked_add(1));
        Self {
            state: Arc::new(RwLock::new(MemoryState { books, next_id })),
        }
    }

    pub async fn get_books(&self) -> Vec<BookRecordOwned> {
        self.state.read().await.books.values().cloned().collect()
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn insert(&self, record: BookRecordInsert<'_>) -> AppResult<i64> {
        let mut state = self.state.write().await;
        let id = state
            .next_id
            .ok_or_else(|| BookingError::storage_unavailable("book identities exhausted"))?;
        state.next_id = id.checked_add(1);
        state.books.insert(id, record.to_owned_record(id));
        Ok(id)
    }

    async fn select(&self, id: i64) -> AppResult<Option<BookRecordOwned>> {
        Ok(self.state.read().await.books.get(&id).cloned())
    }

    async fn update(&self, update: BookRecordUpdate<'_>) -> AppResult<bool> {
        let mut state = self.state.write().await;
        if let Some(book) = state.books.get_mut(&update.id) {
            *book = update.record.to_owned_record(update.id);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn delete(&self, id: i64) -> AppResult<u64> {
        let removed = self.state.write().await.books.remove(&id);
        Ok(u64::from(removed.is_some()))
    }
}
