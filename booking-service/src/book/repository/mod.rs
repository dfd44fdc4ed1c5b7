use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;
use booking_api::proto::Book;

use crate::error::AppResult;

/// In-memory repository implementation.
pub mod memory;

/// `PostgreSQL` repository implementation.
pub mod postgres;

/// Book record for insertion operations.
///
/// Every field except the identity, which storage assigns.
#[derive(Debug, Clone, Copy)]
pub struct BookRecordInsert<'a> {
    pub title: &'a str,
    pub author: &'a str,
    pub year: i32,
    pub language: &'a str,
    /// Stored as an ordered list column.
    pub genres: &'a [String],
    pub price: i32,
    pub quantity: i32,
}

/// Complete book record with ownership.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct BookRecordOwned {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub language: String,
    pub genres: Vec<String>,
    pub price: i32,
    pub quantity: i32,
}

/// Book record for update operations.
///
/// Replaces every column of the row identified by `id`.
#[derive(Debug, Clone, Copy)]
pub struct BookRecordUpdate<'a> {
    pub id: i64,
    pub record: BookRecordInsert<'a>,
}

/// Repository trait for book data operations.
///
/// Each method is a single statement against storage. No method retries, and
/// none wraps a read-modify-write in a transaction: concurrent writers to the
/// same identity race and the last one wins.
#[async_trait]
pub trait BookRepository: Debug {
    /// Inserts a new book record.
    ///
    /// # Errors
    ///
    /// Returns an error if the insertion fails.
    ///
    /// # Returns
    ///
    /// Returns the identity assigned by storage.
    async fn insert(&self, record: BookRecordInsert<'_>) -> AppResult<i64>;

    /// Selects a book record by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the selection fails.
    ///
    /// # Returns
    ///
    /// Returns the book record if found, `None` otherwise.
    async fn select(&self, id: i64) -> AppResult<Option<BookRecordOwned>>;

    /// Replaces an existing book record.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    ///
    /// # Returns
    ///
    /// Returns `true` if a record was updated, `false` if not found.
    async fn update(&self, update: BookRecordUpdate<'_>) -> AppResult<bool>;

    /// Deletes a book record by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the deletion fails.
    ///
    /// # Returns
    ///
    /// Returns the number of deleted records.
    async fn delete(&self, id: i64) -> AppResult<u64>;
}

/// Thread-safe shared reference to a book repository.
pub type BookRepositoryArc = Arc<dyn BookRepository + Send + Sync>;

impl<'a> From<&'a Book> for BookRecordInsert<'a> {
    fn from(book: &'a Book) -> Self {
        Self {
            title: &book.title,
            author: &book.author,
            year: book.year,
            language: &book.language,
            genres: &book.genres,
            price: book.price,
            quantity: book.quantity,
        }
    }
}

impl BookRecordInsert<'_> {
    pub fn to_owned_record(&self, id: i64) -> BookRecordOwned {
        BookRecordOwned {
            id,
            title: self.title.to_string(),
            author: self.author.to_string(),
            year: self.year,
            language: self.language.to_string(),
            genres: self.genres.to_vec(),
            price: self.price,
            quantity: self.quantity,
        }
    }
}

impl From<BookRecordOwned> for Book {
    fn from(record: BookRecordOwned) -> Self {
        Self {
            id: record.id,
            title: record.title,
            author: record.author,
            year: record.year,
            language: record.language,
            genres: record.genres,
            price: record.price,
            quantity: record.quantity,
            ..Default::default()
        }
    }
}
