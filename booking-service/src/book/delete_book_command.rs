use tracing::{debug, error, instrument};

use super::repository::BookRepositoryArc;
use crate::error::AppResult;

#[derive(Debug, Clone)]
pub struct DeleteBookCommand {
    book_repository: BookRepositoryArc,
}

impl DeleteBookCommand {
    pub fn new(book_repository: BookRepositoryArc) -> Self {
        Self { book_repository }
    }

    /// Deletes the book identified by `id`.
    ///
    /// Deleting a book that does not exist succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error only if the storage operation itself fails.
    #[instrument(skip(self))]
    pub async fn execute(&self, id: i64) -> AppResult<()> {
        let deleted = self
            .book_repository
            .delete(id)
            .await
            .inspect_err(|err| error!("failed to delete book: {err}"))?;
        debug!(deleted, "book deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::book::repository::{BookRecordInsert, BookRepository, memory::MemoryBookRepository};

    #[tokio::test]
    async fn delete_is_idempotent() {
        let repository = Arc::new(MemoryBookRepository::new());
        let id = repository
            .insert(BookRecordInsert {
                title: "t",
                author: "a",
                year: 1,
                language: "",
                genres: &[],
                price: 0,
                quantity: 0,
            })
            .await
            .unwrap();

        let command = DeleteBookCommand::new(repository.clone());
        command.execute(id).await.unwrap();
        assert!(repository.select(id).await.unwrap().is_none());

        command.execute(id).await.unwrap();
        command.execute(12345).await.unwrap();
    }
}
