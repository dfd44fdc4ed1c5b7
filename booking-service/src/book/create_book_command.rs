use booking_api::proto::Book;
use tracing::{debug, error, instrument};

use super::repository::{BookRecordInsert, BookRepositoryArc};
use crate::error::AppResult;

#[derive(Debug, Clone)]
pub struct CreateBookCommand {
    book_repository: BookRepositoryArc,
}

#[derive(Debug)]
pub struct CreateBookCommandResult {
    pub book: Book,
}

impl CreateBookCommand {
    pub fn new(book_repository: BookRepositoryArc) -> Self {
        Self { book_repository }
    }

    /// Stores `book` and returns it with the identity assigned by storage.
    ///
    /// Any `id` already set on the input is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails. The failure is not retried.
    #[instrument(skip_all, fields(title = %book.title))]
    pub async fn execute(&self, book: Book) -> AppResult<CreateBookCommandResult> {
        let id = self
            .book_repository
            .insert(BookRecordInsert::from(&book))
            .await
            .inspect_err(|err| error!("failed to create book: {err}"))?;
        debug!(id, "book created");

        Ok(CreateBookCommandResult {
            book: book.with_id(id),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::book::repository::{BookRepository, memory::MemoryBookRepository};

    #[tokio::test]
    async fn assigns_id_and_keeps_fields() {
        let repository = Arc::new(MemoryBookRepository::new());
        let command = CreateBookCommand::new(repository.clone());

        let book = Book {
            id: 99,
            title: "Dune".into(),
            genres: vec!["sci-fi".into(), "classic".into(), "sci-fi".into()],
            year: 1965,
            ..Default::default()
        };
        let result = command.execute(book.clone()).await.unwrap();

        assert_eq!(result.book.id, 1);
        assert_eq!(result.book, book.with_id(1));

        let stored = repository.select(1).await.unwrap().unwrap();
        assert_eq!(stored.genres, ["sci-fi", "classic", "sci-fi"]);
    }
}
