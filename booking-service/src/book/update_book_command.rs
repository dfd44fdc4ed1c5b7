use booking_api::{error::BookingError, proto::Book};
use tracing::{debug, error, instrument};

use super::repository::{BookRecordInsert, BookRecordUpdate, BookRepositoryArc};
use crate::error::AppResult;

#[derive(Debug, Clone)]
pub struct UpdateBookCommand {
    book_repository: BookRepositoryArc,
}

#[derive(Debug)]
pub struct UpdateBookCommandInput {
    pub id: i64,
    pub book: Book,
}

#[derive(Debug)]
pub struct UpdateBookCommandResult {
    pub book: Book,
}

impl UpdateBookCommand {
    pub fn new(book_repository: BookRepositoryArc) -> Self {
        Self { book_repository }
    }

    /// Replaces every field of the book identified by `input.id`.
    ///
    /// Fields left at their zero value in `input.book` are stored as zero.
    /// The returned book is the input with `id` set to `input.id`.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::NotFound`] if no book has this identity, or a
    /// storage error if the update fails.
    #[instrument(skip_all, fields(id = input.id))]
    pub async fn execute(
        &self,
        input: UpdateBookCommandInput,
    ) -> AppResult<UpdateBookCommandResult> {
        let UpdateBookCommandInput { id, book } = input;

        let updated = self
            .book_repository
            .update(BookRecordUpdate {
                id,
                record: BookRecordInsert::from(&book),
            })
            .await
            .inspect_err(|err| error!("failed to update book: {err}"))?;

        if !updated {
            debug!("book not found");
            return Err(BookingError::NotFound { id }.into());
        }
        debug!("book updated");

        Ok(UpdateBookCommandResult {
            book: book.with_id(id),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use booking_api::error::BookingErrorReason;

    use super::*;
    use crate::{
        book::repository::{BookRepository, memory::MemoryBookRepository},
        error::AppError,
    };

    #[tokio::test]
    async fn replaces_whole_record() {
        let repository = Arc::new(MemoryBookRepository::new());
        let id = repository
            .insert(BookRecordInsert {
                title: "Old",
                author: "Someone",
                year: 1999,
                language: "en",
                genres: &["a".to_string()],
                price: 10,
                quantity: 2,
            })
            .await
            .unwrap();

        let command = UpdateBookCommand::new(repository.clone());
        let result = command
            .execute(UpdateBookCommandInput {
                id,
                book: Book {
                    id: 500,
                    title: "New".into(),
                    ..Default::default()
                },
            })
            .await
            .unwrap();
        assert_eq!(result.book.id, id);
        assert_eq!(result.book.title, "New");

        let stored = repository.select(id).await.unwrap().unwrap();
        assert_eq!(stored.title, "New");
        assert!(stored.author.is_empty());
        assert!(stored.genres.is_empty());
        assert_eq!((stored.year, stored.price, stored.quantity), (0, 0, 0));
    }

    #[tokio::test]
    async fn missing_book() {
        let command = UpdateBookCommand::new(Arc::new(MemoryBookRepository::new()));
        let err = command
            .execute(UpdateBookCommandInput {
                id: 8,
                book: Book::default(),
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Booking(ref err) if err.reason() == BookingErrorReason::NotFound
        ));
    }
}
