use booking_api::{error::BookingError, proto::Book};
use tracing::{debug, instrument};

use super::repository::BookRepositoryArc;
use crate::error::AppResult;

#[derive(Debug, Clone)]
pub struct BookQueryManager {
    book_repository: BookRepositoryArc,
}

impl BookQueryManager {
    pub fn new(book_repository: BookRepositoryArc) -> Self {
        BookQueryManager { book_repository }
    }

    /// Reads one book by identity.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::NotFound`] if no book has this identity, or a
    /// storage error if the lookup fails.
    #[instrument(skip(self))]
    pub async fn query_single(&self, id: i64) -> AppResult<Book> {
        let record = self
            .book_repository
            .select(id)
            .await?
            .ok_or(BookingError::NotFound { id })?;
        debug!("book found");

        Ok(record.into())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use booking_api::error::BookingErrorReason;

    use super::*;
    use crate::{
        book::repository::{BookRecordInsert, memory::MemoryBookRepository},
        error::AppError,
    };

    #[tokio::test]
    async fn reads_stored_book() {
        let genres = vec!["poetry".to_string()];
        let record = BookRecordInsert {
            title: "Odes",
            author: "Keats",
            year: 1819,
            language: "en",
            genres: &genres,
            price: 1250,
            quantity: 3,
        }
        .to_owned_record(7);
        let manager =
            BookQueryManager::new(Arc::new(MemoryBookRepository::with_data(vec![record])));

        let book = manager.query_single(7).await.unwrap();
        assert_eq!(book.id, 7);
        assert_eq!(book.author, "Keats");
        assert_eq!(book.genres, genres);
        assert_eq!(book.price, 1250);
    }

    #[tokio::test]
    async fn missing_book() {
        let manager = BookQueryManager::new(Arc::new(MemoryBookRepository::new()));
        let err = manager.query_single(3).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Booking(ref err) if err.reason() == BookingErrorReason::NotFound
        ));
    }
}
