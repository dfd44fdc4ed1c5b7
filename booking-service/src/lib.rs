//! Booking catalog service.
//!
//! Implements `booking.BookingService` over a book repository and exposes it
//! on two listeners: the gRPC server and an HTTP/JSON transcoding gateway.

pub mod book;
pub mod config;
pub mod error;
pub mod gateway;
pub mod tracing;

use std::sync::Arc;

use book::{
    adapter::BookAdapter,
    create_book_command::CreateBookCommand,
    delete_book_command::DeleteBookCommand,
    query_manager::BookQueryManager,
    repository::{
        BookRepositoryArc, memory::MemoryBookRepository, postgres::PostgresBookRepository,
    },
    update_book_command::UpdateBookCommand,
};
use config::DatabaseConfig;
use error::AppResult;

pub fn create_book_service(book_repository: BookRepositoryArc) -> BookAdapter {
    let book_query_manager = BookQueryManager::new(Arc::clone(&book_repository));
    let create_book_command = CreateBookCommand::new(Arc::clone(&book_repository));
    let update_book_command = UpdateBookCommand::new(Arc::clone(&book_repository));
    let delete_book_command = DeleteBookCommand::new(book_repository);

    BookAdapter::new(
        book_query_manager,
        create_book_command,
        update_book_command,
        delete_book_command,
    )
}

/// Opens the repository selected by `config`.
///
/// # Errors
///
/// Returns an error if the database cannot be reached or its schema cannot be
/// created.
pub async fn create_book_repository(config: &DatabaseConfig) -> AppResult<BookRepositoryArc> {
    let book_repository: BookRepositoryArc = match config {
        DatabaseConfig::Memory => Arc::new(MemoryBookRepository::new()),
        DatabaseConfig::Postgres(postgres_config) => {
            let repository = PostgresBookRepository::connect(postgres_config).await?;
            repository.ensure_schema().await?;
            Arc::new(repository)
        }
    };
    Ok(book_repository)
}
