//! Book catalog module.
//!
//! Provides the four catalog operations:
//! - gRPC adapter implementing `BookingService`
//! - Command handlers for create, update, and delete operations
//! - Query manager for reading a single book
//! - Repository abstraction for data persistence

/// gRPC service adapter for books.
pub mod adapter;

/// Book creation command handler.
pub mod create_book_command;

/// Book deletion command handler.
pub mod delete_book_command;

/// Book query manager for data retrieval.
pub mod query_manager;

/// Book repository abstraction and implementations.
pub mod repository;

/// Book update command handler.
pub mod update_book_command;
