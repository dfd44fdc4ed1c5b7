use async_trait::async_trait;
use booking_api::error::BookingError;
use sqlx::{
    PgPool,
    error::{DatabaseError, ErrorKind},
    postgres::{PgConnectOptions, PgPoolOptions, PgSslMode},
};
use tracing::info;

use crate::{
    book::repository::{BookRecordInsert, BookRecordOwned, BookRecordUpdate, BookRepository},
    config::PostgresConfig,
    error::AppResult,
};

const CREATE_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS books (
    id BIGSERIAL PRIMARY KEY,
    title TEXT NOT NULL DEFAULT '',
    author TEXT NOT NULL DEFAULT '',
    year INTEGER NOT NULL DEFAULT 0,
    language TEXT NOT NULL DEFAULT '',
    genres TEXT[] NOT NULL DEFAULT '{}',
    price INTEGER NOT NULL DEFAULT 0,
    quantity INTEGER NOT NULL DEFAULT 0
)";

const INSERT_BOOK: &str = "INSERT INTO books (title, author, year, language, genres, price, \
     quantity) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id";

const SELECT_BOOK: &str = "SELECT id, title, author, year, language, genres, price, quantity \
     FROM books WHERE id = $1";

const UPDATE_BOOK: &str = "UPDATE books SET title = $1, author = $2, year = $3, language = $4, \
     genres = $5, price = $6, quantity = $7 WHERE id = $8 RETURNING id";

const DELETE_BOOK: &str = "DELETE FROM books WHERE id = $1";

/// `PostgreSQL` implementation of the book repository.
#[derive(Debug, Clone)]
pub struct PostgresBookRepository {
    pool: PgPool,
}

impl PostgresBookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection string is invalid or the server
    /// cannot be reached.
    pub async fn connect(config: &PostgresConfig) -> AppResult<Self> {
        let options = match &config.connection {
            Some(connection) => connection.parse::<PgConnectOptions>()?,
            None => PgConnectOptions::new()
                .host(&config.host)
                .port(config.port)
                .username(&config.user)
                .password(&config.password)
                .database(&config.name)
                .ssl_mode(PgSslMode::Disable),
        };

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;
        info!(
            host = %config.host,
            database = %config.name,
            "connected to postgres"
        );

        Ok(Self::new(pool))
    }

    /// Creates the `books` table if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    pub async fn ensure_schema(&self) -> AppResult<()> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl BookRepository for PostgresBookRepository {
    async fn insert(&self, record: BookRecordInsert<'_>) -> AppResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(INSERT_BOOK)
            .bind(record.title)
            .bind(record.author)
            .bind(record.year)
            .bind(record.language)
            .bind(record.genres)
            .bind(record.price)
            .bind(record.quantity)
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    async fn select(&self, id: i64) -> AppResult<Option<BookRecordOwned>> {
        let record = sqlx::query_as::<_, BookRecordOwned>(SELECT_BOOK)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    async fn update(&self, update: BookRecordUpdate<'_>) -> AppResult<bool> {
        let record = update.record;
        let updated = sqlx::query_scalar::<_, i64>(UPDATE_BOOK)
            .bind(record.title)
            .bind(record.author)
            .bind(record.year)
            .bind(record.language)
            .bind(record.genres)
            .bind(record.price)
            .bind(record.quantity)
            .bind(update.id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(updated.is_some())
    }

    async fn delete(&self, id: i64) -> AppResult<u64> {
        let result = sqlx::query(DELETE_BOOK)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

/// Maps a storage failure onto the booking error taxonomy.
///
/// Rejected writes (constraint and data exceptions, values that cannot be
/// encoded or decoded) are constraint violations. Everything else is treated
/// as the storage being unavailable.
pub fn classify_error(err: sqlx::Error) -> BookingError {
    let rejected = match &err {
        sqlx::Error::Database(db) => is_rejected_write(db.as_ref()),
        sqlx::Error::Encode(_)
        | sqlx::Error::Decode(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. } => true,
        _ => false,
    };
    if rejected {
        BookingError::constraint_violation(err)
    } else {
        BookingError::storage_unavailable(err)
    }
}

fn is_rejected_write(err: &dyn DatabaseError) -> bool {
    if !matches!(err.kind(), ErrorKind::Other) {
        return true;
    }
    // SQLSTATE class 22 is data exception, 23 integrity constraint violation.
    err.code()
        .is_some_and(|code| code.starts_with("22") || code.starts_with("23"))
}
