use booking_api::error::BookingError;
use thiserror::Error;
use tonic::{Code, Status, transport};
use tracing::error;

/// Application error types.
///
/// Represents all possible errors that can occur in the booking service.
#[derive(Debug, Error)]
pub enum AppError {
    /// Internal application error.
    ///
    /// Represents unexpected failures of the process itself, such as a
    /// listener that cannot bind or a configuration that cannot be read.
    #[error("internal error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),

    /// Booking error.
    ///
    /// One of the kinds every transport reports to clients.
    #[error(transparent)]
    Booking(#[from] BookingError),

    /// gRPC status error.
    ///
    /// Represents gRPC protocol-level errors.
    #[error("status error: {0}")]
    Status(#[from] Status),
}

/// Application result type.
///
/// Type alias for Result with `AppError` as the error type.
/// Used throughout the application for consistent error handling.
pub type AppResult<T> = Result<T, AppError>;

macro_rules! impl_internal_errors {
    ( $( $type:ty ),* $(,)? ) => {
        $(
        impl From<$type> for AppError {
            fn from(err: $type) -> Self {
                AppError::Internal(Box::new(err))
            }
        }
        )*
    };
}
impl_internal_errors!(
    config::ConfigError,
    transport::Error,
    std::io::Error,
    tonic_reflection::server::Error,
    tracing_subscriber::util::TryInitError,
);

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        crate::book::repository::postgres::classify_error(err).into()
    }
}

impl From<AppError> for Status {
    /// Converts application errors to gRPC status codes.
    ///
    /// Maps internal errors to appropriate gRPC status codes for client responses.
    fn from(err: AppError) -> Self {
        match err {
            AppError::Booking(err) => err.into(),
            AppError::Status(status) => status,
            AppError::Internal(_) => {
                error!("internal service error: {}", err);
                Self::internal(Code::Internal.description())
            }
        }
    }
}
