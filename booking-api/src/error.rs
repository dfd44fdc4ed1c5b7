//! Error taxonomy shared by every transport.
//!
//! Each [`BookingError`] maps onto a gRPC code and carries a stable
//! `ErrorInfo.reason`, so clients can recover the kind of failure whether they
//! speak the binary protocol or go through the HTTP gateway.

use std::{collections::BTreeMap, error::Error as StdError, fmt};

use prost_types::Any;
use thiserror::Error;
use tonic::Code;

use crate::{
    codec::CodecError,
    rpc::{ErrorInfo, Status},
};

/// Domain reported in `ErrorInfo.domain`.
pub const BOOKING_ERROR_DOMAIN: &str = "booking";

pub type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, Error)]
pub enum BookingError {
    /// The request could not be decoded from the wire.
    #[error(transparent)]
    MalformedMessage(CodecError),

    /// No book exists with the given identity.
    #[error("book `{id}` not found")]
    NotFound { id: i64 },

    /// Storage rejected the write.
    #[error("constraint violation: {0}")]
    ConstraintViolation(#[source] BoxError),

    /// Storage could not be reached or failed transiently.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[source] BoxError),
}

pub type BookingResult<T> = Result<T, BookingError>;

/// Stable identifiers of [`BookingError`] kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingErrorReason {
    MalformedMessage,
    NotFound,
    ConstraintViolation,
    StorageUnavailable,
}

impl BookingErrorReason {
    pub const fn as_str_name(self) -> &'static str {
        match self {
            Self::MalformedMessage => "MALFORMED_MESSAGE",
            Self::NotFound => "NOT_FOUND",
            Self::ConstraintViolation => "CONSTRAINT_VIOLATION",
            Self::StorageUnavailable => "STORAGE_UNAVAILABLE",
        }
    }

    pub fn from_str_name(value: &str) -> Option<Self> {
        match value {
            "MALFORMED_MESSAGE" => Some(Self::MalformedMessage),
            "NOT_FOUND" => Some(Self::NotFound),
            "CONSTRAINT_VIOLATION" => Some(Self::ConstraintViolation),
            "STORAGE_UNAVAILABLE" => Some(Self::StorageUnavailable),
            _ => None,
        }
    }

    pub const fn code(self) -> Code {
        match self {
            Self::MalformedMessage => Code::InvalidArgument,
            Self::NotFound => Code::NotFound,
            Self::ConstraintViolation => Code::Internal,
            Self::StorageUnavailable => Code::Unavailable,
        }
    }

    /// Builds a status of this kind with a single `ErrorInfo` detail.
    pub fn to_rpc_status(self, message: String, metadata: BTreeMap<String, String>) -> Status {
        let info = ErrorInfo {
            reason: self.as_str_name().into(),
            domain: BOOKING_ERROR_DOMAIN.into(),
            metadata,
        };
        // Encoding into a growable buffer cannot fail.
        let details = Any::from_msg(&info).into_iter().collect();
        Status::new(self.code(), message, details)
    }

    /// Extracts the reason from a status produced by this crate.
    pub fn from_status(status: &tonic::Status) -> Option<Self> {
        let info = Status::from(status.clone()).error_info()?;
        if info.domain != BOOKING_ERROR_DOMAIN {
            return None;
        }
        Self::from_str_name(&info.reason)
    }
}

impl fmt::Display for BookingErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str_name())
    }
}

impl BookingError {
    pub fn constraint_violation<E: Into<BoxError>>(err: E) -> Self {
        Self::ConstraintViolation(err.into())
    }

    pub fn storage_unavailable<E: Into<BoxError>>(err: E) -> Self {
        Self::StorageUnavailable(err.into())
    }

    pub const fn reason(&self) -> BookingErrorReason {
        match self {
            Self::MalformedMessage(_) => BookingErrorReason::MalformedMessage,
            Self::NotFound { .. } => BookingErrorReason::NotFound,
            Self::ConstraintViolation(_) => BookingErrorReason::ConstraintViolation,
            Self::StorageUnavailable(_) => BookingErrorReason::StorageUnavailable,
        }
    }

    pub const fn code(&self) -> Code {
        self.reason().code()
    }

    fn metadata(&self) -> BTreeMap<String, String> {
        match self {
            Self::NotFound { id } => [("id".to_string(), id.to_string())].into(),
            _ => BTreeMap::new(),
        }
    }

    pub fn to_rpc_status(&self) -> Status {
        self.reason().to_rpc_status(self.to_string(), self.metadata())
    }
}

impl From<CodecError> for BookingError {
    fn from(err: CodecError) -> Self {
        Self::MalformedMessage(err)
    }
}

impl From<BookingError> for tonic::Status {
    fn from(err: BookingError) -> Self {
        err.to_rpc_status().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes() {
        assert_eq!(BookingError::NotFound { id: 1 }.code(), Code::NotFound);
        assert_eq!(
            BookingError::constraint_violation("bad").code(),
            Code::Internal
        );
        assert_eq!(
            BookingError::storage_unavailable("down").code(),
            Code::Unavailable
        );
    }

    #[test]
    fn status_carries_reason() {
        let status = tonic::Status::from(BookingError::NotFound { id: 12 });
        assert_eq!(status.code(), Code::NotFound);
        assert_eq!(status.message(), "book `12` not found");
        assert_eq!(
            BookingErrorReason::from_status(&status),
            Some(BookingErrorReason::NotFound)
        );

        let info = Status::from(status).error_info().unwrap();
        assert_eq!(info.domain, "booking");
        assert_eq!(info.metadata.get("id").map(String::as_str), Some("12"));
    }

    #[test]
    fn foreign_status_has_no_reason() {
        let status = tonic::Status::internal("boom");
        assert_eq!(BookingErrorReason::from_status(&status), None);
    }

    #[test]
    fn reason_names() {
        for reason in [
            BookingErrorReason::MalformedMessage,
            BookingErrorReason::NotFound,
            BookingErrorReason::ConstraintViolation,
            BookingErrorReason::StorageUnavailable,
        ] {
            assert_eq!(
                BookingErrorReason::from_str_name(reason.as_str_name()),
                Some(reason)
            );
        }
    }
}
