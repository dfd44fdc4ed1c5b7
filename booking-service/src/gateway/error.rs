use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use booking_api::{error::BookingErrorReason, rpc};
use thiserror::Error;
use tonic::Code;
use tracing::{error, warn};

/// Failures of an HTTP request, before or after it reaches the handlers.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The JSON body does not describe the request message.
    #[error("invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    /// A path segment does not parse as its field type.
    #[error("invalid `{name}` path parameter: `{value}`")]
    InvalidPath { name: &'static str, value: String },

    #[error("invalid grpc-timeout header: `{0}`")]
    InvalidTimeout(String),

    /// The caller deadline expired before the handler finished.
    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// The handler failed.
    #[error("{}", .0.message())]
    Status(#[from] tonic::Status),
}

impl GatewayError {
    pub fn to_rpc_status(&self) -> rpc::Status {
        match self {
            Self::InvalidBody(_) | Self::InvalidTimeout(_) => BookingErrorReason::MalformedMessage
                .to_rpc_status(self.to_string(), BTreeMap::new()),
            Self::InvalidPath { name, value } => BookingErrorReason::MalformedMessage
                .to_rpc_status(
                    self.to_string(),
                    [((*name).to_string(), value.clone())].into(),
                ),
            Self::DeadlineExceeded => {
                rpc::Status::new(Code::DeadlineExceeded, self.to_string(), Vec::new())
            }
            Self::Status(status) => rpc::Status::from(status.clone()),
        }
    }
}

/// Maps a gRPC code onto the HTTP status the gateway answers with.
pub fn http_status(code: Code) -> StatusCode {
    match code {
        Code::Ok => StatusCode::OK,
        Code::InvalidArgument | Code::FailedPrecondition | Code::OutOfRange => {
            StatusCode::BAD_REQUEST
        }
        Code::Unauthenticated => StatusCode::UNAUTHORIZED,
        Code::PermissionDenied => StatusCode::FORBIDDEN,
        Code::NotFound => StatusCode::NOT_FOUND,
        Code::Aborted | Code::AlreadyExists => StatusCode::CONFLICT,
        Code::ResourceExhausted => StatusCode::TOO_MANY_REQUESTS,
        // Client closed request.
        Code::Cancelled => StatusCode::from_u16(499).unwrap_or(StatusCode::BAD_REQUEST),
        Code::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT,
        Code::Unimplemented => StatusCode::NOT_IMPLEMENTED,
        Code::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.to_rpc_status();
        let status_code = http_status(status.code());
        if status_code.is_server_error() {
            error!(status_code = %status_code.as_u16(), "request failed: {self}");
        } else {
            warn!(status_code = %status_code.as_u16(), "request rejected: {self}");
        }

        (status_code, Json(status.to_json())).into_response()
    }
}
