//! `google.rpc` status messages.
//!
//! A [`Status`] travels in the `grpc-status-details-bin` trailer and is also
//! the JSON error body of the HTTP gateway.

use std::collections::BTreeMap;

use prost::{Message, Name};
use prost_types::Any;
use serde_json::{Value as JsonValue, json};

/// The `google.rpc.Status` message.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Status {
    #[prost(int32, tag = "1")]
    pub code: i32,
    #[prost(string, tag = "2")]
    pub message: String,
    #[prost(message, repeated, tag = "3")]
    pub details: Vec<Any>,
}

/// The `google.rpc.ErrorInfo` message.
#[derive(Clone, PartialEq, Eq, prost::Message)]
pub struct ErrorInfo {
    #[prost(string, tag = "1")]
    pub reason: String,
    #[prost(string, tag = "2")]
    pub domain: String,
    #[prost(btree_map = "string, string", tag = "3")]
    pub metadata: BTreeMap<String, String>,
}

const GOOGLE_RPC_PACKAGE: &str = "google.rpc";
const TYPE_URL_PREFIX: &str = "type.googleapis.com/";

impl Name for Status {
    const NAME: &'static str = "Status";
    const PACKAGE: &'static str = GOOGLE_RPC_PACKAGE;

    fn type_url() -> String {
        format!("{TYPE_URL_PREFIX}{}", Self::full_name())
    }
}

impl Name for ErrorInfo {
    const NAME: &'static str = "ErrorInfo";
    const PACKAGE: &'static str = GOOGLE_RPC_PACKAGE;

    fn type_url() -> String {
        format!("{TYPE_URL_PREFIX}{}", Self::full_name())
    }
}

impl Status {
    pub fn new(code: tonic::Code, message: String, details: Vec<Any>) -> Self {
        Self {
            code: code as i32,
            message,
            details,
        }
    }

    pub fn code(&self) -> tonic::Code {
        tonic::Code::from(self.code)
    }

    /// Returns the first `ErrorInfo` detail, if any.
    pub fn error_info(&self) -> Option<ErrorInfo> {
        self.details
            .iter()
            .find_map(|detail| detail.to_msg::<ErrorInfo>().ok())
    }

    /// Renders the status in the proto3 JSON form.
    ///
    /// Details of types other than `ErrorInfo` are rendered with their type
    /// URL only.
    pub fn to_json(&self) -> JsonValue {
        let details: Vec<_> = self
            .details
            .iter()
            .map(|detail| match detail.to_msg::<ErrorInfo>() {
                Ok(info) => json!({
                    "@type": detail.type_url,
                    "reason": info.reason,
                    "domain": info.domain,
                    "metadata": info.metadata,
                }),
                Err(_) => json!({ "@type": detail.type_url }),
            })
            .collect();
        json!({
            "code": self.code,
            "message": self.message,
            "details": details,
        })
    }
}

impl From<tonic::Status> for Status {
    fn from(status: tonic::Status) -> Self {
        let details = if status.details().is_empty() {
            Vec::new()
        } else {
            Self::decode(status.details())
                .map(|decoded| decoded.details)
                .unwrap_or_default()
        };
        Self {
            code: status.code() as i32,
            message: status.message().into(),
            details,
        }
    }
}

impl From<Status> for tonic::Status {
    fn from(status: Status) -> Self {
        let code = status.code();
        let message = status.message.clone();
        Self::with_details(code, message, status.encode_to_vec().into())
    }
}
