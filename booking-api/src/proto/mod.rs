//! Messages of the `booking` protobuf package.
//!
//! The wire encoding of these types lives in [`crate::codec`] and their tag
//! assignments in [`crate::schema`]. The JSON projection follows the proto3
//! JSON mapping: lowerCamelCase names, `int64` as decimal strings, every field
//! emitted, unknown members ignored. On input, `int32` values may also be
//! strings and `null` reads as the default value.

use serde::{Deserialize, Serialize};

use crate::codec::UnknownFields;

pub mod json;

/// Protobuf package of every message in this module.
pub const PACKAGE: &str = "booking";

#[allow(
    unused_qualifications,
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links
)]
mod service {
    include!(concat!(env!("OUT_DIR"), "/booking.BookingService.rs"));
}

#[cfg(feature = "client")]
pub use service::booking_service_client;
#[cfg(feature = "server")]
pub use service::booking_service_server;

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Book {
    /// Server-assigned identity, zero until created.
    #[serde(with = "json::int64")]
    pub id: i64,
    #[serde(deserialize_with = "json::null_default")]
    pub title: String,
    #[serde(deserialize_with = "json::null_default")]
    pub author: String,
    #[serde(with = "json::int32")]
    pub year: i32,
    #[serde(deserialize_with = "json::null_default")]
    pub language: String,
    /// Ordered, duplicates allowed.
    #[serde(deserialize_with = "json::null_default")]
    pub genres: Vec<String>,
    /// Minor currency units.
    #[serde(with = "json::int32")]
    pub price: i32,
    #[serde(with = "json::int32")]
    pub quantity: i32,
    #[serde(skip)]
    pub unknown_fields: UnknownFields,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateBookRequest {
    pub book: Option<Book>,
    #[serde(skip)]
    pub unknown_fields: UnknownFields,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReadBookRequest {
    #[serde(with = "json::int64")]
    pub id: i64,
    #[serde(skip)]
    pub unknown_fields: UnknownFields,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateBookRequest {
    #[serde(with = "json::int64")]
    pub id: i64,
    pub book: Option<Book>,
    #[serde(skip)]
    pub unknown_fields: UnknownFields,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeleteBookRequest {
    #[serde(with = "json::int64")]
    pub id: i64,
    #[serde(skip)]
    pub unknown_fields: UnknownFields,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeleteBookResponse {
    #[serde(deserialize_with = "json::null_default")]
    pub success: bool,
    #[serde(skip)]
    pub unknown_fields: UnknownFields,
}

macro_rules! impl_message_names {
    ( $( $type:ident ),* $(,)? ) => {
        $(
        impl prost::Name for $type {
            const NAME: &'static str = stringify!($type);
            const PACKAGE: &'static str = PACKAGE;
        }
        )*
    };
}
impl_message_names!(
    Book,
    CreateBookRequest,
    ReadBookRequest,
    UpdateBookRequest,
    DeleteBookRequest,
    DeleteBookResponse,
);

impl Book {
    /// Returns this book with `id` replaced.
    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }
}
