//! Field and method tables of the `booking` package.
//!
//! Tags listed here are permanent. A field may be added under a new tag but
//! an existing tag is never renumbered or reused.

use prost::encoding::WireType;
use prost_types::field_descriptor_proto::{Label, Type};

use crate::proto::{
    Book, CreateBookRequest, DeleteBookRequest, DeleteBookResponse, ReadBookRequest,
    UpdateBookRequest,
};

pub mod descriptor;

/// Scalar or message type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Int64,
    Int32,
    Bool,
    String,
    /// Embedded message, by fully-qualified type name.
    Message(&'static str),
}

/// Cardinality of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLabel {
    Singular,
    Repeated,
}

/// A single field of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSchema {
    pub tag: u32,
    pub name: &'static str,
    pub json_name: &'static str,
    pub kind: FieldKind,
    pub label: FieldLabel,
}

impl FieldKind {
    /// Wire type used for every occurrence of a field of this kind.
    pub const fn wire_type(self) -> WireType {
        match self {
            Self::Int64 | Self::Int32 | Self::Bool => WireType::Varint,
            Self::String | Self::Message(_) => WireType::LengthDelimited,
        }
    }

    pub const fn descriptor_type(self) -> Type {
        match self {
            Self::Int64 => Type::Int64,
            Self::Int32 => Type::Int32,
            Self::Bool => Type::Bool,
            Self::String => Type::String,
            Self::Message(_) => Type::Message,
        }
    }
}

impl FieldLabel {
    pub const fn descriptor_label(self) -> Label {
        match self {
            Self::Singular => Label::Optional,
            Self::Repeated => Label::Repeated,
        }
    }
}

impl FieldSchema {
    pub const fn singular(
        tag: u32,
        name: &'static str,
        json_name: &'static str,
        kind: FieldKind,
    ) -> Self {
        Self {
            tag,
            name,
            json_name,
            kind,
            label: FieldLabel::Singular,
        }
    }

    pub const fn repeated(
        tag: u32,
        name: &'static str,
        json_name: &'static str,
        kind: FieldKind,
    ) -> Self {
        Self {
            tag,
            name,
            json_name,
            kind,
            label: FieldLabel::Repeated,
        }
    }

    pub const fn wire_type(&self) -> WireType {
        self.kind.wire_type()
    }
}

/// Static description of a message type.
pub trait MessageSchema: prost::Name {
    /// Fields in declaration order.
    const FIELDS: &'static [FieldSchema];

    /// Looks up a field by tag.
    fn field(tag: u32) -> Option<&'static FieldSchema> {
        Self::FIELDS.iter().find(|field| field.tag == tag)
    }

    /// Looks up a field by its JSON name.
    fn field_by_json_name(json_name: &str) -> Option<&'static FieldSchema> {
        Self::FIELDS
            .iter()
            .find(|field| field.json_name == json_name)
    }
}

const BOOK_TYPE_NAME: &str = ".booking.Book";

impl Book {
    pub const ID_TAG: u32 = 1;
    pub const TITLE_TAG: u32 = 2;
    pub const AUTHOR_TAG: u32 = 3;
    pub const YEAR_TAG: u32 = 4;
    pub const LANGUAGE_TAG: u32 = 5;
    pub const GENRES_TAG: u32 = 6;
    pub const PRICE_TAG: u32 = 7;
    pub const QUANTITY_TAG: u32 = 8;
}

impl MessageSchema for Book {
    const FIELDS: &'static [FieldSchema] = &[
        FieldSchema::singular(Self::ID_TAG, "id", "id", FieldKind::Int64),
        FieldSchema::singular(Self::TITLE_TAG, "title", "title", FieldKind::String),
        FieldSchema::singular(Self::AUTHOR_TAG, "author", "author", FieldKind::String),
        FieldSchema::singular(Self::YEAR_TAG, "year", "year", FieldKind::Int32),
        FieldSchema::singular(Self::LANGUAGE_TAG, "language", "language", FieldKind::String),
        FieldSchema::repeated(Self::GENRES_TAG, "genres", "genres", FieldKind::String),
        FieldSchema::singular(Self::PRICE_TAG, "price", "price", FieldKind::Int32),
        FieldSchema::singular(Self::QUANTITY_TAG, "quantity", "quantity", FieldKind::Int32),
    ];
}

impl CreateBookRequest {
    pub const BOOK_TAG: u32 = 1;
}

impl MessageSchema for CreateBookRequest {
    const FIELDS: &'static [FieldSchema] = &[FieldSchema::singular(
        Self::BOOK_TAG,
        "book",
        "book",
        FieldKind::Message(BOOK_TYPE_NAME),
    )];
}

impl ReadBookRequest {
    pub const ID_TAG: u32 = 1;
}

impl MessageSchema for ReadBookRequest {
    const FIELDS: &'static [FieldSchema] = &[FieldSchema::singular(
        Self::ID_TAG,
        "id",
        "id",
        FieldKind::Int64,
    )];
}

impl UpdateBookRequest {
    pub const ID_TAG: u32 = 1;
    pub const BOOK_TAG: u32 = 2;
}

impl MessageSchema for UpdateBookRequest {
    const FIELDS: &'static [FieldSchema] = &[
        FieldSchema::singular(Self::ID_TAG, "id", "id", FieldKind::Int64),
        FieldSchema::singular(
            Self::BOOK_TAG,
            "book",
            "book",
            FieldKind::Message(BOOK_TYPE_NAME),
        ),
    ];
}

impl DeleteBookRequest {
    pub const ID_TAG: u32 = 1;
}

impl MessageSchema for DeleteBookRequest {
    const FIELDS: &'static [FieldSchema] = &[FieldSchema::singular(
        Self::ID_TAG,
        "id",
        "id",
        FieldKind::Int64,
    )];
}

impl DeleteBookResponse {
    pub const SUCCESS_TAG: u32 = 1;
}

impl MessageSchema for DeleteBookResponse {
    const FIELDS: &'static [FieldSchema] = &[FieldSchema::singular(
        Self::SUCCESS_TAG,
        "success",
        "success",
        FieldKind::Bool,
    )];
}

/// HTTP verb of a transcoding rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Delete,
}

/// HTTP binding of an RPC method, in `google.api.http` terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpRule {
    pub verb: HttpVerb,
    /// Path template; `{field}` segments bind request fields.
    pub path: &'static str,
    /// `Some("*")` when the whole request is read from the body.
    pub body: Option<&'static str>,
}

/// A unary method of `BookingService`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodSchema {
    pub name: &'static str,
    pub input_type: &'static str,
    pub output_type: &'static str,
    pub http: HttpRule,
}

impl MethodSchema {
    /// gRPC request path, e.g. `/booking.BookingService/CreateBook`.
    pub fn grpc_path(&self) -> String {
        format!("/{}/{}", BookingServiceSchema::FULL_NAME, self.name)
    }
}

/// The `booking.BookingService` contract.
pub struct BookingServiceSchema;

impl BookingServiceSchema {
    pub const NAME: &'static str = "BookingService";
    pub const FULL_NAME: &'static str = "booking.BookingService";

    pub const CREATE_BOOK: MethodSchema = MethodSchema {
        name: "CreateBook",
        input_type: ".booking.CreateBookRequest",
        output_type: BOOK_TYPE_NAME,
        http: HttpRule {
            verb: HttpVerb::Post,
            path: "/books",
            body: Some("*"),
        },
    };

    pub const READ_BOOK: MethodSchema = MethodSchema {
        name: "ReadBook",
        input_type: ".booking.ReadBookRequest",
        output_type: BOOK_TYPE_NAME,
        http: HttpRule {
            verb: HttpVerb::Get,
            path: "/books/{id}",
            body: None,
        },
    };

    pub const UPDATE_BOOK: MethodSchema = MethodSchema {
        name: "UpdateBook",
        input_type: ".booking.UpdateBookRequest",
        output_type: BOOK_TYPE_NAME,
        http: HttpRule {
            verb: HttpVerb::Put,
            path: "/books/{id}",
            body: Some("*"),
        },
    };

    pub const DELETE_BOOK: MethodSchema = MethodSchema {
        name: "DeleteBook",
        input_type: ".booking.DeleteBookRequest",
        output_type: ".booking.DeleteBookResponse",
        http: HttpRule {
            verb: HttpVerb::Delete,
            path: "/books/{id}",
            body: None,
        },
    };

    pub const METHODS: &'static [MethodSchema] = &[
        Self::CREATE_BOOK,
        Self::READ_BOOK,
        Self::UPDATE_BOOK,
        Self::DELETE_BOOK,
    ];
}
