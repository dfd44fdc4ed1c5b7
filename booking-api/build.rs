//! Build script for the booking-api crate.
//!
//! The messages and their wire codec are written by hand in `src/proto` and
//! `src/codec`, so only the `BookingService` server and client plumbing is
//! generated here.

use tonic_build::manual::{Builder, Method, Service};

const CODEC_PATH: &str = "crate::codec::BookingCodec";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let service = Service::builder()
        .name("BookingService")
        .package("booking")
        .method(unary("create_book", "CreateBook", "CreateBookRequest", "Book"))
        .method(unary("read_book", "ReadBook", "ReadBookRequest", "Book"))
        .method(unary("update_book", "UpdateBook", "UpdateBookRequest", "Book"))
        .method(unary(
            "delete_book",
            "DeleteBook",
            "DeleteBookRequest",
            "DeleteBookResponse",
        ))
        .build();

    Builder::new().compile(&[service]);
}

fn unary(name: &str, route_name: &str, input: &str, output: &str) -> Method {
    Method::builder()
        .name(name)
        .route_name(route_name)
        .input_type(format!("crate::proto::{input}"))
        .output_type(format!("crate::proto::{output}"))
        .codec_path(CODEC_PATH)
        .build()
}
