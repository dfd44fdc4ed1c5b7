//! `prost::Message` implementations for the `booking` package.
//!
//! Scalars equal to their zero value are not written (proto3 implicit
//! presence). Fields may arrive in any order; repeated fields accumulate.

use bytes::{Buf, BufMut};
use prost::{
    DecodeError, Message,
    encoding::{self, DecodeContext, WireType},
};

use crate::proto::{
    Book, CreateBookRequest, DeleteBookRequest, DeleteBookResponse, ReadBookRequest,
    UpdateBookRequest,
};

fn annotate(message: &'static str, field: &'static str) -> impl FnOnce(DecodeError) -> DecodeError {
    move |mut err| {
        err.push(message, field);
        err
    }
}

impl Message for Book {
    fn encode_raw(&self, buf: &mut impl BufMut) {
        if self.id != 0 {
            encoding::int64::encode(Self::ID_TAG, &self.id, buf);
        }
        if !self.title.is_empty() {
            encoding::string::encode(Self::TITLE_TAG, &self.title, buf);
        }
        if !self.author.is_empty() {
            encoding::string::encode(Self::AUTHOR_TAG, &self.author, buf);
        }
        if self.year != 0 {
            encoding::int32::encode(Self::YEAR_TAG, &self.year, buf);
        }
        if !self.language.is_empty() {
            encoding::string::encode(Self::LANGUAGE_TAG, &self.language, buf);
        }
        encoding::string::encode_repeated(Self::GENRES_TAG, &self.genres, buf);
        if self.price != 0 {
            encoding::int32::encode(Self::PRICE_TAG, &self.price, buf);
        }
        if self.quantity != 0 {
            encoding::int32::encode(Self::QUANTITY_TAG, &self.quantity, buf);
        }
        self.unknown_fields.encode_raw(buf);
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        const NAME: &str = "Book";
        match tag {
            Self::ID_TAG => encoding::int64::merge(wire_type, &mut self.id, buf, ctx)
                .map_err(annotate(NAME, "id")),
            Self::TITLE_TAG => encoding::string::merge(wire_type, &mut self.title, buf, ctx)
                .map_err(annotate(NAME, "title")),
            Self::AUTHOR_TAG => encoding::string::merge(wire_type, &mut self.author, buf, ctx)
                .map_err(annotate(NAME, "author")),
            Self::YEAR_TAG => encoding::int32::merge(wire_type, &mut self.year, buf, ctx)
                .map_err(annotate(NAME, "year")),
            Self::LANGUAGE_TAG => encoding::string::merge(wire_type, &mut self.language, buf, ctx)
                .map_err(annotate(NAME, "language")),
            Self::GENRES_TAG => {
                encoding::string::merge_repeated(wire_type, &mut self.genres, buf, ctx)
                    .map_err(annotate(NAME, "genres"))
            }
            Self::PRICE_TAG => encoding::int32::merge(wire_type, &mut self.price, buf, ctx)
                .map_err(annotate(NAME, "price")),
            Self::QUANTITY_TAG => encoding::int32::merge(wire_type, &mut self.quantity, buf, ctx)
                .map_err(annotate(NAME, "quantity")),
            _ => self.unknown_fields.merge_field(tag, wire_type, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if self.id != 0 {
            len += encoding::int64::encoded_len(Self::ID_TAG, &self.id);
        }
        if !self.title.is_empty() {
            len += encoding::string::encoded_len(Self::TITLE_TAG, &self.title);
        }
        if !self.author.is_empty() {
            len += encoding::string::encoded_len(Self::AUTHOR_TAG, &self.author);
        }
        if self.year != 0 {
            len += encoding::int32::encoded_len(Self::YEAR_TAG, &self.year);
        }
        if !self.language.is_empty() {
            len += encoding::string::encoded_len(Self::LANGUAGE_TAG, &self.language);
        }
        len += encoding::string::encoded_len_repeated(Self::GENRES_TAG, &self.genres);
        if self.price != 0 {
            len += encoding::int32::encoded_len(Self::PRICE_TAG, &self.price);
        }
        if self.quantity != 0 {
            len += encoding::int32::encoded_len(Self::QUANTITY_TAG, &self.quantity);
        }
        len + self.unknown_fields.encoded_len()
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

impl Message for CreateBookRequest {
    fn encode_raw(&self, buf: &mut impl BufMut) {
        if let Some(book) = &self.book {
            encoding::message::encode(Self::BOOK_TAG, book, buf);
        }
        self.unknown_fields.encode_raw(buf);
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        match tag {
            Self::BOOK_TAG => encoding::message::merge(
                wire_type,
                self.book.get_or_insert_with(Book::default),
                buf,
                ctx,
            )
            .map_err(annotate("CreateBookRequest", "book")),
            _ => self.unknown_fields.merge_field(tag, wire_type, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        self.book
            .as_ref()
            .map_or(0, |book| encoding::message::encoded_len(Self::BOOK_TAG, book))
            + self.unknown_fields.encoded_len()
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

impl Message for UpdateBookRequest {
    fn encode_raw(&self, buf: &mut impl BufMut) {
        if self.id != 0 {
            encoding::int64::encode(Self::ID_TAG, &self.id, buf);
        }
        if let Some(book) = &self.book {
            encoding::message::encode(Self::BOOK_TAG, book, buf);
        }
        self.unknown_fields.encode_raw(buf);
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        const NAME: &str = "UpdateBookRequest";
        match tag {
            Self::ID_TAG => encoding::int64::merge(wire_type, &mut self.id, buf, ctx)
                .map_err(annotate(NAME, "id")),
            Self::BOOK_TAG => encoding::message::merge(
                wire_type,
                self.book.get_or_insert_with(Book::default),
                buf,
                ctx,
            )
            .map_err(annotate(NAME, "book")),
            _ => self.unknown_fields.merge_field(tag, wire_type, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if self.id != 0 {
            len += encoding::int64::encoded_len(Self::ID_TAG, &self.id);
        }
        if let Some(book) = &self.book {
            len += encoding::message::encoded_len(Self::BOOK_TAG, book);
        }
        len + self.unknown_fields.encoded_len()
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

macro_rules! impl_id_request_message {
    ( $( $type:ident ),* $(,)? ) => {
        $(
        impl Message for $type {
            fn encode_raw(&self, buf: &mut impl BufMut) {
                if self.id != 0 {
                    encoding::int64::encode(Self::ID_TAG, &self.id, buf);
                }
                self.unknown_fields.encode_raw(buf);
            }

            fn merge_field(
                &mut self,
                tag: u32,
                wire_type: WireType,
                buf: &mut impl Buf,
                ctx: DecodeContext,
            ) -> Result<(), DecodeError> {
                match tag {
                    Self::ID_TAG => encoding::int64::merge(wire_type, &mut self.id, buf, ctx)
                        .map_err(annotate(stringify!($type), "id")),
                    _ => self.unknown_fields.merge_field(tag, wire_type, buf, ctx),
                }
            }

            fn encoded_len(&self) -> usize {
                let len = if self.id != 0 {
                    encoding::int64::encoded_len(Self::ID_TAG, &self.id)
                } else {
                    0
                };
                len + self.unknown_fields.encoded_len()
            }

            fn clear(&mut self) {
                *self = Self::default();
            }
        }
        )*
    };
}
impl_id_request_message!(ReadBookRequest, DeleteBookRequest);

impl Message for DeleteBookResponse {
    fn encode_raw(&self, buf: &mut impl BufMut) {
        if self.success {
            encoding::bool::encode(Self::SUCCESS_TAG, &self.success, buf);
        }
        self.unknown_fields.encode_raw(buf);
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        match tag {
            Self::SUCCESS_TAG => encoding::bool::merge(wire_type, &mut self.success, buf, ctx)
                .map_err(annotate("DeleteBookResponse", "success")),
            _ => self.unknown_fields.merge_field(tag, wire_type, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        let len = if self.success {
            encoding::bool::encoded_len(Self::SUCCESS_TAG, &self.success)
        } else {
            0
        };
        len + self.unknown_fields.encoded_len()
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}
