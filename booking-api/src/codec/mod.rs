//! Protobuf wire codec for the `booking` package.
//!
//! Every field is written as a key (tag and wire type) followed by its value.
//! Decoding accepts fields in any order, accumulates repeated fields and keeps
//! unknown tags in [`UnknownFields`].

use std::marker::PhantomData;

use bytes::{Buf, Bytes};
use prost::{DecodeError, Message};
use thiserror::Error;
use tonic::{
    Status,
    codec::{Codec, DecodeBuf, Decoder, EncodeBuf, Encoder},
};

use crate::error::BookingError;

mod messages;
mod unknown;

pub use unknown::{UnknownField, UnknownFields, UnknownValue};

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed message: {0}")]
    MalformedMessage(#[from] DecodeError),
}

pub type CodecResult<T> = Result<T, CodecError>;

pub fn encode_message<M: Message>(message: &M) -> Bytes {
    Bytes::from(message.encode_to_vec())
}

/// Decodes a complete message from `buf`.
///
/// # Errors
///
/// Returns [`CodecError::MalformedMessage`] if the input is truncated, carries
/// an invalid key or varint, or a known field has the wrong wire type.
pub fn decode_message<M: Message + Default>(buf: impl Buf) -> CodecResult<M> {
    Ok(M::decode(buf)?)
}

/// gRPC codec for `BookingService`.
///
/// Decode failures surface as a `MalformedMessage` status instead of the
/// generic internal error a plain prost codec would produce.
#[derive(Debug)]
pub struct BookingCodec<T, U>(PhantomData<(T, U)>);

impl<T, U> Default for BookingCodec<T, U> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<T, U> Codec for BookingCodec<T, U>
where
    T: Message + Send + 'static,
    U: Message + Default + Send + 'static,
{
    type Encode = T;
    type Decode = U;
    type Encoder = BookingEncoder<T>;
    type Decoder = BookingDecoder<U>;

    fn encoder(&mut self) -> Self::Encoder {
        BookingEncoder(PhantomData)
    }

    fn decoder(&mut self) -> Self::Decoder {
        BookingDecoder(PhantomData)
    }
}

#[derive(Debug)]
pub struct BookingEncoder<T>(PhantomData<T>);

impl<T: Message> Encoder for BookingEncoder<T> {
    type Item = T;
    type Error = Status;

    fn encode(&mut self, item: Self::Item, buf: &mut EncodeBuf<'_>) -> Result<(), Self::Error> {
        item.encode(buf)
            .map_err(|err| Status::internal(err.to_string()))
    }
}

#[derive(Debug)]
pub struct BookingDecoder<U>(PhantomData<U>);

impl<U: Message + Default> Decoder for BookingDecoder<U> {
    type Item = U;
    type Error = Status;

    fn decode(&mut self, buf: &mut DecodeBuf<'_>) -> Result<Option<Self::Item>, Self::Error> {
        decode_message(buf)
            .map(Some)
            .map_err(|err| BookingError::from(err).into())
    }
}
