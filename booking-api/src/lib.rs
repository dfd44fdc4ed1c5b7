//! Booking API.
//!
//! This crate holds the contract shared by every transport of the booking
//! service:
//!
//! - `proto`: the `booking` package messages and the generated
//!   `BookingService` server/client plumbing
//! - `schema`: permanent tag assignments, JSON names and the descriptor set
//! - `codec`: protobuf wire encoding with unknown-field preservation
//! - `error`: the error taxonomy and its mapping onto RPC statuses
//! - `rpc`: `google.rpc.Status` and `google.rpc.ErrorInfo`
//!
//! # Features
//!
//! - `server`: exposes `proto::booking_service_server`
//! - `client`: exposes `proto::booking_service_client`

pub mod codec;
pub mod error;
pub mod proto;
pub mod rpc;
pub mod schema;
