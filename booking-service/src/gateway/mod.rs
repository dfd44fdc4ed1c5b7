//! HTTP/JSON transcoding gateway.
//!
//! Each `BookingService` method is exposed on the HTTP rule recorded in
//! [`BookingServiceSchema`]. Requests are decoded from JSON, forwarded to the
//! same `BookingService` implementation the gRPC server uses, and the result
//! is rendered back as JSON. Failures are rendered as a `google.rpc.Status`.

use std::{future::Future, sync::Arc, time::Duration};

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    routing::{MethodFilter, on},
};
use booking_api::{
    proto::{
        Book, CreateBookRequest, DeleteBookRequest, DeleteBookResponse, ReadBookRequest,
        UpdateBookRequest, booking_service_server::BookingService,
    },
    schema::{BookingServiceSchema, HttpVerb, MethodSchema},
};
use http::HeaderMap;
use serde::de::DeserializeOwned;
use tokio::net::TcpListener;
use tonic::{Request, Response, Status};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::AppResult;

pub use error::GatewayError;

/// Gateway error rendering.
pub mod error;

/// `grpc-timeout` header parsing.
pub mod timeout;

pub type GatewayResult<T> = Result<T, GatewayError>;

type BookingServiceArc = Arc<dyn BookingService>;

/// Shared state of every gateway route.
#[derive(Clone)]
pub struct GatewayState {
    service: BookingServiceArc,
}

impl GatewayState {
    pub fn new(service: BookingServiceArc) -> Self {
        Self { service }
    }
}

/// Builds the gateway router over `service`.
pub fn router(service: BookingServiceArc) -> Router {
    let create = &BookingServiceSchema::CREATE_BOOK;
    let read = &BookingServiceSchema::READ_BOOK;
    let update = &BookingServiceSchema::UPDATE_BOOK;
    let delete = &BookingServiceSchema::DELETE_BOOK;

    // Methods sharing a path template are merged into one route.
    Router::new()
        .route(create.http.path, on(method_filter(create), create_book))
        .route(read.http.path, on(method_filter(read), read_book))
        .route(update.http.path, on(method_filter(update), update_book))
        .route(delete.http.path, on(method_filter(delete), delete_book))
        .layer(TraceLayer::new_for_http())
        .with_state(GatewayState::new(service))
}

/// Serves the gateway on `listener` until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if the server fails.
pub async fn serve<F>(
    listener: TcpListener,
    service: BookingServiceArc,
    shutdown: F,
) -> AppResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!("HTTP gateway started at {}", listener.local_addr()?);
    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

fn method_filter(method: &MethodSchema) -> MethodFilter {
    match method.http.verb {
        HttpVerb::Get => MethodFilter::GET,
        HttpVerb::Post => MethodFilter::POST,
        HttpVerb::Put => MethodFilter::PUT,
        HttpVerb::Delete => MethodFilter::DELETE,
    }
}

/// Reads the request message from the body when the method's HTTP rule
/// binds one, otherwise starts from the default message.
fn parse_body<T>(method: &MethodSchema, body: &Bytes) -> GatewayResult<T>
where
    T: DeserializeOwned + Default,
{
    match method.http.body {
        Some(_) => Ok(serde_json::from_slice(body)?),
        None => Ok(T::default()),
    }
}

fn parse_id(value: &str) -> GatewayResult<i64> {
    value.parse().map_err(|_| GatewayError::InvalidPath {
        name: "id",
        value: value.into(),
    })
}

/// Awaits a handler call, bounded by the caller deadline if one was sent.
///
/// On expiry the call future is dropped, which cancels any in-flight storage
/// operation.
async fn dispatch<T, F>(deadline: Option<Duration>, call: F) -> GatewayResult<T>
where
    F: Future<Output = Result<Response<T>, Status>>,
{
    let response = match deadline {
        Some(deadline) => tokio::time::timeout(deadline, call)
            .await
            .map_err(|_| GatewayError::DeadlineExceeded)?,
        None => call.await,
    };
    Ok(response?.into_inner())
}

async fn create_book(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    body: Bytes,
) -> GatewayResult<Json<Book>> {
    let deadline = timeout::from_headers(&headers)?;
    let request: CreateBookRequest = parse_body(&BookingServiceSchema::CREATE_BOOK, &body)?;

    let book = dispatch(deadline, state.service.create_book(Request::new(request))).await?;

    Ok(Json(book))
}

async fn read_book(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> GatewayResult<Json<Book>> {
    let deadline = timeout::from_headers(&headers)?;
    let request = ReadBookRequest {
        id: parse_id(&id)?,
        ..parse_body(&BookingServiceSchema::READ_BOOK, &body)?
    };

    let book = dispatch(deadline, state.service.read_book(Request::new(request))).await?;

    Ok(Json(book))
}

async fn update_book(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> GatewayResult<Json<Book>> {
    let deadline = timeout::from_headers(&headers)?;
    let id = parse_id(&id)?;
    // The path identity takes precedence over one given in the body.
    let request = UpdateBookRequest {
        id,
        ..parse_body(&BookingServiceSchema::UPDATE_BOOK, &body)?
    };

    let book = dispatch(deadline, state.service.update_book(Request::new(request))).await?;

    Ok(Json(book))
}

async fn delete_book(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> GatewayResult<Json<DeleteBookResponse>> {
    let deadline = timeout::from_headers(&headers)?;
    let request = DeleteBookRequest {
        id: parse_id(&id)?,
        ..parse_body(&BookingServiceSchema::DELETE_BOOK, &body)?
    };

    let response = dispatch(deadline, state.service.delete_book(Request::new(request))).await?;

    Ok(Json(response))
}
