#![allow(dead_code)]

use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, Bytes},
    http::{Request, Response, StatusCode},
};
use booking_api::{error::BookingError, proto::Book};
use booking_service::{
    book::{
        adapter::BookAdapter,
        repository::{
            BookRecordInsert, BookRecordOwned, BookRecordUpdate, BookRepository,
            BookRepositoryArc, memory::MemoryBookRepository,
        },
    },
    create_book_service,
    error::AppResult,
    gateway,
};
use http_body_util::BodyExt;
use serde_json::Value as JsonValue;
use tower::ServiceExt;

pub fn dune() -> Book {
    Book {
        title: "Dune".into(),
        author: "Herbert".into(),
        year: 1965,
        genres: vec!["sci-fi".into(), "classic".into()],
        ..Default::default()
    }
}

pub fn adapter(repository: BookRepositoryArc) -> Arc<BookAdapter> {
    Arc::new(create_book_service(repository))
}

pub fn gateway_router(adapter: Arc<BookAdapter>) -> Router {
    gateway::router(adapter)
}

pub async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, JsonValue) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();
    read_json(router.clone().oneshot(request).await.unwrap()).await
}

pub async fn read_json(response: Response<Body>) -> (StatusCode, JsonValue) {
    let status = response.status();
    let body: Bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

/// Counts every call that reaches storage.
#[derive(Debug, Default)]
pub struct CountingBookRepository {
    inner: MemoryBookRepository,
    calls: AtomicUsize,
}

impl CountingBookRepository {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn count(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl BookRepository for CountingBookRepository {
    async fn insert(&self, record: BookRecordInsert<'_>) -> AppResult<i64> {
        self.count();
        self.inner.insert(record).await
    }

    async fn select(&self, id: i64) -> AppResult<Option<BookRecordOwned>> {
        self.count();
        self.inner.select(id).await
    }

    async fn update(&self, update: BookRecordUpdate<'_>) -> AppResult<bool> {
        self.count();
        self.inner.update(update).await
    }

    async fn delete(&self, id: i64) -> AppResult<u64> {
        self.count();
        self.inner.delete(id).await
    }
}

/// Fails every call the way an unhealthy database would.
#[derive(Debug, Clone, Copy)]
pub enum FailingBookRepository {
    Unavailable,
    RejectsWrites,
}

impl FailingBookRepository {
    fn fail<T>(self) -> AppResult<T> {
        Err(match self {
            Self::Unavailable => BookingError::storage_unavailable("connection refused"),
            Self::RejectsWrites => BookingError::constraint_violation("value too long"),
        }
        .into())
    }
}

#[async_trait]
impl BookRepository for FailingBookRepository {
    async fn insert(&self, _record: BookRecordInsert<'_>) -> AppResult<i64> {
        self.fail()
    }

    async fn select(&self, _id: i64) -> AppResult<Option<BookRecordOwned>> {
        self.fail()
    }

    async fn update(&self, _update: BookRecordUpdate<'_>) -> AppResult<bool> {
        self.fail()
    }

    async fn delete(&self, _id: i64) -> AppResult<u64> {
        self.fail()
    }
}

/// Never answers within any reasonable deadline.
#[derive(Debug, Default)]
pub struct SlowBookRepository;

#[async_trait]
impl BookRepository for SlowBookRepository {
    async fn insert(&self, _record: BookRecordInsert<'_>) -> AppResult<i64> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(1)
    }

    async fn select(&self, _id: i64) -> AppResult<Option<BookRecordOwned>> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(None)
    }

    async fn update(&self, _update: BookRecordUpdate<'_>) -> AppResult<bool> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(false)
    }

    async fn delete(&self, _id: i64) -> AppResult<u64> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(0)
    }
}
