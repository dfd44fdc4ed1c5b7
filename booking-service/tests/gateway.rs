use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use booking_service::book::repository::memory::MemoryBookRepository;
use common::{
    CountingBookRepository, FailingBookRepository, SlowBookRepository, adapter, gateway_router,
    read_json, send,
};
use serde_json::json;
use tower::ServiceExt;

mod common;

const DUNE: &str =
    r#"{"book":{"title":"Dune","author":"Herbert","year":1965,"genres":["sci-fi","classic"]}}"#;

fn router() -> axum::Router {
    gateway_router(adapter(Arc::new(MemoryBookRepository::new())))
}

#[tokio::test]
async fn create_and_read() {
    let router = router();

    let (status, created) = send(&router, "POST", "/books", Some(DUNE)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        created,
        json!({
            "id": "1",
            "title": "Dune",
            "author": "Herbert",
            "year": 1965,
            "language": "",
            "genres": ["sci-fi", "classic"],
            "price": 0,
            "quantity": 0,
        })
    );

    let (status, read_back) = send(&router, "GET", "/books/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(read_back, created);
}

#[tokio::test]
async fn unknown_json_members_are_ignored() {
    let router = router();

    let body = r#"{"book":{"title":"Dune","isbn":"0441172717"},"requestId":"abc"}"#;
    let (status, created) = send(&router, "POST", "/books", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["title"], "Dune");
    assert!(created.get("isbn").is_none());
}

#[tokio::test]
async fn proto3_json_input_forms() {
    let router = router();

    let body = json!({
        "book": {
            "title": "Dune",
            "author": null,
            "year": "1965",
            "genres": null,
            "price": "999",
        }
    })
    .to_string();
    let (status, created) = send(&router, "POST", "/books", Some(body.as_str())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["year"], 1965);
    assert_eq!(created["price"], 999);
    assert_eq!(created["author"], "");
    assert_eq!(created["genres"], json!([]));

    let (status, _) = send(&router, "POST", "/books", Some(r#"{"book":{"year":"soon"}}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_replaces_wholesale() {
    let router = router();
    send(&router, "POST", "/books", Some(DUNE)).await;

    let (status, updated) = send(
        &router,
        "PUT",
        "/books/1",
        Some(r#"{"id":"50","book":{"id":"60","title":"Dune Messiah","price":1250}}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], "1");
    assert_eq!(updated["title"], "Dune Messiah");

    let (_, read_back) = send(&router, "GET", "/books/1", None).await;
    assert_eq!(read_back, updated);
    assert_eq!(read_back["author"], "");
    assert_eq!(read_back["genres"], json!([]));
    assert_eq!(read_back["year"], 0);
    assert_eq!(read_back["price"], 1250);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let router = router();
    send(&router, "POST", "/books", Some(DUNE)).await;

    for _ in 0..2 {
        let (status, response) = send(&router, "DELETE", "/books/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response, json!({"success": true}));
    }

    let (status, _) = send(&router, "GET", "/books/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn not_found() {
    let router = router();

    let (status, body) = send(&router, "GET", "/books/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({
            "code": 5,
            "message": "book `999` not found",
            "details": [{
                "@type": "type.googleapis.com/google.rpc.ErrorInfo",
                "reason": "NOT_FOUND",
                "domain": "booking",
                "metadata": {"id": "999"},
            }],
        })
    );

    let (status, _) = send(&router, "PUT", "/books/999", Some(DUNE)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_path_id() {
    let router = router();

    for (method, body) in [("GET", None), ("PUT", Some(DUNE)), ("DELETE", None)] {
        let (status, body) = send(&router, method, "/books/dune", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{method}");
        assert_eq!(body["code"], 3);
        assert_eq!(body["details"][0]["reason"], "MALFORMED_MESSAGE");
    }
}

#[tokio::test]
async fn malformed_body_never_reaches_storage() {
    let repository = Arc::new(CountingBookRepository::default());
    let router = gateway_router(adapter(repository.clone()));

    for body in [
        "{\"book\": {\"title\": ",
        "not json",
        r#"{"book": {"year": "nineteen"}}"#,
        r#"{"book": {"genres": "sci-fi"}}"#,
        "",
    ] {
        let (status, response) = send(&router, "PUT", "/books/1", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(response["code"], 3);

        let (status, _) = send(&router, "POST", "/books", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    }
    assert_eq!(repository.calls(), 0);
}

#[tokio::test]
async fn storage_failures() {
    let router = gateway_router(adapter(Arc::new(FailingBookRepository::Unavailable)));
    let (status, body) = send(&router, "POST", "/books", Some(DUNE)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["details"][0]["reason"], "STORAGE_UNAVAILABLE");

    let (status, _) = send(&router, "DELETE", "/books/1", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let router = gateway_router(adapter(Arc::new(FailingBookRepository::RejectsWrites)));
    let (status, body) = send(&router, "PUT", "/books/1", Some(DUNE)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["details"][0]["reason"], "CONSTRAINT_VIOLATION");
}

#[tokio::test(start_paused = true)]
async fn caller_deadline() {
    let router = gateway_router(adapter(Arc::new(SlowBookRepository)));

    let request = Request::builder()
        .method("GET")
        .uri("/books/1")
        .header("grpc-timeout", "100m")
        .body(Body::empty())
        .unwrap();
    let (status, body) = read_json(router.clone().oneshot(request).await.unwrap()).await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body["code"], 4);

    let request = Request::builder()
        .method("GET")
        .uri("/books/1")
        .header("grpc-timeout", "later")
        .body(Body::empty())
        .unwrap();
    let (status, _) = read_json(router.oneshot(request).await.unwrap()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unrouted_requests() {
    let router = router();

    let (status, _) = send(&router, "POST", "/books/1", Some(DUNE)).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, _) = send(&router, "GET", "/authors/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
