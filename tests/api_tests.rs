//! API integration tests

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::util::ServiceExt;

use bookshelf_server::{api, AppConfig, AppState};

fn app() -> Router {
    api::create_router(AppState::new(AppConfig::default()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

fn ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_i64().unwrap())
        .collect()
}

fn prices(body: &Value) -> Vec<f64> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|b| b["price"].as_f64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let (status, body) = get(&app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["books"], 15);
}

#[tokio::test]
async fn test_list_books() {
    let app = app();
    let (status, body) = get(&app, "/api/books").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), (1..=15).collect::<Vec<_>>());
    assert_eq!(body[0]["title"], "Spring Boot in Action");
    assert_eq!(body[0]["author"], "Craig Walls");
    assert_eq!(body[0]["price"].as_f64(), Some(39.99));
}

#[tokio::test]
async fn test_get_book() {
    let app = app();
    let (status, body) = get(&app, "/api/books/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 2);
    assert_eq!(body["title"], "Effective Java");

    let (status, body) = get(&app, "/api/books/99").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null());

    let (status, body) = get(&app, "/api/books/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
async fn test_create_then_get() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/books",
        Some(json!({ "id": 1, "title": "Rust in Action", "author": "Tim McNamara", "price": 45.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 16);

    // client-supplied id is ignored
    let created = &body[15];
    assert_eq!(created["id"], 16);

    let (_, fetched) = get(&app, "/api/books/16").await;
    assert_eq!(&fetched, created);
    assert_eq!(fetched["title"], "Rust in Action");
    assert_eq!(fetched["author"], "Tim McNamara");
    assert_eq!(fetched["price"].as_f64(), Some(45.5));

    let (_, first) = get(&app, "/api/books/1").await;
    assert_eq!(first["title"], "Spring Boot in Action");
}

#[tokio::test]
async fn test_create_rejects_malformed_body() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/api/books", Some(json!({ "title": "No author" }))).await;
    assert!(status.is_client_error());
    assert_eq!(body["error"], "BadValue");

    let (_, list) = get(&app, "/api/books").await;
    assert_eq!(list.as_array().unwrap().len(), 15);
}

#[tokio::test]
async fn test_replace_book() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/books/3?title=Clean%20Code%202&author=Uncle%20Bob&price=50",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 3);
    assert_eq!(body["title"], "Clean Code 2");
    assert_eq!(body["author"], "Uncle Bob");
    assert_eq!(body["price"].as_f64(), Some(50.0));

    let (status, body) = send(&app, Method::PUT, "/api/books/3?title=Only%20Title", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/books/404?title=a&author=b&price=1",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchItem");
}

#[tokio::test]
async fn test_patch_book() {
    let app = app();
    let (status, body) = send(&app, Method::PATCH, "/api/books/6?price=30", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Head First Java");
    assert_eq!(body["author"], "Kathy Sierra");
    assert_eq!(body["price"].as_f64(), Some(30.0));

    let (_, before) = get(&app, "/api/books/6").await;
    let (status, after) = send(&app, Method::PATCH, "/api/books/6?title=&author=%20", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(before, after);

    let (status, _) = send(&app, Method::PATCH, "/api/books/404?title=x", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_book() {
    let app = app();
    let (status, body) = send(&app, Method::DELETE, "/api/books/5", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (_, body) = get(&app, "/api/books/5").await;
    assert!(body.is_null());
    let (_, list) = get(&app, "/api/books").await;
    assert_eq!(list.as_array().unwrap().len(), 14);

    let (status, _) = send(&app, Method::DELETE, "/api/books/5", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, list) = get(&app, "/api/books").await;
    assert_eq!(list.as_array().unwrap().len(), 14);
}

#[tokio::test]
async fn test_paginated() {
    let app = app();
    let (status, body) = get(&app, "/api/books/paginated?offset=0&limit=5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 2, 3, 4, 5]);

    let (_, body) = get(&app, "/api/books/paginated?offset=10&limit=10").await;
    assert_eq!(ids(&body), vec![11, 12, 13, 14, 15]);

    let (_, body) = get(&app, "/api/books/paginated?offset=20&limit=10").await;
    assert!(body.as_array().unwrap().is_empty());

    let (status, _) = get(&app, "/api/books/paginated?offset=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_advanced_query() {
    let app = app();
    let (status, body) = get(
        &app,
        "/api/books/advanced?offset=0&limit=100&priceAbove=true&cutoffPrice=40.0&ascending=true",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let above = prices(&body);
    assert_eq!(above.len(), 7);
    assert!(above.iter().all(|p| *p > 40.0));
    assert!(above.windows(2).all(|w| w[0] <= w[1]));

    let (_, body) = get(
        &app,
        "/api/books/advanced?offset=0&limit=2&priceAbove=false&cutoffPrice=35&ascending=false",
    )
    .await;
    assert_eq!(prices(&body), vec![33.5, 32.5]);
}

#[tokio::test]
async fn test_search_by_title() {
    let app = app();
    let (status, body) = get(&app, "/api/books/search?title=java").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![2, 4, 6, 12, 13]);

    let (_, body) = get(&app, "/api/books/search").await;
    assert_eq!(body.as_array().unwrap().len(), 15);
}

#[tokio::test]
async fn test_price_range() {
    let app = app();
    let (status, body) = get(&app, "/api/books/price-range?minPrice=40&maxPrice=45").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![2, 3, 7, 10]);

    let (_, body) = get(&app, "/api/books/price-range").await;
    assert_eq!(body.as_array().unwrap().len(), 15);
}

#[tokio::test]
async fn test_sorted() {
    let app = app();
    let (status, by_title) = get(&app, "/api/books/sorted").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_title[0]["title"], "Automate the Boring Stuff");

    let (_, bogus) = get(&app, "/api/books/sorted?sortBy=bogus&order=asc").await;
    assert_eq!(by_title, bogus);

    let (_, by_author) = get(&app, "/api/books/sorted?sortBy=AUTHOR&order=DESC").await;
    assert_eq!(by_author[0]["author"], "Robert Martin");
    assert_eq!(by_author[0]["id"], 3);
    assert_eq!(by_author[1]["id"], 8);
}

#[tokio::test]
async fn test_empty_catalog() {
    let mut config = AppConfig::default();
    config.catalog.seed = false;
    let app = api::create_router(AppState::new(config));

    let (_, body) = get(&app, "/api/books").await;
    assert!(body.as_array().unwrap().is_empty());

    let (_, body) = send(
        &app,
        Method::POST,
        "/api/books",
        Some(json!({ "title": "First", "author": "Someone", "price": 10 })),
    )
    .await;
    assert_eq!(ids(&body), vec![1]);
}

#[tokio::test]
async fn test_empty_optional_price_counts_as_absent() {
    let app = app();
    let (status, body) = send(&app, Method::PATCH, "/api/books/6?title=New&price=", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "New");
    assert_eq!(body["price"].as_f64(), Some(35.0));

    let (status, body) = get(&app, "/api/books/price-range?minPrice=&maxPrice=45").await;
    assert_eq!(status, StatusCode::OK);
    let in_range = prices(&body);
    assert_eq!(in_range.len(), 12);
    assert!(in_range.iter().all(|p| *p <= 45.0));

    let (status, body) = send(&app, Method::PATCH, "/api/books/6?price=cheap", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
}
