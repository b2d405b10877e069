//! HTTP transport tests: status-code mapping over the live router.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use estoque::{api, ProductStore};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

fn test_router(dir: &TempDir) -> Router {
    let store =
        Arc::new(ProductStore::open_or_create(dir.path().join("produtos.json")).unwrap());
    api::router(store)
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn bare_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_create_returns_201_with_record() {
    let dir = TempDir::new().unwrap();
    let app = test_router(&dir);

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/produtos",
            json!({"nome": "Cadeira", "preco": 50}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["nome"], "Cadeira");
    assert_eq!(body["preco"], 50.0);
}

#[tokio::test]
async fn test_create_invalid_returns_400_with_error_list() {
    let dir = TempDir::new().unwrap();
    let app = test_router(&dir);

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/produtos",
            json!({"descricao": "x"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_returns_200_with_collection() {
    let dir = TempDir::new().unwrap();
    let app = test_router(&dir);

    app.clone()
        .oneshot(json_request(
            Method::POST,
            "/produtos",
            json!({"nome": "Mesa", "preco": 120}),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(bare_request(Method::GET, "/produtos"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["nome"], "Mesa");
}

#[tokio::test]
async fn test_update_missing_returns_404() {
    let dir = TempDir::new().unwrap();
    let app = test_router(&dir);

    let response = app
        .oneshot(json_request(
            Method::PUT,
            "/produtos/9999",
            json!({"nome": "Mesa", "preco": 10}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!("Produto não encontrado"));
}

#[tokio::test]
async fn test_patch_changes_only_named_field() {
    let dir = TempDir::new().unwrap();
    let app = test_router(&dir);

    app.clone()
        .oneshot(json_request(
            Method::POST,
            "/produtos",
            json!({"nome": "Cadeira", "preco": 50, "descricao": "madeira"}),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(json_request(
            Method::PATCH,
            "/produtos/1",
            json!({"preco": 65.5}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["preco"], 65.5);
    assert_eq!(body["nome"], "Cadeira");
    assert_eq!(body["descricao"], "madeira");
}

#[tokio::test]
async fn test_delete_confirms_then_404s() {
    let dir = TempDir::new().unwrap();
    let app = test_router(&dir);

    app.clone()
        .oneshot(json_request(
            Method::POST,
            "/produtos",
            json!({"nome": "Banco", "preco": 30}),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(bare_request(Method::DELETE, "/produtos/1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "message": "Produto excluído com sucesso." })
    );

    let again = app
        .oneshot(bare_request(Method::DELETE, "/produtos/1"))
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_options_reports_allowed_methods() {
    let dir = TempDir::new().unwrap();
    let app = test_router(&dir);

    let response = app
        .oneshot(bare_request(Method::OPTIONS, "/produtos"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        response.headers().get(header::ALLOW).unwrap(),
        "GET,POST,PUT,DELETE,PATCH,OPTIONS"
    );
}
