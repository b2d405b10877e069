//! Route handlers for the five product operations.

use super::error::ApiError;
use crate::schema::Payload;
use crate::store::ProductStore;
use crate::types::{Product, ProductId};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the product API router.
pub fn router(store: Arc<ProductStore>) -> Router {
    Router::new()
        .route(
            "/produtos",
            get(list_products)
                .post(create_product)
                .options(options_products),
        )
        .route(
            "/produtos/{id}",
            put(update_product)
                .patch(patch_product)
                .delete(delete_product),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

async fn list_products(State(store): State<Arc<ProductStore>>) -> Json<Vec<Product>> {
    Json(store.list())
}

async fn create_product(
    State(store): State<Arc<ProductStore>>,
    Json(payload): Json<Payload>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = store.create(&payload)?;
    Ok((StatusCode::CREATED, Json(product)))
}

async fn update_product(
    State(store): State<Arc<ProductStore>>,
    Path(id): Path<u64>,
    Json(payload): Json<Payload>,
) -> Result<Json<Product>, ApiError> {
    Ok(Json(store.update(ProductId(id), &payload)?))
}

async fn patch_product(
    State(store): State<Arc<ProductStore>>,
    Path(id): Path<u64>,
    Json(payload): Json<Payload>,
) -> Result<Json<Product>, ApiError> {
    Ok(Json(store.patch(ProductId(id), &payload)?))
}

async fn delete_product(
    State(store): State<Arc<ProductStore>>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    store.delete(ProductId(id))?;
    Ok(Json(json!({ "message": "Produto excluído com sucesso." })))
}

async fn options_products() -> Response {
    (
        StatusCode::NO_CONTENT,
        [(header::ALLOW, "GET,POST,PUT,DELETE,PATCH,OPTIONS")],
    )
        .into_response()
}
