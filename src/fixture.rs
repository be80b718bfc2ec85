//! Local stand-in for the catalog API, serving products from a JSON file.
//! Used by `lapbytes serve-fixture` during development and by the tests.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::models::Product;

/// Bundled sample catalog, used when no file is given.
pub const SAMPLE_PRODUCTS: &str = include_str!("../fixtures/laptops.json");

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid fixture JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug)]
pub struct FixtureState {
    products: Arc<Vec<Product>>,
    delay: Duration,
    fail_status: Option<StatusCode>,
    served: Arc<AtomicUsize>,
}

impl FixtureState {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(products),
            delay: Duration::ZERO,
            fail_status: None,
            served: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Wait this long before answering each request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Answer every request with `status` instead of data.
    pub fn failing(mut self, status: StatusCode) -> Self {
        self.fail_status = Some(status);
        self
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of requests answered so far.
    pub fn requests_served(&self) -> usize {
        self.served.load(Ordering::SeqCst)
    }

    /// Slice for `page` (1-based) of `limit` items; past the end is empty.
    pub fn page(&self, limit: usize, page: usize) -> &[Product] {
        let offset = page.saturating_sub(1).saturating_mul(limit);
        if offset >= self.products.len() {
            return &[];
        }
        let end = offset.saturating_add(limit).min(self.products.len());
        &self.products[offset..end]
    }
}

/// Parse a fixture document: either a bare array or `{"products": [...]}`.
pub fn parse_products(raw: &str) -> Result<Vec<Product>, FixtureError> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Document {
        List(Vec<Product>),
        Envelope { products: Vec<Product> },
    }

    Ok(match serde_json::from_str::<Document>(raw)? {
        Document::List(products) | Document::Envelope { products } => products,
    })
}

pub async fn load_products_file(path: &std::path::Path) -> Result<Vec<Product>, FixtureError> {
    let raw = tokio::fs::read_to_string(path).await?;
    parse_products(&raw)
}

fn invalid(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn parse_positive(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok().filter(|v| *v >= 1)
}

async fn before_answer(state: &FixtureState) -> Option<Response> {
    state.served.fetch_add(1, Ordering::SeqCst);
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    state
        .fail_status
        .map(|status| invalid(status, "Internal Server Error"))
}

async fn list_products(
    State(state): State<FixtureState>,
    Path((limit, page)): Path<(String, String)>,
) -> Response {
    if let Some(failure) = before_answer(&state).await {
        return failure;
    }
    let (Some(limit), Some(page)) = (parse_positive(&limit), parse_positive(&page)) else {
        tracing::warn!(%limit, %page, "Invalid pagination request");
        return invalid(StatusCode::BAD_REQUEST, "Invalid Request");
    };
    let products = state.page(limit, page);
    tracing::info!(limit, page, returned = products.len(), "Served product page");
    Json(json!({ "products": products, "message": "request successful" })).into_response()
}

async fn get_product(State(state): State<FixtureState>, Path(id): Path<String>) -> Response {
    if let Some(failure) = before_answer(&state).await {
        return failure;
    }
    let Some(id) = id.trim().parse::<i64>().ok().filter(|id| *id >= 1) else {
        return invalid(StatusCode::BAD_REQUEST, "item not found");
    };
    match state.products.iter().find(|p| p.id == Some(id)) {
        Some(product) => Json(product.clone()).into_response(),
        None => invalid(StatusCode::NOT_FOUND, "item not found"),
    }
}

pub fn build_router(state: FixtureState) -> Router {
    Router::new()
        .route("/api/products/:limit/:page", get(list_products))
        .route("/api/product/:id", get(get_product))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Serve on an already bound listener until the task is dropped.
pub async fn serve_on(listener: tokio::net::TcpListener, state: FixtureState) -> std::io::Result<()> {
    axum::serve(listener, build_router(state)).await
}

pub async fn serve(state: FixtureState, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, products = state.products().len(), "Starting catalog fixture API");
    serve_on(listener, state).await
}
