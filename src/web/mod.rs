//! Ancillary HTTP stub.
//!
//! Two routes: a health text and a capped connectivity read against the
//! local store. Not consumed by the library's core logic.

use crate::core::{Record, StoreError};
use crate::facade::StoreClient;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Row cap for the connectivity probe.
const TEST_DB_ROW_CAP: usize = 5;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug)]
pub enum WebError {
    Store(StoreError),
}

impl From<StoreError> for WebError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let WebError::Store(err) = self;
        let (status, code) = match &err {
            StoreError::TableNotFound(_) | StoreError::RecordNotFound { .. } => {
                (StatusCode::NOT_FOUND, "not_found")
            }
            StoreError::ReadOnlyTable(_) => (StatusCode::CONFLICT, "read_only"),
            StoreError::UnsupportedFilter(_) | StoreError::Validation(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation")
            }
            StoreError::NoSession => (StatusCode::UNAUTHORIZED, "no_session"),
            StoreError::Serialization(_) | StoreError::Io(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "store_error")
            }
        };
        (
            status,
            Json(ErrorResponse {
                error: err.to_string(),
                code: code.to_string(),
            }),
        )
            .into_response()
    }
}

#[derive(Debug, Serialize)]
struct TestDbResponse {
    message: String,
    rows: Vec<Record>,
}

pub fn router(client: StoreClient) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/test-db", get(test_db))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(client)
}

async fn health() -> &'static str {
    "calendash data service is running"
}

/// Connectivity probe: reads at most five products.
async fn test_db(State(client): State<StoreClient>) -> Result<Json<TestDbResponse>, WebError> {
    let response = client.from("products").select().await;
    if let Some(err) = response.error {
        return Err(WebError::Store(err));
    }
    let mut rows = response.data.unwrap_or_default();
    rows.truncate(TEST_DB_ROW_CAP);
    Ok(Json(TestDbResponse {
        message: "store connection OK".to_string(),
        rows,
    }))
}

pub async fn serve(client: StoreClient, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {addr}");
    axum::serve(listener, router(client)).await?;
    Ok(())
}
