pub mod auth;
pub mod corpus;
pub mod pages;
pub mod search;
pub mod server;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_cookies::CookieManagerLayer;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::state::AppState;

/// `{success, message}` body shared by /add, /upload, /login and /signup
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
}

impl ApiResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Unexpected failure of a request (store unavailable, disk full, ...)
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => {
                tracing::error!("Request failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };
        (status, Json(ApiResponse::error(message))).into_response()
    }
}

impl From<corpus_lookup::Error> for ApiError {
    fn from(e: corpus_lookup::Error) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Internal(format!("Database error: {}", e))
    }
}

impl From<std::io::Error> for ApiError {
    fn from(e: std::io::Error) -> Self {
        ApiError::Internal(format!("IO error: {}", e))
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let static_dir = state.config.get_static_dir();
    let upload_dir = state.config.get_upload_dir();
    let body_limit = state.config.upload.max_size_mb * 1024 * 1024;

    Router::new()
        .route("/", get(pages::home))
        .route("/corpus", get(pages::corpus_page))
        .route("/login", get(pages::login_page).post(auth::login))
        .route("/signup", get(pages::signup_page).post(auth::signup))
        .route("/logout", get(auth::logout))
        .route("/search", get(search::search))
        .route("/frequency", get(search::frequency))
        .route("/pairs", get(search::pairs))
        .route("/add", post(corpus::add_entry))
        .route("/upload", post(corpus::upload_document))
        .route("/api/health", get(server::health_check))
        .nest_service("/static", ServeDir::new(static_dir))
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
