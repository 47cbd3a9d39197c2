use axum::{
    extract::State,
    response::Redirect,
    Form, Json,
};
use std::sync::Arc;
use tower_cookies::{Cookie, Cookies};

use corpus_lookup::models::User;

use super::types::Credentials;
use crate::api::{ApiError, ApiResponse};
use crate::auth::{create_session, delete_session, hash_password, SESSION_COOKIE_NAME};
use crate::state::AppState;

/// POST /login
pub async fn login(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Form(req): Form<Credentials>,
) -> Result<Json<ApiResponse>, ApiError> {
    let username = req.username.trim();
    let password = req.password.trim();

    let user = sqlx::query_as::<_, User>("SELECT id, username, password FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(&state.db)
        .await?;

    let Some(user) = user.filter(|u| u.password == hash_password(password)) else {
        tracing::info!("Failed login for '{}'", username);
        return Ok(Json(ApiResponse::error("Invalid username or password.")));
    };

    let token = create_session(&user.username, state.config.session.ttl_hours, &state.db).await?;

    let mut cookie = Cookie::new(SESSION_COOKIE_NAME, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookies.add(cookie);

    Ok(Json(ApiResponse::success(format!("Welcome, {}.", user.username))))
}

/// GET /logout
pub async fn logout(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
) -> Result<Redirect, ApiError> {
    if let Some(cookie) = cookies.get(SESSION_COOKIE_NAME) {
        delete_session(cookie.value(), &state.db).await?;
    }

    let mut cookie = Cookie::new(SESSION_COOKIE_NAME, "");
    cookie.set_path("/");
    cookies.remove(cookie);

    Ok(Redirect::to("/login"))
}
