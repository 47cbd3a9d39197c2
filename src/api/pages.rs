use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tower_cookies::Cookies;

use super::ApiError;
use crate::auth::current_username;
use crate::state::AppState;

/// Serve a page from the static directory
async fn serve_page(state: &AppState, name: &str) -> Response {
    let path = state.config.get_static_dir().join(name);
    match tokio::fs::read_to_string(&path).await {
        Ok(content) => Html(content).into_response(),
        Err(e) => {
            tracing::warn!("Page {:?} unavailable: {}", path, e);
            (StatusCode::NOT_FOUND, "Not Found").into_response()
        }
    }
}

/// GET /
pub async fn home(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
) -> Result<Redirect, ApiError> {
    if current_username(&cookies, &state.db).await?.is_some() {
        Ok(Redirect::to("/corpus"))
    } else {
        Ok(Redirect::to("/login"))
    }
}

/// GET /corpus
pub async fn corpus_page(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
) -> Result<Response, ApiError> {
    if current_username(&cookies, &state.db).await?.is_none() {
        return Ok(Redirect::to("/login").into_response());
    }
    Ok(serve_page(&state, "index.html").await)
}

/// GET /login
pub async fn login_page(State(state): State<Arc<AppState>>) -> Response {
    serve_page(&state, "login.html").await
}

/// GET /signup
pub async fn signup_page(State(state): State<Arc<AppState>>) -> Response {
    serve_page(&state, "signup.html").await
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::*;
    use axum::http::{header, StatusCode};

    #[tokio::test]
    async fn test_home_redirects_by_session() {
        let app = test_app().await;

        let response = send(&app, get("/")).await;
        assert_eq!(response.headers()[header::LOCATION], "/login");

        let cookie = login(&app).await;
        let response = send(&app, with_cookie(get("/"), &cookie)).await;
        assert_eq!(response.headers()[header::LOCATION], "/corpus");
    }

    #[tokio::test]
    async fn test_corpus_page_requires_session() {
        let app = test_app().await;

        let response = send(&app, get("/corpus")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let cookie = login(&app).await;
        let response = send(&app, with_cookie(get("/corpus"), &cookie)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_static_pages() {
        let app = test_app().await;
        assert_eq!(send(&app, get("/login")).await.status(), StatusCode::OK);
        // No signup.html in the test static directory
        assert_eq!(send(&app, get("/signup")).await.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_session_store_failure_is_an_error() {
        let app = test_app().await;
        let cookie = login(&app).await;
        sqlx::query("DROP TABLE user_sessions")
            .execute(&app.state.db)
            .await
            .unwrap();

        for path in ["/", "/corpus"] {
            let response = send(&app, with_cookie(get(path), &cookie)).await;
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
