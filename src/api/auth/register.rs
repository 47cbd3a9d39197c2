use axum::{extract::State, Form, Json};
use std::sync::Arc;

use super::types::Credentials;
use crate::api::{ApiError, ApiResponse};
use crate::auth::{hash_password, valid_password};
use crate::state::AppState;

/// POST /signup
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Form(req): Form<Credentials>,
) -> Result<Json<ApiResponse>, ApiError> {
    let username = req.username.trim();
    let password = req.password.trim();

    if username.is_empty() {
        return Ok(Json(ApiResponse::error("Username is required.")));
    }

    if !valid_password(password) {
        return Ok(Json(ApiResponse::error(
            "Password must be 8+ chars with upper & lowercase.",
        )));
    }

    let existing: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(&state.db)
        .await?;

    if existing.is_some() {
        return Ok(Json(ApiResponse::error("Username already exists.")));
    }

    sqlx::query("INSERT INTO users (username, password) VALUES (?, ?)")
        .bind(username)
        .bind(hash_password(password))
        .execute(&state.db)
        .await?;

    tracing::info!("Registered user '{}'", username);

    Ok(Json(ApiResponse::success("Account created. Please log in.")))
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_signup_then_duplicate() {
        let app = test_app().await;

        let body = json_body(send(&app, post_form("/signup", "username=+sipho+&password=Ubuntu2024")).await).await;
        assert_eq!(body, json!({"success": true, "message": "Account created. Please log in."}));

        let body = json_body(send(&app, post_form("/signup", "username=sipho&password=Another123")).await).await;
        assert_eq!(body, json!({"success": false, "message": "Username already exists."}));
    }

    #[tokio::test]
    async fn test_signup_password_policy() {
        let app = test_app().await;

        for password in ["short1A", "nouppercase1", "NOLOWERCASE1"] {
            let form = format!("username=lindiwe&password={}", password);
            let body = json_body(send(&app, post_form("/signup", &form)).await).await;
            assert_eq!(body["success"], false);
            assert_eq!(body["message"], "Password must be 8+ chars with upper & lowercase.");
        }
    }

    #[tokio::test]
    async fn test_signup_requires_username() {
        let app = test_app().await;
        let body = json_body(send(&app, post_form("/signup", "password=Ubuntu2024")).await).await;
        assert_eq!(body["message"], "Username is required.");
    }

    #[tokio::test]
    async fn test_password_stored_as_digest() {
        let app = test_app().await;
        send(&app, post_form("/signup", "username=sipho&password=Ubuntu2024")).await;

        let (stored,): (String,) = sqlx::query_as("SELECT password FROM users WHERE username = 'sipho'")
            .fetch_one(&app.state.db)
            .await
            .unwrap();
        assert_eq!(stored, crate::auth::hash_password("Ubuntu2024"));
    }
}
