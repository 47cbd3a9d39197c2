use rand::Rng;
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;
use tower_cookies::Cookies;

pub const SESSION_COOKIE_NAME: &str = "session_token";

/// Hex SHA-256 of the password
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// At least 8 characters with an upper and a lowercase letter
pub fn valid_password(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
}

// Create session / 创建会话
pub async fn create_session(
    username: &str,
    ttl_hours: i64,
    pool: &SqlitePool,
) -> Result<String, sqlx::Error> {
    let token: String = rand::thread_rng()
        .sample_iter(&rand::distributions::Alphanumeric)
        .take(64)
        .map(char::from)
        .collect();

    let expires_at = chrono::Utc::now().timestamp() + ttl_hours * 60 * 60;

    // One session per user
    sqlx::query("DELETE FROM user_sessions WHERE username = ?")
        .bind(username)
        .execute(pool)
        .await?;

    sqlx::query("INSERT INTO user_sessions (token, username, expires_at) VALUES (?, ?, ?)")
        .bind(&token)
        .bind(username)
        .bind(expires_at)
        .execute(pool)
        .await?;

    Ok(token)
}

// Delete session (logout) / 删除会话
pub async fn delete_session(token: &str, pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM user_sessions WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}

/// Username of the logged in user, if the session cookie is valid
pub async fn current_username(
    cookies: &Cookies,
    pool: &SqlitePool,
) -> Result<Option<String>, sqlx::Error> {
    let Some(cookie) = cookies.get(SESSION_COOKIE_NAME) else {
        return Ok(None);
    };

    let row: Option<(String,)> = sqlx::query_as(
        "SELECT username FROM user_sessions WHERE token = ? AND expires_at > ?",
    )
    .bind(cookie.value())
    .bind(chrono::Utc::now().timestamp())
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|(username,)| username))
}
