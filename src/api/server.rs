use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use corpus_lookup::store::CorpusStore;

use super::ApiError;
use crate::state::AppState;

/// GET /api/health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let entries = state.store.count().await?;

    Ok(Json(json!({
        "status": "ok",
        "entries": entries,
        "suggestion_tokens": state.suggestions.len()
    })))
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::*;
    use corpus_lookup::models::NewEntry;

    #[tokio::test]
    async fn test_health_reports_counts() {
        let app = test_app().await;
        app.state
            .add_entry(NewEntry::from_parts("sawubona baba", "hello father", "", "", "greeting", "").unwrap())
            .await
            .unwrap();

        let body = json_body(send(&app, get("/api/health")).await).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["entries"], 1);
        assert_eq!(body["suggestion_tokens"], 2);
    }
}
