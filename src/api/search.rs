use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use corpus_lookup::search::{FrequencyStats, PairStats, SearchResult};

use super::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// GET /search?q= - matching entries, usage statistics and suggestions
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SearchResult>, ApiError> {
    Ok(Json(state.engine.search(&params.q).await?))
}

/// GET /frequency?q=
pub async fn frequency(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<FrequencyStats>, ApiError> {
    Ok(Json(state.engine.frequency(&params.q).await?))
}

/// GET /pairs?q=
pub async fn pairs(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<PairStats>, ApiError> {
    Ok(Json(state.engine.pairs(&params.q).await?))
}
