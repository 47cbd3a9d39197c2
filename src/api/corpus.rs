use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_cookies::Cookies;

use corpus_lookup::models::NewEntry;
use corpus_lookup::store::CorpusStore;
use corpus_lookup::utils::{allowed_file, secure_filename};

use super::{ApiError, ApiResponse};
use crate::auth::current_username;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AddEntryRequest {
    #[serde(rename = "isiZulu")]
    pub isizulu: String,
    #[serde(rename = "English")]
    pub english: String,
    #[serde(rename = "isiXhosa")]
    pub isixhosa: String,
    #[serde(rename = "siSwati")]
    pub siswati: String,
    #[serde(rename = "Context")]
    pub context: String,
    #[serde(rename = "Page")]
    pub page: String,
}

/// POST /add - add a glossary entry
pub async fn add_entry(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddEntryRequest>,
) -> Result<Json<ApiResponse>, ApiError> {
    let entry = match NewEntry::from_parts(
        &req.isizulu,
        &req.english,
        &req.isixhosa,
        &req.siswati,
        &req.context,
        &req.page,
    ) {
        Ok(entry) => entry,
        Err(rejection) => return Ok(Json(ApiResponse::error(rejection.message()))),
    };

    let entry = state.add_entry(entry).await?;
    tracing::info!("Added corpus entry {} '{}'", entry.id, entry.isizulu);

    Ok(Json(ApiResponse::success(format!(
        "Added '{}' to corpus.",
        entry.isizulu
    ))))
}

/// POST /upload - store a reference document and record it in the corpus
pub async fn upload_document(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse>, ApiError> {
    let Some(username) = current_username(&cookies, &state.db).await? else {
        return Ok(Json(ApiResponse::error("Please login to upload.")));
    };

    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;
        upload = Some((filename, data.to_vec()));
        break;
    }

    let Some((raw_name, data)) = upload else {
        return Ok(Json(ApiResponse::error("No file part.")));
    };

    if raw_name.is_empty() {
        return Ok(Json(ApiResponse::error("No selected file.")));
    }

    if !allowed_file(&raw_name, &state.config.upload.allowed_extensions) {
        return Ok(Json(ApiResponse::error("File type not allowed.")));
    }

    let filename = secure_filename(&raw_name);
    if filename.is_empty() {
        return Ok(Json(ApiResponse::error("Invalid file name.")));
    }

    let upload_dir = state.config.get_upload_dir();
    let saved_path = upload_dir.join(&filename);
    tokio::fs::create_dir_all(&upload_dir).await?;
    tokio::fs::write(&saved_path, &data).await?;

    let entry = NewEntry::uploaded_document(&filename, format!("uploads/{}", filename));
    if let Err(e) = state.store.insert(entry).await {
        // No corpus row points at the file, don't keep it
        if let Err(remove_err) = tokio::fs::remove_file(&saved_path).await {
            tracing::warn!("Failed to remove {:?}: {}", saved_path, remove_err);
        }
        return Err(e.into());
    }
    state.suggestions.rebuild(state.store.as_ref()).await?;
    tracing::info!("{} uploaded '{}' ({} bytes)", username, filename, data.len());

    Ok(Json(ApiResponse::success(format!(
        "File '{}' uploaded successfully!",
        filename
    ))))
}
