//! Axum route handlers for the Profiles API.

use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::profiles::ingest::{
    ingest_profiles, ingest_uploads, IngestRequest, IngestResponse, UploadResponse, UploadedFile,
};
use crate::screening::candidate::CandidateRecord;
use crate::screening::report::render_profile_listing;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
    pub top_k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub count: usize,
    pub candidates: Vec<CandidateRecord>,
    pub listing: String,
}

/// POST /api/v1/profiles
pub async fn handle_ingest(
    State(state): State<AppState>,
    Json(request): Json<IngestRequest>,
) -> Result<Json<IngestResponse>, AppError> {
    if request.profiles.is_empty() {
        return Err(AppError::Validation("profiles cannot be empty".to_string()));
    }
    let response = ingest_profiles(state.profile_store.as_ref(), request).await?;
    Ok(Json(response))
}

/// POST /api/v1/profiles/upload
///
/// Accepts PDF (or `.txt`) résumés as multipart file fields. Files that cannot
/// be read or stored are listed under `failures`; the rest are still stored.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read '{file_name}': {e}")))?;
        files.push(UploadedFile {
            file_name,
            bytes: bytes.to_vec(),
        });
    }

    if files.is_empty() {
        return Err(AppError::Validation(
            "no file fields found in upload".to_string(),
        ));
    }

    let response = ingest_uploads(state.profile_store.as_ref(), files).await;
    info!(
        processed = response.processed,
        failed = response.failures.len(),
        "Résumé upload processed"
    );
    Ok(Json(response))
}

/// GET /api/v1/profiles/search?query=&top_k=
pub async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, AppError> {
    if params.query.trim().is_empty() {
        return Err(AppError::Validation("query cannot be empty".to_string()));
    }
    let limit = params.top_k.unwrap_or(state.config.default_top_k);

    let candidates = state.repository.search(&params.query, limit).await?;
    let listing = render_profile_listing(&params.query, &candidates);

    Ok(Json(SearchResponse {
        query: params.query,
        count: candidates.len(),
        candidates,
        listing,
    }))
}
