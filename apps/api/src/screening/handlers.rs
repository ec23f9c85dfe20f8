//! Axum route handlers for the Screening API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::screening::ranker::Ranking;
use crate::screening::report::render_ranking;
use crate::screening::screen;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScreeningRequest {
    pub job_description: String,
    /// Text used for retrieval. Defaults to the job description.
    pub query: Option<String>,
    pub top_k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ScreeningResponse {
    pub ranking: Ranking,
    pub report: String,
}

/// POST /api/v1/screening
///
/// Retrieves candidates, scores and ranks them, and returns both the structured
/// ranking and the rendered report. Zero candidates is a 200 with `no_matches`.
pub async fn handle_screen(
    State(state): State<AppState>,
    Json(request): Json<ScreeningRequest>,
) -> Result<Json<ScreeningResponse>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let search_query = request
        .query
        .as_deref()
        .filter(|q| !q.trim().is_empty())
        .unwrap_or(&request.job_description);
    let limit = request.top_k.unwrap_or(state.config.default_top_k);

    let ranking = screen(
        state.repository.as_ref(),
        state.scorer.as_ref(),
        search_query,
        &request.job_description,
        limit,
    )
    .await?;
    let report = render_ranking(&ranking);

    Ok(Json(ScreeningResponse { ranking, report }))
}
