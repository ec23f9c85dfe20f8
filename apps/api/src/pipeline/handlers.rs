//! Axum route handlers for the Recruitment API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::candidate::InterviewInvitationRow;
use crate::pipeline::answer::{answer_question, Answer};
use crate::pipeline::context::RecruitmentContext;
use crate::pipeline::query::JobRequirements;
use crate::pipeline::reporting::{report_view, ReportKind};
use crate::pipeline::{run_pipeline, PipelineDeps, RunParams};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RunRequest {
    pub hr_query: String,
    /// Bypasses LLM interpretation when set.
    pub job_role: Option<String>,
    #[serde(default)]
    pub essential_skills: Vec<String>,
    pub top_k: Option<usize>,
    #[serde(default)]
    pub candidate_emails: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
    #[serde(default)]
    pub context: RecruitmentContext,
}

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub report_type: ReportKind,
    #[serde(default)]
    pub context: RecruitmentContext,
}

#[derive(Debug, Deserialize)]
pub struct InvitationListParams {
    pub limit: Option<i64>,
}

const DEFAULT_INVITATION_LIMIT: i64 = 50;
const MAX_INVITATION_LIMIT: i64 = 200;

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub report_type: ReportKind,
    pub report: String,
}

/// POST /api/v1/recruitment/run
///
/// Runs the full pipeline and returns the filled context. The caller keeps it
/// and sends it back to `/ask` and `/report`.
pub async fn handle_run(
    State(state): State<AppState>,
    Json(request): Json<RunRequest>,
) -> Result<Json<RecruitmentContext>, AppError> {
    if request.hr_query.trim().is_empty() {
        return Err(AppError::Validation("hr_query cannot be empty".to_string()));
    }

    let requirements = request
        .job_role
        .filter(|r| !r.trim().is_empty())
        .map(|role| JobRequirements::new(role, request.essential_skills));

    let deps = PipelineDeps {
        interpreter: state.interpreter.as_ref(),
        repository: state.repository.as_ref(),
        scorer: state.scorer.as_ref(),
        outbox: state.outbox.as_ref(),
        meeting_url: &state.config.interview_meeting_url,
        sender: state.config.hr_sender_email.as_deref(),
    };
    let params = RunParams {
        hr_query: request.hr_query,
        requirements,
        top_k: request.top_k.unwrap_or(state.config.default_top_k),
        candidate_emails: request.candidate_emails,
    };

    let ctx = run_pipeline(&deps, params).await?;
    Ok(Json(ctx))
}

/// POST /api/v1/recruitment/ask
pub async fn handle_ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<Answer>, AppError> {
    if request.question.trim().is_empty() {
        return Err(AppError::Validation("question cannot be empty".to_string()));
    }
    let answer = answer_question(
        &request.context,
        &request.question,
        state.repository.as_ref(),
    )
    .await?;
    Ok(Json(answer))
}

/// POST /api/v1/recruitment/report
pub async fn handle_report(Json(request): Json<ReportRequest>) -> Json<ReportResponse> {
    Json(ReportResponse {
        report_type: request.report_type,
        report: report_view(&request.context, request.report_type),
    })
}

/// GET /api/v1/recruitment/invitations?limit=
///
/// Lists queued invitations, newest first, for whatever relays them.
pub async fn handle_list_invitations(
    State(state): State<AppState>,
    Query(params): Query<InvitationListParams>,
) -> Result<Json<Vec<InterviewInvitationRow>>, AppError> {
    let limit = params.limit.unwrap_or(DEFAULT_INVITATION_LIMIT);
    if !(1..=MAX_INVITATION_LIMIT).contains(&limit) {
        return Err(AppError::Validation(format!(
            "limit must be between 1 and {MAX_INVITATION_LIMIT}"
        )));
    }
    let rows = state.invitation_log.recent(limit).await?;
    Ok(Json(rows))
}
