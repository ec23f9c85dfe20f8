use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::pipeline::query::QueryInterpreter;
use crate::pipeline::scheduling::{InvitationOutbox, PgInvitationOutbox};
use crate::profiles::repository::{ProfileRepository, ProfileStore};
use crate::screening::score::CandidateScorer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds collaborators only; no recruitment data survives between requests.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Read side of the profile store, as the ranker sees it.
    pub repository: Arc<dyn ProfileRepository>,
    /// Write side of the same store, for ingestion.
    pub profile_store: Arc<dyn ProfileStore>,
    /// Pluggable scorer. Default: KeywordExperienceScorer.
    pub scorer: Arc<dyn CandidateScorer>,
    pub interpreter: Arc<dyn QueryInterpreter>,
    pub outbox: Arc<dyn InvitationOutbox>,
    /// Read side of the invitation outbox.
    pub invitation_log: PgInvitationOutbox,
}
