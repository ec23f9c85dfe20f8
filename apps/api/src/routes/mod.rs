pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::pipeline::handlers as recruitment;
use crate::profiles::handlers as profiles;
use crate::screening::handlers as screening;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profiles API
        .route("/api/v1/profiles", post(profiles::handle_ingest))
        .route("/api/v1/profiles/upload", post(profiles::handle_upload))
        .route("/api/v1/profiles/search", get(profiles::handle_search))
        // Screening API
        .route("/api/v1/screening", post(screening::handle_screen))
        // Recruitment pipeline API
        .route("/api/v1/recruitment/run", post(recruitment::handle_run))
        .route("/api/v1/recruitment/ask", post(recruitment::handle_ask))
        .route("/api/v1/recruitment/report", post(recruitment::handle_report))
        .route(
            "/api/v1/recruitment/invitations",
            get(recruitment::handle_list_invitations),
        )
        .with_state(state)
}
