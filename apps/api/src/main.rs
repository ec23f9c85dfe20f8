mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod pipeline;
mod profiles;
mod routes;
mod screening;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::pipeline::query::LlmQueryInterpreter;
use crate::pipeline::scheduling::PgInvitationOutbox;
use crate::profiles::repository::PgProfileRepository;
use crate::routes::build_router;
use crate::screening::score::{CandidateScorer, KeywordExperienceScorer};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Talent API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (runs migrations)
    let db = create_pool(&config.database_url).await?;

    // Profile store: one repository serves both search and ingestion
    let profile_store = PgProfileRepository::new(db.clone());

    // Initialize LLM client for query interpretation
    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let invitation_log = PgInvitationOutbox::new(db.clone());

    let scorer: Arc<dyn CandidateScorer> = Arc::new(KeywordExperienceScorer);
    info!("Candidate scorer: {}", scorer.name());

    let state = AppState {
        repository: Arc::new(profile_store.clone()),
        profile_store: Arc::new(profile_store),
        scorer,
        interpreter: Arc::new(LlmQueryInterpreter(llm)),
        outbox: Arc::new(invitation_log.clone()),
        invitation_log,
        db,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
