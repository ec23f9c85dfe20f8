use anyhow::{Context, Result};

const DEFAULT_MEETING_URL: &str = "https://meet.google.com/interview-room";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Number of candidates pulled from the profile store when a request omits `top_k`.
    pub default_top_k: usize,
    /// Meeting link embedded in interview invitations.
    pub interview_meeting_url: String,
    pub hr_sender_email: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let default_top_k = optional_env("DEFAULT_TOP_K")
            .map(|v| v.parse::<usize>())
            .transpose()
            .context("DEFAULT_TOP_K must be a positive integer")?
            .unwrap_or(5);
        if default_top_k == 0 {
            anyhow::bail!("DEFAULT_TOP_K must be at least 1");
        }

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: optional_env("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            default_top_k,
            interview_meeting_url: optional_env("INTERVIEW_MEETING_URL")
                .unwrap_or_else(|| DEFAULT_MEETING_URL.to_string()),
            hr_sender_email: optional_env("HR_SENDER_EMAIL"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Reads an optional variable, treating blank values as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
