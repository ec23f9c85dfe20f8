//! HR query interpretation: turns a recruiter's free-text request into a job role and skills.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::{JSON_ONLY_INSTRUCTION, NO_INVENTION_INSTRUCTION};
use crate::llm_client::LlmClient;
use crate::pipeline::prompts::{QUERY_INTERPRET_PROMPT_TEMPLATE, QUERY_INTERPRET_SYSTEM};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequirements {
    pub job_role: String,
    #[serde(default)]
    pub essential_skills: Vec<String>,
}

impl JobRequirements {
    pub fn new(job_role: impl Into<String>, essential_skills: Vec<String>) -> Self {
        Self {
            job_role: job_role.into(),
            essential_skills,
        }
        .normalized()
    }

    /// Text the screening stage scores against: the role followed by its skills.
    pub fn job_description(&self) -> String {
        std::iter::once(self.job_role.as_str())
            .chain(self.essential_skills.iter().map(String::as_str))
            .collect::<Vec<&str>>()
            .join(" ")
    }

    /// Trims fields, drops a leading "Job Role:" label and blank skills.
    fn normalized(self) -> Self {
        let role = self.job_role.trim();
        let role = role
            .get(..9)
            .filter(|p| p.eq_ignore_ascii_case("job role:"))
            .map(|_| role[9..].trim())
            .unwrap_or(role)
            .to_string();

        let essential_skills = self
            .essential_skills
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            job_role: role,
            essential_skills,
        }
    }
}

#[async_trait]
pub trait QueryInterpreter: Send + Sync {
    async fn interpret(&self, hr_query: &str) -> Result<JobRequirements, AppError>;
}

/// Interprets queries with the LLM.
pub struct LlmQueryInterpreter(pub LlmClient);

#[async_trait]
impl QueryInterpreter for LlmQueryInterpreter {
    async fn interpret(&self, hr_query: &str) -> Result<JobRequirements, AppError> {
        let prompt = QUERY_INTERPRET_PROMPT_TEMPLATE.replace("{hr_query}", hr_query);
        let system =
            format!("{QUERY_INTERPRET_SYSTEM} {NO_INVENTION_INSTRUCTION} {JSON_ONLY_INSTRUCTION}");

        let raw: JobRequirements = self
            .0
            .call_json(&prompt, &system)
            .await
            .map_err(|e| AppError::Llm(format!("HR query interpretation failed: {e}")))?;

        let requirements = raw.normalized();
        if requirements.job_role.is_empty() {
            return Err(AppError::Llm(
                "HR query interpretation returned an empty job role".to_string(),
            ));
        }

        info!(
            job_role = %requirements.job_role,
            skills = requirements.essential_skills.len(),
            "Interpreted HR query"
        );
        Ok(requirements)
    }
}
