//! HR questions answered from the recruitment context, or from the profile store as a fallback.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::pipeline::context::RecruitmentContext;
use crate::pipeline::reporting::scheduling_lines;
use crate::profiles::repository::{ProfileRepository, RepositoryError};
use crate::screening::candidate::{ATTR_ROLE, ATTR_SKILLS, ATTR_YEARS_EXPERIENCE};
use crate::screening::report::{render_profile_listing, render_ranking};

const FALLBACK_SEARCH_LIMIT: usize = 3;
const SUMMARY_CHARS: usize = 100;
pub const NO_INFORMATION_MESSAGE: &str = "I don't have specific information to answer this query. Please try a different question or provide more context.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    JobRole,
    Profiles,
    Screening,
    Scheduling,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Answer {
    Context { topic: Topic, text: String },
    Repository { matches: usize, text: String },
    NoInformation { text: String },
}

impl Answer {
    #[cfg(test)]
    pub fn text(&self) -> &str {
        match self {
            Answer::Context { text, .. }
            | Answer::Repository { text, .. }
            | Answer::NoInformation { text } => text,
        }
    }
}

/// First topic keyword found in the question, checked in a fixed order.
pub fn detect_topic(question: &str) -> Option<Topic> {
    let q = question.to_lowercase();
    if q.contains("job role") || q.contains("job_role") || q.contains("position") {
        Some(Topic::JobRole)
    } else if q.contains("profile") {
        Some(Topic::Profiles)
    } else if q.contains("screen") || q.contains("rank") {
        Some(Topic::Screening)
    } else if q.contains("schedul") || q.contains("invitation") {
        Some(Topic::Scheduling)
    } else {
        None
    }
}

/// Answers from the context when the question's topic has data there.
pub fn answer_from_context(ctx: &RecruitmentContext, question: &str) -> Option<Answer> {
    let topic = detect_topic(question)?;
    let text = match topic {
        Topic::JobRole => format!("Current job role: {}", ctx.job_role()?),
        Topic::Profiles => {
            let profiles = ctx.profiles.as_ref()?;
            format!(
                "Candidate profiles found:\n{}",
                render_profile_listing(ctx.hr_query.as_deref().unwrap_or(""), profiles)
            )
        }
        Topic::Screening => format!(
            "Screening results:\n{}",
            render_ranking(ctx.screening.as_ref()?)
        ),
        Topic::Scheduling => {
            ctx.scheduling.as_ref()?;
            format!("Interview scheduling information:\n{}", scheduling_lines(ctx))
        }
    };
    Some(Answer::Context { topic, text })
}

/// Context first, then a similarity search over stored profiles.
///
/// A failing repository is an error, not a "no information" answer.
pub async fn answer_question(
    ctx: &RecruitmentContext,
    question: &str,
    repository: &dyn ProfileRepository,
) -> Result<Answer, RepositoryError> {
    if let Some(answer) = answer_from_context(ctx, question) {
        return Ok(answer);
    }

    debug!("Question not answerable from context; searching profiles");
    let candidates = repository.search(question, FALLBACK_SEARCH_LIMIT).await?;
    if candidates.is_empty() {
        return Ok(Answer::NoInformation {
            text: NO_INFORMATION_MESSAGE.to_string(),
        });
    }

    let mut text = format!("Based on the available information, here's what I found for '{question}':\n\n");
    for (i, candidate) in candidates.iter().enumerate() {
        text.push_str(&format!("--- Candidate {}: {} ---\n", i + 1, candidate.label()));
        for (key, label) in [
            (ATTR_ROLE, "Role"),
            (ATTR_SKILLS, "Skills"),
            (ATTR_YEARS_EXPERIENCE, "Experience"),
        ] {
            if let Some(value) = candidate.attribute(key) {
                text.push_str(&format!("{label}: {value}\n"));
            }
        }
        if let Some(summary) = summarize(&candidate.raw_text) {
            text.push_str(&format!("Profile Summary: {summary}\n"));
        }
        text.push('\n');
    }

    Ok(Answer::Repository {
        matches: candidates.len(),
        text,
    })
}

/// First 100 characters of the profile text, with an ellipsis when cut.
fn summarize(raw_text: &str) -> Option<String> {
    let text = raw_text.trim();
    if text.is_empty() {
        return None;
    }
    if text.chars().count() <= SUMMARY_CHARS {
        return Some(text.to_string());
    }
    let cut: String = text.chars().take(SUMMARY_CHARS).collect();
    Some(format!("{cut}..."))
}
