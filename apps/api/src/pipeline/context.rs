use serde::{Deserialize, Serialize};

use crate::pipeline::query::JobRequirements;
use crate::pipeline::scheduling::InvitationOutcome;
use crate::screening::candidate::CandidateRecord;
use crate::screening::ranker::Ranking;

/// Everything one recruitment run has produced so far.
///
/// Owned by the caller and passed explicitly to each stage. The service keeps
/// no copy: `/run` returns it, and `/ask` and `/report` take it back in the body.
/// A `None` field means the stage has not run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecruitmentContext {
    #[serde(default)]
    pub hr_query: Option<String>,
    #[serde(default)]
    pub requirements: Option<JobRequirements>,
    #[serde(default)]
    pub profiles: Option<Vec<CandidateRecord>>,
    #[serde(default)]
    pub screening: Option<Ranking>,
    #[serde(default)]
    pub scheduling: Option<Vec<InvitationOutcome>>,
    #[serde(default)]
    pub report: Option<String>,
}

impl RecruitmentContext {
    pub fn new(hr_query: impl Into<String>) -> Self {
        Self {
            hr_query: Some(hr_query.into()),
            ..Default::default()
        }
    }

    pub fn job_role(&self) -> Option<&str> {
        self.requirements.as_ref().map(|r| r.job_role.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_none()
            && self.profiles.is_none()
            && self.screening.is_none()
            && self.scheduling.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_context_deserializes() {
        let ctx: RecruitmentContext = serde_json::from_str(
            r#"{"requirements": {"job_role": "Data Engineer", "essential_skills": ["Spark"]}}"#,
        )
        .unwrap();
        assert_eq!(ctx.job_role(), Some("Data Engineer"));
        assert!(ctx.profiles.is_none());
        assert!(!ctx.is_empty());
    }

    #[test]
    fn test_default_context_is_empty() {
        assert!(RecruitmentContext::default().is_empty());
        assert!(RecruitmentContext::new("need a rust dev").is_empty());
    }
}
