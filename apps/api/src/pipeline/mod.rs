//! Recruitment pipeline: the fixed five-stage run behind `/api/v1/recruitment/run`.
//!
//! Flow: interpret query → search profiles → screen → schedule interviews → report.
//!
//! State lives in a `RecruitmentContext` that the caller owns; stages read and
//! fill it in order and nothing outlives the request.

pub mod answer;
pub mod context;
pub mod handlers;
pub mod prompts;
pub mod query;
pub mod reporting;
pub mod scheduling;

use tracing::info;

use crate::errors::AppError;
use crate::pipeline::context::RecruitmentContext;
use crate::pipeline::query::{JobRequirements, QueryInterpreter};
use crate::pipeline::reporting::generate_report;
use crate::pipeline::scheduling::{schedule_interviews, InvitationOutbox};
use crate::profiles::repository::{ProfileRepository, RepositoryError};
use crate::screening::score::CandidateScorer;
use crate::screening::screen;

/// Collaborators of one pipeline run.
pub struct PipelineDeps<'a> {
    pub interpreter: &'a dyn QueryInterpreter,
    pub repository: &'a dyn ProfileRepository,
    pub scorer: &'a dyn CandidateScorer,
    pub outbox: &'a dyn InvitationOutbox,
    pub meeting_url: &'a str,
    pub sender: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct RunParams {
    pub hr_query: String,
    /// Skips interpretation when the caller already knows the role.
    pub requirements: Option<JobRequirements>,
    pub top_k: usize,
    pub candidate_emails: Vec<String>,
}

pub async fn run_pipeline(
    deps: &PipelineDeps<'_>,
    params: RunParams,
) -> Result<RecruitmentContext, AppError> {
    if params.top_k == 0 {
        return Err(RepositoryError::InvalidLimit(0).into());
    }

    let mut ctx = RecruitmentContext::new(params.hr_query.clone());

    // 1. Interpret the HR query
    let requirements = match params.requirements {
        Some(requirements) => requirements,
        None => deps.interpreter.interpret(&params.hr_query).await?,
    };
    info!(job_role = %requirements.job_role, "Pipeline: job role resolved");
    let job_description = requirements.job_description();
    ctx.requirements = Some(requirements);

    // 2. Similarity search on the raw query
    let profiles = deps
        .repository
        .search(&params.hr_query, params.top_k)
        .await?;
    info!(found = profiles.len(), "Pipeline: profiles retrieved");
    ctx.profiles = Some(profiles);

    // 3. Screening searches and scores against the interpreted role
    let ranking = screen(
        deps.repository,
        deps.scorer,
        &job_description,
        &job_description,
        params.top_k,
    )
    .await?;
    ctx.screening = Some(ranking);

    // 4. Invitations
    let job_role = ctx.job_role().unwrap_or_default().to_string();
    let outcomes = schedule_interviews(
        deps.outbox,
        &params.candidate_emails,
        &job_role,
        deps.meeting_url,
        deps.sender,
    )
    .await;
    info!(
        queued = outcomes.iter().filter(|o| o.is_queued()).count(),
        total = outcomes.len(),
        "Pipeline: interviews scheduled"
    );
    ctx.scheduling = Some(outcomes);

    // 5. Report
    ctx.report = Some(generate_report(&ctx));
    Ok(ctx)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::pipeline::scheduling::test_support::MemoryOutbox;
    use crate::screening::candidate::{CandidateRecord, ATTR_SKILLS, ATTR_YEARS_EXPERIENCE};
    use crate::screening::ranker::Ranking;
    use crate::screening::score::KeywordExperienceScorer;
    use crate::screening::test_support::FixedRepository;

    struct StaticInterpreter {
        calls: AtomicUsize,
        fail: bool,
    }

    impl StaticInterpreter {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl QueryInterpreter for StaticInterpreter {
        async fn interpret(&self, _hr_query: &str) -> Result<JobRequirements, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AppError::Llm("model unavailable".to_string()));
            }
            Ok(JobRequirements::new(
                "Backend Developer",
                vec!["Python".to_string()],
            ))
        }
    }

    fn repo() -> FixedRepository {
        FixedRepository::with(vec![
            CandidateRecord::new("a")
                .with_attribute(ATTR_SKILLS, "Python")
                .with_attribute(ATTR_YEARS_EXPERIENCE, "2"),
            CandidateRecord::new("b")
                .with_attribute(ATTR_SKILLS, "Python, backend developer")
                .with_attribute(ATTR_YEARS_EXPERIENCE, "6"),
        ])
    }

    fn params(emails: Vec<&str>) -> RunParams {
        RunParams {
            hr_query: "we need a python backend dev".to_string(),
            requirements: None,
            top_k: 5,
            candidate_emails: emails.into_iter().map(String::from).collect(),
        }
    }

    #[tokio::test]
    async fn test_run_fills_every_stage() {
        let interpreter = StaticInterpreter::new(false);
        let repository = repo();
        let outbox = MemoryOutbox::default();
        let deps = PipelineDeps {
            interpreter: &interpreter,
            repository: &repository,
            scorer: &KeywordExperienceScorer,
            outbox: &outbox,
            meeting_url: "https://meet.example.com/r",
            sender: None,
        };

        let ctx = run_pipeline(&deps, params(vec!["ada@example.com"]))
            .await
            .unwrap();

        assert_eq!(ctx.job_role(), Some("Backend Developer"));
        assert_eq!(ctx.profiles.as_ref().map(Vec::len), Some(2));
        let ranking = ctx.screening.as_ref().unwrap();
        assert_eq!(ranking.query(), "Backend Developer Python");
        assert_eq!(ranking.entries()[0].candidate.identifier, "b");
        assert_eq!(ctx.scheduling.as_ref().map(Vec::len), Some(1));
        assert!(ctx.report.as_ref().unwrap().contains("CV SCREENING RESULTS:"));

        let calls = repository.calls.lock().unwrap();
        assert_eq!(calls[0].0, "we need a python backend dev");
        assert_eq!(calls[1].0, "Backend Developer Python");
    }

    #[tokio::test]
    async fn test_supplied_requirements_skip_interpretation() {
        let interpreter = StaticInterpreter::new(true);
        let repository = repo();
        let outbox = MemoryOutbox::default();
        let deps = PipelineDeps {
            interpreter: &interpreter,
            repository: &repository,
            scorer: &KeywordExperienceScorer,
            outbox: &outbox,
            meeting_url: "https://meet.example.com/r",
            sender: None,
        };
        let mut p = params(vec![]);
        p.requirements = Some(JobRequirements::new("Data Engineer", vec![]));

        let ctx = run_pipeline(&deps, p).await.unwrap();
        assert_eq!(ctx.job_role(), Some("Data Engineer"));
        assert_eq!(interpreter.calls.load(Ordering::SeqCst), 0);
        assert_eq!(ctx.scheduling, Some(vec![]));
    }

    #[tokio::test]
    async fn test_interpretation_failure_is_typed() {
        let interpreter = StaticInterpreter::new(true);
        let repository = repo();
        let outbox = MemoryOutbox::default();
        let deps = PipelineDeps {
            interpreter: &interpreter,
            repository: &repository,
            scorer: &KeywordExperienceScorer,
            outbox: &outbox,
            meeting_url: "https://meet.example.com/r",
            sender: None,
        };

        let err = run_pipeline(&deps, params(vec![])).await.unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
        assert!(repository.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_repository_failure_aborts_with_repository_error() {
        let interpreter = StaticInterpreter::new(false);
        let repository = FixedRepository::failing();
        let outbox = MemoryOutbox::default();
        let deps = PipelineDeps {
            interpreter: &interpreter,
            repository: &repository,
            scorer: &KeywordExperienceScorer,
            outbox: &outbox,
            meeting_url: "https://meet.example.com/r",
            sender: None,
        };

        let err = run_pipeline(&deps, params(vec![])).await.unwrap_err();
        assert!(matches!(err, AppError::Repository(RepositoryError::Database(_))));
    }

    #[tokio::test]
    async fn test_empty_store_reports_no_matches() {
        let interpreter = StaticInterpreter::new(false);
        let repository = FixedRepository::with(vec![]);
        let outbox = MemoryOutbox::default();
        let deps = PipelineDeps {
            interpreter: &interpreter,
            repository: &repository,
            scorer: &KeywordExperienceScorer,
            outbox: &outbox,
            meeting_url: "https://meet.example.com/r",
            sender: None,
        };

        let ctx = run_pipeline(&deps, params(vec![])).await.unwrap();
        assert!(matches!(ctx.screening, Some(Ranking::NoMatches { .. })));
        assert!(ctx
            .report
            .unwrap()
            .contains("No matching profiles found in the database."));
    }
}
