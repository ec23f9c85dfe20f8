// Candidate screening: scoring, tiering, ranking and report rendering.
// Everything here is pure except `screen`, which pulls candidates from the profile store.

pub mod candidate;
pub mod handlers;
pub mod ranker;
pub mod report;
pub mod score;
pub mod tier;

use tracing::{debug, info};

use crate::profiles::repository::{ProfileRepository, RepositoryError};
use crate::screening::ranker::{rank, Ranking};
use crate::screening::score::CandidateScorer;

/// Retrieves up to `limit` candidates for `search_query` and ranks them against `job_description`.
///
/// A repository failure is returned as-is and is never reported as "no matches".
pub async fn screen(
    repository: &dyn ProfileRepository,
    scorer: &dyn CandidateScorer,
    search_query: &str,
    job_description: &str,
    limit: usize,
) -> Result<Ranking, RepositoryError> {
    if limit == 0 {
        return Err(RepositoryError::InvalidLimit(limit));
    }

    let candidates = repository.search(search_query, limit).await?;
    debug!(
        retrieved = candidates.len(),
        limit, "Candidates retrieved for screening"
    );

    let ranking = rank(scorer, job_description, candidates);
    info!(
        candidates = ranking.candidate_count(),
        scorer = scorer.name(),
        "Screening complete"
    );
    Ok(ranking)
}


#[cfg(test)]
mod tests {
    use super::test_support::FixedRepository;
    use super::*;
    use crate::screening::candidate::{CandidateRecord, ATTR_SKILLS, ATTR_YEARS_EXPERIENCE};
    use crate::screening::score::KeywordExperienceScorer;

    fn candidate(id: &str, skills: &str, years: &str) -> CandidateRecord {
        CandidateRecord::new(id)
            .with_attribute(ATTR_SKILLS, skills)
            .with_attribute(ATTR_YEARS_EXPERIENCE, years)
    }

    #[tokio::test]
    async fn test_empty_repository_yields_no_matches() {
        let repo = FixedRepository::with(vec![]);
        let ranking = screen(&repo, &KeywordExperienceScorer, "rust", "rust", 5)
            .await
            .unwrap();
        assert!(matches!(ranking, Ranking::NoMatches { .. }));
    }

    #[tokio::test]
    async fn test_repository_failure_is_distinct_from_no_matches() {
        let repo = FixedRepository::failing();
        let result = screen(&repo, &KeywordExperienceScorer, "rust", "rust", 5).await;
        assert!(matches!(result, Err(RepositoryError::Database(_))));
    }

    #[tokio::test]
    async fn test_zero_limit_rejected_before_search() {
        let repo = FixedRepository::with(vec![candidate("a", "rust", "1")]);
        let result = screen(&repo, &KeywordExperienceScorer, "rust", "rust", 0).await;
        assert!(matches!(result, Err(RepositoryError::InvalidLimit(0))));
        assert!(repo.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_limit_and_query_forwarded_to_repository() {
        let repo = FixedRepository::with(vec![
            candidate("a", "rust", "1"),
            candidate("b", "rust", "2"),
            candidate("c", "rust", "3"),
        ]);
        let ranking = screen(
            &repo,
            &KeywordExperienceScorer,
            "senior rust engineer",
            "rust",
            2,
        )
        .await
        .unwrap();

        assert_eq!(ranking.candidate_count(), 2);
        assert_eq!(
            repo.calls.lock().unwrap().as_slice(),
            &[("senior rust engineer".to_string(), 2)]
        );
    }

    #[tokio::test]
    async fn test_equal_scores_preserve_retrieval_order_end_to_end() {
        let repo = FixedRepository::with(vec![
            candidate("a", "rust kubernetes terraform", "5"),
            candidate("b", "Terraform/Kubernetes/Rust", "5"),
        ]);
        let ranking = screen(
            &repo,
            &KeywordExperienceScorer,
            "infra",
            "rust kubernetes terraform",
            5,
        )
        .await
        .unwrap();

        let order: Vec<&str> = ranking
            .entries()
            .iter()
            .map(|e| e.candidate.identifier.as_str())
            .collect();
        assert_eq!(order, vec!["a", "b"]);
        assert!(ranking.entries().iter().all(|e| e.score.total_score == 55));
    }
}
