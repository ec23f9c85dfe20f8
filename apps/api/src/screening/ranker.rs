//! Candidate ranking: scores a retrieved candidate set and orders it by suitability.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::screening::candidate::CandidateRecord;
use crate::screening::score::{CandidateScorer, ScoreResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// 1-based position after sorting.
    pub rank: usize,
    /// 1-based position in the order the repository returned the candidate.
    pub retrieval_position: usize,
    pub candidate: CandidateRecord,
    pub score: ScoreResult,
}

/// Outcome of one ranking pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Ranking {
    /// The repository returned no candidates for the query.
    NoMatches { query: String },
    Ranked {
        query: String,
        scorer_backend: String,
        entries: Vec<RankedEntry>,
    },
}

impl Ranking {
    pub fn query(&self) -> &str {
        match self {
            Ranking::NoMatches { query } | Ranking::Ranked { query, .. } => query,
        }
    }

    pub fn entries(&self) -> &[RankedEntry] {
        match self {
            Ranking::NoMatches { .. } => &[],
            Ranking::Ranked { entries, .. } => entries,
        }
    }

    pub fn candidate_count(&self) -> usize {
        self.entries().len()
    }
}

/// Scores every candidate in input order, then stable-sorts by total score, highest first.
///
/// Equal totals keep the repository's order, which is itself a relevance signal.
pub fn rank(
    scorer: &dyn CandidateScorer,
    job_description: &str,
    candidates: Vec<CandidateRecord>,
) -> Ranking {
    if candidates.is_empty() {
        return Ranking::NoMatches {
            query: job_description.to_string(),
        };
    }

    let mut scored: Vec<(usize, CandidateRecord, ScoreResult)> = candidates
        .into_iter()
        .enumerate()
        .map(|(i, candidate)| {
            let score = scorer.compute_score(job_description, &candidate);
            (i + 1, candidate, score)
        })
        .collect();

    // `sort_by_key` is stable
    scored.sort_by_key(|(_, _, score)| Reverse(score.total_score));

    let entries = scored
        .into_iter()
        .enumerate()
        .map(|(i, (retrieval_position, candidate, score))| RankedEntry {
            rank: i + 1,
            retrieval_position,
            candidate,
            score,
        })
        .collect();

    Ranking::Ranked {
        query: job_description.to_string(),
        scorer_backend: scorer.name().to_string(),
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::candidate::{ATTR_SKILLS, ATTR_YEARS_EXPERIENCE};
    use crate::screening::score::KeywordExperienceScorer;

    fn candidate(id: &str, skills: &str, years: &str) -> CandidateRecord {
        CandidateRecord::new(id)
            .with_name(id.to_uppercase())
            .with_attribute(ATTR_SKILLS, skills)
            .with_attribute(ATTR_YEARS_EXPERIENCE, years)
    }

    fn ids(ranking: &Ranking) -> Vec<&str> {
        ranking
            .entries()
            .iter()
            .map(|e| e.candidate.identifier.as_str())
            .collect()
    }

    #[test]
    fn test_empty_input_is_no_matches() {
        let ranking = rank(&KeywordExperienceScorer, "rust engineer", vec![]);
        assert_eq!(
            ranking,
            Ranking::NoMatches {
                query: "rust engineer".to_string()
            }
        );
        assert_eq!(ranking.candidate_count(), 0);
    }

    #[test]
    fn test_sorted_descending_with_one_based_ranks() {
        let candidates = vec![
            candidate("low", "cobol", "1"),
            candidate("high", "rust, kubernetes, terraform", "6"),
            candidate("mid", "rust", "3"),
        ];
        let ranking = rank(
            &KeywordExperienceScorer,
            "rust kubernetes terraform",
            candidates,
        );

        assert_eq!(ids(&ranking), vec!["high", "mid", "low"]);
        let ranks: Vec<usize> = ranking.entries().iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        let positions: Vec<usize> = ranking
            .entries()
            .iter()
            .map(|e| e.retrieval_position)
            .collect();
        assert_eq!(positions, vec![2, 3, 1]);

        for pair in ranking.entries().windows(2) {
            assert!(pair[0].score.total_score >= pair[1].score.total_score);
        }
    }

    #[test]
    fn test_equal_scores_keep_repository_order() {
        // 5 years → 40, three skill hits → 15, total 55 for both
        let jd = "rust kubernetes terraform";
        let a = candidate("a", "Rust, Kubernetes, Terraform", "5");
        let b = candidate("b", "terraform kubernetes rust", "6");
        let ranking = rank(&KeywordExperienceScorer, jd, vec![a, b]);

        let totals: Vec<u32> = ranking
            .entries()
            .iter()
            .map(|e| e.score.total_score)
            .collect();
        assert_eq!(totals, vec![55, 55]);
        assert_eq!(ids(&ranking), vec!["a", "b"]);
    }

    #[test]
    fn test_stability_across_many_ties() {
        let candidates: Vec<CandidateRecord> = (0..8)
            .map(|i| candidate(&format!("c{i}"), "", "1"))
            .collect();
        let ranking = rank(&KeywordExperienceScorer, "anything", candidates);
        assert_eq!(
            ids(&ranking),
            vec!["c0", "c1", "c2", "c3", "c4", "c5", "c6", "c7"]
        );
    }

    #[test]
    fn test_rank_is_idempotent() {
        let candidates = vec![
            candidate("a", "python", "2"),
            candidate("b", "python django", "2"),
            candidate("c", "django", "9"),
        ];
        let first = rank(&KeywordExperienceScorer, "python django", candidates.clone());
        let second = rank(&KeywordExperienceScorer, "python django", candidates);
        assert_eq!(first, second);
    }

    #[test]
    fn test_malformed_record_does_not_abort_pass() {
        let broken = CandidateRecord::new("broken").with_attribute(ATTR_YEARS_EXPERIENCE, "N/A");
        let ranking = rank(
            &KeywordExperienceScorer,
            "rust",
            vec![broken, candidate("ok", "rust", "2")],
        );
        assert_eq!(ids(&ranking), vec!["ok", "broken"]);
        assert_eq!(ranking.entries()[1].score.total_score, 0);
    }

    #[test]
    fn test_ranked_records_scorer_backend() {
        let ranking = rank(&KeywordExperienceScorer, "rust", vec![candidate("a", "rust", "1")]);
        match ranking {
            Ranking::Ranked { scorer_backend, .. } => {
                assert_eq!(scorer_backend, "keyword_experience")
            }
            other => panic!("expected ranked outcome, got {other:?}"),
        }
    }
}
