//! Candidate scoring: a pluggable, trait-based scorer of one candidate against a job description.
//!
//! Default: `KeywordExperienceScorer` (pure, deterministic, total over all inputs).
//!
//! `AppState` holds an `Arc<dyn CandidateScorer>`, chosen at startup.

use serde::{Deserialize, Serialize};

use crate::screening::candidate::{CandidateRecord, ATTR_SKILLS, ATTR_YEARS_EXPERIENCE};
use crate::screening::tier::{classify, Recommendation};

pub const MAX_EXPERIENCE_SCORE: u32 = 40;
pub const MAX_SKILL_SCORE: u32 = 60;
const POINTS_PER_YEAR: f64 = 8.0;
const POINTS_PER_SKILL_HIT: u32 = 5;
/// Tokens of this many characters or fewer are ignored ("and", "the", "api").
const MIN_TOKEN_CHARS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub experience_score: u32, // 0 – 40
    pub skill_score: u32,      // 0 – 60
    pub total_score: u32,      // experience_score + skill_score
    pub recommendation: Recommendation,
}

impl ScoreResult {
    /// Builds a result from raw sub-scores, clamping each before summation.
    pub fn from_parts(experience_score: u32, skill_score: u32) -> Self {
        let experience_score = experience_score.min(MAX_EXPERIENCE_SCORE);
        let skill_score = skill_score.min(MAX_SKILL_SCORE);
        let total_score = experience_score + skill_score;
        Self {
            experience_score,
            skill_score,
            total_score,
            recommendation: classify(total_score),
        }
    }
}

/// Scores one candidate against a job description. Implementations must be total:
/// a malformed record degrades to a zero contribution, it never fails the pass.
pub trait CandidateScorer: Send + Sync {
    fn compute_score(&self, job_description: &str, candidate: &CandidateRecord) -> ScoreResult;

    /// Short backend name, reported alongside rankings.
    fn name(&self) -> &'static str;
}

/// Experience tenure plus substring skill overlap.
///
/// A job-description token matches when it occurs anywhere inside the skills
/// attribute, not only as a whole skill entry, and every long token of the
/// description counts, not only skill words. Both are recall-biased on purpose.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordExperienceScorer;

impl CandidateScorer for KeywordExperienceScorer {
    fn compute_score(&self, job_description: &str, candidate: &CandidateRecord) -> ScoreResult {
        compute_score(job_description, candidate)
    }

    fn name(&self) -> &'static str {
        "keyword_experience"
    }
}

pub fn compute_score(job_description: &str, candidate: &CandidateRecord) -> ScoreResult {
    let years = parse_years(candidate.attributes.get(ATTR_YEARS_EXPERIENCE).map(String::as_str));
    let skills = candidate
        .attributes
        .get(ATTR_SKILLS)
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    ScoreResult::from_parts(experience_score(years), skill_score(job_description, &skills))
}

/// Lenient years parse: anything that is not a finite number counts as zero.
pub fn parse_years(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|y| y.is_finite())
        .unwrap_or(0.0)
}

fn experience_score(years: f64) -> u32 {
    (years * POINTS_PER_YEAR)
        .floor()
        .clamp(0.0, MAX_EXPERIENCE_SCORE as f64) as u32
}

/// `skills_lower` must already be lowercased.
fn skill_score(job_description: &str, skills_lower: &str) -> u32 {
    let tally = job_description
        .to_lowercase()
        .split_whitespace()
        .filter(|token| token.chars().count() > MIN_TOKEN_CHARS)
        .filter(|token| skills_lower.contains(token))
        .fold(0_u32, |acc, _| acc.saturating_add(POINTS_PER_SKILL_HIT));

    tally.min(MAX_SKILL_SCORE)
}
