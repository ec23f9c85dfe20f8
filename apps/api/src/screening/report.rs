//! Plain-text rendering of rankings and profile listings.
//!
//! Only data held by the candidate record is printed. Absent attributes are
//! skipped, never replaced with placeholders.

use crate::screening::candidate::CandidateRecord;
use crate::screening::ranker::{RankedEntry, Ranking};
use crate::screening::score::{MAX_EXPERIENCE_SCORE, MAX_SKILL_SCORE};

pub const SCREENING_HEADER: &str = "=== CV SCREENING RESULTS ===";
pub const NO_MATCHES_MESSAGE: &str = "No matching profiles found in the database.";
pub const DATABASE_DISCLAIMER: &str = "DISCLAIMER: All profile information above comes directly from the database. No profile data has been generated or modified.";

/// Renders a ranking as the screening report shown to recruiters.
pub fn render_ranking(ranking: &Ranking) -> String {
    let entries = match ranking {
        Ranking::NoMatches { .. } => return NO_MATCHES_MESSAGE.to_string(),
        Ranking::Ranked { entries, .. } => entries,
    };

    let mut out = String::new();
    out.push_str(&format!("{SCREENING_HEADER}\n\n"));
    out.push_str(&format!(
        "Screened {} candidates from the database for job: {}\n\n",
        entries.len(),
        ranking.query()
    ));
    out.push_str("Candidates Ranked by Suitability (DATABASE PROFILES ONLY):\n\n");

    for entry in entries {
        out.push_str(&format!(
            "Rank #{} (Score: {}/100)\n",
            entry.rank, entry.score.total_score
        ));
        out.push_str(&render_entry(entry));
        out.push_str("\n\n");
    }

    out.push_str(DATABASE_DISCLAIMER);
    out
}

/// One candidate block: header, present attributes, evaluation.
pub fn render_entry(entry: &RankedEntry) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "--- Candidate {}: {} ---\n",
        entry.retrieval_position,
        entry.candidate.label()
    ));
    write_attributes(&mut out, &entry.candidate);

    let score = &entry.score;
    out.push_str("\nEvaluation:\n");
    out.push_str(&format!(
        "Experience Score: {}/{MAX_EXPERIENCE_SCORE}\n",
        score.experience_score
    ));
    out.push_str(&format!(
        "Skills Match Score: {}/{MAX_SKILL_SCORE}\n",
        score.skill_score
    ));
    out.push_str(&format!("Overall Score: {}/100\n", score.total_score));
    out.push_str(&format!("Recommendation: {}\n", score.recommendation));
    out
}

/// Renders the similarity-search result list (no scoring involved).
pub fn render_profile_listing(query: &str, candidates: &[CandidateRecord]) -> String {
    if candidates.is_empty() {
        return NO_MATCHES_MESSAGE.to_string();
    }

    let mut blocks = Vec::with_capacity(candidates.len());
    for (i, candidate) in candidates.iter().enumerate() {
        let mut out = String::new();
        out.push_str(&format!("--- Profile {}: {} ---\n", i + 1, candidate.label()));
        write_attributes(&mut out, candidate);

        let text = candidate.raw_text.trim();
        if !text.is_empty() {
            out.push_str(&format!("\nProfile Details:\n{text}\n"));
        }
        if let Some(relevance) = candidate.relevance {
            out.push_str(&format!("\nRelevance Score: {relevance:.4}\n"));
        }
        blocks.push(out);
    }

    format!(
        "Found {} profiles similar to: {query}\n\n{}",
        candidates.len(),
        blocks.join("\n")
    )
}

fn write_attributes(out: &mut String, candidate: &CandidateRecord) {
    for (label, value) in candidate.present_attributes() {
        out.push_str(&format!("{label}: {value}\n"));
    }
}
