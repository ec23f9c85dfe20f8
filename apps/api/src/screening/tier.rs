use std::fmt;

use serde::{Deserialize, Serialize};

/// Recommendation tier derived from a candidate's total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "Highly Recommended")]
    HighlyRecommended,
    #[serde(rename = "Recommended")]
    Recommended,
    #[serde(rename = "Consider for Interview")]
    ConsiderForInterview,
    #[serde(rename = "Not Recommended")]
    NotRecommended,
}

impl Recommendation {
    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::HighlyRecommended => "Highly Recommended",
            Recommendation::Recommended => "Recommended",
            Recommendation::ConsiderForInterview => "Consider for Interview",
            Recommendation::NotRecommended => "Not Recommended",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Maps a total score to its tier. Thresholds are evaluated top-down.
pub fn classify(total_score: u32) -> Recommendation {
    if total_score >= 80 {
        Recommendation::HighlyRecommended
    } else if total_score >= 60 {
        Recommendation::Recommended
    } else if total_score >= 40 {
        Recommendation::ConsiderForInterview
    } else {
        Recommendation::NotRecommended
    }
}
