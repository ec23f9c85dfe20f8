//! Recruitment reports built from an explicit `RecruitmentContext`.

use serde::{Deserialize, Serialize};

use crate::pipeline::context::RecruitmentContext;
use crate::screening::ranker::Ranking;
use crate::screening::report::{render_profile_listing, render_ranking};
use crate::screening::tier::Recommendation;

/// Candidates above this total are named for a technical assessment.
const ASSESSMENT_THRESHOLD: u32 = 70;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Summary,
    Candidates,
    Screening,
    #[default]
    Full,
}

/// The end-of-pipeline report: every stage that ran, then recommendations,
/// next steps and a summary.
pub fn generate_report(ctx: &RecruitmentContext) -> String {
    let mut out = String::from("=== COMPREHENSIVE RECRUITMENT REPORT ===\n\n");

    if let Some(req) = &ctx.requirements {
        out.push_str("JOB POSITION:\n");
        out.push_str(&format!("Job Role: {}\n", req.job_role));
        if !req.essential_skills.is_empty() {
            out.push_str(&format!("Essential Skills: {}\n", req.essential_skills.join(", ")));
        }
        out.push('\n');
    }

    if let Some(profiles) = &ctx.profiles {
        out.push_str("CANDIDATE SEARCH RESULTS:\n");
        out.push_str(&render_profile_listing(search_query(ctx), profiles));
        out.push_str("\n\n");
    }

    if let Some(ranking) = &ctx.screening {
        out.push_str("CV SCREENING RESULTS:\n");
        out.push_str(&render_ranking(ranking));
        out.push_str("\n\n");
    }

    if ctx.scheduling.is_some() {
        out.push_str("INTERVIEW SCHEDULING:\n");
        out.push_str(&scheduling_lines(ctx));
        out.push_str("\n\n");
    }

    out.push_str("RECOMMENDATIONS:\n");
    for line in recommendations(ctx) {
        out.push_str(&format!("- {line}\n"));
    }
    out.push('\n');

    out.push_str("NEXT STEPS:\n");
    out.push_str("1. Conduct interviews with top candidates\n");
    out.push_str("2. Gather feedback from hiring managers\n");
    out.push_str("3. Proceed with reference checks for promising candidates\n");
    out.push_str("4. Prepare offer packages for final candidates\n\n");

    out.push_str("SUMMARY:\n");
    if ctx.screening.is_some() && ctx.profiles.is_some() {
        out.push_str(
            "The recruitment process is progressing as expected. \
             Qualified candidates have been identified and evaluated. \
             Proceeding to the interview phase with selected candidates.",
        );
    } else {
        out.push_str(
            "The recruitment process has been initialized. \
             Candidate search and screening is still in progress. \
             More data is needed to make final recommendations.",
        );
    }

    out
}

/// A narrower view over the context, for the Q&A surface.
pub fn report_view(ctx: &RecruitmentContext, kind: ReportKind) -> String {
    if ctx.is_empty() {
        return "No recruitment data available for reporting.".to_string();
    }

    match kind {
        ReportKind::Summary => {
            let status = if ctx.screening.is_some() {
                "Screening completed"
            } else {
                "In progress"
            };
            let interviews = match &ctx.scheduling {
                Some(outcomes) if outcomes.iter().any(|o| o.is_queued()) => "Scheduled",
                _ => "Not yet scheduled",
            };
            format!(
                "RECRUITMENT SUMMARY:\nJob Role: {}\nCandidates Found: {}\nStatus: {status}\nInterviews: {interviews}",
                ctx.job_role().unwrap_or("Not specified"),
                ctx.profiles.as_ref().map(Vec::len).unwrap_or(0),
            )
        }
        ReportKind::Candidates => match &ctx.profiles {
            Some(profiles) => format!(
                "CANDIDATE PROFILES:\n{}",
                render_profile_listing(search_query(ctx), profiles)
            ),
            None => "No candidate profiles available yet.".to_string(),
        },
        ReportKind::Screening => match &ctx.screening {
            Some(ranking) => format!("SCREENING RESULTS:\n{}", render_ranking(ranking)),
            None => "No screening results available yet.".to_string(),
        },
        ReportKind::Full => {
            let mut out = String::from("=== RECRUITMENT REPORT ===\n\n");
            if let Some(role) = ctx.job_role() {
                out.push_str(&format!("JOB ROLE: {role}\n\n"));
            }
            if let Some(profiles) = &ctx.profiles {
                out.push_str(&format!(
                    "CANDIDATE PROFILES:\n{}\n\n",
                    render_profile_listing(search_query(ctx), profiles)
                ));
            }
            if let Some(ranking) = &ctx.screening {
                out.push_str(&format!("SCREENING RESULTS:\n{}\n\n", render_ranking(ranking)));
            }
            if ctx.scheduling.is_some() {
                out.push_str(&format!("INTERVIEW SCHEDULING:\n{}\n", scheduling_lines(ctx)));
            }
            out
        }
    }
}

/// Scheduling outcomes, one per line, or a note when nobody was invited.
pub fn scheduling_lines(ctx: &RecruitmentContext) -> String {
    match &ctx.scheduling {
        Some(outcomes) if !outcomes.is_empty() => outcomes
            .iter()
            .map(|o| o.summary_line())
            .collect::<Vec<_>>()
            .join("\n"),
        Some(_) => "No candidate addresses were provided; no invitations sent.".to_string(),
        None => "Interviews have not been scheduled yet.".to_string(),
    }
}

fn search_query(ctx: &RecruitmentContext) -> &str {
    ctx.hr_query.as_deref().unwrap_or("")
}

fn recommendations(ctx: &RecruitmentContext) -> Vec<String> {
    let mut lines = Vec::new();

    match &ctx.screening {
        Some(Ranking::Ranked { entries, .. }) => {
            let advancing = entries
                .iter()
                .filter(|e| {
                    matches!(
                        e.score.recommendation,
                        Recommendation::HighlyRecommended | Recommendation::Recommended
                    )
                })
                .count();
            if advancing > 0 {
                lines.push(format!(
                    "Proceed with interviews for the {advancing} recommended candidate(s)"
                ));
            } else {
                lines.push("No candidate reached the Recommended tier".to_string());
            }

            let assess: Vec<String> = entries
                .iter()
                .filter(|e| e.score.total_score > ASSESSMENT_THRESHOLD)
                .map(|e| format!("{} ({})", e.candidate.label(), e.score.total_score))
                .collect();
            if !assess.is_empty() {
                lines.push(format!(
                    "Schedule technical assessments for candidates with scores above {ASSESSMENT_THRESHOLD}: {}",
                    assess.join(", ")
                ));
            }
        }
        Some(Ranking::NoMatches { .. }) => {
            lines.push("Expand search parameters to increase candidate pool".to_string());
        }
        None => {
            lines.push("Further candidate screening recommended".to_string());
            lines.push("Expand search parameters to increase candidate pool".to_string());
        }
    }

    lines.push("Consider revisiting job requirements if candidate match rate is low".to_string());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::query::JobRequirements;
    use crate::pipeline::scheduling::InvitationOutcome;
    use crate::screening::candidate::{CandidateRecord, ATTR_SKILLS, ATTR_YEARS_EXPERIENCE};
    use crate::screening::ranker::rank;
    use crate::screening::score::KeywordExperienceScorer;
    use uuid::Uuid;

    fn full_context() -> RecruitmentContext {
        let strong = CandidateRecord::new("s")
            .with_name("Strong Sam")
            .with_attribute(ATTR_SKILLS, "python django backend developer")
            .with_attribute(ATTR_YEARS_EXPERIENCE, "6");
        let weak = CandidateRecord::new("w")
            .with_name("Weak Will")
            .with_attribute(ATTR_YEARS_EXPERIENCE, "1");
        let profiles = vec![strong, weak];

        let mut ctx = RecruitmentContext::new("need a python backend developer");
        ctx.requirements = Some(JobRequirements::new(
            "Backend Developer",
            vec!["Python".to_string(), "Django".to_string()],
        ));
        ctx.screening = Some(rank(
            &KeywordExperienceScorer,
            "backend developer python django",
            profiles.clone(),
        ));
        ctx.profiles = Some(profiles);
        ctx.scheduling = Some(vec![InvitationOutcome::Queued {
            recipient: "sam@example.com".to_string(),
            invitation_id: Uuid::new_v4(),
            meeting_url: "https://meet.example.com/x".to_string(),
        }]);
        ctx
    }

    #[test]
    fn test_full_report_sections_in_order() {
        let report = generate_report(&full_context());
        let sections = [
            "JOB POSITION:",
            "CANDIDATE SEARCH RESULTS:",
            "CV SCREENING RESULTS:",
            "INTERVIEW SCHEDULING:",
            "RECOMMENDATIONS:",
            "NEXT STEPS:",
            "SUMMARY:",
        ];
        let positions: Vec<usize> = sections
            .iter()
            .map(|s| report.find(s).unwrap_or_else(|| panic!("missing {s}")))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(report.contains("Essential Skills: Python, Django"));
        assert!(report.contains("Invitation queued for sam@example.com"));
        assert!(report.contains("Qualified candidates have been identified"));
    }

    #[test]
    fn test_assessment_recommendation_names_high_scorers() {
        // Strong Sam: 40 experience + 7 skill hits (35) = 75; Weak Will: 8
        let mut ctx = full_context();
        ctx.screening = Some(rank(
            &KeywordExperienceScorer,
            "python python python django django backend developer",
            ctx.profiles.clone().unwrap(),
        ));
        let report = generate_report(&ctx);
        assert!(report.contains("scores above 70: Strong Sam (75)"));
        assert!(!report.contains("Weak Will ("));
    }

    #[test]
    fn test_empty_context_report_is_initializing() {
        let report = generate_report(&RecruitmentContext::default());
        assert!(report.contains("Further candidate screening recommended"));
        assert!(report.contains("The recruitment process has been initialized."));
        assert!(!report.contains("JOB POSITION:"));
    }

    #[test]
    fn test_summary_view() {
        let view = report_view(&full_context(), ReportKind::Summary);
        assert!(view.contains("Job Role: Backend Developer"));
        assert!(view.contains("Candidates Found: 2"));
        assert!(view.contains("Status: Screening completed"));
        assert!(view.contains("Interviews: Scheduled"));
    }

    #[test]
    fn test_views_on_missing_stages() {
        let mut ctx = RecruitmentContext::new("q");
        ctx.requirements = Some(JobRequirements::new("SRE", vec![]));
        assert_eq!(
            report_view(&ctx, ReportKind::Candidates),
            "No candidate profiles available yet."
        );
        assert_eq!(
            report_view(&ctx, ReportKind::Screening),
            "No screening results available yet."
        );
        assert_eq!(
            report_view(&RecruitmentContext::default(), ReportKind::Full),
            "No recruitment data available for reporting."
        );
    }

    #[test]
    fn test_scheduling_lines_without_addresses() {
        let mut ctx = RecruitmentContext::default();
        ctx.scheduling = Some(vec![]);
        assert_eq!(
            scheduling_lines(&ctx),
            "No candidate addresses were provided; no invitations sent."
        );
    }

    #[test]
    fn test_report_kind_deserializes_snake_case() {
        let kind: ReportKind = serde_json::from_str("\"candidates\"").unwrap();
        assert_eq!(kind, ReportKind::Candidates);
        assert_eq!(ReportKind::default(), ReportKind::Full);
    }
}
