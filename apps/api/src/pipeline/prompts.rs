// Prompt constants for HR query interpretation.

/// System prompt for interpreting a recruiter's free-text request.
pub const QUERY_INTERPRET_SYSTEM: &str = "You are an HR assistant that interprets recruiters' \
    natural-language hiring requests. Identify the exact job role and the essential skills.";

/// Replace `{hr_query}` before sending.
pub const QUERY_INTERPRET_PROMPT_TEMPLATE: &str = r#"Interpret this HR query and identify the job role and its essential skills.

HR query:
"""
{hr_query}
"""

Return a JSON object with this EXACT schema (no extra fields):
{
  "job_role": "Backend Developer",
  "essential_skills": ["Python", "Django", "PostgreSQL"]
}

Rules:
- "job_role" is a short title, without a "Job Role:" prefix.
- "essential_skills" may be empty when the query names none."#;
