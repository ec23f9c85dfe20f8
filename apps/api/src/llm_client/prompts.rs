// Shared prompt fragments. Each service that calls the model keeps its own prompts.rs.

/// Appended to every system prompt that expects structured output.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Keeps the model from inventing requirements the recruiter never stated.
pub const NO_INVENTION_INSTRUCTION: &str = "Only use information present in the query. \
    Do NOT add skills, seniority, or locations the recruiter did not mention.";
