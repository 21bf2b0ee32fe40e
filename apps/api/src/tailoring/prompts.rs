// All LLM prompt templates for the Tailoring module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Job analysis prompt. Replace `{description}` before sending.
pub const JOB_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Extract structured information from this job description.
Return ONLY valid JSON with these fields:

- required_skills: list of required technical skills
- preferred_skills: list of preferred/nice-to-have skills
- tools: list of tools/technologies mentioned
- seniority_level: string (e.g., "entry", "mid", "senior", "lead")
- responsibilities: list of key responsibilities
- keywords: list of important keywords from the job description

Job Description:
"""
{description}
"""

Return ONLY the JSON object, no additional text."#;

/// Summary rewrite prompt.
/// Replace: {no_fabrication}, {summary}, {keywords}, {required_skills}
pub const SUMMARY_REWRITE_PROMPT_TEMPLATE: &str = r#"Rewrite the following professional summary so it speaks to the target role.

{no_fabrication}

ORIGINAL SUMMARY:
{summary}

JOB KEYWORDS: {keywords}
REQUIRED SKILLS: {required_skills}

Use the keywords and skills only where the original summary already supports them.
Do not invent experience. Return ONLY the rewritten summary text."#;

/// Experience bullet rewrite prompt.
/// Replace: {no_fabrication}, {bullet}, {keywords}
pub const BULLET_REWRITE_PROMPT_TEMPLATE: &str = r#"Rewrite this resume bullet to align with the job keywords.

{no_fabrication}

ORIGINAL BULLET:
{bullet}

JOB KEYWORDS: {keywords}

Preserve the truth of the original. Do not exaggerate scope, ownership or results.
Return ONLY the rewritten bullet."#;
