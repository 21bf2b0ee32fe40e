// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// System prompt sent with every query.
pub const ASSISTANT_SYSTEM: &str = "You are a precise resume and job-description assistant. \
    Follow the output format requested in the user message exactly. \
    Do NOT include explanations, apologies or markdown code fences.";

/// Instruction embedded in every rewrite prompt.
pub const NO_FABRICATION_INSTRUCTION: &str = "\
    CRITICAL: Do NOT fabricate experience, skills, employers, metrics or dates. \
    Only rephrase what the original text already states. \
    If a job keyword is not supported by the original text, leave it out.";

/// Fills `{name}` placeholders in one left-to-right pass. Substituted values
/// are never rescanned, so user text containing `{keywords}` stays literal.
/// Braces that do not name a known placeholder are kept as-is.
pub fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after_brace = &rest[start + 1..];
        let hit = vars.iter().find_map(|(name, value)| {
            let tail = after_brace.strip_prefix(name)?.strip_prefix('}')?;
            Some((*value, tail))
        });
        match hit {
            Some((value, tail)) => {
                out.push_str(value);
                rest = tail;
            }
            None => {
                out.push('{');
                rest = after_brace;
            }
        }
    }

    out.push_str(rest);
    out
}
