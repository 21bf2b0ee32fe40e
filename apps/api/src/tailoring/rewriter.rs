//! Resume rewriting: aligns the summary and experience bullets with a job.
//!
//! Every unit (the summary, each bullet) is rewritten on its own. A unit whose
//! rewrite fails keeps its original text; nothing else is affected. Contact,
//! skills, projects and education are never touched.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::llm_client::prompts::{fill_template, NO_FABRICATION_INSTRUCTION};
use crate::llm_client::{LanguageModel, LlmError};
use crate::models::job::JobAnalysis;
use crate::models::resume::{ExperienceItem, ResumeRecord};
use crate::tailoring::prompts::{BULLET_REWRITE_PROMPT_TEMPLATE, SUMMARY_REWRITE_PROMPT_TEMPLATE};

/// Why a single summary or bullet kept its original text.
#[derive(Debug, Error)]
pub enum UnitRewriteError {
    #[error("model query failed: {0}")]
    Llm(#[from] LlmError),

    #[error("model returned structured output with no text form")]
    Unrenderable,

    #[error("model returned empty text")]
    Empty,
}

/// Per-pass counters, logged once the pass finishes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RewriteStats {
    pub rewritten: usize,
    pub kept_original: usize,
}

pub fn build_summary_prompt(summary: &str, job: &JobAnalysis) -> String {
    let keywords = job.keywords.join(", ");
    let required_skills = job.required_skills.join(", ");
    fill_template(
        SUMMARY_REWRITE_PROMPT_TEMPLATE,
        &[
            ("no_fabrication", NO_FABRICATION_INSTRUCTION),
            ("summary", summary),
            ("keywords", keywords.as_str()),
            ("required_skills", required_skills.as_str()),
        ],
    )
}

pub fn build_bullet_prompt(bullet: &str, job: &JobAnalysis) -> String {
    let keywords = job.keywords.join(", ");
    fill_template(
        BULLET_REWRITE_PROMPT_TEMPLATE,
        &[
            ("no_fabrication", NO_FABRICATION_INSTRUCTION),
            ("bullet", bullet),
            ("keywords", keywords.as_str()),
        ],
    )
}

async fn rewrite_unit(prompt: &str, llm: &dyn LanguageModel) -> Result<String, UnitRewriteError> {
    let text = llm
        .query(prompt)
        .await?
        .into_text()
        .ok_or(UnitRewriteError::Unrenderable)?;
    let text = text.trim();
    if text.is_empty() {
        return Err(UnitRewriteError::Empty);
    }
    Ok(text.to_string())
}

/// Rewrites `original` or, on failure, returns it unchanged.
async fn rewrite_or_keep(
    original: &str,
    prompt: String,
    llm: &dyn LanguageModel,
    stats: &mut RewriteStats,
) -> String {
    match rewrite_unit(&prompt, llm).await {
        Ok(rewritten) => {
            stats.rewritten += 1;
            rewritten
        }
        Err(e) => {
            warn!(
                "Rewrite failed, keeping original ({e}): {:?}",
                original.chars().take(60).collect::<String>()
            );
            stats.kept_original += 1;
            original.to_string()
        }
    }
}

/// Returns a rewritten copy of `resume`. The input is left untouched.
pub async fn rewrite_resume(
    resume: &ResumeRecord,
    job: &JobAnalysis,
    llm: &dyn LanguageModel,
) -> (ResumeRecord, RewriteStats) {
    let mut rewritten = resume.clone();
    let mut stats = RewriteStats::default();

    if !resume.summary.is_empty() {
        let original = resume.summary.join(" ");
        let prompt = build_summary_prompt(&original, job);
        match rewrite_unit(&prompt, llm).await {
            Ok(text) => {
                stats.rewritten += 1;
                rewritten.summary = vec![text];
            }
            Err(e) => {
                warn!("Summary rewrite failed, keeping original: {e}");
                stats.kept_original += 1;
            }
        }
    }

    for item in rewritten.experience.iter_mut() {
        match item {
            ExperienceItem::Role(role) => {
                debug!("Rewriting {} bullets for {}", role.bullets.len(), role.title);
                for bullet in role.bullets.iter_mut() {
                    let prompt = build_bullet_prompt(bullet, job);
                    let updated = rewrite_or_keep(bullet, prompt, llm, &mut stats).await;
                    *bullet = updated;
                }
            }
            // Legacy shape: each line is treated as a single bullet.
            ExperienceItem::Line(line) => {
                let prompt = build_bullet_prompt(line, job);
                let updated = rewrite_or_keep(line, prompt, llm, &mut stats).await;
                *line = updated;
            }
        }
    }

    info!(
        "Rewrite pass complete: {} units rewritten, {} kept original",
        stats.rewritten, stats.kept_original
    );

    (rewritten, stats)
}
