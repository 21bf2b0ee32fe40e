//! Job analysis: asks the language model about a job description and turns
//! its answer into a `JobAnalysis`.
//!
//! Model answers are often wrapped in prose ("Here is the result: {...}").
//! Parsing walks an ordered list of strategies; the first one that applies
//! decides the outcome. A failed parse is a `ParseFailure` value, never a
//! panic or an error that escapes the batch.

use futures::stream::{self, StreamExt};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::llm_client::prompts::fill_template;
use crate::llm_client::{LanguageModel, LlmOutput};
use crate::models::job::{AnalyzedJob, JobAnalysis, JobPosting};
use crate::tailoring::prompts::JOB_ANALYSIS_PROMPT_TEMPLATE;

/// A model answer that could not be turned into a `JobAnalysis`.
#[derive(Debug, Clone, Error)]
#[error("failed to parse job analysis: {reason}")]
pub struct ParseFailure {
    pub raw: String,
    pub reason: String,
}

/// Ways of locating a structured document inside model text, tried in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseStrategy {
    /// From the first `{` to the last `}`.
    BraceSpan,
    /// The whole text as-is.
    WholeText,
}

const STRATEGIES: [ParseStrategy; 2] = [ParseStrategy::BraceSpan, ParseStrategy::WholeText];

impl ParseStrategy {
    /// The slice this strategy would parse, or `None` if it does not apply.
    fn candidate(self, text: &str) -> Option<&str> {
        match self {
            ParseStrategy::BraceSpan => {
                let start = text.find('{')?;
                let end = text.rfind('}')?;
                (end > start).then(|| &text[start..=end])
            }
            ParseStrategy::WholeText => Some(text),
        }
    }
}

/// Parses a model answer into a `JobAnalysis`.
pub fn parse_job_analysis(output: &LlmOutput) -> Result<JobAnalysis, ParseFailure> {
    match output {
        LlmOutput::Structured(value) => from_structured(value),
        LlmOutput::Text(text) => parse_job_analysis_text(text),
    }
}

/// Parses model text, trying each strategy in order until one applies.
pub fn parse_job_analysis_text(text: &str) -> Result<JobAnalysis, ParseFailure> {
    for strategy in STRATEGIES {
        let Some(candidate) = strategy.candidate(text) else {
            continue;
        };
        return serde_json::from_str::<Value>(candidate)
            .map_err(|e| ParseFailure {
                raw: text.to_string(),
                reason: format!("{strategy:?}: {e}"),
            })
            .and_then(|value| from_structured(&value));
    }

    Err(ParseFailure {
        raw: text.to_string(),
        reason: "no parse strategy applied".to_string(),
    })
}

fn from_structured(value: &Value) -> Result<JobAnalysis, ParseFailure> {
    if !value.is_object() {
        return Err(ParseFailure {
            raw: value.to_string(),
            reason: "expected a JSON object".to_string(),
        });
    }
    serde_json::from_value(value.clone()).map_err(|e| ParseFailure {
        raw: value.to_string(),
        reason: e.to_string(),
    })
}

/// Analyzes one description. Returns `None` for a blank description (no
/// query is made), a failed query, or an unparseable answer.
pub async fn analyze_job(description: &str, llm: &dyn LanguageModel) -> Option<JobAnalysis> {
    if description.trim().is_empty() {
        return None;
    }

    let prompt = fill_template(JOB_ANALYSIS_PROMPT_TEMPLATE, &[("description", description)]);

    let output = match llm.query(&prompt).await {
        Ok(output) => output,
        Err(e) => {
            error!("Job analysis query failed: {e}");
            return None;
        }
    };

    match parse_job_analysis(&output) {
        Ok(analysis) => Some(analysis),
        Err(failure) => {
            error!(
                "Failed to parse job analysis: {} (raw: {:?})",
                failure.reason,
                failure.raw.chars().take(120).collect::<String>()
            );
            None
        }
    }
}

/// Analyzes a batch of postings with at most `max_concurrency` queries in
/// flight. The output has one entry per posting, in input order.
pub async fn analyze_jobs(
    postings: Vec<JobPosting>,
    llm: &dyn LanguageModel,
    max_concurrency: usize,
) -> Vec<AnalyzedJob> {
    let total = postings.len();

    let analyzed: Vec<AnalyzedJob> = stream::iter(postings.into_iter().enumerate())
        .map(|(idx, job)| async move {
            let description = job.description.as_deref().unwrap_or_default();
            let analysis = if description.trim().is_empty() {
                warn!("Job {idx} ({}) has no description.", job.display_title());
                None
            } else {
                let analysis = analyze_job(description, llm).await;
                if analysis.is_none() {
                    warn!("Analysis unavailable for job {idx} ({})", job.display_title());
                }
                analysis
            };
            AnalyzedJob {
                job_meta: job,
                analysis,
            }
        })
        .buffered(max_concurrency.max(1))
        .collect()
        .await;

    let succeeded = analyzed.iter().filter(|j| j.analysis.is_some()).count();
    info!("Analyzed {succeeded}/{total} jobs");

    analyzed
}
