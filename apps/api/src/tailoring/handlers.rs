//! Axum route handlers for job analysis, matching and tailoring.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::job::{AnalyzedJob, JobAnalysis, JobPosting};
use crate::models::resume::ResumeRecord;
use crate::state::AppState;
use crate::tailoring::job_parser::{analyze_job, analyze_jobs};
use crate::tailoring::rewriter::rewrite_resume;
use crate::tailoring::skill_matcher::{match_skills, MatchReport};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeJobRequest {
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeJobResponse {
    /// `null` when the description was empty or the analysis could not be parsed.
    pub analysis: Option<JobAnalysis>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeBatchRequest {
    pub jobs: Vec<JobPosting>,
}

#[derive(Debug, Deserialize)]
pub struct ResumeJobRequest {
    pub resume: ResumeRecord,
    pub job_analysis: JobAnalysis,
}

#[derive(Debug, Serialize)]
pub struct TailorResponse {
    pub resume: ResumeRecord,
    pub match_report: MatchReport,
    pub units_rewritten: usize,
    pub units_kept_original: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs/analyze
pub async fn handle_analyze_job(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeJobRequest>,
) -> Result<Json<AnalyzeJobResponse>, AppError> {
    let llm = state.require_llm()?;
    let analysis = analyze_job(&request.description, llm).await;
    Ok(Json(AnalyzeJobResponse { analysis }))
}

/// POST /api/v1/jobs/analyze-batch
///
/// One result per posting, in request order. Failed postings carry `analysis: null`.
pub async fn handle_analyze_batch(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeBatchRequest>,
) -> Result<Json<Vec<AnalyzedJob>>, AppError> {
    let llm = state.require_llm()?;
    info!("Analyzing batch of {} jobs", request.jobs.len());
    let analyzed = analyze_jobs(request.jobs, llm, state.config.max_concurrent_analyses).await;
    Ok(Json(analyzed))
}

/// POST /api/v1/resumes/match
pub async fn handle_match(Json(request): Json<ResumeJobRequest>) -> Json<MatchReport> {
    Json(match_skills(&request.resume.skills, &request.job_analysis))
}

/// POST /api/v1/resumes/tailor
///
/// Rewrites the summary and experience bullets toward the job. Without a
/// configured model the resume comes back unchanged.
pub async fn handle_tailor(
    State(state): State<AppState>,
    Json(request): Json<ResumeJobRequest>,
) -> Result<Json<TailorResponse>, AppError> {
    let match_report = match_skills(&request.resume.skills, &request.job_analysis);
    info!(
        "Tailoring resume: {}% of required skills covered",
        match_report.required_coverage()
    );

    let Some(llm) = state.llm.as_deref() else {
        warn!("No language model configured; returning resume unchanged");
        return Ok(Json(TailorResponse {
            resume: request.resume,
            match_report,
            units_rewritten: 0,
            units_kept_original: 0,
        }));
    };

    let (resume, stats) = rewrite_resume(&request.resume, &request.job_analysis, llm).await;

    Ok(Json(TailorResponse {
        resume,
        match_report,
        units_rewritten: stats.rewritten,
        units_kept_original: stats.kept_original,
    }))
}
