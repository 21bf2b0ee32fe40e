pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::resume::handlers as resume;
use crate::state::AppState;
use crate::tailoring::handlers as tailoring;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume ingestion and export
        .route("/api/v1/resumes/parse", post(resume::handle_parse_resume))
        .route("/api/v1/resumes/upload", post(resume::handle_upload_resume))
        .route("/api/v1/resumes/export", post(resume::handle_export_resume))
        // Matching and tailoring
        .route("/api/v1/resumes/match", post(tailoring::handle_match))
        .route("/api/v1/resumes/tailor", post(tailoring::handle_tailor))
        // Job analysis
        .route("/api/v1/jobs/analyze", post(tailoring::handle_analyze_job))
        .route(
            "/api/v1/jobs/analyze-batch",
            post(tailoring::handle_analyze_batch),
        )
        .with_state(state)
}
