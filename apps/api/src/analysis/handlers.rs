//! Axum route handlers for the Analysis and Skills APIs.

use std::collections::BTreeMap;

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::gaps::{
    build_skill_breakdowns, build_skill_coverage, build_skill_gaps, SkillBreakdown, SkillCoverage,
    SkillGap, DEFAULT_MAX_GAPS,
};
use crate::analysis::metadata::{skill_meta, SkillMeta};
use crate::analysis::quantify::clean_extracted_text;
use crate::analysis::scorer::{compute_match_with, ScoreResult};
use crate::analysis::suggestions::{suggest_with_fallback, Suggestion, SuggestionSource};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub resume_text: String,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub score: ScoreResult,
    pub skill_gaps: Vec<SkillGap>,
    pub skill_breakdowns: BTreeMap<String, SkillBreakdown>,
    pub skill_coverage: Vec<SkillCoverage>,
    pub suggestions: Vec<Suggestion>,
    pub suggestion_source: SuggestionSource,
}

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SkillListResponse {
    pub count: usize,
    pub skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SkillDetailResponse {
    pub canonical: String,
    pub aliases: Vec<String>,
    pub meta: SkillMeta,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Scores pasted resume text against a job description.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text cannot be empty".to_string()));
    }
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation("job_description cannot be empty".to_string()));
    }

    let response = run_analysis(&state, &request.resume_text, &request.job_description).await;
    Ok(Json(response))
}

/// POST /api/v1/analyze/pdf
///
/// Multipart form: `resume` (PDF file) and `job_description` (text).
pub async fn handle_analyze_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let max_bytes = state.config.max_pdf_bytes;
    let mut pdf: Option<Vec<u8>> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        match field.name() {
            Some("resume") => {
                let bytes = field.bytes().await.map_err(multipart_error)?;
                if bytes.len() > max_bytes {
                    return Err(pdf_too_large(max_bytes));
                }
                pdf = Some(bytes.to_vec());
            }
            Some("job_description") => {
                job_description = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }

    let pdf = pdf
        .filter(|b| !b.is_empty())
        .ok_or_else(|| AppError::Validation("resume PDF file is required".to_string()))?;
    let job_description = job_description
        .filter(|jd| !jd.trim().is_empty())
        .ok_or_else(|| AppError::Validation("job_description cannot be empty".to_string()))?;

    let resume_text = extract_pdf_text(pdf).await?;
    info!("Extracted {} characters from uploaded PDF", resume_text.len());

    let response = run_analysis(&state, &resume_text, &job_description).await;
    Ok(Json(response))
}

/// POST /api/v1/skills/extract
pub async fn handle_extract_skills(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, AppError> {
    Ok(Json(ExtractResponse {
        skills: state.extractor.extract(&request.text),
    }))
}

/// GET /api/v1/skills
///
/// Canonical skill names in dictionary order.
pub async fn handle_list_skills(State(state): State<AppState>) -> Json<SkillListResponse> {
    let skills: Vec<String> = state
        .dictionary
        .canonical_names()
        .into_iter()
        .map(String::from)
        .collect();
    Json(SkillListResponse {
        count: skills.len(),
        skills,
    })
}

/// GET /api/v1/skills/:name
///
/// Case-insensitive lookup of one dictionary entry with its metadata.
pub async fn handle_get_skill(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<SkillDetailResponse>, AppError> {
    let entry = state
        .dictionary
        .get(&name)
        .ok_or_else(|| AppError::NotFound(format!("skill '{name}' is not in the dictionary")))?;

    Ok(Json(SkillDetailResponse {
        canonical: entry.canonical.clone(),
        aliases: entry.aliases.clone(),
        meta: skill_meta(&entry.canonical),
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Score, gap panels and suggestions for one resume/JD pair.
async fn run_analysis(state: &AppState, resume_text: &str, jd_text: &str) -> AnalyzeResponse {
    let score = compute_match_with(&state.extractor, resume_text, jd_text);

    let skill_gaps = build_skill_gaps(&score.extracted_skills, &score.jd_skills, DEFAULT_MAX_GAPS);
    let skill_breakdowns = build_skill_breakdowns(&skill_gaps);
    let skill_coverage = build_skill_coverage(&score.extracted_skills, &score.jd_skills);

    let outcome = suggest_with_fallback(
        state.suggester.as_deref(),
        resume_text,
        jd_text,
        &score.missing_skills,
        state.suggestion_timeout(),
    )
    .await;

    info!(
        "Analysis complete: match_score={}, missing={}, suggestions={} ({:?})",
        score.match_score,
        score.missing_skills.len(),
        outcome.suggestions.len(),
        outcome.source
    );

    AnalyzeResponse {
        analysis_id: Uuid::new_v4(),
        analyzed_at: Utc::now(),
        score,
        skill_gaps,
        skill_breakdowns,
        skill_coverage,
        suggestions: outcome.suggestions,
        suggestion_source: outcome.source,
    }
}

/// Runs `pdf-extract` off the async runtime. Parser failures and panics both map to 422.
async fn extract_pdf_text(pdf: Vec<u8>) -> Result<String, AppError> {
    let extracted = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf))
        .await
        .map_err(|e| {
            if e.is_panic() {
                warn!("PDF parser panicked: {e}");
                unreadable_pdf()
            } else {
                AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}"))
            }
        })?
        .map_err(|e| {
            warn!("PDF extraction failed: {e}");
            unreadable_pdf()
        })?;

    let text = clean_extracted_text(&extracted);
    if text.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "no text could be extracted from the PDF; it may be a scanned image".to_string(),
        ));
    }
    Ok(text)
}

fn unreadable_pdf() -> AppError {
    AppError::UnprocessableEntity("the uploaded file could not be read as a PDF".to_string())
}

fn pdf_too_large(max_bytes: usize) -> AppError {
    AppError::PayloadTooLarge(format!(
        "PDF exceeds the {} MB upload limit",
        max_bytes / (1024 * 1024)
    ))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(format!("invalid multipart body: {}", e.body_text()))
    }
}
