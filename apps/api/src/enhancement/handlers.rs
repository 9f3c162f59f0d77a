//! Axum route handlers for the AI enhancement views.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::enhancement::{AiResult, EnhanceResumeOutput, OptimizeResumeOutput, RESUME_MISSING};
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::resume::serializer::serialize;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDescriptionRequest {
    #[serde(default)]
    pub job_description: String,
}

/// The serialized resume, or a validation error while the required fields
/// (name, email, phone, skills) are not all filled in.
async fn complete_resume_text(state: &AppState) -> Result<String, AppError> {
    let data = state.session.snapshot().await;
    if !data.is_complete() {
        return Err(AppError::Validation(RESUME_MISSING.to_string()));
    }
    Ok(serialize(Some(data.as_ref())))
}

/// POST /api/v1/ai/enhance
///
/// Runs the enhancement contract against the current resume text. The result
/// is a suggestion and is not applied to the resume.
pub async fn handle_enhance(
    State(state): State<AppState>,
    AppJson(request): AppJson<JobDescriptionRequest>,
) -> Result<Json<AiResult<EnhanceResumeOutput>>, AppError> {
    let resume_text = complete_resume_text(&state).await?;
    let result = state
        .session
        .enhancement()
        .run(state.enhancer.enhance(&resume_text, &request.job_description))
        .await?;
    Ok(Json(result))
}

/// GET /api/v1/ai/enhance
pub async fn handle_get_enhancement(
    State(state): State<AppState>,
) -> Result<Json<AiResult<EnhanceResumeOutput>>, AppError> {
    state
        .session
        .enhancement()
        .last()
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No enhancement result yet".to_string()))
}

/// POST /api/v1/ai/optimize
pub async fn handle_optimize(
    State(state): State<AppState>,
    AppJson(request): AppJson<JobDescriptionRequest>,
) -> Result<Json<AiResult<OptimizeResumeOutput>>, AppError> {
    let resume_text = complete_resume_text(&state).await?;
    let result = state
        .session
        .optimization()
        .run(
            state
                .enhancer
                .optimize_and_summarize(&resume_text, &request.job_description),
        )
        .await?;
    Ok(Json(result))
}

/// GET /api/v1/ai/optimize
pub async fn handle_get_optimization(
    State(state): State<AppState>,
) -> Result<Json<AiResult<OptimizeResumeOutput>>, AppError> {
    state
        .session
        .optimization()
        .last()
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No optimization result yet".to_string()))
}
