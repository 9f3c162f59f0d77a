//! Axum route handlers for the resume input view.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::models::resume::{ResumeData, ResumeSection};
use crate::resume::serializer::serialize;
use crate::resume::validation::{validate, ValidationReport};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeResponse {
    pub resume: ResumeData,
    pub resume_text: String,
    pub validation: ValidationReport,
}

impl ResumeResponse {
    fn from_data(data: &ResumeData) -> Self {
        Self {
            resume: data.clone(),
            resume_text: serialize(Some(data)),
            validation: validate(data),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCreatedResponse {
    pub id: String,
    #[serde(flatten)]
    pub resume: ResumeResponse,
}

#[derive(Debug, Serialize)]
pub struct ResumeTextResponse {
    pub text: String,
}

/// GET /api/v1/resume
pub async fn handle_get_resume(State(state): State<AppState>) -> Json<ResumeResponse> {
    let data = state.session.snapshot().await;
    Json(ResumeResponse::from_data(&data))
}

/// PUT /api/v1/resume
///
/// Replaces the whole aggregate. The new snapshot is stored even when it does
/// not validate; the report tells the client what to fix.
pub async fn handle_put_resume(
    State(state): State<AppState>,
    AppJson(data): AppJson<ResumeData>,
) -> Json<ResumeResponse> {
    let snapshot = state.session.update(data).await;
    Json(ResumeResponse::from_data(&snapshot))
}

/// GET /api/v1/resume/text
pub async fn handle_get_resume_text(State(state): State<AppState>) -> Json<ResumeTextResponse> {
    Json(ResumeTextResponse {
        text: state.session.resume_text().await,
    })
}

/// GET /api/v1/resume/validation
pub async fn handle_get_validation(State(state): State<AppState>) -> Json<ValidationReport> {
    let data = state.session.snapshot().await;
    Json(validate(&data))
}

/// POST /api/v1/resume/:section/items
///
/// Appends a blank item with a fresh id to a list section.
pub async fn handle_add_item(
    State(state): State<AppState>,
    Path(section): Path<String>,
) -> Result<(StatusCode, Json<ItemCreatedResponse>), AppError> {
    let section = parse_section(&section)?;
    let mut id = String::new();
    let snapshot = state
        .session
        .modify(|data| {
            id = data.append_item(section);
            Ok(())
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ItemCreatedResponse {
            id,
            resume: ResumeResponse::from_data(&snapshot),
        }),
    ))
}

/// DELETE /api/v1/resume/:section/items/:id
pub async fn handle_remove_item(
    State(state): State<AppState>,
    Path((section, id)): Path<(String, String)>,
) -> Result<Json<ResumeResponse>, AppError> {
    let section = parse_section(&section)?;
    let snapshot = state
        .session
        .modify(|data| data.remove_item(section, &id))
        .await?;
    Ok(Json(ResumeResponse::from_data(&snapshot)))
}

fn parse_section(raw: &str) -> Result<ResumeSection, AppError> {
    ResumeSection::parse(raw).ok_or_else(|| AppError::NotFound(format!("Unknown section '{raw}'")))
}
