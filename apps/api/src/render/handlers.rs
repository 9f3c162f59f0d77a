//! Axum route handlers for template selection and the preview page.

use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::models::template::{TemplateMeta, AVAILABLE_TEMPLATES};
use crate::render::render_page;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatesResponse {
    pub templates: &'static [TemplateMeta],
    pub selected_template_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectTemplateRequest {
    pub template_id: String,
}

#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    pub template: Option<String>,
}

/// GET /api/v1/templates
pub async fn handle_list_templates(State(state): State<AppState>) -> Json<TemplatesResponse> {
    Json(TemplatesResponse {
        templates: AVAILABLE_TEMPLATES,
        selected_template_id: state.session.template_id().await,
    })
}

/// PUT /api/v1/templates/selected
pub async fn handle_select_template(
    State(state): State<AppState>,
    AppJson(request): AppJson<SelectTemplateRequest>,
) -> Result<Json<TemplatesResponse>, AppError> {
    let selected_template_id = state.session.select_template(&request.template_id).await?;
    Ok(Json(TemplatesResponse {
        templates: AVAILABLE_TEMPLATES,
        selected_template_id,
    }))
}

/// GET /api/v1/preview[?template=id]
///
/// Renders with the given template, or the selected one when omitted.
pub async fn handle_preview(
    State(state): State<AppState>,
    Query(query): Query<PreviewQuery>,
) -> Result<Html<String>, AppError> {
    let template_id = match query.template {
        Some(id) => id,
        None => state.session.template_id().await,
    };
    let data = state.session.snapshot().await;
    Ok(Html(render_page(&data, &template_id)?))
}
