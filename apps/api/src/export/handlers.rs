//! Axum route handler for PDF export.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::errors::AppError;
use crate::render::handlers::PreviewQuery;
use crate::state::AppState;

/// POST /api/v1/export[?template=id]
///
/// Returns the current resume as a PDF attachment.
pub async fn handle_export(
    State(state): State<AppState>,
    Query(query): Query<PreviewQuery>,
) -> Result<Response, AppError> {
    let template_id = match query.template {
        Some(id) => id,
        None => state.session.template_id().await,
    };
    let data = state.session.snapshot().await;
    let file = state.exporter.export(&data, &template_id).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.file_name),
            ),
        ],
        file.bytes,
    )
        .into_response())
}
