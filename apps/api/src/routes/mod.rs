pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::enhancement::handlers as ai;
use crate::export::handlers as export;
use crate::render::handlers as render;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Input view
        .route(
            "/api/v1/resume",
            get(resume::handle_get_resume).put(resume::handle_put_resume),
        )
        .route("/api/v1/resume/text", get(resume::handle_get_resume_text))
        .route(
            "/api/v1/resume/validation",
            get(resume::handle_get_validation),
        )
        .route(
            "/api/v1/resume/:section/items",
            post(resume::handle_add_item),
        )
        .route(
            "/api/v1/resume/:section/items/:id",
            delete(resume::handle_remove_item),
        )
        // Templates
        .route("/api/v1/templates", get(render::handle_list_templates))
        .route(
            "/api/v1/templates/selected",
            put(render::handle_select_template),
        )
        // AI views
        .route(
            "/api/v1/ai/enhance",
            post(ai::handle_enhance).get(ai::handle_get_enhancement),
        )
        .route(
            "/api/v1/ai/optimize",
            post(ai::handle_optimize).get(ai::handle_get_optimization),
        )
        // Preview & export
        .route("/api/v1/preview", get(render::handle_preview))
        .route("/api/v1/export", post(export::handle_export))
        .with_state(state)
}
