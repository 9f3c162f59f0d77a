use std::sync::Arc;

use crate::enhancement::EnhancementService;
use crate::export::ExportPipeline;
use crate::resume::session::ResumeSession;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The single resume session; owns the aggregate, template selection and AI results.
    pub session: Arc<ResumeSession>,
    pub enhancer: EnhancementService,
    pub exporter: Arc<ExportPipeline>,
}
