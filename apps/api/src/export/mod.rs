//! Export Pipeline: rendered resume → bitmap → single-page A4 PDF.

pub mod fit;
pub mod handlers;
pub mod pdf;
pub mod rasterizer;

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::export::fit::PageFormat;
use crate::export::pdf::encode_pdf;
use crate::export::rasterizer::{Rasterizer, EXPORT_SCALE};
use crate::models::resume::ResumeData;
use crate::render::{html::to_html, layout::render};

pub const EXPORT_FILE_NAME: &str = "ResuMaster_AI_Resume.pdf";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Please fill in some resume data before exporting.")]
    MissingName,

    #[error("rendering failed: {0}")]
    Render(#[from] askama::Error),

    #[error("rasterization failed: {0}")]
    Rasterize(String),

    #[error("PDF encoding failed: {0}")]
    Encode(String),

    #[error("export timed out after {0:?}")]
    Timeout(Duration),
}

#[derive(Debug, Clone)]
pub struct PdfFile {
    pub file_name: &'static str,
    pub bytes: Bytes,
}

pub struct ExportPipeline {
    rasterizer: Arc<dyn Rasterizer>,
    page: PageFormat,
    timeout: Duration,
}

impl ExportPipeline {
    pub fn new(rasterizer: Arc<dyn Rasterizer>, timeout: Duration) -> Self {
        Self {
            rasterizer,
            page: PageFormat::A4,
            timeout,
        }
    }

    /// Renders `data` with `template_id` and encodes it as a PDF.
    ///
    /// A resume without a name fails before anything is rendered.
    pub async fn export(&self, data: &ResumeData, template_id: &str) -> Result<PdfFile, ExportError> {
        if !data.has_name() {
            return Err(ExportError::MissingName);
        }

        let html = to_html(&render(data, template_id))?;
        match tokio::time::timeout(self.timeout, self.rasterize_and_encode(html)).await {
            Ok(Ok(bytes)) => {
                info!("Exported PDF ({} bytes, template '{template_id}')", bytes.len());
                Ok(PdfFile {
                    file_name: EXPORT_FILE_NAME,
                    bytes: Bytes::from(bytes),
                })
            }
            Ok(Err(e)) => Err(e),
            Err(_) => {
                warn!("PDF export exceeded {:?}", self.timeout);
                Err(ExportError::Timeout(self.timeout))
            }
        }
    }

    async fn rasterize_and_encode(&self, html: String) -> Result<Vec<u8>, ExportError> {
        let image = self.rasterizer.rasterize(&html, EXPORT_SCALE).await?;
        debug!("Rasterized resume at {}x{}px", image.width, image.height);
        let page = self.page;
        tokio::task::spawn_blocking(move || encode_pdf(&image, page))
            .await
            .map_err(|e| ExportError::Encode(format!("encoder task failed: {e}")))?
    }
}
