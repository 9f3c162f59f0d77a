//! AI enhancement adapter. Rewrites the serialized resume against a job
//! description under one of two prompt contracts.
//!
//! Results are suggestions only: nothing here writes back into the resume
//! aggregate. All backend calls go through `llm_client`.

pub mod handlers;
pub mod prompts;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use crate::enhancement::prompts::{ENHANCE_PROMPT_TEMPLATE, OPTIMIZE_PROMPT_TEMPLATE};
use crate::errors::AppError;
use crate::llm_client::prompts::{fill_template, JSON_ONLY_SYSTEM};
use crate::llm_client::{complete_json, CompletionBackend};

pub const RESUME_MISSING: &str =
    "Please input your resume details first in the \"Input Resume\" tab.";
pub const ENHANCE_JD_MISSING: &str = "Please provide a job description to enhance your resume.";
pub const OPTIMIZE_JD_MISSING: &str = "Please provide a job description to optimize your resume.";
pub const ENHANCE_FAILED: &str = "Failed to enhance resume. Please try again.";
pub const OPTIMIZE_FAILED: &str = "Failed to optimize resume. Please try again.";

// ────────────────────────────────────────────────────────────────────────────
// Output schemas
// ────────────────────────────────────────────────────────────────────────────

/// Backend response for `enhance`. Both fields are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceResumeOutput {
    pub enhanced_resume: String,
    pub summary: String,
}

/// Backend response for `optimize_and_summarize`. Both fields are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResumeOutput {
    pub optimized_resume: String,
    pub summary: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Adapter
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct EnhancementService {
    backend: Arc<dyn CompletionBackend>,
    timeout: Duration,
}

impl EnhancementService {
    pub fn new(backend: Arc<dyn CompletionBackend>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    /// Suggests an improved resume for the job description plus a summary of
    /// the changes.
    pub async fn enhance(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<EnhanceResumeOutput, AppError> {
        check_inputs(resume_text, job_description, ENHANCE_JD_MISSING)?;

        let prompt = fill_template(
            ENHANCE_PROMPT_TEMPLATE,
            &[
                ("resumeContent", resume_text),
                ("jobDescription", job_description),
            ],
        );

        info!(
            "Requesting resume enhancement ({} resume chars, {} JD chars)",
            resume_text.len(),
            job_description.len()
        );
        self.run(&prompt, ENHANCE_FAILED).await
    }

    /// Rewrites the resume with the job description's keywords and returns a
    /// concise summary of the resume.
    pub async fn optimize_and_summarize(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<OptimizeResumeOutput, AppError> {
        check_inputs(resume_text, job_description, OPTIMIZE_JD_MISSING)?;

        let prompt = fill_template(
            OPTIMIZE_PROMPT_TEMPLATE,
            &[
                ("resumeText", resume_text),
                ("jobDescription", job_description),
            ],
        );

        info!(
            "Requesting keyword optimization ({} resume chars, {} JD chars)",
            resume_text.len(),
            job_description.len()
        );
        self.run(&prompt, OPTIMIZE_FAILED).await
    }

    /// One attempt, bounded by the configured timeout.
    async fn run<T: DeserializeOwned>(
        &self,
        prompt: &str,
        failure: &'static str,
    ) -> Result<T, AppError> {
        let call = complete_json::<T>(self.backend.as_ref(), prompt, JSON_ONLY_SYSTEM);
        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) => Err(AppError::Ai {
                message: failure,
                detail: e.to_string(),
            }),
            Err(_) => {
                warn!("AI call exceeded {:?}", self.timeout);
                Err(AppError::Timeout(format!(
                    "AI call exceeded {}s",
                    self.timeout.as_secs()
                )))
            }
        }
    }
}

/// Pre-flight checks; a failure here never reaches the backend.
fn check_inputs(
    resume_text: &str,
    job_description: &str,
    jd_missing: &'static str,
) -> Result<(), AppError> {
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation(RESUME_MISSING.to_string()));
    }
    if job_description.trim().is_empty() {
        return Err(AppError::Validation(jd_missing.to_string()));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Result slot
// ────────────────────────────────────────────────────────────────────────────

/// A successful AI result with the time it completed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiResult<T> {
    #[serde(flatten)]
    pub output: T,
    pub completed_at: DateTime<Utc>,
}

/// Holds the last successful result of one AI operation and guards against
/// overlapping calls.
///
/// A call started while another is in flight is rejected (the trigger is
/// "disabled"). A failed call leaves the previous result as it was.
pub struct AiSlot<T> {
    label: &'static str,
    in_flight: Mutex<()>,
    last: RwLock<Option<AiResult<T>>>,
}

impl<T: Clone> AiSlot<T> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            in_flight: Mutex::new(()),
            last: RwLock::new(None),
        }
    }

    pub async fn run<F>(&self, call: F) -> Result<AiResult<T>, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        let _guard = self.in_flight.try_lock().map_err(|_| {
            AppError::Conflict(format!("{} is already in progress", self.label))
        })?;

        let output = call.await?;
        let result = AiResult {
            output,
            completed_at: Utc::now(),
        };
        *self.last.write().await = Some(result.clone());
        Ok(result)
    }

    pub async fn last(&self) -> Option<AiResult<T>> {
        self.last.read().await.clone()
    }
}
