//! Persistence gateway: stores the resume aggregate and the selected template id
//! as two entries of a key-value store.
//!
//! Reads are fail-safe (any problem yields defaults) and writes are
//! fire-and-forget (failures are logged, never returned).

pub mod redis_store;
pub mod store;

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::models::resume::ResumeData;
use crate::models::template::{default_template_id, is_known_template};
use crate::persistence::store::KeyValueStore;

pub const RESUME_DATA_KEY: &str = "resumaster_data";
pub const SELECTED_TEMPLATE_KEY: &str = "resumaster_selected_template";

#[derive(Clone)]
pub struct PersistenceGateway {
    store: Arc<dyn KeyValueStore>,
}

impl PersistenceGateway {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Loads the stored aggregate. A corrupted entry is discarded and the
    /// default aggregate returned; this never fails.
    pub async fn load(&self) -> ResumeData {
        let raw = match self.store.get(RESUME_DATA_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No stored resume data, starting from defaults");
                return ResumeData::default();
            }
            Err(e) => {
                error!("Failed to read stored resume data: {e}");
                return ResumeData::default();
            }
        };

        match serde_json::from_str::<ResumeData>(&raw) {
            Ok(data) => data,
            Err(e) => {
                warn!("Discarding corrupted resume data: {e}");
                if let Err(e) = self.store.remove(RESUME_DATA_KEY).await {
                    error!("Failed to remove corrupted resume data: {e}");
                }
                ResumeData::default()
            }
        }
    }

    pub async fn save(&self, data: &ResumeData) {
        let json = match serde_json::to_string(data) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize resume data: {e}");
                return;
            }
        };
        if let Err(e) = self.store.set(RESUME_DATA_KEY, &json).await {
            error!("Failed to persist resume data: {e}");
        }
    }

    /// Returns the stored template id if it names a known template, otherwise
    /// the first available template id.
    pub async fn load_template_id(&self) -> String {
        match self.store.get(SELECTED_TEMPLATE_KEY).await {
            Ok(Some(id)) if is_known_template(id.trim()) => id.trim().to_string(),
            Ok(Some(id)) => {
                warn!("Ignoring unknown stored template id '{id}'");
                default_template_id().to_string()
            }
            Ok(None) => default_template_id().to_string(),
            Err(e) => {
                error!("Failed to read selected template: {e}");
                default_template_id().to_string()
            }
        }
    }

    pub async fn save_template_id(&self, template_id: &str) {
        if let Err(e) = self.store.set(SELECTED_TEMPLATE_KEY, template_id).await {
            error!("Failed to persist selected template: {e}");
        }
    }
}
