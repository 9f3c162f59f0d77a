//! The in-session state holder.
//!
//! `ResumeSession` owns the current resume snapshot and the selected template,
//! and is the only place that writes them to the persistence gateway. It is
//! shared through `AppState` rather than held in a global.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::enhancement::{AiSlot, EnhanceResumeOutput, OptimizeResumeOutput};
use crate::errors::AppError;
use crate::models::resume::ResumeData;
use crate::models::template::{default_template_id, is_known_template};
use crate::persistence::PersistenceGateway;
use crate::resume::serializer::serialize;

pub struct ResumeSession {
    gateway: PersistenceGateway,
    data: RwLock<Arc<ResumeData>>,
    template_id: RwLock<String>,
    /// Writes are suppressed until storage has been read once.
    loaded: AtomicBool,
    save_debounce: Duration,
    /// Serializes every read-edit-swap-save sequence. Holds the pending
    /// debounced write, if any.
    writer: Mutex<Option<JoinHandle<()>>>,
    enhancement: AiSlot<EnhanceResumeOutput>,
    optimization: AiSlot<OptimizeResumeOutput>,
}

impl ResumeSession {
    /// A session holding defaults that has not read storage yet.
    pub fn new(gateway: PersistenceGateway, save_debounce: Duration) -> Self {
        Self {
            gateway,
            data: RwLock::new(Arc::new(ResumeData::default())),
            template_id: RwLock::new(default_template_id().to_string()),
            loaded: AtomicBool::new(false),
            save_debounce,
            writer: Mutex::new(None),
            enhancement: AiSlot::new("Resume enhancement"),
            optimization: AiSlot::new("Keyword optimization"),
        }
    }

    /// Creates a session and reads the persisted state into it.
    pub async fn load(gateway: PersistenceGateway, save_debounce: Duration) -> Self {
        let session = Self::new(gateway, save_debounce);
        session.initialize().await;
        session
    }

    /// Reads persisted state, then enables writes.
    pub async fn initialize(&self) {
        let _writer = self.writer.lock().await;
        let mut data = self.gateway.load().await;
        data.ensure_item_ids();
        let template_id = self.gateway.load_template_id().await;
        info!(
            "Session loaded: {} experiences, {} projects, template '{}'",
            data.experiences.len(),
            data.projects.len(),
            template_id
        );
        *self.data.write().await = Arc::new(data);
        *self.template_id.write().await = template_id;
        self.loaded.store(true, Ordering::SeqCst);
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }

    /// The current immutable snapshot.
    pub async fn snapshot(&self) -> Arc<ResumeData> {
        self.data.read().await.clone()
    }

    pub async fn resume_text(&self) -> String {
        serialize(Some(self.snapshot().await.as_ref()))
    }

    pub async fn template_id(&self) -> String {
        self.template_id.read().await.clone()
    }

    /// The single update entry point: replaces the snapshot and persists it.
    pub async fn update(&self, data: ResumeData) -> Arc<ResumeData> {
        let mut writer = self.writer.lock().await;
        self.commit(data, &mut writer).await
    }

    /// Applies `edit` to a copy of the current snapshot and stores the result.
    ///
    /// No other update can interleave between reading the snapshot and
    /// persisting the edited copy.
    pub async fn modify<F>(&self, edit: F) -> Result<Arc<ResumeData>, AppError>
    where
        F: FnOnce(&mut ResumeData) -> Result<(), AppError>,
    {
        let mut writer = self.writer.lock().await;
        let mut draft = self.snapshot().await.as_ref().clone();
        edit(&mut draft)?;
        Ok(self.commit(draft, &mut writer).await)
    }

    /// Swaps in `data` and writes it through (or schedules the write).
    /// The caller holds the writer lock, passed in as `pending`.
    async fn commit(
        &self,
        mut data: ResumeData,
        pending: &mut Option<JoinHandle<()>>,
    ) -> Arc<ResumeData> {
        data.ensure_item_ids();
        let snapshot = Arc::new(data);
        *self.data.write().await = snapshot.clone();

        if !self.is_loaded() {
            debug!("Session not loaded yet, skipping write");
            return snapshot;
        }

        if self.save_debounce.is_zero() {
            self.gateway.save(snapshot.as_ref()).await;
        } else {
            if let Some(previous) = pending.take() {
                previous.abort();
            }
            let gateway = self.gateway.clone();
            let delay = self.save_debounce;
            let scheduled = snapshot.clone();
            *pending = Some(tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                gateway.save(scheduled.as_ref()).await;
            }));
        }
        snapshot
    }

    /// Writes the current snapshot now if a debounced write is pending.
    pub async fn flush(&self) {
        let mut writer = self.writer.lock().await;
        if let Some(handle) = writer.take() {
            if !handle.is_finished() {
                handle.abort();
                let snapshot = self.snapshot().await;
                self.gateway.save(snapshot.as_ref()).await;
                debug!("Flushed pending resume write");
            }
        }
    }

    pub async fn select_template(&self, template_id: &str) -> Result<String, AppError> {
        if !is_known_template(template_id) {
            return Err(AppError::Validation(format!(
                "Unknown template '{template_id}'"
            )));
        }
        let _writer = self.writer.lock().await;
        *self.template_id.write().await = template_id.to_string();
        if self.is_loaded() {
            self.gateway.save_template_id(template_id).await;
        }
        Ok(template_id.to_string())
    }

    pub fn enhancement(&self) -> &AiSlot<EnhanceResumeOutput> {
        &self.enhancement
    }

    pub fn optimization(&self) -> &AiSlot<OptimizeResumeOutput> {
        &self.optimization
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::ResumeSection;
    use crate::persistence::store::{KeyValueStore, MemoryStore};
    use crate::persistence::{RESUME_DATA_KEY, SELECTED_TEMPLATE_KEY};

    fn named(name: &str) -> ResumeData {
        ResumeData {
            name: name.to_string(),
            ..Default::default()
        }
    }

    async fn stored_name(store: &MemoryStore) -> Option<String> {
        let raw = store.get(RESUME_DATA_KEY).await.unwrap()?;
        let data: ResumeData = serde_json::from_str(&raw).unwrap();
        Some(data.name)
    }

    #[tokio::test]
    async fn test_load_reads_persisted_state() {
        let store = Arc::new(MemoryStore::new());
        let gateway = PersistenceGateway::new(store.clone());
        gateway.save(&named("Jane")).await;
        gateway.save_template_id("modern").await;

        let session = ResumeSession::load(gateway, Duration::ZERO).await;
        assert!(session.is_loaded());
        assert_eq!(session.snapshot().await.name, "Jane");
        assert_eq!(session.template_id().await, "modern");
    }

    #[tokio::test]
    async fn test_update_writes_immediately_without_debounce() {
        let store = Arc::new(MemoryStore::new());
        let session =
            ResumeSession::load(PersistenceGateway::new(store.clone()), Duration::ZERO).await;

        session.update(named("Jane")).await;
        assert_eq!(stored_name(&store).await.as_deref(), Some("Jane"));
        session.update(named("Janet")).await;
        assert_eq!(stored_name(&store).await.as_deref(), Some("Janet"));
    }

    #[tokio::test]
    async fn test_updates_before_load_are_not_written() {
        let store = Arc::new(MemoryStore::new());
        let gateway = PersistenceGateway::new(store.clone());
        gateway.save(&named("Stored")).await;

        let session = ResumeSession::new(gateway, Duration::ZERO);
        session.update(named("Early edit")).await;
        assert_eq!(stored_name(&store).await.as_deref(), Some("Stored"));
        assert!(session.select_template("creative").await.is_ok());
        assert_eq!(store.get(SELECTED_TEMPLATE_KEY).await.unwrap(), None);

        session.initialize().await;
        assert_eq!(session.snapshot().await.name, "Stored");
    }

    #[tokio::test]
    async fn test_update_assigns_missing_item_ids() {
        let session = ResumeSession::load(
            PersistenceGateway::new(Arc::new(MemoryStore::new())),
            Duration::ZERO,
        )
        .await;
        let mut data = named("Jane");
        data.append_item(ResumeSection::Projects);
        data.projects[0].id.clear();

        let snapshot = session.update(data).await;
        assert!(!snapshot.projects[0].id.is_empty());
    }

    #[tokio::test]
    async fn test_snapshots_are_immutable() {
        let session = ResumeSession::load(
            PersistenceGateway::new(Arc::new(MemoryStore::new())),
            Duration::ZERO,
        )
        .await;
        let before = session.snapshot().await;
        session.update(named("Jane")).await;
        assert_eq!(before.name, "");
        assert_eq!(session.snapshot().await.name, "Jane");
    }

    #[tokio::test]
    async fn test_modify_error_leaves_snapshot_unchanged() {
        let session = ResumeSession::load(
            PersistenceGateway::new(Arc::new(MemoryStore::new())),
            Duration::ZERO,
        )
        .await;
        session.update(named("Jane")).await;
        let result = session
            .modify(|d| d.remove_item(ResumeSection::Experiences, "missing"))
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(session.snapshot().await.name, "Jane");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_modifications_are_not_lost() {
        let store = Arc::new(MemoryStore::new());
        let session = Arc::new(
            ResumeSession::load(PersistenceGateway::new(store.clone()), Duration::ZERO).await,
        );

        let tasks: Vec<_> = (0..200)
            .map(|_| {
                let session = session.clone();
                tokio::spawn(async move {
                    session
                        .modify(|d| {
                            d.append_item(ResumeSection::Experiences);
                            Ok(())
                        })
                        .await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(session.snapshot().await.experiences.len(), 200);
        let raw = store.get(RESUME_DATA_KEY).await.unwrap().unwrap();
        let stored: ResumeData = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored.experiences.len(), 200);
        assert_eq!(&stored, session.snapshot().await.as_ref());
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounced_writes_keep_only_latest() {
        let store = Arc::new(MemoryStore::new());
        let session = ResumeSession::load(
            PersistenceGateway::new(store.clone()),
            Duration::from_millis(500),
        )
        .await;

        session.update(named("J")).await;
        session.update(named("Ja")).await;
        session.update(named("Jane")).await;
        assert_eq!(stored_name(&store).await, None, "nothing written before the interval");

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(stored_name(&store).await.as_deref(), Some("Jane"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_writes_pending_snapshot() {
        let store = Arc::new(MemoryStore::new());
        let session = ResumeSession::load(
            PersistenceGateway::new(store.clone()),
            Duration::from_secs(60),
        )
        .await;

        session.update(named("Jane")).await;
        session.flush().await;
        assert_eq!(stored_name(&store).await.as_deref(), Some("Jane"));
    }

    #[tokio::test]
    async fn test_select_unknown_template_is_rejected() {
        let store = Arc::new(MemoryStore::new());
        let session =
            ResumeSession::load(PersistenceGateway::new(store.clone()), Duration::ZERO).await;

        assert!(matches!(
            session.select_template("neon").await,
            Err(AppError::Validation(_))
        ));
        assert_eq!(session.template_id().await, "classic");

        session.select_template("compact").await.unwrap();
        assert_eq!(
            store.get(SELECTED_TEMPLATE_KEY).await.unwrap().as_deref(),
            Some("compact")
        );
    }
}
