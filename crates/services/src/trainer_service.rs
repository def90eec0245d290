use std::sync::Arc;

use tracing::{debug, info};

use qa_core::model::{ItemId, QuestionBank, Status};
use qa_core::{Clock, TrainerSettings};
use storage::repository::Storage;

use crate::app_state::AppState;
use crate::error::TrainerError;
use crate::progress_store::ProgressStore;

/// User actions that write progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Set an item's status from the list view.
    SetStatus(ItemId, Status),
    /// Mark the current training item, then move on.
    MarkAndAdvance(Status),
    /// Erase all progress. Only dispatch after the user has confirmed.
    ResetProgress,
}

/// Wires the progress store into state transitions that persist.
#[derive(Clone)]
pub struct TrainerService {
    store: ProgressStore,
    settings: TrainerSettings,
    clock: Clock,
}

impl TrainerService {
    #[must_use]
    pub fn new(storage: &Storage, settings: TrainerSettings) -> Self {
        Self {
            store: ProgressStore::from_settings(Arc::clone(&storage.kv), &settings),
            settings,
            clock: Clock::default(),
        }
    }

    /// Build a service configured from `QA_TRAINER_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns `TrainerError::Settings` if a variable holds an unusable value.
    pub fn from_env(storage: &Storage) -> Result<Self, TrainerError> {
        let settings = TrainerSettings::from_env()?;
        Ok(Self::new(storage, settings))
    }

    /// Build a service backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `TrainerError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str, settings: TrainerSettings) -> Result<Self, TrainerError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::new(&storage, settings))
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn store(&self) -> &ProgressStore {
        &self.store
    }

    #[must_use]
    pub fn settings(&self) -> &TrainerSettings {
        &self.settings
    }

    /// Load persisted progress and build the initial list-mode state.
    pub async fn bootstrap(&self, bank: Arc<QuestionBank>) -> AppState {
        let progress = self.store.load().await;
        info!(
            items = bank.len(),
            recorded = progress.len(),
            "trainer state loaded"
        );
        AppState::new(bank, progress, self.settings.shuffle_by_default()).with_clock(self.clock)
    }

    /// Apply a persisting command to `state` in place.
    ///
    /// # Errors
    ///
    /// Returns `TrainerError::Progress` if the store cannot be written. `state`
    /// is left exactly as it was in that case.
    pub async fn execute(&self, state: &mut AppState, command: Command) -> Result<(), TrainerError> {
        match command {
            Command::SetStatus(id, status) => {
                let next = self.store.set_status(state.progress(), &id, status).await?;
                state.replace_progress(next);
            }
            Command::MarkAndAdvance(status) => {
                if !state.mark_current(&self.store, status).await? {
                    debug!("mark requested outside training, ignoring");
                }
            }
            Command::ResetProgress => {
                let cleared = self.store.reset().await?;
                state.clear_after_reset(cleared);
            }
        }
        Ok(())
    }
}
