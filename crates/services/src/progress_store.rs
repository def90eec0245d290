use std::sync::Arc;

use qa_core::TrainerSettings;
use qa_core::model::{ItemId, ProgressMap, Status};
use serde_json::Value;
use storage::repository::KeyValueStore;
use tracing::{debug, info, warn};

use crate::error::ProgressStoreError;

/// Authoritative status-per-item mapping, mirrored into a key-value store.
///
/// Reads never fail: anything unreadable loads as an empty map. Writes are
/// persisted before the new map is handed back, and write failures propagate.
#[derive(Clone)]
pub struct ProgressStore {
    kv: Arc<dyn KeyValueStore>,
    key: String,
}

impl ProgressStore {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn from_settings(kv: Arc<dyn KeyValueStore>, settings: &TrainerSettings) -> Self {
        Self::new(kv, settings.storage_key())
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the persisted mapping, or an empty one if missing or malformed.
    pub async fn load(&self) -> ProgressMap {
        let raw = match self.kv.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "no persisted progress");
                return ProgressMap::new();
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "progress read failed, starting empty");
                return ProgressMap::new();
            }
        };

        let progress = decode_progress(&raw);
        debug!(key = %self.key, entries = progress.len(), "loaded progress");
        progress
    }

    /// Bind `id` to `status` in a copy of `progress` and persist the copy.
    ///
    /// # Errors
    ///
    /// Returns `ProgressStoreError` if the new mapping cannot be written; the
    /// caller keeps its previous mapping in that case.
    pub async fn set_status(
        &self,
        progress: &ProgressMap,
        id: &ItemId,
        status: Status,
    ) -> Result<ProgressMap, ProgressStoreError> {
        let next = progress.with_status(id, status);
        self.save(&next).await?;
        debug!(item = %id, %status, "status recorded");
        Ok(next)
    }

    /// Overwrite the persisted mapping with `progress`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressStoreError` on encode or write failure.
    pub async fn save(&self, progress: &ProgressMap) -> Result<(), ProgressStoreError> {
        let raw = encode_progress(progress)?;
        self.kv.set(&self.key, &raw).await?;
        Ok(())
    }

    /// Erase the persisted mapping and return an empty one.
    ///
    /// Confirmation is the caller's responsibility.
    ///
    /// # Errors
    ///
    /// Returns `ProgressStoreError` if the key cannot be removed.
    pub async fn reset(&self) -> Result<ProgressMap, ProgressStoreError> {
        self.kv.remove(&self.key).await?;
        info!(key = %self.key, "progress reset");
        Ok(ProgressMap::new())
    }
}

/// Encode as a flat JSON object of id → status literal.
///
/// # Errors
///
/// Returns `serde_json::Error` if encoding fails.
pub fn encode_progress(progress: &ProgressMap) -> Result<String, serde_json::Error> {
    serde_json::to_string(progress)
}

/// Decode persisted text leniently.
///
/// Invalid JSON or a non-object document yields an empty map; entries whose
/// value is not a status literal are skipped.
#[must_use]
pub fn decode_progress(raw: &str) -> ProgressMap {
    if raw.trim().is_empty() {
        return ProgressMap::new();
    }

    let entries = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(entries)) => entries,
        Ok(other) => {
            warn!(kind = value_kind(&other), "persisted progress is not an object, ignoring");
            return ProgressMap::new();
        }
        Err(err) => {
            warn!(error = %err, "persisted progress is not valid JSON, ignoring");
            return ProgressMap::new();
        }
    };

    entries
        .into_iter()
        .filter_map(|(id, value)| {
            match value.as_str().and_then(|literal| literal.parse::<Status>().ok()) {
                Some(status) => Some((ItemId::new(id), status)),
                None => {
                    warn!(item = %id, "dropping persisted entry with unknown status");
                    None
                }
            }
        })
        .collect()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
