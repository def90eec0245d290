use chrono::{DateTime, Utc};
use rand::Rng;
use std::fmt;

use qa_core::model::{ItemId, ProgressMap, QuestionBank, Status};
use qa_core::shuffle::shuffle_with;

use super::view::{TrainingCard, TrainingView};
use crate::error::ProgressStoreError;
use crate::progress_store::ProgressStore;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Ordered walkthrough of a fixed set of items.
///
/// The order is fixed when the session starts and is not recomputed if the
/// filter that produced the ids changes afterwards. Navigation clamps at both
/// ends; an empty order is a session that is already finished.
#[derive(Clone)]
pub struct TrainingSession {
    source: Vec<ItemId>,
    order: Vec<ItemId>,
    index: usize,
    revealed: bool,
    shuffle: bool,
    started_at: DateTime<Utc>,
}

impl TrainingSession {
    /// Start a session over `ids`, shuffled with the thread-local RNG if requested.
    #[must_use]
    pub fn start(ids: Vec<ItemId>, shuffle: bool, started_at: DateTime<Utc>) -> Self {
        Self::start_with_rng(ids, shuffle, started_at, &mut rand::rng())
    }

    #[must_use]
    pub fn start_with_rng<R: Rng + ?Sized>(
        ids: Vec<ItemId>,
        shuffle: bool,
        started_at: DateTime<Utc>,
        rng: &mut R,
    ) -> Self {
        let order = if shuffle {
            shuffle_with(&ids, rng)
        } else {
            ids.clone()
        };

        Self {
            source: ids,
            order,
            index: 0,
            revealed: false,
            shuffle,
            started_at,
        }
    }

    /// Start over with the same source ids and shuffle preference.
    ///
    /// A shuffled session gets a fresh permutation.
    pub fn restart(&mut self, started_at: DateTime<Utc>) {
        self.restart_with_rng(started_at, &mut rand::rng());
    }

    pub fn restart_with_rng<R: Rng + ?Sized>(&mut self, started_at: DateTime<Utc>, rng: &mut R) {
        let source = std::mem::take(&mut self.source);
        *self = Self::start_with_rng(source, self.shuffle, started_at, rng);
    }

    #[must_use]
    pub fn order(&self) -> &[ItemId] {
        &self.order
    }

    #[must_use]
    pub fn source(&self) -> &[ItemId] {
        &self.source
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    #[must_use]
    pub fn shuffle_enabled(&self) -> bool {
        self.shuffle
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Id at the current position, `None` once there is nothing left to show.
    #[must_use]
    pub fn current_id(&self) -> Option<&ItemId> {
        self.order.get(self.index)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.current_id().is_none()
    }

    fn last_index(&self) -> Option<usize> {
        self.order.len().checked_sub(1)
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.last_index().is_some_and(|last| self.index < last)
    }

    #[must_use]
    pub fn can_retreat(&self) -> bool {
        self.index > 0
    }

    pub fn reveal(&mut self) {
        if !self.is_finished() {
            self.revealed = true;
        }
    }

    pub fn hide(&mut self) {
        if !self.is_finished() {
            self.revealed = false;
        }
    }

    pub fn toggle_reveal(&mut self) {
        if !self.is_finished() {
            self.revealed = !self.revealed;
        }
    }

    /// Move to the next item. Stays put on the last item.
    pub fn advance(&mut self) {
        if self.can_advance() {
            self.index += 1;
            self.revealed = false;
        }
    }

    /// Move to the previous item, never below the first.
    pub fn retreat(&mut self) {
        self.index = self.index.saturating_sub(1);
        self.revealed = false;
    }

    /// Record `status` for the current item, then advance unless on the last item.
    ///
    /// Returns the updated mapping. When there is no current item, or its id no
    /// longer resolves in `bank`, nothing is recorded and `progress` is returned
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns `ProgressStoreError` if the status cannot be persisted; the
    /// session position is left untouched in that case.
    pub async fn mark_and_advance(
        &mut self,
        store: &ProgressStore,
        bank: &QuestionBank,
        progress: &ProgressMap,
        status: Status,
    ) -> Result<ProgressMap, ProgressStoreError> {
        let Some(id) = self.current_id().filter(|id| bank.get(id).is_some()).cloned() else {
            return Ok(progress.clone());
        };

        let next = store.set_status(progress, &id, status).await?;
        self.advance();
        Ok(next)
    }

    /// Snapshot for rendering.
    ///
    /// Yields `TrainingView::Completed` when the position has no item, including
    /// an id that no longer resolves in `bank`.
    #[must_use]
    pub fn view<'a>(&self, bank: &'a QuestionBank, progress: &ProgressMap) -> TrainingView<'a> {
        let Some(item) = self.current_id().and_then(|id| bank.get(id)) else {
            return TrainingView::Completed;
        };

        TrainingView::Card(TrainingCard {
            item,
            status: progress.status(item.id()),
            position: self.index + 1,
            total: self.order.len(),
            revealed: self.revealed,
            can_retreat: self.can_retreat(),
            can_advance: self.can_advance(),
        })
    }
}

impl fmt::Debug for TrainingSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrainingSession")
            .field("order_len", &self.order.len())
            .field("index", &self.index)
            .field("revealed", &self.revealed)
            .field("shuffle", &self.shuffle)
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
