use std::collections::BTreeSet;
use std::sync::Arc;

use rand::Rng;
use tracing::debug;

use qa_core::Clock;
use qa_core::model::{
    FilterCriteria, Item, ItemId, OverallProgress, ProgressMap, QuestionBank, Status,
    StatusFilter, TopicSelection, TopicSummary, filter, summarize,
};

use crate::error::ProgressStoreError;
use crate::progress_store::ProgressStore;
use crate::training::{TrainingSession, TrainingView};

/// Which screen the trainer is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    List,
    Training,
}

/// User actions that do not touch persisted progress.
///
/// Actions that write progress are `crate::Command`s handled by `TrainerService`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectTopic(TopicSelection),
    SetQuery(String),
    SetStatusFilter(StatusFilter),
    SetShuffle(bool),
    /// Show or hide an answer in the list view.
    ToggleAnswer(ItemId),
    /// Start a session over the current filtered items.
    StartTraining,
    /// Start again from the completed view, re-deriving ids from the current filter.
    RestartTraining,
    RevealAnswer,
    HideAnswer,
    ToggleTrainingAnswer,
    Advance,
    Retreat,
    ExitTraining,
}

/// Complete trainer state.
///
/// Topic summaries and the filtered list are derived on every call from the
/// bank, the progress map and the criteria; nothing derived is cached here.
#[derive(Debug, Clone)]
pub struct AppState {
    bank: Arc<QuestionBank>,
    progress: ProgressMap,
    criteria: FilterCriteria,
    shuffle: bool,
    open_answers: BTreeSet<ItemId>,
    training: Option<TrainingSession>,
    clock: Clock,
}

impl AppState {
    #[must_use]
    pub fn new(bank: Arc<QuestionBank>, progress: ProgressMap, shuffle: bool) -> Self {
        Self {
            bank,
            progress,
            criteria: FilterCriteria::default(),
            shuffle,
            open_answers: BTreeSet::new(),
            training: None,
            clock: Clock::default(),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    // ─── Reads ─────────────────────────────────────────────────────────────

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressMap {
        &self.progress
    }

    #[must_use]
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    #[must_use]
    pub fn shuffle_enabled(&self) -> bool {
        self.shuffle
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        if self.training.is_some() {
            Mode::Training
        } else {
            Mode::List
        }
    }

    #[must_use]
    pub fn topics(&self) -> Vec<TopicSummary> {
        summarize(self.bank.items(), &self.progress)
    }

    #[must_use]
    pub fn overall(&self) -> OverallProgress {
        OverallProgress::compute(self.bank.items(), &self.progress)
    }

    #[must_use]
    pub fn filtered(&self) -> Vec<&Item> {
        filter(self.bank.items(), &self.progress, &self.criteria)
    }

    /// Heading for the selected topic.
    #[must_use]
    pub fn selected_topic_title(&self) -> String {
        self.criteria.topic.title(&self.topics()).to_string()
    }

    /// False when the current filter matches nothing.
    #[must_use]
    pub fn can_start_training(&self) -> bool {
        !self.filtered().is_empty()
    }

    #[must_use]
    pub fn is_answer_open(&self, id: &ItemId) -> bool {
        self.open_answers.contains(id)
    }

    #[must_use]
    pub fn training(&self) -> Option<&TrainingSession> {
        self.training.as_ref()
    }

    /// Training screen snapshot, `None` in list mode.
    #[must_use]
    pub fn training_view(&self) -> Option<TrainingView<'_>> {
        self.training
            .as_ref()
            .map(|session| session.view(&self.bank, &self.progress))
    }

    // ─── Transitions ───────────────────────────────────────────────────────

    /// Apply `action`, shuffling with the thread-local RNG when a session starts.
    #[must_use]
    pub fn apply(self, action: Action) -> Self {
        self.apply_with_rng(action, &mut rand::rng())
    }

    #[must_use]
    pub fn apply_with_rng<R: Rng + ?Sized>(mut self, action: Action, rng: &mut R) -> Self {
        match action {
            Action::SelectTopic(topic) => self.criteria.topic = topic,
            Action::SetQuery(query) => self.criteria.query = query,
            Action::SetStatusFilter(status) => self.criteria.status = status,
            Action::SetShuffle(shuffle) => self.shuffle = shuffle,
            Action::ToggleAnswer(id) => {
                if !self.open_answers.remove(&id) {
                    self.open_answers.insert(id);
                }
            }
            Action::StartTraining | Action::RestartTraining => {
                let ids: Vec<ItemId> = self.filtered().iter().map(|item| item.id().clone()).collect();
                debug!(items = ids.len(), shuffle = self.shuffle, "training started");
                self.training = Some(TrainingSession::start_with_rng(
                    ids,
                    self.shuffle,
                    self.clock.now(),
                    rng,
                ));
            }
            Action::RevealAnswer => self.with_session(TrainingSession::reveal),
            Action::HideAnswer => self.with_session(TrainingSession::hide),
            Action::ToggleTrainingAnswer => self.with_session(TrainingSession::toggle_reveal),
            Action::Advance => self.with_session(TrainingSession::advance),
            Action::Retreat => self.with_session(TrainingSession::retreat),
            Action::ExitTraining => {
                if self.training.take().is_some() {
                    debug!("training exited");
                }
            }
        }
        self
    }

    fn with_session(&mut self, step: impl FnOnce(&mut TrainingSession)) {
        if let Some(session) = self.training.as_mut() {
            step(session);
        }
    }

    pub(crate) fn replace_progress(&mut self, progress: ProgressMap) {
        self.progress = progress;
    }

    /// Mark the current session item. Returns `false` outside training.
    ///
    /// State is only touched once the write has succeeded.
    pub(crate) async fn mark_current(
        &mut self,
        store: &ProgressStore,
        status: Status,
    ) -> Result<bool, ProgressStoreError> {
        let Some(session) = self.training.as_mut() else {
            return Ok(false);
        };
        self.progress = session
            .mark_and_advance(store, &self.bank, &self.progress, status)
            .await?;
        Ok(true)
    }

    /// Drop everything that depended on the old progress: open answers and the session.
    pub(crate) fn clear_after_reset(&mut self, progress: ProgressMap) {
        self.progress = progress;
        self.open_answers.clear();
        self.training = None;
    }
}
