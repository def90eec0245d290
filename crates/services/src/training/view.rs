use qa_core::model::{Item, Status};

/// What the training screen should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingView<'a> {
    /// An item to drill.
    Card(TrainingCard<'a>),
    /// Nothing left at the current position.
    Completed,
}

/// Current training item plus position counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingCard<'a> {
    pub item: &'a Item,
    pub status: Status,
    /// 1-based position in the session order.
    pub position: usize,
    pub total: usize,
    pub revealed: bool,
    pub can_retreat: bool,
    pub can_advance: bool,
}

impl TrainingCard<'_> {
    /// Answer text if revealed.
    #[must_use]
    pub fn answer(&self) -> Option<&str> {
        self.revealed.then(|| self.item.answer())
    }
}
