use serde::{Deserialize, Serialize};

use crate::model::ids::{ItemId, TopicId};
use crate::text::normalize;

/// One question/answer record from the question bank.
///
/// Items are supplied externally and never mutated by the trainer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    id: ItemId,
    topic_id: TopicId,
    topic_title: String,
    question: String,
    answer: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tags: Vec<String>,
}

impl Item {
    #[must_use]
    pub fn new(
        id: impl Into<ItemId>,
        topic_id: impl Into<TopicId>,
        topic_title: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            topic_id: topic_id.into(),
            topic_title: topic_title.into(),
            question: question.into(),
            answer: answer.into(),
            tags: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    #[must_use]
    pub fn topic_id(&self) -> &TopicId {
        &self.topic_id
    }

    #[must_use]
    pub fn topic_title(&self) -> &str {
        &self.topic_title
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns true if the question or any tag contains `query`.
    ///
    /// `query` must already be normalized; an empty query matches everything.
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        normalize(&self.question).contains(query)
            || self.tags.iter().any(|tag| normalize(tag).contains(query))
    }
}
