use crate::model::ids::TopicId;
use crate::model::item::Item;
use crate::model::progress::ProgressMap;
use crate::model::status::Status;
use crate::model::topic::TopicSummary;
use crate::text::normalize;

/// Title shown when no particular topic is selected.
pub const ALL_TOPICS_TITLE: &str = "All topics";

/// Title shown when the selected topic id has no summary.
pub const UNKNOWN_TOPIC_TITLE: &str = "Topic";

/// Topic part of the filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TopicSelection {
    #[default]
    All,
    Topic(TopicId),
}

impl TopicSelection {
    #[must_use]
    pub fn matches(&self, topic_id: &TopicId) -> bool {
        match self {
            TopicSelection::All => true,
            TopicSelection::Topic(selected) => selected == topic_id,
        }
    }

    /// Heading for the current selection.
    #[must_use]
    pub fn title<'a>(&self, topics: &'a [TopicSummary]) -> &'a str {
        match self {
            TopicSelection::All => ALL_TOPICS_TITLE,
            TopicSelection::Topic(id) => topics
                .iter()
                .find(|topic| &topic.id == id)
                .map_or(UNKNOWN_TOPIC_TITLE, |topic| topic.title.as_str()),
        }
    }
}

/// Status part of the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

impl StatusFilter {
    #[must_use]
    pub fn matches(self, status: Status) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

impl From<Status> for StatusFilter {
    fn from(status: Status) -> Self {
        StatusFilter::Only(status)
    }
}

/// Active topic, free-text query and status selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub topic: TopicSelection,
    pub query: String,
    pub status: StatusFilter,
}

impl FilterCriteria {
    #[must_use]
    pub fn new(topic: TopicSelection, query: impl Into<String>, status: StatusFilter) -> Self {
        Self {
            topic,
            query: query.into(),
            status,
        }
    }

    /// Returns true if `item` passes every part of the filter.
    #[must_use]
    pub fn matches(&self, item: &Item, progress: &ProgressMap) -> bool {
        self.matches_normalized(item, progress, &normalize(&self.query))
    }

    fn matches_normalized(&self, item: &Item, progress: &ProgressMap, query: &str) -> bool {
        self.topic.matches(item.topic_id())
            && item.matches_query(query)
            && self.status.matches(progress.status(item.id()))
    }
}

/// Visible subset of `items` for `criteria`, in input order.
///
/// An empty result is a valid outcome, not an error.
#[must_use]
pub fn filter<'a>(
    items: &'a [Item],
    progress: &ProgressMap,
    criteria: &FilterCriteria,
) -> Vec<&'a Item> {
    let query = normalize(&criteria.query);
    items
        .iter()
        .filter(|item| criteria.matches_normalized(item, progress, &query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ids::ItemId;
    use crate::model::topic::summarize;

    fn items() -> Vec<Item> {
        vec![
            Item::new("a", "t1", "Rust", "What is ownership?", "..."),
            Item::new("b", "t1", "Rust", "Explain borrowing", "...").with_tags(["References"]),
            Item::new("c", "t2", "Async", "What is a future?", "..."),
        ]
    }

    fn ids(found: &[&Item]) -> Vec<String> {
        found.iter().map(|item| item.id().to_string()).collect()
    }

    #[test]
    fn default_criteria_keep_everything_in_order() {
        let items = items();
        let found = filter(&items, &ProgressMap::new(), &FilterCriteria::default());
        assert_eq!(ids(&found), vec!["a", "b", "c"]);
    }

    #[test]
    fn topic_selection_limits_to_topic() {
        let items = items();
        let criteria = FilterCriteria::new(TopicSelection::Topic("t2".into()), "", StatusFilter::All);
        assert_eq!(ids(&filter(&items, &ProgressMap::new(), &criteria)), vec!["c"]);
    }

    #[test]
    fn query_is_trimmed_and_case_insensitive() {
        let items = items();
        let criteria = FilterCriteria::new(TopicSelection::All, "  WHAT is ", StatusFilter::All);
        assert_eq!(ids(&filter(&items, &ProgressMap::new(), &criteria)), vec!["a", "c"]);

        let by_tag = FilterCriteria::new(TopicSelection::All, "refer", StatusFilter::All);
        assert_eq!(ids(&filter(&items, &ProgressMap::new(), &by_tag)), vec!["b"]);
    }

    #[test]
    fn status_filter_treats_missing_as_unlearned() {
        let items = items();
        let progress = ProgressMap::new().with_status(&ItemId::from("b"), Status::Learning);

        let unlearned = FilterCriteria::new(TopicSelection::All, "", Status::Unlearned.into());
        assert_eq!(ids(&filter(&items, &progress, &unlearned)), vec!["a", "c"]);

        let learning = FilterCriteria::new(TopicSelection::All, "", Status::Learning.into());
        assert_eq!(ids(&filter(&items, &progress, &learning)), vec!["b"]);
    }

    #[test]
    fn no_match_yields_empty() {
        let items = items();
        let criteria = FilterCriteria::new(TopicSelection::All, "zzz", StatusFilter::All);
        assert!(filter(&items, &ProgressMap::new(), &criteria).is_empty());
    }

    #[test]
    fn selection_title_falls_back() {
        let topics = summarize(&items(), &ProgressMap::new());
        assert_eq!(TopicSelection::All.title(&topics), ALL_TOPICS_TITLE);
        assert_eq!(TopicSelection::Topic("t2".into()).title(&topics), "Async");
        assert_eq!(TopicSelection::Topic("gone".into()).title(&topics), UNKNOWN_TOPIC_TITLE);
    }
}
