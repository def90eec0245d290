use feruca::Collator;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::model::ids::TopicId;
use crate::model::item::Item;
use crate::model::progress::ProgressMap;
use crate::model::status::Status;

/// Aggregate counts for one topic, derived from items and progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicSummary {
    pub id: TopicId,
    pub title: String,
    pub total: usize,
    pub learned: usize,
    pub learning: usize,
    pub unlearned: usize,
    /// `round(learned / total * 100)`, 0 for an empty topic.
    pub percent_learned: u8,
}

/// Learned count across the whole question bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverallProgress {
    pub total: usize,
    pub learned: usize,
    pub percent: u8,
}

impl OverallProgress {
    #[must_use]
    pub fn compute(items: &[Item], progress: &ProgressMap) -> Self {
        let learned = items
            .iter()
            .filter(|item| progress.status(item.id()) == Status::Learned)
            .count();
        Self {
            total: items.len(),
            learned,
            percent: percent_of(learned, items.len()),
        }
    }
}

/// Percentage of `part` in `total`, rounded half up. Returns 0 when `total` is 0.
#[must_use]
pub fn percent_of(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let rounded = (part.saturating_mul(200) + total) / total.saturating_mul(2);
    u8::try_from(rounded.min(100)).unwrap_or(100)
}

/// Groups items by topic and counts statuses per group.
///
/// The first title seen for a topic id wins. Results are ordered by title.
#[must_use]
pub fn summarize(items: &[Item], progress: &ProgressMap) -> Vec<TopicSummary> {
    let mut slots: HashMap<&TopicId, usize> = HashMap::new();
    let mut summaries: Vec<TopicSummary> = Vec::new();

    for item in items {
        let slot = *slots.entry(item.topic_id()).or_insert_with(|| {
            summaries.push(TopicSummary {
                id: item.topic_id().clone(),
                title: item.topic_title().to_string(),
                total: 0,
                learned: 0,
                learning: 0,
                unlearned: 0,
                percent_learned: 0,
            });
            summaries.len() - 1
        });

        let summary = &mut summaries[slot];
        summary.total += 1;
        match progress.status(item.id()) {
            Status::Learned => summary.learned += 1,
            Status::Learning => summary.learning += 1,
            Status::Unlearned => summary.unlearned += 1,
        }
    }

    for summary in &mut summaries {
        summary.percent_learned = percent_of(summary.learned, summary.total);
    }

    let mut collator = Collator::default();
    summaries.sort_by(|a, b| collate_titles(&mut collator, &a.title, &b.title));
    summaries
}

/// Title ordering: Unicode collation with root-locale tailoring, raw text as tie-breaker.
#[must_use]
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    collate_titles(&mut Collator::default(), a, b)
}

fn collate_titles(collator: &mut Collator, a: &str, b: &str) -> Ordering {
    collator.collate(a, b).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ids::ItemId;

    fn items() -> Vec<Item> {
        vec![
            Item::new("a", "t1", "Rust", "Q a", "A a"),
            Item::new("b", "t1", "Rust", "Q b", "A b"),
            Item::new("c", "t2", "Async", "Q c", "A c"),
        ]
    }

    #[test]
    fn summarize_counts_empty_progress() {
        let topics = summarize(&items(), &ProgressMap::new());

        assert_eq!(topics.len(), 2);
        let t1 = topics.iter().find(|t| t.id.as_str() == "t1").unwrap();
        assert_eq!((t1.total, t1.learned, t1.percent_learned), (2, 0, 0));
        let t2 = topics.iter().find(|t| t.id.as_str() == "t2").unwrap();
        assert_eq!((t2.total, t2.learned, t2.percent_learned), (1, 0, 0));
    }

    #[test]
    fn summarize_reflects_learned_items() {
        let progress = ProgressMap::new().with_status(&ItemId::from("a"), Status::Learned);
        let topics = summarize(&items(), &progress);

        let t1 = topics.iter().find(|t| t.id.as_str() == "t1").unwrap();
        assert_eq!(t1.learned, 1);
        assert_eq!(t1.unlearned, 1);
        assert_eq!(t1.percent_learned, 50);
    }

    #[test]
    fn counts_always_sum_to_total() {
        let progress = ProgressMap::new()
            .with_status(&ItemId::from("a"), Status::Learning)
            .with_status(&ItemId::from("c"), Status::Learned)
            .with_status(&ItemId::from("ghost"), Status::Learned);

        for topic in summarize(&items(), &progress) {
            assert_eq!(topic.learned + topic.learning + topic.unlearned, topic.total);
        }
    }

    #[test]
    fn sorted_by_title_and_first_title_wins() {
        let mut items = items();
        items.push(Item::new("d", "t2", "Renamed", "Q d", "A d"));
        items.push(Item::new("e", "t3", "actors", "Q e", "A e"));

        let titles: Vec<_> = summarize(&items, &ProgressMap::new())
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["actors", "Async", "Rust"]);
    }

    #[test]
    fn non_ascii_titles_sort_alphabetically() {
        let items: Vec<Item> = ["Zeta", "Élan", "Яблоко", "Ёлка"]
            .iter()
            .enumerate()
            .map(|(n, title)| Item::new(format!("i{n}"), format!("t{n}"), *title, "Q", "A"))
            .collect();

        let titles: Vec<_> = summarize(&items, &ProgressMap::new())
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["Élan", "Zeta", "Ёлка", "Яблоко"]);
    }

    #[test]
    fn case_variants_differ_but_accents_sort_with_base_letter() {
        assert_eq!(compare_titles("Rust", "Rust"), Ordering::Equal);
        assert_ne!(compare_titles("rust", "Rust"), Ordering::Equal);
        assert_eq!(compare_titles("élan", "zeta"), Ordering::Less);
    }

    #[test]
    fn percent_rounds_half_up_and_handles_zero() {
        assert_eq!(percent_of(0, 0), 0);
        assert_eq!(percent_of(1, 3), 33);
        assert_eq!(percent_of(2, 3), 67);
        assert_eq!(percent_of(1, 8), 13);
        assert_eq!(percent_of(3, 3), 100);
    }

    #[test]
    fn overall_progress_counts_learned_only() {
        let progress = ProgressMap::new()
            .with_status(&ItemId::from("a"), Status::Learned)
            .with_status(&ItemId::from("b"), Status::Learning);
        let overall = OverallProgress::compute(&items(), &progress);
        assert_eq!(
            overall,
            OverallProgress {
                total: 3,
                learned: 1,
                percent: 33
            }
        );
        assert_eq!(OverallProgress::compute(&[], &progress).percent, 0);
    }
}
