mod bank;
mod filter;
mod ids;
mod item;
mod progress;
mod status;
mod topic;

pub use bank::{BankError, QuestionBank};
pub use filter::{
    ALL_TOPICS_TITLE, FilterCriteria, StatusFilter, TopicSelection, UNKNOWN_TOPIC_TITLE, filter,
};
pub use ids::{ItemId, TopicId};
pub use item::Item;
pub use progress::ProgressMap;
pub use status::{Status, StatusParseError};
pub use topic::{OverallProgress, TopicSummary, compare_titles, percent_of, summarize};
