use std::sync::Arc;

use qa_core::TrainerSettings;
use qa_core::model::{FilterCriteria, ItemId, QuestionBank, Status, filter, summarize};
use qa_core::time::fixed_clock;
use services::{Action, Command, Mode, TrainerService, TrainingView};
use storage::repository::Storage;

const BANK: &str = r#"[
    {"id":"a","topicId":"t1","topicTitle":"Topic One","question":"Qa","answer":"Aa"},
    {"id":"b","topicId":"t1","topicTitle":"Topic One","question":"Qb","answer":"Ab","tags":["intro"]},
    {"id":"c","topicId":"t2","topicTitle":"Topic Two","question":"Qc","answer":"Ac"}
]"#;

fn bank() -> Arc<QuestionBank> {
    Arc::new(QuestionBank::from_json(BANK).expect("bank parses"))
}

fn sequential_settings() -> TrainerSettings {
    qa_core::TrainerSettingsDraft {
        storage_key: None,
        shuffle_by_default: Some(false),
    }
    .validate()
    .unwrap()
}

#[tokio::test]
async fn summaries_follow_status_changes() {
    let service = TrainerService::new(&Storage::in_memory(), sequential_settings());
    let mut state = service.bootstrap(bank()).await;

    let topics = state.topics();
    assert_eq!(topics.len(), 2);
    assert_eq!((topics[0].id.as_str(), topics[0].total, topics[0].percent_learned), ("t1", 2, 0));
    assert_eq!((topics[1].id.as_str(), topics[1].total, topics[1].percent_learned), ("t2", 1, 0));

    service
        .execute(&mut state, Command::SetStatus(ItemId::from("a"), Status::Learned))
        .await
        .unwrap();
    let t1 = &state.topics()[0];
    assert_eq!((t1.learned, t1.percent_learned), (1, 50));
}

#[tokio::test]
async fn default_filter_returns_all_items_in_order() {
    let bank = bank();
    let state = TrainerService::new(&Storage::in_memory(), sequential_settings())
        .bootstrap(Arc::clone(&bank))
        .await;

    let direct: Vec<_> = filter(bank.items(), state.progress(), &FilterCriteria::default())
        .iter()
        .map(|item| item.id().to_string())
        .collect();
    assert_eq!(direct, vec!["a", "b", "c"]);
    assert_eq!(state.filtered().len(), 3);
}

#[tokio::test]
async fn marking_the_last_item_records_and_stays() {
    let service = TrainerService::new(&Storage::in_memory(), sequential_settings())
        .with_clock(fixed_clock());
    let mut state = service
        .bootstrap(bank())
        .await
        .apply(Action::StartTraining)
        .apply(Action::Advance)
        .apply(Action::Advance);

    service
        .execute(&mut state, Command::MarkAndAdvance(Status::Learned))
        .await
        .unwrap();

    let session = state.training().expect("still training");
    assert_eq!(session.index(), 2);
    assert_eq!(state.progress().status(&ItemId::from("c")), Status::Learned);
    assert!(matches!(state.training_view(), Some(TrainingView::Card(card)) if card.position == 3));
    assert_eq!(service.store().load().await, *state.progress());
}

#[tokio::test]
async fn full_pass_marks_every_item() {
    let service = TrainerService::new(&Storage::in_memory(), TrainerSettings::default());
    let mut state = service.bootstrap(bank()).await.apply(Action::StartTraining);

    for _ in 0..3 {
        service
            .execute(&mut state, Command::MarkAndAdvance(Status::Learning))
            .await
            .unwrap();
    }

    assert_eq!(state.progress().len(), 3);
    assert!(state.progress().iter().all(|(_, status)| status == Status::Learning));
    let summaries = summarize(state.bank().items(), state.progress());
    assert!(summaries.iter().all(|t| t.learning == t.total));
}

#[tokio::test]
async fn reset_then_reload_is_empty() {
    let storage = Storage::in_memory();
    let service = TrainerService::new(&storage, sequential_settings());
    let mut state = service.bootstrap(bank()).await;
    service
        .execute(&mut state, Command::SetStatus(ItemId::from("a"), Status::Learned))
        .await
        .unwrap();

    service.execute(&mut state, Command::ResetProgress).await.unwrap();
    assert!(state.progress().is_empty());

    let reloaded = TrainerService::new(&storage, sequential_settings())
        .bootstrap(bank())
        .await;
    assert!(reloaded.progress().is_empty());
    assert_eq!(reloaded.mode(), Mode::List);
}

#[tokio::test]
async fn progress_survives_reopening_sqlite_storage() {
    let url = "sqlite:file:memdb_training_flow?mode=memory&cache=shared";
    let storage = Storage::sqlite(url).await.expect("storage");
    let service = TrainerService::new(&storage, sequential_settings());

    let mut state = service.bootstrap(bank()).await;
    service
        .execute(&mut state, Command::SetStatus(ItemId::from("b"), Status::Learning))
        .await
        .unwrap();

    let reopened = TrainerService::new(&storage, sequential_settings())
        .bootstrap(bank())
        .await;
    assert_eq!(reopened.progress().status(&ItemId::from("b")), Status::Learning);
    assert_eq!(reopened.progress().status(&ItemId::from("a")), Status::Unlearned);
}
