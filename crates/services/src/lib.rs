#![forbid(unsafe_code)]

pub mod app_state;
pub mod error;
pub mod progress_store;
pub mod trainer_service;
pub mod training;

pub use qa_core::Clock;

pub use app_state::{Action, AppState, Mode};
pub use error::{ProgressStoreError, TrainerError};
pub use progress_store::ProgressStore;
pub use trainer_service::{Command, TrainerService};
pub use training::{TrainingCard, TrainingSession, TrainingView};
