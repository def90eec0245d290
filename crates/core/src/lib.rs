#![forbid(unsafe_code)]

pub mod model;
pub mod settings;
pub mod shuffle;
pub mod text;
pub mod time;

pub use settings::{TrainerSettings, TrainerSettingsDraft};
pub use time::Clock;
