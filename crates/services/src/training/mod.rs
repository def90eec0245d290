mod session;
mod view;

pub use session::TrainingSession;
pub use view::{TrainingCard, TrainingView};
