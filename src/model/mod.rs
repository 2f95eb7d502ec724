//! Input data model: tasks and objective weights.

mod task;
mod weights;

pub use task::{Task, TaskId};
pub use weights::WeightConfig;
