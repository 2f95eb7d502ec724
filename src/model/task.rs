//! Task model.
//!
//! A task is one unit of work to be ordered. Tasks arrive from the caller
//! fully formed and are never mutated by the optimizer.

use serde::{Deserialize, Serialize};

/// Caller-assigned task identifier.
pub type TaskId = i64;

/// A task to be placed in the execution order.
///
/// Field ranges (`energy_required` 1–10, `importance`/`urgency`/`ease` 1–5)
/// are the caller's contract; the optimizer scores whatever it is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: TaskId,
    /// Human-readable title.
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// ISO-8601 due timestamp. `None` = no deadline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    /// Expected duration in minutes.
    #[serde(default)]
    pub duration: u32,
    /// Effort needed, 1 (light) to 10 (draining).
    pub energy_required: u8,
    /// 1 to 5.
    pub importance: u8,
    /// 1 to 5.
    pub urgency: u8,
    /// 1 (hard) to 5 (easy).
    pub ease: u8,
    #[serde(default = "default_status")]
    pub status: String,
    /// Ids of tasks that must be done before this one.
    #[serde(default)]
    pub dependencies: Vec<TaskId>,
}

fn default_status() -> String {
    "todo".to_string()
}

impl Task {
    /// Creates a task with mid-range attributes and no deadline.
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            deadline: None,
            duration: 30,
            energy_required: 5,
            importance: 3,
            urgency: 3,
            ease: 3,
            status: default_status(),
            dependencies: Vec::new(),
        }
    }

    /// Sets the duration in minutes.
    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration = minutes;
        self
    }

    /// Sets the energy requirement.
    pub fn with_energy(mut self, energy_required: u8) -> Self {
        self.energy_required = energy_required;
        self
    }

    /// Sets the importance.
    pub fn with_importance(mut self, importance: u8) -> Self {
        self.importance = importance;
        self
    }

    /// Sets the urgency.
    pub fn with_urgency(mut self, urgency: u8) -> Self {
        self.urgency = urgency;
        self
    }

    /// Sets the ease.
    pub fn with_ease(mut self, ease: u8) -> Self {
        self.ease = ease;
        self
    }

    /// Sets the deadline string.
    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }

    /// Adds a dependency on another task.
    pub fn depends_on(mut self, task_id: TaskId) -> Self {
        self.dependencies.push(task_id);
        self
    }
}
