//! Structural errors that stop a scheduling run before it starts.

use thiserror::Error;

use crate::task::{Minute, TaskId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    #[error("task '{task}' depends on unknown task '{dependency}'")]
    MissingDependency { task: TaskId, dependency: TaskId },

    #[error("duplicate task id: {0}")]
    DuplicateTaskId(TaskId),

    #[error("task '{task}' has non-positive duration {duration}")]
    NonPositiveDuration { task: TaskId, duration: Minute },

    #[error("task '{0}' depends on itself")]
    SelfDependency(TaskId),

    #[error("task '{0}' already carries scheduling state (status, rank or start)")]
    AlreadyScheduled(TaskId),

    #[error("task '{task}' does not fit in the minute range of a day plan")]
    TimeOutOfRange { task: TaskId },

    #[error("unknown task: {0}")]
    UnknownTask(TaskId),

    #[error("invalid clock time '{input}': expected HH:MM or minutes")]
    InvalidClock { input: String },
}
