//! Post-placement dependency timing checks.
//!
//! Advisory only: a failed check is reported, never acted on. The first
//! violation found for a task is the one reported.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schedule::Schedule;
use crate::task::{Minute, Task, TaskId, TaskStatus};
use crate::TaskMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    NotCompleted {
        dependency: TaskId,
        description: String,
    },
    /// The dependency is completed but has no interval in the schedule.
    NotInSchedule {
        dependency: TaskId,
        description: String,
    },
    EndsAfterStart {
        dependency: TaskId,
        description: String,
        dependency_end: Minute,
        task_start: Minute,
    },
    /// The dependency is not part of this run.
    UnknownDependency { dependency: TaskId },
    /// Dependencies are fine but the task itself never got a start.
    TaskUnscheduled,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::NotCompleted {
                dependency,
                description,
            } => write!(f, "Dependency '{description}' (ID: {dependency}) not completed"),
            Violation::NotInSchedule {
                dependency,
                description,
            }
            | Violation::EndsAfterStart {
                dependency,
                description,
                ..
            } => write!(
                f,
                "Dependency '{description}' (ID: {dependency}) ends after task's start time"
            ),
            Violation::UnknownDependency { dependency } => {
                write!(f, "Dependency (ID: {dependency}) is not a known task")
            }
            Violation::TaskUnscheduled => write!(f, "Task was never scheduled"),
        }
    }
}

/// Pass/fail of one task's dependency check plus the first violation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyCheck {
    pub violation: Option<Violation>,
}

impl DependencyCheck {
    pub fn passed(&self) -> bool {
        self.violation.is_none()
    }

    /// Human-readable reason; empty when the check passed.
    pub fn reason(&self) -> String {
        self.violation
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    fn fail(violation: Violation) -> Self {
        Self {
            violation: Some(violation),
        }
    }
}

/// Check that every dependency of `task` completed and ended by its start.
pub fn check_dependencies(task: &Task, tasks: &TaskMap, schedule: &Schedule) -> DependencyCheck {
    for dep_id in &task.dependencies {
        let Some(dep) = tasks.get(dep_id) else {
            return DependencyCheck::fail(Violation::UnknownDependency {
                dependency: dep_id.clone(),
            });
        };

        if dep.status != TaskStatus::Completed {
            return DependencyCheck::fail(Violation::NotCompleted {
                dependency: dep.id.clone(),
                description: dep.description.clone(),
            });
        }

        let Some(dependency_end) = schedule.end_of(dep_id) else {
            return DependencyCheck::fail(Violation::NotInSchedule {
                dependency: dep.id.clone(),
                description: dep.description.clone(),
            });
        };

        let Some(task_start) = task.scheduled_start_time else {
            return DependencyCheck::fail(Violation::TaskUnscheduled);
        };

        if dependency_end > task_start {
            return DependencyCheck::fail(Violation::EndsAfterStart {
                dependency: dep.id.clone(),
                description: dep.description.clone(),
                dependency_end,
                task_start,
            });
        }
    }

    DependencyCheck::default()
}
