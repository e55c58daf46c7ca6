//! Utility scoring for flexible-task ordering.
//!
//! ```text
//! utility = 3 * academic_career_importance
//!         + 1 * personal_interest
//!         + 1000 * priority of the first fixed task found depending on it
//!         + 50 * number of flexible tasks depending on it
//! ```
//!
//! Runs after fixed placement (it reads the rank the fixed placer assigns)
//! and before flexible placement.

use std::collections::HashMap;

use tracing::debug;

use crate::task::{Task, TaskId};
use crate::TaskMap;

pub const ACADEMIC_CAREER_WEIGHT: i64 = 3;
pub const PERSONAL_INTEREST_WEIGHT: i64 = 1;
pub const FIXED_DEPENDENT_WEIGHT: i64 = 1000;
pub const FLEXIBLE_DEPENDENT_WEIGHT: i64 = 50;

/// Compute and store `utility_score` on every task.
pub fn compute_utility_scores(tasks: &mut TaskMap) {
    // First fixed task seen wins; this is a tie-break, not a sum.
    let mut inherited: HashMap<TaskId, i32> = HashMap::new();
    for task in tasks.values().filter(|t| t.is_fixed()) {
        for dep in &task.dependencies {
            inherited
                .entry(dep.clone())
                .or_insert_with(|| task.inherited_priority());
        }
    }

    let mut flexible_dependents: HashMap<TaskId, i64> = HashMap::new();
    for task in tasks.values().filter(|t| t.is_flexible()) {
        for dep in &task.dependencies {
            *flexible_dependents.entry(dep.clone()).or_default() += 1;
        }
    }

    for task in tasks.values_mut() {
        let fixed_bonus = inherited.get(&task.id).copied().unwrap_or(0);
        let dependents = flexible_dependents.get(&task.id).copied().unwrap_or(0);
        task.utility_score = utility_of(task, fixed_bonus, dependents);
        debug!(
            task_id = %task.id,
            utility = task.utility_score,
            fixed_bonus,
            dependents,
            "utility computed"
        );
    }
}

fn utility_of(task: &Task, fixed_bonus: i32, flexible_dependents: i64) -> i64 {
    ACADEMIC_CAREER_WEIGHT * i64::from(task.academic_career_importance)
        + PERSONAL_INTEREST_WEIGHT * i64::from(task.personal_interest)
        + FIXED_DEPENDENT_WEIGHT * i64::from(fixed_bonus)
        + FLEXIBLE_DEPENDENT_WEIGHT * flexible_dependents
}
