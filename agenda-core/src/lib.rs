//! agenda-core: single-pass daily agenda scheduling.
//!
//! Fixed tasks are pinned to their declared start (or cancelled when they
//! precede the allowed starting time), flexible tasks are ordered by utility
//! and packed greedily around them, and dependency timing is checked after
//! the fact.

use std::collections::BTreeMap;

pub mod dependency;
pub mod driver;
pub mod error;
pub mod fixed;
pub mod flexible;
pub mod queue;
pub mod report;
pub mod schedule;
pub mod task;
pub mod time;
pub mod utility;
pub mod validate;

/// Tasks of one run, keyed (and iterated) by id.
pub type TaskMap = BTreeMap<task::TaskId, task::Task>;

pub use dependency::{check_dependencies, DependencyCheck, Violation};
pub use driver::{ScheduleRun, SchedulerConfig, TaskScheduler};
pub use error::SchedulerError;
pub use flexible::FlexibleCursor;
pub use queue::PriorityQueue;
pub use report::{Notice, NoticeKind, NoticeLevel, Outcome, ScheduleReport, TaskOutcome, Totals};
pub use schedule::{Interval, Schedule};
pub use task::{Minute, Task, TaskId, TaskStatus};
pub use time::{format_clock, format_span, parse_clock};
pub use validate::find_problems;
