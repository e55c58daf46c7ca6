//! Task files: `.toml` (`[[task]]` tables) or `.json` (`{"tasks": [...]}`).

use agenda_core::{parse_clock, Minute, Task};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct TaskFile {
    #[serde(alias = "task", default)]
    tasks: Vec<TaskRecord>,
}

/// Ids may be written as numbers or strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IdValue {
    Number(i64),
    Text(String),
}

impl IdValue {
    fn into_id(self) -> String {
        match self {
            IdValue::Number(n) => n.to_string(),
            IdValue::Text(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClockValue {
    Minutes(Minute),
    Clock(String),
}

#[derive(Debug, Deserialize)]
struct TaskRecord {
    id: IdValue,
    #[serde(default)]
    description: String,
    #[serde(default)]
    dependencies: Vec<IdValue>,
    #[serde(default)]
    start_time: Option<ClockValue>,
    duration: Minute,
    #[serde(default)]
    academic_career_importance: u32,
    #[serde(default)]
    personal_interest: u32,
    #[serde(default)]
    priority: i32,
}

impl TaskRecord {
    fn into_task(self) -> Result<Task> {
        let id = self.id.into_id();
        let mut task = Task::new(id.clone(), self.description)
            .with_duration(self.duration)
            .with_importance(self.academic_career_importance, self.personal_interest)
            .with_priority(self.priority)
            .with_dependencies(self.dependencies.into_iter().map(IdValue::into_id));

        if let Some(start) = self.start_time {
            let minute = match start {
                ClockValue::Minutes(m) => m,
                ClockValue::Clock(s) => {
                    parse_clock(&s).with_context(|| format!("task {id}: start_time"))?
                }
            };
            task = task.with_start_time(minute);
        }
        Ok(task)
    }
}

pub fn load_tasks(path: &Path) -> Result<Vec<Task>> {
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let tasks = match ext.as_str() {
        "json" => parse_json(&s),
        "toml" => parse_toml(&s),
        other => bail!(
            "unsupported task file extension {:?} for {} (use .json or .toml)",
            other,
            path.display()
        ),
    };
    tasks.with_context(|| format!("parsing {}", path.display()))
}

pub fn parse_json(s: &str) -> Result<Vec<Task>> {
    let file: TaskFile = serde_json::from_str(s)?;
    file.tasks.into_iter().map(TaskRecord::into_task).collect()
}

pub fn parse_toml(s: &str) -> Result<Vec<Task>> {
    let file: TaskFile = toml::from_str(s)?;
    file.tasks.into_iter().map(TaskRecord::into_task).collect()
}
