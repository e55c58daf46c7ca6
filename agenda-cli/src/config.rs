use agenda_core::{parse_clock, FlexibleCursor, Minute};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{agenda_home, ensure_agenda_home};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub schedule: ScheduleSection,
    pub output: OutputSection,
    pub log: LogSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleSection {
    /// `HH:MM` or a bare minute count.
    pub starting_time: String,
    pub cursor: FlexibleCursor,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// Filter directive handed to tracing-subscriber (e.g. "warn", "agenda_core=debug").
    pub level: String,
}

impl Default for ScheduleSection {
    fn default() -> Self {
        Self {
            starting_time: "08:00".to_string(),
            cursor: FlexibleCursor::Reset,
        }
    }
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl ScheduleSection {
    pub fn starting_minute(&self) -> Result<Minute> {
        parse_clock(&self.starting_time)
            .with_context(|| format!("config schedule.starting_time = {:?}", self.starting_time))
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(agenda_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}

fn write_config(p: &Path, cfg: &Config) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

/// Write the default config. An existing file is kept unless `force`.
pub fn init_config(force: bool) -> Result<()> {
    let p = ensure_agenda_home()?.join("config.toml");
    if write_default(&p, force)? {
        println!("Wrote {}", p.display());
    } else {
        println!("Config already exists: {}", p.display());
    }
    Ok(())
}

fn write_default(p: &Path, force: bool) -> Result<bool> {
    if p.exists() && !force {
        return Ok(false);
    }
    write_config(p, &Config::default())?;
    Ok(true)
}
