use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$AGENDA_HOME`, else `~/.agenda`.
pub fn agenda_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("AGENDA_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".agenda"))
}

pub fn ensure_agenda_home() -> Result<PathBuf> {
    let dir = agenda_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
