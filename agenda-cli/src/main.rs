use agenda_core::{find_problems, FlexibleCursor, Minute, SchedulerConfig, TaskScheduler};
use anyhow::{bail, Context, Result};
use chrono::{Local, Timelike};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::{debug, info};

mod config;
mod input;
mod logging;
mod render;
mod state;

use config::{Config, OutputFormat};

#[derive(Parser, Debug)]
#[command(
    name = "agenda",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("AGENDA_BUILD_SHA"), ")"),
    about = "Plan a day: pin fixed tasks, pack flexible ones by utility"
)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Schedule a task file and print the plan
    Plan {
        /// Task file (.json or .toml)
        #[arg(long)]
        tasks: PathBuf,

        /// Allowed starting time: HH:MM, minutes, or "now"
        #[arg(long)]
        start: Option<String>,

        /// Where flexible tasks start searching for a slot
        #[arg(long, value_enum)]
        cursor: Option<CursorArg>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a task file without scheduling it
    Check {
        #[arg(long)]
        tasks: PathBuf,
    },

    /// Manage ~/.agenda/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
    /// Print the effective config
    Show,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CursorArg {
    Reset,
    Carry,
}

impl From<CursorArg> for FlexibleCursor {
    fn from(c: CursorArg) -> Self {
        match c {
            CursorArg::Reset => FlexibleCursor::Reset,
            CursorArg::Carry => FlexibleCursor::Carry,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    // Only `plan` requires a readable config.
    let cfg = config::load_config();
    let level = match &cfg {
        Ok(c) => c.log.level.clone(),
        Err(_) => config::LogSection::default().level,
    };
    logging::init(&level, cli.verbose);

    match cli.command {
        Command::Plan {
            tasks,
            start,
            cursor,
            json,
        } => plan(&cfg?, tasks, start, cursor, json, cli.verbose > 0)?,

        Command::Check { tasks } => check(tasks)?,

        Command::Config { command } => match command {
            ConfigCommand::Init { force } => config::init_config(force)?,
            ConfigCommand::Show => {
                let path = config::config_path()?;
                let cfg = cfg.with_context(|| {
                    format!("run `agenda config init --force` to replace {}", path.display())
                })?;
                let s = toml::to_string_pretty(&cfg).context("serialize config")?;
                println!("# {}\n{}", path.display(), s);
            }
        },
    }

    Ok(())
}

fn plan(
    cfg: &Config,
    tasks_path: PathBuf,
    start: Option<String>,
    cursor: Option<CursorArg>,
    json: bool,
    verbose: bool,
) -> Result<()> {
    let tasks = input::load_tasks(&tasks_path)?;
    info!(path = %tasks_path.display(), tasks = tasks.len(), "task file loaded");

    let starting_time = match start.as_deref() {
        Some("now") => {
            let now = Local::now();
            next_quarter_hour(now.hour(), now.minute())
        }
        Some(s) => agenda_core::parse_clock(s).context("--start")?,
        None => cfg.schedule.starting_minute()?,
    };
    let cursor = cursor.map(FlexibleCursor::from).unwrap_or(cfg.schedule.cursor);
    let sched_cfg = SchedulerConfig::starting_at(starting_time).with_cursor(cursor);
    debug!(?sched_cfg, "scheduler config resolved");

    let report = TaskScheduler::new(tasks, sched_cfg)
        .with_context(|| format!("invalid task file {}", tasks_path.display()))?
        .run()
        .report();

    if json || cfg.output.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for line in render::render_text(&report, verbose) {
            println!("{line}");
        }
    }

    Ok(())
}

fn check(tasks_path: PathBuf) -> Result<()> {
    let tasks = input::load_tasks(&tasks_path)?;
    let problems = find_problems(&tasks);

    if problems.is_empty() {
        let fixed = tasks.iter().filter(|t| t.is_fixed()).count();
        println!(
            "{}: {} tasks OK ({} fixed, {} flexible)",
            tasks_path.display(),
            tasks.len(),
            fixed,
            tasks.len() - fixed
        );
        return Ok(());
    }

    for p in &problems {
        println!("- {p}");
    }
    bail!(
        "{} problem(s) found in {}",
        problems.len(),
        tasks_path.display()
    );
}

/// Round a wall-clock time up to the next 15-minute boundary, in minutes.
fn next_quarter_hour(hour: u32, minute: u32) -> Minute {
    let m = (hour * 60 + minute) as Minute;
    match m % 15 {
        0 => m,
        r => m + 15 - r,
    }
}
