//! `sticky` command-line view layer.
//!
//! # Responsibility
//! - Resolve storage/logging settings from flags and environment.
//! - Drive `sticky_core::TaskStore` and print every render signal.

mod shell;
mod view;

use clap::{Parser, Subcommand};
use log::info;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use sticky_core::db::open_db;
use sticky_core::{
    default_log_level, init_logging, Filter, KeyValueStore, SqliteKvStore, StoreConfig,
    TaskRepository, TaskStore, Transition, DEFAULT_TASKS_KEY,
};
use view::FrameQueue;

const DEFAULT_DB_FILE_NAME: &str = "sticky_todos.sqlite3";

#[derive(Debug, Parser)]
#[command(name = "sticky", version, about = "Sticky task list")]
struct Cli {
    /// SQLite file holding the task list.
    #[arg(long, env = "STICKY_DB_PATH")]
    db: Option<PathBuf>,

    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long, env = "STICKY_LOG_DIR")]
    log_dir: Option<String>,

    #[arg(long, env = "STICKY_LOG_LEVEL")]
    log_level: Option<String>,

    /// Storage key of the task collection.
    #[arg(long, env = "STICKY_TASKS_KEY", default_value = DEFAULT_TASKS_KEY)]
    key: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add a task at the top of the list.
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Print tasks matching a filter.
    List {
        #[arg(long, short, default_value = "all")]
        filter: Filter,
    },
    /// Flip a task between active and completed.
    Toggle { id: String },
    /// Delete a task.
    Delete { id: String },
    /// Remove every completed task.
    ClearCompleted,
    /// Interactive session reading commands from stdin.
    Shell,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("sticky: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        init_logging(resolve_log_level(cli.log_level.as_deref()), log_dir)?;
    }

    let db_path = cli.db.clone().unwrap_or_else(default_db_path);
    let conn = open_db(&db_path)
        .map_err(|err| format!("failed to open `{}`: {err}", db_path.display()))?;
    let repo = TaskRepository::with_config(
        SqliteKvStore::new(&conn),
        StoreConfig::with_tasks_key(&cli.key),
    );
    let mut store = TaskStore::open(repo);
    info!(
        "event=cli_start module=cli status=ok db={} command={:?}",
        db_path.display(),
        cli.command
    );

    match cli.command {
        Command::Shell => {
            let stdin = io::stdin();
            shell::run_shell(&mut store, stdin.lock(), io::stdout())
                .map_err(|err| format!("shell failed: {err}"))
        }
        command => run_once(&mut store, command),
    }
}

fn run_once<S: KeyValueStore>(store: &mut TaskStore<S>, command: Command) -> Result<(), String> {
    let frames = FrameQueue::default();
    store.subscribe(frames.observer());

    let transition = match command {
        Command::Add { text } => store.add(&text.join(" ")).map_err(|err| err.to_string())?,
        Command::List { filter } => store.set_filter(filter),
        Command::Toggle { id } => store.toggle(&id.into()).map_err(|err| err.to_string())?,
        Command::Delete { id } => store.delete(&id.into()).map_err(|err| err.to_string())?,
        Command::ClearCompleted => store.clear_completed().map_err(|err| err.to_string())?,
        Command::Shell => Transition::Unchanged,
    };

    let mut stdout = io::stdout().lock();
    if transition == Transition::Unchanged {
        writeln!(stdout, "nothing changed").map_err(|err| err.to_string())?;
    }
    for frame in frames.drain() {
        write!(stdout, "{frame}").map_err(|err| err.to_string())?;
    }
    Ok(())
}

fn resolve_log_level(requested: Option<&str>) -> &str {
    requested
        .map(str::trim)
        .filter(|level| !level.is_empty())
        .unwrap_or(default_log_level())
}

fn default_db_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::{resolve_log_level, Cli};
    use clap::Parser;
    use sticky_core::default_log_level;

    #[test]
    fn log_level_falls_back_to_build_default() {
        let cli = Cli::parse_from(["sticky", "--log-level", " warn ", "list"]);
        assert_eq!(resolve_log_level(cli.log_level.as_deref()), "warn");

        assert_eq!(resolve_log_level(Some("  ")), default_log_level());
        assert_eq!(resolve_log_level(None), default_log_level());
    }
}
