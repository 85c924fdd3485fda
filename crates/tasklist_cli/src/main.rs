//! Command-line surface for the task list.
//!
//! # Responsibility
//! - Render the list, detail, add and edit screens as subcommands.
//! - Forward every mutation into the core store; no todo logic lives here.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::error::Error;
use std::path::PathBuf;
use tasklist_core::db::open_db;
use tasklist_core::{
    default_log_level, init_logging, EditTarget, PrefsTodoRepository, Todo, TodoRepository,
    TodoStatus, TodoStore,
};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Parser)]
#[command(name = "tasklist", version, about = "Single-device todo list")]
struct Cli {
    /// Preferences database file.
    #[arg(long, global = true, default_value = "tasklist.db")]
    db: PathBuf,

    /// Directory for rolling log files; file logging is off when omitted.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Log level used with --log-dir.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print all items in display order.
    List,
    /// Show one item in detail.
    Show { position: usize },
    /// Add a new item to the end of the list.
    Add {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Due date/time, e.g. "2026-08-07 18:30"; defaults to now.
        #[arg(long)]
        due: Option<String>,
        #[arg(long, value_enum, default_value = "pending")]
        status: StatusArg,
    },
    /// Edit fields of an existing item.
    Edit {
        position: usize,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        due: Option<String>,
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },
    /// Remove the items at the given positions.
    Rm {
        #[arg(required = true)]
        positions: Vec<usize>,
    },
    /// Move the item at `from` so it ends up at position `to`.
    Mv { from: usize, to: usize },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StatusArg {
    Pending,
    Completed,
}

impl From<StatusArg> for TodoStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Pending => Self::Pending,
            StatusArg::Completed => Self::Completed,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let log_dir = if log_dir.is_absolute() {
            log_dir.clone()
        } else {
            std::env::current_dir()?.join(log_dir)
        };
        let level = cli.log_level.as_deref().unwrap_or_else(|| default_log_level());
        if let Err(err) = init_logging(level, &log_dir.to_string_lossy()) {
            eprintln!("logging disabled: {err}");
        }
    }

    let conn = open_db(&cli.db)?;
    let mut store = TodoStore::initialize(PrefsTodoRepository::try_new(&conn)?);

    run_command(&mut store, cli.command)
}

fn run_command<R: TodoRepository>(
    store: &mut TodoStore<R>,
    command: Command,
) -> Result<(), Box<dyn Error>> {
    match command {
        Command::List => {
            if store.is_empty() {
                println!("no todos");
                return Ok(());
            }
            for (position, todo) in store.todos().iter().enumerate() {
                println!(
                    "{position:>3}  {:<32} {}  [{}]",
                    todo.title,
                    format_due(todo.due_at),
                    todo.status.label()
                );
            }
            Ok(())
        }
        Command::Show { position } => match resolve(store, position) {
            EditTarget::Editing(id) => {
                let todo = store.get(id).ok_or("item vanished while rendering")?;
                println!("{}", todo.title);
                if !todo.description.is_empty() {
                    println!("{}", todo.description);
                }
                println!("{}", format_due(todo.due_at));
                println!("Status: {}", todo.status.label());
                Ok(())
            }
            EditTarget::None => Err(format!("no item at position {position}").into()),
        },
        Command::Add {
            title,
            description,
            due,
            status,
        } => {
            let due_at = match due {
                Some(due) => parse_due(&due)?,
                None => Utc::now().timestamp_millis(),
            };
            let mut draft = Todo::draft(due_at);
            draft.title = title;
            draft.description = description;
            draft.status = status.into();

            if store.add(draft) {
                println!("added at position {}", store.len() - 1);
            }
            Ok(())
        }
        Command::Edit {
            position,
            title,
            description,
            due,
            status,
        } => match resolve(store, position) {
            EditTarget::Editing(id) => {
                let entry = store.get(id).ok_or("item vanished while editing")?;
                let mut draft = entry.clone();
                if let Some(title) = title {
                    if title.is_empty() {
                        return Err("title cannot be empty".into());
                    }
                    draft.title = title;
                }
                if let Some(description) = description {
                    draft.description = description;
                }
                if let Some(due) = due {
                    draft.due_at = parse_due(&due)?;
                }
                if let Some(status) = status {
                    draft.status = status.into();
                }

                store.update(draft);
                println!("updated position {position}");
                Ok(())
            }
            EditTarget::None => Err(format!("no item at position {position}").into()),
        },
        Command::Rm { positions } => {
            let before = store.len();
            store.remove(&positions);
            println!("removed {} item(s)", before - store.len());
            Ok(())
        }
        Command::Mv { from, to } => {
            if from >= store.len() {
                return Err(format!("no item at position {from}").into());
            }
            store.move_items(&[from], to);
            println!("moved {from} -> {}", to.min(store.len() - 1));
            Ok(())
        }
    }
}

/// Maps a display position onto the editor focus state.
fn resolve<R: TodoRepository>(store: &TodoStore<R>, position: usize) -> EditTarget {
    store
        .todos()
        .get(position)
        .map_or(EditTarget::None, |todo| EditTarget::Editing(todo.id))
}

/// Parses local wall-clock input into epoch milliseconds.
fn parse_due(value: &str) -> Result<i64, String> {
    let naive = NaiveDateTime::parse_from_str(value, DATE_FORMAT)
        .map_err(|err| format!("invalid date `{value}` (expected {DATE_FORMAT}): {err}"))?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|moment| moment.timestamp_millis())
        .ok_or_else(|| format!("`{value}` is not a valid local time"))
}

fn format_due(due_at: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(due_at)
        .map(|moment| moment.with_timezone(&Local).format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| format!("@{due_at}"))
}
