//! Todo list persistence over a preference slot.
//!
//! # Responsibility
//! - Store and retrieve the entire ordered list as one blob under one fixed
//!   key in the `prefs` table.
//! - Degrade every storage failure to a safe default instead of surfacing it.
//!
//! # Invariants
//! - Decode is all-or-nothing: a blob yields either the full list or an
//!   empty one, never a partial list.
//! - A failed encode or write leaves the previously stored blob untouched.

use crate::db::migrations::latest_version;
use crate::model::todo::Todo;
use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed preference key holding the encoded todo list.
pub const TODOS_KEY: &str = "todos";

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors raised while attaching a repository to a connection.
///
/// Save and load never fail outward; only construction does.
#[derive(Debug)]
pub enum RepoError {
    Db(rusqlite::Error),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection has schema version {actual_version}, expected {expected_version}; migrations not applied"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::UninitializedConnection { .. } | Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(value)
    }
}

/// Persistence contract for the canonical todo list.
///
/// Both operations are infallible by signature: the list is low-stakes
/// personal data and availability wins over strict error visibility, so
/// failures degrade internally to a no-op (save) or an empty list (load).
pub trait TodoRepository {
    /// Serializes the whole list and replaces the stored blob.
    fn save(&self, todos: &[Todo]);
    /// Reads the stored list; missing or undecodable data yields an empty
    /// list.
    fn load(&self) -> Vec<Todo>;
}

/// Preference-slot repository backed by the SQLite `prefs` table.
pub struct PrefsTodoRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> PrefsTodoRepository<'conn> {
    /// Attaches to a bootstrapped connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` when the `prefs` table is absent.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version == 0 {
            return Err(RepoError::UninitializedConnection {
                expected_version: latest_version(),
                actual_version,
            });
        }

        let table_exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = 'prefs'
            );",
            [],
            |row| row.get(0),
        )?;
        if table_exists == 0 {
            return Err(RepoError::MissingRequiredTable("prefs"));
        }

        Ok(Self { conn })
    }
}

impl TodoRepository for PrefsTodoRepository<'_> {
    fn save(&self, todos: &[Todo]) {
        let encoded = match serde_json::to_vec(todos) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!(
                    "event=prefs_save module=repo status=error key={TODOS_KEY} error_code=encode_failed error={err}"
                );
                return;
            }
        };

        let written = self.conn.execute(
            "INSERT INTO prefs (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![TODOS_KEY, encoded],
        );
        match written {
            Ok(_) => debug!(
                "event=prefs_save module=repo status=ok key={TODOS_KEY} items={}",
                todos.len()
            ),
            Err(err) => warn!(
                "event=prefs_save module=repo status=error key={TODOS_KEY} error_code=write_failed error={err}"
            ),
        }
    }

    fn load(&self) -> Vec<Todo> {
        let blob = self
            .conn
            .query_row(
                "SELECT value FROM prefs WHERE key = ?1;",
                [TODOS_KEY],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional();

        let blob = match blob {
            Ok(Some(blob)) => blob,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(
                    "event=prefs_load module=repo status=error key={TODOS_KEY} error_code=read_failed error={err}"
                );
                return Vec::new();
            }
        };

        match serde_json::from_slice::<Vec<Todo>>(&blob) {
            Ok(todos) => {
                debug!(
                    "event=prefs_load module=repo status=ok key={TODOS_KEY} items={}",
                    todos.len()
                );
                todos
            }
            Err(err) => {
                warn!(
                    "event=prefs_load module=repo status=error key={TODOS_KEY} error_code=decode_failed error={err}"
                );
                Vec::new()
            }
        }
    }
}
