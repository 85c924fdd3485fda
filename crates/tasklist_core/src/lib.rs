//! Core domain logic for the task list application.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::todo::{EditTarget, Todo, TodoId, TodoStatus};
pub use repo::todo_repo::{
    PrefsTodoRepository, RepoError, RepoResult, TodoRepository, TODOS_KEY,
};
pub use store::todo_store::TodoStore;
