//! Canonical list ownership.
//!
//! # Responsibility
//! - Hold the single in-memory ordered todo list for the process lifetime.
//! - Mediate every add/update/remove/reorder operation.
//!
//! # Invariants
//! - No collaborator mutates the list directly; all mutation goes through
//!   `TodoStore`, which persists the full list after each change.

pub mod todo_store;
