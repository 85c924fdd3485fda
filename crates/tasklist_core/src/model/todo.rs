//! Todo domain model.
//!
//! # Responsibility
//! - Define the canonical record behind every list row and detail screen.
//! - Provide the draft constructor used by the add/edit flows.
//!
//! # Invariants
//! - `id` is stable and never reused for another todo.
//! - An item enters the canonical list only with a non-empty `title`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a todo item.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TodoId = Uuid;

/// Lifecycle state of one todo item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoStatus {
    /// Not done yet. Every new draft starts here.
    #[default]
    Pending,
    /// Marked done by the user.
    Completed,
}

impl TodoStatus {
    /// Badge label shown next to a list row or detail screen.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
        }
    }
}

/// One task record: the unit of the canonical ordered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Stable global ID; the sole identity key for equality and lookup.
    pub id: TodoId,
    /// Free text. May be empty only while the item is a draft.
    pub title: String,
    /// Free text, unconstrained.
    pub description: String,
    /// Due/scheduled moment as Unix epoch milliseconds.
    pub due_at: i64,
    /// Pending/completed flag. Carries no ordering relation to `due_at`.
    pub status: TodoStatus,
}

impl Todo {
    /// Creates a draft with a fresh stable ID and default field values.
    ///
    /// The draft is not part of any list until a store commits it.
    pub fn draft(due_at: i64) -> Self {
        Self::with_id(Uuid::new_v4(), "", due_at)
    }

    /// Creates a todo with a caller-provided stable ID.
    ///
    /// Used by tests and callers that already own an identity.
    pub fn with_id(id: TodoId, title: impl Into<String>, due_at: i64) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            due_at,
            status: TodoStatus::Pending,
        }
    }

    /// Whether this item may be committed into the canonical list.
    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }
}

/// Editor focus of the interactive surface.
///
/// A tagged variant instead of a nullable reference, so "not editing" is a
/// distinct, exhaustively handled state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditTarget {
    /// No item selected.
    #[default]
    None,
    /// Editing the list entry with this ID.
    Editing(TodoId),
}
