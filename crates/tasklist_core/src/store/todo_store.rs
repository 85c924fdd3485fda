//! In-memory todo store.
//!
//! # Responsibility
//! - Own the canonical ordered list and its mutation entry points.
//! - Serialize the full list through the repository after every mutation.
//!
//! # Invariants
//! - Every committed item has a non-empty title.
//! - `id` values are unique within the list at all times.
//! - List order is the user-visible order and survives save/load unchanged.

use crate::model::todo::{Todo, TodoId};
use crate::repo::todo_repo::TodoRepository;
use log::debug;

/// Owner of the canonical ordered todo list.
///
/// Generic over the repository so tests and alternative storage backends can
/// supply their own persistence.
pub struct TodoStore<R: TodoRepository> {
    repo: R,
    todos: Vec<Todo>,
}

impl<R: TodoRepository> TodoStore<R> {
    /// Loads the list from the repository.
    ///
    /// Missing or undecodable stored data yields an empty list; a fresh
    /// install and a corrupt blob are both recoverable conditions, not
    /// errors.
    pub fn initialize(repo: R) -> Self {
        let todos = repo.load();
        debug!(
            "event=store_init module=store status=ok items={}",
            todos.len()
        );
        Self { repo, todos }
    }

    /// Read snapshot of the list in display order.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Looks up an item by its stable ID.
    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    /// Appends a committed draft to the end of the list.
    ///
    /// Drafts with an empty title are silently dropped, as is an item whose
    /// ID is already present. Returns whether the item was committed;
    /// persists only on success.
    pub fn add(&mut self, todo: Todo) -> bool {
        if !todo.has_title() || self.get(todo.id).is_some() {
            debug!(
                "event=store_add module=store status=rejected id={}",
                todo.id
            );
            return false;
        }

        self.todos.push(todo);
        self.repo.save(&self.todos);
        true
    }

    /// Replaces the entry with the same ID in place, preserving its position.
    ///
    /// A missing ID is a no-op, not an error: it covers a save racing a
    /// concurrent delete of the same item. Returns whether an entry was
    /// replaced.
    pub fn update(&mut self, todo: Todo) -> bool {
        let committed = match self.todos.iter_mut().find(|entry| entry.id == todo.id) {
            Some(entry) => {
                *entry = todo;
                true
            }
            None => {
                debug!(
                    "event=store_update module=store status=skipped id={}",
                    todo.id
                );
                false
            }
        };

        self.repo.save(&self.todos);
        committed
    }

    /// Deletes the items at the given zero-based positions.
    ///
    /// Positions are resolved against the list state at call time; duplicate
    /// and out-of-range positions are ignored.
    pub fn remove(&mut self, positions: &[usize]) {
        for position in normalized_desc(positions, self.todos.len()) {
            self.todos.remove(position);
        }
        self.repo.save(&self.todos);
    }

    /// Relocates the items at `from`, preserving their relative order, so the
    /// block begins at position `to` of the resulting list.
    ///
    /// `to` is clamped to the length of the list that remains after the
    /// selected items are taken out.
    pub fn move_items(&mut self, from: &[usize], to: usize) {
        let mut block: Vec<Todo> = normalized_desc(from, self.todos.len())
            .into_iter()
            .map(|position| self.todos.remove(position))
            .collect();
        // Removal ran back-to-front; restore display order.
        block.reverse();

        let at = to.min(self.todos.len());
        self.todos.splice(at..at, block);
        self.repo.save(&self.todos);
    }
}

/// In-range positions, deduplicated, sorted back-to-front so that removal by
/// index does not shift the positions still to be removed.
fn normalized_desc(positions: &[usize], len: usize) -> Vec<usize> {
    let mut sorted: Vec<usize> = positions.iter().copied().filter(|&p| p < len).collect();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted.dedup();
    sorted
}
