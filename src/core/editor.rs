//! Rename and delete flows for a single node.
//!
//! Both are entered from the context menu. Delete goes through a yes/no
//! confirmation supplied by a [`Confirm`] implementation; rename keeps an
//! editable copy of the label until the first exit event commits it.

use super::error::{Result, TreeError};
use super::session::Session;
use super::tree::{Forest, NodeId};

// ───────────────────────────────────────── confirmation ──────

/// Blocking yes/no prompt.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Text shown when asking to delete a node with this label.
pub fn delete_prompt(label: &str) -> String {
    format!("Are you sure you want to delete \"{label}\"?")
}

// ───────────────────────────────────────── delete ────────────

/// Where a delete request currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteState {
    #[default]
    Idle,
    ConfirmPending(NodeId),
    Removed(NodeId),
}

/// Result of answering a delete confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The node and `count - 1` descendants left the view.
    Removed { count: usize },
    Cancelled,
}

#[derive(Debug, Default)]
pub struct DeleteFlow {
    state: DeleteState,
}

impl DeleteFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DeleteState {
        self.state
    }

    pub fn pending(&self) -> Option<NodeId> {
        match self.state {
            DeleteState::ConfirmPending(id) => Some(id),
            _ => None,
        }
    }

    /// Ask to delete `id`; returns the prompt naming its current label.
    pub fn request(&mut self, forest: &Forest, id: NodeId) -> Result<String> {
        let label = &forest.live(id)?.label;
        self.state = DeleteState::ConfirmPending(id);
        tracing::debug!(id, %label, "delete awaiting confirmation");
        Ok(delete_prompt(label))
    }

    /// Apply the user's answer to the pending request.
    pub fn resolve(
        &mut self,
        forest: &mut Forest,
        session: &mut Session,
        confirmed: bool,
    ) -> Result<DeleteOutcome> {
        let id = self.pending().ok_or(TreeError::NoPendingDelete)?;
        if !confirmed {
            self.state = DeleteState::Idle;
            tracing::debug!(id, "delete cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }

        let count = match forest.detach(id) {
            Ok(count) => count,
            Err(e) => {
                self.state = DeleteState::Idle;
                return Err(e);
            }
        };
        session.forget_detached(forest);
        self.state = DeleteState::Removed(id);
        tracing::debug!(id, count, "deleted subtree");
        Ok(DeleteOutcome::Removed { count })
    }

    /// Request and resolve in one go against a blocking prompt.
    pub fn request_delete(
        &mut self,
        forest: &mut Forest,
        session: &mut Session,
        id: NodeId,
        confirm: &mut impl Confirm,
    ) -> Result<DeleteOutcome> {
        let prompt = self.request(forest, id)?;
        let answer = confirm.confirm(&prompt);
        self.resolve(forest, session, answer)
    }
}

// ───────────────────────────────────────── rename ────────────

/// Result of committing a rename field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    Renamed { from: String, to: String },
    /// Empty or identical input; the label is unchanged.
    Kept,
    /// An earlier exit event already committed this session.
    AlreadyCommitted,
}

/// An in-progress inline rename of one node.
///
/// While it exists the node's label is hidden and `input` is shown in its
/// place with a cursor. `cursor` is a byte offset on a char boundary.
#[derive(Debug, Clone)]
pub struct RenameSession {
    node: NodeId,
    original: String,
    pub input: String,
    pub cursor: usize,
    committed: bool,
}

impl RenameSession {
    /// Start editing `id`, pre-filling the field with its current label.
    pub fn begin(forest: &Forest, id: NodeId) -> Result<Self> {
        let label = forest.live(id)?.label.clone();
        tracing::debug!(id, %label, "rename started");
        Ok(Self {
            node: id,
            cursor: label.len(),
            input: label.clone(),
            original: label,
            committed: false,
        })
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn is_committed(&self) -> bool {
        self.committed
    }

    /// Commit the field. Only the first call has any effect.
    pub fn commit(&mut self, forest: &mut Forest) -> Result<RenameOutcome> {
        if self.committed {
            return Ok(RenameOutcome::AlreadyCommitted);
        }
        self.committed = true;

        let node = forest.live_mut(self.node)?;
        if self.input.is_empty() || self.input == self.original {
            node.label = self.original.clone();
            tracing::debug!(id = self.node, "rename kept original label");
            return Ok(RenameOutcome::Kept);
        }

        node.label = self.input.clone();
        tracing::debug!(id = self.node, from = %self.original, to = %self.input, "renamed");
        Ok(RenameOutcome::Renamed {
            from: self.original.clone(),
            to: self.input.clone(),
        })
    }

    pub fn insert_char(&mut self, c: char) {
        self.input.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Remove the char before the cursor.
    pub fn backspace(&mut self) {
        if let Some(prev) = self.input[..self.cursor].chars().next_back() {
            self.cursor -= prev.len_utf8();
            self.input.remove(self.cursor);
        }
    }

    /// Remove the char under the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.input.len() {
            self.input.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.input[..self.cursor].chars().next_back() {
            self.cursor -= prev.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.input[self.cursor..].chars().next() {
            self.cursor += next.len_utf8();
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.input.len();
    }
}
