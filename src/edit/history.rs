//! Linear undo/redo history.

use serde::{Deserialize, Serialize};

use crate::edit::command::{Command, ExecuteMode};

/// Which directions the history can move in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum UndoRedoState {
    Neither = 0,
    UndoOnly = 1,
    RedoOnly = 2,
    Both = 3,
}

impl UndoRedoState {
    pub fn from_flags(can_undo: bool, can_redo: bool) -> Self {
        match (can_undo, can_redo) {
            (false, false) => UndoRedoState::Neither,
            (true, false) => UndoRedoState::UndoOnly,
            (false, true) => UndoRedoState::RedoOnly,
            (true, true) => UndoRedoState::Both,
        }
    }
}

/// Snapshot of the history for status displays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryState {
    pub total_commands: usize,
    /// Index of the last applied command; `None` when nothing is applied.
    pub pointer: Option<usize>,
    pub can_undo: bool,
    pub can_redo: bool,
}

/// Ordered list of commands plus a cursor.
///
/// Commands before the cursor are applied, commands at or after it are
/// redoable. Executing a new command drops everything redoable.
#[derive(Debug)]
pub struct History<C: Command> {
    commands: Vec<C>,
    /// Number of applied commands
    cursor: usize,
    /// Maximum number of retained commands
    limit: Option<usize>,
}

impl<C: Command> Default for History<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Command> History<C> {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            cursor: 0,
            limit: None,
        }
    }

    /// History that keeps at most `limit` commands, evicting the oldest.
    /// `None` keeps everything.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self { limit, ..Self::new() }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Apply `command` and record it, discarding any redoable commands.
    pub fn execute(&mut self, command: C, target: &mut C::Target) {
        command.execute(target, ExecuteMode::Commit);

        self.commands.truncate(self.cursor);
        self.commands.push(command);
        self.cursor += 1;

        if let Some(limit) = self.limit {
            let excess = self.commands.len().saturating_sub(limit);
            if excess > 0 {
                self.commands.drain(..excess);
                self.cursor -= excess;
            }
        }
    }

    /// Revert the last applied command. Returns false if there is none.
    pub fn undo(&mut self, target: &mut C::Target) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.commands[self.cursor].undo(target);
        true
    }

    /// Re-apply the next redoable command. Returns false at the tip.
    pub fn redo(&mut self, target: &mut C::Target) -> bool {
        let Some(command) = self.commands.get(self.cursor) else {
            return false;
        };
        command.execute(target, ExecuteMode::Replay);
        self.cursor += 1;
        true
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.commands.len()
    }

    /// Forget every command. The target is left as is.
    pub fn reset(&mut self) {
        self.commands.clear();
        self.cursor = 0;
    }

    pub fn pointer(&self) -> Option<usize> {
        self.cursor.checked_sub(1)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[C] {
        &self.commands
    }

    pub fn applied(&self) -> &[C] {
        &self.commands[..self.cursor]
    }

    pub fn redoable(&self) -> &[C] {
        &self.commands[self.cursor..]
    }

    pub fn state(&self) -> HistoryState {
        HistoryState {
            total_commands: self.commands.len(),
            pointer: self.pointer(),
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }

    pub fn undo_redo_state(&self) -> UndoRedoState {
        UndoRedoState::from_flags(self.can_undo(), self.can_redo())
    }
}
