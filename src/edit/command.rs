//! Reversible edit commands.

/// How a command is being run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecuteMode {
    /// First application, straight from an intent.
    Commit,
    /// Re-application from redo.
    Replay,
}

/// An edit that can be applied to and reverted from its target.
///
/// Commands capture everything they need at construction. `undo` must
/// restore the target to exactly the state it had before `execute`, and
/// `execute` after `undo` must reproduce the state after the first
/// `execute`.
pub trait Command {
    type Target;

    fn execute(&self, target: &mut Self::Target, mode: ExecuteMode);

    fn undo(&self, target: &mut Self::Target);
}
