//! Discrete editor commands.
//!
//! Keyboard shortcuts and toolbar buttons both resolve to a [`Command`],
//! which [`crate::Session::dispatch`] applies.

use crate::tools::ToolKind;

/// Which slot a sequence switch heads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceTarget {
    /// Offset from the active slot.
    Relative(i32),
    Absolute(usize),
}

impl SequenceTarget {
    /// Resolve against the active slot. `None` when the result falls
    /// outside `0..count`.
    pub fn resolve(self, active: usize, count: usize) -> Option<usize> {
        let index = match self {
            SequenceTarget::Absolute(index) => index,
            SequenceTarget::Relative(offset) => {
                let index = i64::try_from(active).ok()? + i64::from(offset);
                usize::try_from(index).ok()?
            }
        };
        (index < count).then_some(index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Undo,
    Redo,
    DeleteSelected,
    /// Select a tool, or drop back to no tool if it is already active.
    ToggleTool(ToolKind),
    SwitchSequence(SequenceTarget),
    Play,
    Stop,
    /// Play when stopped, stop when playing.
    TogglePlayback,
    /// Clear the selection and the active tool.
    Escape,
    ClearSequence(usize),
    ClearAll,
}

impl Command {
    /// Commands that change elements, selection or tool. These are ignored
    /// while a transition runs.
    pub fn is_edit(self) -> bool {
        !matches!(
            self,
            Command::SwitchSequence(_) | Command::Play | Command::Stop | Command::TogglePlayback
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative() {
        assert_eq!(SequenceTarget::Relative(1).resolve(3, 10), Some(4));
        assert_eq!(SequenceTarget::Relative(-1).resolve(3, 10), Some(2));
        assert_eq!(SequenceTarget::Relative(-1).resolve(0, 10), None);
        assert_eq!(SequenceTarget::Relative(1).resolve(9, 10), None);
    }

    #[test]
    fn test_resolve_absolute() {
        assert_eq!(SequenceTarget::Absolute(7).resolve(0, 10), Some(7));
        assert_eq!(SequenceTarget::Absolute(10).resolve(0, 10), None);
    }

    #[test]
    fn test_playback_commands_are_not_edits() {
        assert!(!Command::Play.is_edit());
        assert!(!Command::Stop.is_edit());
        assert!(!Command::SwitchSequence(SequenceTarget::Relative(1)).is_edit());
        assert!(Command::Undo.is_edit());
        assert!(Command::Escape.is_edit());
        assert!(Command::ClearAll.is_edit());
    }
}
