//! Keyboard shortcut table.
//!
//! | Keys                      | Command                  |
//! |---------------------------|--------------------------|
//! | Ctrl+Z                    | Undo                     |
//! | Ctrl+Y, Ctrl+Shift+Z      | Redo                     |
//! | P E T I R C L K           | Toggle pen, erase, text, image, rectangle, circle, line, icons |
//! | Escape                    | Clear selection and tool |
//! | Delete, Backspace         | Delete selected element  |
//! | ArrowLeft, ArrowRight     | Previous / next sequence |
//! | Space                     | Play / stop              |
//!
//! Ctrl stands for the platform command key; hosts on macOS report Cmd as
//! `ctrl`.

use crate::commands::{Command, SequenceTarget};
use crate::drawing::Modifiers;
use crate::tools::ToolKind;

/// A key press, independent of the windowing toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Character(char),
    Escape,
    Delete,
    Backspace,
    ArrowLeft,
    ArrowRight,
    Space,
}

impl Key {
    /// Parse a DOM `KeyboardEvent.key` value.
    pub fn from_name(name: &str) -> Option<Key> {
        let key = match name {
            "Escape" | "Esc" => Key::Escape,
            "Delete" => Key::Delete,
            "Backspace" => Key::Backspace,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            " " | "Space" | "Spacebar" => Key::Space,
            _ => {
                let mut chars = name.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                Key::Character(c)
            }
        };
        Some(key)
    }
}

fn tool_for(c: char) -> Option<ToolKind> {
    let tool = match c.to_ascii_lowercase() {
        'p' => ToolKind::Pen,
        'e' => ToolKind::Erase,
        't' => ToolKind::Text,
        'i' => ToolKind::Image,
        'r' => ToolKind::Rectangle,
        'c' => ToolKind::Circle,
        'l' => ToolKind::Line,
        'k' => ToolKind::Icons,
        _ => return None,
    };
    Some(tool)
}

/// Command bound to `key` with `modifiers` held, if any.
pub fn command_for_key(key: Key, modifiers: Modifiers) -> Option<Command> {
    match key {
        Key::Character(c) if modifiers.ctrl => match c.to_ascii_lowercase() {
            'z' if modifiers.shift => Some(Command::Redo),
            'z' => Some(Command::Undo),
            'y' => Some(Command::Redo),
            _ => None,
        },
        Key::Character(c) => tool_for(c).map(Command::ToggleTool),
        Key::Escape => Some(Command::Escape),
        Key::Delete | Key::Backspace => Some(Command::DeleteSelected),
        Key::ArrowLeft => Some(Command::SwitchSequence(SequenceTarget::Relative(-1))),
        Key::ArrowRight => Some(Command::SwitchSequence(SequenceTarget::Relative(1))),
        Key::Space => Some(Command::TogglePlayback),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CTRL: Modifiers = Modifiers {
        shift: false,
        alt: false,
        ctrl: true,
    };
    const CTRL_SHIFT: Modifiers = Modifiers {
        shift: true,
        alt: false,
        ctrl: true,
    };

    #[test]
    fn test_undo_redo() {
        assert_eq!(command_for_key(Key::Character('z'), CTRL), Some(Command::Undo));
        assert_eq!(command_for_key(Key::Character('y'), CTRL), Some(Command::Redo));
        // Shift reports the upper-case character
        assert_eq!(command_for_key(Key::Character('Z'), CTRL_SHIFT), Some(Command::Redo));
    }

    #[test]
    fn test_tool_letters() {
        for (c, tool) in [
            ('p', ToolKind::Pen),
            ('E', ToolKind::Erase),
            ('t', ToolKind::Text),
            ('i', ToolKind::Image),
            ('r', ToolKind::Rectangle),
            ('c', ToolKind::Circle),
            ('l', ToolKind::Line),
            ('k', ToolKind::Icons),
        ] {
            assert_eq!(
                command_for_key(Key::Character(c), Modifiers::NONE),
                Some(Command::ToggleTool(tool))
            );
        }
        assert_eq!(command_for_key(Key::Character('x'), Modifiers::NONE), None);
    }

    #[test]
    fn test_ctrl_letters_do_not_switch_tools() {
        assert_eq!(command_for_key(Key::Character('c'), CTRL), None);
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(command_for_key(Key::Escape, Modifiers::NONE), Some(Command::Escape));
        assert_eq!(
            command_for_key(Key::Backspace, Modifiers::NONE),
            Some(Command::DeleteSelected)
        );
        assert_eq!(
            command_for_key(Key::ArrowLeft, Modifiers::NONE),
            Some(Command::SwitchSequence(SequenceTarget::Relative(-1)))
        );
        assert_eq!(command_for_key(Key::Space, Modifiers::NONE), Some(Command::TogglePlayback));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Key::from_name("ArrowRight"), Some(Key::ArrowRight));
        assert_eq!(Key::from_name(" "), Some(Key::Space));
        assert_eq!(Key::from_name("k"), Some(Key::Character('k')));
        assert_eq!(Key::from_name("Shift"), None);
        assert_eq!(Key::from_name(""), None);
    }
}
