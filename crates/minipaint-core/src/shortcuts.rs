//! Keyboard shortcut registry and documentation.

use crate::input::Modifiers;
use serde::{Deserialize, Serialize};

/// Something a shortcut can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Undo,
    Redo,
    Save,
    DeleteSelection,
    Deselect,
    ZoomIn,
    ZoomOut,
    ResetZoom,
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    /// DOM key name, compared case-insensitively.
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub command: Command,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        command: Command,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            command,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+S").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl".to_string());
        }
        if self.shift {
            parts.push("Shift".to_string());
        }
        parts.push(match self.key {
            "Escape" => "Esc".to_string(),
            key if key.chars().count() == 1 => key.to_uppercase(),
            key => key.to_string(),
        });
        parts.join("+")
    }

    fn matches(&self, key: &str, modifiers: Modifiers) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == modifiers.command()
            && self.shift == modifiers.shift
    }
}

const SHORTCUTS: &[Shortcut] = &[
    Shortcut::new("z", true, false, Command::Undo, "Undo last action"),
    Shortcut::new("y", true, false, Command::Redo, "Redo last action"),
    Shortcut::new("z", true, true, Command::Redo, "Redo last action"),
    Shortcut::new("s", true, false, Command::Save, "Save project"),
    Shortcut::new("Delete", false, false, Command::DeleteSelection, "Delete selected object"),
    Shortcut::new("Backspace", false, false, Command::DeleteSelection, "Delete selected object"),
    Shortcut::new("Escape", false, false, Command::Deselect, "Deselect all objects"),
    Shortcut::new("+", true, false, Command::ZoomIn, "Zoom in"),
    Shortcut::new("=", true, false, Command::ZoomIn, "Zoom in"),
    Shortcut::new("-", true, false, Command::ZoomOut, "Zoom out"),
    Shortcut::new("0", true, false, Command::ResetZoom, "Reset zoom"),
];

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    pub fn all() -> &'static [Shortcut] {
        SHORTCUTS
    }

    /// The command bound to a key press, if any.
    pub fn resolve(key: &str, modifiers: Modifiers) -> Option<Command> {
        // Shift+= arrives as "+" on US layouts.
        let modifiers = if key == "+" {
            Modifiers {
                shift: false,
                ..modifiers
            }
        } else {
            modifiers
        };
        SHORTCUTS
            .iter()
            .find(|s| s.matches(key, modifiers))
            .map(|s| s.command)
    }

    /// Rows for the help dialog: (keys, description), including the
    /// space-drag pan gesture which is not a command.
    pub fn help_rows() -> Vec<(String, &'static str)> {
        let mut rows: Vec<(String, &'static str)> =
            SHORTCUTS.iter().map(|s| (s.format(), s.description)).collect();
        rows.push(("Space+Drag".to_string(), "Pan canvas"));
        rows
    }
}
