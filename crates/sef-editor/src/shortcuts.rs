//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s:
//! - Single letters switch drawing mode
//! - Delete/Backspace remove the selection, Escape drops it
//! - ⌘/Ctrl + A/N/O/S for select-all and file actions

use crate::input::Modifiers;
use crate::tools::Mode;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── Modes ──
    SetMode(Mode),

    // ── Edit ──
    Delete,
    SelectAll,
    Deselect,

    // ── File ──
    New,
    Open,
    Save,
    SaveAs,
}

/// Resolves key events into shortcut actions.
///
/// ⌘ on macOS and Ctrl elsewhere both count as the command key.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    /// Returns `None` if the key combo has no binding.
    pub fn resolve(key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        let cmd = modifiers.command();
        let shift = modifiers.shift;

        if cmd && shift {
            return match key {
                "s" | "S" => Some(ShortcutAction::SaveAs),
                _ => None,
            };
        }

        if cmd {
            return match key {
                "a" | "A" => Some(ShortcutAction::SelectAll),
                "n" | "N" => Some(ShortcutAction::New),
                "o" | "O" => Some(ShortcutAction::Open),
                "s" | "S" => Some(ShortcutAction::Save),
                _ => None,
            };
        }

        if shift {
            return None;
        }

        match key {
            "m" | "M" => Some(ShortcutAction::SetMode(Mode::Move)),
            "s" | "S" => Some(ShortcutAction::SetMode(Mode::Select)),
            "c" | "C" => Some(ShortcutAction::SetMode(Mode::DrawCircle)),
            "t" | "T" => Some(ShortcutAction::SetMode(Mode::DrawTriangle)),
            "r" | "R" => Some(ShortcutAction::SetMode(Mode::DrawRectangle)),
            "p" | "P" => Some(ShortcutAction::SetMode(Mode::DrawPolygon)),
            "Delete" | "Backspace" => Some(ShortcutAction::Delete),
            "Escape" => Some(ShortcutAction::Deselect),
            _ => None,
        }
    }
}
