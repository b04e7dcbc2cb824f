//! Input abstraction layer.
//!
//! Normalizes mouse and keyboard events from the host window into a
//! unified `InputEvent` enum consumed by tools and shortcuts.

use sef_core::Point;

/// Modifier keys held during an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Platform command key: ⌘ on macOS, Ctrl elsewhere.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Mouse button pressed.
    PointerDown { x: f64, y: f64, modifiers: Modifiers },

    /// Mouse moved, with or without a button held.
    PointerMove { x: f64, y: f64, modifiers: Modifiers },

    /// Mouse button released.
    PointerUp { x: f64, y: f64, modifiers: Modifiers },

    /// Key pressed. `key` is the logical key name (`"a"`, `"Delete"`, `"Enter"`).
    Key { key: String, modifiers: Modifiers },
}

impl InputEvent {
    pub fn down(x: f64, y: f64) -> Self {
        Self::PointerDown {
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::PointerMove {
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self::PointerUp {
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn key(key: &str) -> Self {
        Self::Key {
            key: key.to_string(),
            modifiers: Modifiers::NONE,
        }
    }

    pub fn key_with(key: &str, modifiers: Modifiers) -> Self {
        Self::Key {
            key: key.to_string(),
            modifiers,
        }
    }

    /// Extract position if this is a pointer event.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y, .. }
            | Self::PointerUp { x, y, .. } => Some(Point::new(*x, *y)),
            Self::Key { .. } => None,
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        match self {
            Self::PointerDown { modifiers, .. }
            | Self::PointerMove { modifiers, .. }
            | Self::PointerUp { modifiers, .. }
            | Self::Key { modifiers, .. } => *modifiers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_events_have_positions() {
        assert_eq!(InputEvent::down(1.0, 2.0).position(), Some(Point::new(1.0, 2.0)));
        assert_eq!(InputEvent::up(3.0, 4.0).position(), Some(Point::new(3.0, 4.0)));
        assert_eq!(InputEvent::key("a").position(), None);
    }

    #[test]
    fn command_is_ctrl_or_meta() {
        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        };
        let meta = Modifiers {
            meta: true,
            ..Modifiers::NONE
        };
        assert!(ctrl.command());
        assert!(meta.command());
        assert!(!Modifiers::NONE.command());
    }
}
