//! Input events delivered to widgets.
//!
//! Pointer positions are always local to the receiving widget: the screen
//! adapter and the widget tree subtract ancestor offsets before delivery.

use crate::geometry::Point;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Input event types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Mouse button pressed over the widget
    MouseDown {
        /// Local position of the press
        position: Point,
        /// Button pressed
        button: MouseButton,
    },
    /// Mouse button released after a press on this widget (or over a panel
    /// when no press was tracked)
    MouseUp {
        /// Local position of the release
        position: Point,
        /// Button released
        button: MouseButton,
    },
    /// Pointer moved with a button held. Positions may lie outside the
    /// widget once a drag has started.
    MouseDrag {
        /// Local pointer position
        position: Point,
        /// Button held
        button: MouseButton,
    },
    /// Press and release completed inside the screen's container
    Click {
        /// Local position of the release
        position: Point,
        /// Button clicked
        button: MouseButton,
    },
    /// Mouse wheel scrolled over the widget
    Scroll {
        /// Local pointer position
        position: Point,
        /// Scroll amount, positive away from the user
        amount: f64,
    },
    /// Character typed while focused
    CharTyped {
        /// Character produced by the keyboard layout
        ch: char,
    },
    /// Key pressed while focused
    KeyDown {
        /// Key pressed
        key: Key,
        /// Platform scan code
        scan_code: i32,
        /// Held modifiers
        modifiers: Modifiers,
    },
    /// Key released while focused
    KeyUp {
        /// Key released
        key: Key,
        /// Platform scan code
        scan_code: i32,
        /// Held modifiers
        modifiers: Modifiers,
    },
    /// Widget gained keyboard focus
    FocusGained,
    /// Widget lost keyboard focus
    FocusLost,
}

impl Event {
    /// Local pointer position for pointer events.
    #[must_use]
    pub const fn position(&self) -> Option<Point> {
        match self {
            Self::MouseDown { position, .. }
            | Self::MouseUp { position, .. }
            | Self::MouseDrag { position, .. }
            | Self::Click { position, .. }
            | Self::Scroll { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// Copy of a pointer event moved into another coordinate space.
    #[must_use]
    pub fn offset_by(&self, delta: Point) -> Self {
        let mut moved = self.clone();
        match &mut moved {
            Self::MouseDown { position, .. }
            | Self::MouseUp { position, .. }
            | Self::MouseDrag { position, .. }
            | Self::Click { position, .. }
            | Self::Scroll { position, .. } => *position = *position + delta,
            _ => {}
        }
        moved
    }
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button (wheel click)
    Middle,
    /// Any additional button, by host index
    Other(u8),
}

impl MouseButton {
    /// Map a host button index (0 = left, 1 = right, 2 = middle).
    #[must_use]
    pub const fn from_index(index: u8) -> Self {
        match index {
            0 => Self::Left,
            1 => Self::Right,
            2 => Self::Middle,
            n => Self::Other(n),
        }
    }
}

/// Keyboard key identifiers.
///
/// Only the keys menu widgets react to are named; everything else arrives as
/// [`Key::Other`] with the host key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Home
    Home,
    /// End
    End,
    /// Backspace
    Backspace,
    /// Delete
    Delete,
    /// Enter / Return
    Enter,
    /// Escape
    Escape,
    /// Tab
    Tab,
    /// Unnamed key, by host key code
    Other(i32),
}

impl Key {
    /// Keys that move a one-dimensional value towards its minimum.
    #[must_use]
    pub const fn is_decreasing(self) -> bool {
        matches!(self, Self::Left | Self::Down)
    }

    /// Keys that move a one-dimensional value towards its maximum.
    #[must_use]
    pub const fn is_increasing(self) -> bool {
        matches!(self, Self::Right | Self::Up)
    }

    /// Arrow keys.
    #[must_use]
    pub const fn is_directional(self) -> bool {
        self.is_decreasing() || self.is_increasing()
    }
}

bitflags! {
    /// Keyboard modifiers held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Modifiers: u8 {
        /// Shift
        const SHIFT = 0b0001;
        /// Control
        const CONTROL = 0b0010;
        /// Alt / Option
        const ALT = 0b0100;
        /// Super / Command
        const SUPER = 0b1000;
    }
}
