//! Widget trait and related types.
//!
//! Widgets are owned by a [`WidgetTree`](crate::WidgetTree) and addressed by
//! [`WidgetId`]. They never hold references to each other; anything a widget
//! needs to tell the outside world (focus requests, messages for the
//! application) goes through the [`EventContext`] it is handed.
//!
//! # Lifecycle
//!
//! 1. **Insert**: the tree assigns an id and, for resizable widgets, a size
//! 2. **Paint**: background pass for every widget, then foreground pass
//! 3. **Event**: input delivered in widget-local coordinates
//! 4. **Tick**: once per host tick, for time-based behaviour
//!
//! # Examples
//!
//! ```
//! use menukit_core::{Size, WidgetId};
//!
//! let id = WidgetId::new(42);
//! assert_eq!(id.0, 42);
//! assert!(Size::new(10, 10).contains(menukit_core::Point::new(9, 0)));
//! ```

use crate::color::Color;
use crate::event::Event;
use crate::geometry::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Unique identifier for a widget instance within one tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WidgetId(pub u64);

impl WidgetId {
    /// Create a new widget ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for WidgetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Default extent of a widget that does not pick its own size.
pub const DEFAULT_WIDGET_SIZE: Size = Size::new(18, 18);

/// Core widget trait that all UI elements implement.
pub trait Widget {
    /// Upcast for typed access through the tree.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for typed access through the tree.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Size used when the widget is added without resizing.
    fn preferred_size(&self) -> Size {
        DEFAULT_WIDGET_SIZE
    }

    /// Whether the parent may assign an arbitrary size.
    fn can_resize(&self) -> bool {
        false
    }

    /// Whether the widget can hold keyboard focus.
    fn can_focus(&self) -> bool {
        false
    }

    /// Geometry changed. Widgets that derive state from their size must
    /// recompute it here; nothing else will.
    fn set_size(&mut self, _size: Size) {}

    /// Paint the background pass.
    fn paint_background(&self, _canvas: &mut dyn Canvas, _ctx: &PaintContext) {}

    /// Paint the foreground pass (overlays, tooltips).
    fn paint_foreground(&self, _canvas: &mut dyn Canvas, _ctx: &PaintContext) {}

    /// Handle an input event.
    fn event(&mut self, event: &Event, ctx: &mut EventContext);

    /// Called once per host tick.
    fn tick(&mut self, _ctx: &mut EventContext) {}

    /// Offer a background painter. Returns whether the widget took it.
    fn set_background_painter(&mut self, _painter: &BackgroundPainter) -> bool {
        false
    }

    /// Get the accessible role.
    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Generic
    }
}

/// Focus change requested by a widget while handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusChange {
    /// Take keyboard focus
    Request,
    /// Give keyboard focus up
    Release,
}

/// Per-dispatch context handed to [`Widget::event`] and [`Widget::tick`].
///
/// Changes are applied by the description after the widget returns, so a
/// widget never observes its own request mid-event.
pub struct EventContext {
    id: WidgetId,
    focused: bool,
    focus_change: Option<FocusChange>,
    messages: Vec<Box<dyn Any>>,
}

impl EventContext {
    /// Create a context for one dispatch to `id`.
    #[must_use]
    pub const fn new(id: WidgetId, focused: bool) -> Self {
        Self {
            id,
            focused,
            focus_change: None,
            messages: Vec::new(),
        }
    }

    /// The widget receiving this dispatch.
    #[must_use]
    pub const fn widget_id(&self) -> WidgetId {
        self.id
    }

    /// Whether the widget held focus when the dispatch started.
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Ask for keyboard focus.
    pub fn request_focus(&mut self) {
        self.focus_change = Some(FocusChange::Request);
    }

    /// Give up keyboard focus.
    pub fn release_focus(&mut self) {
        self.focus_change = Some(FocusChange::Release);
    }

    /// Pending focus change, if any.
    #[must_use]
    pub const fn focus_change(&self) -> Option<FocusChange> {
        self.focus_change
    }

    /// Queue a message for the application.
    pub fn emit<M: Any>(&mut self, message: M) {
        self.messages.push(Box::new(message));
    }

    /// Messages queued so far.
    #[must_use]
    pub fn messages(&self) -> &[Box<dyn Any>] {
        &self.messages
    }

    pub(crate) fn into_parts(self) -> (WidgetId, Option<FocusChange>, Vec<Box<dyn Any>>) {
        (self.id, self.focus_change, self.messages)
    }
}

impl std::fmt::Debug for EventContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventContext")
            .field("id", &self.id)
            .field("focused", &self.focused)
            .field("focus_change", &self.focus_change)
            .field("messages", &self.messages.len())
            .finish()
    }
}

/// Per-widget paint context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaintContext {
    /// Absolute screen rectangle of the widget
    pub bounds: Rect,
    /// Pointer in widget-local coordinates; may be negative or past the size
    pub mouse: Point,
    /// Whether the widget holds keyboard focus
    pub focused: bool,
}

impl PaintContext {
    /// Whether the pointer is over the widget.
    #[must_use]
    pub const fn hovered(&self) -> bool {
        self.bounds.size().contains(self.mouse)
    }
}

/// Drawing surface provided by the host.
///
/// This is a minimal abstraction over the host's font and sprite primitives.
pub trait Canvas {
    /// Draw a filled rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw a stroked rectangle.
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: i32);

    /// Draw text with its top-left corner at `position`.
    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle);

    /// Width of `text` in pixels. The default assumes a 6px monospace font.
    fn text_width(&self, text: &str, _style: &TextStyle) -> i32 {
        text.chars().count() as i32 * 6
    }
}

/// Text style for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Text color
    pub color: Color,
    /// Draw with a drop shadow
    pub shadow: bool,
}

impl TextStyle {
    /// Plain text in a color.
    #[must_use]
    pub const fn colored(color: Color) -> Self {
        Self {
            color,
            shadow: false,
        }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::colored(Color::from_rgb_u32(0x40_40_40))
    }
}

/// How a container fills its background.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackgroundPainter {
    /// Nothing painted
    #[default]
    None,
    /// Flat fill
    Solid {
        /// Fill color
        color: Color,
    },
    /// Fill with a 1px border
    Bordered {
        /// Fill color
        fill: Color,
        /// Border color
        border: Color,
    },
}

impl BackgroundPainter {
    /// Paint into `rect`.
    pub fn paint(&self, canvas: &mut dyn Canvas, rect: Rect) {
        match *self {
            Self::None => {}
            Self::Solid { color } => canvas.fill_rect(rect, color),
            Self::Bordered { fill, border } => {
                canvas.fill_rect(rect, fill);
                canvas.stroke_rect(rect, border, 1);
            }
        }
    }

    /// Whether painting does nothing.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Accessible role for screen readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccessibleRole {
    /// Generic element
    #[default]
    Generic,
    /// Container of other widgets
    Group,
    /// Static text
    Label,
    /// Button
    Button,
    /// Slider
    Slider,
    /// Text input
    TextInput,
}
