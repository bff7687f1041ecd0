//! Core types and traits for the menukit menu-screen toolkit.
//!
//! This crate provides foundational types used throughout menukit:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`], [`Axis`]
//! - Color representation: [`Color`]
//! - Events: [`Event`], [`Key`], [`Modifiers`], [`MouseButton`]
//! - The [`Widget`] and [`Canvas`] traits
//! - The widget arena [`WidgetTree`] and the per-screen [`GuiDescription`]
//! - Screen [`Style`] configuration

mod canvas;
mod color;
mod description;
mod error;
mod event;
mod geometry;
mod style;
mod tree;
pub mod widget;

pub use canvas::{DrawCommand, RecordingCanvas};
pub use color::{Color, ColorParseError};
pub use description::{GuiDescription, WidgetMessage};
pub use error::{ConfigError, TreeError};
pub use event::{Event, Key, Modifiers, MouseButton};
pub use geometry::{Axis, Point, Rect, Size};
pub use style::Style;
pub use tree::{PaintPass, WidgetTree};
pub use widget::{
    AccessibleRole, BackgroundPainter, Canvas, EventContext, FocusChange, PaintContext, TextStyle,
    Widget, WidgetId, DEFAULT_WIDGET_SIZE,
};
