//! Static text.

use menukit_core::{
    AccessibleRole, Canvas, Color, Event, EventContext, PaintContext, Size, TextStyle, Widget,
};
use std::any::Any;

/// Single line of static text.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    text: String,
    style: TextStyle,
}

impl Label {
    /// Create a label in the default text color.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// Set text color.
    #[must_use]
    pub const fn color(mut self, color: Color) -> Self {
        self.style.color = color;
        self
    }

    /// Draw with a drop shadow.
    #[must_use]
    pub const fn shadow(mut self, shadow: bool) -> Self {
        self.style.shadow = shadow;
        self
    }

    /// Replace the text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Widget for Label {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn preferred_size(&self) -> Size {
        Size::new(self.text.chars().count() as i32 * 6, 9)
    }

    fn can_resize(&self) -> bool {
        true
    }

    fn paint_foreground(&self, canvas: &mut dyn Canvas, ctx: &PaintContext) {
        canvas.draw_text(&self.text, ctx.bounds.origin(), &self.style);
    }

    fn event(&mut self, _event: &Event, _ctx: &mut EventContext) {}

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Label
    }
}
