//! Panel: a plain container that only paints its background.

use menukit_core::{
    AccessibleRole, BackgroundPainter, Canvas, Event, EventContext, PaintContext, Size, Widget,
};
use std::any::Any;

/// Container widget. Children live in the widget tree; the panel itself
/// only paints its background.
#[derive(Debug, Clone, Default)]
pub struct Panel {
    background: BackgroundPainter,
    /// A painter chosen in code wins over the screen style
    explicit_background: bool,
    size: Size,
}

impl Panel {
    /// Create a panel with no background.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the background painter. The screen style will not replace it.
    #[must_use]
    pub const fn background(mut self, painter: BackgroundPainter) -> Self {
        self.background = painter;
        self.explicit_background = true;
        self
    }

    /// Current background painter.
    #[must_use]
    pub const fn background_painter(&self) -> &BackgroundPainter {
        &self.background
    }

    /// Last size assigned by the tree.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }
}

impl Widget for Panel {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn can_resize(&self) -> bool {
        true
    }

    fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    fn paint_background(&self, canvas: &mut dyn Canvas, ctx: &PaintContext) {
        self.background.paint(canvas, ctx.bounds);
    }

    fn event(&mut self, _event: &Event, _ctx: &mut EventContext) {}

    fn set_background_painter(&mut self, painter: &BackgroundPainter) -> bool {
        if self.explicit_background {
            return false;
        }
        self.background = *painter;
        true
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Group
    }
}
