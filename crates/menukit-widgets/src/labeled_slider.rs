//! Horizontal slider with a caption drawn over the track.

use crate::slider::Slider;
use crate::slider_core::{SliderCore, SliderError};
use menukit_core::{
    AccessibleRole, Canvas, Color, Event, EventContext, PaintContext, Point, Size, TextStyle,
    Widget,
};
use std::any::Any;

/// Produces the caption for a value.
pub type LabelFormatter = Box<dyn Fn(i32) -> String>;

enum Caption {
    None,
    Fixed(String),
    Formatted(LabelFormatter),
}

/// Horizontal slider that shows a caption, e.g. `"Volume: 40%"`.
pub struct LabeledSlider {
    slider: Slider,
    caption: Caption,
    label_color: Color,
}

impl std::fmt::Debug for LabeledSlider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabeledSlider")
            .field("slider", &self.slider)
            .field("label", &self.label())
            .finish_non_exhaustive()
    }
}

impl LabeledSlider {
    /// Create a labeled slider over `[min, max]` with no caption.
    pub fn new(min: i32, max: i32) -> Result<Self, SliderError> {
        Ok(Self {
            slider: Slider::horizontal(min, max)?,
            caption: Caption::None,
            label_color: Color::from_rgb_u32(0xe0_e0_e0),
        })
    }

    /// Use a fixed caption.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.caption = Caption::Fixed(label.into());
        self
    }

    /// Derive the caption from the value on every paint.
    #[must_use]
    pub fn with_formatter(mut self, formatter: impl Fn(i32) -> String + 'static) -> Self {
        self.caption = Caption::Formatted(Box::new(formatter));
        self
    }

    /// Set the caption color.
    #[must_use]
    pub const fn label_color(mut self, color: Color) -> Self {
        self.label_color = color;
        self
    }

    /// Set the starting value without notifying.
    #[must_use]
    pub fn with_value(mut self, value: i32) -> Self {
        self.slider = self.slider.with_value(value);
        self
    }

    /// Register the value-changed listener.
    #[must_use]
    pub fn on_value_change(mut self, listener: impl FnMut(i32) + 'static) -> Self {
        self.slider = self.slider.on_value_change(listener);
        self
    }

    /// Register the dragging-finished listener.
    #[must_use]
    pub fn on_dragging_finished(mut self, listener: impl FnMut(i32) + 'static) -> Self {
        self.slider = self.slider.on_dragging_finished(listener);
        self
    }

    /// Replace the caption with a fixed one.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.caption = Caption::Fixed(label.into());
    }

    /// Caption for the current value.
    #[must_use]
    pub fn label(&self) -> Option<String> {
        match &self.caption {
            Caption::None => None,
            Caption::Fixed(text) => Some(text.clone()),
            Caption::Formatted(formatter) => Some(formatter(self.slider.value())),
        }
    }

    /// Current value.
    #[must_use]
    pub const fn value(&self) -> i32 {
        self.slider.value()
    }

    /// The state machine.
    #[must_use]
    pub const fn core(&self) -> &SliderCore {
        self.slider.core()
    }

    /// Mutable state machine.
    pub fn core_mut(&mut self) -> &mut SliderCore {
        self.slider.core_mut()
    }
}

impl Widget for LabeledSlider {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn preferred_size(&self) -> Size {
        Size::new(150, 20)
    }

    fn can_resize(&self) -> bool {
        true
    }

    fn can_focus(&self) -> bool {
        true
    }

    fn set_size(&mut self, size: Size) {
        self.slider.set_size(size);
    }

    fn paint_background(&self, canvas: &mut dyn Canvas, ctx: &PaintContext) {
        self.slider.paint_track(canvas, ctx.bounds);
        self.slider.paint_thumb(canvas, ctx.bounds, ctx.focused);
        if let Some(label) = self.label() {
            let style = TextStyle {
                color: self.label_color,
                shadow: true,
            };
            let width = canvas.text_width(&label, &style);
            let position = Point::new(
                ctx.bounds.x + (ctx.bounds.width - width) / 2,
                ctx.bounds.y + (ctx.bounds.height - 8) / 2,
            );
            canvas.draw_text(&label, position, &style);
        }
    }

    fn event(&mut self, event: &Event, ctx: &mut EventContext) {
        // The whole widget is the grab area; no slack.
        let inside = event
            .position()
            .is_some_and(|p| self.slider.core().size().contains(p));
        self.slider.core_mut().handle_event(event, inside, ctx);
    }

    fn tick(&mut self, ctx: &mut EventContext) {
        self.slider.tick(ctx);
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Slider
    }
}
