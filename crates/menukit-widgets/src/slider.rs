//! Slider widget for picking an integer from a range.

use crate::slider_core::{SliderCore, SliderError, SliderPhase};
use menukit_core::{
    AccessibleRole, Axis, Canvas, Color, Event, EventContext, PaintContext, Point, Rect, Size,
    Widget,
};
use std::any::Any;

/// Thumb extent along the slider axis.
pub const THUMB_SIZE: i32 = 8;
/// Track thickness across the slider axis.
pub const TRACK_WIDTH: i32 = 6;
/// Pointer slack around the widget that still grabs the thumb.
pub const DRAG_SLACK: i32 = 2;

/// Slider widget, horizontal or vertical.
#[derive(Debug)]
pub struct Slider {
    core: SliderCore,
    /// Track color
    track_color: Color,
    /// Filled track color
    active_color: Color,
    /// Thumb color at rest
    thumb_color: Color,
    /// Thumb color while focused or dragging
    thumb_highlight: Color,
}

impl Slider {
    /// Create a slider over `[min, max]`.
    pub fn new(min: i32, max: i32, axis: Axis) -> Result<Self, SliderError> {
        Ok(Self {
            core: SliderCore::new(min, max, axis, THUMB_SIZE)?,
            track_color: Color::from_rgb_u32(0x37_37_37),
            active_color: Color::from_rgb_u32(0x8b_8b_8b),
            thumb_color: Color::from_rgb_u32(0xc6_c6_c6),
            thumb_highlight: Color::WHITE,
        })
    }

    /// Horizontal slider over `[min, max]`.
    pub fn horizontal(min: i32, max: i32) -> Result<Self, SliderError> {
        Self::new(min, max, Axis::Horizontal)
    }

    /// Vertical slider over `[min, max]`.
    pub fn vertical(min: i32, max: i32) -> Result<Self, SliderError> {
        Self::new(min, max, Axis::Vertical)
    }

    /// Set the starting value without notifying.
    #[must_use]
    pub fn with_value(mut self, value: i32) -> Self {
        self.core.set_value(value);
        self
    }

    /// Set track color.
    #[must_use]
    pub const fn track_color(mut self, color: Color) -> Self {
        self.track_color = color;
        self
    }

    /// Set filled track color.
    #[must_use]
    pub const fn active_color(mut self, color: Color) -> Self {
        self.active_color = color;
        self
    }

    /// Set thumb colors at rest and while highlighted.
    #[must_use]
    pub const fn thumb_colors(mut self, rest: Color, highlight: Color) -> Self {
        self.thumb_color = rest;
        self.thumb_highlight = highlight;
        self
    }

    /// Register the value-changed listener.
    #[must_use]
    pub fn on_value_change(mut self, listener: impl FnMut(i32) + 'static) -> Self {
        self.core.set_value_change_listener(listener);
        self
    }

    /// Register the dragging-finished listener.
    #[must_use]
    pub fn on_dragging_finished(mut self, listener: impl FnMut(i32) + 'static) -> Self {
        self.core.set_dragging_finished_listener(listener);
        self
    }

    /// The state machine.
    #[must_use]
    pub const fn core(&self) -> &SliderCore {
        &self.core
    }

    /// Mutable state machine, for bound and value changes.
    pub fn core_mut(&mut self) -> &mut SliderCore {
        &mut self.core
    }

    /// Current value.
    #[must_use]
    pub const fn value(&self) -> i32 {
        self.core.value()
    }

    /// Whether a local point is close enough to grab the thumb.
    #[must_use]
    pub fn in_drag_bounds(&self, point: Point) -> bool {
        Rect::from_size(self.core.size())
            .outset(DRAG_SLACK)
            .contains_point(point)
    }

    /// Track rectangle in absolute coordinates.
    fn track_rect(&self, bounds: Rect) -> Rect {
        let half_thumb = THUMB_SIZE / 2;
        match self.core.axis() {
            Axis::Horizontal => Rect::new(
                bounds.x + half_thumb,
                bounds.y + (bounds.height - TRACK_WIDTH) / 2,
                (bounds.width - THUMB_SIZE).max(0),
                TRACK_WIDTH,
            ),
            Axis::Vertical => Rect::new(
                bounds.x + (bounds.width - TRACK_WIDTH) / 2,
                bounds.y + half_thumb,
                TRACK_WIDTH,
                (bounds.height - THUMB_SIZE).max(0),
            ),
        }
    }

    /// Thumb rectangle in absolute coordinates.
    pub(crate) fn thumb_rect(&self, bounds: Rect) -> Rect {
        let offset = self.core.thumb_offset();
        match self.core.axis() {
            Axis::Horizontal => Rect::new(bounds.x + offset, bounds.y, THUMB_SIZE, bounds.height),
            Axis::Vertical => Rect::new(
                bounds.x,
                bounds.bottom() - THUMB_SIZE - offset,
                bounds.width,
                THUMB_SIZE,
            ),
        }
    }

    pub(crate) fn paint_track(&self, canvas: &mut dyn Canvas, bounds: Rect) {
        let track = self.track_rect(bounds);
        canvas.fill_rect(track, self.track_color);

        let offset = self.core.thumb_offset();
        let active = match self.core.axis() {
            Axis::Horizontal => Rect::new(track.x, track.y, offset.clamp(0, track.width), track.height),
            Axis::Vertical => {
                let filled = offset.clamp(0, track.height);
                Rect::new(track.x, track.bottom() - filled, track.width, filled)
            }
        };
        canvas.fill_rect(active, self.active_color);
    }

    pub(crate) fn paint_thumb(&self, canvas: &mut dyn Canvas, bounds: Rect, focused: bool) {
        let highlighted = focused || self.core.phase() == SliderPhase::Dragging;
        let color = if highlighted {
            self.thumb_highlight
        } else {
            self.thumb_color
        };
        canvas.fill_rect(self.thumb_rect(bounds), color);
    }
}

impl Widget for Slider {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn preferred_size(&self) -> Size {
        match self.core.axis() {
            Axis::Horizontal => Size::new(100, 18),
            Axis::Vertical => Size::new(18, 100),
        }
    }

    fn can_resize(&self) -> bool {
        true
    }

    fn can_focus(&self) -> bool {
        true
    }

    fn set_size(&mut self, size: Size) {
        self.core.set_size(size);
    }

    fn paint_background(&self, canvas: &mut dyn Canvas, ctx: &PaintContext) {
        self.paint_track(canvas, ctx.bounds);
        self.paint_thumb(canvas, ctx.bounds, ctx.focused);
    }

    fn event(&mut self, event: &Event, ctx: &mut EventContext) {
        let inside = event.position().is_some_and(|p| self.in_drag_bounds(p));
        self.core.handle_event(event, inside, ctx);
    }

    fn tick(&mut self, ctx: &mut EventContext) {
        self.core.handle_tick(ctx);
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Slider
    }
}
