//! Value/drag/focus state machine shared by slider widgets.
//!
//! A [`SliderCore`] turns pointer, keyboard and scroll input into a clamped
//! integer value and reports through two channels:
//!
//! - **value changed**: every accepted change, immediately
//! - **dragging finished**: once per completed interaction (drag released,
//!   click, keyboard adjustment released, scroll burst settled). Use this one
//!   for anything expensive, like syncing the value elsewhere.
//!
//! Within one call the value-changed listener always runs first.

use menukit_core::{Axis, Event, EventContext, Key, Modifiers, Point, Size};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ticks between two dragging-finished notifications caused by scrolling.
pub const SCROLL_COMMIT_COOLDOWN_TICKS: u32 = 10;

/// Single-slot value listener.
pub type ValueListener = Box<dyn FnMut(i32)>;

/// Errors from slider construction and bound changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SliderError {
    /// `max` must be strictly greater than `min`.
    #[error("minimum value must be smaller than the maximum (min {min}, max {max})")]
    InvalidRange {
        /// Requested minimum
        min: i32,
        /// Requested maximum
        max: i32,
    },
}

/// Message emitted when the slider value changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderChanged {
    /// The new value
    pub value: i32,
}

/// Message emitted when an interaction with the slider is finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderCommitted {
    /// The committed value
    pub value: i32,
}

/// Interaction state, for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SliderPhase {
    /// Not focused
    Idle,
    /// Focused, thumb at rest
    Focused,
    /// Thumb being dragged
    Dragging,
}

/// What a single input did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[must_use]
pub struct SliderUpdate {
    /// New value, if it changed
    pub changed: Option<i32>,
    /// Committed value, if the interaction finished
    pub committed: Option<i32>,
}

impl SliderUpdate {
    /// Whether nothing happened.
    pub const fn is_empty(&self) -> bool {
        self.changed.is_none() && self.committed.is_none()
    }

    fn and(self, later: Self) -> Self {
        Self {
            changed: later.changed.or(self.changed),
            committed: later.committed.or(self.committed),
        }
    }

    /// Forward as widget messages, change first.
    pub fn emit(self, ctx: &mut EventContext) {
        if let Some(value) = self.changed {
            ctx.emit(SliderChanged { value });
        }
        if let Some(value) = self.committed {
            ctx.emit(SliderCommitted { value });
        }
    }
}

/// Slider state machine.
pub struct SliderCore {
    min: i32,
    max: i32,
    value: i32,
    axis: Axis,
    thumb_width: i32,
    size: Size,
    focused: bool,
    /// Visual only; never used to compute values
    dragging: bool,
    value_to_coord_ratio: f32,
    coord_to_value_ratio: f32,
    /// Mouse-up of the current press already fired dragging-finished
    press_committed: bool,
    pending_keyboard_commit: bool,
    pending_scroll_commit: bool,
    scroll_cooldown: u32,
    value_change_listener: Option<ValueListener>,
    dragging_finished_listener: Option<ValueListener>,
}

impl std::fmt::Debug for SliderCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SliderCore")
            .field("min", &self.min)
            .field("max", &self.max)
            .field("value", &self.value)
            .field("axis", &self.axis)
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}

impl SliderCore {
    /// Create a slider over `[min, max]` starting at `min`.
    ///
    /// `thumb_width` is the thumb's extent along `axis`.
    pub fn new(min: i32, max: i32, axis: Axis, thumb_width: i32) -> Result<Self, SliderError> {
        if max <= min {
            return Err(SliderError::InvalidRange { min, max });
        }
        Ok(Self {
            min,
            max,
            value: min,
            axis,
            thumb_width,
            size: Size::ZERO,
            focused: false,
            dragging: false,
            value_to_coord_ratio: 0.0,
            coord_to_value_ratio: 0.0,
            press_committed: false,
            pending_keyboard_commit: false,
            pending_scroll_commit: false,
            scroll_cooldown: 0,
            value_change_listener: None,
            dragging_finished_listener: None,
        })
    }

    /// Current value.
    pub const fn value(&self) -> i32 {
        self.value
    }

    /// Lower bound.
    pub const fn min_value(&self) -> i32 {
        self.min
    }

    /// Upper bound.
    pub const fn max_value(&self) -> i32 {
        self.max
    }

    /// Orientation.
    pub const fn axis(&self) -> Axis {
        self.axis
    }

    /// Thumb extent along the axis.
    pub const fn thumb_width(&self) -> i32 {
        self.thumb_width
    }

    /// Size last passed to [`set_size`](Self::set_size).
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Whether the thumb is being dragged.
    pub const fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Whether the slider believes it holds focus.
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Current interaction state.
    pub const fn phase(&self) -> SliderPhase {
        if self.dragging {
            SliderPhase::Dragging
        } else if self.focused {
            SliderPhase::Focused
        } else {
            SliderPhase::Idle
        }
    }

    /// Value units per pixel of track.
    pub const fn value_to_coord_ratio(&self) -> f32 {
        self.value_to_coord_ratio
    }

    /// Pixels of track per value unit.
    pub const fn coord_to_value_ratio(&self) -> f32 {
        self.coord_to_value_ratio
    }

    /// Track length: extent along the axis minus the thumb.
    pub const fn track_length(&self) -> i32 {
        self.size.along(self.axis) - self.thumb_width
    }

    /// Thumb offset from the track start, in pixels.
    pub fn thumb_offset(&self) -> i32 {
        let span = f64::from(self.value) - f64::from(self.min);
        (span * f64::from(self.coord_to_value_ratio)).round() as i32
    }

    /// Geometry changed. Must be called on every resize; the value mapping
    /// uses whatever ratios were computed last.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
        self.recompute_ratios();
    }

    fn recompute_ratios(&mut self) {
        let track = self.track_length();
        if track > 0 {
            let range = (i64::from(self.max) - i64::from(self.min)) as f32;
            self.value_to_coord_ratio = range / track as f32;
            self.coord_to_value_ratio = 1.0 / self.value_to_coord_ratio;
        } else {
            self.value_to_coord_ratio = 0.0;
            self.coord_to_value_ratio = 0.0;
        }
    }

    fn clamp(&self, value: i64) -> i32 {
        value.clamp(i64::from(self.min), i64::from(self.max)) as i32
    }

    /// Register the value-changed listener, replacing any previous one.
    pub fn set_value_change_listener(&mut self, listener: impl FnMut(i32) + 'static) {
        self.value_change_listener = Some(Box::new(listener));
    }

    /// Remove and return the value-changed listener.
    pub fn take_value_change_listener(&mut self) -> Option<ValueListener> {
        self.value_change_listener.take()
    }

    /// Register the dragging-finished listener, replacing any previous one.
    pub fn set_dragging_finished_listener(&mut self, listener: impl FnMut(i32) + 'static) {
        self.dragging_finished_listener = Some(Box::new(listener));
    }

    /// Remove and return the dragging-finished listener.
    pub fn take_dragging_finished_listener(&mut self) -> Option<ValueListener> {
        self.dragging_finished_listener.take()
    }

    fn notify_changed(&mut self) -> SliderUpdate {
        let value = self.value;
        if let Some(listener) = self.value_change_listener.as_mut() {
            listener(value);
        }
        SliderUpdate {
            changed: Some(value),
            committed: None,
        }
    }

    fn commit(&mut self) -> SliderUpdate {
        let value = self.value;
        if let Some(listener) = self.dragging_finished_listener.as_mut() {
            listener(value);
        }
        SliderUpdate {
            changed: None,
            committed: Some(value),
        }
    }

    fn assign(&mut self, value: i64) -> SliderUpdate {
        let previous = self.value;
        self.value = self.clamp(value);
        if self.value == previous {
            SliderUpdate::default()
        } else {
            self.notify_changed()
        }
    }

    /// Set the value without calling listeners.
    pub fn set_value(&mut self, value: i32) {
        self.value = self.clamp(i64::from(value));
    }

    /// Set the value, firing value-changed then dragging-finished if the
    /// clamped value differs from the current one.
    pub fn set_value_notify(&mut self, value: i32) -> SliderUpdate {
        let update = self.assign(i64::from(value));
        if update.changed.is_some() {
            update.and(self.commit())
        } else {
            update
        }
    }

    /// Change the lower bound. A value below it is pulled up and both
    /// listeners fire.
    pub fn set_min_value(&mut self, min: i32) -> Result<SliderUpdate, SliderError> {
        if self.max <= min {
            log::warn!("rejected slider min {min} (max {})", self.max);
            return Err(SliderError::InvalidRange { min, max: self.max });
        }
        self.min = min;
        Ok(self.after_bounds_change())
    }

    /// Change the upper bound. A value above it is pulled down and both
    /// listeners fire.
    pub fn set_max_value(&mut self, max: i32) -> Result<SliderUpdate, SliderError> {
        if max <= self.min {
            log::warn!("rejected slider max {max} (min {})", self.min);
            return Err(SliderError::InvalidRange { min: self.min, max });
        }
        self.max = max;
        Ok(self.after_bounds_change())
    }

    fn after_bounds_change(&mut self) -> SliderUpdate {
        self.recompute_ratios();
        let update = self.assign(i64::from(self.value));
        if update.changed.is_some() {
            update.and(self.commit())
        } else {
            update
        }
    }

    /// Map a local pointer position to a value.
    fn move_slider(&mut self, position: Point) -> SliderUpdate {
        let along = match self.axis {
            Axis::Vertical => i64::from(self.size.height) - i64::from(position.y),
            Axis::Horizontal => i64::from(position.x),
        } - i64::from(self.thumb_width / 2);
        let offset = (f64::from(self.value_to_coord_ratio) * along as f64 + 0.5).floor();
        self.assign(i64::from(self.min).saturating_add(offset as i64))
    }

    /// Pointer pressed. Returns whether the slider wants focus.
    pub fn mouse_down(&mut self, inside_drag_bounds: bool) -> bool {
        self.press_committed = false;
        inside_drag_bounds
    }

    /// Pointer moved with a button held. Ignored unless focused.
    pub fn mouse_drag(&mut self, position: Point) -> SliderUpdate {
        if !self.focused {
            return SliderUpdate::default();
        }
        self.dragging = true;
        self.move_slider(position)
    }

    /// Pointer released. Commits if the thumb was dragged.
    pub fn mouse_up(&mut self) -> SliderUpdate {
        let was_dragging = std::mem::replace(&mut self.dragging, false);
        if was_dragging {
            self.press_committed = true;
            self.commit()
        } else {
            SliderUpdate::default()
        }
    }

    /// Press and release inside the screen. Moves the thumb to the pointer
    /// and commits, unless the release already committed this same value.
    pub fn click(&mut self, position: Point) -> SliderUpdate {
        let update = self.move_slider(position);
        let already_committed = std::mem::replace(&mut self.press_committed, false);
        if already_committed && update.changed.is_none() {
            update
        } else {
            update.and(self.commit())
        }
    }

    /// Wheel scrolled. The commit is deferred to [`tick`](Self::tick).
    pub fn scroll(&mut self, amount: f64) -> SliderUpdate {
        let delta = (f64::from(self.value_to_coord_ratio) * amount * 2.0) as i64;
        let update = self.assign(i64::from(self.value) + delta);
        if update.changed.is_some() {
            self.pending_scroll_commit = true;
        }
        update
    }

    /// Advance the scroll commit cooldown by one tick.
    pub fn tick(&mut self) -> SliderUpdate {
        self.scroll_cooldown = self.scroll_cooldown.saturating_sub(1);
        if self.pending_scroll_commit && self.scroll_cooldown == 0 {
            self.pending_scroll_commit = false;
            self.scroll_cooldown = SCROLL_COMMIT_COOLDOWN_TICKS;
            self.commit()
        } else {
            SliderUpdate::default()
        }
    }

    /// Arrow key pressed. Plain arrows step by one; with control held they
    /// jump to the bound. Other modifier combinations are ignored.
    pub fn key_pressed(&mut self, key: Key, modifiers: Modifiers) -> SliderUpdate {
        let target = if modifiers.is_empty() {
            if key.is_decreasing() {
                Some(i64::from(self.value) - 1)
            } else if key.is_increasing() {
                Some(i64::from(self.value) + 1)
            } else {
                None
            }
        } else if modifiers == Modifiers::CONTROL {
            if key.is_decreasing() {
                Some(i64::from(self.min))
            } else if key.is_increasing() {
                Some(i64::from(self.max))
            } else {
                None
            }
        } else {
            None
        };
        let Some(target) = target else {
            return SliderUpdate::default();
        };
        let update = self.assign(target);
        if update.changed.is_some() {
            self.pending_keyboard_commit = true;
        }
        update
    }

    /// Key released. Any arrow key settles a pending keyboard commit.
    pub fn key_released(&mut self, key: Key) -> SliderUpdate {
        if self.pending_keyboard_commit && key.is_directional() {
            self.pending_keyboard_commit = false;
            self.commit()
        } else {
            SliderUpdate::default()
        }
    }

    /// Focus acquired.
    pub fn focus_gained(&mut self) {
        self.focused = true;
    }

    /// Focus released; drops back to idle.
    pub fn focus_lost(&mut self) {
        self.focused = false;
        self.dragging = false;
    }

    /// Run one widget event through the state machine, requesting focus
    /// and emitting [`SliderChanged`] / [`SliderCommitted`] as needed.
    pub fn handle_event(&mut self, event: &Event, inside_drag_bounds: bool, ctx: &mut EventContext) {
        let update = match event {
            Event::MouseDown { .. } => {
                if self.mouse_down(inside_drag_bounds) {
                    ctx.request_focus();
                }
                SliderUpdate::default()
            }
            Event::MouseDrag { position, .. } => self.mouse_drag(*position),
            Event::MouseUp { .. } => self.mouse_up(),
            Event::Click { position, .. } => self.click(*position),
            Event::Scroll { amount, .. } => self.scroll(*amount),
            Event::KeyDown { key, modifiers, .. } => self.key_pressed(*key, *modifiers),
            Event::KeyUp { key, .. } => self.key_released(*key),
            Event::FocusGained => {
                self.focus_gained();
                SliderUpdate::default()
            }
            Event::FocusLost => {
                self.focus_lost();
                SliderUpdate::default()
            }
            Event::CharTyped { .. } => SliderUpdate::default(),
        };
        update.emit(ctx);
    }

    /// Run one tick and emit the resulting messages.
    pub fn handle_tick(&mut self, ctx: &mut EventContext) {
        self.tick().emit(ctx);
    }
}
