//! Push button.

use menukit_core::{
    AccessibleRole, Canvas, Color, Event, EventContext, Key, MouseButton, PaintContext, Point,
    Size, TextStyle, Widget,
};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Message emitted when a button is activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonClicked;

/// Button with a centered label.
pub struct Button {
    /// Button label
    label: String,
    /// Whether the button reacts to input
    enabled: bool,
    /// Background color (normal state)
    background: Color,
    /// Background color (hover state)
    background_hover: Color,
    /// Background color (pressed or disabled state)
    background_pressed: Color,
    /// Text color
    text_color: Color,
    /// Activation callback
    on_click: Option<Box<dyn FnMut()>>,
    /// Current pressed state
    pressed: bool,
}

impl std::fmt::Debug for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Button")
            .field("label", &self.label)
            .field("enabled", &self.enabled)
            .field("pressed", &self.pressed)
            .finish_non_exhaustive()
    }
}

impl Button {
    /// Create a button with a label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            enabled: true,
            background: Color::from_rgb_u32(0x6f_6f_6f),
            background_hover: Color::from_rgb_u32(0x7f_89_c6),
            background_pressed: Color::from_rgb_u32(0x2c_2c_2c),
            text_color: Color::from_rgb_u32(0xe0_e0_e0),
            on_click: None,
            pressed: false,
        }
    }

    /// Set the activation callback.
    #[must_use]
    pub fn on_click(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_click = Some(Box::new(callback));
        self
    }

    /// Enable or disable the button.
    #[must_use]
    pub const fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set background colors for normal, hover and pressed states.
    #[must_use]
    pub const fn backgrounds(mut self, normal: Color, hover: Color, pressed: Color) -> Self {
        self.background = normal;
        self.background_hover = hover;
        self.background_pressed = pressed;
        self
    }

    /// Set text color.
    #[must_use]
    pub const fn text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    /// Label text.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the button is held down.
    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        self.pressed
    }

    fn activate(&mut self, ctx: &mut EventContext) {
        if let Some(callback) = self.on_click.as_mut() {
            callback();
        }
        ctx.emit(ButtonClicked);
    }

    fn current_background(&self, hovered: bool) -> Color {
        if !self.enabled || self.pressed {
            self.background_pressed
        } else if hovered {
            self.background_hover
        } else {
            self.background
        }
    }
}

impl Widget for Button {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn preferred_size(&self) -> Size {
        Size::new(self.label.chars().count() as i32 * 6 + 16, 20)
    }

    fn can_resize(&self) -> bool {
        true
    }

    fn can_focus(&self) -> bool {
        self.enabled
    }

    fn paint_background(&self, canvas: &mut dyn Canvas, ctx: &PaintContext) {
        canvas.fill_rect(ctx.bounds, self.current_background(ctx.hovered()));
        let border = if ctx.focused {
            Color::WHITE
        } else {
            Color::BLACK
        };
        canvas.stroke_rect(ctx.bounds, border, 1);

        let style = TextStyle {
            color: self.text_color,
            shadow: true,
        };
        let width = canvas.text_width(&self.label, &style);
        let position = Point::new(
            ctx.bounds.x + (ctx.bounds.width - width) / 2,
            ctx.bounds.y + (ctx.bounds.height - 8) / 2,
        );
        canvas.draw_text(&self.label, position, &style);
    }

    fn event(&mut self, event: &Event, ctx: &mut EventContext) {
        if !self.enabled {
            return;
        }
        match event {
            Event::MouseDown {
                button: MouseButton::Left,
                ..
            } => {
                self.pressed = true;
                ctx.request_focus();
            }
            Event::MouseUp { .. } => self.pressed = false,
            Event::Click {
                button: MouseButton::Left,
                ..
            } => self.activate(ctx),
            Event::KeyDown {
                key: Key::Enter, ..
            } => self.pressed = true,
            Event::KeyUp {
                key: Key::Enter, ..
            } if self.pressed => {
                self.pressed = false;
                self.activate(ctx);
            }
            Event::FocusLost => self.pressed = false,
            _ => {}
        }
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Button
    }
}
