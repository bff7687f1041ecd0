//! Screen adapter: bridges host callbacks into a [`GuiDescription`].
//!
//! The host keeps its own screen object and forwards its callbacks to a
//! [`Screen`]. Default host behaviour (closing on Escape, drawing the world
//! behind the menu) stays behind the [`Host`] trait.

use menukit_core::{
    Canvas, Event, GuiDescription, Key, Modifiers, MouseButton, PaintPass, Point, Size, TextStyle,
    WidgetId, WidgetMessage,
};

/// Default behaviour of the host screen.
///
/// Every method has a no-op default, so a host only overrides what it has.
pub trait Host {
    /// Screen opened or resized to `width` x `height`.
    fn init(&mut self, _width: i32, _height: i32) {}

    /// Draw whatever sits behind the widget tree.
    fn render_background(&mut self, _canvas: &mut dyn Canvas, _mouse: Point, _partial_ticks: f32) {}

    /// Default click handling. Returns whether the host consumed it.
    fn mouse_clicked(&mut self, _x: f64, _y: f64, _button: MouseButton) -> bool {
        false
    }

    /// Default release handling.
    fn mouse_released(&mut self, _x: f64, _y: f64, _button: MouseButton) -> bool {
        false
    }

    /// Default drag handling.
    fn mouse_dragged(&mut self, _x: f64, _y: f64, _button: MouseButton, _dx: f64, _dy: f64) -> bool {
        false
    }

    /// Default scroll handling.
    fn mouse_scrolled(&mut self, _x: f64, _y: f64, _amount: f64) -> bool {
        false
    }

    /// Default key handling, e.g. closing the screen. Runs before widgets.
    fn key_pressed(&mut self, _key: Key, _scan_code: i32, _modifiers: Modifiers) -> bool {
        false
    }
}

/// Host with no default behaviour.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHost;

impl Host for NullHost {}

/// A menu screen: a widget tree centered on the host screen.
#[derive(Debug)]
pub struct Screen<H: Host> {
    host: H,
    description: GuiDescription,
    title: Option<String>,
    left: i32,
    top: i32,
    /// Root panel size at the last reposition
    container: Size,
    /// Widget receiving the current press, until release
    last_responder: Option<WidgetId>,
}

impl Screen<NullHost> {
    /// Screen without host behaviour.
    #[must_use]
    pub fn standalone(description: GuiDescription) -> Self {
        Self::new(description, NullHost)
    }
}

impl<H: Host> Screen<H> {
    /// Wrap a description. Call [`init`](Self::init) before use.
    pub fn new(description: GuiDescription, host: H) -> Self {
        Self {
            host,
            description,
            title: None,
            left: 0,
            top: 0,
            container: Size::ZERO,
            last_responder: None,
        }
    }

    /// Set the title drawn at the panel's top-left corner.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Screen title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The host.
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The description.
    pub const fn description(&self) -> &GuiDescription {
        &self.description
    }

    /// Mutable description.
    pub fn description_mut(&mut self) -> &mut GuiDescription {
        &mut self.description
    }

    /// Horizontal offset of the container on screen.
    pub const fn left(&self) -> i32 {
        self.left
    }

    /// Vertical offset of the container on screen.
    pub const fn top(&self) -> i32 {
        self.top
    }

    /// Container size at the last reposition.
    pub const fn container_size(&self) -> Size {
        self.container
    }

    /// Widget receiving the current press, if any.
    pub const fn last_responder(&self) -> Option<WidgetId> {
        self.last_responder
    }

    /// Screen opened.
    pub fn init(&mut self, width: i32, height: i32) {
        self.host.init(width, height);
        self.description.add_painters();
        self.reposition(width, height);
    }

    /// Host window resized.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.host.init(width, height);
        self.reposition(width, height);
    }

    /// Center the root panel. No-op without one.
    pub fn reposition(&mut self, width: i32, height: i32) {
        let Some(size) = self
            .description
            .root_panel()
            .and_then(|root| self.description.tree().size(root))
        else {
            return;
        };
        self.left = (width - size.width) / 2;
        self.top = (height - size.height) / 2;
        self.container = size;
        log::trace!("container {size:?} at ({}, {})", self.left, self.top);
    }

    fn offset(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Host coordinates to container coordinates.
    fn to_container(&self, x: f64, y: f64) -> Point {
        Point::from_host(x, y).saturating_sub(self.offset())
    }

    /// `point` in container coordinates, made local to `id`.
    fn to_local(&self, id: WidgetId, point: Point) -> Point {
        let origin = self.description.tree().absolute_position(id).unwrap_or_default();
        point.saturating_sub(origin)
    }

    /// Draw one frame.
    pub fn render(&mut self, canvas: &mut dyn Canvas, mouse_x: f64, mouse_y: f64, partial_ticks: f32) {
        let mouse = Point::from_host(mouse_x, mouse_y);
        self.host.render_background(canvas, mouse, partial_ticks);

        if let Some(root) = self.description.root_panel() {
            let offset = self.offset();
            let local = mouse.saturating_sub(offset);
            let focus = self.description.focus();
            let tree = self.description.tree();
            tree.paint(canvas, PaintPass::Background, root, offset, local, focus);
            tree.paint(canvas, PaintPass::Foreground, root, offset, local, focus);
        }

        if let Some(title) = &self.title {
            let style = TextStyle::colored(self.description.title_color());
            canvas.draw_text(title, self.offset(), &style);
        }
    }

    /// Advance every widget by one game tick.
    pub fn tick(&mut self) {
        self.description.tick();
    }

    /// Button pressed.
    ///
    /// A click outside the focused widget releases focus first. Inside the
    /// container, the widget under the pointer becomes the responder for
    /// this press and receives `MouseDown`.
    pub fn mouse_clicked(&mut self, x: f64, y: f64, button: MouseButton) -> bool {
        let Some(root) = self.description.root_panel() else {
            return self.host.mouse_clicked(x, y, button);
        };
        let point = self.to_container(x, y);

        if let Some(focus) = self.description.focus() {
            let inside = self
                .description
                .tree()
                .absolute_bounds(focus)
                .is_some_and(|bounds| bounds.contains_point(point));
            if !inside {
                self.description.release_focus(focus);
            }
        }

        self.host.mouse_clicked(x, y, button);

        if !self.container.contains(point) {
            return true;
        }
        if self.last_responder.is_some() {
            // A press is already in progress; drag handling owns it.
            return true;
        }
        let press = Event::MouseDown {
            position: point,
            button,
        };
        self.last_responder = self.description.route(root, &press);
        if let Some(target) = self.last_responder {
            log::debug!("responder {target} captured");
        }
        true
    }

    /// Button released. The responder gets `MouseUp`, plus `Click` if the
    /// pointer is still inside the container.
    pub fn mouse_released(&mut self, x: f64, y: f64, button: MouseButton) -> bool {
        let Some(root) = self.description.root_panel() else {
            return self.host.mouse_released(x, y, button);
        };
        self.host.mouse_released(x, y, button);
        let point = self.to_container(x, y);

        if let Some(responder) = self.last_responder.take() {
            let position = self.to_local(responder, point);
            self.description
                .dispatch(responder, &Event::MouseUp { position, button });
            if self.container.contains(point) {
                self.description
                    .dispatch(responder, &Event::Click { position, button });
            }
            log::debug!("responder {responder} released");
        } else {
            self.description.dispatch(
                root,
                &Event::MouseUp {
                    position: point,
                    button,
                },
            );
        }
        true
    }

    /// Pointer moved with a button held. Once a press has a responder, drags
    /// reach it anywhere on screen.
    pub fn mouse_dragged(&mut self, x: f64, y: f64, button: MouseButton, dx: f64, dy: f64) -> bool {
        let Some(root) = self.description.root_panel() else {
            return self.host.mouse_dragged(x, y, button, dx, dy);
        };
        self.host.mouse_dragged(x, y, button, dx, dy);
        let point = self.to_container(x, y);

        if let Some(responder) = self.last_responder {
            let position = self.to_local(responder, point);
            self.description
                .dispatch(responder, &Event::MouseDrag { position, button });
        } else if self.container.contains(point) {
            self.description.dispatch(
                root,
                &Event::MouseDrag {
                    position: point,
                    button,
                },
            );
        }
        true
    }

    /// Wheel scrolled. Goes to the widget under the pointer; over nothing it
    /// falls back to the host.
    pub fn mouse_scrolled(&mut self, x: f64, y: f64, amount: f64) -> bool {
        let Some(root) = self.description.root_panel() else {
            return self.host.mouse_scrolled(x, y, amount);
        };
        let point = self.to_container(x, y);
        match self.description.tree().hit(root, point) {
            Some(target) => {
                let position = self.to_local(target, point);
                self.description
                    .dispatch(target, &Event::Scroll { position, amount });
                true
            }
            None => {
                log::trace!("scroll at {point:?} hit nothing");
                self.host.mouse_scrolled(x, y, amount)
            }
        }
    }

    /// Character typed. Returns false when nothing holds focus.
    pub fn char_typed(&mut self, ch: char) -> bool {
        self.to_focus(&Event::CharTyped { ch })
    }

    /// Key pressed. Host key handling runs first.
    pub fn key_pressed(&mut self, key: Key, scan_code: i32, modifiers: Modifiers) -> bool {
        if self.host.key_pressed(key, scan_code, modifiers) {
            return true;
        }
        self.to_focus(&Event::KeyDown {
            key,
            scan_code,
            modifiers,
        })
    }

    /// Key released. Returns false when nothing holds focus.
    pub fn key_released(&mut self, key: Key, scan_code: i32, modifiers: Modifiers) -> bool {
        self.to_focus(&Event::KeyUp {
            key,
            scan_code,
            modifiers,
        })
    }

    fn to_focus(&mut self, event: &Event) -> bool {
        match self.description.focus() {
            Some(focus) => self.description.dispatch(focus, event),
            None => false,
        }
    }

    /// Drain messages widgets emitted since the last call.
    pub fn take_messages(&mut self) -> Vec<WidgetMessage> {
        self.description.take_messages()
    }
}
