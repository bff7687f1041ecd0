//! GUI description: the widget tree of one screen plus its focus state.

use crate::color::Color;
use crate::event::Event;
use crate::style::Style;
use crate::tree::WidgetTree;
use crate::widget::{EventContext, FocusChange, WidgetId};
use std::any::Any;

/// Message emitted by a widget during dispatch.
pub struct WidgetMessage {
    /// Widget that emitted it
    pub source: WidgetId,
    /// Payload, e.g. a `SliderChanged`
    pub payload: Box<dyn Any>,
}

impl WidgetMessage {
    /// Borrow the payload as a concrete type.
    #[must_use]
    pub fn downcast_ref<M: Any>(&self) -> Option<&M> {
        self.payload.downcast_ref()
    }

    /// Check the payload type.
    #[must_use]
    pub fn is<M: Any>(&self) -> bool {
        self.payload.is::<M>()
    }
}

impl std::fmt::Debug for WidgetMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetMessage")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Owns the widget tree of a screen, its root panel and keyboard focus.
#[derive(Debug, Default)]
pub struct GuiDescription {
    tree: WidgetTree,
    root: Option<WidgetId>,
    focus: Option<WidgetId>,
    style: Style,
    messages: Vec<WidgetMessage>,
}

impl GuiDescription {
    /// Create an empty description with the default style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty description with a style.
    #[must_use]
    pub fn with_style(style: Style) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    /// The widget tree.
    #[must_use]
    pub const fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    /// Mutable widget tree.
    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    /// Screen style.
    #[must_use]
    pub const fn style(&self) -> &Style {
        &self.style
    }

    /// Choose the root panel. Unknown ids are ignored.
    pub fn set_root_panel(&mut self, root: WidgetId) {
        if self.tree.contains(root) {
            self.root = Some(root);
        } else {
            log::warn!("root panel {root} is not in the tree");
        }
    }

    /// Root panel of the tree, if one was chosen.
    #[must_use]
    pub const fn root_panel(&self) -> Option<WidgetId> {
        self.root
    }

    /// Color the screen title is drawn in.
    #[must_use]
    pub const fn title_color(&self) -> Color {
        self.style.title_color
    }

    /// Offer the style's background painter to the root panel.
    pub fn add_painters(&mut self) {
        if self.style.fullscreen {
            return;
        }
        let painter = self.style.panel_background;
        if let Some(root) = self.root.and_then(|id| self.tree.widget_mut(id)) {
            let accepted = root.set_background_painter(&painter);
            log::trace!("root panel painter offered, accepted: {accepted}");
        }
    }

    /// Currently focused widget.
    #[must_use]
    pub const fn focus(&self) -> Option<WidgetId> {
        self.focus
    }

    /// Whether `id` holds focus.
    #[must_use]
    pub fn is_focused(&self, id: WidgetId) -> bool {
        self.focus == Some(id)
    }

    /// Move focus to `id`. The previous holder gets `FocusLost` first.
    ///
    /// Returns false if the widget cannot take focus.
    pub fn request_focus(&mut self, id: WidgetId) -> bool {
        if self.focus == Some(id) {
            return true;
        }
        if !self.tree.widget(id).is_some_and(|w| w.can_focus()) {
            return false;
        }
        let previous = self.focus.replace(id);
        log::debug!("focus {previous:?} -> {id}");
        if let Some(previous) = previous {
            self.dispatch(previous, &Event::FocusLost);
        }
        self.dispatch(id, &Event::FocusGained);
        true
    }

    /// Clear focus if `id` holds it, letting the widget finalize its state.
    pub fn release_focus(&mut self, id: WidgetId) {
        if self.focus == Some(id) {
            self.focus = None;
            log::debug!("focus released by {id}");
            self.dispatch(id, &Event::FocusLost);
        }
    }

    /// Deliver an event to one widget. Pointer positions must already be
    /// local to it.
    ///
    /// Returns false if `id` is not in the tree.
    pub fn dispatch(&mut self, id: WidgetId, event: &Event) -> bool {
        let mut ctx = EventContext::new(id, self.focus == Some(id));
        let Some(widget) = self.tree.widget_mut(id) else {
            log::warn!("dispatch to unknown widget {id}");
            return false;
        };
        log::trace!("dispatch {event:?} to {id}");
        widget.event(event, &mut ctx);
        self.finish(ctx);
        true
    }

    /// Deliver a pointer event given in `container`'s local coordinates to
    /// the deepest widget under it, falling back to `container` itself.
    ///
    /// Returns the widget that received it.
    pub fn route(&mut self, container: WidgetId, event: &Event) -> Option<WidgetId> {
        let point = event.position()?;
        let target = self.tree.hit(container, point).unwrap_or(container);
        let offset = self.tree.absolute_position(target)? - self.tree.absolute_position(container)?;
        self.dispatch(target, &event.offset_by(-offset))
            .then_some(target)
    }

    /// Tick every widget once.
    pub fn tick(&mut self) {
        let ids: Vec<WidgetId> = self.tree.ids().collect();
        for id in ids {
            let mut ctx = EventContext::new(id, self.focus == Some(id));
            if let Some(widget) = self.tree.widget_mut(id) {
                widget.tick(&mut ctx);
            }
            self.finish(ctx);
        }
    }

    /// Drain messages emitted since the last call.
    pub fn take_messages(&mut self) -> Vec<WidgetMessage> {
        std::mem::take(&mut self.messages)
    }

    fn finish(&mut self, ctx: EventContext) {
        let (id, focus_change, messages) = ctx.into_parts();
        self.messages
            .extend(messages.into_iter().map(|payload| WidgetMessage {
                source: id,
                payload,
            }));
        match focus_change {
            Some(FocusChange::Request) => {
                self.request_focus(id);
            }
            Some(FocusChange::Release) => self.release_focus(id),
            None => {}
        }
    }
}
