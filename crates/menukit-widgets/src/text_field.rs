//! Single-line text entry.

use menukit_core::{
    AccessibleRole, Canvas, Color, Event, EventContext, Key, PaintContext, Point, Size, TextStyle,
    Widget,
};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Default maximum text length, in characters.
pub const DEFAULT_MAX_LENGTH: usize = 32;

/// Message emitted on every edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChanged {
    /// The new text
    pub value: String,
}

/// Message emitted when an edit is finalized by losing focus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextCommitted {
    /// The committed text
    pub value: String,
}

/// Text field. Edits are committed when focus leaves it, which happens on
/// Enter, Escape, or a click anywhere else on the screen.
pub struct TextField {
    /// Current text
    value: String,
    /// Shown while empty
    placeholder: String,
    /// Maximum length in characters
    max_length: usize,
    /// Cursor position in characters
    cursor: usize,
    /// Whether the field holds focus
    focused: bool,
    /// Text at the last commit
    committed: String,
    text_color: Color,
    placeholder_color: Color,
    background_color: Color,
    border_color: Color,
    focus_border_color: Color,
    on_commit: Option<Box<dyn FnMut(&str)>>,
}

impl std::fmt::Debug for TextField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextField")
            .field("value", &self.value)
            .field("cursor", &self.cursor)
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}

impl Default for TextField {
    fn default() -> Self {
        Self::new()
    }
}

impl TextField {
    /// Create an empty text field.
    #[must_use]
    pub fn new() -> Self {
        Self {
            value: String::new(),
            placeholder: String::new(),
            max_length: DEFAULT_MAX_LENGTH,
            cursor: 0,
            focused: false,
            committed: String::new(),
            text_color: Color::from_rgb_u32(0xe0_e0_e0),
            placeholder_color: Color::from_rgb_u32(0x70_70_70),
            background_color: Color::BLACK,
            border_color: Color::from_rgb_u32(0xa0_a0_a0),
            focus_border_color: Color::WHITE,
            on_commit: None,
        }
    }

    /// Set the initial text. It counts as already committed.
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into().chars().take(self.max_length).collect();
        self.cursor = self.value.chars().count();
        self.committed.clone_from(&self.value);
        self
    }

    /// Set placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    /// Set the maximum length, truncating the current text.
    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = max;
        if self.value.chars().count() > max {
            let was_committed = self.committed == self.value;
            self.value = self.value.chars().take(max).collect();
            self.cursor = self.cursor.min(max);
            if was_committed {
                self.committed.clone_from(&self.value);
            }
        }
        self
    }

    /// Set the commit callback.
    #[must_use]
    pub fn on_commit(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.on_commit = Some(Box::new(callback));
        self
    }

    /// Set text and placeholder colors.
    #[must_use]
    pub const fn text_colors(mut self, text: Color, placeholder: Color) -> Self {
        self.text_color = text;
        self.placeholder_color = placeholder;
        self
    }

    /// Current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.value
    }

    /// Text at the last commit.
    #[must_use]
    pub fn committed_text(&self) -> &str {
        &self.committed
    }

    /// Cursor position in characters.
    #[must_use]
    pub const fn cursor_position(&self) -> usize {
        self.cursor
    }

    /// Whether the field holds focus.
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map_or(self.value.len(), |(i, _)| i)
    }

    fn insert(&mut self, ch: char) -> bool {
        if ch.is_control() || self.value.chars().count() >= self.max_length {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.value.insert(at, ch);
        self.cursor += 1;
        true
    }

    fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
        true
    }

    fn delete(&mut self) -> bool {
        if self.cursor >= self.value.chars().count() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
        true
    }

    fn commit(&mut self, ctx: &mut EventContext) {
        if self.value == self.committed {
            return;
        }
        self.committed.clone_from(&self.value);
        log::debug!("text field committed {:?}", self.value);
        if let Some(callback) = self.on_commit.as_mut() {
            callback(&self.value);
        }
        ctx.emit(TextCommitted {
            value: self.value.clone(),
        });
    }

    fn changed(&self, ctx: &mut EventContext) {
        ctx.emit(TextChanged {
            value: self.value.clone(),
        });
    }
}

impl Widget for TextField {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn preferred_size(&self) -> Size {
        Size::new(120, 20)
    }

    fn can_resize(&self) -> bool {
        true
    }

    fn can_focus(&self) -> bool {
        true
    }

    fn paint_background(&self, canvas: &mut dyn Canvas, ctx: &PaintContext) {
        canvas.fill_rect(ctx.bounds, self.background_color);
        let border = if ctx.focused {
            self.focus_border_color
        } else {
            self.border_color
        };
        canvas.stroke_rect(ctx.bounds, border, 1);

        let position = Point::new(ctx.bounds.x + 4, ctx.bounds.y + (ctx.bounds.height - 8) / 2);
        if self.value.is_empty() && !ctx.focused {
            canvas.draw_text(
                &self.placeholder,
                position,
                &TextStyle::colored(self.placeholder_color),
            );
            return;
        }
        let style = TextStyle::colored(self.text_color);
        canvas.draw_text(&self.value, position, &style);
        if ctx.focused {
            let before: String = self.value.chars().take(self.cursor).collect();
            let x = position.x + canvas.text_width(&before, &style);
            canvas.draw_text("_", Point::new(x, position.y), &style);
        }
    }

    fn event(&mut self, event: &Event, ctx: &mut EventContext) {
        match event {
            Event::MouseDown { .. } => ctx.request_focus(),
            Event::FocusGained => {
                self.focused = true;
                self.cursor = self.value.chars().count();
            }
            Event::FocusLost => {
                self.focused = false;
                self.commit(ctx);
            }
            Event::CharTyped { ch } if self.focused => {
                if self.insert(*ch) {
                    self.changed(ctx);
                }
            }
            Event::KeyDown { key, .. } if self.focused => match key {
                Key::Backspace => {
                    if self.backspace() {
                        self.changed(ctx);
                    }
                }
                Key::Delete => {
                    if self.delete() {
                        self.changed(ctx);
                    }
                }
                Key::Left => self.cursor = self.cursor.saturating_sub(1),
                Key::Right => self.cursor = (self.cursor + 1).min(self.value.chars().count()),
                Key::Home => self.cursor = 0,
                Key::End => self.cursor = self.value.chars().count(),
                Key::Enter | Key::Escape => ctx.release_focus(),
                _ => {}
            },
            _ => {}
        }
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::TextInput
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menukit_core::{FocusChange, Modifiers, RecordingCanvas, Rect, WidgetId};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn ctx() -> EventContext {
        EventContext::new(WidgetId::new(1), true)
    }

    fn key(key: Key) -> Event {
        Event::KeyDown {
            key,
            scan_code: 0,
            modifiers: Modifiers::empty(),
        }
    }

    fn focused(field: TextField) -> TextField {
        let mut field = field;
        field.event(&Event::FocusGained, &mut ctx());
        field
    }

    fn type_str(field: &mut TextField, text: &str, ctx: &mut EventContext) {
        for ch in text.chars() {
            field.event(&Event::CharTyped { ch }, ctx);
        }
    }

    #[test]
    fn test_typing_requires_focus() {
        let mut field = TextField::new();
        let mut ctx = ctx();
        type_str(&mut field, "abc", &mut ctx);
        assert_eq!(field.text(), "");
        assert!(ctx.messages().is_empty());
    }

    #[test]
    fn test_typing_and_editing() {
        let mut field = focused(TextField::new());
        let mut ctx = ctx();
        type_str(&mut field, "héllo", &mut ctx);
        assert_eq!(field.text(), "héllo");
        assert_eq!(ctx.messages().len(), 5);

        field.event(&key(Key::Home), &mut ctx);
        field.event(&key(Key::Right), &mut ctx);
        field.event(&key(Key::Delete), &mut ctx);
        assert_eq!(field.text(), "hllo");
        field.event(&key(Key::End), &mut ctx);
        field.event(&key(Key::Backspace), &mut ctx);
        assert_eq!(field.text(), "hll");
        assert_eq!(field.cursor_position(), 3);
    }

    #[test]
    fn test_max_length_and_control_chars() {
        let mut field = focused(TextField::new().max_length(3));
        let mut ctx = ctx();
        type_str(&mut field, "ab\ncde", &mut ctx);
        assert_eq!(field.text(), "abc");
    }

    #[test]
    fn test_max_length_truncates_committed_text() {
        let mut field = focused(TextField::new().value("abcdef").max_length(3));
        assert_eq!(field.text(), "abc");
        assert_eq!(field.committed_text(), "abc");
        let mut ctx = ctx();
        field.event(&Event::FocusLost, &mut ctx);
        assert!(ctx.messages().is_empty());
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut field = focused(TextField::new().value("x"));
        let mut ctx = ctx();
        field.event(&key(Key::Home), &mut ctx);
        field.event(&key(Key::Backspace), &mut ctx);
        assert_eq!(field.text(), "x");
        assert!(ctx.messages().is_empty());
    }

    #[test]
    fn test_focus_lost_commits_changed_text_once() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut field = focused(
            TextField::new()
                .value("seed")
                .on_commit(move |text| sink.borrow_mut().push(text.to_string())),
        );
        let mut ctx = ctx();
        field.event(&Event::FocusLost, &mut ctx);
        assert!(seen.borrow().is_empty());

        let mut field = focused(field);
        type_str(&mut field, "!", &mut ctx);
        let mut ctx = EventContext::new(WidgetId::new(1), true);
        field.event(&Event::FocusLost, &mut ctx);
        assert_eq!(*seen.borrow(), vec!["seed!".to_string()]);
        assert_eq!(
            ctx.messages()[0].downcast_ref::<TextCommitted>(),
            Some(&TextCommitted {
                value: "seed!".into()
            })
        );
        assert_eq!(field.committed_text(), "seed!");
        assert!(!field.is_focused());
    }

    #[test]
    fn test_enter_releases_focus() {
        let mut field = focused(TextField::new());
        let mut ctx = ctx();
        field.event(&key(Key::Enter), &mut ctx);
        assert_eq!(ctx.focus_change(), Some(FocusChange::Release));
    }

    #[test]
    fn test_paint_placeholder_when_empty() {
        let field = TextField::new().placeholder("Name");
        let mut canvas = RecordingCanvas::new();
        let ctx = PaintContext {
            bounds: Rect::new(0, 0, 100, 20),
            mouse: Point::ORIGIN,
            focused: false,
        };
        field.paint_background(&mut canvas, &ctx);
        assert_eq!(canvas.texts().collect::<Vec<_>>(), vec![("Name", Point::new(4, 6))]);
    }

    #[test]
    fn test_paint_cursor_when_focused() {
        let field = TextField::new().value("ab");
        let mut canvas = RecordingCanvas::new();
        let ctx = PaintContext {
            bounds: Rect::new(0, 0, 100, 20),
            mouse: Point::ORIGIN,
            focused: true,
        };
        field.paint_background(&mut canvas, &ctx);
        assert_eq!(
            canvas.texts().collect::<Vec<_>>(),
            vec![("ab", Point::new(4, 6)), ("_", Point::new(16, 6))]
        );
    }
}
