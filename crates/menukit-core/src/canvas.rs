//! Canvas implementations for rendering.

use crate::widget::{Canvas, TextStyle};
use crate::{Color, Point, Rect};
use serde::{Deserialize, Serialize};

/// A single recorded draw operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Filled rectangle
    FillRect {
        /// Area
        rect: Rect,
        /// Fill color
        color: Color,
    },
    /// Rectangle outline
    StrokeRect {
        /// Area
        rect: Rect,
        /// Stroke color
        color: Color,
        /// Stroke width
        width: i32,
    },
    /// Text run
    Text {
        /// Content
        text: String,
        /// Top-left corner
        position: Point,
        /// Style
        style: TextStyle,
    },
}

/// A Canvas implementation that records draw operations as `DrawCommand`s.
///
/// This is useful for:
/// - Testing (verify what was painted)
/// - Hosts that replay commands on their own render thread
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    /// Create a new empty recording canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the recorded draw commands.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take ownership of the recorded commands, clearing the canvas.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Get the number of recorded commands.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Check if no commands have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Recorded text runs, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = (&str, Point)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, position, .. } => Some((text.as_str(), *position)),
            _ => None,
        })
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: i32) {
        self.commands
            .push(DrawCommand::StrokeRect { rect, color, width });
    }

    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            style: *style,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_canvas_records_in_order() {
        let mut canvas = RecordingCanvas::new();
        assert!(canvas.is_empty());

        canvas.fill_rect(Rect::new(0, 0, 10, 10), Color::WHITE);
        canvas.draw_text("hi", Point::new(1, 2), &TextStyle::default());
        canvas.stroke_rect(Rect::new(0, 0, 10, 10), Color::BLACK, 1);

        assert_eq!(canvas.command_count(), 3);
        assert!(matches!(canvas.commands()[0], DrawCommand::FillRect { .. }));
        assert!(matches!(canvas.commands()[2], DrawCommand::StrokeRect { width: 1, .. }));
        assert_eq!(canvas.texts().collect::<Vec<_>>(), vec![("hi", Point::new(1, 2))]);
    }

    #[test]
    fn test_take_commands_clears() {
        let mut canvas = RecordingCanvas::new();
        canvas.fill_rect(Rect::default(), Color::BLACK);
        let taken = canvas.take_commands();
        assert_eq!(taken.len(), 1);
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_default_text_width_is_monospace() {
        let canvas = RecordingCanvas::new();
        assert_eq!(canvas.text_width("abc", &TextStyle::default()), 18);
    }
}
