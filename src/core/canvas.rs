use crate::ui::color::Color;
use cgmath::Vector2;

/// Integer pixel coordinate on the host canvas, origin at top-left.
pub type ScreenPoint = Vector2<i32>;

/// The slice of the host's drawing surface the overlay needs.
///
/// A canvas is only valid for the duration of the draw callback that handed
/// it out; nothing in this crate keeps one past that call.
pub trait Canvas {
    fn size(&self) -> ScreenPoint;
    fn set_color(&mut self, color: Color);
    fn set_position(&mut self, pos: ScreenPoint);
    /// Filled rectangle at the current position.
    fn fill_box(&mut self, size: ScreenPoint);
    /// Rectangle outline at the current position.
    fn draw_box(&mut self, size: ScreenPoint, width: f32);
    fn draw_line(&mut self, start: ScreenPoint, end: ScreenPoint, width: f32);
    /// Text at the current position.
    fn draw_string(&mut self, text: &str);
    fn string_size(&self, text: &str) -> Vector2<f32>;
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    FillBox { pos: ScreenPoint, size: ScreenPoint, color: Color },
    DrawBox { pos: ScreenPoint, size: ScreenPoint, width: f32, color: Color },
    Line { start: ScreenPoint, end: ScreenPoint, width: f32, color: Color },
    Text { pos: ScreenPoint, text: String, color: Color },
}

/// Canvas that stores every call instead of rasterizing.
///
/// Text is measured as a fixed-width font so layout stays deterministic.
#[derive(Clone, Debug)]
pub struct RecordingCanvas {
    size: ScreenPoint,
    color: Color,
    position: ScreenPoint,
    pub calls: Vec<DrawCall>,
}

pub const RECORDING_GLYPH_WIDTH: f32 = 7.0;
pub const RECORDING_GLYPH_HEIGHT: f32 = 12.0;

impl RecordingCanvas {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            size: Vector2::new(width, height),
            color: Color::default(),
            position: Vector2::new(0, 0),
            calls: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn fills(&self) -> impl Iterator<Item = (&ScreenPoint, &ScreenPoint, &Color)> {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::FillBox { pos, size, color } => Some((pos, size, color)),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = (&ScreenPoint, &ScreenPoint, f32, &Color)> {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Line { start, end, width, color } => Some((start, end, *width, color)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn has_text_containing(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> ScreenPoint {
        self.size
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn set_position(&mut self, pos: ScreenPoint) {
        self.position = pos;
    }

    fn fill_box(&mut self, size: ScreenPoint) {
        self.calls.push(DrawCall::FillBox { pos: self.position, size, color: self.color });
    }

    fn draw_box(&mut self, size: ScreenPoint, width: f32) {
        self.calls.push(DrawCall::DrawBox { pos: self.position, size, width, color: self.color });
    }

    fn draw_line(&mut self, start: ScreenPoint, end: ScreenPoint, width: f32) {
        self.calls.push(DrawCall::Line { start, end, width, color: self.color });
    }

    fn draw_string(&mut self, text: &str) {
        self.calls.push(DrawCall::Text { pos: self.position, text: text.to_string(), color: self.color });
    }

    fn string_size(&self, text: &str) -> Vector2<f32> {
        Vector2::new(text.chars().count() as f32 * RECORDING_GLYPH_WIDTH, RECORDING_GLYPH_HEIGHT)
    }
}
