use crate::config::{METER_BORDER_WIDTH, METER_OPACITY};
use crate::core::canvas::{Canvas, ScreenPoint};
use crate::core::host::CameraPose;
use crate::core::input::CarSample;
use crate::game::attempt::Attempt;
use crate::game::tunables::Tunables;
use crate::ui::color::{self, Color};
use crate::ui::meter::{LineStyle, MeterSpec};
use cgmath::Vector2;

pub mod angle_meter;
pub mod car_axes;
pub mod first_jump_meter;
pub mod flip_cancel_meter;
pub mod position_meter;

/// What one overlay frame reads. Everything is borrowed for the duration of
/// the draw callback only.
pub struct Frame<'a> {
    pub attempt: &'a Attempt,
    pub tunables: &'a Tunables,
    pub camera: Option<&'a CameraPose>,
    pub car: Option<&'a CarSample>,
    pub game_speed: Option<f32>,
}

/// Draws every enabled meter, then the car axes.
pub fn render_meters(canvas: &mut dyn Canvas, frame: &Frame<'_>) {
    let t = frame.tunables;
    if t.show_angle_meter {
        angle_meter::render(canvas, frame.attempt, t);
    }
    if t.show_position_meter {
        position_meter::render(canvas, frame.attempt, frame.game_speed);
    }
    if t.show_flip_meter {
        flip_cancel_meter::render(canvas, frame.attempt, t);
    }
    if t.show_jump_meter {
        first_jump_meter::render(canvas, frame.attempt, t);
    }
    if t.show_car_axes {
        car_axes::render(canvas, frame.camera, frame.car, t.axis_length as f32);
    }
}

// --- Shared helpers ---

/// White meter with a white border, the look every gauge shares.
pub(crate) fn base_spec(total_units: i32, vertical: bool) -> MeterSpec {
    let white = color::WHITE.with_opacity(METER_OPACITY);
    MeterSpec::new(total_units, vertical, white, LineStyle::new(white, METER_BORDER_WIDTH))
}

/// Meter size and top-left from screen-relative ratios.
#[inline(always)]
pub(crate) fn scaled(screen: ScreenPoint, w_ratio: f32, h_ratio: f32) -> ScreenPoint {
    Vector2::new((screen.x as f32 * w_ratio) as i32, (screen.y as f32 * h_ratio) as i32)
}

pub(crate) fn draw_text(canvas: &mut dyn Canvas, pos: ScreenPoint, color: Color, text: &str) {
    canvas.set_color(color);
    canvas.set_position(pos);
    canvas.draw_string(text);
}

#[inline(always)]
pub(crate) fn text_size(canvas: &dyn Canvas, text: &str) -> ScreenPoint {
    let s = canvas.string_size(text);
    Vector2::new(s.x as i32, s.y as i32)
}

/// Text horizontally centered on `center_x`, top at `y`.
pub(crate) fn draw_text_centered(canvas: &mut dyn Canvas, center_x: i32, y: i32, color: Color, text: &str) {
    let size = text_size(canvas, text);
    draw_text(canvas, Vector2::new(center_x - size.x / 2, y), color, text);
}

/// Text whose right edge sits `margin` pixels left of `right_x`.
pub(crate) fn draw_text_right(canvas: &mut dyn Canvas, right_x: i32, y: i32, margin: i32, color: Color, text: &str) {
    let size = text_size(canvas, text);
    draw_text(canvas, Vector2::new(right_x - size.x - margin, y), color, text);
}

/// Clamps a meter reading into `[0, total]`. `None` stays `None`, and an
/// empty scale has no reading to show.
#[inline(always)]
pub(crate) fn clamp_reading(value: Option<f32>, total_units: i32) -> Option<f32> {
    if total_units <= 0 {
        return None;
    }
    value.map(|v| v.clamp(0.0, total_units as f32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::canvas::RecordingCanvas;
    use crate::core::input::Rotator;
    use crate::game::attempt::Dodge;
    use cgmath::Vector3;

    #[test]
    fn toggles_select_what_is_drawn() {
        let attempt = Attempt { dodge: Some(Dodge { tick: 60, angle: -27 }), ..Attempt::default() };
        let camera = CameraPose { location: Vector3::new(-500.0, 0.0, 100.0), rotation: Rotator::default(), fov_deg: 90.0 };
        let car = CarSample::grounded_at(Vector3::new(0.0, 0.0, 17.0));

        let all = Tunables::default();
        let mut canvas = RecordingCanvas::new(1920, 1080);
        render_meters(
            &mut canvas,
            &Frame { attempt: &attempt, tunables: &all, camera: Some(&camera), car: Some(&car), game_speed: Some(1.0) },
        );
        assert!(canvas.has_text_containing("Dodge Angle: -27 DEG"));
        assert!(canvas.has_text_containing("Game Speed: 100%"));
        assert!(canvas.has_text_containing("Flip Cancel"));
        assert!(canvas.has_text_containing("First Jump"));
        assert!(canvas.lines().count() > 0);

        let none = Tunables {
            show_angle_meter: false,
            show_position_meter: false,
            show_flip_meter: false,
            show_jump_meter: false,
            show_car_axes: false,
            ..Tunables::default()
        };
        let mut canvas = RecordingCanvas::new(1920, 1080);
        render_meters(
            &mut canvas,
            &Frame { attempt: &attempt, tunables: &none, camera: Some(&camera), car: Some(&car), game_speed: Some(1.0) },
        );
        assert!(canvas.calls.is_empty());
    }

    #[test]
    fn readings_on_an_empty_scale_are_dropped() {
        assert_eq!(clamp_reading(Some(3.0), 10), Some(3.0));
        assert_eq!(clamp_reading(Some(-1.0), 10), Some(0.0));
        assert_eq!(clamp_reading(Some(3.0), 0), None);
        assert_eq!(clamp_reading(Some(3.0), -6), None);
    }

    #[test]
    fn text_alignment_helpers() {
        let mut canvas = RecordingCanvas::new(800, 600);
        draw_text_centered(&mut canvas, 100, 10, color::WHITE, "abcd"); // 28px wide
        draw_text_right(&mut canvas, 300, 20, 5, color::WHITE, "ab"); // 14px wide
        let positions: Vec<ScreenPoint> = canvas
            .calls
            .iter()
            .filter_map(|c| match c {
                crate::core::canvas::DrawCall::Text { pos, .. } => Some(*pos),
                _ => None,
            })
            .collect();
        assert_eq!(positions, vec![Vector2::new(86, 10), Vector2::new(281, 20)]);
    }
}
