use crate::config::{
    ANGLE_GREEN_HALF_WIDTH, ANGLE_METER_CENTER, ANGLE_METER_HEIGHT_RATIO, ANGLE_METER_TOP_RATIO,
    ANGLE_METER_UNITS, ANGLE_METER_WIDTH_RATIO, ANGLE_YELLOW_HALF_WIDTH, METER_MARKING_WIDTH, METER_OPACITY,
    TEXT_LINE_HEIGHT_PX,
};
use crate::core::canvas::{Canvas, ScreenPoint};
use crate::game::attempt::Attempt;
use crate::game::judgment::grade_path_length;
use crate::game::tunables::Tunables;
use crate::ui::color::{self, quality_text_color};
use crate::ui::components::{base_spec, clamp_reading, draw_text, draw_text_centered, draw_text_right, scaled};
use crate::ui::meter::{render_meter, MeterSpec};
use cgmath::Vector2;

const HEADLINE_OFFSET_PX: i32 = 20;
const BELOW_GAP_PX: i32 = 5;

/// Degrees `[-90, 90]` on a horizontal meter `[0, 180]`, with a green and a
/// yellow band around each optimal angle.
pub fn spec(attempt: &Attempt, tunables: &Tunables) -> MeterSpec {
    let (green, yellow) = (ANGLE_GREEN_HALF_WIDTH, ANGLE_YELLOW_HALF_WIDTH);
    let left = tunables.optimal_left_angle + ANGLE_METER_CENTER;
    let right = tunables.optimal_right_angle + ANGLE_METER_CENTER;
    let mark = color::MARKING_GREY.with_opacity(METER_OPACITY);

    let mut spec = base_spec(ANGLE_METER_UNITS, false);
    for target in [left, right] {
        spec = spec
            .marking(mark, METER_MARKING_WIDTH, target - green)
            .marking(mark, METER_MARKING_WIDTH, target + green)
            .range(color::ZONE_GREEN, target - green, target + green)
            .range(color::ZONE_YELLOW, target - yellow, target - green)
            .range(color::ZONE_YELLOW, target + green, target + yellow);
    }

    spec = spec
        .range(color::ZONE_RED, 0, (left - yellow).min(right - yellow))
        .range(color::ZONE_RED, (left + yellow).max(right + yellow), ANGLE_METER_UNITS);
    if left + yellow < right - yellow {
        spec = spec.range(color::ZONE_RED, left + yellow, right - yellow);
    }

    let reading = attempt.dodge.map(|d| (d.angle + ANGLE_METER_CENTER) as f32);
    spec.current(clamp_reading(reading, ANGLE_METER_UNITS))
}

pub fn layout(screen: ScreenPoint) -> (ScreenPoint, ScreenPoint) {
    let size = scaled(screen, ANGLE_METER_WIDTH_RATIO, ANGLE_METER_HEIGHT_RATIO);
    let start = Vector2::new(screen.x / 2 - size.x / 2, (screen.y as f32 * ANGLE_METER_TOP_RATIO) as i32);
    (start, size)
}

pub fn render(canvas: &mut dyn Canvas, attempt: &Attempt, tunables: &Tunables) {
    let (start, size) = layout(canvas.size());
    render_meter(canvas, start, size, &spec(attempt, tunables));

    let white = color::WHITE.with_opacity(METER_OPACITY);
    let headline_y = start.y - HEADLINE_OFFSET_PX;

    let angle = match attempt.dodge {
        Some(d) => d.angle.to_string(),
        None => "N/A".to_string(),
    };
    draw_text(canvas, Vector2::new(start.x, headline_y), white, &format!("Dodge Angle: {} DEG", angle));

    if let (Some(ticks), Some(secs)) = (attempt.ticks_to_ball(), attempt.time_to_ball()) {
        if ticks > 0 {
            let msg = format!("Time to Ball: {:.3}s", secs);
            draw_text_centered(canvas, start.x + size.x / 2, headline_y, white, &msg);
        }
    }

    let distance = attempt.total_distance_traveled;
    let dist_color = quality_text_color(grade_path_length(distance)).with_opacity(METER_OPACITY);
    draw_text_right(canvas, start.x + size.x, headline_y, 5, dist_color, &format!("Path Length: {:.0}uu", distance));

    let warn = color::WARNING_RED.with_opacity(METER_OPACITY);
    let mut y = start.y + size.y + BELOW_GAP_PX;
    if attempt.started_in_air {
        draw_text(canvas, Vector2::new(start.x, y), warn, "WARNING: Started in air!");
        y += TEXT_LINE_HEIGHT_PX;
    }
    if attempt.started_no_boost {
        draw_text(canvas, Vector2::new(start.x, y), warn, "WARNING: Started without boost!");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::canvas::{DrawCall, RecordingCanvas};
    use crate::game::attempt::{Dodge, Outcome};

    #[test]
    fn bands_surround_both_targets() {
        let s = spec(&Attempt::default(), &Tunables::default());
        let greens: Vec<(i32, i32)> =
            s.ranges.iter().filter(|r| r.color == color::ZONE_GREEN).map(|r| (r.low, r.high)).collect();
        assert_eq!(greens, vec![(52, 68), (112, 128)]);
        let reds: Vec<(i32, i32)> =
            s.ranges.iter().filter(|r| r.color == color::ZONE_RED).map(|r| (r.low, r.high)).collect();
        assert_eq!(reds, vec![(0, 45), (135, 180), (75, 105)]);
        assert_eq!(s.markings.len(), 4);
        assert_eq!(s.current_value, None);
    }

    #[test]
    fn overlapping_targets_drop_middle_red() {
        let t = Tunables { optimal_left_angle: -15, optimal_right_angle: 15, ..Tunables::default() };
        let s = spec(&Attempt::default(), &t);
        assert_eq!(s.ranges.iter().filter(|r| r.color == color::ZONE_RED).count(), 2);
    }

    #[test]
    fn reading_is_dodge_angle_shifted_to_center() {
        let a = Attempt { dodge: Some(Dodge { tick: 61, angle: -26 }), ..Attempt::default() };
        assert_eq!(spec(&a, &Tunables::default()).current_value, Some(64.0));

        let a = Attempt { dodge: Some(Dodge { tick: 61, angle: -170 }), ..Attempt::default() };
        assert_eq!(spec(&a, &Tunables::default()).current_value, Some(0.0));
    }

    #[test]
    fn text_callouts() {
        let a = Attempt {
            dodge: Some(Dodge { tick: 61, angle: 31 }),
            outcome: Some(Outcome::Hit { ticks_to_ball: 290, time_to_ball: 2.417 }),
            total_distance_traveled: 2900.0,
            started_in_air: true,
            started_no_boost: true,
            ..Attempt::default()
        };
        let mut canvas = RecordingCanvas::new(1920, 1080);
        render(&mut canvas, &a, &Tunables::default());

        let texts: Vec<&str> = canvas.texts().collect();
        assert_eq!(
            texts,
            vec![
                "Dodge Angle: 31 DEG",
                "Time to Ball: 2.417s",
                "Path Length: 2900uu",
                "WARNING: Started in air!",
                "WARNING: Started without boost!",
            ]
        );
        let path_color = canvas.calls.iter().find_map(|c| match c {
            DrawCall::Text { text, color, .. } if text.starts_with("Path") => Some(*color),
            _ => None,
        });
        assert_eq!(path_color, Some(color::Color::rgb(255, 255, 50)));
    }

    #[test]
    fn no_dodge_reads_not_available() {
        let mut canvas = RecordingCanvas::new(1920, 1080);
        render(&mut canvas, &Attempt::default(), &Tunables::default());
        assert!(canvas.has_text_containing("Dodge Angle: N/A DEG"));
        assert!(!canvas.has_text_containing("Time to Ball"));
    }
}
