use crate::config::{
    METER_MARKING_WIDTH, METER_OPACITY, POSITION_GREEN_RATIO, POSITION_MAX_DEVIATION, POSITION_METER_HEIGHT_RATIO,
    POSITION_METER_TOP_RATIO, POSITION_METER_UNITS, POSITION_METER_WIDTH_RATIO, POSITION_YELLOW_RATIO,
    TEXT_LINE_HEIGHT_PX,
};
use crate::core::canvas::{Canvas, ScreenPoint};
use crate::game::attempt::Attempt;
use crate::game::judgment::ticks_to_ms;
use crate::ui::color;
use crate::ui::components::{base_spec, draw_text, draw_text_right, scaled, text_size};
use crate::ui::meter::{render_meter, MeterSpec};
use cgmath::Vector2;

const CENTER: i32 = POSITION_METER_UNITS / 2;

/// Lateral drift from the start location in meter units, centered and
/// clamped. `None` until the attempt has a position.
pub fn reading(attempt: &Attempt) -> Option<f32> {
    let scale = POSITION_MAX_DEVIATION * 2.0 / POSITION_METER_UNITS as f32;
    attempt
        .lateral_deviation()
        .map(|dev| (CENTER + (dev / scale).trunc().clamp(-CENTER as f32, CENTER as f32) as i32) as f32)
}

pub fn spec(attempt: &Attempt) -> MeterSpec {
    let green = (POSITION_METER_UNITS as f32 * POSITION_GREEN_RATIO) as i32;
    let yellow = (POSITION_METER_UNITS as f32 * POSITION_YELLOW_RATIO) as i32;
    let mark = color::WHITE.with_opacity(METER_OPACITY);

    base_spec(POSITION_METER_UNITS, false)
        .range(color::ZONE_GREEN, CENTER - green, CENTER + green)
        .range(color::ZONE_YELLOW, CENTER - yellow, CENTER - green)
        .range(color::ZONE_YELLOW, CENTER + green, CENTER + yellow)
        .range(color::ZONE_RED, 0, CENTER - yellow)
        .range(color::ZONE_RED, CENTER + yellow, POSITION_METER_UNITS)
        .marking(mark, METER_MARKING_WIDTH, CENTER - green)
        .marking(mark, METER_MARKING_WIDTH, CENTER + green)
        .marking(mark, METER_MARKING_WIDTH, CENTER - yellow)
        .marking(mark, METER_MARKING_WIDTH, CENTER + yellow)
        .current(reading(attempt))
}

pub fn layout(screen: ScreenPoint) -> (ScreenPoint, ScreenPoint) {
    let size = scaled(screen, POSITION_METER_WIDTH_RATIO, POSITION_METER_HEIGHT_RATIO);
    let start = Vector2::new(screen.x / 2 - size.x / 2, (screen.y as f32 * POSITION_METER_TOP_RATIO) as i32);
    (start, size)
}

pub fn render(canvas: &mut dyn Canvas, attempt: &Attempt, game_speed: Option<f32>) {
    let (start, size) = layout(canvas.size());
    render_meter(canvas, start, size, &spec(attempt));

    if let Some(speed) = game_speed {
        let msg = format!("Game Speed: {:.0}%", speed * 100.0);
        let text_h = text_size(canvas, &msg).y;
        let white = color::WHITE.with_opacity(METER_OPACITY);
        draw_text_right(canvas, start.x + size.x, start.y - text_h - 2, 5, white, &msg);
    }

    let callout = color::CALLOUT_YELLOW.with_opacity(METER_OPACITY);
    let mut y = start.y + size.y + 5;
    if attempt.ticks_not_pressing_boost > 0 {
        let msg = format!("No Boost: {}ms", ticks_to_ms(attempt.ticks_not_pressing_boost));
        draw_text(canvas, Vector2::new(start.x, y), callout, &msg);
        y += TEXT_LINE_HEIGHT_PX;
    }
    if attempt.ticks_not_pressing_throttle > 0 {
        let msg = format!("No Throttle: {}ms", ticks_to_ms(attempt.ticks_not_pressing_throttle));
        draw_text(canvas, Vector2::new(start.x, y), callout, &msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::canvas::{DrawCall, RecordingCanvas};
    use cgmath::Vector3;

    fn drifted(y: f32) -> Attempt {
        let mut a = Attempt::new(Vector3::new(0.0, -4608.0, 17.0), false, false);
        a.add_path_point(Vector3::new(0.0, -4608.0 + y, 17.0));
        a
    }

    #[test]
    fn no_indicator_before_first_position() {
        assert_eq!(reading(&Attempt::default()), None);
        assert_eq!(spec(&Attempt::default()).current_value, None);
    }

    #[test]
    fn drift_maps_ten_units_per_step() {
        assert_eq!(reading(&drifted(0.0)), Some(200.0));
        assert_eq!(reading(&drifted(155.0)), Some(215.0));
        assert_eq!(reading(&drifted(-400.0)), Some(160.0));
        assert_eq!(reading(&drifted(9000.0)), Some(400.0));
        assert_eq!(reading(&drifted(-9000.0)), Some(0.0));
    }

    #[test]
    fn extreme_drift_pins_to_the_ends() {
        let far = |y: f32| Attempt { current_location: Some(Vector3::new(0.0, y, 17.0)), ..Attempt::default() };
        assert_eq!(reading(&far(2.0e10)), Some(400.0));
        assert_eq!(reading(&far(-2.0e10)), Some(0.0));
        assert_eq!(reading(&far(f32::INFINITY)), Some(400.0));
    }

    #[test]
    fn zones_are_symmetric_about_center() {
        let s = spec(&Attempt::default());
        let spans: Vec<(i32, i32)> = s.ranges.iter().map(|r| (r.low, r.high)).collect();
        assert_eq!(spans, vec![(160, 240), (80, 160), (240, 320), (0, 80), (320, 400)]);
    }

    #[test]
    fn speed_and_idle_input_callouts() {
        let mut a = drifted(10.0);
        a.ticks_not_pressing_boost = 12;
        a.ticks_not_pressing_throttle = 3;
        let mut canvas = RecordingCanvas::new(1920, 1080);
        render(&mut canvas, &a, Some(1.05));

        let texts: Vec<(ScreenPoint, String)> = canvas
            .calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text { pos, text, .. } => Some((*pos, text.clone())),
                _ => None,
            })
            .collect();
        assert_eq!(texts.len(), 3);
        assert_eq!(texts[0].1, "Game Speed: 105%");
        assert_eq!(texts[1].1, "No Boost: 100ms");
        assert_eq!(texts[2].1, "No Throttle: 25ms");
        assert_eq!(texts[2].0.y - texts[1].0.y, TEXT_LINE_HEIGHT_PX);
    }

    #[test]
    fn unknown_speed_hides_readout() {
        let mut canvas = RecordingCanvas::new(1920, 1080);
        render(&mut canvas, &Attempt::default(), None);
        assert_eq!(canvas.texts().count(), 0);
    }
}
