use crate::config::{
    FLIP_CANCEL_METER_HEIGHT_RATIO, FLIP_CANCEL_METER_LEFT_RATIO, FLIP_CANCEL_METER_WIDTH_RATIO,
    FLIP_CANCEL_YELLOW_FACTOR, LABEL_GAP_PX, METER_MARKING_WIDTH, METER_OPACITY, TEXT_LINE_HEIGHT_PX,
    VERTICAL_METER_BOTTOM_RATIO,
};
use crate::core::canvas::{Canvas, ScreenPoint};
use crate::game::attempt::Attempt;
use crate::game::judgment::ticks_to_ms;
use crate::game::tunables::Tunables;
use crate::ui::color;
use crate::ui::components::{base_spec, clamp_reading, draw_text_centered, scaled};
use crate::ui::meter::{render_meter, MeterSpec};
use cgmath::Vector2;

/// Ticks from dodge to cancel over `[0, 2 * threshold]`. `None` when the
/// threshold leaves no scale to draw.
pub fn spec(attempt: &Attempt, tunables: &Tunables) -> Option<MeterSpec> {
    let ideal = tunables.flip_cancel_threshold;
    let total = ideal.saturating_mul(2);
    if total <= 0 {
        return None;
    }
    let late = (ideal as f32 * FLIP_CANCEL_YELLOW_FACTOR) as i32;
    let mark = color::MARKING_GREY.with_opacity(METER_OPACITY);

    let reading = attempt.flip_cancel_ticks_after_dodge().map(|t| t as f32);
    Some(
        base_spec(total, true)
            .range(color::ZONE_GREEN, 0, ideal)
            .range(color::ZONE_YELLOW, ideal, late)
            .range(color::ZONE_RED, late, total)
            .marking(mark, METER_MARKING_WIDTH, ideal)
            .marking(mark, METER_MARKING_WIDTH, late)
            .current(clamp_reading(reading, total)),
    )
}

pub fn layout(screen: ScreenPoint) -> (ScreenPoint, ScreenPoint) {
    let size = scaled(screen, FLIP_CANCEL_METER_WIDTH_RATIO, FLIP_CANCEL_METER_HEIGHT_RATIO);
    let start = Vector2::new(
        (screen.x as f32 * FLIP_CANCEL_METER_LEFT_RATIO) as i32,
        (screen.y as f32 * VERTICAL_METER_BOTTOM_RATIO) as i32 - size.y,
    );
    (start, size)
}

pub fn render(canvas: &mut dyn Canvas, attempt: &Attempt, tunables: &Tunables) {
    let Some(spec) = spec(attempt, tunables) else {
        return;
    };
    let (start, size) = layout(canvas.size());
    render_meter(canvas, start, size, &spec);

    let white = color::WHITE.with_opacity(METER_OPACITY);
    let center_x = start.x + size.x / 2;
    let label_y = start.y + size.y + LABEL_GAP_PX;
    draw_text_centered(canvas, center_x, label_y, white, "Flip Cancel");
    if let Some(ticks) = attempt.flip_cancel_ticks_after_dodge() {
        let ms = format!("{}ms", ticks_to_ms(ticks));
        draw_text_centered(canvas, center_x, label_y + TEXT_LINE_HEIGHT_PX, white, &ms);
    }
}
