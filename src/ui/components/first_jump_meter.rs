use crate::config::{
    FIRST_JUMP_METER_HEIGHT_RATIO, FIRST_JUMP_METER_LEFT_NUDGE, FIRST_JUMP_METER_LEFT_RATIO,
    FIRST_JUMP_METER_WIDTH_RATIO, FIRST_JUMP_OPTIMAL_HIGH_TICK, FIRST_JUMP_OPTIMAL_LOW_TICK, FIRST_JUMP_YELLOW_BUFFER,
    LABEL_GAP_PX, METER_MARKING_WIDTH, METER_OPACITY, TEXT_LINE_HEIGHT_PX, VERTICAL_METER_BOTTOM_RATIO,
};
use crate::core::canvas::{Canvas, ScreenPoint};
use crate::game::attempt::Attempt;
use crate::game::judgment::ticks_to_ms;
use crate::game::tunables::Tunables;
use crate::ui::color;
use crate::ui::components::{base_spec, clamp_reading, draw_text_centered, scaled};
use crate::ui::meter::{render_meter, MeterSpec};
use cgmath::Vector2;

/// Vertical meter over the configured jump window `[jump_low, jump_high]`,
/// green over the optimal ticks. `None` for an empty window.
pub fn spec(attempt: &Attempt, tunables: &Tunables) -> Option<MeterSpec> {
    let total = tunables.jump_high - tunables.jump_low;
    if total <= 0 {
        return None;
    }
    let low = (FIRST_JUMP_OPTIMAL_LOW_TICK - tunables.jump_low).clamp(0, total);
    let high = (FIRST_JUMP_OPTIMAL_HIGH_TICK - tunables.jump_low).clamp(0, total);
    let yellow_low = (low - FIRST_JUMP_YELLOW_BUFFER).max(0);
    let yellow_high = (high + FIRST_JUMP_YELLOW_BUFFER).min(total);
    let mark = color::MARKING_GREY.with_opacity(METER_OPACITY);

    let reading = attempt.jump_tick.map(|t| (t as i32 - tunables.jump_low) as f32);
    Some(
        base_spec(total, true)
            .marking(mark, METER_MARKING_WIDTH, low)
            .marking(mark, METER_MARKING_WIDTH, high)
            .range(color::ZONE_GREEN, low, high)
            .range(color::ZONE_YELLOW, yellow_low, low)
            .range(color::ZONE_YELLOW, high, yellow_high)
            .range(color::ZONE_RED, 0, yellow_low)
            .range(color::ZONE_RED, yellow_high, total)
            .current(clamp_reading(reading, total)),
    )
}

pub fn layout(screen: ScreenPoint) -> (ScreenPoint, ScreenPoint) {
    let size = scaled(screen, FIRST_JUMP_METER_WIDTH_RATIO, FIRST_JUMP_METER_HEIGHT_RATIO);
    let start = Vector2::new(
        (screen.x as f32 * FIRST_JUMP_METER_LEFT_RATIO + FIRST_JUMP_METER_LEFT_NUDGE * size.x as f32) as i32,
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
    draw_text_centered(canvas, center_x, label_y, white, "First Jump");
    if let Some(tick) = attempt.jump_tick {
        let ms = format!("{}ms", ticks_to_ms(tick));
        draw_text_centered(canvas, center_x, label_y + TEXT_LINE_HEIGHT_PX, white, &ms);
    }
}
