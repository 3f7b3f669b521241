use crate::core::canvas::{Canvas, ScreenPoint};
use crate::ui::color::{self, Color};
use cgmath::Vector2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    pub width: f32,
}

impl LineStyle {
    pub const fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// Colored span `[low, high)` in meter units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeterRange {
    pub color: Color,
    pub low: i32,
    pub high: i32,
}

impl MeterRange {
    pub const fn new(color: Color, low: i32, high: i32) -> Self {
        Self { color, low, high }
    }
}

/// Full-span line at a unit position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeterMarking {
    pub style: LineStyle,
    pub value: i32,
}

impl MeterMarking {
    pub const fn new(color: Color, width: f32, value: i32) -> Self {
        Self { style: LineStyle::new(color, width), value }
    }
}

/// Everything one gauge needs apart from where it goes. Built per draw.
#[derive(Clone, Debug, PartialEq)]
pub struct MeterSpec {
    pub total_units: i32,
    pub vertical: bool,
    pub base_color: Color,
    pub border: LineStyle,
    pub ranges: Vec<MeterRange>,
    pub markings: Vec<MeterMarking>,
    /// Unit to highlight. `None` or a negative value draws no indicator.
    pub current_value: Option<f32>,
}

impl MeterSpec {
    pub fn new(total_units: i32, vertical: bool, base_color: Color, border: LineStyle) -> Self {
        Self {
            total_units,
            vertical,
            base_color,
            border,
            ranges: Vec::new(),
            markings: Vec::new(),
            current_value: None,
        }
    }

    pub fn range(mut self, color: Color, low: i32, high: i32) -> Self {
        self.ranges.push(MeterRange::new(color, low, high));
        self
    }

    pub fn marking(mut self, color: Color, width: f32, value: i32) -> Self {
        self.markings.push(MeterMarking::new(color, width, value));
        self
    }

    pub fn current(mut self, value: Option<f32>) -> Self {
        self.current_value = value;
        self
    }
}

/// Below this many pixels per unit nothing unit-dependent is drawn.
const MIN_UNIT_PIXEL_SIZE: f32 = 0.001;

/// Maps meter units onto the pixel extent of one axis.
#[derive(Clone, Copy, Debug)]
struct UnitScale {
    total_units: i32,
    extent_px: i32,
}

impl UnitScale {
    #[inline(always)]
    fn clamp(&self, units: i32) -> i32 {
        units.clamp(0, self.total_units)
    }

    /// Pixel offset of a unit count along the axis. Exact at both ends.
    #[inline(always)]
    fn px(&self, units: i32) -> i32 {
        (units as f32 * self.extent_px as f32 / self.total_units as f32) as i32
    }
}

/// Draws a meter box at `start_pos` and returns its bottom-right corner.
///
/// Vertical meters put unit 0 at the bottom edge and `total_units` at the top;
/// horizontal meters put unit 0 at the left edge. Draw order is background,
/// ranges, markings, current value, border.
pub fn render_meter(canvas: &mut dyn Canvas, start_pos: ScreenPoint, box_size: ScreenPoint, spec: &MeterSpec) -> ScreenPoint {
    let end = start_pos + box_size;
    let total = spec.total_units;
    if total <= 0 {
        return end;
    }

    let extent_px = if spec.vertical { box_size.y } else { box_size.x };
    let unit_pixel_size = extent_px as f32 / total as f32;
    if unit_pixel_size <= MIN_UNIT_PIXEL_SIZE {
        return end;
    }
    let scale = UnitScale { total_units: total, extent_px };

    // Background
    canvas.set_color(spec.base_color);
    canvas.set_position(start_pos);
    canvas.fill_box(box_size);

    // Ranges
    for range in &spec.ranges {
        let low = scale.clamp(range.low);
        let high = scale.clamp(range.high);
        if low >= high {
            continue;
        }

        let (pos, size) = if spec.vertical {
            (
                Vector2::new(start_pos.x, start_pos.y + scale.px(total - high)),
                Vector2::new(box_size.x, scale.px(total - low) - scale.px(total - high)),
            )
        } else {
            (
                Vector2::new(start_pos.x + scale.px(low), start_pos.y),
                Vector2::new(scale.px(high) - scale.px(low), box_size.y),
            )
        };
        canvas.set_color(range.color);
        canvas.set_position(pos);
        canvas.fill_box(size);
    }

    // Markings
    for mark in &spec.markings {
        canvas.set_color(mark.style.color);
        let (a, b) = unit_line(start_pos, box_size, &scale, spec.vertical, scale.clamp(mark.value));
        canvas.draw_line(a, b, mark.style.width);
    }

    // Current value
    if let Some(value) = spec.current_value.filter(|v| *v >= 0.0) {
        let unit = scale.clamp(value as i32);
        let base_width = if spec.border.width > 0.0 { spec.border.width } else { 2.0 };
        canvas.set_color(color::CURRENT_VALUE_MARK);
        let (a, b) = unit_line(start_pos, box_size, &scale, spec.vertical, unit);
        canvas.draw_line(a, b, base_width + 1.0);
    }

    // Border
    if spec.border.width > 0.0 {
        canvas.set_color(spec.border.color);
        canvas.set_position(start_pos);
        canvas.draw_box(box_size, spec.border.width);
    }

    end
}

#[inline(always)]
fn unit_line(start: ScreenPoint, size: ScreenPoint, scale: &UnitScale, vertical: bool, unit: i32) -> (ScreenPoint, ScreenPoint) {
    if vertical {
        let y = start.y + scale.px(scale.total_units - unit);
        (Vector2::new(start.x, y), Vector2::new(start.x + size.x, y))
    } else {
        let x = start.x + scale.px(unit);
        (Vector2::new(x, start.y), Vector2::new(x, start.y + size.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::canvas::{DrawCall, RecordingCanvas};
    use crate::ui::color::{WHITE, ZONE_GREEN, ZONE_RED, ZONE_YELLOW};

    fn spec(total: i32, vertical: bool) -> MeterSpec {
        MeterSpec::new(total, vertical, WHITE, LineStyle::new(WHITE, 2.0))
    }

    fn fills_with(canvas: &RecordingCanvas, color: Color) -> Vec<(ScreenPoint, ScreenPoint)> {
        canvas.fills().filter(|(_, _, c)| **c == color).map(|(p, s, _)| (*p, *s)).collect()
    }

    #[test]
    fn zero_units_returns_corner_and_draws_nothing() {
        let mut canvas = RecordingCanvas::new(800, 600);
        let s = spec(0, false).range(ZONE_GREEN, 0, 10).marking(WHITE, 1.0, 5).current(Some(3.0));
        let end = render_meter(&mut canvas, Vector2::new(10, 20), Vector2::new(300, 40), &s);
        assert_eq!(end, Vector2::new(310, 60));
        assert!(canvas.calls.is_empty());
    }

    #[test]
    fn vanishing_unit_size_draws_nothing() {
        let mut canvas = RecordingCanvas::new(800, 600);
        let s = spec(1_000_000, true).range(ZONE_GREEN, 0, 10);
        let end = render_meter(&mut canvas, Vector2::new(0, 0), Vector2::new(20, 100), &s);
        assert_eq!(end, Vector2::new(20, 100));
        assert!(canvas.calls.is_empty());
    }

    #[test]
    fn degenerate_ranges_are_skipped() {
        let mut canvas = RecordingCanvas::new(800, 600);
        let s = spec(100, false)
            .range(ZONE_GREEN, 40, 40)
            .range(ZONE_YELLOW, 60, 50)
            .range(ZONE_RED, 120, 150)
            .range(ZONE_RED, -20, -5);
        render_meter(&mut canvas, Vector2::new(0, 0), Vector2::new(200, 20), &s);
        // Only the background fill survives.
        assert_eq!(canvas.fills().count(), 1);
    }

    #[test]
    fn horizontal_units_map_left_to_right() {
        let mut canvas = RecordingCanvas::new(800, 600);
        let origin = Vector2::new(50, 10);
        let s = spec(180, false).range(ZONE_GREEN, 0, 180).marking(WHITE, 1.0, 0).marking(WHITE, 1.0, 180);
        render_meter(&mut canvas, origin, Vector2::new(500, 30), &s);

        assert_eq!(fills_with(&canvas, ZONE_GREEN), vec![(Vector2::new(50, 10), Vector2::new(500, 30))]);
        let xs: Vec<i32> = canvas.lines().map(|(a, _, _, _)| a.x).collect();
        assert_eq!(xs, vec![50, 550]);
    }

    #[test]
    fn vertical_units_map_bottom_to_top() {
        let mut canvas = RecordingCanvas::new(800, 600);
        let origin = Vector2::new(100, 40);
        let s = spec(26, true).marking(WHITE, 1.0, 0).marking(WHITE, 1.0, 26);
        render_meter(&mut canvas, origin, Vector2::new(20, 333), &s);

        let ys: Vec<i32> = canvas.lines().map(|(a, _, _, _)| a.y).collect();
        assert_eq!(ys, vec![40 + 333, 40]);
    }

    #[test]
    fn vertical_range_sits_above_its_low_unit() {
        let mut canvas = RecordingCanvas::new(800, 600);
        let s = spec(10, true).range(ZONE_YELLOW, 2, 5);
        render_meter(&mut canvas, Vector2::new(0, 0), Vector2::new(10, 100), &s);
        assert_eq!(fills_with(&canvas, ZONE_YELLOW), vec![(Vector2::new(0, 50), Vector2::new(10, 30))]);
    }

    #[test]
    fn ranges_and_markings_clamp_into_meter() {
        let mut canvas = RecordingCanvas::new(800, 600);
        let s = spec(10, false).range(ZONE_RED, -5, 4).marking(WHITE, 1.0, 99);
        render_meter(&mut canvas, Vector2::new(0, 0), Vector2::new(100, 10), &s);
        assert_eq!(fills_with(&canvas, ZONE_RED), vec![(Vector2::new(0, 0), Vector2::new(40, 10))]);
        let (a, b, _, _) = canvas.lines().next().unwrap();
        assert_eq!((a.x, b.x), (100, 100));
    }

    #[test]
    fn current_value_draws_thicker_dark_line() {
        let mut canvas = RecordingCanvas::new(800, 600);
        let s = spec(20, false).current(Some(5.0));
        render_meter(&mut canvas, Vector2::new(0, 0), Vector2::new(200, 10), &s);
        let lines: Vec<_> = canvas.lines().collect();
        assert_eq!(lines.len(), 1);
        let (a, b, width, c) = lines[0];
        assert_eq!((a.x, b.x), (50, 50));
        assert_eq!(width, 3.0);
        assert_eq!(*c, color::CURRENT_VALUE_MARK);
    }

    #[test]
    fn negative_or_missing_value_hides_indicator() {
        for value in [None, Some(-1.0)] {
            let mut canvas = RecordingCanvas::new(800, 600);
            render_meter(&mut canvas, Vector2::new(0, 0), Vector2::new(200, 10), &spec(20, false).current(value));
            assert_eq!(canvas.lines().count(), 0);
        }
    }

    #[test]
    fn border_is_drawn_last() {
        let mut canvas = RecordingCanvas::new(800, 600);
        let s = spec(20, false).range(ZONE_GREEN, 0, 5).current(Some(1.0));
        render_meter(&mut canvas, Vector2::new(0, 0), Vector2::new(200, 10), &s);
        assert!(matches!(canvas.calls.last(), Some(DrawCall::DrawBox { width, .. }) if *width == 2.0));
    }

    #[test]
    fn no_border_when_width_is_zero() {
        let mut canvas = RecordingCanvas::new(800, 600);
        let s = MeterSpec::new(20, false, WHITE, LineStyle::new(WHITE, 0.0)).current(Some(1.0));
        render_meter(&mut canvas, Vector2::new(0, 0), Vector2::new(200, 10), &s);
        assert!(!canvas.calls.iter().any(|c| matches!(c, DrawCall::DrawBox { .. })));
        // Falls back to a 2px base when there is no border to match.
        assert_eq!(canvas.lines().next().map(|(_, _, w, _)| w), Some(3.0));
    }
}
