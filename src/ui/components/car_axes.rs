use crate::config::{ARROW_HEAD_LENGTH_PX, ARROW_HEAD_SPREAD_DEG, ARROW_THICKNESS, CAR_MARKER_SIZE_PX, DIAGONAL_AXIS_SCALE};
use crate::core::canvas::{Canvas, ScreenPoint};
use crate::core::host::CameraPose;
use crate::core::input::CarSample;
use crate::core::space::{rotator_to_orientation, Projector};
use crate::ui::color::{self, Color};
use crate::ui::components::draw_text;
use cgmath::{Vector2, Vector3};

const LEGEND_X: i32 = 10;
const LEGEND_BOTTOM_OFFSET: i32 = 60;
const LEGEND_LINE_STEP: i32 = 20;

/// Shaft plus a two-stroke head at `end`. Arrows shorter than a pixel get no
/// head.
pub fn draw_arrow(canvas: &mut dyn Canvas, start: ScreenPoint, end: ScreenPoint, color: Color, thickness: f32) {
    canvas.set_color(color);
    canvas.draw_line(start, end, thickness);

    let dx = (end.x - start.x) as f32;
    let dy = (end.y - start.y) as f32;
    let length = (dx * dx + dy * dy).sqrt();
    if length < 1.0 {
        return;
    }
    let (dx, dy) = (dx / length, dy / length);

    for spread in [ARROW_HEAD_SPREAD_DEG, -ARROW_HEAD_SPREAD_DEG] {
        let (sin, cos) = spread.to_radians().sin_cos();
        let x = end.x as f32 - ARROW_HEAD_LENGTH_PX * (dx * cos - dy * sin);
        let y = end.y as f32 - ARROW_HEAD_LENGTH_PX * (dy * cos + dx * sin);
        canvas.draw_line(end, Vector2::new(x as i32, y as i32), thickness);
    }
}

/// Car basis drawn from the car's screen position. Nothing is drawn if the
/// car itself is off screen; each arrow is skipped if its tip is.
pub fn render(canvas: &mut dyn Canvas, camera: Option<&CameraPose>, car: Option<&CarSample>, axis_length: f32) {
    let Some(projector) = Projector::new(camera, canvas.size()) else {
        return;
    };
    let Some(car) = car else {
        return;
    };

    let origin = projector.project(car.location);
    if !projector.is_visible(origin) {
        return;
    }

    canvas.set_color(color::WHITE);
    canvas.set_position(origin - Vector2::new(CAR_MARKER_SIZE_PX / 2, CAR_MARKER_SIZE_PX / 2));
    canvas.fill_box(Vector2::new(CAR_MARKER_SIZE_PX, CAR_MARKER_SIZE_PX));

    let basis = rotator_to_orientation(car.rotation);
    let (front_left, front_right) = basis.front_diagonals();
    let diagonal = axis_length * DIAGONAL_AXIS_SCALE;

    let axes: [(Vector3<f32>, Color); 5] = [
        (basis.forward * axis_length, color::AXIS_FORWARD),
        (basis.right * axis_length, color::AXIS_RIGHT),
        (basis.up * axis_length, color::AXIS_UP),
        (front_left * diagonal, color::AXIS_FRONT_LEFT),
        (front_right * diagonal, color::AXIS_FRONT_RIGHT),
    ];
    for (offset, axis_color) in axes {
        let tip = projector.project(car.location + offset);
        if projector.is_visible(tip) {
            draw_arrow(canvas, origin, tip, axis_color, ARROW_THICKNESS);
        }
    }

    let y = canvas.size().y - LEGEND_BOTTOM_OFFSET;
    draw_text(canvas, Vector2::new(LEGEND_X, y), color::WHITE, "Red (X): Right | Green (Y): Forward | Blue (Z): Up");
    draw_text(
        canvas,
        Vector2::new(LEGEND_X, y + LEGEND_LINE_STEP),
        color::WHITE,
        "Orange: Front-Left | Purple: Front-Right",
    );
}
