use crate::config::{FALLBACK_ASPECT, FAR_PLANE, NEAR_PLANE};
use crate::core::canvas::ScreenPoint;
use crate::core::host::CameraPose;
use crate::core::input::Rotator;
use cgmath::{InnerSpace, Matrix, Matrix4, Vector2, Vector3, Vector4};
use std::f32::consts::PI;

/// Returned by projection for points at or behind the camera plane.
pub const OFF_SCREEN: ScreenPoint = Vector2::new(-1, -1);

const ROTATOR_HALF_TURN: f32 = 32768.0;

// -----------------------------------------------------------------------------
// Rotation basis
// -----------------------------------------------------------------------------
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orientation {
    pub forward: Vector3<f32>,
    pub right: Vector3<f32>,
    pub up: Vector3<f32>,
}

#[inline(always)]
pub fn rotator_units_to_radians(units: i32) -> f32 {
    units as f32 * PI / ROTATOR_HALF_TURN
}

/// Yaw-pitch-roll composition of a fixed-point rotator into a
/// forward/right/up basis. Not special-cased near gimbal lock.
pub fn rotator_to_orientation(rotation: Rotator) -> Orientation {
    let pitch = rotator_units_to_radians(rotation.pitch);
    let yaw = rotator_units_to_radians(rotation.yaw);
    let roll = rotator_units_to_radians(rotation.roll);

    let (sp, cp) = pitch.sin_cos();
    let (sy, cy) = yaw.sin_cos();
    let (sr, cr) = roll.sin_cos();

    Orientation {
        forward: Vector3::new(cp * cy, cp * sy, sp),
        right: Vector3::new(cy * sr * sp + cr * sy, sy * sr * sp - cr * cy, -cp * sr),
        up: Vector3::new(-cr * sp * cy + sr * sy, -cr * sp * sy - sr * cy, cp * cr),
    }
}

impl Orientation {
    /// Unit diagonals between forward and the car's sides, left first.
    pub fn front_diagonals(&self) -> (Vector3<f32>, Vector3<f32>) {
        (
            normalize_or_zero(self.forward - self.right),
            normalize_or_zero(self.forward + self.right),
        )
    }
}

#[inline(always)]
fn normalize_or_zero(v: Vector3<f32>) -> Vector3<f32> {
    let len = v.magnitude();
    if len > f32::EPSILON { v / len } else { Vector3::new(0.0, 0.0, 0.0) }
}

// -----------------------------------------------------------------------------
// View / projection
// -----------------------------------------------------------------------------
#[inline(always)]
fn from_rows(r0: Vector4<f32>, r1: Vector4<f32>, r2: Vector4<f32>, r3: Vector4<f32>) -> Matrix4<f32> {
    // cgmath stores columns; build row-wise and flip.
    Matrix4::from_cols(r0, r1, r2, r3).transpose()
}

/// Rows are the camera basis; translation is the negated basis dot camera
/// position. View-space Z is depth along `forward`, so it becomes clip W.
pub fn view_matrix(location: Vector3<f32>, basis: &Orientation) -> Matrix4<f32> {
    let Orientation { forward: f, right: r, up: u } = *basis;
    from_rows(
        r.extend(-r.dot(location)),
        u.extend(-u.dot(location)),
        f.extend(-f.dot(location)),
        Vector4::new(0.0, 0.0, 0.0, 1.0),
    )
}

pub fn perspective_matrix(fov_deg: f32, aspect: f32) -> Matrix4<f32> {
    let y_scale = 1.0 / (fov_deg.to_radians() * 0.5).tan();
    let x_scale = y_scale / aspect;
    let depth = FAR_PLANE / (FAR_PLANE - NEAR_PLANE);
    from_rows(
        Vector4::new(x_scale, 0.0, 0.0, 0.0),
        Vector4::new(0.0, y_scale, 0.0, 0.0),
        Vector4::new(0.0, 0.0, depth, -NEAR_PLANE * depth),
        Vector4::new(0.0, 0.0, 1.0, 0.0),
    )
}

/// `projection * view`; the view transform is applied first.
pub fn view_projection(location: Vector3<f32>, basis: &Orientation, fov_deg: f32, aspect: f32) -> Matrix4<f32> {
    perspective_matrix(fov_deg, aspect) * view_matrix(location, basis)
}

#[inline(always)]
pub fn aspect_for_screen(screen: ScreenPoint) -> f32 {
    if screen.y > 0 { screen.x as f32 / screen.y as f32 } else { FALLBACK_ASPECT }
}

/// Homogenize, transform, divide, and map NDC to pixels with Y flipped.
pub fn project(view_proj: &Matrix4<f32>, screen: ScreenPoint, location: Vector3<f32>) -> ScreenPoint {
    let clip = *view_proj * location.extend(1.0);
    if clip.w <= 0.0 {
        return OFF_SCREEN;
    }

    let ndc_x = clip.x / clip.w;
    let ndc_y = clip.y / clip.w;

    let x = (ndc_x * 0.5 + 0.5) * screen.x as f32;
    let y = (-ndc_y * 0.5 + 0.5) * screen.y as f32;
    Vector2::new(x as i32, y as i32)
}

#[inline(always)]
pub fn is_on_screen(point: ScreenPoint, width: i32, height: i32) -> bool {
    point.x >= 0 && point.x <= width && point.y >= 0 && point.y <= height
}

// -----------------------------------------------------------------------------
// Per-frame projector
// -----------------------------------------------------------------------------

/// A camera's view-projection bound to one screen size, built once per frame.
#[derive(Clone, Copy, Debug)]
pub struct Projector {
    view_proj: Matrix4<f32>,
    screen: ScreenPoint,
}

impl Projector {
    /// `None` when there is no camera or the screen has no area.
    pub fn new(camera: Option<&CameraPose>, screen: ScreenPoint) -> Option<Self> {
        let camera = camera?;
        if screen.x <= 0 || screen.y <= 0 {
            return None;
        }
        let basis = rotator_to_orientation(camera.rotation);
        let view_proj = view_projection(camera.location, &basis, camera.fov_deg, aspect_for_screen(screen));
        Some(Self { view_proj, screen })
    }

    #[inline(always)]
    pub fn project(&self, location: Vector3<f32>) -> ScreenPoint {
        project(&self.view_proj, self.screen, location)
    }

    #[inline(always)]
    pub fn is_visible(&self, point: ScreenPoint) -> bool {
        is_on_screen(point, self.screen.x, self.screen.y)
    }
}

/// One-shot projection. An unavailable camera or empty screen yields the
/// zero point, which callers must treat as "nothing to draw".
pub fn world_to_screen(camera: Option<&CameraPose>, screen: ScreenPoint, location: Vector3<f32>) -> ScreenPoint {
    match Projector::new(camera, screen) {
        Some(projector) => projector.project(location),
        None => Vector2::new(0, 0),
    }
}
