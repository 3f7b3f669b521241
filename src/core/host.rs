use crate::core::input::Rotator;
use cgmath::Vector3;

/// Camera pose as reported by the host at draw time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub location: Vector3<f32>,
    pub rotation: Rotator,
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
}

/// Host services the trainer calls outside the draw path.
///
/// The game-speed variable belongs to the host; the trainer only reads and
/// nudges it.
pub trait Host {
    fn game_speed(&self) -> Option<f32>;
    fn set_game_speed(&mut self, speed: f32);
    fn log_to_chatbox(&mut self, message: &str);
}
