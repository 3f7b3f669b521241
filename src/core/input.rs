use cgmath::Vector3;
use serde::{Deserialize, Serialize};

/// One tick of player (or bot) controls, as the host hands them to the car.
///
/// Analog axes are in `[-1, 1]`, throttle included.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ControllerInput {
    pub throttle: f32,
    pub steer: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
    #[serde(default)]
    pub dodge_forward: f32,
    #[serde(default)]
    pub dodge_strafe: f32,
    #[serde(default)]
    pub handbrake: bool,
    pub jump: bool,
    pub activate_boost: bool,
    #[serde(default)]
    pub holding_boost: bool,
    #[serde(default)]
    pub jumped: bool,
}

impl ControllerInput {
    #[inline(always)]
    pub fn is_pressing_throttle(&self) -> bool {
        self.throttle >= crate::config::THROTTLE_PRESSED_THRESHOLD
    }
}

/// Fixed-point rotation as the engine stores it: 65536 units per turn,
/// so ±32768 is ±π.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rotator {
    pub pitch: i32,
    pub yaw: i32,
    pub roll: i32,
}

impl Rotator {
    pub const fn new(pitch: i32, yaw: i32, roll: i32) -> Self {
        Self { pitch, yaw, roll }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DodgeState {
    pub torque: Vector3<f32>,
    pub direction: Vector3<f32>,
}

impl DodgeState {
    /// A dodge (or the air roll that shares its component) is active as soon
    /// as the torque has any X component.
    #[inline(always)]
    pub fn is_active(&self) -> bool {
        self.torque.x != 0.0
    }
}

/// What the overlay reads from the local car on a physics tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarSample {
    pub location: Vector3<f32>,
    pub rotation: Rotator,
    pub on_ground: bool,
    /// The engine's "has jumped" flag; stays set while airborne from a jump.
    pub jumped: bool,
    pub dodge: Option<DodgeState>,
}

impl CarSample {
    pub fn grounded_at(location: Vector3<f32>) -> Self {
        Self {
            location,
            rotation: Rotator::default(),
            on_ground: true,
            jumped: false,
            dodge: None,
        }
    }
}
