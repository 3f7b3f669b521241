//! Headless stand-in for the game: a kinematic car on a flat field, a ball,
//! a round countdown, and a host that records chat and game speed. Enough
//! to drive the trainer through full rounds without the real client.

use crate::app::{TickInput, Trainer};
use crate::config::PHYSICS_TICK_RATE;
use crate::core::canvas::RecordingCanvas;
use crate::core::host::{CameraPose, Host};
use crate::core::input::{CarSample, ControllerInput, DodgeState, Rotator};
use crate::game::judgment::{summarize, AttemptSummary};
use crate::game::tunables::Tunables;
use cgmath::{InnerSpace, MetricSpace, Vector2, Vector3};
use log::{debug, info};

// --- Toy physics ---
const GROUND_Z: f32 = 17.0;
const GRAVITY: f32 = -650.0;
const THROTTLE_ACCEL: f32 = 1600.0;
const BOOST_ACCEL: f32 = 991.0;
const MAX_SPEED: f32 = 2300.0;
const JUMP_SPEED: f32 = 292.0;
const DODGE_FORWARD_SPEED: f32 = 500.0;
const DODGE_LATERAL_SPEED: f32 = 150.0;
/// Every dodge spins the toy car about its X axis.
const DODGE_TORQUE: f32 = 1.0;
const AIR_ROLL_RATE: i32 = 500; // rotator units per tick at full deflection

// --- Field ---
const CAR_START: Vector3<f32> = Vector3::new(0.0, 0.0, GROUND_Z);
const BALL_LOCATION: Vector3<f32> = Vector3::new(4000.0, 0.0, 93.0);
const HIT_RADIUS: f32 = 170.0;
const COUNTDOWN_SECONDS: f32 = 3.0;
/// Ticks between the round restart and the countdown starting to run.
const PRE_ROUND_TICKS: u64 = 30;
const SCREEN: Vector2<i32> = Vector2::new(1920, 1080);
const DRAW_EVERY_TICKS: u64 = 4;

#[derive(Debug, Default)]
pub struct SimHost {
    pub speed: f32,
    pub chat: Vec<String>,
}

impl SimHost {
    pub fn new(speed: f32) -> Self {
        Self { speed, chat: Vec::new() }
    }
}

impl Host for SimHost {
    fn game_speed(&self) -> Option<f32> {
        Some(self.speed)
    }

    fn set_game_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    fn log_to_chatbox(&mut self, message: &str) {
        info!("[chat] {}", message);
        self.chat.push(message.to_string());
    }
}

#[derive(Debug, Clone)]
pub struct ToyCar {
    pub location: Vector3<f32>,
    pub velocity: Vector3<f32>,
    pub rotation: Rotator,
    pub on_ground: bool,
    pub jumped: bool,
    pub dodge: Option<DodgeState>,
    jump_held: bool,
}

impl ToyCar {
    pub fn new(location: Vector3<f32>) -> Self {
        Self {
            location,
            velocity: Vector3::new(0.0, 0.0, 0.0),
            rotation: Rotator::default(),
            on_ground: true,
            jumped: false,
            dodge: None,
            jump_held: false,
        }
    }

    pub fn sample(&self) -> CarSample {
        CarSample {
            location: self.location,
            rotation: self.rotation,
            on_ground: self.on_ground,
            jumped: self.jumped,
            dodge: self.dodge,
        }
    }

    /// One physics tick. Driving is along +X; a dodge adds speed along its
    /// direction in the car's frame.
    pub fn step(&mut self, input: &ControllerInput) {
        let dt = 1.0 / PHYSICS_TICK_RATE;
        let pressed_jump = input.jump && !self.jump_held;
        self.jump_held = input.jump;

        if self.on_ground {
            self.velocity.x += input.throttle * THROTTLE_ACCEL * dt;
            if pressed_jump {
                self.on_ground = false;
                self.jumped = true;
                self.velocity.z = JUMP_SPEED;
            }
        } else {
            if pressed_jump && self.jumped && self.dodge.is_none() {
                let dir = Vector2::new(input.dodge_forward, input.dodge_strafe);
                if dir.magnitude2() > 0.0 {
                    let dir = dir.normalize();
                    self.dodge = Some(DodgeState {
                        torque: Vector3::new(DODGE_TORQUE, 0.0, 0.0),
                        direction: Vector3::new(dir.x, dir.y, 0.0),
                    });
                    self.velocity.x += dir.x * DODGE_FORWARD_SPEED;
                    self.velocity.y += dir.y * DODGE_LATERAL_SPEED;
                }
            }
            self.rotation.roll += (input.roll * AIR_ROLL_RATE as f32) as i32;
            self.velocity.z += GRAVITY * dt;
        }
        if input.activate_boost {
            self.velocity.x += BOOST_ACCEL * dt;
        }

        let speed = self.velocity.magnitude();
        if speed > MAX_SPEED {
            self.velocity *= MAX_SPEED / speed;
        }
        self.location += self.velocity * dt;

        if self.location.z <= GROUND_Z && !self.on_ground {
            self.location.z = GROUND_Z;
            self.velocity.z = 0.0;
            self.on_ground = true;
            self.jumped = false;
            self.dodge = None;
            self.rotation.roll = 0;
        }
    }

    pub fn chase_camera(&self) -> CameraPose {
        CameraPose {
            location: self.location + Vector3::new(-450.0, 0.0, 200.0),
            rotation: Rotator::new(-2000, 0, 0),
            fov_deg: 90.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RoundReport {
    pub hit: bool,
    pub ticks: u64,
    pub summary: AttemptSummary,
}

/// Owns the physics frame counter across rounds.
pub struct Simulation {
    pub host: SimHost,
    pub canvas: RecordingCanvas,
    physics_frame: u64,
}

impl Simulation {
    pub fn new(start_speed: f32) -> Self {
        Self {
            host: SimHost::new(start_speed),
            canvas: RecordingCanvas::new(SCREEN.x, SCREEN.y),
            physics_frame: 0,
        }
    }

    /// Plays one round: a still pre-round, then the countdown until the ball
    /// is reached or time runs out, then the restart signal.
    pub fn run_round(&mut self, trainer: &mut Trainer, tunables: &Tunables) -> RoundReport {
        let mut car = ToyCar::new(CAR_START);
        let mut remaining = COUNTDOWN_SECONDS;
        let mut ticks = 0u64;
        let mut hit = false;

        loop {
            self.physics_frame += 1;
            ticks += 1;
            if ticks > PRE_ROUND_TICKS {
                remaining -= 1.0 / PHYSICS_TICK_RATE;
            }

            // Player holds nothing; playback supplies the controls.
            let mut input = ControllerInput::default();
            let sample = car.sample();
            let tick = TickInput { physics_frame: self.physics_frame, time_remaining: Some(remaining), car: &sample };
            trainer.on_tick(tick, &mut input, tunables, &self.host);
            car.step(&input);

            if ticks % DRAW_EVERY_TICKS == 0 {
                self.canvas.clear();
                let camera = car.chase_camera();
                let sample = car.sample();
                trainer.on_draw(&mut self.canvas, Some(&camera), Some(&sample), tunables, self.host.game_speed());
                debug!("Frame {}: {} draw calls", self.physics_frame, self.canvas.calls.len());
            }

            if car.location.distance(BALL_LOCATION) <= HIT_RADIUS {
                trainer.on_ball_hit(self.physics_frame, remaining, tunables);
                hit = true;
                break;
            }
            if remaining <= 0.0 {
                trainer.on_ball_exploded(Some(car.location.distance(BALL_LOCATION)), tunables);
                break;
            }
        }

        let summary = summarize(trainer.tracker().attempt(), tunables);
        trainer.on_round_restart(Some(COUNTDOWN_SECONDS), tunables, &mut self.host);
        RoundReport { hit, ticks, summary }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SPEEDFLIP_PACK_CODE;

    #[test]
    fn car_jumps_dodges_and_lands() {
        let mut car = ToyCar::new(CAR_START);
        car.step(&ControllerInput { jump: true, ..Default::default() });
        assert!(car.jumped && !car.on_ground);

        car.step(&ControllerInput { jump: false, ..Default::default() });
        car.step(&ControllerInput { jump: true, dodge_forward: 1.0, ..Default::default() });
        let dodge = car.dodge.expect("dodge after second jump");
        assert!(dodge.is_active());
        assert_eq!(dodge.direction, Vector3::new(1.0, 0.0, 0.0));

        for _ in 0..200 {
            car.step(&ControllerInput::default());
        }
        assert!(car.on_ground && !car.jumped);
        assert!(car.dodge.is_none());
    }

    #[test]
    fn bot_round_is_measured_end_to_end() {
        let tunables = Tunables::default();
        let mut sim = Simulation::new(1.0);
        let mut trainer = Trainer::new(std::env::temp_dir().join("speedflip-sim-tests"));
        assert!(trainer.on_training_loaded(Some(SPEEDFLIP_PACK_CODE), &tunables, &mut sim.host));
        trainer.load_bot_26();

        let report = sim.run_round(&mut trainer, &tunables);
        let attempt = trainer.tracker().attempt();
        assert!(report.hit);
        // Car state lags the input by one tick; pitch is read from the input.
        assert_eq!(attempt.jump_tick, Some(55));
        let dodge = attempt.dodge.expect("bot dodges");
        assert_eq!(dodge.tick, 63);
        assert!((-26..=-25).contains(&dodge.angle));
        assert_eq!(attempt.flip_cancel_ticks_after_dodge(), Some(3));
        assert!(!attempt.started_in_air && !attempt.started_no_boost);
        assert_eq!(trainer.tracker().consecutive_hits, 1);
        assert!(sim.canvas.has_text_containing(&format!("Dodge Angle: {} DEG", dodge.angle)));
    }
}
