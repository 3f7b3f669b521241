use crate::config::{COUNTDOWN_REBASE_EPSILON, FLIP_CANCEL_PITCH_THRESHOLD, MIN_GAME_SPEED, WORLD_UNITS_PER_METER};
use crate::core::input::{CarSample, ControllerInput, DodgeState};
use crate::game::attempt::{Attempt, Dodge, Outcome};
use crate::game::judgment::clock_time;
use crate::game::tunables::Tunables;
use log::{debug, info};

/// Where the live attempt is. Terminal phases are only left through a
/// round restart, which goes back to `Idle`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    InProgress,
    Hit,
    Exploded,
}

/// Result of looking at the round countdown on one tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Countdown {
    /// Countdown has not moved below the baseline yet.
    Waiting,
    /// The trial went live on this very tick.
    Started,
    /// The trial was already live.
    Running,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpeedChange {
    pub speed: f32,
    pub streak_message: String,
}

#[derive(Debug, Default)]
pub struct AttemptTracker {
    attempt: Attempt,
    phase: Phase,
    initial_time: f32,
    start_frame: Option<u64>,
    pub consecutive_hits: u32,
    pub consecutive_misses: u32,
}

/// Degrees of the dodge direction in the XY plane, truncated toward zero.
pub fn dodge_angle(dodge: &DodgeState) -> i32 {
    let (x, y) = (dodge.direction.x, dodge.direction.y);
    if x == 0.0 && y == 0.0 {
        return 0;
    }
    y.atan2(x).to_degrees() as i32
}

impl AttemptTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)] pub fn attempt(&self) -> &Attempt { &self.attempt }
    #[inline(always)] pub fn phase(&self) -> Phase { self.phase }
    #[inline(always)] pub fn initial_time(&self) -> f32 { self.initial_time }
    #[inline(always)] pub fn start_frame(&self) -> Option<u64> { self.start_frame }

    /// Ticks since the trial went live; `None` before that or for frames
    /// older than the start.
    pub fn tick_at(&self, physics_frame: u64) -> Option<u32> {
        let start = self.start_frame?;
        physics_frame.checked_sub(start).map(|t| t.min(u32::MAX as u64) as u32)
    }

    /// Tracks the countdown baseline and detects the trial going live.
    ///
    /// While the countdown sits at or above the baseline the baseline is
    /// refreshed (only when it moved up noticeably) and nothing else happens.
    /// The first tick below it becomes tick zero.
    pub fn observe_countdown(&mut self, physics_frame: u64, time_remaining: Option<f32>) -> Countdown {
        let Some(time_left) = time_remaining else {
            return Countdown::Waiting;
        };

        if self.initial_time <= 0.0 || time_left >= self.initial_time {
            if time_left > 0.0 && (self.initial_time <= 0.0 || time_left > self.initial_time + COUNTDOWN_REBASE_EPSILON) {
                self.initial_time = time_left;
                info!("Initial time set to: {}", self.initial_time);
            }
            return Countdown::Waiting;
        }

        if self.start_frame.is_some() {
            return Countdown::Running;
        }
        if time_left > 0.0 {
            self.start_frame = Some(physics_frame);
            info!("Attempt started at physics frame: {}", physics_frame);
            return Countdown::Started;
        }
        Countdown::Waiting
    }

    /// Replaces the live attempt with a fresh one carrying the start
    /// conditions. Called on the tick `observe_countdown` reported `Started`.
    pub fn begin_attempt(&mut self, car: &CarSample, input: &ControllerInput) {
        self.attempt = Attempt::new(car.location, !car.on_ground, !input.activate_boost);
        self.phase = Phase::InProgress;
        if self.attempt.started_in_air {
            debug!("Attempt started in the air.");
        }
        if self.attempt.started_no_boost {
            debug!("Attempt started without boost.");
        }
    }

    /// Folds one physics tick into the live attempt. Ignored unless the
    /// attempt is in progress and the frame is not older than tick zero.
    ///
    /// The first jump is the first tick the car reports its jumped flag, not
    /// merely leaving the ground, so driving off a ramp never counts.
    pub fn measure(&mut self, physics_frame: u64, car: &CarSample, input: &ControllerInput) {
        if self.phase != Phase::InProgress {
            return;
        }
        let Some(tick) = self.tick_at(physics_frame) else {
            return;
        };
        let a = &mut self.attempt;

        a.record(tick, *input);
        a.add_path_point(car.location);

        if a.jump_tick.is_none() && car.jumped {
            a.jump_tick = Some(tick);
            info!("First jump: {} ticks", tick);
        }

        if a.dodge.is_none() {
            if let Some(dodge) = car.dodge.as_ref().filter(|d| d.is_active()) {
                let angle = dodge_angle(dodge);
                a.dodge = Some(Dodge { tick, angle });
                let time = clock_time(angle);
                info!("Dodge angle: {} deg or {}", angle, time);
            }
        }

        if !input.is_pressing_throttle() {
            a.ticks_not_pressing_throttle += 1;
        }
        if !input.activate_boost {
            a.ticks_not_pressing_boost += 1;
        }

        if let Some(dodge) = a.dodge {
            if a.flip_cancel_tick.is_none() && input.pitch > FLIP_CANCEL_PITCH_THRESHOLD {
                a.flip_cancel_tick = Some(tick);
                info!("Flip cancel: {} ticks after dodge", tick.saturating_sub(dodge.tick));
            }
        }
    }

    /// Ball touched. Only an in-progress attempt can become a hit.
    pub fn on_ball_hit(&mut self, physics_frame: u64, time_remaining: f32) -> bool {
        if self.phase != Phase::InProgress {
            return false;
        }
        let Some(ticks_to_ball) = self.tick_at(physics_frame) else {
            return false;
        };
        let time_to_ball = self.initial_time - time_remaining;
        self.attempt.outcome = Some(Outcome::Hit { ticks_to_ball, time_to_ball });
        self.phase = Phase::Hit;
        info!("Ball hit: {:.3}s after {} ticks", time_to_ball, ticks_to_ball);
        true
    }

    /// Ball destroyed without a touch. A hit attempt stays a hit.
    pub fn on_ball_exploded(&mut self, distance_to_ball: Option<f32>) -> bool {
        if let Some(d) = distance_to_ball {
            info!("Ball exploded. Distance to ball center = {:.1}m", d / WORLD_UNITS_PER_METER);
        }
        if self.phase != Phase::InProgress {
            return false;
        }
        self.attempt.outcome = Some(Outcome::Exploded);
        self.phase = Phase::Exploded;
        true
    }

    /// Round bookkeeping: re-baseline the countdown, clear tick zero and
    /// update the hit/miss streaks from the attempt that just ended. The
    /// finished attempt stays readable until the next one begins.
    ///
    /// Returns whether an attempt was closed by this restart; each attempt
    /// is tallied once, by the first restart after it began.
    pub fn on_round_restart(&mut self, time_remaining: Option<f32>) -> bool {
        info!("Round restarted");
        self.initial_time = time_remaining.unwrap_or(0.0);
        self.start_frame = None;

        if self.phase == Phase::Idle {
            return false;
        }
        if self.attempt.is_hit() {
            self.consecutive_hits += 1;
            self.consecutive_misses = 0;
        } else if !self.attempt.inputs.is_empty() {
            self.consecutive_hits = 0;
            self.consecutive_misses += 1;
        }
        self.phase = Phase::Idle;
        true
    }

    /// Speed step owed for the current streak, if any. Hits take priority;
    /// a lowered speed never drops below the game's minimum.
    pub fn speed_adjustment(&self, tunables: &Tunables, current_speed: f32) -> Option<SpeedChange> {
        if !tunables.change_speed {
            return None;
        }
        let every = tunables.num_hits_changed_speed.max(1) as u32;

        if self.consecutive_hits > 0 && self.consecutive_hits % every == 0 {
            let n = self.consecutive_hits;
            return Some(SpeedChange {
                speed: current_speed + tunables.speed_increment,
                streak_message: format!("{} {} in a row!", n, if n > 1 { "hits" } else { "hit" }),
            });
        }
        if self.consecutive_misses > 0 && self.consecutive_misses % every == 0 {
            let n = self.consecutive_misses;
            return Some(SpeedChange {
                speed: (current_speed - tunables.speed_increment).max(MIN_GAME_SPEED),
                streak_message: format!("{} {} in a row.", n, if n > 1 { "misses" } else { "miss" }),
            });
        }
        None
    }
}
