use crate::core::input::ControllerInput;
use crate::game::attempt::InputSample;

/// What playback does once the tick runs past the last sample.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EndPolicy {
    /// Give control back to the player.
    Stop,
    /// Keep feeding the last sample.
    HoldLast,
}

/// Borrowed view over a tick-ordered input sequence.
///
/// Holds no cursor: the input for a tick is looked up from the tick alone, so
/// restarting a trial needs nothing more than a new tick zero.
#[derive(Copy, Clone, Debug)]
pub struct ReplayPlayer<'a> {
    samples: &'a [InputSample],
    end: EndPolicy,
}

impl<'a> ReplayPlayer<'a> {
    pub fn new(samples: &'a [InputSample], end: EndPolicy) -> Self {
        Self { samples, end }
    }

    /// Last sample at or before `tick`. Gaps in the sequence hold the
    /// previous sample, which makes sparse keyframe scripts work unchanged.
    pub fn input_at(&self, tick: u32) -> Option<ControllerInput> {
        let last = self.samples.last()?;
        if tick > last.tick && self.end == EndPolicy::Stop {
            return None;
        }
        let idx = self.samples.partition_point(|s| s.tick <= tick);
        if idx == 0 {
            return None;
        }
        Some(self.samples[idx - 1].input)
    }

    /// Overwrites `input` for this tick. Returns whether the host should
    /// treat the input as overridden.
    pub fn apply(&self, tick: u32, input: &mut ControllerInput) -> bool {
        match self.input_at(tick) {
            Some(replayed) => {
                *input = replayed;
                true
            }
            None => false,
        }
    }
}

// --- Bots ---

#[derive(Clone, Debug, PartialEq)]
pub struct BotScript {
    pub name: String,
    pub keyframes: Vec<InputSample>,
}

const FIRST_JUMP_TICK: u32 = 54;
const JUMP_RELEASE_TICK: u32 = 59;
const DODGE_TICK: u32 = 62;
const CANCEL_TICK: u32 = 66;
const LANDED_TICK: u32 = 110;

impl BotScript {
    pub fn player(&self) -> ReplayPlayer<'_> {
        ReplayPlayer::new(&self.keyframes, EndPolicy::HoldLast)
    }

    /// Diagonal speedflip: boost from the start, short first jump, dodge at
    /// `dodge_angle_deg` off forward, then pitch back to cancel the flip and
    /// hold air roll until landing.
    pub fn speedflip(name: &str, dodge_angle_deg: f32) -> Self {
        let (sin, cos) = dodge_angle_deg.to_radians().sin_cos();
        let roll = if dodge_angle_deg < 0.0 { -1.0 } else { 1.0 };
        let drive = ControllerInput { throttle: 1.0, activate_boost: true, holding_boost: true, ..Default::default() };
        let stick = ControllerInput { pitch: -cos, yaw: sin, roll, ..drive };

        let keyframes = vec![
            InputSample { tick: 0, input: drive },
            InputSample { tick: FIRST_JUMP_TICK, input: ControllerInput { jump: true, roll, ..drive } },
            InputSample { tick: JUMP_RELEASE_TICK, input: stick },
            InputSample {
                tick: DODGE_TICK,
                input: ControllerInput { jump: true, dodge_forward: cos, dodge_strafe: sin, ..stick },
            },
            InputSample { tick: CANCEL_TICK, input: ControllerInput { pitch: 1.0, ..stick } },
            InputSample { tick: LANDED_TICK, input: drive },
        ];
        Self { name: name.to_string(), keyframes }
    }

    pub fn bot_26() -> Self {
        Self::speedflip("26 degree speedflip", -26.0)
    }

    pub fn bot_45() -> Self {
        Self::speedflip("45 degree speedflip", -45.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(ticks: &[u32]) -> Vec<InputSample> {
        ticks
            .iter()
            .map(|&tick| InputSample {
                tick,
                input: ControllerInput { steer: tick as f32 / 100.0, ..Default::default() },
            })
            .collect()
    }

    #[test]
    fn recorded_attempt_stops_after_last_tick() {
        let recorded = samples(&[0, 1, 2, 3]);
        let player = ReplayPlayer::new(&recorded, EndPolicy::Stop);
        assert_eq!(player.input_at(2).map(|i| i.steer), Some(0.02));
        assert_eq!(player.input_at(3).map(|i| i.steer), Some(0.03));
        assert_eq!(player.input_at(4), None);

        let mut live = ControllerInput { throttle: 0.3, ..Default::default() };
        assert!(!player.apply(9, &mut live));
        assert_eq!(live.throttle, 0.3);
        assert!(player.apply(1, &mut live));
        assert_eq!(live.throttle, 0.0);
    }

    #[test]
    fn gaps_hold_previous_sample() {
        let sparse = samples(&[5, 10]);
        let player = ReplayPlayer::new(&sparse, EndPolicy::HoldLast);
        assert_eq!(player.input_at(4), None);
        assert_eq!(player.input_at(7).map(|i| i.steer), Some(0.05));
        assert_eq!(player.input_at(500).map(|i| i.steer), Some(0.10));
    }

    #[test]
    fn empty_sequence_never_overrides() {
        let player = ReplayPlayer::new(&[], EndPolicy::HoldLast);
        assert_eq!(player.input_at(0), None);
    }

    #[test]
    fn playback_does_not_touch_the_sequence() {
        let recorded = samples(&[0, 1]);
        let before = recorded.clone();
        let player = ReplayPlayer::new(&recorded, EndPolicy::Stop);
        let mut input = ControllerInput::default();
        for tick in 0..4 {
            player.apply(tick, &mut input);
        }
        assert_eq!(recorded, before);
    }

    #[test]
    fn bot_dodges_along_its_angle_and_cancels() {
        let bot = BotScript::bot_26();
        let player = bot.player();

        let start = player.input_at(0).unwrap();
        assert!(start.is_pressing_throttle() && start.activate_boost && !start.jump);

        let dodge = player.input_at(DODGE_TICK).unwrap();
        assert!(dodge.jump);
        let angle = dodge.dodge_strafe.atan2(dodge.dodge_forward).to_degrees();
        assert!((angle + 26.0).abs() < 1e-3);

        let cancel = player.input_at(CANCEL_TICK + 2).unwrap();
        assert!(cancel.pitch > 0.8);

        let late = player.input_at(10_000).unwrap();
        assert_eq!(late, start);
    }

    #[test]
    fn keyframes_are_tick_ordered() {
        for bot in [BotScript::bot_26(), BotScript::bot_45()] {
            assert!(bot.keyframes.windows(2).all(|w| w[0].tick < w[1].tick), "{}", bot.name);
        }
    }
}
