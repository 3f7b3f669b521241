use crate::config::{
    ANGLE_GREEN_HALF_WIDTH, ANGLE_YELLOW_HALF_WIDTH, FIRST_JUMP_OPTIMAL_HIGH_TICK,
    FIRST_JUMP_OPTIMAL_LOW_TICK, FIRST_JUMP_YELLOW_BUFFER, FLIP_CANCEL_YELLOW_FACTOR,
    PATH_LENGTH_GREEN_BELOW, PATH_LENGTH_YELLOW_BELOW, PHYSICS_TICK_RATE,
};
use crate::game::attempt::Attempt;
use crate::game::tunables::Tunables;
use std::fmt;

/// Traffic-light grade shared by every meter zone and text call-out.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Quality {
    Good,  // green
    Close, // yellow
    Off,   // red
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quality::Good => write!(f, "good"),
            Quality::Close => write!(f, "close"),
            Quality::Off => write!(f, "off"),
        }
    }
}

#[inline(always)]
pub fn ticks_to_ms(ticks: u32) -> i32 {
    (ticks as f32 * 1000.0 / PHYSICS_TICK_RATE) as i32
}

pub fn grade_path_length(distance: f32) -> Quality {
    if distance < PATH_LENGTH_GREEN_BELOW {
        Quality::Good
    } else if distance < PATH_LENGTH_YELLOW_BELOW {
        Quality::Close
    } else {
        Quality::Off
    }
}

/// Graded against whichever optimal angle (left or right) is nearer.
pub fn grade_dodge_angle(angle: i32, tunables: &Tunables) -> Quality {
    let off_by = (angle - tunables.optimal_left_angle)
        .abs()
        .min((angle - tunables.optimal_right_angle).abs());
    if off_by < ANGLE_GREEN_HALF_WIDTH {
        Quality::Good
    } else if off_by < ANGLE_YELLOW_HALF_WIDTH {
        Quality::Close
    } else {
        Quality::Off
    }
}

pub fn grade_flip_cancel(ticks_after_dodge: u32, tunables: &Tunables) -> Quality {
    let threshold = tunables.flip_cancel_threshold.max(0) as f32;
    let ticks = ticks_after_dodge as f32;
    if ticks <= threshold {
        Quality::Good
    } else if ticks <= (threshold * FLIP_CANCEL_YELLOW_FACTOR).floor() {
        Quality::Close
    } else {
        Quality::Off
    }
}

pub fn grade_first_jump(jump_tick: u32) -> Quality {
    let tick = jump_tick as i32;
    if (FIRST_JUMP_OPTIMAL_LOW_TICK..=FIRST_JUMP_OPTIMAL_HIGH_TICK).contains(&tick) {
        Quality::Good
    } else if (FIRST_JUMP_OPTIMAL_LOW_TICK - FIRST_JUMP_YELLOW_BUFFER
        ..=FIRST_JUMP_OPTIMAL_HIGH_TICK + FIRST_JUMP_YELLOW_BUFFER)
        .contains(&tick)
    {
        Quality::Close
    } else {
        Quality::Off
    }
}

// --- Clock notation ---

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ClockTime {
    pub hour_hand: i32,
    pub min_hand: i32,
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour_hand, self.min_hand)
    }
}

/// Dodge angle as a clock reading, 12:00 being straight ahead.
pub fn clock_time(angle: i32) -> ClockTime {
    let angle = angle.rem_euclid(360);
    let hour = angle / 30;
    ClockTime {
        hour_hand: if hour == 0 { 12 } else { hour },
        min_hand: (angle % 30) * 2,
    }
}

// --- Attempt summary ---

#[derive(Clone, Debug, PartialEq)]
pub struct AttemptSummary {
    pub first_jump: Option<(u32, Quality)>,
    pub dodge_angle: Option<(i32, Quality)>,
    pub flip_cancel: Option<(u32, Quality)>,
    pub path_length: (f32, Quality),
    pub hit: bool,
}

pub fn summarize(attempt: &Attempt, tunables: &Tunables) -> AttemptSummary {
    AttemptSummary {
        first_jump: attempt.jump_tick.map(|t| (t, grade_first_jump(t))),
        dodge_angle: attempt.dodge.map(|d| (d.angle, grade_dodge_angle(d.angle, tunables))),
        flip_cancel: attempt
            .flip_cancel_ticks_after_dodge()
            .map(|t| (t, grade_flip_cancel(t, tunables))),
        path_length: (attempt.total_distance_traveled, grade_path_length(attempt.total_distance_traveled)),
        hit: attempt.is_hit(),
    }
}

impl fmt::Display for AttemptSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", if self.hit { "HIT" } else { "MISS" })?;
        match self.first_jump {
            Some((t, q)) => write!(f, " | jump {}ms ({})", ticks_to_ms(t), q)?,
            None => write!(f, " | no jump")?,
        }
        match self.dodge_angle {
            Some((a, q)) => write!(f, " | dodge {} deg ({})", a, q)?,
            None => write!(f, " | no dodge")?,
        }
        match self.flip_cancel {
            Some((t, q)) => write!(f, " | cancel +{} ticks ({})", t, q)?,
            None => write!(f, " | no cancel")?,
        }
        write!(f, " | path {:.0}uu ({})", self.path_length.0, self.path_length.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_time_maps_hours_and_minutes() {
        assert_eq!(clock_time(0), ClockTime { hour_hand: 12, min_hand: 0 });
        assert_eq!(clock_time(90), ClockTime { hour_hand: 3, min_hand: 0 });
        assert_eq!(clock_time(45), ClockTime { hour_hand: 1, min_hand: 30 });
        // -26 wraps to 334: 11 hours, 4 degrees over.
        assert_eq!(clock_time(-26), ClockTime { hour_hand: 11, min_hand: 8 });
        assert_eq!(clock_time(-26).to_string(), "11:08");
        assert_eq!(clock_time(360), clock_time(0));
    }

    #[test]
    fn ticks_convert_at_physics_rate() {
        assert_eq!(ticks_to_ms(120), 1000);
        assert_eq!(ticks_to_ms(6), 50);
        assert_eq!(ticks_to_ms(0), 0);
    }

    #[test]
    fn path_length_thresholds() {
        assert_eq!(grade_path_length(2499.0), Quality::Good);
        assert_eq!(grade_path_length(2500.0), Quality::Close);
        assert_eq!(grade_path_length(3499.9), Quality::Close);
        assert_eq!(grade_path_length(3500.0), Quality::Off);
    }

    #[test]
    fn dodge_angle_uses_nearest_target() {
        let t = Tunables::default();
        assert_eq!(grade_dodge_angle(-30, &t), Quality::Good);
        assert_eq!(grade_dodge_angle(27, &t), Quality::Good);
        assert_eq!(grade_dodge_angle(-42, &t), Quality::Close);
        assert_eq!(grade_dodge_angle(0, &t), Quality::Off);
        assert_eq!(grade_dodge_angle(-90, &t), Quality::Off);
    }

    #[test]
    fn flip_cancel_bands_follow_threshold() {
        let t = Tunables::default(); // threshold 13, yellow up to 19
        assert_eq!(grade_flip_cancel(0, &t), Quality::Good);
        assert_eq!(grade_flip_cancel(13, &t), Quality::Good);
        assert_eq!(grade_flip_cancel(19, &t), Quality::Close);
        assert_eq!(grade_flip_cancel(20, &t), Quality::Off);
    }

    #[test]
    fn first_jump_window() {
        assert_eq!(grade_first_jump(55), Quality::Good);
        assert_eq!(grade_first_jump(46), Quality::Close);
        assert_eq!(grade_first_jump(64), Quality::Close);
        assert_eq!(grade_first_jump(30), Quality::Off);
        assert_eq!(grade_first_jump(70), Quality::Off);
    }
}
