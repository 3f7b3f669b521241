use crate::config::ATTEMPT_FILE_EXTENSION;
use crate::core::input::ControllerInput;
use cgmath::{MetricSpace, Vector3};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

// --- Data Structures ---

/// One recorded tick of controls, relative to the attempt's start.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputSample {
    pub tick: u32,
    pub input: ControllerInput,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dodge {
    pub tick: u32,
    /// `atan2(direction.y, direction.x)` in whole degrees.
    pub angle: i32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outcome {
    Hit { ticks_to_ball: u32, time_to_ball: f32 },
    Exploded,
}

/// A single speedflip trial from the moment the countdown starts.
///
/// Every `Option` event field is written once, on the first qualifying tick,
/// and never cleared. Once `outcome` is set the attempt is read-only.
#[derive(Clone, Debug, PartialEq)]
pub struct Attempt {
    pub inputs: Vec<InputSample>,
    pub path_points: Vec<Vector3<f32>>,
    pub total_distance_traveled: f32,
    pub initial_location: Vector3<f32>,
    pub current_location: Option<Vector3<f32>>,
    pub started_in_air: bool,
    pub started_no_boost: bool,
    pub jump_tick: Option<u32>,
    pub dodge: Option<Dodge>,
    pub flip_cancel_tick: Option<u32>,
    pub ticks_not_pressing_throttle: u32,
    pub ticks_not_pressing_boost: u32,
    pub outcome: Option<Outcome>,
}

impl Default for Attempt {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            path_points: Vec::new(),
            total_distance_traveled: 0.0,
            initial_location: Vector3::new(0.0, 0.0, 0.0),
            current_location: None,
            started_in_air: false,
            started_no_boost: false,
            jump_tick: None,
            dodge: None,
            flip_cancel_tick: None,
            ticks_not_pressing_throttle: 0,
            ticks_not_pressing_boost: 0,
            outcome: None,
        }
    }
}

impl Attempt {
    pub fn new(initial_location: Vector3<f32>, started_in_air: bool, started_no_boost: bool) -> Self {
        Self {
            initial_location,
            started_in_air,
            started_no_boost,
            ..Self::default()
        }
    }

    pub fn record(&mut self, tick: u32, input: ControllerInput) {
        self.inputs.push(InputSample { tick, input });
    }

    /// Appends a visited location and extends the path length by the
    /// straight-line step from the previous one.
    pub fn add_path_point(&mut self, location: Vector3<f32>) {
        if let Some(last) = self.path_points.last() {
            self.total_distance_traveled += last.distance(location);
        }
        self.path_points.push(location);
        self.current_location = Some(location);
    }

    #[inline(always)] pub fn jumped(&self) -> bool { self.jump_tick.is_some() }

    #[inline(always)]
    pub fn is_hit(&self) -> bool {
        matches!(self.outcome, Some(Outcome::Hit { .. }))
    }

    pub fn ticks_to_ball(&self) -> Option<u32> {
        match self.outcome {
            Some(Outcome::Hit { ticks_to_ball, .. }) => Some(ticks_to_ball),
            _ => None,
        }
    }

    pub fn time_to_ball(&self) -> Option<f32> {
        match self.outcome {
            Some(Outcome::Hit { time_to_ball, .. }) => Some(time_to_ball),
            _ => None,
        }
    }

    pub fn flip_cancel_ticks_after_dodge(&self) -> Option<u32> {
        let dodge = self.dodge?;
        self.flip_cancel_tick.map(|t| t.saturating_sub(dodge.tick))
    }

    /// Sideways drift from the start location along world Y.
    pub fn lateral_deviation(&self) -> Option<f32> {
        self.current_location.map(|loc| loc.y - self.initial_location.y)
    }
}

// --- Attempt Files ---
//
// One JSON object per line: {"tick":12,"input":{...}}. Blank lines are skipped.

#[derive(Debug, Error)]
pub enum AttemptFileError {
    #[error("could not access attempt file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed record on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("record on line {line} goes back in time (tick {tick} after {previous})")]
    OutOfOrder { line: usize, tick: u32, previous: u32 },
    #[error("could not encode input record: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("attempt file has no input records")]
    Empty,
}

pub fn write_records<W: Write>(writer: W, samples: &[InputSample]) -> Result<(), AttemptFileError> {
    let mut writer = BufWriter::new(writer);
    for sample in samples {
        serde_json::to_writer(&mut writer, sample).map_err(AttemptFileError::Encode)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<InputSample>, AttemptFileError> {
    let mut samples: Vec<InputSample> = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let sample: InputSample = serde_json::from_str(trimmed)
            .map_err(|source| AttemptFileError::Parse { line: idx + 1, source })?;
        if let Some(prev) = samples.last() {
            if sample.tick < prev.tick {
                return Err(AttemptFileError::OutOfOrder { line: idx + 1, tick: sample.tick, previous: prev.tick });
            }
        }
        samples.push(sample);
    }
    if samples.is_empty() {
        return Err(AttemptFileError::Empty);
    }
    Ok(samples)
}

pub fn write_inputs_to_file(path: &Path, samples: &[InputSample]) -> Result<(), AttemptFileError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    write_records(File::create(path)?, samples)
}

pub fn read_inputs_from_file(path: &Path) -> Result<Vec<InputSample>, AttemptFileError> {
    read_records(BufReader::new(File::open(path)?))
}

/// Timestamped file name inside `dir`.
pub fn attempt_file_path(dir: &Path) -> PathBuf {
    let stamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    dir.join(format!("attempt_{}.{}", stamp, ATTEMPT_FILE_EXTENSION))
}
