use crate::config::{ATTEMPTS_SUBDIR, BOTS_SUBDIR, DATA_DIR, SPEEDFLIP_PACK_CODE};
use crate::core::canvas::Canvas;
use crate::core::host::{CameraPose, Host};
use crate::core::input::{CarSample, ControllerInput};
use crate::game::attempt::{self, AttemptFileError, InputSample};
use crate::game::judgment::summarize;
use crate::game::replay::{BotScript, EndPolicy, ReplayPlayer};
use crate::game::tracker::{AttemptTracker, Countdown};
use crate::game::tunables::Tunables;
use crate::ui::components::{render_meters, Frame};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Manual,
    Replay,
    Bot,
}

/// What the host hands over on each physics tick, besides the input.
#[derive(Clone, Copy, Debug)]
pub struct TickInput<'a> {
    pub physics_frame: u64,
    /// Round countdown, `None` when the host has no running game state.
    pub time_remaining: Option<f32>,
    pub car: &'a CarSample,
}

#[inline(always)]
pub fn is_speedflip_pack(code: &str) -> bool {
    code.trim().eq_ignore_ascii_case(SPEEDFLIP_PACK_CODE)
}

/// The overlay as the host sees it: tick, draw and event entry points plus
/// the mode commands of the settings panel.
///
/// Entry points never fail. File commands return their error after logging
/// it and leave the current mode untouched.
pub struct Trainer {
    mode: Mode,
    loaded: bool,
    tracker: AttemptTracker,
    replay: Vec<InputSample>,
    bot: Option<BotScript>,
    remembered_speed: Option<f32>,
    data_dir: PathBuf,
}

impl Default for Trainer {
    fn default() -> Self {
        Self::new(DATA_DIR)
    }
}

impl Trainer {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            mode: Mode::Manual,
            loaded: false,
            tracker: AttemptTracker::new(),
            replay: Vec::new(),
            bot: None,
            remembered_speed: None,
            data_dir: data_dir.into(),
        }
    }

    #[inline(always)] pub fn mode(&self) -> Mode { self.mode }
    #[inline(always)] pub fn is_loaded(&self) -> bool { self.loaded }
    #[inline(always)] pub fn tracker(&self) -> &AttemptTracker { &self.tracker }
    #[inline(always)] pub fn remembered_speed(&self) -> Option<f32> { self.remembered_speed }

    pub fn attempts_dir(&self) -> PathBuf {
        self.data_dir.join(ATTEMPTS_SUBDIR)
    }

    pub fn bots_dir(&self) -> PathBuf {
        self.data_dir.join(BOTS_SUBDIR)
    }

    /// Creates the attempts and bots folders if missing. Failure only means
    /// saving or listing will fail later, so it is logged and ignored.
    fn ensure_data_dirs(&self) {
        for dir in [self.attempts_dir(), self.bots_dir()] {
            if let Err(e) = std::fs::create_dir_all(&dir) {
                warn!("Could not create '{}': {}", dir.display(), e);
            }
        }
    }

    #[inline(always)]
    fn active(&self, tunables: &Tunables) -> bool {
        tunables.enabled && self.loaded
    }

    // --- Activation ---

    /// A training pack finished loading. Only the speedflip pack activates
    /// the overlay; anything else deactivates it.
    pub fn on_training_loaded(&mut self, code: Option<&str>, tunables: &Tunables, host: &mut dyn Host) -> bool {
        let wanted = tunables.enabled && code.is_some_and(is_speedflip_pack);
        if !wanted {
            self.unload();
            return false;
        }
        if self.loaded {
            return true;
        }
        self.loaded = true;
        info!("Speedflip training pack loaded, trainer active.");
        self.ensure_data_dirs();
        if tunables.remember_speed {
            let speed = self.remembered_speed.unwrap_or(tunables.speed);
            host.set_game_speed(speed);
            self.remembered_speed = Some(speed);
            debug!("Restored game speed {:.3}", speed);
        }
        true
    }

    /// Training editor closed or the overlay was disabled.
    pub fn unload(&mut self) {
        if self.loaded {
            info!("Trainer inactive.");
        }
        self.loaded = false;
    }

    // --- Per-tick ---

    /// Runs before the host applies `input` to the car. Returns whether
    /// `input` was replaced by playback and must be used as overridden.
    pub fn on_tick(&mut self, tick: TickInput<'_>, input: &mut ControllerInput, tunables: &Tunables, host: &dyn Host) -> bool {
        if !self.active(tunables) {
            return false;
        }
        if tunables.remember_speed {
            if let Some(speed) = host.game_speed() {
                self.remembered_speed = Some(speed);
            }
        }

        let countdown = self.tracker.observe_countdown(tick.physics_frame, tick.time_remaining);
        if countdown == Countdown::Waiting {
            return false;
        }

        let overridden = self.play(tick.physics_frame, input);
        if countdown == Countdown::Started {
            self.tracker.begin_attempt(tick.car, input);
        }
        self.tracker.measure(tick.physics_frame, tick.car, input);
        overridden
    }

    fn play(&self, physics_frame: u64, input: &mut ControllerInput) -> bool {
        let Some(tick) = self.tracker.tick_at(physics_frame) else {
            return false;
        };
        match self.mode {
            Mode::Manual => false,
            Mode::Replay => ReplayPlayer::new(&self.replay, EndPolicy::Stop).apply(tick, input),
            Mode::Bot => self.bot.as_ref().is_some_and(|bot| bot.player().apply(tick, input)),
        }
    }

    // --- Per-frame ---

    pub fn on_draw(
        &self,
        canvas: &mut dyn Canvas,
        camera: Option<&CameraPose>,
        car: Option<&CarSample>,
        tunables: &Tunables,
        game_speed: Option<f32>,
    ) {
        if !self.active(tunables) {
            return;
        }
        let frame = Frame { attempt: self.tracker.attempt(), tunables, camera, car, game_speed };
        render_meters(canvas, &frame);
    }

    // --- Event signals ---

    pub fn on_ball_hit(&mut self, physics_frame: u64, time_remaining: f32, tunables: &Tunables) {
        if self.active(tunables) {
            self.tracker.on_ball_hit(physics_frame, time_remaining);
        }
    }

    pub fn on_ball_exploded(&mut self, distance_to_ball: Option<f32>, tunables: &Tunables) {
        if self.active(tunables) {
            self.tracker.on_ball_exploded(distance_to_ball);
        }
    }

    pub fn on_round_restart(&mut self, time_remaining: Option<f32>, tunables: &Tunables, host: &mut dyn Host) {
        if !self.active(tunables) {
            return;
        }
        if !self.tracker.on_round_restart(time_remaining) {
            return;
        }

        let finished = self.tracker.attempt();
        if !finished.inputs.is_empty() {
            info!("Attempt summary: {}", summarize(finished, tunables));
            if tunables.save_to_file {
                // Errors are already logged.
                let _ = self.save_last_attempt(None);
            }
        }

        let Some(current) = host.game_speed() else {
            return;
        };
        if let Some(change) = self.tracker.speed_adjustment(tunables, current) {
            host.log_to_chatbox(&change.streak_message);
            host.set_game_speed(change.speed);
            self.remembered_speed = Some(change.speed);
            info!("Game speed changed to: {:.3}", change.speed);
            host.log_to_chatbox(&format!("Game speed set to: {:.0}%", change.speed * 100.0));
        }
    }

    // --- Mode commands ---

    pub fn enable_manual_mode(&mut self) {
        self.mode = Mode::Manual;
        info!("Manual mode.");
    }

    pub fn replay_last_attempt(&mut self) -> bool {
        let inputs = &self.tracker.attempt().inputs;
        if inputs.is_empty() {
            warn!("No recorded attempt to replay.");
            return false;
        }
        self.replay = inputs.clone();
        self.mode = Mode::Replay;
        info!("Replaying last attempt ({} ticks).", self.replay.len());
        true
    }

    pub fn load_replay_file(&mut self, path: &Path) -> Result<(), AttemptFileError> {
        let samples = read_logged(path)?;
        info!("Replaying '{}' ({} ticks).", path.display(), samples.len());
        self.replay = samples;
        self.mode = Mode::Replay;
        Ok(())
    }

    pub fn load_bot(&mut self, bot: BotScript) {
        info!("Bot loaded: {}", bot.name);
        self.bot = Some(bot);
        self.mode = Mode::Bot;
    }

    pub fn load_bot_26(&mut self) {
        self.load_bot(BotScript::bot_26());
    }

    pub fn load_bot_45(&mut self) {
        self.load_bot(BotScript::bot_45());
    }

    pub fn load_bot_file(&mut self, path: &Path) -> Result<(), AttemptFileError> {
        let keyframes = read_logged(path)?;
        let name = path.file_stem().map_or_else(|| "bot".to_string(), |s| s.to_string_lossy().into_owned());
        self.load_bot(BotScript { name, keyframes });
        Ok(())
    }

    /// Writes the last attempt's inputs into `dir`, or the attempts folder.
    pub fn save_last_attempt(&self, dir: Option<&Path>) -> Result<PathBuf, AttemptFileError> {
        let inputs = &self.tracker.attempt().inputs;
        if inputs.is_empty() {
            warn!("No recorded attempt to save.");
            return Err(AttemptFileError::Empty);
        }
        let dir = dir.map_or_else(|| self.attempts_dir(), Path::to_path_buf);
        let path = attempt::attempt_file_path(&dir);
        match attempt::write_inputs_to_file(&path, inputs) {
            Ok(()) => {
                info!("Saved attempt to: {}", path.display());
                Ok(path)
            }
            Err(e) => {
                warn!("Failed to save attempt to '{}': {}", path.display(), e);
                Err(e)
            }
        }
    }
}

fn read_logged(path: &Path) -> Result<Vec<InputSample>, AttemptFileError> {
    attempt::read_inputs_from_file(path).inspect_err(|e| warn!("Failed to load '{}': {}", path.display(), e))
}
