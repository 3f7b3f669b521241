use crate::config::{DATA_DIR, MIN_GAME_SPEED, SETTINGS_INI_PATH};
use configparser::ini::Ini;
use log::{info, warn};
use once_cell::sync::Lazy;
use std::error::Error;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;

const SECTION: &str = "SpeedflipTrainer";

// --- Tunables ---

/// Every knob the trainer reads. Passed by reference into tick and draw, so
/// a settings change is seen on the very next call.
#[derive(Debug, Clone, PartialEq)]
pub struct Tunables {
    pub enabled: bool,
    pub show_car_axes: bool,
    pub axis_length: i32,
    pub show_angle_meter: bool,
    pub show_position_meter: bool,
    pub show_flip_meter: bool,
    pub show_jump_meter: bool,

    pub change_speed: bool,
    pub speed: f32,
    pub remember_speed: bool,
    pub num_hits_changed_speed: i32,
    pub speed_increment: f32,

    pub optimal_left_angle: i32,
    pub optimal_right_angle: i32,
    pub flip_cancel_threshold: i32,
    pub jump_low: i32,
    pub jump_high: i32,

    pub save_to_file: bool,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            enabled: true,
            show_car_axes: true,
            axis_length: 150,
            show_angle_meter: true,
            show_position_meter: true,
            show_flip_meter: true,
            show_jump_meter: true,
            change_speed: false,
            speed: 1.0,
            remember_speed: true,
            num_hits_changed_speed: 3,
            speed_increment: 0.05,
            optimal_left_angle: -30,
            optimal_right_angle: 30,
            flip_cancel_threshold: 13,
            jump_low: 40,
            jump_high: 90,
            save_to_file: false,
        }
    }
}

impl Tunables {
    /// Settings-panel ranges. A reversed jump window is swapped, an empty one
    /// is widened by a tick.
    pub fn clamped(&self) -> Self {
        let mut t = self.clone();
        t.axis_length = t.axis_length.clamp(50, 500);
        t.speed = t.speed.clamp(MIN_GAME_SPEED, 2.0);
        t.num_hits_changed_speed = t.num_hits_changed_speed.clamp(1, 30);
        t.speed_increment = t.speed_increment.clamp(0.001, 0.5);
        t.optimal_left_angle = t.optimal_left_angle.clamp(-70, -15);
        t.optimal_right_angle = t.optimal_right_angle.clamp(15, 70);
        t.flip_cancel_threshold = t.flip_cancel_threshold.clamp(1, 15);

        let (low, high) = (t.jump_low.clamp(10, 120), t.jump_high.clamp(10, 120));
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        if low == high {
            if high < 120 {
                t.jump_low = low;
                t.jump_high = high + 1;
            } else {
                t.jump_low = low - 1;
                t.jump_high = high;
            }
        } else {
            t.jump_low = low;
            t.jump_high = high;
        }
        t
    }

    pub fn from_ini(conf: &Ini) -> Self {
        let d = Self::default();
        Self {
            enabled: read_bool(conf, "sf_enabled", d.enabled),
            show_car_axes: read_bool(conf, "sf_show_car_axes", d.show_car_axes),
            axis_length: read_num(conf, "sf_car_axes_length", d.axis_length),
            show_angle_meter: read_bool(conf, "sf_show_angle", d.show_angle_meter),
            show_position_meter: read_bool(conf, "sf_show_position", d.show_position_meter),
            show_flip_meter: read_bool(conf, "sf_show_flip", d.show_flip_meter),
            show_jump_meter: read_bool(conf, "sf_show_jump", d.show_jump_meter),
            change_speed: read_bool(conf, "sf_change_speed", d.change_speed),
            speed: read_num(conf, "sf_speed", d.speed),
            remember_speed: read_bool(conf, "sf_remember_speed", d.remember_speed),
            num_hits_changed_speed: read_num(conf, "sf_num_hits", d.num_hits_changed_speed),
            speed_increment: read_num(conf, "sf_speed_increment", d.speed_increment),
            optimal_left_angle: read_num(conf, "sf_left_angle", d.optimal_left_angle),
            optimal_right_angle: read_num(conf, "sf_right_angle", d.optimal_right_angle),
            flip_cancel_threshold: read_num(conf, "sf_cancel_threshold", d.flip_cancel_threshold),
            jump_low: read_num(conf, "sf_jump_low", d.jump_low),
            jump_high: read_num(conf, "sf_jump_high", d.jump_high),
            save_to_file: read_bool(conf, "sf_save_attempts", d.save_to_file),
        }
        .clamped()
    }

    pub fn to_ini(&self) -> Ini {
        let mut conf = Ini::new();
        let mut put = |key: &str, value: String| {
            conf.set(SECTION, key, Some(value));
        };
        put("sf_enabled", bool_str(self.enabled));
        put("sf_show_car_axes", bool_str(self.show_car_axes));
        put("sf_car_axes_length", self.axis_length.to_string());
        put("sf_show_angle", bool_str(self.show_angle_meter));
        put("sf_show_position", bool_str(self.show_position_meter));
        put("sf_show_flip", bool_str(self.show_flip_meter));
        put("sf_show_jump", bool_str(self.show_jump_meter));
        put("sf_change_speed", bool_str(self.change_speed));
        put("sf_speed", self.speed.to_string());
        put("sf_remember_speed", bool_str(self.remember_speed));
        put("sf_num_hits", self.num_hits_changed_speed.to_string());
        put("sf_speed_increment", self.speed_increment.to_string());
        put("sf_left_angle", self.optimal_left_angle.to_string());
        put("sf_right_angle", self.optimal_right_angle.to_string());
        put("sf_cancel_threshold", self.flip_cancel_threshold.to_string());
        put("sf_jump_low", self.jump_low.to_string());
        put("sf_jump_high", self.jump_high.to_string());
        put("sf_save_attempts", bool_str(self.save_to_file));
        conf
    }
}

#[inline(always)]
fn bool_str(v: bool) -> String {
    if v { "1".to_string() } else { "0".to_string() }
}

fn read_bool(conf: &Ini, key: &str, default: bool) -> bool {
    conf.get(SECTION, key)
        .and_then(|v| v.trim().parse::<u8>().ok())
        .map_or(default, |v| v != 0)
}

fn read_num<T: FromStr>(conf: &Ini, key: &str, default: T) -> T {
    conf.get(SECTION, key)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

// --- Process-wide snapshot ---

static TUNABLES: Lazy<Mutex<Tunables>> = Lazy::new(|| Mutex::new(Tunables::default()));

pub fn load_from(path: &Path) -> Tunables {
    let mut conf = Ini::new();
    match conf.load(path) {
        Ok(_) => Tunables::from_ini(&conf),
        Err(e) => {
            warn!("Failed to load '{}': {}. Using default trainer settings.", path.display(), e);
            Tunables::default()
        }
    }
}

pub fn save_to(path: &Path, tunables: &Tunables) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    tunables.to_ini().write(path)?;
    Ok(())
}

/// Reads the settings file into the shared snapshot, writing one with
/// defaults first if none exists.
pub fn load() {
    let path = Path::new(SETTINGS_INI_PATH);
    if !path.exists() {
        info!("Trainer settings not found, creating defaults in '{}'.", DATA_DIR);
        if let Err(e) = save_to(path, &Tunables::default()) {
            warn!("Failed to create default trainer settings: {}", e);
            return;
        }
    }
    let loaded = load_from(path);
    *TUNABLES.lock().unwrap() = loaded;
}

/// Returns a copy of the current settings.
pub fn get() -> Tunables {
    TUNABLES.lock().unwrap().clone()
}

/// Applies `f` to the shared settings and re-clamps them.
pub fn update<F: FnOnce(&mut Tunables)>(f: F) -> Tunables {
    let mut guard = TUNABLES.lock().unwrap();
    f(&mut guard);
    *guard = guard.clamped();
    guard.clone()
}

pub fn save() {
    let current = get();
    if let Err(e) = save_to(Path::new(SETTINGS_INI_PATH), &current) {
        warn!("Failed to save trainer settings: {}", e);
    }
}
