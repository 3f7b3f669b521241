// Simulation
pub const PHYSICS_TICK_RATE: f32 = 120.0;

// Training pack that activates the trainer
pub const SPEEDFLIP_PACK_CODE: &str = "A503-264C-A7EB-D282";

// Data Paths
pub const DATA_DIR: &str = "save/speedflip";
pub const ATTEMPTS_SUBDIR: &str = "attempts";
pub const BOTS_SUBDIR: &str = "bots";
pub const ATTEMPT_FILE_EXTENSION: &str = "jsonl";
pub const SETTINGS_INI_PATH: &str = "save/speedflip/settings.ini";

// Measurement thresholds (analog inputs)
pub const THROTTLE_PRESSED_THRESHOLD: f32 = 0.9;
pub const FLIP_CANCEL_PITCH_THRESHOLD: f32 = 0.8;

// Game speed adjustment
pub const MIN_GAME_SPEED: f32 = 0.1;
pub const COUNTDOWN_REBASE_EPSILON: f32 = 0.1;

// Projection
pub const NEAR_PLANE: f32 = 10.0;
pub const FAR_PLANE: f32 = 30000.0;
pub const FALLBACK_ASPECT: f32 = 16.0 / 9.0;

// Car Axes
pub const ARROW_HEAD_LENGTH_PX: f32 = 10.0;
pub const ARROW_HEAD_SPREAD_DEG: f32 = 30.0;
pub const ARROW_THICKNESS: f32 = 2.0;
pub const DIAGONAL_AXIS_SCALE: f32 = 0.6;
pub const CAR_MARKER_SIZE_PX: i32 = 5;

// Shared meter styling
pub const METER_BORDER_WIDTH: f32 = 2.0;
pub const METER_MARKING_WIDTH: f32 = 1.0;
pub const METER_OPACITY: f32 = 1.0;
pub const TEXT_LINE_HEIGHT_PX: i32 = 15;
pub const LABEL_GAP_PX: i32 = 8;

// Angle Meter (layout ratios against screen size)
pub const ANGLE_METER_UNITS: i32 = 180;
pub const ANGLE_METER_CENTER: i32 = 90;
pub const ANGLE_METER_WIDTH_RATIO: f32 = 0.66;
pub const ANGLE_METER_HEIGHT_RATIO: f32 = 0.04;
pub const ANGLE_METER_TOP_RATIO: f32 = 0.9;
pub const ANGLE_GREEN_HALF_WIDTH: i32 = 8;
pub const ANGLE_YELLOW_HALF_WIDTH: i32 = 15;

// Position Meter
pub const POSITION_MAX_DEVIATION: f32 = 2000.0;
pub const POSITION_METER_UNITS: i32 = 400;
pub const POSITION_METER_WIDTH_RATIO: f32 = 0.7;
pub const POSITION_METER_HEIGHT_RATIO: f32 = 0.04;
pub const POSITION_METER_TOP_RATIO: f32 = 0.1;
pub const POSITION_GREEN_RATIO: f32 = 0.1;
pub const POSITION_YELLOW_RATIO: f32 = 0.3;

// First Jump Meter
pub const FIRST_JUMP_OPTIMAL_LOW_TICK: i32 = 50;
pub const FIRST_JUMP_OPTIMAL_HIGH_TICK: i32 = 60;
pub const FIRST_JUMP_YELLOW_BUFFER: i32 = 5;
pub const FIRST_JUMP_METER_WIDTH_RATIO: f32 = 0.02;
pub const FIRST_JUMP_METER_HEIGHT_RATIO: f32 = 0.56;
pub const FIRST_JUMP_METER_LEFT_RATIO: f32 = 0.75;
pub const FIRST_JUMP_METER_LEFT_NUDGE: f32 = 2.5; // in meter widths
pub const VERTICAL_METER_BOTTOM_RATIO: f32 = 0.8;

// Flip Cancel Meter
pub const FLIP_CANCEL_METER_WIDTH_RATIO: f32 = 0.02;
pub const FLIP_CANCEL_METER_HEIGHT_RATIO: f32 = 0.55;
pub const FLIP_CANCEL_METER_LEFT_RATIO: f32 = 0.75;
pub const FLIP_CANCEL_YELLOW_FACTOR: f32 = 1.5;

// Path length quality (world units)
pub const PATH_LENGTH_GREEN_BELOW: f32 = 2500.0;
pub const PATH_LENGTH_YELLOW_BELOW: f32 = 3500.0;

// World units per meter (explosion diagnostics)
pub const WORLD_UNITS_PER_METER: f32 = 100.0;
