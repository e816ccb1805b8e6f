//! Tiltball - roll a sphere across a tilting arena and hit the goals
//!
//! Core modules:
//! - `sim`: Deterministic gameplay core (gravity mapping, physics, goals, session)
//! - `input`: Tilt/drag input collaborator (orientation filtering, drag fallback)
//! - `highscores`: High score persistence port
//! - `tuning`: Data-driven gameplay balance overrides

pub mod highscores;
pub mod input;
pub mod sim;
pub mod tuning;

pub use highscores::{HighScoreStore, MemoryHighScore};
pub use sim::{GameEvent, GamePhase, GameWorld};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Frame-time cap fed into the accumulator, prevents spiral of death
    pub const MAX_FRAME_TIME: f32 = 0.1;

    /// Tilt axes below this magnitude (degrees) are treated as exactly zero
    pub const DEADZONE_DEG: f32 = 2.0;
    /// Full tilt: an axis at this angle maps to 1.0 normalized
    pub const MAX_TILT_DEG: f32 = 45.0;
    /// Forward/back axis is clamped here to stay away from the ±90° singularity
    pub const TILT_CLAMP_DEG: f32 = 80.0;
    /// Forward/back readings beyond this are logged (non-fatal)
    pub const GIMBAL_WARN_DEG: f32 = 85.0;
    /// Axis scale: full tilt on one axis pulls at exactly 1 g
    pub const STANDARD_GRAVITY: f32 = 9.8;
    /// Combined gravity magnitude saturates at this many g
    pub const GRAVITY_MULTIPLIER: f32 = 1.5;
    /// Per-read lerp factor toward the target vector (1.0 = unsmoothed)
    pub const GRAVITY_SMOOTHING: f32 = 0.15;

    /// Square play area spans ±ARENA_HALF_EXTENT on X and Z (world units)
    pub const ARENA_HALF_EXTENT: f32 = 10.0;
    /// Wall thickness, generous to prevent high-speed tunneling
    pub const WALL_THICKNESS: f32 = 3.0;

    /// Hero sphere radius (world units)
    pub const HERO_RADIUS: f32 = 0.5;
    /// Hero spawn point, resting on the arena floor plane
    pub const HERO_START: Vec3 = Vec3::new(0.0, HERO_RADIUS, 0.0);

    /// Nominal goal zone radius (world units)
    pub const GOAL_RADIUS: f32 = 1.0;
    /// Hero center must be within this fraction of the goal radius to collect
    pub const COLLECTION_THRESHOLD: f32 = 0.7;
    /// Goals spawn at least this far from every wall
    pub const GOAL_EDGE_INSET: f32 = 3.0;
    /// Spawn retry budget before falling back to the safe default position
    pub const MAX_SPAWN_ATTEMPTS: u32 = 20;
    /// Spawn candidates closer than this to the hero are rejected
    pub const MIN_SPAWN_CLEARANCE: f32 = 2.0;

    /// Countdown length in seconds
    pub const TIME_LIMIT_SECS: f32 = 60.0;
    /// Goals required to win a run
    pub const GOALS_TO_WIN: u32 = 10;
    /// Flat points per goal
    pub const GOAL_BASE_POINTS: u32 = 100;
    /// Extra points per remaining second on each collect
    pub const TIME_POINTS_FACTOR: f32 = 2.0;
    /// Extra points per remaining second on the winning collect
    pub const WIN_BONUS_FACTOR: f32 = 10.0;

    /// Degrees of pseudo-tilt per pixel of pointer drag
    pub const DRAG_SENSITIVITY: f32 = 0.25;
}
