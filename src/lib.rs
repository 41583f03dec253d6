//! Cloud Hopper - a side-scrolling arcade platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, spawning)
//! - `persistence`: Key/value storage abstraction supplied by the host
//! - `highscores`: Best-run tracking
//! - `settings`: Presentation preferences and the render-detail hint

pub mod highscores;
pub mod persistence;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::{DetailMode, Settings};

/// Game configuration constants
pub mod consts {
    /// Reference frame interval in milliseconds. The driver divides the
    /// measured frame delta by this to get the per-tick elapsed scale, so a
    /// 50 Hz frame runs at scale 1.0 and physics stays frame-rate-independent.
    pub const FRAME_INTERVAL_MS: f32 = 20.0;

    /// Room dimensions (world units are pixels)
    pub const ROOM_WIDTH: f32 = 1200.0;
    pub const ROOM_HEIGHT: f32 = 800.0;

    /// Fall acceleration per tick while airborne
    pub const GRAVITY_ACCEL: f32 = 1.0;
    /// Contacts slower than this land; faster ones bounce
    pub const BOUNCE_THRESHOLD: f32 = 3.0;
    /// Fraction of the contact speed kept (and inverted) by a bounce
    pub const BOUNCE_DAMPING: f32 = 0.25;

    /// Jump strength: held milliseconds divided by this
    pub const JUMP_HOLD_DIVISOR: f32 = 4.0;
    /// Jump velocity cap
    pub const JUMP_MAX_VELOCITY: f32 = 27.0;
    /// Presses held longer than this are stale and do not jump
    pub const JUMP_MAX_HOLD_MS: f64 = 500.0;
    /// Fraction of the remaining distance to the target covered per tick
    pub const RUN_EASE_DIVISOR: f32 = 30.0;

    /// World scroll speed at score zero (world moves leftward)
    pub const BASE_SCROLL_SPEED: f32 = -5.0;
    /// Scroll speed floor (most negative)
    pub const MAX_SCROLL_SPEED: f32 = -30.0;
    /// Score points per unit of scroll speedup
    pub const SCROLL_SCORE_DIVISOR: f32 = 300.0;

    /// Score per difficulty level
    pub const SCORE_PER_LEVEL: u64 = 1000;
    /// Difficulty level cap
    pub const MAX_LEVEL: u32 = 5;

    /// Vertical offset from the room bottom where spawns are placed
    pub const SPAWN_OFFSET: f32 = 320.0;
    /// Horizontal margin past the right edge where spawns are placed
    pub const SPAWN_MARGIN: f32 = 50.0;
    /// Extra floor columns kept past the right edge
    pub const PLATFORM_BUFFER: f32 = 1.0;

    /// Enemy walking paces (leftward, on top of inherited friction)
    pub const ENEMY_MEDIUM_PACE: f32 = -2.0;
    pub const ENEMY_HARD_PACE: f32 = -3.0;
    /// Upward velocity of a hard enemy's hop
    pub const ENEMY_HOP_VELOCITY: f32 = 8.0;
}
