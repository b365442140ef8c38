//! Trust Ping - a 60-second arcade survival game
//!
//! Core modules:
//! - `sim`: Deterministic run simulation (clock, trust, hazards, pings)
//! - `tuning`: Data-driven game balance
//! - `settings`: Presentation preferences and frame-time monitoring
//!
//! Rendering, input polling and audio live outside this crate. They drive
//! [`sim::tick`] once per frame and draw from [`sim::Snapshot`].

pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{FrameMonitor, QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Length of one run (ms)
    pub const RUN_DURATION_MS: f32 = 60_000.0;
    /// Largest delta fed into a single tick (ms), avoids catch-up jumps after a stall
    pub const MAX_TICK_MS: f32 = 40.0;

    /// Trust bounds
    pub const MAX_TRUST: f32 = 100.0;
    pub const MIN_TRUST: f32 = 0.0;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 960.0;
    pub const ARENA_HEIGHT: f32 = 540.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 18.0;
    /// Units per second
    pub const PLAYER_SPEED: f32 = 360.0;
    /// Start position as a fraction of arena size
    pub const PLAYER_START_X: f32 = 0.5;
    pub const PLAYER_START_Y: f32 = 0.58;

    /// Spawn interval at run start (ms)
    pub const HAZARD_BASE_SPAWN_MS: f32 = 900.0;
    /// Spawn interval at run end (ms)
    pub const HAZARD_MIN_SPAWN_MS: f32 = 440.0;
    /// Hazards appear this far outside the arena
    pub const HAZARD_SPAWN_MARGIN: f32 = 40.0;
    /// Hazards further than this outside the arena are lost
    pub const HAZARD_DESPAWN_MARGIN: f32 = 120.0;
    pub const HAZARD_MIN_SPEED: f32 = 130.0;
    pub const HAZARD_SPEED_RANGE: f32 = 75.0;
    pub const HAZARD_MIN_RADIUS: f32 = 16.0;
    pub const HAZARD_RADIUS_RANGE: f32 = 8.0;
    /// Trust lost per second per touching hazard
    pub const TRUST_DRAIN_PER_SECOND: f32 = 28.0;

    /// Ping defaults
    pub const PING_COOLDOWN_MS: f32 = 1_100.0;
    pub const PING_LIFE_MS: f32 = 1_250.0;
    pub const PING_MAX_RADIUS: f32 = 260.0;
    /// Trust gained per hazard cleared
    pub const TRUST_REWARD_PER_CLEAR: f32 = 3.0;
}

/// Linear interpolation with `t` clamped to [0, 1]
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * clamp_unit(t)
}

/// Clamp to [0, 1], mapping NaN to 0
#[inline]
pub fn clamp_unit(t: f32) -> f32 {
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}

/// Sanitize an externally supplied delta: NaN and negatives become 0
#[inline]
pub fn sanitize_delta_ms(delta_ms: f32) -> f32 {
    if delta_ms.is_nan() { 0.0 } else { delta_ms.max(0.0) }
}

/// Center of the arena
#[inline]
pub fn arena_center() -> Vec2 {
    Vec2::new(consts::ARENA_WIDTH * 0.5, consts::ARENA_HEIGHT * 0.5)
}
