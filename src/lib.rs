//! Spell Siege - A wave-survival spellcasting arcade game
//!
//! Core modules:
//! - `sim`: Fixed-tick simulation (avatar, spells, enemies, collisions, waves)
//! - `session`: Input buffering, tick driving and read-only snapshots
//! - `settings`: Launcher and presentation preferences

pub mod session;
pub mod settings;
pub mod sim;

pub use session::{Session, Snapshot, TickOutcome};
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;

    /// Play area dimensions
    pub const ARENA_WIDTH: f32 = 1200.0;
    pub const ARENA_HEIGHT: f32 = 800.0;

    /// Avatar defaults
    pub const AVATAR_RADIUS: f32 = 25.0;
    pub const AVATAR_BASE_SPEED: f32 = 5.0;
    pub const AVATAR_START_HEALTH: i32 = 100;
    pub const AVATAR_START_MANA: f32 = 100.0;
    /// Mana regenerated per tick
    pub const MANA_REGEN: f32 = 0.5;
    pub const START_EXPERIENCE_TO_NEXT: u32 = 100;
    pub const LEVEL_HEALTH_BONUS: i32 = 10;
    pub const LEVEL_MANA_BONUS: f32 = 15.0;
    /// Invulnerability window after a hit (1 second)
    pub const INVULNERABILITY_TICKS: u32 = 60;

    /// Speed pickup multiplier and duration (5 seconds)
    pub const SPEED_BOOST_FACTOR: f32 = 1.5;
    pub const SPEED_BOOST_TICKS: u32 = 5 * TICK_RATE;
    pub const HEALTH_PICKUP_AMOUNT: i32 = 30;
    pub const MANA_PICKUP_AMOUNT: f32 = 50.0;
    pub const PICKUP_RADIUS: f32 = 12.0;
    /// Chance a slain enemy drops a pickup
    pub const PICKUP_DROP_CHANCE: f64 = 0.1;

    /// Rewards per kill
    pub const KILL_SCORE: u64 = 10;
    pub const KILL_EXPERIENCE: u32 = 5;

    /// Spawn timing (ticks)
    pub const ENEMY_SPAWN_INTERVAL: u32 = 60;
    pub const ENEMY_SPAWN_STEP: u32 = 5;
    pub const ENEMY_SPAWN_MIN_INTERVAL: u32 = 20;
    pub const PICKUP_SPAWN_INTERVAL: u32 = 600;
    /// How far outside the visible arena enemies appear
    pub const SPAWN_EDGE_OFFSET: f32 = 20.0;
    /// Margin kept clear when placing pickups
    pub const PICKUP_MARGIN: f32 = 50.0;
}

/// Centre of the play area
#[inline]
pub fn arena_center() -> Vec2 {
    Vec2::new(consts::ARENA_WIDTH / 2.0, consts::ARENA_HEIGHT / 2.0)
}

/// Play area size as a vector (width, height)
#[inline]
pub fn arena_bounds() -> Vec2 {
    Vec2::new(consts::ARENA_WIDTH, consts::ARENA_HEIGHT)
}

/// Unit vector pointing from `from` to `to`, or zero if they coincide
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

/// Unit vector for an angle in radians (0 = +x, counter-clockwise)
#[inline]
pub fn heading_from_angle(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// Angle of a vector in radians, in (-π, π]
#[inline]
pub fn angle_of(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}
