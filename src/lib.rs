//! Space Shooter - simulation core for a vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, spawning, difficulty)
//! - `platform`: Input port (key names to per-tick input snapshots)
//! - `tuning`: Data-driven configuration and ship loadouts
//! - `error`: Configuration errors surfaced at construction/start time

pub mod error;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use tuning::{ShipStats, Tuning};

/// Game configuration constants
pub mod consts {
    /// Default arena (canvas) dimensions in pixels
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Largest frame delta the clock will simulate (ms)
    pub const MAX_FRAME_DT_MS: f32 = 32.0;

    /// Session defaults
    pub const INITIAL_LIVES: u8 = 3;
    pub const SCORE_PER_LEVEL: u64 = 500;
    /// Difficulty multiplier gained per level above 1
    pub const DIFFICULTY_PER_LEVEL: f32 = 0.2;

    /// Spawn interval shrinks by score / divisor, floored at the minimum
    pub const BASE_SPAWN_INTERVAL_MS: f32 = 2000.0;
    pub const MIN_SPAWN_INTERVAL_MS: f32 = 500.0;
    pub const SPAWN_INTERVAL_SCORE_DIVISOR: f32 = 10.0;

    /// Damage the player takes from ramming an enemy
    pub const CONTACT_DAMAGE: f32 = 20.0;
    pub const POWERUP_DROP_CHANCE: f32 = 0.1;

    /// Player defaults - ship stats scale speed by 3 and health by 10
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    /// Distance of the spawn point above the arena floor
    pub const PLAYER_SPAWN_OFFSET: f32 = 80.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const SHIP_SPEED_SCALE: f32 = 3.0;
    pub const PLAYER_HEALTH: f32 = 100.0;
    pub const SHIP_HEALTH_SCALE: f32 = 10.0;
    pub const PLAYER_FIRE_RATE: f32 = 5.0;
    pub const PLAYER_DAMAGE: f32 = 10.0;
    pub const PLAYER_BULLET_SPEED: f32 = 10.0;
    pub const INVULNERABLE_MS: f32 = 1000.0;

    /// Projectile hit box
    pub const PROJECTILE_WIDTH: f32 = 6.0;
    pub const PROJECTILE_HEIGHT: f32 = 15.0;
    /// Trail life lost per tick
    pub const PROJECTILE_TRAIL_DECAY: f32 = 0.1;

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = 25.0;
    pub const ENEMY_SPAWN_Y: f32 = -30.0;
    /// Horizontal spawn margin from either arena edge
    pub const ENEMY_SPAWN_MARGIN: f32 = 15.0;
    /// How far below the arena an enemy travels before it counts as escaped
    pub const ENEMY_ESCAPE_MARGIN: f32 = 50.0;
    pub const ENEMY_BULLET_SPEED: f32 = 4.0;
    pub const ENEMY_BULLET_DAMAGE: f32 = 10.0;
    pub const SINE_AMPLITUDE: f32 = 2.0;
    pub const SINE_PHASE_STEP: f32 = 0.02;

    /// Power-ups
    pub const POWERUP_SIZE: f32 = 30.0;
    pub const POWERUP_FALL_SPEED: f32 = 2.0;
    pub const POWERUP_HEAL: f32 = 30.0;
    pub const POWERUP_SPEED_BONUS: f32 = 2.0;
    pub const POWERUP_SPEED_CAP: f32 = 15.0;
    pub const POWERUP_DAMAGE_BONUS: f32 = 5.0;
    pub const SHIELD_MS: f32 = 3000.0;

    /// Cosmetic effects
    pub const EXPLOSION_PARTICLES: usize = 15;
    pub const MAX_PARTICLES: usize = 512;
    pub const STAR_COUNT: usize = 100;
}

/// Level reached for a given score (1-based)
#[inline]
pub fn level_for_score(score: u64) -> u32 {
    (score / consts::SCORE_PER_LEVEL) as u32 + 1
}

/// Difficulty multiplier for a level
#[inline]
pub fn difficulty_for_level(level: u32) -> f32 {
    1.0 + level.saturating_sub(1) as f32 * consts::DIFFICULTY_PER_LEVEL
}

/// Spawn interval after a spawn at the given score
#[inline]
pub fn spawn_interval_for_score(score: u64) -> f32 {
    (consts::BASE_SPAWN_INTERVAL_MS - score as f32 / consts::SPAWN_INTERVAL_SCORE_DIVISOR)
        .max(consts::MIN_SPAWN_INTERVAL_MS)
}
