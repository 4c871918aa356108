//! Data-driven configuration
//!
//! `Tuning` carries arena and balance knobs for an engine; `ShipStats` is the
//! per-session loadout supplied by whoever picked the player's ship.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, ShipStat};

/// Engine-wide gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Arena width in pixels
    pub arena_width: f32,
    /// Arena height in pixels
    pub arena_height: f32,
    /// Frame delta clamp (ms) applied after stalls
    pub max_frame_dt_ms: f32,
    /// Damage dealt to the player when an enemy rams it
    pub contact_damage: f32,
    /// Chance a destroyed enemy drops a power-up
    pub powerup_drop_chance: f32,
    /// Scale enemy speed with difficulty as well as health and score
    pub scale_enemy_speed: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            max_frame_dt_ms: MAX_FRAME_DT_MS,
            contact_damage: CONTACT_DAMAGE,
            powerup_drop_chance: POWERUP_DROP_CHANCE,
            scale_enemy_speed: false,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (w, h) = (self.arena_width, self.arena_height);
        // The ship must fit inside the arena
        if !(w.is_finite() && h.is_finite() && w >= PLAYER_WIDTH && h >= PLAYER_HEIGHT) {
            return Err(ConfigError::InvalidArena {
                width: w,
                height: h,
            });
        }
        if !(self.max_frame_dt_ms.is_finite() && self.max_frame_dt_ms > 0.0) {
            return Err(ConfigError::InvalidFrameClamp {
                max_frame_dt_ms: self.max_frame_dt_ms,
            });
        }
        if !(0.0..=1.0).contains(&self.powerup_drop_chance) {
            return Err(ConfigError::InvalidDropChance {
                chance: self.powerup_drop_chance,
            });
        }
        if !(self.contact_damage.is_finite() && self.contact_damage >= 0.0) {
            return Err(ConfigError::InvalidContactDamage {
                damage: self.contact_damage,
            });
        }
        Ok(())
    }
}

/// Ship loadout from an external "selected ship" source.
///
/// Every field is optional; a missing or zero value falls back to the stock
/// ship. `speed` and `health` are multipliers (x3 and x10), `fire_rate` is
/// shots per second and `damage` is damage per projectile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipStats {
    pub speed: Option<f32>,
    pub health: Option<f32>,
    pub fire_rate: Option<f32>,
    pub damage: Option<f32>,
}

/// Concrete player stats after defaults and scaling are applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Loadout {
    pub speed: f32,
    pub max_health: f32,
    pub fire_rate: f32,
    pub damage: f32,
}

impl Default for Loadout {
    fn default() -> Self {
        Self {
            speed: PLAYER_SPEED,
            max_health: PLAYER_HEALTH,
            fire_rate: PLAYER_FIRE_RATE,
            damage: PLAYER_DAMAGE,
        }
    }
}

impl ShipStats {
    /// Reject non-finite or negative values, and values whose scaled stat
    /// overflows
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            (ShipStat::Speed, self.speed),
            (ShipStat::Health, self.health),
            (ShipStat::FireRate, self.fire_rate),
            (ShipStat::Damage, self.damage),
        ];
        for (stat, value) in fields {
            if let Some(value) = value {
                if !value.is_finite() || value < 0.0 {
                    return Err(ConfigError::InvalidShipStat { stat, value });
                }
            }
        }

        let loadout = self.loadout();
        let resolved = [
            (ShipStat::Speed, self.speed, loadout.speed),
            (ShipStat::Health, self.health, loadout.max_health),
            (ShipStat::FireRate, self.fire_rate, 1000.0 / loadout.fire_rate),
            (ShipStat::Damage, self.damage, loadout.damage),
        ];
        for (stat, raw, scaled) in resolved {
            if !scaled.is_finite() {
                return Err(ConfigError::InvalidShipStat {
                    stat,
                    value: raw.unwrap_or(scaled),
                });
            }
        }
        Ok(())
    }

    /// Resolve into concrete player stats. Call `validate` first.
    pub fn loadout(&self) -> Loadout {
        let base = Loadout::default();
        let set = |v: Option<f32>| v.filter(|v| *v > 0.0);
        Loadout {
            speed: set(self.speed).map_or(base.speed, |s| s * SHIP_SPEED_SCALE),
            max_health: set(self.health).map_or(base.max_health, |h| h * SHIP_HEALTH_SCALE),
            fire_rate: set(self.fire_rate).unwrap_or(base.fire_rate),
            damage: set(self.damage).unwrap_or(base.damage),
        }
    }
}
