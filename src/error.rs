//! Configuration errors
//!
//! The simulation itself cannot fail; everything that can go wrong is caught
//! when a `Tuning` or `ShipStats` is handed to the engine.

use std::fmt;

/// Which ship stat a rejected value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipStat {
    Speed,
    Health,
    FireRate,
    Damage,
}

impl fmt::Display for ShipStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Speed => write!(f, "speed"),
            Self::Health => write!(f, "health"),
            Self::FireRate => write!(f, "fire_rate"),
            Self::Damage => write!(f, "damage"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidShipStat { stat: ShipStat, value: f32 },
    InvalidArena { width: f32, height: f32 },
    InvalidFrameClamp { max_frame_dt_ms: f32 },
    InvalidDropChance { chance: f32 },
    InvalidContactDamage { damage: f32 },
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidShipStat { stat, value } => {
                write!(f, "ship stat {stat} must be finite and non-negative, got {value}")
            }
            Self::InvalidArena { width, height } => {
                write!(f, "arena must be finite and fit the ship, got {width}x{height}")
            }
            Self::InvalidFrameClamp { max_frame_dt_ms } => {
                write!(f, "max frame delta must be positive, got {max_frame_dt_ms} ms")
            }
            Self::InvalidDropChance { chance } => {
                write!(f, "power-up drop chance must be within 0..=1, got {chance}")
            }
            Self::InvalidContactDamage { damage } => {
                write!(f, "contact damage must be finite and non-negative, got {damage}")
            }
            Self::Parse(msg) => write!(f, "invalid tuning json: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
