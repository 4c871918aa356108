//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only from the injected frame delta
//! - Seeded RNG only (gameplay and cosmetic streams kept apart)
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod enemy;
pub mod engine;
pub mod event;
pub mod player;
pub mod powerup;
pub mod projectile;
pub mod state;
pub mod tick;

pub use collision::{Circle, Rect, circles_intersect, intersects, point_in_box, swept_intersects};
pub use effects::{ExhaustPuff, Particle, Star, Starfield, spawn_explosion};
pub use enemy::{ArchetypeStats, Enemy, EnemyKind, MovementPattern};
pub use engine::Engine;
pub use event::{Callback, EnemyDescriptor, GameEvent, GameListener, SessionSummary};
pub use player::Player;
pub use powerup::{PowerUp, PowerUpKind};
pub use projectile::{Owner, Projectile, TrailPoint};
pub use state::{GamePhase, GameState, RngState};
pub use tick::{TickInput, tick};
