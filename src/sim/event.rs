//! Events raised by the simulation
//!
//! These are the core's only outputs. Listeners are invoked synchronously
//! inside a tick and must not call back into the engine.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::enemy::{Enemy, EnemyKind};
use super::powerup::PowerUpKind;

/// Snapshot of a destroyed enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyDescriptor {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub score_value: u64,
}

impl From<&Enemy> for EnemyDescriptor {
    fn from(enemy: &Enemy) -> Self {
        Self {
            id: enemy.id,
            kind: enemy.kind,
            pos: enemy.pos,
            score_value: enemy.score_value,
        }
    }
}

/// Final result of a session, handed to reward/leaderboard collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub score: u64,
    pub level: u32,
    pub difficulty: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// Raised every tick, changed or not
    ScoreChanged { score: u64 },
    LivesChanged { lives: u8 },
    LevelChanged { level: u32 },
    EnemyKilled(EnemyDescriptor),
    PowerUpCollected { kind: PowerUpKind },
    GameOver(SessionSummary),
}

/// Receiver for simulation events
pub trait GameListener {
    fn on_event(&mut self, event: &GameEvent);
}

/// Collects every event, in order
impl GameListener for Vec<GameEvent> {
    fn on_event(&mut self, event: &GameEvent) {
        self.push(event.clone());
    }
}

/// Discards everything
impl GameListener for () {
    fn on_event(&mut self, _event: &GameEvent) {}
}

/// Adapts a closure into a listener
pub struct Callback<F>(pub F);

impl<F: FnMut(&GameEvent)> GameListener for Callback<F> {
    fn on_event(&mut self, event: &GameEvent) {
        (self.0)(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_listener_records_in_order() {
        let mut log: Vec<GameEvent> = Vec::new();
        log.on_event(&GameEvent::LivesChanged { lives: 2 });
        log.on_event(&GameEvent::ScoreChanged { score: 10 });
        assert_eq!(
            log,
            vec![
                GameEvent::LivesChanged { lives: 2 },
                GameEvent::ScoreChanged { score: 10 }
            ]
        );
    }

    #[test]
    fn test_callback_listener() {
        let mut total = 0;
        {
            let mut listener = Callback(|e: &GameEvent| {
                if let GameEvent::ScoreChanged { score } = e {
                    total += *score;
                }
            });
            listener.on_event(&GameEvent::ScoreChanged { score: 5 });
            listener.on_event(&GameEvent::ScoreChanged { score: 7 });
        }
        assert_eq!(total, 12);
    }

    #[test]
    fn test_game_over_json_shape() {
        let event = GameEvent::GameOver(SessionSummary {
            score: 1230,
            level: 3,
            difficulty: 1.4,
        });
        let value: serde_json::Value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "game_over");
        assert_eq!(value["score"], 1230);
        assert_eq!(value["level"], 3);
    }
}
