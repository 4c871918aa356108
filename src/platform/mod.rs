//! Platform abstraction layer
//!
//! Maps host key names (as reported by `KeyboardEvent.key`) onto the logical
//! controls the simulation reads. Movement and fire are held states sampled
//! once per tick; pause and new-game are one-shot commands.

use serde::{Deserialize, Serialize};

use crate::sim::state::GamePhase;
use crate::sim::tick::TickInput;

/// One-shot commands raised on key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyCommand {
    TogglePause,
    NewGame,
}

impl KeyCommand {
    /// Whether the command applies in `phase`.
    ///
    /// New game is only honored from pause or game over.
    pub fn allowed_in(self, phase: GamePhase) -> bool {
        match self {
            KeyCommand::TogglePause => matches!(phase, GamePhase::Running | GamePhase::Paused),
            KeyCommand::NewGame => matches!(phase, GamePhase::Paused | GamePhase::GameOver),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Left,
    Right,
    Up,
    Down,
    Fire,
}

fn control_for(key: &str) -> Option<Control> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(Control::Left),
        "ArrowRight" | "d" | "D" => Some(Control::Right),
        "ArrowUp" | "w" | "W" => Some(Control::Up),
        "ArrowDown" | "s" | "S" => Some(Control::Down),
        " " | "Spacebar" => Some(Control::Fire),
        _ => None,
    }
}

fn command_for(key: &str) -> Option<KeyCommand> {
    match key {
        "Escape" => Some(KeyCommand::TogglePause),
        "n" | "N" => Some(KeyCommand::NewGame),
        _ => None,
    }
}

/// Held-key tracker
#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    held: TickInput,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns a command for one-shot keys.
    pub fn key_down(&mut self, key: &str) -> Option<KeyCommand> {
        if let Some(control) = control_for(key) {
            self.set(control, true);
            return None;
        }
        command_for(key)
    }

    pub fn key_up(&mut self, key: &str) {
        if let Some(control) = control_for(key) {
            self.set(control, false);
        }
    }

    /// Controls held right now
    pub fn snapshot(&self) -> TickInput {
        self.held
    }

    /// Release everything (focus lost)
    pub fn clear(&mut self) {
        self.held = TickInput::default();
    }

    fn set(&mut self, control: Control, down: bool) {
        match control {
            Control::Left => self.held.left = down,
            Control::Right => self.held.right = down,
            Control::Up => self.held.up = down,
            Control::Down => self.held.down = down,
            Control::Fire => self.held.fire = down,
        }
    }
}
