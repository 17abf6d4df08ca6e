//! Key bindings
//!
//! Maps each player's controls to input codes and translates a frame's
//! [`InputSnapshot`] into the simulation's [`TickInput`].

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::platform::InputSnapshot;
use crate::settings::read_json;
use crate::sim::{PlayerInput, TickInput};

/// Number of player slots the fighting variant drives
pub const PLAYER_COUNT: usize = 2;

/// A bindable player action
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Control {
    Left,
    Right,
    Jump,
    Slide,
    Kick,
    Strike,
    Cast,
}

impl Control {
    pub const ALL: [Control; 7] = [
        Control::Left,
        Control::Right,
        Control::Jump,
        Control::Slide,
        Control::Kick,
        Control::Strike,
        Control::Cast,
    ];

    /// Held controls act every tick the key is down; the rest fire once per press
    pub fn is_held(self) -> bool {
        matches!(self, Control::Left | Control::Right | Control::Jump)
    }

    fn apply(self, input: &mut PlayerInput) {
        match self {
            Control::Left => input.left = true,
            Control::Right => input.right = true,
            Control::Jump => input.jump = true,
            Control::Slide => input.slide = true,
            Control::Kick => input.kick = true,
            Control::Strike => input.strike = true,
            Control::Cast => input.cast = true,
        }
    }
}

/// Control-to-code maps for both players plus the global keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bindings {
    /// One map per player slot (player 1 first)
    pub players: Vec<BTreeMap<Control, String>>,
    /// Buy a ball (ball breaker)
    pub buy: String,
    /// Leave the run
    pub quit: String,
}

impl Default for Bindings {
    fn default() -> Self {
        let player = |codes: [&str; 7]| -> BTreeMap<Control, String> {
            Control::ALL
                .into_iter()
                .zip(codes)
                .map(|(control, code)| (control, code.to_string()))
                .collect()
        };

        Self {
            players: vec![
                player(["a", "d", "w", "s", "q", "e", "z"]),
                player([
                    "arrowleft",
                    "arrowright",
                    "arrowup",
                    "arrowdown",
                    "slash",
                    "period",
                    "quote",
                ]),
            ],
            buy: "space".to_string(),
            quit: "escape".to_string(),
        }
    }
}

impl Bindings {
    /// Load bindings from a JSON file and check them for conflicts
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let bindings: Self = read_json(path)?;
        bindings.validate()?;
        log::info!("Loaded key bindings from {}", path.display());
        Ok(bindings)
    }

    /// Reject bindings with the wrong player count or a code bound twice
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players.len() != PLAYER_COUNT {
            return Err(ConfigError::Invalid(format!(
                "expected {} player binding maps, found {}",
                PLAYER_COUNT,
                self.players.len()
            )));
        }

        let mut seen = BTreeSet::new();
        let codes = self
            .players
            .iter()
            .flat_map(|p| p.values())
            .chain([&self.buy, &self.quit]);
        for code in codes {
            if code.is_empty() {
                return Err(ConfigError::Invalid("empty key code".into()));
            }
            if !seen.insert(code.as_str()) {
                return Err(ConfigError::Invalid(format!("key '{}' bound twice", code)));
            }
        }
        Ok(())
    }

    pub fn quit_requested(&self, snapshot: &InputSnapshot) -> bool {
        snapshot.is_down(&self.quit)
    }

    /// Translate one frame of key state into simulation input
    pub fn translate(&self, snapshot: &InputSnapshot) -> TickInput {
        let mut input = TickInput::default();

        for (slot, map) in self.players.iter().take(PLAYER_COUNT).enumerate() {
            for (&control, code) in map {
                let active = if control.is_held() {
                    snapshot.is_down(code)
                } else {
                    snapshot.was_pressed(code)
                };
                if active {
                    control.apply(&mut input.players[slot]);
                }
            }
        }

        input.buy_ball = snapshot.was_pressed(&self.buy);
        input
    }
}
