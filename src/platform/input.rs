//! Input snapshots and input sources
//!
//! An [`InputSnapshot`] is what the frame driver sees of the keyboard for
//! one frame: the codes held down and the codes pressed since the previous
//! poll. Codes are the lowercase key names used by [`Bindings`].

use std::collections::{BTreeSet, VecDeque};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::InputSource;
use crate::bindings::Bindings;

/// Key state for one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub held: BTreeSet<String>,
    pub pressed: BTreeSet<String>,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: mark `code` as held
    pub fn hold(mut self, code: &str) -> Self {
        self.held.insert(code.to_string());
        self
    }

    /// Builder: mark `code` as pressed this frame
    pub fn press(mut self, code: &str) -> Self {
        self.pressed.insert(code.to_string());
        self
    }

    /// Held now, or tapped and released within the frame
    pub fn is_down(&self, code: &str) -> bool {
        self.held.contains(code) || self.pressed.contains(code)
    }

    pub fn was_pressed(&self, code: &str) -> bool {
        self.pressed.contains(code)
    }
}

/// Replays a fixed list of snapshots, then reports no input
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputSnapshot>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = InputSnapshot>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> InputSnapshot {
        self.frames.pop_front().unwrap_or_default()
    }
}

/// Frames between re-rolls of the held keys
const DEMO_HOLD_FRAMES: u64 = 30;
/// Chance per frame that any one press-edge key fires
const DEMO_PRESS_CHANCE: f64 = 1.0 / 40.0;
/// Chance that a held key is down for the next hold window
const DEMO_HOLD_CHANCE: f64 = 0.3;

/// Seeded pseudo-player mashing the bound keys
///
/// Used by the headless binary so every variant has something to do without
/// a keyboard attached. The quit key is never pressed.
#[derive(Debug, Clone)]
pub struct DemoInput {
    rng: Pcg32,
    hold_codes: Vec<String>,
    press_codes: Vec<String>,
    held: BTreeSet<String>,
    frame: u64,
}

impl DemoInput {
    pub fn new(seed: u64, bindings: &Bindings) -> Self {
        let mut hold_codes = Vec::new();
        let mut press_codes = vec![bindings.buy.clone()];
        for player in &bindings.players {
            for (control, code) in player {
                if control.is_held() {
                    hold_codes.push(code.clone());
                } else {
                    press_codes.push(code.clone());
                }
            }
        }

        Self {
            rng: Pcg32::seed_from_u64(seed),
            hold_codes,
            press_codes,
            held: BTreeSet::new(),
            frame: 0,
        }
    }
}

impl InputSource for DemoInput {
    fn poll(&mut self) -> InputSnapshot {
        if self.frame % DEMO_HOLD_FRAMES == 0 {
            self.held.clear();
            for code in &self.hold_codes {
                if self.rng.random_bool(DEMO_HOLD_CHANCE) {
                    self.held.insert(code.clone());
                }
            }
        }
        self.frame += 1;

        let mut pressed = BTreeSet::new();
        for code in &self.press_codes {
            if self.rng.random_bool(DEMO_PRESS_CHANCE) {
                pressed.insert(code.clone());
            }
        }

        InputSnapshot {
            held: self.held.clone(),
            pressed,
        }
    }
}
