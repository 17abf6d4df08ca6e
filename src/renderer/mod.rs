//! Rendering module
//!
//! The simulation never draws. Once per frame the driver hands a shared
//! reference to the game state to a [`Renderer`]; backends turn it into
//! pixels via [`scene::build_scene`].

pub mod scene;

pub use scene::{DrawCmd, build_scene};

use crate::sim::{GameState, Team, Variant};

/// Read-only consumer of the game state, called once per frame
pub trait Renderer {
    fn render(&mut self, state: &GameState);
}

/// Headless stand-in that logs a one-line summary every `every` frames
#[derive(Debug, Clone)]
pub struct LogRenderer {
    every: u64,
    frames: u64,
    last_draw_count: usize,
}

impl LogRenderer {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            frames: 0,
            last_draw_count: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Primitives in the most recently built scene
    pub fn last_draw_count(&self) -> usize {
        self.last_draw_count
    }
}

impl Renderer for LogRenderer {
    fn render(&mut self, state: &GameState) {
        self.frames += 1;
        self.last_draw_count = build_scene(state).len();
        if self.frames % self.every != 0 {
            return;
        }

        match state.variant {
            Variant::Battle => log::info!(
                "tick {}: red {} blue {} shots {}",
                state.time_ticks,
                state.team_count(Team::Red),
                state.team_count(Team::Blue),
                state.projectiles.len()
            ),
            Variant::Breaker => log::info!(
                "tick {}: score {} money {} balls {} platforms {}",
                state.time_ticks,
                state.wallet.score,
                state.wallet.money,
                state.balls.len(),
                state.platforms.len()
            ),
            Variant::Fighter => {
                let hp: Vec<u32> = state.combatants.iter().map(|c| c.health.current()).collect();
                log::info!("tick {}: health {:?}", state.time_ticks, hp);
            }
        }
    }
}
