//! Fixed-rate frame driver
//!
//! Each frame: poll input once, run as many fixed simulation ticks as the
//! elapsed time allows (bounded by [`MAX_SUBSTEPS`]), render once, then wait
//! for the next frame deadline.

use std::time::Duration;

use crate::bindings::Bindings;
use crate::consts::MAX_SUBSTEPS;
use crate::platform::{Clock, InputSource};
use crate::renderer::Renderer;
use crate::sim::{GameEvent, GamePhase, GameState, Team, TickInput, tick};

/// Longest frame gap fed into the accumulator
const MAX_FRAME_GAP: Duration = Duration::from_millis(100);

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The quit key was pressed
    Quit,
    /// The game reached a terminal state
    GameOver,
    /// The configured tick limit was reached
    TickLimit,
}

/// What happened over a whole run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub reason: StopReason,
    pub frames: u64,
    pub ticks: u64,
    pub winner: Option<Team>,
    pub score: u64,
    pub money: u32,
    pub eliminated: u64,
}

/// Owns the game state and its collaborators for the length of a run
pub struct FrameDriver<I, R, C> {
    state: GameState,
    bindings: Bindings,
    input: I,
    renderer: R,
    clock: C,
    tick_dt: Duration,
    max_ticks: Option<u64>,
    accumulator: Duration,
    last_frame: Duration,
    /// Input carried into the next tick; presses survive until a tick consumes them
    pending: TickInput,
    frames: u64,
    eliminated: u64,
}

impl<I: InputSource, R: Renderer, C: Clock> FrameDriver<I, R, C> {
    pub fn new(
        state: GameState,
        bindings: Bindings,
        input: I,
        renderer: R,
        clock: C,
        tick_rate: u32,
    ) -> Self {
        let last_frame = clock.now();
        Self {
            state,
            bindings,
            input,
            renderer,
            clock,
            tick_dt: Duration::from_secs(1) / tick_rate.max(1),
            max_ticks: None,
            accumulator: Duration::ZERO,
            last_frame,
            pending: TickInput::default(),
            frames: 0,
            eliminated: 0,
        }
    }

    /// Stop after `max_ticks` simulation ticks
    pub fn with_tick_limit(mut self, max_ticks: Option<u64>) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Run frames until quit, game over or the tick limit
    pub fn run(&mut self) -> RunSummary {
        log::info!(
            "Running {} at {:?} per tick",
            self.state.variant.as_str(),
            self.tick_dt
        );
        loop {
            if let Some(reason) = self.frame() {
                let summary = self.summary(reason);
                log::info!("Run finished: {:?}", summary);
                return summary;
            }
        }
    }

    /// Run one frame; returns the stop reason once the run is over
    pub fn frame(&mut self) -> Option<StopReason> {
        let frame_start = self.clock.now();
        let gap = frame_start.saturating_sub(self.last_frame).min(MAX_FRAME_GAP);
        self.last_frame = frame_start;
        self.accumulator += gap;
        self.frames += 1;

        let snapshot = self.input.poll();
        if self.bindings.quit_requested(&snapshot) {
            log::info!("Quit requested");
            return Some(StopReason::Quit);
        }
        self.merge_input(self.bindings.translate(&snapshot));

        let mut stop = None;
        let mut substeps = 0;
        while self.accumulator >= self.tick_dt && substeps < MAX_SUBSTEPS {
            let result = tick(&mut self.state, &self.pending);
            self.accumulator -= self.tick_dt;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.pending.clear_presses();

            for event in &result.events {
                self.record(event);
            }
            if result.game_over {
                stop = Some(StopReason::GameOver);
                break;
            }
            if self.max_ticks.is_some_and(|max| self.state.time_ticks >= max) {
                stop = Some(StopReason::TickLimit);
                break;
            }
        }

        // Drop the backlog rather than spiral
        if substeps == MAX_SUBSTEPS {
            self.accumulator = Duration::ZERO;
        }

        self.renderer.render(&self.state);

        if stop.is_none() {
            self.clock.wait_until(frame_start + self.tick_dt);
        }
        stop
    }

    /// Held controls follow the latest frame; presses accumulate until used
    fn merge_input(&mut self, fresh: TickInput) {
        for (pending, fresh) in self.pending.players.iter_mut().zip(fresh.players) {
            pending.left = fresh.left;
            pending.right = fresh.right;
            pending.jump = fresh.jump;
            pending.slide |= fresh.slide;
            pending.kick |= fresh.kick;
            pending.strike |= fresh.strike;
            pending.cast |= fresh.cast;
        }
        self.pending.buy_ball |= fresh.buy_ball;
    }

    fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Eliminated { .. } => self.eliminated += 1,
            GameEvent::PurchaseRejected { money, cost } => {
                log::debug!("Purchase rejected: {} < {}", money, cost);
            }
            other => log::trace!("{:?}", other),
        }
    }

    fn summary(&self, reason: StopReason) -> RunSummary {
        RunSummary {
            reason,
            frames: self.frames,
            ticks: self.state.time_ticks,
            winner: match self.state.phase {
                GamePhase::GameOver { winner } => winner,
                GamePhase::Running => None,
            },
            score: self.state.wallet.score,
            money: self.state.wallet.money,
            eliminated: self.eliminated,
        }
    }
}
