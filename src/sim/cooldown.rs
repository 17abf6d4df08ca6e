//! Enum-keyed cooldown timers
//!
//! Every action an entity can repeat is gated by a countdown measured in
//! ticks. An action is ready only when its counter is zero.

use serde::{Deserialize, Serialize};

/// Actions gated by a cooldown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Soldier melee attack
    Attack,
    /// Soldier ranged shot
    Shoot,
    /// Fighter basic strike (punch)
    Strike,
    /// Fighter heavy strike with knock-up
    Kick,
    /// Fighter dash along the floor
    Slide,
    /// Fighter ranged cast
    Cast,
    /// Damage intake (platforms ignore hits while nonzero)
    Intake,
    /// Remaining ticks of an ice slow
    Chill,
}

impl Action {
    pub const COUNT: usize = 8;

    pub const ALL: [Action; Self::COUNT] = [
        Action::Attack,
        Action::Shoot,
        Action::Strike,
        Action::Kick,
        Action::Slide,
        Action::Cast,
        Action::Intake,
        Action::Chill,
    ];

    #[inline]
    const fn index(self) -> usize {
        self as usize
    }
}

/// Fixed-size table of per-action countdowns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cooldowns {
    remaining: [u32; Action::COUNT],
}

impl Cooldowns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decrement every nonzero timer by one (never below zero)
    pub fn tick(&mut self) {
        for t in &mut self.remaining {
            *t = t.saturating_sub(1);
        }
    }

    #[inline]
    pub fn ready(&self, action: Action) -> bool {
        self.remaining[action.index()] == 0
    }

    #[inline]
    pub fn remaining(&self, action: Action) -> u32 {
        self.remaining[action.index()]
    }

    /// Start (or restart) the countdown for `action`
    #[inline]
    pub fn set(&mut self, action: Action, ticks: u32) {
        self.remaining[action.index()] = ticks;
    }

    /// If `action` is ready, start its countdown and return true
    pub fn try_use(&mut self, action: Action, ticks: u32) -> bool {
        if self.ready(action) {
            self.set(action, ticks);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_use_gates_until_zero() {
        let mut cd = Cooldowns::new();
        assert!(cd.try_use(Action::Kick, 2));
        assert!(!cd.try_use(Action::Kick, 2));

        cd.tick();
        assert_eq!(cd.remaining(Action::Kick), 1);
        assert!(!cd.ready(Action::Kick));

        cd.tick();
        assert!(cd.try_use(Action::Kick, 2));
    }

    #[test]
    fn test_tick_saturates_and_is_independent() {
        let mut cd = Cooldowns::new();
        cd.set(Action::Slide, 1);
        cd.set(Action::Cast, 5);
        for _ in 0..3 {
            cd.tick();
        }
        assert_eq!(cd.remaining(Action::Slide), 0);
        assert_eq!(cd.remaining(Action::Cast), 2);
        assert!(Action::ALL.iter().filter(|a| **a != Action::Cast).all(|a| cd.ready(*a)));
    }
}
