//! Game events
//!
//! Everything notable that happened during a tick, in the order it happened.
//! The frame driver logs them; tests assert on them.

use super::cooldown::Action;
use super::entity::{EntityId, Team};

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A combatant entered play
    Spawned { id: EntityId, team: Team },
    /// A combatant fired or cast a projectile
    Fired { shooter: EntityId, projectile: EntityId },
    ProjectileHit {
        projectile: EntityId,
        target: EntityId,
        damage: u32,
    },
    /// Direct-contact damage (melee, strike, kick, slide)
    MeleeHit {
        attacker: EntityId,
        target: EntityId,
        action: Action,
        damage: u32,
    },
    /// A combatant reached zero health and left play
    Eliminated { id: EntityId, team: Team },
    PlatformHit {
        ball: EntityId,
        platform: EntityId,
        remaining: u32,
    },
    /// A platform was destroyed, granting the listed reward
    PlatformDestroyed {
        platform: EntityId,
        score: u64,
        money: u32,
    },
    BallPurchased { ball: EntityId, money_left: u32 },
    PurchaseRejected { money: u32, cost: u32 },
    /// Terminal condition; `winner` is None on a double knockout
    Knockout { winner: Option<Team> },
}

/// Result of a tick
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick
    pub events: Vec<GameEvent>,
    /// Whether the game has reached a terminal state
    pub game_over: bool,
}
