//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by team, then entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod cooldown;
pub mod entity;
pub mod events;
pub mod geom;
pub mod state;
pub mod tick;

pub use cooldown::{Action, Cooldowns};
pub use entity::{
    Ball, Combatant, CombatantKind, Element, EntityId, Facing, Health, HealthTier, Platform,
    Projectile, Team,
};
pub use events::{GameEvent, TickResult};
pub use geom::{Playfield, Rect};
pub use state::{Capabilities, GamePhase, GameState, Variant, Wallet};
pub use tick::{PlayerInput, TickInput, nearest_opponent, tick};
