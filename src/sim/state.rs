//! Game state and variant capability tables
//!
//! One aggregate holds every live collection. The simulation step owns it
//! exclusively for the duration of a tick; the renderer only ever reads it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Ball, Combatant, EntityId, Facing, Platform, Projectile, Team};
use super::geom::Playfield;
use crate::consts::NOTICE_TICKS;
use crate::tuning::{SoldierWeapon, Tuning};

/// Which game is being simulated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Two armies of soldiers spawning and shooting at each other
    #[default]
    Battle,
    /// Purchased balls bouncing around and breaking platforms
    Breaker,
    /// Two player-controlled fighters
    Fighter,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Battle => "battle",
            Variant::Breaker => "breaker",
            Variant::Fighter => "fighter",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "battle" => Some(Variant::Battle),
            "breaker" | "ball-breaker" => Some(Variant::Breaker),
            "fighter" | "fight" => Some(Variant::Fighter),
            _ => None,
        }
    }

    /// Capability table consulted by the simulation step
    pub fn capabilities(&self, tuning: &Tuning) -> Capabilities {
        match self {
            Variant::Battle => Capabilities {
                movement: MovementPolicy::SeekNearest,
                attack: match tuning.battle.soldier.weapon {
                    SoldierWeapon::Ranged => AttackPolicy::Ranged,
                    SoldierWeapon::Melee => AttackPolicy::Melee,
                },
                periodic_spawn: true,
                purchases: false,
                knockout_ends_game: false,
            },
            Variant::Breaker => Capabilities {
                movement: MovementPolicy::None,
                attack: AttackPolicy::None,
                periodic_spawn: false,
                purchases: true,
                knockout_ends_game: false,
            },
            Variant::Fighter => Capabilities {
                movement: MovementPolicy::Controlled,
                attack: AttackPolicy::OnCommand,
                periodic_spawn: false,
                purchases: false,
                knockout_ends_game: true,
            },
        }
    }
}

/// How combatants move each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementPolicy {
    None,
    /// Walk toward the nearest opponent until within engagement range
    SeekNearest,
    /// Held input, gravity, floor plane and slide impulse
    Controlled,
}

/// How combatants deal damage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackPolicy {
    None,
    /// Shoot at the current target whenever the shot cooldown allows
    Ranged,
    /// Hit the current target directly when in range
    Melee,
    /// Only in response to player commands
    OnCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub movement: MovementPolicy,
    pub attack: AttackPolicy,
    pub periodic_spawn: bool,
    pub purchases: bool,
    /// Zero health ends the game instead of removing the combatant
    pub knockout_ends_game: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Running,
    GameOver { winner: Option<Team> },
}

/// Score and spendable currency (ball breaker)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Wallet {
    pub money: u32,
    pub score: u64,
}

/// Short message shown to the player for a limited time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub ticks_left: u32,
}

impl Notice {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ticks_left: NOTICE_TICKS,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub variant: Variant,
    pub caps: Capabilities,
    pub tuning: Tuning,
    pub field: Playfield,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Soldiers or fighters, kept sorted by (team, id)
    pub combatants: Vec<Combatant>,
    pub projectiles: Vec<Projectile>,
    pub balls: Vec<Ball>,
    /// Platforms in layout order
    pub platforms: Vec<Platform>,
    /// Ticks since the last periodic spawn
    pub spawn_timer: u32,
    pub wallet: Wallet,
    pub notice: Option<Notice>,
    rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a fresh game of `variant`
    pub fn new(variant: Variant, field: Playfield, tuning: Tuning, seed: u64) -> Self {
        let mut state = Self {
            variant,
            caps: variant.capabilities(&tuning),
            field,
            seed,
            time_ticks: 0,
            phase: GamePhase::Running,
            combatants: Vec::new(),
            projectiles: Vec::new(),
            balls: Vec::new(),
            platforms: Vec::new(),
            spawn_timer: 0,
            wallet: Wallet::default(),
            notice: None,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            tuning,
        };

        match variant {
            Variant::Battle => {
                for _ in 0..state.tuning.battle.initial_per_side {
                    for team in Team::ALL {
                        state.spawn_soldier(team);
                    }
                }
            }
            Variant::Breaker => {
                state.wallet.money = state.tuning.breaker.start_money;
                let layout = state.tuning.breaker.layout.clone();
                for spec in layout {
                    let id = state.next_entity_id();
                    state.platforms.push(Platform::new(id, spec.rect, spec.health));
                }
            }
            Variant::Fighter => {
                let floor = field.height - state.tuning.fighter.floor_inset;
                let inset = state.tuning.fighter.start_inset;
                state.spawn_fighter(Team::Red, Vec2::new(inset, floor), Facing::Right);
                state.spawn_fighter(Team::Blue, Vec2::new(field.width - inset, floor), Facing::Left);
            }
        }

        state.normalize_order();
        log::info!(
            "New {} game (seed {}): {} combatants, {} platforms",
            variant.as_str(),
            seed,
            state.combatants.len(),
            state.platforms.len()
        );
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Fixed base position for a team's soldiers
    pub fn base_position(&self, team: Team) -> Vec2 {
        let battle = &self.tuning.battle;
        let y = self.field.height - battle.base_rise;
        match team {
            Team::Red => Vec2::new(battle.base_inset, y),
            Team::Blue => Vec2::new(self.field.width - battle.base_inset, y),
        }
    }

    /// Add a soldier at its team's base
    pub fn spawn_soldier(&mut self, team: Team) -> EntityId {
        let id = self.next_entity_id();
        let pos = self.base_position(team);
        self.combatants
            .push(Combatant::soldier(id, team, pos, &self.tuning.battle.soldier));
        log::debug!("Spawned {:?} soldier {:?}", team, id);
        id
    }

    fn spawn_fighter(&mut self, team: Team, pos: Vec2, facing: Facing) -> EntityId {
        let id = self.next_entity_id();
        self.combatants
            .push(Combatant::fighter(id, team, pos, facing, &self.tuning.fighter));
        id
    }

    /// Buy a ball if the wallet covers its cost
    ///
    /// On success the ball appears at the playfield centre heading in a
    /// uniformly random direction. On failure nothing changes except a
    /// transient notice.
    pub fn buy_ball(&mut self) -> bool {
        let cost = self.tuning.breaker.ball.cost;
        if self.wallet.money < cost {
            log::warn!("Not enough money! ({} < {})", self.wallet.money, cost);
            self.notice = Some(Notice::new("Not enough money!"));
            return false;
        }
        self.wallet.money -= cost;

        let id = self.next_entity_id();
        let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
        let tint = [
            self.rng.random_range(100..=255u8),
            self.rng.random_range(100..=255u8),
            self.rng.random_range(100..=255u8),
        ];
        let center = self.field.center();
        self.balls
            .push(Ball::new(id, center, angle, &self.tuning.breaker.ball, tint));
        log::info!("Bought ball {:?}, {} money left", id, self.wallet.money);
        true
    }

    pub fn combatant(&self, id: EntityId) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.id == id)
    }

    /// Resolve a combatant's target, treating stale ids as no target
    pub fn target_of(&self, combatant: &Combatant) -> Option<&Combatant> {
        combatant
            .target
            .and_then(|id| self.combatant(id))
            .filter(|t| t.is_alive())
    }

    /// Index of the first living combatant on `team`
    pub fn player_index(&self, team: Team) -> Option<usize> {
        self.combatants
            .iter()
            .position(|c| c.team == team && c.is_alive())
    }

    pub fn team_count(&self, team: Team) -> usize {
        self.combatants.iter().filter(|c| c.team == team).count()
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver { .. })
    }

    /// Ensure collections are sorted for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.combatants.sort_by_key(|c| (c.team, c.id));
        self.projectiles.sort_by_key(|p| p.id);
        self.balls.sort_by_key(|b| b.id);
        self.platforms.sort_by_key(|p| p.id);
    }
}

/// Mutable references to two distinct elements of a slice
pub fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    assert_ne!(a, b, "pair_mut needs distinct indices");
    if a < b {
        let (lo, hi) = items.split_at_mut(b);
        (&mut lo[a], &mut hi[0])
    } else {
        let (lo, hi) = items.split_at_mut(a);
        (&mut hi[0], &mut lo[b])
    }
}
