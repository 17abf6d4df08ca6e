//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation deterministically. Phases run
//! in a fixed order every tick:
//!
//! 0. Commands: player presses (attacks, purchases)
//! 1. Spawn: periodic reinforcements
//! 2. Transients: projectile and ball motion, out-of-bounds culling
//! 3. Collisions: projectile hits, ball/platform contacts, slide contacts
//! 4. Mobiles: targeting, movement, cooldown decay, automatic attacks
//! 5. Cull: remove (or knock out) combatants at zero health

use super::collision::{
    resolve_ball_platform_contacts, resolve_projectile_hits, resolve_slide_contacts,
};
use super::cooldown::Action;
use super::entity::{Combatant, Team};
use super::events::{GameEvent, TickResult};
use super::geom::distance;
use super::state::{AttackPolicy, GamePhase, GameState, MovementPolicy, pair_mut};

/// One player's controls for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInput {
    /// Held: walk left
    pub left: bool,
    /// Held: walk right
    pub right: bool,
    /// Held: jump when on the floor
    pub jump: bool,
    /// Pressed this tick
    pub slide: bool,
    pub kick: bool,
    pub strike: bool,
    pub cast: bool,
}

impl PlayerInput {
    /// Horizontal walk direction (-1, 0 or 1)
    pub fn walk_dir(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Per-player controls, indexed by [`Team::slot`]
    pub players: [PlayerInput; 2],
    /// Buy a ball (ball breaker)
    pub buy_ball: bool,
}

impl TickInput {
    /// Drop one-shot presses, keeping held controls
    pub fn clear_presses(&mut self) {
        for p in &mut self.players {
            p.slide = false;
            p.kick = false;
            p.strike = false;
            p.cast = false;
        }
        self.buy_ball = false;
    }
}

/// Advance the game state by one fixed tick
pub fn tick(state: &mut GameState, input: &TickInput) -> TickResult {
    let mut result = TickResult::default();

    if state.is_over() {
        result.game_over = true;
        return result;
    }

    state.time_ticks += 1;
    decay_notice(state);

    apply_commands(state, input, &mut result.events);
    spawn_phase(state, &mut result.events);
    transient_phase(state);
    collision_phase(state, &mut result.events);
    mobile_phase(state, input, &mut result.events);
    cull_phase(state, &mut result.events);

    // Ensure deterministic ordering
    state.normalize_order();

    result.game_over = state.is_over();
    result
}

/// Index of the nearest living opponent of `combatants[index]`
///
/// Linear scan in stored order by Euclidean distance. Only a strictly
/// smaller distance replaces the current best, so ties go to the first
/// opponent encountered.
pub fn nearest_opponent(combatants: &[Combatant], index: usize) -> Option<usize> {
    let me = &combatants[index];
    let mut best: Option<(usize, f32)> = None;

    for (j, other) in combatants.iter().enumerate() {
        if other.team == me.team || !other.is_alive() {
            continue;
        }
        let d = distance(me.pos, other.pos);
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((j, d));
        }
    }

    best.map(|(j, _)| j)
}

fn decay_notice(state: &mut GameState) {
    if let Some(notice) = &mut state.notice {
        notice.ticks_left = notice.ticks_left.saturating_sub(1);
        if notice.ticks_left == 0 {
            state.notice = None;
        }
    }
}

fn apply_commands(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    if input.buy_ball && state.caps.purchases {
        let money = state.wallet.money;
        let cost = state.tuning.breaker.ball.cost;
        if state.buy_ball() {
            if let Some(ball) = state.balls.last() {
                events.push(GameEvent::BallPurchased {
                    ball: ball.id,
                    money_left: state.wallet.money,
                });
            }
        } else {
            events.push(GameEvent::PurchaseRejected { money, cost });
        }
    }

    if state.caps.attack != AttackPolicy::OnCommand {
        return;
    }

    let fighter = state.tuning.fighter.clone();
    for team in Team::ALL {
        let Some(i) = state.player_index(team) else {
            continue;
        };
        let cmd = input.players[team.slot()];

        if cmd.slide {
            state.combatants[i].try_slide(&fighter.slide);
        }

        let opponent = nearest_opponent(&state.combatants, i);
        for (pressed, action, mv) in [
            (cmd.kick, Action::Kick, &fighter.kick),
            (cmd.strike, Action::Strike, &fighter.strike),
        ] {
            let (true, Some(j)) = (pressed, opponent) else {
                continue;
            };
            let (attacker, victim) = pair_mut(&mut state.combatants, i, j);
            let before = victim.health.current();
            if attacker.try_hit(victim, action, mv) {
                events.push(GameEvent::MeleeHit {
                    attacker: attacker.id,
                    target: victim.id,
                    action,
                    damage: before - victim.health.current(),
                });
            }
        }

        if cmd.cast && state.combatants[i].cooldowns.ready(Action::Cast) {
            let id = state.next_entity_id();
            if let Some(projectile) = state.combatants[i].try_cast(id, &fighter.cast) {
                events.push(GameEvent::Fired {
                    shooter: state.combatants[i].id,
                    projectile: projectile.id,
                });
                state.projectiles.push(projectile);
            }
        }
    }
}

fn spawn_phase(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if !state.caps.periodic_spawn {
        return;
    }

    state.spawn_timer += 1;
    if state.spawn_timer >= state.tuning.battle.spawn_delay {
        state.spawn_timer = 0;
        for team in Team::ALL {
            let id = state.spawn_soldier(team);
            events.push(GameEvent::Spawned { id, team });
        }
    }
}

fn transient_phase(state: &mut GameState) {
    let field = state.field;

    for projectile in &mut state.projectiles {
        projectile.advance();
    }
    state.projectiles.retain(|p| p.is_alive(&field));

    for ball in &mut state.balls {
        ball.tick_cooldowns();
        ball.advance(&field);
    }
    state.balls.retain(|b| b.is_alive(&field));
}

fn collision_phase(state: &mut GameState, events: &mut Vec<GameEvent>) {
    resolve_projectile_hits(
        &mut state.projectiles,
        &mut state.combatants,
        state.tuning.fighter.cast.chill_ticks,
        events,
    );
    state.projectiles.retain(|p| !p.spent);

    let first_new = events.len();
    resolve_ball_platform_contacts(
        &mut state.balls,
        &mut state.platforms,
        &state.tuning.breaker,
        events,
    );
    for event in &events[first_new..] {
        if let GameEvent::PlatformDestroyed { score, money, .. } = event {
            state.wallet.score += score;
            state.wallet.money += money;
        }
    }
    state.platforms.retain(|p| p.is_alive());

    if state.caps.movement == MovementPolicy::Controlled {
        resolve_slide_contacts(&mut state.combatants, &state.tuning.fighter.slide, events);
    }
}

fn mobile_phase(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    match state.caps.movement {
        MovementPolicy::SeekNearest => seek_and_attack(state, events),
        MovementPolicy::Controlled => controlled_movement(state, input),
        MovementPolicy::None => {}
    }

    for platform in &mut state.platforms {
        platform.tick_cooldowns();
    }
}

fn seek_and_attack(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let soldier = state.tuning.battle.soldier.clone();
    let bullet = state.tuning.battle.bullet;

    for i in 0..state.combatants.len() {
        if !state.combatants[i].is_alive() {
            continue;
        }

        let target = nearest_opponent(&state.combatants, i);
        let target_id = target.map(|j| state.combatants[j].id);
        state.combatants[i].target = target_id;

        if let Some(j) = target {
            let target_pos = state.combatants[j].pos;
            state.combatants[i].move_toward(target_pos, soldier.speed, soldier.engage_range);
        }

        state.combatants[i].tick_cooldowns();

        let Some(j) = target else {
            continue;
        };
        match state.caps.attack {
            AttackPolicy::Ranged => {
                if !state.combatants[i].cooldowns.ready(Action::Shoot) {
                    continue;
                }
                let id = state.next_entity_id();
                let target_pos = state.combatants[j].pos;
                if let Some(projectile) =
                    state.combatants[i].try_shoot(id, target_pos, soldier.shoot_delay, &bullet)
                {
                    log::debug!("{:?} fired {:?}", state.combatants[i].id, id);
                    events.push(GameEvent::Fired {
                        shooter: state.combatants[i].id,
                        projectile: id,
                    });
                    state.projectiles.push(projectile);
                }
            }
            AttackPolicy::Melee => {
                let (attacker, victim) = pair_mut(&mut state.combatants, i, j);
                let before = victim.health.current();
                if attacker.try_melee(victim, &soldier) {
                    events.push(GameEvent::MeleeHit {
                        attacker: attacker.id,
                        target: victim.id,
                        action: Action::Attack,
                        damage: before - victim.health.current(),
                    });
                }
            }
            AttackPolicy::OnCommand | AttackPolicy::None => {}
        }
    }
}

fn controlled_movement(state: &mut GameState, input: &TickInput) {
    let fighter = state.tuning.fighter.clone();
    let field = state.field;

    for i in 0..state.combatants.len() {
        let target_id = nearest_opponent(&state.combatants, i).map(|j| state.combatants[j].id);
        let c = &mut state.combatants[i];
        if !c.is_alive() {
            continue;
        }
        c.target = target_id;

        let held = input.players[c.team.slot()];
        c.walk(held.walk_dir(), &fighter);
        if held.jump {
            c.jump(&fighter);
        }
        c.integrate(&field, &fighter);
        c.tick_cooldowns();
    }
}

fn cull_phase(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.caps.knockout_ends_game {
        let down: Vec<Team> = state
            .combatants
            .iter()
            .filter(|c| !c.is_alive())
            .map(|c| c.team)
            .collect();
        let Some(&first) = down.first() else {
            return;
        };
        // Both sides down on the same tick is a draw
        let winner = down
            .iter()
            .all(|&team| team == first)
            .then(|| first.opponent());
        log::info!("Knockout! Winner: {:?}", winner);
        state.phase = GamePhase::GameOver { winner };
        events.push(GameEvent::Knockout { winner });
        return;
    }

    for c in state.combatants.iter().filter(|c| !c.is_alive()) {
        log::debug!("{:?} soldier {:?} eliminated", c.team, c.id);
        events.push(GameEvent::Eliminated {
            id: c.id,
            team: c.team,
        });
    }
    state.combatants.retain(|c| c.is_alive());
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use proptest::prelude::*;

    use super::*;
    use crate::sim::entity::{Ball, EntityId, Facing, Platform};
    use crate::sim::geom::{Playfield, Rect};
    use crate::sim::state::Variant;
    use crate::tuning::{SoldierTuning, Tuning};

    fn new_state(variant: Variant) -> GameState {
        GameState::new(variant, Playfield::default(), Tuning::default(), 12345)
    }

    fn soldier(id: u32, team: Team, x: f32, y: f32) -> Combatant {
        Combatant::soldier(EntityId(id), team, Vec2::new(x, y), &SoldierTuning::default())
    }

    #[test]
    fn test_nearest_opponent_picks_closest() {
        let combatants = vec![
            soldier(1, Team::Red, 0.0, 0.0),
            soldier(2, Team::Blue, 5.0, 0.0),
            soldier(3, Team::Blue, 0.0, 3.0),
            soldier(4, Team::Blue, 9.0, 0.0),
        ];
        assert_eq!(nearest_opponent(&combatants, 0), Some(2));
    }

    #[test]
    fn test_nearest_opponent_tie_goes_to_first() {
        let combatants = vec![
            soldier(1, Team::Red, 0.0, 0.0),
            soldier(2, Team::Red, 1.0, 0.0),
            soldier(3, Team::Blue, 0.0, 4.0),
            soldier(4, Team::Blue, 4.0, 0.0),
            soldier(5, Team::Blue, -4.0, 0.0),
        ];
        assert_eq!(nearest_opponent(&combatants, 0), Some(2));
    }

    #[test]
    fn test_nearest_opponent_skips_dead() {
        let mut combatants = vec![
            soldier(1, Team::Red, 0.0, 0.0),
            soldier(2, Team::Blue, 1.0, 0.0),
            soldier(3, Team::Blue, 10.0, 0.0),
        ];
        combatants[1].health.damage(1000);
        assert_eq!(nearest_opponent(&combatants, 0), Some(2));
        assert_eq!(nearest_opponent(&combatants[..2], 0), None);
    }

    #[test]
    fn test_projectile_hits_once_and_is_removed() {
        let mut tuning = Tuning::default();
        tuning.battle.bullet.speed = 95.0;
        let mut state = GameState::new(Variant::Battle, Playfield::default(), tuning, 1);
        state.combatants.clear();

        let mut shooter = soldier(100, Team::Red, 100.0, 300.0);
        let enemy = soldier(101, Team::Blue, 200.0, 300.0);
        shooter.cooldowns.set(Action::Shoot, 0);
        let bullet = state.tuning.battle.bullet;
        let projectile = shooter
            .try_shoot(EntityId(102), enemy.pos, 60, &bullet)
            .unwrap();
        state.combatants = vec![shooter, enemy];
        state.projectiles.push(projectile);

        let result = tick(&mut state, &TickInput::default());
        assert!(result.events.contains(&GameEvent::ProjectileHit {
            projectile: EntityId(102),
            target: EntityId(101),
            damage: 20,
        }));
        assert!(state.projectiles.is_empty());
        let enemy = state.combatant(EntityId(101)).unwrap();
        assert_eq!(enemy.health.current(), 80);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.combatant(EntityId(101)).unwrap().health.current(), 80);
    }

    #[test]
    fn test_periodic_spawn() {
        let mut state = new_state(Variant::Battle);
        state.combatants.clear();

        for _ in 0..179 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.combatants.is_empty());

        let result = tick(&mut state, &TickInput::default());
        assert_eq!(state.team_count(Team::Red), 1);
        assert_eq!(state.team_count(Team::Blue), 1);
        let spawned = result
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::Spawned { .. }))
            .count();
        assert_eq!(spawned, 2);
        assert_eq!(state.spawn_timer, 0);
    }

    #[test]
    fn test_soldiers_close_in_and_shoot() {
        let mut state = new_state(Variant::Battle);
        let red_start = state.combatants[0].pos;

        let mut fired = 0;
        for _ in 0..60 {
            let result = tick(&mut state, &TickInput::default());
            fired += result
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::Fired { .. }))
                .count();
        }
        let red = &state.combatants[0];
        assert!(red.pos.x > red_start.x);
        assert!(state.target_of(red).is_some_and(|t| t.team == Team::Blue));
        // Every soldier fires once its initial delay runs out
        assert_eq!(fired, 10);
    }

    #[test]
    fn test_dead_soldier_culled_same_tick() {
        let mut state = new_state(Variant::Battle);
        let victim = state.combatants[0].id;
        state.combatants[0].health.damage(1000);

        let result = tick(&mut state, &TickInput::default());
        assert!(state.combatant(victim).is_none());
        assert!(result.events.contains(&GameEvent::Eliminated {
            id: victim,
            team: Team::Red,
        }));
        assert!(state.combatants.iter().all(|c| c.is_alive()));
    }

    #[test]
    fn test_melee_policy() {
        let mut tuning = Tuning::default();
        tuning.battle.soldier.weapon = crate::tuning::SoldierWeapon::Melee;
        let mut state = GameState::new(Variant::Battle, Playfield::default(), tuning, 1);
        state.combatants = vec![
            soldier(100, Team::Red, 100.0, 300.0),
            soldier(101, Team::Blue, 130.0, 300.0),
        ];

        let result = tick(&mut state, &TickInput::default());
        assert!(state.projectiles.is_empty());
        let hits = result
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::MeleeHit { action: Action::Attack, .. }))
            .count();
        assert_eq!(hits, 2);
        assert!(state.combatants.iter().all(|c| c.health.current() == 90));
    }

    #[test]
    fn test_buy_ball_via_input() {
        let mut state = new_state(Variant::Breaker);
        let input = TickInput {
            buy_ball: true,
            ..Default::default()
        };

        let result = tick(&mut state, &input);
        assert_eq!(state.wallet.money, 80);
        assert_eq!(state.balls.len(), 1);
        assert!(matches!(
            result.events[0],
            GameEvent::BallPurchased { money_left: 80, .. }
        ));

        state.wallet.money = 10;
        let result = tick(&mut state, &input);
        assert_eq!(state.wallet.money, 10);
        assert_eq!(state.balls.len(), 1);
        assert_eq!(
            result.events[0],
            GameEvent::PurchaseRejected { money: 10, cost: 20 }
        );
        assert!(state.notice.is_some());
    }

    #[test]
    fn test_notice_expires() {
        let mut state = new_state(Variant::Breaker);
        state.wallet.money = 0;
        assert!(!state.buy_ball());
        for _ in 0..crate::consts::NOTICE_TICKS {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.notice.is_none());
    }

    #[test]
    fn test_destroyed_platform_rewards_wallet() {
        let mut state = new_state(Variant::Breaker);
        let id = state.next_entity_id();
        state.platforms = vec![Platform::new(id, Rect::new(100.0, 100.0, 80.0, 20.0), 1)];
        let ball_id = state.next_entity_id();
        state.balls.push(Ball::new(
            ball_id,
            Vec2::new(140.0, 90.0),
            std::f32::consts::FRAC_PI_2,
            &state.tuning.breaker.ball,
            [255; 3],
        ));

        let result = tick(&mut state, &TickInput::default());
        assert!(state.platforms.is_empty());
        assert_eq!(state.wallet.score, 10);
        assert_eq!(state.wallet.money, 105);
        assert!(state.balls[0].vel.y < 0.0);
        assert!(result.events.iter().any(|e| matches!(e, GameEvent::PlatformDestroyed { .. })));
    }

    #[test]
    fn test_platform_damaged_once_under_overlap() {
        let mut state = new_state(Variant::Breaker);
        let id = state.next_entity_id();
        state.platforms = vec![Platform::new(id, Rect::new(100.0, 100.0, 80.0, 20.0), 5)];
        let ball_id = state.next_entity_id();
        let mut ball = Ball::new(ball_id, Vec2::new(140.0, 110.0), 0.0, &state.tuning.breaker.ball, [255; 3]);
        ball.vel = Vec2::ZERO;
        state.balls.push(ball);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.platforms[0].health.current(), 4);

        // Parked inside: one more hit per elapsed cooldown, never more
        for _ in 0..9 {
            tick(&mut state, &TickInput::default());
            assert_eq!(state.platforms[0].health.current(), 4);
        }
        tick(&mut state, &TickInput::default());
        assert_eq!(state.platforms[0].health.current(), 3);
    }

    #[test]
    fn test_fighter_walk_and_jump() {
        let mut state = new_state(Variant::Fighter);
        let mut input = TickInput::default();
        input.players[0].right = true;
        input.players[1].jump = true;

        tick(&mut state, &input);
        assert_eq!(state.combatants[0].pos.x, 205.0);
        assert!(state.combatants[1].airborne);
        assert!(state.combatants[1].pos.y < 500.0);
    }

    #[test]
    fn test_fighter_kick_through_commands() {
        let mut state = new_state(Variant::Fighter);
        state.combatants[1].pos.x = 260.0;
        let mut input = TickInput::default();
        input.players[0].kick = true;

        let result = tick(&mut state, &input);
        assert_eq!(state.combatants[1].health.current(), 85);
        assert!(result.events.iter().any(|e| matches!(
            e,
            GameEvent::MeleeHit { action: Action::Kick, damage: 15, .. }
        )));

        // Held press during cooldown does nothing
        tick(&mut state, &input);
        assert_eq!(state.combatants[1].health.current(), 85);
    }

    #[test]
    fn test_fighter_cast_travels_and_chills() {
        let mut state = new_state(Variant::Fighter);
        let mut input = TickInput::default();
        input.players[1].cast = true;

        let result = tick(&mut state, &input);
        assert_eq!(state.projectiles.len(), 1);
        assert!(result.events.iter().any(|e| matches!(e, GameEvent::Fired { .. })));

        let quiet = TickInput::default();
        for _ in 0..60 {
            tick(&mut state, &quiet);
        }
        assert!(state.projectiles.is_empty());
        let red = &state.combatants[0];
        assert_eq!(red.health.current(), 80);
        assert!(!red.cooldowns.ready(Action::Chill));
    }

    #[test]
    fn test_fighter_slide_contact() {
        let mut state = new_state(Variant::Fighter);
        state.combatants[1].pos.x = 240.0;
        let mut input = TickInput::default();
        input.players[0].slide = true;

        // Slide starts in commands, moves in the mobile phase, connects next tick
        tick(&mut state, &input);
        let result = tick(&mut state, &TickInput::default());
        assert!(result.events.iter().any(|e| matches!(
            e,
            GameEvent::MeleeHit { action: Action::Slide, .. }
        )));
        assert_eq!(state.combatants[1].health.current(), 85);
        assert!(!state.combatants[0].is_sliding());
    }

    #[test]
    fn test_knockout_ends_game() {
        let mut state = new_state(Variant::Fighter);
        state.combatants[1].pos.x = 250.0;
        state.combatants[1].health.damage(95);
        let mut input = TickInput::default();
        input.players[0].strike = true;

        let result = tick(&mut state, &input);
        assert!(result.game_over);
        assert_eq!(state.phase, GamePhase::GameOver { winner: Some(Team::Red) });
        assert!(result.events.contains(&GameEvent::Knockout { winner: Some(Team::Red) }));
        // Fighters are never removed
        assert_eq!(state.combatants.len(), 2);

        let ticks = state.time_ticks;
        let result = tick(&mut state, &input);
        assert!(result.game_over);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_double_knockout_is_draw() {
        let mut state = new_state(Variant::Fighter);
        state.combatants[0].pos.x = 300.0;
        state.combatants[1].pos.x = 340.0;
        state.combatants[0].health.damage(80);
        state.combatants[1].health.damage(90);

        // Blue's cast starts 40 px out and closes 8 px a tick
        let mut input = TickInput::default();
        input.players[1].cast = true;
        tick(&mut state, &input);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.combatants[0].health.current(), 20);

        // Red's strike fells blue while the cast lands on red
        let mut input = TickInput::default();
        input.players[0].strike = true;
        let result = tick(&mut state, &input);
        assert!(state.combatants.iter().all(|c| !c.is_alive()));
        assert!(result.game_over);
        assert_eq!(state.phase, GamePhase::GameOver { winner: None });
        assert!(result.events.contains(&GameEvent::Knockout { winner: None }));
        assert!(!result.events.iter().any(|e| matches!(e, GameEvent::Eliminated { .. })));
        assert_eq!(state.combatants.len(), 2);
    }

    #[test]
    fn test_facing_follows_input() {
        let mut state = new_state(Variant::Fighter);
        assert_eq!(state.combatants[0].facing, Facing::Right);
        let mut input = TickInput::default();
        input.players[0].left = true;
        tick(&mut state, &input);
        assert_eq!(state.combatants[0].facing, Facing::Left);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = new_state(Variant::Breaker);
        let mut state2 = new_state(Variant::Breaker);
        let buy = TickInput {
            buy_ball: true,
            ..Default::default()
        };

        for t in 0..600 {
            let input = if t % 100 == 0 { buy.clone() } else { TickInput::default() };
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.balls.len(), state2.balls.len());
        assert_eq!(state1.wallet, state2.wallet);
        for (a, b) in state1.balls.iter().zip(&state2.balls) {
            assert_eq!(a.pos, b.pos);
        }
    }

    proptest! {
        #[test]
        fn prop_battle_health_bounded(seed in any::<u64>(), ticks in 1usize..400) {
            let mut state = GameState::new(Variant::Battle, Playfield::default(), Tuning::default(), seed);
            for _ in 0..ticks {
                tick(&mut state, &TickInput::default());
                for c in &state.combatants {
                    prop_assert!(c.health.current() <= c.health.max());
                    prop_assert!(c.is_alive());
                }
            }
        }

        #[test]
        fn prop_balls_stay_in_bounds(seed in any::<u64>(), buys in 1usize..5, ticks in 1usize..600) {
            let mut state = GameState::new(Variant::Breaker, Playfield::default(), Tuning::default(), seed);
            for _ in 0..buys {
                state.buy_ball();
            }
            for _ in 0..ticks {
                tick(&mut state, &TickInput::default());
                for ball in &state.balls {
                    prop_assert!(ball.pos.x >= ball.radius && ball.pos.x <= state.field.width - ball.radius);
                    prop_assert!(ball.pos.y >= ball.radius && ball.pos.y <= state.field.height - ball.radius);
                }
                for p in &state.platforms {
                    prop_assert!(p.is_alive());
                }
            }
        }
    }
}
