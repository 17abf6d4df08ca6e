//! Collision detection and response
//!
//! Pairwise contact tests between transients, mobiles and platforms. Each
//! resolver mutates the entities it touches and reports what happened as
//! [`GameEvent`]s. Entities destroyed during a pass are skipped for the rest
//! of it and swept by the caller afterwards, so iteration never observes a
//! removal.

use glam::Vec2;

use super::cooldown::Action;
use super::entity::{Axis, Ball, Combatant, Element, Platform, Projectile};
use super::events::GameEvent;
use super::geom::{Rect, circle_intersects_rect, within_reach};
use crate::tuning::{BreakerTuning, SlideTuning};

/// Does `projectile` strike `target`?
///
/// Same-team pairs never collide, and dead targets are ignored.
pub fn projectile_hits(projectile: &Projectile, target: &Combatant) -> bool {
    !projectile.spent
        && projectile.team != target.team
        && target.is_alive()
        && within_reach(projectile.pos, target.pos, projectile.hit)
}

/// Resolve every live projectile against the combatant list
///
/// Targets are tried in stored order and the first match wins, so a
/// projectile damages at most one target. Spent projectiles stay in the
/// list with `spent` set until the caller sweeps them.
pub fn resolve_projectile_hits(
    projectiles: &mut [Projectile],
    combatants: &mut [Combatant],
    chill_ticks: u32,
    events: &mut Vec<GameEvent>,
) {
    for projectile in projectiles.iter_mut() {
        let Some(target) = combatants
            .iter_mut()
            .find(|c| projectile_hits(projectile, c))
        else {
            continue;
        };

        let dealt = target.health.damage(projectile.damage);
        if projectile.element == Some(Element::Ice) && chill_ticks > 0 {
            target.cooldowns.set(Action::Chill, chill_ticks);
        }
        projectile.spent = true;

        log::debug!(
            "Projectile {:?} hit {:?} for {} ({} left)",
            projectile.id,
            target.id,
            dealt,
            target.health.current()
        );
        events.push(GameEvent::ProjectileHit {
            projectile: projectile.id,
            target: target.id,
            damage: dealt,
        });
    }
}

/// Axis to reflect when a ball centred at `pos` touches `rect`
///
/// Compares the ball's offset from the nearer vertical edge against its
/// offset from the nearer horizontal edge; the smaller one is the face it
/// came through. Ties reflect vertically.
pub fn bounce_axis(pos: Vec2, rect: &Rect) -> Axis {
    let (off_x, off_y) = rect.edge_offsets(pos);
    if off_x < off_y { Axis::X } else { Axis::Y }
}

/// Ball-vs-platform contact, honouring the per-pair cooldown
pub fn ball_touches_platform(ball: &Ball, platform: &Platform) -> bool {
    platform.is_alive()
        && ball.can_hit(platform.id)
        && circle_intersects_rect(ball.pos, ball.radius, &platform.rect)
}

/// Resolve all balls against the platform list
///
/// A ball reacts to at most one platform per tick (first in stored order).
/// The bounce is gated by the ball's memory of its last platform; the damage
/// is additionally gated by the platform's own intake cooldown. Destroyed
/// platforms stay in the list with zero health until swept.
pub fn resolve_ball_platform_contacts(
    balls: &mut [Ball],
    platforms: &mut [Platform],
    tuning: &BreakerTuning,
    events: &mut Vec<GameEvent>,
) {
    for ball in balls.iter_mut() {
        let Some(platform) = platforms
            .iter_mut()
            .find(|p| ball_touches_platform(ball, p))
        else {
            continue;
        };

        ball.reflect(bounce_axis(ball.pos, &platform.rect));
        ball.remember_hit(platform.id, tuning.ball.pair_cooldown);

        if !platform.take_damage(tuning.platform_damage, tuning.intake_cooldown) {
            continue;
        }
        events.push(GameEvent::PlatformHit {
            ball: ball.id,
            platform: platform.id,
            remaining: platform.health.current(),
        });
        if !platform.is_alive() {
            log::info!("Platform {:?} destroyed", platform.id);
            events.push(GameEvent::PlatformDestroyed {
                platform: platform.id,
                score: tuning.reward_score,
                money: tuning.reward_money,
            });
        }
    }
}

/// Resolve slide contacts between opposing combatants
///
/// A sliding combatant that reaches an opponent deals damage, shoves the
/// victim along the slide direction and stops sliding. Each slider affects
/// at most one victim (first in stored order).
pub fn resolve_slide_contacts(
    combatants: &mut [Combatant],
    tuning: &SlideTuning,
    events: &mut Vec<GameEvent>,
) {
    for i in 0..combatants.len() {
        let slider = &combatants[i];
        if !slider.is_alive() || !slider.is_sliding() {
            continue;
        }
        let Some(j) = combatants.iter().position(|other| {
            other.team != slider.team
                && other.is_alive()
                && within_reach(slider.pos, other.pos, tuning.contact)
        }) else {
            continue;
        };

        let push = tuning.push * combatants[i].facing.sign();
        let attacker = combatants[i].id;
        combatants[i].slide = None;

        let victim = &mut combatants[j];
        let dealt = victim.health.damage(tuning.damage);
        victim.pos.x += push;

        events.push(GameEvent::MeleeHit {
            attacker,
            target: victim.id,
            action: Action::Slide,
            damage: dealt,
        });
    }
}
