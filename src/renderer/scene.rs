//! Scene building for 2D primitives
//!
//! Turns a read-only view of the game state into a flat list of draw
//! commands. Backends only need to know how to draw lines, filled circles,
//! filled rectangles and text.

use glam::Vec2;

use crate::sim::geom::direction_to;
use crate::sim::{
    Combatant, CombatantKind, Element, GamePhase, GameState, HealthTier, Projectile, Team, Variant,
};

pub type Color = [f32; 4];

const BLACK: Color = [0.0, 0.0, 0.0, 1.0];
const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
const GREY: Color = [0.3, 0.3, 0.3, 1.0];
const RED: Color = [0.9, 0.2, 0.2, 1.0];
const BLUE: Color = [0.2, 0.4, 0.95, 1.0];
const FIRE: Color = [1.0, 0.55, 0.1, 1.0];
const ICE: Color = [0.6, 0.9, 1.0, 1.0];
const GUN: Color = [0.75, 0.75, 0.75, 1.0];

/// Width of a health bar at full health
pub const HEALTH_BAR_WIDTH: f32 = 40.0;
pub const HEALTH_BAR_HEIGHT: f32 = 5.0;
/// Gap between a platform's top edge and its health bar
const PLATFORM_BAR_GAP: f32 = 10.0;
/// Soldier gun length at scale 1.0
const GUN_LENGTH: f32 = 18.0;

/// One primitive for a backend to draw
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Line { from: Vec2, to: Vec2, width: f32, color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
    Rect { min: Vec2, size: Vec2, color: Color },
    Text { pos: Vec2, text: String, color: Color },
}

/// Colour for a health tier (green, yellow, red)
pub fn tier_color(tier: HealthTier) -> Color {
    match tier {
        HealthTier::Healthy => [0.2, 0.85, 0.3, 1.0],
        HealthTier::Worn => [0.95, 0.85, 0.2, 1.0],
        HealthTier::Critical => [0.9, 0.2, 0.2, 1.0],
    }
}

fn team_color(team: Team) -> Color {
    match team {
        Team::Red => RED,
        Team::Blue => BLUE,
    }
}

fn tint_color(tint: [u8; 3]) -> Color {
    [
        tint[0] as f32 / 255.0,
        tint[1] as f32 / 255.0,
        tint[2] as f32 / 255.0,
        1.0,
    ]
}

/// Background plus a foreground proportional to `fraction`
///
/// `top_left` is the top-left corner of the full-width bar.
pub fn health_bar(top_left: Vec2, width: f32, fraction: f32, tier: HealthTier) -> [DrawCmd; 2] {
    let size = Vec2::new(width, HEALTH_BAR_HEIGHT);
    [
        DrawCmd::Rect {
            min: top_left,
            size,
            color: GREY,
        },
        DrawCmd::Rect {
            min: top_left,
            size: Vec2::new(width * fraction.clamp(0.0, 1.0), HEALTH_BAR_HEIGHT),
            color: tier_color(tier),
        },
    ]
}

/// Stick figure standing with its feet at `feet`
///
/// `scale` 1.0 is a 50 pixel tall soldier. The leading arm points along the
/// facing direction.
pub fn stick_figure(feet: Vec2, facing: f32, scale: f32, color: Color) -> Vec<DrawCmd> {
    let head_r = 8.0 * scale;
    let hip = feet - Vec2::new(0.0, 20.0 * scale);
    let neck = hip - Vec2::new(0.0, 22.0 * scale);
    let head = neck - Vec2::new(0.0, head_r);
    let shoulder = neck + Vec2::new(0.0, 4.0 * scale);
    let width = 2.0 * scale;

    let line = |from: Vec2, to: Vec2| DrawCmd::Line {
        from,
        to,
        width,
        color,
    };

    vec![
        DrawCmd::Circle {
            center: head,
            radius: head_r,
            color,
        },
        line(neck, hip),
        line(hip, feet + Vec2::new(-8.0 * scale, 0.0)),
        line(hip, feet + Vec2::new(8.0 * scale, 0.0)),
        line(shoulder, shoulder + Vec2::new(14.0 * scale * facing, 4.0 * scale)),
        line(shoulder, shoulder + Vec2::new(-8.0 * scale * facing, 12.0 * scale)),
    ]
}

/// Shoulder height of a stick figure above its feet
fn shoulder(feet: Vec2, scale: f32) -> Vec2 {
    feet - Vec2::new(0.0, 38.0 * scale)
}

fn combatant(state: &GameState, c: &Combatant, out: &mut Vec<DrawCmd>) {
    let scale = match c.kind {
        CombatantKind::Soldier => 1.0,
        CombatantKind::Fighter => 1.6,
    };
    out.extend(stick_figure(c.pos, c.facing.sign(), scale, team_color(c.team)));

    if c.kind == CombatantKind::Soldier {
        // Aim at the current target, or level along the facing when it is gone
        let from = shoulder(c.pos, scale);
        let aim = state
            .target_of(c)
            .and_then(|target| direction_to(from, shoulder(target.pos, scale)))
            .unwrap_or(Vec2::new(c.facing.sign(), 0.0));
        out.push(DrawCmd::Line {
            from,
            to: from + aim * GUN_LENGTH * scale,
            width: 3.0 * scale,
            color: GUN,
        });
    }

    let bar_width = HEALTH_BAR_WIDTH * scale;
    let top = c.pos - Vec2::new(bar_width / 2.0, 70.0 * scale);
    out.extend(health_bar(top, bar_width, c.health.fraction(), c.health.tier()));
}

fn projectile(p: &Projectile, out: &mut Vec<DrawCmd>) {
    let (radius, color) = match p.element {
        Some(Element::Fire) => (8.0, FIRE),
        Some(Element::Ice) => (8.0, ICE),
        None => (3.0, team_color(p.team)),
    };
    out.push(DrawCmd::Circle {
        center: p.pos,
        radius,
        color,
    });
}

/// Build the full draw list for one frame
///
/// Order is background, platforms, combatants, projectiles, balls, HUD.
pub fn build_scene(state: &GameState) -> Vec<DrawCmd> {
    let mut out = vec![DrawCmd::Rect {
        min: Vec2::ZERO,
        size: Vec2::new(state.field.width, state.field.height),
        color: BLACK,
    }];

    for platform in &state.platforms {
        out.push(DrawCmd::Rect {
            min: Vec2::new(platform.rect.x, platform.rect.y),
            size: Vec2::new(platform.rect.width, platform.rect.height),
            color: tier_color(platform.tier()),
        });
        out.extend(health_bar(
            Vec2::new(platform.rect.x, platform.rect.y - PLATFORM_BAR_GAP),
            platform.rect.width,
            platform.health_fraction(),
            platform.tier(),
        ));
    }

    if state.variant == Variant::Fighter {
        let floor = state.field.height - state.tuning.fighter.floor_inset;
        out.push(DrawCmd::Line {
            from: Vec2::new(0.0, floor),
            to: Vec2::new(state.field.width, floor),
            width: 2.0,
            color: WHITE,
        });
    }

    for c in &state.combatants {
        combatant(state, c, &mut out);
    }
    for p in &state.projectiles {
        projectile(p, &mut out);
    }
    for ball in &state.balls {
        out.push(DrawCmd::Circle {
            center: ball.pos,
            radius: ball.radius,
            color: tint_color(ball.tint),
        });
    }

    hud(state, &mut out);
    out
}

fn hud(state: &GameState, out: &mut Vec<DrawCmd>) {
    let text = |pos: Vec2, text: String, color: Color| DrawCmd::Text { pos, text, color };

    match state.variant {
        Variant::Battle => {
            out.push(text(
                Vec2::new(10.0, 10.0),
                format!(
                    "Red: {}  Blue: {}",
                    state.team_count(Team::Red),
                    state.team_count(Team::Blue)
                ),
                WHITE,
            ));
        }
        Variant::Breaker => {
            out.push(text(
                Vec2::new(10.0, 10.0),
                format!("Score: {}", state.wallet.score),
                WHITE,
            ));
            out.push(text(
                Vec2::new(10.0, 30.0),
                format!("Money: {}", state.wallet.money),
                WHITE,
            ));
            out.push(text(
                Vec2::new(10.0, 50.0),
                format!("Ball Cost: {}", state.tuning.breaker.ball.cost),
                WHITE,
            ));
            out.push(text(
                Vec2::new(10.0, 70.0),
                format!("Active Balls: {}", state.balls.len()),
                WHITE,
            ));
            out.push(text(
                Vec2::new(10.0, 90.0),
                format!("Platforms: {}", state.platforms.len()),
                WHITE,
            ));
        }
        Variant::Fighter => {}
    }

    if let Some(notice) = &state.notice {
        out.push(text(state.field.center(), notice.text.clone(), RED));
    }

    if let GamePhase::GameOver { winner } = state.phase {
        let message = match winner {
            Some(Team::Red) => "Player 1 wins!",
            Some(Team::Blue) => "Player 2 wins!",
            None => "Draw!",
        };
        // Below the notice line so both stay readable
        let pos = state.field.center() + Vec2::new(0.0, 40.0);
        out.push(text(pos, message.to_string(), WHITE));
    }
}
