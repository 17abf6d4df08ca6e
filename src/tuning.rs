//! Data-driven gameplay tuning
//!
//! Stat profiles for every entity kind, grouped by variant. Defaults match
//! the original prototypes at 60 ticks per second; all durations are ticks
//! and all speeds are pixels per tick.

use std::path::Path;

use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConfigError;
use crate::sim::geom::{Reach, Rect};

/// How a soldier deals damage once it has a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoldierWeapon {
    /// Fire a bullet toward the target
    #[default]
    Ranged,
    /// Hit the target directly when within `attack_range`
    Melee,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SoldierTuning {
    pub max_health: u32,
    pub speed: f32,
    /// Stop approaching once the target is this close
    pub engage_range: f32,
    /// Melee reach (Euclidean)
    pub attack_range: f32,
    pub attack_damage: u32,
    pub attack_delay: u32,
    pub shoot_delay: u32,
    pub weapon: SoldierWeapon,
}

impl Default for SoldierTuning {
    fn default() -> Self {
        Self {
            max_health: 100,
            speed: 2.0,
            engage_range: 50.0,
            attack_range: 50.0,
            attack_damage: 10,
            attack_delay: 60,
            shoot_delay: 60,
            weapon: SoldierWeapon::Ranged,
        }
    }
}

/// A fired projectile's flight and hit profile
///
/// Defaults to the soldier's bullet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub speed: f32,
    pub damage: u32,
    /// Hit box half-extents around the target's anchor point
    pub hit: Reach,
}

impl ProjectileTuning {
    /// A fighter's elemental cast
    pub const fn elemental() -> Self {
        Self {
            speed: 8.0,
            damage: 20,
            hit: Reach::new(20.0, 30.0),
        }
    }
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            speed: 7.0,
            damage: 20,
            hit: Reach::new(15.0, 20.0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleTuning {
    pub soldier: SoldierTuning,
    pub bullet: ProjectileTuning,
    /// Soldiers per side at game start
    pub initial_per_side: u32,
    pub spawn_delay: u32,
    /// Horizontal distance of each base from its side wall
    pub base_inset: f32,
    /// Height of the bases above the bottom edge
    pub base_rise: f32,
}

impl Default for BattleTuning {
    fn default() -> Self {
        Self {
            soldier: SoldierTuning::default(),
            bullet: ProjectileTuning::default(),
            initial_per_side: 5,
            spawn_delay: 180,
            base_inset: 100.0,
            base_rise: 80.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BallTuning {
    pub speed: f32,
    pub radius: f32,
    pub cost: u32,
    /// Ticks before a ball may hit the same platform again
    pub pair_cooldown: u32,
}

impl Default for BallTuning {
    fn default() -> Self {
        Self {
            speed: 3.0,
            radius: 8.0,
            cost: 20,
            pair_cooldown: 10,
        }
    }
}

/// One entry of the fixed platform layout
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlatformSpec {
    pub rect: Rect,
    pub health: u32,
}

impl PlatformSpec {
    pub const fn new(x: f32, y: f32, width: f32, height: f32, health: u32) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            health,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakerTuning {
    pub ball: BallTuning,
    pub start_money: u32,
    pub platform_damage: u32,
    /// Ticks a platform ignores further hits after taking damage
    pub intake_cooldown: u32,
    pub reward_score: u64,
    pub reward_money: u32,
    pub layout: Vec<PlatformSpec>,
}

impl Default for BreakerTuning {
    fn default() -> Self {
        Self {
            ball: BallTuning::default(),
            start_money: 100,
            platform_damage: 1,
            intake_cooldown: 10,
            reward_score: 10,
            reward_money: 5,
            layout: vec![
                PlatformSpec::new(100.0, 100.0, 80.0, 20.0, 3),
                PlatformSpec::new(300.0, 150.0, 100.0, 25.0, 4),
                PlatformSpec::new(500.0, 120.0, 60.0, 30.0, 2),
                PlatformSpec::new(200.0, 300.0, 120.0, 20.0, 5),
                PlatformSpec::new(400.0, 250.0, 90.0, 25.0, 3),
                PlatformSpec::new(600.0, 200.0, 70.0, 30.0, 4),
                PlatformSpec::new(150.0, 400.0, 110.0, 20.0, 3),
                PlatformSpec::new(350.0, 350.0, 80.0, 25.0, 4),
                PlatformSpec::new(550.0, 380.0, 100.0, 20.0, 6),
            ],
        }
    }
}

/// A direct-contact attack
///
/// Defaults to the basic strike.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct MeleeMove {
    /// Horizontal reach; vertical separation is ignored
    pub range: f32,
    pub damage: u32,
    pub cooldown: u32,
    /// Vertical velocity given to the victim (negative is up, 0 for none)
    pub knock_up: f32,
}

impl MeleeMove {
    pub const fn strike() -> Self {
        Self {
            range: 60.0,
            damage: 10,
            cooldown: 20,
            knock_up: 0.0,
        }
    }

    pub const fn kick() -> Self {
        Self {
            range: 70.0,
            damage: 15,
            cooldown: 30,
            knock_up: -10.0,
        }
    }
}

impl Default for MeleeMove {
    fn default() -> Self {
        Self::strike()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideTuning {
    pub speed: f32,
    pub cooldown: u32,
    /// Per-tick geometric decay of the slide impulse
    pub decay: f32,
    /// The slide ends once the impulse drops below this magnitude
    pub stop_below: f32,
    pub contact: Reach,
    pub damage: u32,
    /// Horizontal displacement applied to the victim
    pub push: f32,
}

impl Default for SlideTuning {
    fn default() -> Self {
        Self {
            speed: 15.0,
            cooldown: 45,
            decay: 0.9,
            stop_below: 0.5,
            contact: Reach::new(30.0, 40.0),
            damage: 15,
            push: 30.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CastTuning {
    #[serde(deserialize_with = "elemental_overrides")]
    pub projectile: ProjectileTuning,
    pub cooldown: u32,
    /// Vertical spawn offset from the caster's anchor
    pub y_offset: f32,
    /// Ticks an ice hit slows its victim
    pub chill_ticks: u32,
}

impl Default for CastTuning {
    fn default() -> Self {
        Self {
            projectile: ProjectileTuning::elemental(),
            cooldown: 60,
            y_offset: -10.0,
            chill_ticks: 60,
        }
    }
}

/// Deserialize `T` as a partial override of `base`
///
/// For fields whose defaults differ from the field type's own `Default`
/// (a kick is not a strike, a cast is not a bullet).
fn overlay<'de, D, T>(base: T, deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Serialize + DeserializeOwned,
{
    let patch = Value::deserialize(deserializer)?;
    let mut value = serde_json::to_value(base).map_err(D::Error::custom)?;
    merge(&mut value, patch);
    serde_json::from_value(value).map_err(D::Error::custom)
}

fn merge(base: &mut Value, patch: Value) {
    match (base, patch) {
        (Value::Object(base), Value::Object(patch)) => {
            for (key, value) in patch {
                merge(base.entry(key).or_insert(Value::Null), value);
            }
        }
        (base, patch) => *base = patch,
    }
}

fn kick_overrides<'de, D: Deserializer<'de>>(deserializer: D) -> Result<MeleeMove, D::Error> {
    overlay(MeleeMove::kick(), deserializer)
}

fn elemental_overrides<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<ProjectileTuning, D::Error> {
    overlay(ProjectileTuning::elemental(), deserializer)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FighterTuning {
    pub max_health: u32,
    pub walk_speed: f32,
    pub chilled_speed: f32,
    pub jump_impulse: f32,
    pub gravity: f32,
    /// Distance of the floor plane above the bottom edge
    pub floor_inset: f32,
    /// Closest a fighter may stand to either side wall
    pub side_margin: f32,
    /// Distance of each start position from its side wall
    pub start_inset: f32,
    pub strike: MeleeMove,
    #[serde(deserialize_with = "kick_overrides")]
    pub kick: MeleeMove,
    pub slide: SlideTuning,
    pub cast: CastTuning,
}

impl Default for FighterTuning {
    fn default() -> Self {
        Self {
            max_health: 100,
            walk_speed: 5.0,
            chilled_speed: 2.0,
            jump_impulse: -15.0,
            gravity: 0.8,
            floor_inset: 100.0,
            side_margin: 50.0,
            start_inset: 200.0,
            strike: MeleeMove::strike(),
            kick: MeleeMove::kick(),
            slide: SlideTuning::default(),
            cast: CastTuning::default(),
        }
    }
}

/// Complete tuning table for all variants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub battle: BattleTuning,
    pub breaker: BreakerTuning,
    pub fighter: FighterTuning,
}

impl Tuning {
    /// Load tuning overrides from a JSON file (missing fields keep defaults)
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let tuning: Self = crate::settings::read_json(path)?;
        tuning.validate()?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.battle.soldier.max_health == 0 || self.fighter.max_health == 0 {
            return Err(ConfigError::Invalid("max_health must be positive".into()));
        }
        if self.breaker.layout.iter().any(|p| p.health == 0) {
            return Err(ConfigError::Invalid("platform health must be positive".into()));
        }
        let decay = self.fighter.slide.decay;
        if !(0.0..1.0).contains(&decay) {
            return Err(ConfigError::Invalid(format!(
                "slide decay must be in [0, 1), got {decay}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "breaker": { "start_money": 40 }, "battle": { "soldier": { "weapon": "melee" } } }"#;
        let tuning: Tuning = serde_json::from_str(json).unwrap();

        assert_eq!(tuning.breaker.start_money, 40);
        assert_eq!(tuning.breaker.ball.cost, 20);
        assert_eq!(tuning.breaker.layout.len(), 9);
        assert_eq!(tuning.battle.soldier.weapon, SoldierWeapon::Melee);
        assert_eq!(tuning.battle.soldier.max_health, 100);
        assert_eq!(tuning.fighter.kick.damage, 15);
    }

    #[test]
    fn test_nested_partial_overrides() {
        let json = r#"{
            "fighter": {
                "kick": { "damage": 25 },
                "strike": { "cooldown": 5 },
                "slide": { "push": 10.0 },
                "cast": { "projectile": { "damage": 30 } }
            },
            "battle": { "bullet": { "damage": 30 } }
        }"#;
        let tuning: Tuning = serde_json::from_str(json).unwrap();

        let kick = tuning.fighter.kick;
        assert_eq!(kick.damage, 25);
        // Untouched fields keep the kick's own values, not the strike's
        assert_eq!(kick.range, 70.0);
        assert_eq!(kick.knock_up, -10.0);
        assert_eq!(tuning.fighter.strike.cooldown, 5);
        assert_eq!(tuning.fighter.strike.range, 60.0);
        assert_eq!(tuning.fighter.slide.push, 10.0);
        assert_eq!(tuning.fighter.slide.decay, 0.9);

        let cast = tuning.fighter.cast;
        assert_eq!(cast.projectile.damage, 30);
        assert_eq!(cast.projectile.speed, 8.0);
        assert_eq!(cast.projectile.hit, Reach::new(20.0, 30.0));
        assert_eq!(cast.chill_ticks, 60);

        assert_eq!(tuning.battle.bullet.damage, 30);
        assert_eq!(tuning.battle.bullet.speed, 7.0);
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn test_bad_override_type_is_rejected() {
        let json = r#"{ "fighter": { "kick": { "damage": "lots" } } }"#;
        assert!(serde_json::from_str::<Tuning>(json).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_decay() {
        let mut tuning = Tuning::default();
        assert!(tuning.validate().is_ok());

        tuning.fighter.slide.decay = 1.0;
        assert!(matches!(tuning.validate(), Err(ConfigError::Invalid(_))));
    }
}
