//! Enemy archetype configuration loader.
//!
//! Parses `data/config/enemy.toml` into the stat block used to seed an
//! enemy entity on spawn. Every field has a tuned default so a partial
//! file (or none at all) still yields a playable archetype.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::loader::{data_root, read_toml};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnemyCfg {
    /// Archetype id, e.g. "grunt".
    pub id: String,
    pub max_health: f32,
    /// Locomotion speed handed to the navigation agent (m/s).
    pub move_speed: f32,
    pub attack_damage: f32,
    pub attack_range_m: f32,
    pub attack_cooldown_s: f32,
    /// Delay between the swing trigger and the hit resolution.
    pub attack_windup_s: f32,
    /// Hit-stun duration after taking damage.
    pub stun_s: f32,
    pub detection_radius_m: f32,
    /// Full cone angle, degrees.
    pub field_of_view_deg: f32,
    /// Body radius for contact/overlap tests.
    pub radius_m: f32,
    /// Corpse lingers this long before the entity is removed.
    pub despawn_delay_s: f32,
}

impl Default for EnemyCfg {
    fn default() -> Self {
        Self {
            id: "grunt".into(),
            max_health: 100.0,
            move_speed: 3.0,
            attack_damage: 10.0,
            attack_range_m: 4.0,
            attack_cooldown_s: 1.0,
            attack_windup_s: 2.0,
            stun_s: 0.5,
            detection_radius_m: 10.0,
            field_of_view_deg: 110.0,
            radius_m: 0.9,
            despawn_delay_s: 1.0,
        }
    }
}

/// Load `data/config/enemy.toml`; defaults apply when the file is absent.
pub fn load_enemy() -> Result<EnemyCfg> {
    let path = data_root().join("config/enemy.toml");
    if !path.is_file() {
        return Ok(EnemyCfg::default());
    }
    let txt = read_toml("config/enemy.toml")?;
    let cfg: EnemyCfg = toml::from_str(&txt).context("parse enemy.toml")?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let c = EnemyCfg::default();
        assert!(c.max_health > 0.0);
        assert!(c.attack_range_m < c.detection_radius_m);
        assert!(c.field_of_view_deg <= 360.0);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg: EnemyCfg = toml::from_str("max_health = 40.0").unwrap();
        assert_eq!(cfg.max_health, 40.0);
        assert_eq!(cfg.attack_damage, EnemyCfg::default().attack_damage);
    }
}
