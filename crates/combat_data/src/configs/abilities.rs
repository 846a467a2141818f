//! Ability tunables loader (`data/config/abilities.toml`).
//!
//! One table per shipped ability. The sim constructs the concrete ability
//! objects from these values; nothing here is mutated at runtime.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::loader::{data_root, read_toml};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MeleeStrikeCfg {
    pub damage: f32,
    /// Forward offset of the swept volume's center.
    pub hit_range_m: f32,
    pub hit_radius_m: f32,
    pub cooldown_s: f32,
    pub energy_cost: f32,
}

impl Default for MeleeStrikeCfg {
    fn default() -> Self {
        Self {
            damage: 10.0,
            hit_range_m: 1.5,
            hit_radius_m: 0.75,
            cooldown_s: 1.0,
            energy_cost: 0.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RangedShotCfg {
    pub damage: f32,
    pub projectile_speed_mps: f32,
    pub projectile_lifetime_s: f32,
    pub cooldown_s: f32,
    pub energy_cost: f32,
}

impl Default for RangedShotCfg {
    fn default() -> Self {
        Self {
            damage: 15.0,
            projectile_speed_mps: 25.0,
            projectile_lifetime_s: 3.0,
            cooldown_s: 2.0,
            energy_cost: 5.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OverchargeCfg {
    pub cooldown_s: f32,
    pub energy_cost: f32,
}

impl Default for OverchargeCfg {
    fn default() -> Self {
        Self { cooldown_s: 4.0, energy_cost: 10.0 }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AbilitiesCfg {
    pub melee_strike: MeleeStrikeCfg,
    pub ranged_shot: RangedShotCfg,
    pub overcharge: OverchargeCfg,
}

/// Load `data/config/abilities.toml`; defaults apply when the file is absent.
pub fn load_abilities() -> Result<AbilitiesCfg> {
    let path = data_root().join("config/abilities.toml");
    if !path.is_file() {
        return Ok(AbilitiesCfg::default());
    }
    let txt = read_toml("config/abilities.toml")?;
    let cfg: AbilitiesCfg = toml::from_str(&txt).context("parse abilities.toml")?;
    Ok(cfg)
}
