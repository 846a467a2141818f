//! Player base-stat configuration loader (`data/config/player.toml`).

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::loader::{data_root, read_toml};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerCfg {
    pub max_health: f32,
    pub max_energy: f32,
    /// Energy restored per second once the regen delay has elapsed.
    pub energy_regen_rate: f32,
    /// Seconds after the last energy spend before passive regen resumes.
    pub energy_regen_delay_s: f32,
    pub move_speed: f32,
    pub sprint_speed: f32,
    pub jump_force: f32,
    /// Hit-stun duration after taking damage.
    pub stun_s: f32,
    /// Body radius for contact/overlap tests.
    pub radius_m: f32,
}

impl Default for PlayerCfg {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            max_energy: 100.0,
            energy_regen_rate: 5.0,
            energy_regen_delay_s: 2.0,
            move_speed: 5.0,
            sprint_speed: 8.0,
            jump_force: 5.0,
            stun_s: 0.25,
            radius_m: 0.7,
        }
    }
}

/// Load `data/config/player.toml`; defaults apply when the file is absent.
pub fn load_player() -> Result<PlayerCfg> {
    let path = data_root().join("config/player.toml");
    if !path.is_file() {
        return Ok(PlayerCfg::default());
    }
    let txt = read_toml("config/player.toml")?;
    let cfg: PlayerCfg = toml::from_str(&txt).context("parse player.toml")?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sprint_faster_than_walk() {
        let c = PlayerCfg::default();
        assert!(c.sprint_speed > c.move_speed);
    }
}
