//! Concrete ability implementations driven by data configs.

use glam::Vec3;

use combat_data::configs::abilities::{MeleeStrikeCfg, OverchargeCfg, RangedShotCfg};

use crate::abilities::Ability;
use crate::actor::EntityId;
use crate::damage::{DamageInfo, DamageSource, Damageable};
use crate::world::CombatWorld;

const CAST_HEIGHT: f32 = 1.0;
const MUZZLE_OFFSET: f32 = 0.3;

/// Instant cone-less melee swing: a sphere probe in front of the caster.
pub struct MeleeStrike {
    pub cfg: MeleeStrikeCfg,
}

impl Ability for MeleeStrike {
    fn name(&self) -> &str {
        "melee_strike"
    }
    fn cooldown_s(&self) -> f32 {
        self.cfg.cooldown_s
    }
    fn energy_cost(&self) -> f32 {
        self.cfg.energy_cost
    }

    fn activate(&self, world: &mut CombatWorld, caster: EntityId) {
        let Some(rec) = world.record(caster) else { return };
        let forward = rec.tr.forward();
        let origin = rec.tr.pos + Vec3::Y * CAST_HEIGHT + forward * self.cfg.hit_range_m;
        let amount = self.cfg.damage * world.damage_multiplier(caster);
        let hits = world.overlap_entities(origin, self.cfg.hit_radius_m, Some(caster));
        for (target, center, radius) in hits {
            let to = (origin - center).normalize_or_zero();
            let impact = center + to * radius;
            let info = DamageInfo::new(amount, DamageSource::Ability, Some(caster))
                .with_impact(impact, -forward);
            if let Some(mut hit) = world.damageable(target) {
                hit.take_damage(amount, &info);
            }
        }
    }
}

/// Fires a straight-line projectile from chest height.
pub struct RangedShot {
    pub cfg: RangedShotCfg,
}

impl Ability for RangedShot {
    fn name(&self) -> &str {
        "ranged_shot"
    }
    fn cooldown_s(&self) -> f32 {
        self.cfg.cooldown_s
    }
    fn energy_cost(&self) -> f32 {
        self.cfg.energy_cost
    }

    fn activate(&self, world: &mut CombatWorld, caster: EntityId) {
        let Some(rec) = world.record(caster) else { return };
        let forward = rec.tr.forward();
        let origin = rec.tr.pos + Vec3::Y * CAST_HEIGHT + forward * MUZZLE_OFFSET;
        let damage = self.cfg.damage * world.damage_multiplier(caster);
        world.spawn_projectile(
            origin,
            forward * self.cfg.projectile_speed_mps,
            damage,
            self.cfg.projectile_lifetime_s,
            Some(caster),
        );
    }
}

/// Channeled damage buff. While active the caster's outgoing ability
/// damage is multiplied; toggling off arms the cooldown.
pub struct Overcharge {
    pub cfg: OverchargeCfg,
}

pub const OVERCHARGE_MULTIPLIER: f32 = 1.5;

impl Ability for Overcharge {
    fn name(&self) -> &str {
        "overcharge"
    }
    fn cooldown_s(&self) -> f32 {
        self.cfg.cooldown_s
    }
    fn energy_cost(&self) -> f32 {
        self.cfg.energy_cost
    }
    fn is_channeled(&self) -> bool {
        true
    }

    fn activate(&self, world: &mut CombatWorld, caster: EntityId) {
        world.set_overcharge(caster, true);
    }

    fn deactivate(&self, world: &mut CombatWorld, caster: EntityId) {
        world.set_overcharge(caster, false);
    }
}
