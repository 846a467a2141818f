//! Damage event value type and the damageable capability surface.

use glam::Vec3;

use crate::actor::EntityId;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DamageSource {
    Generic,
    Ability,
}

/// Immutable description of a single hit. Constructed at the moment of
/// impact and consumed once by the target's damage handler; never stored.
#[derive(Copy, Clone, Debug)]
pub struct DamageInfo {
    pub amount: f32,
    pub source: DamageSource,
    pub attacker: Option<EntityId>,
    pub impact_point: Vec3,
    pub impact_normal: Vec3,
}

impl DamageInfo {
    pub fn new(amount: f32, source: DamageSource, attacker: Option<EntityId>) -> Self {
        Self {
            amount,
            source,
            attacker,
            impact_point: Vec3::ZERO,
            impact_normal: Vec3::ZERO,
        }
    }

    pub fn with_impact(mut self, point: Vec3, normal: Vec3) -> Self {
        self.impact_point = point;
        self.impact_normal = normal;
        self
    }
}

/// Anything that can receive damage. Attack and ability resolution depend
/// only on this capability, never on a concrete entity type.
pub trait Damageable {
    fn take_damage(&mut self, amount: f32, info: &DamageInfo);
    fn health(&self) -> f32;
    fn max_health(&self) -> f32;
    fn is_dead(&self) -> bool;
}
