//! In-flight projectile records. Integration and collision resolution
//! happen in the world step so damage routing stays in one place.

use glam::Vec3;

use crate::actor::EntityId;

#[derive(Copy, Clone, Debug)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec3,
    pub vel: Vec3,
    pub damage: f32,
    /// Spawner, skipped during collision so a shot never hits its caster.
    pub owner: Option<EntityId>,
    pub age: f32,
    pub lifetime: f32,
}

impl Projectile {
    pub fn expired(&self) -> bool {
        self.age >= self.lifetime
    }
}
