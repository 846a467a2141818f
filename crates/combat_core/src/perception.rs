//! Line-of-sight and detection cone checks.
//!
//! Detection is a three-stage gate: range, then a flattened field-of-view
//! cone, then an occlusion ray cast from eye height to the target's chest.
//! Static geometry is abstracted behind [`LineOfSight`]; entity bodies are
//! tested here so an observer can be blocked by another combatant.

use glam::Vec3;

use crate::actor::EntityId;
use crate::geom::{flat_angle_deg, ray_hits_sphere};
use crate::world::CombatWorld;

const EYE_HEIGHT: f32 = 1.5;
const CHEST_HEIGHT: f32 = 1.0;

/// Static world geometry that can block sight lines.
pub trait LineOfSight {
    /// Distance to the nearest blocking surface along a unit ray, if any
    /// within `max_dist`.
    fn nearest_blocker(&self, origin: Vec3, dir: Vec3, max_dist: f32) -> Option<f32>;
}

/// Open arena, nothing static to hide behind.
#[derive(Default)]
pub struct NoOcclusion;

impl LineOfSight for NoOcclusion {
    fn nearest_blocker(&self, _origin: Vec3, _dir: Vec3, _max_dist: f32) -> Option<f32> {
        None
    }
}

/// Static blockers as spheres. Coarse, but exercises the occlusion path.
pub struct SphereBlockers {
    pub spheres: Vec<(Vec3, f32)>,
}

impl LineOfSight for SphereBlockers {
    fn nearest_blocker(&self, origin: Vec3, dir: Vec3, max_dist: f32) -> Option<f32> {
        self.spheres
            .iter()
            .filter_map(|(c, r)| ray_hits_sphere(origin, dir, max_dist, *c, *r))
            .min_by(|a, b| a.total_cmp(b))
    }
}

enum RayHit {
    Entity(EntityId),
    Static,
}

fn cast(world: &CombatWorld, origin: Vec3, to: Vec3) -> Option<RayHit> {
    let delta = to - origin;
    let dist = delta.length();
    if dist <= 1e-5 {
        return None;
    }
    let dir = delta / dist;
    let max_dist = dist + 1.0;
    let mut best: Option<(f32, RayHit)> = None;
    if let Some(t) = world.los().nearest_blocker(origin, dir, max_dist) {
        best = Some((t, RayHit::Static));
    }
    for (id, center, radius) in world.body_spheres() {
        // a ray starting inside a body does not register that body
        if (center - origin).length_squared() <= radius * radius {
            continue;
        }
        if let Some(t) = ray_hits_sphere(origin, dir, max_dist, center, radius) {
            if best.as_ref().map_or(true, |(bt, _)| t < *bt) {
                best = Some((t, RayHit::Entity(id)));
            }
        }
    }
    best.map(|(_, hit)| hit)
}

/// Full detection test from `observer` to `target`.
pub fn can_see_target(
    world: &CombatWorld,
    observer: EntityId,
    target: EntityId,
    detection_radius: f32,
    fov_deg: f32,
) -> bool {
    let Some(obs) = world.record(observer) else { return false };
    let Some(tgt) = world.record(target) else { return false };
    if tgt.pool.is_dead() {
        return false;
    }
    let delta = tgt.tr.pos - obs.tr.pos;
    if delta.length() > detection_radius {
        return false;
    }
    if flat_angle_deg(obs.tr.forward(), delta) > fov_deg * 0.5 {
        return false;
    }
    let eye = obs.tr.pos + Vec3::Y * EYE_HEIGHT;
    let chest = tgt.tr.pos + Vec3::Y * CHEST_HEIGHT;
    match cast(world, eye, chest) {
        Some(RayHit::Entity(id)) if id == target => true,
        // the ray clipped our own body; retry from just in front of it
        Some(RayHit::Entity(id)) if id == observer => {
            let retry = eye + obs.tr.forward() * 0.5;
            matches!(cast(world, retry, chest), Some(RayHit::Entity(id)) if id == target)
        }
        _ => false,
    }
}
