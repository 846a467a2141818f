//! Basic entity identity and spatial types.

use glam::Vec3;

/// Opaque entity handle, world-assigned, never reused within a world.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Enemy,
}

#[derive(Copy, Clone, Debug)]
pub struct Transform {
    pub pos: Vec3,
    /// Heading around +Y; `forward()` follows the `dx.atan2(dz)` convention.
    pub yaw: f32,
    /// Body radius for contact/overlap tests.
    pub radius: f32,
}

impl Transform {
    pub fn new(pos: Vec3, radius: f32) -> Self {
        Self { pos, yaw: 0.0, radius }
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), 0.0, self.yaw.cos())
    }

    /// Point the heading at a world position (ground plane only).
    pub fn face_towards(&mut self, target: Vec3) {
        let dx = target.x - self.pos.x;
        let dz = target.z - self.pos.z;
        if dx * dx + dz * dz > 1e-8 {
            self.yaw = dx.atan2(dz);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_matches_yaw_convention() {
        let mut tr = Transform::new(Vec3::ZERO, 0.5);
        tr.face_towards(Vec3::new(0.0, 0.0, 5.0));
        assert!((tr.forward() - Vec3::Z).length() < 1e-5);
        tr.face_towards(Vec3::new(5.0, 0.0, 0.0));
        assert!((tr.forward() - Vec3::X).length() < 1e-5);
    }
}
