//! Small geometry helpers reusable by perception and projectile systems.

use glam::{Vec2, Vec3};

#[inline]
pub fn segment_hits_circle_xz(p0: Vec3, p1: Vec3, center: Vec3, radius: f32) -> bool {
    let a = Vec2::new(p0.x, p0.z);
    let b = Vec2::new(p1.x, p1.z);
    let c = Vec2::new(center.x, center.z);
    let ab = b - a;
    let len2 = ab.length_squared();
    if len2 <= 1e-12 {
        return (a - c).length_squared() <= radius * radius;
    }
    let t = ((c - a).dot(ab) / len2).clamp(0.0, 1.0);
    let closest = a + ab * t;
    (closest - c).length_squared() <= radius * radius
}

/// Distance along a ray (unit `dir`) to the first intersection with a
/// sphere, or `None` if the sphere is missed or beyond `max_dist`.
#[inline]
pub fn ray_hits_sphere(origin: Vec3, dir: Vec3, max_dist: f32, center: Vec3, radius: f32) -> Option<f32> {
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    let mut t = -b - sq;
    if t < 0.0 {
        t = -b + sq;
    }
    if t < 0.0 || t > max_dist {
        return None;
    }
    Some(t)
}

/// Unsigned angle in degrees between two directions flattened onto the
/// ground plane. Returns 180 for degenerate (vertical) inputs so gates
/// fail closed.
#[inline]
pub fn flat_angle_deg(a: Vec3, b: Vec3) -> f32 {
    let fa = Vec2::new(a.x, a.z);
    let fb = Vec2::new(b.x, b.z);
    if fa.length_squared() <= 1e-12 || fb.length_squared() <= 1e-12 {
        return 180.0;
    }
    fa.angle_to(fb).abs().to_degrees()
}
