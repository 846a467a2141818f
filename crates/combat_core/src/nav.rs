//! Navigation seam between AI states and whatever moves the body.
//!
//! Enemy states only express intent (destination, speed, stop/enable);
//! the agent implementation decides how positions actually advance. The
//! built-in [`DirectNav`] walks straight lines on the ground plane, which
//! is enough for headless simulation and tests.

use glam::Vec3;

pub trait NavAgent {
    fn set_destination(&mut self, dest: Vec3);
    fn set_speed(&mut self, speed: f32);
    fn set_enabled(&mut self, enabled: bool);
    fn set_stopped(&mut self, stopped: bool);
    fn is_on_navmesh(&self) -> bool;
    /// Advance `pos` by one step of `dt` seconds and return the new position.
    fn advance(&mut self, pos: Vec3, dt: f32) -> Vec3;
}

pub struct DirectNav {
    dest: Option<Vec3>,
    speed: f32,
    enabled: bool,
    stopped: bool,
}

impl DirectNav {
    pub fn new(speed: f32) -> Self {
        Self { dest: None, speed, enabled: true, stopped: false }
    }
}

impl NavAgent for DirectNav {
    fn set_destination(&mut self, dest: Vec3) {
        self.dest = Some(dest);
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn set_stopped(&mut self, stopped: bool) {
        self.stopped = stopped;
    }

    fn is_on_navmesh(&self) -> bool {
        self.enabled
    }

    fn advance(&mut self, pos: Vec3, dt: f32) -> Vec3 {
        if !self.enabled || self.stopped {
            return pos;
        }
        let Some(dest) = self.dest else { return pos };
        let to = Vec3::new(dest.x - pos.x, 0.0, dest.z - pos.z);
        let dist = to.length();
        if dist <= 1e-4 {
            return pos;
        }
        let step = (self.speed * dt).min(dist);
        pos + to / dist * step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_toward_destination_without_overshoot() {
        let mut nav = DirectNav::new(2.0);
        nav.set_destination(Vec3::new(0.0, 0.0, 1.0));
        let p = nav.advance(Vec3::ZERO, 0.25);
        assert!((p.z - 0.5).abs() < 1e-5);
        let p = nav.advance(p, 10.0);
        assert!((p.z - 1.0).abs() < 1e-5);
    }

    #[test]
    fn stopped_agent_holds_position() {
        let mut nav = DirectNav::new(2.0);
        nav.set_destination(Vec3::new(5.0, 0.0, 0.0));
        nav.set_stopped(true);
        assert_eq!(nav.advance(Vec3::ZERO, 1.0), Vec3::ZERO);
    }
}
