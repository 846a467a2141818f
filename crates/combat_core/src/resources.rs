//! Per-entity depletable resources: health and energy.
//!
//! The pool owns the numeric invariants (clamping, terminal death,
//! regen gating). Notification fan-out lives in the world, which
//! translates the outcome values returned here into bus events.

use serde::{Deserialize, Serialize};

/// What a `take_damage` call actually did.
#[derive(Copy, Clone, Debug)]
pub struct DamageOutcome {
    pub hp_after: f32,
    /// True exactly once, on the hit that crossed to zero.
    pub died: bool,
}

/// Plain numeric view of the pool for the external save/load service.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    pub hp: f32,
    pub max_hp: f32,
    pub energy: f32,
    pub max_energy: f32,
}

#[derive(Clone, Debug)]
pub struct ResourcePool {
    hp: f32,
    max_hp: f32,
    energy: f32,
    max_energy: f32,
    dead: bool,
    regen_rate: f32,
    regen_delay_s: f32,
    /// Seconds since the last energy spend; starts unbounded so regen is
    /// available immediately after spawn.
    since_energy_use_s: f32,
}

impl ResourcePool {
    pub fn new(max_hp: f32, max_energy: f32, regen_rate: f32, regen_delay_s: f32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            energy: max_energy,
            max_energy,
            dead: false,
            regen_rate,
            regen_delay_s,
            since_energy_use_s: f32::INFINITY,
        }
    }

    /// Reset to full and clear the death flag. Used at spawn and respawn.
    pub fn initialize(&mut self, max_hp: f32, max_energy: f32) {
        self.max_hp = max_hp;
        self.max_energy = max_energy;
        self.hp = max_hp;
        self.energy = max_energy;
        self.dead = false;
        self.since_energy_use_s = f32::INFINITY;
    }

    #[inline]
    pub fn hp(&self) -> f32 {
        self.hp
    }
    #[inline]
    pub fn max_hp(&self) -> f32 {
        self.max_hp
    }
    #[inline]
    pub fn energy(&self) -> f32 {
        self.energy
    }
    #[inline]
    pub fn max_energy(&self) -> f32 {
        self.max_energy
    }
    #[inline]
    pub fn is_dead(&self) -> bool {
        self.dead
    }
    #[inline]
    pub fn has_energy(&self, amount: f32) -> bool {
        self.energy >= amount
    }

    pub fn hp_fraction(&self) -> f32 {
        if self.max_hp > 0.0 { self.hp / self.max_hp } else { 0.0 }
    }

    pub fn energy_fraction(&self) -> f32 {
        if self.max_energy > 0.0 { self.energy / self.max_energy } else { 0.0 }
    }

    /// Apply damage. Returns `None` when the pool is already dead (the
    /// terminal state is inert); otherwise clamps health at zero and
    /// reports whether this hit was the killing one.
    pub fn take_damage(&mut self, amount: f32) -> Option<DamageOutcome> {
        if self.dead {
            return None;
        }
        self.hp = (self.hp - amount).max(0.0);
        let died = self.hp <= 0.0;
        if died {
            self.dead = true;
        }
        Some(DamageOutcome { hp_after: self.hp, died })
    }

    /// All-or-nothing spend. A refused spend mutates nothing.
    pub fn use_energy(&mut self, amount: f32) -> bool {
        if self.dead || self.energy < amount {
            return false;
        }
        self.energy -= amount;
        self.since_energy_use_s = 0.0;
        true
    }

    /// Clamped restore. Deliberately not death-gated: external
    /// heal-over-time effects may still tick on a corpse (the passive
    /// regen path below is gated instead).
    pub fn restore_energy(&mut self, amount: f32) {
        self.energy = (self.energy + amount).min(self.max_energy);
    }

    /// Passive regen tick. Returns true when the energy value changed.
    pub fn regen(&mut self, dt: f32) -> bool {
        if self.dead {
            return false;
        }
        self.since_energy_use_s += dt;
        if self.since_energy_use_s < self.regen_delay_s || self.energy >= self.max_energy {
            return false;
        }
        self.restore_energy(self.regen_rate * dt);
        true
    }

    /// Rescale max health, preserving the current percentage.
    pub fn set_max_hp(&mut self, value: f32) {
        let frac = self.hp_fraction();
        self.max_hp = value;
        self.hp = value * frac;
    }

    /// Rescale max energy, preserving the current percentage.
    pub fn set_max_energy(&mut self, value: f32) {
        let frac = self.energy_fraction();
        self.max_energy = value;
        self.energy = value * frac;
    }

    pub fn snapshot(&self) -> ResourceSnapshot {
        ResourceSnapshot {
            hp: self.hp,
            max_hp: self.max_hp,
            energy: self.energy,
            max_energy: self.max_energy,
        }
    }

    /// Overwrite from an external save. Values are clamped back into the
    /// pool's invariants; a zero-health save loads as dead.
    pub fn load_snapshot(&mut self, snap: &ResourceSnapshot) {
        self.max_hp = snap.max_hp.max(0.0);
        self.max_energy = snap.max_energy.max(0.0);
        self.hp = snap.hp.clamp(0.0, self.max_hp);
        self.energy = snap.energy.clamp(0.0, self.max_energy);
        self.dead = self.hp <= 0.0;
    }
}
