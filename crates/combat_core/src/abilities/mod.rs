//! Ability definitions and the per-entity slot bank.
//!
//! Abilities are shared immutable configs behind `Arc<dyn Ability>`;
//! all mutable per-cast state (cooldown timers, channel flags) lives in
//! the bank's slots. The world detaches the bank before resolving a cast,
//! so an ability body sees the full world but never its own bank.

use std::sync::Arc;

use crate::actor::EntityId;
use crate::world::CombatWorld;

pub mod kinds;

pub const MAX_SLOTS: usize = 5;

pub trait Ability {
    fn name(&self) -> &str;
    fn cooldown_s(&self) -> f32;
    fn energy_cost(&self) -> f32;
    fn is_channeled(&self) -> bool {
        false
    }
    /// Extra activation gate beyond cooldown and energy.
    fn can_activate(&self, _world: &CombatWorld, _caster: EntityId) -> bool {
        true
    }
    fn activate(&self, world: &mut CombatWorld, caster: EntityId);
    fn deactivate(&self, _world: &mut CombatWorld, _caster: EntityId) {}
}

#[derive(Default)]
pub struct Slot {
    ability: Option<Arc<dyn Ability>>,
    cooldown_left: f32,
    /// Full value of the currently running cooldown; survives a slot
    /// reassignment so the fraction stays meaningful.
    cooldown_full: f32,
    channel_active: bool,
}

#[derive(Default)]
pub struct AbilityBank {
    slots: [Slot; MAX_SLOTS],
}

impl AbilityBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an ability to a slot. An in-flight cooldown on the slot keeps
    /// running; only `clear` resets it.
    pub fn assign(&mut self, slot: usize, ability: Arc<dyn Ability>) {
        if let Some(s) = self.slots.get_mut(slot) {
            s.ability = Some(ability);
            s.channel_active = false;
        }
    }

    pub fn clear(&mut self, slot: usize) {
        if let Some(s) = self.slots.get_mut(slot) {
            s.ability = None;
            s.cooldown_left = 0.0;
            s.cooldown_full = 0.0;
            s.channel_active = false;
        }
    }

    pub fn ability(&self, slot: usize) -> Option<&Arc<dyn Ability>> {
        self.slots.get(slot).and_then(|s| s.ability.as_ref())
    }

    pub fn is_on_cooldown(&self, slot: usize) -> bool {
        self.slots.get(slot).map_or(false, |s| s.cooldown_left > 0.0)
    }

    pub fn is_channel_active(&self, slot: usize) -> bool {
        self.slots.get(slot).map_or(false, |s| s.channel_active)
    }

    /// Remaining cooldown as a fraction of the cooldown that armed it,
    /// in `[0, 1]`. Zero for empty slots and zero-cooldown abilities.
    pub fn cooldown_fraction(&self, slot: usize) -> f32 {
        let Some(s) = self.slots.get(slot) else { return 0.0 };
        if s.cooldown_full <= 0.0 {
            return 0.0;
        }
        (s.cooldown_left / s.cooldown_full).clamp(0.0, 1.0)
    }

    /// Decay cooldown timers, flooring at zero.
    pub fn tick(&mut self, dt: f32) {
        for s in &mut self.slots {
            if s.cooldown_left > 0.0 {
                s.cooldown_left = (s.cooldown_left - dt).max(0.0);
            }
        }
    }

    /// Resolve a cast request on `slot`. Returns true when the request
    /// changed anything (activation or channel toggle-off).
    ///
    /// Gate order: slot validity, channel toggle, cooldown, the ability's
    /// own gate, then energy. Channel activation checks energy but spends
    /// none, and the cooldown is armed at deactivation instead.
    pub fn use_ability(&mut self, world: &mut CombatWorld, caster: EntityId, slot: usize) -> bool {
        let Some(s) = self.slots.get(slot) else { return false };
        let Some(ability) = s.ability.clone() else { return false };
        if ability.is_channeled() && s.channel_active {
            return self.deactivate(world, caster, slot);
        }
        let s = &mut self.slots[slot];
        if s.cooldown_left > 0.0 {
            return false;
        }
        if !ability.can_activate(world, caster) {
            return false;
        }
        let cost = ability.energy_cost();
        if ability.is_channeled() {
            if !world.has_energy(caster, cost) {
                return false;
            }
            s.channel_active = true;
            ability.activate(world, caster);
        } else {
            if cost > 0.0 && !world.use_energy(caster, cost) {
                return false;
            }
            if ability.cooldown_s() > 0.0 {
                s.cooldown_left = ability.cooldown_s();
                s.cooldown_full = ability.cooldown_s();
            }
            ability.activate(world, caster);
        }
        metrics::counter!("combat.ability_activations_total").increment(1);
        log::debug!("entity {:?} activated {} (slot {slot})", caster, ability.name());
        true
    }

    /// Explicitly end a channel on `slot`. Returns false when the slot's
    /// ability is not channeled or not currently active; otherwise clears
    /// the flag, runs `deactivate`, and arms the cooldown.
    pub fn deactivate(&mut self, world: &mut CombatWorld, caster: EntityId, slot: usize) -> bool {
        let Some(s) = self.slots.get_mut(slot) else { return false };
        let Some(ability) = s.ability.clone() else { return false };
        if !ability.is_channeled() || !s.channel_active {
            return false;
        }
        s.channel_active = false;
        if ability.cooldown_s() > 0.0 {
            s.cooldown_left = ability.cooldown_s();
            s.cooldown_full = ability.cooldown_s();
        }
        ability.deactivate(world, caster);
        true
    }

    /// Force a channel off (death, stun). No cooldown is armed.
    pub fn interrupt_channels(&mut self, world: &mut CombatWorld, caster: EntityId) {
        for s in &mut self.slots {
            if s.channel_active {
                s.channel_active = false;
                if let Some(ab) = s.ability.clone() {
                    ab.deactivate(world, caster);
                }
            }
        }
    }
}
