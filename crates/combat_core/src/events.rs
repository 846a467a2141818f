//! Synchronous pub/sub bus for combat notifications.
//!
//! Subscribers run inline on the simulation thread, in subscription
//! order. A panicking subscriber is contained and logged so one bad
//! listener cannot take the tick down with it.

use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::actor::EntityId;
use crate::damage::DamageInfo;

#[derive(Copy, Clone, Debug)]
pub enum CombatEvent {
    HealthChanged { entity: EntityId, current: f32, max: f32 },
    EnergyChanged { entity: EntityId, current: f32, max: f32 },
    DamageTaken { entity: EntityId, info: DamageInfo },
    EntityDamaged { entity: EntityId, amount: f32 },
    Death { entity: EntityId },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&CombatEvent)>;

#[derive(Default)]
pub struct EventBus {
    subs: Vec<(SubscriptionId, Subscriber)>,
    next: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, f: impl FnMut(&CombatEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next);
        self.next += 1;
        self.subs.push((id, Box::new(f)));
        id
    }

    /// Returns true when the subscription existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subs.len();
        self.subs.retain(|(sid, _)| *sid != id);
        self.subs.len() != before
    }

    pub fn emit(&mut self, ev: &CombatEvent) {
        for (id, f) in &mut self.subs {
            if catch_unwind(AssertUnwindSafe(|| f(ev))).is_err() {
                log::warn!("event subscriber {:?} panicked on {:?}", id, ev);
                metrics::counter!("combat.bus.subscriber_panics_total").increment(1);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.subs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subs.is_empty()
    }
}
