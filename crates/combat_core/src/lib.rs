//! combat_core: headless, authoritative combat simulation.
//!
//! Owns entity state (health, energy, ability slots), per-entity behaviour
//! machines, perception, projectiles, and the combat event bus. Rendering,
//! animation, and input devices live elsewhere; hosts feed buffered input
//! and a fixed timestep into [`CombatWorld::step`] and subscribe to
//! [`events::CombatEvent`] for presentation.

pub mod abilities;
pub mod actor;
pub mod damage;
pub mod events;
pub mod fsm;
pub mod geom;
pub mod nav;
pub mod perception;
pub mod projectile;
pub mod resources;
pub mod systems;
pub mod telemetry;
pub mod world;

pub use abilities::{Ability, AbilityBank, MAX_SLOTS};
pub use actor::{EntityId, EntityKind, Transform};
pub use damage::{Damageable, DamageInfo, DamageSource};
pub use events::{CombatEvent, EventBus, SubscriptionId};
pub use fsm::{FsmError, State, StateMachine, StepCtx};
pub use nav::{DirectNav, NavAgent};
pub use perception::{can_see_target, LineOfSight, NoOcclusion, SphereBlockers};
pub use projectile::Projectile;
pub use resources::{DamageOutcome, ResourcePool, ResourceSnapshot};
pub use systems::enemy::{enemy_brain, EnemyStateId};
pub use systems::player::{player_brain, Mover, PlayerInput, PlayerStateId};
pub use telemetry::{init_telemetry, TelemetryGuard};
pub use world::{CombatWorld, DamageableHandle, EntityRecord};
