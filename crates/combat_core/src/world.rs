//! Authoritative combat world: entity records, tick orchestration, and
//! damage routing.
//!
//! All mutation happens on one thread in a fixed order per tick: brain
//! logic, nav advance, cooldown/regen decay, projectile integration,
//! despawn. Brains and banks are detached from their record while they
//! run so state and ability code can hold `&mut CombatWorld` without
//! aliasing themselves; cross-entity effects landing on a detached brain
//! are queued as a pending reaction and flushed right after its tick.

use std::sync::Arc;
use std::time::Instant;

use glam::Vec3;

use combat_data::configs::enemy::EnemyCfg;
use combat_data::configs::player::PlayerCfg;

use crate::abilities::kinds::OVERCHARGE_MULTIPLIER;
use crate::abilities::{Ability, AbilityBank};
use crate::actor::{EntityId, EntityKind, Transform};
use crate::damage::{DamageInfo, DamageSource, Damageable};
use crate::events::{CombatEvent, EventBus};
use crate::fsm::StepCtx;
use crate::geom::segment_hits_circle_xz;
use crate::nav::{DirectNav, NavAgent};
use crate::perception::{LineOfSight, NoOcclusion};
use crate::projectile::Projectile;
use crate::resources::{ResourcePool, ResourceSnapshot};
use crate::systems::enemy::{enemy_brain, EnemyStateId};
use crate::systems::player::{player_brain, Mover, PlayerInput, PlayerStateId};

const GRAVITY: f32 = 9.81;
const BODY_CENTER_HEIGHT: f32 = 1.0;

pub enum Brain {
    Enemy(crate::fsm::StateMachine<EnemyStateId>),
    Player(crate::fsm::StateMachine<PlayerStateId>),
}

#[derive(Copy, Clone, Debug)]
enum Reaction {
    Hit,
    Death,
}

pub struct EntityRecord {
    pub id: EntityId,
    pub kind: EntityKind,
    pub tr: Transform,
    pub pool: ResourcePool,
    pub bank: AbilityBank,
    pub nav: Option<Box<dyn NavAgent>>,
    pub mover: Option<Mover>,
    pub overcharge_active: bool,
    pub despawn_in: Option<f32>,
    pending: Option<Reaction>,
    brain: Option<Brain>,
}

impl EntityRecord {
    pub fn body_center(&self) -> Vec3 {
        self.tr.pos + Vec3::Y * BODY_CENTER_HEIGHT
    }
}

pub struct CombatWorld {
    next_id: u32,
    entities: Vec<EntityRecord>,
    bus: EventBus,
    projectiles: Vec<Projectile>,
    next_projectile: u32,
    los: Box<dyn LineOfSight>,
    time_scale: f32,
    player_input: PlayerInput,
}

impl Default for CombatWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl CombatWorld {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            entities: Vec::new(),
            bus: EventBus::new(),
            projectiles: Vec::new(),
            next_projectile: 1,
            los: Box::new(NoOcclusion),
            time_scale: 1.0,
            player_input: PlayerInput::default(),
        }
    }

    pub fn set_los(&mut self, los: Box<dyn LineOfSight>) {
        self.los = los;
    }

    pub fn los(&self) -> &dyn LineOfSight {
        self.los.as_ref()
    }

    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    // ---- time control -------------------------------------------------

    /// Scales simulated time; zero freezes brains, cooldowns, regen,
    /// projectiles and despawn timers alike.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    pub fn pause(&mut self) {
        self.set_time_scale(0.0);
    }

    pub fn resume(&mut self) {
        self.set_time_scale(1.0);
    }

    pub fn is_paused(&self) -> bool {
        self.time_scale <= 0.0
    }

    // ---- lookups ------------------------------------------------------

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.iter().position(|e| e.id == id)
    }

    pub fn record(&self, id: EntityId) -> Option<&EntityRecord> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn record_mut(&mut self, id: EntityId) -> Option<&mut EntityRecord> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn nav_mut(&mut self, id: EntityId) -> Option<&mut (dyn NavAgent + 'static)> {
        self.record_mut(id).and_then(|r| r.nav.as_deref_mut())
    }

    pub fn mover_mut(&mut self, id: EntityId) -> Option<&mut Mover> {
        self.record_mut(id).and_then(|r| r.mover.as_mut())
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// First live player, the default aggro target for enemy AI.
    pub fn primary_target(&self) -> Option<EntityId> {
        self.entities
            .iter()
            .find(|e| e.kind == EntityKind::Player && !e.pool.is_dead())
            .map(|e| e.id)
    }

    /// Live bodies as spheres at chest height, for sight and overlap tests.
    pub fn body_spheres(&self) -> impl Iterator<Item = (EntityId, Vec3, f32)> + '_ {
        self.entities
            .iter()
            .filter(|e| !e.pool.is_dead())
            .map(|e| (e.id, e.body_center(), e.tr.radius))
    }

    /// Live bodies whose sphere intersects the probe sphere.
    pub fn overlap_entities(
        &self,
        origin: Vec3,
        radius: f32,
        exclude: Option<EntityId>,
    ) -> Vec<(EntityId, Vec3, f32)> {
        self.body_spheres()
            .filter(|(id, center, r)| {
                Some(*id) != exclude && (*center - origin).length() <= radius + *r
            })
            .collect()
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn enemy_state(&self, id: EntityId) -> Option<EnemyStateId> {
        match self.record(id)?.brain.as_ref()? {
            Brain::Enemy(m) => m.current(),
            Brain::Player(_) => None,
        }
    }

    pub fn player_state(&self, id: EntityId) -> Option<PlayerStateId> {
        match self.record(id)?.brain.as_ref()? {
            Brain::Player(m) => m.current(),
            Brain::Enemy(_) => None,
        }
    }

    // ---- input --------------------------------------------------------

    pub fn set_player_input(&mut self, input: PlayerInput) {
        self.player_input = input;
    }

    pub fn player_input(&self) -> PlayerInput {
        self.player_input
    }

    // ---- spawning -----------------------------------------------------

    fn alloc_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn spawn_player(&mut self, cfg: Arc<PlayerCfg>, pos: Vec3) -> anyhow::Result<EntityId> {
        let id = self.alloc_id();
        self.entities.push(EntityRecord {
            id,
            kind: EntityKind::Player,
            tr: Transform::new(pos, cfg.radius_m),
            pool: ResourcePool::new(
                cfg.max_health,
                cfg.max_energy,
                cfg.energy_regen_rate,
                cfg.energy_regen_delay_s,
            ),
            bank: AbilityBank::new(),
            nav: None,
            mover: Some(Mover::new(&cfg)),
            overcharge_active: false,
            despawn_in: None,
            pending: None,
            brain: None,
        });
        let mut machine = player_brain(cfg);
        let mut ctx = StepCtx { world: self, me: id, dt: 0.0 };
        if let Err(e) = machine.initialize(&mut ctx, PlayerStateId::Idle) {
            self.entities.retain(|r| r.id != id);
            return Err(e.into());
        }
        if let Some(rec) = self.record_mut(id) {
            rec.brain = Some(Brain::Player(machine));
        }
        log::info!("spawned player {:?} at {pos}", id);
        Ok(id)
    }

    pub fn spawn_enemy(
        &mut self,
        cfg: Arc<EnemyCfg>,
        pos: Vec3,
        yaw: f32,
    ) -> anyhow::Result<EntityId> {
        let id = self.alloc_id();
        let mut tr = Transform::new(pos, cfg.radius_m);
        tr.yaw = yaw;
        self.entities.push(EntityRecord {
            id,
            kind: EntityKind::Enemy,
            tr,
            pool: ResourcePool::new(cfg.max_health, 0.0, 0.0, 0.0),
            bank: AbilityBank::new(),
            nav: Some(Box::new(DirectNav::new(cfg.move_speed))),
            mover: None,
            overcharge_active: false,
            despawn_in: None,
            pending: None,
            brain: None,
        });
        log::info!("spawned enemy {:?} ({}) at {pos}", id, cfg.id);
        let mut machine = enemy_brain(cfg);
        let mut ctx = StepCtx { world: self, me: id, dt: 0.0 };
        if let Err(e) = machine.initialize(&mut ctx, EnemyStateId::Idle) {
            self.entities.retain(|r| r.id != id);
            return Err(e.into());
        }
        if let Some(rec) = self.record_mut(id) {
            rec.brain = Some(Brain::Enemy(machine));
        }
        Ok(id)
    }

    /// Immediate removal, bypassing the death flow.
    pub fn despawn(&mut self, id: EntityId) {
        self.entities.retain(|r| r.id != id);
    }

    pub fn arm_despawn(&mut self, id: EntityId, delay_s: f32) {
        if let Some(rec) = self.record_mut(id) {
            rec.despawn_in = Some(delay_s.max(0.0));
        }
    }

    /// Bring a dead player back at `pos` with full resources.
    pub fn respawn_player(&mut self, id: EntityId, pos: Vec3) {
        let Some(rec) = self.record_mut(id) else { return };
        let (max_hp, max_energy) = (rec.pool.max_hp(), rec.pool.max_energy());
        rec.pool.initialize(max_hp, max_energy);
        rec.tr.pos = pos;
        self.bus.emit(&CombatEvent::HealthChanged { entity: id, current: max_hp, max: max_hp });
        self.bus
            .emit(&CombatEvent::EnergyChanged { entity: id, current: max_energy, max: max_energy });
        self.force_player_state(id, PlayerStateId::Idle);
    }

    // ---- resources and damage ----------------------------------------

    pub fn has_energy(&self, id: EntityId, amount: f32) -> bool {
        self.record(id).map_or(false, |r| r.pool.has_energy(amount))
    }

    pub fn use_energy(&mut self, id: EntityId, amount: f32) -> bool {
        let Some(rec) = self.record_mut(id) else { return false };
        if !rec.pool.use_energy(amount) {
            return false;
        }
        let (current, max) = (rec.pool.energy(), rec.pool.max_energy());
        self.bus.emit(&CombatEvent::EnergyChanged { entity: id, current, max });
        true
    }

    pub fn restore_energy(&mut self, id: EntityId, amount: f32) {
        let Some(rec) = self.record_mut(id) else { return };
        rec.pool.restore_energy(amount);
        let (current, max) = (rec.pool.energy(), rec.pool.max_energy());
        self.bus.emit(&CombatEvent::EnergyChanged { entity: id, current, max });
    }

    pub fn set_overcharge(&mut self, id: EntityId, active: bool) {
        if let Some(rec) = self.record_mut(id) {
            rec.overcharge_active = active;
        }
    }

    pub fn damage_multiplier(&self, id: EntityId) -> f32 {
        if self.record(id).map_or(false, |r| r.overcharge_active) {
            OVERCHARGE_MULTIPLIER
        } else {
            1.0
        }
    }

    /// Route one hit to a target. Returns false when the target is absent
    /// or already dead (dead targets absorb nothing and emit nothing).
    pub fn apply_damage(&mut self, target: EntityId, info: DamageInfo) -> bool {
        let Some(rec) = self.record_mut(target) else { return false };
        let Some(outcome) = rec.pool.take_damage(info.amount) else { return false };
        let max = rec.pool.max_hp();
        self.bus.emit(&CombatEvent::HealthChanged {
            entity: target,
            current: outcome.hp_after,
            max,
        });
        self.bus.emit(&CombatEvent::DamageTaken { entity: target, info });
        self.bus.emit(&CombatEvent::EntityDamaged { entity: target, amount: info.amount });
        metrics::counter!("combat.damage_events_total").increment(1);
        if outcome.died {
            log::info!("entity {:?} died (attacker {:?})", target, info.attacker);
            metrics::counter!("combat.deaths_total").increment(1);
            self.bus.emit(&CombatEvent::Death { entity: target });
            self.interrupt_channels(target);
            self.force_reaction(target, Reaction::Death);
        } else {
            self.force_reaction(target, Reaction::Hit);
        }
        true
    }

    /// Borrow one entity through the damage capability.
    pub fn damageable(&mut self, id: EntityId) -> Option<DamageableHandle<'_>> {
        self.index_of(id)?;
        Some(DamageableHandle { world: self, id })
    }

    pub fn resource_snapshot(&self, id: EntityId) -> Option<ResourceSnapshot> {
        self.record(id).map(|r| r.pool.snapshot())
    }

    pub fn load_resource_snapshot(&mut self, id: EntityId, snap: &ResourceSnapshot) {
        let Some(rec) = self.record_mut(id) else { return };
        rec.pool.load_snapshot(snap);
        if rec.pool.is_dead() {
            self.force_reaction(id, Reaction::Death);
        }
    }

    // ---- abilities ----------------------------------------------------

    pub fn assign_ability(&mut self, id: EntityId, slot: usize, ability: Arc<dyn Ability>) {
        if let Some(rec) = self.record_mut(id) {
            rec.bank.assign(slot, ability);
        }
    }

    pub fn clear_ability(&mut self, id: EntityId, slot: usize) {
        if let Some(rec) = self.record_mut(id) {
            rec.bank.clear(slot);
        }
    }

    pub fn cooldown_fraction(&self, id: EntityId, slot: usize) -> f32 {
        self.record(id).map_or(0.0, |r| r.bank.cooldown_fraction(slot))
    }

    pub fn is_channel_active(&self, id: EntityId, slot: usize) -> bool {
        self.record(id).map_or(false, |r| r.bank.is_channel_active(slot))
    }

    /// Cast request for a slot. Dead casters cannot act.
    pub fn use_ability(&mut self, caster: EntityId, slot: usize) -> bool {
        let Some(ix) = self.index_of(caster) else { return false };
        if self.entities[ix].pool.is_dead() {
            return false;
        }
        let mut bank = std::mem::take(&mut self.entities[ix].bank);
        let ok = bank.use_ability(self, caster, slot);
        if let Some(ix) = self.index_of(caster) {
            self.entities[ix].bank = bank;
        }
        ok
    }

    /// Explicit channel release for a slot (input release).
    pub fn deactivate_ability(&mut self, caster: EntityId, slot: usize) -> bool {
        let Some(ix) = self.index_of(caster) else { return false };
        let mut bank = std::mem::take(&mut self.entities[ix].bank);
        let ok = bank.deactivate(self, caster, slot);
        if let Some(ix) = self.index_of(caster) {
            self.entities[ix].bank = bank;
        }
        ok
    }

    fn interrupt_channels(&mut self, id: EntityId) {
        let Some(ix) = self.index_of(id) else { return };
        let mut bank = std::mem::take(&mut self.entities[ix].bank);
        bank.interrupt_channels(self, id);
        if let Some(ix) = self.index_of(id) {
            self.entities[ix].bank = bank;
        }
    }

    // ---- projectiles --------------------------------------------------

    pub fn spawn_projectile(
        &mut self,
        pos: Vec3,
        vel: Vec3,
        damage: f32,
        lifetime: f32,
        owner: Option<EntityId>,
    ) {
        let id = self.next_projectile;
        self.next_projectile += 1;
        self.projectiles.push(Projectile { id, pos, vel, damage, owner, age: 0.0, lifetime });
    }

    fn step_projectiles(&mut self, dt: f32) {
        let mut hits: Vec<(EntityId, DamageInfo)> = Vec::new();
        let mut projectiles = std::mem::take(&mut self.projectiles);
        projectiles.retain_mut(|p| {
            p.age += dt;
            if p.expired() {
                return false;
            }
            let prev = p.pos;
            p.pos += p.vel * dt;
            for rec in &self.entities {
                if Some(rec.id) == p.owner || rec.pool.is_dead() {
                    continue;
                }
                if segment_hits_circle_xz(prev, p.pos, rec.body_center(), rec.tr.radius) {
                    let dir = p.vel.normalize_or_zero();
                    let info = DamageInfo::new(p.damage, DamageSource::Ability, p.owner)
                        .with_impact(p.pos, -dir);
                    hits.push((rec.id, info));
                    return false;
                }
            }
            true
        });
        self.projectiles = projectiles;
        for (target, info) in hits {
            self.apply_damage(target, info);
        }
    }

    // ---- reactions ----------------------------------------------------

    fn force_reaction(&mut self, id: EntityId, reaction: Reaction) {
        let Some(ix) = self.index_of(id) else { return };
        match self.entities[ix].brain.take() {
            Some(mut brain) => {
                self.drive_reaction(&mut brain, id, reaction);
                if let Some(ix) = self.index_of(id) {
                    self.entities[ix].brain = Some(brain);
                }
            }
            None => {
                // brain is mid-step elsewhere; deliver after its tick
                self.entities[ix].pending = Some(reaction);
            }
        }
    }

    fn drive_reaction(&mut self, brain: &mut Brain, id: EntityId, reaction: Reaction) {
        let mut ctx = StepCtx { world: self, me: id, dt: 0.0 };
        match (brain, reaction) {
            (Brain::Enemy(m), Reaction::Hit) => {
                if m.current() != Some(EnemyStateId::Death) {
                    m.change_state(&mut ctx, EnemyStateId::GetHit);
                }
            }
            (Brain::Enemy(m), Reaction::Death) => {
                m.change_state(&mut ctx, EnemyStateId::Death);
            }
            (Brain::Player(m), Reaction::Hit) => {
                if m.current() != Some(PlayerStateId::Dead) {
                    m.change_state(&mut ctx, PlayerStateId::TakingDamage);
                }
            }
            (Brain::Player(m), Reaction::Death) => {
                m.change_state(&mut ctx, PlayerStateId::Dead);
            }
        }
    }

    fn force_player_state(&mut self, id: EntityId, next: PlayerStateId) {
        let Some(ix) = self.index_of(id) else { return };
        let Some(mut brain) = self.entities[ix].brain.take() else { return };
        if let Brain::Player(m) = &mut brain {
            let mut ctx = StepCtx { world: self, me: id, dt: 0.0 };
            m.change_state(&mut ctx, next);
        }
        if let Some(ix) = self.index_of(id) {
            self.entities[ix].brain = Some(brain);
        }
    }

    // ---- tick ---------------------------------------------------------

    fn run_brain_logic(&mut self, id: EntityId, dt: f32) {
        let Some(ix) = self.index_of(id) else { return };
        let Some(mut brain) = self.entities[ix].brain.take() else { return };
        {
            let mut ctx = StepCtx { world: self, me: id, dt };
            match &mut brain {
                Brain::Enemy(m) => m.logic_update(&mut ctx),
                Brain::Player(m) => m.logic_update(&mut ctx),
            }
        }
        let Some(ix) = self.index_of(id) else { return };
        self.entities[ix].brain = Some(brain);
        if let Some(reaction) = self.entities[ix].pending.take() {
            self.force_reaction(id, reaction);
        }
    }

    fn run_brain_physics(&mut self, id: EntityId, dt: f32) {
        let Some(ix) = self.index_of(id) else { return };
        let Some(mut brain) = self.entities[ix].brain.take() else { return };
        {
            let mut ctx = StepCtx { world: self, me: id, dt };
            match &mut brain {
                Brain::Enemy(m) => m.physics_update(&mut ctx),
                Brain::Player(m) => m.physics_update(&mut ctx),
            }
        }
        if let Some(ix) = self.index_of(id) {
            self.entities[ix].brain = Some(brain);
        }
    }

    /// One logic tick. `dt_raw` is wall-clock seconds, scaled by the
    /// world's time scale before use.
    pub fn step(&mut self, dt_raw: f32) {
        let started = Instant::now();
        let dt = dt_raw * self.time_scale;
        if dt <= 0.0 {
            return;
        }
        let ids: Vec<EntityId> = self.entities.iter().map(|e| e.id).collect();
        for id in ids {
            self.run_brain_logic(id, dt);
        }
        for rec in &mut self.entities {
            if rec.pool.is_dead() {
                continue;
            }
            if let Some(nav) = rec.nav.as_deref_mut() {
                let next = nav.advance(rec.tr.pos, dt);
                if (next - rec.tr.pos).length_squared() > 1e-10 {
                    rec.tr.face_towards(next);
                    rec.tr.pos = next;
                }
            }
        }
        for ix in 0..self.entities.len() {
            self.entities[ix].bank.tick(dt);
            if self.entities[ix].pool.regen(dt) {
                let rec = &self.entities[ix];
                let ev = CombatEvent::EnergyChanged {
                    entity: rec.id,
                    current: rec.pool.energy(),
                    max: rec.pool.max_energy(),
                };
                self.bus.emit(&ev);
            }
        }
        self.step_projectiles(dt);
        for rec in &mut self.entities {
            if let Some(t) = rec.despawn_in.as_mut() {
                *t -= dt;
            }
        }
        self.entities.retain(|r| r.despawn_in.map_or(true, |t| t > 0.0));
        metrics::histogram!("combat.tick.ms").record(started.elapsed().as_secs_f64() * 1000.0);
    }

    /// Physics tick: integrate movers against gravity and the ground
    /// plane, then run state physics hooks. Scaled like `step`.
    pub fn physics_step(&mut self, dt_raw: f32) {
        let dt = dt_raw * self.time_scale;
        if dt <= 0.0 {
            return;
        }
        for rec in &mut self.entities {
            let Some(mover) = rec.mover.as_mut() else { continue };
            if mover.dead {
                continue;
            }
            mover.velocity.y -= GRAVITY * dt;
            rec.tr.pos += mover.velocity * dt;
            if rec.tr.pos.y <= 0.0 {
                rec.tr.pos.y = 0.0;
                if mover.velocity.y <= 0.0 {
                    mover.velocity.y = 0.0;
                    mover.grounded = true;
                }
            } else {
                mover.grounded = false;
            }
        }
        let ids: Vec<EntityId> = self.entities.iter().map(|e| e.id).collect();
        for id in ids {
            self.run_brain_physics(id, dt);
        }
    }
}

/// View of a single entity through the [`Damageable`] capability, routing
/// writes back through the world so events and reactions still fire.
pub struct DamageableHandle<'w> {
    world: &'w mut CombatWorld,
    id: EntityId,
}

impl Damageable for DamageableHandle<'_> {
    fn take_damage(&mut self, amount: f32, info: &DamageInfo) {
        let mut info = *info;
        info.amount = amount;
        self.world.apply_damage(self.id, info);
    }

    fn health(&self) -> f32 {
        self.world.record(self.id).map_or(0.0, |r| r.pool.hp())
    }

    fn max_health(&self) -> f32 {
        self.world.record(self.id).map_or(0.0, |r| r.pool.max_hp())
    }

    fn is_dead(&self) -> bool {
        self.world.record(self.id).map_or(true, |r| r.pool.is_dead())
    }
}
