//! Enemy behaviour states and the machine builder.
//!
//! Transition summary: Idle watches for the player through the detection
//! cone, Chase closes to attack range and gives up past 1.5x the detection
//! radius, Attack swings on a windup/cooldown cycle, GetHit is a short
//! stun fed by incoming damage, Death is terminal and arms despawn.

use std::sync::Arc;

use combat_data::configs::enemy::EnemyCfg;

use crate::actor::EntityId;
use crate::damage::{DamageInfo, DamageSource};
use crate::fsm::{State, StateMachine, StepCtx};
use crate::perception::can_see_target;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EnemyStateId {
    Idle,
    Chase,
    Attack,
    GetHit,
    Death,
}

const GIVE_UP_FACTOR: f32 = 1.5;

fn flat_distance(ctx: &StepCtx<'_>, a: EntityId, b: EntityId) -> Option<f32> {
    let pa = ctx.world.record(a)?.tr.pos;
    let pb = ctx.world.record(b)?.tr.pos;
    let dx = pb.x - pa.x;
    let dz = pb.z - pa.z;
    Some((dx * dx + dz * dz).sqrt())
}

fn live_target(ctx: &StepCtx<'_>) -> Option<EntityId> {
    ctx.world.primary_target()
}

struct Idle {
    cfg: Arc<EnemyCfg>,
}

impl State<EnemyStateId> for Idle {
    fn enter(&mut self, ctx: &mut StepCtx<'_>) {
        if let Some(nav) = ctx.world.nav_mut(ctx.me) {
            nav.set_enabled(true);
            nav.set_stopped(true);
        }
    }

    fn exit(&mut self, ctx: &mut StepCtx<'_>) {
        if let Some(nav) = ctx.world.nav_mut(ctx.me) {
            nav.set_stopped(false);
        }
    }

    fn logic_update(&mut self, ctx: &mut StepCtx<'_>) -> Option<EnemyStateId> {
        let target = live_target(ctx)?;
        let seen = can_see_target(
            ctx.world,
            ctx.me,
            target,
            self.cfg.detection_radius_m,
            self.cfg.field_of_view_deg,
        );
        seen.then_some(EnemyStateId::Chase)
    }
}

struct Chase {
    cfg: Arc<EnemyCfg>,
}

impl State<EnemyStateId> for Chase {
    fn enter(&mut self, ctx: &mut StepCtx<'_>) {
        let speed = self.cfg.move_speed;
        if let Some(nav) = ctx.world.nav_mut(ctx.me) {
            nav.set_enabled(true);
            nav.set_stopped(false);
            nav.set_speed(speed);
        }
    }

    fn logic_update(&mut self, ctx: &mut StepCtx<'_>) -> Option<EnemyStateId> {
        let Some(target) = live_target(ctx) else {
            return Some(EnemyStateId::Idle);
        };
        let dest = ctx.world.record(target)?.tr.pos;
        match ctx.world.nav_mut(ctx.me) {
            Some(nav) if nav.is_on_navmesh() => nav.set_destination(dest),
            // no usable agent: cannot pursue, stand down
            _ => return Some(EnemyStateId::Idle),
        }
        let dist = flat_distance(ctx, ctx.me, target)?;
        if dist <= self.cfg.attack_range_m {
            return Some(EnemyStateId::Attack);
        }
        if dist > self.cfg.detection_radius_m * GIVE_UP_FACTOR {
            return Some(EnemyStateId::Idle);
        }
        None
    }
}

struct Attack {
    cfg: Arc<EnemyCfg>,
    cooldown_left: f32,
    windup: Option<f32>,
}

impl State<EnemyStateId> for Attack {
    fn enter(&mut self, ctx: &mut StepCtx<'_>) {
        // first swing starts immediately
        self.cooldown_left = 0.0;
        self.windup = None;
        if let Some(nav) = ctx.world.nav_mut(ctx.me) {
            nav.set_stopped(true);
        }
    }

    fn exit(&mut self, ctx: &mut StepCtx<'_>) {
        self.windup = None;
        if let Some(nav) = ctx.world.nav_mut(ctx.me) {
            nav.set_stopped(false);
        }
    }

    fn logic_update(&mut self, ctx: &mut StepCtx<'_>) -> Option<EnemyStateId> {
        let Some(target) = live_target(ctx) else {
            return Some(EnemyStateId::Idle);
        };
        let dest = ctx.world.record(target)?.tr.pos;
        if let Some(rec) = ctx.world.record_mut(ctx.me) {
            rec.tr.face_towards(dest);
        }
        self.cooldown_left = (self.cooldown_left - ctx.dt).max(0.0);
        match self.windup {
            None => {
                if self.cooldown_left <= 0.0 {
                    self.windup = Some(self.cfg.attack_windup_s);
                    self.cooldown_left = self.cfg.attack_cooldown_s;
                }
                None
            }
            Some(left) => {
                let left = left - ctx.dt;
                if left > 0.0 {
                    self.windup = Some(left);
                    return None;
                }
                self.windup = None;
                let dist = flat_distance(ctx, ctx.me, target)?;
                if dist <= self.cfg.attack_range_m {
                    let info = DamageInfo::new(
                        self.cfg.attack_damage,
                        DamageSource::Generic,
                        Some(ctx.me),
                    );
                    ctx.world.apply_damage(target, info);
                    None
                } else {
                    // swing whiffed, target slipped out of range
                    Some(EnemyStateId::Chase)
                }
            }
        }
    }
}

struct GetHit {
    cfg: Arc<EnemyCfg>,
    stun_left: f32,
}

impl State<EnemyStateId> for GetHit {
    fn enter(&mut self, ctx: &mut StepCtx<'_>) {
        self.stun_left = self.cfg.stun_s;
        if let Some(nav) = ctx.world.nav_mut(ctx.me) {
            nav.set_enabled(false);
        }
    }

    fn exit(&mut self, ctx: &mut StepCtx<'_>) {
        if let Some(nav) = ctx.world.nav_mut(ctx.me) {
            nav.set_enabled(true);
        }
    }

    fn logic_update(&mut self, ctx: &mut StepCtx<'_>) -> Option<EnemyStateId> {
        self.stun_left -= ctx.dt;
        if self.stun_left > 0.0 {
            return None;
        }
        let Some(target) = live_target(ctx) else {
            return Some(EnemyStateId::Idle);
        };
        let dist = flat_distance(ctx, ctx.me, target)?;
        if dist <= self.cfg.attack_range_m {
            Some(EnemyStateId::Attack)
        } else {
            Some(EnemyStateId::Chase)
        }
    }
}

struct Death {
    cfg: Arc<EnemyCfg>,
}

impl State<EnemyStateId> for Death {
    fn enter(&mut self, ctx: &mut StepCtx<'_>) {
        if let Some(nav) = ctx.world.nav_mut(ctx.me) {
            nav.set_enabled(false);
        }
        ctx.world.arm_despawn(ctx.me, self.cfg.despawn_delay_s);
    }
}

/// Build the full enemy machine over a shared config.
pub fn enemy_brain(cfg: Arc<EnemyCfg>) -> StateMachine<EnemyStateId> {
    let mut m = StateMachine::new();
    m.register(EnemyStateId::Idle, Box::new(Idle { cfg: cfg.clone() }));
    m.register(EnemyStateId::Chase, Box::new(Chase { cfg: cfg.clone() }));
    m.register(
        EnemyStateId::Attack,
        Box::new(Attack { cfg: cfg.clone(), cooldown_left: 0.0, windup: None }),
    );
    m.register(EnemyStateId::GetHit, Box::new(GetHit { cfg: cfg.clone(), stun_left: 0.0 }));
    m.register(EnemyStateId::Death, Box::new(Death { cfg }));
    m
}
