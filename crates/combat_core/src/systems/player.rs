//! Player locomotion and reaction states.
//!
//! Locomotion states translate the buffered input into horizontal
//! velocity on the entity's mover; vertical motion and ground contact are
//! integrated by the world's physics step. Speed threshold for the
//! moving/idle split is 0.1 m/s.

use std::sync::Arc;

use glam::{Vec2, Vec3};

use combat_data::configs::player::PlayerCfg;

use crate::fsm::{State, StateMachine, StepCtx};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlayerStateId {
    Idle,
    Walking,
    Running,
    Jumping,
    Falling,
    TakingDamage,
    Dead,
}

/// Kinematic body driven by the states and integrated by the world.
#[derive(Clone, Debug)]
pub struct Mover {
    pub velocity: Vec3,
    pub grounded: bool,
    pub move_speed: f32,
    pub sprint_speed: f32,
    pub jump_force: f32,
    pub dead: bool,
}

impl Mover {
    pub fn new(cfg: &PlayerCfg) -> Self {
        Self {
            velocity: Vec3::ZERO,
            grounded: true,
            move_speed: cfg.move_speed,
            sprint_speed: cfg.sprint_speed,
            jump_force: cfg.jump_force,
            dead: false,
        }
    }

    pub fn horizontal_speed(&self) -> f32 {
        Vec2::new(self.velocity.x, self.velocity.z).length()
    }
}

/// One frame of buffered player intent.
#[derive(Copy, Clone, Debug, Default)]
pub struct PlayerInput {
    /// Ground-plane move direction, x is strafe and y is forward.
    pub move_axis: Vec2,
    pub sprint: bool,
    pub jump: bool,
}

const MOVING_THRESHOLD: f32 = 0.1;

/// Apply input to the mover's horizontal velocity at `speed` and face the
/// motion direction. Returns the resulting horizontal speed.
fn drive(ctx: &mut StepCtx<'_>, speed: f32) -> f32 {
    let input = ctx.world.player_input();
    let mut axis = Vec3::new(input.move_axis.x, 0.0, input.move_axis.y);
    if axis.length_squared() > 1.0 {
        axis = axis.normalize();
    }
    let Some(rec) = ctx.world.record_mut(ctx.me) else { return 0.0 };
    let Some(mover) = rec.mover.as_mut() else { return 0.0 };
    mover.velocity.x = axis.x * speed;
    mover.velocity.z = axis.z * speed;
    let hspeed = mover.horizontal_speed();
    if hspeed > MOVING_THRESHOLD {
        let face = rec.tr.pos + Vec3::new(axis.x, 0.0, axis.z);
        rec.tr.face_towards(face);
    }
    hspeed
}

fn grounded(ctx: &StepCtx<'_>) -> bool {
    ctx.world
        .record(ctx.me)
        .and_then(|r| r.mover.as_ref())
        .map_or(true, |m| m.grounded)
}

/// Shared ground dispatch used when a state ends or the body lands.
fn ground_state(speed: f32, sprint: bool) -> PlayerStateId {
    if speed <= MOVING_THRESHOLD {
        PlayerStateId::Idle
    } else if sprint {
        PlayerStateId::Running
    } else {
        PlayerStateId::Walking
    }
}

struct Idle;

impl State<PlayerStateId> for Idle {
    fn logic_update(&mut self, ctx: &mut StepCtx<'_>) -> Option<PlayerStateId> {
        let input = ctx.world.player_input();
        drive(ctx, 0.0);
        if !grounded(ctx) {
            return Some(PlayerStateId::Falling);
        }
        if input.jump {
            return Some(PlayerStateId::Jumping);
        }
        // intent, not current speed: idle zeroes velocity every tick
        if input.move_axis.length() > MOVING_THRESHOLD {
            return Some(if input.sprint { PlayerStateId::Running } else { PlayerStateId::Walking });
        }
        None
    }
}

struct Walking;

impl State<PlayerStateId> for Walking {
    fn logic_update(&mut self, ctx: &mut StepCtx<'_>) -> Option<PlayerStateId> {
        let input = ctx.world.player_input();
        let speed = {
            let s = ctx
                .world
                .record(ctx.me)
                .and_then(|r| r.mover.as_ref())
                .map_or(0.0, |m| m.move_speed);
            drive(ctx, s)
        };
        if !grounded(ctx) {
            return Some(PlayerStateId::Falling);
        }
        if input.jump {
            return Some(PlayerStateId::Jumping);
        }
        if speed <= MOVING_THRESHOLD {
            return Some(PlayerStateId::Idle);
        }
        if input.sprint {
            return Some(PlayerStateId::Running);
        }
        None
    }
}

struct Running;

impl State<PlayerStateId> for Running {
    fn logic_update(&mut self, ctx: &mut StepCtx<'_>) -> Option<PlayerStateId> {
        let input = ctx.world.player_input();
        let speed = {
            let s = ctx
                .world
                .record(ctx.me)
                .and_then(|r| r.mover.as_ref())
                .map_or(0.0, |m| m.sprint_speed);
            drive(ctx, s)
        };
        if !grounded(ctx) {
            return Some(PlayerStateId::Falling);
        }
        if input.jump {
            return Some(PlayerStateId::Jumping);
        }
        if speed <= MOVING_THRESHOLD {
            return Some(PlayerStateId::Idle);
        }
        if !input.sprint {
            return Some(PlayerStateId::Walking);
        }
        None
    }
}

struct Jumping;

impl State<PlayerStateId> for Jumping {
    fn enter(&mut self, ctx: &mut StepCtx<'_>) {
        if let Some(mover) = ctx.world.mover_mut(ctx.me) {
            mover.velocity.y = mover.jump_force;
            mover.grounded = false;
        }
    }

    fn logic_update(&mut self, ctx: &mut StepCtx<'_>) -> Option<PlayerStateId> {
        let input = ctx.world.player_input();
        let speed = {
            let s = ctx
                .world
                .record(ctx.me)
                .and_then(|r| r.mover.as_ref())
                .map_or(0.0, |m| m.move_speed);
            drive(ctx, s)
        };
        let vy = ctx.world.mover_mut(ctx.me).map_or(0.0, |m| m.velocity.y);
        if grounded(ctx) && vy <= MOVING_THRESHOLD {
            return Some(ground_state(speed, input.sprint));
        }
        if vy < 0.0 {
            return Some(PlayerStateId::Falling);
        }
        None
    }
}

struct Falling;

impl State<PlayerStateId> for Falling {
    fn logic_update(&mut self, ctx: &mut StepCtx<'_>) -> Option<PlayerStateId> {
        let input = ctx.world.player_input();
        let speed = {
            let s = ctx
                .world
                .record(ctx.me)
                .and_then(|r| r.mover.as_ref())
                .map_or(0.0, |m| m.move_speed);
            drive(ctx, s)
        };
        if grounded(ctx) {
            return Some(ground_state(speed, input.sprint));
        }
        None
    }
}

struct TakingDamage {
    cfg: Arc<PlayerCfg>,
    stun_left: f32,
}

impl State<PlayerStateId> for TakingDamage {
    fn enter(&mut self, ctx: &mut StepCtx<'_>) {
        self.stun_left = self.cfg.stun_s;
        if let Some(mover) = ctx.world.mover_mut(ctx.me) {
            mover.velocity.x = 0.0;
            mover.velocity.z = 0.0;
        }
    }

    fn logic_update(&mut self, ctx: &mut StepCtx<'_>) -> Option<PlayerStateId> {
        self.stun_left -= ctx.dt;
        if self.stun_left > 0.0 {
            return None;
        }
        if !grounded(ctx) {
            return Some(PlayerStateId::Falling);
        }
        let input = ctx.world.player_input();
        if input.move_axis.length() > MOVING_THRESHOLD {
            Some(if input.sprint { PlayerStateId::Running } else { PlayerStateId::Walking })
        } else {
            Some(PlayerStateId::Idle)
        }
    }
}

struct Dead;

impl State<PlayerStateId> for Dead {
    fn enter(&mut self, ctx: &mut StepCtx<'_>) {
        if let Some(mover) = ctx.world.mover_mut(ctx.me) {
            mover.dead = true;
            mover.velocity = Vec3::ZERO;
        }
    }

    fn exit(&mut self, ctx: &mut StepCtx<'_>) {
        if let Some(mover) = ctx.world.mover_mut(ctx.me) {
            mover.dead = false;
        }
    }
    // terminal until an explicit respawn forces the machine out
}

/// Build the full player machine over a shared config.
pub fn player_brain(cfg: Arc<PlayerCfg>) -> StateMachine<PlayerStateId> {
    let mut m = StateMachine::new();
    m.register(PlayerStateId::Idle, Box::new(Idle));
    m.register(PlayerStateId::Walking, Box::new(Walking));
    m.register(PlayerStateId::Running, Box::new(Running));
    m.register(PlayerStateId::Jumping, Box::new(Jumping));
    m.register(PlayerStateId::Falling, Box::new(Falling));
    m.register(
        PlayerStateId::TakingDamage,
        Box::new(TakingDamage { cfg, stun_left: 0.0 }),
    );
    m.register(PlayerStateId::Dead, Box::new(Dead));
    m
}
