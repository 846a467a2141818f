//! Generic finite state machine driving per-entity behaviour.
//!
//! States receive a [`StepCtx`] with mutable world access; the world
//! detaches the machine from its entity record before stepping it, so a
//! state never aliases its own machine. Transitions are requested by
//! returning the next id from `logic_update` rather than mutating the
//! machine in place.

use std::fmt::Debug;

use thiserror::Error;

use crate::actor::EntityId;
use crate::world::CombatWorld;

/// Per-step context handed to every state hook.
pub struct StepCtx<'w> {
    pub world: &'w mut CombatWorld,
    pub me: EntityId,
    pub dt: f32,
}

pub trait State<Id> {
    fn enter(&mut self, _ctx: &mut StepCtx<'_>) {}
    fn exit(&mut self, _ctx: &mut StepCtx<'_>) {}
    /// Per-tick decision step. Returning `Some(id)` requests a transition,
    /// applied by the machine after the hook returns.
    fn logic_update(&mut self, _ctx: &mut StepCtx<'_>) -> Option<Id> {
        None
    }
    fn physics_update(&mut self, _ctx: &mut StepCtx<'_>) {}
}

#[derive(Debug, Error)]
pub enum FsmError {
    #[error("state machine has no registered states")]
    Empty,
    #[error("state {0} is not registered")]
    Unregistered(String),
}

pub struct StateMachine<Id: Copy + PartialEq + Debug> {
    states: Vec<(Id, Box<dyn State<Id>>)>,
    current: Option<Id>,
    previous: Option<Id>,
}

impl<Id: Copy + PartialEq + Debug> Default for StateMachine<Id> {
    fn default() -> Self {
        Self { states: Vec::new(), current: None, previous: None }
    }
}

impl<Id: Copy + PartialEq + Debug> StateMachine<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registering the same id twice replaces the earlier state.
    pub fn register(&mut self, id: Id, state: Box<dyn State<Id>>) {
        if let Some(slot) = self.states.iter_mut().find(|(sid, _)| *sid == id) {
            slot.1 = state;
        } else {
            self.states.push((id, state));
        }
    }

    pub fn current(&self) -> Option<Id> {
        self.current
    }

    pub fn previous(&self) -> Option<Id> {
        self.previous
    }

    fn index_of(&self, id: Id) -> Option<usize> {
        self.states.iter().position(|(sid, _)| *sid == id)
    }

    /// Enter the starting state. Fails on an empty or incomplete table.
    pub fn initialize(&mut self, ctx: &mut StepCtx<'_>, start: Id) -> Result<(), FsmError> {
        if self.states.is_empty() {
            return Err(FsmError::Empty);
        }
        let ix = self
            .index_of(start)
            .ok_or_else(|| FsmError::Unregistered(format!("{start:?}")))?;
        self.current = Some(start);
        self.states[ix].1.enter(ctx);
        Ok(())
    }

    /// Transition to `next`. A self-transition is a no-op (no exit/enter
    /// hooks fire). An unregistered target logs and leaves the machine
    /// where it is.
    pub fn change_state(&mut self, ctx: &mut StepCtx<'_>, next: Id) {
        if self.current == Some(next) {
            return;
        }
        let Some(next_ix) = self.index_of(next) else {
            log::warn!("entity {:?}: transition to unregistered state {next:?}", ctx.me);
            return;
        };
        if let Some(cur) = self.current {
            if let Some(cur_ix) = self.index_of(cur) {
                self.states[cur_ix].1.exit(ctx);
            }
        }
        self.previous = self.current;
        self.current = Some(next);
        self.states[next_ix].1.enter(ctx);
    }

    pub fn logic_update(&mut self, ctx: &mut StepCtx<'_>) {
        let Some(cur) = self.current else { return };
        let Some(ix) = self.index_of(cur) else { return };
        if let Some(next) = self.states[ix].1.logic_update(ctx) {
            self.change_state(ctx, next);
        }
    }

    pub fn physics_update(&mut self, ctx: &mut StepCtx<'_>) {
        let Some(cur) = self.current else { return };
        if let Some(ix) = self.index_of(cur) {
            self.states[ix].1.physics_update(ctx);
        }
    }
}
