//! Behaviour systems layered on the generic state machine.

pub mod enemy;
pub mod player;
