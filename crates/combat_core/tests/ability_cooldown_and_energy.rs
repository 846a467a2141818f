#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use combat_core as cc;
use combat_core::abilities::kinds::{MeleeStrike, RangedShot};
use combat_data::configs::abilities::{MeleeStrikeCfg, RangedShotCfg};
use combat_data::configs::player::PlayerCfg;
use glam::vec3;

fn melee() -> Arc<dyn cc::Ability> {
    Arc::new(MeleeStrike { cfg: MeleeStrikeCfg::default() })
}

fn ranged() -> Arc<dyn cc::Ability> {
    Arc::new(RangedShot { cfg: RangedShotCfg::default() })
}

#[test]
fn cooldown_gates_and_decays() {
    let mut w = cc::CombatWorld::new();
    let p = w.spawn_player(Arc::new(PlayerCfg::default()), vec3(0.0, 0.0, 0.0)).unwrap();
    w.assign_ability(p, 0, melee());

    assert!(w.use_ability(p, 0));
    assert!(!w.use_ability(p, 0));
    assert!((w.cooldown_fraction(p, 0) - 1.0).abs() < 1e-5);

    w.step(0.5);
    let frac = w.cooldown_fraction(p, 0);
    assert!(frac > 0.0 && frac < 1.0);

    w.step(0.6);
    assert_eq!(w.cooldown_fraction(p, 0), 0.0);
    assert!(w.use_ability(p, 0));
}

#[test]
fn reassigning_a_slot_keeps_the_running_cooldown() {
    let mut w = cc::CombatWorld::new();
    let p = w.spawn_player(Arc::new(PlayerCfg::default()), vec3(0.0, 0.0, 0.0)).unwrap();
    w.assign_ability(p, 0, melee());
    assert!(w.use_ability(p, 0));

    w.assign_ability(p, 0, ranged());
    assert!(w.cooldown_fraction(p, 0) > 0.0);
    assert!(!w.use_ability(p, 0));

    // clearing is the only thing that resets the timer
    w.clear_ability(p, 0);
    assert_eq!(w.cooldown_fraction(p, 0), 0.0);
    w.assign_ability(p, 0, ranged());
    assert!(w.use_ability(p, 0));
}

#[test]
fn energy_cost_is_deducted_and_gated() {
    let mut w = cc::CombatWorld::new();
    let p = w.spawn_player(Arc::new(PlayerCfg::default()), vec3(0.0, 0.0, 0.0)).unwrap();
    w.assign_ability(p, 1, ranged());

    assert!(w.use_ability(p, 1));
    let rec = w.record(p).unwrap();
    assert_eq!(rec.pool.energy(), 95.0);

    // a pool too small for the cost refuses the cast and spends nothing
    let poor = Arc::new(PlayerCfg { max_energy: 4.0, ..PlayerCfg::default() });
    let q = w.spawn_player(poor, vec3(5.0, 0.0, 0.0)).unwrap();
    w.assign_ability(q, 1, ranged());
    assert!(!w.use_ability(q, 1));
    assert_eq!(w.record(q).unwrap().pool.energy(), 4.0);
}

#[test]
fn empty_and_out_of_range_slots_refuse() {
    let mut w = cc::CombatWorld::new();
    let p = w.spawn_player(Arc::new(PlayerCfg::default()), vec3(0.0, 0.0, 0.0)).unwrap();
    assert!(!w.use_ability(p, 0));
    assert!(!w.use_ability(p, cc::MAX_SLOTS));
    assert!(!w.use_ability(p, 99));
}

#[test]
fn dead_caster_cannot_act() {
    let mut w = cc::CombatWorld::new();
    let p = w.spawn_player(Arc::new(PlayerCfg::default()), vec3(0.0, 0.0, 0.0)).unwrap();
    w.assign_ability(p, 0, melee());
    w.apply_damage(p, cc::DamageInfo::new(500.0, cc::DamageSource::Generic, None));
    assert!(!w.use_ability(p, 0));
}
