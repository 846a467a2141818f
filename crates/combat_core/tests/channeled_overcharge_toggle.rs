#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use combat_core as cc;
use combat_core::abilities::kinds::{MeleeStrike, Overcharge};
use combat_data::configs::abilities::{MeleeStrikeCfg, OverchargeCfg};
use combat_data::configs::enemy::EnemyCfg;
use combat_data::configs::player::PlayerCfg;
use glam::vec3;

fn arena() -> (cc::CombatWorld, cc::EntityId, cc::EntityId) {
    let mut w = cc::CombatWorld::new();
    let p = w.spawn_player(Arc::new(PlayerCfg::default()), vec3(0.0, 0.0, 0.0)).unwrap();
    // enemy in melee reach, facing away so it stays idle
    let e = w.spawn_enemy(Arc::new(EnemyCfg::default()), vec3(0.0, 0.0, 2.0), 0.0).unwrap();
    w.assign_ability(p, 0, Arc::new(MeleeStrike { cfg: MeleeStrikeCfg::default() }));
    w.assign_ability(p, 1, Arc::new(Overcharge { cfg: OverchargeCfg::default() }));
    (w, p, e)
}

#[test]
fn activation_spends_nothing_and_buffs_damage() {
    let (mut w, p, e) = arena();

    assert!(w.use_ability(p, 1));
    assert!(w.is_channel_active(p, 1));
    // channels check energy but do not spend it up front
    assert_eq!(w.record(p).unwrap().pool.energy(), 100.0);
    assert_eq!(w.cooldown_fraction(p, 1), 0.0);

    assert!(w.use_ability(p, 0));
    // 10 base melee damage times the overcharge multiplier
    assert_eq!(w.record(e).unwrap().pool.hp(), 85.0);
}

#[test]
fn toggle_off_arms_the_cooldown() {
    let (mut w, p, _e) = arena();

    assert!(w.use_ability(p, 1));
    assert!(w.use_ability(p, 1));
    assert!(!w.is_channel_active(p, 1));
    assert!((w.cooldown_fraction(p, 1) - 1.0).abs() < 1e-5);
    assert!(!w.use_ability(p, 1));
    assert_eq!(w.record(p).unwrap().pool.energy(), 100.0);
}

#[test]
fn explicit_deactivate_mirrors_the_toggle() {
    let (mut w, p, _e) = arena();

    // nothing to release yet, and non-channeled slots always refuse
    assert!(!w.deactivate_ability(p, 1));
    assert!(!w.deactivate_ability(p, 0));

    assert!(w.use_ability(p, 1));
    assert!(w.deactivate_ability(p, 1));
    assert!(!w.is_channel_active(p, 1));
    assert!(w.cooldown_fraction(p, 1) > 0.0);
}

#[test]
fn insufficient_energy_refuses_the_channel() {
    let mut w = cc::CombatWorld::new();
    let poor = Arc::new(PlayerCfg { max_energy: 4.0, ..PlayerCfg::default() });
    let p = w.spawn_player(poor, vec3(0.0, 0.0, 0.0)).unwrap();
    w.assign_ability(p, 1, Arc::new(Overcharge { cfg: OverchargeCfg::default() }));
    assert!(!w.use_ability(p, 1));
    assert!(!w.is_channel_active(p, 1));
}

#[test]
fn death_interrupts_an_active_channel() {
    let (mut w, p, _e) = arena();
    assert!(w.use_ability(p, 1));
    assert!((w.damage_multiplier(p) - 1.5).abs() < 1e-5);

    w.apply_damage(p, cc::DamageInfo::new(500.0, cc::DamageSource::Generic, None));
    assert!(!w.is_channel_active(p, 1));
    assert!((w.damage_multiplier(p) - 1.0).abs() < 1e-5);
}
