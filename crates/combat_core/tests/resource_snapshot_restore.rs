#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use combat_core as cc;
use combat_data::configs::player::PlayerCfg;
use glam::vec3;

#[test]
fn snapshot_survives_a_world_boundary() {
    let mut w = cc::CombatWorld::new();
    let p = w.spawn_player(Arc::new(PlayerCfg::default()), vec3(0.0, 0.0, 0.0)).unwrap();
    w.apply_damage(p, cc::DamageInfo::new(40.0, cc::DamageSource::Generic, None));
    w.use_energy(p, 25.0);

    let snap = w.resource_snapshot(p).unwrap();
    assert_eq!(snap.hp, 60.0);
    assert_eq!(snap.energy, 75.0);

    // round-trip through the serialized form, as the save service would
    let json = serde_json::to_string(&snap).unwrap();
    let snap: cc::ResourceSnapshot = serde_json::from_str(&json).unwrap();

    let mut w2 = cc::CombatWorld::new();
    let q = w2.spawn_player(Arc::new(PlayerCfg::default()), vec3(0.0, 0.0, 0.0)).unwrap();
    w2.load_resource_snapshot(q, &snap);
    let rec = w2.record(q).unwrap();
    assert_eq!(rec.pool.hp(), 60.0);
    assert_eq!(rec.pool.energy(), 75.0);
    assert!(!rec.pool.is_dead());
}

#[test]
fn zero_health_snapshot_loads_as_dead() {
    let mut w = cc::CombatWorld::new();
    let p = w.spawn_player(Arc::new(PlayerCfg::default()), vec3(0.0, 0.0, 0.0)).unwrap();
    let snap = cc::ResourceSnapshot { hp: 0.0, max_hp: 100.0, energy: 10.0, max_energy: 100.0 };
    w.load_resource_snapshot(p, &snap);
    let rec = w.record(p).unwrap();
    assert!(rec.pool.is_dead());
    assert_eq!(w.player_state(p), Some(cc::PlayerStateId::Dead));
}
