#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use combat_core as cc;
use combat_data::configs::enemy::EnemyCfg;
use combat_data::configs::player::PlayerCfg;
use glam::vec3;

#[test]
fn non_lethal_hit_stuns_then_resumes_pursuit() {
    let mut w = cc::CombatWorld::new();
    let e = w.spawn_enemy(Arc::new(EnemyCfg::default()), vec3(0.0, 0.0, 0.0), 0.0).unwrap();
    let _p = w.spawn_player(Arc::new(PlayerCfg::default()), vec3(0.0, 0.0, 6.0)).unwrap();

    w.step(0.1);
    assert_eq!(w.enemy_state(e), Some(cc::EnemyStateId::Chase));

    w.apply_damage(e, cc::DamageInfo::new(10.0, cc::DamageSource::Generic, None));
    assert_eq!(w.enemy_state(e), Some(cc::EnemyStateId::GetHit));
    assert_eq!(w.record(e).unwrap().pool.hp(), 90.0);

    // stunned: the 0.5s timer holds and the body stays put
    let held = w.record(e).unwrap().tr.pos;
    w.step(0.3);
    assert_eq!(w.enemy_state(e), Some(cc::EnemyStateId::GetHit));
    assert_eq!(w.record(e).unwrap().tr.pos, held);

    // timer elapses; target still out of reach, so back to chase
    w.step(0.3);
    assert_eq!(w.enemy_state(e), Some(cc::EnemyStateId::Chase));
}

#[test]
fn stunned_in_reach_goes_straight_to_attack() {
    let mut w = cc::CombatWorld::new();
    let e = w.spawn_enemy(Arc::new(EnemyCfg::default()), vec3(0.0, 0.0, 0.0), 0.0).unwrap();
    let _p = w.spawn_player(Arc::new(PlayerCfg::default()), vec3(0.0, 0.0, 3.0)).unwrap();

    w.apply_damage(e, cc::DamageInfo::new(10.0, cc::DamageSource::Generic, None));
    assert_eq!(w.enemy_state(e), Some(cc::EnemyStateId::GetHit));

    w.step(0.6);
    assert_eq!(w.enemy_state(e), Some(cc::EnemyStateId::Attack));
}

#[test]
fn lethal_hit_skips_the_stun() {
    let mut w = cc::CombatWorld::new();
    let e = w.spawn_enemy(Arc::new(EnemyCfg::default()), vec3(0.0, 0.0, 0.0), 0.0).unwrap();
    w.apply_damage(e, cc::DamageInfo::new(500.0, cc::DamageSource::Generic, None));
    assert_eq!(w.enemy_state(e), Some(cc::EnemyStateId::Death));
}
