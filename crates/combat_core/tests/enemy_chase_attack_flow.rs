#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use combat_core as cc;
use combat_data::configs::enemy::EnemyCfg;
use combat_data::configs::player::PlayerCfg;
use glam::vec3;

const DT: f32 = 0.1;

#[test]
fn idle_to_chase_to_attack_and_damage_lands() {
    let mut w = cc::CombatWorld::new();
    let e = w.spawn_enemy(Arc::new(EnemyCfg::default()), vec3(0.0, 0.0, 0.0), 0.0).unwrap();
    let p = w.spawn_player(Arc::new(PlayerCfg::default()), vec3(0.0, 0.0, 6.0)).unwrap();

    assert_eq!(w.enemy_state(e), Some(cc::EnemyStateId::Idle));

    // player is visible straight ahead; one tick flips to chase
    w.step(DT);
    assert_eq!(w.enemy_state(e), Some(cc::EnemyStateId::Chase));

    // chase closes to attack range (4m) and switches
    let mut reached = false;
    for _ in 0..100 {
        w.step(DT);
        if w.enemy_state(e) == Some(cc::EnemyStateId::Attack) {
            reached = true;
            break;
        }
    }
    assert!(reached, "enemy should reach attack range");

    // windup resolves into a hit on the player
    let hp_before = w.record(p).unwrap().pool.hp();
    for _ in 0..40 {
        w.step(DT);
    }
    let hp_after = w.record(p).unwrap().pool.hp();
    assert!(hp_after < hp_before, "attack should damage the player");
}

#[test]
fn chase_gives_up_beyond_leash_range() {
    let mut w = cc::CombatWorld::new();
    let e = w.spawn_enemy(Arc::new(EnemyCfg::default()), vec3(0.0, 0.0, 0.0), 0.0).unwrap();
    let p = w.spawn_player(Arc::new(PlayerCfg::default()), vec3(0.0, 0.0, 6.0)).unwrap();

    w.step(DT);
    assert_eq!(w.enemy_state(e), Some(cc::EnemyStateId::Chase));

    // teleport the player far beyond 1.5x detection radius
    w.record_mut(p).unwrap().tr.pos = vec3(0.0, 0.0, 40.0);
    w.step(DT);
    assert_eq!(w.enemy_state(e), Some(cc::EnemyStateId::Idle));

    // and it cannot re-acquire from out of range
    w.step(DT);
    assert_eq!(w.enemy_state(e), Some(cc::EnemyStateId::Idle));
}

#[test]
fn enemy_does_not_move_while_idle() {
    let mut w = cc::CombatWorld::new();
    // facing away from the player, so the cone never catches them
    let e = w.spawn_enemy(Arc::new(EnemyCfg::default()), vec3(0.0, 0.0, 5.0), 0.0).unwrap();
    let _p = w.spawn_player(Arc::new(PlayerCfg::default()), vec3(0.0, 0.0, 0.0)).unwrap();

    let before = w.record(e).unwrap().tr.pos;
    for _ in 0..20 {
        w.step(DT);
    }
    assert_eq!(w.enemy_state(e), Some(cc::EnemyStateId::Idle));
    assert_eq!(w.record(e).unwrap().tr.pos, before);
}
