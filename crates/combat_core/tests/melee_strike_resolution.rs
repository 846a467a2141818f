#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use combat_core as cc;
use combat_core::abilities::kinds::MeleeStrike;
use combat_data::configs::abilities::MeleeStrikeCfg;
use combat_data::configs::enemy::EnemyCfg;
use combat_data::configs::player::PlayerCfg;
use glam::vec3;

fn setup() -> cc::CombatWorld {
    cc::CombatWorld::new()
}

#[test]
fn hits_in_front_but_not_behind() {
    let mut w = setup();
    let p = w.spawn_player(Arc::new(PlayerCfg::default()), vec3(0.0, 0.0, 0.0)).unwrap();
    let front = w.spawn_enemy(Arc::new(EnemyCfg::default()), vec3(0.0, 0.0, 2.0), 0.0).unwrap();
    let behind = w.spawn_enemy(Arc::new(EnemyCfg::default()), vec3(0.0, 0.0, -2.0), 0.0).unwrap();
    w.assign_ability(p, 0, Arc::new(MeleeStrike { cfg: MeleeStrikeCfg::default() }));

    assert!(w.use_ability(p, 0));
    assert!(w.record(front).unwrap().pool.hp() < 100.0);
    assert_eq!(w.record(behind).unwrap().pool.hp(), 100.0);
    // the swing never rebounds on its caster
    assert_eq!(w.record(p).unwrap().pool.hp(), 100.0);
}

#[test]
fn hit_carries_attacker_and_impact_data() {
    let mut w = setup();
    let p = w.spawn_player(Arc::new(PlayerCfg::default()), vec3(0.0, 0.0, 0.0)).unwrap();
    let e = w.spawn_enemy(Arc::new(EnemyCfg::default()), vec3(0.0, 0.0, 2.0), 0.0).unwrap();
    w.assign_ability(p, 0, Arc::new(MeleeStrike { cfg: MeleeStrikeCfg::default() }));

    let seen = std::rc::Rc::new(std::cell::RefCell::new(None));
    {
        let seen = seen.clone();
        w.bus_mut().subscribe(move |ev| {
            if let cc::CombatEvent::DamageTaken { entity, info } = ev {
                *seen.borrow_mut() = Some((*entity, *info));
            }
        });
    }

    assert!(w.use_ability(p, 0));
    let (entity, info) = (*seen.borrow()).expect("a hit should have been observed");
    assert_eq!(entity, e);
    assert_eq!(info.attacker, Some(p));
    assert_eq!(info.source, cc::DamageSource::Ability);
    assert!(info.impact_normal.length() > 0.5);
}
