//! The checked-in `data/config/*.toml` files must parse with the current schemas.

#[test]
fn enemy_toml_loads() {
    let cfg = combat_data::configs::enemy::load_enemy().expect("enemy cfg");
    assert_eq!(cfg.id, "grunt");
    assert!(cfg.max_health > 0.0);
}

#[test]
fn player_toml_loads() {
    let cfg = combat_data::configs::player::load_player().expect("player cfg");
    assert!(cfg.max_energy > 0.0);
    assert!(cfg.energy_regen_delay_s >= 0.0);
}

#[test]
fn abilities_toml_loads() {
    let cfg = combat_data::configs::abilities::load_abilities().expect("abilities cfg");
    assert!(cfg.ranged_shot.projectile_speed_mps > 0.0);
    assert!(cfg.melee_strike.hit_radius_m > 0.0);
}

#[test]
fn telemetry_toml_loads() {
    let cfg = combat_data::configs::telemetry::load_telemetry().expect("telemetry cfg");
    assert_eq!(cfg.log_level.as_deref(), Some("info"));
}
