use bevy::prelude::*;

use crate::common::{rng::ArenaRng, tunables::Tunables};
use crate::plugins::core;

#[test]
fn inserts_resources() {
    let mut app = App::new();
    core::plugin(&mut app);
    assert!(app.world().get_resource::<Tunables>().is_some());
    assert!(app.world().get_resource::<ClearColor>().is_some());
    assert!(app.world().get_resource::<ArenaRng>().is_some());
}

#[test]
fn keeps_a_preseeded_rng() {
    let mut app = App::new();
    app.insert_resource(ArenaRng::seeded(7));
    core::plugin(&mut app);

    let mut expected = ArenaRng::seeded(7);
    let got = app.world_mut().resource_mut::<ArenaRng>().unit();
    assert_eq!(got, expected.unit());
}

#[test]
fn wave_scaling_helpers() {
    let t = Tunables::default();
    assert_eq!(t.wave_speed_multiplier(1), 1.0);
    assert!((t.wave_speed_multiplier(3) - 1.3).abs() < 1e-6);
    assert_eq!(t.enemy_attack_damage(1), 12);
    assert_eq!(t.enemy_attack_damage(5), 20);
}

#[test]
fn projectile_bounds() {
    let t = Tunables::default();
    assert!(!t.out_of_projectile_bounds(Vec3::new(25.9, 1.0, -25.9)));
    assert!(t.out_of_projectile_bounds(Vec3::new(26.1, 1.0, 0.0)));
    assert!(t.out_of_projectile_bounds(Vec3::new(0.0, -1.1, 0.0)));
    assert!(t.out_of_projectile_bounds(Vec3::new(0.0, 20.5, 0.0)));
}
