use bevy::ecs::message::Messages;
use bevy::prelude::*;

use super::*;
use crate::common::test_utils::{run_system_once, set_tick};
use crate::plugins::enemies::Enemy;

fn drain(
    scheduler: &mut SpawnScheduler,
    rng: &mut ArenaRng,
    tunables: &Tunables,
    wave: u32,
    total: u32,
    dt: f32,
    secs: f32,
) -> Vec<(f32, SpawnOrder)> {
    let mut out = Vec::new();
    let steps = (secs / dt).round() as usize;
    for i in 0..steps {
        if let Some(order) = scheduler.tick(dt, wave, total, rng, tunables) {
            out.push(((i + 1) as f32 * dt, order));
        }
    }
    out
}

#[test]
fn interval_shrinks_with_wave_down_to_half_a_second() {
    assert!((spawn_interval(1) - 1.9).abs() < 1e-6);
    assert!((spawn_interval(10) - 1.0).abs() < 1e-6);
    assert_eq!(spawn_interval(15), 0.5);
    assert_eq!(spawn_interval(40), 0.5);
}

#[test]
fn first_enemy_spawns_on_first_tick_then_at_interval() {
    let tunables = Tunables::default();
    let mut rng = ArenaRng::seeded(1);
    let mut s = SpawnScheduler::default();

    // Wave 15 sits on the 0.5s floor, which a 0.25s step hits exactly.
    let orders = drain(&mut s, &mut rng, &tunables, 15, 50, 0.25, 1.5);
    let times: Vec<f32> = orders.iter().map(|(t, _)| *t).collect();
    assert_eq!(times, vec![0.25, 0.75, 1.25]);
}

#[test]
fn early_waves_spawn_slower() {
    let tunables = Tunables::default();
    let mut rng = ArenaRng::seeded(1);
    let mut s = SpawnScheduler::default();

    let orders = drain(&mut s, &mut rng, &tunables, 1, 5, 0.1, 4.0);
    let times: Vec<f32> = orders.iter().map(|(t, _)| *t).collect();

    assert!((times[0] - 0.1).abs() < 1e-4);
    let gap = times[1] - times[0];
    assert!((1.9 - 1e-3..=2.0 + 1e-3).contains(&gap), "gap {gap}");
}

#[test]
fn never_spawns_more_than_the_wave_total() {
    let tunables = Tunables::default();
    let mut rng = ArenaRng::seeded(2);
    let mut s = SpawnScheduler::default();

    let orders = drain(&mut s, &mut rng, &tunables, 1, 5, 0.05, 60.0);
    assert_eq!(orders.len(), 5);
    assert_eq!(s.spawned(), 5);

    let serials: Vec<u32> = orders.iter().map(|(_, o)| o.serial).collect();
    assert_eq!(serials, vec![0, 1, 2, 3, 4]);
}

#[test]
fn wave_change_restarts_count_and_countdown() {
    let tunables = Tunables::default();
    let mut rng = ArenaRng::seeded(3);
    let mut s = SpawnScheduler::default();

    drain(&mut s, &mut rng, &tunables, 1, 5, 0.05, 60.0);
    assert_eq!(s.spawned(), 5);

    let first = s.tick(0.01, 2, 8, &mut rng, &tunables);
    let first = first.expect("new wave spawns immediately");
    assert_eq!(first.wave, 2);
    assert_eq!(first.serial, 0);
    assert_eq!(s.spawned(), 1);
}

#[test]
fn spawn_points_lie_on_an_edge() {
    let tunables = Tunables::default();
    let mut rng = ArenaRng::seeded(4);
    let mut s = SpawnScheduler::default();

    for (_, order) in drain(&mut s, &mut rng, &tunables, 20, 200, 0.5, 100.0) {
        let p = order.position;
        assert_eq!(p.y, 1.0);
        let on_x_edge = p.x.abs() == 22.0 && p.z.abs() <= 20.0;
        let on_z_edge = p.z.abs() == 22.0 && p.x.abs() <= 20.0;
        assert!(on_x_edge || on_z_edge, "{p}");
    }
}

#[test]
fn variant_mix_roughly_matches_weights() {
    let tunables = Tunables::default();
    let mut rng = ArenaRng::seeded(5);
    let mut s = SpawnScheduler::default();

    let orders = drain(&mut s, &mut rng, &tunables, 20, 4000, 0.5, 2000.0);
    assert_eq!(orders.len(), 4000);

    let share = |v: EnemyVariant| {
        orders.iter().filter(|(_, o)| o.variant == v).count() as f32 / orders.len() as f32
    };
    assert!((share(EnemyVariant::Tank) - 0.20).abs() < 0.03);
    assert!((share(EnemyVariant::Speeder) - 0.15).abs() < 0.03);
    assert!((share(EnemyVariant::Jumper) - 0.15).abs() < 0.03);
    assert!((share(EnemyVariant::Normal) - 0.50).abs() < 0.03);
}

fn spawner_world() -> World {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.insert_resource(ArenaRng::seeded(9));
    world.insert_resource(EnemyRegistry::default());
    world.insert_resource(SpawnScheduler::default());
    world.init_resource::<Messages<SessionEvent>>();

    let mut store = SessionStore::in_memory();
    store.start_game();
    store.drain_events();
    world.insert_resource(store);

    set_tick(&mut world, 1.0 / 60.0);
    world
}

#[test]
fn system_spawns_and_registers_enemy_with_session_scoped_id() {
    let mut world = spawner_world();
    run_system_once(&mut world, spawn_wave_enemies);

    let generation = world.resource::<SessionStore>().generation();
    let ids: Vec<EnemyId> = world
        .query::<&Enemy>()
        .iter(&world)
        .map(|e| e.id)
        .collect();
    assert_eq!(
        ids,
        vec![EnemyId {
            session: generation,
            wave: 1,
            serial: 0
        }]
    );
    assert_eq!(world.resource::<EnemyRegistry>().len(), 1);
}

#[test]
fn session_reset_rewinds_the_scheduler() {
    let mut world = spawner_world();
    run_system_once(&mut world, spawn_wave_enemies);
    assert_eq!(world.resource::<SpawnScheduler>().spawned(), 1);

    world.write_message(SessionEvent::ReturnedToMenu { generation: 2 });
    run_system_once(&mut world, reset_scheduler_on_session_reset);

    assert_eq!(world.resource::<SpawnScheduler>().spawned(), 0);
    assert_eq!(world.resource::<SpawnScheduler>().countdown(), 0.0);
}
