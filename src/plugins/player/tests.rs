use avian3d::prelude::*;
use bevy::ecs::message::Messages;
use bevy::prelude::*;

use crate::common::test_utils::run_system_once;
use crate::common::tunables::Tunables;
use crate::plugins::session::{SessionEvent, SessionStore};

use super::*;

fn player_world() -> World {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.insert_resource(PlayerInput::default());
    world.insert_resource(PlayerAim::default());
    world.insert_resource(PointerCapture::default());
    world.init_resource::<Messages<SessionEvent>>();

    let mut store = SessionStore::in_memory();
    store.start_game();
    store.drain_events();
    world.insert_resource(store);
    world
}

#[test]
fn spawn_creates_player_at_spawn_point() {
    let mut world = player_world();
    run_system_once(&mut world, spawn);

    let tf = world
        .query_filtered::<&Transform, With<Player>>()
        .single(&world)
        .unwrap();
    assert_eq!(tf.translation, Vec3::new(0.0, 2.0, 0.0));
}

#[test]
fn player_body_is_damped_so_it_settles_without_input() {
    let mut world = player_world();
    run_system_once(&mut world, spawn);

    let damping = world
        .query_filtered::<&LinearDamping, With<Player>>()
        .single(&world)
        .unwrap();
    assert_eq!(damping.0, 5.0);
}

#[test]
fn forward_at_zero_yaw_is_negative_z() {
    let d = world_move_direction(Vec2::new(0.0, 1.0), 0.0);
    assert!(d.abs_diff_eq(Vec3::NEG_Z, 1e-6));

    let d = world_move_direction(Vec2::new(1.0, 0.0), 0.0);
    assert!(d.abs_diff_eq(Vec3::X, 1e-6));
}

#[test]
fn apply_movement_turns_input_by_yaw_and_keeps_vertical_velocity() {
    let mut world = player_world();
    world.insert_resource(PlayerInput { move_axis: Vec2::new(0.0, 1.0) });
    world.insert_resource(PlayerAim { yaw: std::f32::consts::FRAC_PI_2, pitch: 0.0 });
    world.spawn((Player, Transform::default(), LinearVelocity(Vec3::new(0.0, -3.0, 0.0))));

    run_system_once(&mut world, apply_movement);

    let v = world.query::<&LinearVelocity>().single(&world).unwrap().0;
    assert!(v.abs_diff_eq(Vec3::new(-8.0, -3.0, 0.0), 1e-5), "{v}");
}

#[test]
fn look_clamps_pitch() {
    let t = Tunables::default();
    let mut aim = PlayerAim::default();

    aim.apply_look(Vec2::new(100.0, 0.0), &t);
    assert!((aim.yaw + 0.3).abs() < 1e-6);

    aim.apply_look(Vec2::new(0.0, -10_000.0), &t);
    assert_eq!(aim.pitch, t.pitch_max);

    aim.apply_look(Vec2::new(0.0, 10_000.0), &t);
    assert_eq!(aim.pitch, t.pitch_min);
}

#[test]
fn mouse_motion_is_ignored_without_capture() {
    let mut world = player_world();
    world.insert_resource(AccumulatedMouseMotion { delta: Vec2::new(50.0, 20.0) });

    run_system_once(&mut world, update_aim);
    assert_eq!(*world.resource::<PlayerAim>(), PlayerAim::default());

    world.resource_mut::<PointerCapture>().request();
    run_system_once(&mut world, update_aim);
    assert!(world.resource::<PlayerAim>().yaw < 0.0);
}

#[test]
fn escape_releases_capture() {
    let mut world = player_world();
    world.insert_resource(PointerCapture::new(true));
    let mut keys = ButtonInput::<KeyCode>::default();
    keys.press(KeyCode::Escape);
    world.insert_resource(keys);

    run_system_once(&mut world, release_capture_on_escape);
    assert!(!world.resource::<PointerCapture>().is_active());
}

#[test]
fn opposite_keys_cancel() {
    let mut world = player_world();
    let mut keys = ButtonInput::<KeyCode>::default();
    keys.press(KeyCode::KeyW);
    keys.press(KeyCode::ArrowDown);
    keys.press(KeyCode::KeyD);
    world.insert_resource(keys);

    run_system_once(&mut world, gather_input);
    assert_eq!(world.resource::<PlayerInput>().move_axis, Vec2::X);
}

#[test]
fn publishes_position_and_aim_to_session() {
    let mut world = player_world();
    world.insert_resource(PlayerAim { yaw: 1.0, pitch: -0.5 });
    world.spawn((Player, Transform::from_xyz(3.0, 1.0, -4.0)));

    run_system_once(&mut world, publish_player_state);

    let store = world.resource::<SessionStore>();
    assert_eq!(store.player_position(), Vec3::new(3.0, 1.0, -4.0));
    assert_eq!(store.player_yaw(), 1.0);
    assert_eq!(store.player_pitch(), -0.5);
}

#[test]
fn new_session_returns_player_to_spawn() {
    let mut world = player_world();
    world.insert_resource(PlayerAim { yaw: 2.0, pitch: 0.2 });
    let e = world
        .spawn((Player, Transform::from_xyz(9.0, 1.0, 9.0), LinearVelocity(Vec3::ONE)))
        .id();

    world.write_message(SessionEvent::SessionStarted { generation: 2 });
    run_system_once(&mut world, reset_player_on_session_start);

    assert_eq!(world.get::<Transform>(e).unwrap().translation, Vec3::new(0.0, 2.0, 0.0));
    assert_eq!(world.get::<LinearVelocity>(e).unwrap().0, Vec3::ZERO);
    assert_eq!(*world.resource::<PlayerAim>(), PlayerAim::default());
    assert_eq!(world.resource::<SessionStore>().player_position(), Vec3::new(0.0, 2.0, 0.0));
}
