//! World plugin: the arena floor, its four walls and the scattered cover.
//!
//! All static colliders. They are spawned once at startup and survive every session.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::Layer;

pub const ARENA_SIZE: f32 = 50.0;
pub const WALL_HEIGHT: f32 = 4.0;
pub const WALL_THICKNESS: f32 = 1.0;

const GROUND_SIZE: f32 = 100.0;
const GROUND_THICKNESS: f32 = 0.2;

const CRATE_SIZE: f32 = 2.0;
const BARREL_RADIUS: f32 = 1.2;
const BARREL_HEIGHT: f32 = 2.5;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Obstacle {
    Crate,
    Barrel,
}

const OBSTACLES: [(Vec3, Obstacle); 12] = [
    (Vec3::new(10.0, 1.0, 10.0), Obstacle::Crate),
    (Vec3::new(-10.0, 1.0, -10.0), Obstacle::Crate),
    (Vec3::new(15.0, 1.0, -8.0), Obstacle::Barrel),
    (Vec3::new(-12.0, 1.0, 15.0), Obstacle::Barrel),
    (Vec3::new(20.0, 1.0, 0.0), Obstacle::Crate),
    (Vec3::new(-20.0, 1.0, 5.0), Obstacle::Crate),
    (Vec3::new(5.0, 1.0, -20.0), Obstacle::Barrel),
    (Vec3::new(-5.0, 1.0, 22.0), Obstacle::Crate),
    (Vec3::new(25.0, 1.0, 15.0), Obstacle::Barrel),
    (Vec3::new(-18.0, 1.0, -18.0), Obstacle::Crate),
    (Vec3::new(0.0, 1.0, 15.0), Obstacle::Barrel),
    (Vec3::new(-25.0, 1.0, 0.0), Obstacle::Crate),
];

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_arena);
}

fn world_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::World, [Layer::Player, Layer::Enemy])
}

fn spawn_arena(mut commands: Commands) {
    commands.spawn((
        Name::new("Ground"),
        Transform::from_xyz(0.0, -GROUND_THICKNESS * 0.5, 0.0),
        RigidBody::Static,
        Collider::cuboid(GROUND_SIZE, GROUND_THICKNESS, GROUND_SIZE),
        Friction::new(1.0),
        world_layers(),
    ));

    let half = ARENA_SIZE * 0.5;
    let y = WALL_HEIGHT * 0.5;
    let mut spawn_wall = |name: &'static str, pos: Vec3, size: Vec3| {
        commands.spawn((
            Name::new(name),
            Transform::from_translation(pos),
            RigidBody::Static,
            Collider::cuboid(size.x, size.y, size.z),
            world_layers(),
        ));
    };

    let along_x = Vec3::new(ARENA_SIZE, WALL_HEIGHT, WALL_THICKNESS);
    let along_z = Vec3::new(WALL_THICKNESS, WALL_HEIGHT, ARENA_SIZE);
    spawn_wall("WallNorth", Vec3::new(0.0, y, -half), along_x);
    spawn_wall("WallSouth", Vec3::new(0.0, y, half), along_x);
    spawn_wall("WallWest", Vec3::new(-half, y, 0.0), along_z);
    spawn_wall("WallEast", Vec3::new(half, y, 0.0), along_z);

    for (pos, kind) in OBSTACLES {
        let collider = match kind {
            Obstacle::Crate => Collider::cuboid(CRATE_SIZE, CRATE_SIZE, CRATE_SIZE),
            Obstacle::Barrel => Collider::cylinder(BARREL_RADIUS, BARREL_HEIGHT),
        };
        commands.spawn((
            Name::new(format!("{kind:?}")),
            kind,
            Transform::from_translation(pos),
            RigidBody::Static,
            collider,
            world_layers(),
        ));
    }
}
