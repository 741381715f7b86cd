//! Lighting plugin (render-only): a dim blue key light plus four colored corner lights.

use bevy::prelude::*;

const CORNER_LIGHTS: [(Vec3, Color); 4] = [
    (Vec3::new(20.0, 8.0, 20.0), Color::srgb(1.0, 0.0, 0.4)),
    (Vec3::new(-20.0, 8.0, -20.0), Color::srgb(0.0, 1.0, 0.666_666_7)),
    (Vec3::new(20.0, 8.0, -20.0), Color::srgb(0.4, 0.0, 1.0)),
    (Vec3::new(-20.0, 8.0, 20.0), Color::srgb(1.0, 0.666_666_7, 0.0)),
];

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, setup);
}

fn setup(mut commands: Commands) {
    commands.spawn((
        Name::new("KeyLight"),
        DirectionalLight {
            color: Color::srgb(0.4, 0.4, 1.0),
            illuminance: 2_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(20.0, 30.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    for (i, (pos, color)) in CORNER_LIGHTS.into_iter().enumerate() {
        commands.spawn((
            Name::new(format!("CornerLight{i}")),
            PointLight {
                color,
                intensity: 150_000.0,
                range: 30.0,
                ..default()
            },
            Transform::from_translation(pos),
        ));
    }
}
