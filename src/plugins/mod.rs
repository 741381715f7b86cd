//! Feature plugins.

use bevy::prelude::*;

pub mod core;
pub mod enemies;
pub mod feedback;
pub mod physics;
pub mod player;
pub mod projectiles;
pub mod registry;
pub mod session;
pub mod spawner;
pub mod world;

// Render-only
pub mod camera;
pub mod lighting;

/// Register gameplay plugins that work in headless tests.
///
/// Physics is not part of this set: headless runs drive velocities and positions
/// without a solver.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    session::plugin(app);
    feedback::plugin(app);
    registry::plugin(app);
    world::plugin(app);
    player::plugin(app);
    spawner::plugin(app);
    enemies::plugin(app);
    app.add_plugins(projectiles::ProjectilesPlugin);
}

/// Rigid-body simulation (full app only).
pub fn register_physics(app: &mut App) {
    physics::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    lighting::plugin(app);
    camera::plugin(app);
}
