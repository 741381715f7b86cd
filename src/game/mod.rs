//! Game composition root.
//!
//! Provides two public configuration functions:
//! - `configure_full`: DefaultPlugins (window/render/log) + physics + game plugins,
//!   with the leaderboard persisted to disk.
//! - `configure_headless`: minimal configuration for integration tests.

use bevy::prelude::*;
use bevy::window::WindowResolution;

use crate::common::state::GamePhase;
use crate::plugins;
use crate::plugins::session::storage::FileStore;
use crate::plugins::session::SessionStore;

pub fn run() {
    App::new().add_plugins(configure_full).run();
}

/// Full configuration for `cargo run`.
pub fn configure_full(app: &mut App) {
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Arena Survival".into(),
            resolution: WindowResolution::new(1280, 720),
            ..default()
        }),
        ..default()
    }));

    let storage = FileStore::from_env();
    info!("high scores stored under {}", storage.root().display());
    app.insert_resource(SessionStore::new(Box::new(storage)));

    configure_game(app);
    plugins::register_physics(app);
    plugins::register_render(app);
}

/// Headless configuration for integration tests.
///
/// Notes:
/// - Do NOT add DefaultPlugins.
/// - Do NOT add physics or render-only plugins (camera/lighting).
/// - The leaderboard lives in memory unless the caller inserts a `SessionStore` first.
pub fn configure_headless(app: &mut App) {
    configure_game(app);
}

/// Configuration shared by both full and headless apps.
fn configure_game(app: &mut App) {
    app.init_state::<GamePhase>();
    plugins::register_gameplay(app);
}
