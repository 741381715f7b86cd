//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `arena_survival::game::configure_headless` to install gameplay plugins.
//! - time advances by exactly one fixed step per `app.update()`, so every update runs
//!   `FixedUpdate` once and tests can count seconds in updates.
#![allow(dead_code)]

use std::time::Duration;

use arena_survival::common::rng::ArenaRng;
use arena_survival::plugins::session::{SessionIntent, SessionStore};
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

/// Bevy's default fixed timestep (64 Hz).
pub const STEP: Duration = Duration::from_micros(15_625);
pub const STEPS_PER_SEC: f32 = 64.0;

pub fn app_headless() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(STEP));
    app.insert_resource(ArenaRng::seeded(0x5EED));

    arena_survival::game::configure_headless(&mut app);

    // Startup systems + first clock tick.
    app.update();
    app
}

pub fn send(app: &mut App, intent: SessionIntent) {
    app.world_mut().write_message(intent);
    app.update();
}

pub fn run_secs(app: &mut App, secs: f32) {
    let steps = (secs * STEPS_PER_SEC).ceil() as usize;
    for _ in 0..steps {
        app.update();
    }
}

/// Update until `done` holds or `max_updates` pass. Returns whether it held.
pub fn run_until(app: &mut App, max_updates: usize, mut done: impl FnMut(&mut App) -> bool) -> bool {
    for _ in 0..max_updates {
        if done(app) {
            return true;
        }
        app.update();
    }
    done(app)
}

pub fn store(app: &App) -> &SessionStore {
    app.world().resource::<SessionStore>()
}
