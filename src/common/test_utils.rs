//! Test helpers.
//!
//! `World::run_system_once` (via the `RunSystemOnce` trait) runs a single system without a
//! schedule. Systems that use `Commands` only enqueue structural changes, so we flush
//! afterwards to make spawns/despawns visible to assertions.

use std::time::Duration;

use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// Insert (or replace) the generic `Time` clock with a single step of `dt` seconds.
///
/// Simulation systems read `Res<Time>`, which is the fixed clock inside `FixedUpdate`.
pub fn set_tick(world: &mut World, dt: f32) {
    let mut t = Time::<()>::default();
    t.advance_by(Duration::from_secs_f32(dt));
    world.insert_resource(t);
}
