//! Core plugin: shared resources and global settings.

use bevy::prelude::*;

use crate::common::{rng::ArenaRng, state::SimulationSet, tunables::Tunables};

pub fn plugin(app: &mut App) {
    app.insert_resource(Tunables::default());
    app.insert_resource(ClearColor(Color::srgb_u8(0x05, 0x05, 0x10)));

    // Tests seed the stream before adding plugins; keep theirs.
    if !app.world().contains_resource::<ArenaRng>() {
        app.insert_resource(ArenaRng::from_entropy());
    }

    app.configure_sets(
        FixedUpdate,
        (
            SimulationSet::Player,
            SimulationSet::Spawn,
            SimulationSet::Enemies,
            SimulationSet::Projectiles,
            SimulationSet::Session,
        )
            .chain(),
    );
}

#[cfg(test)]
mod tests;
