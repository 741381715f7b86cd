//! Rigid-body simulation.
//!
//! Physics time only runs while the session is `Playing`, so bodies hold still while
//! Paused, after GameOver and in the menu after a run.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::state::GamePhase;
use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    let g = app
        .world()
        .get_resource::<Tunables>()
        .map_or(Tunables::default().gravity, |t| t.gravity);
    app.add_plugins(PhysicsPlugins::default());
    app.insert_resource(Gravity(Vec3::NEG_Y * g));
    follow_phase(app);
}

/// Gate `Time<Physics>` on the `Playing` phase.
pub(crate) fn follow_phase(app: &mut App) {
    app.add_systems(OnExit(GamePhase::Playing), pause_physics)
        .add_systems(OnEnter(GamePhase::Playing), resume_physics);
}

fn pause_physics(mut time: ResMut<Time<Physics>>) {
    time.pause();
    debug!("physics paused");
}

fn resume_physics(mut time: ResMut<Time<Physics>>) {
    time.unpause();
}
