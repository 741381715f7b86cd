//! Spawner plugin: trickles the current wave's enemies in from the arena edges.
//!
//! `SpawnScheduler` is plain data with a pure `tick`; the system around it only turns a
//! `SpawnOrder` into an entity. The scheduler notices wave changes on its own, so the
//! session store never has to call into it.

use bevy::prelude::*;

use crate::common::{
    rng::ArenaRng,
    state::{SessionSet, SimulationSet},
    tunables::Tunables,
};
use crate::plugins::enemies::{self, EnemyVariant};
use crate::plugins::registry::{EnemyId, EnemyRegistry};
use crate::plugins::session::{SessionEvent, SessionStore, session_is_playing};

/// Seconds between spawns in `wave`.
#[inline]
pub fn spawn_interval(wave: u32) -> f32 {
    (2.0 - wave as f32 * 0.1).max(0.5)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnOrder {
    pub wave: u32,
    /// Index of this enemy within its wave.
    pub serial: u32,
    pub variant: EnemyVariant,
    pub position: Vec3,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct SpawnScheduler {
    wave: u32,
    spawned: u32,
    countdown: f32,
}

impl SpawnScheduler {
    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    pub fn countdown(&self) -> f32 {
        self.countdown
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance by `dt`. Returns at most one order per call.
    ///
    /// A wave different from the last one seen restarts the count with the countdown at 0,
    /// so the first enemy of a wave appears on the first tick.
    pub fn tick(
        &mut self,
        dt: f32,
        wave: u32,
        total: u32,
        rng: &mut ArenaRng,
        tunables: &Tunables,
    ) -> Option<SpawnOrder> {
        if wave != self.wave {
            self.wave = wave;
            self.spawned = 0;
            self.countdown = 0.0;
        }

        if self.spawned >= total {
            return None;
        }

        self.countdown -= dt;
        if self.countdown > 0.0 {
            return None;
        }

        self.countdown = spawn_interval(wave);

        let position = edge_position(rng, tunables);
        let variant = EnemyVariant::roll(rng.unit());
        let serial = self.spawned;
        self.spawned += 1;

        Some(SpawnOrder {
            wave,
            serial,
            variant,
            position,
        })
    }
}

/// Random point along one of the four edges: the fixed axis at ±edge, the free axis
/// offset uniformly by ±spread.
fn edge_position(rng: &mut ArenaRng, tunables: &Tunables) -> Vec3 {
    let edge = tunables.spawn_edge;
    let offset = rng.range(-tunables.spawn_spread, tunables.spawn_spread);
    let y = tunables.spawn_height;

    match rng.index(4) {
        0 => Vec3::new(offset, y, -edge),
        1 => Vec3::new(offset, y, edge),
        2 => Vec3::new(-edge, y, offset),
        _ => Vec3::new(edge, y, offset),
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<SpawnScheduler>();

    app.add_systems(
        PreUpdate,
        reset_scheduler_on_session_reset.in_set(SessionSet::React),
    );
    app.add_systems(
        FixedUpdate,
        spawn_wave_enemies
            .in_set(SimulationSet::Spawn)
            .run_if(session_is_playing),
    );
}

fn spawn_wave_enemies(
    mut commands: Commands,
    time: Res<Time>,
    tunables: Res<Tunables>,
    session: Res<SessionStore>,
    mut scheduler: ResMut<SpawnScheduler>,
    mut rng: ResMut<ArenaRng>,
    mut registry: ResMut<EnemyRegistry>,
) {
    let Some(order) = scheduler.tick(
        time.delta_secs(),
        session.wave(),
        session.total_enemies_in_wave(),
        &mut rng,
        &tunables,
    ) else {
        return;
    };

    let id = EnemyId {
        session: session.generation(),
        wave: order.wave,
        serial: order.serial,
    };
    enemies::spawn_enemy(
        &mut commands,
        &mut registry,
        &mut rng,
        &tunables,
        id,
        order.variant,
        order.position,
    );
}

fn reset_scheduler_on_session_reset(
    mut scheduler: ResMut<SpawnScheduler>,
    mut events: MessageReader<SessionEvent>,
) {
    let resets = events
        .read()
        .filter(|e| {
            matches!(
                e,
                SessionEvent::SessionStarted { .. } | SessionEvent::ReturnedToMenu { .. }
            )
        })
        .count();
    if resets > 0 {
        scheduler.reset();
    }
}

#[cfg(test)]
mod tests;
