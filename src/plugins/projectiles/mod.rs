//! Projectiles plugin: message-based producer -> consumer spawning plus a manual flight step.
//!
//! ```text
//!   Update (variable dt)
//!     request_player_shots   click + aim        -> FireRequest
//!     spawn_projectiles      FireRequest        -> Projectile entity + Shoot cue
//!
//!   FixedUpdate / SimulationSet::Projectiles
//!     advance_projectiles    age -> move -> bounds -> nearest living enemy within hit radius
//!                            hit: EnemyCombat::take_damage, projectile despawned same tick
//! ```
//!
//! Projectiles are not physics bodies. They move along a fixed direction and test hits by
//! distance, so they cannot tunnel through each other's colliders or push enemies around.
//! Spawning happens in `Update`, right after the request: a message written in `Update` and
//! read only in `FixedUpdate` could be dropped on frames with no fixed step.

pub mod components;
pub mod messages;
pub mod request;

use bevy::prelude::*;

use crate::common::{
    state::{SessionSet, SimulationSet},
    tunables::Tunables,
};
use crate::plugins::enemies::{Enemy, EnemyCombat};
use crate::plugins::feedback::FeedbackCue;
use crate::plugins::session::{SessionEvent, session_is_playing};

pub use components::{Flight, Projectile};
pub use messages::FireRequest;

pub struct ProjectilesPlugin;

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<FireRequest>();

        app.add_systems(
            Update,
            (
                request::request_player_shots,
                spawn_projectiles.after(request::request_player_shots),
            ),
        );

        app.add_systems(
            FixedUpdate,
            advance_projectiles
                .in_set(SimulationSet::Projectiles)
                .run_if(session_is_playing),
        );

        app.add_systems(
            PreUpdate,
            clear_projectiles_on_session_reset.in_set(SessionSet::React),
        );
    }
}

/// Consumer: the only place projectiles are created.
pub fn spawn_projectiles(
    mut commands: Commands,
    mut requests: MessageReader<FireRequest>,
    mut cues: MessageWriter<FeedbackCue>,
) {
    for req in requests.read() {
        let Some(projectile) = Projectile::new(req.direction) else {
            debug!("dropping fire request with zero direction");
            continue;
        };

        commands.spawn((
            Name::new("Projectile"),
            projectile,
            Transform::from_translation(req.origin),
        ));
        cues.write(FeedbackCue::Shoot { origin: req.origin });
    }
}

pub fn advance_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut q: Query<(Entity, &mut Projectile, &mut Transform), Without<Enemy>>,
    mut combat: EnemyCombat,
) {
    let dt = time.delta_secs();

    for (entity, mut projectile, mut tf) in &mut q {
        match projectile.advance(&mut tf.translation, dt, &tunables) {
            Flight::Flying => {}
            Flight::Expired | Flight::OutOfBounds => {
                commands.entity(entity).despawn();
                continue;
            }
        }

        let Some(target) = combat.nearest_alive_within(tf.translation, tunables.hit_radius) else {
            continue;
        };

        combat.take_damage(target, tunables.projectile_damage);
        commands.entity(entity).despawn();
    }
}

fn clear_projectiles_on_session_reset(
    mut commands: Commands,
    mut events: MessageReader<SessionEvent>,
    q: Query<Entity, With<Projectile>>,
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
    if resets == 0 {
        return;
    }

    for entity in &q {
        commands.entity(entity).despawn();
    }
}
