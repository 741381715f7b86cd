//! Enemies plugin: chase, melee, hop, die.
//!
//! Facts live in components (`Health`, `EnemyLifeState`, `AttackCooldown`, `JumpTimer`);
//! rules mutate them in one system per concern:
//!
//! - `steer_enemies` (fixed step): chase the player, attack in range, jumpers hop.
//! - `EnemyCombat::take_damage` (called by projectiles): hurt, flash, mark dead.
//! - `despawn_dead_enemies` (PostUpdate): despawn + deregister whatever died this frame.
//!
//! We never despawn inside the fixed step. Death only flips `EnemyLifeState`; structural
//! changes happen once per frame in `PostUpdate`, same as any other deferred cleanup.

pub mod combat;
pub mod components;
pub mod variant;

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::{
    layers::Layer,
    rng::ArenaRng,
    state::{GamePhase, SessionSet, SimulationSet},
    tunables::Tunables,
};
use crate::plugins::feedback::FeedbackCue;
use crate::plugins::registry::{EnemyId, EnemyRegistry};
use crate::plugins::session::{SessionEvent, SessionStore, session_is_playing};

pub use combat::{DamageOutcome, EnemyCombat};
pub use components::{
    AttackCooldown, Enemy, EnemyLifeState, Health, HitFlash, JumpTimer, VisualScale,
};
pub use variant::EnemyVariant;

/// Capsule half-height shared by all variants; the radius comes from the variant.
const CAPSULE_LENGTH: f32 = 0.8;

pub fn plugin(app: &mut App) {
    app.add_systems(
        PreUpdate,
        clear_enemies_on_session_reset.in_set(SessionSet::React),
    );

    app.add_systems(
        FixedUpdate,
        (steer_enemies, decay_hit_flash)
            .in_set(SimulationSet::Enemies)
            .run_if(session_is_playing),
    );

    app.add_systems(PostUpdate, despawn_dead_enemies);
}

/// Spawn one enemy and register it. The registry entry points at the reserved entity
/// immediately; components land when commands are applied.
pub fn spawn_enemy(
    commands: &mut Commands,
    registry: &mut EnemyRegistry,
    rng: &mut ArenaRng,
    tunables: &Tunables,
    id: EnemyId,
    variant: EnemyVariant,
    position: Vec3,
) -> Entity {
    let stats = variant.stats();
    let layers = CollisionLayers::new(Layer::Enemy, [Layer::World, Layer::Player, Layer::Enemy]);

    let entity = commands
        .spawn((
            Name::new(format!("Enemy {id}")),
            Enemy {
                id,
                variant,
                color: variant::palette_color(id.serial),
            },
            Health {
                hp: variant.starting_health(id.wave),
            },
            EnemyLifeState::Alive,
            AttackCooldown::default(),
            HitFlash::default(),
            VisualScale(stats.scale),
            Transform::from_translation(position),
            RigidBody::Dynamic,
            Collider::capsule(stats.collider_radius, CAPSULE_LENGTH),
            LockedAxes::ROTATION_LOCKED,
            layers,
            LinearVelocity::ZERO,
            LinearDamping(tunables.enemy_linear_damping),
        ))
        .id();

    if stats.jumps {
        let first = rng.range(tunables.jump_interval_min, tunables.jump_interval_max);
        commands.entity(entity).insert(JumpTimer(first));
    }

    registry.register(id, entity);
    debug!("spawned {variant:?} {id} at {position}");
    entity
}

/// Chase the player on the XZ plane; stop and attack once within range.
pub fn steer_enemies(
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut rng: ResMut<ArenaRng>,
    mut session: ResMut<SessionStore>,
    mut cues: MessageWriter<FeedbackCue>,
    mut q: Query<(
        &Enemy,
        &EnemyLifeState,
        &mut Transform,
        &mut LinearVelocity,
        &mut AttackCooldown,
        Option<&mut JumpTimer>,
    )>,
) {
    let dt = time.delta_secs();
    let player = session.player_position();
    let wave = session.wave();
    let chase_speed = tunables.enemy_base_speed * tunables.wave_speed_multiplier(wave);

    for (enemy, life, mut tf, mut vel, mut cooldown, jump) in &mut q {
        if !life.is_alive() {
            continue;
        }

        let to_player = Vec3::new(
            player.x - tf.translation.x,
            0.0,
            player.z - tf.translation.z,
        );
        let distance = to_player.length();
        let dir = to_player.normalize_or_zero();

        if distance > tunables.attack_range {
            let speed = chase_speed * enemy.variant.stats().speed_multiplier;
            vel.0.x = dir.x * speed;
            vel.0.z = dir.z * speed;

            if let Some(mut jump) = jump {
                jump.0 -= dt;
                if jump.0 <= 0.0 {
                    vel.0.y = tunables.jump_impulse_min + rng.range(0.0, tunables.jump_impulse_spread);
                    jump.0 = rng.range(tunables.jump_interval_min, tunables.jump_interval_max);
                }
            }
        } else {
            vel.0.x = 0.0;
            vel.0.z = 0.0;

            cooldown.0 -= dt;
            if cooldown.0 <= 0.0 && session.phase() == GamePhase::Playing {
                let amount = tunables.enemy_attack_damage(wave);
                session.take_damage(amount);
                cues.write(FeedbackCue::PlayerHit { amount });
                cooldown.0 = tunables.attack_cooldown;
            }
        }

        if dir != Vec3::ZERO {
            tf.look_to(dir, Vec3::Y);
        }
    }
}

fn decay_hit_flash(time: Res<Time>, mut q: Query<&mut HitFlash>) {
    let dt = time.delta_secs();
    for mut flash in &mut q {
        if flash.is_active() {
            flash.0 = (flash.0 - dt).max(0.0);
        }
    }
}

/// Remove dead enemies from both the world and the registry.
fn despawn_dead_enemies(
    mut commands: Commands,
    mut registry: ResMut<EnemyRegistry>,
    q: Query<(Entity, &Enemy, &EnemyLifeState)>,
) {
    for (entity, enemy, life) in &q {
        if life.is_alive() {
            continue;
        }
        registry.deregister(enemy.id);
        commands.entity(entity).despawn();
    }
}

/// A new session or a return to the menu wipes every enemy, carried over or not.
fn clear_enemies_on_session_reset(
    mut commands: Commands,
    mut registry: ResMut<EnemyRegistry>,
    mut events: MessageReader<SessionEvent>,
    q: Query<Entity, With<Enemy>>,
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

    let mut cleared = 0usize;
    for entity in &q {
        commands.entity(entity).despawn();
        cleared += 1;
    }
    registry.clear();
    debug!("session reset cleared {cleared} enemies");
}
