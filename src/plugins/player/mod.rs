//! Player plugin.
//!
//! Pipeline:
//! - Update: sample keys into `PlayerInput`, mouse motion into `PlayerAim` (only while the
//!   pointer is captured), Escape releases capture.
//! - FixedUpdate: turn the input axis by yaw into a planar velocity, then publish
//!   position/yaw/pitch to the session store for enemies and the camera.
//!
//! Pointer capture is tracked here as plain data. The window side (grab + hide the cursor)
//! lives in the camera plugin so headless runs never touch a window.

use avian3d::prelude::*;
use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;

use crate::common::{
    layers::Layer,
    state::{GamePhase, SessionSet, SimulationSet},
    tunables::Tunables,
};
use crate::plugins::session::{SessionEvent, SessionStore, session_is_playing};

const CAPSULE_RADIUS: f32 = 0.4;
const CAPSULE_LENGTH: f32 = 1.0;

#[derive(Component)]
pub struct Player;

#[derive(Resource, Default, Debug)]
pub struct PlayerInput {
    /// x: strafe (+right), y: forward (+forward). Normalized or zero.
    pub move_axis: Vec2,
}

/// Look angles in radians. Yaw is unbounded; pitch stays within the tunable limits.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct PlayerAim {
    pub yaw: f32,
    pub pitch: f32,
}

impl PlayerAim {
    pub fn apply_look(&mut self, delta: Vec2, tunables: &Tunables) {
        self.yaw -= delta.x * tunables.mouse_sensitivity;
        self.pitch = (self.pitch - delta.y * tunables.mouse_sensitivity)
            .clamp(tunables.pitch_min, tunables.pitch_max);
    }
}

#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerCapture {
    active: bool,
}

impl PointerCapture {
    pub fn new(active: bool) -> Self {
        Self { active }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn request(&mut self) {
        self.active = true;
    }

    pub fn release(&mut self) {
        self.active = false;
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<PlayerInput>()
        .init_resource::<PlayerAim>()
        .init_resource::<PointerCapture>()
        .add_systems(Startup, spawn)
        .add_systems(
            PreUpdate,
            reset_player_on_session_start.in_set(SessionSet::React),
        )
        .add_systems(Update, (gather_input, update_aim, release_capture_on_escape))
        .add_systems(OnExit(GamePhase::Playing), release_capture)
        .add_systems(
            FixedUpdate,
            (apply_movement, publish_player_state)
                .chain()
                .in_set(SimulationSet::Player)
                .run_if(session_is_playing),
        );
}

fn spawn(mut commands: Commands, tunables: Res<Tunables>) {
    let layers = CollisionLayers::new(Layer::Player, [Layer::World, Layer::Enemy]);

    commands.spawn((
        Name::new("Player"),
        Player,
        Transform::from_translation(tunables.player_spawn),
        RigidBody::Dynamic,
        Collider::capsule(CAPSULE_RADIUS, CAPSULE_LENGTH),
        LockedAxes::ROTATION_LOCKED,
        layers,
        LinearVelocity::ZERO,
        LinearDamping(tunables.player_linear_damping),
    ));
}

/// Planar world-space direction for a local input axis turned by `yaw`.
pub fn world_move_direction(axis: Vec2, yaw: f32) -> Vec3 {
    Quat::from_rotation_y(yaw) * Vec3::new(axis.x, 0.0, -axis.y)
}

fn gather_input(keys: Option<Res<ButtonInput<KeyCode>>>, mut input: ResMut<PlayerInput>) {
    let Some(keys) = keys else { return; };
    let mut axis = Vec2::ZERO;

    if keys.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
        axis.y += 1.0;
    }
    if keys.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
        axis.y -= 1.0;
    }
    if keys.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        axis.x -= 1.0;
    }
    if keys.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        axis.x += 1.0;
    }

    input.move_axis = axis.normalize_or_zero();
}

fn update_aim(
    motion: Option<Res<AccumulatedMouseMotion>>,
    capture: Res<PointerCapture>,
    session: Res<SessionStore>,
    tunables: Res<Tunables>,
    mut aim: ResMut<PlayerAim>,
) {
    let Some(motion) = motion else { return; };
    if !capture.is_active() || session.phase() != GamePhase::Playing {
        return;
    }
    if motion.delta != Vec2::ZERO {
        aim.apply_look(motion.delta, &tunables);
    }
}

fn release_capture_on_escape(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut capture: ResMut<PointerCapture>,
) {
    let Some(keys) = keys else { return; };
    if keys.just_pressed(KeyCode::Escape) && capture.is_active() {
        capture.release();
    }
}

fn release_capture(mut capture: ResMut<PointerCapture>) {
    capture.release();
}

fn apply_movement(
    tunables: Res<Tunables>,
    input: Res<PlayerInput>,
    aim: Res<PlayerAim>,
    mut q_player: Query<(&mut LinearVelocity, &mut Transform), With<Player>>,
) {
    let Ok((mut vel, mut tf)) = q_player.single_mut() else {
        return;
    };

    let planar = world_move_direction(input.move_axis, aim.yaw) * tunables.player_speed;
    vel.0.x = planar.x;
    vel.0.z = planar.z;
    tf.rotation = Quat::from_rotation_y(aim.yaw);
}

fn publish_player_state(
    aim: Res<PlayerAim>,
    mut session: ResMut<SessionStore>,
    q_player: Query<&Transform, With<Player>>,
) {
    let Ok(tf) = q_player.single() else {
        return;
    };
    session.set_player_position(tf.translation);
    session.set_player_yaw(aim.yaw);
    session.set_player_pitch(aim.pitch);
}

fn reset_player_on_session_start(
    tunables: Res<Tunables>,
    mut events: MessageReader<SessionEvent>,
    mut aim: ResMut<PlayerAim>,
    mut input: ResMut<PlayerInput>,
    mut session: ResMut<SessionStore>,
    mut q_player: Query<(&mut Transform, &mut LinearVelocity), With<Player>>,
) {
    let started = events
        .read()
        .filter(|e| matches!(e, SessionEvent::SessionStarted { .. }))
        .count();
    if started == 0 {
        return;
    }

    *aim = PlayerAim::default();
    *input = PlayerInput::default();

    if let Ok((mut tf, mut vel)) = q_player.single_mut() {
        tf.translation = tunables.player_spawn;
        tf.rotation = Quat::IDENTITY;
        vel.0 = Vec3::ZERO;
    }
    session.set_player_position(tunables.player_spawn);
    session.set_player_yaw(0.0);
    session.set_player_pitch(0.0);
}

#[cfg(test)]
mod tests;
