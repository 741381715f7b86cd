//! Camera plugin (render-only): third-person follow + window cursor grab.
//!
//! The camera reads the player's published state from the session store instead of the
//! player entity, so it needs no disjointness filters against `Player`.
//!
//! ```text
//! Startup:     spawn MainCamera
//! PostUpdate:  follow_player (Playing only, before transform propagation)
//! Update:      apply_pointer_capture (PointerCapture -> primary window CursorOptions)
//! ```

use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};

use crate::common::state::GamePhase;
use crate::plugins::player::PointerCapture;
use crate::plugins::session::SessionStore;

const DISTANCE: f32 = 7.0;
const HEIGHT: f32 = 3.0;
const LOOK_AHEAD: f32 = 2.0;
/// Pitch influence on the orbit angle.
const PITCH_ORBIT: f32 = 0.8;
/// Caps the per-frame blend so a long frame cannot snap the camera.
const MAX_BLEND_DT: f32 = 0.05;

#[derive(Component)]
pub struct MainCamera {
    pub responsiveness: f32,
    look_at: Vec3,
}

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_camera)
        .add_systems(Update, apply_pointer_capture)
        .add_systems(
            PostUpdate,
            follow_player
                .before(TransformSystems::Propagate)
                .run_if(in_state(GamePhase::Playing)),
        );
}

fn spawn_camera(mut commands: Commands) {
    let look_at = Vec3::new(0.0, 1.5, 0.0);
    commands.spawn((
        Name::new("MainCamera"),
        Camera3d::default(),
        MainCamera {
            responsiveness: 10.0,
            look_at,
        },
        Transform::from_xyz(0.0, 5.0, 7.0).looking_at(look_at, Vec3::Y),
    ));
}

/// Where the camera wants to be and what it wants to look at.
///
/// Looking down (positive pitch) lifts the camera higher behind the player.
pub fn follow_target(player: Vec3, yaw: f32, pitch: f32) -> (Vec3, Vec3) {
    let orbit = std::f32::consts::FRAC_PI_6 - pitch * PITCH_ORBIT;
    let horizontal = DISTANCE * orbit.cos();
    let vertical = DISTANCE * orbit.sin() + HEIGHT;

    let eye = Vec3::new(
        player.x + yaw.sin() * horizontal,
        player.y + vertical,
        player.z + yaw.cos() * horizontal,
    );
    let look_at = Vec3::new(
        player.x - yaw.sin() * LOOK_AHEAD,
        player.y + 1.2 - pitch * 2.0,
        player.z - yaw.cos() * LOOK_AHEAD,
    );
    (eye, look_at)
}

fn follow_player(
    time: Res<Time>,
    session: Res<SessionStore>,
    mut q_cam: Query<(&mut Transform, &mut MainCamera)>,
) {
    let Ok((mut tf, mut cam)) = q_cam.single_mut() else {
        return;
    };

    let (eye, look_at) = follow_target(
        session.player_position(),
        session.player_yaw(),
        session.player_pitch(),
    );

    let alpha = (cam.responsiveness * time.delta_secs().min(MAX_BLEND_DT)).min(1.0);
    tf.translation = tf.translation.lerp(eye, alpha);
    cam.look_at = cam.look_at.lerp(look_at, alpha);
    let target = cam.look_at;
    tf.look_at(target, Vec3::Y);
}

fn apply_pointer_capture(
    capture: Res<PointerCapture>,
    mut q_cursor: Query<&mut CursorOptions, With<PrimaryWindow>>,
) {
    if !capture.is_changed() {
        return;
    }
    let Ok(mut cursor) = q_cursor.single_mut() else {
        debug!("no primary window to grab");
        return;
    };

    if capture.is_active() {
        cursor.grab_mode = CursorGrabMode::Locked;
        cursor.visible = false;
    } else {
        cursor.grab_mode = CursorGrabMode::None;
        cursor.visible = true;
    }
}

#[cfg(test)]
mod tests;
