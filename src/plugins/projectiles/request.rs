use bevy::prelude::*;

use crate::common::{state::GamePhase, tunables::Tunables};
use crate::plugins::player::{Player, PlayerAim, PointerCapture};
use crate::plugins::session::SessionStore;

use super::messages::FireRequest;

/// Muzzle origin and unit direction for a player at `position` aiming with `yaw`/`pitch`.
///
/// The origin is the muzzle offset turned by yaw only; the direction is forward (-Z)
/// pitched about X, then turned about Y.
pub fn muzzle(position: Vec3, yaw: f32, pitch: f32, tunables: &Tunables) -> (Vec3, Vec3) {
    let turn = Quat::from_rotation_y(yaw);
    let origin = position + turn * tunables.muzzle_offset;
    let direction = turn * Quat::from_rotation_x(pitch) * Vec3::NEG_Z;
    (origin, direction)
}

/// Producer: left click -> `FireRequest`.
///
/// A click without pointer capture only asks for capture; it never fires.
pub fn request_player_shots(
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    mut capture: ResMut<PointerCapture>,
    session: Res<SessionStore>,
    aim: Res<PlayerAim>,
    tunables: Res<Tunables>,
    q_player: Query<&Transform, With<Player>>,
    mut writer: MessageWriter<FireRequest>,
) {
    let Some(buttons) = buttons else { return; };
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    if session.phase() != GamePhase::Playing {
        return;
    }
    if !capture.is_active() {
        capture.request();
        return;
    }

    let player_tf = match q_player.single() {
        Ok(tf) => tf,
        Err(e) => {
            debug!("No single Player Transform: {e:?}");
            return;
        }
    };

    if !session.shoot() {
        return;
    }

    let (origin, direction) = muzzle(player_tf.translation, aim.yaw, aim.pitch, &tunables);
    writer.write(FireRequest { origin, direction });
}
