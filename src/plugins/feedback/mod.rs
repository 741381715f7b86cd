//! Feedback plugin: the outbound channel to audio/VFX.
//!
//! Simulation writes `FeedbackCue` messages and never waits on them. Whatever plays sounds
//! or spawns particles reads the same messages; if nothing does, the cues are simply
//! dropped when the buffer rotates. The default consumer here only logs.

use bevy::prelude::*;

#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum FeedbackCue {
    /// The player fired (`playShoot`).
    Shoot { origin: Vec3 },
    /// The player took damage (`playHit`).
    PlayerHit { amount: u32 },
    /// An enemy was hit but survived; drives its white flash.
    EnemyHit { position: Vec3 },
    /// An enemy died (`playExplosion` + `spawnExplosion(position, color)`).
    Explosion { position: Vec3, color: Color },
}

pub fn plugin(app: &mut App) {
    app.add_message::<FeedbackCue>()
        .add_systems(PostUpdate, log_feedback_cues);
}

fn log_feedback_cues(mut cues: MessageReader<FeedbackCue>) {
    for cue in cues.read() {
        match cue {
            FeedbackCue::Explosion { position, .. } => debug!("explosion at {position}"),
            FeedbackCue::PlayerHit { amount } => debug!("player hit for {amount}"),
            FeedbackCue::Shoot { .. } | FeedbackCue::EnemyHit { .. } => trace!("{cue:?}"),
        }
    }
}
