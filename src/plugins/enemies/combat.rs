//! `EnemyCombat`: the capability view projectiles use to find and hurt enemies.
//!
//! Lookups go through the `EnemyRegistry` (id -> entity). Dead, despawned or never-registered
//! ids all read as "not alive" and ignore damage.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::components::{Enemy, EnemyLifeState, Health, HitFlash};
use crate::common::tunables::Tunables;
use crate::plugins::feedback::FeedbackCue;
use crate::plugins::registry::{EnemyId, EnemyRegistry};
use crate::plugins::session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Unknown or already dead.
    Ignored,
    Hurt { remaining: i32 },
    Killed,
}

#[derive(SystemParam)]
pub struct EnemyCombat<'w, 's> {
    registry: Res<'w, EnemyRegistry>,
    enemies: Query<
        'w,
        's,
        (
            &'static Enemy,
            &'static Transform,
            &'static mut Health,
            &'static mut EnemyLifeState,
            &'static mut HitFlash,
        ),
    >,
    session: ResMut<'w, SessionStore>,
    tunables: Res<'w, Tunables>,
    cues: MessageWriter<'w, FeedbackCue>,
}

impl EnemyCombat<'_, '_> {
    pub fn position(&self, id: EnemyId) -> Option<Vec3> {
        let entity = self.registry.get(id)?;
        let (_, tf, ..) = self.enemies.get(entity).ok()?;
        Some(tf.translation)
    }

    pub fn is_alive(&self, id: EnemyId) -> bool {
        self.registry
            .get(id)
            .and_then(|e| self.enemies.get(e).ok())
            .is_some_and(|(_, _, _, life, _)| life.is_alive())
    }

    /// Nearest living enemy strictly closer than `radius` to `point`.
    /// Equal distances resolve to the smaller id.
    pub fn nearest_alive_within(&self, point: Vec3, radius: f32) -> Option<EnemyId> {
        let mut best: Option<(f32, EnemyId)> = None;

        for (id, entity) in self.registry.iter() {
            let Ok((_, tf, _, life, _)) = self.enemies.get(entity) else {
                continue;
            };
            if !life.is_alive() {
                continue;
            }

            let d = tf.translation.distance(point);
            if d >= radius {
                continue;
            }

            let closer = match best {
                None => true,
                Some((bd, bid)) => d < bd || (d == bd && id < bid),
            };
            if closer {
                best = Some((d, id));
            }
        }

        best.map(|(_, id)| id)
    }

    /// Apply `amount` damage. The kill is reported to the session exactly once.
    pub fn take_damage(&mut self, id: EnemyId, amount: i32) -> DamageOutcome {
        let Some(entity) = self.registry.get(id) else {
            return DamageOutcome::Ignored;
        };
        let Ok((enemy, tf, mut health, mut life, mut flash)) = self.enemies.get_mut(entity) else {
            return DamageOutcome::Ignored;
        };
        if !life.is_alive() {
            return DamageOutcome::Ignored;
        }

        let position = tf.translation;
        health.hp -= amount;
        flash.0 = self.tunables.hit_flash_secs;

        if health.hp > 0 {
            self.cues.write(FeedbackCue::EnemyHit { position });
            return DamageOutcome::Hurt { remaining: health.hp };
        }

        *life = EnemyLifeState::Dead;
        let color = enemy.color;
        debug!("{id} killed at {position}");

        self.session.enemy_killed();
        self.cues.write(FeedbackCue::Explosion { position, color });
        DamageOutcome::Killed
    }
}
