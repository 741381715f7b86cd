//! Enemy components.
//!
//! Gameplay truth (`Health`, `EnemyLifeState`, `AttackCooldown`, `JumpTimer`) is kept apart
//! from presentation (`HitFlash`, `VisualScale`). All of them are inserted at spawn and only
//! mutated afterwards, so a hit never moves an entity between archetypes.

use bevy::prelude::*;

use super::variant::EnemyVariant;
use crate::plugins::registry::EnemyId;

#[derive(Component, Debug, Clone, Copy)]
pub struct Enemy {
    pub id: EnemyId,
    pub variant: EnemyVariant,
    /// Body color; reused for the death explosion.
    pub color: Color,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub hp: i32,
}

/// Dead is terminal. A dead enemy ignores damage and steering until it is despawned.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnemyLifeState {
    #[default]
    Alive,
    Dead,
}

impl EnemyLifeState {
    #[inline]
    pub fn is_alive(self) -> bool {
        matches!(self, Self::Alive)
    }
}

/// Seconds until the next melee attack may land. Starts at 0: the first contact hits at once.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct AttackCooldown(pub f32);

/// Seconds until the next hop. Only jumpers carry one.
#[derive(Component, Debug, Clone, Copy)]
pub struct JumpTimer(pub f32);

/// Remaining seconds of the white hit flash.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct HitFlash(pub f32);

impl HitFlash {
    #[inline]
    pub fn is_active(self) -> bool {
        self.0 > 0.0
    }
}

/// Uniform body scale for the renderer. Independent of `Transform` so the physics collider
/// (sized from the variant's radius) is never scaled twice.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct VisualScale(pub f32);
