//! Enemy registry: enemy id -> entity.
//!
//! This is a lookup, not an owner. Entries are added when an enemy spawns and removed when
//! it is despawned (or all at once when a session resets). A stale entry whose entity is
//! already gone just fails the lookup, which reads the same as "not alive".
//!
//! The capability view on top of it (position / alive / damage) is `enemies::EnemyCombat`.

use std::fmt;

use bevy::platform::collections::HashMap;
use bevy::prelude::*;

/// Unique enemy identity: session generation + wave + spawn serial within the wave.
///
/// Ordering is total, which gives spatial queries a deterministic tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EnemyId {
    pub session: u64,
    pub wave: u32,
    pub serial: u32,
}

impl fmt::Display for EnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "enemy#{}.{}.{}", self.session, self.wave, self.serial)
    }
}

#[derive(Resource, Debug, Default)]
pub struct EnemyRegistry {
    entries: HashMap<EnemyId, Entity>,
}

impl EnemyRegistry {
    /// Returns the entity previously registered under `id`, if any.
    pub fn register(&mut self, id: EnemyId, entity: Entity) -> Option<Entity> {
        let previous = self.entries.insert(id, entity);
        if previous.is_some() {
            warn!("{id} registered twice");
        }
        previous
    }

    pub fn deregister(&mut self, id: EnemyId) -> Option<Entity> {
        self.entries.remove(&id)
    }

    pub fn get(&self, id: EnemyId) -> Option<Entity> {
        self.entries.get(&id).copied()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EnemyId, Entity)> + '_ {
        self.entries.iter().map(|(id, e)| (*id, *e))
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<EnemyRegistry>();
}
