//! Buffered fire requests.
//!
//! The trigger only writes intent; `spawn_projectiles` is the single place projectiles
//! come into existence.

use bevy::prelude::*;

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct FireRequest {
    pub origin: Vec3,
    pub direction: Vec3,
}
