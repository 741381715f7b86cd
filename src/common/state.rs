//! Session phase machine.
//!
//! The session store owns the phase. This Bevy state is a mirror of it, updated once per
//! frame in `PreUpdate`, so render-side plugins can hook `OnEnter`/`OnExit` and `in_state`.
//! Simulation systems gate on the store directly (see `session::session_is_playing`).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// Ordering of the fixed-step simulation.
///
/// The player publishes its position before enemies read it; projectiles resolve hits after
/// enemies have moved; the session timers run last so a wave advance sees the final kill count.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Player,
    Spawn,
    Enemies,
    Projectiles,
    Session,
}

/// Frame-level session plumbing in `PreUpdate`.
///
/// - `Intents`: UI/keyboard intents are applied to the store.
/// - `Publish`: queued store events are written as messages.
/// - `React`: plugins reset their entities in response to session events.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SessionSet {
    Intents,
    Publish,
    React,
}
