//! Session messages.
//!
//! Two directions:
//! - `SessionIntent`: UI/keyboard → store (applied in `PreUpdate`).
//! - `SessionEvent`: store → everyone else (listeners synchronously, ECS readers as messages).

use bevy::prelude::*;

use crate::common::state::GamePhase;

#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub enum SessionIntent {
    StartGame,
    TogglePause,
    GoToMenu,
    Reload,
    SaveHighScore(String),
}

#[derive(Message, Debug, Clone, PartialEq)]
pub enum SessionEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    /// A fresh session began; everything from older generations must go.
    SessionStarted { generation: u64 },
    ReturnedToMenu { generation: u64 },
    ScoreAdded { points: u32, score: u32 },
    PlayerDamaged { amount: u32, health: u32 },
    PlayerHealed { amount: u32, health: u32 },
    EnemyKilled { kills: u32, score: u32, remaining: u32 },
    WaveCleared { wave: u32 },
    WaveStarted { wave: u32, enemies: u32 },
    GameOver { final_score: u32 },
    AmmoReloaded { ammo: u32 },
    HighScoreSaved { rank: Option<usize> },
}
