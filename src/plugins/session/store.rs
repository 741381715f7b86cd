//! The session store: single owner of phase, counters and the leaderboard.
//!
//! Everything else reads through accessors and mutates through the action methods below.
//! Each action that changes observable state emits a `SessionEvent`, delivered
//! synchronously to subscribed listeners and queued in an outbox that the plugin drains
//! into Bevy messages once per frame.
//!
//! # Deferred wave advance
//! Clearing a wave does not advance immediately: `enemy_killed` arms a one-shot timer keyed
//! by the current session generation. `tick(dt)` counts it down. A new session (or a trip
//! to the menu) bumps the generation, so an armed timer from the old session can never fire
//! into the new one.

use std::time::{SystemTime, UNIX_EPOCH};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::common::state::GamePhase;

use super::events::SessionEvent;
use super::storage::{KeyValueStore, MemoryStore, StorageError};

pub const STORAGE_KEY: &str = "shooter-high-scores";

pub const DEFAULT_MAX_HEALTH: u32 = 100;
pub const DEFAULT_MAX_AMMO: u32 = 30;
pub const WAVE_ADVANCE_DELAY_SECS: f32 = 2.0;
pub const WAVE_CLEAR_HEAL: u32 = 20;
pub const MAX_HIGH_SCORES: usize = 10;
pub const MAX_NAME_LEN: usize = 15;
pub const ANONYMOUS: &str = "Anonymous";

/// Enemies in wave `n`: `5 + (n-1)*3`.
#[inline]
pub fn enemies_in_wave(wave: u32) -> u32 {
    5 + wave.saturating_sub(1) * 3
}

/// Points for one kill during `wave`.
#[inline]
pub fn kill_points(wave: u32) -> u32 {
    100 + wave * 10
}

/// Bonus for clearing `wave` (the wave that just ended, not the next one).
#[inline]
pub fn wave_clear_bonus(wave: u32) -> u32 {
    wave * 50
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u32,
    pub wave: u32,
    pub kills: u32,
    /// Unix time in milliseconds.
    #[serde(default)]
    pub timestamp: u64,
}

pub type SessionListener = Box<dyn Fn(&SessionEvent) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Debug, Clone, Copy)]
struct DeferredWaveAdvance {
    remaining: f32,
    generation: u64,
    /// Set when armed; the step that armed the timer does not count toward the delay.
    armed_this_tick: bool,
}

#[derive(Resource)]
pub struct SessionStore {
    phase: GamePhase,
    score: u32,
    wave: u32,
    health: u32,
    max_health: u32,
    ammo: u32,
    max_ammo: u32,
    kills: u32,
    enemies_remaining: u32,
    total_enemies_in_wave: u32,

    player_position: Vec3,
    player_yaw: f32,
    player_pitch: f32,

    high_scores: Vec<HighScoreEntry>,

    generation: u64,
    pending_advance: Option<DeferredWaveAdvance>,

    storage: Box<dyn KeyValueStore>,
    listeners: Vec<(SubscriptionId, SessionListener)>,
    next_subscription: u64,
    outbox: Vec<SessionEvent>,
}

impl SessionStore {
    /// Build a store and load the leaderboard from `storage` (missing/corrupt → empty).
    pub fn new(storage: Box<dyn KeyValueStore>) -> Self {
        let high_scores = load_high_scores(storage.as_ref());

        Self {
            phase: GamePhase::Menu,
            score: 0,
            wave: 1,
            health: DEFAULT_MAX_HEALTH,
            max_health: DEFAULT_MAX_HEALTH,
            ammo: DEFAULT_MAX_AMMO,
            max_ammo: DEFAULT_MAX_AMMO,
            kills: 0,
            enemies_remaining: 0,
            total_enemies_in_wave: 0,
            player_position: Vec3::ZERO,
            player_yaw: 0.0,
            player_pitch: 0.0,
            high_scores,
            generation: 0,
            pending_advance: None,
            storage,
            listeners: Vec::new(),
            next_subscription: 0,
            outbox: Vec::new(),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::default()))
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn phase(&self) -> GamePhase {
        self.phase
    }
    pub fn score(&self) -> u32 {
        self.score
    }
    pub fn wave(&self) -> u32 {
        self.wave
    }
    pub fn health(&self) -> u32 {
        self.health
    }
    pub fn max_health(&self) -> u32 {
        self.max_health
    }
    pub fn ammo(&self) -> u32 {
        self.ammo
    }
    pub fn max_ammo(&self) -> u32 {
        self.max_ammo
    }
    pub fn kills(&self) -> u32 {
        self.kills
    }
    pub fn enemies_remaining(&self) -> u32 {
        self.enemies_remaining
    }
    pub fn total_enemies_in_wave(&self) -> u32 {
        self.total_enemies_in_wave
    }
    pub fn player_position(&self) -> Vec3 {
        self.player_position
    }
    pub fn player_yaw(&self) -> f32 {
        self.player_yaw
    }
    pub fn player_pitch(&self) -> f32 {
        self.player_pitch
    }
    pub fn high_scores(&self) -> &[HighScoreEntry] {
        &self.high_scores
    }
    pub fn generation(&self) -> u64 {
        self.generation
    }
    pub fn wave_advance_pending(&self) -> bool {
        self.pending_advance
            .is_some_and(|p| p.generation == self.generation)
    }

    // -------------------------------------------------------------------------
    // Observers
    // -------------------------------------------------------------------------

    pub fn subscribe(
        &mut self,
        listener: impl Fn(&SessionEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Take every event queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.outbox)
    }

    fn emit(&mut self, event: SessionEvent) {
        for (_, listener) in &self.listeners {
            listener(&event);
        }
        self.outbox.push(event);
    }

    fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        self.phase = to;
        info!("session phase {from:?} -> {to:?}");
        self.emit(SessionEvent::PhaseChanged { from, to });
    }

    // -------------------------------------------------------------------------
    // Actions
    // -------------------------------------------------------------------------

    pub fn start_game(&mut self) {
        self.generation += 1;
        self.pending_advance = None;

        let enemies = enemies_in_wave(1);
        self.score = 0;
        self.wave = 1;
        self.health = self.max_health;
        self.ammo = self.max_ammo;
        self.kills = 0;
        self.enemies_remaining = enemies;
        self.total_enemies_in_wave = enemies;

        self.emit(SessionEvent::SessionStarted { generation: self.generation });
        self.set_phase(GamePhase::Playing);
        self.emit(SessionEvent::WaveStarted { wave: 1, enemies });
    }

    /// Move to GameOver once. Later calls only report the final score.
    pub fn end_game(&mut self) -> u32 {
        if self.phase == GamePhase::GameOver {
            return self.score;
        }
        self.pending_advance = None;
        self.set_phase(GamePhase::GameOver);
        info!("game over: score {} wave {} kills {}", self.score, self.wave, self.kills);
        self.emit(SessionEvent::GameOver { final_score: self.score });
        self.score
    }

    pub fn pause_game(&mut self) {
        match self.phase {
            GamePhase::Playing => self.set_phase(GamePhase::Paused),
            GamePhase::Paused => self.set_phase(GamePhase::Playing),
            GamePhase::Menu | GamePhase::GameOver => {}
        }
    }

    pub fn go_to_menu(&mut self) {
        self.generation += 1;
        self.pending_advance = None;
        self.set_phase(GamePhase::Menu);
        self.emit(SessionEvent::ReturnedToMenu { generation: self.generation });
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        self.emit(SessionEvent::ScoreAdded { points, score: self.score });
    }

    /// Clamp at zero; reaching zero ends the game.
    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
        self.emit(SessionEvent::PlayerDamaged { amount, health: self.health });
        if self.health == 0 {
            self.end_game();
        }
    }

    pub fn heal(&mut self, amount: u32) {
        self.health = self.health.saturating_add(amount).min(self.max_health);
        self.emit(SessionEvent::PlayerHealed { amount, health: self.health });
    }

    /// Ammo is cosmetic: shooting always succeeds.
    pub fn shoot(&self) -> bool {
        true
    }

    pub fn reload(&mut self) {
        self.ammo = self.max_ammo;
        self.emit(SessionEvent::AmmoReloaded { ammo: self.ammo });
    }

    pub fn enemy_killed(&mut self) {
        let was_remaining = self.enemies_remaining;

        self.kills += 1;
        self.score = self.score.saturating_add(kill_points(self.wave));
        self.enemies_remaining = self.enemies_remaining.saturating_sub(1);

        self.emit(SessionEvent::EnemyKilled {
            kills: self.kills,
            score: self.score,
            remaining: self.enemies_remaining,
        });

        // Arm only on the 1 -> 0 edge so extra kills cannot schedule a second advance.
        if was_remaining > 0 && self.enemies_remaining == 0 {
            self.pending_advance = Some(DeferredWaveAdvance {
                remaining: WAVE_ADVANCE_DELAY_SECS,
                generation: self.generation,
                armed_this_tick: true,
            });
            debug!("wave {} cleared; advancing in {WAVE_ADVANCE_DELAY_SECS}s", self.wave);
            self.emit(SessionEvent::WaveCleared { wave: self.wave });
        }
    }

    pub fn next_wave(&mut self) {
        let cleared = self.wave;
        let wave = cleared + 1;
        let enemies = enemies_in_wave(wave);

        self.wave = wave;
        self.enemies_remaining = enemies;
        self.total_enemies_in_wave = enemies;
        self.ammo = self.max_ammo;
        self.health = self.health.saturating_add(WAVE_CLEAR_HEAL).min(self.max_health);
        self.score = self.score.saturating_add(wave_clear_bonus(cleared));

        info!("wave {wave} begins with {enemies} enemies");
        self.emit(SessionEvent::WaveStarted { wave, enemies });
    }

    /// Advance the deferred wave timer by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        let Some(mut pending) = self.pending_advance else {
            return;
        };

        if pending.generation != self.generation {
            debug!("dropping stale wave advance from generation {}", pending.generation);
            self.pending_advance = None;
            return;
        }

        if pending.armed_this_tick {
            pending.armed_this_tick = false;
            self.pending_advance = Some(pending);
            return;
        }

        pending.remaining -= dt;
        if pending.remaining <= 0.0 {
            self.pending_advance = None;
            self.next_wave();
        } else {
            self.pending_advance = Some(pending);
        }
    }

    /// Append the current run to the leaderboard and persist it.
    ///
    /// Returns the entry's rank (0-based) or `None` if it fell off the top ten.
    /// No dedupe here: callers save once per run.
    pub fn save_high_score(&mut self, name: &str) -> Option<usize> {
        let entry = HighScoreEntry {
            name: sanitize_name(name),
            score: self.score,
            wave: self.wave,
            kills: self.kills,
            timestamp: now_millis(),
        };

        self.high_scores.push(entry);
        let inserted = self.high_scores.len() - 1;

        // Stable sort: equal scores keep insertion order, so the new entry ranks last among ties.
        let mut indexed: Vec<(usize, HighScoreEntry)> =
            std::mem::take(&mut self.high_scores).into_iter().enumerate().collect();
        indexed.sort_by(|(_, a), (_, b)| b.score.cmp(&a.score));
        indexed.truncate(MAX_HIGH_SCORES);

        let rank = indexed.iter().position(|(i, _)| *i == inserted);
        self.high_scores = indexed.into_iter().map(|(_, e)| e).collect();

        if let Err(e) = persist_high_scores(self.storage.as_ref(), &self.high_scores) {
            warn!("leaderboard not persisted: {e}");
        }

        self.emit(SessionEvent::HighScoreSaved { rank });
        rank
    }

    // -------------------------------------------------------------------------
    // Per-frame player publishing (last write wins, no events)
    // -------------------------------------------------------------------------

    pub fn set_player_position(&mut self, position: Vec3) {
        self.player_position = position;
    }

    pub fn set_player_yaw(&mut self, yaw: f32) {
        self.player_yaw = yaw;
    }

    pub fn set_player_pitch(&mut self, pitch: f32) {
        self.player_pitch = pitch;
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("phase", &self.phase)
            .field("score", &self.score)
            .field("wave", &self.wave)
            .field("health", &self.health)
            .field("kills", &self.kills)
            .field("enemies_remaining", &self.enemies_remaining)
            .field("generation", &self.generation)
            .field("high_scores", &self.high_scores.len())
            .finish_non_exhaustive()
    }
}

fn sanitize_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return ANONYMOUS.to_owned();
    }
    trimmed.chars().take(MAX_NAME_LEN).collect()
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

fn load_high_scores(storage: &dyn KeyValueStore) -> Vec<HighScoreEntry> {
    match try_load_high_scores(storage) {
        Ok(mut scores) => {
            scores.sort_by(|a, b| b.score.cmp(&a.score));
            scores.truncate(MAX_HIGH_SCORES);
            scores
        }
        Err(e) => {
            warn!("leaderboard unreadable, starting empty: {e}");
            Vec::new()
        }
    }
}

fn try_load_high_scores(storage: &dyn KeyValueStore) -> Result<Vec<HighScoreEntry>, StorageError> {
    let Some(raw) = storage.read(STORAGE_KEY)? else {
        return Ok(Vec::new());
    };
    Ok(serde_json::from_str(&raw)?)
}

fn persist_high_scores(
    storage: &dyn KeyValueStore,
    scores: &[HighScoreEntry],
) -> Result<(), StorageError> {
    let json = serde_json::to_string(scores)?;
    storage.write(STORAGE_KEY, &json)
}
