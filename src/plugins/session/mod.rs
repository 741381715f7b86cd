//! Session plugin: wires the `SessionStore` into the frame.
//!
//! ```text
//! PreUpdate   Intents  apply_session_intents   (SessionIntent -> store actions)
//!             Publish  publish_session_events  (store outbox -> SessionEvent messages)
//!                      sync_phase_state        (store phase -> State<GamePhase>)
//!             React    (other plugins reset their entities on SessionStarted/ReturnedToMenu)
//! Update               read_session_hotkeys    (keyboard -> SessionIntent)
//! FixedUpdate Session  advance_session_timers  (deferred wave advance)
//! PostUpdate           publish_session_events  (flush events raised by the fixed step)
//! ```

pub mod events;
pub mod storage;
pub mod store;

use bevy::prelude::*;

use crate::common::state::{GamePhase, SessionSet, SimulationSet};

pub use events::{SessionEvent, SessionIntent};
pub use store::{HighScoreEntry, SessionStore};

pub fn plugin(app: &mut App) {
    // The full app inserts a file-backed store before this runs; headless runs get memory.
    if !app.world().contains_resource::<SessionStore>() {
        app.insert_resource(SessionStore::in_memory());
    }

    app.add_message::<SessionIntent>()
        .add_message::<SessionEvent>();

    app.configure_sets(
        PreUpdate,
        (SessionSet::Intents, SessionSet::Publish, SessionSet::React).chain(),
    );

    app.add_systems(
        PreUpdate,
        (
            apply_session_intents.in_set(SessionSet::Intents),
            (publish_session_events, sync_phase_state)
                .chain()
                .in_set(SessionSet::Publish),
        ),
    );

    app.add_systems(Update, read_session_hotkeys);

    app.add_systems(
        FixedUpdate,
        advance_session_timers
            .in_set(SimulationSet::Session)
            .run_if(session_is_playing),
    );

    app.add_systems(PostUpdate, publish_session_events);
}

/// Run condition for every simulation system: pausing freezes the world by skipping them.
pub fn session_is_playing(store: Option<Res<SessionStore>>) -> bool {
    store.is_some_and(|s| s.phase() == GamePhase::Playing)
}

/// Apply UI/keyboard intents to the store.
///
/// This system is the caller-side guard for the leaderboard: one save per finished run.
/// Leaving a finished run without saving (play again / menu) saves it anonymously.
fn apply_session_intents(
    mut store: ResMut<SessionStore>,
    mut intents: MessageReader<SessionIntent>,
    mut saved_generation: Local<Option<u64>>,
) {
    for intent in intents.read() {
        let finished_unsaved = store.phase() == GamePhase::GameOver
            && *saved_generation != Some(store.generation());

        match intent {
            SessionIntent::StartGame => {
                if finished_unsaved {
                    store.save_high_score("");
                }
                store.start_game();
            }
            SessionIntent::GoToMenu => {
                if finished_unsaved {
                    store.save_high_score("");
                }
                store.go_to_menu();
            }
            SessionIntent::TogglePause => store.pause_game(),
            SessionIntent::Reload => store.reload(),
            SessionIntent::SaveHighScore(name) => {
                if finished_unsaved {
                    store.save_high_score(name);
                    *saved_generation = Some(store.generation());
                } else {
                    debug!("ignoring high score save outside an unsaved game over");
                }
            }
        }
    }
}

/// Drain the store outbox into `SessionEvent` messages.
pub fn publish_session_events(
    mut store: ResMut<SessionStore>,
    mut writer: MessageWriter<SessionEvent>,
) {
    for event in store.drain_events() {
        debug!("session event: {event:?}");
        writer.write(event);
    }
}

/// Mirror the store phase into Bevy's state machine.
fn sync_phase_state(
    store: Res<SessionStore>,
    state: Res<State<GamePhase>>,
    mut next: ResMut<NextState<GamePhase>>,
) {
    if *state.get() != store.phase() {
        next.set(store.phase());
    }
}

fn read_session_hotkeys(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    store: Res<SessionStore>,
    mut writer: MessageWriter<SessionIntent>,
) {
    let Some(keys) = keys else { return; };

    if keys.just_pressed(KeyCode::Escape) {
        writer.write(SessionIntent::TogglePause);
    }
    if keys.just_pressed(KeyCode::KeyR) && store.phase() == GamePhase::Playing {
        writer.write(SessionIntent::Reload);
    }
    if keys.just_pressed(KeyCode::Enter)
        && matches!(store.phase(), GamePhase::Menu | GamePhase::GameOver)
    {
        writer.write(SessionIntent::StartGame);
    }
}

fn advance_session_timers(time: Res<Time>, mut store: ResMut<SessionStore>) {
    store.tick(time.delta_secs());
}
