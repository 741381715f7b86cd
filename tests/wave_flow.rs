mod common;

use arena_survival::common::state::GamePhase;
use arena_survival::plugins::enemies::{Enemy, EnemyCombat};
use arena_survival::plugins::registry::{EnemyId, EnemyRegistry};
use arena_survival::plugins::session::SessionIntent;
use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;

fn enemy_ids(app: &mut App) -> Vec<EnemyId> {
    let mut ids: Vec<EnemyId> = app
        .world_mut()
        .query::<&Enemy>()
        .iter(app.world())
        .map(|e| e.id)
        .collect();
    ids.sort();
    ids
}

fn kill_all(app: &mut App) {
    app.world_mut()
        .run_system_once(|mut combat: EnemyCombat, q: Query<&Enemy>| {
            for enemy in &q {
                combat.take_damage(enemy.id, 10_000);
            }
        })
        .expect("kill system runs");
}

#[test]
fn clearing_wave_one_starts_wave_two_after_the_delay() {
    let mut app = common::app_headless();
    common::send(&mut app, SessionIntent::StartGame);

    let all_in = common::run_until(&mut app, 64 * 12, |app| enemy_ids(app).len() == 5);
    assert!(all_in, "wave one spawns five enemies");
    common::run_secs(&mut app, 3.0);
    assert_eq!(enemy_ids(&mut app).len(), 5, "no sixth enemy");

    kill_all(&mut app);
    app.update();

    {
        let store = common::store(&app);
        assert_eq!(store.kills(), 5);
        assert_eq!(store.enemies_remaining(), 0);
        assert_eq!(store.wave(), 1);
        assert!(store.wave_advance_pending());
    }
    assert!(enemy_ids(&mut app).is_empty());
    assert!(app.world().resource::<EnemyRegistry>().is_empty());

    common::run_secs(&mut app, 1.5);
    assert_eq!(common::store(&app).wave(), 1);

    common::run_secs(&mut app, 0.75);
    let store = common::store(&app);
    assert_eq!(store.wave(), 2);
    assert_eq!(store.enemies_remaining(), 8);
    assert_eq!(store.total_enemies_in_wave(), 8);
    // 5 kills at 110 + wave-one clear bonus.
    assert_eq!(store.score(), 5 * 110 + 50);

    common::run_secs(&mut app, 0.25);
    let ids = enemy_ids(&mut app);
    assert!(!ids.is_empty());
    assert!(ids.iter().all(|id| id.wave == 2));
}

#[test]
fn restart_wipes_enemies_and_scopes_new_ids_to_the_new_session() {
    let mut app = common::app_headless();
    common::send(&mut app, SessionIntent::StartGame);
    common::run_secs(&mut app, 2.5);

    let first = enemy_ids(&mut app);
    assert!(first.len() >= 2);
    let first_session = first[0].session;

    // Lose the run, then play again.
    app.world_mut()
        .resource_mut::<arena_survival::plugins::session::SessionStore>()
        .take_damage(500);
    app.update();
    assert_eq!(common::store(&app).phase(), GamePhase::GameOver);

    common::send(&mut app, SessionIntent::StartGame);
    // The old run's enemies are gone; at most the new run's first arrival is present.
    let survivors = enemy_ids(&mut app);
    assert!(survivors.iter().all(|id| id.session > first_session));
    assert_eq!(app.world().resource::<EnemyRegistry>().len(), survivors.len());

    // The abandoned run was recorded anonymously.
    assert_eq!(common::store(&app).high_scores().len(), 1);
    assert_eq!(common::store(&app).high_scores()[0].name, "Anonymous");

    common::run_secs(&mut app, 0.25);
    let second = enemy_ids(&mut app);
    assert!(!second.is_empty());
    assert!(second.iter().all(|id| id.session > first_session));
    assert!(second.iter().all(|id| id.serial < 5));
}

#[test]
fn game_over_stops_the_simulation() {
    let mut app = common::app_headless();
    common::send(&mut app, SessionIntent::StartGame);
    common::run_secs(&mut app, 0.25);

    app.world_mut()
        .resource_mut::<arena_survival::plugins::session::SessionStore>()
        .take_damage(100);
    app.update();
    let count = enemy_ids(&mut app).len();

    common::run_secs(&mut app, 5.0);
    assert_eq!(enemy_ids(&mut app).len(), count);
    assert_eq!(common::store(&app).health(), 0);

    common::send(&mut app, SessionIntent::SaveHighScore("ACE".into()));
    let board = common::store(&app).high_scores();
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].name, "ACE");
}
