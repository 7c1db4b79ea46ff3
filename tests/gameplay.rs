use snake_arcade::config::GameConfig;
use snake_arcade::game::collision::boundary_check;
use snake_arcade::game::render::{RecordingSurface, Sprite};
use snake_arcade::game::{Direction, Game, GameEvent, GameState};
use snake_arcade::leaderboard::Leaderboard;

const STEP: f32 = 1.0 / 60.0;

fn run_until_over(game: &mut Game, max_steps: usize) -> usize {
    for step in 0..max_steps {
        if game.state() == GameState::GameOver {
            return step;
        }
        game.update(STEP);
    }
    panic!("run did not end within {max_steps} steps");
}

#[test]
fn driving_into_the_top_wall_ends_the_run() {
    let mut game = Game::new(GameConfig::default(), Leaderboard::in_memory());
    game.start();
    game.drain_events();

    run_until_over(&mut game, 600);

    let arena = game.arena();
    assert!(boundary_check(&game.snake().head_bounds(), &arena));
    assert!(game.snake().is_dead());
    let summary = game.last_summary().expect("summary");
    assert!(summary.stretch >= 4);

    let events = game.drain_events();
    assert!(events.contains(&GameEvent::StateChanged(GameState::GameOver)));
    assert!(events.iter().any(|e| matches!(e, GameEvent::ShowResults(_))));
}

#[test]
fn frame_time_is_split_into_fixed_steps() {
    let mut stepped = Game::new(GameConfig::default(), Leaderboard::in_memory());
    let mut chunky = Game::new(GameConfig::default(), Leaderboard::in_memory());
    stepped.start();
    chunky.start();

    for _ in 0..12 {
        stepped.update(STEP);
    }
    for _ in 0..3 {
        chunky.update(STEP * 4.0);
    }
    // a leftover fraction may hold back at most one step
    let gap = (stepped.snake().head_bounds().y - chunky.snake().head_bounds().y).abs();
    assert!(gap <= stepped.config().base_speed + 0.01);
}

#[test]
fn stalled_frame_is_clamped() {
    let mut game = Game::new(GameConfig::default(), Leaderboard::in_memory());
    game.start();
    let before = game.snake().head_bounds().y;
    game.update(10.0);
    let moved = before - game.snake().head_bounds().y;
    assert!(moved <= game.config().base_speed * 5.0 + 0.01);
    assert_eq!(game.state(), GameState::Play);
}

#[test]
fn steering_is_ignored_outside_play() {
    let mut game = Game::new(GameConfig::default(), Leaderboard::in_memory());
    assert!(!game.steer(Direction::Left));
    game.start();
    assert!(game.steer(Direction::Left));
    assert!(!game.steer(Direction::Right));
}

#[test]
fn full_cycle_commits_runs_in_score_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("leaderboard.bin");

    let mut game = Game::new(GameConfig::default(), Leaderboard::load(&path));
    game.start();
    run_until_over(&mut game, 600);
    game.restart("ada");
    assert_eq!(game.state(), GameState::Play);

    // turn right once and ride into the right wall
    game.update(STEP);
    game.steer(Direction::Right);
    run_until_over(&mut game, 2_000);
    game.quit("");
    assert_eq!(game.state(), GameState::Menu);

    let events = game.drain_events();
    let last_top = events
        .iter()
        .rev()
        .find_map(|e| match e {
            GameEvent::LeaderboardUpdated(top) => Some(top.clone()),
            _ => None,
        })
        .expect("leaderboard update");
    assert_eq!(last_top.len(), 2);

    let reloaded = Leaderboard::load(&path);
    assert_eq!(reloaded.len(), 2);
    let names: Vec<&str> = reloaded.entries().iter().map(|e| e.name.as_str()).collect();
    assert!(names.contains(&"ada"));
    assert!(names.contains(&"PLAYER"));
    assert!(reloaded.entries()[0].score >= reloaded.entries()[1].score);
}

#[test]
fn menu_draws_the_demo_snake_without_items() {
    let mut game = Game::new(GameConfig::default(), Leaderboard::in_memory());
    for _ in 0..300 {
        game.update(STEP);
    }
    let mut surface = RecordingSurface::default();
    game.draw(&mut surface);
    let parts = surface
        .sprites()
        .filter(|s| matches!(s, Sprite::Part { .. }))
        .count();
    assert_eq!(parts, 4);
    assert!(!surface.sprites().any(|s| matches!(s, Sprite::Item(_))));
}
