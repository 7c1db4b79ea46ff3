use std::fs;

use snake_arcade::leaderboard::{Leaderboard, LeaderboardEntry};

fn entry(name: &str, score: u32, stretch: u32, lifetime_seconds: u32) -> LeaderboardEntry {
    LeaderboardEntry {
        name: name.to_owned(),
        score,
        stretch,
        lifetime_seconds,
    }
}

#[test]
fn top_three_survives_a_reload() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("leaderboard.bin");

    let mut board = Leaderboard::load(&path);
    assert!(board.is_empty());
    for (i, score) in [30, 120, 5, 75, 120].into_iter().enumerate() {
        board.add(entry(&format!("run-{i}"), score, 4 + i as u32, 10 * i as u32));
    }
    let before = board.top();
    board.save().expect("save");

    let reloaded = Leaderboard::load(&path);
    assert_eq!(reloaded.len(), 5);
    assert_eq!(reloaded.top(), before);
    assert_eq!(reloaded.entries(), board.entries());
    assert_eq!(before[0].name, "run-1");
    assert_eq!(before[1].name, "run-4");
}

#[test]
fn names_round_trip_losslessly() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("leaderboard.bin");

    let mut board = Leaderboard::load(&path);
    board.add(entry("Zoë ünïcode 🐍", u32::MAX, 999, 3_600));
    board.save().expect("save");

    let reloaded = Leaderboard::load(&path);
    assert_eq!(reloaded.entries()[0], entry("Zoë ünïcode 🐍", u32::MAX, 999, 3_600));
}

#[test]
fn corrupt_file_loads_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("leaderboard.bin");
    fs::write(&path, b"\xff\xff\xff\xff\xff\xff\xff\xffnot a leaderboard").expect("write");

    let mut board = Leaderboard::load(&path);
    assert!(board.is_empty());

    // the store still works and overwrites the junk
    board.add(entry("fresh", 10, 4, 8));
    board.save().expect("save");
    assert_eq!(Leaderboard::load(&path).len(), 1);
}

#[test]
fn save_into_missing_directory_reports_io() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nope").join("leaderboard.bin");
    let mut board = Leaderboard::load(&path);
    board.add(entry("a", 1, 4, 1));
    assert!(matches!(
        board.save(),
        Err(snake_arcade::leaderboard::LeaderboardError::Io(_))
    ));
}
