use macroquad::prelude::*;

use crate::game::items::ItemKind;
use crate::leaderboard::LeaderboardEntry;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Menu,
    Play,
    GameOver,
}

/// Snapshot taken the moment a run ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub score: u32,
    pub stretch: usize,
    pub lifetime_seconds: u32,
}

/// Outbound notifications for the HUD. Drained once per frame.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    StateChanged(GameState),
    ScoreChanged(u32),
    LifetimeChanged(f32),
    StretchChanged(usize),
    Floater {
        position: Vec2,
        text: String,
        kind: ItemKind,
    },
    HazardHit {
        position: Vec2,
        deduction: u32,
        damage: f32,
    },
    BuffApplied {
        kind: ItemKind,
        duration: f32,
    },
    BuffExpired(ItemKind),
    ShowResults(RunSummary),
    ShowLastMoments,
    LeaderboardUpdated(Vec<LeaderboardEntry>),
}
