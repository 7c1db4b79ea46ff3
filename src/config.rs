use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::items::ItemKind;
use crate::game::math::Rect;

// Window / arena
pub const ARENA_WIDTH: f32 = 1024.0;
pub const ARENA_HEIGHT: f32 = 768.0;
// Score/lifetime labels live in this strip, nothing spawns or moves there.
pub const HUD_STRIP: f32 = 50.0;

// Snake
pub const PART_SIZE: f32 = 30.0;
pub const COLLISION_MARGIN: f32 = 4.0;
pub const BASE_SPEED: f32 = 3.0;
pub const MIN_SPEED: f32 = 1.0;
pub const INITIAL_LENGTH: usize = 4;
pub const SNAKE_LIFETIME: f32 = 100.0;
pub const BUFF_DURATION_SEC: f32 = 6.0;

// Simulation clock: movement is in px per step
pub const SIM_STEP_SEC: f32 = 1.0 / 60.0;
pub const MAX_STEPS_PER_FRAME: u32 = 5;

// Game over
pub const GAMEOVER_GRACE_SEC: f32 = 0.15;
pub const BOMB_HIT_GRACE_SEC: f32 = 0.35;
pub const GAMEOVER_UI_DELAY_SEC: f32 = 1.2;

// Menu auto-pilot
pub const AUTOPILOT_INTERVAL_SEC: f32 = 1.0;
pub const AUTOPILOT_WALL_MARGIN: f32 = 90.0;

// Visual only
pub const CORNER_COVER_DECAY_SEC: f32 = 0.1;
pub const BOMB_SCALE_WINDOW_SEC: f32 = 0.3;
pub const EXPLOSION_SEC: f32 = 0.5;

// Spawning
pub const SPAWN_RETRY_DELAY_SEC: f32 = 0.5;
pub const SPAWN_ATTEMPTS: usize = 200;
pub const NEAR_HEAD_ATTEMPTS: usize = 12;

pub const DEFAULT_PLAYER_NAME: &str = "PLAYER";
pub const LEADERBOARD_PATH: &str = "leaderboard.bin";
pub const CONFIG_PATH: &str = "snake-arcade.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Numeric parameters of one item kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemProfile {
    pub size: f32,
    pub points: u32,
    /// Lifetime regen for food, speed delta for buffs, lifetime damage for bombs.
    pub effect: f32,
    /// Score removed on contact (bombs only).
    pub deduction: u32,
    /// How far past its bounds other spawns must keep away.
    pub territory: f32,
    pub spawn_delay_min: f32,
    pub spawn_delay_max: f32,
    /// Seconds an item stays on the field once spawned, `None` = until eaten.
    pub lifetime: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub arena_width: f32,
    pub arena_height: f32,
    pub hud_strip: f32,

    pub part_size: f32,
    pub collision_margin: f32,
    pub base_speed: f32,
    pub min_speed: f32,
    pub sim_step: f32,
    pub initial_length: usize,
    pub initial_lifetime: f32,
    pub buff_duration: f32,

    pub gameover_grace: f32,
    pub bomb_hit_grace: f32,
    pub gameover_ui_delay: f32,

    pub autopilot_interval: f32,
    pub autopilot_wall_margin: f32,
    pub corner_cover_decay: f32,

    pub spawn_retry_delay: f32,
    pub spawn_attempts: usize,
    pub near_head_attempts: usize,

    pub default_player_name: String,

    pub food: ItemProfile,
    pub buff_food: ItemProfile,
    pub speed_up: ItemProfile,
    pub slow_down: ItemProfile,
    pub bomb: ItemProfile,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            hud_strip: HUD_STRIP,
            part_size: PART_SIZE,
            collision_margin: COLLISION_MARGIN,
            base_speed: BASE_SPEED,
            min_speed: MIN_SPEED,
            sim_step: SIM_STEP_SEC,
            initial_length: INITIAL_LENGTH,
            initial_lifetime: SNAKE_LIFETIME,
            buff_duration: BUFF_DURATION_SEC,
            gameover_grace: GAMEOVER_GRACE_SEC,
            bomb_hit_grace: BOMB_HIT_GRACE_SEC,
            gameover_ui_delay: GAMEOVER_UI_DELAY_SEC,
            autopilot_interval: AUTOPILOT_INTERVAL_SEC,
            autopilot_wall_margin: AUTOPILOT_WALL_MARGIN,
            corner_cover_decay: CORNER_COVER_DECAY_SEC,
            spawn_retry_delay: SPAWN_RETRY_DELAY_SEC,
            spawn_attempts: SPAWN_ATTEMPTS,
            near_head_attempts: NEAR_HEAD_ATTEMPTS,
            default_player_name: DEFAULT_PLAYER_NAME.to_owned(),
            food: ItemProfile {
                size: 40.0,
                points: 10,
                effect: 10.0,
                deduction: 0,
                territory: 30.0,
                spawn_delay_min: 0.5,
                spawn_delay_max: 1.5,
                lifetime: None,
            },
            buff_food: ItemProfile {
                size: 40.0,
                points: 50,
                effect: 30.0,
                deduction: 0,
                territory: 40.0,
                spawn_delay_min: 8.0,
                spawn_delay_max: 15.0,
                lifetime: Some(6.0),
            },
            speed_up: ItemProfile {
                size: 40.0,
                points: 5,
                effect: 2.0,
                deduction: 0,
                territory: 40.0,
                spawn_delay_min: 10.0,
                spawn_delay_max: 20.0,
                lifetime: Some(5.0),
            },
            slow_down: ItemProfile {
                size: 40.0,
                points: 5,
                effect: -1.0,
                deduction: 0,
                territory: 40.0,
                spawn_delay_min: 12.0,
                spawn_delay_max: 22.0,
                lifetime: Some(5.0),
            },
            bomb: ItemProfile {
                size: 40.0,
                points: 0,
                effect: 15.0,
                deduction: 20,
                territory: 60.0,
                spawn_delay_min: 3.0,
                spawn_delay_max: 6.0,
                lifetime: Some(8.0),
            },
        }
    }
}

impl GameConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.part_size <= 0.0 {
            return Err(ConfigError::Invalid("part_size must be positive"));
        }
        if self.arena_width < self.part_size || self.arena_height - self.hud_strip < self.part_size {
            return Err(ConfigError::Invalid("arena must fit at least one part"));
        }
        if self.base_speed <= 0.0 || self.min_speed <= 0.0 {
            return Err(ConfigError::Invalid("speeds must be positive"));
        }
        if self.base_speed >= self.part_size {
            return Err(ConfigError::Invalid("base_speed must be smaller than part_size"));
        }
        if self.sim_step <= 0.0 {
            return Err(ConfigError::Invalid("sim_step must be positive"));
        }
        if self.initial_length < 2 {
            return Err(ConfigError::Invalid("initial_length must be at least 2"));
        }
        if self.initial_lifetime <= 0.0 {
            return Err(ConfigError::Invalid("initial_lifetime must be positive"));
        }
        for kind in ItemKind::ALL {
            let p = self.profile(kind);
            if p.size <= 0.0 {
                return Err(ConfigError::Invalid("item size must be positive"));
            }
            if p.spawn_delay_min < 0.0 || p.spawn_delay_max < p.spawn_delay_min {
                return Err(ConfigError::Invalid("item spawn delay range is inverted"));
            }
            if p.lifetime.is_some_and(|l| l <= 0.0) {
                return Err(ConfigError::Invalid("item lifetime must be positive"));
            }
        }
        Ok(())
    }

    pub fn profile(&self, kind: ItemKind) -> &ItemProfile {
        match kind {
            ItemKind::Food => &self.food,
            ItemKind::BuffFood => &self.buff_food,
            ItemKind::SpeedUp => &self.speed_up,
            ItemKind::SlowDown => &self.slow_down,
            ItemKind::Bomb => &self.bomb,
        }
    }

    pub fn arena_bounds(&self) -> Rect {
        Rect::new(
            0.0,
            self.hud_strip,
            self.arena_width,
            self.arena_height - self.hud_strip,
        )
    }

    /// Head spawn point, centred in the arena.
    pub fn arena_center(&self) -> (f32, f32) {
        let a = self.arena_bounds();
        (a.x + a.w * 0.5, a.y + a.h * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_inverted_delay_range() {
        let mut cfg = GameConfig::default();
        cfg.bomb.spawn_delay_min = 9.0;
        cfg.bomb.spawn_delay_max = 3.0;
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: GameConfig = serde_json::from_str(r#"{ "base_speed": 5.0 }"#).unwrap();
        assert_eq!(cfg.base_speed, 5.0);
        assert_eq!(cfg.part_size, PART_SIZE);
        assert_eq!(cfg.food.points, 10);
    }

    #[test]
    fn arena_excludes_hud_strip() {
        let cfg = GameConfig::default();
        let a = cfg.arena_bounds();
        assert_eq!(a.y, HUD_STRIP);
        assert_eq!(a.bottom(), ARENA_HEIGHT);
    }
}
