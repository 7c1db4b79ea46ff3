use std::path::Path;

use anyhow::{Context, Result};
use macroquad::prelude::*;
use tracing::info;

use snake_arcade::client;
use snake_arcade::config::{GameConfig, CONFIG_PATH, LEADERBOARD_PATH};
use snake_arcade::leaderboard::Leaderboard;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn load_config() -> Result<GameConfig> {
    let path = Path::new(CONFIG_PATH);
    if !path.exists() {
        return Ok(GameConfig::default());
    }
    let config = GameConfig::from_path(path)
        .with_context(|| format!("loading {}", path.display()))?;
    info!(path = %path.display(), "config loaded");
    Ok(config)
}

fn window_conf(config: &GameConfig) -> Conf {
    Conf {
        window_title: "Snake Arcade".to_owned(),
        window_width: config.arena_width as i32,
        window_height: config.arena_height as i32,
        window_resizable: false,
        ..Default::default()
    }
}

fn main() -> Result<()> {
    init_tracing();
    let config = load_config()?;
    let leaderboard = Leaderboard::load(LEADERBOARD_PATH);
    macroquad::Window::from_config(window_conf(&config), client::run(config, leaderboard));
    Ok(())
}
