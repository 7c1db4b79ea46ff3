pub mod hud;
pub mod input;
pub mod render;

use macroquad::prelude::*;
use tracing::info;

use crate::config::GameConfig;
use crate::game::types::{GameEvent, GameState};
use crate::game::world::Game;
use crate::leaderboard::Leaderboard;

use hud::Hud;
use input::{poll_intents, Intent, NameEntry};
use render::MacroquadSurface;

pub async fn run(config: GameConfig, leaderboard: Leaderboard) {
    let strip = config.hud_strip;
    let mut game = Game::new(config, leaderboard);
    let mut hud = Hud::default();
    let mut name = NameEntry::default();
    let mut surface = MacroquadSurface;

    let mut snapshot: Option<Texture2D> = None;
    let mut capture_pending = false;

    loop {
        let dt = get_frame_time();

        for intent in poll_intents() {
            match (intent, game.state()) {
                (Intent::Steer(direction), GameState::Play) => {
                    game.steer(direction);
                }
                (Intent::Confirm, GameState::Menu) => game.start(),
                (Intent::Confirm, GameState::GameOver) => game.restart(name.text()),
                (Intent::Back, GameState::Menu) => {
                    info!("bye");
                    return;
                }
                (Intent::Back, _) => game.quit(name.text()),
                _ => {}
            }
        }
        if game.state() == GameState::GameOver {
            name.poll();
        } else {
            // keep characters typed during play out of the name box
            while get_char_pressed().is_some() {}
        }

        game.update(dt);
        for event in game.drain_events() {
            if let GameEvent::StateChanged(state) = &event {
                match state {
                    GameState::GameOver => capture_pending = true,
                    GameState::Play | GameState::Menu => snapshot = None,
                }
                name.on_state(*state);
            }
            hud.apply(&event);
        }
        hud.update(dt);

        game.draw(&mut surface);
        if capture_pending {
            capture_pending = false;
            snapshot = Some(Texture2D::from_image(&get_screen_data()));
        }
        hud.draw(strip, name.text(), snapshot.as_ref());

        next_frame().await;
    }
}
