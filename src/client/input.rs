use macroquad::prelude::*;

use crate::game::math::Direction;
use crate::game::types::GameState;

pub const MAX_NAME_LEN: usize = 12;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    Steer(Direction),
    /// Start from the menu, restart after a game over.
    Confirm,
    /// Quit to the menu, or close from the menu.
    Back,
}

const STEER_KEYS: [(KeyCode, Direction); 8] = [
    (KeyCode::Up, Direction::Up),
    (KeyCode::W, Direction::Up),
    (KeyCode::Down, Direction::Down),
    (KeyCode::S, Direction::Down),
    (KeyCode::Left, Direction::Left),
    (KeyCode::A, Direction::Left),
    (KeyCode::Right, Direction::Right),
    (KeyCode::D, Direction::Right),
];

/// Edge-triggered intents for this frame.
pub fn poll_intents() -> Vec<Intent> {
    let mut intents: Vec<Intent> = STEER_KEYS
        .iter()
        .filter(|(key, _)| is_key_pressed(*key))
        .map(|(_, dir)| Intent::Steer(*dir))
        .collect();
    if is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::KpEnter) {
        intents.push(Intent::Confirm);
    }
    if is_key_pressed(KeyCode::Escape) {
        intents.push(Intent::Back);
    }
    intents
}

/// Player name typed on the game-over screen.
#[derive(Debug, Default, Clone)]
pub struct NameEntry {
    text: String,
}

impl NameEntry {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn push(&mut self, ch: char) {
        if ch.is_control() || self.text.chars().count() >= MAX_NAME_LEN {
            return;
        }
        if ch == ' ' && self.text.is_empty() {
            return;
        }
        self.text.push(ch);
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    /// Empties the box whenever a new run or the menu begins, so the next
    /// results panel starts blank.
    pub fn on_state(&mut self, state: GameState) {
        if matches!(state, GameState::Play | GameState::Menu) {
            self.text.clear();
        }
    }

    /// Drains typed characters and backspace for this frame.
    pub fn poll(&mut self) {
        while let Some(ch) = get_char_pressed() {
            self.push(ch);
        }
        if is_key_pressed(KeyCode::Backspace) {
            self.backspace();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_entry_filters_and_caps() {
        let mut name = NameEntry::default();
        name.push(' ');
        name.push('\r');
        for ch in "snakecharmer99".chars() {
            name.push(ch);
        }
        assert_eq!(name.text(), "snakecharmer");
        name.backspace();
        assert_eq!(name.text(), "snakecharme");
    }

    #[test]
    fn name_is_kept_through_game_over_and_cleared_after() {
        let mut name = NameEntry::default();
        for ch in "ada".chars() {
            name.push(ch);
        }
        name.on_state(GameState::GameOver);
        assert_eq!(name.text(), "ada");
        name.on_state(GameState::Play);
        assert_eq!(name.text(), "");

        name.push('b');
        name.on_state(GameState::Menu);
        assert!(name.text().is_empty());
    }
}
