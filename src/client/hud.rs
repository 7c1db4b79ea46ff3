use macroquad::prelude::*;

use crate::client::render::item_color;
use crate::game::items::ItemKind;
use crate::game::types::{GameEvent, GameState, RunSummary};
use crate::leaderboard::LeaderboardEntry;

const FLOATER_SEC: f32 = 1.0;
/// One pixel per 60 Hz frame.
const FLOATER_RISE_PX_PER_SEC: f32 = 60.0;

#[derive(Clone, Debug, PartialEq)]
pub struct FloatingLabel {
    pub position: Vec2,
    pub text: String,
    pub color: Color,
    pub age: f32,
}

impl FloatingLabel {
    fn alpha(&self) -> f32 {
        (1.0 - self.age / FLOATER_SEC).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuffBadge {
    pub kind: ItemKind,
    pub left: f32,
}

/// Everything drawn on top of the field. Fed only by [`GameEvent`]s.
#[derive(Debug)]
pub struct Hud {
    pub state: GameState,
    pub score: u32,
    pub lifetime: f32,
    pub stretch: usize,
    pub buff: Option<BuffBadge>,
    pub floaters: Vec<FloatingLabel>,
    pub results: Option<RunSummary>,
    pub show_last_moments: bool,
    pub top: Vec<LeaderboardEntry>,
}

impl Default for Hud {
    fn default() -> Self {
        Self {
            state: GameState::Menu,
            score: 0,
            lifetime: 0.0,
            stretch: 0,
            buff: None,
            floaters: Vec::new(),
            results: None,
            show_last_moments: false,
            top: Vec::new(),
        }
    }
}

impl Hud {
    pub fn apply(&mut self, event: &GameEvent) {
        match event {
            GameEvent::StateChanged(state) => {
                self.state = *state;
                if *state != GameState::GameOver {
                    self.results = None;
                    self.show_last_moments = false;
                    self.buff = None;
                    self.floaters.clear();
                }
            }
            GameEvent::ScoreChanged(score) => self.score = *score,
            GameEvent::LifetimeChanged(lifetime) => self.lifetime = *lifetime,
            GameEvent::StretchChanged(stretch) => self.stretch = *stretch,
            GameEvent::Floater { position, text, kind } => self.floaters.push(FloatingLabel {
                position: *position,
                text: text.clone(),
                color: item_color(*kind),
                age: 0.0,
            }),
            GameEvent::HazardHit {
                position,
                deduction,
                damage,
            } => self.floaters.push(FloatingLabel {
                position: *position,
                text: format!("-{deduction}  -{damage:.0}s"),
                color: RED,
                age: 0.0,
            }),
            GameEvent::BuffApplied { kind, duration } => {
                self.buff = Some(BuffBadge {
                    kind: *kind,
                    left: *duration,
                })
            }
            GameEvent::BuffExpired(_) => self.buff = None,
            GameEvent::ShowResults(summary) => self.results = Some(*summary),
            GameEvent::ShowLastMoments => self.show_last_moments = true,
            GameEvent::LeaderboardUpdated(top) => self.top = top.clone(),
        }
    }

    pub fn update(&mut self, dt: f32) {
        for f in &mut self.floaters {
            f.age += dt;
            f.position.y -= FLOATER_RISE_PX_PER_SEC * dt;
        }
        self.floaters.retain(|f| f.age < FLOATER_SEC);
        if self.state == GameState::Play {
            if let Some(badge) = &mut self.buff {
                badge.left = (badge.left - dt).max(0.0);
            }
        }
    }

    pub fn draw(&self, strip: f32, name: &str, snapshot: Option<&Texture2D>) {
        match self.state {
            GameState::Menu => self.draw_menu(),
            GameState::Play => self.draw_strip(strip),
            GameState::GameOver => {
                self.draw_strip(strip);
                self.draw_results(name, snapshot);
            }
        }
        for f in &self.floaters {
            let c = f.color;
            draw_text(&f.text, f.position.x, f.position.y, 26.0, Color::new(c.r, c.g, c.b, f.alpha()));
        }
    }

    fn draw_strip(&self, strip: f32) {
        draw_rectangle(0.0, 0.0, screen_width(), strip, Color::from_rgba(0, 0, 0, 120));
        let y = strip * 0.5 + 8.0;
        draw_text(&format!("SCORE {:>5}", self.score), 16.0, y, 26.0, WHITE);
        let life_color = if self.lifetime < 10.0 {
            Color::from_rgba(255, 120, 120, 240)
        } else {
            Color::from_rgba(255, 255, 255, 230)
        };
        draw_text(&format!("LIFE {:05.1}s", self.lifetime.max(0.0)), 200.0, y, 26.0, life_color);
        draw_text(&format!("STRETCH {}", self.stretch), 400.0, y, 26.0, WHITE);

        if let Some(badge) = self.buff {
            let w = 170.0;
            let h = 34.0;
            let x = screen_width() - w - 16.0;
            let by = (strip - h) * 0.5;
            draw_rectangle(x, by, w, h, Color::from_rgba(0, 0, 0, 70));
            draw_rectangle_lines(x, by, w, h, 2.0, Color::from_rgba(255, 255, 255, 35));
            draw_circle(x + 18.0, by + h * 0.5, 9.0, item_color(badge.kind));
            let label = match badge.kind {
                ItemKind::SpeedUp => "FAST",
                ItemKind::SlowDown => "SLOW",
                _ => "BUFF",
            };
            draw_text(label, x + 36.0, by + 23.0, 20.0, WHITE);
            draw_text(
                &format!("{:04.1}", badge.left),
                x + w - 52.0,
                by + 23.0,
                20.0,
                Color::from_rgba(255, 255, 255, 190),
            );
        }
    }

    fn draw_menu(&self) {
        let title = "SNAKE ARCADE";
        let mt = measure_text(title, None, 64, 1.0);
        draw_text(title, (screen_width() - mt.width) * 0.5, screen_height() * 0.28, 64.0, WHITE);

        let hint = "ENTER: play   ESC: quit   WASD / arrows: steer";
        let mh = measure_text(hint, None, 22, 1.0);
        draw_text(
            hint,
            (screen_width() - mh.width) * 0.5,
            screen_height() * 0.28 + 40.0,
            22.0,
            Color::from_rgba(255, 255, 255, 170),
        );
        self.draw_leaderboard(screen_width() * 0.5 - 160.0, screen_height() * 0.55);
    }

    fn draw_leaderboard(&self, x: f32, y: f32) {
        let w = 320.0;
        let h = 150.0;
        draw_rectangle(x, y, w, h, Color::from_rgba(0, 0, 0, 85));
        draw_rectangle_lines(x, y, w, h, 2.0, Color::from_rgba(255, 255, 255, 40));
        draw_text("LEADERBOARD", x + 12.0, y + 26.0, 20.0, WHITE);
        if self.top.is_empty() {
            draw_text("no runs yet", x + 12.0, y + 60.0, 20.0, GRAY);
        }
        let mut row_y = y + 60.0;
        for (rank, e) in self.top.iter().enumerate() {
            draw_text(
                &format!("{:>2}. {:<12} {:>6}  {:>3}  {:>4}s", rank + 1, e.name, e.score, e.stretch, e.lifetime_seconds),
                x + 12.0,
                row_y,
                20.0,
                Color::from_rgba(255, 255, 255, 220),
            );
            row_y += 26.0;
        }
    }

    fn draw_results(&self, name: &str, snapshot: Option<&Texture2D>) {
        let Some(summary) = self.results else {
            return;
        };
        if !self.show_last_moments {
            return;
        }
        draw_rectangle(0.0, 0.0, screen_width(), screen_height(), Color::from_rgba(0, 0, 0, 150));

        let w = 560.0;
        let h = 520.0;
        let x = (screen_width() - w) * 0.5;
        let y = (screen_height() - h) * 0.5;
        draw_rectangle(x, y, w, h, Color::from_rgba(0, 0, 0, 110));
        draw_rectangle_lines(x, y, w, h, 2.0, Color::from_rgba(255, 255, 255, 40));

        let title = "GAME OVER";
        let mt = measure_text(title, None, 56, 1.0);
        draw_text(title, x + (w - mt.width) * 0.5, y + 60.0, 56.0, RED);
        draw_text(
            &format!(
                "score {}   stretch {}   time {}s",
                summary.score, summary.stretch, summary.lifetime_seconds
            ),
            x + 26.0,
            y + 100.0,
            26.0,
            Color::from_rgba(255, 255, 255, 220),
        );

        if let Some(texture) = snapshot {
            let tw = w - 52.0;
            let th = tw * texture.height() / texture.width().max(1.0);
            draw_texture_ex(
                texture,
                x + 26.0,
                y + 120.0,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(tw, th)),
                    flip_y: true,
                    ..Default::default()
                },
            );
        }

        let shown = if name.is_empty() { "_" } else { name };
        draw_text(&format!("NAME: {shown}"), x + 26.0, y + h - 60.0, 26.0, WHITE);
        draw_text(
            "ENTER: play again   ESC: menu",
            x + 26.0,
            y + h - 24.0,
            20.0,
            Color::from_rgba(255, 255, 255, 170),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floaters_rise_fade_and_drop() {
        let mut hud = Hud::default();
        hud.apply(&GameEvent::Floater {
            position: vec2(100.0, 200.0),
            text: "+10".to_owned(),
            kind: ItemKind::Food,
        });
        for _ in 0..30 {
            hud.update(1.0 / 60.0);
        }
        assert_eq!(hud.floaters.len(), 1);
        assert!((hud.floaters[0].position.y - 170.0).abs() < 0.01);
        assert!((hud.floaters[0].alpha() - 0.5).abs() < 0.01);
        for _ in 0..31 {
            hud.update(1.0 / 60.0);
        }
        assert!(hud.floaters.is_empty());
    }

    #[test]
    fn buff_badge_counts_down_and_clears() {
        let mut hud = Hud::default();
        hud.apply(&GameEvent::StateChanged(GameState::Play));
        hud.apply(&GameEvent::BuffApplied {
            kind: ItemKind::SlowDown,
            duration: 6.0,
        });
        hud.update(1.0);
        assert_eq!(hud.buff.map(|b| b.left), Some(5.0));
        hud.apply(&GameEvent::BuffExpired(ItemKind::SlowDown));
        assert_eq!(hud.buff, None);
    }

    #[test]
    fn results_wait_for_last_moments() {
        let mut hud = Hud::default();
        let summary = RunSummary {
            score: 40,
            stretch: 7,
            lifetime_seconds: 33,
        };
        hud.apply(&GameEvent::StateChanged(GameState::GameOver));
        hud.apply(&GameEvent::ShowResults(summary));
        assert_eq!(hud.results, Some(summary));
        assert!(!hud.show_last_moments);
        hud.apply(&GameEvent::ShowLastMoments);
        assert!(hud.show_last_moments);
        hud.apply(&GameEvent::StateChanged(GameState::Play));
        assert_eq!(hud.results, None);
    }
}
