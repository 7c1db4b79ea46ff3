use tracing::{debug, info, warn};

use crate::config::{GameConfig, MAX_STEPS_PER_FRAME};
use crate::game::autopilot::Autopilot;
use crate::game::collision::{boundary_check, collision_check, self_collision};
use crate::game::items::{Item, ItemKind, ItemTick, Placement};
use crate::game::math::{Direction, Rect};
use crate::game::render::{Sprite, Surface, Tint};
use crate::game::snake::Snake;
use crate::game::types::{GameEvent, GameState, RunSummary};
use crate::leaderboard::{Leaderboard, LeaderboardEntry};

/// Owns the whole run: snake, items, counters, leaderboard. The client
/// pushes intents in, calls `update` once per frame and drains events.
pub struct Game {
    config: GameConfig,
    arena: Rect,
    state: GameState,

    snake: Snake,
    items: Vec<Item>,
    autopilot: Autopilot,
    leaderboard: Leaderboard,

    score: u32,
    elapsed: f32,
    grace: Option<f32>,
    shown_lifetime: u32,

    accumulator: f32,
    last_moments_in: Option<f32>,
    last_summary: Option<RunSummary>,

    events: Vec<GameEvent>,
}

impl Game {
    pub fn new(config: GameConfig, leaderboard: Leaderboard) -> Self {
        let arena = config.arena_bounds();
        let snake = Snake::new(&config);
        let autopilot = Autopilot::new(&config);
        let top = leaderboard.top();
        Self {
            arena,
            state: GameState::Menu,
            snake,
            items: Vec::new(),
            autopilot,
            leaderboard,
            score: 0,
            elapsed: 0.0,
            grace: None,
            shown_lifetime: 0,
            accumulator: 0.0,
            last_moments_in: None,
            last_summary: None,
            events: vec![
                GameEvent::StateChanged(GameState::Menu),
                GameEvent::LeaderboardUpdated(top),
            ],
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn arena(&self) -> Rect {
        self.arena
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn last_summary(&self) -> Option<RunSummary> {
        self.last_summary
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// MENU -> PLAY.
    pub fn start(&mut self) {
        if self.state == GameState::Menu {
            self.begin_run();
        }
    }

    pub fn steer(&mut self, direction: Direction) -> bool {
        self.state == GameState::Play && self.snake.steer(direction)
    }

    /// GAMEOVER -> PLAY, committing the finished run under `name`.
    pub fn restart(&mut self, name: &str) {
        if self.state != GameState::GameOver {
            return;
        }
        self.commit_run(name);
        self.begin_run();
    }

    /// Back to the menu. A finished run is committed, a live one is dropped.
    pub fn quit(&mut self, name: &str) {
        match self.state {
            GameState::Menu => return,
            GameState::GameOver => self.commit_run(name),
            GameState::Play => self.persist(),
        }
        self.snake = Snake::new(&self.config);
        self.items.clear();
        self.autopilot.reset();
        self.reset_counters();
        self.set_state(GameState::Menu);
    }

    /// Feeds frame time into the fixed-step clock.
    pub fn update(&mut self, dt: f32) {
        let dt = dt.max(0.0);

        if let Some(left) = &mut self.last_moments_in {
            *left -= dt;
            if *left <= 0.0 {
                self.last_moments_in = None;
                self.events.push(GameEvent::ShowLastMoments);
            }
        }

        let step = self.config.sim_step;
        let cap = step * MAX_STEPS_PER_FRAME as f32;
        self.accumulator = (self.accumulator + dt).min(cap);
        while self.accumulator >= step {
            self.accumulator -= step;
            self.step(step);
        }
    }

    fn step(&mut self, dt: f32) {
        match self.state {
            GameState::Menu => self.menu_step(dt),
            GameState::Play => self.play_step(dt),
            GameState::GameOver => {
                for item in &mut self.items {
                    item.tick_effects(dt);
                }
            }
        }
    }

    fn menu_step(&mut self, dt: f32) {
        if let Some(direction) = self.autopilot.tick(dt, &self.snake, &self.arena) {
            self.snake.steer(direction);
        }
        self.snake.update(dt);
        if boundary_check(&self.snake.head_bounds(), &self.arena) {
            self.snake = Snake::new(&self.config);
            self.autopilot.reset();
        }
    }

    fn play_step(&mut self, dt: f32) {
        self.elapsed += dt;
        self.snake.drain_lifetime(dt);

        if let Some(kind) = self.snake.update(dt) {
            debug!(kind = kind.label(), "buff expired");
            self.events.push(GameEvent::BuffExpired(kind));
        }

        self.tick_items(dt);
        self.eat_consumables();
        self.hit_hazards();

        let fatal = self_collision(&self.snake) || self.snake.lifetime <= 0.0;
        let out_of_bounds = boundary_check(&self.snake.head_bounds(), &self.arena);
        let expired = self.advance_grace(fatal, out_of_bounds, dt);

        self.report_lifetime();

        if expired {
            self.end_run();
        }
    }

    fn tick_items(&mut self, dt: f32) {
        let heading = Some((self.snake.head_bounds(), self.snake.direction()));
        for i in 0..self.items.len() {
            match self.items[i].tick(dt) {
                ItemTick::Idle => {}
                ItemTick::Expired => debug!(kind = self.items[i].kind().label(), "item expired"),
                ItemTick::ReadyToSpawn => {
                    let exclusions = self.exclusions(i);
                    let heading = match self.items[i].behavior().placement {
                        Placement::AheadOfHead => heading,
                        Placement::Anywhere => None,
                    };
                    self.items[i].spawn(&self.arena, &exclusions, heading);
                }
            }
        }
    }

    /// Snake parts plus the territory of every other spawned item.
    fn exclusions(&self, skip: usize) -> Vec<Rect> {
        let snake = self
            .snake
            .parts()
            .chain(self.snake.pending())
            .map(|p| p.bounds());
        let items = self
            .items
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != skip)
            .filter_map(|(_, item)| item.territory());
        snake.chain(items).collect()
    }

    fn eat_consumables(&mut self) {
        let head = self.snake.head_collision_bounds();
        for item in &mut self.items {
            let behavior = *item.behavior();
            if behavior.hazard {
                continue;
            }
            let Some(bounds) = item.bounds() else {
                continue;
            };
            if !collision_check(&head, &bounds) {
                continue;
            }

            let kind = item.kind();
            let profile = item.profile();
            let points = profile.points;
            let effect = profile.effect;

            self.score = self.score.saturating_add(points);
            if behavior.restores_lifetime {
                self.snake.lifetime += effect;
            }
            if behavior.speed_buff {
                self.snake.apply_buff(kind, effect);
                debug!(kind = kind.label(), speed = self.snake.speed(), "buff applied");
                self.events.push(GameEvent::BuffApplied {
                    kind,
                    duration: self.config.buff_duration,
                });
            }
            self.snake.grow();
            item.destroy();

            self.events.push(GameEvent::Floater {
                position: bounds.center(),
                text: format!("+{points}"),
                kind,
            });
            self.events.push(GameEvent::ScoreChanged(self.score));
            self.events.push(GameEvent::StretchChanged(self.snake.stretch()));
        }
    }

    fn hit_hazards(&mut self) {
        let head = self.snake.head_collision_bounds();
        for item in &mut self.items {
            if !item.behavior().hazard {
                continue;
            }
            let Some(bounds) = item.bounds() else {
                continue;
            };
            if !collision_check(&head, &bounds) {
                continue;
            }

            let deduction = item.profile().deduction;
            let damage = item.profile().effect;
            self.score = self.score.saturating_sub(deduction);
            self.snake.lifetime = (self.snake.lifetime - damage).max(0.0);
            item.detonate();
            info!(score = self.score, lifetime = self.snake.lifetime, "bomb hit");

            if self.snake.lifetime <= 0.0 {
                self.grace = Some(self.config.bomb_hit_grace);
            }
            self.events.push(GameEvent::HazardHit {
                position: bounds.center(),
                deduction,
                damage,
            });
            self.events.push(GameEvent::ScoreChanged(self.score));
        }
    }

    /// Runs the death countdown. Leaving the arena ends it at once; any
    /// other fatal condition has to hold for the whole grace window.
    /// Returns true when the run is over.
    fn advance_grace(&mut self, fatal: bool, out_of_bounds: bool, dt: f32) -> bool {
        if out_of_bounds {
            self.grace = Some(0.0);
        } else if fatal {
            let left = self.grace.get_or_insert(self.config.gameover_grace);
            *left -= dt;
        } else {
            self.grace = None;
        }
        self.grace.is_some_and(|left| left <= 0.0)
    }

    fn report_lifetime(&mut self) {
        let shown = shown_tenths(self.snake.lifetime);
        if shown != self.shown_lifetime {
            self.shown_lifetime = shown;
            self.events.push(GameEvent::LifetimeChanged(self.snake.lifetime));
        }
    }

    fn begin_run(&mut self) {
        self.snake = Snake::new(&self.config);
        self.items = ItemKind::ALL
            .iter()
            .map(|kind| Item::new(*kind, &self.config))
            .collect();
        self.reset_counters();
        self.set_state(GameState::Play);
        self.events.push(GameEvent::ScoreChanged(0));
        self.events.push(GameEvent::LifetimeChanged(self.snake.lifetime));
        self.events.push(GameEvent::StretchChanged(self.snake.stretch()));
    }

    fn end_run(&mut self) {
        self.snake.die();
        let summary = RunSummary {
            score: self.score,
            stretch: self.snake.stretch(),
            lifetime_seconds: self.elapsed as u32,
        };
        self.last_summary = Some(summary);
        self.last_moments_in = Some(self.config.gameover_ui_delay);
        self.set_state(GameState::GameOver);
        info!(
            score = summary.score,
            stretch = summary.stretch,
            seconds = summary.lifetime_seconds,
            "run over"
        );
        self.events.push(GameEvent::ShowResults(summary));
    }

    fn commit_run(&mut self, name: &str) {
        let Some(summary) = self.last_summary.take() else {
            return;
        };
        let name = name.trim();
        let name = if name.is_empty() {
            self.config.default_player_name.clone()
        } else {
            name.to_owned()
        };
        let top = self.leaderboard.add(LeaderboardEntry {
            name,
            score: summary.score,
            stretch: summary.stretch as u32,
            lifetime_seconds: summary.lifetime_seconds,
        });
        self.events.push(GameEvent::LeaderboardUpdated(top));
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = self.leaderboard.save() {
            warn!(error = %e, "failed to save leaderboard");
        }
    }

    fn reset_counters(&mut self) {
        self.score = 0;
        self.elapsed = 0.0;
        self.grace = None;
        self.accumulator = 0.0;
        self.last_moments_in = None;
        self.shown_lifetime = shown_tenths(self.snake.lifetime);
    }

    fn set_state(&mut self, state: GameState) {
        info!(from = ?self.state, to = ?state, "state change");
        self.state = state;
        self.events.push(GameEvent::StateChanged(state));
    }

    /// Issues draw calls back to front: field, body tail-first, pending
    /// tails, corner covers, head, then items and their effects.
    pub fn draw<S: Surface>(&self, surface: &mut S) {
        let window = Rect::new(0.0, 0.0, self.config.arena_width, self.config.arena_height);
        surface.draw(window, Sprite::Background, Tint::SOLID);
        surface.draw(self.arena, Sprite::Border, Tint::SOLID);

        for part in self.snake.body().iter().rev() {
            let sprite = Sprite::Part {
                role: part.role,
                facing: part.movement(),
            };
            surface.draw(part.bounds(), sprite, Tint::SOLID);
        }
        for part in self.snake.pending() {
            surface.draw(part.bounds(), Sprite::PendingTail, Tint::SOLID);
        }
        for cover in self.snake.covers() {
            surface.draw(cover.bounds, Sprite::Corner(cover.kind), Tint::SOLID);
        }
        let head = self.snake.head();
        let sprite = Sprite::Part {
            role: head.role,
            facing: self.snake.direction(),
        };
        surface.draw(head.bounds(), sprite, Tint::SOLID);

        for item in &self.items {
            if let Some(bounds) = item.bounds() {
                let tint = Tint::new(item.alpha(), item.scale());
                surface.draw(bounds, Sprite::Item(item.kind()), tint);
            }
            for sparkle in item.sparkles() {
                surface.draw(sparkle, Sprite::Sparkle(item.kind()), Tint::SOLID);
            }
            if let Some(explosion) = item.explosion() {
                let tint = Tint::new(1.0 - explosion.progress(), 1.0 + explosion.progress());
                surface.draw(explosion.bounds, Sprite::Explosion, tint);
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn items_mut(&mut self) -> &mut [Item] {
        &mut self.items
    }

    #[cfg(test)]
    pub(crate) fn snake_mut(&mut self) -> &mut Snake {
        &mut self.snake
    }
}

/// Lifetime as the strip prints it, in tenths of a second.
fn shown_tenths(lifetime: f32) -> u32 {
    (lifetime.max(0.0) * 10.0).ceil() as u32
}
