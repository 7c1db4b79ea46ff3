use macroquad::rand::gen_range;

use crate::config::GameConfig;
use crate::game::math::{Direction, Rect};
use crate::game::snake::Snake;

/// Drives the menu snake. Wall avoidance is checked every step, a random
/// perpendicular turn is taken once per interval.
pub struct Autopilot {
    timer: f32,
    interval: f32,
    wall_margin: f32,
}

/// Free room between `head` and the arena edge in `direction`.
fn room(head: &Rect, arena: &Rect, direction: Direction) -> f32 {
    match direction {
        Direction::Up => head.top() - arena.top(),
        Direction::Down => arena.bottom() - head.bottom(),
        Direction::Left => head.left() - arena.left(),
        Direction::Right => arena.right() - head.right(),
        Direction::Zero => f32::INFINITY,
    }
}

impl Autopilot {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            timer: 0.0,
            interval: config.autopilot_interval,
            wall_margin: config.autopilot_wall_margin,
        }
    }

    pub fn reset(&mut self) {
        self.timer = 0.0;
    }

    pub fn tick(&mut self, dt: f32, snake: &Snake, arena: &Rect) -> Option<Direction> {
        self.timer += dt;
        if snake.is_turn_locked() {
            return None;
        }

        let head = snake.head_bounds();
        let facing = snake.direction();
        let [a, b] = facing.perpendiculars();

        if room(&head, arena, facing) < self.wall_margin {
            self.timer = 0.0;
            let pick = if room(&head, arena, a) >= room(&head, arena, b) { a } else { b };
            return Some(pick);
        }

        if self.timer < self.interval {
            return None;
        }
        self.timer -= self.interval;

        // skip a random turn that would point straight at a nearby wall
        let open: Vec<Direction> = [a, b]
            .into_iter()
            .filter(|d| room(&head, arena, *d) >= self.wall_margin)
            .collect();
        match open.len() {
            0 => None,
            1 => Some(open[0]),
            n => Some(open[gen_range(0, n)]),
        }
    }
}

#[cfg(test)]
mod tests {
    use macroquad::prelude::vec2;

    use super::*;
    use crate::game::collision::boundary_check;

    const STEP: f32 = 1.0 / 60.0;

    #[test]
    fn turns_away_from_a_close_wall() {
        let cfg = GameConfig::default();
        let arena = cfg.arena_bounds();
        let snake = Snake::new_at(&cfg, vec2(900.0, arena.top() + 40.0), Direction::Up);
        let mut pilot = Autopilot::new(&cfg);
        assert_eq!(pilot.tick(STEP, &snake, &arena), Some(Direction::Left));
    }

    #[test]
    fn waits_for_the_interval_in_open_space() {
        let cfg = GameConfig::default();
        let arena = cfg.arena_bounds();
        let snake = Snake::new(&cfg);
        let mut pilot = Autopilot::new(&cfg);
        for _ in 0..59 {
            assert_eq!(pilot.tick(STEP, &snake, &arena), None);
        }
        let turn = pilot.tick(STEP * 2.0, &snake, &arena);
        assert!(matches!(turn, Some(Direction::Left | Direction::Right)));
    }

    #[test]
    fn keeps_the_snake_inside_for_a_long_demo() {
        let cfg = GameConfig::default();
        let arena = cfg.arena_bounds();
        let mut snake = Snake::new(&cfg);
        let mut pilot = Autopilot::new(&cfg);
        for _ in 0..60 * 120 {
            if let Some(d) = pilot.tick(STEP, &snake, &arena) {
                snake.steer(d);
            }
            snake.update(STEP);
            assert!(!boundary_check(&snake.head_bounds(), &arena));
        }
    }
}
