use crate::game::math::Rect;
use crate::game::snake::Snake;

pub fn collision_check(a: &Rect, b: &Rect) -> bool {
    a.overlaps(b)
}

/// Head against its own body, skipping the part right behind the head.
pub fn self_collision(snake: &Snake) -> bool {
    let margin = snake.collision_margin();
    let head = snake.head_collision_bounds();
    snake
        .body()
        .iter()
        .skip(1)
        .any(|part| collision_check(&head, &part.collision_bounds(margin)))
}

/// True when `rect` sticks out of `arena`.
pub fn boundary_check(rect: &Rect, arena: &Rect) -> bool {
    rect.clamp_within(arena) != *rect
}

#[cfg(test)]
mod tests {
    use macroquad::prelude::vec2;

    use super::*;
    use crate::config::GameConfig;
    use crate::game::math::Direction;

    const STEP: f32 = 1.0 / 60.0;

    fn turn(snake: &mut Snake, direction: Direction) {
        snake.steer(direction);
        while snake.is_turn_locked() {
            snake.update(STEP);
        }
    }

    #[test]
    fn straight_snake_does_not_hit_itself() {
        let snake = Snake::new(&GameConfig::default());
        assert!(!self_collision(&snake));
    }

    #[test]
    fn tight_loop_hits_itself() {
        let mut cfg = GameConfig::default();
        cfg.initial_length = 8;
        let mut snake = Snake::new_at(&cfg, vec2(300.0, 300.0), Direction::Up);
        snake.update(STEP);
        turn(&mut snake, Direction::Right);
        turn(&mut snake, Direction::Down);
        turn(&mut snake, Direction::Left);
        let mut hit = false;
        for _ in 0..40 {
            snake.update(STEP);
            hit |= self_collision(&snake);
        }
        assert!(hit);
    }

    #[test]
    fn boundary_flags_escape_only() {
        let arena = Rect::new(0.0, 50.0, 300.0, 300.0);
        assert!(!boundary_check(&Rect::new(0.0, 50.0, 30.0, 30.0), &arena));
        assert!(boundary_check(&Rect::new(0.0, 49.0, 30.0, 30.0), &arena));
        assert!(boundary_check(&Rect::new(271.0, 100.0, 30.0, 30.0), &arena));
    }
}
