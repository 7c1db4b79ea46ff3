use macroquad::rand::gen_range;

use crate::game::math::{Direction, Rect};

/// Cells between the head and the near edge of the zone ahead of it.
const AHEAD_GAP_CELLS: f32 = 2.0;
/// Depth and width of the zone ahead of the head, in cells.
const AHEAD_DEPTH_CELLS: f32 = 6.0;
const AHEAD_WIDTH_CELLS: f32 = 8.0;

fn random_square_in(area: &Rect, size: f32) -> Option<Rect> {
    if area.w < size || area.h < size {
        return None;
    }
    let x = gen_range(area.left(), area.right() - size);
    let y = gen_range(area.top(), area.bottom() - size);
    // float rounding can land a hair past the far edge
    Some(Rect::new(x, y, size, size).clamp_within(area))
}

fn is_clear(candidate: &Rect, exclusions: &[Rect]) -> bool {
    !exclusions.iter().any(|e| e.overlaps(candidate))
}

/// Uniform rejection sampling of a `size` square inside `arena` that touches
/// none of `exclusions`. Gives up after `max_attempts`.
pub fn place_random(size: f32, arena: &Rect, exclusions: &[Rect], max_attempts: usize) -> Option<Rect> {
    for _ in 0..max_attempts {
        let candidate = random_square_in(arena, size)?;
        if is_clear(&candidate, exclusions) {
            return Some(candidate);
        }
    }
    None
}

/// Zone in front of `head` along `facing`, cut to the arena.
pub fn ahead_zone(head: &Rect, facing: Direction, arena: &Rect) -> Option<Rect> {
    let cell = head.w.max(head.h);
    let gap = cell * AHEAD_GAP_CELLS;
    let depth = cell * AHEAD_DEPTH_CELLS;
    let width = cell * AHEAD_WIDTH_CELLS;
    let c = head.center();

    let zone = match facing {
        Direction::Up => Rect::new(c.x - width * 0.5, head.top() - gap - depth, width, depth),
        Direction::Down => Rect::new(c.x - width * 0.5, head.bottom() + gap, width, depth),
        Direction::Left => Rect::new(head.left() - gap - depth, c.y - width * 0.5, depth, width),
        Direction::Right => Rect::new(head.right() + gap, c.y - width * 0.5, depth, width),
        Direction::Zero => return None,
    };
    zone.intersection(arena)
}

/// Like [`place_random`] but only inside the zone ahead of the head.
pub fn place_near_head(
    size: f32,
    arena: &Rect,
    head: &Rect,
    facing: Direction,
    exclusions: &[Rect],
    max_attempts: usize,
) -> Option<Rect> {
    let zone = ahead_zone(head, facing, arena)?;
    place_random(size, &zone, exclusions, max_attempts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena() -> Rect {
        Rect::new(0.0, 50.0, 1024.0, 718.0)
    }

    #[test]
    fn placement_respects_arena_and_exclusions() {
        let exclusions = [
            Rect::new(0.0, 50.0, 512.0, 718.0),
            Rect::new(600.0, 300.0, 100.0, 100.0),
        ];
        for _ in 0..500 {
            let placed = place_random(40.0, &arena(), &exclusions, 200);
            let Some(rect) = placed else { continue };
            assert!(arena().contains_rect(&rect));
            assert!(exclusions.iter().all(|e| !e.overlaps(&rect)));
        }
    }

    #[test]
    fn fully_blocked_arena_gives_up() {
        let exclusions = [arena()];
        assert_eq!(place_random(40.0, &arena(), &exclusions, 50), None);
    }

    #[test]
    fn item_larger_than_arena_is_never_placed() {
        let tiny = Rect::new(0.0, 0.0, 20.0, 20.0);
        assert_eq!(place_random(40.0, &tiny, &[], 10), None);
    }

    #[test]
    fn near_head_lands_in_front() {
        let head = Rect::new(500.0, 400.0, 30.0, 30.0);
        for _ in 0..200 {
            if let Some(rect) = place_near_head(40.0, &arena(), &head, Direction::Up, &[], 12) {
                assert!(rect.bottom() <= head.top());
                assert!(arena().contains_rect(&rect));
            }
        }
        let zone = ahead_zone(&head, Direction::Right, &arena());
        assert!(zone.is_some_and(|z| z.left() >= head.right()));
    }

    #[test]
    fn zone_outside_arena_skips() {
        let head = Rect::new(500.0, 55.0, 30.0, 30.0);
        assert_eq!(ahead_zone(&head, Direction::Up, &arena()), None);
        assert_eq!(place_near_head(40.0, &arena(), &head, Direction::Up, &[], 12), None);
    }
}
