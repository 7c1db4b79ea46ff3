use macroquad::prelude::*;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, top-left origin, y grows downward.
///
/// Overlap is exclusive: rectangles that only share an edge do not overlap,
/// so two parts sitting exactly one cell apart never count as touching.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn square(origin: Vec2, size: f32) -> Self {
        Self::new(origin.x, origin.y, size, size)
    }

    pub fn origin(&self) -> Vec2 {
        vec2(self.x, self.y)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        vec2(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    pub fn corner(&self, corner: Corner) -> Vec2 {
        match corner {
            Corner::TopLeft => vec2(self.left(), self.top()),
            Corner::TopRight => vec2(self.right(), self.top()),
            Corner::BottomLeft => vec2(self.left(), self.bottom()),
            Corner::BottomRight => vec2(self.right(), self.bottom()),
        }
    }

    /// Moves the rectangle so that `corner` lands on `point`.
    pub fn set_corner(&mut self, corner: Corner, point: Vec2) {
        match corner {
            Corner::TopLeft => {
                self.x = point.x;
                self.y = point.y;
            }
            Corner::TopRight => {
                self.x = point.x - self.w;
                self.y = point.y;
            }
            Corner::BottomLeft => {
                self.x = point.x;
                self.y = point.y - self.h;
            }
            Corner::BottomRight => {
                self.x = point.x - self.w;
                self.y = point.y - self.h;
            }
        }
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.x += offset.x;
        self.y += offset.y;
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.top() >= self.top()
            && other.bottom() <= self.bottom()
    }

    /// Same size rectangle pushed inside `bounds`; centred on an axis where it cannot fit.
    pub fn clamp_within(&self, bounds: &Rect) -> Rect {
        let x = if self.w >= bounds.w {
            bounds.x + (bounds.w - self.w) * 0.5
        } else {
            self.x.clamp(bounds.left(), bounds.right() - self.w)
        };
        let y = if self.h >= bounds.h {
            bounds.y + (bounds.h - self.h) * 0.5
        } else {
            self.y.clamp(bounds.top(), bounds.bottom() - self.h)
        };
        Rect::new(x, y, self.w, self.h)
    }

    /// Shrinks every side by `margin` (negative grows).
    pub fn inset(&self, margin: f32) -> Rect {
        Rect::new(
            self.x + margin,
            self.y + margin,
            (self.w - margin * 2.0).max(0.0),
            (self.h - margin * 2.0).max(0.0),
        )
    }

    pub fn inflate(&self, margin: f32) -> Rect {
        self.inset(-margin)
    }

    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let l = self.left().max(other.left());
        let t = self.top().max(other.top());
        let r = self.right().min(other.right());
        let b = self.bottom().min(other.bottom());
        if r > l && b > t {
            Some(Rect::new(l, t, r - l, b - t))
        } else {
            None
        }
    }
}

/// Axis-aligned heading of a part.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    #[default]
    Zero,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Zero => Direction::Zero,
        }
    }

    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => vec2(0.0, -1.0),
            Direction::Down => vec2(0.0, 1.0),
            Direction::Left => vec2(-1.0, 0.0),
            Direction::Right => vec2(1.0, 0.0),
            Direction::Zero => vec2(0.0, 0.0),
        }
    }

    /// Movement per step for this heading at `speed`.
    pub fn vector(self, speed: f32) -> Vec2 {
        self.unit() * speed
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    pub fn perpendiculars(self) -> [Direction; 2] {
        if self.is_horizontal() {
            [Direction::Up, Direction::Down]
        } else {
            [Direction::Left, Direction::Right]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_contact_is_not_overlap() {
        let a = Rect::new(0.0, 0.0, 30.0, 30.0);
        let b = Rect::new(30.0, 0.0, 30.0, 30.0);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&Rect::new(29.5, 0.0, 30.0, 30.0)));
    }

    #[test]
    fn clamp_reports_escape() {
        let arena = Rect::new(0.0, 50.0, 200.0, 200.0);
        let inside = Rect::new(10.0, 60.0, 30.0, 30.0);
        let outside = Rect::new(-3.0, 60.0, 30.0, 30.0);
        assert_eq!(inside.clamp_within(&arena), inside);
        assert_ne!(outside.clamp_within(&arena), outside);
        assert_eq!(outside.clamp_within(&arena).x, 0.0);
    }

    #[test]
    fn set_corner_anchors_each_corner() {
        let mut r = Rect::new(0.0, 0.0, 10.0, 20.0);
        r.set_corner(Corner::BottomRight, vec2(100.0, 100.0));
        assert_eq!(r.origin(), vec2(90.0, 80.0));
        r.set_corner(Corner::TopRight, vec2(50.0, 5.0));
        assert_eq!(r.corner(Corner::TopRight), vec2(50.0, 5.0));
    }

    #[test]
    fn opposite_and_perpendiculars() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Zero.opposite(), Direction::Zero);
        assert_eq!(Direction::Left.perpendiculars(), [Direction::Up, Direction::Down]);
        assert_eq!(Direction::Right.vector(3.0), vec2(3.0, 0.0));
    }
}
