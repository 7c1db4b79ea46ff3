use macroquad::prelude::*;

use crate::game::math::{Corner, Direction, Rect};

/// Sprite role of a part. Cosmetic only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PartRole {
    Head,
    DeadHead,
    Body,
    Tail,
}

/// One square of the snake.
///
/// `cell` is the grid anchor the part is currently leaving; `bounds` slides
/// away from it by `movement` every step. Once it has travelled a full part
/// size the part re-anchors and picks up its queued movement.
#[derive(Clone, Debug)]
pub struct SegmentPart {
    cell: Vec2,
    movement: Direction,
    queued: Direction,
    bounds: Rect,
    size: f32,
    pub role: PartRole,
}

impl SegmentPart {
    pub fn new(origin: Vec2, size: f32, direction: Direction, role: PartRole) -> Self {
        Self {
            cell: origin,
            movement: direction,
            queued: direction,
            bounds: Rect::square(origin, size),
            size,
            role,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn collision_bounds(&self, margin: f32) -> Rect {
        self.bounds.inset(margin)
    }

    pub fn cell(&self) -> Vec2 {
        self.cell
    }

    pub fn movement(&self) -> Direction {
        self.movement
    }

    pub fn set_next_movement(&mut self, direction: Direction) {
        self.queued = direction;
    }

    /// Replaces both the current and queued movement. Used when a frozen
    /// part joins the chain.
    pub fn set_movement(&mut self, direction: Direction) {
        self.movement = direction;
        self.queued = direction;
    }

    /// How far `bounds` has slid from the anchor along the axis of travel.
    pub fn transit(&self) -> f32 {
        (self.bounds.x - self.cell.x)
            .abs()
            .max((self.bounds.y - self.cell.y).abs())
    }

    /// Moves one step at `speed`.
    ///
    /// Returns the movement the part just retired when it had completed a
    /// full cell before this step, `None` otherwise. The chain forwards the
    /// retired movement to the next part, so a turn travels one part per cell.
    ///
    /// A step never carries the part past the cell boundary; speeds that do
    /// not divide the part size end the cell with a shorter step.
    pub fn advance(&mut self, speed: f32) -> Option<Direction> {
        let mut retired = None;
        if self.transit() >= self.size {
            retired = Some(self.movement);
            self.cell += self.movement.unit() * self.size;
            self.movement = self.queued;
            self.bounds = Rect::square(self.cell, self.size);
        }
        let step = speed.min(self.size - self.transit()).max(0.0);
        self.bounds.translate(self.movement.vector(step));
        retired
    }

    /// Hard reposition of the visual bounds by one corner. The anchor is
    /// left alone, see [`SegmentPart::set_anchor`].
    pub fn teleport(&mut self, point: Vec2, corner: Corner) {
        self.bounds.set_corner(corner, point);
    }

    pub fn set_anchor(&mut self, cell: Vec2) {
        self.cell = cell;
    }

    /// Rectangle one full cell ahead of the anchor along the current movement.
    pub fn future_bounds(&self) -> Rect {
        Rect::square(self.cell + self.movement.unit() * self.size, self.size)
    }
}
