use crate::game::items::ItemKind;
use crate::game::math::{Direction, Rect};
use crate::game::part::PartRole;
use crate::game::snake::CornerKind;

/// Everything the core can ask a surface to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    Background,
    Border,
    Part { role: PartRole, facing: Direction },
    PendingTail,
    Corner(CornerKind),
    Item(ItemKind),
    Explosion,
    Sparkle(ItemKind),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tint {
    pub alpha: f32,
    /// Scale around the bounds' centre.
    pub scale: f32,
}

impl Tint {
    pub const SOLID: Tint = Tint {
        alpha: 1.0,
        scale: 1.0,
    };

    pub fn new(alpha: f32, scale: f32) -> Self {
        Self { alpha, scale }
    }
}

impl Default for Tint {
    fn default() -> Self {
        Self::SOLID
    }
}

pub trait Surface {
    fn draw(&mut self, bounds: Rect, sprite: Sprite, tint: Tint);
}

/// Surface that just remembers what it was asked to draw.
#[derive(Default, Debug)]
pub struct RecordingSurface {
    pub calls: Vec<(Rect, Sprite, Tint)>,
}

impl Surface for RecordingSurface {
    fn draw(&mut self, bounds: Rect, sprite: Sprite, tint: Tint) {
        self.calls.push((bounds, sprite, tint));
    }
}

impl RecordingSurface {
    pub fn sprites(&self) -> impl Iterator<Item = Sprite> + '_ {
        self.calls.iter().map(|(_, s, _)| *s)
    }
}
