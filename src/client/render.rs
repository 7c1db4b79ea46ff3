use macroquad::prelude::*;

use crate::game::items::ItemKind;
use crate::game::math::{Direction, Rect};
use crate::game::part::PartRole;
use crate::game::render::{Sprite, Surface, Tint};
use crate::game::snake::CornerKind;

const BACKGROUND: Color = Color::new(0.05, 0.06, 0.08, 1.0);
const FIELD: Color = Color::new(0.08, 0.10, 0.13, 1.0);
const HEAD: Color = Color::new(0.45, 0.90, 0.45, 1.0);
const DEAD_HEAD: Color = Color::new(0.55, 0.55, 0.55, 1.0);
const BODY: Color = Color::new(0.25, 0.70, 0.30, 1.0);
const TAIL: Color = Color::new(0.20, 0.58, 0.25, 1.0);

pub fn item_color(kind: ItemKind) -> Color {
    match kind {
        ItemKind::Food => Color::from_rgba(235, 80, 70, 255),
        ItemKind::BuffFood => Color::from_rgba(250, 200, 60, 255),
        ItemKind::SpeedUp => Color::from_rgba(80, 200, 250, 255),
        ItemKind::SlowDown => Color::from_rgba(170, 110, 240, 255),
        ItemKind::Bomb => Color::from_rgba(40, 40, 46, 255),
    }
}

fn with_alpha(c: Color, alpha: f32) -> Color {
    Color::new(c.r, c.g, c.b, c.a * alpha.clamp(0.0, 1.0))
}

fn scaled(bounds: Rect, scale: f32) -> Rect {
    let c = bounds.center();
    let w = bounds.w * scale;
    let h = bounds.h * scale;
    Rect::new(c.x - w * 0.5, c.y - h * 0.5, w, h)
}

/// Draws the render list with plain macroquad shapes.
pub struct MacroquadSurface;

impl MacroquadSurface {
    fn part(r: Rect, role: PartRole, facing: Direction, alpha: f32) {
        let color = match role {
            PartRole::Head => HEAD,
            PartRole::DeadHead => DEAD_HEAD,
            PartRole::Body => BODY,
            PartRole::Tail => TAIL,
        };
        draw_rectangle(r.x, r.y, r.w, r.h, with_alpha(color, alpha));

        if matches!(role, PartRole::Head | PartRole::DeadHead) {
            let c = r.center();
            let ahead = facing.unit() * r.w * 0.2;
            let side = match facing {
                Direction::Zero => vec2(r.w * 0.2, 0.0),
                _ => vec2(-ahead.y, ahead.x),
            };
            let eye = r.w * 0.12;
            let eye_color = if role == PartRole::DeadHead { BLACK } else { WHITE };
            for s in [-1.0, 1.0] {
                let p = c + ahead + side * s;
                draw_rectangle(p.x - eye * 0.5, p.y - eye * 0.5, eye, eye, with_alpha(eye_color, alpha));
            }
        }
    }

    /// Fills the cell and rounds off the outer corner of the turn.
    fn corner(r: Rect, kind: CornerKind) {
        draw_rectangle(r.x, r.y, r.w, r.h, BODY);
        let notch = r.w * 0.25;
        let (x, y) = match kind {
            CornerKind::TopLeft => (r.right() - notch, r.bottom() - notch),
            CornerKind::TopRight => (r.left(), r.bottom() - notch),
            CornerKind::BottomLeft => (r.right() - notch, r.top()),
            CornerKind::BottomRight => (r.left(), r.top()),
        };
        draw_rectangle(x, y, notch, notch, FIELD);
    }

    fn item(r: Rect, kind: ItemKind, alpha: f32) {
        let c = r.center();
        let radius = r.w.min(r.h) * 0.5;
        let color = with_alpha(item_color(kind), alpha);
        match kind {
            ItemKind::Food | ItemKind::BuffFood => {
                draw_circle(c.x, c.y, radius * 0.85, color);
                draw_circle(c.x - radius * 0.3, c.y - radius * 0.3, radius * 0.2, with_alpha(WHITE, alpha * 0.6));
            }
            ItemKind::SpeedUp | ItemKind::SlowDown => {
                let (tip, base) = if kind == ItemKind::SpeedUp {
                    (r.top() + 4.0, r.bottom() - 4.0)
                } else {
                    (r.bottom() - 4.0, r.top() + 4.0)
                };
                draw_triangle(
                    vec2(c.x, tip),
                    vec2(r.left() + 4.0, base),
                    vec2(r.right() - 4.0, base),
                    color,
                );
            }
            ItemKind::Bomb => {
                draw_circle(c.x, c.y + radius * 0.1, radius * 0.8, color);
                draw_circle_lines(c.x, c.y + radius * 0.1, radius * 0.8, 2.0, with_alpha(RED, alpha));
                draw_line(c.x, c.y - radius * 0.7, c.x + radius * 0.4, c.y - radius, 3.0, with_alpha(ORANGE, alpha));
            }
        }
    }
}

impl Surface for MacroquadSurface {
    fn draw(&mut self, bounds: Rect, sprite: Sprite, tint: Tint) {
        let r = scaled(bounds, tint.scale);
        match sprite {
            Sprite::Background => clear_background(BACKGROUND),
            Sprite::Border => {
                draw_rectangle(r.x, r.y, r.w, r.h, FIELD);
                draw_rectangle_lines(r.x, r.y, r.w, r.h, 2.0, Color::from_rgba(255, 255, 255, 40));
            }
            Sprite::Part { role, facing } => Self::part(r, role, facing, tint.alpha),
            Sprite::PendingTail => draw_rectangle(r.x, r.y, r.w, r.h, with_alpha(TAIL, 0.8)),
            Sprite::Corner(kind) => Self::corner(r, kind),
            Sprite::Item(kind) => Self::item(r, kind, tint.alpha),
            Sprite::Explosion => {
                let c = r.center();
                draw_circle(c.x, c.y, r.w * 0.5, with_alpha(ORANGE, tint.alpha));
                draw_circle(c.x, c.y, r.w * 0.3, with_alpha(YELLOW, tint.alpha));
            }
            Sprite::Sparkle(kind) => {
                let c = r.center();
                let color = with_alpha(item_color(kind), 0.8 * tint.alpha);
                draw_line(r.left(), c.y, r.right(), c.y, 2.0, color);
                draw_line(c.x, r.top(), c.x, r.bottom(), 2.0, color);
            }
        }
    }
}
