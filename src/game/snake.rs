use std::collections::VecDeque;

use macroquad::prelude::*;

use crate::config::GameConfig;
use crate::game::items::ItemKind;
use crate::game::math::{Corner, Direction, Rect};
use crate::game::part::{PartRole, SegmentPart};

/// Quarter-turn tile named after the two cell edges it joins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CornerKind {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl CornerKind {
    /// Tile for a part travelling `incoming` into a cell that its
    /// predecessor leaves by `outgoing`. `None` when the two are parallel.
    pub fn from_turn(incoming: Direction, outgoing: Direction) -> Option<CornerKind> {
        let entry = incoming.opposite();
        let (vertical, horizontal) = if entry.is_vertical() && outgoing.is_horizontal() {
            (entry, outgoing)
        } else if entry.is_horizontal() && outgoing.is_vertical() {
            (outgoing, entry)
        } else {
            return None;
        };
        match (vertical, horizontal) {
            (Direction::Up, Direction::Left) => Some(CornerKind::TopLeft),
            (Direction::Up, Direction::Right) => Some(CornerKind::TopRight),
            (Direction::Down, Direction::Left) => Some(CornerKind::BottomLeft),
            (Direction::Down, Direction::Right) => Some(CornerKind::BottomRight),
            _ => None,
        }
    }
}

/// Cosmetic tile hiding the notch at a turn. Never collides.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CornerCover {
    pub bounds: Rect,
    pub kind: CornerKind,
    pub delay: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveBuff {
    pub kind: ItemKind,
    pub left: f32,
}

pub struct Snake {
    head: SegmentPart,
    body: Vec<SegmentPart>,
    pending: VecDeque<SegmentPart>,
    covers: Vec<CornerCover>,

    direction: Direction,
    turn_locked: bool,
    dead: bool,

    speed: f32,
    base_speed: f32,
    min_speed: f32,
    buff: Option<ActiveBuff>,
    buff_duration: f32,

    pub lifetime: f32,

    part_size: f32,
    collision_margin: f32,
    cover_decay: f32,
}

impl Snake {
    /// Fresh snake centred in the arena, heading up, body stacked below.
    pub fn new(config: &GameConfig) -> Self {
        let (cx, cy) = config.arena_center();
        let size = config.part_size;
        let origin = vec2(cx - size * 0.5, cy - size * 0.5);
        Self::new_at(config, origin, Direction::Up)
    }

    pub fn new_at(config: &GameConfig, head_origin: Vec2, direction: Direction) -> Self {
        let size = config.part_size;
        let head = SegmentPart::new(head_origin, size, direction, PartRole::Head);
        let behind = direction.opposite().unit() * size;
        let count = config.initial_length.max(2) - 1;
        let body = (1..=count)
            .map(|i| {
                let role = if i == count { PartRole::Tail } else { PartRole::Body };
                SegmentPart::new(head_origin + behind * i as f32, size, direction, role)
            })
            .collect();

        Self {
            head,
            body,
            pending: VecDeque::new(),
            covers: Vec::new(),
            direction,
            turn_locked: false,
            dead: false,
            speed: config.base_speed,
            base_speed: config.base_speed,
            min_speed: config.min_speed,
            buff: None,
            buff_duration: config.buff_duration,
            lifetime: config.initial_lifetime,
            part_size: config.part_size,
            collision_margin: config.collision_margin,
            cover_decay: config.corner_cover_decay,
        }
    }

    pub fn head(&self) -> &SegmentPart {
        &self.head
    }

    pub fn body(&self) -> &[SegmentPart] {
        &self.body
    }

    pub fn pending(&self) -> impl Iterator<Item = &SegmentPart> {
        self.pending.iter()
    }

    pub fn covers(&self) -> &[CornerCover] {
        &self.covers
    }

    /// Head first, then body in chain order.
    pub fn parts(&self) -> impl Iterator<Item = &SegmentPart> {
        std::iter::once(&self.head).chain(self.body.iter())
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn buff(&self) -> Option<ActiveBuff> {
        self.buff
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn is_turn_locked(&self) -> bool {
        self.turn_locked
    }

    /// Spliced parts, head included.
    pub fn len(&self) -> usize {
        1 + self.body.len()
    }

    /// Length including tails still waiting to join.
    pub fn stretch(&self) -> usize {
        self.len() + self.pending.len()
    }

    pub fn head_bounds(&self) -> Rect {
        self.head.bounds()
    }

    pub fn head_collision_bounds(&self) -> Rect {
        self.head.collision_bounds(self.collision_margin)
    }

    pub fn collision_margin(&self) -> f32 {
        self.collision_margin
    }

    /// Player or auto-pilot intent. Reversal, repeats, and a second turn
    /// inside the same cell are ignored.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.dead
            || self.turn_locked
            || direction == Direction::Zero
            || direction == self.direction
            || direction == self.direction.opposite()
        {
            return false;
        }
        self.direction = direction;
        self.head.set_next_movement(direction);
        self.turn_locked = true;
        true
    }

    /// One simulation step. Returns the buff kind that ran out during it.
    pub fn update(&mut self, dt: f32) -> Option<ItemKind> {
        if self.dead {
            return None;
        }

        let expired = self.tick_buff(dt);

        let speed = self.speed;
        let mut forwarded = self.head.advance(speed);
        if forwarded.is_some() {
            self.turn_locked = false;
        }
        for part in &mut self.body {
            if let Some(direction) = forwarded {
                part.set_next_movement(direction);
            }
            forwarded = part.advance(speed);
        }

        self.splice_pending();
        self.update_covers(dt);

        expired
    }

    /// Queues a frozen copy of the tail; it joins once the tail has moved off it.
    pub fn grow(&mut self) {
        let tail = self.body.last_mut().unwrap_or(&mut self.head);
        let mut clone = tail.clone();
        if tail.role == PartRole::Tail {
            tail.role = PartRole::Body;
        }
        clone.role = PartRole::Tail;
        clone.set_movement(Direction::Zero);
        self.pending.push_back(clone);
    }

    pub fn die(&mut self) {
        self.dead = true;
        self.turn_locked = false;
        self.head.role = PartRole::DeadHead;
    }

    /// Sets chain speed to base + `delta` for the buff duration. A newer
    /// buff replaces the running one.
    pub fn apply_buff(&mut self, kind: ItemKind, delta: f32) {
        self.speed = (self.base_speed + delta).max(self.min_speed);
        self.buff = Some(ActiveBuff {
            kind,
            left: self.buff_duration,
        });
    }

    pub fn drain_lifetime(&mut self, dt: f32) {
        self.lifetime = (self.lifetime - dt).max(0.0);
    }

    fn tick_buff(&mut self, dt: f32) -> Option<ItemKind> {
        let buff = self.buff.as_mut()?;
        buff.left -= dt;
        if buff.left > 0.0 {
            return None;
        }
        let kind = buff.kind;
        self.buff = None;
        self.speed = self.base_speed;
        Some(kind)
    }

    fn splice_pending(&mut self) {
        let Some(front) = self.pending.front() else {
            return;
        };
        let last = self.body.last().unwrap_or(&self.head);
        if last.bounds().overlaps(&front.bounds()) {
            return;
        }

        let direction = last.movement();
        let (from, to) = match direction {
            Direction::Up => (Corner::BottomLeft, Corner::TopLeft),
            Direction::Down => (Corner::TopLeft, Corner::BottomLeft),
            Direction::Left => (Corner::TopRight, Corner::TopLeft),
            Direction::Right => (Corner::TopLeft, Corner::TopRight),
            Direction::Zero => return,
        };
        let edge = last.bounds().corner(from);
        let anchor = last.cell() - direction.unit() * self.part_size;

        let Some(mut part) = self.pending.pop_front() else {
            return;
        };
        part.teleport(edge, to);
        part.set_anchor(anchor);
        part.set_movement(direction);

        if let Some(prev) = self.body.last_mut() {
            prev.role = PartRole::Body;
        }
        part.role = PartRole::Tail;
        self.body.push(part);
    }

    fn update_covers(&mut self, dt: f32) {
        for cover in &mut self.covers {
            cover.delay -= dt;
        }
        self.covers.retain(|c| c.delay > 0.0);

        let mut lead = &self.head;
        for follower in &self.body {
            if lead.bounds().overlaps(&follower.bounds()) {
                let bounds = follower.future_bounds();
                if let Some(existing) = self.covers.iter_mut().find(|c| c.bounds == bounds) {
                    existing.delay = self.cover_decay;
                } else if let Some(kind) =
                    CornerKind::from_turn(follower.movement(), lead.movement())
                {
                    self.covers.push(CornerCover {
                        bounds,
                        kind,
                        delay: self.cover_decay,
                    });
                }
            }
            lead = follower;
        }
    }
}
