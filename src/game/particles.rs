use macroquad::prelude::*;
use macroquad::rand::gen_range;

use crate::game::math::Rect;

const DRIFT_PX_PER_SEC: f32 = 24.0;
const MAX_START_DELAY_SEC: f32 = 1.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Drift {
    Still,
    Rising,
    Falling,
}

/// Sprite that pops up somewhere in `area`, grows to `max_size` over the
/// first half of its lifetime, shrinks back over the second, then respawns.
#[derive(Clone, Debug)]
pub struct Particle {
    area: Rect,
    pos: Vec2,
    max_size: f32,
    lifetime: f32,
    drift: Drift,
    timer: f32,
    delay: f32,
    size: f32,
    stopping: bool,
    stopped: bool,
}

impl Particle {
    fn new(area: Rect, max_size: f32, lifetime: f32, drift: Drift) -> Self {
        let mut p = Self {
            area,
            pos: area.center(),
            max_size,
            lifetime,
            drift,
            timer: 0.0,
            delay: 0.0,
            size: 0.0,
            stopping: false,
            stopped: false,
        };
        p.respawn();
        p
    }

    fn respawn(&mut self) {
        self.pos = vec2(
            gen_range(self.area.left(), self.area.right()),
            gen_range(self.area.top(), self.area.bottom()),
        );
        self.timer = 0.0;
        self.size = 0.0;
        self.delay = gen_range(0.0, MAX_START_DELAY_SEC);
    }

    pub fn update(&mut self, dt: f32) {
        self.delay = (self.delay - dt).max(0.0);
        if self.delay > 0.0 || self.stopped {
            return;
        }

        if self.timer <= self.lifetime {
            self.timer += dt;
        } else if self.stopping {
            self.stopped = true;
            return;
        } else {
            self.respawn();
            return;
        }

        let half = self.lifetime * 0.5;
        let t = self.timer.min(self.lifetime);
        self.size = if t < half {
            self.max_size * (t / half)
        } else {
            self.max_size * ((self.lifetime - t) / half)
        };

        match self.drift {
            Drift::Still => {}
            Drift::Rising => self.pos.y -= DRIFT_PX_PER_SEC * dt,
            Drift::Falling => self.pos.y += DRIFT_PX_PER_SEC * dt,
        }
    }

    pub fn is_visible(&self) -> bool {
        !self.stopped && self.delay <= 0.0 && self.timer < self.lifetime && self.size > 0.0
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.pos.x - self.size * 0.5,
            self.pos.y - self.size * 0.5,
            self.size,
            self.size,
        )
    }
}

#[derive(Clone, Debug)]
pub struct ParticleSystem {
    max_size: f32,
    lifetime: f32,
    count: usize,
    drift: Drift,
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new(max_size: f32, lifetime: f32, count: usize, drift: Drift) -> Self {
        Self {
            max_size,
            lifetime,
            count,
            drift,
            particles: Vec::new(),
        }
    }

    pub fn spawn(&mut self, area: Rect) {
        self.particles = (0..self.count)
            .map(|_| Particle::new(area, self.max_size, self.lifetime, self.drift))
            .collect();
    }

    pub fn update(&mut self, dt: f32) {
        for p in &mut self.particles {
            p.update(dt);
        }
        self.particles.retain(|p| !p.stopped);
    }

    /// Lets every particle finish its current cycle, then drops it.
    pub fn stop(&mut self) {
        for p in &mut self.particles {
            p.stopping = true;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn visible(&self) -> impl Iterator<Item = Rect> + '_ {
        self.particles.iter().filter(|p| p.is_visible()).map(|p| p.bounds())
    }
}
