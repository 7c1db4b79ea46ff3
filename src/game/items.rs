use macroquad::rand::gen_range;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{GameConfig, ItemProfile, BOMB_SCALE_WINDOW_SEC, EXPLOSION_SEC};
use crate::game::math::{Direction, Rect};
use crate::game::particles::{Drift, ParticleSystem};
use crate::game::spawn::{place_near_head, place_random};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Food,
    BuffFood,
    SpeedUp,
    SlowDown,
    Bomb,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    Anywhere,
    AheadOfHead,
}

#[derive(Clone, Copy, Debug)]
pub struct Sparkles {
    pub size: f32,
    pub lifetime: f32,
    pub count: usize,
    pub drift: Drift,
}

/// Per-kind rules. Numbers live in [`ItemProfile`], this is the shape.
#[derive(Clone, Copy, Debug)]
pub struct KindBehavior {
    pub placement: Placement,
    pub hazard: bool,
    /// Eating adds `effect` seconds of lifetime.
    pub restores_lifetime: bool,
    /// Eating sets the chain speed to base + `effect`.
    pub speed_buff: bool,
    pub fades: bool,
    pub scales: bool,
    pub sparkles: Option<Sparkles>,
}

impl ItemKind {
    pub const ALL: [ItemKind; 5] = [
        ItemKind::Food,
        ItemKind::BuffFood,
        ItemKind::SpeedUp,
        ItemKind::SlowDown,
        ItemKind::Bomb,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ItemKind::Food => "food",
            ItemKind::BuffFood => "buff food",
            ItemKind::SpeedUp => "speed up",
            ItemKind::SlowDown => "slow down",
            ItemKind::Bomb => "bomb",
        }
    }

    pub fn behavior(self) -> KindBehavior {
        let consumable = KindBehavior {
            placement: Placement::Anywhere,
            hazard: false,
            restores_lifetime: false,
            speed_buff: false,
            fades: true,
            scales: false,
            sparkles: None,
        };
        match self {
            ItemKind::Food => KindBehavior {
                restores_lifetime: true,
                fades: false,
                ..consumable
            },
            ItemKind::BuffFood => KindBehavior {
                restores_lifetime: true,
                sparkles: Some(Sparkles {
                    size: 25.0,
                    lifetime: 1.0,
                    count: 7,
                    drift: Drift::Still,
                }),
                ..consumable
            },
            ItemKind::SpeedUp => KindBehavior {
                speed_buff: true,
                sparkles: Some(Sparkles {
                    size: 28.0,
                    lifetime: 0.8,
                    count: 6,
                    drift: Drift::Rising,
                }),
                ..consumable
            },
            ItemKind::SlowDown => KindBehavior {
                speed_buff: true,
                sparkles: Some(Sparkles {
                    size: 28.0,
                    lifetime: 0.9,
                    count: 7,
                    drift: Drift::Falling,
                }),
                ..consumable
            },
            ItemKind::Bomb => KindBehavior {
                placement: Placement::AheadOfHead,
                hazard: true,
                fades: false,
                scales: true,
                ..consumable
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    Waiting { delay: f32 },
    Spawned { bounds: Rect, age: f32, left: Option<f32> },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Explosion {
    pub bounds: Rect,
    pub left: f32,
}

impl Explosion {
    /// 0 when it starts, 1 when it is gone.
    pub fn progress(&self) -> f32 {
        1.0 - (self.left / EXPLOSION_SEC).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemTick {
    Idle,
    ReadyToSpawn,
    Expired,
}

/// One consumable or hazard slot. It cycles WAITING -> SPAWNED -> WAITING
/// for the whole run; the orchestrator owns it and feeds it exclusions.
#[derive(Clone, Debug)]
pub struct Item {
    kind: ItemKind,
    behavior: KindBehavior,
    profile: ItemProfile,
    phase: Phase,
    explosion: Option<Explosion>,
    sparkles: Option<ParticleSystem>,
    retry_delay: f32,
    spawn_attempts: usize,
    near_head_attempts: usize,
}

impl Item {
    pub fn new(kind: ItemKind, config: &GameConfig) -> Self {
        let behavior = kind.behavior();
        let profile = config.profile(kind).clone();
        let sparkles = behavior
            .sparkles
            .map(|s| ParticleSystem::new(s.size, s.lifetime, s.count, s.drift));
        let mut item = Self {
            kind,
            behavior,
            profile,
            phase: Phase::Waiting { delay: 0.0 },
            explosion: None,
            sparkles,
            retry_delay: config.spawn_retry_delay,
            spawn_attempts: config.spawn_attempts,
            near_head_attempts: config.near_head_attempts,
        };
        item.phase = Phase::Waiting {
            delay: item.random_delay(),
        };
        item
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn behavior(&self) -> &KindBehavior {
        &self.behavior
    }

    pub fn profile(&self) -> &ItemProfile {
        &self.profile
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_spawned(&self) -> bool {
        matches!(self.phase, Phase::Spawned { .. })
    }

    pub fn bounds(&self) -> Option<Rect> {
        match self.phase {
            Phase::Spawned { bounds, .. } => Some(bounds),
            Phase::Waiting { .. } => None,
        }
    }

    /// Bounds grown by the territory margin; other spawns keep out of it.
    pub fn territory(&self) -> Option<Rect> {
        self.bounds().map(|b| b.inflate(self.profile.territory))
    }

    pub fn explosion(&self) -> Option<Explosion> {
        self.explosion
    }

    pub fn sparkles(&self) -> impl Iterator<Item = Rect> + '_ {
        self.sparkles.iter().flat_map(|s| s.visible())
    }

    /// Advances explosion and sparkle visuals only.
    pub fn tick_effects(&mut self, dt: f32) {
        if let Some(explosion) = &mut self.explosion {
            explosion.left -= dt;
            if explosion.left <= 0.0 {
                self.explosion = None;
            }
        }
        if let Some(sparkles) = &mut self.sparkles {
            sparkles.update(dt);
        }
    }

    pub fn tick(&mut self, dt: f32) -> ItemTick {
        self.tick_effects(dt);
        match &mut self.phase {
            Phase::Waiting { delay } => {
                *delay -= dt;
                if *delay <= 0.0 {
                    ItemTick::ReadyToSpawn
                } else {
                    ItemTick::Idle
                }
            }
            Phase::Spawned { age, left, .. } => {
                *age += dt;
                let Some(left) = left else {
                    return ItemTick::Idle;
                };
                *left -= dt;
                if *left > 0.0 {
                    return ItemTick::Idle;
                }
                self.destroy();
                ItemTick::Expired
            }
        }
    }

    /// Tries to place the item. `heading` is the head bounds and facing,
    /// used by kinds that spawn in front of the snake. On failure the item
    /// keeps waiting for a short retry delay.
    pub fn spawn(&mut self, arena: &Rect, exclusions: &[Rect], heading: Option<(Rect, Direction)>) -> bool {
        let size = self.profile.size;
        let placed = match (self.behavior.placement, heading) {
            (Placement::AheadOfHead, Some((head, facing))) => {
                place_near_head(size, arena, &head, facing, exclusions, self.near_head_attempts)
            }
            _ => place_random(size, arena, exclusions, self.spawn_attempts),
        };

        let Some(bounds) = placed else {
            debug!(kind = self.kind.label(), "no room to spawn, retrying");
            self.phase = Phase::Waiting {
                delay: self.retry_delay,
            };
            return false;
        };

        debug!(kind = self.kind.label(), x = bounds.x, y = bounds.y, "item spawned");
        self.phase = Phase::Spawned {
            bounds,
            age: 0.0,
            left: self.profile.lifetime,
        };
        if let Some(sparkles) = &mut self.sparkles {
            sparkles.spawn(bounds);
        }
        true
    }

    /// Clears the item and schedules the next spawn.
    pub fn destroy(&mut self) {
        self.phase = Phase::Waiting {
            delay: self.random_delay(),
        };
        if let Some(sparkles) = &mut self.sparkles {
            sparkles.stop();
        }
    }

    /// Destroys the item and leaves an explosion where it stood.
    pub fn detonate(&mut self) {
        if let Some(bounds) = self.bounds() {
            self.explosion = Some(Explosion {
                bounds,
                left: EXPLOSION_SEC,
            });
        }
        self.destroy();
    }

    /// Opacity. Fading kinds go linearly to 0 over the second half of their lifetime.
    pub fn alpha(&self) -> f32 {
        match (self.behavior.fades, self.phase, self.profile.lifetime) {
            (true, Phase::Spawned { left: Some(left), .. }, Some(total)) => {
                let half = total * 0.5;
                if left < half {
                    (left / half).clamp(0.0, 1.0)
                } else {
                    1.0
                }
            }
            _ => 1.0,
        }
    }

    /// Draw scale. Scaling kinds pop in and shrink out over a short window.
    pub fn scale(&self) -> f32 {
        let Phase::Spawned { age, left, .. } = self.phase else {
            return 1.0;
        };
        if !self.behavior.scales {
            return 1.0;
        }
        let rising = age / BOMB_SCALE_WINDOW_SEC;
        let falling = left.map_or(1.0, |l| l / BOMB_SCALE_WINDOW_SEC);
        rising.min(falling).clamp(0.0, 1.0)
    }

    fn random_delay(&self) -> f32 {
        let (min, max) = (self.profile.spawn_delay_min, self.profile.spawn_delay_max);
        if max > min {
            gen_range(min, max)
        } else {
            min
        }
    }

    #[cfg(test)]
    pub(crate) fn force_spawn(&mut self, bounds: Rect) {
        self.phase = Phase::Spawned {
            bounds,
            age: 0.0,
            left: self.profile.lifetime,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: f32 = 1.0 / 60.0;

    fn arena() -> Rect {
        GameConfig::default().arena_bounds()
    }

    fn wait_until_ready(item: &mut Item) {
        for _ in 0..10_000 {
            if item.tick(STEP) == ItemTick::ReadyToSpawn {
                return;
            }
        }
        panic!("item never became ready");
    }

    #[test]
    fn starts_waiting_within_delay_range() {
        let cfg = GameConfig::default();
        for kind in ItemKind::ALL {
            let item = Item::new(kind, &cfg);
            let Phase::Waiting { delay } = item.phase() else {
                panic!("{kind:?} spawned immediately");
            };
            let p = cfg.profile(kind);
            assert!(delay >= p.spawn_delay_min && delay <= p.spawn_delay_max);
        }
    }

    #[test]
    fn food_stays_until_eaten() {
        let mut item = Item::new(ItemKind::Food, &GameConfig::default());
        wait_until_ready(&mut item);
        assert!(item.spawn(&arena(), &[], None));
        for _ in 0..6_000 {
            assert_eq!(item.tick(STEP), ItemTick::Idle);
        }
        assert!(item.is_spawned());
        assert_eq!(item.alpha(), 1.0);
        item.destroy();
        assert!(!item.is_spawned());
        assert_eq!(item.bounds(), None);
    }

    #[test]
    fn timed_item_fades_then_expires() {
        let mut item = Item::new(ItemKind::SpeedUp, &GameConfig::default());
        wait_until_ready(&mut item);
        assert!(item.spawn(&arena(), &[], None));
        // 5 s lifetime: opaque at 2 s, half faded at 3.75 s
        for _ in 0..120 {
            item.tick(STEP);
        }
        assert_eq!(item.alpha(), 1.0);
        for _ in 0..105 {
            item.tick(STEP);
        }
        assert!((item.alpha() - 0.5).abs() < 0.02);

        let mut expired = false;
        for _ in 0..100 {
            expired |= item.tick(STEP) == ItemTick::Expired;
        }
        assert!(expired);
        assert!(!item.is_spawned());
    }

    #[test]
    fn failed_placement_retries_shortly() {
        let cfg = GameConfig::default();
        let mut item = Item::new(ItemKind::Food, &cfg);
        wait_until_ready(&mut item);
        assert!(!item.spawn(&arena(), &[arena()], None));
        assert_eq!(
            item.phase(),
            Phase::Waiting {
                delay: cfg.spawn_retry_delay
            }
        );
    }

    #[test]
    fn spawn_avoids_exclusions() {
        let mut item = Item::new(ItemKind::BuffFood, &GameConfig::default());
        let blocked = Rect::new(0.0, 50.0, 900.0, 718.0);
        wait_until_ready(&mut item);
        if item.spawn(&arena(), &[blocked], None) {
            let bounds = item.bounds().unwrap();
            assert!(!bounds.overlaps(&blocked));
            assert!(item.territory().unwrap().contains_rect(&bounds));
        }
    }

    #[test]
    fn bomb_spawns_ahead_and_scales() {
        let mut bomb = Item::new(ItemKind::Bomb, &GameConfig::default());
        let head = Rect::new(500.0, 400.0, 30.0, 30.0);
        wait_until_ready(&mut bomb);
        if bomb.spawn(&arena(), &[], Some((head, Direction::Left))) {
            assert!(bomb.bounds().unwrap().right() <= head.left());
        }
        bomb.force_spawn(Rect::new(100.0, 100.0, 40.0, 40.0));
        assert_eq!(bomb.scale(), 0.0);
        for _ in 0..60 {
            bomb.tick(STEP);
        }
        assert_eq!(bomb.scale(), 1.0);
        // 8 s lifetime, 0.15 s before expiry it is half size
        for _ in 0..411 {
            bomb.tick(STEP);
        }
        assert!(bomb.scale() < 0.6 && bomb.scale() > 0.4);
    }

    #[test]
    fn detonation_leaves_explosion_and_waits() {
        let mut bomb = Item::new(ItemKind::Bomb, &GameConfig::default());
        let spot = Rect::new(200.0, 200.0, 40.0, 40.0);
        bomb.force_spawn(spot);
        bomb.detonate();
        assert!(!bomb.is_spawned());
        assert_eq!(bomb.explosion().map(|e| e.bounds), Some(spot));
        for _ in 0..31 {
            bomb.tick_effects(STEP);
        }
        assert_eq!(bomb.explosion(), None);
    }
}
