pub mod autopilot;
pub mod collision;
pub mod items;
pub mod math;
pub mod part;
pub mod particles;
pub mod render;
pub mod snake;
pub mod spawn;
pub mod types;
pub mod world;

pub use items::ItemKind;
pub use math::{Direction, Rect};
pub use types::{GameEvent, GameState, RunSummary};
pub use world::Game;
