//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied elapsed scale only, no wall clock
//! - Seeded RNG only
//! - Entity updates run in insertion order
//! - No rendering or platform dependencies

pub mod bounds;
pub mod entity;
pub mod gravity;
pub mod query;
pub mod room;
pub mod spawn;
pub mod tick;

pub use bounds::Bounds;
pub use entity::{Entity, EntityKind, GravityBody, SpriteDef};
pub use query::find_nearest_below;
pub use room::{Room, RoomConfig, SpriteMap, level_for_score, scroll_speed_for};
pub use spawn::{SpawnCategory, SpawnCommand, SpawnPolicy};
pub use tick::{TickInput, tick};
