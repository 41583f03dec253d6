//! The simulation room
//!
//! Owns the entity list - nothing else may add or remove entries - plus the
//! score, the world scroll speed, the difficulty level and the terminal flag.
//! A room is constructed once per play session; restart means dropping it and
//! constructing a fresh one, never mutating back to an initial state.

use glam::Vec2;

use crate::consts::*;

use super::entity::{Entity, EntityKind, SpriteDef};
use super::spawn::{SpawnCommand, SpawnPolicy};

/// Per-kind frame geometry, passed in at construction. There is no global
/// sprite registry; a host with real art supplies its own measurements.
#[derive(Debug, Clone, Copy)]
pub struct SpriteMap {
    pub player: SpriteDef,
    pub platform_segment: SpriteDef,
    pub platform_top: SpriteDef,
    pub falling_block: SpriteDef,
    pub enemy: SpriteDef,
    pub pole: SpriteDef,
    pub pole_top: SpriteDef,
}

impl Default for SpriteMap {
    fn default() -> Self {
        Self {
            player: SpriteDef::centered(48.0, 64.0),
            platform_segment: SpriteDef::centered(64.0, 64.0),
            platform_top: SpriteDef::centered(64.0, 32.0),
            falling_block: SpriteDef::centered(48.0, 48.0),
            enemy: SpriteDef::centered(48.0, 48.0),
            pole: SpriteDef::centered(32.0, 64.0),
            pole_top: SpriteDef::centered(48.0, 32.0),
        }
    }
}

impl SpriteMap {
    pub fn get(&self, kind: EntityKind) -> &SpriteDef {
        match kind {
            EntityKind::Player => &self.player,
            EntityKind::PlatformSegment => &self.platform_segment,
            EntityKind::PlatformTop => &self.platform_top,
            EntityKind::FallingBlock => &self.falling_block,
            EntityKind::EnemyEasy | EntityKind::EnemyMedium | EntityKind::EnemyHard => &self.enemy,
            EntityKind::Pole => &self.pole,
            EntityKind::PoleTop => &self.pole_top,
        }
    }
}

/// Room construction parameters
#[derive(Debug, Clone, Copy)]
pub struct RoomConfig {
    pub width: f32,
    pub height: f32,
    pub sprites: SpriteMap,
    /// Seed for the spawn policy's RNG; a fixed seed replays identically
    pub seed: u64,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            width: ROOM_WIDTH,
            height: ROOM_HEIGHT,
            sprites: SpriteMap::default(),
            seed: 0,
        }
    }
}

/// Pending input state. Out-of-band input events land here as plain writes
/// and are consumed at the next tick, never mid-pass.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ControlState {
    pub target_x: f32,
    pub pressed_at: Option<f64>,
    pub released_at: Option<f64>,
}

/// Difficulty level for a score, capped at the top tier
pub fn level_for_score(score: u64) -> u32 {
    (score.div_ceil(SCORE_PER_LEVEL) as u32).min(MAX_LEVEL)
}

/// World scroll speed for a score: monotonically more negative, floored
pub fn scroll_speed_for(score: u64) -> f32 {
    (BASE_SCROLL_SPEED - score as f32 / SCROLL_SCORE_DIVISOR).max(MAX_SCROLL_SPEED)
}

/// One play session's world
pub struct Room {
    pub(crate) config: RoomConfig,
    pub(crate) entities: Vec<Entity>,
    pub(crate) control: ControlState,
    pub(crate) spawner: SpawnPolicy,
    pub(crate) score: u64,
    pub(crate) level: u32,
    pub(crate) speed: f32,
    pub(crate) ended: bool,
    next_id: u32,
}

impl Room {
    /// A fully populated room: floor, player, and the first pole already on
    /// its way in
    pub fn new(config: RoomConfig) -> Self {
        let mut room = Self::empty(config);
        room.create_floor();

        let player_x = 70.0;
        room.push(EntityKind::Player, player_x, room.config.height - SPAWN_OFFSET);
        room.control.target_x = player_x;

        room.set_speed(BASE_SCROLL_SPEED);
        for cmd in room.spawner.bootstrap() {
            room.spawn(cmd);
        }
        room
    }

    /// A bare room with no entities; tests assemble these piecewise
    pub(crate) fn empty(config: RoomConfig) -> Self {
        Self {
            entities: Vec::new(),
            control: ControlState::default(),
            spawner: SpawnPolicy::new(config.seed),
            score: 0,
            level: 0,
            speed: BASE_SCROLL_SPEED,
            ended: false,
            next_id: 1,
            config,
        }
    }

    /// Live entities in insertion order, read-only. The draw pass reads this;
    /// it must not mutate simulation state.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn ended(&self) -> bool {
        self.ended
    }

    /// Append an entity of `kind` at `(x, y)`. Platform kinds pick up the
    /// current scroll speed on creation.
    pub(crate) fn push(&mut self, kind: EntityKind, x: f32, y: f32) -> usize {
        let sprite = *self.config.sprites.get(kind);
        let id = self.next_id;
        self.next_id += 1;
        let mut entity = Entity::new(id, kind, Vec2::new(x, y), &sprite);
        if kind.is_platform() {
            entity.speed_h = self.speed;
        }
        self.entities.push(entity);
        self.entities.len() - 1
    }

    /// The bottom floor: stacked PlatformTop/PlatformSegment columns spanning
    /// the room width plus a buffer column, all wrap-recycled
    fn create_floor(&mut self) {
        let seg = self.config.sprites.platform_segment.extent;
        let top = self.config.sprites.platform_top.extent;
        let columns = (self.config.width / seg.x).ceil() as u32 + PLATFORM_BUFFER as u32;
        let seg_y = self.config.height - seg.y / 2.0;
        let top_y = self.config.height - seg.y - top.y / 2.0;

        for i in 0..columns {
            let x = i as f32 * seg.x + seg.x / 2.0;
            let t = self.push(EntityKind::PlatformTop, x, top_y);
            self.entities[t].recycle = true;
            let s = self.push(EntityKind::PlatformSegment, x, seg_y);
            self.entities[s].recycle = true;
        }
    }

    /// Set the world scroll rate and apply it to platform kinds. Grounded
    /// bodies inherit it from them through friction, so nothing else needs
    /// to track the speed directly.
    pub(crate) fn set_speed(&mut self, value: f32) {
        self.speed = value;
        for e in &mut self.entities {
            if e.kind.is_platform() {
                e.speed_h = value;
            }
        }
    }

    /// One-way terminal transition: horizontal motion stops and every
    /// subsequent tick is frozen. The only recovery is constructing a fresh
    /// room.
    pub fn end(&mut self) {
        self.ended = true;
        self.set_speed(0.0);
    }

    /// Drop entities that left through the bottom bound. All removal funnels
    /// through here, after the update pass, so iteration order during the
    /// pass stays well-defined. Losing the player ends the run.
    pub(crate) fn cull(&mut self) {
        let height = self.config.height;
        let mut player_lost = false;
        self.entities.retain(|e| {
            if e.pos.y < height {
                true
            } else {
                player_lost |= e.kind == EntityKind::Player;
                false
            }
        });
        if player_lost {
            self.end();
        }
    }

    /// Materialize one spawn command just past the right edge, at the fixed
    /// vertical offset from the floor
    pub(crate) fn spawn(&mut self, cmd: SpawnCommand) {
        let x = self.config.width + SPAWN_MARGIN;
        let y = self.config.height - SPAWN_OFFSET;

        match cmd {
            SpawnCommand::Pole { segments } => {
                let seg_h = self.config.sprites.pole.extent.y;
                let cap_h = self.config.sprites.pole_top.extent.y;
                // Build the stack bottom-up, cap last
                let mut bottom = y + seg_h / 2.0;
                for _ in 0..segments {
                    self.push(EntityKind::Pole, x, bottom - seg_h / 2.0);
                    bottom -= seg_h;
                }
                self.push(EntityKind::PoleTop, x, bottom - cap_h / 2.0);
            }
            SpawnCommand::PlatformRun { columns } => {
                let w = self.config.sprites.platform_top.extent.x;
                for i in 0..columns {
                    self.push(EntityKind::PlatformTop, x + i as f32 * w, y);
                }
            }
            SpawnCommand::FallingBlock => {
                self.push(EntityKind::FallingBlock, x, y);
            }
            SpawnCommand::Enemy { kind } => {
                let i = self.push(kind, x, y);
                self.entities[i].speed_h = match kind {
                    EntityKind::EnemyMedium => ENEMY_MEDIUM_PACE,
                    EntityKind::EnemyHard => ENEMY_HARD_PACE,
                    _ => 0.0,
                };
            }
        }
    }
}
