//! Simulation entities
//!
//! One concrete `Entity` struct carries the fields every object needs plus a
//! closed kind tag; kind-specific behavior lives in `tick` and is selected by
//! matching on the tag. Kinds are compared by value, never by runtime type
//! identity, so dispatch is exhaustive and checkable.

use glam::Vec2;

use super::bounds::Bounds;

/// Closed set of entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    PlatformSegment,
    PlatformTop,
    FallingBlock,
    EnemyEasy,
    EnemyMedium,
    EnemyHard,
    Pole,
    PoleTop,
}

impl EntityKind {
    /// Platform kinds receive the world scroll speed whenever it is set
    pub fn is_platform(self) -> bool {
        matches!(self, EntityKind::PlatformSegment | EntityKind::PlatformTop)
    }

    /// Kinds whose lower corners kill the player on contact
    pub fn is_hazard(self) -> bool {
        matches!(
            self,
            EntityKind::FallingBlock
                | EntityKind::EnemyEasy
                | EntityKind::EnemyMedium
                | EntityKind::EnemyHard
                | EntityKind::Pole
        )
    }

    /// Kinds subject to gravity and grounding resolution
    pub fn has_gravity(self) -> bool {
        matches!(
            self,
            EntityKind::Player
                | EntityKind::FallingBlock
                | EntityKind::EnemyEasy
                | EntityKind::EnemyMedium
                | EntityKind::EnemyHard
                | EntityKind::Pole
                | EntityKind::PoleTop
        )
    }
}

/// Frame geometry for one entity kind: the collision extent and where the
/// entity's reference point sits inside it. Passed in as configuration; there
/// is no global sprite registry.
#[derive(Debug, Clone, Copy)]
pub struct SpriteDef {
    pub extent: Vec2,
    pub origin: Vec2,
}

impl SpriteDef {
    /// Definition with the reference point at the frame center
    pub fn centered(width: f32, height: f32) -> Self {
        Self {
            extent: Vec2::new(width, height),
            origin: Vec2::new(width / 2.0, height / 2.0),
        }
    }
}

/// Vertical-motion state for entities subject to gravity
#[derive(Debug, Clone, Copy)]
pub struct GravityBody {
    /// Accumulates while airborne; zeroed by a soft landing, inverted and
    /// damped by a hard one
    pub fall_speed: f32,
    /// Horizontal speed inherited from the supporting surface; zero while
    /// airborne
    pub friction_speed: f32,
}

impl Default for GravityBody {
    fn default() -> Self {
        // Bodies enter the world already falling
        Self {
            fall_speed: 1.0,
            friction_speed: 0.0,
        }
    }
}

/// A live simulation object
#[derive(Debug, Clone, Copy)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    /// Reference point; `origin` fixes where it sits inside the extent
    pub pos: Vec2,
    /// Offset of `pos` from the top-left corner of the extent
    pub origin: Vec2,
    /// Current collision extent. May change over the entity's lifetime;
    /// collision tests always read the value current at test time.
    pub extent: Vec2,
    pub speed_h: f32,
    pub speed_v: f32,
    /// Present on gravity-body kinds only
    pub gravity: Option<GravityBody>,
    /// Floor columns wrap back to the right edge when they scroll out on the
    /// left; spawned ledges are discarded instead
    pub recycle: bool,
}

impl Entity {
    pub fn new(id: u32, kind: EntityKind, pos: Vec2, sprite: &SpriteDef) -> Self {
        Self {
            id,
            kind,
            pos,
            origin: sprite.origin,
            extent: sprite.extent,
            speed_h: 0.0,
            speed_v: 0.0,
            gravity: kind.has_gravity().then(GravityBody::default),
            recycle: false,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_origin(self.pos, self.origin, self.extent)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.origin.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left() + self.extent.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.origin.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top() + self.extent.y
    }

    /// Inclusive bounding-box membership test at the current extent
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        self.bounds().contains_point(x, y)
    }

    pub fn fall_speed(&self) -> f32 {
        self.gravity.map_or(0.0, |g| g.fall_speed)
    }
}
