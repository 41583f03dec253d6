//! Score-driven spawn scheduling
//!
//! Every category keeps its own "score at last spawn" counter and fires once
//! the gap exceeds its threshold. Thresholds grow strictly across categories,
//! so the nastier hazards layer on top of the common ones progressively less
//! often. The difficulty level gates which categories are live at all, and a
//! higher enemy tier draws its variant uniformly from the tier's allowed set.
//!
//! All randomness comes from one seeded generator: a fixed seed replays the
//! exact spawn sequence.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::EntityKind;

/// Independently scheduled spawn categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnCategory {
    Pole,
    PlatformRun,
    FallingBlock,
    EnemyEasy,
    EnemyMedium,
    EnemyHard,
}

impl SpawnCategory {
    pub const ALL: [SpawnCategory; 6] = [
        SpawnCategory::Pole,
        SpawnCategory::PlatformRun,
        SpawnCategory::FallingBlock,
        SpawnCategory::EnemyEasy,
        SpawnCategory::EnemyMedium,
        SpawnCategory::EnemyHard,
    ];

    /// Score gap required between two spawns of this category
    pub fn threshold(self) -> u64 {
        match self {
            SpawnCategory::Pole => 700,
            SpawnCategory::PlatformRun => 1000,
            SpawnCategory::FallingBlock => 2100,
            SpawnCategory::EnemyEasy => 3300,
            SpawnCategory::EnemyMedium => 4400,
            SpawnCategory::EnemyHard => 5500,
        }
    }

    /// Lowest difficulty level at which this category fires. Poles and
    /// platform runs are always live; enemy variants unlock by tier.
    pub fn min_level(self) -> u32 {
        match self {
            SpawnCategory::Pole | SpawnCategory::PlatformRun => 0,
            SpawnCategory::FallingBlock => 2,
            SpawnCategory::EnemyEasy => 3,
            SpawnCategory::EnemyMedium | SpawnCategory::EnemyHard => 4,
        }
    }
}

/// What the room should create for one category firing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnCommand {
    Pole { segments: u32 },
    PlatformRun { columns: u32 },
    FallingBlock,
    Enemy { kind: EntityKind },
}

/// Scheduled, score-threshold-driven entity creation
pub struct SpawnPolicy {
    rng: Pcg32,
    last_spawn_score: [u64; SpawnCategory::ALL.len()],
}

impl SpawnPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            last_spawn_score: [0; SpawnCategory::ALL.len()],
        }
    }

    /// The first pole of a session, spawned at room construction
    pub fn bootstrap(&mut self) -> Vec<SpawnCommand> {
        vec![self.pole(1)]
    }

    /// Fire every eligible category whose score gap is exceeded. Ineligible
    /// categories keep accumulating, so they fire as soon as their tier
    /// unlocks.
    pub fn evaluate(&mut self, score: u64, level: u32) -> Vec<(SpawnCategory, SpawnCommand)> {
        let mut batch = Vec::new();
        for (slot, category) in SpawnCategory::ALL.into_iter().enumerate() {
            if level < category.min_level() {
                continue;
            }
            if score - self.last_spawn_score[slot] <= category.threshold() {
                continue;
            }
            self.last_spawn_score[slot] = score;
            batch.push((category, self.roll(category, level)));
        }
        batch
    }

    fn roll(&mut self, category: SpawnCategory, level: u32) -> SpawnCommand {
        match category {
            SpawnCategory::Pole => self.pole(level),
            SpawnCategory::PlatformRun => SpawnCommand::PlatformRun {
                columns: self.rng.random_range(2..=4),
            },
            SpawnCategory::FallingBlock => SpawnCommand::FallingBlock,
            SpawnCategory::EnemyEasy => SpawnCommand::Enemy {
                kind: EntityKind::EnemyEasy,
            },
            // Higher tiers draw uniformly from their allowed variants
            SpawnCategory::EnemyMedium => SpawnCommand::Enemy {
                kind: if self.rng.random_bool(0.5) {
                    EntityKind::EnemyMedium
                } else {
                    EntityKind::EnemyEasy
                },
            },
            SpawnCategory::EnemyHard => SpawnCommand::Enemy {
                kind: if self.rng.random_bool(0.5) {
                    EntityKind::EnemyHard
                } else {
                    EntityKind::EnemyMedium
                },
            },
        }
    }

    /// Pole height is randomized within a level-dependent bound; taller
    /// stacks become possible as the run goes on
    fn pole(&mut self, level: u32) -> SpawnCommand {
        let bound = level.clamp(1, 3);
        SpawnCommand::Pole {
            segments: self.rng.random_range(1..=bound),
        }
    }
}
