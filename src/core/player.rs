//! Player identification, teams, skills and statistics.
//!
//! ## PlayerId
//!
//! Type-safe player identifier. `PlayerId(0)` is the neutral player that
//! owns unclaimed buildings and rescuable units.
//!
//! ## Player
//!
//! A player's passive skills, active (charged) skills and cumulative
//! statistics. Players are immutable values inside a `Snapshot`; updates
//! produce a new `Player`.

use serde::{Deserialize, Serialize};

use crate::skills::SkillSet;

/// Player identifier.
///
/// `PlayerId::NEUTRAL` (0) is never an active participant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// The neutral player.
    pub const NEUTRAL: PlayerId = PlayerId(0);

    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn is_neutral(self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Cumulative per-player statistics.
///
/// Also used as a delta: `modify_statistics` adds every field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerStats {
    pub damage: u32,
    pub destroyed_units: u32,
    pub lost_units: u32,
    pub destroyed_buildings: u32,
    pub captured: u32,
    pub rescued_units: u32,
}

impl PlayerStats {
    #[must_use]
    fn add(self, delta: PlayerStats) -> Self {
        Self {
            damage: self.damage + delta.damage,
            destroyed_units: self.destroyed_units + delta.destroyed_units,
            lost_units: self.lost_units + delta.lost_units,
            destroyed_buildings: self.destroyed_buildings + delta.destroyed_buildings,
            captured: self.captured + delta.captured,
            rescued_units: self.rescued_units + delta.rescued_units,
        }
    }
}

/// A participant in the match.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,

    /// Players on the same team are never opponents.
    pub team: u8,

    /// Skills permanently held by the player.
    pub skills: SkillSet,

    /// Skills currently charged and toggled on.
    pub active_skills: SkillSet,

    pub stats: PlayerStats,
}

impl Player {
    /// Create a player on its own team (team id = player id).
    #[must_use]
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            team: id.0,
            skills: SkillSet::new(),
            active_skills: SkillSet::new(),
            stats: PlayerStats::default(),
        }
    }

    /// The neutral player.
    #[must_use]
    pub fn neutral() -> Self {
        Self::new(PlayerId::NEUTRAL)
    }

    #[must_use]
    pub fn with_team(mut self, team: u8) -> Self {
        self.team = team;
        self
    }

    #[must_use]
    pub fn with_skills(mut self, skills: SkillSet) -> Self {
        self.skills = skills;
        self
    }

    #[must_use]
    pub fn with_active_skills(mut self, active_skills: SkillSet) -> Self {
        self.active_skills = active_skills;
        self
    }

    #[must_use]
    pub fn with_stats(mut self, stats: PlayerStats) -> Self {
        self.stats = stats;
        self
    }

    /// Add `delta` to every statistic.
    #[must_use]
    pub fn modify_statistics(&self, delta: PlayerStats) -> Self {
        Self {
            stats: self.stats.add(delta),
            ..self.clone()
        }
    }
}
