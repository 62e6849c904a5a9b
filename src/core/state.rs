//! Immutable game-state snapshots.
//!
//! ## Snapshot
//!
//! Complete state at one point in time:
//! - Players (skills, statistics, teams)
//! - Units, buildings and tiles by position
//! - Objectives
//! - Current player and round
//!
//! Uses `im` persistent data structures: `clone()` is O(1) and every
//! `with_*` transition shares unchanged substructure with its source.
//! A held snapshot is never mutated; transitions consume or clone and
//! return a new value.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use super::entity::{Building, TileType, Unit};
use super::player::{Player, PlayerId, PlayerStats};
use super::position::Vector;
use crate::objectives::Objectives;

/// Game state at one point in time.
///
/// Maps are ordered by position (row-major), so iterating units or
/// buildings is deterministic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    players: OrdMap<PlayerId, Player>,
    units: OrdMap<Vector, Unit>,
    buildings: OrdMap<Vector, Building>,
    tiles: OrdMap<Vector, TileType>,
    objectives: Objectives,
    current_player: PlayerId,
    round: u32,
}

impl Snapshot {
    /// Create a snapshot for the given players.
    ///
    /// ## Defaults
    ///
    /// - The neutral player is added if missing
    /// - `current_player`: lowest non-neutral player id
    /// - `round`: 1
    /// - Objectives: a single Default objective
    ///
    /// Panics if no non-neutral player is given.
    #[must_use]
    pub fn new(players: impl IntoIterator<Item = Player>) -> Self {
        let mut map: OrdMap<PlayerId, Player> =
            players.into_iter().map(|player| (player.id, player)).collect();
        if !map.contains_key(&PlayerId::NEUTRAL) {
            map.insert(PlayerId::NEUTRAL, Player::neutral());
        }

        let Some(current_player) = map.keys().copied().find(|id| !id.is_neutral()) else {
            panic!("Must have at least 1 non-neutral player");
        };

        Self {
            players: map,
            units: OrdMap::new(),
            buildings: OrdMap::new(),
            tiles: OrdMap::new(),
            objectives: Objectives::default(),
            current_player,
            round: 1,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn units(&self) -> &OrdMap<Vector, Unit> {
        &self.units
    }

    #[must_use]
    pub fn buildings(&self) -> &OrdMap<Vector, Building> {
        &self.buildings
    }

    #[must_use]
    pub fn unit_at(&self, position: Vector) -> Option<&Unit> {
        self.units.get(&position)
    }

    #[must_use]
    pub fn building_at(&self, position: Vector) -> Option<&Building> {
        self.buildings.get(&position)
    }

    /// Terrain at `position`. Positions without an explicit tile are plain.
    #[must_use]
    pub fn tile_at(&self, position: Vector) -> TileType {
        self.tiles.get(&position).copied().unwrap_or(TileType::Plain)
    }

    #[must_use]
    pub fn objectives(&self) -> &Objectives {
        &self.objectives
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    /// All players, including neutral, ordered by id.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    /// Non-neutral player ids, ordered.
    pub fn active_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.keys().copied().filter(|id| !id.is_neutral())
    }

    /// Statistics of a player; unknown players have empty statistics.
    #[must_use]
    pub fn stats(&self, id: PlayerId) -> PlayerStats {
        self.players.get(&id).map(|player| player.stats).unwrap_or_default()
    }

    // === Team Relations ===

    /// Team of a player. Unknown players form a team of their own.
    #[must_use]
    pub fn team(&self, id: PlayerId) -> u8 {
        self.players.get(&id).map_or(id.0, |player| player.team)
    }

    /// Whether an entity owned by `owner` belongs to `player`.
    #[must_use]
    pub fn matches_player(&self, owner: PlayerId, player: PlayerId) -> bool {
        owner == player
    }

    /// Whether `a` and `b` are on different teams. Neutral is everyone's
    /// opponent.
    #[must_use]
    pub fn is_opponent(&self, a: PlayerId, b: PlayerId) -> bool {
        self.team(a) != self.team(b)
    }

    /// Whether `other` is an opponent of `player` and not neutral.
    #[must_use]
    pub fn is_non_neutral_opponent(&self, player: PlayerId, other: PlayerId) -> bool {
        !other.is_neutral() && self.is_opponent(player, other)
    }

    // === Transitions ===

    /// Place (or replace) a unit.
    #[must_use]
    pub fn with_unit(mut self, position: Vector, unit: Unit) -> Self {
        self.units.insert(position, unit);
        self
    }

    /// Remove the unit at `position`, if any.
    #[must_use]
    pub fn without_unit(mut self, position: Vector) -> Self {
        self.units.remove(&position);
        self
    }

    /// Replace every unit at the given positions.
    #[must_use]
    pub fn with_units(mut self, units: impl IntoIterator<Item = (Vector, Unit)>) -> Self {
        for (position, unit) in units {
            self.units.insert(position, unit);
        }
        self
    }

    #[must_use]
    pub fn with_building(mut self, position: Vector, building: Building) -> Self {
        self.buildings.insert(position, building);
        self
    }

    #[must_use]
    pub fn without_building(mut self, position: Vector) -> Self {
        self.buildings.remove(&position);
        self
    }

    #[must_use]
    pub fn with_tile(mut self, position: Vector, tile: TileType) -> Self {
        self.tiles.insert(position, tile);
        self
    }

    /// Replace (or add) a player, keyed by its id.
    #[must_use]
    pub fn with_player(mut self, player: Player) -> Self {
        self.players.insert(player.id, player);
        self
    }

    /// Replace several players at once.
    #[must_use]
    pub fn with_players(mut self, players: impl IntoIterator<Item = Player>) -> Self {
        for player in players {
            self.players.insert(player.id, player);
        }
        self
    }

    #[must_use]
    pub fn with_objectives(mut self, objectives: Objectives) -> Self {
        self.objectives = objectives;
        self
    }

    #[must_use]
    pub fn with_current_player(mut self, player: PlayerId) -> Self {
        self.current_player = player;
        self
    }

    #[must_use]
    pub fn with_round(mut self, round: u32) -> Self {
        self.round = round;
        self
    }

    /// Add `delta` to a player's statistics. Unknown players are ignored.
    #[must_use]
    pub fn modify_statistics(self, id: PlayerId, delta: PlayerStats) -> Self {
        match self.players.get(&id).map(|player| player.modify_statistics(delta)) {
            Some(player) => self.with_player(player),
            None => self,
        }
    }
}
