//! Map entities: units and buildings, and the static type enums they use.
//!
//! ## Type Enums
//!
//! - `UnitType`: what a unit is (its catalog identity)
//! - `MovementType`: how a unit moves; many modifiers key on this
//! - `BuildingType`: what a building is
//! - `TileType`: terrain; modifiers key on the tile's group
//!
//! ## Entities
//!
//! `Unit` and `Building` are small immutable values stored in snapshot
//! maps. Every "mutation" returns a new value.

use im::OrdSet;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::player::PlayerId;

/// Health of a freshly created unit and the ceiling for healing.
pub const MAX_HEALTH: u8 = 100;

/// A designer-assigned label used by objectives to mark specific entities.
pub type Label = u8;

/// A set of labels. An empty set matches every unit.
pub type LabelSet = OrdSet<Label>;

/// Movement category of a unit.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter,
)]
pub enum MovementType {
    Soldier,
    HeavySoldier,
    AirInfantry,
    Tires,
    Tread,
    Rail,
    Ship,
    Amphibious,
    Air,
}

impl MovementType {
    /// Whether units of this category fly and need recovery after acting.
    #[must_use]
    pub const fn is_air(self) -> bool {
        matches!(self, MovementType::Air)
    }
}

/// Terrain type of a tile.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter,
)]
pub enum TileType {
    Plain,
    Street,
    Forest,
    ForestVariant2,
    ForestVariant3,
    ForestVariant4,
    Mountain,
    RailTrack,
    River,
    Sea,
}

impl TileType {
    /// The group a tile belongs to for modifier lookups.
    ///
    /// Visual variants share the group of their base tile.
    #[must_use]
    pub const fn group(self) -> TileType {
        match self {
            TileType::Forest
            | TileType::ForestVariant2
            | TileType::ForestVariant3
            | TileType::ForestVariant4 => TileType::Forest,
            other => other,
        }
    }
}

/// Identity of a unit in the unit catalog.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter,
)]
pub enum UnitType {
    Pioneer,
    Infantry,
    Sniper,
    Medic,
    Saboteur,
    Commander,
    Zombie,
    Brute,
    Bear,
    Ogre,
    Alien,
    BazookaBear,
    Flamethrower,
    SuperAPU,
    InfernoJetpack,
    Jeep,
    Artillery,
    AIU,
    SmallTank,
    HeavyArtillery,
    Cannon,
    SuperTank,
    Dinosaur,
    Dragon,
    Train,
    Frigate,
    BattleShip,
    Octopus,
    Helicopter,
    Jetfighter,
    AcidBomber,
}

impl UnitType {
    /// Movement category of this unit type.
    #[must_use]
    pub const fn movement_type(self) -> MovementType {
        use UnitType::*;
        match self {
            Pioneer | Infantry | Sniper | Medic | Saboteur | Commander | Zombie | Bear | Ogre
            | Alien | BazookaBear => MovementType::Soldier,
            Brute | Flamethrower | SuperAPU => MovementType::HeavySoldier,
            InfernoJetpack => MovementType::AirInfantry,
            Jeep | Artillery | AIU => MovementType::Tires,
            SmallTank | HeavyArtillery | Cannon | SuperTank | Dinosaur | Dragon => {
                MovementType::Tread
            }
            Train => MovementType::Rail,
            Frigate | BattleShip => MovementType::Ship,
            Octopus => MovementType::Amphibious,
            Helicopter | Jetfighter | AcidBomber => MovementType::Air,
        }
    }
}

/// Identity of a building in the building catalog.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter,
)]
pub enum BuildingType {
    HQ,
    House,
    Barracks,
    Factory,
    Airbase,
    Shipyard,
    Bar,
    PowerStation,
}

/// A unit on the map (or inside a transporter).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Unit {
    /// Catalog identity.
    pub unit_type: UnitType,
    /// Owning player. `PlayerId::NEUTRAL` for neutral units.
    pub player: PlayerId,
    /// Current health, `0..=MAX_HEALTH`.
    pub health: u8,
    /// Objective label.
    pub label: Option<Label>,
    /// Leader units receive leader-only bonuses.
    pub leader: bool,
    /// Whether the unit has finished acting this turn.
    pub completed: bool,
    /// Character name index. Unique across the map when assigned.
    pub name: Option<u32>,
    /// Units carried by this unit.
    #[serde(default)]
    pub transports: Vec<Unit>,
}

impl Unit {
    /// Create a full-health unit.
    #[must_use]
    pub fn new(unit_type: UnitType, player: PlayerId) -> Self {
        Self {
            unit_type,
            player,
            health: MAX_HEALTH,
            label: None,
            leader: false,
            completed: false,
            name: None,
            transports: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_health(mut self, health: u8) -> Self {
        self.health = health;
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: Label) -> Self {
        self.label = Some(label);
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: u32) -> Self {
        self.name = Some(name);
        self
    }

    #[must_use]
    pub fn with_transports(mut self, transports: Vec<Unit>) -> Self {
        self.transports = transports;
        self
    }

    #[must_use]
    pub fn as_leader(mut self) -> Self {
        self.leader = true;
        self
    }

    /// Mark the unit as having acted.
    #[must_use]
    pub fn complete(mut self) -> Self {
        self.completed = true;
        self
    }

    /// Allow the unit to act again.
    #[must_use]
    pub fn recover(mut self) -> Self {
        self.completed = false;
        self
    }

    /// Movement category, from the unit type.
    #[must_use]
    pub fn movement_type(&self) -> MovementType {
        self.unit_type.movement_type()
    }

    /// Change health by `delta`, clamped to `0..=max`.
    #[must_use]
    pub fn modify_health(mut self, delta: i32, max: u8) -> Self {
        let health = (i32::from(self.health) + delta).clamp(0, i32::from(max));
        self.health = health as u8;
        self
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Number of units in this stack: the unit plus everything it carries.
    #[must_use]
    pub fn count(&self) -> u32 {
        1 + self.transports.iter().map(Unit::count).sum::<u32>()
    }

    /// Convert to `to` when this unit is of type `from`.
    ///
    /// A converted unit loses its name; the caller assigns a fresh one.
    #[must_use]
    pub fn maybe_convert(&self, from: UnitType, to: UnitType) -> Option<Unit> {
        (self.unit_type == from).then(|| Unit {
            unit_type: to,
            name: None,
            ..self.clone()
        })
    }

    /// Whether this unit, or anything it carries, has one of `labels`.
    ///
    /// An empty label set matches every unit.
    #[must_use]
    pub fn matches_labels(&self, labels: &LabelSet) -> bool {
        labels.is_empty() || self.has_label_in(labels)
    }

    fn has_label_in(&self, labels: &LabelSet) -> bool {
        self.label.is_some_and(|label| labels.contains(&label))
            || self.transports.iter().any(|unit| unit.has_label_in(labels))
    }

    /// All names in this stack, including transported units.
    #[must_use]
    pub fn names(&self) -> Vec<u32> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names(&self, out: &mut Vec<u32>) {
        out.extend(self.name);
        for unit in &self.transports {
            unit.collect_names(out);
        }
    }
}

/// A building on the map.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Building {
    pub building_type: BuildingType,
    pub player: PlayerId,
    pub label: Option<Label>,
}

impl Building {
    #[must_use]
    pub fn new(building_type: BuildingType, player: PlayerId) -> Self {
        Self {
            building_type,
            player,
            label: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: Label) -> Self {
        self.label = Some(label);
        self
    }

    /// Buildings match only on their own label, and only a non-empty set.
    #[must_use]
    pub fn matches_labels(&self, labels: &LabelSet) -> bool {
        self.label.is_some_and(|label| labels.contains(&label))
    }
}

/// A borrowed map entity used as the subject of modifier queries.
#[derive(Clone, Copy, Debug)]
pub enum EntityRef<'a> {
    Unit(&'a Unit),
    Building(&'a Building),
}

impl<'a> EntityRef<'a> {
    #[must_use]
    pub fn as_unit(self) -> Option<&'a Unit> {
        match self {
            EntityRef::Unit(unit) => Some(unit),
            EntityRef::Building(_) => None,
        }
    }

    #[must_use]
    pub fn player(self) -> PlayerId {
        match self {
            EntityRef::Unit(unit) => unit.player,
            EntityRef::Building(building) => building.player,
        }
    }
}

impl<'a> From<&'a Unit> for EntityRef<'a> {
    fn from(unit: &'a Unit) -> Self {
        EntityRef::Unit(unit)
    }
}

impl<'a> From<&'a Building> for EntityRef<'a> {
    fn from(building: &'a Building) -> Self {
        EntityRef::Building(building)
    }
}
