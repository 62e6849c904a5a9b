//! Core rules types: positions, entities, players, snapshots, actions,
//! configuration and errors.
//!
//! Everything here is a plain immutable value. The skill, power and
//! objective components build on these types and never mutate them in
//! place.

pub mod action;
pub mod config;
pub mod entity;
pub mod error;
pub mod player;
pub mod position;
pub mod state;

pub use action::Action;
pub use config::RulesConfig;
pub use entity::{
    Building, BuildingType, EntityRef, Label, LabelSet, MovementType, TileType, Unit, UnitType,
    MAX_HEALTH,
};
pub use error::{ErrorSeverity, RulesError, TacticsError};
pub use player::{Player, PlayerId, PlayerStats};
pub use position::Vector;
pub use state::Snapshot;
