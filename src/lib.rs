//! # tactics-rules
//!
//! The rules layer of a turn-based tactics game: what skills do to units,
//! what happens when a player activates a power, and when a scenario
//! objective is met.
//!
//! ## Design Principles
//!
//! 1. **Pure Functions Over Snapshots**: Every query takes an immutable
//!    `Snapshot` and every transition returns a new one. Nothing here keeps
//!    state between calls.
//!
//! 2. **Static Catalogs**: Skill configuration and the modifier catalog are
//!    built once per process and shared read-only.
//!
//! 3. **Exact Arithmetic**: Modifiers are stored as integer hundredths, so
//!    aggregation is independent of the order skills were acquired in.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) snapshot clones via `im-rs`, so
//!   before/after snapshots are cheap to keep around for evaluation.
//!
//! - **Typed Errors**: Validation failures are `thiserror` enums carrying a
//!   severity and a stable error code.
//!
//! ## Modules
//!
//! - `core`: Positions, units, buildings, players, snapshots, actions,
//!   configuration and errors
//! - `skills`: Skill ids and configuration, the modifier catalog and
//!   aggregation queries
//! - `powers`: Power resolution (heal, recover, convert, damage) and unit
//!   naming
//! - `objectives`: Objective lists, validation and the evaluator
//!
//! ## Example
//!
//! ```
//! use tactics_rules::core::{Player, PlayerId, Snapshot, Unit, UnitType, Vector};
//! use tactics_rules::powers::PowerResolver;
//! use tactics_rules::skills::Skill;
//!
//! let medic = Unit::new(UnitType::Infantry, PlayerId::new(1)).with_health(40);
//! let snapshot = Snapshot::new([Player::new(PlayerId::new(1)), Player::new(PlayerId::new(2))])
//!     .with_unit(Vector::new(1, 1), medic);
//!
//! let healed = PowerResolver::default().apply(Skill::HealInfantryMedicPower, &snapshot);
//! assert_eq!(healed.unit_at(Vector::new(1, 1)).map(|unit| unit.health), Some(90));
//! ```

pub mod core;
pub mod objectives;
pub mod powers;
pub mod skills;

// Re-export commonly used types
pub use crate::core::{
    Action, Building, BuildingType, ErrorSeverity, Label, LabelSet, MovementType, Player,
    PlayerId, PlayerStats, RulesConfig, RulesError, Snapshot, TacticsError, TileType, Unit,
    UnitType, Vector, MAX_HEALTH,
};

pub use crate::skills::{
    attack_modifier, defense_modifier, unit_cost, ActiveUnitTypes, ModifierCatalog, Skill,
    SkillConfig, SkillSet,
};

pub use crate::powers::{FullVision, PowerResolver, Vision};

pub use crate::objectives::{
    check_objectives, Criteria, Objective, ObjectiveError, ObjectiveId, Objectives,
};
