//! Skills: identifiers, configuration, the modifier catalog and
//! aggregation of a player's skills into net modifiers.
//!
//! ## Layout
//!
//! - `skill`: the `Skill` enum and its static `SkillConfig`
//! - `set`: `SkillSet`, the small ordered set players hold
//! - `catalog`: `ModifierCatalog`, every numeric effect by family and tier
//! - `aggregate`: modifier, cost, unlock, range and radius queries

pub mod aggregate;
pub mod catalog;
pub mod set;
pub mod skill;

pub use aggregate::{
    active_unit_types, attack_modifier, blocked_units, building_cost, building_cost_with_config,
    defense_modifier, has_counter_attack_skill, has_unlocked_building, has_unlocked_unit,
    heal_unit_types, is_recovery_skill, skill_effect, skill_power_damage, unit_cost,
    unit_cost_modifier, unit_radius, unit_range, ActiveUnitTypes,
};
pub use catalog::{AttackRange, FamilyTables, ModifierCatalog, ModifierFamily, Tier};
pub use set::SkillSet;
pub use skill::{obtainable_skills, skill_config, unobtainable_skills, Skill, SkillConfig};
