//! Skill aggregation.
//!
//! Combines a player's passive skills and active (charged) skills into
//! net modifiers, costs, ranges and movement radii.
//!
//! ## Modifiers
//!
//! For each skill the catalog effect is summed over the flat, unit-type,
//! movement-type, terrain and leader tables. Passive skills read the
//! `Regular` tier and active skills the `Power` tier; the two totals are
//! added. Results are fractions: `0.15` means +15%.
//!
//! ## Costs
//!
//! `unit_cost` returns `None` when a held skill forbids the unit. The
//! cheapest override among the held skills replaces the base cost before
//! the cost modifier applies.

use im::OrdSet;
use serde::{Deserialize, Serialize};

use super::catalog::{AttackRange, ModifierCatalog, ModifierFamily, Tier};
use super::set::SkillSet;
use super::skill::Skill;
use crate::core::{
    BuildingType, EntityRef, MovementType, PlayerId, RulesConfig, Snapshot, TileType, UnitType,
    Vector,
};

fn tier_total(
    family: ModifierFamily,
    tier: Tier,
    entity: Option<EntityRef<'_>>,
    tile: Option<TileType>,
    skills: &SkillSet,
) -> i32 {
    let tables = ModifierCatalog::global().tables(family, tier);
    skills.iter().map(|skill| tables.effect(skill, entity, tile)).sum()
}

/// Net effect of both skill sets, in hundredths.
fn family_total(
    family: ModifierFamily,
    entity: Option<EntityRef<'_>>,
    tile: Option<TileType>,
    skills: &SkillSet,
    active_skills: &SkillSet,
) -> i32 {
    tier_total(family, Tier::Regular, entity, tile, skills)
        + tier_total(family, Tier::Power, entity, tile, active_skills)
}

fn to_fraction(hundredths: i32) -> f64 {
    f64::from(hundredths) / 100.0
}

/// Net attack modifier of `entity` standing on `tile`.
///
/// ## Example
///
/// ```
/// use tactics_rules::skills::{attack_modifier, Skill, SkillSet};
///
/// let passive = SkillSet::from_iter([Skill::AttackIncreaseMinor]);
/// let active = SkillSet::from_iter([Skill::AttackIncreaseMinor]);
/// assert_eq!(attack_modifier(None, None, &passive, &active), 0.25);
/// ```
#[must_use]
pub fn attack_modifier(
    entity: Option<EntityRef<'_>>,
    tile: Option<TileType>,
    skills: &SkillSet,
    active_skills: &SkillSet,
) -> f64 {
    to_fraction(family_total(ModifierFamily::Attack, entity, tile, skills, active_skills))
}

/// Net defense modifier of `entity` standing on `tile`.
#[must_use]
pub fn defense_modifier(
    entity: Option<EntityRef<'_>>,
    tile: Option<TileType>,
    skills: &SkillSet,
    active_skills: &SkillSet,
) -> f64 {
    to_fraction(family_total(ModifierFamily::Defense, entity, tile, skills, active_skills))
}

/// Net unit purchase cost modifier.
#[must_use]
pub fn unit_cost_modifier(skills: &SkillSet, active_skills: &SkillSet) -> f64 {
    to_fraction(family_total(ModifierFamily::UnitCost, None, None, skills, active_skills))
}

/// Flat effect of a single skill in one family and tier.
#[must_use]
pub fn skill_effect(family: ModifierFamily, tier: Tier, skill: Skill) -> f64 {
    to_fraction(ModifierCatalog::global().tables(family, tier).flat(skill))
}

// === Costs ===

/// Purchase cost of `unit_type`, or `None` if a held skill forbids it.
///
/// With no passive skills the base cost is returned unchanged.
#[must_use]
pub fn unit_cost(
    unit_type: UnitType,
    base: u32,
    skills: &SkillSet,
    active_skills: &SkillSet,
) -> Option<u32> {
    if skills.is_empty() {
        return Some(base);
    }

    let catalog = ModifierCatalog::global();
    if skills.iter().any(|skill| catalog.blocks(skill, unit_type)) {
        return None;
    }

    let cost = skills
        .iter()
        .filter_map(|skill| catalog.unit_cost(unit_type, skill))
        .min()
        .unwrap_or(base);

    let percent = 100 + i64::from(family_total(
        ModifierFamily::UnitCost,
        None,
        None,
        skills,
        active_skills,
    ));
    // Rounded up.
    let total = (i64::from(cost) * percent.max(0) + 99) / 100;
    Some(u32::try_from(total).unwrap_or(u32::MAX))
}

/// Purchase cost of `building_type` with the default configuration.
#[must_use]
pub fn building_cost(
    building_type: BuildingType,
    base: u32,
    skills: &SkillSet,
    active_skills: &SkillSet,
) -> u32 {
    building_cost_with_config(&RulesConfig::default(), building_type, base, skills, active_skills)
}

/// Purchase cost of `building_type`.
///
/// An active `UnlockPowerStation` fixes the Power Station price before any
/// other rule applies.
#[must_use]
pub fn building_cost_with_config(
    config: &RulesConfig,
    building_type: BuildingType,
    base: u32,
    skills: &SkillSet,
    active_skills: &SkillSet,
) -> u32 {
    if building_type == BuildingType::PowerStation
        && active_skills.contains(Skill::UnlockPowerStation)
    {
        return config.power_station_cost;
    }

    let catalog = ModifierCatalog::global();
    skills
        .iter()
        .filter_map(|skill| catalog.building_cost(building_type, skill))
        .min()
        .unwrap_or(base)
}

// === Unlocks ===

/// Whether `skills` unlock `unit_type` for purchase.
#[must_use]
pub fn has_unlocked_unit(unit_type: UnitType, skills: &SkillSet) -> bool {
    if unit_type == UnitType::Zombie && skills.contains(Skill::UnlockZombie) {
        return true;
    }
    let catalog = ModifierCatalog::global();
    skills
        .iter()
        .any(|skill| catalog.unit_cost(unit_type, skill).is_some())
}

/// Whether `skills` unlock `building_type` for construction.
#[must_use]
pub fn has_unlocked_building(building_type: BuildingType, skills: &SkillSet) -> bool {
    if building_type == BuildingType::PowerStation {
        return skills.contains(Skill::UnlockPowerStation);
    }
    let catalog = ModifierCatalog::global();
    skills
        .iter()
        .any(|skill| catalog.building_cost(building_type, skill).is_some())
}

/// Unit types `skill` forbids buying.
#[must_use]
pub fn blocked_units(skill: Skill) -> Vec<UnitType> {
    ModifierCatalog::global().blocked_units(skill).into_vec()
}

// === Range and Radius ===

/// Attack range of `unit_type`.
///
/// A power override wins over a passive override, which wins over `base`.
#[must_use]
pub fn unit_range(
    unit_type: UnitType,
    base: AttackRange,
    skills: &SkillSet,
    active_skills: &SkillSet,
) -> AttackRange {
    let catalog = ModifierCatalog::global();
    let find = |tier: Tier, set: &SkillSet| {
        set.iter()
            .find_map(|skill| catalog.range(tier, unit_type, skill))
    };
    find(Tier::Power, active_skills)
        .or_else(|| find(Tier::Regular, skills))
        .unwrap_or(base)
}

/// Movement radius of `unit_type`: `base` plus every passive and power
/// bonus.
#[must_use]
pub fn unit_radius(
    unit_type: UnitType,
    base: u8,
    skills: &SkillSet,
    active_skills: &SkillSet,
) -> u8 {
    let catalog = ModifierCatalog::global();
    let movement = unit_type.movement_type();
    let bonus = |tier: Tier, set: &SkillSet| -> u8 {
        set.iter()
            .map(|skill| catalog.radius(tier, movement, skill))
            .fold(0, u8::saturating_add)
    };
    base.saturating_add(bonus(Tier::Regular, skills))
        .saturating_add(bonus(Tier::Power, active_skills))
}

// === Power Queries ===

#[must_use]
pub fn has_counter_attack_skill(skills: &SkillSet) -> bool {
    skills.contains(Skill::CounterAttackPower)
}

#[must_use]
pub fn is_recovery_skill(skill: Skill) -> bool {
    skill == Skill::RecoverAirUnits
}

/// Movement types healed by the power of `skill`, sorted.
#[must_use]
pub fn heal_unit_types(skill: Skill) -> Option<Vec<MovementType>> {
    ModifierCatalog::global()
        .heal_movement_types(skill)
        .map(|types| {
            let mut types: Vec<_> = types.iter().copied().collect();
            types.sort_unstable();
            types
        })
}

#[must_use]
pub fn skill_power_damage(skill: Skill) -> u8 {
    ModifierCatalog::global().power_damage(skill)
}

// === Active Unit Highlighting ===

/// Units affected by a player's active skills.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActiveUnitTypes {
    /// Every unit of the player.
    All,
    /// Units matching any of the movement types, unit types or positions.
    Selected {
        movement_types: OrdSet<MovementType>,
        unit_types: OrdSet<UnitType>,
        positions: OrdSet<Vector>,
    },
}

impl Default for ActiveUnitTypes {
    fn default() -> Self {
        ActiveUnitTypes::Selected {
            movement_types: OrdSet::new(),
            unit_types: OrdSet::new(),
            positions: OrdSet::new(),
        }
    }
}

impl ActiveUnitTypes {
    /// Whether the unit of `unit_type` at `position` is affected.
    #[must_use]
    pub fn contains(&self, position: Vector, unit_type: UnitType) -> bool {
        match self {
            ActiveUnitTypes::All => true,
            ActiveUnitTypes::Selected {
                movement_types,
                unit_types,
                positions,
            } => {
                positions.contains(&position)
                    || unit_types.contains(&unit_type)
                    || movement_types.contains(&unit_type.movement_type())
            }
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            ActiveUnitTypes::All => false,
            ActiveUnitTypes::Selected {
                movement_types,
                unit_types,
                positions,
            } => movement_types.is_empty() && unit_types.is_empty() && positions.is_empty(),
        }
    }
}

/// Units affected by the active skills of `player`.
#[must_use]
pub fn active_unit_types(snapshot: &Snapshot, player: PlayerId) -> ActiveUnitTypes {
    let Some(active_skills) = snapshot.player(player).map(|p| &p.active_skills) else {
        return ActiveUnitTypes::default();
    };

    let mut movement_types = OrdSet::new();
    let mut unit_types = OrdSet::new();
    let mut positions = OrdSet::new();

    for skill in active_skills {
        if affects_all_units(skill) {
            return ActiveUnitTypes::All;
        }
        collect_active(
            snapshot,
            player,
            skill,
            &mut movement_types,
            &mut unit_types,
            &mut positions,
        );
    }

    ActiveUnitTypes::Selected {
        movement_types,
        unit_types,
        positions,
    }
}

fn affects_all_units(skill: Skill) -> bool {
    let catalog = ModifierCatalog::global();
    skill == Skill::CounterAttackPower
        || catalog.tables(ModifierFamily::Attack, Tier::Power).flat(skill) > 0
        || catalog.tables(ModifierFamily::Defense, Tier::Power).flat(skill) > 0
}

fn collect_active(
    snapshot: &Snapshot,
    player: PlayerId,
    skill: Skill,
    movement_types: &mut OrdSet<MovementType>,
    unit_types: &mut OrdSet<UnitType>,
    positions: &mut OrdSet<Vector>,
) {
    let catalog = ModifierCatalog::global();
    let owned = || {
        snapshot
            .units()
            .iter()
            .filter(move |(_, unit)| snapshot.matches_player(unit.player, player))
    };

    if skill == Skill::RecoverAirUnits {
        positions.extend(
            owned()
                .filter(|(_, unit)| unit.movement_type().is_air() && unit.completed)
                .map(|(position, _)| *position),
        );
        return;
    }

    positions.extend(
        owned()
            .filter(|(_, unit)| catalog.range(Tier::Power, unit.unit_type, skill).is_some())
            .map(|(position, _)| *position),
    );

    let special = match skill {
        Skill::Sabotage => Some(UnitType::Saboteur),
        _ => catalog.conversion(skill).map(|(from, _)| from),
    };
    if let Some(unit_type) = special {
        positions.extend(
            owned()
                .filter(|(_, unit)| unit.unit_type == unit_type)
                .map(|(position, _)| *position),
        );
        return;
    }

    if skill == Skill::BuyUnitCommander {
        positions.extend(
            owned()
                .filter(|(_, unit)| unit.leader)
                .map(|(position, _)| *position),
        );
        return;
    }

    let attack = catalog.tables(ModifierFamily::Attack, Tier::Power);
    unit_types.extend(attack.unit_keys(skill));
    movement_types.extend(attack.movement_keys(skill));
    movement_types.extend(catalog.skill_unit_movement(skill, Tier::Power).into_keys());

    if attack.has_tile_effects(skill) {
        positions.extend(
            owned()
                .filter(|(position, unit)| {
                    attack.tile(skill, snapshot.tile_at(**position).group(), unit.movement_type()) != 0
                })
                .map(|(position, _)| *position),
        );
    }
}
