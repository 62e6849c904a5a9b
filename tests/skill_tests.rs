//! Skill aggregation tests.
//!
//! These tests exercise the public skill queries the way the battle and
//! shop screens call them: a player's passive and active skill sets applied
//! to units, buildings and terrain.

use proptest::prelude::*;
use strum::IntoEnumIterator;
use tactics_rules::core::{
    Building, BuildingType, EntityRef, MovementType, PlayerId, RulesConfig, TileType, Unit,
    UnitType,
};
use tactics_rules::skills::{
    attack_modifier, building_cost, building_cost_with_config, defense_modifier,
    has_unlocked_unit, heal_unit_types, obtainable_skills, unit_cost, unit_cost_modifier,
    unit_radius, unit_range, unobtainable_skills, Skill, SkillSet,
};

fn set(skills: &[Skill]) -> SkillSet {
    skills.iter().copied().collect()
}

fn all_skills() -> Vec<Skill> {
    Skill::iter().collect()
}

/// Test that a soldier in a forest stacks flat, terrain and power bonuses.
#[test]
fn test_forest_infantry_attack() {
    let unit = Unit::new(UnitType::Infantry, PlayerId::new(1));
    let passive = set(&[Skill::AttackIncreaseMinor, Skill::UnitInfantryForestAttackAndDefenseIncrease]);
    let active = set(&[Skill::AttackIncreaseMinor]);

    let forest = attack_modifier(Some(EntityRef::Unit(&unit)), Some(TileType::Forest), &passive, &active);
    let plain = attack_modifier(Some(EntityRef::Unit(&unit)), Some(TileType::Plain), &passive, &active);

    assert_eq!(forest, 0.55);
    assert_eq!(plain, 0.25);
}

/// Test that buildings only take flat effects.
#[test]
fn test_building_defense() {
    let building = Building::new(BuildingType::Factory, PlayerId::new(1));
    let skills = set(&[Skill::DefenseIncreaseMinor, Skill::MovementIncreaseGroundUnitDefenseDecrease]);

    assert_eq!(
        defense_modifier(Some(EntityRef::Building(&building)), None, &skills, &SkillSet::new()),
        0.05
    );
}

/// Test that a skill's power tier reads only the active set.
#[test]
fn test_power_tier_needs_activation() {
    let skills = set(&[Skill::DecreaseUnitCostAttackAndDefenseDecreaseMinor]);

    assert_eq!(unit_cost_modifier(&skills, &SkillSet::new()), -0.1);
    assert_eq!(unit_cost_modifier(&skills, &skills), -0.4);
}

/// Test the shop price of a skill-unlocked unit.
#[test]
fn test_unlocked_unit_price() {
    let skills = set(&[Skill::BuyUnitSuperTank]);

    assert!(has_unlocked_unit(UnitType::SuperTank, &skills));
    assert!(!has_unlocked_unit(UnitType::SuperTank, &SkillSet::new()));
    assert_eq!(unit_cost(UnitType::SuperTank, 1500, &skills, &SkillSet::new()), Some(900));
}

/// Test that the cheapest override wins before the modifier applies.
#[test]
fn test_cheapest_override() {
    let skills = set(&[Skill::BuyUnitZombieDefenseDecreaseMajor, Skill::HealVehiclesAttackDecrease]);

    // 250 * 0.8
    assert_eq!(unit_cost(UnitType::Zombie, 300, &skills, &SkillSet::new()), Some(200));
    assert_eq!(unit_cost(UnitType::Pioneer, 150, &skills, &SkillSet::new()), None);
}

/// Test that a configured Power Station price applies only while the
/// power is active.
#[test]
fn test_power_station_price() {
    let config = RulesConfig::default().with_power_station_cost(250);
    let skills = set(&[Skill::UnlockPowerStation]);

    assert_eq!(
        building_cost_with_config(&config, BuildingType::PowerStation, 1000, &skills, &skills),
        250
    );
    assert_eq!(
        building_cost(BuildingType::PowerStation, 1000, &skills, &SkillSet::new()),
        1000
    );
}

/// Test range and radius for an artillery player.
#[test]
fn test_artillery_range_and_radius() {
    let skills = set(&[Skill::ArtilleryRangeIncrease, Skill::MovementIncreaseGroundUnitDefenseDecrease]);

    assert_eq!(unit_range(UnitType::Artillery, (2, 5), &skills, &SkillSet::new()), (2, 5));
    assert_eq!(unit_range(UnitType::Artillery, (2, 5), &skills, &skills), (2, 6));
    assert_eq!(unit_radius(UnitType::Artillery, 5, &skills, &skills), 7);
}

/// Test that heal targets are reported for heal powers only.
#[test]
fn test_heal_unit_types() {
    assert_eq!(
        heal_unit_types(Skill::HealInfantryMedicPower),
        Some(vec![MovementType::Soldier, MovementType::AirInfantry])
    );
    assert_eq!(heal_unit_types(Skill::AttackIncreaseMinor), None);
}

/// Test that the shop lists partition every skill.
#[test]
fn test_obtainable_partition() {
    let obtainable: Vec<Skill> = obtainable_skills().collect();
    let unobtainable: Vec<Skill> = unobtainable_skills().collect();

    assert_eq!(obtainable.len() + unobtainable.len(), Skill::iter().count());
    assert!(obtainable.iter().all(|skill| !unobtainable.contains(skill)));
    assert!(obtainable.contains(&Skill::AttackIncreaseMinor));
    assert!(unobtainable.contains(&Skill::RecoverAirUnits));
}

fn skill_order() -> impl Strategy<Value = Vec<Skill>> {
    proptest::sample::subsequence(all_skills(), 0..8).prop_shuffle()
}

fn unit_type() -> impl Strategy<Value = UnitType> {
    proptest::sample::select(UnitType::iter().collect::<Vec<_>>())
}

fn tile_type() -> impl Strategy<Value = TileType> {
    proptest::sample::select(TileType::iter().collect::<Vec<_>>())
}

proptest! {
    /// Aggregated modifiers do not depend on acquisition order.
    #[test]
    fn test_modifiers_are_order_independent(
        passive in skill_order(),
        active in skill_order(),
        unit_type in unit_type(),
        tile in tile_type(),
        leader in any::<bool>(),
    ) {
        let mut unit = Unit::new(unit_type, PlayerId::new(1));
        unit.leader = leader;
        let entity = Some(EntityRef::Unit(&unit));

        let forward = (set(&passive), set(&active));
        let reversed: (SkillSet, SkillSet) = (
            passive.iter().rev().copied().collect(),
            active.iter().rev().copied().collect(),
        );

        prop_assert_eq!(
            attack_modifier(entity, Some(tile), &forward.0, &forward.1),
            attack_modifier(entity, Some(tile), &reversed.0, &reversed.1)
        );
        prop_assert_eq!(
            defense_modifier(entity, Some(tile), &forward.0, &forward.1),
            defense_modifier(entity, Some(tile), &reversed.0, &reversed.1)
        );
        prop_assert_eq!(
            unit_cost_modifier(&forward.0, &forward.1),
            unit_cost_modifier(&reversed.0, &reversed.1)
        );
        prop_assert_eq!(
            unit_cost(unit_type, 1000, &forward.0, &forward.1),
            unit_cost(unit_type, 1000, &reversed.0, &reversed.1)
        );
        prop_assert_eq!(
            unit_radius(unit_type, 3, &forward.0, &forward.1),
            unit_radius(unit_type, 3, &reversed.0, &reversed.1)
        );
    }

    /// Without passive skills the base price is charged, whatever is active.
    #[test]
    fn test_no_passive_skills_keeps_base_cost(
        active in skill_order(),
        unit_type in unit_type(),
        base in 0u32..5000,
    ) {
        prop_assert_eq!(unit_cost(unit_type, base, &SkillSet::new(), &set(&active)), Some(base));
    }

    /// Without a price override the cost moves in the direction of the
    /// cost modifier.
    #[test]
    fn test_unit_cost_follows_modifier_sign(
        passive in skill_order(),
        unit_type in unit_type(),
        base in 0u32..5000,
    ) {
        let skills = set(&passive);
        prop_assume!(!has_unlocked_unit(unit_type, &skills));

        if let Some(cost) = unit_cost(unit_type, base, &skills, &SkillSet::new()) {
            let modifier = unit_cost_modifier(&skills, &SkillSet::new());
            if modifier >= 0.0 {
                prop_assert!(cost >= base);
            }
            if modifier <= 0.0 {
                prop_assert!(cost <= base);
            }
        }
    }
}
