//! Static modifier catalog.
//!
//! The `ModifierCatalog` holds every numeric effect a skill has on combat,
//! economy and movement. It is built once per process and only read
//! afterwards.
//!
//! ## Families and Tiers
//!
//! Attack, defense and unit-cost effects are grouped into a
//! `FamilyTables` per (`ModifierFamily`, `Tier`). A passive skill uses the
//! `Regular` tier; a charged, activated skill uses the `Power` tier.
//!
//! ## Units
//!
//! Effects are stored as integer hundredths (`15` means +15%). Summing
//! integers is exact, so aggregated modifiers never depend on the order in
//! which skills are visited.
//!
//! Every lookup returns zero (or `None` for overrides) when no entry
//! matches.

use std::sync::OnceLock;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::skill::Skill;
use crate::core::{BuildingType, EntityRef, MovementType, TileType, UnitType};

/// Inclusive attack range `(min, max)`.
pub type AttackRange = (u8, u8);

/// Modifier family for effect lookups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierFamily {
    Attack,
    Defense,
    UnitCost,
}

/// Whether a skill applies passively or as an activated power.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Regular,
    Power,
}

/// Effect tables of one modifier family and tier, in hundredths.
#[derive(Clone, Debug, Default)]
pub struct FamilyTables {
    flat: FxHashMap<Skill, i32>,
    by_unit: FxHashMap<(Skill, UnitType), i32>,
    by_movement: FxHashMap<(Skill, MovementType), i32>,
    by_tile: FxHashMap<(Skill, TileType, MovementType), i32>,
    leader: FxHashMap<Skill, i32>,
}

impl FamilyTables {
    /// Effect that applies regardless of the entity.
    #[must_use]
    pub fn flat(&self, skill: Skill) -> i32 {
        self.flat.get(&skill).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn unit(&self, skill: Skill, unit_type: UnitType) -> i32 {
        self.by_unit.get(&(skill, unit_type)).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn movement(&self, skill: Skill, movement: MovementType) -> i32 {
        self.by_movement.get(&(skill, movement)).copied().unwrap_or(0)
    }

    /// Effect for a movement type standing on a tile of `group`.
    #[must_use]
    pub fn tile(&self, skill: Skill, group: TileType, movement: MovementType) -> i32 {
        self.by_tile.get(&(skill, group, movement)).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn leader(&self, skill: Skill) -> i32 {
        self.leader.get(&skill).copied().unwrap_or(0)
    }

    /// Total effect of one skill on an optional entity standing on an
    /// optional tile.
    ///
    /// Buildings only receive the flat effect.
    #[must_use]
    pub fn effect(&self, skill: Skill, entity: Option<EntityRef<'_>>, tile: Option<TileType>) -> i32 {
        let mut total = self.flat(skill);
        if let Some(unit) = entity.and_then(EntityRef::as_unit) {
            let movement = unit.movement_type();
            total += self.unit(skill, unit.unit_type) + self.movement(skill, movement);
            if unit.leader {
                total += self.leader(skill);
            }
            if let Some(tile) = tile {
                total += self.tile(skill, tile.group(), movement);
            }
        }
        total
    }

    /// Unit types with an entry for `skill`.
    pub fn unit_keys(&self, skill: Skill) -> impl Iterator<Item = UnitType> + '_ {
        self.by_unit
            .keys()
            .filter(move |(key, _)| *key == skill)
            .map(|(_, unit_type)| *unit_type)
    }

    /// Movement types with an entry for `skill`.
    pub fn movement_keys(&self, skill: Skill) -> impl Iterator<Item = MovementType> + '_ {
        self.by_movement
            .keys()
            .filter(move |(key, _)| *key == skill)
            .map(|(_, movement)| *movement)
    }

    /// Whether `skill` has any terrain-dependent entry.
    #[must_use]
    pub fn has_tile_effects(&self, skill: Skill) -> bool {
        self.by_tile.keys().any(|(key, _, _)| *key == skill)
    }

    fn set_flat(&mut self, skill: Skill, value: i32) {
        self.flat.insert(skill, value);
    }

    fn set_unit(&mut self, skill: Skill, units: &[UnitType], value: i32) {
        for &unit_type in units {
            self.by_unit.insert((skill, unit_type), value);
        }
    }

    fn set_movement(&mut self, skill: Skill, movements: &[MovementType], value: i32) {
        for &movement in movements {
            self.by_movement.insert((skill, movement), value);
        }
    }

    fn set_tile(&mut self, skill: Skill, groups: &[TileType], movement: MovementType, value: i32) {
        for &group in groups {
            self.by_tile.insert((skill, group, movement), value);
        }
    }
}

/// Registry of every skill effect.
#[derive(Clone, Debug, Default)]
pub struct ModifierCatalog {
    attack: [FamilyTables; 2],
    defense: [FamilyTables; 2],
    unit_cost: [FamilyTables; 2],
    range: [FxHashMap<(UnitType, Skill), AttackRange>; 2],
    radius: [FxHashMap<(MovementType, Skill), u8>; 2],
    unit_costs: FxHashMap<(UnitType, Skill), u32>,
    building_costs: FxHashMap<(BuildingType, Skill), u32>,
    blocked_units: FxHashMap<Skill, FxHashSet<UnitType>>,
    heal: FxHashMap<Skill, FxHashSet<MovementType>>,
    conversions: FxHashMap<Skill, (UnitType, UnitType)>,
    power_damage: FxHashMap<Skill, u8>,
}

const fn tier_index(tier: Tier) -> usize {
    match tier {
        Tier::Regular => 0,
        Tier::Power => 1,
    }
}

impl ModifierCatalog {
    /// The process-wide catalog.
    #[must_use]
    pub fn global() -> &'static ModifierCatalog {
        static CATALOG: OnceLock<ModifierCatalog> = OnceLock::new();
        CATALOG.get_or_init(ModifierCatalog::build)
    }

    // === Lookups ===

    #[must_use]
    pub fn tables(&self, family: ModifierFamily, tier: Tier) -> &FamilyTables {
        let index = tier_index(tier);
        match family {
            ModifierFamily::Attack => &self.attack[index],
            ModifierFamily::Defense => &self.defense[index],
            ModifierFamily::UnitCost => &self.unit_cost[index],
        }
    }

    /// Range override of `unit_type` granted by `skill`.
    #[must_use]
    pub fn range(&self, tier: Tier, unit_type: UnitType, skill: Skill) -> Option<AttackRange> {
        self.range[tier_index(tier)].get(&(unit_type, skill)).copied()
    }

    /// Movement radius bonus for `movement` granted by `skill`.
    #[must_use]
    pub fn radius(&self, tier: Tier, movement: MovementType, skill: Skill) -> u8 {
        self.radius[tier_index(tier)]
            .get(&(movement, skill))
            .copied()
            .unwrap_or(0)
    }

    /// Purchase cost override of `unit_type` granted by `skill`.
    ///
    /// An override also unlocks the unit.
    #[must_use]
    pub fn unit_cost(&self, unit_type: UnitType, skill: Skill) -> Option<u32> {
        self.unit_costs.get(&(unit_type, skill)).copied()
    }

    #[must_use]
    pub fn building_cost(&self, building_type: BuildingType, skill: Skill) -> Option<u32> {
        self.building_costs.get(&(building_type, skill)).copied()
    }

    /// Whether `skill` forbids buying `unit_type`.
    #[must_use]
    pub fn blocks(&self, skill: Skill, unit_type: UnitType) -> bool {
        self.blocked_units
            .get(&skill)
            .is_some_and(|units| units.contains(&unit_type))
    }

    /// Movement types healed by the power of `skill`.
    #[must_use]
    pub fn heal_movement_types(&self, skill: Skill) -> Option<&FxHashSet<MovementType>> {
        self.heal.get(&skill)
    }

    /// Unit conversion `(from, to)` performed by the power of `skill`.
    #[must_use]
    pub fn conversion(&self, skill: Skill) -> Option<(UnitType, UnitType)> {
        self.conversions.get(&skill).copied()
    }

    /// Damage dealt to opponents by the power of `skill`. Zero for skills
    /// without a damage power.
    #[must_use]
    pub fn power_damage(&self, skill: Skill) -> u8 {
        self.power_damage.get(&skill).copied().unwrap_or(0)
    }

    // === Introspection ===

    /// Unit types whose cost `skill` overrides, with the new cost.
    ///
    /// Only passive skills change costs, so the power tier is always empty.
    #[must_use]
    pub fn skill_unit_costs(&self, skill: Skill, tier: Tier) -> FxHashMap<UnitType, u32> {
        match tier {
            Tier::Regular => self
                .unit_costs
                .iter()
                .filter(|((_, key), _)| *key == skill)
                .map(|((unit_type, _), cost)| (*unit_type, *cost))
                .collect(),
            Tier::Power => FxHashMap::default(),
        }
    }

    /// Movement types whose radius `skill` increases, with the bonus.
    #[must_use]
    pub fn skill_unit_movement(&self, skill: Skill, tier: Tier) -> FxHashMap<MovementType, u8> {
        self.radius[tier_index(tier)]
            .iter()
            .filter(|((_, key), _)| *key == skill)
            .map(|((movement, _), radius)| (*movement, *radius))
            .collect()
    }

    /// Unit types whose range `skill` overrides.
    #[must_use]
    pub fn unit_range_for_skill(&self, skill: Skill, tier: Tier) -> FxHashMap<UnitType, AttackRange> {
        self.range[tier_index(tier)]
            .iter()
            .filter(|((_, key), _)| *key == skill)
            .map(|((unit_type, _), range)| (*unit_type, *range))
            .collect()
    }

    /// Unit types `skill` forbids buying, sorted.
    #[must_use]
    pub fn blocked_units(&self, skill: Skill) -> SmallVec<[UnitType; 2]> {
        let mut units: SmallVec<[UnitType; 2]> = self
            .blocked_units
            .get(&skill)
            .map(|units| units.iter().copied().collect())
            .unwrap_or_default();
        units.sort_unstable();
        units
    }

    // === Construction ===

    fn build() -> Self {
        use MovementType as M;
        use Skill::*;
        use TileType as T;
        use UnitType as U;

        let mut catalog = ModifierCatalog::default();
        let regular = tier_index(Tier::Regular);
        let power = tier_index(Tier::Power);

        // Attack, passive.
        let attack = &mut catalog.attack[regular];
        attack.set_flat(AttackIncreaseMinor, 5);
        attack.set_flat(AttackIncreaseMajorDefenseDecreaseMajor, 15);
        attack.set_flat(DecreaseUnitCostAttackAndDefenseDecreaseMinor, -7);
        attack.set_flat(AttackAndDefenseIncreaseHard, 10);
        attack.set_flat(HealVehiclesAttackDecrease, -15);
        attack.set_flat(AttackAndDefenseDecreaseEasy, -10);
        attack.set_unit(ArtilleryRangeIncrease, &[U::Artillery, U::HeavyArtillery, U::Cannon], 10);
        attack.set_unit(Sabotage, &[U::Saboteur], 50);
        attack.set_tile(UnitInfantryForestAttackAndDefenseIncrease, &[T::Forest], M::Soldier, 30);
        attack.set_tile(UnitInfantryForestAttackAndDefenseIncrease, &[T::Forest], M::HeavySoldier, 30);
        attack.set_tile(BuyUnitBear, &[T::Forest, T::Mountain], M::Soldier, 15);

        // Attack, power.
        let attack = &mut catalog.attack[power];
        attack.set_flat(AttackIncreaseMinor, 20);
        attack.set_flat(AttackIncreaseMajorDefenseDecreaseMajor, 35);
        attack.set_flat(HealVehiclesAttackDecrease, 30);
        attack.set_flat(RecoverAirUnits, -30);
        attack.set_unit(BuyUnitBazookaBear, &[U::BazookaBear], 50);
        attack.set_unit(ArtilleryRangeIncrease, &[U::Artillery, U::HeavyArtillery, U::Cannon], 20);
        attack.set_unit(HealInfantryMedicPower, &[U::Medic], 250);
        attack.set_movement(UnitBattleShipMoveAndAct, &[M::Ship], 50);
        attack.set_movement(BuyUnitBrute, &[M::Soldier], 50);
        attack.set_movement(BuyUnitSuperAPU, &[M::HeavySoldier], 50);
        attack.set_movement(HealInfantryMedicPower, &[M::AirInfantry, M::Soldier], 20);
        attack.set_tile(UnitRailDefenseIncreasePowerAttackIncrease, &[T::RailTrack], M::Soldier, 30);
        attack.set_tile(UnitRailDefenseIncreasePowerAttackIncrease, &[T::RailTrack], M::HeavySoldier, 30);
        attack.set_tile(UnitRailDefenseIncreasePowerAttackIncrease, &[T::RailTrack], M::Rail, 10);
        attack.set_tile(BuyUnitOgre, &[T::Forest, T::Mountain], M::Soldier, 15);
        attack.set_tile(BuyUnitSuperTank, &[T::Street], M::Tread, 30);
        attack.leader.insert(BuyUnitCommander, 100);

        // Defense, passive.
        let defense = &mut catalog.defense[regular];
        defense.set_flat(AttackIncreaseMajorDefenseDecreaseMajor, -20);
        defense.set_flat(DefenseIncreaseMinor, 5);
        defense.set_flat(DecreaseUnitCostAttackAndDefenseDecreaseMinor, -7);
        defense.set_flat(BuyUnitZombieDefenseDecreaseMajor, -50);
        defense.set_flat(AttackAndDefenseIncreaseHard, 10);
        defense.set_flat(AttackAndDefenseDecreaseEasy, -10);
        defense.set_flat(UnlockZombie, -50);
        defense.set_unit(Sabotage, &[U::Saboteur], 300);
        defense.set_movement(MovementIncreaseGroundUnitDefenseDecrease, &[M::Tires, M::Tread], -15);
        defense.set_movement(ArtilleryRangeIncrease, &[M::Tires, M::Tread], 20);
        defense.set_movement(UnitRailDefenseIncreasePowerAttackIncrease, &[M::Rail], 20);
        defense.set_tile(UnitInfantryForestAttackAndDefenseIncrease, &[T::Forest], M::Soldier, 10);
        defense.set_tile(UnitInfantryForestAttackAndDefenseIncrease, &[T::Forest], M::HeavySoldier, 10);

        // Defense, power.
        let defense = &mut catalog.defense[power];
        defense.set_flat(AttackIncreaseMajorDefenseDecreaseMajor, -50);
        defense.set_flat(DefenseIncreaseMinor, 50);

        // Unit cost.
        let unit_cost = &mut catalog.unit_cost[regular];
        unit_cost.set_flat(AttackIncreaseMajorDefenseDecreaseMajor, 15);
        unit_cost.set_flat(HealVehiclesAttackDecrease, -20);
        unit_cost.set_flat(DecreaseUnitCostAttackAndDefenseDecreaseMinor, -10);
        catalog.unit_cost[power].set_flat(DecreaseUnitCostAttackAndDefenseDecreaseMinor, -30);

        // Range overrides. Passive skills never change range.
        catalog.range[power].extend([
            ((U::Sniper, UnitAbilitySniperImmediateAction), (2, 5)),
            ((U::BazookaBear, BuyUnitBazookaBear), (1, 3)),
            ((U::Cannon, ArtilleryRangeIncrease), (2, 8)),
            ((U::HeavyArtillery, ArtilleryRangeIncrease), (3, 7)),
            ((U::Artillery, ArtilleryRangeIncrease), (2, 6)),
        ]);

        // Movement radius.
        catalog.radius[regular].extend([
            ((M::Tires, MovementIncreaseGroundUnitDefenseDecrease), 1),
            ((M::Tread, MovementIncreaseGroundUnitDefenseDecrease), 1),
            ((M::HeavySoldier, BuyUnitSuperAPU), 1),
        ]);
        catalog.radius[power].extend([
            ((M::Tires, MovementIncreaseGroundUnitDefenseDecrease), 1),
            ((M::Tread, MovementIncreaseGroundUnitDefenseDecrease), 1),
            ((M::Tread, BuyUnitSuperTank), 2),
            ((M::Soldier, BuyUnitOgre), 1),
        ]);

        catalog.unit_costs.extend([
            ((U::Cannon, BuyUnitCannon), 450),
            ((U::BazookaBear, BuyUnitBazookaBear), 800),
            ((U::Brute, BuyUnitBrute), 600),
            ((U::Zombie, BuyUnitZombieDefenseDecreaseMajor), 250),
            ((U::AIU, BuyUnitAIU), 500),
            ((U::Commander, BuyUnitCommander), 225),
            ((U::Alien, BuyUnitAlien), 450),
            ((U::Octopus, BuyUnitOctopus), 600),
            ((U::SuperTank, BuyUnitSuperTank), 900),
            ((U::AcidBomber, BuyUnitAcidBomber), 750),
            ((U::Dinosaur, BuyUnitDinosaur), 600),
            ((U::SuperAPU, BuyUnitSuperAPU), 650),
            ((U::Dragon, BuyUnitDragon), 500),
            ((U::Ogre, BuyUnitOgre), 350),
            ((U::Bear, BuyUnitBear), 300),
        ]);

        for skill in [
            BuyUnitBazookaBear,
            BuyUnitBear,
            BuyUnitDinosaur,
            BuyUnitDragon,
            BuyUnitOctopus,
            BuyUnitOgre,
            SpawnUnitInfernoJetpack,
        ] {
            catalog.building_costs.insert((BuildingType::Bar, skill), 600);
        }

        catalog.blocked_units.extend([
            (BuyUnitZombieDefenseDecreaseMajor, [U::Pioneer, U::Infantry].into_iter().collect()),
            (BuyUnitAIU, [U::Infantry].into_iter().collect()),
        ]);

        catalog.heal.extend([
            (HealVehiclesAttackDecrease, [M::Tires, M::Tread, M::Rail].into_iter().collect()),
            (HealInfantryMedicPower, [M::AirInfantry, M::Soldier].into_iter().collect()),
            (BuyUnitSuperTank, [M::Tread].into_iter().collect()),
        ]);

        catalog.conversions.extend([
            (SpawnUnitInfernoJetpack, (U::Flamethrower, U::InfernoJetpack)),
            (UnlockZombie, (U::Pioneer, U::Zombie)),
        ]);

        catalog.power_damage.extend([(BuyUnitOctopus, 20), (BuyUnitDragon, 80)]);

        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Building, PlayerId, Unit};

    fn catalog() -> &'static ModifierCatalog {
        ModifierCatalog::global()
    }

    #[test]
    fn test_missing_entries_are_zero() {
        let attack = catalog().tables(ModifierFamily::Attack, Tier::Regular);
        assert_eq!(attack.flat(Skill::BuyUnitCannon), 0);
        assert_eq!(attack.unit(Skill::BuyUnitCannon, UnitType::Cannon), 0);
        assert_eq!(catalog().radius(Tier::Power, MovementType::Air, Skill::BuyUnitOgre), 0);
        assert_eq!(catalog().range(Tier::Regular, UnitType::Sniper, Skill::Sabotage), None);
        assert_eq!(catalog().power_damage(Skill::Sabotage), 0);
    }

    #[test]
    fn test_flat_effects() {
        let attack_power = catalog().tables(ModifierFamily::Attack, Tier::Power);
        assert_eq!(attack_power.flat(Skill::AttackIncreaseMajorDefenseDecreaseMajor), 35);
        assert_eq!(attack_power.flat(Skill::RecoverAirUnits), -30);

        let defense = catalog().tables(ModifierFamily::Defense, Tier::Regular);
        assert_eq!(defense.flat(Skill::UnlockZombie), -50);

        let cost = catalog().tables(ModifierFamily::UnitCost, Tier::Power);
        assert_eq!(cost.flat(Skill::DecreaseUnitCostAttackAndDefenseDecreaseMinor), -30);
    }

    #[test]
    fn test_effect_combines_unit_movement_and_tile() {
        let medic = Unit::new(UnitType::Medic, PlayerId::new(1));
        let attack_power = catalog().tables(ModifierFamily::Attack, Tier::Power);

        // 2.5 for the medic plus 0.2 for soldiers.
        assert_eq!(
            attack_power.effect(Skill::HealInfantryMedicPower, Some((&medic).into()), None),
            270
        );

        let infantry = Unit::new(UnitType::Infantry, PlayerId::new(1));
        let attack = catalog().tables(ModifierFamily::Attack, Tier::Regular);
        assert_eq!(
            attack.effect(Skill::BuyUnitBear, Some((&infantry).into()), Some(TileType::ForestVariant2)),
            15
        );
        assert_eq!(
            attack.effect(Skill::BuyUnitBear, Some((&infantry).into()), Some(TileType::Plain)),
            0
        );
    }

    #[test]
    fn test_buildings_receive_flat_effect_only() {
        let bar = Building::new(BuildingType::Bar, PlayerId::new(1));
        let attack = catalog().tables(ModifierFamily::Attack, Tier::Regular);
        assert_eq!(
            attack.effect(Skill::AttackIncreaseMinor, Some((&bar).into()), Some(TileType::Forest)),
            5
        );
    }

    #[test]
    fn test_leader_bonus() {
        let attack_power = catalog().tables(ModifierFamily::Attack, Tier::Power);
        let leader = Unit::new(UnitType::Infantry, PlayerId::new(1)).as_leader();
        let regular = Unit::new(UnitType::Infantry, PlayerId::new(1));

        assert_eq!(attack_power.effect(Skill::BuyUnitCommander, Some((&leader).into()), None), 100);
        assert_eq!(attack_power.effect(Skill::BuyUnitCommander, Some((&regular).into()), None), 0);
    }

    #[test]
    fn test_introspection() {
        let costs = catalog().skill_unit_costs(Skill::BuyUnitBear, Tier::Regular);
        assert_eq!(costs.get(&UnitType::Bear), Some(&300));
        assert_eq!(costs.len(), 1);
        assert!(catalog().skill_unit_costs(Skill::BuyUnitBear, Tier::Power).is_empty());

        let movement = catalog().skill_unit_movement(Skill::BuyUnitSuperTank, Tier::Power);
        assert_eq!(movement.get(&MovementType::Tread), Some(&2));

        let ranges = catalog().unit_range_for_skill(Skill::ArtilleryRangeIncrease, Tier::Power);
        assert_eq!(ranges.len(), 3);
        assert_eq!(ranges.get(&UnitType::Cannon), Some(&(2, 8)));
        assert!(catalog()
            .unit_range_for_skill(Skill::ArtilleryRangeIncrease, Tier::Regular)
            .is_empty());

        assert_eq!(
            catalog().blocked_units(Skill::BuyUnitZombieDefenseDecreaseMajor).as_slice(),
            &[UnitType::Pioneer, UnitType::Infantry]
        );
        assert!(catalog().blocked_units(Skill::Sabotage).is_empty());
    }

    #[test]
    fn test_power_tables() {
        assert_eq!(catalog().power_damage(Skill::BuyUnitOctopus), 20);
        assert_eq!(catalog().power_damage(Skill::BuyUnitDragon), 80);
        assert_eq!(
            catalog().conversion(Skill::UnlockZombie),
            Some((UnitType::Pioneer, UnitType::Zombie))
        );
        let heal = catalog().heal_movement_types(Skill::BuyUnitSuperTank).unwrap();
        assert!(heal.contains(&MovementType::Tread));
        assert!(!heal.contains(&MovementType::Tires));
    }
}
