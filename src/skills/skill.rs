//! Skill identifiers and their static configuration.
//!
//! ## Skill
//!
//! Every skill has a stable numeric id (1-based) used by saved games and
//! the network layer. `Skill::try_from(u8)` converts raw ids and fails with
//! `RulesError::UnknownSkill` for ids that name no skill.
//!
//! ## SkillConfig
//!
//! Charge count, purchase cost and crystal requirement. The configuration
//! table has an entry for every skill; a missing entry is a fault.

use std::sync::OnceLock;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::core::RulesError;

/// A skill a player can hold passively and charge as a power.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Skill {
    AttackIncreaseMinor = 1,
    DefenseIncreaseMinor = 2,
    AttackIncreaseMajorDefenseDecreaseMajor = 3,
    BuyUnitCannon = 4,
    DecreaseUnitCostAttackAndDefenseDecreaseMinor = 5,
    UnitAbilitySniperImmediateAction = 6,
    MovementIncreaseGroundUnitDefenseDecrease = 7,
    UnitBattleShipMoveAndAct = 8,
    BuyUnitBrute = 9,
    BuyUnitSuperAPU = 10,
    BuyUnitZombieDefenseDecreaseMajor = 11,
    BuyUnitBazookaBear = 12,
    AttackAndDefenseIncreaseHard = 13,
    HealVehiclesAttackDecrease = 14,
    ArtilleryRangeIncrease = 15,
    HealInfantryMedicPower = 16,
    NoUnitRestrictions = 17,
    CounterAttackPower = 18,
    AttackAndDefenseDecreaseEasy = 19,
    UnitInfantryForestAttackAndDefenseIncrease = 20,
    UnitRailDefenseIncreasePowerAttackIncrease = 21,
    BuyUnitAIU = 22,
    BuyUnitCommander = 23,
    RecoverAirUnits = 24,
    BuyUnitAlien = 25,
    BuyUnitOctopus = 26,
    BuyUnitSuperTank = 27,
    BuyUnitAcidBomber = 28,
    BuyUnitDinosaur = 29,
    Sabotage = 30,
    SpawnUnitInfernoJetpack = 31,
    UnlockZombie = 32,
    UnlockPowerStation = 33,
    BuyUnitDragon = 34,
    BuyUnitOgre = 35,
    BuyUnitBear = 36,
}

impl Skill {
    /// Stable numeric id.
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Static configuration of this skill.
    pub fn config(self) -> Result<&'static SkillConfig, RulesError> {
        skill_config(self)
    }

    /// Whether the skill can be bought in the shop.
    ///
    /// Skills without a purchase cost are never obtainable; a few priced
    /// skills are reserved for scripted campaigns.
    #[must_use]
    pub fn is_obtainable(self) -> bool {
        !matches!(
            self,
            Skill::BuyUnitZombieDefenseDecreaseMajor | Skill::RecoverAirUnits | Skill::BuyUnitAIU
        ) && matches!(skill_config(self), Ok(config) if config.cost.is_some())
    }
}

impl TryFrom<u8> for Skill {
    type Error = RulesError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Skill::iter()
            .find(|skill| skill.id() == id)
            .ok_or(RulesError::UnknownSkill(id))
    }
}

/// Skills that can be bought, in id order.
pub fn obtainable_skills() -> impl Iterator<Item = Skill> {
    Skill::iter().filter(|skill| skill.is_obtainable())
}

/// Skills that can never be bought, in id order.
pub fn unobtainable_skills() -> impl Iterator<Item = Skill> {
    Skill::iter().filter(|skill| !skill.is_obtainable())
}

/// Static configuration of a skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillConfig {
    /// Charges needed to activate the power. `None` for skills without one.
    pub charges: Option<u8>,

    /// Shop price. `None` for skills that are never sold.
    pub cost: Option<u32>,

    /// Whether activating the power needs a crystal.
    pub requires_crystal: bool,
}

impl SkillConfig {
    const fn new(charges: Option<u8>, cost: Option<u32>) -> Self {
        Self {
            charges,
            cost,
            requires_crystal: false,
        }
    }

    const fn with_crystal(mut self) -> Self {
        self.requires_crystal = true;
        self
    }

    /// Whether the skill has an activatable power.
    #[must_use]
    pub const fn has_power(&self) -> bool {
        self.charges.is_some()
    }
}

/// Configuration for `skill`.
///
/// Fails with `RulesError::MissingSkillConfig` if the table has no entry.
pub fn skill_config(skill: Skill) -> Result<&'static SkillConfig, RulesError> {
    static CONFIG: OnceLock<FxHashMap<Skill, SkillConfig>> = OnceLock::new();
    CONFIG
        .get_or_init(build_config_table)
        .get(&skill)
        .ok_or(RulesError::MissingSkillConfig(skill.id()))
}

fn build_config_table() -> FxHashMap<Skill, SkillConfig> {
    use Skill::*;

    [
        (AttackIncreaseMinor, SkillConfig::new(Some(3), Some(300))),
        (DefenseIncreaseMinor, SkillConfig::new(Some(2), Some(300))),
        (AttackIncreaseMajorDefenseDecreaseMajor, SkillConfig::new(Some(6), Some(800))),
        (BuyUnitCannon, SkillConfig::new(None, Some(1000))),
        (BuyUnitBrute, SkillConfig::new(Some(5), Some(1000))),
        (DecreaseUnitCostAttackAndDefenseDecreaseMinor, SkillConfig::new(Some(3), Some(600))),
        (UnitAbilitySniperImmediateAction, SkillConfig::new(Some(3), Some(2000))),
        (MovementIncreaseGroundUnitDefenseDecrease, SkillConfig::new(Some(2), Some(2500))),
        (UnitBattleShipMoveAndAct, SkillConfig::new(Some(5), Some(2000))),
        (BuyUnitSuperAPU, SkillConfig::new(Some(3), Some(3000))),
        (BuyUnitZombieDefenseDecreaseMajor, SkillConfig::new(None, Some(1500))),
        (BuyUnitBazookaBear, SkillConfig::new(Some(6), Some(2000))),
        (AttackAndDefenseIncreaseHard, SkillConfig::new(None, None)),
        (HealVehiclesAttackDecrease, SkillConfig::new(Some(3), Some(1000))),
        (ArtilleryRangeIncrease, SkillConfig::new(Some(3), Some(1500))),
        (HealInfantryMedicPower, SkillConfig::new(Some(4), Some(1000))),
        (NoUnitRestrictions, SkillConfig::new(None, None)),
        (CounterAttackPower, SkillConfig::new(Some(3), Some(1500))),
        (AttackAndDefenseDecreaseEasy, SkillConfig::new(None, None)),
        (UnitInfantryForestAttackAndDefenseIncrease, SkillConfig::new(Some(3), Some(2000))),
        (UnitRailDefenseIncreasePowerAttackIncrease, SkillConfig::new(Some(4), Some(1500))),
        (BuyUnitAIU, SkillConfig::new(None, Some(1500))),
        (BuyUnitCommander, SkillConfig::new(Some(4), Some(1500))),
        (RecoverAirUnits, SkillConfig::new(Some(5), Some(3000))),
        (BuyUnitAlien, SkillConfig::new(Some(4), Some(1500))),
        (BuyUnitOctopus, SkillConfig::new(Some(5), Some(1500))),
        (BuyUnitSuperTank, SkillConfig::new(Some(4), Some(1500))),
        (BuyUnitAcidBomber, SkillConfig::new(Some(3), Some(1500))),
        (BuyUnitDinosaur, SkillConfig::new(None, Some(1500))),
        (Sabotage, SkillConfig::new(Some(5), Some(1500))),
        (SpawnUnitInfernoJetpack, SkillConfig::new(Some(5), None).with_crystal()),
        (UnlockZombie, SkillConfig::new(Some(10), Some(1500))),
        (UnlockPowerStation, SkillConfig::new(Some(4), Some(600))),
        (BuyUnitDragon, SkillConfig::new(Some(5), Some(1500))),
        (BuyUnitOgre, SkillConfig::new(Some(3), Some(1500))),
        (BuyUnitBear, SkillConfig::new(Some(3), Some(1500))),
    ]
    .into_iter()
    .collect()
}
