//! Power resolution.
//!
//! Activating a charged skill applies its one-time effect to the board.
//! A single skill may trigger several cases; they run in a fixed order
//! over the accumulating snapshot:
//!
//! 1. Heal: owned units in the skill's heal set regain health
//! 2. Air recovery: owned air units that already acted may act again
//! 3. Conversion: owned units of one type become another and get fresh names
//! 4. Opponent damage: opposing units in the area of effect take damage
//!
//! Each case builds a complete replacement snapshot, so a power is never
//! partially applied.

use im::OrdMap;
use rustc_hash::FxHashSet;

use super::naming::assign_unit_names;
use super::vision::Vision;
use crate::core::{PlayerId, PlayerStats, RulesConfig, Snapshot, Unit, UnitType, Vector};
use crate::skills::{ModifierCatalog, Skill};

/// Applies activated powers using a rules configuration.
///
/// ## Example
///
/// ```
/// use tactics_rules::core::{Player, PlayerId, RulesConfig, Snapshot, Unit, UnitType, Vector};
/// use tactics_rules::powers::PowerResolver;
/// use tactics_rules::skills::Skill;
///
/// let p1 = PlayerId::new(1);
/// let snapshot = Snapshot::new([Player::new(p1), Player::new(PlayerId::new(2))])
///     .with_unit(Vector::new(1, 1), Unit::new(UnitType::SmallTank, p1).with_health(30));
///
/// let resolver = PowerResolver::new(RulesConfig::default().with_heal_amount(20));
/// let healed = resolver.apply(Skill::BuyUnitSuperTank, &snapshot);
/// assert_eq!(healed.unit_at(Vector::new(1, 1)).unwrap().health, 50);
/// ```
#[derive(Clone, Debug, Default)]
pub struct PowerResolver {
    config: RulesConfig,
}

impl PowerResolver {
    #[must_use]
    pub fn new(config: RulesConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Apply the power of `skill` for the snapshot's current player.
    #[must_use]
    pub fn apply(&self, skill: Skill, snapshot: &Snapshot) -> Snapshot {
        let player = snapshot.current_player();
        tracing::debug!("Applying power {} for {}", skill, player);

        let snapshot = self.heal(skill, player, snapshot.clone());
        let snapshot = recover_air_units(skill, player, snapshot);
        let snapshot = convert_units(skill, player, snapshot);
        self.damage_opponents(skill, player, snapshot)
    }

    /// Damage one opposing unit with the power of `skill`.
    ///
    /// Returns `None` for skills without a damage power. A unit brought to
    /// zero health is removed; the current player is credited with the
    /// damage and the whole stack as destroyed, and the owner loses the
    /// stack. A surviving unit only loses health.
    #[must_use]
    pub fn opponent_effect(
        &self,
        skill: Skill,
        snapshot: &Snapshot,
        position: Vector,
        unit: &Unit,
    ) -> Option<Snapshot> {
        let damage = ModifierCatalog::global().power_damage(skill);
        if damage == 0 {
            return None;
        }

        let damaged = unit
            .clone()
            .modify_health(-i32::from(damage), self.config.max_health.max(unit.health));
        if !damaged.is_dead() {
            tracing::trace!("{} at {} takes {} damage", unit.unit_type, position, damage);
            return Some(snapshot.clone().with_unit(position, damaged));
        }

        let count = unit.count();
        tracing::trace!("{} at {} destroyed ({} units)", unit.unit_type, position, count);
        Some(
            snapshot
                .clone()
                .without_unit(position)
                .modify_statistics(
                    snapshot.current_player(),
                    PlayerStats {
                        damage: u32::from(damage),
                        destroyed_units: count,
                        ..PlayerStats::default()
                    },
                )
                .modify_statistics(
                    unit.player,
                    PlayerStats {
                        lost_units: count,
                        ..PlayerStats::default()
                    },
                ),
        )
    }

    fn heal(&self, skill: Skill, player: PlayerId, snapshot: Snapshot) -> Snapshot {
        let Some(movement_types) = ModifierCatalog::global().heal_movement_types(skill) else {
            return snapshot;
        };

        let amount = i32::from(self.config.heal_amount);
        let healed: Vec<(Vector, Unit)> = owned_units(&snapshot, player)
            .filter(|(_, unit)| movement_types.contains(&unit.movement_type()))
            .map(|(position, unit)| {
                (position, unit.clone().modify_health(amount, self.config.max_health))
            })
            .collect();
        tracing::trace!("Healing {} units", healed.len());
        snapshot.with_units(healed)
    }

    fn damage_opponents(&self, skill: Skill, player: PlayerId, snapshot: Snapshot) -> Snapshot {
        let Some(targets) = units_to_damage(&snapshot, player, skill, None) else {
            return snapshot;
        };

        targets
            .into_iter()
            .fold(snapshot, |snapshot, (position, unit)| {
                self.opponent_effect(skill, &snapshot, position, &unit)
                    .unwrap_or(snapshot)
            })
    }
}

/// Apply the power of `skill` with the default rules configuration.
#[must_use]
pub fn apply_power(skill: Skill, snapshot: &Snapshot) -> Snapshot {
    PowerResolver::default().apply(skill, snapshot)
}

/// `PowerResolver::opponent_effect` with the default configuration.
#[must_use]
pub fn power_opponent_effect(
    skill: Skill,
    snapshot: &Snapshot,
    position: Vector,
    unit: &Unit,
) -> Option<Snapshot> {
    PowerResolver::default().opponent_effect(skill, snapshot, position, unit)
}

/// The change `skill` makes to one of the activator's own units, if any.
///
/// Used to preview recovery and conversion one unit at a time.
#[must_use]
pub fn power_unit_upgrade(skill: Skill, unit: &Unit) -> Option<Unit> {
    if skill == Skill::RecoverAirUnits {
        return Some(unit.clone().recover());
    }
    let (from, to) = ModifierCatalog::global().conversion(skill)?;
    unit.maybe_convert(from, to)
}

/// Opposing units hit by the damage power of `skill`.
///
/// Returns `None` for skills without a damage power. Only non-neutral
/// opponents are hit, and only where `vision` (if given) can see.
#[must_use]
pub fn units_to_damage(
    snapshot: &Snapshot,
    player: PlayerId,
    skill: Skill,
    vision: Option<&dyn Vision>,
) -> Option<OrdMap<Vector, Unit>> {
    let opponents = || {
        snapshot
            .units()
            .iter()
            .filter(move |(position, unit)| {
                snapshot.is_non_neutral_opponent(player, unit.player)
                    && vision.map_or(true, |vision| vision.is_visible(snapshot, **position))
            })
            .map(|(position, unit)| (*position, unit.clone()))
    };

    match skill {
        Skill::BuyUnitOctopus => Some(opponents().collect()),
        Skill::BuyUnitDragon => {
            let area: FxHashSet<Vector> = owned_units(snapshot, player)
                .filter(|(_, unit)| unit.unit_type == UnitType::Dragon && !unit.completed)
                .flat_map(|(position, _)| position.adjacent())
                .collect();
            Some(
                opponents()
                    .filter(|(position, _)| area.contains(position))
                    .collect(),
            )
        }
        _ => None,
    }
}

fn owned_units(snapshot: &Snapshot, player: PlayerId) -> impl Iterator<Item = (Vector, &Unit)> {
    snapshot
        .units()
        .iter()
        .filter(move |(_, unit)| snapshot.matches_player(unit.player, player))
        .map(|(position, unit)| (*position, unit))
}

fn recover_air_units(skill: Skill, player: PlayerId, snapshot: Snapshot) -> Snapshot {
    if skill != Skill::RecoverAirUnits {
        return snapshot;
    }

    let recovered: Vec<(Vector, Unit)> = owned_units(&snapshot, player)
        .filter(|(_, unit)| unit.movement_type().is_air() && unit.completed)
        .map(|(position, unit)| (position, unit.clone().recover()))
        .collect();
    tracing::trace!("Recovering {} air units", recovered.len());
    snapshot.with_units(recovered)
}

fn convert_units(skill: Skill, player: PlayerId, snapshot: Snapshot) -> Snapshot {
    let Some((from, to)) = ModifierCatalog::global().conversion(skill) else {
        return snapshot;
    };

    let converted: OrdMap<Vector, Unit> = owned_units(&snapshot, player)
        .filter_map(|(position, unit)| unit.maybe_convert(from, to).map(|unit| (position, unit)))
        .collect();
    tracing::trace!("Converting {} units from {} to {}", converted.len(), from, to);
    let named = assign_unit_names(&snapshot, converted);
    snapshot.with_units(named)
}
