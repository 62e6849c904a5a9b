//! Objective evaluation.
//!
//! After every applied action the turn controller passes the snapshots
//! before and after it. The evaluator classifies the action into an
//! `ActionShape`, then checks objectives in id order and reports the first
//! one the action satisfied.
//!
//! ## Attribution
//!
//! The acting player is the snapshot's current player, except when an
//! attacker died in its own attack: the defender is then credited. On
//! `EndTurn` the upcoming player is the target player, so end-of-turn
//! criteria (survival, defeat by attrition) resolve for the player whose
//! turn starts.

use im::OrdSet;

use super::objective::{matches_player_list, Criteria, Objective, ObjectiveId};
use crate::core::{Action, LabelSet, PlayerId, Snapshot, Unit, Vector};

/// How an action can affect objectives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionShape {
    /// Attacks, powers, lightning and end of turn.
    Destructive,
    /// A successful capture or a new building.
    Capture,
    /// A neutral unit taken over by the acting player.
    Rescue,
    /// Units moving, arriving or being created.
    Move,
}

/// Classify `action`. Actions outside every shape never satisfy an
/// objective.
#[must_use]
pub fn classify(after: &Snapshot, action: &Action) -> Option<ActionShape> {
    match action {
        Action::ActivatePower { .. }
        | Action::AttackBuilding { .. }
        | Action::AttackUnit { .. }
        | Action::EndTurn { .. }
        | Action::ToggleLightning { .. } => Some(ActionShape::Destructive),
        Action::Capture { captured, .. } => captured.then_some(ActionShape::Capture),
        Action::CreateBuilding { .. } => Some(ActionShape::Capture),
        Action::CreateUnit { .. }
        | Action::DropUnit { .. }
        | Action::Move { .. }
        | Action::Spawn { .. } => Some(ActionShape::Move),
        Action::Rescue { to, player, .. } => after
            .unit_at(*to)
            .is_some_and(|unit| unit.player == *player)
            .then_some(ActionShape::Rescue),
    }
}

/// The first objective, in id order, that `action` satisfied.
///
/// Returns `None` when the match only has the built-in win condition.
#[must_use]
pub fn check_objectives(
    before: &Snapshot,
    after: &Snapshot,
    action: &Action,
) -> Option<(ObjectiveId, Objective)> {
    let objectives = after.objectives();
    if objectives.only_default() {
        return None;
    }

    let shape = classify(after, action)?;
    let context = Context::new(before, after, action, shape);

    let (id, objective) = objectives
        .iter()
        .find(|(_, objective)| context.satisfies(objective))?;
    tracing::debug!(
        "{} ({}) satisfied by {} for {}",
        id,
        objective.criteria.kind(),
        action.kind(),
        context.player
    );
    Some((id, objective.clone()))
}

/// Whether the built-in win condition needs checking after `action`.
///
/// Destructive actions check it when the list has a `Default` objective or
/// a `DefeatLabel` for the current player; successful captures when it has
/// a `Default` objective or a capture objective for the current player.
#[must_use]
pub fn should_check_default_objectives(snapshot: &Snapshot, action: &Action) -> bool {
    let objectives = snapshot.objectives();
    let current = snapshot.current_player();
    let any = |relevant: &dyn Fn(&Objective) -> bool| {
        objectives.only_default()
            || objectives
                .iter()
                .any(|(_, objective)| objective.is_default() || relevant(objective))
    };

    match classify(snapshot, action) {
        Some(ActionShape::Destructive) => any(&|objective: &Objective| {
            matches!(objective.criteria, Criteria::DefeatLabel { .. }) && objective.applies_to(current)
        }),
        Some(ActionShape::Capture) if matches!(action, Action::Capture { .. }) => any(&|objective: &Objective| {
            matches!(
                objective.criteria,
                Criteria::CaptureAmount { .. } | Criteria::CaptureLabel { .. }
            ) && objective.applies_to(current)
        }),
        _ => false,
    }
}

// === Statistics ===

/// Buildings currently owned by `player`.
#[must_use]
pub fn captured_by_player(snapshot: &Snapshot, player: PlayerId) -> usize {
    snapshot
        .buildings()
        .values()
        .filter(|building| snapshot.matches_player(building.player, player))
        .count()
}

#[must_use]
pub fn destroyed_buildings_by_player(snapshot: &Snapshot, player: PlayerId) -> u32 {
    snapshot.stats(player).destroyed_buildings
}

#[must_use]
pub fn rescued_units_by_player(snapshot: &Snapshot, player: PlayerId) -> u32 {
    snapshot.stats(player).rescued_units
}

/// Target positions holding a unit of `player` that matches `labels`.
#[must_use]
pub fn escorted_by_player(
    snapshot: &Snapshot,
    player: PlayerId,
    positions: &OrdSet<Vector>,
    labels: &LabelSet,
) -> usize {
    positions
        .iter()
        .filter_map(|position| snapshot.unit_at(*position))
        .filter(|unit| snapshot.matches_player(unit.player, player) && unit.matches_labels(labels))
        .count()
}

// === Evaluation ===

struct Context<'a> {
    before: &'a Snapshot,
    after: &'a Snapshot,
    action: &'a Action,
    shape: ActionShape,
    /// Player credited with the action.
    player: PlayerId,
    /// Upcoming player on `EndTurn`, otherwise `player`.
    target: PlayerId,
    /// `(next_player, round)` when the action ends a turn.
    end_turn: Option<(PlayerId, u32)>,
}

/// Per-objective values shared by every criterion.
struct Check<'a> {
    players: &'a [PlayerId],
    /// The objective applies to the acting player.
    matches_player: bool,
    /// The objective applies to the target player.
    matches_target: bool,
    optional: bool,
}

impl<'a> Context<'a> {
    fn new(before: &'a Snapshot, after: &'a Snapshot, action: &'a Action, shape: ActionShape) -> Self {
        let player = match action {
            Action::AttackUnit {
                player_b,
                attacker_survived: false,
                ..
            } => *player_b,
            _ => before.current_player(),
        };
        let end_turn = match action {
            Action::EndTurn {
                next_player, round, ..
            } => Some((*next_player, *round)),
            _ => None,
        };
        let target = end_turn.map_or(player, |(next_player, _)| next_player);

        Self {
            before,
            after,
            action,
            shape,
            player,
            target,
            end_turn,
        }
    }

    fn is_end_turn(&self) -> bool {
        self.end_turn.is_some()
    }

    fn satisfies(&self, objective: &Objective) -> bool {
        if objective.is_default() {
            return false;
        }

        let completed_by = match objective.criteria {
            Criteria::Survival { .. } => self.target,
            _ => self.player,
        };
        if objective.is_completed_by(completed_by) {
            tracing::trace!("{} already completed {}", completed_by, objective.criteria.kind());
            return false;
        }

        let check = Check {
            players: &objective.players,
            matches_player: matches_player_list(&objective.players, self.player),
            matches_target: matches_player_list(&objective.players, self.target),
            optional: objective.optional,
        };

        match &objective.criteria {
            Criteria::Default => false,
            Criteria::CaptureAmount { amount } => self.capture_amount(&check, *amount),
            Criteria::CaptureLabel { labels } => self.capture_label(&check, labels),
            Criteria::DefeatAmount { amount } => self.defeat_amount(&check, *amount),
            Criteria::DefeatLabel { labels } => self.defeat_label(&check, labels),
            Criteria::DefeatOneLabel { labels } => self.defeat_one_label(&check, labels),
            Criteria::DestroyAmount { amount } => self.destroy_amount(&check, *amount),
            Criteria::DestroyLabel { labels } => self.destroy_label(labels),
            Criteria::EscortAmount {
                amount,
                labels,
                positions,
            } => self.escort_amount(&check, *amount, labels, positions),
            Criteria::EscortLabel { labels, positions } => {
                self.escort_label(&check, labels, positions)
            }
            Criteria::RescueAmount { amount } => self.rescue_amount(&check, *amount),
            Criteria::RescueLabel { labels } => self.rescue_label(&check, labels),
            Criteria::Survival { rounds } => self.survival(&check, *rounds),
        }
    }

    /// A building was destroyed by this action.
    fn destroyed_building(&self) -> bool {
        matches!(
            self.action,
            Action::AttackBuilding {
                building_survived: false,
                ..
            }
        )
    }

    // === Criteria ===

    fn capture_amount(&self, check: &Check<'_>, amount: u32) -> bool {
        self.shape == ActionShape::Capture
            && check.matches_player
            && captured_by_player(self.after, self.player) >= amount as usize
    }

    fn capture_label(&self, check: &Check<'_>, labels: &LabelSet) -> bool {
        let before = enemy_buildings(self.before, self.player, labels);
        let after = enemy_buildings(self.after, self.player, labels);
        match self.shape {
            ActionShape::Destructive => !check.optional && after < before,
            ActionShape::Capture => check.matches_player && after == 0 && before > 0,
            ActionShape::Rescue | ActionShape::Move => false,
        }
    }

    fn defeat_amount(&self, check: &Check<'_>, amount: u32) -> bool {
        if self.shape != ActionShape::Destructive {
            return false;
        }

        let reached = if check.players.is_empty() {
            self.after
                .active_players()
                .any(|player| self.after.stats(player).destroyed_units >= amount)
        } else {
            check
                .players
                .iter()
                .any(|&player| self.after.stats(player).destroyed_units >= amount)
        };

        let by_attrition = self.is_end_turn() && !check.optional && !check.matches_target;
        reached && (by_attrition || check.matches_player)
    }

    fn defeat_label(&self, check: &Check<'_>, labels: &LabelSet) -> bool {
        if self.shape != ActionShape::Destructive {
            return false;
        }

        let lost_all = self.is_end_turn()
            && !check.optional
            && !check.matches_target
            && own_units(self.after, self.target, labels) == 0
            && own_units(self.before, self.target, labels) > 0;

        lost_all
            || (check.matches_player
                && enemy_units(self.after, self.player, labels) == 0
                && enemy_units(self.before, self.player, labels) > 0)
    }

    fn defeat_one_label(&self, check: &Check<'_>, labels: &LabelSet) -> bool {
        if self.shape != ActionShape::Destructive {
            return false;
        }

        let lost_one = self.is_end_turn()
            && !check.optional
            && !check.matches_target
            && own_units(self.after, self.target, labels) < own_units(self.before, self.target, labels);

        lost_one
            || (check.matches_player
                && enemy_units(self.after, self.player, labels)
                    < enemy_units(self.before, self.player, labels))
    }

    fn destroy_amount(&self, check: &Check<'_>, amount: u32) -> bool {
        self.shape == ActionShape::Destructive
            && self.destroyed_building()
            && check.matches_player
            && destroyed_buildings_by_player(self.after, self.player) >= amount
    }

    fn destroy_label(&self, labels: &LabelSet) -> bool {
        self.shape == ActionShape::Destructive
            && self.destroyed_building()
            && enemy_buildings(self.after, self.player, labels) == 0
            && enemy_buildings(self.before, self.player, labels) > 0
    }

    fn escort_amount(
        &self,
        check: &Check<'_>,
        amount: u32,
        labels: &LabelSet,
        positions: &OrdSet<Vector>,
    ) -> bool {
        match self.shape {
            // Escorts fail once too few labeled units remain to reach the amount.
            ActionShape::Destructive => {
                !labels.is_empty()
                    && !check.matches_player
                    && !check.optional
                    && enemy_units(self.after, self.player, labels) < amount as usize
            }
            ActionShape::Move => {
                check.matches_player
                    && escorted_by_player(self.after, self.player, positions, labels) >= amount as usize
            }
            ActionShape::Capture | ActionShape::Rescue => false,
        }
    }

    fn escort_label(&self, check: &Check<'_>, labels: &LabelSet, positions: &OrdSet<Vector>) -> bool {
        match self.shape {
            ActionShape::Destructive => {
                if self.is_end_turn() {
                    !check.optional
                        && check.matches_target
                        && own_units(self.after, self.target, labels)
                            < own_units(self.before, self.target, labels)
                } else {
                    !check.matches_player
                        && !check.optional
                        && enemy_units(self.after, self.target, labels)
                            < enemy_units(self.before, self.target, labels)
                }
            }
            ActionShape::Move => {
                if !check.matches_player {
                    return false;
                }
                let mut escorted = labeled_units(self.after, labels)
                    .filter(|(_, unit)| self.after.matches_player(unit.player, self.player))
                    .peekable();
                escorted.peek().is_some()
                    && escorted.all(|(position, _)| positions.contains(position))
            }
            ActionShape::Capture | ActionShape::Rescue => false,
        }
    }

    fn rescue_amount(&self, check: &Check<'_>, amount: u32) -> bool {
        match self.shape {
            // Too few neutral units left to ever reach the amount.
            ActionShape::Destructive => {
                matches!(self.action, Action::AttackUnit { .. })
                    && !check.optional
                    && neutral_unit_count(self.after) as u64
                        + u64::from(rescued_units_by_player(self.after, self.player))
                        < u64::from(amount)
            }
            ActionShape::Rescue => {
                check.matches_player && rescued_units_by_player(self.after, self.player) >= amount
            }
            ActionShape::Capture | ActionShape::Move => false,
        }
    }

    fn rescue_label(&self, check: &Check<'_>, labels: &LabelSet) -> bool {
        let before = neutral_labeled(self.before, labels);
        let after = neutral_labeled(self.after, labels);
        match self.shape {
            ActionShape::Destructive => !check.optional && after < before,
            ActionShape::Rescue => check.matches_player && after == 0 && before > 0,
            ActionShape::Capture | ActionShape::Move => false,
        }
    }

    fn survival(&self, check: &Check<'_>, rounds: u32) -> bool {
        self.shape == ActionShape::Destructive
            && self
                .end_turn
                .is_some_and(|(_, round)| rounds <= round && check.matches_target)
    }
}

// === Counting ===

fn labeled_units<'s>(
    snapshot: &'s Snapshot,
    labels: &'s LabelSet,
) -> impl Iterator<Item = (&'s Vector, &'s Unit)> {
    snapshot
        .units()
        .iter()
        .filter(move |(_, unit)| unit.matches_labels(labels))
}

/// Labeled units owned by `player`.
fn own_units(snapshot: &Snapshot, player: PlayerId, labels: &LabelSet) -> usize {
    labeled_units(snapshot, labels)
        .filter(|(_, unit)| snapshot.matches_player(unit.player, player))
        .count()
}

/// Labeled units of `player`'s opponents, neutral included.
fn enemy_units(snapshot: &Snapshot, player: PlayerId, labels: &LabelSet) -> usize {
    labeled_units(snapshot, labels)
        .filter(|(_, unit)| snapshot.is_opponent(unit.player, player))
        .count()
}

/// Labeled buildings of `player`'s opponents.
fn enemy_buildings(snapshot: &Snapshot, player: PlayerId, labels: &LabelSet) -> usize {
    snapshot
        .buildings()
        .values()
        .filter(|building| building.matches_labels(labels) && snapshot.is_opponent(building.player, player))
        .count()
}

/// Neutral units carrying one of `labels` themselves.
fn neutral_labeled(snapshot: &Snapshot, labels: &LabelSet) -> usize {
    snapshot
        .units()
        .values()
        .filter(|unit| {
            unit.player.is_neutral() && unit.label.is_some_and(|label| labels.contains(&label))
        })
        .count()
}

fn neutral_unit_count(snapshot: &Snapshot) -> usize {
    snapshot
        .units()
        .values()
        .filter(|unit| unit.player.is_neutral())
        .count()
}
