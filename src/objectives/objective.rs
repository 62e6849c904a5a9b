//! Objectives and the per-match objective list.
//!
//! ## Criteria
//!
//! Each objective has a `Criteria` that carries its own parameters
//! (threshold, labels, target positions or rounds). `Default` stands for
//! the built-in win condition and is never satisfied on its own.
//!
//! ## Objectives
//!
//! The list is keyed by stable `ObjectiveId`s and is never empty: removing
//! the last objective leaves a `Default` objective at id 0. An objective's
//! completed-by set only grows.

use im::{OrdMap, OrdSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use strum::{Display, EnumDiscriminants, EnumIter};

use super::error::ObjectiveError;
use crate::core::{LabelSet, PlayerId, Snapshot, Vector};

/// Stable identifier of an objective within a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectiveId(pub u8);

impl ObjectiveId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ObjectiveId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Objective {}", self.0)
    }
}

/// What an objective asks for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, EnumDiscriminants)]
#[strum_discriminants(name(CriteriaKind), derive(Display, EnumIter, Hash, PartialOrd, Ord))]
pub enum Criteria {
    /// The built-in win condition (defeat every opponent's HQ or army).
    Default,
    /// Own at least `amount` buildings.
    CaptureAmount { amount: u32 },
    /// Take every labeled enemy building.
    CaptureLabel { labels: LabelSet },
    /// Destroy at least `amount` units.
    DefeatAmount { amount: u32 },
    /// Destroy every labeled enemy unit.
    DefeatLabel { labels: LabelSet },
    /// Destroy any one labeled enemy unit.
    DefeatOneLabel { labels: LabelSet },
    /// Destroy at least `amount` buildings.
    DestroyAmount { amount: u32 },
    /// Destroy every labeled enemy building.
    DestroyLabel { labels: LabelSet },
    /// Bring at least `amount` (optionally labeled) units to `positions`.
    EscortAmount {
        amount: u32,
        labels: LabelSet,
        positions: OrdSet<Vector>,
    },
    /// Bring every labeled unit to `positions`.
    EscortLabel {
        labels: LabelSet,
        positions: OrdSet<Vector>,
    },
    /// Rescue at least `amount` neutral units.
    RescueAmount { amount: u32 },
    /// Rescue every labeled neutral unit.
    RescueLabel { labels: LabelSet },
    /// Survive until round `rounds`.
    Survival { rounds: u32 },
}

impl Criteria {
    #[must_use]
    pub fn kind(&self) -> CriteriaKind {
        CriteriaKind::from(self)
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        matches!(self, Criteria::Default)
    }
}

/// Which game-end trigger an objective fires when satisfied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum ObjectiveTrigger {
    GameEnd,
    OptionalObjective,
}

/// A victory or side condition of the match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objective {
    pub criteria: Criteria,

    /// Players the objective applies to. Empty means every player.
    pub players: SmallVec<[PlayerId; 4]>,

    /// Optional objectives reward the player without ending the game.
    pub optional: bool,

    completed: OrdSet<PlayerId>,
}

impl Objective {
    /// Create a required objective for every player.
    #[must_use]
    pub fn new(criteria: Criteria) -> Self {
        Self {
            criteria,
            players: SmallVec::new(),
            optional: false,
            completed: OrdSet::new(),
        }
    }

    #[must_use]
    pub fn with_players(mut self, players: impl IntoIterator<Item = PlayerId>) -> Self {
        self.players = players.into_iter().collect();
        self
    }

    #[must_use]
    pub fn as_optional(mut self) -> Self {
        self.optional = true;
        self
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        self.criteria.is_default()
    }

    /// Players that already satisfied this objective.
    #[must_use]
    pub fn completed(&self) -> &OrdSet<PlayerId> {
        &self.completed
    }

    #[must_use]
    pub fn is_completed_by(&self, player: PlayerId) -> bool {
        self.completed.contains(&player)
    }

    /// Record `player` as having satisfied the objective.
    #[must_use]
    pub fn complete(mut self, player: PlayerId) -> Self {
        self.completed.insert(player);
        self
    }

    /// Whether the objective applies to `player`.
    #[must_use]
    pub fn applies_to(&self, player: PlayerId) -> bool {
        matches_player_list(&self.players, player)
    }

    #[must_use]
    pub fn trigger(&self) -> ObjectiveTrigger {
        if self.optional && !self.is_default() {
            ObjectiveTrigger::OptionalObjective
        } else {
            ObjectiveTrigger::GameEnd
        }
    }
}

/// An empty list matches every player.
#[must_use]
pub fn matches_player_list(players: &[PlayerId], player: PlayerId) -> bool {
    players.is_empty() || players.contains(&player)
}

/// Check that `objective` makes sense for the match in `snapshot`.
pub fn validate_objective(snapshot: &Snapshot, objective: &Objective) -> Result<(), ObjectiveError> {
    for &player in &objective.players {
        if player.is_neutral() {
            return Err(ObjectiveError::NeutralPlayer);
        }
        if snapshot.player(player).is_none() {
            return Err(ObjectiveError::UnknownPlayer(player));
        }
    }

    let require_amount = |amount: u32| {
        if amount == 0 {
            Err(ObjectiveError::InvalidAmount)
        } else {
            Ok(())
        }
    };
    let require_labels = |labels: &LabelSet| {
        if labels.is_empty() {
            Err(ObjectiveError::MissingLabels)
        } else {
            Ok(())
        }
    };
    let require_positions = |positions: &OrdSet<Vector>| {
        if positions.is_empty() {
            Err(ObjectiveError::MissingPositions)
        } else {
            Ok(())
        }
    };

    match &objective.criteria {
        Criteria::Default => Ok(()),
        Criteria::CaptureAmount { amount }
        | Criteria::DefeatAmount { amount }
        | Criteria::DestroyAmount { amount }
        | Criteria::RescueAmount { amount } => require_amount(*amount),
        Criteria::CaptureLabel { labels }
        | Criteria::DefeatLabel { labels }
        | Criteria::DefeatOneLabel { labels }
        | Criteria::DestroyLabel { labels }
        | Criteria::RescueLabel { labels } => require_labels(labels),
        Criteria::EscortAmount {
            amount, positions, ..
        } => {
            require_amount(*amount)?;
            require_positions(positions)?;
            if *amount as usize > positions.len() {
                return Err(ObjectiveError::AmountExceedsPositions {
                    amount: *amount,
                    positions: positions.len(),
                });
            }
            Ok(())
        }
        Criteria::EscortLabel { labels, positions } => {
            require_labels(labels)?;
            require_positions(positions)
        }
        Criteria::Survival { rounds } => {
            if *rounds == 0 {
                Err(ObjectiveError::InvalidRounds)
            } else {
                Ok(())
            }
        }
    }
}

/// The objective list of a match, in id order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "OrdMap<ObjectiveId, Objective>")]
pub struct Objectives(OrdMap<ObjectiveId, Objective>);

impl Default for Objectives {
    /// A single `Default` objective at id 0.
    fn default() -> Self {
        Self(OrdMap::unit(ObjectiveId::new(0), Objective::new(Criteria::Default)))
    }
}

impl FromIterator<(ObjectiveId, Objective)> for Objectives {
    /// Build a list from explicit ids. An empty input yields the default
    /// list.
    fn from_iter<I: IntoIterator<Item = (ObjectiveId, Objective)>>(iter: I) -> Self {
        let map: OrdMap<ObjectiveId, Objective> = iter.into_iter().collect();
        if map.is_empty() {
            Self::default()
        } else {
            Self(map)
        }
    }
}

impl From<OrdMap<ObjectiveId, Objective>> for Objectives {
    fn from(map: OrdMap<ObjectiveId, Objective>) -> Self {
        map.into_iter().collect()
    }
}

impl Objectives {
    /// Number objectives from 0 in the given order.
    ///
    /// Panics if more than 256 objectives are given; see `try_new`.
    #[must_use]
    pub fn new(objectives: impl IntoIterator<Item = Objective>) -> Self {
        match Self::try_new(objectives) {
            Ok(objectives) => objectives,
            Err(error) => panic!("{error}"),
        }
    }

    /// Number objectives from 0 in the given order, failing with
    /// `IdOverflow` past id 255.
    pub fn try_new(objectives: impl IntoIterator<Item = Objective>) -> Result<Self, ObjectiveError> {
        objectives
            .into_iter()
            .enumerate()
            .map(|(index, objective)| {
                u8::try_from(index)
                    .map(|id| (ObjectiveId::new(id), objective))
                    .map_err(|_| ObjectiveError::IdOverflow(ObjectiveId::new(u8::MAX)))
            })
            .collect()
    }

    #[must_use]
    pub fn get(&self, id: ObjectiveId) -> Option<&Objective> {
        self.0.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectiveId, &Objective)> {
        self.0.iter().map(|(id, objective)| (*id, objective))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the list holds nothing but the built-in win condition.
    #[must_use]
    pub fn only_default(&self) -> bool {
        self.0.values().all(Objective::is_default)
    }

    /// The id the next added objective receives.
    #[must_use]
    pub fn next_id(&self) -> Option<ObjectiveId> {
        match self.0.get_max() {
            Some((max, _)) => max.0.checked_add(1).map(ObjectiveId::new),
            None => Some(ObjectiveId::new(0)),
        }
    }

    // === Editing ===

    /// Append `objective` under the next free id.
    pub fn add(&self, objective: Objective) -> Result<(ObjectiveId, Objectives), ObjectiveError> {
        let id = self.next_id().ok_or_else(|| {
            ObjectiveError::IdOverflow(self.0.get_max().map_or(ObjectiveId::new(0), |(id, _)| *id))
        })?;
        Ok((id, Self(self.0.update(id, objective))))
    }

    /// Replace or remove the objective at `id`.
    ///
    /// - Missing id: the list is returned unchanged.
    /// - `None`: removes the objective; removing the last one leaves a
    ///   `Default` objective at id 0.
    /// - `Some`: validated against `snapshot`, then replaces the objective.
    pub fn update(
        &self,
        snapshot: &Snapshot,
        id: ObjectiveId,
        objective: Option<Objective>,
    ) -> Result<Objectives, ObjectiveError> {
        if !self.0.contains_key(&id) {
            return Ok(self.clone());
        }

        match objective {
            None if self.0.len() == 1 => Ok(Self::default()),
            None => Ok(Self(self.0.without(&id))),
            Some(objective) => {
                validate_objective(snapshot, &objective)?;
                Ok(Self(self.0.update(id, objective)))
            }
        }
    }

    /// Mark the objective at `id` as completed by `player`. Missing ids are
    /// ignored.
    #[must_use]
    pub fn complete(&self, id: ObjectiveId, player: PlayerId) -> Objectives {
        match self.0.get(&id) {
            Some(objective) => Self(self.0.update(id, objective.clone().complete(player))),
            None => self.clone(),
        }
    }
}

impl Snapshot {
    /// `Objectives::update` applied to this snapshot's objective list.
    pub fn update_objective(
        &self,
        id: ObjectiveId,
        objective: Option<Objective>,
    ) -> Result<Snapshot, ObjectiveError> {
        let objectives = self.objectives().update(self, id, objective)?;
        Ok(self.clone().with_objectives(objectives))
    }
}
