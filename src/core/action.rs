//! Action descriptors.
//!
//! An `Action` describes something a player already did. The turn
//! controller validates and applies actions; this crate only reads them to
//! decide which objectives an action can satisfy.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use super::position::Vector;
use crate::skills::Skill;

/// A validated, already-applied player action.
///
/// ## Example
///
/// ```
/// use tactics_rules::core::{Action, PlayerId, Vector};
///
/// let attack = Action::AttackUnit {
///     from: Vector::new(1, 1),
///     to: Vector::new(2, 1),
///     player_a: PlayerId::new(1),
///     player_b: PlayerId::new(2),
///     attacker_survived: true,
/// };
/// assert_eq!(attack.acting_player(), Some(PlayerId::new(1)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Move {
        from: Vector,
        to: Vector,
        player: PlayerId,
    },

    /// Unit-on-unit attack. `attacker_survived` is false when the counter
    /// attack destroyed the attacker.
    AttackUnit {
        from: Vector,
        to: Vector,
        player_a: PlayerId,
        player_b: PlayerId,
        attacker_survived: bool,
    },

    /// Unit-on-building attack. `building_survived` is false when the
    /// building was destroyed.
    AttackBuilding {
        from: Vector,
        to: Vector,
        player: PlayerId,
        building_survived: bool,
    },

    /// Capture attempt. `captured` is true once the building changed owner.
    Capture {
        from: Vector,
        player: PlayerId,
        captured: bool,
    },

    CreateBuilding {
        at: Vector,
        player: PlayerId,
    },

    CreateUnit {
        from: Vector,
        to: Vector,
        player: PlayerId,
    },

    DropUnit {
        from: Vector,
        to: Vector,
        player: PlayerId,
    },

    /// Units entering the map through a scripted spawn.
    Spawn {
        positions: Vec<Vector>,
    },

    /// A unit moved onto a neutral unit at `to` to rescue it.
    Rescue {
        from: Vector,
        to: Vector,
        player: PlayerId,
    },

    /// End of `player`'s turn; `next_player` starts turn in `round`.
    EndTurn {
        player: PlayerId,
        next_player: PlayerId,
        round: u32,
    },

    ActivatePower {
        skill: Skill,
        player: PlayerId,
    },

    ToggleLightning {
        from: Vector,
        to: Vector,
        player: PlayerId,
    },
}

impl Action {
    /// The player who performed the action, when the action carries one.
    #[must_use]
    pub fn acting_player(&self) -> Option<PlayerId> {
        match self {
            Action::Move { player, .. }
            | Action::AttackBuilding { player, .. }
            | Action::Capture { player, .. }
            | Action::CreateBuilding { player, .. }
            | Action::CreateUnit { player, .. }
            | Action::DropUnit { player, .. }
            | Action::Rescue { player, .. }
            | Action::EndTurn { player, .. }
            | Action::ActivatePower { player, .. }
            | Action::ToggleLightning { player, .. } => Some(*player),
            Action::AttackUnit { player_a, .. } => Some(*player_a),
            Action::Spawn { .. } => None,
        }
    }

    #[must_use]
    pub fn is_end_turn(&self) -> bool {
        matches!(self, Action::EndTurn { .. })
    }

    /// Short name of the variant, used in logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Move { .. } => "Move",
            Action::AttackUnit { .. } => "AttackUnit",
            Action::AttackBuilding { .. } => "AttackBuilding",
            Action::Capture { .. } => "Capture",
            Action::CreateBuilding { .. } => "CreateBuilding",
            Action::CreateUnit { .. } => "CreateUnit",
            Action::DropUnit { .. } => "DropUnit",
            Action::Spawn { .. } => "Spawn",
            Action::Rescue { .. } => "Rescue",
            Action::EndTurn { .. } => "EndTurn",
            Action::ActivatePower { .. } => "ActivatePower",
            Action::ToggleLightning { .. } => "ToggleLightning",
        }
    }
}
