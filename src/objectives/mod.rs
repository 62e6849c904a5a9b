//! Match objectives: the objective list, its validation, and the evaluator
//! that reports which objective an action satisfied.

pub mod error;
pub mod evaluator;
pub mod objective;

pub use error::ObjectiveError;
pub use evaluator::{
    captured_by_player, check_objectives, classify, destroyed_buildings_by_player,
    escorted_by_player, rescued_units_by_player, should_check_default_objectives, ActionShape,
};
pub use objective::{
    matches_player_list, validate_objective, Criteria, CriteriaKind, Objective, ObjectiveId,
    ObjectiveTrigger, Objectives,
};
