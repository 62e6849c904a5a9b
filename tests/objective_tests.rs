//! Objective evaluation tests.
//!
//! Each test builds a before/after pair around one action, the way the turn
//! controller does, and checks which objective (if any) is reported.

use im::OrdSet;
use tactics_rules::core::{
    Action, Building, BuildingType, LabelSet, Player, PlayerId, PlayerStats, Snapshot, Unit,
    UnitType, Vector,
};
use tactics_rules::objectives::{
    check_objectives, Criteria, Objective, ObjectiveError, ObjectiveId, Objectives,
};

fn p1() -> PlayerId {
    PlayerId::new(1)
}

fn p2() -> PlayerId {
    PlayerId::new(2)
}

fn labels(values: &[u8]) -> LabelSet {
    values.iter().copied().collect()
}

fn board(objectives: Vec<Objective>) -> Snapshot {
    Snapshot::new([Player::new(p1()), Player::new(p2())]).with_objectives(Objectives::new(objectives))
}

fn attack() -> Action {
    Action::AttackUnit {
        from: Vector::new(1, 1),
        to: Vector::new(2, 1),
        player_a: p1(),
        player_b: p2(),
        attacker_survived: true,
    }
}

fn end_turn(round: u32) -> Action {
    Action::EndTurn {
        player: p1(),
        next_player: p2(),
        round,
    }
}

fn kills(count: u32) -> PlayerStats {
    PlayerStats {
        destroyed_units: count,
        ..PlayerStats::default()
    }
}

/// Test that a match with only the built-in win condition reports nothing.
#[test]
fn test_only_default_objective() {
    let before = board(vec![]);
    let after = before.clone().modify_statistics(p1(), kills(10));

    assert!(before.objectives().only_default());
    assert!(check_objectives(&before, &after, &attack()).is_none());
}

/// Test that a kill reaching the threshold satisfies a defeat-amount
/// objective, and an attack without a kill does not.
#[test]
fn test_defeat_amount_threshold() {
    let before = board(vec![
        Objective::new(Criteria::Default),
        Objective::new(Criteria::DefeatAmount { amount: 3 }),
    ])
    .modify_statistics(p1(), kills(2));
    let after = before.clone().modify_statistics(p1(), kills(1));

    let Some((id, objective)) = check_objectives(&before, &after, &attack()) else {
        panic!("third kill should satisfy the objective");
    };
    assert_eq!(id, ObjectiveId::new(1));
    assert_eq!(objective.criteria, Criteria::DefeatAmount { amount: 3 });

    assert!(check_objectives(&before, &before, &attack()).is_none());
}

/// Test that a defeat-amount objective listing one player is not
/// satisfied by another player's attack, even when both reach the
/// threshold.
#[test]
fn test_defeat_amount_for_listed_player_only() {
    let before = board(vec![
        Objective::new(Criteria::Default),
        Objective::new(Criteria::DefeatAmount { amount: 3 }).with_players([p2()]),
    ])
    .modify_statistics(p1(), kills(2))
    .modify_statistics(p2(), kills(3));
    let after = before.clone().modify_statistics(p1(), kills(1));

    assert_eq!(before.current_player(), p1());
    assert!(check_objectives(&before, &after, &attack()).is_none());

    let before = before.with_current_player(p2());
    let after = after.with_current_player(p2());
    let Some((id, _)) = check_objectives(&before, &after, &attack()) else {
        panic!("the listed player's attack should satisfy the objective");
    };
    assert_eq!(id, ObjectiveId::new(1));
}

/// Test that a completed objective is never reported again for the same
/// player.
#[test]
fn test_completed_objective_is_skipped() {
    let before = board(vec![Objective::new(Criteria::CaptureLabel { labels: labels(&[3]) })])
        .with_building(Vector::new(4, 4), Building::new(BuildingType::HQ, p2()).with_label(3));
    let after = before
        .clone()
        .with_building(Vector::new(4, 4), Building::new(BuildingType::HQ, p1()).with_label(3));
    let capture = Action::Capture {
        from: Vector::new(4, 4),
        player: p1(),
        captured: true,
    };

    let Some((id, _)) = check_objectives(&before, &after, &capture) else {
        panic!("capturing the last labeled building should satisfy the objective");
    };

    let completed = after.objectives().complete(id, p1());
    let before = before.with_objectives(completed.clone());
    let after = after.with_objectives(completed);
    assert!(check_objectives(&before, &after, &capture).is_none());
}

/// Test that an escort is met only once every labeled unit is inside the
/// target area.
#[test]
fn test_escort_label_requires_every_unit() {
    let positions: OrdSet<Vector> = [Vector::new(8, 8), Vector::new(9, 8)].into_iter().collect();
    let objective = Objective::new(Criteria::EscortLabel {
        labels: labels(&[5]),
        positions,
    });
    let vip = |unit_type| Unit::new(unit_type, p1()).with_label(5);
    let before = board(vec![objective])
        .with_unit(Vector::new(8, 8), vip(UnitType::Jeep))
        .with_unit(Vector::new(9, 7), vip(UnitType::Infantry));
    let movement = Action::Move {
        from: Vector::new(9, 7),
        to: Vector::new(9, 8),
        player: p1(),
    };

    let arrived = before
        .clone()
        .without_unit(Vector::new(9, 7))
        .with_unit(Vector::new(9, 8), vip(UnitType::Infantry));
    assert!(check_objectives(&before, &arrived, &movement).is_some());

    let stopped_short = before
        .clone()
        .without_unit(Vector::new(9, 7))
        .with_unit(Vector::new(9, 9), vip(UnitType::Infantry));
    assert!(check_objectives(&before, &stopped_short, &movement).is_none());
}

/// Test that a labeled unit carried by a transporter counts as escorted.
#[test]
fn test_escort_label_counts_passengers() {
    let positions: OrdSet<Vector> = [Vector::new(2, 2)].into_iter().collect();
    let objective = Objective::new(Criteria::EscortLabel {
        labels: labels(&[1]),
        positions,
    });
    let transporter = Unit::new(UnitType::Jeep, p1())
        .with_transports(vec![Unit::new(UnitType::Infantry, p1()).with_label(1)]);
    let before = board(vec![objective]).with_unit(Vector::new(2, 1), transporter.clone());
    let after = before
        .clone()
        .without_unit(Vector::new(2, 1))
        .with_unit(Vector::new(2, 2), transporter);
    let movement = Action::Move {
        from: Vector::new(2, 1),
        to: Vector::new(2, 2),
        player: p1(),
    };

    assert!(check_objectives(&before, &after, &movement).is_some());
}

/// Test that survival is attributed to the player whose turn begins.
#[test]
fn test_survival_attributed_to_next_player() {
    let for_p2 = board(vec![Objective::new(Criteria::Survival { rounds: 5 }).with_players([p2()])]);
    let for_p1 = board(vec![Objective::new(Criteria::Survival { rounds: 5 }).with_players([p1()])]);

    assert!(check_objectives(&for_p2, &for_p2, &end_turn(5)).is_some());
    assert!(check_objectives(&for_p1, &for_p1, &end_turn(5)).is_none());
    assert!(check_objectives(&for_p2, &for_p2, &end_turn(4)).is_none());
}

/// Test that losing an escorted unit at end of turn fails the escort for
/// the player whose turn begins.
#[test]
fn test_escort_label_lost_at_end_of_turn() {
    let positions: OrdSet<Vector> = [Vector::new(0, 0)].into_iter().collect();
    let objective = Objective::new(Criteria::EscortLabel {
        labels: labels(&[2]),
        positions,
    })
    .with_players([p2()]);
    let before = board(vec![objective])
        .with_unit(Vector::new(5, 5), Unit::new(UnitType::Infantry, p2()).with_label(2));
    let after = before.clone().without_unit(Vector::new(5, 5));

    assert!(check_objectives(&before, &after, &end_turn(3)).is_some());
    assert!(check_objectives(&before, &before, &end_turn(3)).is_none());
}

/// Test that losing every labeled unit at end of turn resolves a defeat
/// objective held by the opponent of the player whose turn begins.
#[test]
fn test_defeat_label_lost_at_end_of_turn() {
    let objective = Objective::new(Criteria::DefeatLabel { labels: labels(&[7]) }).with_players([p1()]);
    let before = board(vec![objective])
        .with_unit(Vector::new(3, 3), Unit::new(UnitType::Commander, p2()).with_label(7));
    let after = before.clone().without_unit(Vector::new(3, 3));

    assert!(check_objectives(&before, &after, &end_turn(2)).is_some());
}

/// Test that killing one labeled unit is enough for a defeat-one objective.
#[test]
fn test_defeat_one_label() {
    let objective = Objective::new(Criteria::DefeatOneLabel { labels: labels(&[7]) });
    let before = board(vec![objective])
        .with_unit(Vector::new(2, 1), Unit::new(UnitType::Infantry, p2()).with_label(7))
        .with_unit(Vector::new(3, 1), Unit::new(UnitType::Infantry, p2()).with_label(7));
    let after = before.clone().without_unit(Vector::new(2, 1));

    assert!(check_objectives(&before, &after, &attack()).is_some());
}

/// Test that the lowest satisfied objective id wins.
#[test]
fn test_first_match_wins() {
    let before = board(vec![
        Objective::new(Criteria::DefeatAmount { amount: 1 }).as_optional(),
        Objective::new(Criteria::DefeatAmount { amount: 1 }),
    ]);
    let after = before.clone().modify_statistics(p1(), kills(1));

    let Some((id, objective)) = check_objectives(&before, &after, &attack()) else {
        panic!("both objectives are satisfied");
    };
    assert_eq!(id, ObjectiveId::new(0));
    assert!(objective.optional);
}

/// Test editing the objective list through the snapshot.
#[test]
fn test_update_objective_validates() {
    let snapshot = board(vec![Objective::new(Criteria::Survival { rounds: 3 })]);

    let updated = snapshot
        .update_objective(ObjectiveId::new(0), Some(Objective::new(Criteria::DefeatAmount { amount: 4 })));
    let Ok(updated) = updated else {
        panic!("valid objective rejected");
    };
    assert_eq!(
        updated.objectives().get(ObjectiveId::new(0)).map(|objective| &objective.criteria),
        Some(&Criteria::DefeatAmount { amount: 4 })
    );

    assert_eq!(
        snapshot.update_objective(ObjectiveId::new(0), Some(Objective::new(Criteria::DefeatLabel { labels: LabelSet::new() }))),
        Err(ObjectiveError::MissingLabels)
    );

    let Ok(removed) = snapshot.update_objective(ObjectiveId::new(0), None) else {
        panic!("removal never fails");
    };
    assert!(removed.objectives().only_default());
}
