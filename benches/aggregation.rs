//! Skill aggregation and objective evaluation benchmarks.
//!
//! Run with: `cargo bench`
//! The battle screen queries modifiers for every visible unit each frame,
//! and the turn controller evaluates objectives after every action.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tactics_rules::core::{Action, EntityRef, Player, PlayerId, Snapshot, TileType, Unit, UnitType, Vector};
use tactics_rules::objectives::{check_objectives, Criteria, Objective, Objectives};
use tactics_rules::skills::{attack_modifier, defense_modifier, unit_cost, Skill, SkillSet};

fn loaded_skills() -> SkillSet {
    [
        Skill::AttackIncreaseMinor,
        Skill::UnitInfantryForestAttackAndDefenseIncrease,
        Skill::BuyUnitBear,
        Skill::ArtilleryRangeIncrease,
        Skill::DecreaseUnitCostAttackAndDefenseDecreaseMinor,
        Skill::BuyUnitCommander,
    ]
    .into_iter()
    .collect()
}

fn bench_modifiers(c: &mut Criterion) {
    let skills = loaded_skills();
    let active: SkillSet = [Skill::AttackIncreaseMinor, Skill::BuyUnitCommander].into_iter().collect();
    let unit = Unit::new(UnitType::Infantry, PlayerId::new(1)).as_leader();

    let mut group = c.benchmark_group("modifiers");

    group.bench_function("attack_modifier", |b| {
        b.iter(|| {
            attack_modifier(
                black_box(Some(EntityRef::Unit(&unit))),
                black_box(Some(TileType::ForestVariant2)),
                black_box(&skills),
                black_box(&active),
            )
        })
    });

    group.bench_function("defense_modifier", |b| {
        b.iter(|| {
            defense_modifier(
                black_box(Some(EntityRef::Unit(&unit))),
                black_box(Some(TileType::Forest)),
                black_box(&skills),
                black_box(&active),
            )
        })
    });

    group.bench_function("unit_cost", |b| {
        b.iter(|| unit_cost(black_box(UnitType::Commander), black_box(450), &skills, &active))
    });

    group.finish();
}

fn bench_objectives(c: &mut Criterion) {
    let labels = [1u8].into_iter().collect();
    let mut before = Snapshot::new([Player::new(PlayerId::new(1)), Player::new(PlayerId::new(2))])
        .with_objectives(Objectives::new([
            Objective::new(Criteria::Default),
            Objective::new(Criteria::DefeatLabel { labels }),
            Objective::new(Criteria::Survival { rounds: 20 }),
        ]));
    for x in 0..20 {
        for y in 0..10 {
            let player = PlayerId::new(1 + u8::from((x + y) % 2 == 0));
            before = before.with_unit(Vector::new(x, y), Unit::new(UnitType::Infantry, player).with_label(1));
        }
    }
    let after = before.clone().without_unit(Vector::new(1, 0));
    let action = Action::AttackUnit {
        from: Vector::new(0, 0),
        to: Vector::new(1, 0),
        player_a: PlayerId::new(2),
        player_b: PlayerId::new(1),
        attacker_survived: true,
    };

    c.bench_function("check_objectives_200_units", |b| {
        b.iter(|| check_objectives(black_box(&before), black_box(&after), black_box(&action)))
    });
}

criterion_group!(benches, bench_modifiers, bench_objectives);
criterion_main!(benches);
