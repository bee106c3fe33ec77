//! Unit tests for the `team_mixer` crate.
//!
//! Included from `lib.rs` under `#[cfg(test)]`.
//!
//! | Group | What is tested |
//! |-------|----------------|
//! | Invariants | Every player assigned; per-position and team totals; anchorage groups intact |
//! | Determinism | Same seed → identical split; different seeds → varied splits |
//! | Optimality | Skill-balanced difference equals the brute-force minimum, including tie-break |
//! | Infeasibility | Oversized and conflicting groups fail with no player mutated |
//! | Fairness | Each player lands on team 1 about half of the time |
//! | Properties | proptest over random rosters, skills and anchorages |

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::mix_engine::{
    anchorage, DistributionEngine, MixConfig, MixError, Player, Position, Roster, Strategy, Team,
};

// ── helpers ──────────────────────────────────────────────────────────────────

/// Seven-a-side roster: 4 central defenders, 4 lateral defenders and two
/// each of midfielders, forwards and goalkeepers. Skills cycle 1..=5.
fn seven_a_side() -> Roster {
    let mut players = Vec::new();
    let mut n = 0u8;
    for (prefix, position, count) in [
        ("cd", Position::CentralDefender, 4),
        ("ld", Position::LateralDefender, 4),
        ("mf", Position::Midfielder, 2),
        ("fw", Position::Forward, 2),
        ("gk", Position::Goalkeeper, 2),
    ] {
        for i in 0..count {
            players.push(Player::new(format!("{prefix}{i}"), position).with_skill(n % 5 + 1));
            n += 1;
        }
    }
    Roster::new(players, &MixConfig::default()).unwrap()
}

fn build(spec: &[(Position, u8, u32)]) -> Roster {
    let players: Vec<Player> = spec
        .iter()
        .enumerate()
        .map(|(i, &(pos, skill, anchor))| {
            Player::new(format!("p{i}"), pos).with_skill(skill).anchored_to(anchor)
        })
        .collect();
    let config = MixConfig::with_team_size(players.len() / 2);
    Roster::new(players, &config).unwrap()
}

fn engine(roster: &Roster, seed: u64) -> DistributionEngine<StdRng> {
    DistributionEngine::with_rng(roster.config().clone(), StdRng::seed_from_u64(seed))
}

/// Check every invariant a successful run must leave behind.
fn assert_valid_split(roster: &Roster, one: &Team, two: &Team, anchorages: bool) {
    assert!(roster.all_players().all(|p| p.team == 1 || p.team == 2), "player left unassigned");
    assert_eq!(one.player_count() + two.player_count(), roster.total_players());
    assert!(one.player_count() <= roster.team_size());
    assert!(two.player_count() <= roster.team_size());

    for position in Position::ALL {
        let cap = roster.capacity(position);
        let (a, b) = (one.players(position).len(), two.players(position).len());
        assert_eq!(a + b, roster.players(position).len(), "{position} count mismatch");
        assert!(a <= cap && b <= cap, "{position} over capacity: {a}/{b} of {cap}");
    }

    if anchorages {
        for group in anchorage::group(roster) {
            let team = roster.player(group.members[0]).unwrap().team;
            assert!(
                group.members.iter().all(|&id| roster.player(id).map(|p| p.team) == Some(team)),
                "anchorage {} split across teams",
                group.id
            );
        }
    }
}

/// Exhaustive baseline: smallest skill difference over every valid split,
/// with the lexicographically smallest team-1 ordinals among the optima.
fn brute_force(roster: &Roster, anchorages: bool) -> Option<(u32, Vec<usize>)> {
    let players: Vec<&Player> = roster.all_players().collect();
    let n = players.len();
    let mut best: Option<(u32, Vec<usize>)> = None;

    for mask in 0u32..(1 << n) {
        let on_one = |i: usize| mask & (1 << i) != 0;

        let fills_positions = Position::ALL.iter().all(|&pos| {
            let count = (0..n).filter(|&i| players[i].position == pos && on_one(i)).count();
            count == roster.capacity(pos)
        });
        if !fills_positions {
            continue;
        }
        let groups_intact = !anchorages
            || (0..n).all(|i| {
                (0..n).all(|j| {
                    !players[i].is_anchored()
                        || players[i].anchorage != players[j].anchorage
                        || on_one(i) == on_one(j)
                })
            });
        if !groups_intact {
            continue;
        }

        let team_one: Vec<usize> = (0..n).filter(|&i| on_one(i)).collect();
        let s1: u32 = team_one.iter().map(|&i| u32::from(players[i].skill)).sum();
        let s2: u32 = (0..n).filter(|&i| !on_one(i)).map(|i| u32::from(players[i].skill)).sum();
        let diff = s1.abs_diff(s2);

        let better = match &best {
            None => true,
            Some((d, t)) => diff < *d || (diff == *d && team_one < *t),
        };
        if better {
            best = Some((diff, team_one));
        }
    }
    best
}

/// Team-1 ordinals after a run.
fn team_one_ordinals(roster: &Roster) -> Vec<usize> {
    roster
        .all_players()
        .enumerate()
        .filter(|(_, p)| p.team == 1)
        .map(|(i, _)| i)
        .collect()
}

const SEEDS: [u64; 5] = [1, 42, 999, 0xDEAD_BEEF, 7];

// ── invariants ───────────────────────────────────────────────────────────────

#[test]
fn every_strategy_produces_a_valid_split() {
    for strategy in [Strategy::Random, Strategy::SkillBalanced] {
        for seed in SEEDS {
            let mut roster = seven_a_side();
            let (one, two) = engine(&roster, seed).distribute(&mut roster, strategy, false).unwrap();
            assert_valid_split(&roster, &one, &two, false);
            assert_eq!(one.number(), 1);
            assert_eq!(two.number(), 2);
        }
    }
}

#[test]
fn anchored_players_share_a_team() {
    for strategy in [Strategy::Random, Strategy::SkillBalanced] {
        for seed in SEEDS {
            let mut roster = seven_a_side();
            for name in ["cd0", "ld0", "fw0"] {
                roster.set_anchorage(name, 1).unwrap();
            }
            for name in ["cd1", "mf1"] {
                roster.set_anchorage(name, 4).unwrap();
            }
            let (one, two) = engine(&roster, seed).distribute(&mut roster, strategy, true).unwrap();
            assert_valid_split(&roster, &one, &two, true);
        }
    }
}

#[test]
fn teams_mirror_roster_team_fields() {
    let mut roster = seven_a_side();
    let (one, two) = engine(&roster, 5).distribute(&mut roster, Strategy::Random, false).unwrap();
    for p in one.all_players() {
        assert_eq!(roster.assignment()[&p.name], 1);
    }
    for p in two.all_players() {
        assert_eq!(roster.assignment()[&p.name], 2);
    }
}

#[test]
fn teams_serialize_for_display() {
    let mut roster = seven_a_side();
    let (one, _) = engine(&roster, 8).distribute(&mut roster, Strategy::SkillBalanced, false).unwrap();
    let json = serde_json::to_string(&one).unwrap();
    for p in one.all_players() {
        assert!(json.contains(&p.name));
    }
}

// ── determinism ──────────────────────────────────────────────────────────────

#[test]
fn same_seed_produces_identical_split() {
    for anchorages in [false, true] {
        let run = || {
            let mut roster = seven_a_side();
            roster.set_anchorage("cd2", 9).unwrap();
            roster.set_anchorage("gk0", 9).unwrap();
            engine(&roster, 12345).distribute(&mut roster, Strategy::Random, anchorages).unwrap();
            roster.assignment()
        };
        assert_eq!(run(), run());
    }
}

#[test]
fn different_seeds_produce_varied_splits() {
    let mut same = 0usize;
    let pairs = 40u64;
    for seed in 0..pairs {
        let mut a = seven_a_side();
        let mut b = seven_a_side();
        engine(&a, seed).distribute(&mut a, Strategy::Random, false).unwrap();
        engine(&b, seed + 500).distribute(&mut b, Strategy::Random, false).unwrap();
        if a.assignment() == b.assignment() {
            same += 1;
        }
    }
    assert!(same < pairs as usize / 4, "too many identical splits ({same}/{pairs})");
}

#[test]
fn reset_allows_redistribution() {
    let mut roster = seven_a_side();
    let mut e = engine(&roster, 3);
    e.distribute(&mut roster, Strategy::Random, false).unwrap();
    e.reset(&mut roster);
    assert!(roster.is_unassigned());
    let (one, two) = e.distribute(&mut roster, Strategy::Random, false).unwrap();
    assert_valid_split(&roster, &one, &two, false);
}

// ── optimality ───────────────────────────────────────────────────────────────

#[test]
fn two_position_example_reaches_brute_force_minimum() {
    use Position::{CentralDefender as A, Midfielder as B};
    let mut roster = build(&[
        (A, 5, 0), (A, 4, 0), (A, 3, 0), (A, 2, 0),
        (B, 1, 0), (B, 5, 0), (B, 4, 0), (B, 3, 0),
    ]);
    let (expected, _) = brute_force(&roster, false).unwrap();

    let (one, two) = engine(&roster, 1).distribute(&mut roster, Strategy::SkillBalanced, false).unwrap();
    assert_valid_split(&roster, &one, &two, false);
    assert_eq!(one.players(A).len(), 2);
    assert_eq!(one.players(B).len(), 2);
    assert_eq!(one.skill().abs_diff(two.skill()), expected);
}

#[test]
fn balanced_matches_brute_force_on_small_fixtures() {
    use Position::*;
    let fixtures: Vec<Vec<(Position, u8, u32)>> = vec![
        vec![(Forward, 5, 0), (Forward, 1, 0), (Goalkeeper, 4, 0), (Goalkeeper, 4, 0)],
        vec![
            (Midfielder, 5, 1), (Midfielder, 2, 0), (Midfielder, 3, 1), (Midfielder, 1, 0),
            (Forward, 4, 0), (Forward, 4, 2), (Goalkeeper, 2, 2), (Goalkeeper, 5, 0),
        ],
        vec![
            (CentralDefender, 3, 0), (CentralDefender, 3, 0), (LateralDefender, 1, 0),
            (LateralDefender, 5, 0), (Forward, 2, 3), (Forward, 4, 0), (Goalkeeper, 5, 3),
            (Goalkeeper, 1, 0),
        ],
        vec![
            (Midfielder, 0, 0), (Midfielder, 2, 0), (Midfielder, 2, 0), (Midfielder, 0, 0),
            (Midfielder, 5, 0), (Midfielder, 1, 0),
        ],
    ];

    for (n, spec) in fixtures.iter().enumerate() {
        for anchorages in [false, true] {
            let mut roster = build(spec);
            let (diff, team_one) = brute_force(&roster, anchorages).unwrap();
            let (one, two) = engine(&roster, 0)
                .distribute(&mut roster, Strategy::SkillBalanced, anchorages)
                .unwrap();
            assert_valid_split(&roster, &one, &two, anchorages);
            assert_eq!(one.skill().abs_diff(two.skill()), diff, "fixture {n}, anchorages {anchorages}");
            assert_eq!(team_one_ordinals(&roster), team_one, "tie-break differs on fixture {n}");
        }
    }
}

#[test]
fn balanced_split_ignores_the_seed() {
    let run = |seed| {
        let mut roster = seven_a_side();
        engine(&roster, seed).distribute(&mut roster, Strategy::SkillBalanced, false).unwrap();
        roster.assignment()
    };
    assert_eq!(run(1), run(2));
}

// ── infeasibility ────────────────────────────────────────────────────────────

#[test]
fn group_of_three_over_a_single_slot_is_rejected() {
    use Position::*;
    // Goalkeepers have one slot per team; the group holds both of them.
    let spec = [
        (Goalkeeper, 3, 1), (Goalkeeper, 3, 1), (Forward, 2, 1), (Forward, 4, 0),
        (Midfielder, 1, 0), (Midfielder, 5, 0),
    ];
    for strategy in [Strategy::Random, Strategy::SkillBalanced] {
        for seed in SEEDS {
            let mut roster = build(&spec);
            let err = engine(&roster, seed).distribute(&mut roster, strategy, true).unwrap_err();
            assert!(matches!(err, MixError::PreconditionViolation(_)), "got {err}");
            assert!(err.is_fatal());
            assert!(roster.is_unassigned());
        }
    }
}

#[test]
fn conflicting_groups_fail_without_mutation() {
    use Position::*;
    // Groups 1 and 2 share the single midfield slot, so they land on
    // opposite teams and group 3 finds one defender slot on each side.
    let spec = [
        (CentralDefender, 3, 1), (CentralDefender, 3, 2), (CentralDefender, 2, 3),
        (CentralDefender, 4, 3), (Midfielder, 1, 1), (Midfielder, 5, 2),
    ];
    for strategy in [Strategy::Random, Strategy::SkillBalanced] {
        let mut roster = build(&spec);
        let err = engine(&roster, 9).distribute(&mut roster, strategy, true).unwrap_err();
        assert!(matches!(err, MixError::InfeasibleAnchorage { .. }), "got {err}");
        assert!(roster.is_unassigned());
    }
}

// ── fairness ─────────────────────────────────────────────────────────────────

#[test]
fn each_player_lands_on_team_one_about_half_the_time() {
    let runs = 1000u64;
    let names: Vec<String> = seven_a_side().all_players().map(|p| p.name.clone()).collect();
    let mut on_one = vec![0u64; names.len()];

    for seed in 0..runs {
        let mut roster = seven_a_side();
        engine(&roster, seed).distribute(&mut roster, Strategy::Random, false).unwrap();
        for (i, p) in roster.all_players().enumerate() {
            if p.team == 1 {
                on_one[i] += 1;
            }
        }
    }

    for (name, count) in names.iter().zip(&on_one) {
        let share = *count as f64 / runs as f64;
        assert!((0.4..0.6).contains(&share), "{name} on team 1 in {share:.2} of runs");
    }
}

#[test]
fn positions_flip_independently() {
    // The first goalkeeper's team and the first forward's team are
    // independent, so all four combinations show up.
    let mut patterns = std::collections::HashSet::new();
    for seed in 0..200 {
        let mut roster = seven_a_side();
        engine(&roster, seed).distribute(&mut roster, Strategy::Random, false).unwrap();
        let gk = roster.players(Position::Goalkeeper)[0].team;
        let fw = roster.players(Position::Forward)[0].team;
        patterns.insert((gk, fw));
    }
    assert_eq!(patterns.len(), 4);
}

// ── properties ───────────────────────────────────────────────────────────────

mod proptests {
    use super::{assert_valid_split, brute_force, build, engine, team_one_ordinals, Position};
    use proptest::prelude::*;

    /// Up to two pairs per position; each player carries a skill and an
    /// anchorage id drawn from a small pool so groups actually form.
    fn roster_spec() -> impl Strategy<Value = Vec<(Position, u8, u32)>> {
        prop::array::uniform5(0usize..=2)
            .prop_filter("empty roster", |pairs| pairs.iter().sum::<usize>() > 0)
            .prop_flat_map(|pairs| {
                let positions: Vec<Position> = Position::ALL
                    .iter()
                    .zip(pairs)
                    .flat_map(|(&p, n)| std::iter::repeat(p).take(n * 2))
                    .collect();
                let n = positions.len();
                (
                    Just(positions),
                    prop::collection::vec(0u8..=5, n),
                    prop::collection::vec(prop_oneof![3 => Just(0u32), 1 => 1u32..=3], n),
                )
            })
            .prop_map(|(positions, skills, anchors)| {
                positions
                    .into_iter()
                    .zip(skills)
                    .zip(anchors)
                    .map(|((p, s), a)| (p, s, a))
                    .collect()
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Property: any successful run satisfies every invariant; any
        /// failure leaves the roster untouched.
        #[test]
        fn prop_runs_succeed_cleanly_or_not_at_all(
            spec in roster_spec(),
            seed in any::<u64>(),
            anchorages in any::<bool>(),
        ) {
            for strategy in [crate::Strategy::Random, crate::Strategy::SkillBalanced] {
                let mut roster = build(&spec);
                match engine(&roster, seed).distribute(&mut roster, strategy, anchorages) {
                    Ok((one, two)) => assert_valid_split(&roster, &one, &two, anchorages),
                    Err(err) => {
                        prop_assert!(anchorages, "failure without anchorages: {}", err);
                        prop_assert!(err.is_fatal());
                        prop_assert!(roster.is_unassigned());
                    }
                }
            }
        }

        /// Property: the balanced split is optimal whenever a split exists.
        #[test]
        fn prop_balanced_is_optimal(spec in roster_spec(), anchorages in any::<bool>()) {
            prop_assume!(spec.len() <= 12);
            let mut roster = build(&spec);
            let expected = brute_force(&roster, anchorages);
            let result = engine(&roster, 0).distribute(&mut roster, crate::Strategy::SkillBalanced, anchorages);
            match (expected, result) {
                (Some((diff, team_one)), Ok((one, two))) => {
                    prop_assert_eq!(one.skill().abs_diff(two.skill()), diff);
                    prop_assert_eq!(team_one_ordinals(&roster), team_one);
                }
                (None, Err(_)) => {}
                (Some(_), Err(err)) => {
                    // Only the up-front group check may reject a feasible
                    // roster, and it never does: a feasible split fits every group.
                    prop_assert!(false, "feasible roster rejected: {}", err);
                }
                (None, Ok(_)) => prop_assert!(false, "found a split brute force could not"),
            }
        }
    }
}
