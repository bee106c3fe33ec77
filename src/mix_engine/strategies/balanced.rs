//! Skill-balanced distribution.
//!
//! Anchorage groups become atomic units weighted by their members' summed
//! skill; every other player is a unit of its own. A depth-first search then
//! picks the units for team 1 so that each position is filled exactly to
//! capacity and the skill difference is as small as possible.
//!
//! ## Tie-breaking
//!
//! Units are ordered by their earliest member in roster order and the search
//! tries "team 1" before "team 2". Team 1 always holds exactly `team_size`
//! players, so the first optimum the search reaches is the one whose sorted
//! team-1 member list is lexicographically smallest. Only strictly better
//! candidates replace it.
//!
//! ## Memoisation
//!
//! Two prefixes that reach the same `(unit, per-position counts, weight)`
//! state share every completion, so only the first visit explores it. The
//! first visit is also the earlier one in search order, which keeps the
//! tie-break intact. The state space is bounded by the capacities and the
//! total skill, so runs over tens of players stay fast.

use std::collections::HashSet;

use crate::mix_engine::{
    anchorage::{self, AnchorageGroup},
    error::{MixError, Result},
    models::{PlayerId, Position, PositionCounts},
    roster::Roster,
    strategies::{team_number, Assignment, DistributionStrategy},
};

#[derive(Debug, Default)]
pub struct SkillBalancedDistributor;

impl SkillBalancedDistributor {
    pub fn new() -> Self {
        SkillBalancedDistributor
    }
}

impl DistributionStrategy for SkillBalancedDistributor {
    fn without_anchorages(&mut self, roster: &Roster) -> Result<Assignment> {
        let units = singletons(roster, roster.iter().map(|(id, _)| id));
        let chosen = search(roster, &units)
            .ok_or_else(|| MixError::precondition("roster admits no balanced split"))?;
        Ok(assignment_from(&units, &chosen))
    }

    fn with_anchorages(&mut self, roster: &Roster, groups: &[AnchorageGroup]) -> Result<Assignment> {
        let mut units: Vec<Unit> = groups.iter().map(|g| Unit::from_group(roster, g)).collect();
        units.extend(singletons(roster, anchorage::unanchored(roster)));
        units.sort_by_key(|u| u.first);

        match search(roster, &units) {
            Some(chosen) => Ok(assignment_from(&units, &chosen)),
            // Groups come largest first: blame the most constrained one.
            None => Err(match groups.first() {
                Some(g) => MixError::InfeasibleAnchorage { anchorage: g.id, size: g.size() },
                None => MixError::precondition("roster admits no balanced split"),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Units
// ---------------------------------------------------------------------------

/// Players that must land on the same team.
#[derive(Debug, Clone)]
struct Unit {
    members: Vec<PlayerId>,
    counts: PositionCounts,
    weight: u32,
    /// Roster-order index of the earliest member.
    first: usize,
}

impl Unit {
    fn from_group(roster: &Roster, group: &AnchorageGroup) -> Self {
        let weight = group.members.iter().map(|&id| skill_of(roster, id)).sum();
        let first = group.members.iter().map(|&id| ordinal(roster, id)).min().unwrap_or(0);
        Unit { members: group.members.clone(), counts: group.counts, weight, first }
    }
}

fn singletons(roster: &Roster, ids: impl IntoIterator<Item = PlayerId>) -> Vec<Unit> {
    ids.into_iter()
        .map(|id| {
            let mut counts = [0; Position::COUNT];
            counts[id.position.index()] = 1;
            Unit {
                members: vec![id],
                counts,
                weight: skill_of(roster, id),
                first: ordinal(roster, id),
            }
        })
        .collect()
}

fn skill_of(roster: &Roster, id: PlayerId) -> u32 {
    roster.player(id).map_or(0, |p| u32::from(p.skill))
}

/// Index of `id` in the roster's flat order.
fn ordinal(roster: &Roster, id: PlayerId) -> usize {
    Position::ALL
        .iter()
        .take_while(|&&p| p != id.position)
        .map(|&p| roster.players(p).len())
        .sum::<usize>()
        + id.index
}

fn assignment_from(units: &[Unit], team_one: &[bool]) -> Assignment {
    let mut assignment = Assignment::new();
    for (unit, &on_one) in units.iter().zip(team_one) {
        let team = team_number(if on_one { 0 } else { 1 });
        for &id in &unit.members {
            assignment.assign(id, team);
        }
    }
    assignment
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Pick the team-1 units. `None` when no split fills every position.
fn search(roster: &Roster, units: &[Unit]) -> Option<Vec<bool>> {
    let caps = roster.capacities();

    // supply[i]: players per position in units[i..]; weights[i] likewise.
    let mut supply = vec![[0usize; Position::COUNT]; units.len() + 1];
    let mut weights = vec![0u32; units.len() + 1];
    for i in (0..units.len()).rev() {
        for p in 0..Position::COUNT {
            supply[i][p] = supply[i + 1][p] + units[i].counts[p];
        }
        weights[i] = weights[i + 1] + units[i].weight;
    }

    let total = i64::from(weights[0]);
    let mut s = Search {
        units,
        caps,
        supply,
        weights,
        total,
        chosen: vec![false; units.len()],
        counts: [0; Position::COUNT],
        weight: 0,
        best: None,
        seen: HashSet::new(),
    };
    s.descend(0);

    if let Some((diff, _)) = &s.best {
        log::debug!("balanced split over {} units: skill difference {}", units.len(), diff);
    }
    s.best.map(|(_, chosen)| chosen)
}

struct Search<'a> {
    units: &'a [Unit],
    caps: PositionCounts,
    supply: Vec<PositionCounts>,
    weights: Vec<u32>,
    total: i64,
    chosen: Vec<bool>,
    counts: PositionCounts,
    weight: u32,
    best: Option<(u32, Vec<bool>)>,
    seen: HashSet<(usize, PositionCounts, u32)>,
}

impl Search<'_> {
    /// Returns true once no better split can exist.
    fn descend(&mut self, i: usize) -> bool {
        if i == self.units.len() {
            if self.counts != self.caps {
                return false;
            }
            let diff = (2 * i64::from(self.weight) - self.total).unsigned_abs() as u32;
            if self.best.as_ref().map_or(true, |(b, _)| diff < *b) {
                self.best = Some((diff, self.chosen.clone()));
            }
            return i64::from(diff) == self.total % 2;
        }
        if !self.seen.insert((i, self.counts, self.weight)) {
            return false;
        }

        for p in 0..Position::COUNT {
            if self.counts[p] + self.supply[i][p] < self.caps[p] {
                return false;
            }
        }
        if let Some((best, _)) = &self.best {
            if self.lower_bound(i) >= *best {
                return false;
            }
        }

        let units = self.units;
        let unit = &units[i];
        let fits = (0..Position::COUNT).all(|p| self.counts[p] + unit.counts[p] <= self.caps[p]);
        if fits {
            self.take(i, true);
            let done = self.descend(i + 1);
            self.take(i, false);
            if done {
                return true;
            }
        }
        self.descend(i + 1)
    }

    /// Smallest difference reachable from here, ignoring capacities.
    fn lower_bound(&self, i: usize) -> u32 {
        let low = 2 * i64::from(self.weight);
        let high = 2 * i64::from(self.weight + self.weights[i]);
        if high < self.total {
            (self.total - high) as u32
        } else if low > self.total {
            (low - self.total) as u32
        } else {
            0
        }
    }

    fn take(&mut self, i: usize, on: bool) {
        let units = self.units;
        let unit = &units[i];
        for p in 0..Position::COUNT {
            if on {
                self.counts[p] += unit.counts[p];
            } else {
                self.counts[p] -= unit.counts[p];
            }
        }
        if on {
            self.weight += unit.weight;
        } else {
            self.weight -= unit.weight;
        }
        self.chosen[i] = on;
    }
}
