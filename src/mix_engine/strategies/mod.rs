//! Distribution strategies.
//!
//! Both strategies implement [`DistributionStrategy`]: they read a
//! [`Roster`], decide a side for every player, and return the decision as an
//! [`Assignment`]. They never touch the roster itself; the engine commits a
//! finished assignment in one step, so a failed run leaves every player
//! unassigned.

/// Uniform coin-flip distribution.
pub mod random;
/// Exhaustive search for the smallest skill difference.
pub mod balanced;

use std::collections::BTreeMap;
use rand::Rng;

use crate::mix_engine::{
    anchorage::AnchorageGroup,
    error::{MixError, Result},
    models::{PlayerId, Position, PositionCounts},
    roster::Roster,
};

pub use balanced::SkillBalancedDistributor;
pub use random::RandomDistributor;

pub trait DistributionStrategy {
    /// Split the roster position by position, ignoring anchorage ids.
    fn without_anchorages(&mut self, roster: &Roster) -> Result<Assignment>;

    /// Split the roster keeping every group in `groups` on one team.
    /// `groups` must come from [`anchorage::group`](crate::mix_engine::anchorage::group).
    fn with_anchorages(&mut self, roster: &Roster, groups: &[AnchorageGroup]) -> Result<Assignment>;
}

// ---------------------------------------------------------------------------
// Assignment record
// ---------------------------------------------------------------------------

/// Team number (1 or 2) chosen for each player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    teams: BTreeMap<PlayerId, u8>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&mut self, id: PlayerId, team: u8) {
        self.teams.insert(id, team);
    }

    pub fn team_of(&self, id: PlayerId) -> Option<u8> {
        self.teams.get(&id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, u8)> + '_ {
        self.teams.iter().map(|(&id, &team)| (id, team))
    }

    /// Check the split is complete and within every capacity before it is
    /// written back to the roster.
    pub fn verify(&self, roster: &Roster) -> Result<()> {
        let mut loads = Loads::new(roster);
        for (id, player) in roster.iter() {
            let team = self.team_of(id).ok_or_else(|| {
                MixError::precondition(format!("'{}' was left without a team", player.name))
            })?;
            let side = side_of(team).ok_or_else(|| {
                MixError::precondition(format!("invalid team number {}", team))
            })?;
            if !loads.fits_one(side, id.position) {
                return Err(MixError::precondition(format!(
                    "team {} overflows {}",
                    team, id.position
                )));
            }
            loads.add_one(side, id.position);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Team number for side 0 or 1.
pub(crate) fn team_number(side: usize) -> u8 {
    side as u8 + 1
}

pub(crate) fn side_of(team: u8) -> Option<usize> {
    match team {
        1 => Some(0),
        2 => Some(1),
        _ => None,
    }
}

/// Random (preferred, other) pair of sides.
pub(crate) fn flip<R: Rng>(rng: &mut R) -> (usize, usize) {
    let first = rng.gen_range(0..2usize);
    (first, 1 - first)
}

/// Running player counts of both teams against the roster's capacities.
#[derive(Debug, Clone)]
pub(crate) struct Loads {
    counts: [PositionCounts; 2],
    totals: [usize; 2],
    caps: PositionCounts,
    team_size: usize,
}

impl Loads {
    pub(crate) fn new(roster: &Roster) -> Self {
        Loads {
            counts: [[0; Position::COUNT]; 2],
            totals: [0; 2],
            caps: roster.capacities(),
            team_size: roster.team_size(),
        }
    }

    /// Would `side` still be within capacity after taking `group`?
    pub(crate) fn fits_group(&self, side: usize, group: &AnchorageGroup) -> bool {
        if self.totals[side] + group.size() > self.team_size {
            return false;
        }
        Position::ALL.iter().all(|p| {
            let i = p.index();
            self.counts[side][i] + group.counts[i] <= self.caps[i]
        })
    }

    pub(crate) fn fits_one(&self, side: usize, position: Position) -> bool {
        self.totals[side] < self.team_size
            && self.counts[side][position.index()] < self.caps[position.index()]
    }

    pub(crate) fn add_group(&mut self, side: usize, group: &AnchorageGroup) {
        for p in Position::ALL {
            self.counts[side][p.index()] += group.count(p);
        }
        self.totals[side] += group.size();
    }

    pub(crate) fn add_one(&mut self, side: usize, position: Position) {
        self.counts[side][position.index()] += 1;
        self.totals[side] += 1;
    }
}
