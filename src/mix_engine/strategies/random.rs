use rand::Rng;

use crate::mix_engine::{
    anchorage::{self, AnchorageGroup},
    error::{MixError, Result},
    models::{PlayerId, Position},
    roster::Roster,
    strategies::{flip, team_number, Assignment, DistributionStrategy, Loads},
};

/// Coin-flip distribution driven by an injected random source.
pub struct RandomDistributor<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomDistributor<R> {
    pub fn new(rng: R) -> Self {
        RandomDistributor { rng }
    }
}

impl<R: Rng> DistributionStrategy for RandomDistributor<R> {
    /// Each position flips its own coin for which team gets the first half.
    /// That half is drawn uniformly without replacement; the rest of the
    /// position goes to the other team.
    fn without_anchorages(&mut self, roster: &Roster) -> Result<Assignment> {
        let mut assignment = Assignment::new();

        for position in Position::ALL {
            let players = roster.players(position);
            if players.is_empty() {
                continue;
            }
            let (first, second) = flip(&mut self.rng);

            let mut unassigned: Vec<usize> = (0..players.len()).collect();
            for _ in 0..players.len() / 2 {
                let pick = self.rng.gen_range(0..unassigned.len());
                let index = unassigned.remove(pick);
                assignment.assign(PlayerId { position, index }, team_number(first));
            }
            for index in unassigned {
                assignment.assign(PlayerId { position, index }, team_number(second));
            }
            log::debug!("{}: first half to team {}", position, team_number(first));
        }

        Ok(assignment)
    }

    fn with_anchorages(&mut self, roster: &Roster, groups: &[AnchorageGroup]) -> Result<Assignment> {
        let mut assignment = Assignment::new();
        let mut loads = Loads::new(roster);

        for group in groups {
            let (preferred, other) = flip(&mut self.rng);
            let side = if loads.fits_group(preferred, group) {
                preferred
            } else if loads.fits_group(other, group) {
                other
            } else {
                return Err(MixError::InfeasibleAnchorage { anchorage: group.id, size: group.size() });
            };

            loads.add_group(side, group);
            for &id in &group.members {
                assignment.assign(id, team_number(side));
            }
            log::debug!("anchorage {} ({} players) to team {}", group.id, group.size(), team_number(side));
        }

        // Whatever the preferred team cannot take, the other one can: both
        // capacities together cover the whole roster.
        for id in anchorage::unanchored(roster) {
            let (preferred, other) = flip(&mut self.rng);
            let side = if loads.fits_one(preferred, id.position) { preferred } else { other };
            loads.add_one(side, id.position);
            assignment.assign(id, team_number(side));
        }

        Ok(assignment)
    }
}
