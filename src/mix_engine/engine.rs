use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::mix_engine::{
    anchorage::{self, AnchorageGroup},
    config::MixConfig,
    error::{MixError, Result},
    models::{MixRequest, Strategy, Team},
    roster::Roster,
    strategies::{
        side_of, Assignment, DistributionStrategy, RandomDistributor, SkillBalancedDistributor,
    },
};

/// Validates a roster, runs the chosen strategy and writes the result back.
///
/// The engine borrows the roster mutably for the whole run, so a roster can
/// only be distributed by one caller at a time. Call [`reset`](Self::reset)
/// before distributing the same roster again.
pub struct DistributionEngine<R: Rng = StdRng> {
    config: MixConfig,
    random: RandomDistributor<R>,
    balanced: SkillBalancedDistributor,
}

impl DistributionEngine<StdRng> {
    /// Engine with a freshly entropy-seeded generator.
    pub fn new(config: MixConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Engine whose random splits are reproducible for a given seed.
    pub fn with_seed(config: MixConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> DistributionEngine<R> {
    pub fn with_rng(config: MixConfig, rng: R) -> Self {
        DistributionEngine {
            config,
            random: RandomDistributor::new(rng),
            balanced: SkillBalancedDistributor::new(),
        }
    }

    pub fn config(&self) -> &MixConfig {
        &self.config
    }

    /// Clear every team number on `roster`.
    pub fn reset(&self, roster: &mut Roster) {
        roster.reset();
    }

    /// Split `roster` into two teams.
    ///
    /// On success every player's `team` is 1 or 2 and both teams are
    /// returned. On failure the roster is left untouched.
    pub fn distribute(
        &mut self,
        roster: &mut Roster,
        strategy: Strategy,
        anchorages: bool,
    ) -> Result<(Team, Team)> {
        self.check_roster(roster)?;

        let groups = if anchorages {
            let groups = anchorage::group(roster);
            check_groups(roster, &groups)?;
            groups
        } else {
            Vec::new()
        };

        if strategy == Strategy::SkillBalanced {
            let unrated = roster.all_players().filter(|p| p.skill == 0).count();
            if unrated > 0 {
                log::warn!("{} unrated players count as skill 0", unrated);
            }
        }

        let strategy_impl: &mut dyn DistributionStrategy = match strategy {
            Strategy::Random => &mut self.random,
            Strategy::SkillBalanced => &mut self.balanced,
        };
        let assignment = if anchorages {
            strategy_impl.with_anchorages(roster, &groups)?
        } else {
            strategy_impl.without_anchorages(roster)?
        };

        let (one, two) = commit(roster, &assignment)?;
        log::info!(
            "{} ({} anchorage groups): team 1 skill {}, team 2 skill {}",
            strategy,
            groups.len(),
            one.skill(),
            two.skill()
        );
        Ok((one, two))
    }

    fn check_roster(&self, roster: &Roster) -> Result<()> {
        if roster.team_size() != self.config.team_size {
            return Err(MixError::precondition(format!(
                "roster built for teams of {}, engine configured for {}",
                roster.team_size(),
                self.config.team_size
            )));
        }
        roster.check_well_formed()?;
        if !roster.is_unassigned() {
            return Err(MixError::precondition("roster is already distributed; reset it first"));
        }
        Ok(())
    }
}

/// Every group must fit on an empty team: total size and each position.
fn check_groups(roster: &Roster, groups: &[AnchorageGroup]) -> Result<()> {
    for group in groups {
        if group.size() > roster.team_size() {
            return Err(MixError::precondition(format!(
                "anchorage {} has {} players, more than a team of {}",
                group.id,
                group.size(),
                roster.team_size()
            )));
        }
        for (position, capacity) in roster.capacity_map() {
            if group.count(position) > capacity {
                return Err(MixError::precondition(format!(
                    "anchorage {} holds {} {}, a team takes {}",
                    group.id,
                    group.count(position),
                    position,
                    capacity
                )));
            }
        }
    }
    Ok(())
}

/// Write a verified assignment into the roster and build both teams.
fn commit(roster: &mut Roster, assignment: &Assignment) -> Result<(Team, Team)> {
    assignment.verify(roster)?;

    for (id, team) in assignment.iter() {
        roster.set_team(id, team);
    }

    let caps = roster.capacity_map();
    let mut teams = [Team::new(1, caps.clone()), Team::new(2, caps)];
    for player in roster.all_players() {
        if let Some(side) = side_of(player.team) {
            teams[side].push(player.clone());
        }
    }
    let [one, two] = teams;
    Ok((one, two))
}

/// One-shot distribution driven by a [`MixRequest`], using the roster's
/// own configuration.
pub fn mix(roster: &mut Roster, request: &MixRequest) -> Result<(Team, Team)> {
    let config = roster.config().clone();
    let mut engine = match request.rng_seed {
        Some(seed) => DistributionEngine::with_seed(config, seed),
        None => DistributionEngine::new(config),
    };
    engine.distribute(roster, request.strategy, request.anchorages)
}
