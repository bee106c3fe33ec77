//! The registered players, bucketed by position.
//!
//! A [`Roster`] is built once from validated input and then read by the
//! strategies. The only writes after construction come from upstream
//! collaborators (`set_skill`, `set_anchorage`) and from the engine's
//! commit step, which stores each player's team number.

use std::collections::{BTreeMap, HashSet};
use serde::Serialize;

use crate::mix_engine::{
    config::MixConfig,
    error::{MixError, Result},
    models::{Player, PlayerId, Position, PositionCounts, UNASSIGNED},
};

#[derive(Debug, Clone, Serialize)]
pub struct Roster {
    players: BTreeMap<Position, Vec<Player>>,
    config: MixConfig,
}

impl Roster {
    /// Bucket `players` by position, keeping their registration order, and
    /// check the roster invariants against `config`.
    pub fn new(players: Vec<Player>, config: &MixConfig) -> Result<Self> {
        let mut buckets: BTreeMap<Position, Vec<Player>> =
            Position::ALL.iter().map(|&p| (p, Vec::new())).collect();
        for player in players {
            buckets.entry(player.position).or_default().push(player);
        }

        let roster = Roster { players: buckets, config: config.clone() };
        roster.check_well_formed()?;
        roster.check_players(config)?;
        Ok(roster)
    }

    /// Parse a JSON array of players and validate it like [`Roster::new`].
    pub fn from_json(json: &str, config: &MixConfig) -> Result<Self> {
        let players: Vec<Player> = serde_json::from_str(json)?;
        Self::new(players, config)
    }

    /// Names are unique and every skill fits the configured scale.
    fn check_players(&self, config: &MixConfig) -> Result<()> {
        let mut names = HashSet::new();
        for player in self.all_players() {
            if !names.insert(player.name.as_str()) {
                return Err(MixError::precondition(format!(
                    "player name '{}' is registered twice",
                    player.name
                )));
            }
            if !config.skill_in_range(player.skill) {
                return Err(MixError::precondition(format!(
                    "skill {} of '{}' outside {}..={}",
                    player.skill, player.name, config.skill_min, config.skill_max
                )));
            }
        }
        Ok(())
    }

    /// Every position list must split evenly and the roster must fill
    /// exactly two teams.
    pub fn check_well_formed(&self) -> Result<()> {
        for (position, players) in &self.players {
            if players.len() % 2 != 0 {
                return Err(MixError::precondition(format!(
                    "{} has {} players, which cannot be split evenly",
                    position,
                    players.len()
                )));
            }
        }
        let expected = self.config.team_size * 2;
        if self.total_players() != expected {
            return Err(MixError::precondition(format!(
                "roster has {} players, expected {} for teams of {}",
                self.total_players(),
                expected,
                self.config.team_size
            )));
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Read-only view
    // -----------------------------------------------------------------------

    pub fn config(&self) -> &MixConfig {
        &self.config
    }

    pub fn team_size(&self) -> usize {
        self.config.team_size
    }

    pub fn players(&self, position: Position) -> &[Player] {
        self.players.get(&position).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `None` for an id that does not belong to this roster.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id.position).and_then(|list| list.get(id.index))
    }

    /// Per-team capacity for `position`: half of its registered players.
    pub fn capacity(&self, position: Position) -> usize {
        self.players(position).len() / 2
    }

    pub fn capacities(&self) -> PositionCounts {
        let mut caps = [0; Position::COUNT];
        for p in Position::ALL {
            caps[p.index()] = self.capacity(p);
        }
        caps
    }

    pub fn capacity_map(&self) -> BTreeMap<Position, usize> {
        Position::ALL.iter().map(|&p| (p, self.capacity(p))).collect()
    }

    pub fn total_players(&self) -> usize {
        self.players.values().map(Vec::len).sum()
    }

    /// Every player with its id, in position order then registration order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &Player)> {
        self.players.iter().flat_map(|(&position, players)| {
            players
                .iter()
                .enumerate()
                .map(move |(index, p)| (PlayerId { position, index }, p))
        })
    }

    pub fn all_players(&self) -> impl Iterator<Item = &Player> {
        self.players.values().flatten()
    }

    /// True when no player carries a team number.
    pub fn is_unassigned(&self) -> bool {
        self.all_players().all(|p| p.team == UNASSIGNED)
    }

    /// Immutable `name → team number` record of the current assignment.
    pub fn assignment(&self) -> BTreeMap<String, u8> {
        self.all_players().map(|p| (p.name.clone(), p.team)).collect()
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Clear every team number so the roster can be distributed again.
    pub fn reset(&mut self) {
        for player in self.players.values_mut().flatten() {
            player.team = UNASSIGNED;
        }
    }

    pub fn set_skill(&mut self, name: &str, skill: u8) -> Result<()> {
        if !self.config.skill_in_range(skill) {
            return Err(MixError::precondition(format!(
                "skill {} of '{}' outside {}..={}",
                skill, name, self.config.skill_min, self.config.skill_max
            )));
        }
        self.find_mut(name)?.skill = skill;
        Ok(())
    }

    pub fn set_anchorage(&mut self, name: &str, anchorage: u32) -> Result<()> {
        self.find_mut(name)?.anchorage = anchorage;
        Ok(())
    }

    /// Back to "not yet rated" for everyone.
    pub fn reset_skills(&mut self) {
        for player in self.players.values_mut().flatten() {
            player.skill = 0;
        }
    }

    pub fn clear_anchorages(&mut self) {
        for player in self.players.values_mut().flatten() {
            player.anchorage = 0;
        }
    }

    pub(crate) fn set_team(&mut self, id: PlayerId, team: u8) {
        if let Some(player) = self
            .players
            .get_mut(&id.position)
            .and_then(|list| list.get_mut(id.index))
        {
            player.team = team;
        }
    }

    fn find_mut(&mut self, name: &str) -> Result<&mut Player> {
        self.players
            .values_mut()
            .flatten()
            .find(|p| p.name == name)
            .ok_or_else(|| MixError::precondition(format!("no player named '{}'", name)))
    }
}
