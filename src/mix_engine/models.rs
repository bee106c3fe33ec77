use std::collections::BTreeMap;
use std::fmt;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

/// Role categories. Declaration order drives iteration and display order,
/// and `Ord` follows it so `BTreeMap<Position, _>` keeps that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Position {
    CentralDefender,
    LateralDefender,
    Midfielder,
    Forward,
    Goalkeeper,
}

impl Position {
    pub const COUNT: usize = 5;

    pub const ALL: [Position; Position::COUNT] = [
        Position::CentralDefender,
        Position::LateralDefender,
        Position::Midfielder,
        Position::Forward,
        Position::Goalkeeper,
    ];

    /// Dense index into per-position arrays.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Position::CentralDefender => "Central Defenders",
            Position::LateralDefender => "Lateral Defenders",
            Position::Midfielder      => "Midfielders",
            Position::Forward         => "Forwards",
            Position::Goalkeeper      => "Goalkeepers",
        };
        write!(f, "{}", s)
    }
}

/// Player count per position, indexed by [`Position::index`].
pub type PositionCounts = [usize; Position::COUNT];

// ---------------------------------------------------------------------------
// Players
// ---------------------------------------------------------------------------

/// Team number of a player who has not been distributed yet.
pub const UNASSIGNED: u8 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub position: Position,
    /// 1..=5, 0 while unrated.
    #[serde(default)]
    pub skill: u8,
    /// 0 when the player is not anchored to anyone.
    #[serde(default)]
    pub anchorage: u32,
    /// 0 until the engine assigns team 1 or 2.
    #[serde(default)]
    pub team: u8,
}

impl Player {
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Player {
            name: name.into(),
            position,
            skill: 0,
            anchorage: 0,
            team: UNASSIGNED,
        }
    }

    pub fn with_skill(mut self, skill: u8) -> Self {
        self.skill = skill;
        self
    }

    pub fn anchored_to(mut self, anchorage: u32) -> Self {
        self.anchorage = anchorage;
        self
    }

    pub fn is_anchored(&self) -> bool {
        self.anchorage > 0
    }
}

/// Stable handle to a player inside a [`Roster`](crate::Roster):
/// its position and its index in that position's list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerId {
    pub position: Position,
    pub index: usize,
}

// ---------------------------------------------------------------------------
// Teams
// ---------------------------------------------------------------------------

/// One side of a finished distribution. Holds snapshots of its players,
/// meant for read-only display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    number: u8,
    players: BTreeMap<Position, Vec<Player>>,
    capacity: BTreeMap<Position, usize>,
}

impl Team {
    /// Empty team `number` (1 or 2) with the given per-position capacities.
    pub fn new(number: u8, capacity: BTreeMap<Position, usize>) -> Self {
        let players = capacity.keys().map(|&p| (p, Vec::new())).collect();
        Team { number, players, capacity }
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn players(&self, position: Position) -> &[Player] {
        self.players.get(&position).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All players in position order.
    pub fn all_players(&self) -> impl Iterator<Item = &Player> {
        self.players.values().flatten()
    }

    pub fn player_count(&self) -> usize {
        self.players.values().map(Vec::len).sum()
    }

    pub fn skill(&self) -> u32 {
        self.all_players().map(|p| u32::from(p.skill)).sum()
    }

    pub fn capacity(&self, position: Position) -> usize {
        self.capacity.get(&position).copied().unwrap_or(0)
    }

    pub(crate) fn push(&mut self, player: Player) {
        self.players.entry(player.position).or_default().push(player);
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Team {} ({} players, skill {})", self.number, self.player_count(), self.skill())?;
        for (position, players) in &self.players {
            if players.is_empty() {
                continue;
            }
            let names: Vec<&str> = players.iter().map(|p| p.name.as_str()).collect();
            writeln!(
                f,
                "  {} ({}/{}): {}",
                position,
                players.len(),
                self.capacity(*position),
                names.join(", ")
            )?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    Random,
    SkillBalanced,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Random        => write!(f, "Random mix"),
            Strategy::SkillBalanced => write!(f, "Skill-balanced mix"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MixRequest {
    pub strategy: Strategy,
    /// Keep anchored players together.
    #[serde(default)]
    pub anchorages: bool,
    /// Fixed seed for reproducible splits; `None` draws from entropy.
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl MixRequest {
    /// Request with anchorages off and an entropy-seeded generator.
    pub fn new(strategy: Strategy) -> Self {
        MixRequest { strategy, anchorages: false, rng_seed: None }
    }
}
