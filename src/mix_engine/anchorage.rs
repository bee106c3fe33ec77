use std::collections::BTreeMap;

use crate::mix_engine::{
    models::{PlayerId, Position, PositionCounts},
    roster::Roster,
};

/// Players sharing one positive anchorage id. Placed as a single unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorageGroup {
    pub id: u32,
    /// Members in roster order.
    pub members: Vec<PlayerId>,
    /// Members per position, indexed by [`Position::index`].
    pub counts: PositionCounts,
}

impl AnchorageGroup {
    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn count(&self, position: Position) -> usize {
        self.counts[position.index()]
    }
}

/// Collect the anchorage groups of `roster`, largest first.
///
/// Ties go to the lower anchorage id. Placing the most constrained groups
/// first leaves the most room for the ones that follow. Unanchored players
/// are not part of the result.
pub fn group(roster: &Roster) -> Vec<AnchorageGroup> {
    let mut by_id: BTreeMap<u32, AnchorageGroup> = BTreeMap::new();
    for (id, player) in roster.iter().filter(|(_, p)| p.is_anchored()) {
        let group = by_id.entry(player.anchorage).or_insert_with(|| AnchorageGroup {
            id: player.anchorage,
            members: Vec::new(),
            counts: [0; Position::COUNT],
        });
        group.members.push(id);
        group.counts[id.position.index()] += 1;
    }

    // BTreeMap yields ascending ids; a stable sort keeps that order on ties.
    let mut groups: Vec<AnchorageGroup> = by_id.into_values().collect();
    groups.sort_by(|a, b| b.size().cmp(&a.size()));
    groups
}

/// Players that belong to no anchorage group, in roster order.
pub fn unanchored(roster: &Roster) -> Vec<PlayerId> {
    roster
        .iter()
        .filter(|(_, p)| !p.is_anchored())
        .map(|(id, _)| id)
        .collect()
}
