//! Fixed configuration handed to the engine by the presentation layer.

use serde::{Deserialize, Serialize};

use crate::mix_engine::error::Result;

/// Players per team in the seven-a-side format.
pub const DEFAULT_TEAM_SIZE: usize = 7;
pub const SKILL_MIN: u8 = 1;
pub const SKILL_MAX: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixConfig {
    /// Players on each of the two teams. The roster holds twice as many.
    pub team_size: usize,
    pub skill_min: u8,
    pub skill_max: u8,
}

impl Default for MixConfig {
    fn default() -> Self {
        MixConfig {
            team_size: DEFAULT_TEAM_SIZE,
            skill_min: SKILL_MIN,
            skill_max: SKILL_MAX,
        }
    }
}

impl MixConfig {
    /// Config for a given team size with the standard 1–5 skill scale.
    pub fn with_team_size(team_size: usize) -> Self {
        MixConfig { team_size, ..Self::default() }
    }

    /// Parse a config from JSON; missing fields fall back to the defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// 0 means "not yet rated" and is always accepted.
    pub fn skill_in_range(&self, skill: u8) -> bool {
        skill == 0 || (self.skill_min..=self.skill_max).contains(&skill)
    }
}
