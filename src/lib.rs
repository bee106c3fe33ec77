//! # team_mixer
//!
//! Splits a roster of players into two teams of equal size.
//!
//! Players are registered by position (central defender, lateral defender,
//! midfielder, forward, goalkeeper). Each position is split evenly: a team
//! takes exactly half of the players registered for it. Players can be
//! *anchored* together, meaning they must end up on the same team.
//!
//! ## How it works
//!
//! 1. Build a [`Roster`] from a list of [`Player`]s and a [`MixConfig`].
//!    Construction rejects rosters that cannot be split evenly.
//! 2. Pick a [`Strategy`]: `Random` flips coins per position and per
//!    anchorage group; `SkillBalanced` searches every feasible split for the
//!    smallest difference in summed skill.
//! 3. Call [`DistributionEngine::distribute`] (or [`mix`] with a
//!    [`MixRequest`]). Each player's `team` field is set to 1 or 2 and both
//!    [`Team`]s are returned for display.
//!
//! ## Quick start
//!
//! ```rust
//! use team_mixer::{mix, MixConfig, MixRequest, Player, Position, Roster, Strategy};
//!
//! let players = vec![
//!     Player::new("Ana", Position::Forward).with_skill(4),
//!     Player::new("Beto", Position::Forward).with_skill(2),
//!     Player::new("Caro", Position::Goalkeeper).with_skill(3).anchored_to(1),
//!     Player::new("Dani", Position::Goalkeeper).with_skill(5),
//! ];
//! let mut roster = Roster::new(players, &MixConfig::with_team_size(2)).unwrap();
//!
//! let (one, two) = mix(&mut roster, &MixRequest {
//!     strategy: Strategy::SkillBalanced,
//!     anchorages: true,
//!     rng_seed: Some(42),
//! }).unwrap();
//!
//! assert_eq!(one.player_count() + two.player_count(), 4);
//! println!("{one}{two}");
//! ```

pub mod mix_engine;

// Convenience re-exports so callers can use `team_mixer::mix` directly
// without reaching into `mix_engine::`.
pub use mix_engine::{
    mix, DistributionEngine, MixConfig, MixError, MixRequest, Player, PlayerId, Position, Result,
    Roster, Strategy, Team,
};

#[cfg(test)]
mod tests;
