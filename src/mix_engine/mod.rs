//! Core mixing engine: roster model, anchorage grouping and the two
//! distribution strategies.
//!
//! ## Module overview
//!
//! | Module       | Purpose |
//! |--------------|---------|
//! | `models`     | Shared types: positions, players, teams, requests |
//! | `config`     | Team size and skill bounds |
//! | `error`      | `MixError` and the crate `Result` alias |
//! | `roster`     | Registered players bucketed by position, with capacities |
//! | `anchorage`  | Groups of players that must share a team |
//! | `strategies` | Random and skill-balanced distribution |
//! | `engine`     | `DistributionEngine` — validation, dispatch, commit |

pub mod anchorage;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod roster;
pub mod strategies;

pub use config::MixConfig;
pub use engine::{mix, DistributionEngine};
pub use error::{MixError, Result};
pub use models::{MixRequest, Player, PlayerId, Position, Strategy, Team};
pub use roster::Roster;
