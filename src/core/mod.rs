//! Core engine types: players, RNG, configuration, errors.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use config::{GameConfig, Scenario, UnknownScenario};
pub use error::{ContainerError, GameError};
pub use player::{Player, PlayerId, PlayerRegistry};
pub use rng::{GameRng, GameRngState};
