//! Game orchestration.
//!
//! `GameEngine` owns every zone and the turn state and is the only thing
//! that moves cards. Actions report `ActionOutcome`; structural faults are
//! `GameError`s. `GameSnapshot` is the save/restore shape.

pub mod engine;
pub mod outcome;
pub mod snapshot;

pub use engine::{GameEngine, DEFAULT_SEED, WINNING_SET_COUNT};
pub use outcome::{ActionOutcome, RejectReason};
pub use snapshot::{
    CollectionSnapshot, GameSnapshot, PilesSnapshot, PlayerSnapshot, PlayersSnapshot, TurnSnapshot,
};
