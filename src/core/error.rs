//! Structural error types.
//!
//! Rule violations (wrong phase, spent action budget, foreign cards) are
//! never errors; the engine reports them through
//! [`ActionOutcome`](crate::rules::ActionOutcome) and leaves state unchanged.
//! The errors here signal a broken custody invariant or an unusable snapshot.

use thiserror::Error;

use crate::cards::CardId;
use crate::core::player::PlayerId;

/// Faults raised by a single card container.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ContainerError {
    #[error("{0} is already in this container")]
    DuplicateCard(CardId),
    #[error("{0} is not in this container")]
    CardNotFound(CardId),
    #[error("cannot take a card from an empty container")]
    EmptyContainer,
}

/// Faults raised by the game engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Container(#[from] ContainerError),
    #[error("{0} is not registered")]
    UnknownPlayer(PlayerId),
    #[error("corrupt snapshot: {0}")]
    CorruptSnapshot(String),
    #[error("snapshot encoding failed: {0}")]
    Encoding(String),
}

impl From<bincode::Error> for GameError {
    fn from(err: bincode::Error) -> Self {
        Self::Encoding(err.to_string())
    }
}
