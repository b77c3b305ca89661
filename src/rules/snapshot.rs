//! Save/restore shape of a game.
//!
//! A snapshot is a flat structural copy: ids and orders only. Card
//! definitions are not included; they are rebuilt from the scenario's
//! catalog on restore. Encoding is bincode.

use serde::{Deserialize, Serialize};

use crate::cards::{ActiveSet, CardId};
use crate::core::config::Scenario;
use crate::core::error::GameError;
use crate::core::player::PlayerId;
use crate::core::rng::GameRngState;
use crate::turn::{Phase, TurnTag};
use crate::zones::CollectionId;

/// Complete saved game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub seed: String,
    pub scenario: Scenario,
    pub has_started: bool,
    pub has_ended: bool,
    pub min_player_limit: usize,
    pub winner: Option<PlayerId>,
    /// Position in the shuffle stream, so draws continue exactly.
    pub rng: GameRngState,
    pub players: PlayersSnapshot,
    pub turn: Option<TurnSnapshot>,
    pub piles: PilesSnapshot,
    /// Current selection of every wildcard, in card id order.
    pub wild_selections: Vec<(CardId, ActiveSet)>,
}

/// Players in registration order plus the collection id counter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayersSnapshot {
    pub players: Vec<PlayerSnapshot>,
    pub next_collection_id: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub hand: Vec<CardId>,
    pub bank: Vec<CardId>,
    pub collections: Vec<CollectionSnapshot>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSnapshot {
    pub id: CollectionId,
    pub active_set: Option<ActiveSet>,
    pub cards: Vec<CardId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSnapshot {
    pub player_id: PlayerId,
    pub phase: Phase,
    pub action_count: u32,
    pub tags: Vec<TurnTag>,
}

/// Shared, unowned zones.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PilesSnapshot {
    pub deck: Vec<CardId>,
    pub discard: Vec<CardId>,
    pub active: Vec<CardId>,
}

impl GameSnapshot {
    /// Encode to bytes.
    pub fn encode(&self) -> Result<Vec<u8>, GameError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from bytes produced by [`encode`](Self::encode).
    pub fn decode(bytes: &[u8]) -> Result<Self, GameError> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Every card id held by any zone, with repeats.
    pub fn held_cards(&self) -> impl Iterator<Item = CardId> + '_ {
        let players = self.players.players.iter().flat_map(|player| {
            player
                .hand
                .iter()
                .chain(&player.bank)
                .chain(player.collections.iter().flat_map(|c| &c.cards))
        });
        players
            .chain(&self.piles.deck)
            .chain(&self.piles.discard)
            .chain(&self.piles.active)
            .copied()
    }
}
