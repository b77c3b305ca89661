//! # deal-engine
//!
//! A deterministic rules engine for a property-trading card game: collect
//! three complete property sets of different colours to win.
//!
//! ## Design Principles
//!
//! 1. **Single Custody**: Every card id lives in exactly one zone at a time.
//!    Cards only move through `CardContainer::give_card` / `add_card`.
//!
//! 2. **Deterministic**: One seeded ChaCha8 stream drives every shuffle, so
//!    seed + scenario + action sequence fully determine the game.
//!
//! 3. **Silent Rejection**: Illegal actions leave state untouched and return
//!    `ActionOutcome::Rejected`. Only broken invariants are errors.
//!
//! ## Architecture
//!
//! - **Collection Arena**: Collections live in an id-keyed map inside
//!   `PlayerRegistry`; players hold ids only.
//!
//! - **Persistent Data Structures**: Containers are `im` vectors, so cloning
//!   a whole game for lookahead is cheap.
//!
//! ## Modules
//!
//! - `core`: Players, RNG, configuration, errors
//! - `cards`: Cards, property sets, scenario catalogs
//! - `zones`: Card containers and collections
//! - `turn`: Turn phases and sequencing
//! - `rules`: The game engine, action outcomes, snapshots

pub mod core;
pub mod cards;
pub mod zones;
pub mod turn;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    ContainerError, GameConfig, GameError, GameRng, GameRngState, Player, PlayerId,
    PlayerRegistry, Scenario,
};

pub use crate::cards::{ActiveSet, Card, CardCatalog, CardId, CardTag, PropertySet, PropertySetId};

pub use crate::zones::{CardContainer, Collection, CollectionId};

pub use crate::turn::{Phase, TurnManager, TurnState, TurnTag};

pub use crate::rules::{ActionOutcome, GameEngine, GameSnapshot, RejectReason};
