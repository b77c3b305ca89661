//! Player-owned property collections.
//!
//! A `Collection` is a card container bound to an owner and an active set.
//! Whether a card may join is decided by the engine before insertion; the
//! collection itself only stores the binding.

use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use super::container::CardContainer;
use crate::cards::{ActiveSet, CardCatalog};
use crate::core::player::PlayerId;

/// Identifier for a collection. Allocated sequentially from 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CollectionId(pub u32);

impl CollectionId {
    /// Create a new collection ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CollectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Collection({})", self.0)
    }
}

/// A player's collection working toward a complete property set.
///
/// Dereferences to its [`CardContainer`] for card custody.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    id: CollectionId,
    player_id: PlayerId,
    active_set: Option<ActiveSet>,
    cards: CardContainer,
}

impl Collection {
    /// Create an empty, unbound collection.
    #[must_use]
    pub fn new(id: CollectionId, player_id: PlayerId) -> Self {
        Self {
            id,
            player_id,
            active_set: None,
            cards: CardContainer::new(),
        }
    }

    /// Rebuild a collection from saved parts.
    #[must_use]
    pub fn from_parts(
        id: CollectionId,
        player_id: PlayerId,
        active_set: Option<ActiveSet>,
        cards: CardContainer,
    ) -> Self {
        Self {
            id,
            player_id,
            active_set,
            cards,
        }
    }

    /// Collection identifier.
    #[must_use]
    pub fn id(&self) -> CollectionId {
        self.id
    }

    /// Owning player.
    #[must_use]
    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    /// Current set binding.
    #[must_use]
    pub fn active_set(&self) -> Option<ActiveSet> {
        self.active_set
    }

    /// Rebind the collection.
    pub fn set_active_set(&mut self, active_set: Option<ActiveSet>) {
        self.active_set = active_set;
    }

    /// The underlying container.
    #[must_use]
    pub fn container(&self) -> &CardContainer {
        &self.cards
    }

    /// Holds at least as many cards as the bound set requires.
    ///
    /// Unbound and ambiguous collections are never complete.
    #[must_use]
    pub fn is_complete(&self, catalog: &CardCatalog) -> bool {
        catalog
            .required_count(self.active_set)
            .is_some_and(|required| self.cards.count() >= required)
    }
}

impl Deref for Collection {
    type Target = CardContainer;

    fn deref(&self) -> &Self::Target {
        &self.cards
    }
}

impl DerefMut for Collection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.cards
    }
}
