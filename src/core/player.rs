//! Players and the registry that owns their zones.
//!
//! ## PlayerId
//!
//! Sequential identifier assigned at registration, starting from 1.
//!
//! ## PlayerRegistry
//!
//! Owns every player's hand and bank plus an id-keyed arena of collections.
//! Collections are created on demand and deleted explicitly; players keep an
//! ordered list of the collection ids they own.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::zones::{CardContainer, Collection, CollectionId};

/// Player identifier. The first registered player is `PlayerId(1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// A registered player and the zones they own.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    hand: CardContainer,
    bank: CardContainer,
    collections: Vec<CollectionId>,
}

impl Player {
    /// Create a player with empty zones.
    #[must_use]
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            hand: CardContainer::new(),
            bank: CardContainer::new(),
            collections: Vec::new(),
        }
    }

    /// Rebuild a player from saved zones; collections are re-attached
    /// separately.
    pub(crate) fn from_parts(id: PlayerId, hand: CardContainer, bank: CardContainer) -> Self {
        Self {
            id,
            hand,
            bank,
            collections: Vec::new(),
        }
    }

    /// Player identifier.
    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Cards in hand.
    #[must_use]
    pub fn hand(&self) -> &CardContainer {
        &self.hand
    }

    /// Cards in the bank.
    #[must_use]
    pub fn bank(&self) -> &CardContainer {
        &self.bank
    }

    /// Owned collection ids, in creation order.
    #[must_use]
    pub fn collection_ids(&self) -> &[CollectionId] {
        &self.collections
    }
}

/// Players plus the collection arena.
///
/// ```
/// use deal_engine::core::{PlayerId, PlayerRegistry};
///
/// let mut registry = PlayerRegistry::new();
/// let first = registry.add_player();
/// let second = registry.add_player();
///
/// assert_eq!(first, Some(PlayerId::new(1)));
/// assert_eq!(second, Some(PlayerId::new(2)));
///
/// let collection = registry.new_collection(PlayerId::new(2)).unwrap();
/// assert_eq!(registry.collections_for(PlayerId::new(2)).count(), 1);
/// assert!(registry.delete_collection(collection).is_some());
/// ```
#[derive(Clone, Debug)]
pub struct PlayerRegistry {
    players: Vec<Player>,
    collections: FxHashMap<CollectionId, Collection>,
    next_collection_id: u32,
}

impl Default for PlayerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            players: Vec::new(),
            collections: FxHashMap::default(),
            next_collection_id: 1,
        }
    }

    /// Register a player with the next sequential id.
    ///
    /// Returns `None` once the id space is exhausted.
    pub fn add_player(&mut self) -> Option<PlayerId> {
        let raw = u8::try_from(self.players.len() + 1).ok()?;
        let id = PlayerId::new(raw);
        self.players.push(Player::new(id));
        Some(id)
    }

    /// Re-register a player from saved state.
    ///
    /// Returns `false`, leaving the registry untouched, if the id is taken.
    pub(crate) fn insert_player(&mut self, player: Player) -> bool {
        if self.player(player.id).is_some() {
            return false;
        }
        self.players.push(player);
        true
    }

    /// Get a player.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| player.id == id)
    }

    fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|player| player.id == id)
    }

    /// All players, in registration order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Player ids, in registration order.
    #[must_use]
    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|player| player.id).collect()
    }

    /// Number of registered players.
    #[must_use]
    pub fn count(&self) -> usize {
        self.players.len()
    }

    /// A player's hand.
    #[must_use]
    pub fn hand(&self, id: PlayerId) -> Option<&CardContainer> {
        self.player(id).map(|player| &player.hand)
    }

    /// A player's hand, mutably.
    pub fn hand_mut(&mut self, id: PlayerId) -> Option<&mut CardContainer> {
        self.player_mut(id).map(|player| &mut player.hand)
    }

    /// A player's bank.
    #[must_use]
    pub fn bank(&self, id: PlayerId) -> Option<&CardContainer> {
        self.player(id).map(|player| &player.bank)
    }

    /// A player's bank, mutably.
    pub fn bank_mut(&mut self, id: PlayerId) -> Option<&mut CardContainer> {
        self.player_mut(id).map(|player| &mut player.bank)
    }

    /// Create an empty collection owned by `owner`.
    ///
    /// Returns `None` if the player is not registered.
    pub fn new_collection(&mut self, owner: PlayerId) -> Option<CollectionId> {
        let id = CollectionId::new(self.next_collection_id);
        self.player_mut(owner)?.collections.push(id);
        self.next_collection_id += 1;
        self.collections.insert(id, Collection::new(id, owner));
        Some(id)
    }

    /// Put a saved collection back into the arena under its owner.
    ///
    /// Returns `None` if the owner is unknown or the id is already in use.
    pub(crate) fn insert_collection(&mut self, collection: Collection) -> Option<()> {
        let id = collection.id();
        if self.collections.contains_key(&id) {
            return None;
        }
        self.player_mut(collection.player_id())?.collections.push(id);
        self.collections.insert(id, collection);
        Some(())
    }

    /// Get a collection.
    #[must_use]
    pub fn collection(&self, id: CollectionId) -> Option<&Collection> {
        self.collections.get(&id)
    }

    /// Get a collection, mutably.
    pub fn collection_mut(&mut self, id: CollectionId) -> Option<&mut Collection> {
        self.collections.get_mut(&id)
    }

    /// Remove a collection from the arena and from its owner.
    pub fn delete_collection(&mut self, id: CollectionId) -> Option<Collection> {
        let collection = self.collections.remove(&id)?;
        if let Some(owner) = self.player_mut(collection.player_id()) {
            owner.collections.retain(|&owned| owned != id);
        }
        Some(collection)
    }

    /// A player's collections, in creation order.
    pub fn collections_for(&self, owner: PlayerId) -> impl Iterator<Item = &Collection> {
        self.player(owner)
            .map(|player| player.collections.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|id| self.collections.get(id))
    }

    /// Total number of live collections.
    #[must_use]
    pub fn collection_count(&self) -> usize {
        self.collections.len()
    }

    /// Id the next new collection will receive.
    #[must_use]
    pub fn next_collection_id(&self) -> CollectionId {
        CollectionId::new(self.next_collection_id)
    }

    pub(crate) fn set_next_collection_id(&mut self, id: CollectionId) {
        self.next_collection_id = id.raw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;

    #[test]
    fn test_player_id_basics() {
        let p1 = PlayerId::new(1);
        assert_eq!(p1.raw(), 1);
        assert_eq!(format!("{}", p1), "Player 1");
    }

    #[test]
    fn test_sequential_registration() {
        let mut registry = PlayerRegistry::new();

        for expected in 1..=4 {
            assert_eq!(registry.add_player(), Some(PlayerId::new(expected)));
        }
        assert_eq!(registry.count(), 4);
        assert_eq!(
            registry.player_ids(),
            vec![PlayerId::new(1), PlayerId::new(2), PlayerId::new(3), PlayerId::new(4)]
        );
    }

    #[test]
    fn test_registration_caps_at_u8() {
        let mut registry = PlayerRegistry::new();
        for _ in 0..255 {
            assert!(registry.add_player().is_some());
        }
        assert_eq!(registry.add_player(), None);
    }

    #[test]
    fn test_hand_and_bank_are_separate() {
        let mut registry = PlayerRegistry::new();
        let player = registry.add_player().unwrap();

        registry.hand_mut(player).unwrap().add_card(CardId::new(1)).unwrap();
        registry.bank_mut(player).unwrap().add_card(CardId::new(2)).unwrap();

        assert!(registry.hand(player).unwrap().has_card(CardId::new(1)));
        assert!(!registry.hand(player).unwrap().has_card(CardId::new(2)));
        assert!(registry.bank(player).unwrap().has_card(CardId::new(2)));
    }

    #[test]
    fn test_unknown_player() {
        let mut registry = PlayerRegistry::new();

        assert!(registry.player(PlayerId::new(9)).is_none());
        assert!(registry.hand_mut(PlayerId::new(9)).is_none());
        assert!(registry.new_collection(PlayerId::new(9)).is_none());
        assert_eq!(registry.collections_for(PlayerId::new(9)).count(), 0);
        assert_eq!(registry.next_collection_id(), CollectionId::new(1));
    }

    #[test]
    fn test_collection_lifecycle() {
        let mut registry = PlayerRegistry::new();
        let p1 = registry.add_player().unwrap();
        let p2 = registry.add_player().unwrap();

        let a = registry.new_collection(p1).unwrap();
        let b = registry.new_collection(p2).unwrap();
        let c = registry.new_collection(p1).unwrap();

        assert_eq!((a, b, c), (CollectionId::new(1), CollectionId::new(2), CollectionId::new(3)));
        assert_eq!(registry.collection(b).unwrap().player_id(), p2);

        let owned: Vec<_> = registry.collections_for(p1).map(Collection::id).collect();
        assert_eq!(owned, vec![a, c]);

        let removed = registry.delete_collection(a).unwrap();
        assert_eq!(removed.id(), a);
        assert!(registry.collection(a).is_none());
        assert_eq!(registry.player(p1).unwrap().collection_ids(), &[c]);

        // Ids are never reused
        assert_eq!(registry.new_collection(p2), Some(CollectionId::new(4)));
        assert_eq!(registry.collection_count(), 3);
    }

    #[test]
    fn test_restored_ids_are_not_reused() {
        let mut registry = PlayerRegistry::new();
        let p1 = PlayerId::new(1);
        let empty = || Player::from_parts(p1, CardContainer::new(), CardContainer::new());

        assert!(registry.insert_player(empty()));
        assert!(!registry.insert_player(empty()));
        assert_eq!(registry.count(), 1);

        let first = Collection::from_parts(
            CollectionId::new(2),
            p1,
            None,
            CardContainer::from_cards([CardId::new(11)]).unwrap(),
        );
        assert_eq!(registry.insert_collection(first), Some(()));

        let clash = Collection::new(CollectionId::new(2), p1);
        assert_eq!(registry.insert_collection(clash), None);
        assert_eq!(registry.collection(CollectionId::new(2)).unwrap().count(), 1);
        assert_eq!(registry.player(p1).unwrap().collection_ids(), &[CollectionId::new(2)]);

        let orphan = Collection::new(CollectionId::new(3), PlayerId::new(4));
        assert_eq!(registry.insert_collection(orphan), None);
    }
}
