//! Card custody zones.
//!
//! A `CardContainer` holds an ordered sequence of card ids. Index 0 is the
//! bottom, the last index is the top (the end `pop` draws from). Every zone in
//! the game (deck, discard pile, active pile, hands, banks, collections) is a
//! container.
//!
//! Containers only guard against duplicates within themselves. Keeping a card
//! in exactly one container across the whole game is the engine's job.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::error::ContainerError;
use crate::core::rng::GameRng;

/// An ordered set of card ids.
///
/// Backed by a persistent vector so cloning a whole game is cheap.
///
/// ```
/// use deal_engine::zones::CardContainer;
/// use deal_engine::cards::CardId;
///
/// let mut deck = CardContainer::new();
/// deck.add_cards([CardId::new(1), CardId::new(2)]).unwrap();
///
/// assert_eq!(deck.pop(), Ok(CardId::new(2)));
/// assert_eq!(deck.count(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardContainer {
    cards: Vector<CardId>,
}

impl CardContainer {
    /// Create an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a card to the top.
    pub fn add_card(&mut self, card: CardId) -> Result<(), ContainerError> {
        if self.has_card(card) {
            return Err(ContainerError::DuplicateCard(card));
        }
        self.cards.push_back(card);
        Ok(())
    }

    /// Build a container holding `cards`, bottom to top.
    pub fn from_cards(cards: impl IntoIterator<Item = CardId>) -> Result<Self, ContainerError> {
        let mut container = Self::new();
        container.add_cards(cards)?;
        Ok(container)
    }

    /// Add several cards to the top, in order.
    ///
    /// Either every card is added or none is: duplicates (against this
    /// container or within `cards`) are detected before anything moves.
    pub fn add_cards(&mut self, cards: impl IntoIterator<Item = CardId>) -> Result<(), ContainerError> {
        let incoming: Vec<CardId> = cards.into_iter().collect();
        for (i, &card) in incoming.iter().enumerate() {
            if self.has_card(card) || incoming[..i].contains(&card) {
                return Err(ContainerError::DuplicateCard(card));
            }
        }
        self.cards.extend(incoming);
        Ok(())
    }

    /// Remove and return a specific card.
    pub fn give_card(&mut self, card: CardId) -> Result<CardId, ContainerError> {
        let index = self
            .cards
            .index_of(&card)
            .ok_or(ContainerError::CardNotFound(card))?;
        Ok(self.cards.remove(index))
    }

    /// Remove and return the requested cards that are present.
    ///
    /// Unlike [`give_card`](Self::give_card), ids that are not held here are
    /// skipped without error.
    pub fn give_cards(&mut self, cards: &[CardId]) -> Vec<CardId> {
        cards
            .iter()
            .filter_map(|&card| self.give_card(card).ok())
            .collect()
    }

    /// Remove and return the top card.
    pub fn pop(&mut self) -> Result<CardId, ContainerError> {
        self.cards.pop_back().ok_or(ContainerError::EmptyContainer)
    }

    /// Check if a card is held here.
    #[must_use]
    pub fn has_card(&self, card: CardId) -> bool {
        self.cards.contains(&card)
    }

    /// Number of cards held.
    #[must_use]
    pub fn count(&self) -> usize {
        self.cards.len()
    }

    /// Check if the container is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// All card ids, bottom to top.
    #[must_use]
    pub fn card_ids(&self) -> Vec<CardId> {
        self.cards.iter().copied().collect()
    }

    /// Iterate card ids, bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().copied()
    }

    /// Shuffle in place with Fisher-Yates.
    ///
    /// Walks from the top down, swapping each position `i` with
    /// `rng.next_int(i + 1)`, so the result depends only on the rng stream.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        for i in (1..self.cards.len()).rev() {
            let j = rng.next_int(i + 1);
            self.cards.swap(i, j);
        }
    }
}
