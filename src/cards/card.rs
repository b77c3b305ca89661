//! Cards and their capability tags.
//!
//! A `Card` is created once per game from the catalog and then only moves
//! between containers. The only mutable part is a wildcard's current set
//! selection.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::property_set::{ActiveSet, PropertySetId};

/// Unique identifier for a card in the pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
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

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Capability tags that drive placement rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardTag {
    /// Money; bank-only.
    Cash,
    /// A plain property bound to one set.
    Property,
    /// A property that can represent several sets.
    WildProperty,
    /// A wild property that fits any set.
    SuperwildProperty,
    /// Augments a completed set (house, hotel).
    SetAugment,
}

/// Variant-specific state carried only by wildcards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WildSelection {
    /// Currently selected set.
    pub active: ActiveSet,
    /// Sets this card may represent, in cycling order.
    pub available: SmallVec<[PropertySetId; 2]>,
}

impl WildSelection {
    /// A wildcard choosing between `available`, starting on the first.
    #[must_use]
    pub fn new(available: &[PropertySetId]) -> Self {
        let active = available
            .first()
            .map_or(ActiveSet::Ambiguous, |&set| ActiveSet::Set(set));
        Self {
            active,
            available: available.iter().copied().collect(),
        }
    }

    /// A superwild: ambiguous selection, may sit in any set.
    #[must_use]
    pub fn superwild() -> Self {
        Self {
            active: ActiveSet::Ambiguous,
            available: PropertySetId::ALL.iter().copied().collect(),
        }
    }

    /// Move to the next available set, wrapping around.
    ///
    /// An unrecognised current selection restarts from the first entry.
    /// Returns the new selection, or `None` if there is nothing to pick.
    pub fn cycle(&mut self) -> Option<ActiveSet> {
        if self.available.is_empty() {
            return None;
        }
        let next = self
            .available
            .iter()
            .position(|&set| ActiveSet::Set(set) == self.active)
            .map_or(0, |i| (i + 1) % self.available.len());
        self.active = ActiveSet::Set(self.available[next]);
        Some(self.active)
    }
}

/// A card in the pool.
///
/// ```
/// use deal_engine::cards::{Card, CardId, CardTag, PropertySetId, ActiveSet};
///
/// let card = Card::property(CardId::new(4), "Pacific Avenue", 4, PropertySetId::GREEN);
/// assert!(card.has_tag(CardTag::Property));
/// assert_eq!(card.selected_set(), Some(ActiveSet::Set(PropertySetId::GREEN)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Unique identifier.
    pub id: CardId,

    /// Display name.
    pub name: String,

    /// Bank value in millions.
    pub value: u32,

    /// Capability tags.
    pub tags: SmallVec<[CardTag; 2]>,

    /// Fixed set for plain property cards.
    pub property_set: Option<PropertySetId>,

    /// Selection state, only for wildcards.
    pub wild: Option<WildSelection>,
}

impl Card {
    fn base(id: CardId, name: impl Into<String>, value: u32, tags: &[CardTag]) -> Self {
        Self {
            id,
            name: name.into(),
            value,
            tags: tags.iter().copied().collect(),
            property_set: None,
            wild: None,
        }
    }

    /// A money card.
    #[must_use]
    pub fn cash(id: CardId, value: u32) -> Self {
        Self::base(id, format!("{}M", value), value, &[CardTag::Cash])
    }

    /// A plain property card.
    #[must_use]
    pub fn property(id: CardId, name: impl Into<String>, value: u32, set: PropertySetId) -> Self {
        let mut card = Self::base(id, name, value, &[CardTag::Property]);
        card.property_set = Some(set);
        card
    }

    /// A wildcard that can represent any of `sets`.
    #[must_use]
    pub fn wild(id: CardId, value: u32, sets: &[PropertySetId]) -> Self {
        let name = sets
            .iter()
            .map(|set| set.key())
            .collect::<Vec<_>>()
            .join("/");
        let mut card = Self::base(id, format!("Wild {}", name), value, &[CardTag::WildProperty]);
        card.wild = Some(WildSelection::new(sets));
        card
    }

    /// A superwild card.
    #[must_use]
    pub fn superwild(id: CardId) -> Self {
        let mut card = Self::base(
            id,
            "Superwild",
            0,
            &[CardTag::WildProperty, CardTag::SuperwildProperty],
        );
        card.wild = Some(WildSelection::superwild());
        card
    }

    /// A set augment (house, hotel).
    #[must_use]
    pub fn set_augment(id: CardId, name: impl Into<String>, value: u32) -> Self {
        Self::base(id, name, value, &[CardTag::SetAugment])
    }

    /// Check for a capability tag.
    #[must_use]
    pub fn has_tag(&self, tag: CardTag) -> bool {
        self.tags.contains(&tag)
    }

    /// True for cards that may be placed in a collection.
    #[must_use]
    pub fn is_property_like(&self) -> bool {
        self.has_tag(CardTag::Property) || self.has_tag(CardTag::WildProperty)
    }

    /// True for wildcards whose selection can be cycled.
    #[must_use]
    pub fn is_recolorable(&self) -> bool {
        self.has_tag(CardTag::WildProperty) && !self.has_tag(CardTag::SuperwildProperty)
    }

    /// The set this card currently represents.
    #[must_use]
    pub fn selected_set(&self) -> Option<ActiveSet> {
        match (&self.wild, self.property_set) {
            (Some(wild), _) => Some(wild.active),
            (None, Some(set)) => Some(ActiveSet::Set(set)),
            (None, None) => None,
        }
    }
}
