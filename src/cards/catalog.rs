//! Card catalog: the static card pool and property sets for a scenario.
//!
//! The catalog is read-only once built. Card ids are assigned sequentially
//! from 1 in catalog order, so a scenario always yields the same pool with
//! the same ids.

use rustc_hash::FxHashMap;

use super::card::{Card, CardId};
use super::property_set::{ActiveSet, PropertySet, PropertySetId};
use crate::core::config::Scenario;

const CASH_VALUES: [(u32, usize); 6] = [(1, 6), (2, 5), (3, 3), (4, 3), (5, 2), (10, 1)];

/// (set, display name, colour, card value, rent, property names)
type SetSpec = (PropertySetId, &'static str, &'static str, u32, &'static [u32], &'static [&'static str]);

const PROPERTY_SETS: [SetSpec; 10] = [
    (PropertySetId::BROWN, "Brown", "#8B4513", 1, &[1, 2],
        &["Baltic Avenue", "Mediterranean Avenue"]),
    (PropertySetId::DARK_BLUE, "Dark Blue", "#0000CD", 4, &[3, 8],
        &["Boardwalk", "Park Place"]),
    (PropertySetId::GREEN, "Green", "#008000", 4, &[2, 4, 7],
        &["North Carolina Avenue", "Pacific Avenue", "Pennsylvania Avenue"]),
    (PropertySetId::LIGHT_BLUE, "Light Blue", "#87CEEB", 1, &[1, 2, 3],
        &["Connecticut Avenue", "Oriental Avenue", "Vermont Avenue"]),
    (PropertySetId::ORANGE, "Orange", "#FFA500", 2, &[1, 3, 5],
        &["New York Avenue", "St. James Place", "Tennessee Avenue"]),
    (PropertySetId::PINK, "Pink", "#FF69B4", 2, &[1, 2, 4],
        &["St. Charles Place", "Virginia Avenue", "States Avenue"]),
    (PropertySetId::BLACK, "Railroad", "#000000", 2, &[1, 2, 3, 4],
        &["Short Line", "B. & O. Railroad", "Reading Railroad", "Pennsylvania Railroad"]),
    (PropertySetId::RED, "Red", "#FF0000", 3, &[2, 3, 6],
        &["Kentucky Avenue", "Indiana Avenue", "Illinois Avenue"]),
    (PropertySetId::YELLOW, "Yellow", "#FFD700", 3, &[2, 4, 6],
        &["Atlantic Avenue", "Marvin Gardens", "Ventnor Avenue"]),
    (PropertySetId::UTILITY, "Utility", "#C0C0C0", 2, &[1, 2],
        &["Electric Company", "Water Works"]),
];

const WILDS: [(u32, [PropertySetId; 2]); 9] = [
    (4, [PropertySetId::DARK_BLUE, PropertySetId::GREEN]),
    (4, [PropertySetId::GREEN, PropertySetId::BLACK]),
    (4, [PropertySetId::LIGHT_BLUE, PropertySetId::BLACK]),
    (1, [PropertySetId::LIGHT_BLUE, PropertySetId::BROWN]),
    (2, [PropertySetId::PINK, PropertySetId::ORANGE]),
    (2, [PropertySetId::PINK, PropertySetId::ORANGE]),
    (3, [PropertySetId::RED, PropertySetId::YELLOW]),
    (3, [PropertySetId::RED, PropertySetId::YELLOW]),
    (2, [PropertySetId::BLACK, PropertySetId::UTILITY]),
];

const SUPERWILD_COUNT: usize = 2;

const SET_AUGMENTS: [(&str, u32, usize); 2] = [("House", 3, 3), ("Hotel", 4, 2)];

/// Registry of card definitions and property sets for one scenario.
///
/// ## Example
///
/// ```
/// use deal_engine::cards::{CardCatalog, CardId};
/// use deal_engine::core::Scenario;
///
/// let catalog = CardCatalog::for_scenario(Scenario::CashOnly);
///
/// assert_eq!(catalog.len(), 20);
/// assert!(catalog.card(CardId::new(1)).is_some());
/// assert!(catalog.card(CardId::new(21)).is_none());
/// ```
#[derive(Clone, Debug)]
pub struct CardCatalog {
    scenario: Scenario,
    cards: Vec<Card>,
    index: FxHashMap<CardId, usize>,
    property_sets: Vec<PropertySet>,
}

impl CardCatalog {
    /// Build the catalog for a scenario.
    #[must_use]
    pub fn for_scenario(scenario: Scenario) -> Self {
        let mut catalog = Self {
            scenario,
            cards: Vec::new(),
            index: FxHashMap::default(),
            property_sets: PROPERTY_SETS
                .iter()
                .map(|&(id, name, colour, _, rent, names)| {
                    PropertySet::new(id, name, names.len())
                        .with_colour(colour)
                        .with_rent(rent)
                })
                .collect(),
        };

        let (cash, properties, wilds, augments) = match scenario {
            Scenario::CashOnly => (true, false, false, false),
            Scenario::PropertyOnly => (false, true, false, false),
            Scenario::PropertyPlusWild => (false, true, true, false),
            Scenario::Default => (true, true, true, true),
        };

        if cash {
            for (value, count) in CASH_VALUES {
                for _ in 0..count {
                    let id = catalog.next_id();
                    catalog.register(Card::cash(id, value));
                }
            }
        }

        if properties {
            for &(set, _, _, value, _, names) in &PROPERTY_SETS {
                for name in names {
                    let id = catalog.next_id();
                    catalog.register(Card::property(id, *name, value, set));
                }
            }
        }

        if wilds {
            for (value, sets) in WILDS {
                let id = catalog.next_id();
                catalog.register(Card::wild(id, value, &sets));
            }
            for _ in 0..SUPERWILD_COUNT {
                let id = catalog.next_id();
                catalog.register(Card::superwild(id));
            }
        }

        if augments {
            for (name, value, count) in SET_AUGMENTS {
                for _ in 0..count {
                    let id = catalog.next_id();
                    catalog.register(Card::set_augment(id, name, value));
                }
            }
        }

        catalog
    }

    fn next_id(&self) -> CardId {
        CardId::new(self.cards.len() as u32 + 1)
    }

    fn register(&mut self, card: Card) {
        self.index.insert(card.id, self.cards.len());
        self.cards.push(card);
    }

    /// Scenario this catalog was built for.
    #[must_use]
    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.index.get(&id).map(|&i| &self.cards[i])
    }

    /// All cards, in catalog order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// All card ids, in catalog order.
    #[must_use]
    pub fn card_ids(&self) -> Vec<CardId> {
        self.cards.iter().map(|card| card.id).collect()
    }

    /// Check if a card ID is in the pool.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.index.contains_key(&id)
    }

    /// Number of cards in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the pool is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Get a property set by ID.
    #[must_use]
    pub fn property_set(&self, id: PropertySetId) -> Option<&PropertySet> {
        self.property_sets.iter().find(|set| set.id == id)
    }

    /// All property sets.
    pub fn property_sets(&self) -> impl Iterator<Item = &PropertySet> {
        self.property_sets.iter()
    }

    /// Cards needed to complete an active set.
    ///
    /// `None` for missing, ambiguous or unknown sets: such a binding can
    /// never be complete.
    #[must_use]
    pub fn required_count(&self, active: Option<ActiveSet>) -> Option<usize> {
        let id = active?.concrete()?;
        self.property_set(id).map(|set| set.required_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardTag;

    fn count_tag(catalog: &CardCatalog, tag: CardTag) -> usize {
        catalog.cards().filter(|card| card.has_tag(tag)).count()
    }

    #[test]
    fn test_scenario_sizes() {
        assert_eq!(CardCatalog::for_scenario(Scenario::CashOnly).len(), 20);
        assert_eq!(CardCatalog::for_scenario(Scenario::PropertyOnly).len(), 28);
        assert_eq!(CardCatalog::for_scenario(Scenario::PropertyPlusWild).len(), 39);
        assert_eq!(CardCatalog::for_scenario(Scenario::Default).len(), 64);
    }

    #[test]
    fn test_ids_are_sequential_from_one() {
        let catalog = CardCatalog::for_scenario(Scenario::Default);

        for (i, card) in catalog.cards().enumerate() {
            assert_eq!(card.id, CardId::new(i as u32 + 1));
        }
        assert!(!catalog.contains(CardId::new(0)));
    }

    #[test]
    fn test_default_composition() {
        let catalog = CardCatalog::for_scenario(Scenario::Default);

        assert_eq!(count_tag(&catalog, CardTag::Cash), 20);
        assert_eq!(count_tag(&catalog, CardTag::Property), 28);
        assert_eq!(count_tag(&catalog, CardTag::WildProperty), 11);
        assert_eq!(count_tag(&catalog, CardTag::SuperwildProperty), 2);
        assert_eq!(count_tag(&catalog, CardTag::SetAugment), 5);
    }

    #[test]
    fn test_property_only_has_no_cash() {
        let catalog = CardCatalog::for_scenario(Scenario::PropertyOnly);

        assert_eq!(count_tag(&catalog, CardTag::Cash), 0);
        assert!(catalog.cards().all(|card| card.has_tag(CardTag::Property)));
    }

    #[test]
    fn test_property_counts_match_required_counts() {
        let catalog = CardCatalog::for_scenario(Scenario::PropertyOnly);

        for set in catalog.property_sets() {
            let held = catalog
                .cards()
                .filter(|card| card.property_set == Some(set.id))
                .count();
            assert_eq!(held, set.required_count, "{}", set.name);
        }
    }

    #[test]
    fn test_required_count() {
        let catalog = CardCatalog::for_scenario(Scenario::PropertyOnly);

        assert_eq!(
            catalog.required_count(Some(ActiveSet::Set(PropertySetId::GREEN))),
            Some(3)
        );
        assert_eq!(
            catalog.required_count(Some(ActiveSet::Set(PropertySetId::BLACK))),
            Some(4)
        );
        assert_eq!(catalog.required_count(Some(ActiveSet::Ambiguous)), None);
        assert_eq!(catalog.required_count(None), None);
        assert_eq!(
            catalog.required_count(Some(ActiveSet::Set(PropertySetId::new(99)))),
            None
        );
    }

    #[test]
    fn test_unknown_card_is_none() {
        let catalog = CardCatalog::for_scenario(Scenario::CashOnly);
        assert!(catalog.card(CardId::new(500)).is_none());
    }
}
