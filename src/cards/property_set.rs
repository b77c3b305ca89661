//! Property sets and active-set bindings.
//!
//! A `PropertySet` is static catalog data: how many cards complete it and how
//! it is displayed. `ActiveSet` is the identity a collection (or a wildcard's
//! current selection) is bound to.

use serde::{Deserialize, Serialize};

/// Identifier for a property set.
///
/// The standard sets are exposed as associated constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PropertySetId(pub u8);

impl PropertySetId {
    pub const BROWN: PropertySetId = PropertySetId(0);
    pub const DARK_BLUE: PropertySetId = PropertySetId(1);
    pub const GREEN: PropertySetId = PropertySetId(2);
    pub const LIGHT_BLUE: PropertySetId = PropertySetId(3);
    pub const ORANGE: PropertySetId = PropertySetId(4);
    pub const PINK: PropertySetId = PropertySetId(5);
    pub const BLACK: PropertySetId = PropertySetId(6);
    pub const RED: PropertySetId = PropertySetId(7);
    pub const YELLOW: PropertySetId = PropertySetId(8);
    pub const UTILITY: PropertySetId = PropertySetId(9);

    /// Every standard set, in catalog order.
    pub const ALL: [PropertySetId; 10] = [
        Self::BROWN,
        Self::DARK_BLUE,
        Self::GREEN,
        Self::LIGHT_BLUE,
        Self::ORANGE,
        Self::PINK,
        Self::BLACK,
        Self::RED,
        Self::YELLOW,
        Self::UTILITY,
    ];

    /// Create a new property set ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Short key used in logs and display.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self.0 {
            0 => "brown",
            1 => "darkBlue",
            2 => "green",
            3 => "lightBlue",
            4 => "orange",
            5 => "pink",
            6 => "black",
            7 => "red",
            8 => "yellow",
            9 => "utility",
            _ => "custom",
        }
    }
}

impl std::fmt::Display for PropertySetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// The set identity bound to a collection or a wildcard selection.
///
/// A collection with no binding at all is represented as `None` by callers
/// (`Option<ActiveSet>`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActiveSet {
    /// Bound, but to no particular set (e.g. a lone superwild).
    Ambiguous,
    /// Bound to a concrete set.
    Set(PropertySetId),
}

impl ActiveSet {
    /// The concrete set, if any.
    #[must_use]
    pub const fn concrete(self) -> Option<PropertySetId> {
        match self {
            ActiveSet::Ambiguous => None,
            ActiveSet::Set(id) => Some(id),
        }
    }

    /// True for a missing or ambiguous binding.
    #[must_use]
    pub fn is_open(active: Option<ActiveSet>) -> bool {
        matches!(active, None | Some(ActiveSet::Ambiguous))
    }
}

impl From<PropertySetId> for ActiveSet {
    fn from(id: PropertySetId) -> Self {
        ActiveSet::Set(id)
    }
}

/// Static property set definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySet {
    /// Unique identifier.
    pub id: PropertySetId,

    /// Display name.
    pub name: String,

    /// Display colour as a hex string.
    pub colour: String,

    /// Cards needed for the set to be complete.
    pub required_count: usize,

    /// Rent charged per number of cards held (index 0 = one card).
    pub rent: Vec<u32>,
}

impl PropertySet {
    /// Create a new property set definition.
    #[must_use]
    pub fn new(id: PropertySetId, name: impl Into<String>, required_count: usize) -> Self {
        Self {
            id,
            name: name.into(),
            colour: String::new(),
            required_count,
            rent: Vec::new(),
        }
    }

    /// Set the display colour.
    #[must_use]
    pub fn with_colour(mut self, colour: impl Into<String>) -> Self {
        self.colour = colour.into();
        self
    }

    /// Set the rent table.
    #[must_use]
    pub fn with_rent(mut self, rent: &[u32]) -> Self {
        self.rent = rent.to_vec();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_set_id_keys() {
        assert_eq!(PropertySetId::GREEN.key(), "green");
        assert_eq!(format!("{}", PropertySetId::DARK_BLUE), "darkBlue");
        assert_eq!(PropertySetId::new(200).key(), "custom");
    }

    #[test]
    fn test_active_set_is_open() {
        assert!(ActiveSet::is_open(None));
        assert!(ActiveSet::is_open(Some(ActiveSet::Ambiguous)));
        assert!(!ActiveSet::is_open(Some(ActiveSet::Set(PropertySetId::RED))));
    }

    #[test]
    fn test_active_set_concrete() {
        assert_eq!(ActiveSet::Ambiguous.concrete(), None);
        assert_eq!(
            ActiveSet::from(PropertySetId::PINK).concrete(),
            Some(PropertySetId::PINK)
        );
    }

    #[test]
    fn test_property_set_builder() {
        let set = PropertySet::new(PropertySetId::BROWN, "Brown", 2)
            .with_colour("#8B4513")
            .with_rent(&[1, 2]);

        assert_eq!(set.required_count, 2);
        assert_eq!(set.colour, "#8B4513");
        assert_eq!(set.rent, vec![1, 2]);
    }
}
