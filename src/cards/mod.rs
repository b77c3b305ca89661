//! Card system: cards, property sets, and the scenario catalog.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for a card in the pool
//! - `CardTag`: Capability tags (cash, property, wildcards, set augments)
//! - `Card`: A card with its optional wildcard selection
//! - `PropertySet` / `ActiveSet`: Set definitions and set bindings
//! - `CardCatalog`: The read-only pool for a scenario

pub mod card;
pub mod catalog;
pub mod property_set;

pub use card::{Card, CardId, CardTag, WildSelection};
pub use catalog::CardCatalog;
pub use property_set::{ActiveSet, PropertySet, PropertySetId};
