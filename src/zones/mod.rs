//! Card custody zones.
//!
//! ## Key Types
//!
//! - `CardContainer`: Ordered card ids (deck, piles, hands, banks)
//! - `Collection`: Player-owned container bound to a property set
//! - `CollectionId`: Arena key for collections

pub mod collection;
pub mod container;

pub use collection::{Collection, CollectionId};
pub use container::CardContainer;
