//! Turn state machine and sequencing.
//!
//! - `Phase`, `TurnTag`, `TurnState`: the turn in progress
//! - `TurnManager`: who plays next

pub mod manager;
pub mod state;

pub use manager::TurnManager;
pub use state::{Phase, TurnState, TurnTag};
