//! Turn sequencing across the ordered player list.

use serde::{Deserialize, Serialize};

use super::state::TurnState;
use crate::core::player::PlayerId;

/// Sequences turns over the players in registration order.
///
/// `next_turn` does not check that the current turn is `Done`; the engine
/// gates that.
///
/// ```
/// use deal_engine::core::PlayerId;
/// use deal_engine::turn::TurnManager;
///
/// let mut turns = TurnManager::new(3, 7);
/// turns.setup(vec![PlayerId::new(1), PlayerId::new(2)]);
///
/// assert_eq!(turns.current_player(), Some(PlayerId::new(1)));
/// turns.next_turn();
/// turns.next_turn();
/// assert_eq!(turns.current_player(), Some(PlayerId::new(1)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnManager {
    player_order: Vec<PlayerId>,
    current: usize,
    turn: Option<TurnState>,
    action_limit: u32,
    max_hand_size: usize,
}

impl TurnManager {
    /// A manager with no players yet.
    #[must_use]
    pub fn new(action_limit: u32, max_hand_size: usize) -> Self {
        Self {
            player_order: Vec::new(),
            current: 0,
            turn: None,
            action_limit,
            max_hand_size,
        }
    }

    /// Start sequencing with the first player at `Draw`.
    pub fn setup(&mut self, player_order: Vec<PlayerId>) {
        self.player_order = player_order;
        self.current = 0;
        self.turn = self.fresh_turn();
    }

    /// Resume sequencing from a saved turn.
    ///
    /// Returns `false` if the turn's player is not in `player_order`.
    pub fn restore(&mut self, player_order: Vec<PlayerId>, turn: TurnState) -> bool {
        let Some(current) = player_order.iter().position(|&p| p == turn.player_id()) else {
            return false;
        };
        self.player_order = player_order;
        self.current = current;
        self.turn = Some(turn);
        true
    }

    fn fresh_turn(&self) -> Option<TurnState> {
        self.player_order
            .get(self.current)
            .map(|&player| TurnState::new(player, self.action_limit, self.max_hand_size))
    }

    /// Hand the turn to the next player, wrapping around.
    pub fn next_turn(&mut self) {
        if self.player_order.is_empty() {
            return;
        }
        self.current = (self.current + 1) % self.player_order.len();
        self.turn = self.fresh_turn();
    }

    /// The turn in progress, if sequencing has started.
    #[must_use]
    pub fn turn(&self) -> Option<&TurnState> {
        self.turn.as_ref()
    }

    /// The turn in progress, mutably.
    pub fn turn_mut(&mut self) -> Option<&mut TurnState> {
        self.turn.as_mut()
    }

    /// Player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        self.turn.as_ref().map(TurnState::player_id)
    }

    /// Players in turn order.
    #[must_use]
    pub fn player_order(&self) -> &[PlayerId] {
        &self.player_order
    }
}
