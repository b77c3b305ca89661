//! Per-turn phase and action-budget state.
//!
//! A turn moves through `Draw -> Action -> (Discard) -> Done`. Transitions
//! that depend on the hand size take it as an argument so the state stays
//! independent of the player registry.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::player::PlayerId;

/// Turn phases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the turn-start draw.
    #[default]
    Draw,
    /// Playing cards.
    Action,
    /// Hand is over the limit; excess must be discarded.
    Discard,
    /// Turn finished; the next turn may begin.
    Done,
}

/// Once-set markers recorded during a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnTag {
    /// Turn-start cards have been drawn.
    CardsDrawn,
}

/// State of the turn in progress.
///
/// ```
/// use deal_engine::core::PlayerId;
/// use deal_engine::turn::{Phase, TurnState};
///
/// let mut turn = TurnState::new(PlayerId::new(1), 3, 7);
/// assert_eq!(turn.phase(), Phase::Draw);
///
/// turn.next_phase(7);
/// assert_eq!(turn.phase(), Phase::Action);
///
/// // Nine cards in hand: two too many
/// turn.next_phase(9);
/// assert_eq!(turn.phase(), Phase::Discard);
/// assert_eq!(turn.count_cards_too_many(9), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    player_id: PlayerId,
    phase: Phase,
    action_count: u32,
    action_limit: u32,
    max_hand_size: usize,
    tags: SmallVec<[TurnTag; 2]>,
}

impl TurnState {
    /// A fresh turn at `Draw` with no actions spent.
    #[must_use]
    pub fn new(player_id: PlayerId, action_limit: u32, max_hand_size: usize) -> Self {
        Self {
            player_id,
            phase: Phase::Draw,
            action_count: 0,
            action_limit,
            max_hand_size,
            tags: SmallVec::new(),
        }
    }

    /// Rebuild a turn from saved values.
    #[must_use]
    pub fn restored(
        player_id: PlayerId,
        phase: Phase,
        action_count: u32,
        tags: &[TurnTag],
        action_limit: u32,
        max_hand_size: usize,
    ) -> Self {
        Self {
            player_id,
            phase,
            action_count,
            action_limit,
            max_hand_size,
            tags: tags.iter().copied().collect(),
        }
    }

    /// Player whose turn it is.
    #[must_use]
    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Actions spent this turn.
    #[must_use]
    pub fn action_count(&self) -> u32 {
        self.action_count
    }

    /// Actions allowed this turn.
    #[must_use]
    pub fn action_limit(&self) -> u32 {
        self.action_limit
    }

    /// Hand size allowed at the end of the turn.
    #[must_use]
    pub fn max_hand_size(&self) -> usize {
        self.max_hand_size
    }

    /// Tags set so far.
    #[must_use]
    pub fn tags(&self) -> &[TurnTag] {
        &self.tags
    }

    /// Set a tag. Setting it twice has no further effect.
    pub fn add_tag(&mut self, tag: TurnTag) {
        if !self.has_tag(tag) {
            self.tags.push(tag);
        }
    }

    /// Check for a tag.
    #[must_use]
    pub fn has_tag(&self, tag: TurnTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Advance the phase given the current hand size.
    ///
    /// `Discard` only finishes once the hand is back within the limit, and
    /// `Done` is terminal for the turn.
    pub fn next_phase(&mut self, hand_size: usize) -> Phase {
        self.phase = match self.phase {
            Phase::Draw => Phase::Action,
            Phase::Action if self.should_discard_cards(hand_size) => Phase::Discard,
            Phase::Action => Phase::Done,
            Phase::Discard if self.should_discard_cards(hand_size) => Phase::Discard,
            Phase::Discard | Phase::Done => Phase::Done,
        };
        self.phase
    }

    /// Spend one action. Spending the last one ends the action phase.
    pub fn consume_action(&mut self, hand_size: usize) {
        self.action_count += 1;
        if !self.is_within_action_limit() && self.phase == Phase::Action {
            self.next_phase(hand_size);
        }
    }

    /// True while actions remain.
    #[must_use]
    pub fn is_within_action_limit(&self) -> bool {
        self.action_count < self.action_limit
    }

    /// True while the hand is over the limit.
    #[must_use]
    pub fn should_discard_cards(&self, hand_size: usize) -> bool {
        self.count_cards_too_many(hand_size) > 0
    }

    /// Cards over the hand limit.
    #[must_use]
    pub fn count_cards_too_many(&self, hand_size: usize) -> usize {
        hand_size.saturating_sub(self.max_hand_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn() -> TurnState {
        TurnState::new(PlayerId::new(1), 3, 7)
    }

    #[test]
    fn test_new_turn() {
        let turn = turn();

        assert_eq!(turn.phase(), Phase::Draw);
        assert_eq!(turn.action_count(), 0);
        assert!(turn.tags().is_empty());
        assert!(turn.is_within_action_limit());
    }

    #[test]
    fn test_phase_sequence_without_discard() {
        let mut turn = turn();

        assert_eq!(turn.next_phase(5), Phase::Action);
        assert_eq!(turn.next_phase(7), Phase::Done);
        assert_eq!(turn.next_phase(7), Phase::Done);
    }

    #[test]
    fn test_phase_sequence_with_discard() {
        let mut turn = turn();
        turn.next_phase(9);

        assert_eq!(turn.next_phase(9), Phase::Discard);
        assert!(turn.should_discard_cards(9));

        // Still over the limit
        assert_eq!(turn.next_phase(8), Phase::Discard);

        assert_eq!(turn.next_phase(7), Phase::Done);
    }

    #[test]
    fn test_count_cards_too_many() {
        let turn = turn();

        assert_eq!(turn.count_cards_too_many(3), 0);
        assert_eq!(turn.count_cards_too_many(7), 0);
        assert_eq!(turn.count_cards_too_many(10), 3);
        assert!(!turn.should_discard_cards(7));
    }

    #[test]
    fn test_consume_action_ends_action_phase_at_limit() {
        let mut turn = turn();
        turn.next_phase(5);

        turn.consume_action(5);
        turn.consume_action(5);
        assert_eq!(turn.phase(), Phase::Action);
        assert!(turn.is_within_action_limit());

        turn.consume_action(4);
        assert_eq!(turn.action_count(), 3);
        assert!(!turn.is_within_action_limit());
        assert_eq!(turn.phase(), Phase::Done);
    }

    #[test]
    fn test_consume_last_action_with_full_hand_goes_to_discard() {
        let mut turn = TurnState::new(PlayerId::new(2), 1, 2);
        turn.next_phase(4);

        turn.consume_action(3);
        assert_eq!(turn.phase(), Phase::Discard);
    }

    #[test]
    fn test_consume_action_outside_action_phase_keeps_phase() {
        let mut turn = turn();

        for _ in 0..3 {
            turn.consume_action(2);
        }
        assert_eq!(turn.phase(), Phase::Draw);
        assert!(!turn.is_within_action_limit());
    }

    #[test]
    fn test_tags_are_once_set() {
        let mut turn = turn();

        turn.add_tag(TurnTag::CardsDrawn);
        turn.add_tag(TurnTag::CardsDrawn);

        assert!(turn.has_tag(TurnTag::CardsDrawn));
        assert_eq!(turn.tags(), &[TurnTag::CardsDrawn]);
    }

    #[test]
    fn test_restored_matches_fields() {
        let turn = TurnState::restored(PlayerId::new(2), Phase::Discard, 2, &[TurnTag::CardsDrawn], 3, 7);

        assert_eq!(turn.player_id(), PlayerId::new(2));
        assert_eq!(turn.phase(), Phase::Discard);
        assert_eq!(turn.action_count(), 2);
        assert!(turn.has_tag(TurnTag::CardsDrawn));
    }
}
