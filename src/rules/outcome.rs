//! Non-fatal action outcomes.
//!
//! Every action either applies completely or leaves state untouched. The
//! outcome says which, and why a rejected action was ignored. Callers that
//! only diff state may drop it.

use std::fmt;

use crate::cards::CardId;
use crate::turn::Phase;
use crate::zones::CollectionId;

/// Why an action was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// The game has not started.
    NotStarted,
    /// The game has already started.
    AlreadyStarted,
    /// Too few players to start.
    NotEnoughPlayers,
    /// No more player ids are available.
    TooManyPlayers,
    /// The action is not allowed in the current phase.
    WrongPhase { expected: Phase, actual: Phase },
    /// The turn's action budget is spent.
    ActionLimitReached,
    /// The card is not in the acting player's hand.
    CardNotInHand(CardId),
    /// The card is not in the named collection.
    CardNotInCollection(CardId),
    /// The card id is not part of this game's pool.
    UnknownCard(CardId),
    /// No such collection.
    UnknownCollection(CollectionId),
    /// The collection belongs to another player.
    ForeignCollection(CollectionId),
    /// Source and destination collections are the same.
    SameCollection(CollectionId),
    /// The card has no placement rule for collections.
    NotPlaceable(CardId),
    /// The card's set does not match the collection's set.
    IncompatibleSet(CardId),
    /// The card is not a recolourable wildcard.
    NotRecolorable(CardId),
    /// The collection holds more than one card.
    CollectionNotSingle(CollectionId),
    /// The hand is still over the limit.
    MustDiscard(usize),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => write!(f, "game has not started"),
            Self::AlreadyStarted => write!(f, "game has already started"),
            Self::NotEnoughPlayers => write!(f, "not enough players"),
            Self::TooManyPlayers => write!(f, "no player ids left"),
            Self::WrongPhase { expected, actual } => {
                write!(f, "expected {:?} phase, turn is in {:?}", expected, actual)
            }
            Self::ActionLimitReached => write!(f, "action limit reached"),
            Self::CardNotInHand(card) => write!(f, "{} is not in hand", card),
            Self::CardNotInCollection(card) => write!(f, "{} is not in the collection", card),
            Self::UnknownCard(card) => write!(f, "{} is not in the pool", card),
            Self::UnknownCollection(id) => write!(f, "{} does not exist", id),
            Self::ForeignCollection(id) => write!(f, "{} belongs to another player", id),
            Self::SameCollection(id) => write!(f, "{} is both source and destination", id),
            Self::NotPlaceable(card) => write!(f, "{} cannot be placed in a collection", card),
            Self::IncompatibleSet(card) => write!(f, "{} does not match the collection set", card),
            Self::NotRecolorable(card) => write!(f, "{} cannot change colour", card),
            Self::CollectionNotSingle(id) => write!(f, "{} holds more than one card", id),
            Self::MustDiscard(count) => write!(f, "{} cards must be discarded first", count),
        }
    }
}

/// Result of an action that did not fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action was applied.
    Accepted,
    /// The action was ignored; state is unchanged.
    Rejected(RejectReason),
}

impl ActionOutcome {
    /// True if the action was applied.
    #[must_use]
    pub fn is_accepted(self) -> bool {
        self == ActionOutcome::Accepted
    }

    /// The rejection reason, if any.
    #[must_use]
    pub fn reason(self) -> Option<RejectReason> {
        match self {
            ActionOutcome::Accepted => None,
            ActionOutcome::Rejected(reason) => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_accessors() {
        assert!(ActionOutcome::Accepted.is_accepted());
        assert_eq!(ActionOutcome::Accepted.reason(), None);

        let rejected = ActionOutcome::Rejected(RejectReason::ActionLimitReached);
        assert!(!rejected.is_accepted());
        assert_eq!(rejected.reason(), Some(RejectReason::ActionLimitReached));
    }

    #[test]
    fn test_reason_display() {
        let reason = RejectReason::WrongPhase {
            expected: Phase::Discard,
            actual: Phase::Action,
        };
        assert_eq!(reason.to_string(), "expected Discard phase, turn is in Action");
        assert_eq!(
            RejectReason::CardNotInHand(CardId::new(4)).to_string(),
            "Card(4) is not in hand"
        );
    }
}
