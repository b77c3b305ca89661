//! The game engine: sole mutator of every zone and of the turn state.
//!
//! Callers invoke one action at a time. Each action checks its phase,
//! budget, ownership and set-compatibility preconditions first; only when all
//! pass does it move cards, spend budget and re-check the win condition.
//! A failed precondition leaves state untouched and is reported as
//! [`ActionOutcome::Rejected`]. Container faults that slip past those checks
//! surface as [`GameError`].

use log::{debug, info, trace};
use rustc_hash::{FxHashMap, FxHashSet};

use super::outcome::{ActionOutcome, RejectReason};
use super::snapshot::{
    CollectionSnapshot, GameSnapshot, PilesSnapshot, PlayerSnapshot, PlayersSnapshot, TurnSnapshot,
};
use crate::cards::{ActiveSet, Card, CardCatalog, CardId, CardTag};
use crate::core::config::{GameConfig, Scenario};
use crate::core::error::{ContainerError, GameError};
use crate::core::player::{Player, PlayerId, PlayerRegistry};
use crate::core::rng::GameRng;
use crate::turn::{Phase, TurnManager, TurnState, TurnTag};
use crate::zones::{CardContainer, Collection, CollectionId};

/// Seed used until `set_seed` is called.
pub const DEFAULT_SEED: &str = "deal";

/// Collections a player must complete, with distinct sets, to win.
pub const WINNING_SET_COUNT: usize = 3;

enum Failure {
    Rejected(RejectReason),
    Fault(GameError),
}

impl From<RejectReason> for Failure {
    fn from(reason: RejectReason) -> Self {
        Failure::Rejected(reason)
    }
}

impl From<GameError> for Failure {
    fn from(err: GameError) -> Self {
        Failure::Fault(err)
    }
}

impl From<ContainerError> for Failure {
    fn from(err: ContainerError) -> Self {
        Failure::Fault(err.into())
    }
}

type Step = Result<(), Failure>;

fn ensure(condition: bool, reason: RejectReason) -> Step {
    if condition {
        Ok(())
    } else {
        Err(Failure::Rejected(reason))
    }
}

fn settle(action: &'static str, step: Step) -> Result<ActionOutcome, GameError> {
    match step {
        Ok(()) => Ok(ActionOutcome::Accepted),
        Err(Failure::Rejected(reason)) => {
            debug!("{:<32}{}", action, reason);
            Ok(ActionOutcome::Rejected(reason))
        }
        Err(Failure::Fault(err)) => Err(err),
    }
}

/// Top-level orchestrator for one game.
///
/// ## Example
///
/// ```
/// use deal_engine::core::{GameConfig, Scenario};
/// use deal_engine::rules::GameEngine;
/// use deal_engine::turn::Phase;
///
/// let mut game = GameEngine::new(GameConfig::new().with_scenario(Scenario::CashOnly));
/// game.set_seed("test");
/// game.add_player();
/// game.add_player();
/// game.start().unwrap();
///
/// game.deal_turn_starting_cards().unwrap();
/// assert_eq!(game.turn().unwrap().phase(), Phase::Action);
///
/// let card = game.current_hand().unwrap().card_ids()[0];
/// assert!(game.play_card_to_bank_from_hand(card).unwrap().is_accepted());
/// ```
#[derive(Clone, Debug)]
pub struct GameEngine {
    config: GameConfig,
    seed: String,
    rng: GameRng,
    catalog: CardCatalog,
    cards: FxHashMap<CardId, Card>,
    players: PlayerRegistry,
    turns: TurnManager,
    deck: CardContainer,
    discard_pile: CardContainer,
    active_pile: CardContainer,
    has_started: bool,
    has_ended: bool,
    winner: Option<PlayerId>,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl GameEngine {
    /// Create an engine that has not started.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            catalog: CardCatalog::for_scenario(config.scenario),
            turns: TurnManager::new(config.action_limit, config.max_cards_in_hand),
            config,
            seed: DEFAULT_SEED.to_string(),
            rng: GameRng::from_seed_str(DEFAULT_SEED),
            cards: FxHashMap::default(),
            players: PlayerRegistry::new(),
            deck: CardContainer::new(),
            discard_pile: CardContainer::new(),
            active_pile: CardContainer::new(),
            has_started: false,
            has_ended: false,
            winner: None,
        }
    }

    // === Setup ===

    /// Reseed the shuffle stream. Only meaningful before `start`.
    pub fn set_seed(&mut self, seed: &str) {
        self.seed = seed.to_string();
        self.rng = GameRng::from_seed_str(seed);
    }

    /// The textual seed.
    #[must_use]
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Choose the catalog loadout. Ignored once the game has started.
    pub fn set_scenario(&mut self, scenario: Scenario) -> ActionOutcome {
        if self.has_started {
            debug!("{:<32}{}", "set scenario", RejectReason::AlreadyStarted);
            return ActionOutcome::Rejected(RejectReason::AlreadyStarted);
        }
        self.config.scenario = scenario;
        self.catalog = CardCatalog::for_scenario(scenario);
        ActionOutcome::Accepted
    }

    /// The configured scenario.
    #[must_use]
    pub fn scenario(&self) -> Scenario {
        self.config.scenario
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Register a player. Returns `None` once the game has started.
    pub fn add_player(&mut self) -> Option<PlayerId> {
        if self.has_started {
            debug!("{:<32}{}", "add player", RejectReason::AlreadyStarted);
            return None;
        }
        let id = self.players.add_player();
        if id.is_none() {
            debug!("{:<32}{}", "add player", RejectReason::TooManyPlayers);
        }
        id
    }

    /// True when enough players are registered and the game is fresh.
    #[must_use]
    pub fn can_start(&self) -> bool {
        !self.has_started && !self.has_ended && self.players.count() >= self.config.min_player_limit
    }

    /// Build the deck, shuffle it and deal the opening hands.
    ///
    /// Opening hands are dealt one card at a time, round-robin in
    /// registration order.
    pub fn start(&mut self) -> Result<ActionOutcome, GameError> {
        settle("start", self.try_start())
    }

    fn try_start(&mut self) -> Step {
        ensure(!self.has_started && !self.has_ended, RejectReason::AlreadyStarted)?;
        ensure(
            self.players.count() >= self.config.min_player_limit,
            RejectReason::NotEnoughPlayers,
        )?;

        let catalog = CardCatalog::for_scenario(self.config.scenario);
        let opening = self.players.count() * self.config.game_starting_card_count;
        if catalog.len() < opening {
            return Err(GameError::from(ContainerError::EmptyContainer).into());
        }

        self.catalog = catalog;
        self.cards = self.catalog.cards().map(|card| (card.id, card.clone())).collect();
        self.turns = TurnManager::new(self.config.action_limit, self.config.max_cards_in_hand);
        self.turns.setup(self.players.player_ids());

        self.deck.add_cards(self.catalog.card_ids())?;
        self.deck.shuffle(&mut self.rng);
        self.has_started = true;

        let order = self.players.player_ids();
        for _ in 0..self.config.game_starting_card_count {
            for &player in &order {
                self.draw_card_for_player(player)?;
            }
        }

        info!(
            "{:<32}{} players, {} cards, scenario {}, seed {:?}",
            "game started",
            order.len(),
            self.catalog.len(),
            self.config.scenario,
            self.seed
        );
        Ok(())
    }

    // === Drawing ===

    /// Move the active and discard piles back into the deck and reshuffle
    /// with the continuing stream.
    fn recycle_cards(&mut self) -> Result<(), GameError> {
        let active = self.active_pile.give_cards(&self.active_pile.card_ids());
        self.deck.add_cards(active)?;
        let discarded = self.discard_pile.give_cards(&self.discard_pile.card_ids());
        self.deck.add_cards(discarded)?;
        self.deck.shuffle(&mut self.rng);
        trace!("{:<32}{} cards", "recycled deck", self.deck.count());
        Ok(())
    }

    /// Cards that a draw could reach, recycling included.
    fn drawable_count(&self) -> usize {
        self.deck.count() + self.discard_pile.count() + self.active_pile.count()
    }

    fn draw_card_from_deck(&mut self) -> Result<CardId, GameError> {
        if self.deck.is_empty() {
            self.recycle_cards()?;
        }
        Ok(self.deck.pop()?)
    }

    fn draw_card_for_player(&mut self, player: PlayerId) -> Result<(), GameError> {
        let card = self.draw_card_from_deck()?;
        self.players
            .hand_mut(player)
            .ok_or(GameError::UnknownPlayer(player))?
            .add_card(card)?;
        trace!("{:<32}{} -> {}", "drew card", card, player);
        Ok(())
    }

    // === Turn flow ===

    fn active_turn(&self) -> Result<&TurnState, RejectReason> {
        if !self.has_started {
            return Err(RejectReason::NotStarted);
        }
        self.turns.turn().ok_or(RejectReason::NotStarted)
    }

    fn hand_size(&self, player: PlayerId) -> usize {
        self.players.hand(player).map_or(0, CardContainer::count)
    }

    fn turn_mut(&mut self) -> Result<&mut TurnState, Failure> {
        Ok(self.turns.turn_mut().ok_or(RejectReason::NotStarted)?)
    }

    fn require_phase(turn: &TurnState, expected: Phase) -> Step {
        ensure(
            turn.phase() == expected,
            RejectReason::WrongPhase {
                expected,
                actual: turn.phase(),
            },
        )
    }

    /// Draw the turn-start cards. Only legal in the draw phase.
    ///
    /// Faults with `EmptyContainer`, moving nothing, if the deck and both
    /// piles together cannot supply the cards.
    pub fn deal_turn_starting_cards(&mut self) -> Result<ActionOutcome, GameError> {
        settle("deal turn starting cards", self.try_deal_turn_starting_cards())
    }

    fn try_deal_turn_starting_cards(&mut self) -> Step {
        let turn = self.active_turn()?;
        Self::require_phase(turn, Phase::Draw)?;
        let player = turn.player_id();
        let count = self.config.turn_starting_card_count;
        if self.drawable_count() < count {
            return Err(GameError::from(ContainerError::EmptyContainer).into());
        }

        for _ in 0..count {
            self.draw_card_for_player(player)?;
        }

        let hand_size = self.hand_size(player);
        let turn = self.turn_mut()?;
        turn.add_tag(TurnTag::CardsDrawn);
        turn.next_phase(hand_size);
        Ok(())
    }

    /// Discard excess cards. Only legal in the discard phase.
    ///
    /// At most as many ids as the hand is over the limit are considered;
    /// ids no longer in hand are skipped.
    pub fn discard_cards(&mut self, cards: &[CardId]) -> Result<ActionOutcome, GameError> {
        settle("discard cards", self.try_discard_cards(cards))
    }

    fn try_discard_cards(&mut self, cards: &[CardId]) -> Step {
        let turn = self.active_turn()?;
        Self::require_phase(turn, Phase::Discard)?;
        let player = turn.player_id();
        let too_many = turn.count_cards_too_many(self.hand_size(player));

        for &card in cards.iter().take(too_many) {
            let hand = self
                .players
                .hand_mut(player)
                .ok_or(GameError::UnknownPlayer(player))?;
            if hand.has_card(card) {
                let card = hand.give_card(card)?;
                self.discard_pile.add_card(card)?;
            }
        }

        let hand_size = self.hand_size(player);
        let turn = self.turn_mut()?;
        if !turn.should_discard_cards(hand_size) {
            turn.next_phase(hand_size);
        }
        Ok(())
    }

    /// Advance the phase; if the turn is then done, start the next one.
    pub fn try_to_pass_turn(&mut self) -> Result<ActionOutcome, GameError> {
        settle("pass turn", self.try_pass_turn())
    }

    fn try_pass_turn(&mut self) -> Step {
        let player = self.active_turn()?.player_id();
        let hand_size = self.hand_size(player);

        let turn = self.turn_mut()?;
        let before = turn.phase();
        let after = turn.next_phase(hand_size);
        if before == Phase::Discard && after == Phase::Discard {
            let excess = turn.count_cards_too_many(hand_size);
            return Err(RejectReason::MustDiscard(excess).into());
        }

        if after == Phase::Done {
            self.turns.next_turn();
        }
        Ok(())
    }

    fn consume_action(&mut self, player: PlayerId) -> Step {
        let hand_size = self.hand_size(player);
        self.turn_mut()?.consume_action(hand_size);
        Ok(())
    }

    // === Playing cards ===

    fn card_in_hand(&self, player: PlayerId, card: CardId) -> Step {
        let in_hand = self.players.hand(player).is_some_and(|hand| hand.has_card(card));
        ensure(in_hand, RejectReason::CardNotInHand(card))
    }

    fn owned_collection(&self, player: PlayerId, id: CollectionId) -> Result<&Collection, RejectReason> {
        let collection = self
            .players
            .collection(id)
            .ok_or(RejectReason::UnknownCollection(id))?;
        if collection.player_id() != player {
            return Err(RejectReason::ForeignCollection(id));
        }
        Ok(collection)
    }

    fn give_from_hand(&mut self, player: PlayerId, card: CardId) -> Result<CardId, GameError> {
        Ok(self
            .players
            .hand_mut(player)
            .ok_or(GameError::UnknownPlayer(player))?
            .give_card(card)?)
    }

    fn collection_mut(&mut self, id: CollectionId) -> Result<&mut Collection, RejectReason> {
        self.players
            .collection_mut(id)
            .ok_or(RejectReason::UnknownCollection(id))
    }

    /// Property and wild cards may join open collections or ones bound to
    /// their selected set; superwilds join any collection. Other cards have
    /// no placement rule.
    fn can_add_card_to_collection(&self, card: CardId, collection: &Collection) -> Step {
        let card = self.cards.get(&card).ok_or(RejectReason::UnknownCard(card))?;
        ensure(card.is_property_like(), RejectReason::NotPlaceable(card.id))?;
        if card.has_tag(CardTag::SuperwildProperty) {
            return Ok(());
        }
        let active = collection.active_set();
        ensure(
            ActiveSet::is_open(active) || active == card.selected_set(),
            RejectReason::IncompatibleSet(card.id),
        )
    }

    /// Bind an open collection to the card that just landed in it, then
    /// check whether its owner has won.
    fn update_collection_and_card(&mut self, collection: CollectionId, card: CardId) -> Step {
        let selected = self
            .cards
            .get(&card)
            .filter(|card| card.is_property_like())
            .and_then(Card::selected_set);

        let target = self.collection_mut(collection)?;
        let adopt = match (target.active_set(), selected) {
            (None, Some(set)) => Some(set),
            (Some(ActiveSet::Ambiguous), Some(set @ ActiveSet::Set(_))) => Some(set),
            _ => None,
        };
        if let Some(set) = adopt {
            target.set_active_set(Some(set));
        }

        let owner = target.player_id();
        if self.check_does_player_win(owner) {
            self.on_player_win(owner);
        }
        Ok(())
    }

    fn check_does_player_win(&self, player: PlayerId) -> bool {
        let complete: FxHashSet<ActiveSet> = self
            .players
            .collections_for(player)
            .filter(|collection| collection.is_complete(&self.catalog))
            .filter_map(Collection::active_set)
            .collect();
        complete.len() >= WINNING_SET_COUNT
    }

    fn on_player_win(&mut self, player: PlayerId) {
        // The first winner stands
        if self.has_ended {
            return;
        }
        self.has_ended = true;
        self.winner = Some(player);
        info!("{:<32}{}", "game won", player);
    }

    fn clean_up_collection(&mut self, id: CollectionId) {
        if self.players.collection(id).is_some_and(|c| c.is_empty()) {
            self.players.delete_collection(id);
            trace!("{:<32}{}", "deleted empty collection", id);
        }
    }

    /// Bank a card from hand. Gated by the action budget only.
    pub fn play_card_to_bank_from_hand(&mut self, card: CardId) -> Result<ActionOutcome, GameError> {
        settle("play to bank", self.try_play_to_bank(card))
    }

    fn try_play_to_bank(&mut self, card: CardId) -> Step {
        let turn = self.active_turn()?;
        ensure(turn.is_within_action_limit(), RejectReason::ActionLimitReached)?;
        let player = turn.player_id();
        self.card_in_hand(player, card)?;

        let card = self.give_from_hand(player, card)?;
        self.players
            .bank_mut(player)
            .ok_or(GameError::UnknownPlayer(player))?
            .add_card(card)?;
        self.consume_action(player)
    }

    /// Start a new collection with a card from hand.
    pub fn play_card_to_new_collection_from_hand(
        &mut self,
        card: CardId,
    ) -> Result<ActionOutcome, GameError> {
        settle("play to new collection", self.try_play_to_new_collection(card))
    }

    fn try_play_to_new_collection(&mut self, card: CardId) -> Step {
        let player = self.acting_player()?;
        self.card_in_hand(player, card)?;
        let placeable = self.cards.get(&card).is_some_and(Card::is_property_like);
        ensure(placeable, RejectReason::NotPlaceable(card))?;

        let collection = self
            .players
            .new_collection(player)
            .ok_or(GameError::UnknownPlayer(player))?;
        let card = self.give_from_hand(player, card)?;
        self.collection_mut(collection)?.add_card(card)?;
        self.update_collection_and_card(collection, card)?;
        self.consume_action(player)
    }

    /// Add a card from hand to one of the player's collections.
    pub fn play_card_to_existing_collection_from_hand(
        &mut self,
        card: CardId,
        collection: CollectionId,
    ) -> Result<ActionOutcome, GameError> {
        settle(
            "play to existing collection",
            self.try_play_to_existing_collection(card, collection),
        )
    }

    fn try_play_to_existing_collection(&mut self, card: CardId, collection: CollectionId) -> Step {
        let player = self.acting_player()?;
        self.card_in_hand(player, card)?;
        let target = self.owned_collection(player, collection)?;
        self.can_add_card_to_collection(card, target)?;

        let card = self.give_from_hand(player, card)?;
        self.collection_mut(collection)?.add_card(card)?;
        self.update_collection_and_card(collection, card)?;
        self.consume_action(player)
    }

    /// Move a card out of a collection into a brand-new one.
    pub fn transfer_card_to_new_collection_from_collection(
        &mut self,
        from: CollectionId,
        card: CardId,
    ) -> Result<ActionOutcome, GameError> {
        settle(
            "transfer to new collection",
            self.try_transfer_to_new_collection(from, card),
        )
    }

    fn try_transfer_to_new_collection(&mut self, from: CollectionId, card: CardId) -> Step {
        let player = self.acting_player()?;
        let source = self.owned_collection(player, from)?;
        ensure(source.has_card(card), RejectReason::CardNotInCollection(card))?;

        let collection = self
            .players
            .new_collection(player)
            .ok_or(GameError::UnknownPlayer(player))?;
        let card = self.collection_mut(from)?.give_card(card)?;
        self.collection_mut(collection)?.add_card(card)?;
        self.update_collection_and_card(collection, card)?;
        self.clean_up_collection(from);
        self.consume_action(player)
    }

    /// Move a card between two of the player's collections.
    pub fn transfer_card_to_existing_collection_from_collection(
        &mut self,
        from: CollectionId,
        card: CardId,
        to: CollectionId,
    ) -> Result<ActionOutcome, GameError> {
        settle(
            "transfer to existing collection",
            self.try_transfer_to_existing_collection(from, card, to),
        )
    }

    fn try_transfer_to_existing_collection(
        &mut self,
        from: CollectionId,
        card: CardId,
        to: CollectionId,
    ) -> Step {
        let player = self.acting_player()?;
        let source = self.owned_collection(player, from)?;
        ensure(source.has_card(card), RejectReason::CardNotInCollection(card))?;
        let target = self.owned_collection(player, to)?;
        ensure(from != to, RejectReason::SameCollection(to))?;
        self.can_add_card_to_collection(card, target)?;

        let card = self.collection_mut(from)?.give_card(card)?;
        self.collection_mut(to)?.add_card(card)?;
        self.update_collection_and_card(to, card)?;
        self.clean_up_collection(from);
        self.consume_action(player)
    }

    /// The acting player, provided the turn is in the action phase with
    /// budget left.
    fn acting_player(&self) -> Result<PlayerId, Failure> {
        let turn = self.active_turn()?;
        Self::require_phase(turn, Phase::Action)?;
        ensure(turn.is_within_action_limit(), RejectReason::ActionLimitReached)?;
        Ok(turn.player_id())
    }

    // === Wildcards ===

    fn cycle_wild(&mut self, card: CardId) -> Result<ActiveSet, Failure> {
        let instance = self.cards.get_mut(&card).ok_or(RejectReason::UnknownCard(card))?;
        ensure(instance.is_recolorable(), RejectReason::NotRecolorable(card))?;
        let next = instance
            .wild
            .as_mut()
            .and_then(|wild| wild.cycle())
            .ok_or(RejectReason::NotRecolorable(card))?;
        trace!("{:<32}{} -> {:?}", "recoloured wildcard", card, next);
        Ok(next)
    }

    /// Cycle the colour of a wildcard that is alone in a collection. The
    /// collection follows the new colour.
    pub fn toggle_wild_card_color_in_collection(
        &mut self,
        card: CardId,
        collection: CollectionId,
    ) -> Result<ActionOutcome, GameError> {
        settle(
            "toggle wildcard in collection",
            self.try_toggle_in_collection(card, collection),
        )
    }

    fn try_toggle_in_collection(&mut self, card: CardId, collection: CollectionId) -> Step {
        let player = self.active_turn()?.player_id();
        let target = self.owned_collection(player, collection)?;
        ensure(target.has_card(card), RejectReason::CardNotInCollection(card))?;
        ensure(target.count() == 1, RejectReason::CollectionNotSingle(collection))?;

        let next = self.cycle_wild(card)?;
        self.collection_mut(collection)?.set_active_set(Some(next));
        Ok(())
    }

    /// Cycle the colour of a wildcard in the acting player's hand.
    pub fn toggle_wild_card_color_in_hand(&mut self, card: CardId) -> Result<ActionOutcome, GameError> {
        settle("toggle wildcard in hand", self.try_toggle_in_hand(card))
    }

    fn try_toggle_in_hand(&mut self, card: CardId) -> Step {
        let player = self.active_turn()?.player_id();
        self.card_in_hand(player, card)?;
        self.cycle_wild(card)?;
        Ok(())
    }

    // === Observers ===

    /// True once the game has started.
    #[must_use]
    pub fn has_started(&self) -> bool {
        self.has_started
    }

    /// True once someone has won.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.has_ended
    }

    /// The winner, if any.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// The turn in progress.
    #[must_use]
    pub fn turn(&self) -> Option<&TurnState> {
        self.turns.turn()
    }

    /// Turn sequencing.
    #[must_use]
    pub fn turn_manager(&self) -> &TurnManager {
        &self.turns
    }

    /// Players, hands, banks and collections.
    #[must_use]
    pub fn players(&self) -> &PlayerRegistry {
        &self.players
    }

    /// Number of registered players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.count()
    }

    /// A player.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.player(id)
    }

    /// A player's hand.
    #[must_use]
    pub fn player_hand(&self, id: PlayerId) -> Option<&CardContainer> {
        self.players.hand(id)
    }

    /// A player's bank.
    #[must_use]
    pub fn player_bank(&self, id: PlayerId) -> Option<&CardContainer> {
        self.players.bank(id)
    }

    /// The acting player's hand.
    #[must_use]
    pub fn current_hand(&self) -> Option<&CardContainer> {
        self.players.hand(self.turns.current_player()?)
    }

    /// A collection.
    #[must_use]
    pub fn collection(&self, id: CollectionId) -> Option<&Collection> {
        self.players.collection(id)
    }

    /// A player's collections, in creation order.
    pub fn collections_for(&self, player: PlayerId) -> impl Iterator<Item = &Collection> {
        self.players.collections_for(player)
    }

    /// The draw pile.
    #[must_use]
    pub fn deck(&self) -> &CardContainer {
        &self.deck
    }

    /// The discard pile.
    #[must_use]
    pub fn discard_pile(&self) -> &CardContainer {
        &self.discard_pile
    }

    /// The shared active pile.
    #[must_use]
    pub fn active_pile(&self) -> &CardContainer {
        &self.active_pile
    }

    /// A live card, including its current wildcard selection.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    /// The scenario's catalog.
    #[must_use]
    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    // === Save / restore ===

    /// Capture the game as a flat snapshot.
    #[must_use]
    pub fn serialize(&self) -> GameSnapshot {
        let players = self
            .players
            .players()
            .map(|player| PlayerSnapshot {
                id: player.id(),
                hand: player.hand().card_ids(),
                bank: player.bank().card_ids(),
                collections: self
                    .players
                    .collections_for(player.id())
                    .map(|collection| CollectionSnapshot {
                        id: collection.id(),
                        active_set: collection.active_set(),
                        cards: collection.card_ids(),
                    })
                    .collect(),
            })
            .collect();

        let turn = self.turns.turn().map(|turn| TurnSnapshot {
            player_id: turn.player_id(),
            phase: turn.phase(),
            action_count: turn.action_count(),
            tags: turn.tags().to_vec(),
        });

        let wild_selections = self
            .catalog
            .card_ids()
            .into_iter()
            .filter_map(|id| {
                let wild = self.cards.get(&id)?.wild.as_ref()?;
                Some((id, wild.active))
            })
            .collect();

        GameSnapshot {
            seed: self.seed.clone(),
            scenario: self.config.scenario,
            has_started: self.has_started,
            has_ended: self.has_ended,
            min_player_limit: self.config.min_player_limit,
            winner: self.winner,
            rng: self.rng.state(),
            players: PlayersSnapshot {
                players,
                next_collection_id: self.players.next_collection_id().raw(),
            },
            turn,
            piles: PilesSnapshot {
                deck: self.deck.card_ids(),
                discard: self.discard_pile.card_ids(),
                active: self.active_pile.card_ids(),
            },
            wild_selections,
        }
    }

    /// Replace this engine's state with a snapshot.
    ///
    /// Rule settings not carried by the snapshot (hand sizes, budgets) keep
    /// this engine's configuration. On error the engine is left unchanged.
    pub fn unserialize(&mut self, snapshot: &GameSnapshot) -> Result<(), GameError> {
        *self = Self::restore(self.config.clone(), snapshot)?;
        Ok(())
    }

    /// Build an engine from a snapshot.
    pub fn restore(config: GameConfig, snapshot: &GameSnapshot) -> Result<Self, GameError> {
        let corrupt = |msg: String| GameError::CorruptSnapshot(msg);

        let mut engine = Self::new(config);
        engine.set_seed(&snapshot.seed);
        if snapshot.rng.seed != engine.rng.seed() {
            return Err(corrupt(format!("rng state does not belong to seed {:?}", snapshot.seed)));
        }
        engine.rng = GameRng::from_state(&snapshot.rng);

        engine.config.scenario = snapshot.scenario;
        engine.config.min_player_limit = snapshot.min_player_limit;
        engine.catalog = CardCatalog::for_scenario(snapshot.scenario);
        engine.has_started = snapshot.has_started;
        engine.has_ended = snapshot.has_ended;
        engine.winner = snapshot.winner;

        if snapshot.has_started {
            engine.cards = engine
                .catalog
                .cards()
                .map(|card| (card.id, card.clone()))
                .collect();
        }
        for &(id, active) in &snapshot.wild_selections {
            let wild = engine
                .cards
                .get_mut(&id)
                .and_then(|card| card.wild.as_mut())
                .ok_or_else(|| corrupt(format!("{} is not a wildcard", id)))?;
            wild.active = active;
        }

        let next_collection_id = snapshot.players.next_collection_id;
        for saved in &snapshot.players.players {
            let hand: CardContainer = Self::container(&saved.hand)?;
            let bank: CardContainer = Self::container(&saved.bank)?;
            if !engine.players.insert_player(Player::from_parts(saved.id, hand, bank)) {
                return Err(corrupt(format!("{} appears twice", saved.id)));
            }
            for collection in &saved.collections {
                if collection.id.raw() >= next_collection_id {
                    return Err(corrupt(format!(
                        "{} is not below the next collection id {}",
                        collection.id, next_collection_id
                    )));
                }
                let cards = Self::container(&collection.cards)?;
                let restored = Collection::from_parts(collection.id, saved.id, collection.active_set, cards);
                engine
                    .players
                    .insert_collection(restored)
                    .ok_or_else(|| corrupt(format!("{} appears twice", collection.id)))?;
            }
        }
        engine
            .players
            .set_next_collection_id(CollectionId::new(next_collection_id));

        if let Some(saved) = &snapshot.turn {
            let turn = TurnState::restored(
                saved.player_id,
                saved.phase,
                saved.action_count,
                &saved.tags,
                engine.config.action_limit,
                engine.config.max_cards_in_hand,
            );
            if !engine.turns.restore(engine.players.player_ids(), turn) {
                return Err(corrupt(format!("turn belongs to unknown {}", saved.player_id)));
            }
        } else if snapshot.has_started {
            return Err(corrupt("started game without a turn".to_string()));
        }

        engine.deck = Self::container(&snapshot.piles.deck)?;
        engine.discard_pile = Self::container(&snapshot.piles.discard)?;
        engine.active_pile = Self::container(&snapshot.piles.active)?;

        if snapshot.has_started {
            engine.verify_custody(snapshot)?;
        }
        Ok(engine)
    }

    fn container(cards: &[CardId]) -> Result<CardContainer, GameError> {
        CardContainer::from_cards(cards.iter().copied()).map_err(GameError::from)
    }

    /// Every pool card must be held by exactly one zone, and nothing else.
    fn verify_custody(&self, snapshot: &GameSnapshot) -> Result<(), GameError> {
        let mut seen: FxHashMap<CardId, usize> = FxHashMap::default();
        for card in snapshot.held_cards() {
            *seen.entry(card).or_default() += 1;
        }
        for (&card, &count) in &seen {
            if !self.catalog.contains(card) {
                return Err(GameError::CorruptSnapshot(format!("{} is not in the pool", card)));
            }
            if count > 1 {
                return Err(GameError::CorruptSnapshot(format!("{} is held {} times", card, count)));
            }
        }
        if seen.len() != self.catalog.len() {
            return Err(GameError::CorruptSnapshot(format!(
                "{} of {} cards are held",
                seen.len(),
                self.catalog.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::PropertySetId;

    fn engine(scenario: Scenario, players: usize) -> GameEngine {
        let mut game = GameEngine::new(GameConfig::new().with_scenario(scenario));
        game.set_seed("test");
        for _ in 0..players {
            game.add_player();
        }
        game
    }

    #[test]
    fn test_cannot_start_alone() {
        let mut game = engine(Scenario::CashOnly, 1);

        assert!(!game.can_start());
        assert_eq!(
            game.start().unwrap(),
            ActionOutcome::Rejected(RejectReason::NotEnoughPlayers)
        );
        assert!(!game.has_started());
        assert!(game.deck().is_empty());
    }

    #[test]
    fn test_start_twice_rejected() {
        let mut game = engine(Scenario::CashOnly, 2);

        assert!(game.start().unwrap().is_accepted());
        assert_eq!(
            game.start().unwrap(),
            ActionOutcome::Rejected(RejectReason::AlreadyStarted)
        );
        assert_eq!(game.add_player(), None);
        assert_eq!(
            game.set_scenario(Scenario::Default),
            ActionOutcome::Rejected(RejectReason::AlreadyStarted)
        );
    }

    #[test]
    fn test_actions_before_start_rejected() {
        let mut game = engine(Scenario::CashOnly, 2);

        assert_eq!(
            game.deal_turn_starting_cards().unwrap(),
            ActionOutcome::Rejected(RejectReason::NotStarted)
        );
        assert_eq!(
            game.play_card_to_bank_from_hand(CardId::new(1)).unwrap(),
            ActionOutcome::Rejected(RejectReason::NotStarted)
        );
        assert_eq!(
            game.try_to_pass_turn().unwrap(),
            ActionOutcome::Rejected(RejectReason::NotStarted)
        );
    }

    #[test]
    fn test_recycle_keeps_every_card() {
        let mut game = engine(Scenario::CashOnly, 2);
        game.start().unwrap();

        // Push the whole deck into the piles, then draw from the empty deck
        let remaining = game.deck.card_ids();
        let (to_discard, to_active) = remaining.split_at(remaining.len() / 2);
        for &card in to_discard {
            let card = game.deck.give_card(card).unwrap();
            game.discard_pile.add_card(card).unwrap();
        }
        for &card in to_active {
            let card = game.deck.give_card(card).unwrap();
            game.active_pile.add_card(card).unwrap();
        }
        assert!(game.deck.is_empty());

        let drawn = game.draw_card_from_deck().unwrap();

        assert!(remaining.contains(&drawn));
        assert!(game.discard_pile.is_empty());
        assert!(game.active_pile.is_empty());
        assert_eq!(game.deck.count(), remaining.len() - 1);
        assert!(!game.deck.has_card(drawn));
    }

    #[test]
    fn test_recycle_matches_shuffle_of_piles() {
        let mut game = engine(Scenario::CashOnly, 2);
        game.start().unwrap();

        let remaining = game.deck.card_ids();
        for &card in &remaining {
            let card = game.deck.give_card(card).unwrap();
            game.discard_pile.add_card(card).unwrap();
        }

        let mut expected = CardContainer::from_cards(remaining).unwrap();
        let mut rng = game.rng.clone();
        expected.shuffle(&mut rng);
        let top = expected.pop().unwrap();

        assert_eq!(game.draw_card_from_deck().unwrap(), top);
        assert_eq!(game.deck, expected);
    }

    #[test]
    fn test_draw_with_nothing_left_faults() {
        let mut game = engine(Scenario::CashOnly, 2);
        game.start().unwrap();

        while game.deck.pop().is_ok() {}

        assert_eq!(
            game.draw_card_from_deck(),
            Err(GameError::Container(ContainerError::EmptyContainer))
        );
    }

    #[test]
    fn test_win_requires_distinct_sets() {
        let mut game = engine(Scenario::PropertyOnly, 2);
        game.start().unwrap();
        let player = PlayerId::new(1);

        let complete = |game: &mut GameEngine, set: ActiveSet, cards: &[u32]| {
            let id = game.players.new_collection(player).unwrap();
            let collection = game.players.collection_mut(id).unwrap();
            collection.set_active_set(Some(set));
            collection.add_cards(cards.iter().map(|&c| CardId::new(c))).unwrap();
        };

        complete(&mut game, ActiveSet::Set(PropertySetId::BROWN), &[101, 102]);
        complete(&mut game, ActiveSet::Set(PropertySetId::BROWN), &[103, 104]);
        complete(&mut game, ActiveSet::Set(PropertySetId::DARK_BLUE), &[105, 106]);
        assert!(!game.check_does_player_win(player));

        complete(&mut game, ActiveSet::Set(PropertySetId::UTILITY), &[107, 108]);
        assert!(game.check_does_player_win(player));
        assert!(!game.check_does_player_win(PlayerId::new(2)));
    }

    #[test]
    fn test_exhausted_pool_faults_without_moving_cards() {
        let mut game = engine(Scenario::CashOnly, 2);
        game.start().unwrap();

        let player = PlayerId::new(1);
        let left = game.deck.card_ids();
        for &card in &left[1..] {
            let card = game.deck.give_card(card).unwrap();
            game.players.bank_mut(player).unwrap().add_card(card).unwrap();
        }
        let before = game.serialize();

        assert_eq!(
            game.deal_turn_starting_cards(),
            Err(GameError::Container(ContainerError::EmptyContainer))
        );
        assert_eq!(game.serialize(), before);
    }

    #[test]
    fn test_start_needs_enough_cards() {
        let mut game = engine(Scenario::CashOnly, 5);

        assert_eq!(
            game.start(),
            Err(GameError::Container(ContainerError::EmptyContainer))
        );
        assert!(!game.has_started());
        assert!(game.deck().is_empty());
    }

    #[test]
    fn test_restore_rejects_duplicated_card() {
        let mut game = engine(Scenario::CashOnly, 2);
        game.start().unwrap();

        let mut snapshot = game.serialize();
        let stolen = snapshot.piles.deck[0];
        snapshot.players.players[0].bank.push(stolen);

        let result = GameEngine::restore(GameConfig::new(), &snapshot);
        assert!(matches!(result, Err(GameError::CorruptSnapshot(_))));
    }

    #[test]
    fn test_restore_rejects_foreign_rng_state() {
        let mut game = engine(Scenario::CashOnly, 2);
        game.start().unwrap();

        let mut snapshot = game.serialize();
        snapshot.seed = "other".to_string();

        let result = GameEngine::restore(GameConfig::new(), &snapshot);
        assert!(matches!(result, Err(GameError::CorruptSnapshot(_))));
    }

    /// A started property game whose first deck card sits in a collection
    /// of player 1.
    fn snapshot_with_collection(id: u32, next_collection_id: u32) -> (GameSnapshot, CardId) {
        let mut game = engine(Scenario::PropertyOnly, 2);
        game.start().unwrap();

        let mut snapshot = game.serialize();
        let card = snapshot.piles.deck.remove(0);
        snapshot.players.players[0].collections.push(CollectionSnapshot {
            id: CollectionId::new(id),
            active_set: None,
            cards: vec![card],
        });
        snapshot.players.next_collection_id = next_collection_id;
        (snapshot, card)
    }

    #[test]
    fn test_restore_keeps_collection_ids_fresh() {
        let (snapshot, card) = snapshot_with_collection(1, 2);
        let mut game = GameEngine::restore(GameConfig::new(), &snapshot).unwrap();

        assert_eq!(game.players.next_collection_id(), CollectionId::new(2));
        assert_eq!(game.players.new_collection(PlayerId::new(2)), Some(CollectionId::new(2)));
        assert!(game.collection(CollectionId::new(1)).unwrap().has_card(card));
    }

    #[test]
    fn test_restore_rejects_stale_next_collection_id() {
        let (snapshot, _) = snapshot_with_collection(1, 1);

        let result = GameEngine::restore(GameConfig::new(), &snapshot);
        assert!(matches!(result, Err(GameError::CorruptSnapshot(_))));
    }

    #[test]
    fn test_restore_rejects_shared_collection_id() {
        let (mut snapshot, _) = snapshot_with_collection(1, 2);
        let card = snapshot.piles.deck.remove(0);
        snapshot.players.players[1].collections.push(CollectionSnapshot {
            id: CollectionId::new(1),
            active_set: None,
            cards: vec![card],
        });

        let result = GameEngine::restore(GameConfig::new(), &snapshot);
        assert!(matches!(result, Err(GameError::CorruptSnapshot(_))));
    }

    #[test]
    fn test_restore_rejects_duplicated_player() {
        let mut game = engine(Scenario::CashOnly, 2);
        game.start().unwrap();

        let mut snapshot = game.serialize();
        snapshot.players.players.push(PlayerSnapshot {
            id: PlayerId::new(1),
            hand: Vec::new(),
            bank: Vec::new(),
            collections: Vec::new(),
        });

        let result = GameEngine::restore(GameConfig::new(), &snapshot);
        assert!(matches!(result, Err(GameError::CorruptSnapshot(_))));
    }
}
