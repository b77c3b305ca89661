//! Game configuration types.
//!
//! A game is configured before `start()` by providing:
//! - `Scenario`: which catalog loadout populates the deck
//! - `GameConfig`: scenario plus the numeric rules (hand sizes, budgets)
//!
//! The engine reads these once at start-up; changing them mid-game has no
//! effect on cards already dealt.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Named catalog configuration determining which cards populate the deck.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Scenario {
    /// Money cards only.
    CashOnly,
    /// Plain property cards only.
    PropertyOnly,
    /// Properties plus two-set and superwild cards.
    PropertyPlusWild,
    /// The full mixed catalog.
    #[default]
    Default,
}

impl Scenario {
    /// All scenarios, in catalog order.
    pub const ALL: [Scenario; 4] = [
        Scenario::CashOnly,
        Scenario::PropertyOnly,
        Scenario::PropertyPlusWild,
        Scenario::Default,
    ];

    /// The configuration name of this scenario.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Scenario::CashOnly => "cashOnly",
            Scenario::PropertyOnly => "propertyOnly",
            Scenario::PropertyPlusWild => "propertyPlusWild",
            Scenario::Default => "default",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a scenario name is not recognised.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown scenario `{0}`")]
pub struct UnknownScenario(pub String);

impl FromStr for Scenario {
    type Err = UnknownScenario;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scenario::ALL
            .into_iter()
            .find(|scenario| scenario.name() == s)
            .ok_or_else(|| UnknownScenario(s.to_string()))
    }
}

/// Complete game configuration.
///
/// ```
/// use deal_engine::core::{GameConfig, Scenario};
///
/// let config = GameConfig::new()
///     .with_scenario(Scenario::CashOnly)
///     .with_max_cards_in_hand(9);
///
/// assert_eq!(config.scenario, Scenario::CashOnly);
/// assert_eq!(config.action_limit, 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Catalog loadout used by `start()`.
    pub scenario: Scenario,

    /// Players required before the game can start.
    pub min_player_limit: usize,

    /// Cards dealt to each player at game start.
    pub game_starting_card_count: usize,

    /// Cards drawn by the active player at the start of each turn.
    pub turn_starting_card_count: usize,

    /// Cards a player may keep in hand when the turn ends.
    pub max_cards_in_hand: usize,

    /// Rule-changing plays allowed per turn.
    pub action_limit: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            scenario: Scenario::Default,
            min_player_limit: 2,
            game_starting_card_count: 5,
            turn_starting_card_count: 2,
            max_cards_in_hand: 7,
            action_limit: 3,
        }
    }
}

impl GameConfig {
    /// Create a configuration with the standard rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the catalog scenario.
    #[must_use]
    pub fn with_scenario(mut self, scenario: Scenario) -> Self {
        self.scenario = scenario;
        self
    }

    /// Set the minimum number of players.
    #[must_use]
    pub fn with_min_player_limit(mut self, count: usize) -> Self {
        self.min_player_limit = count;
        self
    }

    /// Set the number of cards dealt at game start.
    #[must_use]
    pub fn with_game_starting_card_count(mut self, count: usize) -> Self {
        self.game_starting_card_count = count;
        self
    }

    /// Set the number of cards drawn at turn start.
    #[must_use]
    pub fn with_turn_starting_card_count(mut self, count: usize) -> Self {
        self.turn_starting_card_count = count;
        self
    }

    /// Set the end-of-turn hand size limit.
    #[must_use]
    pub fn with_max_cards_in_hand(mut self, count: usize) -> Self {
        self.max_cards_in_hand = count;
        self
    }

    /// Set the per-turn action budget.
    #[must_use]
    pub fn with_action_limit(mut self, limit: u32) -> Self {
        self.action_limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();

        assert_eq!(config.scenario, Scenario::Default);
        assert_eq!(config.min_player_limit, 2);
        assert_eq!(config.game_starting_card_count, 5);
        assert_eq!(config.turn_starting_card_count, 2);
        assert_eq!(config.max_cards_in_hand, 7);
        assert_eq!(config.action_limit, 3);
    }

    #[test]
    fn test_config_builder() {
        let config = GameConfig::new()
            .with_scenario(Scenario::PropertyPlusWild)
            .with_min_player_limit(3)
            .with_game_starting_card_count(4)
            .with_turn_starting_card_count(1)
            .with_max_cards_in_hand(6)
            .with_action_limit(2);

        assert_eq!(config.scenario, Scenario::PropertyPlusWild);
        assert_eq!(config.min_player_limit, 3);
        assert_eq!(config.game_starting_card_count, 4);
        assert_eq!(config.turn_starting_card_count, 1);
        assert_eq!(config.max_cards_in_hand, 6);
        assert_eq!(config.action_limit, 2);
    }

    #[test]
    fn test_scenario_names() {
        for scenario in Scenario::ALL {
            assert_eq!(scenario.name().parse::<Scenario>(), Ok(scenario));
            assert_eq!(format!("{}", scenario), scenario.name());
        }
        assert_eq!(
            "everything".parse::<Scenario>(),
            Err(UnknownScenario("everything".to_string()))
        );
    }

    #[test]
    fn test_scenario_serde_uses_config_names() {
        let json = serde_json::to_string(&Scenario::PropertyPlusWild).unwrap();
        assert_eq!(json, "\"propertyPlusWild\"");

        let parsed: Scenario = serde_json::from_str("\"cashOnly\"").unwrap();
        assert_eq!(parsed, Scenario::CashOnly);
    }
}
