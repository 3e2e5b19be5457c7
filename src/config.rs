//! Battle configuration
//!
//! Read-only inputs to the simulation, supplied once at startup.
//! Every field has a default so partial JSON files are accepted.

use std::path::Path;

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::consts::MAX_CARDS;

/// Reasons a configuration is rejected at startup
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// No cards to play with
    NoCards,
    /// More cards than a battle can hold
    TooManyCards { card_count: usize, max: usize },
    /// A hand of zero cards can never be played
    EmptyHand,
    /// The deck can never fill the hand
    HandLargerThanDeck { hand_count: usize, card_count: usize },
    /// The deck would run dry partway through a deal
    UnevenDeal { hand_count: usize, card_count: usize },
    /// A zone position has a NaN or infinite component
    NonFinitePosition(&'static str),
    /// The config file could not be read
    Io(String),
    /// The config file is not valid JSON for `BattleConfig`
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NoCards => write!(f, "card_count must be at least 1"),
            ConfigError::TooManyCards { card_count, max } => write!(
                f,
                "card_count ({}) exceeds the maximum of {}",
                card_count, max
            ),
            ConfigError::EmptyHand => write!(f, "hand_count must be at least 1"),
            ConfigError::HandLargerThanDeck {
                hand_count,
                card_count,
            } => write!(
                f,
                "hand_count ({}) exceeds card_count ({}); the hand could never fill",
                hand_count, card_count
            ),
            ConfigError::UnevenDeal {
                hand_count,
                card_count,
            } => write!(
                f,
                "card_count ({}) is not a multiple of hand_count ({}); the deck would empty mid-deal",
                card_count, hand_count
            ),
            ConfigError::NonFinitePosition(name) => {
                write!(f, "{} has a non-finite component", name)
            }
            ConfigError::Io(msg) => write!(f, "Failed to read config: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Battle setup: card counts, zone anchors, colors and the enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Total cards in play
    pub card_count: usize,
    /// Cards dealt before the player may select
    pub hand_count: usize,

    // === Zone anchors ===
    /// First hand slot; later slots step along +x
    pub hand_pos: Vec3,
    /// Where a played card travels to hit the enemy
    pub attack_pos: Vec3,
    /// Discard pile
    pub discard_pos: Vec3,
    /// Deck pile (cards are created and reshuffled here)
    pub deck_origin: Vec3,

    // === Enemy ===
    pub enemy_health: i32,

    // === Card visuals ===
    /// Front color for negative damage cards
    pub minus_color: Vec4,
    /// Front color for positive damage cards
    pub plus_color: Vec4,

    // === Reshuffle ===
    /// Shuffle the deck once the discard pile has been returned
    pub shuffle_on_reshuffle: bool,
    /// Seed for the reshuffle RNG
    pub seed: u64,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            card_count: 12,
            hand_count: 3,

            hand_pos: Vec3::new(-3.0, -3.0, 0.0),
            attack_pos: Vec3::new(0.0, 2.5, 0.0),
            discard_pos: Vec3::new(8.0, -3.0, 0.0),
            deck_origin: Vec3::new(-8.0, -3.0, 0.0),

            enemy_health: 20,

            minus_color: Vec4::new(0.85, 0.2, 0.2, 1.0),
            plus_color: Vec4::new(0.2, 0.75, 0.3, 1.0),

            shuffle_on_reshuffle: false,
            seed: 0,
        }
    }
}

impl BattleConfig {
    /// Check the invariants the turn flow relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.card_count == 0 {
            return Err(ConfigError::NoCards);
        }
        if self.card_count > MAX_CARDS {
            return Err(ConfigError::TooManyCards {
                card_count: self.card_count,
                max: MAX_CARDS,
            });
        }
        if self.hand_count == 0 {
            return Err(ConfigError::EmptyHand);
        }
        if self.hand_count > self.card_count {
            return Err(ConfigError::HandLargerThanDeck {
                hand_count: self.hand_count,
                card_count: self.card_count,
            });
        }
        if self.card_count % self.hand_count != 0 {
            return Err(ConfigError::UnevenDeal {
                hand_count: self.hand_count,
                card_count: self.card_count,
            });
        }

        let anchors = [
            ("hand_pos", self.hand_pos),
            ("attack_pos", self.attack_pos),
            ("discard_pos", self.discard_pos),
            ("deck_origin", self.deck_origin),
        ];
        for (name, pos) in anchors {
            if !pos.is_finite() {
                return Err(ConfigError::NonFinitePosition(name));
            }
        }

        Ok(())
    }

    /// Front color for a card with the given damage
    pub fn color_for_damage(&self, damage: i32) -> Vec4 {
        if damage < 0 {
            self.minus_color
        } else {
            self.plus_color
        }
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_json(&json)?;
        log::info!(
            "Loaded config from {} ({} cards, hand of {})",
            path.display(),
            config.card_count,
            config.hand_count
        );
        Ok(config)
    }
}
