//! Messages crossing the simulation boundary
//!
//! `GameEvent`s flow out to presentation; `CardSignal`s flow from cards
//! into the orchestrator's inbox.

use glam::Vec4;
use serde::{Deserialize, Serialize};

use super::card::{CardId, CardState};
use super::state::GamePhase;

/// Presentation-facing event, buffered on the game state each tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    /// Card flipped face up (front color + value sprite)
    CardRevealed {
        card: CardId,
        color: Vec4,
        sprite: usize,
    },
    /// Card flipped back to its back face
    CardHidden { card: CardId },
    /// Pointer pressed on a card, accepted or not (bounce/click feedback)
    CardPressed { card: CardId },
    /// Card finished a zone transfer
    CardArrived { card: CardId, state: CardState },
    EnemyHealthChanged { health: i32 },
}

/// Request raised by a card and consumed by the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardSignal {
    /// Card entered `Selected` and should be resolved
    Selected(CardId),
}
