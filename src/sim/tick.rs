//! Simulation tick
//!
//! Advances the turn flow by one timestep: input first, then the idle hook,
//! then the handler for the current phase. Each handler moves at most one card.

use super::card::CardId;
use super::state::{GamePhase, GameState};
use super::zones::Zone;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Cards pressed this tick, in order
    pub presses: Vec<CardId>,
    /// Autopilot - plays the weakest hand card when a selection is due
    pub auto_play: bool,
}

impl TickInput {
    /// Input with a single card press
    pub fn press(card: CardId) -> Self {
        Self {
            presses: vec![card],
            ..Default::default()
        }
    }
}

/// Advance the battle by one timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.advance_clock();

    for &card in &input.presses {
        state.press(card);
    }
    if input.auto_play && input.presses.is_empty() {
        if let Some(card) = auto_pick(state) {
            state.press(card);
        }
    }

    state.idle_hand(dt);

    match state.phase() {
        GamePhase::Deal => state.deal_one(dt),
        GamePhase::Resolve => state.resolve_selected(dt),
        GamePhase::Cleanup => state.discard_one(dt),
        GamePhase::Reshuffle => state.reshuffle_one(dt),
        GamePhase::CreateCards | GamePhase::SelectCard => {}
    }

    debug_assert_eq!(
        state.accounted_cards(),
        state.config().card_count,
        "card lost or duplicated"
    );
}

/// Hand card the autopilot would play: lowest damage, earliest on ties
pub fn auto_pick(state: &GameState) -> Option<CardId> {
    if state.phase() != GamePhase::SelectCard {
        return None;
    }
    state
        .zones()
        .cards(Zone::Hand)
        .iter()
        .copied()
        .filter_map(|id| state.card(id).map(|c| (id, c.damage)))
        .min_by_key(|&(_, damage)| damage)
        .map(|(id, _)| id)
}
