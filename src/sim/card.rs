//! Card entity and its state machine

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use super::mover;
use super::state::GamePhase;
use crate::consts::SELECTED_RENDER_ORDER;

/// Handle to a card in the game's card arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Where a card currently lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CardState {
    #[default]
    Deck,
    Hand,
    /// Played; owned by no zone until it is discarded
    Selected,
    Discard,
}

/// One-off side effect of entering a state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionEffect {
    /// Flip face up
    ShowFront { color: Vec4, sprite: usize },
    /// Flip face down
    ShowBack,
    /// Draw above the rest of the table
    RaiseRenderOrder(i32),
    /// Ask the orchestrator to resolve this card
    CommitSelection,
}

/// Effects produced by a single state change, in application order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitionEffects(pub Vec<TransitionEffect>);

impl TransitionEffects {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransitionEffect> {
        self.0.iter()
    }

    pub fn contains(&self, effect: &TransitionEffect) -> bool {
        self.0.contains(effect)
    }
}

/// A card on the table
#[derive(Debug, Clone)]
pub struct Card {
    pub id: CardId,
    state: CardState,
    pub damage: i32,
    pub position: Vec3,
    pub render_order: i32,
    /// Time spent in the current move (reset on arrival)
    pub elapsed: f32,
    /// Color shown while face up
    pub front_color: Vec4,
    /// Value sprite index (slot in the damage table)
    pub value_sprite: usize,
    pub face_up: bool,
    /// Time spent idling in the hand
    pub hand_time: f32,
}

impl Card {
    pub fn new(id: CardId, damage: i32, front_color: Vec4, value_sprite: usize) -> Self {
        Self {
            id,
            state: CardState::Deck,
            damage,
            position: Vec3::ZERO,
            render_order: 0,
            elapsed: 0.0,
            front_color,
            value_sprite,
            face_up: false,
            hand_time: 0.0,
        }
    }

    pub fn state(&self) -> CardState {
        self.state
    }

    /// Change state and describe the side effects the caller must apply.
    ///
    /// Re-entering the current state does nothing.
    pub fn set_state(&mut self, new_state: CardState) -> TransitionEffects {
        if self.state == new_state {
            return TransitionEffects::default();
        }
        self.state = new_state;
        if new_state == CardState::Hand {
            self.hand_time = 0.0;
        }
        Self::entry_effects(new_state, self.front_color, self.value_sprite)
    }

    fn entry_effects(state: CardState, color: Vec4, sprite: usize) -> TransitionEffects {
        match state {
            CardState::Deck | CardState::Hand => TransitionEffects::default(),
            CardState::Selected => TransitionEffects(vec![
                TransitionEffect::ShowFront { color, sprite },
                TransitionEffect::RaiseRenderOrder(SELECTED_RENDER_ORDER),
                TransitionEffect::CommitSelection,
            ]),
            CardState::Discard => TransitionEffects(vec![TransitionEffect::ShowBack]),
        }
    }

    /// Whether a press on this card should select it
    pub fn accepts_selection(&self, phase: GamePhase) -> bool {
        self.state == CardState::Hand && phase == GamePhase::SelectCard
    }

    /// Idle hook, runs every tick while the card sits in the hand
    pub fn on_hand_tick(&mut self, dt: f32) {
        if self.state == CardState::Hand {
            self.hand_time += dt;
        }
    }

    /// Step toward `target`; returns true once the card has arrived
    pub fn move_card(&mut self, target: Vec3, duration: f32, dt: f32) -> bool {
        let step = mover::advance(self.position, target, duration, self.elapsed, dt);
        self.position = step.position;
        self.elapsed = step.elapsed;
        step.arrived
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> Card {
        Card::new(CardId(0), 3, Vec4::ONE, 5)
    }

    #[test]
    fn test_starts_in_deck_face_down() {
        let c = card();
        assert_eq!(c.state(), CardState::Deck);
        assert!(!c.face_up);
    }

    #[test]
    fn test_same_state_is_noop() {
        let mut c = card();
        assert!(c.set_state(CardState::Deck).is_empty());
        c.set_state(CardState::Discard);
        assert!(c.set_state(CardState::Discard).is_empty());
    }

    #[test]
    fn test_selected_effects() {
        let mut c = card();
        c.set_state(CardState::Hand);
        let effects = c.set_state(CardState::Selected);
        assert_eq!(
            effects.0,
            vec![
                TransitionEffect::ShowFront {
                    color: Vec4::ONE,
                    sprite: 5
                },
                TransitionEffect::RaiseRenderOrder(SELECTED_RENDER_ORDER),
                TransitionEffect::CommitSelection,
            ]
        );
        assert_eq!(c.state(), CardState::Selected);
        assert!(effects.contains(&TransitionEffect::CommitSelection));
        assert!(!effects.contains(&TransitionEffect::ShowBack));
    }

    #[test]
    fn test_discard_shows_back() {
        let mut c = card();
        let effects = c.set_state(CardState::Discard);
        assert_eq!(effects.0, vec![TransitionEffect::ShowBack]);
    }

    #[test]
    fn test_hand_and_deck_have_no_effects() {
        let mut c = card();
        assert!(c.set_state(CardState::Hand).is_empty());
        c.set_state(CardState::Discard);
        assert!(c.set_state(CardState::Deck).is_empty());
    }

    #[test]
    fn test_selection_gating() {
        let mut c = card();
        assert!(!c.accepts_selection(GamePhase::SelectCard));
        c.set_state(CardState::Hand);
        assert!(c.accepts_selection(GamePhase::SelectCard));
        for phase in [
            GamePhase::CreateCards,
            GamePhase::Deal,
            GamePhase::Resolve,
            GamePhase::Cleanup,
            GamePhase::Reshuffle,
        ] {
            assert!(!c.accepts_selection(phase));
        }
    }

    #[test]
    fn test_hand_tick_only_in_hand() {
        let mut c = card();
        c.on_hand_tick(0.5);
        assert_eq!(c.hand_time, 0.0);
        c.set_state(CardState::Hand);
        c.on_hand_tick(0.5);
        c.on_hand_tick(0.25);
        assert!((c.hand_time - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_move_card_resets_elapsed_on_arrival() {
        let mut c = card();
        let target = Vec3::new(3.0, 0.0, 0.0);
        let mut arrived = false;
        for _ in 0..400 {
            if c.move_card(target, 3.0, 1.0 / 60.0) {
                arrived = true;
                break;
            }
        }
        assert!(arrived);
        assert_eq!(c.position, target);
        assert_eq!(c.elapsed, 0.0);
    }
}
