//! Game state and the turn-flow orchestrator
//!
//! `GameState` is the single writer for zones, the selected card, the phase
//! and enemy health. Cards only describe what should happen when they change
//! state; the orchestrator applies those effects and drains their signals.

use std::collections::VecDeque;

use glam::Vec3;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::card::{Card, CardId, CardState, TransitionEffect, TransitionEffects};
use super::event::{CardSignal, GameEvent};
use super::zones::{Zone, ZoneStore};
use crate::config::{BattleConfig, ConfigError};
use crate::consts::*;
use crate::damage_for_slot;

/// Top-level phase of the turn flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Building the card set (entry action only)
    CreateCards,
    /// Dealing from the deck until the hand is full
    Deal,
    /// Waiting for the player to pick a hand card
    SelectCard,
    /// Selected card flies to the enemy
    Resolve,
    /// Hand (and played card) go to the discard pile
    Cleanup,
    /// Discard pile returns to the deck
    Reshuffle,
}

/// Complete battle state
#[derive(Debug, Clone)]
pub struct GameState {
    config: BattleConfig,
    phase: GamePhase,
    enemy_health: i32,
    /// Card being played; held by no zone
    selected: Option<CardId>,
    /// Card arena, indexed by `CardId`
    cards: Vec<Card>,
    zones: ZoneStore,
    inbox: VecDeque<CardSignal>,
    events: Vec<GameEvent>,
    time_ticks: u64,
    rng: Pcg32,
}

impl GameState {
    /// Validate the config, create the cards and start dealing
    pub fn new(config: BattleConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut state = Self {
            phase: GamePhase::CreateCards,
            enemy_health: config.enemy_health,
            selected: None,
            cards: Vec::with_capacity(config.card_count),
            zones: ZoneStore::new(),
            inbox: VecDeque::new(),
            events: Vec::new(),
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(config.seed),
            config,
        };

        state.events.push(GameEvent::EnemyHealthChanged {
            health: state.enemy_health,
        });
        state.set_phase(GamePhase::CreateCards);

        Ok(state)
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn enemy_health(&self) -> i32 {
        self.enemy_health
    }

    pub fn selected(&self) -> Option<CardId> {
        self.selected
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index())
    }

    pub fn zones(&self) -> &ZoneStore {
        &self.zones
    }

    /// Simulation tick counter
    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Events raised since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Cards held by a zone or in flight as the selected card
    pub fn accounted_cards(&self) -> usize {
        self.zones.total() + usize::from(self.selected.is_some())
    }

    pub(crate) fn advance_clock(&mut self) {
        self.time_ticks += 1;
    }

    fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        self.phase = to;
        if from != to {
            log::info!("Phase {:?} -> {:?}", from, to);
            self.events.push(GameEvent::PhaseChanged { from, to });
        }

        if to == GamePhase::CreateCards {
            self.create_cards();
            self.set_phase(GamePhase::Deal);
        }
    }

    fn create_cards(&mut self) {
        if !self.cards.is_empty() {
            log::warn!("Cards already created, keeping the existing {}", self.cards.len());
            return;
        }

        let count = self.config.card_count;
        for i in 0..count {
            let slot = self.zones.len(Zone::Deck) % DAMAGE_TABLE.len();
            let damage = damage_for_slot(slot);
            let id = CardId(self.cards.len() as u32);

            let mut card = Card::new(id, damage, self.config.color_for_damage(damage), slot);
            card.render_order = -((count - i) as i32);
            card.position = self.config.deck_origin;

            self.cards.push(card);
            self.zones.push(Zone::Deck, id);
        }
        log::info!("Created {} cards", count);
    }

    fn card_mut(&mut self, id: CardId) -> &mut Card {
        let count = self.cards.len();
        match self.cards.get_mut(id.index()) {
            Some(card) => card,
            None => panic!("{} is not one of the {} cards in play", id, count),
        }
    }

    /// Change a card's state and apply the resulting effects
    fn set_card_state(&mut self, id: CardId, state: CardState) {
        let effects = self.card_mut(id).set_state(state);
        self.apply_effects(id, &effects);
    }

    fn apply_effects(&mut self, id: CardId, effects: &TransitionEffects) {
        for effect in effects.iter() {
            match *effect {
                TransitionEffect::ShowFront { color, sprite } => {
                    self.card_mut(id).face_up = true;
                    self.events.push(GameEvent::CardRevealed {
                        card: id,
                        color,
                        sprite,
                    });
                }
                TransitionEffect::ShowBack => {
                    self.card_mut(id).face_up = false;
                    self.events.push(GameEvent::CardHidden { card: id });
                }
                TransitionEffect::RaiseRenderOrder(order) => {
                    self.card_mut(id).render_order = order;
                }
                TransitionEffect::CommitSelection => {
                    self.inbox.push_back(CardSignal::Selected(id));
                }
            }
        }
    }

    fn process_signals(&mut self) {
        while let Some(signal) = self.inbox.pop_front() {
            match signal {
                CardSignal::Selected(id) => {
                    self.selected = Some(id);
                    self.set_phase(GamePhase::Resolve);
                }
            }
        }
    }

    /// Pointer press on a card. Returns true if it selected the card.
    pub(crate) fn press(&mut self, id: CardId) -> bool {
        let Some(card) = self.cards.get(id.index()) else {
            log::warn!("Press on unknown {}", id);
            return false;
        };
        let accepted = card.accepts_selection(self.phase);
        self.events.push(GameEvent::CardPressed { card: id });

        if !accepted {
            log::trace!("Ignored press on {} ({:?}, {:?})", id, card.state(), self.phase);
            return false;
        }

        if !self.zones.remove(Zone::Hand, id) {
            panic!("{} is in Hand state but not in the hand zone", id);
        }
        self.set_card_state(id, CardState::Selected);
        // Consumed right away so a second press this tick sees Resolve
        self.process_signals();
        true
    }

    /// Idle hook for every card resting in the hand
    pub(crate) fn idle_hand(&mut self, dt: f32) {
        for &id in self.zones.cards(Zone::Hand) {
            self.cards[id.index()].on_hand_tick(dt);
        }
    }

    fn arrive(&mut self, id: CardId, state: CardState) {
        log::debug!("{} arrived ({:?})", id, state);
        self.events.push(GameEvent::CardArrived { card: id, state });
    }

    /// Move the top deck card into the next hand slot
    pub(crate) fn deal_one(&mut self, dt: f32) {
        let Some(id) = self.zones.top(Zone::Deck) else {
            panic!("Dealing from an empty deck");
        };
        let hand_len = self.zones.len(Zone::Hand);
        let target = self.config.hand_pos + Vec3::X * (HAND_SLOT_SPACING * hand_len as f32);

        let card = self.card_mut(id);
        card.render_order = hand_len as i32;
        if !card.move_card(target, DEAL_DURATION, dt) {
            return;
        }

        self.zones.transfer_top(Zone::Deck, Zone::Hand);
        self.set_card_state(id, CardState::Hand);
        self.arrive(id, CardState::Hand);

        if self.zones.len(Zone::Hand) == self.config.hand_count {
            self.set_phase(GamePhase::SelectCard);
        }
    }

    /// Fly the selected card to the enemy and apply its damage
    pub(crate) fn resolve_selected(&mut self, dt: f32) {
        let Some(id) = self.selected else {
            panic!("Resolving with no selected card");
        };
        let target = self.config.attack_pos;

        let card = self.card_mut(id);
        if !card.move_card(target, RESOLVE_DURATION, dt) {
            return;
        }
        let damage = card.damage;

        self.enemy_health += damage;
        log::info!("{} hits for {}, enemy health {}", id, damage, self.enemy_health);
        self.arrive(id, CardState::Selected);
        self.events.push(GameEvent::EnemyHealthChanged {
            health: self.enemy_health,
        });
        self.set_phase(GamePhase::Cleanup);
    }

    /// Discard the played card, then the hand from the top down
    pub(crate) fn discard_one(&mut self, dt: f32) {
        let (id, from_hand) = match (self.selected, self.zones.top(Zone::Hand)) {
            (Some(id), _) => (id, false),
            (None, Some(id)) => (id, true),
            (None, None) => panic!("Cleanup with an empty hand and no played card"),
        };
        let target = self.config.discard_pos;
        let discard_len = self.zones.len(Zone::Discard);

        let card = self.card_mut(id);
        card.render_order = discard_len as i32;
        if !card.move_card(target, DISCARD_DURATION, dt) {
            return;
        }

        if from_hand {
            self.zones.transfer_top(Zone::Hand, Zone::Discard);
        } else {
            self.selected = None;
            self.zones.push(Zone::Discard, id);
        }
        self.set_card_state(id, CardState::Discard);
        self.arrive(id, CardState::Discard);

        if self.zones.is_empty(Zone::Hand) && self.selected.is_none() {
            if self.zones.is_empty(Zone::Deck) {
                self.set_phase(GamePhase::Reshuffle);
            } else {
                self.set_phase(GamePhase::Deal);
            }
        }
    }

    /// Return the top discard card to the deck
    pub(crate) fn reshuffle_one(&mut self, dt: f32) {
        let Some(id) = self.zones.top(Zone::Discard) else {
            panic!("Reshuffling an empty discard pile");
        };
        let target = self.config.deck_origin;

        if !self.card_mut(id).move_card(target, RESHUFFLE_DURATION, dt) {
            return;
        }

        let order = self.deck_render_order(self.zones.len(Zone::Deck));
        self.card_mut(id).render_order = order;
        self.zones.transfer_top(Zone::Discard, Zone::Deck);
        self.set_card_state(id, CardState::Deck);
        self.arrive(id, CardState::Deck);

        if self.zones.is_empty(Zone::Discard) {
            if self.config.shuffle_on_reshuffle {
                self.shuffle_deck();
            }
            self.set_phase(GamePhase::Deal);
        }
    }

    /// Render order of the deck card at `index`; deeper cards draw lower
    fn deck_render_order(&self, index: usize) -> i32 {
        -(self.config.card_count.saturating_sub(index) as i32)
    }

    fn shuffle_deck(&mut self) {
        let rng = &mut self.rng;
        self.zones.reorder(Zone::Deck, |cards| cards.shuffle(rng));

        let count = self.config.card_count;
        for (i, &id) in self.zones.cards(Zone::Deck).iter().enumerate() {
            self.cards[id.index()].render_order = -(count.saturating_sub(i) as i32);
        }
        log::info!("Deck shuffled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> BattleConfig {
        BattleConfig {
            card_count: 6,
            hand_count: 3,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_creates_cards_and_deals() {
        let state = GameState::new(small_config()).expect("valid config");
        assert_eq!(state.phase(), GamePhase::Deal);
        assert_eq!(state.cards().len(), 6);
        assert_eq!(state.zones().len(Zone::Deck), 6);
        assert_eq!(state.accounted_cards(), 6);

        let damages: Vec<i32> = state.cards().iter().map(|c| c.damage).collect();
        assert_eq!(damages, vec![-3, -2, -1, 1, 2, 3]);
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let config = BattleConfig {
            card_count: 2,
            hand_count: 3,
            ..Default::default()
        };
        assert!(matches!(
            GameState::new(config),
            Err(ConfigError::HandLargerThanDeck { .. })
        ));
    }

    #[test]
    fn test_creation_events() {
        let state = GameState::new(small_config()).expect("valid config");
        assert_eq!(
            state.events(),
            &[
                GameEvent::EnemyHealthChanged { health: 20 },
                GameEvent::PhaseChanged {
                    from: GamePhase::CreateCards,
                    to: GamePhase::Deal
                },
            ]
        );
    }

    #[test]
    fn test_created_cards_stack_at_deck_origin() {
        let config = small_config();
        let state = GameState::new(config.clone()).expect("valid config");
        let orders: Vec<i32> = state.cards().iter().map(|c| c.render_order).collect();
        assert_eq!(orders, vec![-6, -5, -4, -3, -2, -1]);
        for card in state.cards() {
            assert_eq!(card.position, config.deck_origin);
            assert_eq!(card.state(), CardState::Deck);
            assert!(!card.face_up);
        }
    }

    #[test]
    fn test_colors_follow_damage_sign() {
        let config = BattleConfig {
            card_count: 12,
            hand_count: 3,
            ..Default::default()
        };
        let state = GameState::new(config.clone()).expect("valid config");
        for card in state.cards() {
            let expected = if card.damage < 0 {
                config.minus_color
            } else {
                config.plus_color
            };
            assert_eq!(card.front_color, expected);
            assert_eq!(card.damage, DAMAGE_TABLE[card.value_sprite]);
        }
    }

    #[test]
    fn test_new_rejects_oversized_deck() {
        let config = BattleConfig {
            card_count: usize::MAX,
            hand_count: 1,
            ..Default::default()
        };
        assert!(matches!(
            GameState::new(config),
            Err(ConfigError::TooManyCards { .. })
        ));
    }

    #[test]
    fn test_press_outside_select_is_ignored() {
        let mut state = GameState::new(small_config()).expect("valid config");
        let top = state.zones().top(Zone::Deck).expect("deck has cards");

        assert!(!state.press(top));
        assert_eq!(state.phase(), GamePhase::Deal);
        assert_eq!(state.selected(), None);
        assert_eq!(state.zones().zone_of(top), Some(Zone::Deck));
        assert_eq!(state.card(top).map(|c| c.state()), Some(CardState::Deck));
    }

    #[test]
    fn test_press_unknown_card() {
        let mut state = GameState::new(small_config()).expect("valid config");
        assert!(!state.press(CardId(99)));
        assert_eq!(state.accounted_cards(), 6);
    }

    #[test]
    #[should_panic(expected = "no selected card")]
    fn test_resolve_without_selection_panics() {
        let mut state = GameState::new(small_config()).expect("valid config");
        state.resolve_selected(SIM_DT);
    }

    #[test]
    #[should_panic(expected = "empty discard")]
    fn test_reshuffle_empty_discard_panics() {
        let mut state = GameState::new(small_config()).expect("valid config");
        state.reshuffle_one(SIM_DT);
    }

    #[test]
    fn test_deck_render_order() {
        let state = GameState::new(small_config()).expect("valid config");
        assert_eq!(state.deck_render_order(0), -6);
        assert_eq!(state.deck_render_order(5), -1);
    }
}
