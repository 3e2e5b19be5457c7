//! Deck, hand and discard stacks
//!
//! Each zone is an ordered stack of card handles: index 0 is the bottom,
//! the last element is the top. Transfers always take from and add to the top.

use serde::{Deserialize, Serialize};

use super::card::{CardId, CardState};

/// A zone that holds cards between moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Deck,
    Hand,
    Discard,
}

impl Zone {
    /// Card state matching membership of this zone
    pub fn card_state(self) -> CardState {
        match self {
            Zone::Deck => CardState::Deck,
            Zone::Hand => CardState::Hand,
            Zone::Discard => CardState::Discard,
        }
    }
}

/// Ordered card stacks for every zone
#[derive(Debug, Clone, Default)]
pub struct ZoneStore {
    deck: Vec<CardId>,
    hand: Vec<CardId>,
    discard: Vec<CardId>,
}

impl ZoneStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn stack(&self, zone: Zone) -> &Vec<CardId> {
        match zone {
            Zone::Deck => &self.deck,
            Zone::Hand => &self.hand,
            Zone::Discard => &self.discard,
        }
    }

    fn stack_mut(&mut self, zone: Zone) -> &mut Vec<CardId> {
        match zone {
            Zone::Deck => &mut self.deck,
            Zone::Hand => &mut self.hand,
            Zone::Discard => &mut self.discard,
        }
    }

    /// Cards in a zone, bottom to top
    pub fn cards(&self, zone: Zone) -> &[CardId] {
        self.stack(zone)
    }

    pub fn len(&self, zone: Zone) -> usize {
        self.stack(zone).len()
    }

    pub fn is_empty(&self, zone: Zone) -> bool {
        self.stack(zone).is_empty()
    }

    /// Top card of a zone
    pub fn top(&self, zone: Zone) -> Option<CardId> {
        self.stack(zone).last().copied()
    }

    /// Put a card on top of a zone.
    ///
    /// Panics if the card is already held by any zone.
    pub fn push(&mut self, zone: Zone, card: CardId) {
        if let Some(held) = self.zone_of(card) {
            panic!("{} pushed to {:?} while still in {:?}", card, zone, held);
        }
        self.stack_mut(zone).push(card);
    }

    /// Move the top card of `from` onto `to`; returns the card moved
    pub fn transfer_top(&mut self, from: Zone, to: Zone) -> Option<CardId> {
        let card = self.stack_mut(from).pop()?;
        self.stack_mut(to).push(card);
        Some(card)
    }

    /// Take a specific card out of a zone; returns false if it wasn't there
    pub fn remove(&mut self, zone: Zone, card: CardId) -> bool {
        let stack = self.stack_mut(zone);
        match stack.iter().position(|&c| c == card) {
            Some(i) => {
                stack.remove(i);
                true
            }
            None => false,
        }
    }

    /// Zone currently holding a card
    pub fn zone_of(&self, card: CardId) -> Option<Zone> {
        [Zone::Deck, Zone::Hand, Zone::Discard]
            .into_iter()
            .find(|&z| self.stack(z).contains(&card))
    }

    /// Reorder a zone in place
    pub fn reorder(&mut self, zone: Zone, f: impl FnOnce(&mut [CardId])) {
        f(self.stack_mut(zone));
    }

    /// Cards held across all zones
    pub fn total(&self) -> usize {
        self.deck.len() + self.hand.len() + self.discard.len()
    }
}
