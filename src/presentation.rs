//! Presentation hook points
//!
//! Rendering, audio and UI text live outside the simulation. They receive
//! the drained `GameEvent` stream through a `Presenter`.

use crate::sim::GameEvent;

/// Consumer of simulation events (sprites, sounds, health text)
pub trait Presenter {
    fn present(&mut self, event: &GameEvent);

    fn present_all(&mut self, events: &[GameEvent]) {
        for event in events {
            self.present(event);
        }
    }
}

/// Presenter that writes events to the log and keeps the health text
#[derive(Debug, Clone, Default)]
pub struct LogPresenter {
    /// Last rendered health line
    pub health_text: String,
}

impl LogPresenter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Presenter for LogPresenter {
    fn present(&mut self, event: &GameEvent) {
        match event {
            GameEvent::EnemyHealthChanged { health } => {
                self.health_text = format!("Health: {}", health);
                log::info!("{}", self.health_text);
            }
            GameEvent::CardRevealed {
                card,
                color,
                sprite,
            } => {
                log::debug!("{} face up (sprite {}, color {:?})", card, sprite, color);
            }
            GameEvent::CardHidden { card } => log::debug!("{} face down", card),
            GameEvent::CardPressed { card } => log::trace!("{} pressed", card),
            GameEvent::CardArrived { card, state } => {
                log::trace!("{} settled as {:?}", card, state)
            }
            GameEvent::PhaseChanged { .. } => {}
        }
    }
}
