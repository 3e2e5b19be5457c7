//! Deterministic simulation module
//!
//! All turn-flow logic lives here. Nothing in this module renders, plays
//! audio or polls input devices:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable zone order (stacks, top = last)

pub mod card;
pub mod event;
pub mod mover;
pub mod state;
pub mod tick;
pub mod zones;

pub use card::{Card, CardId, CardState, TransitionEffect, TransitionEffects};
pub use event::{CardSignal, GameEvent};
pub use mover::{MoveStep, advance};
pub use state::{GamePhase, GameState};
pub use tick::{TickInput, auto_pick, tick};
pub use zones::{Zone, ZoneStore};
