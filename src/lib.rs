//! Card Battle - turn-flow engine for a single-player card battle game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (card state machine, zones, game phases)
//! - `config`: Battle configuration and startup validation
//! - `presentation`: Hook points for rendering/audio/UI collaborators

pub mod config;
pub mod presentation;
pub mod sim;

pub use config::{BattleConfig, ConfigError};
pub use presentation::{LogPresenter, Presenter};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Distance at which a moving card counts as arrived
    pub const ARRIVAL_EPSILON: f32 = 0.05;

    /// Move durations (seconds) per zone transfer
    pub const DEAL_DURATION: f32 = 3.0;
    pub const RESOLVE_DURATION: f32 = 5.0;
    pub const DISCARD_DURATION: f32 = 3.0;
    pub const RESHUFFLE_DURATION: f32 = 3.0;

    /// Horizontal gap between hand slots
    pub const HAND_SLOT_SPACING: f32 = 3.0;

    /// Largest card set a battle accepts
    pub const MAX_CARDS: usize = 10_000;

    /// Render order of a card while it is being played
    pub const SELECTED_RENDER_ORDER: i32 = 6;

    /// Damage values, assigned cyclically at card creation
    pub const DAMAGE_TABLE: [i32; 6] = [-3, -2, -1, 1, 2, 3];
}

/// Damage for a slot of the damage table (0 for anything outside it)
#[inline]
pub fn damage_for_slot(slot: usize) -> i32 {
    consts::DAMAGE_TABLE.get(slot).copied().unwrap_or(0)
}

/// Smoothstep easing: t²(3 − 2t)
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_for_slot() {
        assert_eq!(damage_for_slot(0), -3);
        assert_eq!(damage_for_slot(2), -1);
        assert_eq!(damage_for_slot(3), 1);
        assert_eq!(damage_for_slot(5), 3);
        assert_eq!(damage_for_slot(6), 0);
        assert_eq!(damage_for_slot(usize::MAX), 0);
    }

    #[test]
    fn test_damage_table_has_no_zero() {
        for n in 0..60 {
            let dmg = damage_for_slot(n % consts::DAMAGE_TABLE.len());
            assert!(dmg != 0 && (-3..=3).contains(&dmg));
        }
    }

    #[test]
    fn test_smoothstep_shape() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert!((smoothstep(0.5) - 0.5).abs() < 1e-6);
        assert!(smoothstep(0.25) < 0.25);
        assert!(smoothstep(0.75) > 0.75);
    }
}
