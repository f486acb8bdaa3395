//! Discrete vertical kinematics for the bird
//!
//! One pure state transition per tick. The bot's lookahead runs the same
//! [`advance`] on copies of [`BirdBody`]; no heavyweight state (masks,
//! sprites) is ever cloned for simulation.

use serde::{Deserialize, Serialize};

use super::config::GameConfig;

/// Per-tick input: tap or don't.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Action {
    Flap,
    #[default]
    Coast,
}

/// Fixed physics constants, derived once from the config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsParams {
    pub gravity: f32,
    pub max_vel_y: f32,
    pub min_vel_y: f32,
    pub flap_impulse: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl PhysicsParams {
    pub fn from_config(cfg: &GameConfig) -> Self {
        Self {
            gravity: cfg.gravity,
            max_vel_y: cfg.max_vel_y,
            min_vel_y: cfg.min_vel_y,
            flap_impulse: cfg.flap_impulse,
            min_y: cfg.bird_min_y(),
            max_y: cfg.bird_max_y(),
        }
    }
}

/// The minimal mutable state of the bird: everything [`advance`] needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BirdBody {
    /// Vertical position (top edge), world units
    pub y: f32,
    /// Vertical velocity, positive = downward
    pub vy: f32,
    /// Set by a flap; suppresses gravity for exactly one later tick
    pub flapped: bool,
}

/// Advance the body by exactly one tick.
///
/// - `Flap` sets `vy` to the flap impulse and arms the one-tick gravity
///   grace. A flap while pinned at the top bound is ineffective and the
///   tick falls through to coasting.
/// - `Coast` accumulates gravity unless the grace flag is armed; the flag
///   is consumed either way.
/// - `vy` and `y` are clamped to their bands every tick.
pub fn advance(body: &mut BirdBody, action: Action, p: &PhysicsParams) {
    match action {
        Action::Flap if body.y > p.min_y => {
            body.vy = p.flap_impulse;
            body.flapped = true;
        }
        _ => {
            if body.flapped {
                body.flapped = false;
            } else if body.vy < p.max_vel_y {
                body.vy += p.gravity;
            }
        }
    }
    body.vy = body.vy.clamp(p.min_vel_y, p.max_vel_y);
    body.y = (body.y + body.vy).clamp(p.min_y, p.max_y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn params() -> PhysicsParams {
        PhysicsParams::from_config(&GameConfig::default())
    }

    #[test]
    fn flap_sets_impulse_immediately() {
        let p = params();
        let mut body = BirdBody {
            y: 300.0,
            vy: 5.0,
            flapped: false,
        };
        advance(&mut body, Action::Flap, &p);
        assert_eq!(body.vy, p.flap_impulse);
        assert!(body.flapped);
        assert_eq!(body.y, 300.0 + p.flap_impulse);
    }

    #[test]
    fn flap_grace_period_spans_one_tick() {
        let p = params();
        let mut body = BirdBody {
            y: 300.0,
            vy: 5.0,
            flapped: false,
        };
        // Tick t: flap
        advance(&mut body, Action::Flap, &p);
        assert_eq!(body.vy, -9.0);
        // Tick t+1: gravity suppressed
        advance(&mut body, Action::Coast, &p);
        assert_eq!(body.vy, -9.0);
        assert!(!body.flapped);
        // Tick t+2: gravity applies again
        advance(&mut body, Action::Coast, &p);
        assert_eq!(body.vy, -8.0);
    }

    #[test]
    fn gravity_accumulates_and_caps() {
        let p = params();
        let mut body = BirdBody {
            y: 300.0,
            vy: 8.0,
            flapped: false,
        };
        advance(&mut body, Action::Coast, &p);
        assert_eq!(body.vy, 9.0);
        advance(&mut body, Action::Coast, &p);
        assert_eq!(body.vy, 10.0);
        advance(&mut body, Action::Coast, &p);
        assert_eq!(body.vy, 10.0);
    }

    #[test]
    fn flap_at_ceiling_degrades_to_coast() {
        let p = params();
        let mut body = BirdBody {
            y: p.min_y,
            vy: p.min_vel_y,
            flapped: false,
        };
        advance(&mut body, Action::Flap, &p);
        // No impulse; gravity pulled the bird off the ceiling instead
        assert_eq!(body.vy, p.min_vel_y + p.gravity);
        assert!(!body.flapped);
    }

    proptest! {
        #[test]
        fn clamps_hold_for_any_action_sequence(
            flaps in proptest::collection::vec(any::<bool>(), 0..300)
        ) {
            let cfg = GameConfig::default();
            let p = PhysicsParams::from_config(&cfg);
            let mut body = BirdBody {
                y: cfg.initial_bird_y(),
                vy: cfg.initial_vel_y,
                flapped: false,
            };
            for flap in flaps {
                let action = if flap { Action::Flap } else { Action::Coast };
                advance(&mut body, action, &p);
                prop_assert!(body.y >= p.min_y && body.y <= p.max_y);
                prop_assert!(body.vy >= p.min_vel_y && body.vy <= p.max_vel_y);
            }
        }
    }
}
