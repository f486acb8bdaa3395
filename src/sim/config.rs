//! Immutable per-session configuration
//!
//! Every constant the simulation consumes lives in one value passed into
//! session construction, so batch runs with different configs never
//! cross-contaminate. Validated once, up front.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration rejected at session construction.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("screen dimensions must be positive, got {width}x{height}")]
    BadScreenSize { width: f32, height: f32 },
    #[error("sprite dimensions must be positive")]
    BadSpriteSize,
    #[error("gap band is inverted: min_gap_y {min} > max_gap_y {max}")]
    GapRangeInverted { min: f32, max: f32 },
    #[error("max_gap_transition must be non-negative, got {0}")]
    NegativeGapTransition(f32),
    #[error("pipe_velocity_x must be negative (pipes scroll left), got {0}")]
    BadPipeVelocity(f32),
    #[error("gravity must be positive, got {0}")]
    BadGravity(f32),
    #[error("velocity band is inverted: min_vel_y {min} > max_vel_y {max}")]
    VelocityRangeInverted { min: f32, max: f32 },
    #[error("initial_vel_y {0} lies outside the velocity band")]
    InitialVelocityOutOfBand(f32),
    #[error("flap_impulse {0} lies outside the velocity band")]
    FlapImpulseOutOfBand(f32),
}

/// All tunables for one game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Visible area width in world units (pixels)
    pub screen_width: f32,
    /// Visible area height
    pub screen_height: f32,
    /// Fixed simulation rate; only used to convert ticks to seconds
    pub ticks_per_second: u32,

    /// Bird sprite size
    pub bird_width: f32,
    pub bird_height: f32,
    /// Bird horizontal position as a fraction of screen width
    pub bird_x_frac: f32,
    /// Downward acceleration applied each non-flap tick
    pub gravity: f32,
    /// Max descend speed
    pub max_vel_y: f32,
    /// Max ascend speed (negative = upward)
    pub min_vel_y: f32,
    /// Vertical velocity set on a flap
    pub flap_impulse: f32,
    /// Vertical velocity at session start
    pub initial_vel_y: f32,

    /// Pipe sprite size
    pub pipe_width: f32,
    pub pipe_height: f32,
    /// Vertical span of the passable gap between a pair
    pub pipe_gap: f32,
    /// Horizontal pipe velocity (negative, scrolling left)
    pub pipe_velocity_x: f32,
    /// Horizontal margin past the right screen edge where pairs spawn
    pub spawn_margin: f32,

    /// Lowest permitted gap top (distance from top of screen)
    pub min_gap_y: f32,
    /// Highest permitted gap top
    pub max_gap_y: f32,
    /// Bound on |gap_top(n) - gap_top(n-1)| between consecutive pairs
    pub max_gap_transition: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 1280.0,
            screen_height: 720.0,
            ticks_per_second: 30,

            bird_width: 34.0,
            bird_height: 24.0,
            bird_x_frac: 0.2,
            gravity: 1.0,
            max_vel_y: 10.0,
            min_vel_y: -9.0,
            flap_impulse: -9.0,
            initial_vel_y: -9.0,

            pipe_width: 52.0,
            pipe_height: 512.0,
            pipe_gap: 120.0,
            pipe_velocity_x: -5.0,
            spawn_margin: 10.0,

            min_gap_y: 100.0,
            max_gap_y: 500.0,
            max_gap_transition: 150.0,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen_width <= 0.0 || self.screen_height <= 0.0 {
            return Err(ConfigError::BadScreenSize {
                width: self.screen_width,
                height: self.screen_height,
            });
        }
        if self.bird_width <= 0.0
            || self.bird_height <= 0.0
            || self.pipe_width <= 0.0
            || self.pipe_height <= 0.0
        {
            return Err(ConfigError::BadSpriteSize);
        }
        if self.min_gap_y > self.max_gap_y {
            return Err(ConfigError::GapRangeInverted {
                min: self.min_gap_y,
                max: self.max_gap_y,
            });
        }
        if self.max_gap_transition < 0.0 {
            return Err(ConfigError::NegativeGapTransition(self.max_gap_transition));
        }
        if self.pipe_velocity_x >= 0.0 {
            return Err(ConfigError::BadPipeVelocity(self.pipe_velocity_x));
        }
        if self.gravity <= 0.0 {
            return Err(ConfigError::BadGravity(self.gravity));
        }
        if self.min_vel_y > self.max_vel_y {
            return Err(ConfigError::VelocityRangeInverted {
                min: self.min_vel_y,
                max: self.max_vel_y,
            });
        }
        if self.initial_vel_y < self.min_vel_y || self.initial_vel_y > self.max_vel_y {
            return Err(ConfigError::InitialVelocityOutOfBand(self.initial_vel_y));
        }
        if self.flap_impulse < self.min_vel_y || self.flap_impulse > self.max_vel_y {
            return Err(ConfigError::FlapImpulseOutOfBand(self.flap_impulse));
        }
        Ok(())
    }

    /// Fixed bird x position
    #[inline]
    pub fn bird_x(&self) -> f32 {
        self.screen_width * self.bird_x_frac
    }

    /// Bird y at session start (vertically centered)
    #[inline]
    pub fn initial_bird_y(&self) -> f32 {
        (self.screen_height - self.bird_height) / 2.0
    }

    /// Upper clamp bound (bird can leave the top of the screen a bit)
    #[inline]
    pub fn bird_min_y(&self) -> f32 {
        -2.0 * self.bird_height
    }

    /// Lower clamp bound
    #[inline]
    pub fn bird_max_y(&self) -> f32 {
        self.screen_height - self.bird_height * 0.75
    }

    /// Crossing this height ends the session (bird hit the ground)
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.screen_height - self.bird_height
    }

    /// X where freshly generated pairs are placed
    #[inline]
    pub fn spawn_x(&self) -> f32 {
        self.screen_width + self.spawn_margin
    }
}
