//! World state and session construction
//!
//! All state that must persist for determinism lives here: bird, pipe
//! pairs, score, the gap-history scalar, and the seeded RNG. Given the same
//! seed and the same action sequence, a session replays identically.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::GameError;
use super::config::GameConfig;
use super::kinematics::{BirdBody, PhysicsParams};
use super::pipes::{self, PipePair};
use super::sprite::SpriteMask;

/// Current phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Running,
    /// Terminal: collision or ground hit. Ticking is a no-op from here.
    Ended,
}

/// The controlled agent: fixed x, free vertical motion, pixel mask.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    /// Fixed horizontal position (left edge)
    pub x: f32,
    /// Sprite size
    pub size: Vec2,
    /// Mutable kinematic state
    pub body: BirdBody,
    /// Opacity mask for exact collision
    pub mask: SpriteMask,
}

impl Bird {
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.size.x / 2.0
    }
}

/// Complete game state (deterministic, serializable).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Immutable session configuration
    pub config: GameConfig,
    /// Session seed for reproducibility
    pub seed: u64,
    /// RNG driving pipe gap placement
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub bird: Bird,
    /// Active pairs in spawn order (front = oldest = leftmost)
    pub pairs: Vec<PipePair>,
    /// Shared opacity masks for all pipes of each side
    pub upper_pipe_mask: SpriteMask,
    pub lower_pipe_mask: SpriteMask,
    /// Pipes crossed so far; increments exactly once per pair
    pub score: u32,
    /// Gap-history scalar read and written only by the generator path
    pub last_gap_top: Option<f32>,
    /// Tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a session with procedurally generated sprites.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        let bird_mask =
            SpriteMask::bird_default(config.bird_width as u32, config.bird_height as u32)?;
        let pipe_mask =
            SpriteMask::pipe_default(config.pipe_width as u32, config.pipe_height as u32)?;
        Self::with_sprites(config, seed, bird_mask, pipe_mask.clone(), pipe_mask)
    }

    /// Create a session with caller-supplied masks (decoded from assets).
    /// Mask sizes must match the configured sprite geometry.
    pub fn with_sprites(
        config: GameConfig,
        seed: u64,
        bird_mask: SpriteMask,
        upper_pipe_mask: SpriteMask,
        lower_pipe_mask: SpriteMask,
    ) -> Result<Self, GameError> {
        config.validate()?;
        bird_mask.expect_size(config.bird_width as u32, config.bird_height as u32)?;
        upper_pipe_mask.expect_size(config.pipe_width as u32, config.pipe_height as u32)?;
        lower_pipe_mask.expect_size(config.pipe_width as u32, config.pipe_height as u32)?;

        let bird = Bird {
            x: config.bird_x(),
            size: Vec2::new(config.bird_width, config.bird_height),
            body: BirdBody {
                y: config.initial_bird_y(),
                vy: config.initial_vel_y,
                flapped: false,
            },
            mask: bird_mask,
        };

        let mut state = Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            bird,
            pairs: Vec::new(),
            upper_pipe_mask,
            lower_pipe_mask,
            score: 0,
            last_gap_top: None,
            time_ticks: 0,
        };
        state.init_pairs();
        log::debug!("session created: seed={seed}");
        Ok(state)
    }

    /// Pre-place the initial pairs ahead of the bird, at 3 and 7 pipe
    /// widths past the right screen edge.
    fn init_pairs(&mut self) {
        for offset in [3.0, 7.0] {
            let mut pair = pipes::generate_pair(&mut self.rng, self.last_gap_top, &self.config);
            self.last_gap_top = Some(pair.gap_top());
            pair.place_at(self.config.screen_width + self.config.pipe_width * offset);
            self.pairs.push(pair);
        }
    }

    /// Physics constants for this session.
    #[inline]
    pub fn physics(&self) -> PhysicsParams {
        PhysicsParams::from_config(&self.config)
    }

    /// Pipes crossed so far.
    #[inline]
    pub fn current_score(&self) -> u32 {
        self.score
    }
}
