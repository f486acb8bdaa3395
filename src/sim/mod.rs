//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to [`tick`] per frame)
//! - Seeded RNG only (Pcg32, seeded per session)
//! - Stable iteration order (pipe pairs kept in spawn order)
//! - No rendering or platform dependencies

pub mod bot;
pub mod collision;
pub mod config;
pub mod kinematics;
pub mod pipes;
pub mod sprite;
pub mod state;
pub mod tick;

pub use bot::BotPolicy;
pub use collision::{Rect, bird_hits_any, masks_collide};
pub use config::{ConfigError, GameConfig};
pub use kinematics::{Action, BirdBody, PhysicsParams, advance};
pub use pipes::{Pipe, PipePair, generate_pair, should_spawn};
pub use sprite::{SpriteError, SpriteMask};
pub use state::{Bird, GamePhase, GameState};
pub use tick::{TickStatus, tick};

use thiserror::Error;

/// Session construction failure.
///
/// There are no recoverable runtime errors inside [`tick`]; everything that
/// can go wrong is rejected here, before the first frame.
#[derive(Debug, Error)]
pub enum GameError {
    /// Out-of-range constants, caught at startup rather than mid-session.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A visual asset failed to load or did not match the configured
    /// geometry. Fatal to session start; assets are static so there is
    /// nothing to retry.
    #[error(transparent)]
    Resource(#[from] SpriteError),
}
