//! Flappy Bot - a deterministic side-scrolling obstacle game with AI pilots
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, pipes, bots)
//! - `session`: Headless session runner driving the simulation to game over
//! - `records`: Per-run result records and CSV export for batch tooling

pub mod records;
pub mod session;
pub mod sim;

pub use records::{BatchSummary, RunRecord};
pub use session::{GameOverMode, SessionOptions, SessionOutcome, SessionStatus, run_session};
pub use sim::{
    Action, BotPolicy, GameConfig, GameError, GamePhase, GameState, SpriteMask, TickStatus, tick,
};
