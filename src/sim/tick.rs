//! Fixed timestep simulation tick
//!
//! One call advances the world exactly one frame, in a fixed order:
//! resolve action, kinematics, crossing/scoring, exact collision, pipe
//! advance/retire/spawn, ground check. A tick either fully completes or the
//! session has ended; nothing suspends mid-tick.

use super::collision::bird_hits_any;
use super::kinematics::{Action, advance};
use super::pipes::{generate_pair, should_spawn};
use super::state::{GamePhase, GameState};

/// Outcome of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    Running,
    Ended,
}

/// Advance the game state by one tick under the given action.
///
/// Ticking an ended session is a no-op and keeps returning `Ended`.
pub fn tick(state: &mut GameState, action: Action) -> TickStatus {
    if state.phase == GamePhase::Ended {
        return TickStatus::Ended;
    }
    state.time_ticks += 1;

    let params = state.physics();
    advance(&mut state.bird.body, action, &params);

    // Crossing/scoring: latched per pair, exactly once ever, regardless of
    // how far the pipes moved this tick.
    let bird_center = state.bird.center_x();
    for pair in &mut state.pairs {
        if !pair.scored && bird_center >= pair.center_x() {
            pair.scored = true;
            state.score += 1;
            log::debug!("pipe crossed, score={}", state.score);
        }
    }

    // Exact per-pixel collision against every active pipe
    if bird_hits_any(state) {
        log::debug!("collision at tick {}", state.time_ticks);
        state.phase = GamePhase::Ended;
        return TickStatus::Ended;
    }

    // Scroll, retire, spawn
    for pair in &mut state.pairs {
        pair.advance();
    }
    state.pairs.retain(|p| !p.is_offscreen());
    if should_spawn(&state.pairs, &state.config) {
        let pair = generate_pair(&mut state.rng, state.last_gap_top, &state.config);
        state.last_gap_top = Some(pair.gap_top());
        state.pairs.push(pair);
    }

    // Ground check
    if state.bird.body.y > state.config.ground_y() {
        log::debug!("ground hit at tick {}", state.time_ticks);
        state.phase = GamePhase::Ended;
        return TickStatus::Ended;
    }

    TickStatus::Running
}
