//! Lookahead bot policies
//!
//! Both bots are instances of one scheme: forward-simulate candidate action
//! sequences on a copied [`BirdBody`], filter by safety, score by distance
//! to the gap center. Lookahead deliberately uses the cheap bounding-box
//! collision test (no mask sampling) against the single targeted pair, held
//! fixed at its current position; only the live loop pays for the exact
//! per-pixel check.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::kinematics::{Action, BirdBody, advance};
use super::pipes::PipePair;
use super::state::GameState;

/// Candidate two-action sequences for the lookahead search.
const SEQUENCES: [[Action; 2]; 4] = [
    [Action::Coast, Action::Coast],
    [Action::Coast, Action::Flap],
    [Action::Flap, Action::Coast],
    [Action::Flap, Action::Flap],
];

/// The available bot variants, by lookahead depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BotPolicy {
    /// One-tick lookahead: dodge the immediate collision, else center.
    SingleStep,
    /// Two-tick lookahead: immediate danger first, then a 4-sequence
    /// search scored by distance to the gap center.
    TwoStep,
}

impl BotPolicy {
    /// Pick this tick's action. Pure: never mutates the live world.
    pub fn decide(&self, world: &GameState) -> Action {
        let Some(pair) = next_pair(world) else {
            return Action::Coast;
        };

        // Immediate one-step danger dominates any deeper search
        if let Some(action) = unambiguous_one_step(world, pair) {
            return action;
        }

        match self {
            BotPolicy::SingleStep => centering_action(world.bird.body.y, pair),
            BotPolicy::TwoStep => two_step_search(world, pair),
        }
    }
}

/// The pair the bird has not yet fully passed, if any.
fn next_pair(world: &GameState) -> Option<&PipePair> {
    world
        .pairs
        .iter()
        .find(|pair| pair.upper.right() > world.bird.x)
}

/// Box-only collision of a simulated body against the targeted pair.
fn lookahead_hits(world: &GameState, pair: &PipePair, body: &BirdBody) -> bool {
    let rect = Rect::new(Vec2::new(world.bird.x, body.y), world.bird.size);
    rect.overlaps(&pair.upper.rect()) || rect.overlaps(&pair.lower.rect())
}

/// One tick under each action; `Some` iff exactly one of them is safe.
fn unambiguous_one_step(world: &GameState, pair: &PipePair) -> Option<Action> {
    let params = world.physics();

    let mut coasted = world.bird.body;
    advance(&mut coasted, Action::Coast, &params);
    let mut flapped = world.bird.body;
    advance(&mut flapped, Action::Flap, &params);

    let coast_hits = lookahead_hits(world, pair, &coasted);
    let flap_hits = lookahead_hits(world, pair, &flapped);
    match (coast_hits, flap_hits) {
        (true, false) => Some(Action::Flap),
        (false, true) => Some(Action::Coast),
        // Both safe or both doomed: no one-step preference
        _ => None,
    }
}

/// Tie-break toward the gap center: flap when below it, coast when above.
fn centering_action(bird_y: f32, pair: &PipePair) -> Action {
    if bird_y > pair.gap_center_y() {
        Action::Flap
    } else {
        Action::Coast
    }
}

struct SequenceOutcome {
    first: Action,
    final_y: f32,
    flaps: u32,
    survives: bool,
}

/// Enumerate all 4 two-action sequences, filter to survivors, and pick the
/// one ending closest to the gap center (fewest flaps on ties). When
/// nothing survives the horizon, pick the least-bad sequence by the same
/// criterion.
fn two_step_search(world: &GameState, pair: &PipePair) -> Action {
    let params = world.physics();
    let ground = world.config.ground_y();
    let gap_center = pair.gap_center_y();

    let outcomes: Vec<SequenceOutcome> = SEQUENCES
        .iter()
        .map(|seq| {
            let mut body = world.bird.body;
            let mut survives = true;
            for &action in seq {
                advance(&mut body, action, &params);
                if lookahead_hits(world, pair, &body) || body.y > ground {
                    survives = false;
                }
            }
            SequenceOutcome {
                first: seq[0],
                final_y: body.y,
                flaps: seq.iter().filter(|&&a| a == Action::Flap).count() as u32,
                survives,
            }
        })
        .collect();

    best_by_gap_distance(outcomes.iter().filter(|o| o.survives), gap_center)
        .or_else(|| best_by_gap_distance(outcomes.iter(), gap_center))
        .unwrap_or(Action::Coast)
}

fn best_by_gap_distance<'a>(
    outcomes: impl Iterator<Item = &'a SequenceOutcome>,
    gap_center: f32,
) -> Option<Action> {
    let mut best: Option<(f32, u32, Action)> = None;
    for o in outcomes {
        let dist = (o.final_y - gap_center).abs();
        let better = match best {
            None => true,
            Some((best_dist, best_flaps, _)) => {
                dist < best_dist || (dist == best_dist && o.flaps < best_flaps)
            }
        };
        if better {
            best = Some((dist, o.flaps, o.first));
        }
    }
    best.map(|(_, _, action)| action)
}
