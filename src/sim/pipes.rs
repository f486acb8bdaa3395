//! Pipe pairs and the constrained gap generator
//!
//! Each obstacle is a pair of pipes (upper/lower) sharing one vertical gap.
//! Consecutive gaps are bounded: the new gap top is drawn uniformly inside
//! a window of `max_gap_transition` around the previous one, clamped to the
//! legal band. The very first pair of a session is placed deterministically
//! at the middle of the band.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::config::GameConfig;

/// One pipe, upper or lower half of a pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    /// Top-left corner
    pub pos: Vec2,
    /// Sprite size
    pub size: Vec2,
    /// Horizontal scroll velocity (negative)
    pub velocity_x: f32,
}

impl Pipe {
    pub fn new(pos: Vec2, size: Vec2, velocity_x: f32) -> Self {
        Self {
            pos,
            size,
            velocity_x,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Upper + lower pipe sharing one gap, moving in lockstep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipePair {
    pub upper: Pipe,
    pub lower: Pipe,
    /// Latched once the bird's center crosses this pair's center
    pub scored: bool,
}

impl PipePair {
    pub fn new(upper: Pipe, lower: Pipe) -> Self {
        Self {
            upper,
            lower,
            scored: false,
        }
    }

    /// Top of the passable gap (bottom edge of the upper pipe)
    #[inline]
    pub fn gap_top(&self) -> f32 {
        self.upper.bottom()
    }

    /// Vertical midpoint of the passable gap
    #[inline]
    pub fn gap_center_y(&self) -> f32 {
        (self.upper.bottom() + self.lower.pos.y) / 2.0
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.upper.center_x()
    }

    /// Move both pipes one tick leftward
    pub fn advance(&mut self) {
        self.upper.pos.x += self.upper.velocity_x;
        self.lower.pos.x += self.lower.velocity_x;
    }

    /// Fully past the left edge of the visible area
    pub fn is_offscreen(&self) -> bool {
        self.upper.right() < 0.0 && self.lower.right() < 0.0
    }

    /// Override the pair's x position (used when pre-placing the initial set)
    pub fn place_at(&mut self, x: f32) {
        self.upper.pos.x = x;
        self.lower.pos.x = x;
    }
}

/// Generate the next pair at the spawn x.
///
/// `last_gap_top` is the gap-history scalar owned by the simulation loop;
/// the caller persists the new pair's gap top after this returns.
pub fn generate_pair(rng: &mut Pcg32, last_gap_top: Option<f32>, cfg: &GameConfig) -> PipePair {
    let gap_top = match last_gap_top {
        None => (cfg.min_gap_y + cfg.max_gap_y) / 2.0,
        Some(prev) => {
            let lo = (prev - cfg.max_gap_transition).max(cfg.min_gap_y);
            let hi = (prev + cfg.max_gap_transition).min(cfg.max_gap_y);
            rng.random_range(lo..=hi)
        }
    };

    let size = Vec2::new(cfg.pipe_width, cfg.pipe_height);
    let x = cfg.spawn_x();
    let upper = Pipe::new(
        Vec2::new(x, gap_top - cfg.pipe_height),
        size,
        cfg.pipe_velocity_x,
    );
    let lower = Pipe::new(
        Vec2::new(x, gap_top + cfg.pipe_gap),
        size,
        cfg.pipe_velocity_x,
    );
    PipePair::new(upper, lower)
}

/// Spawn trigger: spacing to the last pair is proportional to pipe width,
/// so the cadence stays visually consistent regardless of sprite size.
pub fn should_spawn(pairs: &[PipePair], cfg: &GameConfig) -> bool {
    match pairs.last() {
        None => true,
        Some(last) => cfg.screen_width - last.upper.right() > last.upper.size.x * 2.5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn first_pair_is_deterministic_mid_band() {
        let cfg = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let pair = generate_pair(&mut rng, None, &cfg);
        assert_eq!(pair.gap_top(), 300.0);
        // RNG untouched for the first pair
        let mut rng2 = Pcg32::seed_from_u64(1);
        assert_eq!(rng.random_range(0..100), rng2.random_range(0..100));
    }

    #[test]
    fn pair_geometry_invariant() {
        // gap_top() reconstructs the drawn value as (top - h) + h, which
        // rounds in f32, so the y identities hold only up to round-off
        let cfg = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut last = None;
        for _ in 0..50 {
            let pair = generate_pair(&mut rng, last, &cfg);
            let gap_top = pair.gap_top();
            assert!((pair.upper.pos.y - (gap_top - cfg.pipe_height)).abs() <= 1e-3);
            assert!((pair.lower.pos.y - (gap_top + cfg.pipe_gap)).abs() <= 1e-3);
            assert_eq!(pair.upper.pos.x, cfg.spawn_x());
            let center = gap_top + cfg.pipe_gap / 2.0;
            assert!((pair.gap_center_y() - center).abs() <= 1e-3);
            last = Some(gap_top);
        }
    }

    #[test]
    fn gap_transition_bound_holds() {
        let cfg = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let mut last: Option<f32> = None;
        for _ in 0..500 {
            let pair = generate_pair(&mut rng, last, &cfg);
            let gap_top = pair.gap_top();
            assert!(gap_top >= cfg.min_gap_y - 1e-3 && gap_top <= cfg.max_gap_y + 1e-3);
            if let Some(prev) = last {
                assert!((gap_top - prev).abs() <= cfg.max_gap_transition + 1e-3);
            }
            last = Some(gap_top);
        }
    }

    #[test]
    fn spawn_trigger_is_width_proportional() {
        let cfg = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(3);
        assert!(should_spawn(&[], &cfg));

        let mut pair = generate_pair(&mut rng, None, &cfg);
        // Fresh pair sits past the right edge: no room yet
        let pairs = vec![pair.clone()];
        assert!(!should_spawn(&pairs, &cfg));

        // Scroll until the gap behind it exceeds 2.5 pipe widths
        let threshold = cfg.screen_width - cfg.pipe_width * 2.5;
        while pair.upper.right() >= threshold {
            pair.advance();
        }
        assert!(should_spawn(&[pair], &cfg));
    }

    #[test]
    fn retirement_at_left_edge() {
        let cfg = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut pair = generate_pair(&mut rng, None, &cfg);
        pair.place_at(-cfg.pipe_width + 1.0);
        assert!(!pair.is_offscreen());
        pair.place_at(-cfg.pipe_width - 1.0);
        assert!(pair.is_offscreen());
    }
}
