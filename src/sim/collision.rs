//! Collision detection: axis-aligned boxes plus per-pixel opacity masks
//!
//! The exact rule everywhere the live game checks bird-vs-pipe: intersect
//! the two bounding boxes (fast path for the common miss), then AND the
//! opacity masks over the intersection. Two overlapping boxes whose opaque
//! pixels never coincide are NOT a collision. The bot's lookahead uses the
//! cheaper box-only test deliberately; that approximation lives in
//! [`super::bot`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::sprite::SpriteMask;
use super::state::{Bird, GameState};

/// Axis-aligned box with float position and size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    /// Strict overlap: touching edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Per-pixel collision between two positioned masks.
///
/// Positions are floored to the pixel grid, the intersection rectangle is
/// computed in integer space, and the masks are sampled at every offset
/// inside it. Returns on the first coinciding opaque pixel.
pub fn masks_collide(a_pos: Vec2, a: &SpriteMask, b_pos: Vec2, b: &SpriteMask) -> bool {
    let (ax, ay) = (a_pos.x.floor() as i64, a_pos.y.floor() as i64);
    let (bx, by) = (b_pos.x.floor() as i64, b_pos.y.floor() as i64);

    let left = ax.max(bx);
    let right = (ax + a.width() as i64).min(bx + b.width() as i64);
    let top = ay.max(by);
    let bottom = (ay + a.height() as i64).min(by + b.height() as i64);
    if left >= right || top >= bottom {
        return false;
    }

    for y in top..bottom {
        for x in left..right {
            if a.is_opaque((x - ax) as u32, (y - ay) as u32)
                && b.is_opaque((x - bx) as u32, (y - by) as u32)
            {
                return true;
            }
        }
    }
    false
}

/// True iff the bird collides with any pipe of any active pair.
pub fn bird_hits_any(world: &GameState) -> bool {
    let bird: &Bird = &world.bird;
    let bird_pos = Vec2::new(bird.x, bird.body.y);
    world.pairs.iter().any(|pair| {
        masks_collide(bird_pos, &bird.mask, pair.upper.pos, &world.upper_pipe_mask)
            || masks_collide(bird_pos, &bird.mask, pair.lower.pos, &world.lower_pipe_mask)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_overlap_strictness() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Rect::new(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        let c = Rect::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        // Touching edges are not an overlap
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn disjoint_boxes_never_collide() {
        let a = SpriteMask::solid(10, 10).unwrap();
        let b = SpriteMask::solid(10, 10).unwrap();
        assert!(!masks_collide(
            Vec2::new(0.0, 0.0),
            &a,
            Vec2::new(20.0, 0.0),
            &b
        ));
    }

    #[test]
    fn overlapping_boxes_with_disjoint_opaque_pixels_do_not_collide() {
        // Two 4x4 masks: a is opaque only in its left column, b only in its
        // right column. Offset b by 2 so the boxes overlap but the opaque
        // columns never line up.
        let a = SpriteMask::new(
            4,
            4,
            (0..16).map(|i| i % 4 == 0).collect::<Vec<_>>(),
        )
        .unwrap();
        let b = SpriteMask::new(
            4,
            4,
            (0..16).map(|i| i % 4 == 3).collect::<Vec<_>>(),
        )
        .unwrap();
        let a_pos = Vec2::new(0.0, 0.0);
        let b_pos = Vec2::new(2.0, 0.0);

        let box_a = Rect::new(a_pos, Vec2::new(4.0, 4.0));
        let box_b = Rect::new(b_pos, Vec2::new(4.0, 4.0));
        assert!(box_a.overlaps(&box_b));
        assert!(!masks_collide(a_pos, &a, b_pos, &b));

        // Shift so the columns coincide: now it is a collision
        assert!(masks_collide(a_pos, &a, Vec2::new(-3.0, 0.0), &b));
    }

    #[test]
    fn solid_overlap_collides() {
        let a = SpriteMask::solid(10, 10).unwrap();
        let b = SpriteMask::solid(10, 10).unwrap();
        assert!(masks_collide(
            Vec2::new(0.0, 0.0),
            &a,
            Vec2::new(9.0, 9.0),
            &b
        ));
    }

    #[test]
    fn negative_positions_sample_correctly() {
        // Upper pipes sit partly above the screen (negative y)
        let a = SpriteMask::solid(4, 4).unwrap();
        let b = SpriteMask::solid(4, 4).unwrap();
        assert!(masks_collide(
            Vec2::new(0.0, -2.0),
            &a,
            Vec2::new(0.0, 1.0),
            &b
        ));
        assert!(!masks_collide(
            Vec2::new(0.0, -6.0),
            &a,
            Vec2::new(0.0, 1.0),
            &b
        ));
    }
}
