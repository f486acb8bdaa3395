//! Per-pixel opacity masks
//!
//! Collision is pixel-accurate: a sprite is a rectangle plus a boolean grid
//! marking which pixels are opaque. Masks can be decoded from RGBA buffers
//! (the asset path) or generated procedurally so the sim runs headless.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mask construction failure. Surfaced at session start, never mid-tick.
#[derive(Debug, Error, PartialEq)]
pub enum SpriteError {
    #[error("sprite dimensions must be non-zero")]
    EmptySprite,
    #[error("mask buffer length {got} does not match {width}x{height}")]
    MaskSizeMismatch { width: u32, height: u32, got: usize },
    #[error("rgba buffer length {got} is not 4 x {width}x{height}")]
    RgbaSizeMismatch { width: u32, height: u32, got: usize },
    #[error("sprite is {got_w}x{got_h} but the config expects {want_w}x{want_h}")]
    ConfigMismatch {
        want_w: u32,
        want_h: u32,
        got_w: u32,
        got_h: u32,
    },
}

/// Boolean opacity grid, row-major, `true` = opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteMask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl SpriteMask {
    pub fn new(width: u32, height: u32, bits: Vec<bool>) -> Result<Self, SpriteError> {
        if width == 0 || height == 0 {
            return Err(SpriteError::EmptySprite);
        }
        if bits.len() != (width * height) as usize {
            return Err(SpriteError::MaskSizeMismatch {
                width,
                height,
                got: bits.len(),
            });
        }
        Ok(Self {
            width,
            height,
            bits,
        })
    }

    /// Fully opaque rectangle
    pub fn solid(width: u32, height: u32) -> Result<Self, SpriteError> {
        Self::new(width, height, vec![true; (width * height) as usize])
    }

    /// Build a mask from an RGBA byte buffer: any pixel with alpha > 0 is
    /// opaque. Mirrors how a loaded sprite surface would be converted.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<Self, SpriteError> {
        if rgba.len() != (width * height * 4) as usize {
            return Err(SpriteError::RgbaSizeMismatch {
                width,
                height,
                got: rgba.len(),
            });
        }
        let bits = rgba.chunks_exact(4).map(|px| px[3] > 0).collect();
        Self::new(width, height, bits)
    }

    /// Procedural bird sprite: an ellipse inscribed in the bounding box, so
    /// the corners are transparent and the per-pixel test is meaningful.
    pub fn bird_default(width: u32, height: u32) -> Result<Self, SpriteError> {
        if width == 0 || height == 0 {
            return Err(SpriteError::EmptySprite);
        }
        let rx = width as f32 / 2.0;
        let ry = height as f32 / 2.0;
        let bits = (0..width * height)
            .map(|i| {
                let x = (i % width) as f32 + 0.5;
                let y = (i / width) as f32 + 0.5;
                let dx = (x - rx) / rx;
                let dy = (y - ry) / ry;
                dx * dx + dy * dy <= 1.0
            })
            .collect();
        Self::new(width, height, bits)
    }

    /// Procedural pipe sprite: fully opaque column.
    pub fn pipe_default(width: u32, height: u32) -> Result<Self, SpriteError> {
        Self::solid(width, height)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Opacity at a pixel offset within the sprite. Out-of-bounds offsets
    /// are transparent.
    #[inline]
    pub fn is_opaque(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.bits[(y * self.width + x) as usize]
    }

    /// Check the mask matches the pixel size the config expects.
    pub fn expect_size(&self, want_w: u32, want_h: u32) -> Result<(), SpriteError> {
        if self.width != want_w || self.height != want_h {
            return Err(SpriteError::ConfigMismatch {
                want_w,
                want_h,
                got_w: self.width,
                got_h: self.height,
            });
        }
        Ok(())
    }
}
