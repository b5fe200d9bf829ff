//! Particle sprites.
//!
//! Every burst draws all of its particles with one sprite picked from a small
//! palette. The shading program reads the sprite's red channel as opacity, so
//! sprites are grayscale masks; the burst color supplies the tint.
//!
//! The palette is normally loaded from a directory holding `1.png` through
//! `8.png`. Slots whose file is missing fall back to a procedural sprite so
//! the show always has a full palette.
//!
//! # Supported Formats
//!
//! - PNG (recommended)
//! - JPEG

use crate::error::TextureError;
use std::path::Path;
use tracing::{debug, warn};

/// Number of sprites in the default palette.
pub const PALETTE_SIZE: usize = 8;

/// Side length of procedurally generated sprites.
const PROCEDURAL_SIZE: u32 = 64;

/// Opaque reference to a sprite in a [`TexturePalette`].
///
/// The burst core never looks inside; the rendering backend resolves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureHandle(pub usize);

impl TextureHandle {
    /// Palette slot this handle refers to.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Filter mode for texture sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Smooth linear filtering (default).
    #[default]
    Linear,
    /// Sharp nearest-neighbor filtering.
    Nearest,
}

/// Pixel data for a single sprite.
#[derive(Debug, Clone)]
pub struct TextureConfig {
    /// Raw RGBA pixel data (width * height * 4 bytes).
    pub data: Vec<u8>,
    /// Texture width in pixels.
    pub width: u32,
    /// Texture height in pixels.
    pub height: u32,
    /// Filter mode for magnification/minification.
    pub filter: FilterMode,
}

impl TextureConfig {
    /// Create a texture from raw RGBA data.
    ///
    /// Fails if `data` is not exactly `width * height * 4` bytes.
    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> Result<Self, TextureError> {
        let expected = (width as usize) * (height as usize) * 4;
        if data.len() != expected {
            return Err(TextureError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            filter: FilterMode::Linear,
        })
    }

    /// Load a texture from an image file.
    ///
    /// The image is decoded as-is; sprites are sampled without a vertical
    /// flip, matching how point sprites address their texture.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let bytes = std::fs::read(path.as_ref())?;
        let img = image::load_from_memory(&bytes)?.into_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self {
            data: img.into_raw(),
            width,
            height,
            filter: FilterMode::Linear,
        })
    }

    /// Set the filter mode.
    pub fn with_filter(mut self, filter: FilterMode) -> Self {
        self.filter = filter;
        self
    }

    /// Build a square grayscale sprite from an intensity function.
    ///
    /// `shade` receives coordinates in -1..1 (center at 0,0) and returns an
    /// intensity in 0..1, written to every channel.
    pub fn procedural(size: u32, shade: impl Fn(f32, f32) -> f32) -> Self {
        let mut data = Vec::with_capacity((size * size * 4) as usize);
        let half = size as f32 / 2.0;
        for y in 0..size {
            for x in 0..size {
                let u = (x as f32 + 0.5 - half) / half;
                let v = (y as f32 + 0.5 - half) / half;
                let value = (shade(u, v).clamp(0.0, 1.0) * 255.0).round() as u8;
                data.extend_from_slice(&[value, value, value, 255]);
            }
        }
        Self {
            data,
            width: size,
            height: size,
            filter: FilterMode::Linear,
        }
    }

    /// Soft radial glow.
    pub fn glow(size: u32) -> Self {
        Self::procedural(size, |u, v| {
            let d = (u * u + v * v).sqrt();
            (1.0 - d).max(0.0).powf(2.5)
        })
    }

    /// Disc with a soft edge.
    pub fn disc(size: u32) -> Self {
        Self::procedural(size, |u, v| {
            let d = (u * u + v * v).sqrt();
            smoothstep(0.8, 0.6, d)
        })
    }

    /// Thin ring.
    pub fn ring(size: u32) -> Self {
        Self::procedural(size, |u, v| {
            let d = (u * u + v * v).sqrt();
            (1.0 - ((d - 0.65).abs() / 0.12)).max(0.0)
        })
    }

    /// Star with `points` spikes around a bright core.
    pub fn star(size: u32, points: u32) -> Self {
        Self::procedural(size, move |u, v| {
            let d = (u * u + v * v).sqrt();
            let angle = v.atan2(u);
            let spike = ((angle * points as f32 / 2.0).cos().abs()).powf(8.0);
            let reach = 0.25 + 0.7 * spike;
            let core = (1.0 - d / 0.3).max(0.0);
            core.max((1.0 - d / reach).max(0.0) * spike)
        })
    }

    /// Four-way sparkle cross with a faint halo.
    pub fn sparkle(size: u32) -> Self {
        Self::procedural(size, |u, v| {
            let d = (u * u + v * v).sqrt();
            let arms = (1.0 - u.abs() * 12.0).max(0.0) * (1.0 - v.abs())
                + (1.0 - v.abs() * 12.0).max(0.0) * (1.0 - u.abs());
            let halo = (1.0 - d).max(0.0).powi(4);
            (arms + halo).min(1.0)
        })
    }

    /// Two concentric rings.
    pub fn double_ring(size: u32) -> Self {
        Self::procedural(size, |u, v| {
            let d = (u * u + v * v).sqrt();
            let outer = (1.0 - ((d - 0.75).abs() / 0.08)).max(0.0);
            let inner = (1.0 - ((d - 0.35).abs() / 0.08)).max(0.0);
            outer.max(inner)
        })
    }

    /// Speckled, smoke-like puff.
    pub fn speckle(size: u32, seed: u32) -> Self {
        let half = size as f32 / 2.0;
        Self::procedural(size, move |u, v| {
            let x = ((u * half) + half) as u32;
            let y = ((v * half) + half) as u32;
            let noise = hash_noise(x, y, seed) as f32 / 255.0;
            let d = (u * u + v * v).sqrt();
            (1.0 - d).max(0.0) * (0.35 + 0.65 * noise)
        })
    }
}

/// Ordered set of sprites a burst can reference by [`TextureHandle`].
#[derive(Debug, Clone, Default)]
pub struct TexturePalette {
    textures: Vec<TextureConfig>,
}

impl TexturePalette {
    /// Create an empty palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// Eight procedurally generated sprites.
    pub fn procedural() -> Self {
        let mut palette = Self::new();
        for slot in 0..PALETTE_SIZE {
            palette.push(procedural_sprite(slot));
        }
        palette
    }

    /// Load `1.png` ... `8.png` from `dir`.
    ///
    /// A missing file is replaced by the procedural sprite for that slot. A
    /// file that exists but cannot be decoded is an error.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self, TextureError> {
        let dir = dir.as_ref();
        let mut palette = Self::new();
        for slot in 0..PALETTE_SIZE {
            let path = dir.join(format!("{}.png", slot + 1));
            if path.is_file() {
                debug!(path = %path.display(), slot, "loading sprite");
                palette.push(TextureConfig::from_file(&path)?);
            } else {
                warn!(path = %path.display(), slot, "sprite missing, using procedural fallback");
                palette.push(procedural_sprite(slot));
            }
        }
        Ok(palette)
    }

    /// Append a sprite, returning its handle.
    pub fn push(&mut self, texture: TextureConfig) -> TextureHandle {
        self.textures.push(texture);
        TextureHandle(self.textures.len() - 1)
    }

    /// Look up a sprite.
    pub fn get(&self, handle: TextureHandle) -> Option<&TextureConfig> {
        self.textures.get(handle.0)
    }

    /// Get the number of sprites.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Check if the palette is empty.
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Iterate over `(handle, sprite)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (TextureHandle, &TextureConfig)> {
        self.textures
            .iter()
            .enumerate()
            .map(|(i, t)| (TextureHandle(i), t))
    }
}

fn procedural_sprite(slot: usize) -> TextureConfig {
    match slot % PALETTE_SIZE {
        0 => TextureConfig::glow(PROCEDURAL_SIZE),
        1 => TextureConfig::disc(PROCEDURAL_SIZE),
        2 => TextureConfig::ring(PROCEDURAL_SIZE),
        3 => TextureConfig::star(PROCEDURAL_SIZE, 5),
        4 => TextureConfig::sparkle(PROCEDURAL_SIZE),
        5 => TextureConfig::double_ring(PROCEDURAL_SIZE),
        6 => TextureConfig::speckle(PROCEDURAL_SIZE, 7),
        _ => TextureConfig::star(PROCEDURAL_SIZE, 4),
    }
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Simple hash-based noise function.
fn hash_noise(x: u32, y: u32, seed: u32) -> u8 {
    let mut n = x
        .wrapping_mul(374761393)
        .wrapping_add(y.wrapping_mul(668265263))
        .wrapping_add(seed.wrapping_mul(1013904223));
    n = (n ^ (n >> 13)).wrapping_mul(1274126177);
    n = n ^ (n >> 16);
    (n & 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba_rejects_bad_length() {
        let err = TextureConfig::from_rgba(vec![0; 12], 2, 2).unwrap_err();
        assert!(matches!(
            err,
            TextureError::SizeMismatch { expected: 16, actual: 12 }
        ));
    }

    #[test]
    fn test_procedural_palette_is_full() {
        let palette = TexturePalette::procedural();
        assert_eq!(palette.len(), PALETTE_SIZE);
        for (_, tex) in palette.iter() {
            assert_eq!(tex.data.len(), (tex.width * tex.height * 4) as usize);
        }
        assert!(palette.get(TextureHandle(7)).is_some());
        assert!(palette.get(TextureHandle(8)).is_none());
    }

    #[test]
    fn test_glow_is_bright_in_center_and_dark_at_corner() {
        let tex = TextureConfig::glow(32);
        let center = ((16 * 32 + 16) * 4) as usize;
        assert!(tex.data[center] > 150);
        assert_eq!(tex.data[0], 0);
    }

    #[test]
    fn test_sprites_are_grayscale_and_opaque() {
        let tex = TextureConfig::star(16, 5);
        for px in tex.data.chunks(4) {
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
            assert_eq!(px[3], 255);
        }
    }

    #[test]
    fn test_load_dir_falls_back_when_missing() {
        let dir = std::env::temp_dir().join("fireworks-missing-sprites-dir");
        let palette = TexturePalette::load_dir(&dir).unwrap();
        assert_eq!(palette.len(), PALETTE_SIZE);
    }
}
