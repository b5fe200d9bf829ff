//! Burst generation.
//!
//! A burst is a cloud of particles sampled on a thick spherical shell around
//! its origin. [`create_burst`] turns a [`BurstSpec`] into the per-particle
//! attribute arrays the rendering backend uploads:
//!
//! | Attribute | Range | Use |
//! |-----------|-------|-----|
//! | `positions` | shell of radius `0.75r..r` | final exploded offset from the origin |
//! | `sizes` | `0..1` | per-particle multiplier on the base size |
//! | `time_multipliers` | `1..2` | how much faster than the shared progress a particle runs |
//!
//! # Sampling
//!
//! Polar angle is drawn uniformly in `[0, π)` rather than uniformly in
//! `cos(polar)`. That packs more particles near the poles than an
//! area-uniform sphere would, and is part of how the effect looks.
//!
//! ```ignore
//! let spec = BurstSpec::new(400, Vec3::ZERO, 0.15, TextureHandle(3), 1.0, Color::WHITE);
//! let burst = create_burst(&spec, &mut rand::thread_rng());
//! assert_eq!(burst.len(), 400);
//! ```

use crate::color::Color;
use crate::textures::TextureHandle;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::{PI, TAU};

/// Inner edge of the shell as a fraction of the radius.
pub const SHELL_INNER: f32 = 0.75;

/// Parameters for one burst. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstSpec {
    /// Number of particles.
    pub count: usize,
    /// World-space center of the burst.
    pub origin: Vec3,
    /// Base point size, multiplied per particle in the shader.
    pub size: f32,
    /// Sprite used by every particle in the burst.
    pub texture: TextureHandle,
    /// Outer radius of the particle shell.
    pub radius: f32,
    /// Burst tint.
    pub color: Color,
}

impl BurstSpec {
    pub fn new(
        count: usize,
        origin: Vec3,
        size: f32,
        texture: TextureHandle,
        radius: f32,
        color: Color,
    ) -> Self {
        Self {
            count,
            origin,
            size,
            texture,
            radius,
            color,
        }
    }
}

/// Spherical coordinates, Y-up.
///
/// `polar` is measured from +Y, `azimuth` around Y starting at +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub polar: f32,
    pub azimuth: f32,
}

impl Spherical {
    pub fn new(radius: f32, polar: f32, azimuth: f32) -> Self {
        Self {
            radius,
            polar,
            azimuth,
        }
    }

    pub fn to_cartesian(self) -> Vec3 {
        let ring = self.polar.sin() * self.radius;
        Vec3::new(
            ring * self.azimuth.sin(),
            self.polar.cos() * self.radius,
            ring * self.azimuth.cos(),
        )
    }

    /// Inverse of [`to_cartesian`](Self::to_cartesian).
    ///
    /// Azimuth comes back in `[0, 2π)`. The origin maps to all zeros.
    pub fn from_cartesian(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self::new(0.0, 0.0, 0.0);
        }
        let polar = (v.y / radius).clamp(-1.0, 1.0).acos();
        let azimuth = v.x.atan2(v.z).rem_euclid(TAU);
        Self::new(radius, polar, azimuth)
    }
}

/// Per-particle vertex layout uploaded to the GPU (one instance per particle).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ParticleVertex {
    pub position: [f32; 3],
    pub size: f32,
    pub time_multiplier: f32,
}

/// Generated attribute data for one burst.
#[derive(Debug, Clone, PartialEq)]
pub struct Burst {
    spec: BurstSpec,
    pub positions: Vec<Vec3>,
    pub sizes: Vec<f32>,
    pub time_multipliers: Vec<f32>,
}

impl Burst {
    /// The [`BurstSpec`] this burst was generated from.
    pub fn spec(&self) -> &BurstSpec {
        &self.spec
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// A burst with no particles renders nothing and can be disposed at once.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Interleave the attribute arrays into upload order.
    pub fn vertices(&self) -> Vec<ParticleVertex> {
        self.positions
            .iter()
            .zip(&self.sizes)
            .zip(&self.time_multipliers)
            .map(|((p, &size), &time_multiplier)| ParticleVertex {
                position: p.to_array(),
                size,
                time_multiplier,
            })
            .collect()
    }
}

/// Sample one particle's shell position.
pub fn sample_shell<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Spherical {
    let distance = radius * (SHELL_INNER + rng.gen::<f32>() * (1.0 - SHELL_INNER));
    let polar = rng.gen::<f32>() * PI;
    let azimuth = rng.gen::<f32>() * TAU;
    Spherical::new(distance, polar, azimuth)
}

/// Generate the attribute arrays for a burst.
///
/// Draws everything from `rng`; the same seeded RNG state gives the same
/// burst. Does not touch any scene or GPU state.
pub fn create_burst<R: Rng + ?Sized>(spec: &BurstSpec, rng: &mut R) -> Burst {
    let count = spec.count;
    let mut positions = Vec::with_capacity(count);
    let mut sizes = Vec::with_capacity(count);
    let mut time_multipliers = Vec::with_capacity(count);

    for _ in 0..count {
        positions.push(sample_shell(rng, spec.radius).to_cartesian());
        sizes.push(rng.gen::<f32>());
        // `1.0 + gen()` can round up to 2.0 in f32
        time_multipliers.push(rng.gen_range(1.0..2.0));
    }

    Burst {
        spec: *spec,
        positions,
        sizes,
        time_multipliers,
    }
}

/// [`create_burst`] with a fresh RNG seeded from `seed`.
pub fn create_burst_seeded(spec: &BurstSpec, seed: u64) -> Burst {
    create_burst(spec, &mut SmallRng::seed_from_u64(seed))
}
