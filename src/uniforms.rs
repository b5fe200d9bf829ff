//! Per-burst shader parameters.
//!
//! Every burst's rendering program receives the same fixed set of uniforms:
//!
//! | Name | Type | Meaning |
//! |------|------|---------|
//! | `progress` | `f32` in `0..=1` | shared animation phase |
//! | `size` | `f32` | base particle size |
//! | `resolution` | `vec2<f32>` | viewport × pixel ratio |
//! | `texture` | sprite handle | per-particle sprite |
//! | `color` | `vec3<f32>` | burst tint (linear) |
//! | `origin` | `vec3<f32>` | burst center in world space |
//!
//! alongside the per-particle `size` and `time_multiplier` vertex attributes.
//! [`ShaderParameters`] is the CPU side; [`BurstUniforms`] is its byte layout
//! in the uniform buffer.

use crate::burst::BurstSpec;
use crate::color::Color;
use crate::textures::TextureHandle;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

/// Device pixel ratios above this are clamped before computing resolution.
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// Uniform values for one burst.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShaderParameters {
    progress: f32,
    pub size: f32,
    pub resolution: Vec2,
    pub texture: TextureHandle,
    pub color: Color,
    pub origin: Vec3,
}

impl ShaderParameters {
    /// Parameters for a freshly spawned burst (progress 0).
    pub fn for_burst(spec: &BurstSpec, resolution: Vec2) -> Self {
        Self {
            progress: 0.0,
            size: spec.size,
            resolution,
            texture: spec.texture,
            color: spec.color,
            origin: spec.origin,
        }
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Set progress, clamped to `0..=1`. NaN is ignored.
    pub fn set_progress(&mut self, progress: f32) {
        if !progress.is_nan() {
            self.progress = progress.clamp(0.0, 1.0);
        }
    }

    /// GPU byte layout of these values.
    pub fn to_gpu(&self) -> BurstUniforms {
        BurstUniforms {
            origin: self.origin.to_array(),
            progress: self.progress,
            color: self.color.to_array(),
            size: self.size,
            resolution: self.resolution.to_array(),
            _padding: [0.0; 2],
        }
    }
}

/// Viewport size in physical pixels for the shading program.
///
/// `logical` is the window size in logical pixels; the device pixel ratio is
/// capped at [`MAX_PIXEL_RATIO`].
pub fn resolution(logical: Vec2, pixel_ratio: f32) -> Vec2 {
    logical * pixel_ratio.clamp(f32::MIN_POSITIVE, MAX_PIXEL_RATIO)
}

/// Uniform buffer layout for one burst.
///
/// Matches `struct Burst` in `burst.wgsl`: vec3 + f32 pairs pack into
/// 16-byte rows, so no implicit padding is needed.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct BurstUniforms {
    pub origin: [f32; 3],
    pub progress: f32,
    pub color: [f32; 3],
    pub size: f32,
    pub resolution: [f32; 2],
    pub _padding: [f32; 2],
}

/// Uniform buffer layout for the camera, shared by all bursts.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CameraUniforms {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
}

impl CameraUniforms {
    pub fn new(view: Mat4, proj: Mat4) -> Self {
        Self {
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
        }
    }
}
