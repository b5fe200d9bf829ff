//! Per-particle shading.
//!
//! The GPU program in `shaders/burst.wgsl` turns the burst uniforms and one
//! particle's attributes into a screen-space sprite. [`shade_particle`] is the
//! same math on the CPU: it is what the WGSL must agree with, and it lets the
//! lifecycle be tested against the visual result without a GPU.
//!
//! Each particle runs on its own local clock, `progress * time_multiplier`
//! clamped to `0..=1`. Because multipliers are at least 1, every particle has
//! reached the end of its local animation (and shrunk to nothing) by the time
//! the shared progress hits 1.

use crate::uniforms::ShaderParameters;
use glam::Vec3;

/// WGSL source for the burst render program.
pub const BURST_SHADER: &str = include_str!("shaders/burst.wgsl");

/// Local progress at which the explosion reaches full radius.
const EXPLODE_END: f32 = 0.1;
/// How far particles sag once exploded, in world units.
const FALL_DISTANCE: f32 = 0.2;
/// Local progress at which particles reach full size.
const SCALE_PEAK: f32 = 0.125;
/// Twinkling fades in over this local progress window.
const TWINKLE_START: f32 = 0.2;
const TWINKLE_END: f32 = 0.8;
const TWINKLE_FREQUENCY: f32 = 30.0;

/// Linear remap of `value` from one range to another (unclamped).
pub fn remap(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    out_min + (value - in_min) * (out_max - out_min) / (in_max - in_min)
}

/// Result of shading one particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSample {
    /// Particle's own progress in `0..=1`.
    pub local_progress: f32,
    /// World-space position.
    pub position: Vec3,
    /// Size multiplier from the grow/shrink and twinkle curves, `0..=1`.
    pub size_scale: f32,
}

impl ParticleSample {
    /// On-screen sprite diameter in pixels at view-space `depth` (distance
    /// along the view direction, positive in front of the camera).
    pub fn point_size(&self, params: &ShaderParameters, particle_size: f32, depth: f32) -> f32 {
        if depth <= 0.0 {
            return 0.0;
        }
        params.size * params.resolution.y * particle_size * self.size_scale / depth
    }

    /// Whether anything is drawn for this particle.
    pub fn is_visible(&self) -> bool {
        self.size_scale > 0.0
    }
}

/// Shade one particle given its generated attributes.
pub fn shade_particle(
    params: &ShaderParameters,
    position: Vec3,
    time_multiplier: f32,
) -> ParticleSample {
    let t = (params.progress() * time_multiplier).clamp(0.0, 1.0);

    let exploding = ease_out_cubic(remap(t, 0.0, EXPLODE_END, 0.0, 1.0));
    let mut offset = position * exploding;

    let falling = ease_out_cubic(remap(t, EXPLODE_END, 1.0, 0.0, 1.0));
    offset.y -= falling * FALL_DISTANCE;

    let opening = remap(t, 0.0, SCALE_PEAK, 0.0, 1.0);
    let closing = remap(t, SCALE_PEAK, 1.0, 1.0, 0.0);
    let scaling = opening.min(closing).clamp(0.0, 1.0);

    let twinkle_amount = remap(t, TWINKLE_START, TWINKLE_END, 0.0, 1.0).clamp(0.0, 1.0);
    let twinkle = (t * TWINKLE_FREQUENCY).sin() * 0.5 + 0.5;
    let twinkle_scale = 1.0 - twinkle * twinkle_amount;

    ParticleSample {
        local_progress: t,
        position: params.origin + offset,
        size_scale: scaling * twinkle_scale,
    }
}

fn ease_out_cubic(x: f32) -> f32 {
    1.0 - (1.0 - x.clamp(0.0, 1.0)).powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::burst::{create_burst_seeded, BurstSpec};
    use crate::color::Color;
    use crate::textures::TextureHandle;
    use glam::Vec2;

    fn params(progress: f32) -> ShaderParameters {
        let spec = BurstSpec::new(
            0,
            Vec3::new(0.0, 1.0, 0.0),
            0.5,
            TextureHandle(0),
            1.0,
            Color::WHITE,
        );
        let mut p = ShaderParameters::for_burst(&spec, Vec2::new(1920.0, 1080.0));
        p.set_progress(progress);
        p
    }

    /// Validates WGSL code using naga.
    fn validate_wgsl(code: &str) -> Result<(), String> {
        let module = naga::front::wgsl::parse_str(code)
            .map_err(|e| format!("WGSL parse error: {:?}", e))?;

        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator
            .validate(&module)
            .map_err(|e| format!("WGSL validation error: {:?}", e))?;

        Ok(())
    }

    #[test]
    fn test_burst_shader_validates() {
        validate_wgsl(BURST_SHADER).unwrap();
        assert!(BURST_SHADER.contains("fn vs_main"));
        assert!(BURST_SHADER.contains("fn fs_main"));
    }

    #[test]
    fn test_start_is_collapsed_at_origin() {
        let s = shade_particle(&params(0.0), Vec3::new(1.0, 0.0, 0.0), 1.5);
        assert_eq!(s.local_progress, 0.0);
        assert_eq!(s.position, Vec3::new(0.0, 1.0, 0.0));
        assert!(!s.is_visible());
    }

    #[test]
    fn test_fully_exploded_after_explode_window() {
        let s = shade_particle(&params(0.1), Vec3::new(1.0, 0.0, 0.0), 1.0);
        assert!((s.position.x - 1.0).abs() < 1e-5);
        assert!((s.position.y - 1.0).abs() < 1e-5);
        assert!(s.is_visible());
    }

    #[test]
    fn test_peak_size_at_scale_peak() {
        let s = shade_particle(&params(SCALE_PEAK), Vec3::X, 1.0);
        assert!((s.size_scale - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_local_progress_is_clamped() {
        let s = shade_particle(&params(0.8), Vec3::X, 1.9);
        assert_eq!(s.local_progress, 1.0);
    }

    #[test]
    fn test_everything_invisible_at_end() {
        let burst = create_burst_seeded(
            &BurstSpec::new(500, Vec3::ZERO, 0.5, TextureHandle(0), 1.0, Color::WHITE),
            5,
        );
        let p = params(1.0);
        for (pos, tm) in burst.positions.iter().zip(&burst.time_multipliers) {
            let s = shade_particle(&p, *pos, *tm);
            assert_eq!(s.local_progress, 1.0);
            assert!(!s.is_visible());
            assert_eq!(s.point_size(&p, 1.0, 5.0), 0.0);
        }
    }

    #[test]
    fn test_fast_particles_finish_first() {
        let p = params(0.6);
        let slow = shade_particle(&p, Vec3::X, 1.0);
        let fast = shade_particle(&p, Vec3::X, 1.99);
        assert!(fast.local_progress > slow.local_progress);
        assert_eq!(fast.local_progress, 1.0);
        assert!(!fast.is_visible());
    }

    #[test]
    fn test_point_size_shrinks_with_depth() {
        let p = params(SCALE_PEAK);
        let s = shade_particle(&p, Vec3::X, 1.0);
        let near = s.point_size(&p, 1.0, 2.0);
        let far = s.point_size(&p, 1.0, 4.0);
        assert!((near - 2.0 * far).abs() < 1e-3);
        assert!((near - 0.5 * 1080.0 / 2.0).abs() < 1e-2);
        assert_eq!(s.point_size(&p, 1.0, -1.0), 0.0);
    }
}
