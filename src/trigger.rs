//! Mapping user-facing triggers to burst parameters.
//!
//! | Trigger | Count | Origin | Size | Sprite | Radius | Color |
//! |---------|-------|--------|------|--------|--------|-------|
//! | `Startup` | 100 | `(0, 0, 0)` | 0.5 | 7 | 1.0 | `#8affff` |
//! | `Click` | 400-1400 | x,z in `-1..1`, y in `0..1` | `0.1..0.2` | any | `0.5..1.5` | random hue, HSL(h, 1, 0.7) |
//!
//! Both tables are plain data ([`StartupBurst`], [`ClickRanges`]) and can be
//! overridden from the show config.

use crate::burst::BurstSpec;
use crate::color::Color;
use crate::textures::{TextureHandle, PALETTE_SIZE};
use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// What asked for a burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The one-off burst shown when the show starts.
    Startup,
    /// A pointer click anywhere in the window.
    Click,
}

/// Half-open `min..max` float range. `min == max` always yields `min`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleRange {
    pub min: f32,
    pub max: f32,
}

impl SampleRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub const fn fixed(value: f32) -> Self {
        Self::new(value, value)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.min < self.max {
            rng.gen_range(self.min..self.max)
        } else {
            self.min
        }
    }

    /// Finite bounds with `min <= max`.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

/// Inclusive `min..=max` particle count range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: usize,
    pub max: usize,
}

impl CountRange {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        if self.min < self.max {
            rng.gen_range(self.min..=self.max)
        } else {
            self.min
        }
    }

    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }
}

/// Fixed parameters of the startup burst.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartupBurst {
    pub count: usize,
    pub origin: [f32; 3],
    pub size: f32,
    /// Palette index.
    pub texture: usize,
    pub radius: f32,
    /// Packed `0xRRGGBB` sRGB.
    pub color: u32,
}

impl Default for StartupBurst {
    fn default() -> Self {
        Self {
            count: 100,
            origin: [0.0; 3],
            size: 0.5,
            texture: 7,
            radius: 1.0,
            color: 0x8affff,
        }
    }
}

impl StartupBurst {
    pub fn to_spec(&self) -> BurstSpec {
        BurstSpec::new(
            self.count,
            Vec3::from_array(self.origin),
            self.size,
            TextureHandle(self.texture),
            self.radius,
            Color::from_hex(self.color),
        )
    }
}

/// Sampling ranges for click bursts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickRanges {
    pub count: CountRange,
    pub origin_x: SampleRange,
    pub origin_y: SampleRange,
    pub origin_z: SampleRange,
    pub size: SampleRange,
    pub radius: SampleRange,
    pub hue: SampleRange,
    pub saturation: f32,
    pub lightness: f32,
}

impl Default for ClickRanges {
    fn default() -> Self {
        Self {
            count: CountRange::new(400, 1400),
            origin_x: SampleRange::new(-1.0, 1.0),
            origin_y: SampleRange::new(0.0, 1.0),
            origin_z: SampleRange::new(-1.0, 1.0),
            size: SampleRange::new(0.1, 0.2),
            radius: SampleRange::new(0.5, 1.5),
            hue: SampleRange::new(0.0, 1.0),
            saturation: 1.0,
            lightness: 0.7,
        }
    }
}

impl ClickRanges {
    /// Every float range, labelled, for validation messages.
    pub fn ranges(&self) -> [(&'static str, SampleRange); 6] {
        [
            ("origin_x", self.origin_x),
            ("origin_y", self.origin_y),
            ("origin_z", self.origin_z),
            ("size", self.size),
            ("radius", self.radius),
            ("hue", self.hue),
        ]
    }
}

/// Turns triggers into burst specs. Holds no mutable state.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerController {
    startup: StartupBurst,
    click: ClickRanges,
    palette_size: usize,
}

impl Default for TriggerController {
    fn default() -> Self {
        Self::new(StartupBurst::default(), ClickRanges::default(), PALETTE_SIZE)
    }
}

impl TriggerController {
    /// `palette_size` bounds the sprite index chosen for click bursts.
    pub fn new(startup: StartupBurst, click: ClickRanges, palette_size: usize) -> Self {
        Self {
            startup,
            click,
            palette_size,
        }
    }

    pub fn spec_for<R: Rng + ?Sized>(&self, trigger: Trigger, rng: &mut R) -> BurstSpec {
        match trigger {
            Trigger::Startup => self.startup.to_spec(),
            Trigger::Click => self.click_spec(rng),
        }
    }

    fn click_spec<R: Rng + ?Sized>(&self, rng: &mut R) -> BurstSpec {
        let c = &self.click;
        let count = c.count.sample(rng);
        let origin = Vec3::new(
            c.origin_x.sample(rng),
            c.origin_y.sample(rng),
            c.origin_z.sample(rng),
        );
        let size = c.size.sample(rng);
        let texture = if self.palette_size > 1 {
            rng.gen_range(0..self.palette_size)
        } else {
            0
        };
        let radius = c.radius.sample(rng);
        let color = Color::from_hsl(c.hue.sample(rng), c.saturation, c.lightness);

        BurstSpec::new(count, origin, size, TextureHandle(texture), radius, color)
    }

    pub fn startup(&self) -> &StartupBurst {
        &self.startup
    }

    pub fn click(&self) -> &ClickRanges {
        &self.click
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::burst::create_burst;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_startup_burst_is_fixed() {
        let controller = TriggerController::default();
        let mut rng = SmallRng::seed_from_u64(1);
        let a = controller.spec_for(Trigger::Startup, &mut rng);
        let b = controller.spec_for(Trigger::Startup, &mut rng);
        assert_eq!(a, b);
        assert_eq!(a.count, 100);
        assert_eq!(a.origin, Vec3::ZERO);
        assert_eq!(a.size, 0.5);
        assert_eq!(a.texture, TextureHandle(7));
        assert_eq!(a.radius, 1.0);
        assert_eq!(a.color, Color::from_hex(0x8affff));
    }

    #[test]
    fn test_click_stays_in_ranges() {
        let controller = TriggerController::default();
        let mut rng = SmallRng::seed_from_u64(2);
        for _ in 0..500 {
            let s = controller.spec_for(Trigger::Click, &mut rng);
            assert!((400..=1400).contains(&s.count));
            assert!((-1.0..1.0).contains(&s.origin.x));
            assert!((0.0..1.0).contains(&s.origin.y));
            assert!((-1.0..1.0).contains(&s.origin.z));
            assert!((0.1..0.2).contains(&s.size));
            assert!((0.5..1.5).contains(&s.radius));
            assert!(s.texture.index() < PALETTE_SIZE);
        }
    }

    #[test]
    fn test_click_uses_every_sprite() {
        let controller = TriggerController::default();
        let mut rng = SmallRng::seed_from_u64(3);
        let mut seen = [false; PALETTE_SIZE];
        for _ in 0..400 {
            seen[controller.spec_for(Trigger::Click, &mut rng).texture.index()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_fixed_ranges_yield_fixed_values() {
        let click = ClickRanges {
            count: CountRange::new(400, 400),
            radius: SampleRange::fixed(0.5),
            ..Default::default()
        };
        let controller = TriggerController::new(StartupBurst::default(), click, PALETTE_SIZE);
        let mut rng = SmallRng::seed_from_u64(4);

        for _ in 0..10 {
            let spec = controller.spec_for(Trigger::Click, &mut rng);
            assert_eq!(spec.count, 400);
            assert_eq!(spec.radius, 0.5);

            let burst = create_burst(&spec, &mut rng);
            assert_eq!(burst.len(), 400);
            for p in &burst.positions {
                let d = p.length();
                assert!(d >= 0.375 - 1e-5 && d <= 0.5 + 1e-5, "distance {d}");
            }
        }
    }

    #[test]
    fn test_range_validity() {
        assert!(SampleRange::new(0.0, 1.0).is_valid());
        assert!(SampleRange::fixed(2.0).is_valid());
        assert!(!SampleRange::new(1.0, 0.0).is_valid());
        assert!(!SampleRange::new(f32::NAN, 1.0).is_valid());
        assert!(!CountRange::new(10, 5).is_valid());
    }

    #[test]
    fn test_single_sprite_palette() {
        let controller =
            TriggerController::new(StartupBurst::default(), ClickRanges::default(), 1);
        let mut rng = SmallRng::seed_from_u64(5);
        assert_eq!(controller.spec_for(Trigger::Click, &mut rng).texture, TextureHandle(0));
    }
}
