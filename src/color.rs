//! Burst tint colors.
//!
//! Colors are stored as linear RGB, which is what the shading program
//! consumes. Hex and HSL inputs are treated as sRGB and converted on the way
//! in, so `#8affff` looks the same here as it does in a browser.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Linear RGB color, each channel nominally in 0.0-1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::linear(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::linear(0.0, 0.0, 0.0);

    /// Create a color from linear channel values.
    pub const fn linear(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from sRGB channel values (0.0-1.0).
    pub fn srgb(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: srgb_to_linear(r),
            g: srgb_to_linear(g),
            b: srgb_to_linear(b),
        }
    }

    /// Create a color from a packed `0xRRGGBB` sRGB value.
    ///
    /// ```ignore
    /// let cyan = Color::from_hex(0x8affff);
    /// ```
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xff) as f32 / 255.0;
        let g = ((hex >> 8) & 0xff) as f32 / 255.0;
        let b = (hex & 0xff) as f32 / 255.0;
        Self::srgb(r, g, b)
    }

    /// Color from hue, saturation and lightness (sRGB HSL model).
    ///
    /// * `hue` - wraps, so `1.25` is the same as `0.25`
    /// * `saturation` - 0.0 (gray) to 1.0 (vivid), clamped
    /// * `lightness` - 0.0 (black) to 1.0 (white), clamped
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let h = hue.rem_euclid(1.0);
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);

        if s == 0.0 {
            return Self::srgb(l, l, l);
        }

        let high = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let low = 2.0 * l - high;

        Self::srgb(
            hue_to_channel(low, high, h + 1.0 / 3.0),
            hue_to_channel(low, high, h),
            hue_to_channel(low, high, h - 1.0 / 3.0),
        )
    }

    /// Channels as a `[r, g, b]` array, ready for a uniform block.
    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl From<Color> for Vec3 {
    fn from(c: Color) -> Self {
        Vec3::new(c.r, c.g, c.b)
    }
}

impl From<Vec3> for Color {
    fn from(v: Vec3) -> Self {
        Color::linear(v.x, v.y, v.z)
    }
}

/// sRGB transfer function, decoded to linear.
pub fn srgb_to_linear(c: f32) -> f32 {
    if c < 0.04045 {
        c * 0.077_399_38
    } else {
        (c * 0.947_867_3 + 0.052_132_7).powf(2.4)
    }
}

fn hue_to_channel(low: f32, high: f32, t: f32) -> f32 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };

    if t < 1.0 / 6.0 {
        low + (high - low) * 6.0 * t
    } else if t < 0.5 {
        high
    } else if t < 2.0 / 3.0 {
        low + (high - low) * 6.0 * (2.0 / 3.0 - t)
    } else {
        low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_hex_white_and_black() {
        let white = Color::from_hex(0xffffff);
        assert!(close(white.r, 1.0) && close(white.g, 1.0) && close(white.b, 1.0));
        assert_eq!(Color::from_hex(0x000000), Color::BLACK);
    }

    #[test]
    fn test_hex_is_decoded_from_srgb() {
        // 0x80 = 0.502 sRGB, ~0.216 linear
        let gray = Color::from_hex(0x808080);
        assert!(close(gray.r, 0.2158));
        assert_eq!(gray.r, gray.g);
        assert_eq!(gray.g, gray.b);
    }

    #[test]
    fn test_startup_cyan() {
        let c = Color::from_hex(0x8affff);
        assert!(c.r < c.g);
        assert!(close(c.g, 1.0));
        assert!(close(c.b, 1.0));
    }

    #[test]
    fn test_hsl_primary_hues() {
        let red = Color::from_hsl(0.0, 1.0, 0.5);
        assert!(close(red.r, 1.0) && close(red.g, 0.0) && close(red.b, 0.0));

        let green = Color::from_hsl(1.0 / 3.0, 1.0, 0.5);
        assert!(close(green.r, 0.0) && close(green.g, 1.0) && close(green.b, 0.0));

        let blue = Color::from_hsl(2.0 / 3.0, 1.0, 0.5);
        assert!(close(blue.r, 0.0) && close(blue.g, 0.0) && close(blue.b, 1.0));
    }

    #[test]
    fn test_hsl_hue_wraps() {
        assert_eq!(Color::from_hsl(1.25, 1.0, 0.7), Color::from_hsl(0.25, 1.0, 0.7));
    }

    #[test]
    fn test_hsl_zero_saturation_is_gray() {
        let c = Color::from_hsl(0.42, 0.0, 0.7);
        assert_eq!(c.r, c.g);
        assert_eq!(c.g, c.b);
    }

    #[test]
    fn test_click_lightness_stays_bright() {
        // Lightness 0.7 at full saturation never drops a channel below 0.4 sRGB.
        for i in 0..36 {
            let c = Color::from_hsl(i as f32 / 36.0, 1.0, 0.7);
            for channel in c.to_array() {
                assert!(channel >= srgb_to_linear(0.4) - 1e-4);
                assert!(channel <= 1.0 + 1e-4);
            }
        }
    }
}
