//! Easing curves for burst progress.

use serde::{Deserialize, Serialize};

/// Maps linear time `0..1` to eased progress `0..1`.
///
/// Every curve is monotonic with `apply(0) == 0` and `apply(1) == 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// `1 - (1 - t)^2`
    Power1Out,
    /// `1 - (1 - t)^3`. Starts steep, flattens near the end.
    #[default]
    Power2Out,
    /// `1 - (1 - t)^4`
    Power3Out,
    /// Cubic ease in, then out.
    Power2InOut,
}

impl Easing {
    /// Apply easing to a value. Input is clamped to `0..1`.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Power1Out => 1.0 - (1.0 - t).powi(2),
            Easing::Power2Out => 1.0 - (1.0 - t).powi(3),
            Easing::Power3Out => 1.0 - (1.0 - t).powi(4),
            Easing::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 5] = [
        Easing::Linear,
        Easing::Power1Out,
        Easing::Power2Out,
        Easing::Power3Out,
        Easing::Power2InOut,
    ];

    #[test]
    fn test_endpoints() {
        for e in ALL {
            assert_eq!(e.apply(0.0), 0.0, "{e:?}");
            assert_eq!(e.apply(1.0), 1.0, "{e:?}");
        }
    }

    #[test]
    fn test_monotonic() {
        for e in ALL {
            let mut last = 0.0;
            for i in 0..=1000 {
                let v = e.apply(i as f32 / 1000.0);
                assert!(v >= last, "{e:?} decreased at {i}");
                last = v;
            }
        }
    }

    #[test]
    fn test_power2_out_decelerates() {
        let e = Easing::Power2Out;
        let early = e.apply(0.1) - e.apply(0.0);
        let late = e.apply(1.0) - e.apply(0.9);
        assert!(early > late * 10.0);
        assert!((e.apply(0.5) - 0.875).abs() < 1e-6);
    }

    #[test]
    fn test_clamps_out_of_range() {
        assert_eq!(Easing::Power2Out.apply(-3.0), 0.0);
        assert_eq!(Easing::Power2Out.apply(7.0), 1.0);
    }
}
