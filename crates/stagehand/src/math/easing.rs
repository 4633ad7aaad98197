// math/easing.rs
//
// Shaping curves for the fraction fed into an interpolation. Pure functions,
// used by particles to shape size and colour over their lifetime.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use super::{lerp, Interpolate};

/// Curve applied to a normalized fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    /// Slow start.
    QuadIn,
    /// Slow end.
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    SineInOut,
    /// Hermite smoothstep, zero slope at both ends.
    SmoothStep,
}

impl Easing {
    /// Shape `t`. Input is clamped to [0, 1] and the output stays in [0, 1].
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => t * (2.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let u = 1.0 - t;
                    1.0 - 2.0 * u * u
                }
            }
            Easing::CubicIn => t * t * t,
            Easing::CubicOut => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
            Easing::SineInOut => (1.0 - (PI * t).cos()) / 2.0,
            Easing::SmoothStep => t * t * (3.0 - 2.0 * t),
        }
    }

    /// Interpolate between `a` and `b` along this curve.
    #[inline]
    pub fn interpolate<T: Interpolate>(self, a: T, b: T, t: f32) -> T {
        lerp(a, b, self.apply(t))
    }
}
