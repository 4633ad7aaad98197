//! Vector, angle and interval math.
//!
//! Everything in here is a pure value operation: nothing mutates an operand,
//! and every operation that could divide by zero returns a [`MathError`]
//! instead of a silently undefined value. Angles are radians throughout.

pub mod collision;
pub mod easing;
pub mod polar;
pub mod range;
pub mod transform;
pub mod vector;
pub mod wave;

use std::ops::{Add, Mul, Sub};

use thiserror::Error;

pub use collision::{bounce_off_static_circle, circles_touch, point_in_circle, resolve_circles};
pub use easing::Easing;
pub use polar::{angle_difference, normalize_angle, wrap_angle_signed, Polar2, PolarRange};
pub use range::Range;
pub use transform::{rotation_z3, translation3, Matrix3, Matrix4, Transform2};
pub use vector::{
    from_polar, random_direction, random_direction_with_spread, random_in_circle, random_in_rect,
    rotated, to_pixel, Vector2, Vector3, VectorExt,
};
pub use wave::{PulseWave, SineWave};

/// Tolerance used by [`approx_eq`].
pub const APPROX_EPSILON: f32 = 1e-4;

/// Errors raised when a math value cannot be constructed or computed.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MathError {
    #[error("division by zero in {0}")]
    DivideByZero(&'static str),
    #[error("inverted range: min {min} is greater than max {max}")]
    InvertedRange { min: f32, max: f32 },
    #[error("non-finite value {0}")]
    NonFinite(f32),
    #[error("{name} must lie within [0, 1], got {value}")]
    OutOfUnitInterval { name: &'static str, value: f32 },
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },
}

/// Values that can be linearly interpolated: scalars and glam vectors.
pub trait Interpolate:
    Copy + Add<Output = Self> + Sub<Output = Self> + Mul<f32, Output = Self>
{
}

impl<T> Interpolate for T where
    T: Copy + Add<Output = T> + Sub<Output = T> + Mul<f32, Output = T>
{
}

#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < APPROX_EPSILON
}

/// Linear interpolation. `t` outside [0, 1] extrapolates.
#[inline]
pub fn lerp<T: Interpolate>(a: T, b: T, t: f32) -> T {
    a + (b - a) * t
}

/// Where `value` sits between `min` and `max`, as a fraction.
/// Values outside the interval give fractions outside [0, 1].
pub fn inverse_lerp(value: f32, min: f32, max: f32) -> Result<f32, MathError> {
    let delta = max - min;
    if delta == 0.0 {
        return Err(MathError::DivideByZero("inverse_lerp"));
    }
    Ok((value - min) / delta)
}

/// Quadratic interpolation through three samples placed at u = 0, ½ and 1.
pub fn quadratic_interp<T: Interpolate>(x0: T, x1: T, x2: T, u: f32) -> T {
    let a = x0 * 2.0 - x1 * 4.0 + x2 * 2.0;
    let b = x1 * 4.0 - x0 * 3.0 - x2;
    a * (u * u) + b * u + x0
}

/// Bilinear interpolation over a quad wound clockwise from the top left
/// (`a` top left, `b` top right, `c` bottom right, `d` bottom left).
pub fn bilinear_interp<T: Interpolate>(a: T, b: T, c: T, d: T, u: f32, v: f32) -> T {
    let top = lerp(a, b, u);
    let bottom = lerp(d, c, u);
    lerp(top, bottom, v)
}

/// Round to the nearest multiple of `target`. Halfway values round up.
pub fn nearest_multiple(num: i64, target: i64) -> Result<i64, MathError> {
    if target == 0 {
        return Err(MathError::DivideByZero("nearest_multiple"));
    }
    Ok((num + target / 2).div_euclid(target) * target)
}

pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

pub fn lcm(a: u64, b: u64) -> u64 {
    if a == 0 || b == 0 {
        return 0;
    }
    a / gcd(a, b) * b
}

/// Lowest common multiple of a whole list. `None` for an empty list.
pub fn lcm_all(values: impl IntoIterator<Item = u64>) -> Option<u64> {
    values.into_iter().reduce(lcm)
}
