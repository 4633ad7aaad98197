//! 2D/3D vectors.
//!
//! The vector types are glam's; this module adds the operations glam leaves
//! out or makes infallible where we want an error.

use glam::{Vec2, Vec3};
use rand::Rng;

use super::polar::Polar2;
use super::MathError;

pub type Vector2 = Vec2;
pub type Vector3 = Vec3;

/// Fallible vector operations shared by [`Vector2`] and [`Vector3`].
pub trait VectorExt: Sized + Copy {
    /// Unit vector in the same direction. Fails for a zero-length vector.
    fn try_normalized(self) -> Result<Self, MathError>;

    /// Unit vector, or `self` unchanged when it has no length.
    fn normalized_or_self(self) -> Self {
        self.try_normalized().unwrap_or(self)
    }

    /// Unsigned angle between two vectors, in radians.
    fn angle_between_vectors(self, other: Self) -> Result<f32, MathError>;

    /// Projection of `self` onto `onto`.
    fn projected_onto(self, onto: Self) -> Result<Self, MathError>;
}

macro_rules! impl_vector_ext {
    ($ty:ty) => {
        impl VectorExt for $ty {
            fn try_normalized(self) -> Result<Self, MathError> {
                self.try_normalize().ok_or(MathError::DivideByZero("normalize"))
            }

            fn angle_between_vectors(self, other: Self) -> Result<f32, MathError> {
                let lengths = self.length() * other.length();
                if lengths == 0.0 {
                    return Err(MathError::DivideByZero("angle_between"));
                }
                // Rounding can push the cosine a hair past ±1.
                Ok((self.dot(other) / lengths).clamp(-1.0, 1.0).acos())
            }

            fn projected_onto(self, onto: Self) -> Result<Self, MathError> {
                let denom = onto.dot(onto);
                if denom == 0.0 {
                    return Err(MathError::DivideByZero("project"));
                }
                Ok(onto * (self.dot(onto) / denom))
            }
        }
    };
}

impl_vector_ext!(Vec2);
impl_vector_ext!(Vec3);

/// Rotate counter-clockwise by `angle` radians.
#[inline]
pub fn rotated(v: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(v)
}

#[inline]
pub fn from_polar(angle: f32, length: f32) -> Vec2 {
    Vec2::new(angle.cos() * length, angle.sin() * length)
}

impl From<Polar2> for Vec2 {
    fn from(p: Polar2) -> Self {
        p.to_vector()
    }
}

/// Truncate to integer pixel coordinates.
#[inline]
pub fn to_pixel(v: Vec2) -> (i32, i32) {
    (v.x as i32, v.y as i32)
}

/// Uniformly distributed unit vector.
pub fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    from_polar(rng.random_range(0.0..std::f32::consts::TAU), 1.0)
}

/// Unit vector pointing `angle` radians, jittered by up to `half_spread`
/// either side.
pub fn random_direction_with_spread<R: Rng + ?Sized>(
    rng: &mut R,
    angle: f32,
    half_spread: f32,
) -> Vec2 {
    let half_spread = half_spread.abs();
    let offset = if half_spread > 0.0 {
        rng.random_range(-half_spread..=half_spread)
    } else {
        0.0
    };
    from_polar(angle + offset, 1.0)
}

/// Random point inside a circle. Radius is picked uniformly, so points
/// cluster towards the center.
pub fn random_in_circle<R: Rng + ?Sized>(rng: &mut R, center: Vec2, radius: f32) -> Vec2 {
    let angle = rng.random_range(0.0..std::f32::consts::TAU);
    let r = radius * rng.random::<f32>();
    center + from_polar(angle, r)
}

/// Random point inside the rectangle starting at `min` with extent `size`.
pub fn random_in_rect<R: Rng + ?Sized>(rng: &mut R, min: Vec2, size: Vec2) -> Vec2 {
    min + Vec2::new(rng.random::<f32>() * size.x, rng.random::<f32>() * size.y)
}
