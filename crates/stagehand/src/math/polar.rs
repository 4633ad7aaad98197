//! Polar coordinates and angle wrapping.

use std::f32::consts::{PI, TAU};
use std::fmt;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::range::Range;
use super::MathError;

/// Wrap an angle into `[0, 2π)`.
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Wrap an angle into `[-π, π)`.
#[inline]
pub fn wrap_angle_signed(angle: f32) -> f32 {
    let wrapped = normalize_angle(angle);
    if wrapped >= PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Shortest signed rotation taking `from` to `to`.
#[inline]
pub fn angle_difference(from: f32, to: f32) -> f32 {
    wrap_angle_signed(to - from)
}

/// A 2D point as (angle, radius). The angle is kept in `[0, 2π)` and the
/// radius is never negative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Polar2 {
    pub angle: f32,
    pub radius: f32,
}

impl Polar2 {
    pub fn new(angle: f32, radius: f32) -> Self {
        if radius < 0.0 {
            Self {
                angle: normalize_angle(angle + PI),
                radius: -radius,
            }
        } else {
            Self {
                angle: normalize_angle(angle),
                radius,
            }
        }
    }

    pub fn from_degrees(degrees: f32, radius: f32) -> Self {
        Self::new(degrees.to_radians(), radius)
    }

    pub fn from_vector(v: Vec2) -> Self {
        Self::new(v.y.atan2(v.x), v.length())
    }

    pub fn to_vector(self) -> Vec2 {
        Vec2::new(self.radius * self.angle.cos(), self.radius * self.angle.sin())
    }

    pub fn degrees(self) -> f32 {
        self.angle.to_degrees()
    }
}

impl From<Vec2> for Polar2 {
    fn from(v: Vec2) -> Self {
        Self::from_vector(v)
    }
}

impl fmt::Display for Polar2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}°, {:.3})", self.degrees(), self.radius)
    }
}

/// An annular sector: an angle range paired with a radius range.
///
/// The angle range is taken as given (not wrapped), so a sector straddling
/// zero is written as e.g. `-0.3..0.3`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PolarRangeParams")]
pub struct PolarRange {
    pub angle: Range,
    pub radius: Range,
}

#[derive(Deserialize)]
struct PolarRangeParams {
    angle: Range,
    radius: Range,
}

impl TryFrom<PolarRangeParams> for PolarRange {
    type Error = MathError;

    fn try_from(p: PolarRangeParams) -> Result<Self, Self::Error> {
        PolarRange::new(p.angle, p.radius)
    }
}

impl PolarRange {
    /// Radius bounds must not be negative.
    pub fn new(angle: Range, radius: Range) -> Result<Self, MathError> {
        if radius.min() < 0.0 {
            return Err(MathError::Negative {
                name: "radius",
                value: radius.min(),
            });
        }
        Ok(Self { angle, radius })
    }

    /// A full ring between two radii.
    pub fn ring(inner: f32, outer: f32) -> Result<Self, MathError> {
        Self::new(Range::new(0.0, TAU)?, Range::new(inner, outer)?)
    }

    pub fn lerp(&self, t: f32) -> Polar2 {
        Polar2::new(self.angle.lerp(t), self.radius.lerp(t))
    }

    pub fn contains(&self, p: Polar2) -> bool {
        if !self.radius.contains(p.radius) {
            return false;
        }
        if self.angle.span() >= TAU {
            return true;
        }
        // Compare the angle relative to the start of the sector.
        let offset = normalize_angle(p.angle - self.angle.min());
        offset <= self.angle.span()
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Polar2 {
        Polar2::new(self.angle.sample(rng), self.radius.sample(rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn normalize_wraps_into_canonical_range() {
        assert!(approx_eq(normalize_angle(-FRAC_PI_2), 3.0 * FRAC_PI_2));
        assert!(approx_eq(normalize_angle(TAU + 1.0), 1.0));
        assert_eq!(normalize_angle(0.0), 0.0);
        let tiny = normalize_angle(-1e-9);
        assert!((0.0..TAU).contains(&tiny));
    }

    #[test]
    fn signed_wrap_and_difference() {
        assert!(approx_eq(wrap_angle_signed(3.0 * FRAC_PI_2), -FRAC_PI_2));
        assert!(approx_eq(
            angle_difference(350f32.to_radians(), 10f32.to_radians()),
            20f32.to_radians()
        ));
    }

    #[test]
    fn vector_round_trip() {
        let v = Vec2::new(-3.0, 4.0);
        let p = Polar2::from_vector(v);
        assert!(approx_eq(p.radius, 5.0));
        let back = p.to_vector();
        assert!(approx_eq(back.x, v.x) && approx_eq(back.y, v.y));
    }

    #[test]
    fn negative_radius_flips_angle() {
        let p = Polar2::new(0.0, -2.0);
        assert_eq!(p.radius, 2.0);
        assert!(approx_eq(p.angle, PI));
    }

    #[test]
    fn degrees_display() {
        let p = Polar2::from_degrees(90.0, 1.0);
        assert!(approx_eq(p.degrees(), 90.0));
        assert_eq!(p.to_string(), "(90.000°, 1.000)");
    }

    #[test]
    fn sector_contains_across_zero() {
        let sector = PolarRange::new(
            Range::new(-0.5, 0.5).unwrap(),
            Range::new(1.0, 2.0).unwrap(),
        )
        .unwrap();
        assert!(sector.contains(Polar2::new(-0.25, 1.5)));
        assert!(sector.contains(Polar2::new(0.25, 1.5)));
        assert!(!sector.contains(Polar2::new(PI, 1.5)));
        assert!(!sector.contains(Polar2::new(0.0, 3.0)));
    }

    #[test]
    fn ring_samples_inside() {
        let ring = PolarRange::ring(2.0, 4.0).unwrap();
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..100 {
            let p = ring.sample(&mut rng);
            assert!(ring.contains(p));
            let len = p.to_vector().length();
            assert!(len >= 2.0 - 1e-3 && len <= 4.0 + 1e-3);
        }
    }

    #[test]
    fn negative_radius_range_rejected() {
        let bad = PolarRange::new(Range::new(0.0, 1.0).unwrap(), Range::new(-1.0, 1.0).unwrap());
        assert!(bad.is_err());
    }

    #[test]
    fn deserializing_rejects_negative_radius() {
        let sector: PolarRange =
            serde_json::from_str(r#"{ "angle": { "min": 0, "max": 1 }, "radius": 2 }"#).unwrap();
        assert_eq!(sector.radius, Range::constant(2.0));
        assert!(serde_json::from_str::<PolarRange>(
            r#"{ "angle": 0, "radius": { "min": -1, "max": 2 } }"#
        )
        .is_err());
    }
}
