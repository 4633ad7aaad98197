//! Closed scalar intervals.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::MathError;

/// A closed interval `[min, max]`.
///
/// Construction fails when `min > max` or either bound is not finite, so
/// every `Range` in circulation is well ordered. Deserializes from a bare
/// number (a degenerate range) or from `{ "min": .., "max": .. }`, with the
/// same validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RangeRepr", into = "RangeRepr")]
pub struct Range {
    min: f32,
    max: f32,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RangeRepr {
    Fixed(f32),
    Span { min: f32, max: f32 },
}

impl TryFrom<RangeRepr> for Range {
    type Error = MathError;

    fn try_from(repr: RangeRepr) -> Result<Self, Self::Error> {
        match repr {
            RangeRepr::Fixed(v) => Range::new(v, v),
            RangeRepr::Span { min, max } => Range::new(min, max),
        }
    }
}

impl From<Range> for RangeRepr {
    fn from(r: Range) -> Self {
        if r.min == r.max {
            RangeRepr::Fixed(r.min)
        } else {
            RangeRepr::Span {
                min: r.min,
                max: r.max,
            }
        }
    }
}

impl Range {
    pub fn new(min: f32, max: f32) -> Result<Self, MathError> {
        if !min.is_finite() {
            return Err(MathError::NonFinite(min));
        }
        if !max.is_finite() {
            return Err(MathError::NonFinite(max));
        }
        if min > max {
            return Err(MathError::InvertedRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// A range holding a single value, for literals. `value` must be
    /// finite; use `Range::try_from` for values from elsewhere.
    pub fn constant(value: f32) -> Self {
        debug_assert!(value.is_finite(), "Range::constant({value})");
        Self {
            min: value,
            max: value,
        }
    }

    /// Smallest range covering every finite value in `values`.
    /// `None` when there are none.
    pub fn spanning(values: impl IntoIterator<Item = f32>) -> Option<Self> {
        let mut finite = values.into_iter().filter(|v| v.is_finite());
        let first = finite.next()?;
        Some(finite.fold(Self::constant(first), Self::include))
    }

    #[inline]
    pub fn min(&self) -> f32 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> f32 {
        self.max
    }

    #[inline]
    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    #[inline]
    pub fn mid(&self) -> f32 {
        (self.min + self.max) / 2.0
    }

    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Value at fraction `t`; extrapolates outside [0, 1].
    #[inline]
    pub fn lerp(&self, t: f32) -> f32 {
        self.min + self.span() * t
    }

    #[inline]
    pub fn lerp_clamped(&self, t: f32) -> f32 {
        self.lerp(t.clamp(0.0, 1.0))
    }

    pub fn inverse_lerp(&self, value: f32) -> Result<f32, MathError> {
        super::inverse_lerp(value, self.min, self.max)
    }

    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    #[inline]
    pub fn clamp_lo(&self, value: f32) -> f32 {
        value.max(self.min)
    }

    #[inline]
    pub fn clamp_hi(&self, value: f32) -> f32 {
        value.min(self.max)
    }

    /// This range widened to cover `value`.
    pub fn include(self, value: f32) -> Self {
        if !value.is_finite() {
            return self;
        }
        Self {
            min: self.min.min(value),
            max: self.max.max(value),
        }
    }

    /// Smallest range covering both.
    pub fn union(self, other: Range) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Uniform sample from the interval.
    ///
    /// Weights the bounds separately so ranges wider than `f32::MAX` do not
    /// overflow.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.is_degenerate() {
            return self.min;
        }
        let t: f32 = rng.random();
        (self.min * (1.0 - t) + self.max * t).clamp(self.min, self.max)
    }
}

impl TryFrom<f32> for Range {
    type Error = MathError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Range::new(value, value)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} -> {})", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    proptest! {
        #[test]
        fn lerp_hits_endpoints_and_is_monotonic(
            a in -1.0e3f32..1.0e3,
            b in -1.0e3f32..1.0e3,
            t1 in -2.0f32..2.0,
            t2 in -2.0f32..2.0,
        ) {
            let r = Range::new(a.min(b), a.max(b)).unwrap();
            prop_assert_eq!(r.lerp(0.0), r.min());
            prop_assert!((r.lerp(1.0) - r.max()).abs() <= 1e-3);
            let (lo, hi) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
            prop_assert!(r.lerp(lo) <= r.lerp(hi));
        }
    }

    #[test]
    fn inverted_range_fails() {
        assert_eq!(
            Range::new(5.0, 1.0),
            Err(MathError::InvertedRange { min: 5.0, max: 1.0 })
        );
        assert!(matches!(Range::new(f32::NAN, 1.0), Err(MathError::NonFinite(_))));
        assert!(Range::new(0.0, f32::INFINITY).is_err());
    }

    #[test]
    fn queries() {
        let r = Range::new(-15.0, 27.0).unwrap();
        assert_eq!(r.span(), 42.0);
        assert_eq!(r.mid(), 6.0);
        assert!(!r.contains(-20.0));
        assert!(r.contains(27.0));
        assert_eq!(r.clamp(99.0), 27.0);
        assert_eq!(r.clamp(-99.0), -15.0);
        assert_eq!(r.clamp_hi(-30.0), -30.0);
        assert_eq!(r.clamp_lo(99.0), 99.0);
        assert_eq!(r.inverse_lerp(6.0).unwrap(), 0.5);
    }

    #[test]
    fn include_widens_without_mutating() {
        let r = Range::new(-5.0, 5.0).unwrap();
        let wider = r.include(27.0).include(-15.0);
        assert_eq!(r, Range::new(-5.0, 5.0).unwrap());
        assert_eq!(wider, Range::new(-15.0, 27.0).unwrap());
    }

    #[test]
    fn spanning_values() {
        assert_eq!(Range::spanning([]), None);
        assert_eq!(
            Range::spanning([3.0, f32::NAN, -1.0, 2.0]),
            Some(Range::new(-1.0, 3.0).unwrap())
        );
    }

    #[test]
    fn lerp_clamped_stays_inside() {
        let r = Range::new(10.0, 20.0).unwrap();
        assert_eq!(r.lerp(1.5), 25.0);
        assert_eq!(r.lerp_clamped(1.5), 20.0);
        assert_eq!(r.lerp_clamped(-1.0), 10.0);
    }

    #[test]
    fn widest_range_samples_without_overflow() {
        let r = Range::new(-f32::MAX, f32::MAX).unwrap();
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..100 {
            let v = r.sample(&mut rng);
            assert!(v.is_finite() && r.contains(v), "sampled {v}");
        }
    }

    #[test]
    fn scalar_conversion_checks_finiteness() {
        assert_eq!(Range::try_from(2.0f32), Ok(Range::constant(2.0)));
        assert_eq!(
            Range::try_from(f32::INFINITY),
            Err(MathError::NonFinite(f32::INFINITY))
        );
        assert!(matches!(
            Range::try_from(f32::NAN),
            Err(MathError::NonFinite(_))
        ));
    }

    #[test]
    fn samples_inside() {
        let r = Range::new(0.5, 0.75).unwrap();
        let mut rng = Pcg32::seed_from_u64(11);
        assert!((0..500).all(|_| r.contains(r.sample(&mut rng))));
        assert_eq!(Range::constant(4.0).sample(&mut rng), 4.0);
    }

    #[test]
    fn deserializes_number_or_bounds() {
        let fixed: Range = serde_json::from_str("2.5").unwrap();
        assert_eq!(fixed, Range::constant(2.5));
        let span: Range = serde_json::from_str(r#"{ "min": 1, "max": 3 }"#).unwrap();
        assert_eq!(span, Range::new(1.0, 3.0).unwrap());
        assert!(serde_json::from_str::<Range>(r#"{ "min": 3, "max": 1 }"#).is_err());
        assert_eq!(serde_json::to_string(&Range::constant(1.0)).unwrap(), "1.0");
    }
}
