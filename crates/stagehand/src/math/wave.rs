//! Periodic signals sampled by time, for driving schedules and oscillations.

use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use super::range::Range;
use super::MathError;

fn check_wavelength(wavelength: f32) -> Result<(), MathError> {
    if !wavelength.is_finite() {
        return Err(MathError::NonFinite(wavelength));
    }
    if wavelength <= 0.0 {
        return Err(MathError::NonPositive {
            name: "wavelength",
            value: wavelength,
        });
    }
    Ok(())
}

fn check_unit(name: &'static str, value: f32) -> Result<(), MathError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(MathError::OutOfUnitInterval { name, value });
    }
    Ok(())
}

#[derive(Deserialize)]
struct SineParams {
    wavelength: f32,
    amplitude: Range,
    #[serde(default)]
    phase: f32,
}

impl TryFrom<SineParams> for SineWave {
    type Error = MathError;

    fn try_from(p: SineParams) -> Result<Self, Self::Error> {
        SineWave::new(p.wavelength, p.amplitude, p.phase)
    }
}

#[derive(Deserialize)]
struct PulseParams {
    wavelength: f32,
    amplitude: Range,
    #[serde(default)]
    phase: f32,
    width: f32,
}

impl TryFrom<PulseParams> for PulseWave {
    type Error = MathError;

    fn try_from(p: PulseParams) -> Result<Self, Self::Error> {
        PulseWave::new(p.wavelength, p.amplitude, p.phase, p.width)
    }
}

/// A sine oscillating across `amplitude` with period `wavelength`.
///
/// `phase` shifts the wave by a fraction of a period. With phase 0 the
/// wave starts at the middle of the amplitude range heading up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SineParams")]
pub struct SineWave {
    wavelength: f32,
    amplitude: Range,
    phase: f32,
}

impl SineWave {
    pub fn new(wavelength: f32, amplitude: Range, phase: f32) -> Result<Self, MathError> {
        check_wavelength(wavelength)?;
        check_unit("phase", phase)?;
        Ok(Self {
            wavelength,
            amplitude,
            phase,
        })
    }

    pub fn wavelength(&self) -> f32 {
        self.wavelength
    }

    pub fn amplitude(&self) -> Range {
        self.amplitude
    }

    pub fn sample(&self, t: f32) -> f32 {
        let s = (TAU * (t / self.wavelength + self.phase)).sin();
        self.amplitude.lerp((s + 1.0) / 2.0)
    }
}

/// A square wave: `amplitude.max()` for the first `width` fraction of each
/// period, `amplitude.min()` for the rest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PulseParams")]
pub struct PulseWave {
    wavelength: f32,
    amplitude: Range,
    phase: f32,
    width: f32,
}

impl PulseWave {
    pub fn new(
        wavelength: f32,
        amplitude: Range,
        phase: f32,
        width: f32,
    ) -> Result<Self, MathError> {
        check_wavelength(wavelength)?;
        check_unit("phase", phase)?;
        check_unit("width", width)?;
        Ok(Self {
            wavelength,
            amplitude,
            phase,
            width,
        })
    }

    /// True while the pulse is high at time `t`.
    pub fn is_high(&self, t: f32) -> bool {
        let cycle = (t / self.wavelength + self.phase).rem_euclid(1.0);
        cycle < self.width
    }

    pub fn sample(&self, t: f32) -> f32 {
        if self.is_high(t) {
            self.amplitude.max()
        } else {
            self.amplitude.min()
        }
    }
}
