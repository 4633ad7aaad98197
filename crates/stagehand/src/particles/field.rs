use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::config::ConfigError;
use super::particle::Particle;
use crate::math::{random_direction, MathError};

/// A force acting on every particle of an emitter each frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Field {
    /// Uniform acceleration, e.g. gravity.
    Constant { accel: Vec2 },
    /// Loses this fraction of velocity per second.
    Drag { per_second: f32 },
    /// Pulls towards `point`; negative strength pushes away. With a falloff
    /// radius, strength fades linearly to nothing at that distance.
    Attract {
        point: Vec2,
        strength: f32,
        #[serde(default)]
        falloff: Option<f32>,
    },
    /// Random kicks: `chance` per second of a velocity change of `magnitude`.
    Turbulence { chance: f32, magnitude: f32 },
}

impl Field {
    pub fn apply<R: Rng + ?Sized>(&self, particle: &mut Particle, dt: f32, rng: &mut R) {
        match *self {
            Field::Constant { accel } => {
                particle.velocity += accel * dt;
            }
            Field::Drag { per_second } => {
                particle.velocity *= (1.0 - per_second * dt).max(0.0);
            }
            Field::Attract {
                point,
                strength,
                falloff,
            } => {
                let offset = point - particle.position;
                let distance = offset.length();
                if distance <= f32::EPSILON {
                    return;
                }
                let scale = match falloff {
                    Some(radius) => (1.0 - distance / radius).max(0.0),
                    None => 1.0,
                };
                particle.velocity += offset / distance * strength * scale * dt;
            }
            Field::Turbulence { chance, magnitude } => {
                if rng.random::<f32>() < chance * dt {
                    particle.velocity += random_direction(rng) * magnitude;
                }
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Field::Constant { accel } => {
                if !accel.is_finite() {
                    let bad = if accel.x.is_finite() { accel.y } else { accel.x };
                    return Err(MathError::NonFinite(bad).into());
                }
            }
            Field::Drag { per_second } => {
                if per_second.is_nan() || per_second < 0.0 {
                    return Err(MathError::Negative {
                        name: "drag",
                        value: per_second,
                    }
                    .into());
                }
            }
            Field::Attract { falloff, .. } => {
                if let Some(radius) = falloff {
                    if radius.is_nan() || radius <= 0.0 {
                        return Err(MathError::NonPositive {
                            name: "falloff",
                            value: radius,
                        }
                        .into());
                    }
                }
            }
            Field::Turbulence { chance, .. } => {
                if chance.is_nan() || chance < 0.0 {
                    return Err(MathError::Negative {
                        name: "turbulence chance",
                        value: chance,
                    }
                    .into());
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn still_at(position: Vec2) -> Particle {
        Particle::new(position, Vec2::ZERO, 10.0)
    }

    #[test]
    fn constant_accelerates() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut p = still_at(Vec2::ZERO);
        Field::Constant {
            accel: Vec2::new(0.0, -10.0),
        }
        .apply(&mut p, 0.5, &mut rng);
        assert_eq!(p.velocity, Vec2::new(0.0, -5.0));
    }

    #[test]
    fn drag_slows_but_never_reverses() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut p = Particle::new(Vec2::ZERO, Vec2::new(10.0, 0.0), 1.0);
        Field::Drag { per_second: 0.5 }.apply(&mut p, 1.0, &mut rng);
        assert_eq!(p.velocity, Vec2::new(5.0, 0.0));
        Field::Drag { per_second: 4.0 }.apply(&mut p, 1.0, &mut rng);
        assert_eq!(p.velocity, Vec2::ZERO);
    }

    #[test]
    fn attractor_pulls_and_repels() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut pulled = still_at(Vec2::ZERO);
        let mut pushed = still_at(Vec2::ZERO);
        let point = Vec2::new(100.0, 0.0);
        Field::Attract {
            point,
            strength: 10.0,
            falloff: None,
        }
        .apply(&mut pulled, 1.0, &mut rng);
        Field::Attract {
            point,
            strength: -10.0,
            falloff: None,
        }
        .apply(&mut pushed, 1.0, &mut rng);
        assert_eq!(pulled.velocity, Vec2::new(10.0, 0.0));
        assert_eq!(pushed.velocity, Vec2::new(-10.0, 0.0));
    }

    #[test]
    fn falloff_fades_with_distance() {
        let mut rng = Pcg32::seed_from_u64(1);
        let field = Field::Attract {
            point: Vec2::ZERO,
            strength: 8.0,
            falloff: Some(10.0),
        };
        let mut near = still_at(Vec2::new(5.0, 0.0));
        let mut far = still_at(Vec2::new(20.0, 0.0));
        field.apply(&mut near, 1.0, &mut rng);
        field.apply(&mut far, 1.0, &mut rng);
        assert_eq!(near.velocity, Vec2::new(-4.0, 0.0));
        assert_eq!(far.velocity, Vec2::ZERO);
    }

    #[test]
    fn turbulence_kicks_by_magnitude() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut p = still_at(Vec2::ZERO);
        // chance * dt >= 1 always fires.
        Field::Turbulence {
            chance: 2.0,
            magnitude: 3.0,
        }
        .apply(&mut p, 1.0, &mut rng);
        assert!((p.velocity.length() - 3.0).abs() < 1e-4);
    }

    #[test]
    fn invalid_fields_rejected() {
        assert!(Field::Drag { per_second: -1.0 }.validate().is_err());
        assert!(Field::Attract {
            point: Vec2::ZERO,
            strength: 1.0,
            falloff: Some(0.0),
        }
        .validate()
        .is_err());
        assert!(Field::Turbulence {
            chance: f32::NAN,
            magnitude: 1.0,
        }
        .validate()
        .is_err());
        assert!(Field::Constant { accel: Vec2::Y }.validate().is_ok());
    }
}
