//! Emitter configuration: what to spawn, where, how often.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::color::{ColorSource, Rgba};
use super::field::Field;
use super::particle::SizeOverLife;
use crate::math::{
    random_direction, random_direction_with_spread, random_in_circle, random_in_rect, Easing,
    MathError, PolarRange, Range, VectorExt,
};

/// Rejected emitter configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Math(#[from] MathError),
    #[error("colour palette is empty")]
    EmptyPalette,
    #[error("particle lifespan must not be negative, got {0}")]
    NegativeLifespan(f32),
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("{name} must be at least {} seconds, got {value}", MIN_PERIOD)]
    PeriodTooShort { name: &'static str, value: f32 },
    #[error("max_particles must be at least 1")]
    ZeroCapacity,
    #[error("unknown emitter preset '{0}'")]
    UnknownPreset(String),
    #[error("preset '{name}': {source}")]
    InPreset {
        name: String,
        #[source]
        source: Box<ConfigError>,
    },
    #[error("invalid emitter json: {0}")]
    Json(#[from] serde_json::Error),
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_nan() || value <= 0.0 {
        return Err(ConfigError::NonPositive { name, value });
    }
    Ok(())
}

/// Shortest pulse interval or spawn delay a schedule accepts.
pub const MIN_PERIOD: f32 = 1e-4;

fn period(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_nan() || value < MIN_PERIOD {
        return Err(ConfigError::PeriodTooShort { name, value });
    }
    Ok(())
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_nan() || value < 0.0 {
        return Err(MathError::Negative { name, value }.into());
    }
    Ok(())
}

/// When particles are released. Every variant feeds the emitter's owed
/// count; whole owed particles are spawned each frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Schedule {
    /// Continuous stream.
    Rate { per_second: f32 },
    /// `count` particles once, on the first update.
    Burst { count: u32 },
    /// `count` particles on the first update and every `interval` seconds.
    Pulse { count: u32, interval: f32 },
    /// One particle at a time, with a random delay between them.
    Interval { delay: Range },
}

impl Schedule {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Schedule::Rate { per_second } => positive("rate", per_second),
            Schedule::Burst { .. } => Ok(()),
            Schedule::Pulse { interval, .. } => period("pulse interval", interval),
            Schedule::Interval { delay } => period("interval delay", delay.min()),
        }
    }
}

/// Area new particles appear in, relative to the emitter position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpawnShape {
    #[default]
    Point,
    Circle { radius: f32 },
    /// Centered on the emitter.
    Rect { size: Vec2 },
    /// Segment from the emitter to `position + to`.
    Line { to: Vec2 },
    Sector { area: PolarRange },
}

impl SpawnShape {
    /// Offset from the emitter for a new particle.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        match *self {
            SpawnShape::Point => Vec2::ZERO,
            SpawnShape::Circle { radius } => random_in_circle(rng, Vec2::ZERO, radius),
            SpawnShape::Rect { size } => random_in_rect(rng, -size / 2.0, size),
            SpawnShape::Line { to } => to * rng.random::<f32>(),
            SpawnShape::Sector { area } => area.sample(rng).to_vector(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            SpawnShape::Circle { radius } => non_negative("spawn radius", radius),
            SpawnShape::Rect { size } => {
                non_negative("spawn width", size.x)?;
                non_negative("spawn height", size.y)
            }
            SpawnShape::Line { to } if !to.is_finite() => {
                Err(MathError::NonFinite(if to.x.is_finite() { to.y } else { to.x }).into())
            }
            SpawnShape::Sector { area } if area.radius.min() < 0.0 => Err(MathError::Negative {
                name: "sector radius",
                value: area.radius.min(),
            }
            .into()),
            _ => Ok(()),
        }
    }
}

/// Direction of a new particle's velocity.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Omni,
    Fixed { angle: f32 },
    Spread { angle: f32, half_spread: f32 },
    /// Away from the emitter, through the spawn point.
    Outward,
}

impl Direction {
    /// Unit vector for a particle spawned at `offset` from the emitter.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, offset: Vec2) -> Vec2 {
        match *self {
            Direction::Omni => random_direction(rng),
            Direction::Fixed { angle } => Vec2::from_angle(angle),
            Direction::Spread { angle, half_spread } => {
                random_direction_with_spread(rng, angle, half_spread)
            }
            Direction::Outward => offset
                .try_normalized()
                .unwrap_or_else(|_| random_direction(rng)),
        }
    }
}

/// Everything an [`Emitter`](super::emitter::Emitter) needs to know.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    pub schedule: Schedule,
    /// Emission window in seconds from creation. `None` emits until released.
    pub duration: Option<f32>,
    /// Live particle cap. Spawns over the cap wait until room frees up.
    pub max_particles: usize,
    pub shape: SpawnShape,
    pub direction: Direction,
    /// Initial speed, units per second.
    pub speed: Range,
    /// Seconds.
    pub lifespan: Range,
    pub color: ColorSource,
    /// Colour at death. `None` keeps the start colour.
    pub end_color: Option<Rgba>,
    pub size: SizeOverLife,
    pub easing: Easing,
    pub fields: Vec<Field>,
    /// Fixed RNG seed for reproducible emitters.
    pub seed: Option<u64>,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            schedule: Schedule::Rate { per_second: 10.0 },
            duration: None,
            max_particles: 1000,
            shape: SpawnShape::Point,
            direction: Direction::Omni,
            speed: Range::constant(5.0),
            lifespan: Range::constant(1.0),
            color: ColorSource::default(),
            end_color: None,
            size: SizeOverLife::default(),
            easing: Easing::Linear,
            fields: Vec::new(),
            seed: None,
        }
    }
}

impl EmitterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    // -- Builder pattern --

    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_rate(self, per_second: f32) -> Self {
        self.with_schedule(Schedule::Rate { per_second })
    }

    pub fn with_burst(self, count: u32) -> Self {
        self.with_schedule(Schedule::Burst { count })
    }

    pub fn with_duration(mut self, seconds: f32) -> Self {
        self.duration = Some(seconds);
        self
    }

    pub fn with_max_particles(mut self, max: usize) -> Self {
        self.max_particles = max;
        self
    }

    pub fn with_shape(mut self, shape: SpawnShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_speed(mut self, speed: Range) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_lifespan(mut self, lifespan: Range) -> Self {
        self.lifespan = lifespan;
        self
    }

    pub fn with_color(mut self, color: ColorSource) -> Self {
        self.color = color;
        self
    }

    pub fn with_end_color(mut self, color: Rgba) -> Self {
        self.end_color = Some(color);
        self
    }

    pub fn with_size(mut self, size: SizeOverLife) -> Self {
        self.size = size;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.schedule.validate()?;
        if let Some(duration) = self.duration {
            positive("duration", duration)?;
        }
        if self.max_particles == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.lifespan.min() < 0.0 {
            return Err(ConfigError::NegativeLifespan(self.lifespan.min()));
        }
        if let ColorSource::Palette { colors } = &self.color {
            if colors.is_empty() {
                return Err(ConfigError::EmptyPalette);
            }
        }
        self.shape.validate()?;
        match self.size {
            SizeOverLife::Fixed(size) => non_negative("size", size)?,
            SizeOverLife::Grow(range) | SizeOverLife::Shrink(range) => {
                non_negative("size", range.min())?
            }
        }
        for field in &self.fields {
            field.validate()?;
        }
        Ok(())
    }

    /// Parse and validate a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
