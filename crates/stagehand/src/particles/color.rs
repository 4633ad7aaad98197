//! Particle colours and how they are picked.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Linear RGBA, each channel in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Rgba {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const ORANGE: Self = Self::rgb(1.0, 0.5, 0.0);
    pub const YELLOW: Self = Self::rgb(1.0, 1.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const CYAN: Self = Self::rgb(0.0, 1.0, 1.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const MAGENTA: Self = Self::rgb(1.0, 0.0, 1.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// From `0xRRGGBB`.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::rgb(channel(16), channel(8), channel(0))
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Channel-wise blend, `t` clamped to [0, 1].
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Rgba::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }

    /// Perceived brightness, 0 to 1.
    pub fn luminance(&self) -> f32 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }

    /// Opaque colour with uniformly random channels.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::rgb(rng.random(), rng.random(), rng.random())
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Start and end colour of a particle's life.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    pub start: Rgba,
    pub end: Rgba,
}

impl Gradient {
    pub fn new(start: Rgba, end: Rgba) -> Self {
        Self { start, end }
    }

    pub fn solid(color: Rgba) -> Self {
        Self::new(color, color)
    }

    pub fn sample(&self, t: f32) -> Rgba {
        self.start.lerp(self.end, t)
    }
}

/// How an emitter picks the starting colour of each particle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColorSource {
    /// Every particle the same.
    Fixed { color: Rgba },
    /// Uniform pick from a list. Must not be empty.
    Palette { colors: Vec<Rgba> },
    /// A random point on the line between two colours.
    Blend { from: Rgba, to: Rgba },
    /// Random channels.
    Random,
}

impl Default for ColorSource {
    fn default() -> Self {
        ColorSource::Fixed { color: Rgba::WHITE }
    }
}

impl ColorSource {
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Rgba {
        match self {
            ColorSource::Fixed { color } => *color,
            ColorSource::Palette { colors } => {
                if colors.is_empty() {
                    Rgba::WHITE
                } else {
                    colors[rng.random_range(0..colors.len())]
                }
            }
            ColorSource::Blend { from, to } => from.lerp(*to, rng.random()),
            ColorSource::Random => Rgba::random(rng),
        }
    }
}
