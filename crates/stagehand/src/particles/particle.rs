use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::color::{Gradient, Rgba};
use super::ParticleSurface;
use crate::core::actor::{Actor, Draw, Lifecycle};
use crate::math::{Easing, Range};

/// How a particle's size changes over its life.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeOverLife {
    Fixed(f32),
    /// From `min` at birth to `max` at death.
    Grow(Range),
    /// From `max` at birth to `min` at death.
    Shrink(Range),
}

impl SizeOverLife {
    /// Size at life fraction `t`.
    pub fn at(&self, t: f32) -> f32 {
        match self {
            SizeOverLife::Fixed(size) => *size,
            SizeOverLife::Grow(range) => range.lerp_clamped(t),
            SizeOverLife::Shrink(range) => range.lerp_clamped(1.0 - t),
        }
    }
}

impl Default for SizeOverLife {
    fn default() -> Self {
        SizeOverLife::Fixed(1.0)
    }
}

/// A single short-lived particle.
#[derive(Debug, Clone)]
pub struct Particle {
    life: Lifecycle,
    pub position: Vec2,
    pub velocity: Vec2,
    lifespan: f32,
    remaining: f32,
    colors: Gradient,
    sizes: SizeOverLife,
    easing: Easing,
    size: f32,
    color: Rgba,
}

impl Particle {
    /// A white particle of size 1. A negative lifespan counts as 0.
    pub fn new(position: Vec2, velocity: Vec2, lifespan: f32) -> Self {
        let lifespan = lifespan.max(0.0);
        let sizes = SizeOverLife::default();
        let colors = Gradient::solid(Rgba::WHITE);
        Self {
            life: Lifecycle::new(),
            position,
            velocity,
            lifespan,
            remaining: lifespan,
            colors,
            sizes,
            easing: Easing::Linear,
            size: sizes.at(0.0),
            color: colors.start,
        }
    }

    pub fn with_colors(mut self, colors: Gradient) -> Self {
        self.colors = colors;
        self.refresh_visuals();
        self
    }

    pub fn with_size(mut self, sizes: SizeOverLife) -> Self {
        self.sizes = sizes;
        self.refresh_visuals();
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self.refresh_visuals();
        self
    }

    pub fn lifespan(&self) -> f32 {
        self.lifespan
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// How far through its life the particle is, 0 at birth and 1 at death.
    pub fn life_fraction(&self) -> f32 {
        if self.lifespan > 0.0 {
            1.0 - self.remaining / self.lifespan
        } else {
            1.0
        }
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    fn refresh_visuals(&mut self) {
        let t = self.easing.apply(self.life_fraction());
        self.size = self.sizes.at(t);
        self.color = self.colors.sample(t);
    }
}

impl Actor for Particle {
    fn lifecycle(&self) -> &Lifecycle {
        &self.life
    }

    fn lifecycle_mut(&mut self) -> &mut Lifecycle {
        &mut self.life
    }

    fn update(&mut self, dt: f32) -> anyhow::Result<()> {
        self.life.advance(dt);
        self.position += self.velocity * dt;
        self.remaining = (self.remaining - dt).max(0.0);
        self.refresh_visuals();
        if self.remaining <= 0.0 {
            self.life.kill();
        }
        Ok(())
    }
}

impl<S: ParticleSurface + ?Sized> Draw<S> for Particle {
    fn draw(&self, surface: &mut S) -> anyhow::Result<()> {
        surface.draw_particle(self.position, self.size, self.color);
        Ok(())
    }
}
