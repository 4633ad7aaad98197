//! Particles and the emitters that spawn them.
//!
//! An [`Emitter`] is an ordinary actor: put it in an
//! [`ActorList`](crate::core::actor_list::ActorList) next to other actors and
//! it spawns, moves and retires its own [`Particle`]s each frame.

pub mod color;
pub mod config;
pub mod emitter;
pub mod field;
pub mod particle;
pub mod presets;

use glam::Vec2;

pub use color::{ColorSource, Gradient, Rgba};
pub use config::{ConfigError, Direction, EmitterConfig, Schedule, SpawnShape, MIN_PERIOD};
pub use emitter::Emitter;
pub use field::Field;
pub use particle::{Particle, SizeOverLife};
pub use presets::EmitterPresets;

/// The only drawing a particle needs from a surface.
pub trait ParticleSurface {
    fn draw_particle(&mut self, position: Vec2, size: f32, color: Rgba);
}

/// Records draw calls, for headless capture and tests.
impl ParticleSurface for Vec<(Vec2, f32, Rgba)> {
    fn draw_particle(&mut self, position: Vec2, size: f32, color: Rgba) {
        self.push((position, size, color));
    }
}
