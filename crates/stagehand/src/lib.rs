pub mod api;
pub mod core;
pub mod math;
pub mod particles;

// Re-export key types at crate root for convenience
pub use api::error::GameError;
pub use api::game::{Context, FrameStats, Game, GameConfig};
pub use api::runner::{GameRunner, Platform};
pub use self::core::actor::{Actor, Draw, DynActor, Lifecycle};
pub use self::core::actor_list::{ActorList, Spawner};
pub use self::core::state::{GameWithStates, State, StateContext};
pub use self::core::time::{sanitize_delta, FixedClock, SystemClock, TimeSource};
pub use math::{Easing, MathError, Polar2, PolarRange, Range, Vector2, Vector3, VectorExt};
pub use particles::{
    ColorSource, ConfigError, Direction, Emitter, EmitterConfig, EmitterPresets, Field, Gradient,
    Particle, ParticleSurface, Rgba, Schedule, SizeOverLife, SpawnShape,
};
