use glam::Vec2;
use log::{debug, trace, warn};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::color::Gradient;
use super::config::{ConfigError, EmitterConfig, Schedule};
use super::particle::Particle;
use super::ParticleSurface;
use crate::core::actor::{Actor, Draw, Lifecycle};
use crate::core::actor_list::ActorList;

/// An actor that spawns, owns and updates a population of particles.
///
/// Emission runs on the configured [`Schedule`] within the optional
/// duration window. Once emission is complete (window over, burst fired, or
/// [`Emitter::release`] called) and the last particle has expired, the
/// emitter kills itself so its owning list sweeps it.
#[derive(Debug)]
pub struct Emitter {
    life: Lifecycle,
    config: EmitterConfig,
    pub position: Vec2,
    particles: ActorList<Particle>,
    rng: Pcg32,
    /// Particles due but not yet spawned, with fractional carry-over.
    owed: f32,
    paused: bool,
    released: bool,
    burst_fired: bool,
    /// Seconds until the next pulse or interval spawn.
    countdown: f32,
    saturated: bool,
    spawned: u64,
}

impl Emitter {
    pub fn new(config: EmitterConfig, position: Vec2) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        debug!("emitter: created at {position} ({:?}, seed {seed})", config.schedule);
        Ok(Self {
            life: Lifecycle::new(),
            particles: ActorList::with_capacity(config.max_particles.min(4096)),
            config,
            position,
            rng: Pcg32::seed_from_u64(seed),
            owed: 0.0,
            paused: false,
            released: false,
            burst_fired: false,
            countdown: 0.0,
            saturated: false,
            spawned: 0,
        })
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    pub fn particles(&self) -> &ActorList<Particle> {
        &self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.count()
    }

    /// Particles generated but not yet spawned.
    pub fn owed(&self) -> f32 {
        self.owed
    }

    /// Total particles spawned so far.
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    pub fn is_saturated(&self) -> bool {
        self.saturated
    }

    /// Pause emission. Live particles keep moving.
    pub fn stop(&mut self) {
        self.paused = true;
    }

    /// Resume after [`Emitter::stop`].
    pub fn start(&mut self) {
        self.paused = false;
    }

    pub fn is_emitting(&self) -> bool {
        !self.paused && !self.emission_complete()
    }

    /// End emission for good; the emitter dies once its particles expire.
    pub fn release(&mut self) {
        if !self.released {
            debug!("emitter: released after {:.2}s", self.life.age());
        }
        self.released = true;
        self.owed = 0.0;
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// The schedule will produce nothing more.
    pub fn emission_complete(&self) -> bool {
        if self.released {
            return true;
        }
        let exhausted = match self.config.schedule {
            Schedule::Burst { .. } => self.burst_fired,
            _ => self
                .config
                .duration
                .is_some_and(|duration| self.life.age() >= duration),
        };
        exhausted && self.owed < 1.0
    }

    /// Seconds of `dt` that fall inside the emission window, given the age
    /// before this frame.
    fn window(&self, age_before: f32, dt: f32) -> f32 {
        match self.config.duration {
            Some(duration) => (age_before + dt).min(duration) - age_before.min(duration),
            None => dt,
        }
    }

    fn generate(&mut self, dt: f32) {
        let cap = self.config.max_particles as f32;
        match self.config.schedule {
            Schedule::Rate { per_second } => {
                self.owed += per_second * dt;
            }
            Schedule::Burst { count } => {
                if !self.burst_fired {
                    self.burst_fired = true;
                    self.owed += count as f32;
                }
            }
            Schedule::Pulse { count, interval } => {
                self.countdown -= dt;
                if self.countdown <= 0.0 {
                    let fires = (-self.countdown / interval).floor() + 1.0;
                    self.owed = (self.owed + fires * count as f32).min(cap);
                    self.countdown += fires * interval;
                    if self.countdown <= 0.0 {
                        self.countdown = interval;
                    }
                }
            }
            Schedule::Interval { delay } => {
                self.countdown -= dt;
                while self.countdown <= 0.0 && self.owed < cap {
                    self.owed += 1.0;
                    let before = self.countdown;
                    self.countdown += delay.sample(&mut self.rng);
                    if self.countdown == before {
                        break;
                    }
                }
                // Backlog past capacity is dropped, not queued.
                if self.countdown <= 0.0 {
                    self.countdown = delay.sample(&mut self.rng);
                }
            }
        }
    }

    fn spawn_owed(&mut self) {
        let max = self.config.max_particles;
        let mut spawned = 0;
        while self.owed >= 1.0 {
            if self.particles.count() >= max {
                if !self.saturated {
                    warn!("emitter: at capacity ({max} particles), holding spawns");
                    self.saturated = true;
                }
                break;
            }
            let particle = self.sample_particle();
            self.particles.add(particle);
            self.owed -= 1.0;
            spawned += 1;
        }
        if self.owed < 1.0 {
            self.saturated = false;
        }
        self.owed = self.owed.min(max as f32);
        self.spawned += spawned;
        if spawned > 0 {
            trace!("emitter: spawned {spawned}, {} live", self.particles.count());
        }
    }

    fn sample_particle(&mut self) -> Particle {
        let config = &self.config;
        let rng = &mut self.rng;
        let offset = config.shape.sample(rng);
        let velocity = config.direction.sample(rng, offset) * config.speed.sample(rng);
        let lifespan = config.lifespan.sample(rng);
        let start = config.color.pick(rng);
        let end = config.end_color.unwrap_or(start);
        Particle::new(self.position + offset, velocity, lifespan)
            .with_colors(Gradient::new(start, end))
            .with_size(config.size)
            .with_easing(config.easing)
    }
}

impl Actor for Emitter {
    fn lifecycle(&self) -> &Lifecycle {
        &self.life
    }

    fn lifecycle_mut(&mut self) -> &mut Lifecycle {
        &mut self.life
    }

    fn update(&mut self, dt: f32) -> anyhow::Result<()> {
        let age_before = self.life.age();
        self.life.advance(dt);

        if !self.paused && !self.released {
            let window = self.window(age_before, dt);
            if window > 0.0 || matches!(self.config.schedule, Schedule::Burst { .. }) {
                self.generate(window);
            }
            self.spawn_owed();
        }

        if !self.config.fields.is_empty() {
            for particle in self.particles.iter_mut() {
                for field in &self.config.fields {
                    field.apply(particle, dt, &mut self.rng);
                }
            }
        }
        self.particles.update(dt)?;

        if self.emission_complete() && self.particles.is_empty() {
            debug!(
                "emitter: finished after {:.2}s, {} particles",
                self.life.age(),
                self.spawned
            );
            self.life.kill();
        }
        Ok(())
    }

    /// Ends the emitter now, dropping its particles.
    fn kill(&mut self) {
        self.life.kill();
        self.particles.clear();
    }
}

impl<S: ParticleSurface + ?Sized> Draw<S> for Emitter {
    fn draw(&self, surface: &mut S) -> anyhow::Result<()> {
        self.particles.draw(surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Range;
    use crate::particles::color::{ColorSource, Rgba};
    use crate::particles::config::MIN_PERIOD;
    use proptest::prelude::*;

    fn emitter(config: EmitterConfig) -> Emitter {
        Emitter::new(config.with_seed(42), Vec2::ZERO).unwrap()
    }

    #[test]
    fn rate_accumulates_fractions() {
        let mut e = emitter(EmitterConfig::new().with_rate(2.0));
        // Half a particle per frame.
        let counts: Vec<u64> = (0..5)
            .map(|_| {
                e.update(0.25).unwrap();
                e.spawned()
            })
            .collect();
        assert_eq!(counts, [0, 1, 1, 2, 2]);
    }

    #[test]
    fn burst_fires_once() {
        let mut e = emitter(EmitterConfig::new().with_burst(10));
        e.update(0.016).unwrap();
        assert_eq!(e.spawned(), 10);
        e.update(0.016).unwrap();
        assert_eq!(e.spawned(), 10);
    }

    #[test]
    fn pulse_repeats() {
        let mut e = emitter(EmitterConfig::new().with_schedule(Schedule::Pulse {
            count: 5,
            interval: 1.0,
        }));
        e.update(0.5).unwrap();
        assert_eq!(e.spawned(), 5);
        e.update(0.4).unwrap();
        assert_eq!(e.spawned(), 5);
        e.update(0.2).unwrap();
        assert_eq!(e.spawned(), 10);
    }

    #[test]
    fn interval_spawns_one_per_delay() {
        let mut e = emitter(EmitterConfig::new().with_schedule(Schedule::Interval {
            delay: Range::constant(0.25),
        }));
        e.update(1.0).unwrap();
        // Immediately, then at 0.25, 0.5, 0.75 and 1.0.
        assert_eq!(e.spawned(), 5);
    }

    #[test]
    fn long_frame_at_minimum_period_is_bounded() {
        let pulse = Schedule::Pulse {
            count: 3,
            interval: MIN_PERIOD,
        };
        let interval = Schedule::Interval {
            delay: Range::constant(MIN_PERIOD),
        };
        for schedule in [pulse, interval] {
            let mut e = emitter(
                EmitterConfig::new()
                    .with_schedule(schedule)
                    .with_max_particles(100)
                    .with_lifespan(Range::constant(1e6)),
            );
            e.update(1e4).unwrap();
            assert_eq!(e.spawned(), 100, "{schedule:?}");
            assert!(e.owed() <= 100.0);
            e.update(1.0).unwrap();
            assert_eq!(e.particle_count(), 100);
        }
    }

    #[test]
    fn tiny_period_rejected() {
        let config = EmitterConfig::new().with_schedule(Schedule::Pulse {
            count: 1,
            interval: 1e-10,
        });
        assert!(matches!(
            Emitter::new(config, Vec2::ZERO),
            Err(ConfigError::PeriodTooShort { .. })
        ));
    }

    #[test]
    fn duration_limits_emission_window() {
        let mut e = emitter(
            EmitterConfig::new()
                .with_rate(10.0)
                .with_duration(1.0)
                .with_lifespan(Range::constant(1.0)),
        );
        e.update(0.75).unwrap();
        e.update(0.75).unwrap();
        assert_eq!(e.spawned(), 10);
        assert!(!e.is_emitting());
        assert!(e.is_alive());
        // Let the last particles expire; the emitter dies with them.
        e.update(0.75).unwrap();
        assert_eq!(e.particle_count(), 0);
        assert!(!e.is_alive());
    }

    #[test]
    fn capacity_holds_spawns_until_room() {
        let mut e = emitter(
            EmitterConfig::new()
                .with_burst(10)
                .with_max_particles(4)
                .with_lifespan(Range::constant(1.0)),
        );
        e.update(0.1).unwrap();
        assert_eq!(e.particle_count(), 4);
        assert!(e.is_saturated());
        assert_eq!(e.owed(), 4.0);
        assert!(!e.emission_complete());

        // Particles expire, the held spawns go out.
        e.update(1.0).unwrap();
        assert_eq!(e.particle_count(), 0);
        e.update(0.1).unwrap();
        assert_eq!(e.spawned(), 8);
        assert_eq!(e.owed(), 0.0);
        assert!(!e.is_saturated());
    }

    #[test]
    fn stop_and_start() {
        let mut e = emitter(EmitterConfig::new().with_rate(10.0));
        e.stop();
        e.update(1.0).unwrap();
        assert_eq!(e.spawned(), 0);
        assert!(e.is_alive());
        e.start();
        e.update(1.0).unwrap();
        assert_eq!(e.spawned(), 10);
    }

    #[test]
    fn release_lets_particles_finish() {
        let mut e = emitter(
            EmitterConfig::new()
                .with_rate(100.0)
                .with_lifespan(Range::constant(0.5)),
        );
        e.update(0.1).unwrap();
        let live = e.particle_count();
        assert!(live > 0);
        e.release();
        e.update(0.1).unwrap();
        assert_eq!(e.particle_count(), live);
        assert!(e.is_alive());
        e.update(0.5).unwrap();
        assert!(!e.is_alive());
    }

    #[test]
    fn kill_drops_particles() {
        let mut e = emitter(EmitterConfig::new().with_burst(3));
        e.update(0.1).unwrap();
        e.kill();
        assert!(!e.is_alive());
        assert_eq!(e.particle_count(), 0);
    }

    #[test]
    fn spawned_particles_use_config() {
        let config = EmitterConfig::new()
            .with_burst(20)
            .with_speed(Range::new(2.0, 3.0).unwrap())
            .with_lifespan(Range::new(1.0, 2.0).unwrap())
            .with_color(ColorSource::Fixed { color: Rgba::RED })
            .with_end_color(Rgba::BLUE);
        let mut e = Emitter::new(config.with_seed(1), Vec2::new(50.0, 50.0)).unwrap();
        e.update(0.0).unwrap();
        assert_eq!(e.particle_count(), 20);
        for p in e.particles().iter() {
            let speed = p.velocity.length();
            assert!((2.0 - 1e-4..=3.0 + 1e-4).contains(&speed), "speed {speed}");
            assert!((1.0..=2.0).contains(&p.lifespan()));
            assert_eq!(p.position, Vec2::new(50.0, 50.0));
            assert_eq!(p.color(), Rgba::RED);
        }
    }

    #[test]
    fn draws_live_particles() {
        let mut e = emitter(EmitterConfig::new().with_burst(3));
        e.update(0.1).unwrap();
        let mut drawn: Vec<(Vec2, f32, Rgba)> = Vec::new();
        e.draw(&mut drawn).unwrap();
        assert_eq!(drawn.len(), 3);
    }

    #[test]
    fn invalid_config_rejected() {
        assert!(Emitter::new(EmitterConfig::new().with_max_particles(0), Vec2::ZERO).is_err());
    }

    proptest! {
        #[test]
        fn spawn_count_is_frame_rate_independent(
            rate in 1.0f32..200.0,
            steps in prop::collection::vec(0.0f32..0.1, 1..300),
        ) {
            let mut e = emitter(
                EmitterConfig::new()
                    .with_rate(rate)
                    .with_max_particles(usize::MAX >> 1)
                    .with_lifespan(Range::constant(0.01)),
            );
            let mut total = 0.0f64;
            for dt in &steps {
                e.update(*dt).unwrap();
                total += *dt as f64;
            }
            let expected = (rate as f64 * total).floor();
            let spawned = e.spawned() as f64;
            prop_assert!(
                (spawned - expected).abs() <= 1.0,
                "spawned {} expected {}", spawned, expected
            );
        }
    }
}
