use log::{debug, info};

use super::game::{Context, Game};
use crate::core::time::sanitize_delta;

/// The toolkit boundary: time, input quit signal and the surface.
pub trait Platform {
    type Surface: ?Sized;

    /// Seconds since the previous call.
    fn frame_delta(&mut self) -> f32;

    /// Polled once per frame.
    fn quit_requested(&mut self) -> bool;

    fn surface(&mut self) -> &mut Self::Surface;

    /// Show the frame drawn onto the surface.
    fn present(&mut self) -> anyhow::Result<()>;
}

/// Generic game runner that wires a [`Game`] to a [`Platform`].
pub struct GameRunner<G, P> {
    game: G,
    platform: P,
    ctx: Context,
    initialized: bool,
    next_stats_at: f64,
}

impl<G, P> GameRunner<G, P>
where
    P: Platform,
    G: Game<P::Surface>,
{
    pub fn new(game: G, platform: P) -> Self {
        let config = game.config();
        let next_stats_at = config.stats_interval as f64;
        Self {
            game,
            platform,
            ctx: Context::new(config),
            initialized: false,
            next_stats_at,
        }
    }

    /// Initialize the game. Called by `run` if not done already.
    pub fn init(&mut self) -> anyhow::Result<()> {
        debug!("runner: init '{}'", self.ctx.config().title);
        self.game.init(&mut self.ctx)?;
        self.initialized = true;
        Ok(())
    }

    /// One frame: delta, quit poll, update, draw, present.
    pub fn run_frame(&mut self) -> anyhow::Result<()> {
        if !self.initialized {
            self.init()?;
        }

        let dt = sanitize_delta(self.platform.frame_delta(), self.ctx.config().max_frame_dt);
        if self.platform.quit_requested() {
            debug!("runner: quit requested by platform");
            self.ctx.quit();
        }

        self.game.update(&mut self.ctx, dt)?;
        self.game.draw(self.platform.surface())?;
        self.platform.present()?;

        self.ctx.stats_mut().record(dt);
        self.log_stats();

        if let Some(max) = self.ctx.config().max_frames {
            if self.ctx.stats().frames >= max {
                self.ctx.quit();
            }
        }
        Ok(())
    }

    /// Loop until the quit flag is set, checked at the top of each frame.
    /// The first platform delta is discarded so startup time does not land
    /// in frame one.
    pub fn run(&mut self) -> anyhow::Result<()> {
        if !self.initialized {
            self.init()?;
        }
        self.platform.frame_delta();
        debug!("runner: loop start");
        while !self.ctx.should_quit() {
            self.run_frame()?;
        }
        let stats = self.ctx.stats();
        debug!(
            "runner: stopped after {} frames, {:.2}s",
            stats.frames, stats.elapsed
        );
        Ok(())
    }

    fn log_stats(&mut self) {
        let interval = self.ctx.config().stats_interval as f64;
        if interval <= 0.0 {
            return;
        }
        let stats = *self.ctx.stats();
        if stats.elapsed >= self.next_stats_at {
            info!(
                "{}: {} frames, {:.1}s, {:.1} fps",
                self.ctx.config().title,
                stats.frames,
                stats.elapsed,
                stats.fps()
            );
            while self.next_stats_at <= stats.elapsed {
                self.next_stats_at += interval;
            }
        }
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.ctx
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn into_parts(self) -> (G, P) {
        (self.game, self.platform)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::api::game::GameConfig;
    use crate::core::time::{FixedClock, TimeSource};
    use std::collections::VecDeque;

    /// Scripted platform recording what was presented.
    pub(crate) struct ScriptedPlatform {
        pub deltas: VecDeque<f32>,
        pub fallback: FixedClock,
        pub quit_at_frame: Option<usize>,
        pub frames: usize,
        pub surface: Vec<String>,
        pub presented: Vec<Vec<String>>,
    }

    impl ScriptedPlatform {
        pub fn new(deltas: &[f32]) -> Self {
            Self {
                deltas: deltas.iter().copied().collect(),
                fallback: FixedClock::new(0.1),
                quit_at_frame: None,
                frames: 0,
                surface: Vec::new(),
                presented: Vec::new(),
            }
        }
    }

    impl Platform for ScriptedPlatform {
        type Surface = Vec<String>;

        fn frame_delta(&mut self) -> f32 {
            match self.deltas.pop_front() {
                Some(dt) => dt,
                None => self.fallback.delta(),
            }
        }

        fn quit_requested(&mut self) -> bool {
            self.quit_at_frame == Some(self.frames)
        }

        fn surface(&mut self) -> &mut Vec<String> {
            &mut self.surface
        }

        fn present(&mut self) -> anyhow::Result<()> {
            self.frames += 1;
            self.presented.push(std::mem::take(&mut self.surface));
            Ok(())
        }
    }

    #[derive(Default)]
    struct Recorder {
        config: GameConfig,
        deltas: Vec<f32>,
        inits: u32,
        fail_after: Option<usize>,
        quit_after: Option<usize>,
    }

    impl Game<Vec<String>> for Recorder {
        fn config(&self) -> GameConfig {
            self.config.clone()
        }

        fn init(&mut self, _ctx: &mut Context) -> anyhow::Result<()> {
            self.inits += 1;
            Ok(())
        }

        fn update(&mut self, ctx: &mut Context, dt: f32) -> anyhow::Result<()> {
            self.deltas.push(dt);
            if self.fail_after == Some(self.deltas.len()) {
                anyhow::bail!("boom at {}", self.deltas.len());
            }
            if self.quit_after == Some(self.deltas.len()) {
                ctx.quit();
            }
            Ok(())
        }

        fn draw(&self, surface: &mut Vec<String>) -> anyhow::Result<()> {
            surface.push(format!("frame {}", self.deltas.len()));
            Ok(())
        }
    }

    #[test]
    fn run_discards_first_delta_and_stops_on_quit() {
        let game = Recorder {
            quit_after: Some(3),
            ..Default::default()
        };
        let platform = ScriptedPlatform::new(&[9.0, 0.1, 0.2, 0.3, 0.4]);
        let mut runner = GameRunner::new(game, platform);
        runner.run().unwrap();

        assert_eq!(runner.game().inits, 1);
        assert_eq!(runner.game().deltas, [0.1, 0.2, 0.3]);
        // The quitting frame still draws and presents.
        assert_eq!(
            runner.platform().presented,
            [vec!["frame 1"], vec!["frame 2"], vec!["frame 3"]]
        );
        assert_eq!(runner.context().stats().frames, 3);
    }

    #[test]
    fn negative_delta_reaches_game_as_zero() {
        let mut runner = GameRunner::new(Recorder::default(), ScriptedPlatform::new(&[-1.0]));
        runner.run_frame().unwrap();
        assert_eq!(runner.game().deltas, [0.0]);
    }

    #[test]
    fn max_frame_dt_caps() {
        let game = Recorder {
            config: GameConfig::default().with_max_frame_dt(0.05),
            ..Default::default()
        };
        let mut runner = GameRunner::new(game, ScriptedPlatform::new(&[1.0]));
        runner.run_frame().unwrap();
        assert_eq!(runner.game().deltas, [0.05]);
    }

    #[test]
    fn max_frames_ends_headless_run() {
        let game = Recorder {
            config: GameConfig::default().with_max_frames(4),
            ..Default::default()
        };
        let mut runner = GameRunner::new(game, ScriptedPlatform::new(&[]));
        runner.run().unwrap();
        assert_eq!(runner.game().deltas.len(), 4);
    }

    #[test]
    fn platform_quit_finishes_current_frame() {
        let mut platform = ScriptedPlatform::new(&[]);
        platform.quit_at_frame = Some(1);
        let mut runner = GameRunner::new(Recorder::default(), platform);
        runner.run().unwrap();
        assert_eq!(runner.game().deltas.len(), 2);
    }

    #[test]
    fn game_error_propagates_unmodified() {
        let game = Recorder {
            fail_after: Some(2),
            ..Default::default()
        };
        let mut runner = GameRunner::new(game, ScriptedPlatform::new(&[]));
        let err = runner.run().unwrap_err();
        assert_eq!(err.to_string(), "boom at 2");
        assert_eq!(runner.platform().presented.len(), 1);
    }
}
