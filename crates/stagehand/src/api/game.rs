use serde::{Deserialize, Serialize};

/// Configuration for the frame loop, provided by the game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Window or log title.
    pub title: String,
    /// Cap on a single frame delta in seconds. `None` passes deltas through.
    pub max_frame_dt: Option<f32>,
    /// Quit after this many frames. Headless runs.
    pub max_frames: Option<u64>,
    /// Seconds between frame statistics log lines. 0 disables them.
    pub stats_interval: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "stagehand".to_string(),
            max_frame_dt: None,
            max_frames: None,
            stats_interval: 5.0,
        }
    }
}

impl GameConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_max_frame_dt(mut self, max: f32) -> Self {
        self.max_frame_dt = Some(max);
        self
    }

    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    pub fn with_stats_interval(mut self, seconds: f32) -> Self {
        self.stats_interval = seconds;
        self
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Running totals kept by the runner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    /// Completed frames.
    pub frames: u64,
    /// Seconds of game time, the sum of all deltas.
    pub elapsed: f64,
    /// Delta of the most recent frame.
    pub last_dt: f32,
}

impl FrameStats {
    /// Average frames per second over the whole run.
    pub fn fps(&self) -> f64 {
        if self.elapsed > 0.0 {
            self.frames as f64 / self.elapsed
        } else {
            0.0
        }
    }

    pub(crate) fn record(&mut self, dt: f32) {
        self.frames += 1;
        self.elapsed += dt as f64;
        self.last_dt = dt;
    }
}

/// Per-game shared state, created by the runner and passed into every hook.
#[derive(Debug, Clone, Default)]
pub struct Context {
    config: GameConfig,
    quit: bool,
    stats: FrameStats,
}

impl Context {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            quit: false,
            stats: FrameStats::default(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Ask the loop to stop. Takes effect at the top of the next iteration.
    pub fn quit(&mut self) {
        self.quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    pub(crate) fn stats_mut(&mut self) -> &mut FrameStats {
        &mut self.stats
    }
}

/// The contract every game fulfills. `S` is the surface drawn on.
pub trait Game<S: ?Sized> {
    /// Loop configuration. Called once, before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup before the first frame.
    fn init(&mut self, _ctx: &mut Context) -> anyhow::Result<()> {
        Ok(())
    }

    /// Advance the game by `dt` seconds.
    fn update(&mut self, ctx: &mut Context, dt: f32) -> anyhow::Result<()>;

    /// Read-only render pass.
    fn draw(&self, _surface: &mut S) -> anyhow::Result<()> {
        Ok(())
    }
}
