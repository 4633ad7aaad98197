//! Headless fireworks show driven by stagehand's state machine.
//!
//! ```text
//! stagehand-demo [--frames N] [--fixed] [--show] [--presets PATH]
//! ```

mod host;
mod show;

use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{bail, Context as _};
use glam::Vec2;
use log::info;
use stagehand::{
    EmitterPresets, FixedClock, GameConfig, GameRunner, GameWithStates, SystemClock, TimeSource,
};

use host::{AsciiSurface, HeadlessHost};
use show::Countdown;

const DEFAULT_PRESETS: &str = include_str!("../assets/presets.json");
const GRID: (usize, usize) = (80, 20);
const WORLD: Vec2 = Vec2::new(80.0, 40.0);
const FPS: f32 = 30.0;

#[derive(Debug, Default, PartialEq)]
struct Args {
    frames: Option<u64>,
    fixed: bool,
    show: bool,
    presets: Option<PathBuf>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Args> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--frames" => {
                let value = args.next().context("--frames needs a number")?;
                let frames = value
                    .parse()
                    .with_context(|| format!("--frames: '{value}' is not a number"))?;
                parsed.frames = Some(frames);
            }
            "--fixed" => parsed.fixed = true,
            "--show" => parsed.show = true,
            "--presets" => {
                let path = args.next().context("--presets needs a path")?;
                parsed.presets = Some(PathBuf::from(path));
            }
            other => bail!("unknown argument '{other}'"),
        }
    }
    Ok(parsed)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args(std::env::args().skip(1))?;

    let json = match &args.presets {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading presets from {}", path.display()))?,
        None => DEFAULT_PRESETS.to_string(),
    };
    let presets = Rc::new(EmitterPresets::from_json(&json)?);
    info!("{} presets: {}", presets.len(), presets.names().join(", "));

    let mut config = GameConfig::default()
        .with_title("fireworks")
        .with_max_frame_dt(0.1)
        .with_stats_interval(2.0);
    if let Some(frames) = args.frames {
        config = config.with_max_frames(frames);
    }

    let game: GameWithStates<AsciiSurface> = GameWithStates::new()
        .with_config(config)
        .with_initial(Countdown::new(3.0, presets, WORLD));

    let clock: Box<dyn TimeSource> = if args.fixed {
        Box::new(FixedClock::from_fps(FPS))
    } else {
        Box::new(SystemClock::new())
    };
    let mut host = HeadlessHost::new(clock, AsciiSurface::new(GRID.0, GRID.1, WORLD));
    if !args.fixed {
        host = host.with_target_fps(FPS);
    }
    if args.show {
        host = host.with_show_every(FPS as u64 / 3);
    }

    let mut runner = GameRunner::new(game, host);
    runner.run()?;

    let stats = runner.context().stats();
    info!(
        "done: {} frames presented, {:.2}s of show time ({:.1} fps)",
        runner.platform().frames(),
        stats.elapsed,
        stats.fps()
    );
    Ok(())
}
