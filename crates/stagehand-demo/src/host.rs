use std::thread;
use std::time::{Duration, Instant};

use glam::Vec2;
use stagehand::{Platform, ParticleSurface, Rgba, TimeSource};

/// Brightness ramp, dimmest first.
const RAMP: &[u8] = b" .:-=+*#%@";

/// A character grid particles are rasterized into. World coordinates run
/// from (0, 0) bottom left to `world` top right.
pub struct AsciiSurface {
    width: usize,
    height: usize,
    world: Vec2,
    cells: Vec<u8>,
    plotted: usize,
}

impl AsciiSurface {
    pub fn new(width: usize, height: usize, world: Vec2) -> Self {
        Self {
            width,
            height,
            world,
            cells: vec![b' '; width * height],
            plotted: 0,
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(b' ');
        self.plotted = 0;
    }

    /// Particles drawn since the last clear, including off-grid ones.
    pub fn plotted(&self) -> usize {
        self.plotted
    }

    fn cell(&self, position: Vec2) -> Option<usize> {
        if self.cells.is_empty() {
            return None;
        }
        let u = position.x / self.world.x;
        let v = 1.0 - position.y / self.world.y;
        if !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
            return None;
        }
        let col = ((u * self.width as f32) as usize).min(self.width - 1);
        let row = ((v * self.height as f32) as usize).min(self.height - 1);
        Some(row * self.width + col)
    }

    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.cells.chunks(self.width.max(1)) {
            out.extend(row.iter().map(|&b| b as char));
            out.push('\n');
        }
        out
    }
}

impl ParticleSurface for AsciiSurface {
    fn draw_particle(&mut self, position: Vec2, size: f32, color: Rgba) {
        self.plotted += 1;
        let Some(index) = self.cell(position) else {
            return;
        };
        let brightness = (color.luminance() * color.a * size.min(2.0) / 2.0).clamp(0.0, 1.0);
        let level = 1 + (brightness * (RAMP.len() - 2) as f32).round() as usize;
        let glyph = RAMP[level.min(RAMP.len() - 1)];
        // Brighter particles win a shared cell.
        let current = RAMP.iter().position(|&g| g == self.cells[index]).unwrap_or(0);
        if level > current {
            self.cells[index] = glyph;
        }
    }
}

/// Terminal-less platform: a time source, an ASCII surface and optional
/// printing of every n-th frame.
pub struct HeadlessHost {
    clock: Box<dyn TimeSource>,
    surface: AsciiSurface,
    show_every: Option<u64>,
    /// Real-time pacing; `None` runs as fast as possible.
    frame_budget: Option<Duration>,
    frame_start: Instant,
    frames: u64,
}

impl HeadlessHost {
    pub fn new(clock: Box<dyn TimeSource>, surface: AsciiSurface) -> Self {
        Self {
            clock,
            surface,
            show_every: None,
            frame_budget: None,
            frame_start: Instant::now(),
            frames: 0,
        }
    }

    pub fn with_show_every(mut self, frames: u64) -> Self {
        self.show_every = Some(frames.max(1));
        self
    }

    pub fn with_target_fps(mut self, fps: f32) -> Self {
        self.frame_budget = Some(Duration::from_secs_f32(1.0 / fps));
        self
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Platform for HeadlessHost {
    type Surface = AsciiSurface;

    fn frame_delta(&mut self) -> f32 {
        self.clock.delta()
    }

    fn quit_requested(&mut self) -> bool {
        false
    }

    fn surface(&mut self) -> &mut AsciiSurface {
        &mut self.surface
    }

    fn present(&mut self) -> anyhow::Result<()> {
        self.frames += 1;
        if let Some(every) = self.show_every {
            if self.frames % every == 0 {
                println!(
                    "--- frame {} ({} particles)\n{}",
                    self.frames,
                    self.surface.plotted(),
                    self.surface.render()
                );
            }
        }
        self.surface.clear();

        if let Some(budget) = self.frame_budget {
            let spent = self.frame_start.elapsed();
            if spent < budget {
                thread::sleep(budget - spent);
            }
        }
        self.frame_start = Instant::now();
        Ok(())
    }
}
