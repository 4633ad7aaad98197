use std::time::Instant;

use log::warn;

/// Supplies the seconds elapsed since the previous call.
pub trait TimeSource {
    fn delta(&mut self) -> f32;
}

/// Wall clock. The first call reports 0.
#[derive(Debug, Default)]
pub struct SystemClock {
    last: Option<Instant>,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { last: None }
    }
}

impl TimeSource for SystemClock {
    fn delta(&mut self) -> f32 {
        let now = Instant::now();
        let dt = match self.last {
            Some(last) => now.duration_since(last).as_secs_f32(),
            None => 0.0,
        };
        self.last = Some(now);
        dt
    }
}

/// Constant delta per call, for deterministic runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    dt: f32,
}

impl FixedClock {
    pub fn new(dt: f32) -> Self {
        Self { dt }
    }

    /// A clock ticking at `fps` frames per second.
    pub fn from_fps(fps: f32) -> Self {
        Self::new(1.0 / fps)
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }
}

impl TimeSource for FixedClock {
    fn delta(&mut self) -> f32 {
        self.dt
    }
}

/// Make a frame delta safe to integrate with: negatives (a clock going
/// backwards) and NaN become 0, and `max` caps long frames when set.
pub fn sanitize_delta(dt: f32, max: Option<f32>) -> f32 {
    if dt.is_nan() || dt < 0.0 {
        warn!("frame delta {dt} clamped to 0");
        return 0.0;
    }
    match max {
        Some(max) => dt.min(max),
        None => dt,
    }
}
