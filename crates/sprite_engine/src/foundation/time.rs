//! Time management utilities
//!
//! The host loop owns frame pacing; these helpers track per-frame deltas
//! and accumulate fixed-size physics steps.

use std::time::Instant;

/// High-precision timer for frame timing
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Total elapsed time since timer creation in seconds
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Number of frames observed so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Fixed-timestep accumulator for physics updates
///
/// Feed it the frame delta and drain whole steps:
///
/// ```rust
/// use sprite_engine::foundation::time::FixedTimestep;
///
/// let mut steps = FixedTimestep::new(1.0 / 60.0);
/// steps.accumulate(0.05);
/// while steps.consume() {
///     // scene.physics_update(steps.step());
/// }
/// ```
pub struct FixedTimestep {
    step: f32,
    accumulator: f32,
}

impl FixedTimestep {
    /// Create an accumulator with the given step size in seconds
    pub fn new(step: f32) -> Self {
        Self { step, accumulator: 0.0 }
    }

    /// The fixed step size in seconds
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Add a frame's delta time to the accumulator
    pub fn accumulate(&mut self, delta: f32) {
        self.accumulator += delta;
    }

    /// Take one step out of the accumulator if enough time has built up
    pub fn consume(&mut self) -> bool {
        if self.accumulator >= self.step {
            self.accumulator -= self.step;
            true
        } else {
            false
        }
    }
}
