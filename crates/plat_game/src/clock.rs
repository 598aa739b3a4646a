//! Fixed-timestep frame clock for real-time playback.
//!
//! Wall-clock time feeds an accumulator that is drained in `1 / frame_rate`
//! slices, so the simulation always advances in whole frames no matter how
//! irregular the host's timing is.

use std::time::Instant;

const FPS_SAMPLE_COUNT: usize = 60;

pub struct FrameClock {
    pub fixed_dt: f64,
    pub max_accumulator: f64,
    accumulator: f64,
    pub total_time: f64,
    pub fixed_step_count: u64,
    pub steps_this_frame: u32,
    last_instant: Instant,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
}

impl FrameClock {
    pub fn new(frame_rate: u32) -> Self {
        let fixed_dt = 1.0 / f64::from(frame_rate.max(1));
        Self {
            fixed_dt,
            max_accumulator: 0.25,
            accumulator: 0.0,
            total_time: 0.0,
            fixed_step_count: 0,
            steps_this_frame: 0,
            last_instant: Instant::now(),
            fps_samples: [fixed_dt; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: 1.0 / fixed_dt,
        }
    }

    /// Measure wall-clock time since the previous call and feed it in.
    pub fn begin_frame(&mut self) {
        let now = Instant::now();
        let real_dt = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.advance(real_dt);
    }

    pub fn advance(&mut self, real_dt: f64) {
        let mut real_dt = real_dt.max(0.0);
        // Spiral-of-death cap
        if real_dt > self.max_accumulator {
            log::warn!(
                "Frame took {:.1}ms, capping accumulator to {}ms",
                real_dt * 1000.0,
                self.max_accumulator * 1000.0
            );
            real_dt = self.max_accumulator;
        }

        self.accumulator += real_dt;
        self.steps_this_frame = 0;

        self.fps_samples[self.fps_sample_index] = real_dt;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };
    }

    pub fn should_step(&mut self) -> bool {
        if self.accumulator >= self.fixed_dt {
            self.accumulator -= self.fixed_dt;
            self.total_time += self.fixed_dt;
            self.fixed_step_count += 1;
            self.steps_this_frame += 1;
            true
        } else {
            false
        }
    }

    /// Time left until the next step is due.
    pub fn time_to_next_step(&self) -> f64 {
        (self.fixed_dt - self.accumulator).max(0.0)
    }
}
