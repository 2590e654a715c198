use std::time::Instant;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::error::{KinescopeError, KinescopeResult};
use crate::render::composite::blend_frame;
use crate::render::surface::Frame;
use crate::world::core::World;

/// Weight of each newer sub-sample when blended over the running result.
pub const BLEND_WEIGHT: f32 = 0.4;

/// Upper bound on the frames of one sequence.
pub const MAX_FRAMES: u64 = 1_000_000;

/// Sub-sampling of each output frame over the preceding output step.
///
/// A frame at `t` samples `t − i·step/factor` for `i = factor−1 … 0`, skipping negative times, and
/// blends the samples oldest first. A factor of 1 renders the frame at `t` alone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionBlur {
    step: f64,
    factor: u32,
    blend_weight: f32,
}

impl MotionBlur {
    pub fn new(step: f64, factor: u32) -> KinescopeResult<Self> {
        if !step.is_finite() || step <= 0.0 {
            return Err(KinescopeError::validation(format!(
                "frame step must be finite and > 0, got {step}"
            )));
        }
        if factor == 0 {
            return Err(KinescopeError::validation("blur factor must be >= 1"));
        }
        Ok(Self {
            step,
            factor,
            blend_weight: BLEND_WEIGHT,
        })
    }

    /// Enough sub-samples per step to reach `fps` samples per simulated second.
    pub fn from_fps(step: f64, fps: f64) -> KinescopeResult<Self> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(KinescopeError::validation(format!(
                "fps must be finite and > 0, got {fps}"
            )));
        }
        let factor = (fps * step).ceil().clamp(1.0, f64::from(u32::MAX)) as u32;
        Self::new(step, factor)
    }

    /// Single sample per frame.
    pub fn none(step: f64) -> KinescopeResult<Self> {
        Self::new(step, 1)
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn factor(&self) -> u32 {
        self.factor
    }

    pub fn blend_weight(&self) -> f32 {
        self.blend_weight
    }

    /// Sub-sample times for the frame at `t`, oldest first. Always ends with `t`.
    pub fn sample_times(&self, t: f64) -> Vec<f64> {
        let sub = self.step / f64::from(self.factor);
        (0..self.factor)
            .rev()
            .map(|i| t - f64::from(i) * sub)
            .enumerate()
            .filter(|&(n, s)| s >= 0.0 || n + 1 == self.factor as usize)
            .map(|(_, s)| s)
            .collect()
    }

    /// Output frame count for `duration`: `ceil(duration / step) + 1`, frames at `i·step`.
    /// Fails when that exceeds [`MAX_FRAMES`].
    pub fn frame_count(&self, duration: f64) -> KinescopeResult<u64> {
        let steps = (duration / self.step).ceil();
        if !steps.is_finite() || steps >= MAX_FRAMES as f64 {
            return Err(KinescopeError::validation(format!(
                "duration {duration} at step {} needs more than {MAX_FRAMES} frames",
                self.step
            )));
        }
        Ok(steps.max(0.0) as u64 + 1)
    }
}

/// Sequence render statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames pushed to the sink.
    pub frames: u64,
    /// Sub-samples rendered across all frames.
    pub samples: u64,
}

impl World {
    /// Render the frame at `t`, motion-blurred according to `blur`. Leaves the world at `t`.
    #[tracing::instrument(skip(self, blur), fields(factor = blur.factor()))]
    pub fn render_blurred_frame(&mut self, t: f64, blur: &MotionBlur) -> KinescopeResult<Frame> {
        self.render_blurred_counted(t, blur).map(|(frame, _)| frame)
    }

    fn render_blurred_counted(
        &mut self,
        t: f64,
        blur: &MotionBlur,
    ) -> KinescopeResult<(Frame, u64)> {
        let mut acc: Option<Frame> = None;
        let mut samples = 0u64;
        for s in blur.sample_times(t) {
            self.set_time(s)?;
            let frame = self.get_frame()?;
            samples += 1;
            match acc.as_mut() {
                None => acc = Some(frame),
                Some(a) => blend_frame(a, &frame, blur.blend_weight())?,
            }
        }
        let frame = acc.ok_or_else(|| KinescopeError::evaluation("no sub-samples for frame"))?;
        Ok((frame, samples))
    }

    /// Render frames at `0, step, 2·step, …` up to and including the first time `>= duration`
    /// and stream them into `sink`.
    #[tracing::instrument(skip(self, blur, sink))]
    pub fn render_sequence(
        &mut self,
        duration: f64,
        blur: &MotionBlur,
        sink: &mut dyn FrameSink,
    ) -> KinescopeResult<RenderStats> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(KinescopeError::validation(format!(
                "duration must be finite and >= 0, got {duration}"
            )));
        }

        let frame_count = blur.frame_count(duration)?;
        let canvas = self.canvas();
        sink.begin(SinkConfig {
            width: canvas.width,
            height: canvas.height,
            frame_count,
            duration_s: duration,
            frame_delay_s: blur.step(),
        })?;

        let started = Instant::now();
        let mut stats = RenderStats::default();
        for idx in 0..frame_count {
            let t = idx as f64 * blur.step();
            let (frame, samples) = self.render_blurred_counted(t, blur)?;
            sink.push_frame(idx, &frame)?;
            stats.frames += 1;
            stats.samples += samples;
            tracing::debug!(idx, t, samples, "frame rendered");
        }
        sink.end()?;

        let elapsed = started.elapsed().as_secs_f64();
        tracing::info!(
            frames = stats.frames,
            samples = stats.samples,
            elapsed_s = elapsed,
            fps = if elapsed > 0.0 { stats.frames as f64 / elapsed } else { 0.0 },
            "sequence rendered"
        );
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/world/blur.rs"]
mod tests;
