use std::f64::consts::TAU;

/// Standard gravitational acceleration in m/s².
pub const STANDARD_GRAVITY: f64 = 9.80665;

/// Small-oscillation period of a simple pendulum of length `length`.
pub fn pendulum_period(length: f64) -> f64 {
    TAU * (length / STANDARD_GRAVITY).sqrt()
}

/// Inverse of [`pendulum_period`]: the arm length that swings with period `period`.
pub fn pendulum_length(period: f64) -> f64 {
    let k = period / TAU;
    k * k * STANDARD_GRAVITY
}

/// Pixel width of a stroke: rounded up, so a positive logical width never vanishes.
pub(crate) fn ceil_px(len: f64) -> u32 {
    if !len.is_finite() || len <= 0.0 {
        return 0;
    }
    len.ceil().min(f64::from(u32::MAX)) as u32
}

/// Evenly spaced positions from the origin toward `bound`, never past it.
pub(crate) fn ticks_toward(step: f64, bound: f64) -> Vec<f64> {
    let n = (bound.abs() / step).floor() as usize;
    let dir = if bound < 0.0 { -1.0 } else { 1.0 };
    (0..=n).map(|i| dir * (i as f64) * step).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
