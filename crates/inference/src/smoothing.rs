//! One Euro filter for landmark jitter.
//!
//! Smooth when a hand is still, responsive when it moves fast.

use crate::LandmarkPoint;
use std::f32::consts::PI;

/// Adaptive low-pass filter for a single scalar signal
#[derive(Debug, Clone)]
pub struct OneEuroFilter {
    /// Minimum cutoff frequency (Hz), lower = smoother at rest
    min_cutoff: f32,
    /// Speed coefficient, higher = less lag during fast motion
    beta: f32,
    /// Derivative cutoff frequency (Hz)
    d_cutoff: f32,

    x_prev: f32,
    dx_prev: f32,
    t_prev: f64,
    initialized: bool,
}

impl OneEuroFilter {
    pub fn new(min_cutoff: f32, beta: f32) -> Self {
        Self {
            min_cutoff,
            beta,
            d_cutoff: 1.0,
            x_prev: 0.0,
            dx_prev: 0.0,
            t_prev: 0.0,
            initialized: false,
        }
    }

    fn smoothing_factor(t_e: f32, cutoff: f32) -> f32 {
        let r = 2.0 * PI * cutoff * t_e;
        r / (r + 1.0)
    }

    /// Filter `x` observed at time `t` (seconds).
    ///
    /// The first sample passes through unchanged. Samples that do not move
    /// time forward return the previous output.
    pub fn filter(&mut self, t: f64, x: f32) -> f32 {
        if !self.initialized {
            self.x_prev = x;
            self.t_prev = t;
            self.initialized = true;
            return x;
        }

        let t_e = (t - self.t_prev) as f32;
        if t_e <= 0.0 {
            return self.x_prev;
        }

        let a_d = Self::smoothing_factor(t_e, self.d_cutoff);
        let dx = (x - self.x_prev) / t_e;
        let dx_hat = a_d * dx + (1.0 - a_d) * self.dx_prev;

        let cutoff = self.min_cutoff + self.beta * dx_hat.abs();
        let a = Self::smoothing_factor(t_e, cutoff);
        let x_hat = a * x + (1.0 - a) * self.x_prev;

        self.x_prev = x_hat;
        self.dx_prev = dx_hat;
        self.t_prev = t;

        x_hat
    }
}

/// Three filters, one per landmark axis
#[derive(Debug, Clone)]
pub struct PointFilter {
    x: OneEuroFilter,
    y: OneEuroFilter,
    z: OneEuroFilter,
}

impl PointFilter {
    pub fn new(min_cutoff: f32, beta: f32) -> Self {
        Self {
            x: OneEuroFilter::new(min_cutoff, beta),
            y: OneEuroFilter::new(min_cutoff, beta),
            z: OneEuroFilter::new(min_cutoff, beta),
        }
    }

    pub fn filter(&mut self, t: f64, point: LandmarkPoint) -> LandmarkPoint {
        LandmarkPoint {
            x: self.x.filter(t, point.x),
            y: self.y.filter(t, point.y),
            z: self.z.filter(t, point.z),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_passes_through() {
        let mut filter = OneEuroFilter::new(1.0, 0.0);
        assert_eq!(filter.filter(0.0, 0.42), 0.42);
    }

    #[test]
    fn test_step_is_damped() {
        let mut filter = OneEuroFilter::new(1.0, 0.0);
        filter.filter(0.0, 0.0);
        let out = filter.filter(1.0 / 30.0, 1.0);
        assert!(out > 0.0 && out < 1.0, "got {out}");
    }

    #[test]
    fn test_converges_to_constant_input() {
        let mut filter = OneEuroFilter::new(1.0, 0.15);
        filter.filter(0.0, 0.0);
        let mut out = 0.0;
        for i in 1..300 {
            out = filter.filter(i as f64 / 30.0, 0.5);
        }
        assert!((out - 0.5).abs() < 1e-3, "got {out}");
    }

    #[test]
    fn test_non_increasing_time_returns_previous() {
        let mut filter = OneEuroFilter::new(1.0, 0.0);
        filter.filter(1.0, 0.2);
        assert_eq!(filter.filter(1.0, 0.9), 0.2);
        assert_eq!(filter.filter(0.5, 0.9), 0.2);
    }

    #[test]
    fn test_higher_beta_tracks_fast_motion_closer() {
        let mut slow = OneEuroFilter::new(1.0, 0.0);
        let mut fast = OneEuroFilter::new(1.0, 10.0);
        slow.filter(0.0, 0.0);
        fast.filter(0.0, 0.0);

        let dt = 1.0 / 30.0;
        let (mut s, mut f) = (0.0, 0.0);
        for i in 1..5 {
            let x = i as f32 * 0.2;
            s = slow.filter(i as f64 * dt, x);
            f = fast.filter(i as f64 * dt, x);
        }
        assert!(f > s);
    }
}
