//! Timed from→to interpolation with easing

use crate::easing::Easing;

/// A timed animation between two scalar values
#[derive(Debug, Clone)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
    easing: Easing,
}

impl Tween {
    /// Create a tween over `duration` seconds
    ///
    /// A non-positive duration produces a tween that is already finished at
    /// its end value.
    pub fn new(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing,
        }
    }

    /// Advance the tween by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if dt > 0.0 {
            self.elapsed = (self.elapsed + dt).min(self.duration);
        }
    }

    /// Current interpolated value
    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.to;
        }
        let progress = self.elapsed / self.duration;
        self.from + (self.to - self.from) * self.easing.apply(progress)
    }

    /// End value of the tween
    pub fn to(&self) -> f32 {
        self.to
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}
