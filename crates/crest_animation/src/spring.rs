//! Spring physics
//!
//! Damped harmonic springs integrated with RK4. Springs inherit their current
//! velocity when retargeted, so interrupting an animation never snaps.

/// Spring parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    /// Spring stiffness (force per unit displacement)
    pub stiffness: f32,
    /// Damping coefficient
    pub damping: f32,
    /// Mass of the animated value
    pub mass: f32,
}

impl SpringConfig {
    pub const fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Stiff spring: fast settle, no visible rebound
    pub const fn stiff() -> Self {
        Self::new(600.0, 50.0, 1.0)
    }

    /// Gentle spring: slower, with a soft rebound
    pub const fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    /// Snappy spring for programmatic scrolls: quick but smooth
    pub const fn snappy() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::new(170.0, 26.0, 1.0)
    }
}

/// Velocity below which a spring is considered at rest
const REST_VELOCITY: f32 = 0.5;
/// Displacement below which a spring is considered at rest
const REST_DISTANCE: f32 = 0.1;

/// A damped spring animating a single scalar toward a target
#[derive(Debug, Clone)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    /// Create a spring at rest at the given value
    pub fn new(config: SpringConfig, value: f32) -> Self {
        Self {
            config,
            value,
            velocity: 0.0,
            target: value,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Retarget the spring, keeping the current value and velocity
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Seed the spring with an initial velocity (e.g. from a gesture)
    pub fn set_velocity(&mut self, velocity: f32) {
        self.velocity = velocity;
    }

    /// Whether the spring has come to rest at its target
    pub fn is_settled(&self) -> bool {
        self.velocity.abs() < REST_VELOCITY && (self.value - self.target).abs() < REST_DISTANCE
    }

    /// Advance the spring by `dt` seconds using RK4 integration
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 || self.is_settled() {
            return;
        }

        let (x, v) = (self.value, self.velocity);

        let (k1x, k1v) = self.derivatives(x, v);
        let (k2x, k2v) = self.derivatives(x + k1x * dt * 0.5, v + k1v * dt * 0.5);
        let (k3x, k3v) = self.derivatives(x + k2x * dt * 0.5, v + k2v * dt * 0.5);
        let (k4x, k4v) = self.derivatives(x + k3x * dt, v + k3v * dt);

        self.value = x + (k1x + 2.0 * k2x + 2.0 * k3x + k4x) * dt / 6.0;
        self.velocity = v + (k1v + 2.0 * k2v + 2.0 * k3v + k4v) * dt / 6.0;

        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
            tracing::trace!(position = self.target, "spring settled");
        }
    }

    /// Position/velocity derivatives at the given state
    #[inline]
    fn derivatives(&self, x: f32, v: f32) -> (f32, f32) {
        let displacement = x - self.target;
        let accel =
            (-self.config.stiffness * displacement - self.config.damping * v) / self.config.mass;
        (v, accel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(spring: &mut Spring, max_seconds: f32) -> f32 {
        let dt = 1.0 / 120.0;
        let mut elapsed = 0.0;
        while !spring.is_settled() && elapsed < max_seconds {
            spring.step(dt);
            elapsed += dt;
        }
        elapsed
    }

    #[test]
    fn test_spring_settles_on_target() {
        let mut spring = Spring::new(SpringConfig::default(), 0.0);
        spring.set_target(100.0);

        let elapsed = settle(&mut spring, 10.0);
        assert!(elapsed < 10.0, "spring did not settle");
        assert_eq!(spring.value(), 100.0);
        assert_eq!(spring.velocity(), 0.0);
    }

    #[test]
    fn test_spring_at_rest_does_not_move() {
        let mut spring = Spring::new(SpringConfig::stiff(), 42.0);
        spring.step(1.0 / 60.0);
        assert_eq!(spring.value(), 42.0);
    }

    #[test]
    fn test_retarget_keeps_velocity() {
        let mut spring = Spring::new(SpringConfig::gentle(), 0.0);
        spring.set_target(100.0);
        for _ in 0..12 {
            spring.step(1.0 / 120.0);
        }
        let mid_velocity = spring.velocity();
        assert!(mid_velocity > 0.0);

        spring.set_target(-50.0);
        assert_eq!(spring.velocity(), mid_velocity);

        settle(&mut spring, 10.0);
        assert_eq!(spring.value(), -50.0);
    }

    #[test]
    fn test_stiff_settles_faster_than_gentle() {
        let mut stiff = Spring::new(SpringConfig::stiff(), 0.0);
        stiff.set_target(100.0);
        let mut gentle = Spring::new(SpringConfig::gentle(), 0.0);
        gentle.set_target(100.0);

        let stiff_time = settle(&mut stiff, 10.0);
        let gentle_time = settle(&mut gentle, 10.0);
        assert!(stiff_time < gentle_time);
    }
}
