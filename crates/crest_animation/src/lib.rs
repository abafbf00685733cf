//! Crest Animation System
//!
//! Spring physics and timed tweens for animated header commands.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Tweens**: timed from→to interpolation with easing functions
//! - **Scheduler**: owns all active animations and steps them per frame
//! - **Interruptible**: animations can be removed mid-flight at any time

pub mod easing;
pub mod scheduler;
pub mod spring;
pub mod tween;

pub use easing::Easing;
pub use scheduler::{AnimationScheduler, SpringId, TweenId};
pub use spring::{Spring, SpringConfig};
pub use tween::Tween;
