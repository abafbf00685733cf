//! Animation scheduler
//!
//! Owns all active springs and tweens and steps them each frame.

use slotmap::{new_key_type, SlotMap};
use std::time::Instant;

use crate::spring::Spring;
use crate::tween::Tween;

new_key_type! {
    pub struct SpringId;
    pub struct TweenId;
}

/// The animation scheduler that ticks all active animations
pub struct AnimationScheduler {
    springs: SlotMap<SpringId, Spring>,
    tweens: SlotMap<TweenId, Tween>,
    last_frame: Instant,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            springs: SlotMap::with_key(),
            tweens: SlotMap::with_key(),
            last_frame: Instant::now(),
        }
    }

    pub fn add_spring(&mut self, spring: Spring) -> SpringId {
        self.springs.insert(spring)
    }

    pub fn get_spring(&self, id: SpringId) -> Option<&Spring> {
        self.springs.get(id)
    }

    pub fn get_spring_mut(&mut self, id: SpringId) -> Option<&mut Spring> {
        self.springs.get_mut(id)
    }

    pub fn remove_spring(&mut self, id: SpringId) -> Option<Spring> {
        self.springs.remove(id)
    }

    pub fn add_tween(&mut self, tween: Tween) -> TweenId {
        self.tweens.insert(tween)
    }

    pub fn get_tween(&self, id: TweenId) -> Option<&Tween> {
        self.tweens.get(id)
    }

    pub fn remove_tween(&mut self, id: TweenId) -> Option<Tween> {
        self.tweens.remove(id)
    }

    /// Advance all animations by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        for (_, spring) in self.springs.iter_mut() {
            spring.step(dt);
        }
        for (_, tween) in self.tweens.iter_mut() {
            tween.step(dt);
        }
    }

    /// Advance all animations by the wall-clock time since the last tick
    pub fn tick(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.advance(dt);
    }

    /// Check if any animations are still active
    pub fn has_active_animations(&self) -> bool {
        self.springs.iter().any(|(_, s)| !s.is_settled())
            || self.tweens.iter().any(|(_, t)| !t.is_finished())
    }

    /// Number of animations currently scheduled
    pub fn animation_count(&self) -> usize {
        self.springs.len() + self.tweens.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}
