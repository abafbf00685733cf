//! Configuration for the parallax tab host

use crest_animation::{Easing, SpringConfig};
use crest_core::InsetResolver;

/// How animated header commands move the reveal offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationProfile {
    /// Timed ease between the current and target offset
    Tween { duration: f32, easing: Easing },
    /// Spring toward the target offset
    Spring(SpringConfig),
}

impl Default for AnimationProfile {
    fn default() -> Self {
        AnimationProfile::Tween {
            duration: 0.3,
            easing: Easing::EaseInOut,
        }
    }
}

/// Configuration for header collapse behavior
#[derive(Debug, Clone, Copy)]
pub struct ParallaxConfig {
    /// Height of the fully expanded header
    pub header_height: f32,
    /// Floor below which the header may not collapse further
    pub minimum_reveal_height: f32,
    /// Enable the overscroll stretch effect (default: true)
    pub is_stretchy: bool,
    /// Height of the supplementary strip pinned to the header bottom
    pub supplementary_height: f32,
    /// Top inset capability for the platform target
    pub inset_resolver: InsetResolver,
    /// Animation profile for animated commands
    pub animation: AnimationProfile,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            header_height: 200.0,
            minimum_reveal_height: 0.0,
            is_stretchy: true,
            supplementary_height: 60.0,
            inset_resolver: InsetResolver::safe_area_aware(),
            animation: AnimationProfile::default(),
        }
    }
}

impl ParallaxConfig {
    /// Create config with the given expanded header height
    pub fn with_header_height(header_height: f32) -> Self {
        Self {
            header_height,
            ..Default::default()
        }
    }

    /// Create config with the stretch effect disabled (top-attached header)
    pub fn top_attached() -> Self {
        Self {
            is_stretchy: false,
            ..Default::default()
        }
    }

    /// Create config whose animated commands use a snappy spring
    pub fn springy() -> Self {
        Self {
            animation: AnimationProfile::Spring(SpringConfig::snappy()),
            ..Default::default()
        }
    }
}
