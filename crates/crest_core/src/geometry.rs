//! Geometry primitives and inset resolution

/// A point in the host coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A gesture velocity in points per second
///
/// Positive `y` means the finger is travelling downward, which moves scrolled
/// content toward its top.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Whether the vertical component dominates the horizontal one
    ///
    /// Vertical drag gestures only engage when this holds; a sideways swipe
    /// is left to the paging layer.
    pub fn vertically_dominant(&self) -> bool {
        self.y.abs() > self.x.abs()
    }
}

/// Edge insets of a scrollable area
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeInsets {
    pub top: f32,
    pub leading: f32,
    pub bottom: f32,
    pub trailing: f32,
}

impl EdgeInsets {
    pub const ZERO: EdgeInsets = EdgeInsets {
        top: 0.0,
        leading: 0.0,
        bottom: 0.0,
        trailing: 0.0,
    };

    pub const fn new(top: f32, leading: f32, bottom: f32, trailing: f32) -> Self {
        Self {
            top,
            leading,
            bottom,
            trailing,
        }
    }

    /// Insets with only a top component
    pub const fn top_only(top: f32) -> Self {
        Self {
            top,
            leading: 0.0,
            bottom: 0.0,
            trailing: 0.0,
        }
    }
}

/// Resolves the effective top inset of a scroll source.
///
/// Platforms that report safe-area-adjusted insets get those; legacy targets
/// fall back to the raw content inset. The choice is made once at construction
/// rather than branched at every call site.
#[derive(Debug, Clone, Copy)]
pub struct InsetResolver {
    prefer_adjusted: bool,
}

impl InsetResolver {
    /// Resolver for platforms that report safe-area-adjusted insets
    pub const fn safe_area_aware() -> Self {
        Self {
            prefer_adjusted: true,
        }
    }

    /// Resolver for legacy targets without safe-area reporting
    pub const fn legacy() -> Self {
        Self {
            prefer_adjusted: false,
        }
    }

    /// Effective top inset given the raw content inset and the
    /// safe-area-adjusted value, when the platform provides one
    pub fn effective_top_inset(&self, content_inset_top: f32, adjusted_top: Option<f32>) -> f32 {
        match adjusted_top {
            Some(adjusted) if self.prefer_adjusted => adjusted,
            _ => content_inset_top,
        }
    }
}

impl Default for InsetResolver {
    fn default() -> Self {
        Self::safe_area_aware()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_dominance() {
        assert!(Velocity::new(10.0, -40.0).vertically_dominant());
        assert!(!Velocity::new(40.0, 10.0).vertically_dominant());
        // Equal magnitudes are not dominant
        assert!(!Velocity::new(20.0, 20.0).vertically_dominant());
    }

    #[test]
    fn test_inset_resolution() {
        let safe_area = InsetResolver::safe_area_aware();
        assert_eq!(safe_area.effective_top_inset(20.0, Some(44.0)), 44.0);
        assert_eq!(safe_area.effective_top_inset(20.0, None), 20.0);

        let legacy = InsetResolver::legacy();
        assert_eq!(legacy.effective_top_inset(20.0, Some(44.0)), 20.0);
    }
}
