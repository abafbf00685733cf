//! Header collapse coordination
//!
//! Owns the header's reveal offset and translates observed scroll deltas into
//! offset changes with directional hysteresis: the header only collapses while
//! the user scrolls down through real content, and only expands while the user
//! scrolls up past the top inset. Overscrolling past the top produces a
//! rubber-band stretch transform instead of offset movement.
//!
//! The coordinator is a pure state holder: it owns no views and performs no
//! layout. Its output is the [`HeaderLayout`] snapshot the host applies to
//! whatever constraint system it has.

use crest_core::events::event_types;
use crest_core::fsm::{advance, StateTransitions};
use crest_core::EventType;

/// Where the tab bar's top edge attaches when the header is collapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabBarTopMode {
    /// Attached below the top inset; the header may stretch on overscroll
    InsetAttached,
    /// Attached to the very top; no stretch effect
    TopAttached,
}

/// Interaction phase of the header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderPhase {
    /// Reveal offset is 0
    #[default]
    Expanded,
    /// Reveal offset is somewhere between the terminal positions
    Tracking,
    /// Reveal offset is at the minimum collapse offset
    Collapsed,
    /// A programmatic animation owns the reveal offset
    Animating,
}

impl StateTransitions for HeaderPhase {
    fn on_event(&self, event: EventType) -> Option<Self> {
        use event_types::*;
        match (self, event) {
            (HeaderPhase::Expanded, SCROLL) => Some(HeaderPhase::Tracking),
            (HeaderPhase::Collapsed, SCROLL) => Some(HeaderPhase::Tracking),
            // A user gesture interrupts any in-flight animation
            (HeaderPhase::Animating, SCROLL) => Some(HeaderPhase::Tracking),
            (HeaderPhase::Tracking, HIT_EXPANDED) => Some(HeaderPhase::Expanded),
            (HeaderPhase::Tracking, HIT_COLLAPSED) => Some(HeaderPhase::Collapsed),
            (HeaderPhase::Animating, HIT_EXPANDED) => Some(HeaderPhase::Expanded),
            (HeaderPhase::Animating, HIT_COLLAPSED) => Some(HeaderPhase::Collapsed),
            (HeaderPhase::Animating, SETTLED) => Some(HeaderPhase::Tracking),
            (HeaderPhase::Expanded, ANIMATION_START) => Some(HeaderPhase::Animating),
            (HeaderPhase::Collapsed, ANIMATION_START) => Some(HeaderPhase::Animating),
            (HeaderPhase::Tracking, ANIMATION_START) => Some(HeaderPhase::Animating),
            _ => None,
        }
    }
}

/// Visual stretch applied to the header while overscrolled past the top
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverscrollTransform {
    /// Uniform scale factor for the header container
    pub scale: f32,
    /// Extra distance between the header bottom and the supplementary strip
    pub gap: f32,
}

impl OverscrollTransform {
    pub const IDENTITY: OverscrollTransform = OverscrollTransform {
        scale: 1.0,
        gap: 0.0,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

/// Reveal percentage pushed to external listeners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealPercentage {
    /// Relative to the configured minimum reveal height
    pub raw: f32,
    /// Relative to the full header height
    pub safe_area_adjusted: f32,
}

/// Resolved layout values the host applies to its view hierarchy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderLayout {
    /// Top position of the header container (the reveal offset, always ≤ 0)
    pub header_top: f32,
    /// Current header height
    pub header_height: f32,
    /// Top position of the tab bar / page area
    pub tab_bar_top: f32,
    /// Uniform scale of the header container
    pub header_scale: f32,
    /// Gap between the header bottom and the supplementary strip
    pub supplementary_gap: f32,
    /// Height of the supplementary strip
    pub supplementary_height: f32,
}

/// Owns the reveal offset and decides how scroll movement affects it
#[derive(Debug)]
pub struct HeaderCollapseCoordinator {
    header_height: f32,
    minimum_reveal_height: f32,
    top_mode: TabBarTopMode,
    /// Signed displacement from fully expanded, clamped to
    /// `[minimum_collapse_offset, 0]`
    reveal_offset: f32,
    /// Effective top inset of the active scroll source, cached from the most
    /// recent observation so percentages and clamps stay consistent between
    /// events
    top_inset: f32,
    overscroll: OverscrollTransform,
    phase: HeaderPhase,
}

impl HeaderCollapseCoordinator {
    pub fn new(header_height: f32, minimum_reveal_height: f32, top_mode: TabBarTopMode) -> Self {
        Self {
            header_height: header_height.max(0.0),
            minimum_reveal_height,
            top_mode,
            reveal_offset: 0.0,
            top_inset: 0.0,
            overscroll: OverscrollTransform::IDENTITY,
            phase: HeaderPhase::Expanded,
        }
    }

    pub fn header_height(&self) -> f32 {
        self.header_height
    }

    pub fn minimum_reveal_height(&self) -> f32 {
        self.minimum_reveal_height
    }

    pub fn reveal_offset(&self) -> f32 {
        self.reveal_offset
    }

    pub fn phase(&self) -> HeaderPhase {
        self.phase
    }

    pub fn top_mode(&self) -> TabBarTopMode {
        self.top_mode
    }

    pub fn set_top_mode(&mut self, mode: TabBarTopMode) {
        self.top_mode = mode;
        if mode == TabBarTopMode::TopAttached {
            self.overscroll = OverscrollTransform::IDENTITY;
        }
    }

    /// Lowest permitted reveal offset given the cached top inset
    pub fn minimum_collapse_offset(&self) -> f32 {
        (self.minimum_reveal_height.max(self.top_inset) - self.header_height).min(0.0)
    }

    /// Offset of the fully expanded position
    pub fn expanded_offset(&self) -> f32 {
        0.0
    }

    /// Offset targeted by the scroll-to-bottom command
    pub fn collapsed_offset(&self) -> f32 {
        self.minimum_reveal_height - self.header_height
    }

    /// Translate an observed scroll delta into header movement.
    ///
    /// Collapsing requires real content under the finger
    /// (`content_offset_y > -top_inset`) and a downward scroll; expanding
    /// requires an upward scroll that has pulled past the top inset. When
    /// neither gate holds the offset is untouched and the caller must not
    /// advance its previous-offset tracking, so overscroll bounce at the
    /// boundary never leaks into header movement.
    ///
    /// Returns whether an update occurred, so the caller knows to snap the
    /// scroll position back rather than let the movement double-count.
    pub fn apply_delta(
        &mut self,
        offset_delta: f32,
        content_offset_y: f32,
        top_inset: f32,
        scrolling_up: bool,
    ) -> bool {
        self.top_inset = top_inset;
        let floor = self.minimum_collapse_offset();

        let should_collapse =
            self.reveal_offset > floor && content_offset_y > -top_inset && !scrolling_up;
        let should_expand =
            self.reveal_offset < 0.0 && scrolling_up && content_offset_y < -top_inset;

        if !should_collapse && !should_expand {
            return false;
        }

        let target = (self.reveal_offset - offset_delta).clamp(floor, 0.0);
        tracing::trace!(
            delta = offset_delta,
            content_offset_y,
            from = self.reveal_offset,
            to = target,
            "header delta applied"
        );
        self.track_to(target);
        true
    }

    /// Compute and cache the overscroll stretch for the current content offset
    ///
    /// Identity whenever the header is top-attached, the content has not been
    /// pulled past the top inset, or the header height is degenerate.
    pub fn apply_overscroll(&mut self, content_offset_y: f32, top_inset: f32) -> OverscrollTransform {
        self.top_inset = top_inset;
        self.overscroll = if self.top_mode == TabBarTopMode::TopAttached {
            OverscrollTransform::IDENTITY
        } else if content_offset_y < -top_inset && self.header_height > 0.0 {
            let gap = -top_inset - content_offset_y;
            OverscrollTransform {
                scale: 1.0 + (gap * 2.0) / self.header_height,
                gap,
            }
        } else {
            OverscrollTransform::IDENTITY
        };
        self.overscroll
    }

    pub fn overscroll(&self) -> OverscrollTransform {
        self.overscroll
    }

    /// Update the expanded header height.
    ///
    /// Idempotent: an unchanged height is a no-op. On change the offset range
    /// is recomputed and the reveal offset re-clamped into it. Returns whether
    /// the height changed so the caller can notify percentage listeners.
    pub fn set_header_height(&mut self, new_height: f32) -> bool {
        let new_height = new_height.max(0.0);
        if new_height == self.header_height {
            return false;
        }
        self.header_height = new_height;
        let floor = self.minimum_collapse_offset();
        if self.reveal_offset < floor {
            self.track_to(floor);
        }
        true
    }

    /// Move the reveal offset directly, clamped into range.
    ///
    /// Entry point for the pan drag, the scroll-to commands, and animation
    /// ticks. Returns whether the offset changed.
    pub fn set_reveal_offset(&mut self, offset: f32) -> bool {
        let clamped = offset.clamp(self.minimum_collapse_offset(), 0.0);
        if clamped == self.reveal_offset {
            // Still record terminal phases so animations settle correctly
            self.mark_terminal_phase();
            return false;
        }
        self.track_to(clamped);
        true
    }

    /// Note that a programmatic animation has taken over the offset
    pub fn begin_animation(&mut self) {
        advance(&mut self.phase, event_types::ANIMATION_START);
    }

    /// Animation-tick write: moves the offset without registering a user
    /// scroll, so the phase stays `Animating` until the animation lands.
    /// Returns whether the offset changed.
    pub fn animate_to(&mut self, offset: f32) -> bool {
        let clamped = offset.clamp(self.minimum_collapse_offset(), 0.0);
        if clamped == self.reveal_offset {
            return false;
        }
        self.reveal_offset = clamped;
        self.mark_terminal_phase();
        true
    }

    /// Note that an in-flight animation finished without reaching a terminal
    /// position
    pub fn settle_animation(&mut self) {
        self.mark_terminal_phase();
        advance(&mut self.phase, event_types::SETTLED);
    }

    /// Current reveal percentages.
    ///
    /// `raw` measures travel against the minimum reveal height, `adjusted`
    /// against the full header height. A degenerate denominator (≤ 0) means
    /// the header cannot travel at all; both report `1.0` (fully revealed).
    pub fn reveal_percentage(&self) -> RevealPercentage {
        let floor = self.minimum_collapse_offset();
        let magnitude = self.reveal_offset.abs();
        RevealPercentage {
            raw: percentage(magnitude, self.minimum_reveal_height - floor),
            safe_area_adjusted: percentage(magnitude, self.header_height - floor),
        }
    }

    /// Resolved layout snapshot for the host to apply
    pub fn layout(&self, supplementary_height: f32) -> HeaderLayout {
        HeaderLayout {
            header_top: self.reveal_offset,
            header_height: self.header_height,
            tab_bar_top: self.reveal_offset + self.header_height,
            header_scale: self.overscroll.scale,
            supplementary_gap: self.overscroll.gap,
            supplementary_height,
        }
    }

    fn track_to(&mut self, offset: f32) {
        self.reveal_offset = offset;
        advance(&mut self.phase, event_types::SCROLL);
        self.mark_terminal_phase();
    }

    fn mark_terminal_phase(&mut self) {
        if self.reveal_offset == 0.0 {
            advance(&mut self.phase, event_types::HIT_EXPANDED);
        } else if self.reveal_offset == self.minimum_collapse_offset() {
            advance(&mut self.phase, event_types::HIT_COLLAPSED);
        }
    }
}

fn percentage(magnitude: f32, denominator: f32) -> f32 {
    if denominator <= 0.0 {
        1.0
    } else {
        (1.0 - magnitude / denominator).clamp(0.0, 1.0)
    }
}
