//! Scroll source tracking
//!
//! Pages register their scrollable content views as *sources* in a slotmap
//! registry; the tracker holds the key of the one the user is currently
//! interacting with, never the source itself. A source removed from the
//! registry simply stops resolving, which the tracker treats as "no active
//! source". The relation is lookup, never ownership.
//!
//! Gesture ownership moves with the active source: exactly one
//! detach-then-attach claim exchange happens per tab switch.

use slotmap::{new_key_type, SlotMap};

use crest_core::{EdgeInsets, InsetResolver};

use crate::header::HeaderCollapseCoordinator;

new_key_type! {
    /// Handle to a registered scroll source
    pub struct ScrollSourceId;
}

/// Snapshot of a scrollable content view, reported by its page
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollSourceInfo {
    /// Current vertical content offset
    pub content_offset_y: f32,
    /// Raw content insets
    pub content_inset: EdgeInsets,
    /// Safe-area-adjusted insets, when the platform reports them
    pub safe_area_inset: Option<EdgeInsets>,
}

#[derive(Debug)]
struct ScrollSource {
    info: ScrollSourceInfo,
    gesture_claimed: bool,
}

/// Registry of scroll sources owned by the host's pages
#[derive(Debug)]
pub struct ScrollSourceRegistry {
    sources: SlotMap<ScrollSourceId, ScrollSource>,
    resolver: InsetResolver,
}

impl ScrollSourceRegistry {
    pub fn new(resolver: InsetResolver) -> Self {
        Self {
            sources: SlotMap::with_key(),
            resolver,
        }
    }

    pub fn register(&mut self, info: ScrollSourceInfo) -> ScrollSourceId {
        self.sources.insert(ScrollSource {
            info,
            gesture_claimed: false,
        })
    }

    pub fn remove(&mut self, id: ScrollSourceId) -> bool {
        self.sources.remove(id).is_some()
    }

    pub fn contains(&self, id: ScrollSourceId) -> bool {
        self.sources.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Last recorded content offset of a source
    pub fn content_offset_y(&self, id: ScrollSourceId) -> Option<f32> {
        self.sources.get(id).map(|s| s.info.content_offset_y)
    }

    /// Effective top inset of a source, through the platform capability
    pub fn effective_top_inset(&self, id: ScrollSourceId) -> Option<f32> {
        self.sources.get(id).map(|s| {
            self.resolver.effective_top_inset(
                s.info.content_inset.top,
                s.info.safe_area_inset.map(|insets| insets.top),
            )
        })
    }

    /// Record a newly observed content offset
    pub fn record_offset(&mut self, id: ScrollSourceId, content_offset_y: f32) {
        if let Some(source) = self.sources.get_mut(id) {
            source.info.content_offset_y = content_offset_y;
        }
    }

    /// Update a source's insets (e.g. after a safe-area change)
    pub fn update_insets(
        &mut self,
        id: ScrollSourceId,
        content_inset: EdgeInsets,
        safe_area_inset: Option<EdgeInsets>,
    ) {
        if let Some(source) = self.sources.get_mut(id) {
            source.info.content_inset = content_inset;
            source.info.safe_area_inset = safe_area_inset;
        }
    }

    pub fn is_claimed(&self, id: ScrollSourceId) -> bool {
        self.sources.get(id).map(|s| s.gesture_claimed) == Some(true)
    }

    fn set_claimed(&mut self, id: ScrollSourceId, claimed: bool) {
        if let Some(source) = self.sources.get_mut(id) {
            source.gesture_claimed = claimed;
        }
    }
}

/// What the caller should do with an observed scroll event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollDisposition {
    /// The delta was redirected into header movement; snap the source's
    /// content offset back so the movement is not double-counted
    Redirected { snap_back_to: f32 },
    /// The header did not move; the source scrolls normally
    Passthrough,
    /// The observation came from a stale or unknown source
    Ignored,
}

/// Tracks which source drives the header and in which direction
#[derive(Debug, Default)]
pub struct ScrollSourceTracker {
    active: Option<ScrollSourceId>,
    /// Last observed offset of the active source, used purely for deltas
    previous_offset: f32,
    /// Sticky direction flag: only a non-zero velocity flips it
    scrolling_up: bool,
}

impl ScrollSourceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_source(&self) -> Option<ScrollSourceId> {
        self.active
    }

    pub fn previous_offset(&self) -> f32 {
        self.previous_offset
    }

    pub fn is_scrolling_up(&self) -> bool {
        self.scrolling_up
    }

    /// Exchange the active source: release the old gesture claim, take the
    /// new one, seed the previous offset from the new source, and reset the
    /// direction flag. A no-op when the source is unchanged.
    pub fn on_active_source_changed(
        &mut self,
        registry: &mut ScrollSourceRegistry,
        new_source: Option<ScrollSourceId>,
    ) {
        let new_source = new_source.filter(|id| registry.contains(*id));
        if new_source == self.active {
            return;
        }

        if let Some(old) = self.active.take() {
            registry.set_claimed(old, false);
        }

        if let Some(new) = new_source {
            registry.set_claimed(new, true);
            self.previous_offset = registry.content_offset_y(new).unwrap_or(0.0);
        } else {
            self.previous_offset = 0.0;
        }
        self.scrolling_up = false;
        self.active = new_source;
        tracing::debug!(source = ?new_source, "active scroll source changed");
    }

    /// Feed an observed scroll position change from a source.
    ///
    /// Stale callbacks (from a source that is not the active one, or one that
    /// has been destroyed) are ignored. Applied deltas do not advance the
    /// previous offset; the caller snaps the source back instead.
    pub fn on_scroll_observed(
        &mut self,
        registry: &mut ScrollSourceRegistry,
        coordinator: &mut HeaderCollapseCoordinator,
        source: ScrollSourceId,
        content_offset_y: f32,
        gesture_velocity_y: f32,
    ) -> ScrollDisposition {
        if self.active != Some(source) {
            return ScrollDisposition::Ignored;
        }
        let Some(top_inset) = registry.effective_top_inset(source) else {
            // The active source was destroyed under us
            self.active = None;
            return ScrollDisposition::Ignored;
        };

        if gesture_velocity_y > 0.0 {
            self.scrolling_up = true;
        } else if gesture_velocity_y < 0.0 {
            self.scrolling_up = false;
        }

        registry.record_offset(source, content_offset_y);

        let delta = content_offset_y - self.previous_offset;
        if delta == 0.0 {
            return ScrollDisposition::Passthrough;
        }

        if coordinator.apply_delta(delta, content_offset_y, top_inset, self.scrolling_up) {
            ScrollDisposition::Redirected {
                snap_back_to: self.previous_offset,
            }
        } else {
            self.previous_offset = content_offset_y;
            ScrollDisposition::Passthrough
        }
    }
}
