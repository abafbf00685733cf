//! Tab/page host
//!
//! Owns the ordered set of content pages and their tab descriptors, routes
//! scroll and pan observations into the collapse coordinator, and pushes
//! reveal notifications to the embedding application. The host never draws:
//! pages and header content are opaque [`ViewHandle`]s, and the hosting
//! layer applies [`HeaderLayout`](crate::header::HeaderLayout) snapshots to
//! its own view hierarchy.

use std::sync::{Arc, Mutex};

use smallvec::SmallVec;

use crest_animation::{AnimationScheduler, Spring, SpringId, Tween, TweenId};
use crest_core::{EdgeInsets, PanPhase, Point, Velocity};

use crate::config::{AnimationProfile, ParallaxConfig};
use crate::error::ParallaxError;
use crate::header::{
    HeaderCollapseCoordinator, HeaderLayout, HeaderPhase, RevealPercentage, TabBarTopMode,
};
use crate::tracker::{
    ScrollDisposition, ScrollSourceId, ScrollSourceInfo, ScrollSourceRegistry, ScrollSourceTracker,
};

/// Opaque handle to a view owned by the embedding application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewHandle(pub u64);

/// Descriptor for one tab in the tab bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabItem {
    pub title: String,
}

impl TabItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// Terminal header position, reported when the header lands there
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderPosition {
    Expanded,
    Collapsed,
}

/// Listener for reveal percentage changes
pub type RevealListener = Box<dyn FnMut(RevealPercentage) + Send>;
/// Listener for terminal position arrivals
pub type PositionListener = Box<dyn FnMut(HeaderPosition) + Send>;

struct Page {
    content: ViewHandle,
    /// Scroll sources registered by this page; the first is its primary one
    sources: SmallVec<[ScrollSourceId; 2]>,
}

#[derive(Debug, Clone, Copy)]
enum HeaderAnimation {
    Tween(TweenId),
    Spring(SpringId),
}

#[derive(Debug, Default)]
struct PanState {
    engaged: bool,
    /// Tab bar top position when the gesture began
    initial_spacing: f32,
}

/// Hosts paged tab content under a collapsible parallax header
pub struct ParallaxTabHost {
    config: ParallaxConfig,
    coordinator: HeaderCollapseCoordinator,
    tracker: ScrollSourceTracker,
    registry: ScrollSourceRegistry,
    scheduler: Arc<Mutex<AnimationScheduler>>,
    pages: Vec<Page>,
    tabs: Vec<TabItem>,
    selected: usize,
    header_view: Option<ViewHandle>,
    supplementary_view: Option<ViewHandle>,
    supplementary_height: f32,
    on_reveal_changed: Option<RevealListener>,
    on_position_reached: Option<PositionListener>,
    animation: Option<HeaderAnimation>,
    pan: PanState,
}

impl ParallaxTabHost {
    /// Create a host for the given pages and matching tab descriptors.
    ///
    /// Fails fast on contract violations: zero pages, or page/tab counts
    /// that do not match.
    pub fn new(
        pages: Vec<ViewHandle>,
        tabs: Vec<TabItem>,
        config: ParallaxConfig,
    ) -> Result<Self, ParallaxError> {
        if pages.is_empty() {
            return Err(ParallaxError::EmptyPages);
        }
        if pages.len() != tabs.len() {
            return Err(ParallaxError::PageTabMismatch {
                pages: pages.len(),
                tabs: tabs.len(),
            });
        }

        let top_mode = if config.is_stretchy {
            TabBarTopMode::InsetAttached
        } else {
            TabBarTopMode::TopAttached
        };

        Ok(Self {
            coordinator: HeaderCollapseCoordinator::new(
                config.header_height,
                config.minimum_reveal_height,
                top_mode,
            ),
            tracker: ScrollSourceTracker::new(),
            registry: ScrollSourceRegistry::new(config.inset_resolver),
            scheduler: Arc::new(Mutex::new(AnimationScheduler::new())),
            pages: pages
                .into_iter()
                .map(|content| Page {
                    content,
                    sources: SmallVec::new(),
                })
                .collect(),
            tabs,
            selected: 0,
            header_view: None,
            supplementary_view: None,
            supplementary_height: config.supplementary_height,
            on_reveal_changed: None,
            on_position_reached: None,
            animation: None,
            pan: PanState::default(),
            config,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn tabs(&self) -> &[TabItem] {
        &self.tabs
    }

    pub fn page_content(&self, index: usize) -> Option<ViewHandle> {
        self.pages.get(index).map(|p| p.content)
    }

    pub fn header_view(&self) -> Option<ViewHandle> {
        self.header_view
    }

    pub fn supplementary_view(&self) -> Option<ViewHandle> {
        self.supplementary_view
    }

    pub fn is_stretchy(&self) -> bool {
        self.config.is_stretchy
    }

    pub fn phase(&self) -> HeaderPhase {
        self.coordinator.phase()
    }

    pub fn reveal_percentage(&self) -> RevealPercentage {
        self.coordinator.reveal_percentage()
    }

    /// Resolved layout snapshot for the hosting view hierarchy
    pub fn layout(&self) -> HeaderLayout {
        self.coordinator.layout(self.supplementary_height)
    }

    /// Whether an animated command is still in flight
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Shared animation scheduler, for the embedder's frame loop
    pub fn scheduler(&self) -> Arc<Mutex<AnimationScheduler>> {
        Arc::clone(&self.scheduler)
    }

    /// Gesture claim state of a source, for recognizer forwarding
    pub fn is_gesture_claimed(&self, source: ScrollSourceId) -> bool {
        self.registry.is_claimed(source)
    }

    pub fn active_scroll_source(&self) -> Option<ScrollSourceId> {
        self.tracker.active_source()
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    /// Set the (single, optional) reveal percentage listener
    pub fn set_on_reveal_changed(&mut self, listener: impl FnMut(RevealPercentage) + Send + 'static) {
        self.on_reveal_changed = Some(Box::new(listener));
    }

    /// Set the (single, optional) terminal position listener
    pub fn set_on_position_reached(
        &mut self,
        listener: impl FnMut(HeaderPosition) + Send + 'static,
    ) {
        self.on_position_reached = Some(Box::new(listener));
    }

    // =========================================================================
    // Page wiring
    // =========================================================================

    /// Register a scrollable content view for a page.
    ///
    /// The first source registered for a page becomes its primary one; if the
    /// page is currently selected, the tracker attaches to it immediately.
    pub fn register_scroll_source(
        &mut self,
        page_index: usize,
        info: ScrollSourceInfo,
    ) -> Result<ScrollSourceId, ParallaxError> {
        if page_index >= self.pages.len() {
            return Err(ParallaxError::PageIndexOutOfBounds {
                index: page_index,
                pages: self.pages.len(),
            });
        }

        let id = self.registry.register(info);
        let page = &mut self.pages[page_index];
        let becomes_active = page_index == self.selected && page.sources.is_empty();
        page.sources.push(id);

        if becomes_active {
            self.tracker
                .on_active_source_changed(&mut self.registry, Some(id));
        }
        Ok(id)
    }

    /// Remove a scroll source whose view was destroyed.
    ///
    /// If it was the active source, the tracker detaches; observations from
    /// the stale handle are ignored from then on.
    pub fn remove_scroll_source(&mut self, id: ScrollSourceId) -> bool {
        if self.tracker.active_source() == Some(id) {
            self.tracker.on_active_source_changed(&mut self.registry, None);
        }
        for page in &mut self.pages {
            page.sources.retain(|s| *s != id);
        }
        self.registry.remove(id)
    }

    /// Update a source's insets (e.g. after a safe-area change)
    pub fn update_source_insets(
        &mut self,
        id: ScrollSourceId,
        content_inset: EdgeInsets,
        safe_area_inset: Option<EdgeInsets>,
    ) {
        self.registry.update_insets(id, content_inset, safe_area_inset);
    }

    /// Switch the visible page, exchanging the active scroll source
    pub fn select_page(&mut self, index: usize) {
        if index == self.selected {
            return;
        }
        if index >= self.pages.len() {
            tracing::warn!(index, pages = self.pages.len(), "page index out of bounds");
            return;
        }
        self.selected = index;
        tracing::debug!(index, "page selected");

        let primary = self.pages[index].sources.first().copied();
        self.tracker
            .on_active_source_changed(&mut self.registry, primary);
    }

    /// Select a tab programmatically, collapsing the header so the incoming
    /// page gets full height
    pub fn select_tab(&mut self, index: usize, animated: bool) {
        self.select_page(index);
        self.scroll_tab_bar(false, animated);
    }

    // =========================================================================
    // Input observations
    // =========================================================================

    /// Feed a scroll position change observed on a registered source.
    ///
    /// Returns what the caller must do with the source's own scroll: snap it
    /// back when the movement was redirected into the header, or let it
    /// through. A redirected gesture also cancels any in-flight animated
    /// command.
    pub fn on_scroll_observed(
        &mut self,
        source: ScrollSourceId,
        content_offset_y: f32,
        gesture_velocity_y: f32,
    ) -> ScrollDisposition {
        let before = self.coordinator.phase();

        if self.tracker.active_source() == Some(source) {
            if let Some(top_inset) = self.registry.effective_top_inset(source) {
                self.coordinator
                    .apply_overscroll(content_offset_y, top_inset);
            }
        }

        let dispo = self.tracker.on_scroll_observed(
            &mut self.registry,
            &mut self.coordinator,
            source,
            content_offset_y,
            gesture_velocity_y,
        );

        if matches!(dispo, ScrollDisposition::Redirected { .. }) {
            self.cancel_animation();
            self.notify_reveal();
            self.emit_position(before);
        }
        dispo
    }

    /// Feed a pan gesture on the host's own view.
    ///
    /// The gesture only engages when vertically dominant; while engaged it
    /// drags the header directly from the spacing recorded at gesture start.
    pub fn on_pan(&mut self, phase: PanPhase, translation: Point, velocity: Velocity) {
        match phase {
            PanPhase::Began => {
                self.pan.engaged = velocity.vertically_dominant();
                if self.pan.engaged {
                    self.cancel_animation();
                    self.pan.initial_spacing =
                        self.coordinator.reveal_offset() + self.coordinator.header_height();
                }
            }
            PanPhase::Changed => {
                if !self.pan.engaged {
                    return;
                }
                let before = self.coordinator.phase();
                let header_height = self.coordinator.header_height();
                let spacing = (self.pan.initial_spacing + translation.y)
                    .max(self.config.minimum_reveal_height)
                    .min(header_height);
                if self.coordinator.set_reveal_offset(spacing - header_height) {
                    self.notify_reveal();
                }
                self.emit_position(before);
            }
            PanPhase::Ended | PanPhase::Cancelled => {
                self.pan.engaged = false;
            }
        }
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Scroll the tab bar to the top (`to_top = true`, header fully revealed)
    /// or the bottom (header collapsed to the minimum reveal height)
    pub fn scroll_tab_bar(&mut self, to_top: bool, animated: bool) {
        let target = if to_top {
            self.coordinator.expanded_offset()
        } else {
            self.coordinator.collapsed_offset()
        };
        self.move_to_offset(target, animated);
    }

    /// Change the expanded header height.
    ///
    /// Idempotent for an unchanged height. A change recomputes the offset
    /// range, notifies listeners, and re-expands the header.
    pub fn set_header_height(&mut self, new_height: f32, animated: bool) {
        if !self.coordinator.set_header_height(new_height) {
            return;
        }
        tracing::debug!(new_height, "header height changed");
        self.notify_reveal();
        self.move_to_offset(self.coordinator.expanded_offset(), animated);
    }

    /// Install (or clear) the header content view and its height
    pub fn set_header_view(&mut self, view: Option<ViewHandle>, height: f32) {
        self.header_view = view;
        self.set_header_height(height, false);
    }

    /// Install (or clear) the supplementary strip pinned to the header bottom
    pub fn set_supplementary_view(&mut self, view: Option<ViewHandle>) {
        self.supplementary_view = view;
    }

    /// Change the supplementary strip height
    pub fn set_supplementary_height(&mut self, height: f32) {
        self.supplementary_height = height.max(0.0);
    }

    /// Toggle the overscroll stretch effect at runtime
    pub fn set_stretchy(&mut self, stretchy: bool) {
        self.config.is_stretchy = stretchy;
        self.coordinator.set_top_mode(if stretchy {
            TabBarTopMode::InsetAttached
        } else {
            TabBarTopMode::TopAttached
        });
    }

    // =========================================================================
    // Frame driving
    // =========================================================================

    /// Advance in-flight animations by `dt` seconds.
    ///
    /// Returns whether an animation is still running; callers stop ticking
    /// when it goes false.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(animation) = self.animation else {
            return false;
        };
        let before = self.coordinator.phase();

        let mut scheduler = self.scheduler.lock().unwrap();
        scheduler.advance(dt);
        let current_offset = self.coordinator.reveal_offset();
        let (value, finished) = match animation {
            HeaderAnimation::Tween(id) => scheduler
                .get_tween(id)
                .map(|t| (t.value(), t.is_finished()))
                .unwrap_or((current_offset, true)),
            HeaderAnimation::Spring(id) => scheduler
                .get_spring(id)
                .map(|s| (s.value(), s.is_settled()))
                .unwrap_or((current_offset, true)),
        };
        drop(scheduler);

        if self.coordinator.animate_to(value) {
            self.notify_reveal();
        }

        if finished {
            self.remove_animation(animation);
            self.animation = None;
            self.coordinator.settle_animation();
        }
        self.emit_position(before);

        self.animation.is_some()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn move_to_offset(&mut self, target: f32, animated: bool) {
        self.cancel_animation();
        let before = self.coordinator.phase();

        if !animated {
            if self.coordinator.set_reveal_offset(target) {
                self.notify_reveal();
            }
            self.emit_position(before);
            return;
        }

        let current = self.coordinator.reveal_offset();
        if current == target {
            return;
        }

        self.coordinator.begin_animation();
        let mut scheduler = self.scheduler.lock().unwrap();
        let animation = match self.config.animation {
            AnimationProfile::Tween { duration, easing } => {
                HeaderAnimation::Tween(scheduler.add_tween(Tween::new(
                    current, target, duration, easing,
                )))
            }
            AnimationProfile::Spring(config) => {
                let mut spring = Spring::new(config, current);
                spring.set_target(target);
                HeaderAnimation::Spring(scheduler.add_spring(spring))
            }
        };
        drop(scheduler);
        self.animation = Some(animation);
    }

    fn cancel_animation(&mut self) {
        if let Some(animation) = self.animation.take() {
            self.remove_animation(animation);
            self.coordinator.settle_animation();
        }
    }

    fn remove_animation(&mut self, animation: HeaderAnimation) {
        let mut scheduler = self.scheduler.lock().unwrap();
        match animation {
            HeaderAnimation::Tween(id) => {
                scheduler.remove_tween(id);
            }
            HeaderAnimation::Spring(id) => {
                scheduler.remove_spring(id);
            }
        }
    }

    fn notify_reveal(&mut self) {
        let percentage = self.coordinator.reveal_percentage();
        if let Some(listener) = self.on_reveal_changed.as_mut() {
            listener(percentage);
        }
    }

    fn emit_position(&mut self, before: HeaderPhase) {
        let after = self.coordinator.phase();
        if after == before {
            return;
        }
        let position = match after {
            HeaderPhase::Expanded => Some(HeaderPosition::Expanded),
            HeaderPhase::Collapsed => Some(HeaderPosition::Collapsed),
            _ => None,
        };
        if let Some(position) = position {
            tracing::debug!(?position, "header reached terminal position");
            if let Some(listener) = self.on_position_reached.as_mut() {
                listener(position);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn tabs(n: usize) -> Vec<TabItem> {
        (0..n).map(|i| TabItem::new(format!("Tab {i}"))).collect()
    }

    fn views(n: usize) -> Vec<ViewHandle> {
        (0..n).map(|i| ViewHandle(i as u64)).collect()
    }

    fn host() -> ParallaxTabHost {
        ParallaxTabHost::new(views(2), tabs(2), ParallaxConfig::default()).unwrap()
    }

    fn source(offset: f32) -> ScrollSourceInfo {
        ScrollSourceInfo {
            content_offset_y: offset,
            content_inset: EdgeInsets::top_only(20.0),
            safe_area_inset: None,
        }
    }

    #[test]
    fn test_construction_contract() {
        assert_eq!(
            ParallaxTabHost::new(vec![], vec![], ParallaxConfig::default()).err(),
            Some(ParallaxError::EmptyPages)
        );
        assert_eq!(
            ParallaxTabHost::new(views(2), tabs(3), ParallaxConfig::default()).err(),
            Some(ParallaxError::PageTabMismatch { pages: 2, tabs: 3 })
        );
    }

    #[test]
    fn test_first_source_of_selected_page_attaches() {
        let mut host = host();
        let id = host.register_scroll_source(0, source(0.0)).unwrap();
        assert_eq!(host.active_scroll_source(), Some(id));
        assert!(host.is_gesture_claimed(id));
    }

    #[test]
    fn test_page_selection_exchanges_source() {
        let mut host = host();
        let a = host.register_scroll_source(0, source(0.0)).unwrap();
        let b = host.register_scroll_source(1, source(80.0)).unwrap();

        host.select_page(1);
        assert_eq!(host.active_scroll_source(), Some(b));
        assert!(!host.is_gesture_claimed(a));
        assert!(host.is_gesture_claimed(b));
    }

    #[test]
    fn test_scroll_collapses_and_notifies() {
        let mut host = host();
        let id = host.register_scroll_source(0, source(0.0)).unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        host.set_on_reveal_changed(move |pct| sink.lock().unwrap().push(pct.raw));

        let dispo = host.on_scroll_observed(id, 50.0, -100.0);
        assert_eq!(dispo, ScrollDisposition::Redirected { snap_back_to: 0.0 });
        assert_eq!(host.layout().header_top, -50.0);
        assert_eq!(host.layout().tab_bar_top, 150.0);
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_position_listener_fires_on_terminal_arrival() {
        let mut host = host();
        let id = host.register_scroll_source(0, source(0.0)).unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        host.set_on_position_reached(move |pos| sink.lock().unwrap().push(pos));

        // One giant delta collapses fully
        host.on_scroll_observed(id, 500.0, -100.0);
        assert_eq!(host.phase(), HeaderPhase::Collapsed);
        assert_eq!(seen.lock().unwrap().as_slice(), &[HeaderPosition::Collapsed]);
    }

    #[test]
    fn test_scroll_tab_bar_instant() {
        let mut host = host();
        let id = host.register_scroll_source(0, source(0.0)).unwrap();
        host.on_scroll_observed(id, 50.0, -100.0);

        host.scroll_tab_bar(false, false);
        // Target -200 clamps to the inset-aware floor of -180
        assert_eq!(host.layout().header_top, -180.0);
        assert_eq!(host.phase(), HeaderPhase::Collapsed);

        host.scroll_tab_bar(true, false);
        assert_eq!(host.layout().header_top, 0.0);
        assert_eq!(host.phase(), HeaderPhase::Expanded);
    }

    #[test]
    fn test_animated_scroll_converges_on_target() {
        let mut host = host();
        host.scroll_tab_bar(false, true);
        assert!(host.is_animating());
        assert_eq!(host.phase(), HeaderPhase::Animating);

        let mut guard = 0;
        while host.tick(1.0 / 60.0) {
            guard += 1;
            assert!(guard < 1000, "animation never settled");
        }
        // No inset observed yet: the floor is the full header travel
        assert_eq!(host.layout().header_top, -200.0);
        assert_eq!(host.phase(), HeaderPhase::Collapsed);
    }

    #[test]
    fn test_gesture_cancels_animation() {
        let mut host = host();
        let id = host.register_scroll_source(0, source(0.0)).unwrap();
        host.on_scroll_observed(id, 500.0, -100.0);

        host.scroll_tab_bar(true, true);
        host.tick(1.0 / 60.0);
        assert!(host.is_animating());

        // An applied user delta interrupts the programmatic scroll
        host.on_scroll_observed(id, -40.0, 100.0);
        assert!(!host.is_animating());
        let offset = host.layout().header_top;
        assert!(offset >= -180.0 && offset <= 0.0);
    }

    #[test]
    fn test_set_header_height_idempotent_and_reexpands() {
        let mut host = host();
        let id = host.register_scroll_source(0, source(0.0)).unwrap();
        host.on_scroll_observed(id, 500.0, -100.0);
        assert!(host.layout().header_top < 0.0);

        let seen = Arc::new(Mutex::new(0usize));
        let sink = seen.clone();
        host.set_on_reveal_changed(move |_| *sink.lock().unwrap() += 1);

        host.set_header_height(260.0, false);
        assert_eq!(host.layout().header_height, 260.0);
        assert_eq!(host.layout().header_top, 0.0);
        assert!(*seen.lock().unwrap() > 0);

        let notifications = *seen.lock().unwrap();
        host.set_header_height(260.0, false);
        assert_eq!(*seen.lock().unwrap(), notifications);
    }

    #[test]
    fn test_pan_drags_header() {
        let mut host = host();

        host.on_pan(
            PanPhase::Began,
            Point::ZERO,
            Velocity::new(10.0, -200.0),
        );
        host.on_pan(PanPhase::Changed, Point::new(0.0, -120.0), Velocity::ZERO);
        assert_eq!(host.layout().header_top, -120.0);

        host.on_pan(PanPhase::Ended, Point::ZERO, Velocity::ZERO);
        // Movement after the gesture ends is ignored
        host.on_pan(PanPhase::Changed, Point::new(0.0, -160.0), Velocity::ZERO);
        assert_eq!(host.layout().header_top, -120.0);
    }

    #[test]
    fn test_horizontal_pan_never_engages() {
        let mut host = host();
        host.on_pan(
            PanPhase::Began,
            Point::ZERO,
            Velocity::new(300.0, 40.0),
        );
        host.on_pan(PanPhase::Changed, Point::new(0.0, -120.0), Velocity::ZERO);
        assert_eq!(host.layout().header_top, 0.0);
    }

    #[test]
    fn test_stretchy_toggle_resets_transform() {
        let mut host = host();
        let id = host.register_scroll_source(0, source(0.0)).unwrap();

        host.on_scroll_observed(id, -60.0, 50.0);
        assert!(host.layout().header_scale > 1.0);

        host.set_stretchy(false);
        assert_eq!(host.layout().header_scale, 1.0);
        assert_eq!(host.layout().supplementary_gap, 0.0);

        // Top-attached mode stays identity under overscroll
        host.on_scroll_observed(id, -80.0, 50.0);
        assert_eq!(host.layout().header_scale, 1.0);
    }

    #[test]
    fn test_select_tab_collapses_header() {
        let mut host = host();
        host.register_scroll_source(0, source(0.0)).unwrap();
        host.register_scroll_source(1, source(0.0)).unwrap();

        host.select_tab(1, false);
        assert_eq!(host.selected_index(), 1);
        assert_eq!(host.phase(), HeaderPhase::Collapsed);
    }

    #[test]
    fn test_removed_source_observations_are_ignored() {
        let mut host = host();
        let id = host.register_scroll_source(0, source(0.0)).unwrap();
        assert!(host.remove_scroll_source(id));

        let dispo = host.on_scroll_observed(id, 50.0, -100.0);
        assert_eq!(dispo, ScrollDisposition::Ignored);
        assert_eq!(host.active_scroll_source(), None);
    }
}
