//! Crest Parallax
//!
//! Coordinates a collapsible parallax header with an embedded paged tab area.
//! The crate is headless: it owns no views and performs no layout itself.
//! Pages register their scrollable content views as sources and forward
//! scroll/pan observations; the host translates them into a resolved
//! [`HeaderLayout`] snapshot and reveal notifications, with directional
//! hysteresis (collapse only while scrolling down, expand only while
//! scrolling up) and an overscroll rubber-band stretch.
//!
//! # Example
//!
//! ```
//! use crest_core::EdgeInsets;
//! use crest_parallax::{
//!     ParallaxConfig, ParallaxTabHost, ScrollSourceInfo, TabItem, ViewHandle,
//! };
//!
//! let mut host = ParallaxTabHost::new(
//!     vec![ViewHandle(1), ViewHandle(2)],
//!     vec![TabItem::new("Posts"), TabItem::new("Likes")],
//!     ParallaxConfig::with_header_height(200.0),
//! )
//! .unwrap();
//!
//! let feed = host
//!     .register_scroll_source(
//!         0,
//!         ScrollSourceInfo {
//!             content_offset_y: 0.0,
//!             content_inset: EdgeInsets::top_only(20.0),
//!             safe_area_inset: None,
//!         },
//!     )
//!     .unwrap();
//!
//! // A downward scroll of 50 collapses the header by 50
//! host.on_scroll_observed(feed, 50.0, -120.0);
//! assert_eq!(host.layout().header_top, -50.0);
//! ```

pub mod config;
pub mod error;
pub mod header;
pub mod host;
pub mod tracker;

pub use config::{AnimationProfile, ParallaxConfig};
pub use error::ParallaxError;
pub use header::{
    HeaderCollapseCoordinator, HeaderLayout, HeaderPhase, OverscrollTransform, RevealPercentage,
    TabBarTopMode,
};
pub use host::{HeaderPosition, ParallaxTabHost, TabItem, ViewHandle};
pub use tracker::{
    ScrollDisposition, ScrollSourceId, ScrollSourceInfo, ScrollSourceRegistry, ScrollSourceTracker,
};
