//! Crest Core Primitives
//!
//! This crate provides the foundational primitives for the Crest composition
//! layer:
//!
//! - **Geometry**: points, velocities, and edge insets
//! - **Inset Capability**: safe-area-aware top inset resolution, decided once
//! - **Input Events**: event type constants and pan gesture phases
//! - **State Transitions**: the trait interaction state machines implement

pub mod events;
pub mod fsm;
pub mod geometry;

pub use events::{EventType, PanPhase};
pub use fsm::{advance, StateTransitions};
pub use geometry::{EdgeInsets, InsetResolver, Point, Velocity};
