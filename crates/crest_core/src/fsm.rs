//! State transition trait for interaction states
//!
//! Components define their interaction states as plain enums and map events
//! to transitions by pattern matching:
//!
//! ```
//! use crest_core::fsm::{advance, StateTransitions};
//! use crest_core::events::event_types::*;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! enum DragState {
//!     Idle,
//!     Dragging,
//! }
//!
//! impl StateTransitions for DragState {
//!     fn on_event(&self, event: u32) -> Option<Self> {
//!         match (self, event) {
//!             (DragState::Idle, PAN_BEGIN) => Some(DragState::Dragging),
//!             (DragState::Dragging, PAN_END) => Some(DragState::Idle),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut state = DragState::Idle;
//! assert!(advance(&mut state, PAN_BEGIN));
//! assert_eq!(state, DragState::Dragging);
//! ```

use crate::events::EventType;

/// Trait for state types that handle event-driven transitions
///
/// Returning `None` means the event does not apply in the current state and
/// the state is left unchanged.
pub trait StateTransitions: Clone + Copy + PartialEq + Eq + std::fmt::Debug + 'static {
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventType) -> Option<Self>;
}

/// Advance a state in place, returning whether a transition occurred
pub fn advance<S: StateTransitions>(state: &mut S, event: EventType) -> bool {
    match state.on_event(event) {
        Some(next) => {
            tracing::trace!(?state, ?next, event, "state transition");
            *state = next;
            true
        }
        None => false,
    }
}
