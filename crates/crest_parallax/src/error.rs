//! Construction-contract errors
//!
//! Runtime numeric edge cases clamp or default instead of erroring; the only
//! failures this crate reports are programmer-contract violations caught at
//! wiring time.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParallaxError {
    #[error("a tab host requires at least one page")]
    EmptyPages,

    #[error("page count ({pages}) does not match tab descriptor count ({tabs})")]
    PageTabMismatch { pages: usize, tabs: usize },

    #[error("page index {index} out of bounds ({pages} pages)")]
    PageIndexOutOfBounds { index: usize, pages: usize },
}
