//! Scheduling primitives for the storefront.
//!
//! This crate provides the few time-driven behaviors the storefront has:
//! - `PreloadQueue` - Bounded, FIFO image preloading
//! - `Debouncer` - Run an action once a burst of triggers settles
//! - `SlideRotator` - Advance a slide index on a fixed interval

mod debounce;
mod error;
mod preload;
mod rotation;

pub use debounce::*;
pub use error::PreloadError;
pub use preload::*;
pub use rotation::*;
