//! # Utilities
pub mod timers;

#[doc(inline)]
pub use timers::timeit;
