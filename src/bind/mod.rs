//!
//! The bind module resolves free variable names to values: it captures the environment visible
//! from a frame and provides the process-wide built-in names that sit behind it.
//!

mod builtins;
mod resolution_callback;

pub use self::builtins::*;
pub use self::resolution_callback::*;
