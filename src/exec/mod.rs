//!
//! The exec module describes the run-time data structures that script code executes against:
//! the call stack and the variables each frame can see.
//!

mod frame;
mod variables;
mod runtime_error;

pub use self::frame::*;
pub use self::variables::*;
pub use self::runtime_error::*;
