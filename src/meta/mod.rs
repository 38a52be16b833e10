//!
//! The meta module describes the values that script code can see: cells, functions and the
//! interned names used to bind them.
//!

mod cell;
mod names;
mod function;

pub use self::cell::*;
pub use self::names::*;
pub use self::function::*;
