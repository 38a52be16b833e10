//!
//! Support for lazily compiled ('weak') script functions.
//!
//! `create_resolution_callback` captures the variables visible from a frame on the call stack so
//! that the script compiler can resolve the free names in a function body later on. `weak_script`
//! tags a function for lazy compilation, storing its status and captured environment in a table
//! that doesn't keep the function alive.
//!

#[macro_use] extern crate lazy_static;

pub mod meta;
pub mod exec;
pub mod bind;
pub mod compile;
pub mod logger;

pub use crate::meta::*;
pub use crate::exec::*;
pub use crate::bind::*;
pub use crate::compile::*;
pub use crate::logger::*;
