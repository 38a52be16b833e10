//!
//! The compile module tracks which functions are waiting to be compiled by the script compiler,
//! along with the environment their free variables should be resolved in.
//!

mod compilation_record;
mod compiled_weak_fns;
mod weak_script;

pub use self::compilation_record::*;
pub use self::compiled_weak_fns::*;
pub use self::weak_script::*;
