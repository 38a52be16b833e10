use crate::meta::*;
use crate::bind::*;

use std::fmt;
use std::sync::*;

///
/// Where a tagged function is in the compilation process
///
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum CompilationStatus {
    /// Tagged but not compiled yet
    Pending,

    /// The compiler has produced a compiled form
    Compiled
}

///
/// The compiled form of a function, as produced by the script compiler
///
#[derive(Clone, Debug)]
pub struct CompiledFunction {
    /// The function this was compiled from
    pub function_id: FunctionId,

    /// The graph the compiler generated
    pub graph: String
}

///
/// What the compiler needs to know about a tagged function
///
#[derive(Clone)]
pub struct CompilationRecord {
    /// Whether or not the function has been compiled
    pub status: CompilationStatus,

    /// The compiled function (None until the status is Compiled)
    pub compiled_fn: Option<CompiledFunction>,

    /// Resolves the free variables in the function body
    pub rcb: Arc<dyn NameResolver>
}

impl CompilationRecord {
    ///
    /// Creates the record for a function that has just been tagged
    ///
    pub fn pending(rcb: Arc<dyn NameResolver>) -> CompilationRecord {
        CompilationRecord {
            status:         CompilationStatus::Pending,
            compiled_fn:    None,
            rcb:            rcb
        }
    }

    /// True if this function is still waiting for the compiler
    pub fn is_pending(&self) -> bool { self.status == CompilationStatus::Pending }
}

impl fmt::Debug for CompilationRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CompilationRecord")
            .field("status", &self.status)
            .field("compiled_fn", &self.compiled_fn)
            .field("rcb", &format_args!("<resolver#{:p}>", Arc::as_ptr(&self.rcb)))
            .finish()
    }
}
