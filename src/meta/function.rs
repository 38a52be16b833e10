use super::cell::*;
use crate::exec::*;

use smallvec::*;
use std::fmt;
use std::sync::*;
use std::sync::atomic::{AtomicU64, Ordering};

/// The next function ID to assign (IDs are never reused)
static NEXT_FUNCTION_ID: AtomicU64 = AtomicU64::new(1);

/// A function implemented in Rust
pub type NativeFn = fn(&[CellRef]) -> RuntimeResult;

///
/// Identifies a function for the lifetime of the process
///
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct FunctionId(pub u64);

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

///
/// What a function does when it's called
///
#[derive(Clone)]
pub enum FunctionBody {
    /// Native function, can be called directly
    Native(NativeFn),

    /// Script function: the parameter names and the source of the body. These have to be compiled before they can run.
    Script(SmallVec<[String; 4]>, String)
}

impl fmt::Debug for FunctionBody {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FunctionBody::Native(native)            => write!(f, "Native(<fn#{:p}>)", *native as *const ()),
            FunctionBody::Script(params, source)    => write!(f, "Script(({}) {:?})", params.join(" "), source)
        }
    }
}

///
/// A function value
///
#[derive(Debug)]
pub struct ScriptFunction {
    /// Unique identity of this function
    id: FunctionId,

    /// The name the function was declared with
    name: String,

    /// The implementation of this function
    body: FunctionBody
}

impl ScriptFunction {
    fn new(name: &str, body: FunctionBody) -> Arc<ScriptFunction> {
        let id = FunctionId(NEXT_FUNCTION_ID.fetch_add(1, Ordering::Relaxed));

        Arc::new(ScriptFunction {
            id:     id,
            name:   String::from(name),
            body:   body
        })
    }

    ///
    /// Creates a function implemented in Rust
    ///
    pub fn native(name: &str, body: NativeFn) -> Arc<ScriptFunction> {
        Self::new(name, FunctionBody::Native(body))
    }

    ///
    /// Creates a function from script source that is waiting to be compiled
    ///
    pub fn script<ParamIter: IntoIterator<Item=Param>, Param: Into<String>>(name: &str, params: ParamIter, source: &str) -> Arc<ScriptFunction> {
        let params = params.into_iter().map(|param| param.into()).collect();

        Self::new(name, FunctionBody::Script(params, String::from(source)))
    }

    /// The identity of this function
    pub fn id(&self) -> FunctionId { self.id }

    /// The name of this function
    pub fn name(&self) -> &str { &self.name }

    /// The implementation of this function
    pub fn body(&self) -> &FunctionBody { &self.body }

    ///
    /// Calls this function with some arguments
    ///
    /// Script functions can't run until something has compiled them, so calling one is an error.
    ///
    pub fn call(&self, args: &[CellRef]) -> RuntimeResult {
        match &self.body {
            FunctionBody::Native(native)    => native(args),
            FunctionBody::Script(_, _)      => Err(RuntimeError::NotCallable(self.name.clone()))
        }
    }
}
