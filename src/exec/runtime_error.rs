use crate::meta::*;

use std::result::{Result};
use thiserror::Error;

///
/// Error that can occur while running or preparing script code
///
#[derive(Clone, Debug, Error)]
pub enum RuntimeError {
    /// Tried to look further up the call stack than there are frames (requested offset, actual depth)
    #[error("frame {0} is out of range: the stack is only {1} frames deep")]
    FrameOutOfRange(usize, usize),

    /// Value cannot be called as a function
    #[error("{0} is not a function")]
    NotAFunction(CellRef),

    /// Expected a particular type of cell, but a different type was encountered
    #[error("unexpected value {0}")]
    TypeMismatch(CellRef),

    /// Too many arguments were passed to a function (the maximum number of arguments)
    #[error("too many arguments: expected at most {0}")]
    TooManyArguments(usize),

    /// Not enough arguments were passed to a function (the minimum number of arguments)
    #[error("not enough arguments: expected at least {0}")]
    NotEnoughArguments(usize),

    /// The named function has not been compiled yet so it can't be called
    #[error("'{0}' must be compiled before it can be called")]
    NotCallable(String),

    /// The named function has already finished compiling
    #[error("'{0}' has already been compiled")]
    AlreadyCompiled(String),

    /// The function is not in the compilation table
    #[error("function #{0} is not tagged for compilation")]
    NotTagged(FunctionId),

    /// The result of an arithmetic operation doesn't fit in an integer
    #[error("number too large")]
    NumberTooLarge,

    /// The current thread is already holding the compilation table
    #[error("the compilation table is already in use on this thread")]
    CompilationTableInUse,

    /// An assignment was not in the form `name=value`
    #[error("'{0}' is not an assignment of the form name=value")]
    InvalidAssignment(String)
}

/// The result of a runtime operation
pub type RuntimeResult = Result<CellRef, RuntimeError>;
