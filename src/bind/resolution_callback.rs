use super::builtins::*;

use crate::meta::*;
use crate::exec::*;

use log::{trace};
use std::result::{Result};

///
/// Trait implemented by things that can look up the value of a free variable by name
///
pub trait NameResolver : Send+Sync {
    /// Returns the value bound to a name, or None if nothing is bound to it
    fn resolve(&self, name: &str) -> Option<CellRef>;
}

impl<ResolveFn> NameResolver for ResolveFn
where ResolveFn: Send+Sync+Fn(&str) -> Option<CellRef> {
    fn resolve(&self, name: &str) -> Option<CellRef> {
        (self)(name)
    }
}

///
/// Resolves names against the variables visible from a frame
///
/// The callback holds the frame's variable maps rather than a copy of them, so assignments made
/// after the callback was created are visible through it.
///
#[derive(Clone, Debug)]
pub struct ResolutionCallback {
    /// The local variables of the captured frame
    locals: VariableMap,

    /// The global variables of the captured frame
    globals: VariableMap
}

impl ResolutionCallback {
    ///
    /// Captures the variables visible from a frame
    ///
    pub fn for_frame(frame: &Frame) -> ResolutionCallback {
        ResolutionCallback {
            locals:     frame.locals().clone(),
            globals:    frame.globals().clone()
        }
    }

    /// The local variables this callback reads from
    pub fn locals(&self) -> &VariableMap { &self.locals }

    /// The global variables this callback reads from
    pub fn globals(&self) -> &VariableMap { &self.globals }
}

impl NameResolver for ResolutionCallback {
    fn resolve(&self, name: &str) -> Option<CellRef> {
        self.locals.get(name)
            .or_else(|| self.globals.get(name))
            .or_else(|| look_up_builtin(name))
    }
}

///
/// Creates a callback that resolves names in the scope of a frame on the call stack
///
/// `frame` is the frame of the code asking for the callback. `frames_up` is the number of additional
/// frames to go up the stack: 0 captures `frame` itself, 1 captures the frame that called it, and
/// so on.
///
pub fn create_resolution_callback(frame: &Frame, frames_up: usize) -> Result<ResolutionCallback, RuntimeError> {
    let target = frame.frame_up(frames_up)?;

    trace!("Capturing resolution callback {} frames up in {}", frames_up, target.function_name().unwrap_or("<module>"));

    Ok(ResolutionCallback::for_frame(target))
}
