use super::variables::*;
use super::runtime_error::*;

use crate::meta::*;

use std::result::{Result};

///
/// An execution frame: one entry on the call stack
///
/// Frames are owned by the frame that replaces them at the top of the stack, so the stack is a
/// linked list running from the innermost call out to the module level.
///
#[derive(Debug)]
pub struct Frame {
    /// The frame above this one on the stack (the caller)
    previous_frame: Option<Box<Frame>>,

    /// The name of the function this frame is running, or None for module-level code
    function_name: Option<String>,

    /// Variables local to this frame
    locals: VariableMap,

    /// Variables global to the module this frame's code belongs to
    globals: VariableMap
}

impl Frame {
    ///
    /// Creates the frame for module-level code
    ///
    /// At module level the locals and the globals are the same set of variables.
    ///
    pub fn new_module(globals: VariableMap) -> Frame {
        Frame {
            previous_frame: None,
            function_name:  None,
            locals:         globals.clone(),
            globals:        globals
        }
    }

    ///
    /// Pushes a frame for a call to a function defined in the same module as this frame
    ///
    pub fn push_call(self, function_name: &str) -> Frame {
        let globals = self.globals.clone();

        self.push_call_with_globals(function_name, globals)
    }

    ///
    /// Pushes a frame for a call to a function defined in a module with the specified globals
    ///
    pub fn push_call_with_globals(self, function_name: &str, globals: VariableMap) -> Frame {
        Frame {
            previous_frame: Some(Box::new(self)),
            function_name:  Some(String::from(function_name)),
            locals:         VariableMap::new(),
            globals:        globals
        }
    }

    ///
    /// Pops this frame from the stack, returning the calling frame
    ///
    pub fn pop(self) -> Option<Frame> {
        self.previous_frame.map(|frame| *frame)
    }

    /// The frame that called this one
    pub fn previous(&self) -> Option<&Frame> { self.previous_frame.as_deref() }

    /// The function this frame is running
    pub fn function_name(&self) -> Option<&str> { self.function_name.as_deref() }

    /// The variables local to this frame
    pub fn locals(&self) -> &VariableMap { &self.locals }

    /// The global variables for this frame
    pub fn globals(&self) -> &VariableMap { &self.globals }

    ///
    /// Assigns a local variable in this frame
    ///
    pub fn set_local(&self, name: &str, value: CellRef) -> Option<CellRef> {
        self.locals.set(name, value)
    }

    ///
    /// Assigns a global variable for this frame
    ///
    pub fn set_global(&self, name: &str, value: CellRef) -> Option<CellRef> {
        self.globals.set(name, value)
    }

    ///
    /// The number of frames on the stack, including this one
    ///
    pub fn depth(&self) -> usize {
        let mut depth   = 1;
        let mut frame   = self;

        while let Some(previous) = frame.previous() {
            depth += 1;
            frame = previous;
        }

        depth
    }

    ///
    /// Finds the frame a number of calls up from this one (0 is this frame, 1 is its caller and so on)
    ///
    pub fn frame_up(&self, frames_up: usize) -> Result<&Frame, RuntimeError> {
        let mut frame = self;

        for _ in 0..frames_up {
            frame = match frame.previous() {
                Some(previous)  => previous,
                None            => return Err(RuntimeError::FrameOutOfRange(frames_up, self.depth()))
            };
        }

        Ok(frame)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::*;

    #[test]
    fn module_locals_are_globals() {
        let frame = Frame::new_module(VariableMap::new());
        frame.set_local("x", Arc::new(ScriptCell::Int(1)));

        assert!(frame.locals().shares_storage_with(frame.globals()));
        assert!(frame.globals().get("x").is_some());
        assert!(frame.function_name().is_none());
    }

    #[test]
    fn calls_share_globals_but_not_locals() {
        let module  = Frame::new_module(VariableMap::new());
        let call    = module.push_call("f");
        call.set_local("local_only", NIL.clone());

        assert!(call.function_name() == Some("f"));
        assert!(!call.locals().shares_storage_with(call.globals()));
        assert!(call.previous().unwrap().globals().shares_storage_with(call.globals()));
        assert!(call.globals().get("local_only").is_none());
    }

    #[test]
    fn push_and_pop() {
        let frame = Frame::new_module(VariableMap::new());
        let frame = frame.push_call("a");
        let frame = frame.push_call("b");

        assert!(frame.depth() == 3);

        let frame = frame.pop().unwrap();
        assert!(frame.function_name() == Some("a"));
        assert!(frame.depth() == 2);

        let frame = frame.pop().unwrap();
        assert!(frame.pop().is_none());
    }

    #[test]
    fn walk_up_the_stack() {
        let frame = Frame::new_module(VariableMap::new()).push_call("a").push_call("b");

        assert!(frame.frame_up(0).unwrap().function_name() == Some("b"));
        assert!(frame.frame_up(1).unwrap().function_name() == Some("a"));
        assert!(frame.frame_up(2).unwrap().function_name().is_none());
    }

    #[test]
    fn walk_past_the_top_of_the_stack() {
        let frame = Frame::new_module(VariableMap::new()).push_call("a");

        match frame.frame_up(2) {
            Err(RuntimeError::FrameOutOfRange(2, 2))    => { }
            _                                           => assert!(false)
        }
    }
}
