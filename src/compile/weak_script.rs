use super::compiled_weak_fns::*;
use super::compilation_record::*;

use crate::meta::*;
use crate::exec::*;
use crate::bind::*;

use log::{debug};
use std::sync::*;
use std::result::{Result};

///
/// Marks a function as a weak script function
///
/// When used from a script function the weak script function is compiled lazily and inlined into
/// the caller's graph. Outside of script functions the tag has no effect. The function is returned
/// unchanged, so this can wrap a function definition.
///
/// Free variables in the function are resolved in the scope of `frame`, or `frames_up` frames
/// above it. Tagging a function again replaces its record. Fails with `CompilationTableInUse` if
/// this thread is holding the table returned by `compiled_weak_fns()`.
///
pub fn weak_script(function: Arc<ScriptFunction>, frame: &Frame, frames_up: usize) -> Result<Arc<ScriptFunction>, RuntimeError> {
    weak_script_in(&mut *compiled_weak_fns()?, function, frame, frames_up)
}

///
/// Marks a function as a weak script function, resolving its free variables with an explicit resolver
///
pub fn weak_script_with_resolver(function: Arc<ScriptFunction>, rcb: Arc<dyn NameResolver>) -> Result<Arc<ScriptFunction>, RuntimeError> {
    Ok(weak_script_with_resolver_in(&mut *compiled_weak_fns()?, function, rcb))
}

///
/// Marks a function as a weak script function in a specific compilation table
///
pub fn weak_script_in(table: &mut CompiledWeakFns, function: Arc<ScriptFunction>, frame: &Frame, frames_up: usize) -> Result<Arc<ScriptFunction>, RuntimeError> {
    // Capture the environment first so a bad frame offset leaves the table alone
    let rcb = create_resolution_callback(frame, frames_up)?;

    Ok(weak_script_with_resolver_in(table, function, Arc::new(rcb)))
}

///
/// Marks a function as a weak script function in a specific table, using an explicit resolver
///
pub fn weak_script_with_resolver_in(table: &mut CompiledWeakFns, function: Arc<ScriptFunction>, rcb: Arc<dyn NameResolver>) -> Arc<ScriptFunction> {
    let previous = table.insert(&function, CompilationRecord::pending(rcb));

    if previous.is_some() {
        debug!("Re-tagged '{}' (#{}) for compilation", function.name(), function.id());
    } else {
        debug!("Tagged '{}' (#{}) for compilation", function.name(), function.id());
    }

    function
}
