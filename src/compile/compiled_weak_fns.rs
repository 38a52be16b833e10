use super::compilation_record::*;

use crate::meta::*;
use crate::exec::*;

use log::{debug};
use std::sync::*;
use std::cell::{Cell};
use std::ops::{Deref, DerefMut};
use std::result::{Result};
use std::collections::{HashMap};

/// The table isn't purged while it holds fewer entries than this
const MIN_PURGE_THRESHOLD: usize = 64;

lazy_static! {
    static ref COMPILED_WEAK_FNS: Mutex<CompiledWeakFns> = Mutex::new(CompiledWeakFns::new());
}

thread_local! {
    /// True while this thread holds the process-wide table
    static HOLDING_TABLE: Cell<bool> = Cell::new(false);
}

///
/// Access to the process-wide compilation table, released when dropped
///
pub struct CompiledWeakFnsGuard {
    table: MutexGuard<'static, CompiledWeakFns>
}

impl Deref for CompiledWeakFnsGuard {
    type Target = CompiledWeakFns;

    fn deref(&self) -> &CompiledWeakFns { &self.table }
}

impl DerefMut for CompiledWeakFnsGuard {
    fn deref_mut(&mut self) -> &mut CompiledWeakFns { &mut self.table }
}

impl Drop for CompiledWeakFnsGuard {
    fn drop(&mut self) {
        HOLDING_TABLE.with(|holding| holding.set(false));
    }
}

///
/// Retrieves the process-wide table of functions tagged for compilation
///
/// The table can only be held once per thread: while a guard is alive, other requests from the same
/// thread (including `weak_script`) fail with `CompilationTableInUse`. Other threads wait for the
/// guard to be dropped.
///
pub fn compiled_weak_fns() -> Result<CompiledWeakFnsGuard, RuntimeError> {
    if HOLDING_TABLE.with(|holding| holding.get()) {
        return Err(RuntimeError::CompilationTableInUse);
    }

    let table = COMPILED_WEAK_FNS.lock().unwrap();
    HOLDING_TABLE.with(|holding| holding.set(true));

    Ok(CompiledWeakFnsGuard { table })
}

///
/// Runs an action against the process-wide compilation table
///
pub fn with_compiled_weak_fns<TResult, ActionFn: FnOnce(&mut CompiledWeakFns) -> TResult>(action: ActionFn) -> Result<TResult, RuntimeError> {
    let mut table = compiled_weak_fns()?;

    Ok(action(&mut table))
}

///
/// A tagged function and its record
///
struct WeakEntry {
    /// The function (the table doesn't keep it alive)
    function: Weak<ScriptFunction>,

    /// The compilation state of the function
    record: CompilationRecord
}

impl WeakEntry {
    fn is_live(&self) -> bool {
        self.function.strong_count() > 0
    }
}

///
/// Maps functions to their compilation records without owning the functions
///
/// Once the last reference to a function is dropped its record can no longer be retrieved. Dead
/// records are removed by `purge()`, which `insert` calls each time the table doubles in size.
///
pub struct CompiledWeakFns {
    entries: HashMap<FunctionId, WeakEntry>,

    /// `insert` purges the table when it reaches this many entries
    purge_threshold: usize
}

impl Default for CompiledWeakFns {
    fn default() -> CompiledWeakFns {
        CompiledWeakFns {
            entries:            HashMap::new(),
            purge_threshold:    MIN_PURGE_THRESHOLD
        }
    }
}

impl CompiledWeakFns {
    ///
    /// Creates an empty table
    ///
    pub fn new() -> CompiledWeakFns {
        CompiledWeakFns::default()
    }

    ///
    /// Stores the record for a function, returning the record it replaces
    ///
    pub fn insert(&mut self, function: &Arc<ScriptFunction>, record: CompilationRecord) -> Option<CompilationRecord> {
        if self.entries.len() >= self.purge_threshold {
            self.purge();
            self.purge_threshold = usize::max(MIN_PURGE_THRESHOLD, self.entries.len() * 2);
        }

        let entry = WeakEntry { function: Arc::downgrade(function), record: record };

        self.entries.insert(function.id(), entry).map(|previous| previous.record)
    }

    ///
    /// Retrieves the record for a function
    ///
    pub fn record_for(&self, function: &ScriptFunction) -> Option<&CompilationRecord> {
        self.record_for_id(function.id())
    }

    ///
    /// Retrieves the record for the function with the specified ID, provided it's still alive
    ///
    pub fn record_for_id(&self, function_id: FunctionId) -> Option<&CompilationRecord> {
        self.entries.get(&function_id)
            .filter(|entry| entry.is_live())
            .map(|entry| &entry.record)
    }

    ///
    /// Retrieves the compilation status for a function (None if the function is not tagged)
    ///
    pub fn status_for(&self, function: &ScriptFunction) -> Option<CompilationStatus> {
        self.record_for(function).map(|record| record.status)
    }

    /// True if the function is tagged for compilation
    pub fn contains(&self, function: &ScriptFunction) -> bool { self.record_for(function).is_some() }

    ///
    /// Stores the result of compiling a function
    ///
    /// This is the only way out of the pending state. A function that is already compiled has to be
    /// tagged again before it can be recompiled.
    ///
    pub fn mark_compiled(&mut self, function: &ScriptFunction, graph: String) -> Result<&CompilationRecord, RuntimeError> {
        let function_id = function.id();
        let entry       = self.entries.get_mut(&function_id)
            .filter(|entry| entry.is_live())
            .ok_or(RuntimeError::NotTagged(function_id))?;

        if entry.record.status == CompilationStatus::Compiled {
            return Err(RuntimeError::AlreadyCompiled(function.name().to_string()));
        }

        debug!("Compiled '{}' (#{})", function.name(), function_id);

        entry.record.status         = CompilationStatus::Compiled;
        entry.record.compiled_fn    = Some(CompiledFunction { function_id, graph });

        Ok(&entry.record)
    }

    ///
    /// Removes a function from the table (eg, when its owner is torn down)
    ///
    pub fn deregister(&mut self, function_id: FunctionId) -> Option<CompilationRecord> {
        self.entries.remove(&function_id).map(|entry| entry.record)
    }

    ///
    /// Removes the records of any functions that no longer exist, returning how many were removed
    ///
    pub fn purge(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_id, entry| entry.is_live());
        let removed = before - self.entries.len();

        if removed > 0 {
            debug!("Purged {} compilation records for dropped functions", removed);
        }

        removed
    }

    /// The number of live functions in this table
    pub fn len(&self) -> usize { self.entries.values().filter(|entry| entry.is_live()).count() }

    /// True if there are no live functions in this table
    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bind::*;

    fn pending_record() -> CompilationRecord {
        let frame = Frame::new_module(VariableMap::new());

        CompilationRecord::pending(Arc::new(ResolutionCallback::for_frame(&frame)))
    }

    #[test]
    fn new_records_are_pending() {
        let mut table   = CompiledWeakFns::new();
        let function    = ScriptFunction::script("f", vec!["x"], "x");

        table.insert(&function, pending_record());

        let record = table.record_for(&function).unwrap();
        assert!(record.is_pending());
        assert!(record.compiled_fn.is_none());
        assert!(table.status_for(&function) == Some(CompilationStatus::Pending));
    }

    #[test]
    fn insert_replaces_record() {
        let mut table   = CompiledWeakFns::new();
        let function    = ScriptFunction::script("f", vec!["x"], "x");

        assert!(table.insert(&function, pending_record()).is_none());
        assert!(table.insert(&function, pending_record()).is_some());
        assert!(table.len() == 1);
    }

    #[test]
    fn mark_function_compiled() {
        let mut table   = CompiledWeakFns::new();
        let function    = ScriptFunction::script("f", vec!["x"], "x");
        table.insert(&function, pending_record());

        let record      = table.mark_compiled(&function, "graph(%x) { return %x }".to_string()).unwrap();

        assert!(record.status == CompilationStatus::Compiled);
        assert!(record.compiled_fn.as_ref().unwrap().function_id == function.id());
        assert!(table.status_for(&function) == Some(CompilationStatus::Compiled));
    }

    #[test]
    fn cannot_compile_twice() {
        let mut table   = CompiledWeakFns::new();
        let function    = ScriptFunction::script("twice", vec!["x"], "x");
        table.insert(&function, pending_record());
        table.mark_compiled(&function, "graph".to_string()).unwrap();

        match table.mark_compiled(&function, "graph".to_string()) {
            Err(RuntimeError::AlreadyCompiled(name))    => assert!(name == "twice".to_string()),
            _                                           => assert!(false)
        }
    }

    #[test]
    fn retagging_resets_to_pending() {
        let mut table   = CompiledWeakFns::new();
        let function    = ScriptFunction::script("f", vec!["x"], "x");
        table.insert(&function, pending_record());
        table.mark_compiled(&function, "graph".to_string()).unwrap();

        table.insert(&function, pending_record());

        assert!(table.status_for(&function) == Some(CompilationStatus::Pending));
        assert!(table.record_for(&function).unwrap().compiled_fn.is_none());
    }

    #[test]
    fn cannot_compile_untagged_function() {
        let mut table   = CompiledWeakFns::new();
        let function    = ScriptFunction::script("f", vec!["x"], "x");

        match table.mark_compiled(&function, "graph".to_string()) {
            Err(RuntimeError::NotTagged(id))    => assert!(id == function.id()),
            _                                   => assert!(false)
        }
    }

    #[test]
    fn dropped_functions_disappear() {
        let mut table   = CompiledWeakFns::new();
        let kept        = ScriptFunction::script("kept", vec!["x"], "x");
        let dropped     = ScriptFunction::script("dropped", vec!["x"], "x");
        let dropped_id  = dropped.id();

        table.insert(&kept, pending_record());
        table.insert(&dropped, pending_record());
        assert!(table.len() == 2);

        drop(dropped);

        assert!(table.record_for_id(dropped_id).is_none());
        assert!(table.len() == 1);
        assert!(table.purge() == 1);
        assert!(table.purge() == 0);
        assert!(table.contains(&kept));
    }

    #[test]
    fn table_does_not_keep_functions_alive() {
        let mut table   = CompiledWeakFns::new();
        let function    = ScriptFunction::script("f", vec!["x"], "x");

        table.insert(&function, pending_record());

        assert!(Arc::strong_count(&function) == 1);
    }

    #[test]
    fn dead_entries_are_purged_in_batches() {
        let mut table = CompiledWeakFns::new();

        for _ in 0..(MIN_PURGE_THRESHOLD * 4) {
            let function = ScriptFunction::script("short_lived", vec!["x"], "x");
            table.insert(&function, pending_record());
        }

        assert!(table.is_empty());
        assert!(table.entries.len() > 1);
        assert!(table.entries.len() <= MIN_PURGE_THRESHOLD);
    }

    #[test]
    fn live_entries_survive_batch_purges() {
        let mut table   = CompiledWeakFns::new();
        let kept        = (0..MIN_PURGE_THRESHOLD).map(|_| ScriptFunction::script("kept", vec!["x"], "x")).collect::<Vec<_>>();

        for function in kept.iter() {
            table.insert(function, pending_record());
        }

        for _ in 0..(MIN_PURGE_THRESHOLD * 2) {
            let function = ScriptFunction::script("short_lived", vec!["x"], "x");
            table.insert(&function, pending_record());
        }

        assert!(table.len() == MIN_PURGE_THRESHOLD);
        assert!(kept.iter().all(|function| table.contains(function)));
    }

    #[test]
    fn table_can_only_be_held_once_per_thread() {
        let table = compiled_weak_fns().unwrap();

        match compiled_weak_fns() {
            Err(RuntimeError::CompilationTableInUse)    => { }
            _                                           => assert!(false)
        }

        match with_compiled_weak_fns(|table| table.len()) {
            Err(RuntimeError::CompilationTableInUse)    => { }
            _                                           => assert!(false)
        }

        drop(table);

        assert!(with_compiled_weak_fns(|table| table.purge()).is_ok());
    }

    #[test]
    fn deregister_function() {
        let mut table   = CompiledWeakFns::new();
        let function    = ScriptFunction::script("f", vec!["x"], "x");
        table.insert(&function, pending_record());

        assert!(table.deregister(function.id()).is_some());
        assert!(!table.contains(&function));
        assert!(table.is_empty());
    }
}
