use crate::meta::*;
use crate::exec::*;

use itertools::*;
use log::{debug};
use std::sync::*;

lazy_static! {
    /// The names every script can see, unless a local or global variable shadows them
    static ref BUILTINS: VariableMap = standard_builtins();
}

///
/// Looks up a built-in name
///
pub fn look_up_builtin(name: &str) -> Option<CellRef> {
    BUILTINS.get(name)
}

///
/// Adds (or replaces) a built-in name, returning the value it replaced
///
pub fn register_builtin(name: &str, value: CellRef) -> Option<CellRef> {
    debug!("Registering builtin '{}'", name);

    BUILTINS.set(name, value)
}

///
/// The names that are currently built in
///
pub fn builtin_names() -> Vec<String> {
    BUILTINS.names()
}

///
/// Creates the standard set of built-in names
///
fn standard_builtins() -> VariableMap {
    let natives = vec![
        ("len",     len_fn as NativeFn),
        ("abs",     abs_fn as NativeFn),
        ("min",     min_fn as NativeFn),
        ("max",     max_fn as NativeFn),
        ("list",    list_fn as NativeFn),
        ("print",   print_fn as NativeFn)
    ];

    let builtins = VariableMap::new();

    for (name, native) in natives {
        builtins.set(name, Arc::new(ScriptCell::Function(ScriptFunction::native(name, native))));
    }

    builtins.set("true",    Arc::new(ScriptCell::Bool(true)));
    builtins.set("false",   Arc::new(ScriptCell::Bool(false)));
    builtins.set("nil",     NIL.clone());

    builtins
}

///
/// Reads the single argument passed to a function
///
fn single_arg(args: &[CellRef]) -> RuntimeResult {
    match args.len() {
        0 => Err(RuntimeError::NotEnoughArguments(1)),
        1 => Ok(Arc::clone(&args[0])),
        _ => Err(RuntimeError::TooManyArguments(1))
    }
}

///
/// Reads the integer arguments passed to a function
///
fn int_args(args: &[CellRef]) -> Result<Vec<i128>, RuntimeError> {
    args.iter()
        .map(|arg| match &**arg {
            ScriptCell::Int(val)    => Ok(*val),
            _                       => Err(RuntimeError::TypeMismatch(Arc::clone(arg)))
        })
        .collect()
}

/// `(len x)`: the number of items in a list or characters in a string
fn len_fn(args: &[CellRef]) -> RuntimeResult {
    let arg = single_arg(args)?;

    match &*arg {
        ScriptCell::List(items)     => Ok(Arc::new(ScriptCell::Int(items.len() as i128))),
        ScriptCell::String(val)     => Ok(Arc::new(ScriptCell::Int(val.chars().count() as i128))),
        _                           => Err(RuntimeError::TypeMismatch(arg))
    }
}

/// `(abs x)`
fn abs_fn(args: &[CellRef]) -> RuntimeResult {
    let arg = single_arg(args)?;

    match &*arg {
        ScriptCell::Int(val)    => Ok(Arc::new(ScriptCell::Int(val.checked_abs().ok_or(RuntimeError::NumberTooLarge)?))),
        _                       => Err(RuntimeError::TypeMismatch(arg))
    }
}

/// `(min x y ...)`
fn min_fn(args: &[CellRef]) -> RuntimeResult {
    let min = int_args(args)?.into_iter().min().ok_or(RuntimeError::NotEnoughArguments(1))?;

    Ok(Arc::new(ScriptCell::Int(min)))
}

/// `(max x y ...)`
fn max_fn(args: &[CellRef]) -> RuntimeResult {
    let max = int_args(args)?.into_iter().max().ok_or(RuntimeError::NotEnoughArguments(1))?;

    Ok(Arc::new(ScriptCell::Int(max)))
}

/// `(list x y ...)`
fn list_fn(args: &[CellRef]) -> RuntimeResult {
    Ok(Arc::new(ScriptCell::List(args.to_vec())))
}

/// `(print x y ...)`
fn print_fn(args: &[CellRef]) -> RuntimeResult {
    println!("{}", args.iter().join(" "));

    Ok(NIL.clone())
}
