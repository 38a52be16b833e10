use weak_script::*;

use clap::{App, Arg, ArgMatches};
use std::sync::*;
use std::process::{exit};
use std::result::{Result};

///
/// The command line arguments accepted by the tool
///
fn arguments() -> App<'static, 'static> {
    App::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about("Captures script environments and tags functions for lazy compilation")
        .arg(Arg::with_name("global")
            .short("g")
            .long("global")
            .help("Defines a global variable (name=value)")
            .value_name("ASSIGNMENT")
            .multiple(true)
            .number_of_values(1))
        .arg(Arg::with_name("local")
            .short("l")
            .long("local")
            .help("Defines a local variable in the calling frame (name=value)")
            .value_name("ASSIGNMENT")
            .multiple(true)
            .number_of_values(1))
        .arg(Arg::with_name("frames-up")
            .short("u")
            .long("frames-up")
            .help("Resolves names this many frames above the calling frame")
            .value_name("FRAMES"))
        .arg(Arg::with_name("resolve")
            .short("r")
            .long("resolve")
            .help("Resolves a name and displays its value")
            .value_name("NAME")
            .multiple(true)
            .number_of_values(1))
        .arg(Arg::with_name("tag")
            .short("t")
            .long("tag")
            .help("Tags a function with this name for lazy compilation")
            .value_name("NAME"))
}

///
/// All the values passed for an argument
///
fn values_of<'a>(params: &'a ArgMatches, arg_name: &str) -> Vec<&'a str> {
    params.values_of(arg_name)
        .map(|values| values.collect())
        .unwrap_or_else(|| vec![])
}

///
/// Parses a list of `name=value` assignments
///
fn assignments(assignments: &[&str]) -> Result<Vec<(String, CellRef)>, RuntimeError> {
    assignments.iter()
        .map(|assignment| {
            let mut parts   = assignment.splitn(2, '=');
            let name        = parts.next().filter(|name| !name.is_empty());
            let value       = parts.next();

            match (name, value) {
                (Some(name), Some(value))   => Ok((name.to_string(), Arc::new(ScriptCell::from_literal(value)))),
                _                           => Err(RuntimeError::InvalidAssignment(assignment.to_string()))
            }
        })
        .collect()
}

///
/// Builds a call stack: a module frame holding the globals, with a call to 'main' holding the
/// locals on top of it
///
fn build_frame(globals: &[&str], locals: &[&str]) -> Result<Frame, RuntimeError> {
    let module = Frame::new_module(VariableMap::new());
    for (name, value) in assignments(globals)? {
        module.set_global(&name, value);
    }

    let frame = module.push_call("main");
    for (name, value) in assignments(locals)? {
        frame.set_local(&name, value);
    }

    Ok(frame)
}

///
/// Reads the number of frames to go up the stack (0 if it's not specified)
///
fn parse_frames_up(frames_up: Option<&str>) -> Result<usize, RuntimeError> {
    match frames_up {
        Some(frames_up) => frames_up.parse::<usize>().map_err(|_| RuntimeError::TypeMismatch(Arc::new(ScriptCell::from(frames_up)))),
        None            => Ok(0)
    }
}

///
/// Finds the function to tag: the function bound to the name if there is one, otherwise a new
/// empty function
///
fn function_to_tag(frame: &Frame, name: &str) -> Result<Arc<ScriptFunction>, RuntimeError> {
    match ResolutionCallback::for_frame(frame).resolve(name) {
        Some(value) => value.function().cloned().ok_or(RuntimeError::NotAFunction(Arc::clone(&value))),
        None        => Ok(ScriptFunction::script(name, Vec::<String>::new(), ""))
    }
}

///
/// Tags a function, resolves the requested names and reports the results
///
fn run(params: &ArgMatches) -> Result<(), RuntimeError> {
    let frame       = build_frame(&values_of(params, "global"), &values_of(params, "local"))?;
    let frames_up   = parse_frames_up(params.value_of("frames-up"))?;

    if let Some(name) = params.value_of("tag") {
        let function    = function_to_tag(&frame, name)?;
        let function    = weak_script(function, &frame, frames_up)?;
        let status      = compiled_weak_fns()?.status_for(&function);

        println!("{} (#{}): {:?}", function.name(), function.id(), status);
    }

    let rcb = create_resolution_callback(&frame, frames_up)?;
    for name in values_of(params, "resolve") {
        match rcb.resolve(name) {
            Some(value) => println!("{} = {}", name, value),
            None        => println!("{} is not defined", name)
        }
    }

    Ok(())
}

fn main() {
    init_logger();

    // Fetch the parameters
    let params = arguments().get_matches();

    // Report any errors
    if let Err(err) = run(&params) {
        println!("!! {}", err);
        println!();
        exit(1);
    }
}
