use super::function::*;

use itertools::*;
use std::fmt;
use std::sync::*;

/// A reference to a script value
pub type CellRef = Arc<ScriptCell>;

lazy_static! {
    /// The 'nil' value
    pub static ref NIL: CellRef = Arc::new(ScriptCell::Nil);
}

///
/// A script cell represents a single value visible to script code: for example `42` or `"hello"`
///
#[derive(Clone, Debug)]
pub enum ScriptCell {
    /// The 'nil' value
    Nil,

    /// A boolean value
    Bool(bool),

    /// An integer value
    Int(i128),

    /// A string value
    String(String),

    /// A list of values
    List(Vec<CellRef>),

    /// A function (native or waiting to be compiled)
    Function(Arc<ScriptFunction>)
}

impl ScriptCell {
    ///
    /// Parses a literal as it might be written on the command line
    ///
    /// `nil`, `true` and `false` are the corresponding values, anything that parses as an integer is
    /// an integer and everything else is a string.
    ///
    pub fn from_literal(literal: &str) -> ScriptCell {
        match literal {
            "nil"   => ScriptCell::Nil,
            "true"  => ScriptCell::Bool(true),
            "false" => ScriptCell::Bool(false),
            other   => {
                if let Ok(num) = other.parse::<i128>() {
                    ScriptCell::Int(num)
                } else {
                    ScriptCell::String(String::from(other))
                }
            }
        }
    }

    ///
    /// True if this is the nil cell
    ///
    pub fn is_nil(&self) -> bool {
        match self {
            ScriptCell::Nil => true,
            _               => false
        }
    }

    ///
    /// Retrieves the function stored in this cell, if there is one
    ///
    pub fn function(&self) -> Option<&Arc<ScriptFunction>> {
        match self {
            ScriptCell::Function(function)  => Some(function),
            _                               => None
        }
    }
}

impl fmt::Display for ScriptCell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::ScriptCell::*;

        match self {
            Nil                 => write!(f, "nil"),
            Bool(val)           => write!(f, "{}", val),
            Int(val)            => write!(f, "{}", val),
            String(val)         => write!(f, "\"{}\"", val),
            List(items)         => write!(f, "({})", items.iter().join(" ")),
            Function(function)  => write!(f, "<fn {}#{}>", function.name(), function.id())
        }
    }
}

impl From<bool> for ScriptCell {
    fn from(val: bool) -> ScriptCell { ScriptCell::Bool(val) }
}

impl From<i128> for ScriptCell {
    fn from(val: i128) -> ScriptCell { ScriptCell::Int(val) }
}

impl From<&str> for ScriptCell {
    fn from(val: &str) -> ScriptCell { ScriptCell::String(String::from(val)) }
}

impl From<String> for ScriptCell {
    fn from(val: String) -> ScriptCell { ScriptCell::String(val) }
}

impl From<Arc<ScriptFunction>> for ScriptCell {
    fn from(function: Arc<ScriptFunction>) -> ScriptCell { ScriptCell::Function(function) }
}
