use crate::meta::*;

use std::sync::*;
use std::collections::{HashMap};

///
/// A mutable set of variables
///
/// Cloning a variable map shares the storage: an assignment through one clone is visible through
/// all the others. This is how frames hand out references to their variables.
///
#[derive(Clone, Debug, Default)]
pub struct VariableMap {
    values: Arc<RwLock<HashMap<NameId, CellRef>>>
}

impl VariableMap {
    ///
    /// Creates a new, empty, set of variables
    ///
    pub fn new() -> VariableMap {
        VariableMap::default()
    }

    ///
    /// Creates a set of variables from a list of names and values
    ///
    pub fn with_values<'a, ValueIter: IntoIterator<Item=(&'a str, CellRef)>>(values: ValueIter) -> VariableMap {
        let variables = VariableMap::new();

        for (name, value) in values {
            variables.set(name, value);
        }

        variables
    }

    ///
    /// Looks up the value of a variable
    ///
    pub fn get(&self, name: &str) -> Option<CellRef> {
        let id = NameId::existing(name)?;

        self.values.read().unwrap().get(&id).cloned()
    }

    ///
    /// Assigns a value to a variable, returning the value it had before
    ///
    /// The name is interned (see `NameId::intern`) and stays in the name table for the life of the
    /// process, even after the variable is removed.
    ///
    pub fn set(&self, name: &str, value: CellRef) -> Option<CellRef> {
        let id = NameId::intern(name);

        self.values.write().unwrap().insert(id, value)
    }

    ///
    /// Removes a variable, returning the value it had
    ///
    pub fn remove(&self, name: &str) -> Option<CellRef> {
        let id = NameId::existing(name)?;

        self.values.write().unwrap().remove(&id)
    }

    ///
    /// True if the variable is bound here
    ///
    pub fn contains(&self, name: &str) -> bool {
        NameId::existing(name)
            .map(|id| self.values.read().unwrap().contains_key(&id))
            .unwrap_or(false)
    }

    ///
    /// The names of the variables in this map, in no particular order
    ///
    pub fn names(&self) -> Vec<String> {
        self.values.read().unwrap().keys().map(|id| id.name()).collect()
    }

    /// The number of variables in this map
    pub fn len(&self) -> usize { self.values.read().unwrap().len() }

    /// True if there are no variables in this map
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    ///
    /// True if this and another map are views of the same variables
    ///
    pub fn shares_storage_with(&self, other: &VariableMap) -> bool {
        Arc::ptr_eq(&self.values, &other.values)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn set_and_get() {
        let variables = VariableMap::new();
        variables.set("x", Arc::new(ScriptCell::Int(1)));

        assert!(variables.get("x").unwrap().to_string() == "1".to_string());
        assert!(variables.contains("x"));
        assert!(variables.len() == 1);
    }

    #[test]
    fn set_replaces_value() {
        let variables   = VariableMap::new();
        variables.set("x", Arc::new(ScriptCell::Int(1)));
        let previous    = variables.set("x", Arc::new(ScriptCell::Int(2)));

        assert!(previous.unwrap().to_string() == "1".to_string());
        assert!(variables.get("x").unwrap().to_string() == "2".to_string());
    }

    #[test]
    fn clones_share_variables() {
        let variables   = VariableMap::new();
        let view        = variables.clone();

        variables.set("shared", Arc::new(ScriptCell::Int(3)));

        assert!(view.get("shared").unwrap().to_string() == "3".to_string());
        assert!(view.shares_storage_with(&variables));
        assert!(!view.shares_storage_with(&VariableMap::new()));
    }

    #[test]
    fn assigned_names_stay_interned() {
        let variables = VariableMap::new();

        assert!(NameId::existing("variables_test_interned").is_none());

        variables.set("variables_test_interned", NIL.clone());
        variables.remove("variables_test_interned");

        assert!(!variables.contains("variables_test_interned"));
        assert!(NameId::existing("variables_test_interned").is_some());
    }

    #[test]
    fn missing_variable() {
        let variables = VariableMap::with_values(vec![("y", NIL.clone())]);

        assert!(variables.get("variables_test_missing").is_none());
        assert!(variables.remove("variables_test_missing").is_none());
        assert!(variables.remove("y").unwrap().is_nil());
        assert!(variables.is_empty());
    }
}
