use std::sync::*;
use std::collections::{HashMap};

lazy_static! {
    static ref NAME_TABLE: Mutex<NameTable> = Mutex::new(NameTable::default());
}

///
/// The interned variable names, in both directions
///
#[derive(Default)]
struct NameTable {
    ids:    HashMap<String, NameId>,
    names:  Vec<String>
}

///
/// An interned variable name
///
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct NameId(u32);

impl NameId {
    ///
    /// Retrieves the ID for a name, assigning a new one if the name hasn't been seen before
    ///
    pub fn intern(name: &str) -> NameId {
        let mut table = NAME_TABLE.lock().unwrap();

        if let Some(id) = table.ids.get(name) {
            return *id;
        }

        let id = NameId(table.names.len() as u32);
        table.names.push(String::from(name));
        table.ids.insert(String::from(name), id);

        id
    }

    ///
    /// Retrieves the ID for a name without interning it
    ///
    /// A name that was never interned can't be bound to anything, so lookups use this to avoid
    /// growing the table with every unresolved name.
    ///
    pub fn existing(name: &str) -> Option<NameId> {
        NAME_TABLE.lock().unwrap().ids.get(name).copied()
    }

    ///
    /// The text of this name
    ///
    pub fn name(&self) -> String {
        let table = NAME_TABLE.lock().unwrap();

        table.names.get(self.0 as usize)
            .cloned()
            .unwrap_or_else(|| format!("##name#{}", self.0))
    }
}
