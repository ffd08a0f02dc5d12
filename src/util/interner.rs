use std::collections::HashMap;

/// Handle to an interned name. Two atoms are the same name exactly when
/// their handles are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Atom(u32);

impl Atom {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Name pool for a compilation unit. Names are never removed.
#[derive(Debug, Default)]
pub struct Interner {
    map: HashMap<String, Atom>,
    names: Vec<String>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a name, returning the existing atom if seen before.
    pub fn intern(&mut self, name: &str) -> Atom {
        if let Some(&atom) = self.map.get(name) {
            return atom;
        }

        let atom = Atom(self.names.len() as u32);
        self.names.push(name.to_owned());
        self.map.insert(name.to_owned(), atom);
        atom
    }

    /// Get the string for an atom. Panics if the atom is from another pool.
    pub fn resolve(&self, atom: Atom) -> &str {
        &self.names[atom.index()]
    }

    pub fn lookup(&self, name: &str) -> Option<Atom> {
        self.map.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
