use crate::{types::TypeId, util::Atom};

// Declarations are owned by the surrounding compiler. Types only hold these
// handles and ask the table for names and members.

/// Handle to a methodmap (behavior set) attached to an enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodmapId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordDeclId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypesetDeclId(pub usize);

#[derive(Debug)]
pub struct MethodmapDecl {
    pub name: Atom,
}

#[derive(Debug)]
pub struct RecordDecl {
    pub name: Atom,
}

/// A typeset lists its member types once they are resolved.
#[derive(Debug)]
pub struct TypesetDecl {
    pub name: Atom,
    pub types: Vec<TypeId>,
}

/// Declaration storage for one compilation unit.
#[derive(Debug, Default)]
pub struct Declarations {
    methodmaps: Vec<MethodmapDecl>,
    records: Vec<RecordDecl>,
    typesets: Vec<TypesetDecl>,
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_methodmap(&mut self, name: Atom) -> MethodmapId {
        self.methodmaps.push(MethodmapDecl { name });
        MethodmapId(self.methodmaps.len() - 1)
    }

    pub fn add_record(&mut self, name: Atom) -> RecordDeclId {
        self.records.push(RecordDecl { name });
        RecordDeclId(self.records.len() - 1)
    }

    pub fn add_typeset(&mut self, name: Atom) -> TypesetDeclId {
        self.typesets.push(TypesetDecl {
            name,
            types: Vec::new(),
        });
        TypesetDeclId(self.typesets.len() - 1)
    }

    pub fn methodmap(&self, id: MethodmapId) -> &MethodmapDecl {
        &self.methodmaps[id.0]
    }

    pub fn record(&self, id: RecordDeclId) -> &RecordDecl {
        &self.records[id.0]
    }

    pub fn typeset(&self, id: TypesetDeclId) -> &TypesetDecl {
        &self.typesets[id.0]
    }

    /// Append a member type to a typeset declaration.
    pub fn add_typeset_member(&mut self, id: TypesetDeclId, ty: TypeId) {
        self.typesets[id.0].types.push(ty);
    }
}
