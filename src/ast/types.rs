use crate::{
    types::{PrimitiveType, TypeId},
    util::Atom,
};

/// Base of a written type, before any name is looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseType {
    Primitive(PrimitiveType),
    Void,
    /// `any`
    Unchecked,
    /// The `Function` tag.
    MetaFunction,
    /// A name that resolves later to an enum, struct, typeset or typedef.
    Named(Atom),
}

/// A TypeSpecifier is the AST representation of a type, not the semantic
/// meaning. It is what the parser saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpecifier {
    pub base: BaseType,
    pub is_const: bool,
    pub is_by_ref: bool,
    /// One entry per array rank, outermost first. None when no size was
    /// written for that rank.
    pub dims: Vec<Option<u32>>,
}

impl TypeSpecifier {
    pub fn new(base: BaseType) -> Self {
        Self {
            base,
            is_const: false,
            is_by_ref: false,
            dims: Vec::new(),
        }
    }

    pub fn with_const(mut self) -> Self {
        self.is_const = true;
        self
    }

    pub fn with_ref(mut self) -> Self {
        self.is_by_ref = true;
        self
    }

    /// Append an array rank.
    pub fn with_dim(mut self, size: Option<u32>) -> Self {
        self.dims.push(size);
        self
    }

    pub fn is_array(&self) -> bool {
        !self.dims.is_empty()
    }
}

/// A type as seen by a declaration: the specifier until resolution, then
/// the resolved type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Spec(TypeSpecifier),
    Resolved(TypeId),
}

impl TypeExpr {
    pub fn resolved(&self) -> Option<TypeId> {
        match self {
            TypeExpr::Resolved(ty) => Some(*ty),
            TypeExpr::Spec(_) => None,
        }
    }

    pub fn spec(&self) -> Option<&TypeSpecifier> {
        match self {
            TypeExpr::Spec(spec) => Some(spec),
            TypeExpr::Resolved(_) => None,
        }
    }
}
