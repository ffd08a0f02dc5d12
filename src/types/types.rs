use std::{
    cell::{Cell, OnceCell},
    fmt,
};

use strum_macros::Display;

use crate::{
    types::{Declarations, MethodmapId, PrimitiveType, Qualifiers, RecordDeclId, TypesetDeclId},
    util::Atom,
};

/// Index of a type in its TypeContext. Two ids name the same type node
/// exactly when they are equal.
pub type TypeId = usize;

/// Kind tag of a type node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Kind {
    /// A type that could not be resolved during type resolution.
    Unresolvable,
    Primitive,
    /// Return type of functions that return no value.
    Void,
    /// Used when no return type was written and no value is ever returned.
    ImplicitVoid,
    /// Plain-old-data with int32 storage and stricter type checking.
    Enum,
    Typedef,
    /// Qualifying wrapper produced by normalization.
    Qualifier,
    /// Has implicit bitwise coercion to int32, float, bool or an enum.
    Unchecked,
    Array,
    /// A discriminated union of types.
    Typeset,
    Struct,
    /// Only legal on parameters, and only over primitives or enums.
    Reference,
    Function,
    /// The type of the `Function` tag.
    MetaFunction,
    /// The type of `null`.
    NullType,
    /// An overloaded function name that was never narrowed to one overload.
    OverloadedFunction,
}

/// Per-kind payload of a type node.
#[derive(Debug)]
pub enum TypeKind {
    Unresolvable,
    Primitive(PrimitiveType),
    Void,
    ImplicitVoid,
    Enum(EnumType),
    Typedef(TypedefType),
    Qualifier,
    Unchecked,
    Array(ArrayType),
    Typeset(TypesetType),
    Struct(RecordType),
    Reference(ReferenceType),
    Function(FunctionType),
    MetaFunction,
    NullType,
    OverloadedFunction,
}

impl TypeKind {
    pub fn tag(&self) -> Kind {
        match self {
            TypeKind::Unresolvable => Kind::Unresolvable,
            TypeKind::Primitive(_) => Kind::Primitive,
            TypeKind::Void => Kind::Void,
            TypeKind::ImplicitVoid => Kind::ImplicitVoid,
            TypeKind::Enum(_) => Kind::Enum,
            TypeKind::Typedef(_) => Kind::Typedef,
            TypeKind::Qualifier => Kind::Qualifier,
            TypeKind::Unchecked => Kind::Unchecked,
            TypeKind::Array(_) => Kind::Array,
            TypeKind::Typeset(_) => Kind::Typeset,
            TypeKind::Struct(_) => Kind::Struct,
            TypeKind::Reference(_) => Kind::Reference,
            TypeKind::Function(_) => Kind::Function,
            TypeKind::MetaFunction => Kind::MetaFunction,
            TypeKind::NullType => Kind::NullType,
            TypeKind::OverloadedFunction => Kind::OverloadedFunction,
        }
    }
}

/// The canonical relation of a node: the type it denotes and the qualifiers
/// merged on the way there. Points at the node itself for plain types and
/// unresolved typedefs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Link {
    pub canonical: TypeId,
    pub quals: Qualifiers,
}

/// A type node. The payload never changes after allocation; only the
/// canonical link is republished as normalization makes progress.
#[derive(Debug)]
pub struct Type {
    pub id: TypeId,
    pub kind: TypeKind,
    link: Cell<Link>,
}

impl Type {
    pub(crate) fn new(id: TypeId, kind: TypeKind) -> Self {
        Self::wrapping(
            id,
            kind,
            Link {
                canonical: id,
                quals: Qualifiers::empty(),
            },
        )
    }

    pub(crate) fn wrapping(id: TypeId, kind: TypeKind, link: Link) -> Self {
        Self {
            id,
            kind,
            link: Cell::new(link),
        }
    }

    pub(crate) fn link(&self) -> Link {
        self.link.get()
    }

    /// Single-writer: only the owning TypeContext republishes links, and a
    /// published link always denotes the same type as the one it replaces.
    pub(crate) fn publish(&self, link: Link) {
        self.link.set(link);
    }

    /// Kind of this node without looking through wrappers. A typedef that
    /// absorbed qualifiers during normalization reports Qualifier.
    pub fn node_kind(&self) -> Kind {
        if self.link().quals.is_empty() {
            self.kind.tag()
        } else {
            Kind::Qualifier
        }
    }

    pub fn is_wrapped(&self) -> bool {
        self.link().canonical != self.id
    }

    pub fn is_resolved_typedef(&self) -> bool {
        self.node_kind() == Kind::Typedef && self.is_wrapped()
    }

    pub fn is_unresolved_typedef(&self) -> bool {
        self.node_kind() == Kind::Typedef && !self.is_wrapped()
    }

    /// True only for the implicit-int primitive node itself. Ignores
    /// qualifiers and aliases, for phases that need to know whether a type
    /// was written at all.
    pub fn is_implicit_int(&self) -> bool {
        matches!(self.kind, TypeKind::Primitive(PrimitiveType::ImplicitInt))
    }
}

#[derive(Debug)]
pub struct EnumType {
    name: Atom,
    methodmap: OnceCell<MethodmapId>,
}

impl EnumType {
    pub(crate) fn new(name: Atom) -> Self {
        Self {
            name,
            methodmap: OnceCell::new(),
        }
    }

    pub fn name(&self) -> Atom {
        self.name
    }

    pub fn methodmap(&self) -> Option<MethodmapId> {
        self.methodmap.get().copied()
    }

    /// Attach the enum's methodmap. Panics if one is already attached.
    pub fn set_methodmap(&self, methodmap: MethodmapId) {
        if self.methodmap.set(methodmap).is_err() {
            panic!("enum already has a methodmap");
        }
    }
}

#[derive(Debug)]
pub struct ReferenceType {
    contained: TypeId,
}

impl ReferenceType {
    pub(crate) fn new(contained: TypeId) -> Self {
        Self { contained }
    }

    pub fn contained(&self) -> TypeId {
        self.contained
    }
}

/// Element count of one array rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayLength {
    Fixed(u32),
    /// No size was specified. The array may or may not have a fixed size.
    Unsized,
    /// The rank has a fixed number of elements that is not known yet, eg.
    /// the inner rank of `int a[][] = {{1, 2}, {3, 4, 5}}`. Kept apart from
    /// Unsized for sizeof and assignment compatibility.
    Indeterminate,
}

impl fmt::Display for ArrayLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayLength::Fixed(n) => write!(f, "[{}]", n),
            ArrayLength::Unsized | ArrayLength::Indeterminate => write!(f, "[]"),
        }
    }
}

#[derive(Debug)]
pub struct ArrayType {
    contained: TypeId,
    length: ArrayLength,
}

impl ArrayType {
    /// Maximum fixed length. Small enough that addresses computed as
    /// multiples of an index cannot overflow.
    pub const MAX_SIZE: u32 = (i32::MAX / 4) as u32;

    pub(crate) fn new(contained: TypeId, length: ArrayLength) -> Self {
        if let ArrayLength::Fixed(n) = length {
            assert!(
                n <= Self::MAX_SIZE,
                "array length {} exceeds maximum of {}",
                n,
                Self::MAX_SIZE
            );
        }
        Self { contained, length }
    }

    pub fn contained(&self) -> TypeId {
        self.contained
    }

    pub fn length(&self) -> ArrayLength {
        self.length
    }

    pub fn has_fixed_length(&self) -> bool {
        matches!(self.length, ArrayLength::Fixed(_))
    }

    /// Panics if the rank has no fixed length.
    pub fn fixed_length(&self) -> u32 {
        match self.length {
            ArrayLength::Fixed(n) => n,
            other => panic!("array rank {:?} has no fixed length", other),
        }
    }

    pub fn equal_to(&self, other: &ArrayType) -> bool {
        self.length == other.length && self.contained == other.contained
    }
}

#[derive(Debug)]
pub struct TypedefType {
    name: Atom,
    actual: OnceCell<TypeId>,
}

impl TypedefType {
    pub(crate) fn new(name: Atom) -> Self {
        Self {
            name,
            actual: OnceCell::new(),
        }
    }

    pub fn name(&self) -> Atom {
        self.name
    }

    /// The aliased type, or None while unresolved.
    pub fn actual(&self) -> Option<TypeId> {
        self.actual.get().copied()
    }

    pub(crate) fn set_actual(&self, actual: TypeId) {
        if self.actual.set(actual).is_err() {
            panic!("typedef resolved twice");
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    pub name: Option<Atom>,
    pub ty: TypeId,
    pub has_default: bool,
}

impl Parameter {
    pub fn new(name: Option<Atom>, ty: TypeId) -> Self {
        Self {
            name,
            ty,
            has_default: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionSignature {
    pub params: Vec<Parameter>,
    pub return_type: TypeId,
    /// Accepts any number of trailing arguments.
    pub variadic: bool,
}

impl FunctionSignature {
    pub fn new(params: Vec<Parameter>, return_type: TypeId) -> Self {
        Self {
            params,
            return_type,
            variadic: false,
        }
    }

    /// Identity for caching: exact parameter and return types, ignoring
    /// parameter names and defaults.
    pub fn same_shape(&self, other: &FunctionSignature) -> bool {
        self.return_type == other.return_type
            && self.variadic == other.variadic
            && self.params.len() == other.params.len()
            && self
                .params
                .iter()
                .zip(&other.params)
                .all(|(a, b)| a.ty == b.ty)
    }
}

#[derive(Debug)]
pub struct FunctionType {
    signature: FunctionSignature,
}

impl FunctionType {
    pub(crate) fn new(signature: FunctionSignature) -> Self {
        Self { signature }
    }

    pub fn signature(&self) -> &FunctionSignature {
        &self.signature
    }
}

/// A composite value type backed by a record declaration.
#[derive(Debug)]
pub struct RecordType {
    decl: RecordDeclId,
}

impl RecordType {
    pub(crate) fn new(decl: RecordDeclId) -> Self {
        Self { decl }
    }

    pub fn decl(&self) -> RecordDeclId {
        self.decl
    }

    pub fn name(&self, decls: &Declarations) -> Atom {
        decls.record(self.decl).name
    }
}

#[derive(Debug)]
pub struct TypesetType {
    decl: TypesetDeclId,
}

impl TypesetType {
    pub(crate) fn new(decl: TypesetDeclId) -> Self {
        Self { decl }
    }

    pub fn decl(&self) -> TypesetDeclId {
        self.decl
    }

    pub fn name(&self, decls: &Declarations) -> Atom {
        decls.typeset(self.decl).name
    }

    pub fn num_types(&self, decls: &Declarations) -> usize {
        decls.typeset(self.decl).types.len()
    }

    pub fn type_at(&self, decls: &Declarations, index: usize) -> TypeId {
        decls.typeset(self.decl).types[index]
    }
}
