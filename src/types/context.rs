use std::collections::{HashMap, HashSet};

use strum::IntoEnumIterator;
use tracing::{debug, trace};

use crate::{
    config::Config,
    error::CycleError,
    types::{
        ArrayLength, ArrayType, Declarations, EnumType, FunctionSignature, FunctionType, Kind,
        Link, PrimitiveType, Qualifiers, RecordDeclId, RecordType, ReferenceType, Type, TypeId,
        TypeKind, TypedefType, TypesetDeclId, TypesetType,
    },
    util::{Atom, Interner},
};

/// Structural keys for types that are shared instead of allocated per use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum CacheKey {
    Primitive(PrimitiveType),
    Qualified(TypeId, Qualifiers),
    Reference(TypeId),
    Array(TypeId, ArrayLength),
}

#[derive(Debug, Default)]
struct Builtins {
    void: TypeId,
    implicit_void: TypeId,
    unchecked: TypeId,
    meta_function: TypeId,
    null_type: TypeId,
    overloaded_function: TypeId,
    unresolvable: TypeId,
}

/// Owns every type of a compilation unit. Types are never freed, so a
/// `TypeId` stays valid for the lifetime of the context.
///
/// Queries take `&self` but may republish canonical links as a memo. The
/// links live in `Cell`s, which keeps the context `!Sync`: sharing one
/// across threads needs external serialization.
pub struct TypeContext {
    config: Config,
    /// Each `TypeId` maps to a `Type` by indexing into this vector.
    types: Vec<Type>,
    /// Map structural keys to their shared type id.
    cache: HashMap<CacheKey, TypeId>,
    builtins: Builtins,
    names: Interner,
    decls: Declarations,
}

impl TypeContext {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let mut s = Self {
            config,
            types: Vec::new(),
            cache: HashMap::new(),
            builtins: Builtins::default(),
            names: Interner::new(),
            decls: Declarations::new(),
        };

        for p in PrimitiveType::iter() {
            let id = s.alloc(TypeKind::Primitive(p));
            s.cache.insert(CacheKey::Primitive(p), id);
        }

        s.builtins = Builtins {
            void: s.alloc(TypeKind::Void),
            implicit_void: s.alloc(TypeKind::ImplicitVoid),
            unchecked: s.alloc(TypeKind::Unchecked),
            meta_function: s.alloc(TypeKind::MetaFunction),
            null_type: s.alloc(TypeKind::NullType),
            overloaded_function: s.alloc(TypeKind::OverloadedFunction),
            unresolvable: s.alloc(TypeKind::Unresolvable),
        };

        s
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn names(&self) -> &Interner {
        &self.names
    }

    pub fn decls(&self) -> &Declarations {
        &self.decls
    }

    pub fn decls_mut(&mut self) -> &mut Declarations {
        &mut self.decls
    }

    /// Shorthand for interning a name in this unit's pool.
    pub fn intern(&mut self, name: &str) -> Atom {
        self.names.intern(name)
    }

    pub fn name_of(&self, atom: Atom) -> &str {
        self.names.resolve(atom)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Get the type node for a given id.
    pub fn lookup(&self, id: TypeId) -> &Type {
        assert!(id < self.types.len(), "unknown type id {}", id);
        &self.types[id]
    }

    fn alloc(&mut self, kind: TypeKind) -> TypeId {
        let id = self.types.len();
        trace!("new type #{} {}", id, kind.tag());
        self.types.push(Type::new(id, kind));
        id
    }

    fn alloc_wrapper(&mut self, kind: TypeKind, link: Link) -> TypeId {
        let id = self.types.len();
        trace!("new wrapper #{} {} -> #{}", id, kind.tag(), link.canonical);
        self.types.push(Type::wrapping(id, kind, link));
        id
    }

    fn cached(&mut self, key: CacheKey, make: impl FnOnce(&mut Self) -> TypeId) -> TypeId {
        if let Some(&id) = self.cache.get(&key) {
            return id;
        }
        let id = make(self);
        self.cache.insert(key, id);
        id
    }

    // Singletons

    /// Shorthand for getting a primitive type id.
    pub fn primitive_type(&self, kind: PrimitiveType) -> TypeId {
        *self
            .cache
            .get(&CacheKey::Primitive(kind))
            .expect("all primitive types must be assigned at init")
    }

    pub fn void_type(&self) -> TypeId {
        self.builtins.void
    }

    pub fn implicit_void_type(&self) -> TypeId {
        self.builtins.implicit_void
    }

    pub fn unchecked_type(&self) -> TypeId {
        self.builtins.unchecked
    }

    pub fn meta_function_type(&self) -> TypeId {
        self.builtins.meta_function
    }

    pub fn null_type(&self) -> TypeId {
        self.builtins.null_type
    }

    pub fn overloaded_function_type(&self) -> TypeId {
        self.builtins.overloaded_function
    }

    pub fn unresolvable_type(&self) -> TypeId {
        self.builtins.unresolvable
    }

    // Constructors

    /// Wrap a type in qualifiers. Returns the type itself when `quals` is
    /// empty. Qualifying a qualified type merges into a single wrapper.
    pub fn new_qualified(&mut self, ty: TypeId, quals: Qualifiers) -> TypeId {
        if quals.is_empty() {
            return ty;
        }

        let inner = self.lookup(ty);
        let link = if inner.node_kind() == Kind::Qualifier {
            let inner_link = inner.link();
            Link {
                canonical: inner_link.canonical,
                quals: inner_link.quals | quals,
            }
        } else {
            Link {
                canonical: ty,
                quals,
            }
        };

        let id = self.cached(CacheKey::Qualified(link.canonical, link.quals), |ctx| {
            ctx.alloc_wrapper(TypeKind::Qualifier, link)
        });
        if self.is_stale(link.canonical) {
            self.normalize(id);
        }
        id
    }

    /// Panics if `contained` cannot be referenced (arrays and references).
    pub fn new_reference(&mut self, contained: TypeId) -> TypeId {
        assert!(
            self.can_use_in_reference_type(contained),
            "cannot form a reference to a {} type",
            self.canonical_kind(contained)
        );
        self.cached(CacheKey::Reference(contained), |ctx| {
            ctx.alloc(TypeKind::Reference(ReferenceType::new(contained)))
        })
    }

    /// Panics if a fixed length exceeds `ArrayType::MAX_SIZE`.
    pub fn new_array(&mut self, contained: TypeId, length: ArrayLength) -> TypeId {
        let array = ArrayType::new(contained, length);
        self.cached(CacheKey::Array(contained, length), |ctx| {
            ctx.alloc(TypeKind::Array(array))
        })
    }

    pub fn new_enum(&mut self, name: Atom) -> TypeId {
        self.alloc(TypeKind::Enum(EnumType::new(name)))
    }

    /// Create an unresolved typedef. Bind it later with `resolve_typedef`.
    pub fn new_typedef(&mut self, name: Atom) -> TypeId {
        self.alloc(TypeKind::Typedef(TypedefType::new(name)))
    }

    pub fn new_function(&mut self, signature: FunctionSignature) -> TypeId {
        self.alloc(TypeKind::Function(FunctionType::new(signature)))
    }

    pub fn new_struct(&mut self, decl: RecordDeclId) -> TypeId {
        self.alloc(TypeKind::Struct(RecordType::new(decl)))
    }

    pub fn new_typeset(&mut self, decl: TypesetDeclId) -> TypeId {
        self.alloc(TypeKind::Typeset(TypesetType::new(decl)))
    }

    /// Bind a typedef to the type it aliases. Panics if the typedef was
    /// already resolved.
    ///
    /// If `actual` refers back to the typedef, the typedef is bound to the
    /// unresolvable type instead and an error is returned for the caller
    /// to report. Normalization therefore never sees a cycle.
    pub fn resolve_typedef(&mut self, typedef: TypeId, actual: TypeId) -> Result<(), CycleError> {
        let td = self.to_typedef(typedef);
        assert!(
            td.actual().is_none(),
            "typedef '{}' resolved twice",
            self.name_of(td.name())
        );

        if self.refers_to(actual, typedef) {
            let name = self.name_of(td.name()).to_string();
            debug!("typedef '{}' refers to itself", name);
            self.bind_typedef(typedef, self.unresolvable_type());
            return Err(CycleError { name });
        }

        debug!(
            "resolved typedef '{}' to #{}",
            self.name_of(td.name()),
            actual
        );
        self.bind_typedef(typedef, actual);
        Ok(())
    }

    fn bind_typedef(&self, typedef: TypeId, actual: TypeId) {
        let ty = self.lookup(typedef);
        self.to_typedef(typedef).set_actual(actual);
        ty.publish(Link {
            canonical: actual,
            quals: Qualifiers::empty(),
        });
        if self.is_stale(actual) {
            self.normalize(typedef);
        }
    }

    /// Reports whether `target` is reachable from `from` through aliases,
    /// wrappers, or the types an array, reference or function is built from.
    fn refers_to(&self, from: TypeId, target: TypeId) -> bool {
        let mut stack = vec![from];
        let mut seen = HashSet::new();

        while let Some(id) = stack.pop() {
            if id == target {
                return true;
            }
            if !seen.insert(id) {
                continue;
            }

            let ty = self.lookup(id);
            match &ty.kind {
                TypeKind::Typedef(td) => stack.extend(td.actual()),
                TypeKind::Qualifier => stack.push(ty.link().canonical),
                TypeKind::Array(array) => stack.push(array.contained()),
                TypeKind::Reference(r) => stack.push(r.contained()),
                TypeKind::Function(f) => {
                    let sig = f.signature();
                    stack.push(sig.return_type);
                    stack.extend(sig.params.iter().map(|p| p.ty));
                }
                _ => {}
            }
        }

        false
    }

    // Canonicalization

    /// A cached canonical link is stale when it still points at a wrapper
    /// that can be collapsed: a resolved typedef or a qualifier.
    fn is_stale(&self, target: TypeId) -> bool {
        let ty = self.lookup(target);
        ty.is_resolved_typedef() || ty.node_kind() == Kind::Qualifier
    }

    /// Return the type this one ultimately denotes, with all aliasing and
    /// qualifiers removed. Stops at an unresolved typedef.
    pub fn canonical(&self, id: TypeId) -> TypeId {
        let ty = self.lookup(id);
        if ty.is_wrapped() && self.is_stale(ty.link().canonical) {
            self.normalize(id);
        }
        ty.link().canonical
    }

    /// Desugar typedefs only. Returns a qualifier node when one is reached,
    /// so its qualifiers stay visible, otherwise the first non-typedef type
    /// or the first unresolved typedef.
    pub fn normalized(&self, id: TypeId) -> TypeId {
        let ty = self.lookup(id);
        if !ty.is_resolved_typedef() && ty.node_kind() != Kind::Qualifier {
            return id;
        }
        if self.is_stale(ty.link().canonical) {
            self.normalize(id);
        }
        // Normalizing may have turned a typedef into a qualifier.
        if ty.node_kind() == Kind::Qualifier {
            id
        } else {
            ty.link().canonical
        }
    }

    /// Collapse redundant pairs of wrappers behind `id`:
    ///   (qual -> qual)    -> (qual)
    ///   (typedef -> qual) -> (qual)
    ///   (qual -> typedef) -> (qual)
    ///
    /// Qualifiers of every collapsed wrapper are merged into `id`, eg.
    ///     typedef C = const B
    ///     typedef B = const A
    ///     typedef A = const int
    /// leaves C as const int. Stops at the first unresolved typedef.
    ///
    /// Every wrapper passed on the way is republished too, innermost first,
    /// so the walk is iterative whatever the chain length.
    fn normalize(&self, id: TypeId) {
        let mut path = vec![id];
        let mut target = self.lookup(id).link().canonical;
        while self.is_stale(target) {
            path.push(target);
            target = self.lookup(target).link().canonical;
        }

        let mut link = Link {
            canonical: target,
            quals: Qualifiers::empty(),
        };
        for &node in path.iter().rev() {
            let ty = self.lookup(node);
            let before = ty.link();
            link.quals |= before.quals;
            if link != before {
                debug!(
                    "normalized #{}: #{} {:?} -> #{} {:?}",
                    node, before.canonical, before.quals, link.canonical, link.quals
                );
                ty.publish(link);
            }
        }
    }

    /// Qualifiers visible at this type. Looks through typedefs but not past
    /// a qualifier.
    pub fn qualifiers(&self, id: TypeId) -> Qualifiers {
        let norm = self.lookup(self.normalized(id));
        if norm.node_kind() == Kind::Qualifier {
            norm.link().quals
        } else {
            Qualifiers::empty()
        }
    }

    pub fn is_qualified(&self, id: TypeId) -> bool {
        self.lookup(self.normalized(id)).node_kind() == Kind::Qualifier
    }

    pub fn is_const(&self, id: TypeId) -> bool {
        self.qualifiers(id).is_const()
    }

    pub fn unqualified(&self, id: TypeId) -> TypeId {
        self.canonical(id)
    }

    pub fn canonical_kind(&self, id: TypeId) -> Kind {
        self.lookup(self.canonical(id)).node_kind()
    }

    /// False exactly when the type denotes a typedef that has not been
    /// resolved yet. Unresolvable types count as resolved (to an error).
    pub fn is_resolved(&self, id: TypeId) -> bool {
        let canon = self.lookup(self.canonical(id));
        debug_assert!(canon.node_kind() != Kind::Typedef || canon.is_unresolved_typedef());
        !canon.is_unresolved_typedef()
    }

    fn canonical_payload(&self, id: TypeId) -> &TypeKind {
        &self.lookup(self.canonical(id)).kind
    }

    fn kind_mismatch(&self, id: TypeId, expected: Kind) -> ! {
        panic!(
            "expected {} type, got {} (#{})",
            expected,
            self.canonical_kind(id),
            id
        )
    }

    // Kind tests on the canonical type

    pub fn is_primitive(&self, id: TypeId) -> bool {
        self.canonical_kind(id) == Kind::Primitive
    }

    pub fn is_void(&self, id: TypeId) -> bool {
        self.canonical_kind(id) == Kind::Void
    }

    pub fn is_implicit_void(&self, id: TypeId) -> bool {
        self.canonical_kind(id) == Kind::ImplicitVoid
    }

    pub fn is_unchecked(&self, id: TypeId) -> bool {
        self.canonical_kind(id) == Kind::Unchecked
    }

    pub fn is_meta_function(&self, id: TypeId) -> bool {
        self.canonical_kind(id) == Kind::MetaFunction
    }

    pub fn is_unresolvable(&self, id: TypeId) -> bool {
        self.canonical_kind(id) == Kind::Unresolvable
    }

    pub fn is_null_type(&self, id: TypeId) -> bool {
        self.canonical_kind(id) == Kind::NullType
    }

    pub fn is_overloaded_function(&self, id: TypeId) -> bool {
        self.canonical_kind(id) == Kind::OverloadedFunction
    }

    pub fn is_enum(&self, id: TypeId) -> bool {
        self.as_enum(id).is_some()
    }

    pub fn is_reference(&self, id: TypeId) -> bool {
        self.as_reference(id).is_some()
    }

    pub fn is_array(&self, id: TypeId) -> bool {
        self.as_array(id).is_some()
    }

    pub fn is_function(&self, id: TypeId) -> bool {
        self.as_function(id).is_some()
    }

    pub fn is_typeset(&self, id: TypeId) -> bool {
        self.as_typeset(id).is_some()
    }

    pub fn is_struct(&self, id: TypeId) -> bool {
        self.as_struct(id).is_some()
    }

    /// Records cover every composite value type. Currently only structs.
    pub fn is_record(&self, id: TypeId) -> bool {
        self.is_struct(id)
    }

    // Narrowing access. The `as_` forms return None on a kind mismatch,
    // the `to_` forms panic.

    pub fn as_enum(&self, id: TypeId) -> Option<&EnumType> {
        match self.canonical_payload(id) {
            TypeKind::Enum(e) => Some(e),
            _ => None,
        }
    }

    pub fn to_enum(&self, id: TypeId) -> &EnumType {
        self.as_enum(id)
            .unwrap_or_else(|| self.kind_mismatch(id, Kind::Enum))
    }

    pub fn as_reference(&self, id: TypeId) -> Option<&ReferenceType> {
        match self.canonical_payload(id) {
            TypeKind::Reference(r) => Some(r),
            _ => None,
        }
    }

    pub fn to_reference(&self, id: TypeId) -> &ReferenceType {
        self.as_reference(id)
            .unwrap_or_else(|| self.kind_mismatch(id, Kind::Reference))
    }

    pub fn as_array(&self, id: TypeId) -> Option<&ArrayType> {
        match self.canonical_payload(id) {
            TypeKind::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn to_array(&self, id: TypeId) -> &ArrayType {
        self.as_array(id)
            .unwrap_or_else(|| self.kind_mismatch(id, Kind::Array))
    }

    pub fn as_function(&self, id: TypeId) -> Option<&FunctionType> {
        match self.canonical_payload(id) {
            TypeKind::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn to_function(&self, id: TypeId) -> &FunctionType {
        self.as_function(id)
            .unwrap_or_else(|| self.kind_mismatch(id, Kind::Function))
    }

    pub fn as_typeset(&self, id: TypeId) -> Option<&TypesetType> {
        match self.canonical_payload(id) {
            TypeKind::Typeset(t) => Some(t),
            _ => None,
        }
    }

    pub fn to_typeset(&self, id: TypeId) -> &TypesetType {
        self.as_typeset(id)
            .unwrap_or_else(|| self.kind_mismatch(id, Kind::Typeset))
    }

    pub fn as_struct(&self, id: TypeId) -> Option<&RecordType> {
        match self.canonical_payload(id) {
            TypeKind::Struct(r) => Some(r),
            _ => None,
        }
    }

    pub fn to_struct(&self, id: TypeId) -> &RecordType {
        self.as_struct(id)
            .unwrap_or_else(|| self.kind_mismatch(id, Kind::Struct))
    }

    pub fn as_record(&self, id: TypeId) -> Option<&RecordType> {
        self.as_struct(id)
    }

    pub fn to_record(&self, id: TypeId) -> &RecordType {
        self.to_struct(id)
    }

    /// Typedef access works on the node itself and does not desugar.
    pub fn as_typedef(&self, id: TypeId) -> Option<&TypedefType> {
        match &self.lookup(id).kind {
            TypeKind::Typedef(td) => Some(td),
            _ => None,
        }
    }

    pub fn to_typedef(&self, id: TypeId) -> &TypedefType {
        self.as_typedef(id).unwrap_or_else(|| {
            panic!(
                "expected typedef node, got {} (#{})",
                self.lookup(id).node_kind(),
                id
            )
        })
    }

    /// Walk nested arrays down to the first non-array element type.
    pub fn innermost(&self, array: TypeId) -> TypeId {
        let mut temp = self.to_array(array).contained();
        while let Some(inner) = self.as_array(temp) {
            temp = inner.contained();
        }
        temp
    }

    // Primitive queries

    pub fn primitive(&self, id: TypeId) -> PrimitiveType {
        match self.canonical_payload(id) {
            TypeKind::Primitive(p) => *p,
            _ => self.kind_mismatch(id, Kind::Primitive),
        }
    }

    /// Same as `primitive`, but int32 for implicit-int and int8 for char.
    pub fn semantic_primitive(&self, id: TypeId) -> PrimitiveType {
        match self.primitive(id) {
            PrimitiveType::Char => PrimitiveType::Int8,
            PrimitiveType::ImplicitInt => PrimitiveType::Int32,
            p => p,
        }
    }

    pub fn is_pod(&self, id: TypeId) -> bool {
        matches!(
            self.canonical_kind(id),
            Kind::Primitive | Kind::Enum | Kind::Unchecked
        )
    }

    /// Storage type of a POD. Bools, enums and unchecked values are int32.
    pub fn pod(&self, id: TypeId) -> PrimitiveType {
        assert!(self.is_pod(id), "type #{} is not plain-old-data", id);
        match self.canonical_payload(id) {
            TypeKind::Primitive(PrimitiveType::Bool) => PrimitiveType::Int32,
            TypeKind::Primitive(p) => *p,
            _ => PrimitiveType::Int32,
        }
    }

    fn is_primitive_of(&self, id: TypeId, kind: PrimitiveType) -> bool {
        matches!(self.canonical_payload(id), TypeKind::Primitive(p) if *p == kind)
    }

    pub fn is_char(&self, id: TypeId) -> bool {
        self.is_primitive_of(id, PrimitiveType::Char)
    }

    pub fn is_float(&self, id: TypeId) -> bool {
        self.is_primitive_of(id, PrimitiveType::Float)
    }

    pub fn is_int32(&self, id: TypeId) -> bool {
        self.is_primitive_of(id, PrimitiveType::Int32)
    }

    pub fn is_int32_or_enum(&self, id: TypeId) -> bool {
        self.is_int32(id) || self.is_enum(id)
    }

    pub fn is_bool(&self, id: TypeId) -> bool {
        self.is_primitive_of(id, PrimitiveType::Bool)
    }

    /// Size of a primitive for the configured target.
    pub fn size_of_primitive(&self, kind: PrimitiveType) -> usize {
        kind.size_with_pointer_width(self.config.pointer_width)
    }

    // Usage rules

    pub fn can_use_in_reference_type(&self, id: TypeId) -> bool {
        !self.is_array(id) && !self.is_reference(id)
    }

    pub fn can_be_used_in_const_expr(&self, id: TypeId) -> bool {
        self.is_primitive(id) || self.is_enum(id)
    }

    /// Void and references cannot be const. Lvalue constness is computed
    /// separately.
    pub fn can_use_in_const_type(&self, id: TypeId) -> bool {
        !self.is_void(id) && !self.is_reference(id)
    }

    /// For these kinds const means nothing in some positions, eg. an int
    /// parameter or a function in a typeset.
    pub fn has_meaningless_const_coercion(&self, id: TypeId) -> bool {
        matches!(
            self.canonical_kind(id),
            Kind::Primitive | Kind::Enum | Kind::Function | Kind::MetaFunction | Kind::Unchecked
        )
    }

    /// Dump every type node with its current canonical link.
    pub fn dump(&self) -> String {
        let mut s = String::new();
        s += "| Types\n";
        s += "| ----------------------\n";
        for ty in &self.types {
            let link = ty.link();
            s += &format!(
                "| #{:<4} {:<20} -> #{:<4} {:?}\n",
                ty.id,
                ty.node_kind().to_string(),
                link.canonical,
                link.quals
            );
        }
        s
    }

    /// Log the dump at debug level when the config asks for it. Returns
    /// whether a dump was logged.
    pub fn debug_dump(&self) -> bool {
        if !self.config.dump_type_context {
            return false;
        }
        debug!("type context dump:\n{}", self.dump());
        true
    }
}
