use bitflags::bitflags;

use crate::{
    ast::{BaseType, TypeExpr, TypeSpecifier},
    types::{ArrayLength, TypeContext, TypeId, TypeKind, primitive_name},
    util::Atom,
};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TypeDiagFlags: u32 {
        /// Include parameter names in function signatures.
        const NAMES = 0x1;
        /// Keep an array's own qualifiers apart from its element's, so
        /// `const (int[])` and `const int[]` read differently.
        const QUALIFIERS = 0x2;
    }
}

/// Place a declared name around array dims. Old-style fixed dims follow
/// the name (`int x[3]`), otherwise dims stay on the type (`int[] x`).
fn declaration(base: String, dims: &str, has_fixed_lengths: bool, name: Option<&str>) -> String {
    match name {
        Some(name) if has_fixed_lengths => format!("{} {}{}", base, name, dims),
        Some(name) => format!("{}{} {}", base, dims, name),
        None => format!("{}{}", base, dims),
    }
}

impl TypeContext {
    /// Build a type name for diagnostics, with an optional name for building
    /// a declaration.
    pub fn build_type_name(&self, ty: TypeId, name: Option<Atom>, flags: TypeDiagFlags) -> String {
        let name = name.map(|atom| self.name_of(atom));

        if self.is_array(ty) {
            let mut dims = String::new();
            let mut has_fixed_lengths = false;
            let mut cursor = ty;
            while let Some(array) = self.as_array(cursor) {
                has_fixed_lengths |= array.has_fixed_length();
                dims += &array.length().to_string();
                cursor = array.contained();
            }

            let inner = self.build_type_name(cursor, None, flags - TypeDiagFlags::NAMES);
            if flags.contains(TypeDiagFlags::QUALIFIERS) {
                let array = format!("{}{}", inner, dims);
                let array = if self.is_const(ty) {
                    format!("const ({})", array)
                } else {
                    array
                };
                return declaration(array, "", false, name);
            }

            let base = if self.is_const(ty) && !self.is_const(cursor) {
                format!("const {}", inner)
            } else {
                inner
            };
            return declaration(base, &dims, has_fixed_lengths, name);
        }

        let mut builder = if self.is_function(ty) {
            self.function_name(ty, flags)
        } else {
            self.spelling(ty, flags)
        };
        if self.is_const(ty) {
            builder = format!("const {}", builder);
        }
        declaration(builder, "", false, name)
    }

    fn function_name(&self, ty: TypeId, flags: TypeDiagFlags) -> String {
        let sig = self.to_function(ty).signature();
        let mut params: Vec<String> = sig
            .params
            .iter()
            .map(|param| {
                let name = param.name.filter(|_| flags.contains(TypeDiagFlags::NAMES));
                self.build_type_name(param.ty, name, flags)
            })
            .collect();
        if sig.variadic {
            params.push("...".to_string());
        }

        format!(
            "function {}({})",
            self.build_type_name(sig.return_type, None, flags),
            params.join(", ")
        )
    }

    /// Spelling of a non-array, non-function canonical type.
    fn spelling(&self, ty: TypeId, flags: TypeDiagFlags) -> String {
        let canon = self.canonical(ty);
        match &self.lookup(canon).kind {
            TypeKind::Primitive(p) => primitive_name(*p).to_string(),
            TypeKind::Void | TypeKind::ImplicitVoid => "void".to_string(),
            TypeKind::Unchecked => "any".to_string(),
            TypeKind::MetaFunction => "Function".to_string(),
            TypeKind::NullType => "null_t".to_string(),
            TypeKind::OverloadedFunction => "<overloaded function>".to_string(),
            TypeKind::Unresolvable => "<unresolved>".to_string(),
            TypeKind::Enum(e) => self.name_of(e.name()).to_string(),
            TypeKind::Struct(r) => self.name_of(r.name(self.decls())).to_string(),
            TypeKind::Typeset(t) => self.name_of(t.name(self.decls())).to_string(),
            TypeKind::Typedef(td) => self.name_of(td.name()).to_string(),
            TypeKind::Reference(r) => {
                format!("{}&", self.build_type_name(r.contained(), None, flags))
            }
            TypeKind::Array(_) | TypeKind::Function(_) | TypeKind::Qualifier => {
                self.build_type_name(canon, None, flags)
            }
        }
    }

    /// Build a name from a type specifier, before its type is resolved.
    /// Only uses what was written; nothing is looked up or resolved.
    pub fn build_spec_name(
        &self,
        spec: &TypeSpecifier,
        name: Option<Atom>,
        _flags: TypeDiagFlags,
    ) -> String {
        let mut base = match &spec.base {
            BaseType::Primitive(p) => primitive_name(*p).to_string(),
            BaseType::Void => "void".to_string(),
            BaseType::Unchecked => "any".to_string(),
            BaseType::MetaFunction => "Function".to_string(),
            BaseType::Named(atom) => self.name_of(*atom).to_string(),
        };
        if spec.is_const {
            base = format!("const {}", base);
        }
        if spec.is_by_ref {
            base += "&";
        }

        let dims: String = spec
            .dims
            .iter()
            .map(|dim| match dim {
                Some(n) => ArrayLength::Fixed(*n).to_string(),
                None => ArrayLength::Unsized.to_string(),
            })
            .collect();
        let has_fixed_lengths = spec.dims.iter().any(Option::is_some);
        declaration(base, &dims, has_fixed_lengths, name.map(|a| self.name_of(a)))
    }

    /// Build a name from a type expression, resolved or not.
    pub fn build_type_expr_name(
        &self,
        te: &TypeExpr,
        name: Option<Atom>,
        flags: TypeDiagFlags,
    ) -> String {
        match te {
            TypeExpr::Resolved(ty) => self.build_type_name(*ty, name, flags),
            TypeExpr::Spec(spec) => self.build_spec_name(spec, name, flags),
        }
    }
}
