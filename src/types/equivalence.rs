use crate::types::{Kind, Qualifiers, TypeContext, TypeId, TypeKind};

impl TypeContext {
    /// Identity comparison used to deduplicate shared type instances.
    /// Arrays, references, qualifier wrappers and functions compare by
    /// structure; everything else compares by id.
    pub fn compare(&self, left: TypeId, right: TypeId) -> bool {
        if left == right {
            return true;
        }

        let (l, r) = (self.lookup(left), self.lookup(right));
        if l.node_kind() == Kind::Qualifier || r.node_kind() == Kind::Qualifier {
            return l.node_kind() == r.node_kind()
                && self.canonical(left) == self.canonical(right)
                && self.qualifiers(left) == self.qualifiers(right);
        }

        match (&l.kind, &r.kind) {
            (TypeKind::Array(a), TypeKind::Array(b)) => a.equal_to(b),
            (TypeKind::Reference(a), TypeKind::Reference(b)) => a.contained() == b.contained(),
            (TypeKind::Function(a), TypeKind::Function(b)) => {
                a.signature().same_shape(b.signature())
            }
            _ => false,
        }
    }

    /// Test whether two types are interchangeable for signature matching
    /// and casting. If `context` is const, both types are considered const.
    pub fn are_types_equivalent(&self, a: TypeId, b: TypeId, context: Qualifiers) -> bool {
        if (self.qualifiers(a) | context) != (self.qualifiers(b) | context) {
            return false;
        }

        let (a, b) = (self.canonical(a), self.canonical(b));
        if a == b {
            return true;
        }

        match (&self.lookup(a).kind, &self.lookup(b).kind) {
            (TypeKind::Primitive(pa), TypeKind::Primitive(pb)) => pa == pb,
            (TypeKind::Array(aa), TypeKind::Array(ba)) => {
                aa.length() == ba.length()
                    && self.are_types_equivalent(aa.contained(), ba.contained(), context)
            }
            (TypeKind::Reference(ar), TypeKind::Reference(br)) => {
                self.are_types_equivalent(ar.contained(), br.contained(), context)
            }
            (TypeKind::Function(_), TypeKind::Function(_)) => self.are_function_types_equal(a, b),
            _ => false,
        }
    }

    /// Test whether two function types have the same signature. Parameter
    /// names and default values do not take part.
    pub fn are_function_types_equal(&self, a: TypeId, b: TypeId) -> bool {
        let af = self.to_function(a).signature();
        let bf = self.to_function(b).signature();

        if af.params.len() != bf.params.len() || af.variadic != bf.variadic {
            return false;
        }
        if !self.are_types_equivalent(af.return_type, bf.return_type, Qualifiers::empty()) {
            return false;
        }

        af.params
            .iter()
            .zip(&bf.params)
            .all(|(pa, pb)| self.are_types_equivalent(pa.ty, pb.ty, Qualifiers::empty()))
    }
}
