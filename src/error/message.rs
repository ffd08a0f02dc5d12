use std::fmt;

use crate::types::{TypeContext, TypeDiagFlags, TypeId};

/// Diagnostics raised by the type engine itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// sizeof was asked of a type that is not an array.
    SizeofNeedsArray { ty: TypeId },
    /// The array has fewer ranks than the requested level.
    SizeofInvalidRank { ty: TypeId, level: usize },
    /// The rank at the requested level has no fixed length.
    SizeofIndeterminate { ty: TypeId, level: usize },
}

impl Message {
    pub fn render(&self, ctx: &TypeContext) -> String {
        match self {
            Message::SizeofNeedsArray { ty } => format!(
                "cannot compute size of '{}': not an array",
                type_name(ctx, *ty)
            ),
            Message::SizeofInvalidRank { ty, level } => format!(
                "cannot compute size of '{}': no rank at level {}",
                type_name(ctx, *ty),
                level
            ),
            Message::SizeofIndeterminate { ty, level } => format!(
                "cannot compute size of '{}': rank {} has no fixed size",
                type_name(ctx, *ty),
                level
            ),
        }
    }

    /// Optional hint shown below the message.
    pub fn info(&self, ctx: &TypeContext) -> Option<String> {
        match self {
            Message::SizeofInvalidRank { ty, .. } if ctx.is_array(*ty) => {
                let mut ranks = 1;
                let mut cursor = ctx.to_array(*ty).contained();
                while let Some(inner) = ctx.as_array(cursor) {
                    ranks += 1;
                    cursor = inner.contained();
                }
                Some(format!("the array has {} rank(s)", ranks))
            }
            _ => None,
        }
    }
}

fn type_name(ctx: &TypeContext, ty: TypeId) -> String {
    ctx.build_type_name(ty, None, TypeDiagFlags::empty())
}

/// A typedef whose target refers back to the typedef itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleError {
    pub name: String,
}

impl fmt::Display for CycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "typedef '{}' refers to itself", self.name)
    }
}
