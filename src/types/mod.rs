mod context;
mod decl;
mod equivalence;
mod name;
mod primitive;
mod qualifiers;
mod size;
mod types;

pub use context::TypeContext;
pub use decl::*;
pub use name::TypeDiagFlags;
pub use primitive::*;
pub use qualifiers::Qualifiers;
pub use types::*;

pub(crate) use types::Link;

#[cfg(test)]
mod primitive_test;





#[cfg(test)]
mod name_test;
