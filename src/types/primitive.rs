use std::fmt;

use strum_macros::EnumIter;

/// Scalar kinds. Every primitive has a singleton type in each TypeContext.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum PrimitiveType {
    /// Semantically 0 or 1, stored as a single byte.
    Bool,
    /// 8-bit signed integer with extra coercion rules for legacy code.
    Char,
    /// Used when an int type was not explicitly written.
    ImplicitInt,
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Int64,
    Uint64,
    NativeInt,
    NativeUint,
    Float,
    Double,
}

impl PrimitiveType {
    /// Size in bytes when the native kinds are `pointer_width` wide.
    /// Char and ImplicitInt have no storage of their own; use
    /// `TypeContext::semantic_primitive` before asking for their size.
    pub fn size_with_pointer_width(self, pointer_width: usize) -> usize {
        match self {
            PrimitiveType::Bool | PrimitiveType::Int8 | PrimitiveType::Uint8 => 1,
            PrimitiveType::Int16 | PrimitiveType::Uint16 => 2,
            PrimitiveType::Int32 | PrimitiveType::Uint32 | PrimitiveType::Float => 4,
            PrimitiveType::Int64 | PrimitiveType::Uint64 | PrimitiveType::Double => 8,
            PrimitiveType::NativeInt | PrimitiveType::NativeUint => pointer_width,
            PrimitiveType::Char | PrimitiveType::ImplicitInt => {
                panic!("size of '{}' is not defined", self)
            }
        }
    }
}

/// Size in bytes of a primitive on the host.
pub fn size_of_primitive_type(ty: PrimitiveType) -> usize {
    ty.size_with_pointer_width(std::mem::size_of::<usize>())
}

/// Signedness of an integer kind. Panics for non-integer kinds.
pub fn is_primitive_type_signed(ty: PrimitiveType) -> bool {
    match ty {
        PrimitiveType::Int8
        | PrimitiveType::Int16
        | PrimitiveType::Int32
        | PrimitiveType::Int64
        | PrimitiveType::NativeInt => true,
        PrimitiveType::Uint8
        | PrimitiveType::Uint16
        | PrimitiveType::Uint32
        | PrimitiveType::Uint64
        | PrimitiveType::NativeUint => false,
        _ => panic!("signedness of '{}' is not defined", ty),
    }
}

pub fn signed_type_for_integer_size(size: usize) -> PrimitiveType {
    match size {
        1 => PrimitiveType::Int8,
        2 => PrimitiveType::Int16,
        4 => PrimitiveType::Int32,
        8 => PrimitiveType::Int64,
        _ => panic!("no signed integer type is {} bytes wide", size),
    }
}

pub fn unsigned_type_for_integer_size(size: usize) -> PrimitiveType {
    match size {
        1 => PrimitiveType::Uint8,
        2 => PrimitiveType::Uint16,
        4 => PrimitiveType::Uint32,
        8 => PrimitiveType::Uint64,
        _ => panic!("no unsigned integer type is {} bytes wide", size),
    }
}

/// Source spelling of a primitive.
pub fn primitive_name(ty: PrimitiveType) -> &'static str {
    match ty {
        PrimitiveType::Bool => "bool",
        PrimitiveType::Char => "char",
        PrimitiveType::ImplicitInt | PrimitiveType::Int32 => "int",
        PrimitiveType::Int8 => "int8",
        PrimitiveType::Uint8 => "uint8",
        PrimitiveType::Int16 => "int16",
        PrimitiveType::Uint16 => "uint16",
        PrimitiveType::Uint32 => "uint32",
        PrimitiveType::Int64 => "int64",
        PrimitiveType::Uint64 => "uint64",
        PrimitiveType::NativeInt => "intn",
        PrimitiveType::NativeUint => "uintn",
        PrimitiveType::Float => "float",
        PrimitiveType::Double => "double",
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", primitive_name(*self))
    }
}
