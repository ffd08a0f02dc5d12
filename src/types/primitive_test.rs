use strum::IntoEnumIterator;

use super::*;

#[test]
fn test_primitive_sizes() {
    assert_eq!(size_of_primitive_type(PrimitiveType::Bool), 1);
    assert_eq!(size_of_primitive_type(PrimitiveType::Int8), 1);
    assert_eq!(size_of_primitive_type(PrimitiveType::Uint8), 1);
    assert_eq!(size_of_primitive_type(PrimitiveType::Int16), 2);
    assert_eq!(size_of_primitive_type(PrimitiveType::Uint16), 2);
    assert_eq!(size_of_primitive_type(PrimitiveType::Int32), 4);
    assert_eq!(size_of_primitive_type(PrimitiveType::Uint32), 4);
    assert_eq!(size_of_primitive_type(PrimitiveType::Float), 4);
    assert_eq!(size_of_primitive_type(PrimitiveType::Int64), 8);
    assert_eq!(size_of_primitive_type(PrimitiveType::Uint64), 8);
    assert_eq!(size_of_primitive_type(PrimitiveType::Double), 8);
    assert_eq!(
        size_of_primitive_type(PrimitiveType::NativeInt),
        std::mem::size_of::<usize>()
    );
    assert_eq!(
        size_of_primitive_type(PrimitiveType::NativeUint),
        std::mem::size_of::<usize>()
    );
}

#[test]
fn test_sizes_are_valid_widths() {
    for p in PrimitiveType::iter() {
        if matches!(p, PrimitiveType::Char | PrimitiveType::ImplicitInt) {
            continue;
        }
        let size = p.size_with_pointer_width(4);
        assert!([1, 2, 4, 8].contains(&size), "{} has size {}", p, size);
    }
}

#[test]
#[should_panic]
fn test_size_of_implicit_int() {
    size_of_primitive_type(PrimitiveType::ImplicitInt);
}

#[test]
fn test_signedness() {
    assert!(is_primitive_type_signed(PrimitiveType::Int8));
    assert!(is_primitive_type_signed(PrimitiveType::Int64));
    assert!(is_primitive_type_signed(PrimitiveType::NativeInt));
    assert!(!is_primitive_type_signed(PrimitiveType::Uint16));
    assert!(!is_primitive_type_signed(PrimitiveType::NativeUint));
}

#[test]
#[should_panic]
fn test_signedness_of_float() {
    is_primitive_type_signed(PrimitiveType::Float);
}

#[test]
fn test_types_for_integer_size() {
    for size in [1, 2, 4, 8] {
        let signed = signed_type_for_integer_size(size);
        let unsigned = unsigned_type_for_integer_size(size);
        assert_eq!(size_of_primitive_type(signed), size);
        assert_eq!(size_of_primitive_type(unsigned), size);
        assert!(is_primitive_type_signed(signed));
        assert!(!is_primitive_type_signed(unsigned));
    }
}

#[test]
#[should_panic(expected = "no signed integer type is 3 bytes wide")]
fn test_signed_type_for_bad_size() {
    signed_type_for_integer_size(3);
}

#[test]
#[should_panic(expected = "no unsigned integer type is 16 bytes wide")]
fn test_unsigned_type_for_bad_size() {
    unsigned_type_for_integer_size(16);
}

#[test]
fn test_primitive_names() {
    assert_eq!(primitive_name(PrimitiveType::Int32), "int");
    assert_eq!(primitive_name(PrimitiveType::ImplicitInt), "int");
    assert_eq!(primitive_name(PrimitiveType::Uint8), "uint8");
    assert_eq!(PrimitiveType::Double.to_string(), "double");
}

#[test]
fn test_qualifier_set() {
    let none = Qualifiers::empty();
    assert!(!none.is_const());
    assert!((none | Qualifiers::CONST).is_const());
    assert_eq!(Qualifiers::CONST | Qualifiers::CONST, Qualifiers::CONST);
    assert_eq!(Qualifiers::CONST & none, none);
}
