use crate::{
    ast::{BaseType, TypeExpr, TypeSpecifier},
    util::testing::{constant, forward_typedef, int, new_context, typedef},
};

use super::*;

fn name(ctx: &TypeContext, ty: TypeId) -> String {
    ctx.build_type_name(ty, None, TypeDiagFlags::empty())
}

fn declared(ctx: &mut TypeContext, ty: TypeId, decl: &str) -> String {
    let atom = ctx.intern(decl);
    ctx.build_type_name(ty, Some(atom), TypeDiagFlags::empty())
}

#[test]
fn test_primitive_names() {
    let mut ctx = new_context();
    let i = int(&ctx);
    let ci = constant(&mut ctx, i);

    assert_eq!(name(&ctx, i), "int");
    assert_eq!(name(&ctx, ci), "const int");
    assert_eq!(
        name(&ctx, ctx.primitive_type(PrimitiveType::NativeUint)),
        "uintn"
    );
    assert_eq!(declared(&mut ctx, ci, "x"), "const int x");
}

#[test]
fn test_builtin_names() {
    let ctx = new_context();
    assert_eq!(name(&ctx, ctx.void_type()), "void");
    assert_eq!(name(&ctx, ctx.implicit_void_type()), "void");
    assert_eq!(name(&ctx, ctx.unchecked_type()), "any");
    assert_eq!(name(&ctx, ctx.meta_function_type()), "Function");
    assert_eq!(name(&ctx, ctx.null_type()), "null_t");
    assert_eq!(
        name(&ctx, ctx.overloaded_function_type()),
        "<overloaded function>"
    );
    assert_eq!(name(&ctx, ctx.unresolvable_type()), "<unresolved>");
}

#[test]
fn test_named_types() {
    let mut ctx = new_context();
    let color = ctx.intern("Color");
    let e = ctx.new_enum(color);
    assert_eq!(name(&ctx, e), "Color");

    let point = ctx.intern("Point");
    let decl = ctx.decls_mut().add_record(point);
    let s = ctx.new_struct(decl);
    assert_eq!(name(&ctx, s), "Point");

    let number = ctx.intern("Number");
    let decl = ctx.decls_mut().add_typeset(number);
    let ts = ctx.new_typeset(decl);
    assert_eq!(name(&ctx, ts), "Number");

    let r = ctx.new_reference(e);
    assert_eq!(name(&ctx, r), "Color&");
}

#[test]
fn test_typedef_names() {
    let mut ctx = new_context();
    let i = int(&ctx);
    let pending = forward_typedef(&mut ctx, "Handle");
    assert_eq!(name(&ctx, pending), "Handle");

    // Resolved aliases render as the type they denote.
    let alias = typedef(&mut ctx, "Int", i);
    assert_eq!(name(&ctx, alias), "int");

    let ci = constant(&mut ctx, i);
    let const_alias = typedef(&mut ctx, "ConstInt", ci);
    assert_eq!(name(&ctx, const_alias), "const int");
}

#[test]
fn test_array_names() {
    let mut ctx = new_context();
    let i = int(&ctx);
    let ci = constant(&mut ctx, i);

    let fixed = ctx.new_array(i, ArrayLength::Fixed(3));
    let unsized_ = ctx.new_array(i, ArrayLength::Unsized);
    let nested = ctx.new_array(unsized_, ArrayLength::Fixed(3));
    let const_elems = ctx.new_array(ci, ArrayLength::Unsized);
    let const_array = constant(&mut ctx, unsized_);

    assert_eq!(name(&ctx, fixed), "int[3]");
    assert_eq!(name(&ctx, unsized_), "int[]");
    assert_eq!(name(&ctx, nested), "int[3][]");
    assert_eq!(name(&ctx, const_elems), "const int[]");
    assert_eq!(name(&ctx, const_array), "const int[]");

    assert_eq!(declared(&mut ctx, fixed, "x"), "int x[3]");
    assert_eq!(declared(&mut ctx, unsized_, "x"), "int[] x");
    assert_eq!(declared(&mut ctx, nested, "x"), "int x[3][]");
    assert_eq!(declared(&mut ctx, const_array, "x"), "const int[] x");
}

#[test]
fn test_function_names() {
    let mut ctx = new_context();
    let i = int(&ctx);
    let f = ctx.primitive_type(PrimitiveType::Float);
    let arr = ctx.new_array(i, ArrayLength::Unsized);
    let x = ctx.intern("x");
    let values = ctx.intern("values");

    let mut sig = FunctionSignature::new(
        vec![
            Parameter::new(Some(x), i),
            Parameter::new(None, f),
            Parameter::new(Some(values), arr),
        ],
        ctx.void_type(),
    );
    let func = ctx.new_function(sig.clone());
    assert_eq!(name(&ctx, func), "function void(int, float, int[])");
    assert_eq!(
        ctx.build_type_name(func, None, TypeDiagFlags::NAMES),
        "function void(int x, float, int[] values)"
    );

    sig.variadic = true;
    sig.return_type = i;
    let variadic = ctx.new_function(sig);
    assert_eq!(
        name(&ctx, variadic),
        "function int(int, float, int[], ...)"
    );
}

#[test]
fn test_spec_names() {
    let mut ctx = new_context();
    let x = ctx.intern("x");
    let color = ctx.intern("Color");

    let plain = TypeSpecifier::new(BaseType::Primitive(PrimitiveType::Int32));
    assert_eq!(ctx.build_spec_name(&plain, None, TypeDiagFlags::empty()), "int");

    let by_ref = TypeSpecifier::new(BaseType::Named(color)).with_const().with_ref();
    assert_eq!(
        ctx.build_spec_name(&by_ref, Some(x), TypeDiagFlags::empty()),
        "const Color& x"
    );

    let fixed = TypeSpecifier::new(BaseType::Primitive(PrimitiveType::Char))
        .with_dim(Some(8))
        .with_dim(None);
    assert!(fixed.is_array());
    assert_eq!(
        ctx.build_spec_name(&fixed, Some(x), TypeDiagFlags::empty()),
        "char x[8][]"
    );

    let open = TypeSpecifier::new(BaseType::Unchecked).with_dim(None);
    assert_eq!(
        ctx.build_spec_name(&open, Some(x), TypeDiagFlags::empty()),
        "any[] x"
    );

    // Rendering a specifier never allocates types.
    assert_eq!(ctx.len(), new_context().len());
}

#[test]
fn test_type_expr_names() {
    let mut ctx = new_context();
    let i = int(&ctx);
    let arr = ctx.new_array(i, ArrayLength::Fixed(2));
    let x = ctx.intern("x");

    let resolved = TypeExpr::Resolved(arr);
    assert_eq!(resolved.resolved(), Some(arr));
    assert_eq!(
        ctx.build_type_expr_name(&resolved, Some(x), TypeDiagFlags::empty()),
        "int x[2]"
    );

    let spec = TypeExpr::Spec(TypeSpecifier::new(BaseType::Void));
    assert!(spec.spec().is_some());
    assert_eq!(
        ctx.build_type_expr_name(&spec, None, TypeDiagFlags::empty()),
        "void"
    );
}

#[test]
fn test_array_qualifier_names() {
    let mut ctx = new_context();
    let i = int(&ctx);
    let ci = constant(&mut ctx, i);
    let const_elems = ctx.new_array(ci, ArrayLength::Unsized);
    let plain = ctx.new_array(i, ArrayLength::Unsized);
    let const_array = constant(&mut ctx, plain);
    let fixed = ctx.new_array(ci, ArrayLength::Fixed(3));
    let both = constant(&mut ctx, fixed);
    let x = ctx.intern("x");

    let flags = TypeDiagFlags::QUALIFIERS;
    assert_eq!(ctx.build_type_name(plain, None, flags), "int[]");
    assert_eq!(ctx.build_type_name(const_elems, None, flags), "const int[]");
    assert_eq!(ctx.build_type_name(const_array, None, flags), "const (int[])");
    assert_eq!(
        ctx.build_type_name(both, None, flags),
        "const (const int[3])"
    );
    assert_eq!(
        ctx.build_type_name(const_array, Some(x), flags),
        "const (int[]) x"
    );

    // Without the flag both spell the same.
    assert_eq!(name(&ctx, const_elems), name(&ctx, const_array));
}
