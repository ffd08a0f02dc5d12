use std::{fmt::Display, sync::Once};

use tracing_subscriber::EnvFilter;

use crate::{
    config::Config,
    types::{PrimitiveType, Qualifiers, TypeContext, TypeId},
};

static INIT: Once = Once::new();

/// Install a compact subscriber once per test binary. Logging is off
/// unless RUST_LOG says otherwise.
pub fn init_logger() {
    INIT.call_once(|| {
        let env_filter = EnvFilter::builder()
            .with_default_directive(tracing_subscriber::filter::LevelFilter::OFF.into())
            .from_env_lossy();

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_file(false)
            .with_line_number(false)
            .without_time()
            .with_test_writer()
            .compact()
            .init();
    });
}

pub fn must<T, V: Display>(res: Result<T, V>) -> T {
    res.unwrap_or_else(|err| panic!("unexpected error: {}", err))
}

pub fn new_context() -> TypeContext {
    init_logger();
    TypeContext::with_config(Config::test())
}

pub fn int(ctx: &TypeContext) -> TypeId {
    ctx.primitive_type(PrimitiveType::Int32)
}

pub fn constant(ctx: &mut TypeContext, ty: TypeId) -> TypeId {
    ctx.new_qualified(ty, Qualifiers::CONST)
}

/// Declare and resolve `typedef name = actual`.
pub fn typedef(ctx: &mut TypeContext, name: &str, actual: TypeId) -> TypeId {
    let atom = ctx.intern(name);
    let td = ctx.new_typedef(atom);
    must(ctx.resolve_typedef(td, actual));
    td
}

/// Declare `typedef name` without resolving it.
pub fn forward_typedef(ctx: &mut TypeContext, name: &str) -> TypeId {
    let atom = ctx.intern(name);
    ctx.new_typedef(atom)
}
