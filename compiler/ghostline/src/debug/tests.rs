use inkwell::context::Context;
use inkwell::debug_info::AsDIScope;
use inkwell::module::Module;

use super::*;

/// Helper: create a `DebugInfoBuilder` with default config.
fn make_test_di<'ctx>(module: &Module<'ctx>, context: &'ctx Context) -> DebugInfoBuilder<'ctx> {
    DebugInfoBuilder::new(
        module,
        context,
        DebugInfoConfig::default(),
        "test.gl",
        "/tmp",
    )
}

#[test]
fn basic_types_are_cached_per_name() {
    let ctx = Context::create();
    let module = ctx.create_module("test_basic_cache");
    let di = make_test_di(&module, &ctx);

    let first = di.basic_type("i32", 32, 0x05).unwrap();
    let second = di.basic_type("i32", 32, 0x05).unwrap();
    assert_eq!(
        first.as_type().as_mut_ptr(),
        second.as_type().as_mut_ptr(),
        "repeated queries should hit the cache"
    );
}

#[test]
fn scope_stack_defaults_to_compile_unit() {
    let ctx = Context::create();
    let module = ctx.create_module("test_scope_stack");
    let di = make_test_di(&module, &ctx);

    let cu_scope = di.compile_unit().as_debug_info_scope();
    assert_eq!(di.current_scope().as_mut_ptr(), cu_scope.as_mut_ptr());

    let subroutine = di.create_subroutine_type(None, &[]);
    let subprogram = di.create_function("f", 1, subroutine);
    di.push_scope(subprogram.as_debug_info_scope());
    assert_eq!(
        di.current_scope().as_mut_ptr(),
        subprogram.as_debug_info_scope().as_mut_ptr()
    );

    assert!(di.pop_scope().is_some());
    assert_eq!(di.current_scope().as_mut_ptr(), cu_scope.as_mut_ptr());
    assert!(di.pop_scope().is_none());
}

#[test]
fn attached_subprogram_with_location_verifies() {
    let ctx = Context::create();
    let module = ctx.create_module("test_subprogram_verify");
    let di = make_test_di(&module, &ctx);
    let builder = ctx.create_builder();

    let fn_ty = ctx.void_type().fn_type(&[], false);
    let func = module.add_function("f", fn_ty, None);
    let subroutine = di.create_subroutine_type(None, &[]);
    let subprogram = di.create_function("f", 1, subroutine);
    di.attach_function(func, subprogram);

    let entry = ctx.append_basic_block(func, "entry");
    builder.position_at_end(entry);

    di.push_scope(subprogram.as_debug_info_scope());
    di.set_location(&builder, 2, 1);
    builder.build_return(None).unwrap();
    di.pop_scope();

    di.finalize();
    assert!(
        module.verify().is_ok(),
        "module should verify after finalize"
    );
}

#[test]
fn subroutine_type_accepts_parameters() {
    let ctx = Context::create();
    let module = ctx.create_module("test_subroutine_params");
    let di = make_test_di(&module, &ctx);

    let int_ty = di.basic_type("i32", 32, 0x05).unwrap().as_type();
    let subroutine = di.create_subroutine_type(Some(int_ty), &[int_ty, int_ty]);
    assert!(!subroutine.as_mut_ptr().is_null());

    di.finalize();
}
