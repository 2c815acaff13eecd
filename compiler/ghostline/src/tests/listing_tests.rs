//! Listing-generation tests: the synthetic source must come out exactly as
//! the statements were emitted, line for line.

use inkwell::context::Context;
use pretty_assertions::assert_eq;

use crate::{constant, ret, ret_void, ModuleBuilder};

#[test]
fn add_function_listing_matches_line_for_line() {
    let context = Context::create();
    let mb = ModuleBuilder::new(&context, "m", "/tmp/m.gl");

    let f = mb
        .create_function::<fn(i32, i32) -> i32, _>("add", |(arg0, _arg1)| {
            ret(arg0);
        })
        .unwrap();
    assert_eq!(f.name(), "add");

    let compiled = mb.build();
    assert_eq!(
        compiled.listing(),
        "i32 add(i32 arg0, i32 arg1) {\n    return arg0;\n}\n"
    );
    compiled.verify().unwrap();
}

#[test]
fn noop_function_listing() {
    let context = Context::create();
    let mb = ModuleBuilder::new(&context, "m", "/tmp/m.gl");

    mb.create_function::<fn(), _>("noop", |()| {
        ret_void();
    })
    .unwrap();

    // The listing is readable before finalization, via Display.
    assert_eq!(mb.to_string(), "void noop() {\n    return;\n}\n");

    let compiled = mb.build();
    assert_eq!(compiled.listing(), "void noop() {\n    return;\n}\n");
    compiled.verify().unwrap();
}

#[test]
fn two_functions_number_contiguously() {
    let context = Context::create();
    let mb = ModuleBuilder::new(&context, "m", "/tmp/m.gl");

    mb.create_function::<fn(i32, i32) -> i32, _>("add", |(arg0, _arg1)| {
        ret(arg0);
    })
    .unwrap();
    mb.create_function::<fn(), _>("noop", |()| {
        ret_void();
    })
    .unwrap();

    let compiled = mb.build();
    assert_eq!(
        compiled.listing(),
        "i32 add(i32 arg0, i32 arg1) {\n    return arg0;\n}\n\
         void noop() {\n    return;\n}\n"
    );
    compiled.verify().unwrap();
}

#[test]
fn constant_return_prints_decimal_text() {
    let context = Context::create();
    let mb = ModuleBuilder::new(&context, "m", "/tmp/m.gl");

    mb.create_function::<fn() -> i32, _>("five", |()| {
        ret(constant(5i32));
    })
    .unwrap();

    let compiled = mb.build();
    assert_eq!(compiled.listing(), "i32 five() {\n    return 5;\n}\n");
    compiled.verify().unwrap();
}

#[test]
fn parameters_are_named_positionally() {
    let context = Context::create();
    let mb = ModuleBuilder::new(&context, "m", "/tmp/m.gl");

    mb.create_function::<fn(i64, bool, f64) -> i64, _>("mixed", |(a, b, c)| {
        assert_eq!(a.name(), "arg0");
        assert_eq!(b.name(), "arg1");
        assert_eq!(c.name(), "arg2");
        ret(a);
    })
    .unwrap();

    let compiled = mb.build();
    assert_eq!(
        compiled.listing(),
        "i64 mixed(i64 arg0, bool arg1, f64 arg2) {\n    return arg0;\n}\n"
    );
    assert!(
        compiled
            .print_ir()
            .contains("define i64 @mixed(i64 %arg0, i1 %arg1, double %arg2)"),
        "parameter names should carry through to the IR"
    );
    compiled.verify().unwrap();
}

#[test]
fn constant_display_is_the_literal_text() {
    let context = Context::create();
    let mb = ModuleBuilder::new(&context, "m", "/tmp/m.gl");

    mb.create_function::<fn() -> u8, _>("byte", |()| {
        let v = constant(200u8);
        assert_eq!(v.to_string(), "200");
        ret(v);
    })
    .unwrap();

    let compiled = mb.build();
    assert_eq!(compiled.listing(), "u8 byte() {\n    return 200;\n}\n");
}
