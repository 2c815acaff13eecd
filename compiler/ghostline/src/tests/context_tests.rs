//! Thread-local builder-context tests: isolation across threads, nesting on
//! one thread, and fail-fast misuse detection.

use std::thread;

use inkwell::context::Context;
use pretty_assertions::assert_eq;

use crate::{ret_void, ModuleBuilder};

#[test]
fn independent_builders_on_separate_threads() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            thread::spawn(move || {
                let context = Context::create();
                let mb = ModuleBuilder::new(&context, &format!("m{i}"), "/tmp/m.gl");
                mb.create_function::<fn(), _>("noop", |()| {
                    ret_void();
                })
                .unwrap();
                let listing = mb.build().listing().to_owned();
                listing
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "void noop() {\n    return;\n}\n");
    }
}

#[test]
fn nested_construction_against_the_same_builder() {
    let context = Context::create();
    let mb = ModuleBuilder::new(&context, "m", "/tmp/m.gl");

    mb.create_function::<fn(), _>("outer", |()| {
        // Nesting against the same builder is allowed; the inner function's
        // subprogram is parented under `outer`'s debug scope.
        mb.create_function::<fn(), _>("inner", |()| {
            ret_void();
        })
        .unwrap();
    })
    .unwrap();

    assert_eq!(
        mb.to_string(),
        "void outer() {\n    void inner() {\n        return;\n    }\n}\n"
    );
}

#[test]
#[should_panic(expected = "different module builder")]
fn interleaving_two_builders_on_one_thread_panics() {
    let context = Context::create();
    let a = ModuleBuilder::new(&context, "a", "/tmp/a.gl");
    let b = ModuleBuilder::new(&context, "b", "/tmp/b.gl");

    a.create_function::<fn(), _>("f", |()| {
        let _ = b.create_function::<fn(), _>("g", |()| {
            ret_void();
        });
    })
    .unwrap();
}

#[test]
#[should_panic(expected = "no module builder is active")]
fn dsl_call_outside_a_body_panics() {
    ret_void();
}

#[test]
fn sequential_construction_on_one_thread_is_fine() {
    let context = Context::create();

    // Same thread, but never interleaved: each builder is only active while
    // its own functions are under construction.
    let a = ModuleBuilder::new(&context, "a", "/tmp/a.gl");
    a.create_function::<fn(), _>("f", |()| {
        ret_void();
    })
    .unwrap();

    let b = ModuleBuilder::new(&context, "b", "/tmp/b.gl");
    b.create_function::<fn(), _>("g", |()| {
        ret_void();
    })
    .unwrap();

    assert_eq!(a.build().listing(), "void f() {\n    return;\n}\n");
    assert_eq!(b.build().listing(), "void g() {\n    return;\n}\n");
}
