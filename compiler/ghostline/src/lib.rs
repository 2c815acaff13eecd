//! Ghostline: a typed, embedded LLVM code-generation DSL.
//!
//! Functions built through this crate get three mutually consistent
//! artifacts at once: the executable LLVM IR, a human-readable pseudo-source
//! listing (one line per emitted definition or statement), and DWARF debug
//! metadata whose line numbers point into that listing. Write the listing to
//! the path the module was labeled with, and a source-level debugger can
//! single-step JIT-produced code for which no source file ever existed.
//!
//! # Example
//!
//! ```ignore
//! use ghostline::{constant, ret, ModuleBuilder};
//! use inkwell::context::Context;
//!
//! let context = Context::create();
//! let mb = ModuleBuilder::new(&context, "m", "/tmp/m.gl");
//!
//! mb.create_function::<fn(i32, i32) -> i32, _>("add", |(a, _b)| {
//!     ret(a);
//! })?;
//!
//! let compiled = mb.build();
//! assert_eq!(compiled.listing(), "i32 add(i32 arg0, i32 arg1) {\n    return arg0;\n}\n");
//! # Ok::<(), ghostline::CodegenError>(())
//! ```
//!
//! Inside a `create_function` body the free functions ([`constant`],
//! [`ret`], [`ret_void`]) need no builder argument: the builder is installed
//! as the thread's active one for the duration of the call. One builder per
//! thread at a time; independent builders on different threads don't
//! interfere.
//!
//! # Debug Environment Variables
//!
//! - `RUST_LOG=ghostline=debug`: trace function definitions and module
//!   finalization (requires calling [`init_tracing`] once at startup).

// Crate-level lint configuration for codegen-specific patterns
#![allow(
    // LLVM constant APIs take u64; the sign-carrying casts are intentional
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_lossless,
    // the integer literal macro casts every width through u64, including u64
    clippy::unnecessary_cast,
)]

use std::sync::Once;

pub mod context;
pub mod debug;
pub mod error;
pub mod function;
pub mod module;
pub mod source;
pub mod statements;
pub mod types;
pub mod value;

pub use context::ModuleBuilder;
pub use debug::{DebugInfoBuilder, DebugInfoConfig};
pub use error::CodegenError;
pub use function::{FnSig, FunctionRef};
pub use module::CompiledModule;
pub use source::SourceCodeGenerator;
pub use statements::{ret, ret_void};
pub use types::{CgArg, CgConst, CgType};
pub use value::{constant, Value};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=ghostline=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

#[cfg(test)]
mod tests;
