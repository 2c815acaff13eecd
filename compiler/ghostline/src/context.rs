//! The module builder and the thread-local builder context.
//!
//! A [`ModuleBuilder`] owns everything needed to populate one LLVM module:
//! the module itself, the IR insertion cursor, the debug-info builder, and
//! the synthetic source generator. It borrows the LLVM [`Context`] rather
//! than owning it — inkwell's lifetimes do not allow a context and its
//! module in one struct — so the caller creates the context and keeps it
//! alive for the builder's lifetime.
//!
//! The DSL's free functions ([`constant`](crate::constant),
//! [`ret`](crate::ret), ...) take no builder argument; they reach the
//! builder through a thread-local pointer that is installed for the
//! duration of each [`create_function`](ModuleBuilder::create_function)
//! call and restored by guard. One thread, one active builder; independent
//! builders on different threads never interfere.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::path::{Path, PathBuf};
use std::ptr;

use inkwell::builder::Builder;
use inkwell::context::Context;
use inkwell::module::Module;
use tracing::debug;

use crate::debug::{DebugInfoBuilder, DebugInfoConfig};
use crate::module::CompiledModule;
use crate::source::SourceCodeGenerator;

/// Builder for one LLVM module and its synthetic listing.
///
/// Mutated by every function-construction call; consumed exactly once by
/// [`build`](Self::build). Move-only by construction: the LLVM module has
/// single-owner semantics and so does this.
pub struct ModuleBuilder<'ctx> {
    context: &'ctx Context,
    module: Module<'ctx>,
    ir: Builder<'ctx>,
    debug: DebugInfoBuilder<'ctx>,
    source: RefCell<SourceCodeGenerator>,
    source_path: PathBuf,
}

impl<'ctx> ModuleBuilder<'ctx> {
    /// Create a builder for a module called `name`.
    ///
    /// `source_path` is where the synthetic listing is expected to live; it
    /// labels the DWARF file descriptor and is never opened or written by
    /// this crate.
    pub fn new(context: &'ctx Context, name: &str, source_path: impl Into<PathBuf>) -> Self {
        Self::with_config(context, name, source_path, DebugInfoConfig::default())
    }

    /// Create a builder with explicit debug-info configuration.
    pub fn with_config(
        context: &'ctx Context,
        name: &str,
        source_path: impl Into<PathBuf>,
        config: DebugInfoConfig,
    ) -> Self {
        let module = context.create_module(name);
        let ir = context.create_builder();
        let source_path = source_path.into();
        let debug = DebugInfoBuilder::from_path(&module, context, config, &source_path);

        Self {
            context,
            module,
            ir,
            debug,
            source: RefCell::new(SourceCodeGenerator::new()),
            source_path,
        }
    }

    /// The LLVM context.
    #[must_use]
    pub fn llcx(&self) -> &'ctx Context {
        self.context
    }

    /// The LLVM module under construction.
    #[must_use]
    pub fn llmod(&self) -> &Module<'ctx> {
        &self.module
    }

    /// The IR insertion cursor.
    #[must_use]
    pub fn ir_builder(&self) -> &Builder<'ctx> {
        &self.ir
    }

    /// The debug-info builder.
    #[must_use]
    pub fn debug_info(&self) -> &DebugInfoBuilder<'ctx> {
        &self.debug
    }

    /// Path the synthetic listing is labeled with.
    #[must_use]
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// The listing text accumulated so far.
    #[must_use]
    pub fn source_text(&self) -> String {
        self.source.borrow().get()
    }

    /// Append one listing line; returns the line number it received.
    ///
    /// Statement emitters must call this *before* emitting the debug
    /// location and instruction, so the location references a line that
    /// already exists.
    pub fn add_line(&self, text: &str) -> u32 {
        self.source.borrow_mut().add_line(text)
    }

    /// The listing line the next [`add_line`](Self::add_line) will receive.
    #[must_use]
    pub fn current_line(&self) -> u32 {
        self.source.borrow().current_line()
    }

    /// Point subsequent instructions at `line` of the listing.
    ///
    /// Column is fixed at 1: the listing is one statement per line.
    pub fn set_statement_location(&self, line: u32) {
        self.debug.set_location(&self.ir, line, 1);
    }

    pub(crate) fn enter_indent(&self) {
        self.source.borrow_mut().enter_scope();
    }

    pub(crate) fn leave_indent(&self) {
        self.source.borrow_mut().leave_scope();
    }

    /// Finalize the module and hand off ownership.
    ///
    /// One-shot: the builder is consumed, mirroring the LLVM module's
    /// single-owner semantics. Debug metadata is finalized here; the
    /// listing is bundled alongside the module.
    #[must_use]
    pub fn build(self) -> CompiledModule<'ctx> {
        self.debug.finalize();
        let listing = self.source.borrow().get();
        debug!(
            module = %self.module.get_name().to_string_lossy(),
            lines = listing.lines().count(),
            "finalized module"
        );
        CompiledModule::new(self.module, listing, self.source_path)
    }
}

/// Prints the synthetic listing.
impl fmt::Display for ModuleBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source.borrow().get())
    }
}

thread_local! {
    /// The builder currently accepting DSL calls on this thread, type- and
    /// lifetime-erased. Null when no construction is in progress.
    static ACTIVE_BUILDER: Cell<*const ()> = const { Cell::new(ptr::null()) };
}

/// Restores the previously active builder when dropped, so construction
/// against the same builder may nest and a panicking body callback cannot
/// leave a stale pointer behind.
pub(crate) struct ActiveBuilderGuard {
    prev: *const (),
}

impl Drop for ActiveBuilderGuard {
    fn drop(&mut self) {
        ACTIVE_BUILDER.with(|cell| cell.set(self.prev));
    }
}

/// Install `mb` as this thread's active builder.
///
/// # Panics
///
/// Panics if a *different* builder is already active on this thread; that
/// is a programmer error (interleaved construction of two modules on one
/// thread) and is not recoverable.
pub(crate) fn activate(mb: &ModuleBuilder<'_>) -> ActiveBuilderGuard {
    let ptr = (mb as *const ModuleBuilder<'_>).cast::<()>();
    ACTIVE_BUILDER.with(|cell| {
        let prev = cell.get();
        assert!(
            prev.is_null() || prev == ptr,
            "a different module builder is already active on this thread"
        );
        cell.set(ptr);
        ActiveBuilderGuard { prev }
    })
}

/// Run `f` against this thread's active builder.
///
/// This is the single pinch point between the free-function DSL surface and
/// the builder; everything below it takes the builder by reference.
///
/// # Panics
///
/// Panics if no builder is active, i.e. a DSL free function was called
/// outside a function-construction body.
pub(crate) fn with_active<R>(f: impl FnOnce(&ModuleBuilder<'_>) -> R) -> R {
    ACTIVE_BUILDER.with(|cell| {
        let ptr = cell.get();
        assert!(
            !ptr.is_null(),
            "no module builder is active on this thread; DSL functions may only \
             be called inside a create_function body"
        );
        // SAFETY: the pointer was installed by `activate` from a live
        // `&ModuleBuilder` borrow that outlives its guard, and the guard is
        // dropped before that borrow ends. The reference handed to `f` is
        // higher-ranked, so it cannot escape the closure.
        let mb = unsafe { &*ptr.cast::<ModuleBuilder<'_>>() };
        f(mb)
    })
}
