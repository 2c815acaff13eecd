//! `DebugInfoBuilder`: the wrapper over LLVM's `DIBuilder`.

use std::cell::RefCell;
use std::path::Path;

use inkwell::builder::Builder;
use inkwell::context::Context;
use inkwell::debug_info::{
    AsDIScope, DIBasicType, DICompileUnit, DIFile, DIFlags, DIFlagsConstants, DIScope,
    DISubprogram, DISubroutineType, DIType, DWARFEmissionKind, DWARFSourceLanguage,
    DebugInfoBuilder as InkwellDIBuilder,
};
use inkwell::module::{FlagBehavior, Module};
use inkwell::values::FunctionValue;
use rustc_hash::FxHashMap;

use super::config::DebugInfoConfig;
use crate::error::CodegenError;

/// Debug information builder for one module under construction.
///
/// Wraps LLVM's `DIBuilder` to produce DWARF metadata that references the
/// synthetic listing. Owns the explicit debug-scope stack: entering a
/// function pushes its subprogram, leaving pops it, and the top (or the
/// compile unit, when empty) is the scope every debug location is bound to.
pub struct DebugInfoBuilder<'ctx> {
    /// The underlying LLVM `DIBuilder`.
    inner: InkwellDIBuilder<'ctx>,
    /// The compile unit for this module.
    compile_unit: DICompileUnit<'ctx>,
    /// The LLVM context.
    context: &'ctx Context,
    /// Configuration for debug info generation.
    config: DebugInfoConfig,
    /// Cached basic debug types, keyed by canonical name.
    basic_types: RefCell<FxHashMap<&'static str, DIBasicType<'ctx>>>,
    /// Current scope stack (function subprograms, innermost last).
    scope_stack: RefCell<Vec<DIScope<'ctx>>>,
}

impl<'ctx> DebugInfoBuilder<'ctx> {
    /// Producer string recorded in the compile unit.
    const PRODUCER: &'static str = "Ghostline";

    /// Create a new debug info builder for a module.
    ///
    /// `source_file`/`source_dir` name the synthetic listing; the listing is
    /// never opened or written here, the path only labels the debug file.
    #[must_use]
    pub fn new(
        module: &Module<'ctx>,
        context: &'ctx Context,
        config: DebugInfoConfig,
        source_file: &str,
        source_dir: &str,
    ) -> Self {
        // Module flags debuggers expect to find
        let debug_metadata_version = context.i32_type().const_int(3, false);
        module.add_basic_value_flag(
            "Debug Info Version",
            FlagBehavior::Warning,
            debug_metadata_version,
        );
        let dwarf_version = context
            .i32_type()
            .const_int(u64::from(config.dwarf_version), false);
        module.add_basic_value_flag("Dwarf Version", FlagBehavior::Warning, dwarf_version);

        let (inner, compile_unit) = module.create_debug_info_builder(
            /* allow_unresolved */ true,
            /* language */ DWARFSourceLanguage::C, // closest to the listing's syntax
            /* filename */ source_file,
            /* directory */ source_dir,
            /* producer */ Self::PRODUCER,
            /* is_optimized */ config.optimized,
            /* flags */ "",
            /* runtime_ver */ 0,
            /* split_name */ "",
            /* kind */ DWARFEmissionKind::Full,
            /* dwo_id */ 0,
            /* split_debug_inlining */ false,
            /* debug_info_for_profiling */ false,
            /* sysroot */ "",
            /* sdk */ "",
        );

        Self {
            inner,
            compile_unit,
            context,
            config,
            basic_types: RefCell::new(FxHashMap::default()),
            scope_stack: RefCell::new(Vec::new()),
        }
    }

    /// Create a debug info builder from the synthetic listing's path.
    #[must_use]
    pub fn from_path(
        module: &Module<'ctx>,
        context: &'ctx Context,
        config: DebugInfoConfig,
        path: &Path,
    ) -> Self {
        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown.gl");
        let dir = path.parent().and_then(|p| p.to_str()).unwrap_or(".");

        Self::new(module, context, config, file_name, dir)
    }

    /// Get the compile unit for this module.
    #[must_use]
    pub fn compile_unit(&self) -> DICompileUnit<'ctx> {
        self.compile_unit
    }

    /// Get the debug file descriptor for the synthetic listing.
    #[must_use]
    pub fn file(&self) -> DIFile<'ctx> {
        self.compile_unit.get_file()
    }

    // -- Type Creation --

    /// Get or create a basic debug type, with caching.
    ///
    /// `encoding` is a `DW_ATE_*` value; `size_bits` is the DWARF size,
    /// which may differ from the IR width (booleans are 8-bit in DWARF).
    pub fn basic_type(
        &self,
        name: &'static str,
        size_bits: u64,
        encoding: u32,
    ) -> Result<DIBasicType<'ctx>, CodegenError> {
        let mut cache = self.basic_types.borrow_mut();
        if let Some(&ty) = cache.get(name) {
            return Ok(ty);
        }

        let ty = self
            .inner
            .create_basic_type(name, size_bits, encoding, DIFlags::ZERO)
            .map_err(|_| CodegenError::DebugType { name })?;

        cache.insert(name, ty);
        Ok(ty)
    }

    /// Create a subroutine (function) type. `None` return type means void.
    pub fn create_subroutine_type(
        &self,
        return_type: Option<DIType<'ctx>>,
        param_types: &[DIType<'ctx>],
    ) -> DISubroutineType<'ctx> {
        self.inner
            .create_subroutine_type(self.file(), return_type, param_types, DIFlags::ZERO)
    }

    // -- Function Debug Info --

    /// Create the subprogram for a function defined at `line`.
    ///
    /// Parented at the current debug scope, so a function constructed while
    /// another is being built nests inside it, exactly as the scope stack
    /// says. Always a definition; `optimized` follows the config.
    pub fn create_function(
        &self,
        name: &str,
        line: u32,
        subroutine_type: DISubroutineType<'ctx>,
    ) -> DISubprogram<'ctx> {
        self.inner.create_function(
            self.current_scope(),
            name,
            None, // linkage_name defaults to `name`
            self.file(),
            line,
            subroutine_type,
            false, // is_local_to_unit: functions get external linkage
            true,  // is_definition
            line,  // scope_line = definition line
            DIFlags::ZERO,
            self.config.optimized,
        )
    }

    /// Attach a subprogram to its LLVM function value.
    pub fn attach_function(&self, func: FunctionValue<'ctx>, subprogram: DISubprogram<'ctx>) {
        func.set_subprogram(subprogram);
    }

    // -- Scope Management --

    /// Push a scope onto the scope stack.
    pub fn push_scope(&self, scope: DIScope<'ctx>) {
        self.scope_stack.borrow_mut().push(scope);
    }

    /// Pop a scope from the scope stack.
    pub fn pop_scope(&self) -> Option<DIScope<'ctx>> {
        self.scope_stack.borrow_mut().pop()
    }

    /// Get the current scope (top of stack, or the compile unit).
    pub fn current_scope(&self) -> DIScope<'ctx> {
        self.scope_stack
            .borrow()
            .last()
            .copied()
            .unwrap_or_else(|| self.compile_unit.as_debug_info_scope())
    }

    // -- Location Setting --

    /// Set the debug location for subsequent instructions, in the current
    /// scope. `line` and `column` are 1-indexed.
    pub fn set_location(&self, builder: &Builder<'ctx>, line: u32, column: u32) {
        let loc = self
            .inner
            .create_debug_location(self.context, line, column, self.current_scope(), None);
        builder.set_current_debug_location(loc);
    }

    /// Clear the current debug location.
    ///
    /// Used when entering a new function so its declaration does not inherit
    /// a stale location from whatever was emitted before.
    pub fn clear_location(&self, builder: &Builder<'ctx>) {
        builder.unset_current_debug_location();
    }

    // -- Finalization --

    /// Finalize the debug info. Must be called before the module is handed
    /// off; resolves forward references and validates the metadata.
    pub fn finalize(&self) {
        self.inner.finalize();
    }
}
