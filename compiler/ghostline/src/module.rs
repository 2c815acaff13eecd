//! The finalized module.

use std::path::{Path, PathBuf};

use inkwell::module::Module;

use crate::error::CodegenError;

/// An immutable, fully constructed module.
///
/// Bundles the LLVM module (debug metadata already embedded) with the
/// synthetic listing it was built against. This is the handoff point to
/// whatever packages or JIT-executes the module; nothing here runs code or
/// touches the filesystem. Writing the listing to
/// [`source_path`](Self::source_path) before execution is what makes the
/// debugger able to show source while stepping.
pub struct CompiledModule<'ctx> {
    module: Module<'ctx>,
    listing: String,
    source_path: PathBuf,
}

impl<'ctx> CompiledModule<'ctx> {
    pub(crate) fn new(module: Module<'ctx>, listing: String, source_path: PathBuf) -> Self {
        Self {
            module,
            listing,
            source_path,
        }
    }

    /// The LLVM module.
    #[must_use]
    pub fn module(&self) -> &Module<'ctx> {
        &self.module
    }

    /// The complete synthetic listing, in emission order.
    #[must_use]
    pub fn listing(&self) -> &str {
        &self.listing
    }

    /// Path the listing is labeled with in the debug metadata.
    #[must_use]
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// The module's textual IR, including the debug metadata.
    #[must_use]
    pub fn print_ir(&self) -> String {
        self.module.print_to_string().to_string()
    }

    /// Run LLVM's module verifier.
    pub fn verify(&self) -> Result<(), CodegenError> {
        self.module.verify().map_err(|message| CodegenError::Verify {
            message: message.to_string(),
        })
    }

    /// Unwrap the LLVM module for external packaging.
    #[must_use]
    pub fn into_module(self) -> Module<'ctx> {
        self.module
    }
}
