//! Error types for module construction.
//!
//! The taxonomy is deliberately narrow: unsupported host types are a
//! compile-time error (missing trait impl), context misuse is a fail-fast
//! panic, and everything else is a backend rejection propagated unchanged.

use inkwell::builder::BuilderError;
use thiserror::Error;

/// Error during module or function construction.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// LLVM failed to create a basic debug type. This indicates an LLVM
    /// internal error and should not happen for the registered primitives.
    #[error("LLVM failed to create basic debug type '{name}'")]
    DebugType {
        /// Canonical name of the type that failed.
        name: &'static str,
    },

    /// An LLVM instruction-builder operation failed.
    #[error(transparent)]
    Builder(#[from] BuilderError),

    /// The finished module failed LLVM verification.
    #[error("module verification failed: {message}")]
    Verify {
        /// Verifier output.
        message: String,
    },
}
