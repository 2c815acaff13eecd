//! Debug information generation.
//!
//! Wraps LLVM's `DIBuilder` so that every instruction the DSL emits carries
//! a `(line, column, scope)` debug location pointing into the synthetic
//! listing. Lines come from [`SourceCodeGenerator`](crate::SourceCodeGenerator);
//! columns are always 1 because the listing is one statement per line.
//!
//! The scope stack is explicit here rather than an exchanged field: entering
//! a function pushes its `DISubprogram`, leaving pops it, and restoration is
//! guard-driven so an early exit from a body callback cannot unbalance it.

mod builder;
mod config;

pub use builder::DebugInfoBuilder;
pub use config::DebugInfoConfig;

#[cfg(test)]
mod tests;
