//! Debug info configuration.

/// Configuration for debug information generation.
///
/// Unlike an ahead-of-time compiler there is no "no debug info" level here:
/// producing a steppable listing is the point of this crate, so the debug
/// builder is always active and only its flavor is configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugInfoConfig {
    /// Whether subprograms are flagged as optimized.
    ///
    /// JIT output is emitted without a separate optimization pipeline but is
    /// still "optimized" from a debugger's point of view (no stable stack
    /// slots per variable), so this defaults to `true`.
    pub optimized: bool,
    /// DWARF version to emit (4 or 5).
    pub dwarf_version: u32,
}

impl Default for DebugInfoConfig {
    fn default() -> Self {
        Self {
            optimized: true,
            dwarf_version: 4,
        }
    }
}

impl DebugInfoConfig {
    /// Set whether subprograms are flagged as optimized.
    #[must_use]
    pub fn with_optimized(mut self, optimized: bool) -> Self {
        self.optimized = optimized;
        self
    }

    /// Set the DWARF version (4 or 5).
    #[must_use]
    pub fn with_dwarf_version(mut self, version: u32) -> Self {
        self.dwarf_version = version;
        self
    }
}
