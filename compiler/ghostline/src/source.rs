//! Synthetic source listing generation.
//!
//! JIT-built functions have no source file, so a pseudo-source listing is
//! synthesized one line per emitted definition or statement. The line number
//! returned by [`SourceCodeGenerator::add_line`] is authoritative: it is the
//! line the debug location of the corresponding LLVM instruction must
//! reference, which is what lets a debugger single-step the generated code.

/// Width of one indentation step, in columns.
const INDENT_WIDTH: usize = 4;

/// Accumulates the synthetic listing text.
///
/// Lines are 1-indexed (standard for debug info) and numbered in append
/// order; a line's indentation is baked in when it is appended and never
/// retroactively changed.
#[derive(Debug)]
pub struct SourceCodeGenerator {
    buffer: String,
    /// The line number the next `add_line` call will assign.
    line_no: u32,
    /// Current indentation in columns.
    indent: usize,
}

impl Default for SourceCodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceCodeGenerator {
    /// Create an empty generator. The first appended line is line 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            line_no: 1,
            indent: 0,
        }
    }

    /// Append `text` as a new line, prefixed with the current indentation.
    ///
    /// Returns the 1-based line number just assigned.
    pub fn add_line(&mut self, text: &str) -> u32 {
        for _ in 0..self.indent {
            self.buffer.push(' ');
        }
        self.buffer.push_str(text);
        self.buffer.push('\n');

        let line = self.line_no;
        self.line_no += 1;
        line
    }

    /// Increase indentation by one step.
    ///
    /// Calls must be balanced with [`leave_scope`](Self::leave_scope); the
    /// function builder guarantees this for function bodies.
    pub fn enter_scope(&mut self) {
        self.indent += INDENT_WIDTH;
    }

    /// Decrease indentation by one step. Saturates at column zero.
    pub fn leave_scope(&mut self) {
        self.indent = self.indent.saturating_sub(INDENT_WIDTH);
    }

    /// The line number the next appended line will receive.
    #[must_use]
    pub fn current_line(&self) -> u32 {
        self.line_no
    }

    /// The full listing text accumulated so far.
    ///
    /// Valid at any time, including before the module is finalized.
    #[must_use]
    pub fn get(&self) -> String {
        self.buffer.clone()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn line_numbers_start_at_one_and_increase_by_one() {
        let mut gen = SourceCodeGenerator::new();
        assert_eq!(gen.current_line(), 1);
        for expected in 1..=10 {
            assert_eq!(gen.add_line("x"), expected);
            assert_eq!(gen.current_line(), expected + 1);
        }
    }

    #[test]
    fn indentation_is_baked_in_at_append_time() {
        let mut gen = SourceCodeGenerator::new();
        gen.add_line("a {");
        gen.enter_scope();
        gen.add_line("b");
        gen.enter_scope();
        gen.add_line("c");
        gen.leave_scope();
        gen.add_line("d");
        gen.leave_scope();
        gen.add_line("}");
        assert_eq!(gen.get(), "a {\n    b\n        c\n    d\n}\n");
    }

    #[test]
    fn leave_scope_never_goes_negative() {
        let mut gen = SourceCodeGenerator::new();
        gen.leave_scope();
        gen.leave_scope();
        gen.add_line("flat");
        assert_eq!(gen.get(), "flat\n");
    }

    #[test]
    fn get_is_readable_mid_stream() {
        let mut gen = SourceCodeGenerator::new();
        gen.add_line("first");
        assert_eq!(gen.get(), "first\n");
        gen.add_line("second");
        assert_eq!(gen.get(), "first\nsecond\n");
    }
}
