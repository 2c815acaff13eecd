//! Statement-emission primitives.
//!
//! Every statement kind follows the same discipline: append the statement
//! text to the listing first (that returns the authoritative line number),
//! then set the debug location to that line, then emit the LLVM
//! instruction. Never the reverse — the location must reference a line that
//! already exists in the listing.
//!
//! The builder `Result`s are `expect`ed here: inkwell only reports errors
//! for internal LLVM state corruption, not for anything a caller did.

use inkwell::values::BasicValueEnum;

use crate::context::with_active;
use crate::types::CgArg;
use crate::value::Value;

/// Emit `return <value>;`.
///
/// # Panics
///
/// Panics if no module builder is active on this thread.
pub fn ret<T: CgArg>(value: Value<T>) {
    with_active(|mb| {
        let line = mb.add_line(&format!("return {value};"));
        mb.set_statement_location(line);
        let handle: BasicValueEnum<'_> = value.handle();
        mb.ir_builder()
            .build_return(Some(&handle))
            .expect("LLVM ret emission failed");
    });
}

/// Emit a value-less `return;`.
///
/// # Panics
///
/// Panics if no module builder is active on this thread.
pub fn ret_void() {
    with_active(|mb| {
        let line = mb.add_line("return;");
        mb.set_statement_location(line);
        mb.ir_builder()
            .build_return(None)
            .expect("LLVM ret emission failed");
    });
}
