//! The type trait registry.
//!
//! Maps each supported host type to its LLVM type, its DWARF debug type,
//! its canonical listing token, and (for numerics) its alignment. The
//! registry is closed: the traits are sealed, so "is this type supported"
//! is checked at compile time and adding a type means adding one impl here
//! and nothing anywhere else.
//!
//! All queries take the builder context by reference; only the outermost
//! DSL functions go through the thread-local.

use inkwell::debug_info::DIType;
use inkwell::types::{BasicMetadataTypeEnum, BasicType, BasicTypeEnum, FunctionType};
use inkwell::values::BasicValueEnum;

use crate::context::ModuleBuilder;
use crate::error::CodegenError;

// DWARF base type encodings (DWARF v4 §7.8).
const DW_ATE_BOOLEAN: u32 = 0x02;
const DW_ATE_FLOAT: u32 = 0x04;
const DW_ATE_SIGNED: u32 = 0x05;
const DW_ATE_UNSIGNED: u32 = 0x07;

mod sealed {
    /// Closes the registry: host types are supported by this crate only.
    pub trait Sealed {}
}

/// A host type with LLVM and debug descriptors.
///
/// Implemented for `()` (void) and the numeric primitives. Querying an
/// unregistered type is a trait-bound failure, not a runtime error.
pub trait CgType: sealed::Sealed + Copy {
    /// Canonical token used for this type in the synthetic listing.
    const NAME: &'static str;
    /// Alignment in bytes; 0 for void.
    const ALIGNMENT: u32;

    /// Build a function type returning `Self` with the given parameters.
    fn fn_type<'ctx>(
        mb: &ModuleBuilder<'ctx>,
        params: &[BasicMetadataTypeEnum<'ctx>],
    ) -> FunctionType<'ctx>;

    /// The debug type descriptor; `None` for void, which DWARF models as
    /// an absent return type.
    fn debug_type<'ctx>(mb: &ModuleBuilder<'ctx>) -> Result<Option<DIType<'ctx>>, CodegenError>;
}

/// A host type usable as a function argument (everything but void).
pub trait CgArg: CgType {
    /// The LLVM type descriptor.
    fn basic_type<'ctx>(mb: &ModuleBuilder<'ctx>) -> BasicTypeEnum<'ctx>;

    /// The debug type descriptor, known to exist for argument types.
    fn arg_debug_type<'ctx>(mb: &ModuleBuilder<'ctx>) -> Result<DIType<'ctx>, CodegenError>;
}

/// A host type with literal constant support.
pub trait CgConst: CgArg {
    /// Build an immutable LLVM literal for `v` in the active context.
    fn literal<'ctx>(mb: &ModuleBuilder<'ctx>, v: Self) -> BasicValueEnum<'ctx>;

    /// The canonical decimal text of `v`, used as the literal's display
    /// name in the listing.
    fn literal_text(v: &Self) -> String;
}

impl sealed::Sealed for () {}

/// `void`: null debug type, no alignment, return-position only.
impl CgType for () {
    const NAME: &'static str = "void";
    const ALIGNMENT: u32 = 0;

    fn fn_type<'ctx>(
        mb: &ModuleBuilder<'ctx>,
        params: &[BasicMetadataTypeEnum<'ctx>],
    ) -> FunctionType<'ctx> {
        mb.llcx().void_type().fn_type(params, false)
    }

    fn debug_type<'ctx>(_mb: &ModuleBuilder<'ctx>) -> Result<Option<DIType<'ctx>>, CodegenError> {
        Ok(None)
    }
}

macro_rules! cg_int {
    ($ty:ty, $name:literal, $align:expr, $dwarf_bits:expr, $encoding:expr, $ir_ty:ident, $signed:expr) => {
        impl sealed::Sealed for $ty {}

        impl CgType for $ty {
            const NAME: &'static str = $name;
            const ALIGNMENT: u32 = $align;

            fn fn_type<'ctx>(
                mb: &ModuleBuilder<'ctx>,
                params: &[BasicMetadataTypeEnum<'ctx>],
            ) -> FunctionType<'ctx> {
                mb.llcx().$ir_ty().fn_type(params, false)
            }

            fn debug_type<'ctx>(
                mb: &ModuleBuilder<'ctx>,
            ) -> Result<Option<DIType<'ctx>>, CodegenError> {
                Ok(Some(Self::arg_debug_type(mb)?))
            }
        }

        impl CgArg for $ty {
            fn basic_type<'ctx>(mb: &ModuleBuilder<'ctx>) -> BasicTypeEnum<'ctx> {
                mb.llcx().$ir_ty().as_basic_type_enum()
            }

            fn arg_debug_type<'ctx>(
                mb: &ModuleBuilder<'ctx>,
            ) -> Result<DIType<'ctx>, CodegenError> {
                Ok(mb
                    .debug_info()
                    .basic_type($name, $dwarf_bits, $encoding)?
                    .as_type())
            }
        }

        impl CgConst for $ty {
            fn literal<'ctx>(mb: &ModuleBuilder<'ctx>, v: Self) -> BasicValueEnum<'ctx> {
                mb.llcx().$ir_ty().const_int(v as u64, $signed).into()
            }

            fn literal_text(v: &Self) -> String {
                v.to_string()
            }
        }
    };
}

macro_rules! cg_float {
    ($ty:ty, $name:literal, $align:expr, $dwarf_bits:expr, $ir_ty:ident) => {
        impl sealed::Sealed for $ty {}

        impl CgType for $ty {
            const NAME: &'static str = $name;
            const ALIGNMENT: u32 = $align;

            fn fn_type<'ctx>(
                mb: &ModuleBuilder<'ctx>,
                params: &[BasicMetadataTypeEnum<'ctx>],
            ) -> FunctionType<'ctx> {
                mb.llcx().$ir_ty().fn_type(params, false)
            }

            fn debug_type<'ctx>(
                mb: &ModuleBuilder<'ctx>,
            ) -> Result<Option<DIType<'ctx>>, CodegenError> {
                Ok(Some(Self::arg_debug_type(mb)?))
            }
        }

        impl CgArg for $ty {
            fn basic_type<'ctx>(mb: &ModuleBuilder<'ctx>) -> BasicTypeEnum<'ctx> {
                mb.llcx().$ir_ty().as_basic_type_enum()
            }

            fn arg_debug_type<'ctx>(
                mb: &ModuleBuilder<'ctx>,
            ) -> Result<DIType<'ctx>, CodegenError> {
                Ok(mb
                    .debug_info()
                    .basic_type($name, $dwarf_bits, DW_ATE_FLOAT)?
                    .as_type())
            }
        }

        impl CgConst for $ty {
            fn literal<'ctx>(mb: &ModuleBuilder<'ctx>, v: Self) -> BasicValueEnum<'ctx> {
                mb.llcx().$ir_ty().const_float(v as f64).into()
            }

            fn literal_text(v: &Self) -> String {
                v.to_string()
            }
        }
    };
}

// bool is i1 in IR but 8-bit in DWARF
cg_int!(bool, "bool", 1, 8, DW_ATE_BOOLEAN, bool_type, false);

cg_int!(i8, "i8", 1, 8, DW_ATE_SIGNED, i8_type, true);
cg_int!(i16, "i16", 2, 16, DW_ATE_SIGNED, i16_type, true);
cg_int!(i32, "i32", 4, 32, DW_ATE_SIGNED, i32_type, true);
cg_int!(i64, "i64", 8, 64, DW_ATE_SIGNED, i64_type, true);

cg_int!(u8, "u8", 1, 8, DW_ATE_UNSIGNED, i8_type, false);
cg_int!(u16, "u16", 2, 16, DW_ATE_UNSIGNED, i16_type, false);
cg_int!(u32, "u32", 4, 32, DW_ATE_UNSIGNED, i32_type, false);
cg_int!(u64, "u64", 8, 64, DW_ATE_UNSIGNED, i64_type, false);

cg_float!(f32, "f32", 4, 32, f32_type);
cg_float!(f64, "f64", 8, 64, f64_type);
