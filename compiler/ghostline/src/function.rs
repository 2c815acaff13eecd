//! Function construction.
//!
//! [`FnSig`] renders a Rust function-pointer type like `fn(i32, i32) -> i32`
//! into everything a definition needs: the LLVM signature, the DWARF
//! subroutine type, the declaration text, and the typed parameter bindings.
//! [`ModuleBuilder::create_function`] then drives the construction sequence,
//! keeping the executable IR, the listing, and the debug metadata in step.

use std::marker::PhantomData;

use inkwell::debug_info::{AsDIScope, DIScope, DISubroutineType};
use inkwell::module::Linkage;
use inkwell::types::{BasicMetadataTypeEnum, FunctionType};
use inkwell::values::FunctionValue;
use tracing::debug;

use crate::context::{self, ModuleBuilder};
use crate::error::CodegenError;
use crate::types::{CgArg, CgType};
use crate::value::Value;

mod sealed {
    /// Signatures are function-pointer types only.
    pub trait Sealed {}
}

/// A function signature: return type plus ordered argument types.
///
/// Implemented for `fn(A1, .., An) -> R` pointer types up to eight
/// arguments, which keeps arity and per-position typing entirely static.
pub trait FnSig: sealed::Sealed {
    /// The return type.
    type Ret: CgType;
    /// Tuple of typed parameter values handed to the body callback.
    type Values;

    /// Build the LLVM function type.
    fn function_type<'ctx>(mb: &ModuleBuilder<'ctx>) -> FunctionType<'ctx>;

    /// Build the DWARF subroutine type.
    fn subroutine_type<'ctx>(
        mb: &ModuleBuilder<'ctx>,
    ) -> Result<DISubroutineType<'ctx>, CodegenError>;

    /// The declaration line text, e.g. `"i32 add(i32 arg0, i32 arg1) {"`.
    fn declaration(name: &str) -> String;

    /// Name the LLVM parameters `arg<i>` and wrap them as typed values.
    fn bind_params(function: FunctionValue<'_>) -> Self::Values;
}

impl<R: CgType> sealed::Sealed for fn() -> R {}

impl<R: CgType> FnSig for fn() -> R {
    type Ret = R;
    type Values = ();

    fn function_type<'ctx>(mb: &ModuleBuilder<'ctx>) -> FunctionType<'ctx> {
        R::fn_type(mb, &[])
    }

    fn subroutine_type<'ctx>(
        mb: &ModuleBuilder<'ctx>,
    ) -> Result<DISubroutineType<'ctx>, CodegenError> {
        let ret = R::debug_type(mb)?;
        Ok(mb.debug_info().create_subroutine_type(ret, &[]))
    }

    fn declaration(name: &str) -> String {
        format!("{} {name}() {{", R::NAME)
    }

    fn bind_params(_function: FunctionValue<'_>) -> Self::Values {}
}

macro_rules! impl_fn_sig {
    ($($arg:ident => $idx:tt),+) => {
        impl<R: CgType, $($arg: CgArg),+> sealed::Sealed for fn($($arg),+) -> R {}

        impl<R: CgType, $($arg: CgArg),+> FnSig for fn($($arg),+) -> R {
            type Ret = R;
            type Values = ($(Value<$arg>,)+);

            fn function_type<'ctx>(mb: &ModuleBuilder<'ctx>) -> FunctionType<'ctx> {
                let params: Vec<BasicMetadataTypeEnum<'ctx>> =
                    vec![$($arg::basic_type(mb).into()),+];
                R::fn_type(mb, &params)
            }

            fn subroutine_type<'ctx>(
                mb: &ModuleBuilder<'ctx>,
            ) -> Result<DISubroutineType<'ctx>, CodegenError> {
                let ret = R::debug_type(mb)?;
                let params = vec![$($arg::arg_debug_type(mb)?),+];
                Ok(mb.debug_info().create_subroutine_type(ret, &params))
            }

            fn declaration(name: &str) -> String {
                let params = [$(format!("{} arg{}", $arg::NAME, $idx)),+];
                format!("{} {name}({}) {{", R::NAME, params.join(", "))
            }

            fn bind_params(function: FunctionValue<'_>) -> Self::Values {
                ($(
                    {
                        let param = function
                            .get_nth_param($idx)
                            .expect("parameter count matches signature arity");
                        let name = format!("arg{}", $idx);
                        param.set_name(&name);
                        Value::<$arg>::new(param, name)
                    },
                )+)
            }
        }
    };
}

impl_fn_sig!(A0 => 0);
impl_fn_sig!(A0 => 0, A1 => 1);
impl_fn_sig!(A0 => 0, A1 => 1, A2 => 2);
impl_fn_sig!(A0 => 0, A1 => 1, A2 => 2, A3 => 3);
impl_fn_sig!(A0 => 0, A1 => 1, A2 => 2, A3 => 3, A4 => 4);
impl_fn_sig!(A0 => 0, A1 => 1, A2 => 2, A3 => 3, A4 => 4, A5 => 5);
impl_fn_sig!(A0 => 0, A1 => 1, A2 => 2, A3 => 3, A4 => 4, A5 => 5, A6 => 6);
impl_fn_sig!(A0 => 0, A1 => 1, A2 => 2, A3 => 3, A4 => 4, A5 => 5, A6 => 6, A7 => 7);

/// A completed, callable function: its name and LLVM handle.
///
/// The phantom signature keeps the reference typed, so a future `call`
/// primitive can check argument types against it statically.
#[derive(Clone)]
pub struct FunctionRef<'ctx, S> {
    name: String,
    function: FunctionValue<'ctx>,
    _signature: PhantomData<fn() -> S>,
}

impl<'ctx, S: FnSig> FunctionRef<'ctx, S> {
    fn new(name: String, function: FunctionValue<'ctx>) -> Self {
        Self {
            name,
            function,
            _signature: PhantomData,
        }
    }

    /// The function's name as emitted into the module and the listing.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The underlying LLVM function.
    #[must_use]
    pub fn function_value(&self) -> FunctionValue<'ctx> {
        self.function
    }
}

/// Pops the debug scope pushed for a function, even if its body panicked.
struct DebugScopeGuard<'a, 'ctx> {
    mb: &'a ModuleBuilder<'ctx>,
}

impl<'a, 'ctx> DebugScopeGuard<'a, 'ctx> {
    fn enter(mb: &'a ModuleBuilder<'ctx>, scope: DIScope<'ctx>) -> Self {
        mb.debug_info().push_scope(scope);
        Self { mb }
    }
}

impl Drop for DebugScopeGuard<'_, '_> {
    fn drop(&mut self) {
        self.mb.debug_info().pop_scope();
    }
}

/// Balances one listing indentation step, even if the body panicked.
struct IndentGuard<'a, 'ctx> {
    mb: &'a ModuleBuilder<'ctx>,
}

impl<'a, 'ctx> IndentGuard<'a, 'ctx> {
    fn enter(mb: &'a ModuleBuilder<'ctx>) -> Self {
        mb.enter_indent();
        Self { mb }
    }
}

impl Drop for IndentGuard<'_, '_> {
    fn drop(&mut self) {
        self.mb.leave_indent();
    }
}

impl<'ctx> ModuleBuilder<'ctx> {
    /// Define a function and populate its body.
    ///
    /// The signature is given as a function-pointer type and the body as a
    /// callback receiving the typed parameter values (as a tuple, in
    /// declared order):
    ///
    /// ```ignore
    /// let add = mb.create_function::<fn(i32, i32) -> i32, _>("add", |(a, _b)| {
    ///     ghostline::ret(a);
    /// })?;
    /// ```
    ///
    /// Emits the declaration and closing-brace listing lines, the entry
    /// block, and a `DISubprogram` whose line is the declaration's listing
    /// line. While the callback runs, this builder is the thread's active
    /// one, so the free-function DSL surface works without an explicit
    /// builder argument. Name collisions are LLVM's to resolve; nothing is
    /// deduplicated here.
    ///
    /// # Panics
    ///
    /// Panics if a different builder is active on this thread. Nested
    /// construction against the *same* builder is fine.
    pub fn create_function<S, F>(
        &self,
        name: &str,
        body: F,
    ) -> Result<FunctionRef<'ctx, S>, CodegenError>
    where
        S: FnSig,
        F: FnOnce(S::Values),
    {
        let _active = context::activate(self);

        let fn_type = S::function_type(self);
        let function = self
            .llmod()
            .add_function(name, fn_type, Some(Linkage::External));

        // The subprogram's line is the line the declaration is about to
        // occupy, queried before the declaration text is appended.
        let subroutine_type = S::subroutine_type(self)?;
        let line = self.current_line();
        let subprogram = self.debug_info().create_function(name, line, subroutine_type);
        self.debug_info().attach_function(function, subprogram);

        let _scope = DebugScopeGuard::enter(self, subprogram.as_debug_info_scope());

        // The declaration itself carries no location; clear whatever the
        // previous function left behind.
        self.debug_info().clear_location(self.ir_builder());
        let entry = self.llcx().append_basic_block(function, "entry");
        self.ir_builder().position_at_end(entry);

        self.add_line(&S::declaration(name));
        {
            let _indent = IndentGuard::enter(self);
            body(S::bind_params(function));
        }
        self.add_line("}");

        debug!(name, line, "defined function");
        Ok(FunctionRef::new(name.to_owned(), function))
    }
}
