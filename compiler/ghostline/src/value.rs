//! Typed value wrappers and constant construction.

use std::fmt;
use std::marker::PhantomData;

use inkwell::values::BasicValueEnum;

use crate::context::with_active;
use crate::types::CgConst;

/// A typed handle to an LLVM value, paired with its display name.
///
/// The type parameter fixes the host type at compile time; the display name
/// is what the value prints as when interpolated into listing lines
/// (`arg0`, `42`, ...). No representation conversion is provided.
///
/// The underlying handle mirrors LLVM's raw pointer semantics: it is only
/// valid while the function whose body created it has the current insertion
/// point, and it never leaves the thread it was created on (the wrapper is
/// neither `Send` nor `Sync`).
pub struct Value<T> {
    /// Lifetime-erased LLVM value handle; see [`Value::handle`].
    raw: BasicValueEnum<'static>,
    /// Display name used in the synthetic listing.
    name: String,
    /// Pins the host type and keeps the wrapper off other threads.
    _marker: PhantomData<(*const (), T)>,
}

impl<T> Value<T> {
    /// Wrap an LLVM value under a display name, erasing its lifetime.
    pub(crate) fn new<'ctx>(handle: BasicValueEnum<'ctx>, name: String) -> Self {
        // SAFETY: `BasicValueEnum` is a raw `LLVMValueRef` plus a lifetime
        // marker; the transmute only erases the marker. Validity is scoped
        // by construction: the handle is created against the active builder
        // and is only handed back to that same builder (see `handle`), on
        // this thread, while its function is under construction.
        let raw = unsafe {
            std::mem::transmute::<BasicValueEnum<'ctx>, BasicValueEnum<'static>>(handle)
        };
        Self {
            raw,
            name,
            _marker: PhantomData,
        }
    }

    /// The display name used for this value in the listing.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The LLVM value handle, re-bound to the caller's context lifetime.
    pub(crate) fn handle<'ctx>(&self) -> BasicValueEnum<'ctx> {
        // SAFETY: inverse of the erasure in `new`; callers are inside the
        // builder that created the handle, so 'ctx is the original context.
        unsafe { std::mem::transmute::<BasicValueEnum<'static>, BasicValueEnum<'ctx>>(self.raw) }
    }
}

impl<T> fmt::Display for Value<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl<T> fmt::Debug for Value<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("name", &self.name)
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

/// Build a typed literal in the active builder's context.
///
/// The backend interns constants, so repeated calls with the same value are
/// deduplicated by LLVM itself. Display name is the canonical decimal text.
///
/// # Panics
///
/// Panics if no module builder is active on this thread.
pub fn constant<T: CgConst>(v: T) -> Value<T> {
    with_active(|mb| {
        let text = T::literal_text(&v);
        Value::new(T::literal(mb, v), text)
    })
}
