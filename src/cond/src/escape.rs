//! `to_escape` — the escape mechanism (§4.2).

use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};

use cond_core::{BindingId, ConditionError, FrameId};
use cond_kernel::context;
use cond_kernel::unwind::{self, Unwind};

/// A first-class non-local exit, captured by [`to_escape`] and handed to
/// its body. Calling it (from the body, or from any dynamic descendant
/// of the body — a handler action, a restart strategy) unwinds straight
/// back to the `to_escape` call that produced it, which then returns the
/// supplied value.
///
/// `Escape` is `Clone`/`Copy`-free by design but may be moved into
/// nested closures freely; it carries only the ids it needs.
pub struct Escape<T> {
    binding_id: BindingId,
    frame_id: FrameId,
    _marker: PhantomData<fn() -> T>,
}

impl<T: 'static + Send> Escape<T> {
    /// Transfer control back to the `to_escape` call that created this
    /// escape, which will return `value`.
    ///
    /// The return type is `T`, not `!`, purely so the call can sit in
    /// expression position next to a normal value of type `T` (the
    /// "mystery" scenario in the test suite relies on this) — at
    /// runtime this never returns, since [`unwind::throw_escape`]
    /// diverges.
    ///
    /// If this escape's frame has already been popped (its `to_escape`
    /// already returned), this raises [`ConditionError::EscapeExpired`]
    /// via [`crate::error`] instead of unwinding (I4).
    pub fn call(&self, value: T) -> T {
        if !context::escape_is_active(self.frame_id) {
            return crate::error(ConditionError::EscapeExpired);
        }
        unwind::throw_escape(self.binding_id, Box::new(value))
    }
}

/// Create a named exit point and run `body` with an [`Escape`] closure
/// that targets it.
///
/// Returns `body`'s value on normal return, or the value passed to the
/// escape closure if `body` (or anything it calls, including a handler
/// or restart running on top of it) invoked it. The escape frame is
/// popped — becoming permanently inactive — on every exit path.
pub fn to_escape<T, F>(body: F) -> T
where
    T: 'static + Send,
    F: FnOnce(Escape<T>) -> T,
{
    let (binding_id, frame_id) = context::push_escape();
    let escape = Escape {
        binding_id,
        frame_id,
        _marker: PhantomData,
    };

    let result = panic::catch_unwind(AssertUnwindSafe(|| body(escape)));
    context::pop_escape(frame_id);

    match result {
        Ok(value) => value,
        Err(payload) => match payload.downcast::<Unwind>() {
            Ok(unwind) => match *unwind {
                Unwind::Escape { target, value } if target == binding_id => {
                    *value.downcast::<T>().unwrap_or_else(|_| {
                        panic!("cond: an escape closure's value did not match the type expected by its to_escape call")
                    })
                }
                other => panic::resume_unwind(Box::new(other)),
            },
            Err(original) => panic::resume_unwind(original),
        },
    }
}
