//! `with_restart`, `invoke_restart`, `available_restart` — the restart
//! mechanism (§4.4).

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use cond_core::{BindingId, ConditionError, RestartName};
use cond_kernel::context;
use cond_kernel::unwind::{self, Unwind};

type ErasedStrategy<T> = Box<dyn FnMut(Box<dyn Any + Send>) -> T>;

/// One `(name, strategy)` pair for a [`with_restart`] call, erased over
/// the strategy's argument type.
pub struct RestartBinding<T> {
    name: RestartName,
    strategy: ErasedStrategy<T>,
}

impl<T: 'static> RestartBinding<T> {
    /// Bind `name` to `strategy`. `strategy` is written against a
    /// concrete argument type `A`; the erasure needed to share a
    /// `Vec<RestartBinding<T>>` across restarts with different argument
    /// types happens here.
    pub fn new<A>(name: RestartName, mut strategy: impl FnMut(A) -> T + 'static) -> Self
    where
        A: 'static,
    {
        Self {
            name,
            strategy: Box::new(move |args: Box<dyn Any + Send>| {
                let args = *args.downcast::<A>().unwrap_or_else(|_| {
                    panic!("cond: invoke_restart's arguments did not match the type expected by restart {name:?}")
                });
                strategy(args)
            }),
        }
    }
}

/// Install `bindings` as named recovery strategies for the dynamic
/// extent of `body`. Every binding in one call shares a single
/// `BindingId` — the return point [`invoke_restart`] transfers to.
///
/// Returns `body`'s value on normal return, or the selected strategy's
/// value if [`invoke_restart`] targeted this call's `BindingId`. Per
/// §4.4 step 4, the strategy runs only after this call's restart frames
/// (and everything nested inside it) have been popped — i.e. in the
/// dynamic context of `with_restart`'s own caller.
pub fn with_restart<T>(bindings: Vec<RestartBinding<T>>, body: impl FnOnce() -> T) -> T
where
    T: 'static,
{
    let binding_id = BindingId::fresh();
    let names = bindings.iter().map(|b| b.name).collect();
    let frame_ids = context::push_restart_group(binding_id, names);
    let mut strategies: Vec<(RestartName, ErasedStrategy<T>)> =
        bindings.into_iter().map(|b| (b.name, b.strategy)).collect();

    let result = panic::catch_unwind(AssertUnwindSafe(|| body()));
    context::pop_restart_group(&frame_ids);

    match result {
        Ok(value) => value,
        Err(payload) => match payload.downcast::<Unwind>() {
            Ok(unwind) => match *unwind {
                Unwind::Restart { target, name, args } if target == binding_id => {
                    let (_, strategy) = strategies
                        .iter_mut()
                        .find(|(n, _)| *n == name)
                        .unwrap_or_else(|| {
                            panic!("cond: restart {name:?} targeted this with_restart's binding but wasn't declared in it")
                        });
                    strategy(args)
                }
                other => panic::resume_unwind(Box::new(other)),
            },
            Err(original) => panic::resume_unwind(original),
        },
    }
}

/// `true` iff a restart named `name` is visible on the current thread's
/// restart stack — i.e. some enclosing `with_restart` declared it.
/// Read-only; does not transfer control.
pub fn available_restart(name: RestartName) -> bool {
    context::find_restart(name).is_some()
}

/// Transfer control to the innermost restart named `name`, passing it
/// `args`. Never returns normally: on success this unwinds to the
/// owning `with_restart`, which returns the strategy's value; if no
/// restart named `name` is visible, this raises
/// [`ConditionError::NoSuchRestart`] via [`crate::error`] instead.
pub fn invoke_restart<A, T>(name: RestartName, args: A) -> T
where
    A: 'static + Send,
    T: 'static,
{
    match context::find_restart(name) {
        Some(binding_id) => unwind::throw_restart(binding_id, name, Box::new(args)),
        None => crate::error(ConditionError::NoSuchRestart),
    }
}
