//! The non-local transfer payload.
//!
//! Both kinds of non-local transfer — invoking an escape closure,
//! invoking a restart — are implemented as a Rust panic carrying this
//! type, caught by a matching `catch_unwind` at the target's own
//! primitive (`to_escape`, `with_restart`). A panic whose payload
//! doesn't downcast to `Unwind` is a host failure, not ours, and must be
//! re-raised with [`std::panic::resume_unwind`] rather than swallowed —
//! see the call sites in `cond::escape` and `cond::restart`.

use std::any::Any;
use std::panic;

use cond_core::{BindingId, RestartName};

/// An in-flight non-local transfer.
pub enum Unwind {
    /// Carries `value` to the `to_escape` call that allocated `target`.
    Escape {
        target: BindingId,
        value: Box<dyn Any + Send>,
    },
    /// Carries `args` to the restart named `name` within the
    /// `with_restart` call that allocated `target`.
    Restart {
        target: BindingId,
        name: RestartName,
        args: Box<dyn Any + Send>,
    },
}

/// Initiate an escape transfer. Diverges by panicking; callers type this
/// as returning their target type `T` so it unifies with the branch of
/// an expression it sits in (the value is never actually produced here —
/// `to_escape` produces it at the catch site).
pub fn throw_escape(target: BindingId, value: Box<dyn Any + Send>) -> ! {
    panic::panic_any(Unwind::Escape { target, value })
}

/// Initiate a restart transfer.
pub fn throw_restart(target: BindingId, name: RestartName, args: Box<dyn Any + Send>) -> ! {
    panic::panic_any(Unwind::Restart { target, name, args })
}
