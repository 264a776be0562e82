//! Type definitions shared by [`cond_kernel`] (the dynamic-context engine)
//! and `cond` (the public facade).
//!
//! <div class="admonition-follows"></div>
//!
//! > **Relation to Other Specifications:** the vocabulary here follows
//! > Common Lisp's condition system (`signal`, `error`, `handler-bind`,
//! > `restart-bind`, `invoke-restart`) and Dylan's `block`/exit-function
//! > pairing for non-local exits. Nothing here imposes a condition
//! > *hierarchy*: the matching predicate is supplied by the caller.
//!
//! This crate defines no engine state — it is the vocabulary crate. The
//! stacks that give the vocabulary its dynamic-extent meaning live in
//! [`cond_kernel`].
//!
//! [`cond_kernel`]: https://docs.rs/cond_kernel

mod error;
mod ids;
mod outcome;

pub mod matcher;

pub use error::ConditionError;
pub use ids::{BindingId, FrameId};
pub use matcher::Matcher;
pub use outcome::HandlerOutcome;

use core::any::Any;
use core::fmt;

/// Anything that can be signaled.
///
/// There is no supertrait bound beyond what the type-erasure boundary
/// requires: a condition must be `'static` (so it can cross an
/// [`Any`]-erased boundary) and [`fmt::Debug`] (so an unhandled `error`
/// can be named in its fatal diagnostic).
pub trait Condition: Any + fmt::Debug {}

impl<T: Any + fmt::Debug> Condition for T {}

/// A symbolic restart name.
///
/// Plain `&'static str` is sufficient here: restart names are always
/// literals chosen by the author of a `with_restart` call, compared for
/// equality only (never parsed, never displayed to an end user as a
/// primary message).
pub type RestartName = &'static str;
