//! A Common-Lisp-style condition system.
//!
//! This crate decouples three concerns a conventional exception
//! mechanism conflates:
//!
//! - **signaling** that something exceptional happened ([`signal`],
//!   [`error`]),
//! - **handling** it at a dynamically-scoped outer frame
//!   ([`handling`]), and
//! - **recovering** via a named strategy installed by inner code but
//!   selected by outer code ([`with_restart`], [`invoke_restart`],
//!   [`available_restart`]).
//!
//! A fourth primitive, [`to_escape`], provides the non-local exit that
//! handlers use to unwind: calling an escape closure transfers control
//! straight back to the [`to_escape`] call that produced it, running
//! every intervening frame's scoped release (§4.1) on the way.
//!
//! # The core distinction: `signal` vs. `error`
//!
//! [`signal`] is ignorable: if nothing handles it, the call simply
//! returns [`HandlerOutcome::Declined`]. [`error`] is not: if nothing
//! handles it, the process logs the condition and aborts. Both walk the
//! same handler stack, newest-first; a handler's action runs *on top of*
//! the signaling frame (the signaling frame has not unwound), so it can
//! still see — and invoke — restarts installed below the signal site.
//! That visibility is what makes the restart pattern work at all: a
//! handler several frames up can call [`invoke_restart`] for a restart
//! declared right next to the `signal` call, and the unwind from there
//! back to that restart's `with_restart` passes through (and releases)
//! everything in between.
//!
//! # Example
//!
//! ```
//! use cond::prelude::*;
//!
//! #[derive(Debug)]
//! struct DivByZero;
//!
//! fn safe_divide(n: i32, d: i32) -> i32 {
//!     with_restart(
//!         vec![RestartBinding::new("use-value", |v: i32| v)],
//!         || {
//!             if d == 0 {
//!                 error::<DivByZero, i32>(DivByZero)
//!             } else {
//!                 n / d
//!             }
//!         },
//!     )
//! }
//!
//! let result = handling(
//!     vec![HandlerBinding::of_type(|_c: &DivByZero| -> HandlerOutcome<()> {
//!         invoke_restart("use-value", 0)
//!     })],
//!     || safe_divide(10, 0),
//! );
//! assert_eq!(result, 0);
//! ```
//!
//! This is only possible because the handler (installed by the outer
//! `handling`) runs with the restart (installed by the inner
//! `with_restart`) still live on the stack — see [`crate::handling`] and
//! [`crate::restart`] for the mechanics.
//!
//! # Non-goals
//!
//! No condition hierarchy: the matching predicate — [`Matcher::of_type`]
//! or [`Matcher::predicate`] — is supplied by the caller. No resumption
//! at the signal site other than via a restart or a `Handled` return. No
//! cross-thread dynamic contexts: each thread's handler/restart/escape
//! stacks are entirely its own, and a spawned thread starts empty.

pub mod escape;
pub mod handling;
pub mod prelude;
pub mod restart;

pub use escape::{to_escape, Escape};
pub use handling::{error, handling, signal, HandlerBinding};
pub use restart::{available_restart, invoke_restart, with_restart, RestartBinding};

pub use cond_core::{Condition, ConditionError, HandlerOutcome, Matcher, RestartName};
