//! `handling`, `signal`, `error` — the handler mechanism (§4.3).

use std::any::Any;

use cond_core::{Condition, HandlerOutcome, Matcher};
use cond_kernel::context;
use cond_kernel::guard::HandlerGroupGuard;

/// One `(matcher, action)` pair, erased over the condition type it
/// matches and the result type its action produces.
///
/// Built with [`HandlerBinding::of_type`] (match by concrete type) or
/// [`HandlerBinding::new`] (match by an arbitrary [`Matcher`]).
pub struct HandlerBinding {
    matcher: Matcher,
    action: context::ErasedAction,
}

impl HandlerBinding {
    /// Bind a handler whose action runs when `matcher` accepts the
    /// signaled condition. The action itself is written against a
    /// concrete condition type `C` and result type `R`; `HandlerBinding`
    /// does the type erasure needed to sit on the shared handler stack
    /// alongside handlers bound to unrelated types.
    pub fn new<C, R>(matcher: Matcher, mut action: impl FnMut(&C) -> HandlerOutcome<R> + 'static) -> Self
    where
        C: 'static,
        R: 'static,
    {
        Self {
            matcher,
            action: Box::new(move |condition: &dyn Any| {
                let condition = condition.downcast_ref::<C>().unwrap_or_else(|| {
                    panic!("cond: a matcher accepted a condition that did not downcast to its own handler's type")
                });
                match action(condition) {
                    HandlerOutcome::Handled(v) => HandlerOutcome::Handled(Box::new(v) as Box<dyn Any>),
                    HandlerOutcome::Declined => HandlerOutcome::Declined,
                }
            }),
        }
    }

    /// Convenience for the common case: match by concrete type (see
    /// [`Matcher::of_type`]).
    pub fn of_type<C, R>(action: impl FnMut(&C) -> HandlerOutcome<R> + 'static) -> Self
    where
        C: 'static,
        R: 'static,
    {
        Self::new(Matcher::of_type::<C>(), action)
    }
}

/// Install `bindings` for the dynamic extent of `body`, newest on top of
/// any outer `handling`, evaluated in the textual (left-to-right) order
/// given here for a single `signal`/`error` call (§4.3 step 1).
///
/// `dispatch` always walks the handler stack newest-first, so to make
/// the *first*-declared pair win within this one call, it has to end up
/// as the newest single frame of the group — hence pushing in reverse.
/// Frames are popped on every exit from `body` — normal return, or any
/// non-local transfer passing through — via [`HandlerGroupGuard`], which
/// pops `frame_ids` in reverse and so still unwinds this group in actual
/// stack (LIFO) order regardless of the reversal here.
pub fn handling<T>(bindings: Vec<HandlerBinding>, body: impl FnOnce() -> T) -> T {
    let frame_ids = bindings
        .into_iter()
        .rev()
        .map(|binding| context::push_handler(binding.matcher, binding.action))
        .collect();
    let _guard = HandlerGroupGuard::new(frame_ids);
    body()
}

/// Announce `condition`. Ignorable: if no handler accepts it, or every
/// accepting handler declines, this returns [`HandlerOutcome::Declined`]
/// without side effect.
pub fn signal<C, R>(condition: C) -> HandlerOutcome<R>
where
    C: Condition,
    R: 'static,
{
    log::debug!("signal: {condition:?}");
    match context::dispatch(&condition as &dyn Any) {
        HandlerOutcome::Handled(v) => HandlerOutcome::Handled(downcast_handled(v)),
        HandlerOutcome::Declined => HandlerOutcome::Declined,
    }
}

/// Announce `condition`; unlike [`signal`], an unhandled `error` is
/// fatal. If a handler accepts and returns [`HandlerOutcome::Handled`],
/// that value is returned. If every accepting handler declines (or none
/// accepts), this logs the condition and aborts the process — there is
/// no recoverable "did not handle" return for `error`, by design.
pub fn error<C, R>(condition: C) -> R
where
    C: Condition,
    R: 'static,
{
    log::debug!("error: {condition:?}");
    match context::dispatch(&condition as &dyn Any) {
        HandlerOutcome::Handled(v) => downcast_handled(v),
        HandlerOutcome::Declined => {
            log::error!("unhandled error condition, aborting: {condition:?}");
            eprintln!("fatal: unhandled condition: {condition:?}");
            std::process::abort();
        }
    }
}

fn downcast_handled<R: 'static>(value: Box<dyn Any>) -> R {
    *value.downcast::<R>().unwrap_or_else(|_| {
        panic!("cond: a handler's Handled(..) value did not match the type expected at this signal/error call site")
    })
}
