//! Per-thread handler/restart/escape stacks.
//!
//! Every stack obeys strict LIFO. Pops are checked against the
//! [`FrameId`] the caller expects to find on top; a mismatch means a
//! guard has been resumed out of order (typically: on a different
//! thread than the one that pushed it) and is treated as fatal, per the
//! `UnbalancedStack` condition in `cond_core::error`.

use std::any::Any;
use std::cell::RefCell;

use cond_core::{BindingId, FrameId, HandlerOutcome, Matcher, RestartName};

/// A handler action, erased over both its condition type and its
/// result type. `cond`'s `HandlerBinding` is responsible for the
/// downcasts at either boundary.
pub type ErasedAction = Box<dyn FnMut(&dyn Any) -> HandlerOutcome<Box<dyn Any>>>;

struct HandlerEntry {
    matcher: Matcher,
    // Taken out for the duration of a call so that a re-entrant
    // `signal` from within the action can't double-borrow it; see
    // `dispatch`.
    action: Option<ErasedAction>,
    // Hidden from matching while an enclosing `dispatch` call is
    // running the action for this frame or a newer one (I5's "a
    // handler never re-handles its own condition").
    suspended: bool,
    frame_id: FrameId,
}

struct RestartEntry {
    name: RestartName,
    binding_id: BindingId,
    frame_id: FrameId,
}

struct EscapeEntry {
    binding_id: BindingId,
    frame_id: FrameId,
}

#[derive(Default)]
struct DynamicContext {
    handlers: Vec<HandlerEntry>,
    restarts: Vec<RestartEntry>,
    escapes: Vec<EscapeEntry>,
}

thread_local! {
    static CONTEXT: RefCell<DynamicContext> = RefCell::new(DynamicContext::default());
}

fn fatal_unbalanced(stack: &str) -> ! {
    log::error!("condition system: unbalanced {stack} stack; a guard popped out of order (resumed on another thread?)");
    std::process::abort();
}

// --- handlers --------------------------------------------------------

pub fn push_handler(matcher: Matcher, action: ErasedAction) -> FrameId {
    let frame_id = FrameId::fresh();
    log::trace!("push_handler {frame_id:?}");
    CONTEXT.with(|c| {
        c.borrow_mut().handlers.push(HandlerEntry {
            matcher,
            action: Some(action),
            suspended: false,
            frame_id,
        });
    });
    frame_id
}

pub fn pop_handler(frame_id: FrameId) {
    log::trace!("pop_handler {frame_id:?}");
    CONTEXT.with(|c| {
        let mut ctx = c.borrow_mut();
        match ctx.handlers.last() {
            Some(top) if top.frame_id == frame_id => {
                ctx.handlers.pop();
            }
            _ => {
                drop(ctx);
                fatal_unbalanced("handler");
            }
        }
    });
}

pub fn handler_depth() -> usize {
    CONTEXT.with(|c| c.borrow().handlers.len())
}

/// Walk the handler stack newest-first, running the first accepting,
/// non-suspended handler's action. Implements the `signal`/`error`
/// dispatch loop in full, including the "truncated to everything
/// strictly older than this handler" visibility rule (§4.3): while an
/// action runs, its own frame and every frame newer than it are marked
/// suspended, so a nested `signal` from within the action can't re-enter
/// this handler or re-try ones that already declined this walk.
pub fn dispatch(condition: &dyn Any) -> HandlerOutcome<Box<dyn Any>> {
    let len = CONTEXT.with(|c| c.borrow().handlers.len());
    let mut i = len;
    while i > 0 {
        i -= 1;

        let accepts = CONTEXT.with(|c| {
            let ctx = c.borrow();
            let entry = &ctx.handlers[i];
            !entry.suspended && entry.matcher.accepts(condition)
        });
        if !accepts {
            continue;
        }

        log::debug!("dispatch: handler at depth {i} accepts, running action");
        let saved_suspend = suspend_from(i);
        let mut action = CONTEXT
            .with(|c| c.borrow_mut().handlers[i].action.take())
            .expect("dispatch: handler action missing (reentered its own call?)");

        let outcome = action(condition);

        // If `action` unwound (non-local transfer), we never get here;
        // the frame at `i` is popped by its owning `handling`'s guard
        // as the unwind passes through, action slot and all.
        CONTEXT.with(|c| {
            let mut ctx = c.borrow_mut();
            if i < ctx.handlers.len() {
                ctx.handlers[i].action = Some(action);
            }
        });
        restore_suspend(saved_suspend);

        match outcome {
            HandlerOutcome::Handled(v) => return HandlerOutcome::Handled(v),
            HandlerOutcome::Declined => {
                log::debug!("dispatch: handler at depth {i} declined, continuing");
                continue;
            }
        }
    }
    HandlerOutcome::Declined
}

fn suspend_from(i: usize) -> Vec<(usize, bool)> {
    CONTEXT.with(|c| {
        let mut ctx = c.borrow_mut();
        let mut saved = Vec::new();
        for idx in i..ctx.handlers.len() {
            saved.push((idx, ctx.handlers[idx].suspended));
            ctx.handlers[idx].suspended = true;
        }
        saved
    })
}

fn restore_suspend(saved: Vec<(usize, bool)>) {
    CONTEXT.with(|c| {
        let mut ctx = c.borrow_mut();
        for (idx, prev) in saved {
            if idx < ctx.handlers.len() {
                ctx.handlers[idx].suspended = prev;
            }
        }
    });
}

// --- restarts ----------------------------------------------------------

/// Push one restart frame per `name` in `names`, all sharing `binding_id`.
/// Returns their [`FrameId`]s in push order (oldest first), for the
/// caller to hand to [`pop_restart_group`].
pub fn push_restart_group(binding_id: BindingId, names: Vec<RestartName>) -> Vec<FrameId> {
    CONTEXT.with(|c| {
        let mut ctx = c.borrow_mut();
        names
            .into_iter()
            .map(|name| {
                let frame_id = FrameId::fresh();
                log::trace!("push_restart {name:?} {frame_id:?} binding={binding_id:?}");
                ctx.restarts.push(RestartEntry {
                    name,
                    binding_id,
                    frame_id,
                });
                frame_id
            })
            .collect()
    })
}

pub fn pop_restart_group(frame_ids: &[FrameId]) {
    CONTEXT.with(|c| {
        let mut ctx = c.borrow_mut();
        for &frame_id in frame_ids.iter().rev() {
            match ctx.restarts.last() {
                Some(top) if top.frame_id == frame_id => {
                    ctx.restarts.pop();
                }
                _ => {
                    drop(ctx);
                    fatal_unbalanced("restart");
                }
            }
        }
    });
}

pub fn restart_depth() -> usize {
    CONTEXT.with(|c| c.borrow().restarts.len())
}

/// Innermost-first lookup: the newest pushed restart sharing `name` wins
/// (§4.4 tie-break).
pub fn find_restart(name: RestartName) -> Option<BindingId> {
    CONTEXT.with(|c| {
        let ctx = c.borrow();
        ctx.restarts
            .iter()
            .rev()
            .find(|entry| entry.name == name)
            .map(|entry| entry.binding_id)
    })
}

// --- escapes -------------------------------------------------------------

/// Push a fresh escape frame. Returns its `BindingId` (the non-local
/// transfer target) and its `FrameId` (used to check liveness and to
/// pop).
pub fn push_escape() -> (BindingId, FrameId) {
    let binding_id = BindingId::fresh();
    let frame_id = FrameId::fresh();
    log::trace!("push_escape {frame_id:?} binding={binding_id:?}");
    CONTEXT.with(|c| {
        c.borrow_mut().escapes.push(EscapeEntry {
            binding_id,
            frame_id,
        });
    });
    (binding_id, frame_id)
}

pub fn pop_escape(frame_id: FrameId) {
    log::trace!("pop_escape {frame_id:?}");
    CONTEXT.with(|c| {
        let mut ctx = c.borrow_mut();
        match ctx.escapes.last() {
            Some(top) if top.frame_id == frame_id => {
                ctx.escapes.pop();
            }
            _ => {
                drop(ctx);
                fatal_unbalanced("escape");
            }
        }
    });
}

pub fn escape_depth() -> usize {
    CONTEXT.with(|c| c.borrow().escapes.len())
}

/// (I4): an escape frame is usable only while it's still on the stack.
/// Once [`pop_escape`] has removed it — normal return, self-transfer, or
/// pass-through of an outer transfer — this returns `false` for its
/// `frame_id` forever; `FrameId`s are never reused (I2).
pub fn escape_is_active(frame_id: FrameId) -> bool {
    CONTEXT.with(|c| c.borrow().escapes.iter().any(|e| e.frame_id == frame_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_push_pop_balances() {
        assert_eq!(handler_depth(), 0);
        let fid = push_handler(
            Matcher::of_type::<i32>(),
            Box::new(|_| HandlerOutcome::Declined),
        );
        assert_eq!(handler_depth(), 1);
        pop_handler(fid);
        assert_eq!(handler_depth(), 0);
    }

    #[test]
    fn restart_group_shares_one_binding() {
        let binding_id = BindingId::fresh();
        let frame_ids = push_restart_group(binding_id, vec!["zero", "retry"]);
        assert_eq!(restart_depth(), 2);
        assert_eq!(find_restart("retry"), Some(binding_id));
        pop_restart_group(&frame_ids);
        assert_eq!(restart_depth(), 0);
    }

    #[test]
    fn innermost_restart_wins() {
        let outer = push_restart_group(BindingId::fresh(), vec!["r"]);
        let inner = push_restart_group(BindingId::fresh(), vec!["r"]);
        let inner_binding = find_restart("r").unwrap();
        pop_restart_group(&inner);
        let outer_binding = find_restart("r").unwrap();
        assert_ne!(inner_binding, outer_binding);
        pop_restart_group(&outer);
    }

    #[test]
    fn escape_liveness_tracks_pop() {
        let (_binding, frame_id) = push_escape();
        assert!(escape_is_active(frame_id));
        pop_escape(frame_id);
        assert!(!escape_is_active(frame_id));
    }
}
