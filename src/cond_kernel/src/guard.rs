//! RAII scoped-release for `handling`.
//!
//! `to_escape` and `with_restart` catch non-local transfers themselves
//! (they need to inspect the unwind payload to decide whether it
//! targets them), so they pop their frames with a plain function call
//! right after `catch_unwind` returns. `handling` never catches
//! anything — it just needs its frames gone on every exit path,
//! including when an unrelated transfer passes straight through it —
//! which is exactly what a `Drop` impl gives for free under Rust's
//! unwind-aware scoping (§4.1).

use cond_core::FrameId;

use crate::context::pop_handler;

/// Pops every frame in `frame_ids`, newest first, when dropped —
/// including when dropped while unwinding.
pub struct HandlerGroupGuard {
    frame_ids: Vec<FrameId>,
}

impl HandlerGroupGuard {
    pub fn new(frame_ids: Vec<FrameId>) -> Self {
        Self { frame_ids }
    }
}

impl Drop for HandlerGroupGuard {
    fn drop(&mut self) {
        for &frame_id in self.frame_ids.iter().rev() {
            pop_handler(frame_id);
        }
    }
}
