use core::sync::atomic::{AtomicU64, Ordering};

/// Identifies the binding frame (escape point or restart group) that a
/// non-local transfer targets.
///
/// (I2): unique across the lifetime of the process. A monotonic counter
/// suffices; we don't reuse ids even after their frame is popped, so a
/// stale [`BindingId`] captured by an expired escape closure can never
/// collide with a frame pushed later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingId(u64);

impl BindingId {
    /// Allocate a fresh, process-wide unique id.
    pub fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Identifies a single pushed frame (one handler, one restart, one
/// escape point) for the purposes of checked `pop`.
///
/// Distinct from [`BindingId`] because one `with_restart` call allocates
/// one `BindingId` but pushes one [`FrameId`] per declared restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(u64);

impl FrameId {
    /// Allocate a fresh, process-wide unique id.
    pub fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}
