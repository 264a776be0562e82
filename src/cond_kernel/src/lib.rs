//! The dynamic-context engine.
//!
//! This crate owns the three per-thread stacks described by the
//! condition-system vocabulary in [`cond_core`] — handlers, restarts,
//! escapes — plus the RAII guard that keeps `handling`'s frames balanced
//! and the [`Unwind`] payload that the facade crate (`cond`) throws
//! through [`std::panic`] to implement non-local transfer.
//!
//! Application code is not expected to depend on this crate directly;
//! it exists to let `cond`'s seven operators stay thin wrappers around a
//! tested engine. It is still a public, documented crate — useful for
//! writing a custom [`cond_core::Matcher`], or for asserting stack depth
//! from a test, as the `quickcheck` properties in `cond` do.
//!
//! [`Unwind`]: unwind::Unwind

pub mod context;
pub mod guard;
pub mod unwind;
