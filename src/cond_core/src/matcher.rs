//! The predicate half of a handler or restart-selection rule.
//!
//! <div class="admonition-follows"></div>
//!
//! > **Rationale:** the spec deliberately imposes no condition
//! > hierarchy. [`Matcher`] is the entire hierarchy a user gets: either
//! > "the condition's concrete type is `T`" ([`Matcher::of_type`]) or
//! > "an arbitrary predicate accepts it" ([`Matcher::predicate`]).
//! > Nothing stops a caller from composing the two (e.g. a predicate
//! > that downcasts to `T` and then inspects a field).

use core::any::Any;

/// A type-erased acceptance test for a signaled condition.
pub struct Matcher {
    test: Box<dyn Fn(&dyn Any) -> bool>,
}

impl Matcher {
    /// Accept any condition whose concrete type is exactly `T`.
    pub fn of_type<T: 'static>() -> Self {
        Self {
            test: Box::new(|c: &dyn Any| c.is::<T>()),
        }
    }

    /// Accept a condition via an arbitrary predicate over its
    /// type-erased form. Most predicates will `downcast_ref::<T>()`
    /// first and return `false` on mismatch.
    pub fn predicate(f: impl Fn(&dyn Any) -> bool + 'static) -> Self {
        Self { test: Box::new(f) }
    }

    /// Run the acceptance test.
    pub fn accepts(&self, condition: &dyn Any) -> bool {
        (self.test)(condition)
    }
}

impl core::fmt::Debug for Matcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Matcher(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Foo;
    #[derive(Debug)]
    struct Bar;

    #[test]
    fn of_type_matches_exact_type_only() {
        let m = Matcher::of_type::<Foo>();
        assert!(m.accepts(&Foo as &dyn Any));
        assert!(!m.accepts(&Bar as &dyn Any));
    }

    #[test]
    fn predicate_runs_arbitrary_logic() {
        let m = Matcher::predicate(|c| c.downcast_ref::<i32>().is_some_and(|&n| n > 0));
        assert!(m.accepts(&5_i32 as &dyn Any));
        assert!(!m.accepts(&(-5_i32) as &dyn Any));
        assert!(!m.accepts(&Foo as &dyn Any));
    }
}
