use core::fmt;

/// The macro to define [`ConditionError`].
///
/// A small amount of macro boilerplate buys a `Debug` impl whose output
/// is the variant's name, which is all a fatal diagnostic needs.
macro_rules! define_condition_error {
    (
        $( #[$meta:meta] )*
        pub enum ConditionError {
            $(
                $( #[$vmeta:meta] )*
                $vname:ident
            ),* $(,)*
        }
    ) => {
        $( #[$meta] )*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ConditionError {
            $(
                $( #[$vmeta] )*
                $vname
            ),*
        }

        impl ConditionError {
            /// Get the short name of the error, used verbatim in fatal
            /// diagnostics.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( Self::$vname => stringify!($vname), )*
                }
            }
        }

        impl fmt::Debug for ConditionError {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl fmt::Display for ConditionError {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(self, f)
            }
        }
    };
}

define_condition_error! {
    /// The conditions the core itself can signal, as opposed to
    /// conditions signaled by application code.
    ///
    /// These are ordinary conditions — a caller may `handling` any of
    /// them just like an application-defined condition — not a
    /// privileged error channel.
    pub enum ConditionError {
        /// `invoke_restart` found no restart frame matching the
        /// requested name on the current thread's restart stack.
        NoSuchRestart,
        /// An escape closure was called after its `to_escape` frame had
        /// already returned.
        EscapeExpired,
        /// A pop was attempted with a `frame_id` that didn't match the
        /// expected top of its stack. This indicates a library bug, or
        /// an escape/restart/handler guard that was resumed on a
        /// different thread than the one that pushed it.
        UnbalancedStack,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_is_variant_name() {
        assert_eq!(format!("{:?}", ConditionError::NoSuchRestart), "NoSuchRestart");
        assert_eq!(format!("{:?}", ConditionError::EscapeExpired), "EscapeExpired");
        assert_eq!(format!("{:?}", ConditionError::UnbalancedStack), "UnbalancedStack");
    }
}
