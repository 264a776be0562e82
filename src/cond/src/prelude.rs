//! `use cond::prelude::*;` to bring the seven operators and the types
//! needed to call them into scope.

pub use crate::escape::{to_escape, Escape};
pub use crate::handling::{error, handling, signal, HandlerBinding};
pub use crate::restart::{available_restart, invoke_restart, with_restart, RestartBinding};
pub use cond_core::{Condition, ConditionError, HandlerOutcome, Matcher, RestartName};
