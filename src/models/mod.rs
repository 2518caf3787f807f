//! Data models for test dispatching
//!
//! Suite and type entries describe what can be run; invocations and
//! results describe what a single run did.

mod invocation;
mod suite;

pub use invocation::{Invocation, InvocationResult};
pub use suite::{SuiteEntry, TypeEntry, TypeSuites};
