//! Standard unavailability policies.
//!
//! - [`FailFast`]: the default, fails the call with `ServiceUnavailable`
//! - [`Ignore`]: returns normally, the call ends in `NoInstanceAvailable`
//! - [`LoggingPolicy`]: logs the event, then defers to an inner policy
//! - [`FnPolicy`]: adapts a closure

pub mod closure;
pub mod fail_fast;
pub mod logging;

pub use closure::{FnPolicy, policy_fn};
pub use fail_fast::{FailFast, Ignore};
pub use logging::LoggingPolicy;
