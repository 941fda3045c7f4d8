//! Operations and the services that execute them.
//!
//! There is no runtime reflection: each method that should be reachable
//! through a proxy is described by an [`Operation`] type, and an instance
//! opts into it by implementing [`Service`] for that operation.

use crate::error::BoxError;
use std::{fmt::Debug, future::Future};

/// A typed call that can be forwarded through a proxy.
///
/// The value of an operation *is* its argument list. `Debug` is required so
/// policies and errors can describe the call.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Debug)]
/// struct SayHello { name: String }
///
/// impl Operation for SayHello {
///     const NAME: &'static str = "sayHello";
///     type Output = String;
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an `Operation`",
    label = "missing `Operation` implementation",
    note = "Operations must be `Debug + Send + Sync + 'static` and declare a `NAME` and an `Output`."
)]
pub trait Operation: Debug + Send + Sync + 'static {
    /// The operation identity, as reported to policies and in errors.
    const NAME: &'static str;

    /// The value produced by a successful call.
    type Output: Send + 'static;
}

/// A concrete instance able to execute `Op`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot serve operation `{Op}`",
    label = "missing `Service<{Op}>` implementation",
    note = "Implement `Service<{Op}>` for the instance type the registry hands out."
)]
pub trait Service<Op: Operation>: Send + Sync + 'static {
    /// Executes the operation.
    ///
    /// Errors returned here reach the proxy's caller unchanged.
    fn call(&self, op: Op) -> impl Future<Output = Result<Op::Output, BoxError>> + Send;
}
