//! # Unavailability Policy
//!
//! The hook a proxy runs when no matching instance showed up within its
//! timeout.
//!
//! A policy is a side-effecting collaborator: returning `Err` ends the
//! dispatch with that error, returning `Ok(())` lets the proxy continue (it
//! will then fail with `NoInstanceAvailable` unless an instance became known
//! in the meantime). A policy never returns a substitute instance.
//!
//! # Static vs Dynamic Dispatch
//!
//! [`UnavailabilityPolicy`] uses native `async fn` in traits. Proxies store
//! their policy as `Arc<dyn DynUnavailabilityPolicy>` so it can be swapped at
//! runtime; every `UnavailabilityPolicy` is a [`DynUnavailabilityPolicy`]
//! through a blanket implementation.

use crate::error::{BoxError, ProxyError};
use std::{fmt, future::Future, pin::Pin, sync::Arc, time::Duration};

/// Call-scoped view of a pending invocation.
///
/// Borrowed from the operation being dispatched; never outlives the call.
#[derive(Clone, Copy)]
pub struct Invocation<'a> {
    operation: &'static str,
    arguments: &'a (dyn fmt::Debug + Sync),
}

impl<'a> Invocation<'a> {
    /// Creates a view over an operation identity and its arguments.
    pub fn new(operation: &'static str, arguments: &'a (dyn fmt::Debug + Sync)) -> Self {
        Self {
            operation,
            arguments,
        }
    }

    /// The operation identity.
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// The call arguments.
    pub fn arguments(&self) -> &'a (dyn fmt::Debug + Sync) {
        self.arguments
    }
}

impl fmt::Debug for Invocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invocation")
            .field("operation", &self.operation)
            .field("arguments", &self.arguments)
            .finish()
    }
}

/// Everything a policy learns about an unavailable-instance event.
#[derive(Debug, Clone, Copy)]
pub struct Unavailable<'a> {
    filter: &'a str,
    invocation: Invocation<'a>,
    timeout: Duration,
}

impl<'a> Unavailable<'a> {
    /// Creates the event for one failed resolution.
    pub fn new(filter: &'a str, invocation: Invocation<'a>, timeout: Duration) -> Self {
        Self {
            filter,
            invocation,
            timeout,
        }
    }

    /// The proxy's selection filter.
    pub fn filter(&self) -> &'a str {
        self.filter
    }

    /// The pending invocation.
    pub fn invocation(&self) -> Invocation<'a> {
        self.invocation
    }

    /// The operation identity.
    pub fn operation(&self) -> &'static str {
        self.invocation.operation()
    }

    /// The call arguments.
    pub fn arguments(&self) -> &'a (dyn fmt::Debug + Sync) {
        self.invocation.arguments()
    }

    /// The wait that elapsed before the policy was consulted.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the [`ProxyError::ServiceUnavailable`] describing this event.
    pub fn to_error(&self) -> ProxyError {
        ProxyError::ServiceUnavailable {
            filter: self.filter.to_owned(),
            operation: self.operation(),
            arguments: format!("{:?}", self.arguments()),
            timeout: self.timeout,
        }
    }
}

/// Decides what happens when no instance is available.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an `UnavailabilityPolicy`",
    label = "missing `UnavailabilityPolicy` implementation",
    note = "Policies must implement `handle` for the `Unavailable` event."
)]
pub trait UnavailabilityPolicy: Send + Sync + 'static {
    /// Handles an unavailable-instance event.
    fn handle(&self, event: &Unavailable<'_>)
    -> impl Future<Output = Result<(), BoxError>> + Send;
}

/// Dynamic object-safe version of [`UnavailabilityPolicy`].
pub trait DynUnavailabilityPolicy: Send + Sync + 'static {
    /// Handles an unavailable-instance event (dynamic dispatch version).
    fn handle_dyn<'a>(
        &'a self,
        event: &'a Unavailable<'a>,
    ) -> Pin<Box<dyn Future<Output = Result<(), BoxError>> + Send + 'a>>;
}

impl<T: UnavailabilityPolicy> DynUnavailabilityPolicy for T {
    fn handle_dyn<'a>(
        &'a self,
        event: &'a Unavailable<'a>,
    ) -> Pin<Box<dyn Future<Output = Result<(), BoxError>> + Send + 'a>> {
        Box::pin(self.handle(event))
    }
}

// Allow a shared policy object wherever a static policy is expected.
impl UnavailabilityPolicy for Arc<dyn DynUnavailabilityPolicy> {
    async fn handle(&self, event: &Unavailable<'_>) -> Result<(), BoxError> {
        // Deref to the trait object; `self.handle_dyn` would resolve back to this impl.
        (**self).handle_dyn(event).await
    }
}
