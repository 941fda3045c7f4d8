//! Closure-backed policies.

use standby_core::{BoxError, Unavailable, UnavailabilityPolicy};

/// A policy backed by a synchronous closure.
///
/// # Example
///
/// ```rust,ignore
/// let alerts = alerts.clone();
/// let policy = FnPolicy::new(move |event| {
///     alerts.send(event.filter().to_owned());
///     Ok(())
/// });
/// ```
pub struct FnPolicy<F> {
    f: F,
}

impl<F> FnPolicy<F>
where
    F: Fn(&Unavailable<'_>) -> Result<(), BoxError> + Send + Sync + 'static,
{
    /// Create a policy from a closure.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> UnavailabilityPolicy for FnPolicy<F>
where
    F: Fn(&Unavailable<'_>) -> Result<(), BoxError> + Send + Sync + 'static,
{
    async fn handle(&self, event: &Unavailable<'_>) -> Result<(), BoxError> {
        (self.f)(event)
    }
}

/// Shorthand for [`FnPolicy::new`].
pub fn policy_fn<F>(f: F) -> FnPolicy<F>
where
    F: Fn(&Unavailable<'_>) -> Result<(), BoxError> + Send + Sync + 'static,
{
    FnPolicy::new(f)
}
