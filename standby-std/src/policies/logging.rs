//! Logging policy for unavailability observation.

use super::fail_fast::FailFast;
use standby_core::{BoxError, Unavailable, UnavailabilityPolicy};

/// A policy that logs the event, then hands it to an inner policy.
///
/// Wrap [`FailFast`] to log and fail, or [`Ignore`](super::Ignore) to log and
/// carry on. Events are emitted at `warn` level when the `tracing` feature is
/// enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingPolicy<P = FailFast> {
    inner: P,
}

impl<P> LoggingPolicy<P> {
    /// Create a logging policy around `inner`.
    pub const fn new(inner: P) -> Self {
        Self { inner }
    }

    /// Get a reference to the inner policy.
    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: UnavailabilityPolicy> UnavailabilityPolicy for LoggingPolicy<P> {
    async fn handle(&self, event: &Unavailable<'_>) -> Result<(), BoxError> {
        #[cfg(feature = "tracing")]
        {
            tracing::warn!(
                filter = %event.filter(),
                operation = event.operation(),
                arguments = ?event.arguments(),
                timeout = ?event.timeout(),
                "no service instance available"
            );
        }
        self.inner.handle(event).await
    }
}
