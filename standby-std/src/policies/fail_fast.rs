//! Fail-fast and no-op policies.

use standby_core::{BoxError, Unavailable, UnavailabilityPolicy};

/// The default policy: fails the call with `ProxyError::ServiceUnavailable`.
///
/// The error carries the filter, operation, arguments, and timeout so the
/// caller sees why the call could not be dispatched.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailFast;

impl UnavailabilityPolicy for FailFast {
    async fn handle(&self, event: &Unavailable<'_>) -> Result<(), BoxError> {
        Err(Box::new(event.to_error()))
    }
}

/// A policy that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ignore;

impl UnavailabilityPolicy for Ignore {
    async fn handle(&self, _event: &Unavailable<'_>) -> Result<(), BoxError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use standby_core::{Invocation, ProxyError};
    use std::time::Duration;

    #[tokio::test]
    async fn test_fail_fast_raises_service_unavailable() {
        let args = ("ada", 3);
        let event = Unavailable::new(
            "(type=Greeter)",
            Invocation::new("greet", &args),
            Duration::from_millis(50),
        );

        let err = FailFast.handle(&event).await.unwrap_err();

        assert_eq!(
            err.downcast_ref::<ProxyError>(),
            Some(&ProxyError::ServiceUnavailable {
                filter: "(type=Greeter)".to_string(),
                operation: "greet",
                arguments: r#"("ada", 3)"#.to_string(),
                timeout: Duration::from_millis(50),
            })
        );
    }

    #[tokio::test]
    async fn test_ignore_returns_normally() {
        let event = Unavailable::new("(type=Greeter)", Invocation::new("greet", &()), Duration::ZERO);
        assert!(Ignore.handle(&event).await.is_ok());
    }
}
